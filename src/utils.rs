// src/utils.rs
use crate::config::{InstancesMap, GeneratedAssessmentInstance};

const SELECTOR_SEPARATOR: &str = ";";

pub fn selector_key(target: &[String]) -> String {
    target.join(SELECTOR_SEPARATOR)
}

pub fn find_instance<'a>(instances: &'a InstancesMap, target: &[String]) -> Option<&'a GeneratedAssessmentInstance> {
    instances.get(&selector_key(target))
}
