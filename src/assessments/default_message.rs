// src/assessments/default_message.rs
use crate::config::{InstancesMap, ManualTestStatus};

pub const NO_MATCHING_INSTANCES: &str = "No matching instances";
pub const NO_FAILING_INSTANCES: &str = "No failing instances";

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultMessageComponent {
    pub message: String,
}

/// Resolves `(instances, selected step)` to a message replacing the grid, or `None`.
pub type DefaultMessageFn<'g> = Box<dyn Fn(&InstancesMap, &str) -> Option<DefaultMessageComponent> + 'g>;

/// Picks which generator function a table uses.
pub type GetDefaultMessage = for<'g> fn(&'g AssessmentDefaultMessageGenerator) -> DefaultMessageFn<'g>;

#[derive(Debug, Default)]
pub struct AssessmentDefaultMessageGenerator;

impl AssessmentDefaultMessageGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn get_no_matching_instance_message(
        &self,
        instances_map: &InstancesMap,
        selected_test_step: &str,
    ) -> Option<DefaultMessageComponent> {
        let any_match = instances_map
            .values()
            .any(|instance| instance.has_result_for_step(selected_test_step));

        if any_match {
            None
        } else {
            Some(DefaultMessageComponent { message: NO_MATCHING_INSTANCES.to_string() })
        }
    }

    pub fn get_no_failing_instance_message(
        &self,
        instances_map: &InstancesMap,
        selected_test_step: &str,
    ) -> Option<DefaultMessageComponent> {
        if let Some(no_match) = self.get_no_matching_instance_message(instances_map, selected_test_step) {
            return Some(no_match);
        }

        let any_failing = instances_map
            .values()
            .any(|instance| instance.step_status(selected_test_step) == Some(ManualTestStatus::Fail));

        if any_failing {
            None
        } else {
            Some(DefaultMessageComponent { message: NO_FAILING_INSTANCES.to_string() })
        }
    }
}

pub fn no_matching_instance_message(generator: &AssessmentDefaultMessageGenerator) -> DefaultMessageFn<'_> {
    Box::new(move |map: &InstancesMap, step: &str| generator.get_no_matching_instance_message(map, step))
}

pub fn no_failing_instance_message(generator: &AssessmentDefaultMessageGenerator) -> DefaultMessageFn<'_> {
    Box::new(move |map: &InstancesMap, step: &str| generator.get_no_failing_instance_message(map, step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratedAssessmentInstance, PropertyBag, TestStepResult};
    use std::collections::BTreeMap;

    fn map_with(entries: &[(&str, &str, ManualTestStatus)]) -> InstancesMap {
        let mut map = InstancesMap::new();
        for (key, step, status) in entries {
            let mut results = BTreeMap::new();
            results.insert(step.to_string(), TestStepResult::new(*step, *status));
            map.insert(key.to_string(), GeneratedAssessmentInstance {
                target: vec![key.to_string()],
                html: String::new(),
                test_step_results: results,
                property_bag: PropertyBag::new(),
            });
        }
        map
    }

    #[test]
    fn empty_map_has_no_matching_instances() {
        let generator = AssessmentDefaultMessageGenerator::new();
        let message = no_matching_instance_message(&generator)(&InstancesMap::new(), "s1");
        assert_eq!(message.map(|m| m.message), Some(NO_MATCHING_INSTANCES.to_string()));
    }

    #[test]
    fn instances_for_other_steps_do_not_match() {
        let generator = AssessmentDefaultMessageGenerator::new();
        let map = map_with(&[("#a", "s2", ManualTestStatus::Pass)]);
        assert!(generator.get_no_matching_instance_message(&map, "s1").is_some());
        assert!(generator.get_no_matching_instance_message(&map, "s2").is_none());
    }

    #[test]
    fn no_failing_message_only_when_nothing_fails() {
        let generator = AssessmentDefaultMessageGenerator::new();
        let passing = map_with(&[("#a", "s1", ManualTestStatus::Pass), ("#b", "s1", ManualTestStatus::Unknown)]);
        let failing = map_with(&[("#a", "s1", ManualTestStatus::Pass), ("#b", "s1", ManualTestStatus::Fail)]);

        let message = no_failing_instance_message(&generator)(&passing, "s1");
        assert_eq!(message.map(|m| m.message), Some(NO_FAILING_INSTANCES.to_string()));
        assert!(no_failing_instance_message(&generator)(&failing, "s1").is_none());
    }
}
