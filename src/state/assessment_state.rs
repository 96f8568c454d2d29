// src/state/assessment_state.rs
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::config::{InstancesMap, ManualTestStatus, UserCapturedInstance, GeneratedAssessmentInstance};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("no scan data has been loaded for this assessment")]
    NoAssessmentData,
    #[error("instance '{0}' not found")]
    UnknownInstance(String),
    #[error("instance '{selector}' has no result for step '{step}'")]
    MissingStepResult { selector: String, step: String },
    #[error("captured instance '{0}' not found")]
    UnknownCapturedInstance(String),
}

/// Per-assessment slice of the store. `None` instances means the scan has not produced data yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssessmentStoreData {
    pub generated_instances_map: Option<InstancesMap>,
    #[serde(default)]
    pub manual_instances: Vec<UserCapturedInstance>,
}

impl AssessmentStoreData {
    pub fn with_instances(instances: InstancesMap) -> Self {
        Self {
            generated_instances_map: Some(instances),
            manual_instances: Vec::new(),
        }
    }

    fn instances_mut(&mut self) -> Result<&mut InstancesMap, StoreError> {
        self.generated_instances_map.as_mut().ok_or(StoreError::NoAssessmentData)
    }

    fn instance_mut(&mut self, selector: &str) -> Result<&mut GeneratedAssessmentInstance, StoreError> {
        self.instances_mut()?
            .get_mut(selector)
            .ok_or_else(|| StoreError::UnknownInstance(selector.to_string()))
    }

    pub fn set_step_status(&mut self, step: &str, selector: &str, status: ManualTestStatus) -> Result<(), StoreError> {
        let instance = self.instance_mut(selector)?;
        let result = instance.test_step_results.get_mut(step).ok_or_else(|| StoreError::MissingStepResult {
            selector: selector.to_string(),
            step: step.to_string(),
        })?;
        result.status = status;
        Ok(())
    }

    /// Marks every UNKNOWN result of `step` as PASS and returns how many changed.
    pub fn pass_unmarked_instances(&mut self, step: &str) -> Result<usize, StoreError> {
        let mut changed = 0;
        for instance in self.instances_mut()?.values_mut() {
            if let Some(result) = instance.test_step_results.get_mut(step) {
                if result.status == ManualTestStatus::Unknown {
                    result.status = ManualTestStatus::Pass;
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    pub fn set_visualization(&mut self, step: &str, selector: &str, enabled: bool) -> Result<(), StoreError> {
        let instance = self.instance_mut(selector)?;
        let result = instance.test_step_results.get_mut(step).ok_or_else(|| StoreError::MissingStepResult {
            selector: selector.to_string(),
            step: step.to_string(),
        })?;
        result.is_visualization_enabled = enabled;
        Ok(())
    }

    /// Hidden instances are left alone.
    pub fn set_visualization_for_all(&mut self, step: &str, enabled: bool) -> Result<usize, StoreError> {
        let mut changed = 0;
        for instance in self.instances_mut()?.values_mut() {
            if let Some(result) = instance.test_step_results.get_mut(step) {
                if result.is_visible && result.is_visualization_enabled != enabled {
                    result.is_visualization_enabled = enabled;
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    /// FAIL if anything failed, UNKNOWN if anything is unmarked or nothing was found, else PASS.
    pub fn requirement_status(&self, step: &str) -> ManualTestStatus {
        let Some(instances) = &self.generated_instances_map else {
            return ManualTestStatus::Unknown;
        };

        let statuses: Vec<_> = instances.values().filter_map(|i| i.step_status(step)).collect();
        if statuses.contains(&ManualTestStatus::Fail) {
            ManualTestStatus::Fail
        } else if statuses.is_empty() || statuses.contains(&ManualTestStatus::Unknown) {
            ManualTestStatus::Unknown
        } else {
            ManualTestStatus::Pass
        }
    }

    pub fn add_captured_instance(&mut self, instance: UserCapturedInstance) {
        self.manual_instances.push(instance);
    }

    pub fn remove_captured_instance(&mut self, id: &str) -> Result<UserCapturedInstance, StoreError> {
        let index = self.manual_instances
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| StoreError::UnknownCapturedInstance(id.to_string()))?;
        Ok(self.manual_instances.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PropertyBag, TestStepResult};
    use std::collections::BTreeMap;

    const STEP: &str = "headingFunction";

    fn store(entries: &[(&str, ManualTestStatus)]) -> AssessmentStoreData {
        let mut map = InstancesMap::new();
        for (selector, status) in entries {
            let mut results = BTreeMap::new();
            results.insert(STEP.to_string(), TestStepResult::new(STEP, *status));
            map.insert(selector.to_string(), GeneratedAssessmentInstance {
                target: vec![selector.to_string()],
                html: String::new(),
                test_step_results: results,
                property_bag: PropertyBag::new(),
            });
        }
        AssessmentStoreData::with_instances(map)
    }

    fn status_of(data: &AssessmentStoreData, selector: &str) -> Option<ManualTestStatus> {
        data.generated_instances_map.as_ref()?.get(selector)?.step_status(STEP)
    }

    #[test]
    fn pass_unmarked_only_touches_unknown_results() {
        let mut data = store(&[
            ("#a", ManualTestStatus::Pass),
            ("#b", ManualTestStatus::Unknown),
            ("#c", ManualTestStatus::Fail),
            ("#d", ManualTestStatus::Unknown),
        ]);

        assert_eq!(data.pass_unmarked_instances(STEP), Ok(2));
        assert_eq!(status_of(&data, "#b"), Some(ManualTestStatus::Pass));
        assert_eq!(status_of(&data, "#c"), Some(ManualTestStatus::Fail));
        assert_eq!(status_of(&data, "#d"), Some(ManualTestStatus::Pass));
        assert_eq!(data.pass_unmarked_instances(STEP), Ok(0));
    }

    #[test]
    fn pass_unmarked_ignores_other_steps() {
        let mut data = store(&[("#a", ManualTestStatus::Unknown)]);
        assert_eq!(data.pass_unmarked_instances("headingLevel"), Ok(0));
        assert_eq!(status_of(&data, "#a"), Some(ManualTestStatus::Unknown));
    }

    #[test]
    fn mutations_without_scan_data_fail() {
        let mut data = AssessmentStoreData::default();
        assert_eq!(data.pass_unmarked_instances(STEP), Err(StoreError::NoAssessmentData));
        assert_eq!(
            data.set_step_status(STEP, "#a", ManualTestStatus::Pass),
            Err(StoreError::NoAssessmentData)
        );
    }

    #[test]
    fn set_step_status_reports_unknown_targets() {
        let mut data = store(&[("#a", ManualTestStatus::Unknown)]);
        assert_eq!(
            data.set_step_status(STEP, "#zzz", ManualTestStatus::Fail),
            Err(StoreError::UnknownInstance("#zzz".to_string()))
        );
        assert_eq!(
            data.set_step_status("headingLevel", "#a", ManualTestStatus::Fail),
            Err(StoreError::MissingStepResult { selector: "#a".to_string(), step: "headingLevel".to_string() })
        );
        data.set_step_status(STEP, "#a", ManualTestStatus::Fail).unwrap();
        assert_eq!(status_of(&data, "#a"), Some(ManualTestStatus::Fail));
    }

    #[test]
    fn visualization_for_all_skips_hidden_instances() {
        let mut data = store(&[("#a", ManualTestStatus::Unknown), ("#b", ManualTestStatus::Unknown)]);
        if let Some(map) = data.generated_instances_map.as_mut() {
            map.get_mut("#b").unwrap().test_step_results.get_mut(STEP).unwrap().is_visible = false;
        }

        assert_eq!(data.set_visualization_for_all(STEP, true), Ok(1));
        let map = data.generated_instances_map.as_ref().unwrap();
        assert!(map["#a"].test_step_results[STEP].is_visualization_enabled);
        assert!(!map["#b"].test_step_results[STEP].is_visualization_enabled);
    }

    #[test]
    fn requirement_status_summarises_step() {
        assert_eq!(AssessmentStoreData::default().requirement_status(STEP), ManualTestStatus::Unknown);
        assert_eq!(store(&[]).requirement_status(STEP), ManualTestStatus::Unknown);
        assert_eq!(
            store(&[("#a", ManualTestStatus::Pass), ("#b", ManualTestStatus::Pass)]).requirement_status(STEP),
            ManualTestStatus::Pass
        );
        assert_eq!(
            store(&[("#a", ManualTestStatus::Pass), ("#b", ManualTestStatus::Unknown)]).requirement_status(STEP),
            ManualTestStatus::Unknown
        );
        assert_eq!(
            store(&[("#a", ManualTestStatus::Fail), ("#b", ManualTestStatus::Unknown)]).requirement_status(STEP),
            ManualTestStatus::Fail
        );
    }

    #[test]
    fn captured_instances_add_and_remove() {
        let mut data = AssessmentStoreData::default();
        data.add_captured_instance(UserCapturedInstance {
            id: "c1".to_string(),
            description: "Decorative banner announced".to_string(),
            selector: None,
            html: None,
        });
        assert_eq!(data.manual_instances.len(), 1);
        assert_eq!(
            data.remove_captured_instance("nope"),
            Err(StoreError::UnknownCapturedInstance("nope".to_string()))
        );
        assert_eq!(data.remove_captured_instance("c1").map(|i| i.id), Ok("c1".to_string()));
        assert!(data.manual_instances.is_empty());
    }
}
