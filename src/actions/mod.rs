// src/actions/mod.rs
use std::cell::RefCell;
use crate::config::{ManualTestStatus, TestType, UserCapturedInstance};

/// Store mutations requested by the UI. Applied by `AppState::apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EnableVisualHelper {
        test_type: TestType,
        step: String,
    },
    DisableVisualHelper {
        test_type: TestType,
        step: String,
    },
    ChangeVisualizationStateForAll {
        enabled: bool,
        test_type: TestType,
        step: String,
    },
    ChangeVisualizationState {
        enabled: bool,
        test_type: TestType,
        step: String,
        selector: String,
    },
    ChangeStepStatus {
        status: ManualTestStatus,
        test_type: TestType,
        step: String,
        selector: String,
    },
    PassUnmarkedInstances {
        test_type: TestType,
        step: String,
    },
    UpdateFocusedInstance {
        target: Vec<String>,
    },
    AddCapturedInstance {
        test_type: TestType,
        instance: UserCapturedInstance,
    },
    RemoveCapturedInstance {
        test_type: TestType,
        id: String,
    },
}

pub trait DetailsViewActionMessageCreator {
    fn enable_visual_helper(&self, test_type: TestType, step: &str);
    fn disable_visual_helper(&self, test_type: TestType, step: &str);
    fn change_assessment_visualization_state_for_all(&self, enabled: bool, test_type: TestType, step: &str);
    fn change_assessment_visualization_state(&self, enabled: bool, test_type: TestType, step: &str, selector: &str);
    fn change_manual_test_status(&self, status: ManualTestStatus, test_type: TestType, step: &str, selector: &str);
    fn pass_unmarked_instances(&self, test_type: TestType, step: &str);
    fn update_focused_instance_target(&self, target: &[String]);
    fn add_captured_instance(&self, test_type: TestType, instance: UserCapturedInstance);
    fn remove_captured_instance(&self, test_type: TestType, id: &str);
}

/// Collects actions raised while a frame is drawn; the app drains them afterwards.
#[derive(Debug, Default)]
pub struct ActionQueue {
    pending: RefCell<Vec<Action>>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, action: Action) {
        tracing::trace!(?action, "action queued");
        self.pending.borrow_mut().push(action);
    }

    pub fn drain(&self) -> Vec<Action> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }
}

impl DetailsViewActionMessageCreator for ActionQueue {
    fn enable_visual_helper(&self, test_type: TestType, step: &str) {
        self.push(Action::EnableVisualHelper { test_type, step: step.to_string() });
    }

    fn disable_visual_helper(&self, test_type: TestType, step: &str) {
        self.push(Action::DisableVisualHelper { test_type, step: step.to_string() });
    }

    fn change_assessment_visualization_state_for_all(&self, enabled: bool, test_type: TestType, step: &str) {
        self.push(Action::ChangeVisualizationStateForAll {
            enabled,
            test_type,
            step: step.to_string(),
        });
    }

    fn change_assessment_visualization_state(&self, enabled: bool, test_type: TestType, step: &str, selector: &str) {
        self.push(Action::ChangeVisualizationState {
            enabled,
            test_type,
            step: step.to_string(),
            selector: selector.to_string(),
        });
    }

    fn change_manual_test_status(&self, status: ManualTestStatus, test_type: TestType, step: &str, selector: &str) {
        self.push(Action::ChangeStepStatus {
            status,
            test_type,
            step: step.to_string(),
            selector: selector.to_string(),
        });
    }

    fn pass_unmarked_instances(&self, test_type: TestType, step: &str) {
        self.push(Action::PassUnmarkedInstances { test_type, step: step.to_string() });
    }

    fn update_focused_instance_target(&self, target: &[String]) {
        self.push(Action::UpdateFocusedInstance { target: target.to_vec() });
    }

    fn add_captured_instance(&self, test_type: TestType, instance: UserCapturedInstance) {
        self.push(Action::AddCapturedInstance { test_type, instance });
    }

    fn remove_captured_instance(&self, test_type: TestType, id: &str) {
        self.push(Action::RemoveCapturedInstance { test_type, id: id.to_string() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_actions_in_order_and_empties_queue() {
        let queue = ActionQueue::new();
        queue.enable_visual_helper(TestType::Headings, "headingFunction");
        queue.pass_unmarked_instances(TestType::Headings, "headingFunction");

        assert_eq!(
            queue.drain(),
            vec![
                Action::EnableVisualHelper { test_type: TestType::Headings, step: "headingFunction".into() },
                Action::PassUnmarkedInstances { test_type: TestType::Headings, step: "headingFunction".into() },
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn focus_target_is_copied() {
        let queue = ActionQueue::new();
        let target = vec!["#frame".to_string(), "#el".to_string()];
        queue.update_focused_instance_target(&target);
        assert_eq!(queue.drain(), vec![Action::UpdateFocusedInstance { target }]);
    }
}
