// src/ui/visual_helper_toggle.rs
use eframe::egui;

use crate::actions::DetailsViewActionMessageCreator;
use crate::config::{AssessmentNavState, InstancesMap, TestStepResult};

pub const VISUAL_HELPER_LABEL: &str = "Visual helper";

pub struct VisualHelperToggleProps<'a> {
    pub assessment_nav_state: &'a AssessmentNavState,
    pub instances_map: Option<&'a InstancesMap>,
    pub is_step_enabled: bool,
}

/// An instance that has a result for the selected step.
#[derive(Debug, Clone, Copy)]
pub struct StepInstance<'a> {
    pub selector: &'a str,
    pub result: &'a TestStepResult,
}

/// Decides how a visual helper toggle looks and what clicking it requests.
pub trait VisualHelperTogglePolicy {
    fn is_disabled(&self, props: &VisualHelperToggleProps<'_>, instances: &[StepInstance<'_>]) -> bool;

    fn is_checked(&self, props: &VisualHelperToggleProps<'_>, instances: &[StepInstance<'_>]) -> bool;

    fn on_toggle(&self, props: &VisualHelperToggleProps<'_>, currently_checked: bool);
}

/// Mirrors the store's enabled flag for the step and flips it on click.
pub struct RestartScanVisualHelperToggle<'a> {
    message_creator: &'a dyn DetailsViewActionMessageCreator,
}

impl<'a> RestartScanVisualHelperToggle<'a> {
    pub fn new(message_creator: &'a dyn DetailsViewActionMessageCreator) -> Self {
        Self { message_creator }
    }
}

impl VisualHelperTogglePolicy for RestartScanVisualHelperToggle<'_> {
    fn is_disabled(&self, _props: &VisualHelperToggleProps<'_>, _instances: &[StepInstance<'_>]) -> bool {
        false
    }

    fn is_checked(&self, props: &VisualHelperToggleProps<'_>, _instances: &[StepInstance<'_>]) -> bool {
        props.is_step_enabled
    }

    fn on_toggle(&self, props: &VisualHelperToggleProps<'_>, currently_checked: bool) {
        let nav_state = props.assessment_nav_state;
        if currently_checked {
            self.message_creator
                .disable_visual_helper(nav_state.selected_test_type, &nav_state.selected_test_step);
        } else {
            self.message_creator
                .enable_visual_helper(nav_state.selected_test_type, &nav_state.selected_test_step);
        }
    }
}

/// Shows or hides highlights for every visible instance of the step.
pub struct AssessmentVisualizationEnabledToggle<'a> {
    message_creator: &'a dyn DetailsViewActionMessageCreator,
}

impl<'a> AssessmentVisualizationEnabledToggle<'a> {
    pub fn new(message_creator: &'a dyn DetailsViewActionMessageCreator) -> Self {
        Self { message_creator }
    }
}

impl VisualHelperTogglePolicy for AssessmentVisualizationEnabledToggle<'_> {
    fn is_disabled(&self, _props: &VisualHelperToggleProps<'_>, instances: &[StepInstance<'_>]) -> bool {
        !instances.iter().any(|i| i.result.is_visible)
    }

    fn is_checked(&self, _props: &VisualHelperToggleProps<'_>, instances: &[StepInstance<'_>]) -> bool {
        instances.iter().any(|i| i.result.is_visualization_enabled)
    }

    fn on_toggle(&self, props: &VisualHelperToggleProps<'_>, currently_checked: bool) {
        let nav_state = props.assessment_nav_state;
        self.message_creator.change_assessment_visualization_state_for_all(
            !currently_checked,
            nav_state.selected_test_type,
            &nav_state.selected_test_step,
        );
    }
}

pub struct VisualHelperToggle<'a, P> {
    props: VisualHelperToggleProps<'a>,
    policy: P,
}

impl<'a, P: VisualHelperTogglePolicy> VisualHelperToggle<'a, P> {
    pub fn new(props: VisualHelperToggleProps<'a>, policy: P) -> Self {
        Self { props, policy }
    }

    pub fn filtered_instances(&self) -> Vec<StepInstance<'a>> {
        let step = self.props.assessment_nav_state.selected_test_step.as_str();
        self.props
            .instances_map
            .into_iter()
            .flat_map(|map| map.iter())
            .filter_map(|(selector, instance)| {
                instance
                    .test_step_results
                    .get(step)
                    .map(|result| StepInstance { selector: selector.as_str(), result })
            })
            .collect()
    }

    pub fn is_disabled(&self) -> bool {
        self.policy.is_disabled(&self.props, &self.filtered_instances())
    }

    pub fn is_checked(&self) -> bool {
        self.policy.is_checked(&self.props, &self.filtered_instances())
    }

    pub fn on_click(&self) {
        self.policy.on_toggle(&self.props, self.is_checked());
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let instances = self.filtered_instances();
        // Flipped locally only; the displayed state comes back from the store.
        let mut checked = self.policy.is_checked(&self.props, &instances);
        let enabled = !self.policy.is_disabled(&self.props, &instances);

        let response = ui.add_enabled(enabled, egui::Checkbox::new(&mut checked, VISUAL_HELPER_LABEL));
        if response.clicked() {
            self.on_click();
        }
        response
    }
}
