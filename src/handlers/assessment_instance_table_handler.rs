// src/handlers/assessment_instance_table_handler.rs
use std::fmt;
use eframe::egui;

use crate::actions::DetailsViewActionMessageCreator;
use crate::assessments::{self, InstanceColumn};
use crate::config::{
    AssessmentNavState,
    GeneratedAssessmentInstance,
    InstancesMap,
    ManualTestStatus,
    TestType,
    UserCapturedInstance,
};

#[derive(Debug, Clone, PartialEq)]
pub struct StatusChoiceGroup {
    pub status: ManualTestStatus,
    pub test_step: String,
    pub selector: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationButton {
    pub is_visualization_enabled: bool,
    pub disabled: bool,
    pub selector: String,
}

/// Render-only view of one instance, rebuilt on every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentInstanceRowData<'a> {
    pub key: String,
    pub status_choice_group: StatusChoiceGroup,
    pub visualization_button: Option<VisualizationButton>,
    pub instance: &'a GeneratedAssessmentInstance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CapturedInstanceRowData<'a> {
    pub key: String,
    pub instance: &'a UserCapturedInstance,
}

/// What a cell reports back when the user interacts with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowEvent {
    StatusChanged(ManualTestStatus),
    ToggleVisualization,
}

pub type ColumnRenderFn = Box<dyn Fn(&mut egui::Ui, &AssessmentInstanceRowData<'_>) -> Option<RowEvent>>;

pub struct ColumnConfig {
    pub key: &'static str,
    pub name: String,
    pub min_width: f32,
    pub max_width: f32,
    pub on_render: ColumnRenderFn,
}

impl fmt::Debug for ColumnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnConfig")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("min_width", &self.min_width)
            .field("max_width", &self.max_width)
            .finish_non_exhaustive()
    }
}

pub trait InstanceTableHandler {
    fn create_assessment_instance_table_items<'a>(
        &self,
        instances_map: &'a InstancesMap,
        assessment_nav_state: &AssessmentNavState,
        has_visual_helper: bool,
    ) -> Vec<AssessmentInstanceRowData<'a>>;

    fn get_column_configs(
        &self,
        instances_map: &InstancesMap,
        assessment_nav_state: &AssessmentNavState,
        has_visual_helper: bool,
    ) -> Vec<ColumnConfig>;

    fn update_focused_target(&self, target: &[String]);

    fn pass_unmarked_instances(&self, test_type: TestType, step: &str);

    fn change_step_status(&self, status: ManualTestStatus, test_type: TestType, step: &str, selector: &str);

    fn change_visualization_state(&self, enabled: bool, test_type: TestType, step: &str, selector: &str);
}

pub struct AssessmentInstanceTableHandler<'a> {
    message_creator: &'a dyn DetailsViewActionMessageCreator,
}

impl<'a> AssessmentInstanceTableHandler<'a> {
    pub fn new(message_creator: &'a dyn DetailsViewActionMessageCreator) -> Self {
        Self { message_creator }
    }

    pub fn create_captured_instance_table_items<'i>(
        &self,
        instances: &'i [UserCapturedInstance],
    ) -> Vec<CapturedInstanceRowData<'i>> {
        instances
            .iter()
            .map(|instance| CapturedInstanceRowData {
                key: instance.id.clone(),
                instance,
            })
            .collect()
    }

    pub fn remove_captured_instance(&self, test_type: TestType, id: &str) {
        self.message_creator.remove_captured_instance(test_type, id);
    }
}

impl InstanceTableHandler for AssessmentInstanceTableHandler<'_> {
    fn create_assessment_instance_table_items<'a>(
        &self,
        instances_map: &'a InstancesMap,
        assessment_nav_state: &AssessmentNavState,
        has_visual_helper: bool,
    ) -> Vec<AssessmentInstanceRowData<'a>> {
        let step = assessment_nav_state.selected_test_step.as_str();

        instances_map
            .iter()
            .filter_map(|(key, instance)| {
                let result = instance.test_step_results.get(step)?;
                let visualization_button = has_visual_helper.then(|| VisualizationButton {
                    is_visualization_enabled: result.is_visualization_enabled,
                    disabled: !result.is_visible,
                    selector: key.clone(),
                });

                Some(AssessmentInstanceRowData {
                    key: key.clone(),
                    status_choice_group: StatusChoiceGroup {
                        status: result.status,
                        test_step: step.to_string(),
                        selector: key.clone(),
                    },
                    visualization_button,
                    instance,
                })
            })
            .collect()
    }

    fn get_column_configs(
        &self,
        _instances_map: &InstancesMap,
        assessment_nav_state: &AssessmentNavState,
        has_visual_helper: bool,
    ) -> Vec<ColumnConfig> {
        let instance_columns: &'static [InstanceColumn] = assessments::requirement(
            assessment_nav_state.selected_test_type,
            &assessment_nav_state.selected_test_step,
        )
        .map(|r| r.instance_columns)
        .unwrap_or(&[]);

        let mut columns = Vec::new();

        if has_visual_helper {
            columns.push(ColumnConfig {
                key: "visualization",
                name: "Visualization".to_string(),
                min_width: 90.0,
                max_width: 90.0,
                on_render: Box::new(render_visualization_button),
            });
        }

        columns.push(ColumnConfig {
            key: "instance",
            name: "Instance".to_string(),
            min_width: 200.0,
            max_width: 400.0,
            on_render: Box::new(move |ui: &mut egui::Ui, item: &AssessmentInstanceRowData<'_>| {
                render_instance_details(ui, item, instance_columns)
            }),
        });

        columns.push(ColumnConfig {
            key: "status",
            name: "Pass / Fail".to_string(),
            min_width: 100.0,
            max_width: 150.0,
            on_render: Box::new(render_status_choice_group),
        });

        columns
    }

    fn update_focused_target(&self, target: &[String]) {
        self.message_creator.update_focused_instance_target(target);
    }

    fn pass_unmarked_instances(&self, test_type: TestType, step: &str) {
        self.message_creator.pass_unmarked_instances(test_type, step);
    }

    fn change_step_status(&self, status: ManualTestStatus, test_type: TestType, step: &str, selector: &str) {
        self.message_creator.change_manual_test_status(status, test_type, step, selector);
    }

    fn change_visualization_state(&self, enabled: bool, test_type: TestType, step: &str, selector: &str) {
        self.message_creator.change_assessment_visualization_state(enabled, test_type, step, selector);
    }
}

fn render_visualization_button(ui: &mut egui::Ui, item: &AssessmentInstanceRowData<'_>) -> Option<RowEvent> {
    let button = item.visualization_button.as_ref()?;
    let label = if button.is_visualization_enabled { "👁 Hide" } else { "👁 Show" };

    ui.add_enabled(!button.disabled, egui::Button::new(label))
        .on_disabled_hover_text("Element is not visible on the page")
        .clicked()
        .then_some(RowEvent::ToggleVisualization)
}

fn render_instance_details(
    ui: &mut egui::Ui,
    item: &AssessmentInstanceRowData<'_>,
    columns: &[InstanceColumn],
) -> Option<RowEvent> {
    ui.vertical(|ui| {
        ui.monospace(item.instance.target.join(" ; "));
        for column in columns {
            if let Some(value) = item.instance.property_bag.get(column.property) {
                ui.label(format!("{}: {}", column.header, value));
            }
        }
        let summary = item.instance
            .test_step_results
            .get(&item.status_choice_group.test_step)
            .and_then(|r| r.failure_summary.as_deref());
        if let Some(summary) = summary {
            ui.colored_label(egui::Color32::RED, summary);
        }
    });
    None
}

fn render_status_choice_group(ui: &mut egui::Ui, item: &AssessmentInstanceRowData<'_>) -> Option<RowEvent> {
    let current = item.status_choice_group.status;
    let mut event = None;

    ui.horizontal(|ui| {
        for status in [ManualTestStatus::Pass, ManualTestStatus::Fail] {
            if ui.radio(current == status, status.to_string()).clicked() && current != status {
                event = Some(RowEvent::StatusChanged(status));
            }
        }
        if current != ManualTestStatus::Unknown && ui.small_button("↺").on_hover_text("Undo").clicked() {
            event = Some(RowEvent::StatusChanged(ManualTestStatus::Unknown));
        }
    });

    event
}
