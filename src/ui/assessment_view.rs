// src/ui/assessment_view.rs
use eframe::egui;
use uuid::Uuid;

use crate::actions::{ActionQueue, DetailsViewActionMessageCreator};
use crate::assessments::default_message::{no_failing_instance_message, no_matching_instance_message};
use crate::assessments::{self, AssessmentDefaultMessageGenerator, GetDefaultMessage, Requirement, VisualHelperToggleKind, ASSESSMENTS};
use crate::config::{ManualTestStatus, UserCapturedInstance};
use crate::file::SessionFile;
use crate::handlers::AssessmentInstanceTableHandler;
use crate::state::AppState;
use crate::ui::assessment_instance_table::{
    render_default_instance_table_header,
    render_no_instance_table_header,
    AssessmentInstanceTable,
    AssessmentInstanceTableProps,
    RenderInstanceTableHeader,
};
use crate::ui::visual_helper_toggle::{
    AssessmentVisualizationEnabledToggle,
    RestartScanVisualHelperToggle,
    VisualHelperToggle,
    VisualHelperToggleProps,
};

/// Form and filter state owned by the view, not the store.
#[derive(Debug, Default)]
pub struct AssessmentViewState {
    pub capture_description: String,
    pub capture_selector: String,
    pub review_failures: bool,
}

impl AssessmentViewState {
    /// Builds a captured instance from the form, or `None` when no description was typed.
    pub fn take_captured_instance(&mut self) -> Option<UserCapturedInstance> {
        let description = self.capture_description.trim();
        if description.is_empty() {
            return None;
        }
        let selector = self.capture_selector.trim();

        let instance = UserCapturedInstance {
            id: Uuid::new_v4().to_string(),
            description: description.to_string(),
            selector: (!selector.is_empty()).then(|| selector.to_string()),
            html: None,
        };
        self.capture_description.clear();
        self.capture_selector.clear();
        Some(instance)
    }
}

pub fn status_icon(status: ManualTestStatus) -> &'static str {
    match status {
        ManualTestStatus::Pass => "✔",
        ManualTestStatus::Fail => "✖",
        ManualTestStatus::Unknown => "○",
    }
}

/// One line under the requirement heading: how it is tested and where the data came from.
pub fn requirement_caption(requirement: &Requirement, session: &SessionFile) -> String {
    let mut parts = vec![if requirement.is_manual { "Manual" } else { "Assisted" }.to_string()];
    if !session.target.is_empty() {
        parts.push(session.target.clone());
    }
    parts.push(match session.scan_timestamp {
        Some(scanned) => format!("scanned {}", scanned.format("%Y-%m-%d %H:%M UTC")),
        None => "not scanned".to_string(),
    });
    parts.join(" · ")
}

pub fn show_assessment_view(
    ui: &mut egui::Ui,
    state: &mut AppState,
    view_state: &mut AssessmentViewState,
    queue: &ActionQueue,
) {
    let available_size = ui.available_size();

    egui::Grid::new("assessment_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            // Left panel - assessments and their steps
            ui.vertical(|ui| {
                ui.set_min_width(available_size.x * 0.25);
                ui.set_min_height(available_size.y);
                show_navigation(ui, state);
            });

            // Right panel - selected requirement
            ui.vertical(|ui| {
                ui.set_min_width(available_size.x * 0.7);
                ui.set_min_height(available_size.y);
                show_requirement(ui, state, view_state, queue);
            });
        });
}

fn show_navigation(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Assessment");
    ui.add_space(4.0);

    egui::ScrollArea::vertical()
        .id_source("assessment_nav_scroll")
        .show(ui, |ui| {
            for assessment in ASSESSMENTS {
                egui::CollapsingHeader::new(assessment.title)
                    .default_open(true)
                    .show(ui, |ui| {
                        for requirement in assessment.requirements {
                            let nav_state = &state.assessment_nav_state;
                            let is_selected = nav_state.selected_test_type == assessment.test_type
                                && nav_state.selected_test_step == requirement.key;
                            let status = state.requirement_status(assessment.test_type, requirement.key);

                            let label = format!("{} {}", status_icon(status), requirement.name);
                            if ui.selectable_label(is_selected, label).clicked() {
                                state.select_step(assessment.test_type, requirement.key);
                            }
                        }
                    });
            }
        });
}

fn show_requirement(
    ui: &mut egui::Ui,
    state: &AppState,
    view_state: &mut AssessmentViewState,
    queue: &ActionQueue,
) {
    let nav_state = &state.assessment_nav_state;
    let test_type = nav_state.selected_test_type;
    let Some(requirement) = assessments::requirement(test_type, &nav_state.selected_test_step) else {
        ui.label("Select a requirement");
        return;
    };

    ui.heading(requirement.name);
    ui.weak(requirement_caption(requirement, &state.session));
    ui.label(requirement.description);
    ui.add_space(8.0);

    let instances_map = state.instances_map(test_type);

    ui.horizontal(|ui| {
        if requirement.has_visual_helper {
            show_visual_helper_toggle(ui, state, requirement, queue);
        }
        ui.checkbox(&mut view_state.review_failures, "Review failures");
    });
    ui.add_space(8.0);

    let (get_default_message, render_header): (GetDefaultMessage, RenderInstanceTableHeader) =
        if view_state.review_failures {
            (no_failing_instance_message, render_no_instance_table_header)
        } else {
            (no_matching_instance_message, render_default_instance_table_header)
        };

    let handler = AssessmentInstanceTableHandler::new(queue);
    let generator = AssessmentDefaultMessageGenerator::new();
    AssessmentInstanceTable::new(AssessmentInstanceTableProps {
        instances_map,
        assessment_nav_state: nav_state,
        assessment_instance_table_handler: &handler,
        render_instance_table_header: render_header,
        get_default_message,
        assessment_default_message_generator: &generator,
        has_visual_helper: requirement.has_visual_helper,
    })
    .show(ui);

    if let Some(target) = &state.focused_target {
        ui.add_space(4.0);
        ui.label(format!("Focused: {}", target.join(" ; ")));
    }

    ui.add_space(16.0);
    ui.separator();
    show_captured_instances(ui, state, view_state, &handler, queue);
}

fn show_visual_helper_toggle(ui: &mut egui::Ui, state: &AppState, requirement: &Requirement, queue: &ActionQueue) {
    let nav_state = &state.assessment_nav_state;
    let props = VisualHelperToggleProps {
        assessment_nav_state: nav_state,
        instances_map: state.instances_map(nav_state.selected_test_type),
        is_step_enabled: state.is_step_enabled(nav_state.selected_test_type, &nav_state.selected_test_step),
    };

    match requirement.visual_helper_toggle {
        VisualHelperToggleKind::RestartScan => {
            VisualHelperToggle::new(props, RestartScanVisualHelperToggle::new(queue)).show(ui);
        }
        VisualHelperToggleKind::VisualizationEnabled => {
            VisualHelperToggle::new(props, AssessmentVisualizationEnabledToggle::new(queue)).show(ui);
        }
    }
}

fn show_captured_instances(
    ui: &mut egui::Ui,
    state: &AppState,
    view_state: &mut AssessmentViewState,
    handler: &AssessmentInstanceTableHandler<'_>,
    queue: &ActionQueue,
) {
    let test_type = state.assessment_nav_state.selected_test_type;
    ui.strong("Failure instances");

    let captured = state
        .assessment_data(test_type)
        .map(|data| data.manual_instances.as_slice())
        .unwrap_or(&[]);

    for row in handler.create_captured_instance_table_items(captured) {
        ui.horizontal(|ui| {
            ui.label(&row.instance.description);
            if let Some(selector) = &row.instance.selector {
                ui.monospace(selector);
            }
            if ui.small_button("🗑").on_hover_text("Remove").clicked() {
                handler.remove_captured_instance(test_type, &row.key);
            }
        });
    }

    ui.add_space(4.0);
    egui::Grid::new("capture_form")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Description:");
            ui.text_edit_singleline(&mut view_state.capture_description);
            ui.end_row();

            ui.label("Selector:");
            ui.text_edit_singleline(&mut view_state.capture_selector);
            ui.end_row();
        });

    let can_add = !view_state.capture_description.trim().is_empty();
    if ui.add_enabled(can_add, egui::Button::new("➕ Add failure instance")).clicked() {
        if let Some(instance) = view_state.take_captured_instance() {
            queue.add_captured_instance(test_type, instance);
        }
    }
}
