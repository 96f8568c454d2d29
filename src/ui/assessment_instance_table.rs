// src/ui/assessment_instance_table.rs
use eframe::egui;

use crate::assessments::{AssessmentDefaultMessageGenerator, DefaultMessageComponent, GetDefaultMessage};
use crate::config::{AssessmentNavState, InstancesMap, ManualTestStatus};
use crate::handlers::{AssessmentInstanceRowData, ColumnConfig, InstanceTableHandler, RowEvent};

pub const PASS_UNMARKED_INSTANCES_BUTTON_AUTOMATION_ID: &str =
    "assessment-instance-table-pass-unmarked-instances-button";

pub const SCANNING_LABEL: &str = "Scanning";

#[derive(Debug, Clone, PartialEq)]
pub struct CommandButton {
    pub automation_id: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstanceTableHeader {
    None,
    PassUnmarkedInstances(CommandButton),
}

pub type RenderInstanceTableHeader =
    fn(&AssessmentInstanceTable<'_>, &[AssessmentInstanceRowData<'_>]) -> InstanceTableHeader;

pub struct AssessmentInstanceTableProps<'a> {
    pub instances_map: Option<&'a InstancesMap>,
    pub assessment_nav_state: &'a AssessmentNavState,
    pub assessment_instance_table_handler: &'a dyn InstanceTableHandler,
    pub render_instance_table_header: RenderInstanceTableHeader,
    pub get_default_message: GetDefaultMessage,
    pub assessment_default_message_generator: &'a AssessmentDefaultMessageGenerator,
    pub has_visual_helper: bool,
}

/// What one frame of the table shows.
#[derive(Debug)]
pub enum InstanceTableView<'a> {
    Scanning,
    Message(DefaultMessageComponent),
    Grid {
        header: InstanceTableHeader,
        items: Vec<AssessmentInstanceRowData<'a>>,
        columns: Vec<ColumnConfig>,
    },
}

/// Area covered by a drawn row plus the events its cells raised.
#[derive(Debug)]
pub struct RenderedRow {
    pub rect: egui::Rect,
    pub events: Vec<RowEvent>,
}

pub struct AssessmentInstanceTable<'a> {
    props: AssessmentInstanceTableProps<'a>,
}

pub fn render_default_instance_table_header(
    table: &AssessmentInstanceTable<'_>,
    items: &[AssessmentInstanceRowData<'_>],
) -> InstanceTableHeader {
    table.render_default_instance_table_header(items)
}

pub fn render_no_instance_table_header(
    _table: &AssessmentInstanceTable<'_>,
    _items: &[AssessmentInstanceRowData<'_>],
) -> InstanceTableHeader {
    InstanceTableHeader::None
}

impl<'a> AssessmentInstanceTable<'a> {
    pub fn new(props: AssessmentInstanceTableProps<'a>) -> Self {
        Self { props }
    }

    pub fn props(&self) -> &AssessmentInstanceTableProps<'a> {
        &self.props
    }

    pub fn render(&self) -> InstanceTableView<'a> {
        let Some(instances_map) = self.props.instances_map else {
            return InstanceTableView::Scanning;
        };
        let handler = self.props.assessment_instance_table_handler;
        let nav_state = self.props.assessment_nav_state;

        let items = handler.create_assessment_instance_table_items(
            instances_map,
            nav_state,
            self.props.has_visual_helper,
        );
        let columns = handler.get_column_configs(
            instances_map,
            nav_state,
            self.props.has_visual_helper,
        );

        let get_default_message = (self.props.get_default_message)(self.props.assessment_default_message_generator);
        if let Some(message) = get_default_message(instances_map, &nav_state.selected_test_step) {
            return InstanceTableView::Message(message);
        }

        let header = (self.props.render_instance_table_header)(self, &items);
        InstanceTableView::Grid { header, items, columns }
    }

    pub fn on_item_invoked(&self, item: &AssessmentInstanceRowData<'_>) {
        self.update_focused_target(item);
    }

    /// Draws the row with `default_render` and makes a click anywhere on it move focus.
    pub fn render_row(
        &self,
        ui: &mut egui::Ui,
        item: &AssessmentInstanceRowData<'_>,
        default_render: impl FnOnce(&mut egui::Ui) -> RenderedRow,
    ) -> RenderedRow {
        let rendered = default_render(ui);

        let response = ui.interact(rendered.rect, row_id(ui, &item.key), egui::Sense::click());
        // egui also reports Enter on a focused widget as a click; that is an invocation only.
        let keyboard_invoked = response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if response.clicked() && !keyboard_invoked {
            self.update_focused_target(item);
        }
        if response.double_clicked() || keyboard_invoked {
            self.on_item_invoked(item);
        }

        rendered
    }

    pub fn update_focused_target(&self, item: &AssessmentInstanceRowData<'_>) {
        self.props
            .assessment_instance_table_handler
            .update_focused_target(&item.instance.target);
    }

    pub fn render_default_instance_table_header(&self, items: &[AssessmentInstanceRowData<'_>]) -> InstanceTableHeader {
        let disabled = !is_any_instance_status_unknown(items, &self.props.assessment_nav_state.selected_test_step);

        InstanceTableHeader::PassUnmarkedInstances(CommandButton {
            automation_id: PASS_UNMARKED_INSTANCES_BUTTON_AUTOMATION_ID,
            icon: "✔",
            label: "Pass unmarked instances",
            disabled,
        })
    }

    pub fn on_pass_unmarked_instances(&self) {
        let nav_state = self.props.assessment_nav_state;
        self.props.assessment_instance_table_handler.pass_unmarked_instances(
            nav_state.selected_test_type,
            &nav_state.selected_test_step,
        );
    }

    fn on_row_event(&self, item: &AssessmentInstanceRowData<'_>, event: RowEvent) {
        let handler = self.props.assessment_instance_table_handler;
        let test_type = self.props.assessment_nav_state.selected_test_type;
        let group = &item.status_choice_group;

        match event {
            RowEvent::StatusChanged(status) => {
                handler.change_step_status(status, test_type, &group.test_step, &group.selector);
            }
            RowEvent::ToggleVisualization => {
                let Some(button) = &item.visualization_button else {
                    return;
                };
                handler.change_visualization_state(
                    !button.is_visualization_enabled,
                    test_type,
                    &group.test_step,
                    &button.selector,
                );
            }
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        match self.render() {
            InstanceTableView::Scanning => {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new().size(32.0));
                    ui.label(SCANNING_LABEL);
                });
            }
            InstanceTableView::Message(message) => {
                ui.label(message.message);
            }
            InstanceTableView::Grid { header, items, columns } => {
                ui.vertical(|ui| {
                    self.show_header(ui, &header);
                    ui.add_space(4.0);
                    self.show_grid(ui, &items, &columns);
                });
            }
        }
    }

    fn show_header(&self, ui: &mut egui::Ui, header: &InstanceTableHeader) {
        match header {
            InstanceTableHeader::None => {}
            InstanceTableHeader::PassUnmarkedInstances(button) => {
                let text = format!("{} {}", button.icon, button.label);
                if ui.add_enabled(!button.disabled, egui::Button::new(text)).clicked() {
                    self.on_pass_unmarked_instances();
                }
            }
        }
    }

    fn show_grid(&self, ui: &mut egui::Ui, items: &[AssessmentInstanceRowData<'_>], columns: &[ColumnConfig]) {
        egui::ScrollArea::vertical()
            .id_source("assessment_instance_table_scroll")
            .show(ui, |ui| {
                egui::Grid::new("assessment_instance_table")
                    .num_columns(columns.len())
                    .striped(true)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        for column in columns {
                            ui.strong(&column.name);
                        }
                        ui.end_row();

                        for item in items {
                            let rendered = self.render_row(ui, item, |ui| default_render_row(ui, item, columns));
                            for event in rendered.events {
                                self.on_row_event(item, event);
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

pub fn row_id(ui: &egui::Ui, key: &str) -> egui::Id {
    ui.make_persistent_id(("assessment_instance_row", key))
}

fn default_render_row(
    ui: &mut egui::Ui,
    item: &AssessmentInstanceRowData<'_>,
    columns: &[ColumnConfig],
) -> RenderedRow {
    let mut rect: Option<egui::Rect> = None;
    let mut events = Vec::new();

    for column in columns {
        let cell = ui.scope(|ui| {
            ui.set_min_width(column.min_width);
            ui.set_max_width(column.max_width);
            (column.on_render)(ui, item)
        });
        rect = Some(rect.map_or(cell.response.rect, |r| r.union(cell.response.rect)));
        events.extend(cell.inner);
    }

    RenderedRow {
        rect: rect.unwrap_or(egui::Rect::NOTHING),
        events,
    }
}

fn is_any_instance_status_unknown(items: &[AssessmentInstanceRowData<'_>], step: &str) -> bool {
    items.iter().any(|item| {
        item.instance
            .test_step_results
            .get(step)
            .map_or(false, |result| result.status == ManualTestStatus::Unknown)
    })
}
