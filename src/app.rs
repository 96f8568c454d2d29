// src/app.rs
use eframe::egui;
use rfd::FileDialog;
use std::path::PathBuf;

use crate::actions::ActionQueue;
use crate::settings::Settings;
use crate::state::{AppState, Screen};
use crate::ui::{assessment_view, automated_checks, AssessmentViewState};

const LAST_SESSION_KEY: &str = "last_session";

pub struct AssessmentApp {
    state: AppState,
    actions: ActionQueue,
    view_state: AssessmentViewState,
    settings: Settings,
}

impl AssessmentApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let remembered: Option<PathBuf> = cc
            .storage
            .and_then(|storage| eframe::get_value::<Option<PathBuf>>(storage, LAST_SESSION_KEY))
            .flatten();

        let mut app = Self::with_settings(settings);
        if let Some(path) = app.settings.last_session.clone().or(remembered) {
            app.load_session(path);
        }
        app
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            state: AppState::new(),
            actions: ActionQueue::new(),
            view_state: AssessmentViewState::default(),
            settings,
        }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Session...").clicked() {
                    self.open_session();
                    ui.close_menu();
                }
                if ui.button("Import Android Scan...").clicked() {
                    self.import_android_scan();
                    ui.close_menu();
                }
                if ui
                    .add_enabled(self.state.android.scan.is_some(), egui::Button::new("Export Android Scan..."))
                    .clicked()
                {
                    self.export_android_scan();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Save").clicked() {
                    if self.state.session_path.is_some() {
                        if let Err(e) = self.state.save_session() {
                            self.state.error_message = Some(e.to_string());
                        }
                    } else {
                        self.save_session_as();
                    }
                    ui.close_menu();
                }
                if ui.button("Save As...").clicked() {
                    self.save_session_as();
                    ui.close_menu();
                }
            });

            ui.separator();

            let tabs = [
                (Screen::Assessment, "Assessment"),
                (Screen::AutomatedChecks, "Automated checks"),
            ];

            for (screen, label) in tabs {
                if ui.selectable_label(self.state.current_screen == screen, label).clicked() {
                    self.state.current_screen = screen;
                }
            }

            if self.state.dirty {
                ui.separator();
                ui.weak("● unsaved");
            }
        });
    }

    fn open_session(&mut self) {
        let file_dialog = FileDialog::new()
            .add_filter("RON files", &["ron"])
            .set_title("Open Session");

        if let Some(path) = file_dialog.pick_file() {
            self.load_session(path);
        }
    }

    fn load_session(&mut self, path: PathBuf) {
        match self.state.load_session(&path) {
            Ok(()) => {
                self.state.error_message = None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "session not loaded");
                self.state.error_message = Some(format!("Error loading session: {:#}", e));
            }
        }
    }

    fn import_android_scan(&mut self) {
        let file_dialog = FileDialog::new()
            .add_filter("RON files", &["ron"])
            .set_title("Import Android Scan");

        if let Some(path) = file_dialog.pick_file() {
            match self.state.import_android_scan(&path) {
                Ok(()) => self.state.current_screen = Screen::AutomatedChecks,
                Err(e) => self.state.error_message = Some(format!("Error importing scan: {:#}", e)),
            }
        }
    }

    fn export_android_scan(&mut self) {
        let file_dialog = FileDialog::new()
            .add_filter("RON files", &["ron"])
            .set_file_name("android-scan.ron")
            .set_title("Export Android Scan");

        if let Some(path) = file_dialog.save_file() {
            if let Err(e) = self.state.export_android_scan(&path) {
                self.state.error_message = Some(format!("Error exporting scan: {:#}", e));
            }
        }
    }

    fn save_session_as(&mut self) {
        let file_dialog = FileDialog::new()
            .add_filter("RON files", &["ron"])
            .set_file_name("session.ron")
            .set_title("Save Session As");

        if let Some(path) = file_dialog.save_file() {
            if let Err(e) = self.state.save_session_as(path) {
                self.state.error_message = Some(e.to_string());
            }
        }
    }

    /// Applies everything the UI queued this frame, then auto-saves if enabled.
    /// A failed auto-save turns auto-save off for the rest of the run.
    pub fn apply_pending_actions(&mut self) {
        for action in self.actions.drain() {
            if let Err(e) = self.state.apply(action) {
                tracing::warn!(error = %e, "action rejected");
                self.state.error_message = Some(e.to_string());
            }
        }

        if self.settings.auto_save && self.state.dirty && self.state.session_path.is_some() {
            if let Err(e) = self.state.save_session() {
                tracing::warn!(error = %format!("{:#}", e), "auto-save failed, disabling it");
                self.settings.auto_save = false;
                self.state.error_message = Some(format!("Auto-save failed and was turned off: {:#}", e));
            }
        }
    }
}

impl eframe::App for AssessmentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.current_screen {
                Screen::Assessment => {
                    assessment_view::show_assessment_view(ui, &mut self.state, &mut self.view_state, &self.actions);
                }
                Screen::AutomatedChecks => {
                    automated_checks::show_automated_checks_view(ui, &self.state);
                }
            }
        });

        self.apply_pending_actions();

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, LAST_SESSION_KEY, &self.state.session_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::DetailsViewActionMessageCreator;
    use crate::config::{GeneratedAssessmentInstance, InstancesMap, ManualTestStatus, PropertyBag, TestStepResult, TestType};
    use crate::file::SessionFile;
    use crate::state::AssessmentStoreData;
    use std::collections::BTreeMap;

    const STEP: &str = "headingFunction";

    fn settings(auto_save: bool) -> Settings {
        Settings {
            log_level: "info".to_string(),
            window_width: 1024.0,
            window_height: 768.0,
            auto_save,
            last_session: None,
        }
    }

    fn session_with_unknown_instance() -> SessionFile {
        let mut results = BTreeMap::new();
        results.insert(STEP.to_string(), TestStepResult::new(STEP, ManualTestStatus::Unknown));
        let mut map = InstancesMap::new();
        map.insert("#h1".to_string(), GeneratedAssessmentInstance {
            target: vec!["#h1".to_string()],
            html: String::new(),
            test_step_results: results,
            property_bag: PropertyBag::new(),
        });
        let mut session = SessionFile::new();
        session.assessments.insert(TestType::Headings, AssessmentStoreData::with_instances(map));
        session
    }

    #[test]
    fn queued_actions_reach_the_store() {
        let mut app = AssessmentApp::with_settings(settings(false));
        app.state.reset_session(session_with_unknown_instance(), None);

        app.actions.pass_unmarked_instances(TestType::Headings, STEP);
        app.actions.enable_visual_helper(TestType::Headings, STEP);
        app.apply_pending_actions();

        assert!(app.actions.is_empty());
        assert_eq!(app.state.requirement_status(TestType::Headings, STEP), ManualTestStatus::Pass);
        assert!(app.state.is_step_enabled(TestType::Headings, STEP));
        assert!(app.state.error_message.is_none());
    }

    #[test]
    fn rejected_action_surfaces_in_error_modal() {
        let mut app = AssessmentApp::with_settings(settings(false));
        app.actions.pass_unmarked_instances(TestType::Links, "linkPurpose");
        app.apply_pending_actions();

        assert!(app.state.error_message.is_some());
    }

    #[test]
    fn auto_save_writes_dirty_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.ron");

        let mut app = AssessmentApp::with_settings(settings(true));
        app.state.reset_session(session_with_unknown_instance(), Some(path.clone()));
        app.actions.change_manual_test_status(ManualTestStatus::Fail, TestType::Headings, STEP, "#h1");
        app.apply_pending_actions();

        assert!(!app.state.dirty);
        let reloaded = app.state.file_manager.load_session(&path).unwrap();
        let status = reloaded.assessments[&TestType::Headings]
            .generated_instances_map
            .as_ref()
            .and_then(|map| map["#h1"].step_status(STEP));
        assert_eq!(status, Some(ManualTestStatus::Fail));
    }

    #[test]
    fn failed_auto_save_is_reported_once_and_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("session.ron");

        let mut app = AssessmentApp::with_settings(settings(true));
        app.state.reset_session(session_with_unknown_instance(), Some(path.clone()));
        app.actions.change_manual_test_status(ManualTestStatus::Fail, TestType::Headings, STEP, "#h1");
        app.apply_pending_actions();

        assert!(!app.settings.auto_save);
        assert!(app.state.dirty);
        let shown = app.state.error_message.take().expect("auto-save error shown");
        assert!(shown.contains("Auto-save failed"));

        app.actions.change_manual_test_status(ManualTestStatus::Pass, TestType::Headings, STEP, "#h1");
        app.apply_pending_actions();
        assert!(app.state.error_message.is_none());
        assert!(!path.exists());
    }
}
