// src/state/mod.rs
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::actions::Action;
use crate::android::RuleInformationProvider;
use crate::assessments::ASSESSMENTS;
use crate::config::{AssessmentNavState, InstancesMap, ManualTestStatus, TestType};
use crate::file::{FileManager, SessionFile};
use crate::utils::find_instance;

pub mod android_state;
pub mod assessment_state;

pub use assessment_state::{AssessmentStoreData, StoreError};

// Screen/tab tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Assessment,
    AutomatedChecks,
}

// Core application state
#[derive(Debug)]
pub struct AppState {
    // Session data
    pub session: SessionFile,
    pub session_path: Option<PathBuf>,
    pub dirty: bool,

    // Navigation & per-step UI state
    pub assessment_nav_state: AssessmentNavState,
    pub enabled_visual_helpers: BTreeSet<(TestType, String)>,
    pub focused_target: Option<Vec<String>>,

    // Android scan data
    pub android: android_state::AndroidState,
    pub rule_provider: RuleInformationProvider,

    // Minimal UI state
    pub current_screen: Screen,
    pub error_message: Option<String>,

    // File management
    pub file_manager: FileManager,
}

fn default_nav_state() -> AssessmentNavState {
    let first = &ASSESSMENTS[0];
    AssessmentNavState::new(first.test_type, first.requirements[0].key)
}

impl AppState {
    pub fn new() -> Self {
        Self {
            session: SessionFile::new(),
            session_path: None,
            dirty: false,
            assessment_nav_state: default_nav_state(),
            enabled_visual_helpers: BTreeSet::new(),
            focused_target: None,
            android: android_state::AndroidState::default(),
            rule_provider: RuleInformationProvider::new(),
            current_screen: Screen::Assessment,
            error_message: None,
            file_manager: FileManager::new(),
        }
    }

    pub fn instances_map(&self, test_type: TestType) -> Option<&InstancesMap> {
        self.session
            .assessments
            .get(&test_type)
            .and_then(|data| data.generated_instances_map.as_ref())
    }

    pub fn assessment_data(&self, test_type: TestType) -> Option<&AssessmentStoreData> {
        self.session.assessments.get(&test_type)
    }

    pub fn is_step_enabled(&self, test_type: TestType, step: &str) -> bool {
        self.enabled_visual_helpers.contains(&(test_type, step.to_string()))
    }

    pub fn requirement_status(&self, test_type: TestType, step: &str) -> ManualTestStatus {
        self.session
            .assessments
            .get(&test_type)
            .map(|data| data.requirement_status(step))
            .unwrap_or(ManualTestStatus::Unknown)
    }

    pub fn select_step(&mut self, test_type: TestType, step: &str) {
        if self.assessment_nav_state.selected_test_type != test_type
            || self.assessment_nav_state.selected_test_step != step
        {
            tracing::debug!(%test_type, step, "test step selected");
            self.assessment_nav_state = AssessmentNavState::new(test_type, step);
            self.focused_target = None;
        }
    }

    /// Replaces the store contents with a freshly scanned session.
    pub fn reset_session(&mut self, session: SessionFile, path: Option<PathBuf>) {
        self.session = session;
        self.session_path = path;
        self.dirty = false;
        self.enabled_visual_helpers.clear();
        self.focused_target = None;
    }

    fn assessment_mut(&mut self, test_type: TestType) -> Result<&mut AssessmentStoreData, StoreError> {
        self.session
            .assessments
            .get_mut(&test_type)
            .ok_or(StoreError::NoAssessmentData)
    }

    pub fn apply(&mut self, action: Action) -> Result<(), StoreError> {
        tracing::debug!(?action, "applying action");

        match action {
            Action::EnableVisualHelper { test_type, step } => {
                self.enabled_visual_helpers.insert((test_type, step));
            }
            Action::DisableVisualHelper { test_type, step } => {
                self.enabled_visual_helpers.remove(&(test_type, step));
            }
            Action::ChangeVisualizationStateForAll { enabled, test_type, step } => {
                let changed = self.assessment_mut(test_type)?.set_visualization_for_all(&step, enabled)?;
                tracing::debug!(changed, enabled, "visualization toggled for step");
                if changed > 0 {
                    self.dirty = true;
                }
            }
            Action::ChangeVisualizationState { enabled, test_type, step, selector } => {
                self.assessment_mut(test_type)?.set_visualization(&step, &selector, enabled)?;
                self.dirty = true;
            }
            Action::ChangeStepStatus { status, test_type, step, selector } => {
                self.assessment_mut(test_type)?.set_step_status(&step, &selector, status)?;
                self.dirty = true;
            }
            Action::PassUnmarkedInstances { test_type, step } => {
                let changed = self.assessment_mut(test_type)?.pass_unmarked_instances(&step)?;
                tracing::info!(%test_type, step = %step, changed, "passed unmarked instances");
                if changed > 0 {
                    self.dirty = true;
                }
            }
            Action::UpdateFocusedInstance { target } => {
                let known = self
                    .instances_map(self.assessment_nav_state.selected_test_type)
                    .map_or(false, |map| find_instance(map, &target).is_some());
                if !known {
                    tracing::warn!(?target, "focusing a target that is not in the current instances");
                }
                self.focused_target = Some(target);
            }
            Action::AddCapturedInstance { test_type, instance } => {
                self.session
                    .assessments
                    .entry(test_type)
                    .or_default()
                    .add_captured_instance(instance);
                self.dirty = true;
            }
            Action::RemoveCapturedInstance { test_type, id } => {
                self.assessment_mut(test_type)?.remove_captured_instance(&id)?;
                self.dirty = true;
            }
        }

        Ok(())
    }

    pub fn load_session(&mut self, path: &Path) -> Result<()> {
        let session = self.file_manager.load_session(path)?;
        self.reset_session(session, Some(path.to_path_buf()));
        Ok(())
    }

    pub fn save_session(&mut self) -> Result<()> {
        let path = self
            .session_path
            .clone()
            .ok_or_else(|| anyhow!("No session file selected"))?;
        self.file_manager.save_session(&self.session, &path)?;
        self.dirty = false;
        Ok(())
    }

    /// Switches to `path` only once the session has been written there.
    pub fn save_session_as(&mut self, path: PathBuf) -> Result<()> {
        self.file_manager.save_session(&self.session, &path)?;
        self.session_path = Some(path);
        self.dirty = false;
        Ok(())
    }

    pub fn import_android_scan(&mut self, path: &Path) -> Result<()> {
        let scan = self.file_manager.load_scan_results(path)?;
        self.android.load_scan(scan, &self.rule_provider);
        Ok(())
    }

    pub fn export_android_scan(&self, path: &Path) -> Result<()> {
        let scan = self
            .android
            .scan
            .as_ref()
            .ok_or_else(|| anyhow!("No Android scan loaded"))?;
        self.file_manager.save_scan_results(scan, path)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratedAssessmentInstance, PropertyBag, TestStepResult, UserCapturedInstance};
    use std::collections::BTreeMap;

    const STEP: &str = "headingFunction";

    fn state_with(entries: &[(&str, ManualTestStatus)]) -> AppState {
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
        let mut session = SessionFile::new();
        session.assessments.insert(TestType::Headings, AssessmentStoreData::with_instances(map));

        let mut state = AppState::new();
        state.reset_session(session, None);
        state
    }

    #[test]
    fn new_state_starts_on_first_step_without_data() {
        let state = AppState::new();
        assert_eq!(state.assessment_nav_state, AssessmentNavState::new(TestType::Headings, STEP));
        assert!(state.instances_map(TestType::Headings).is_none());
        assert_eq!(state.requirement_status(TestType::Headings, STEP), ManualTestStatus::Unknown);
    }

    #[test]
    fn visual_helper_enable_and_disable() {
        let mut state = state_with(&[]);
        state.apply(Action::EnableVisualHelper { test_type: TestType::Headings, step: STEP.into() }).unwrap();
        assert!(state.is_step_enabled(TestType::Headings, STEP));
        assert!(!state.is_step_enabled(TestType::Headings, "headingLevel"));

        state.apply(Action::DisableVisualHelper { test_type: TestType::Headings, step: STEP.into() }).unwrap();
        assert!(!state.is_step_enabled(TestType::Headings, STEP));
    }

    #[test]
    fn pass_unmarked_marks_session_dirty() {
        let mut state = state_with(&[("#a", ManualTestStatus::Pass), ("#b", ManualTestStatus::Unknown)]);
        state.apply(Action::PassUnmarkedInstances { test_type: TestType::Headings, step: STEP.into() }).unwrap();

        assert!(state.dirty);
        assert_eq!(state.requirement_status(TestType::Headings, STEP), ManualTestStatus::Pass);
    }

    #[test]
    fn focus_update_is_recorded_even_when_repeated() {
        let mut state = state_with(&[("#a", ManualTestStatus::Pass)]);
        let target = vec!["#a".to_string()];
        state.apply(Action::UpdateFocusedInstance { target: target.clone() }).unwrap();
        state.apply(Action::UpdateFocusedInstance { target: target.clone() }).unwrap();
        assert_eq!(state.focused_target, Some(target));
    }

    #[test]
    fn actions_for_unscanned_assessments_are_rejected() {
        let mut state = state_with(&[]);
        let err = state
            .apply(Action::PassUnmarkedInstances { test_type: TestType::Links, step: "linkPurpose".into() })
            .unwrap_err();
        assert_eq!(err, StoreError::NoAssessmentData);
    }

    #[test]
    fn captured_instance_creates_assessment_slot() {
        let mut state = state_with(&[]);
        state
            .apply(Action::AddCapturedInstance {
                test_type: TestType::Links,
                instance: UserCapturedInstance {
                    id: "c1".to_string(),
                    description: "Link text is ambiguous".to_string(),
                    selector: Some("#more".to_string()),
                    html: None,
                },
            })
            .unwrap();

        let links = state.assessment_data(TestType::Links).expect("slot created");
        assert_eq!(links.manual_instances.len(), 1);
        assert!(links.generated_instances_map.is_none());

        state.apply(Action::RemoveCapturedInstance { test_type: TestType::Links, id: "c1".into() }).unwrap();
        assert!(state.assessment_data(TestType::Links).unwrap().manual_instances.is_empty());
    }

    #[test]
    fn selecting_another_step_clears_focus() {
        let mut state = state_with(&[("#a", ManualTestStatus::Pass)]);
        state.focused_target = Some(vec!["#a".to_string()]);
        state.select_step(TestType::Headings, STEP);
        assert!(state.focused_target.is_some());
        state.select_step(TestType::Headings, "headingLevel");
        assert!(state.focused_target.is_none());
        assert_eq!(state.assessment_nav_state.selected_test_step, "headingLevel");
    }

    #[test]
    fn visualization_changes_mark_session_dirty() {
        let mut state = state_with(&[("#a", ManualTestStatus::Pass), ("#b", ManualTestStatus::Unknown)]);
        state
            .apply(Action::ChangeVisualizationState {
                enabled: true,
                test_type: TestType::Headings,
                step: STEP.into(),
                selector: "#a".into(),
            })
            .unwrap();
        assert!(state.dirty);

        state.dirty = false;
        state
            .apply(Action::ChangeVisualizationStateForAll {
                enabled: true,
                test_type: TestType::Headings,
                step: STEP.into(),
            })
            .unwrap();
        assert!(state.dirty);
    }

    #[test]
    fn failed_save_as_keeps_previous_path() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("session.ron");
        let mut state = state_with(&[("#a", ManualTestStatus::Unknown)]);
        state.save_session_as(original.clone()).unwrap();
        assert_eq!(state.session_path.as_deref(), Some(original.as_path()));

        state.dirty = true;
        let unreachable = dir.path().join("missing").join("session.ron");
        assert!(state.save_session_as(unreachable).is_err());
        assert_eq!(state.session_path, Some(original));
        assert!(state.dirty);
    }

    #[test]
    fn exporting_without_a_scan_fails() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new();
        let err = state.export_android_scan(&dir.path().join("scan.ron")).unwrap_err();
        assert!(err.to_string().contains("No Android scan loaded"));
    }

    #[test]
    fn reset_session_drops_visual_helpers() {
        let mut state = state_with(&[]);
        state.apply(Action::EnableVisualHelper { test_type: TestType::Headings, step: STEP.into() }).unwrap();
        state.reset_session(SessionFile::new(), None);
        assert!(state.enabled_visual_helpers.is_empty());
        assert!(state.instances_map(TestType::Headings).is_none());
    }
}
