// src/config/assessment.rs
use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestType {
    Headings,
    Landmarks,
    Images,
    Links,
}

impl TestType {
    pub const ALL: [TestType; 4] = [
        TestType::Headings,
        TestType::Landmarks,
        TestType::Images,
        TestType::Links,
    ];
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TestType::Headings => write!(f, "Headings"),
            TestType::Landmarks => write!(f, "Landmarks"),
            TestType::Images => write!(f, "Images"),
            TestType::Links => write!(f, "Links"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ManualTestStatus {
    Pass,
    Fail,
    Unknown,
}

impl Default for ManualTestStatus {
    fn default() -> Self {
        ManualTestStatus::Unknown // Nothing is marked until the user does it
    }
}

impl fmt::Display for ManualTestStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ManualTestStatus::Pass => write!(f, "Pass"),
            ManualTestStatus::Fail => write!(f, "Fail"),
            ManualTestStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestStepResult {
    pub id: String,
    pub status: ManualTestStatus,
    #[serde(default)]
    pub is_captured_by_user: bool,
    #[serde(default)]
    pub failure_summary: Option<String>,
    #[serde(default)]
    pub is_visualization_enabled: bool,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

impl TestStepResult {
    pub fn new(id: impl Into<String>, status: ManualTestStatus) -> Self {
        Self {
            id: id.into(),
            status,
            is_captured_by_user: false,
            failure_summary: None,
            is_visualization_enabled: false,
            is_visible: true,
        }
    }
}

pub type PropertyBag = BTreeMap<String, String>;

/// One scan target together with its per-step results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedAssessmentInstance<P = PropertyBag> {
    pub target: Vec<String>,
    #[serde(default)]
    pub html: String,
    pub test_step_results: BTreeMap<String, TestStepResult>,
    pub property_bag: P,
}

impl<P> GeneratedAssessmentInstance<P> {
    pub fn has_result_for_step(&self, step: &str) -> bool {
        self.test_step_results.contains_key(step)
    }

    pub fn step_status(&self, step: &str) -> Option<ManualTestStatus> {
        self.test_step_results.get(step).map(|r| r.status)
    }
}

/// Keyed by selector key, see `utils::selector_key`.
pub type InstancesMap = BTreeMap<String, GeneratedAssessmentInstance>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserCapturedInstance {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentNavState {
    pub selected_test_type: TestType,
    pub selected_test_step: String,
}

impl AssessmentNavState {
    pub fn new(test_type: TestType, step: impl Into<String>) -> Self {
        Self {
            selected_test_type: test_type,
            selected_test_step: step.into(),
        }
    }
}
