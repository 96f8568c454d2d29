// src/android/scan_results.rs
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleStatus {
    Pass,
    Fail,
    Incomplete,
    NotApplicable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct BoundingRectangle {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingRectangle {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxeView {
    pub id: u64,
    pub class_name: String,
    #[serde(default)]
    pub content_description: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub bounds_in_screen: BoundingRectangle,
}

/// One rule evaluated against one view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleResultsData {
    pub axe_view_id: u64,
    pub rule_id: String,
    pub status: RuleStatus,
    #[serde(default)]
    pub props: BTreeMap<String, String>,
}

impl RuleResultsData {
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    pub fn numeric_prop(&self, name: &str) -> Option<f64> {
        self.prop(name)?.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AndroidScanResults {
    pub device_name: String,
    pub app_identifier: String,
    pub scan_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub axe_views: Vec<AxeView>,
    pub axe_results: Vec<RuleResultsData>,
}

impl AndroidScanResults {
    pub fn view(&self, id: u64) -> Option<&AxeView> {
        self.axe_views.iter().find(|v| v.id == id)
    }
}
