// src/android/unified_results.rs
use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use uuid::Uuid;
use super::rule_information::UnifiedFormattableResolution;
use super::rule_information_provider::RuleInformationProvider;
use super::scan_results::{AndroidScanResults, BoundingRectangle, RuleStatus};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InstanceResultStatus {
    Pass,
    Fail,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnifiedDescriptors {
    pub class_name: String,
    pub content_description: Option<String>,
    pub text: Option<String>,
    pub bounds: BoundingRectangle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnifiedResult {
    pub uid: Uuid,
    pub rule_id: String,
    pub status: InstanceResultStatus,
    pub descriptors: Option<UnifiedDescriptors>,
    pub resolution: UnifiedFormattableResolution,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnifiedRule {
    pub id: String,
    pub description: String,
}

fn to_instance_status(status: RuleStatus) -> Option<InstanceResultStatus> {
    match status {
        RuleStatus::Pass => Some(InstanceResultStatus::Pass),
        RuleStatus::Fail => Some(InstanceResultStatus::Fail),
        RuleStatus::Incomplete => Some(InstanceResultStatus::Unknown),
        RuleStatus::NotApplicable => None,
    }
}

/// Unknown rules, not-applicable results and results a rule chooses to exclude are dropped.
pub fn convert_scan_results_to_unified_results(
    scan: &AndroidScanResults,
    provider: &RuleInformationProvider,
    uuid_generator: &mut dyn FnMut() -> Uuid,
) -> Vec<UnifiedResult> {
    let mut results = Vec::new();

    for data in &scan.axe_results {
        let Some(rule) = provider.get_rule_information(&data.rule_id) else {
            tracing::debug!(rule_id = %data.rule_id, "skipping result for unknown rule");
            continue;
        };
        let Some(status) = to_instance_status(data.status) else { continue };
        if !rule.include_this_result(data) {
            continue;
        }

        let descriptors = scan.view(data.axe_view_id).map(|view| UnifiedDescriptors {
            class_name: view.class_name.clone(),
            content_description: view.content_description.clone(),
            text: view.text.clone(),
            bounds: view.bounds_in_screen,
        });

        results.push(UnifiedResult {
            uid: uuid_generator(),
            rule_id: data.rule_id.clone(),
            status,
            descriptors,
            resolution: rule.get_unified_formattable_resolution(data),
        });
    }

    results
}

/// Rules referenced by the scan, in first-seen order.
pub fn convert_scan_results_to_unified_rules(
    scan: &AndroidScanResults,
    provider: &RuleInformationProvider,
) -> Vec<UnifiedRule> {
    let mut rules: Vec<UnifiedRule> = Vec::new();

    for data in &scan.axe_results {
        if rules.iter().any(|r| r.id == data.rule_id) {
            continue;
        }
        if let Some(rule) = provider.get_rule_information(&data.rule_id) {
            rules.push(UnifiedRule {
                id: rule.rule_id.clone(),
                description: rule.rule_description.clone(),
            });
        }
    }

    rules
}

pub fn failure_counts_by_rule(results: &[UnifiedResult]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for result in results.iter().filter(|r| r.status == InstanceResultStatus::Fail) {
        *counts.entry(result.rule_id.as_str()).or_insert(0) += 1;
    }
    counts
}
