// src/state/android_state.rs
use uuid::Uuid;
use crate::android::{
    AndroidScanResults,
    RuleInformationProvider,
    UnifiedResult,
    UnifiedRule,
    convert_scan_results_to_unified_results,
    convert_scan_results_to_unified_rules,
};

#[derive(Debug, Default)]
pub struct AndroidState {
    pub scan: Option<AndroidScanResults>,
    pub unified_results: Vec<UnifiedResult>,
    pub unified_rules: Vec<UnifiedRule>,
}

impl AndroidState {
    /// Replaces any previous scan.
    pub fn load_scan(&mut self, scan: AndroidScanResults, provider: &RuleInformationProvider) {
        self.unified_results = convert_scan_results_to_unified_results(&scan, provider, &mut Uuid::new_v4);
        self.unified_rules = convert_scan_results_to_unified_rules(&scan, provider);
        tracing::info!(
            app = %scan.app_identifier,
            results = self.unified_results.len(),
            rules = self.unified_rules.len(),
            "android scan converted"
        );
        self.scan = Some(scan);
    }

    pub fn results_for_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a UnifiedResult> + 'a {
        self.unified_results.iter().filter(move |r| r.rule_id == rule_id)
    }
}
