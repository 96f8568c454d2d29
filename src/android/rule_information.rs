// src/android/rule_information.rs
use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};
use super::scan_results::RuleResultsData;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnifiedRichResolution {
    pub content_id: String,
    pub content_variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnifiedFormattableResolution {
    pub how_to_fix_summary: String,
    pub rich_resolution: Option<UnifiedRichResolution>,
}

pub type GetUnifiedFormattableResolutionDelegate = Box<dyn Fn(&RuleResultsData) -> UnifiedFormattableResolution>;
pub type IncludeThisResultDelegate = Box<dyn Fn(&RuleResultsData) -> bool>;

/// A rule id and description plus the rule-specific resolution and filter functions.
pub struct RuleInformation {
    pub rule_id: String,
    pub rule_description: String,
    get_unified_formattable_resolution_delegate: GetUnifiedFormattableResolutionDelegate,
    include_this_result_delegate: IncludeThisResultDelegate,
}

impl RuleInformation {
    pub fn new(
        rule_id: impl Into<String>,
        rule_description: impl Into<String>,
        get_unified_formattable_resolution: impl Fn(&RuleResultsData) -> UnifiedFormattableResolution + 'static,
        include_this_result: impl Fn(&RuleResultsData) -> bool + 'static,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule_description: rule_description.into(),
            get_unified_formattable_resolution_delegate: Box::new(get_unified_formattable_resolution),
            include_this_result_delegate: Box::new(include_this_result),
        }
    }

    pub fn get_unified_formattable_resolution(&self, rule_results_data: &RuleResultsData) -> UnifiedFormattableResolution {
        (self.get_unified_formattable_resolution_delegate)(rule_results_data)
    }

    pub fn include_this_result(&self, rule_results_data: &RuleResultsData) -> bool {
        (self.include_this_result_delegate)(rule_results_data)
    }
}

impl fmt::Debug for RuleInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleInformation")
            .field("rule_id", &self.rule_id)
            .field("rule_description", &self.rule_description)
            .finish_non_exhaustive()
    }
}
