// src/android/mod.rs
pub mod rule_information;
pub mod rule_information_provider;
pub mod scan_results;
pub mod unified_results;

// Re-export commonly used types
pub use rule_information::{RuleInformation, UnifiedFormattableResolution};
pub use rule_information_provider::RuleInformationProvider;
pub use scan_results::{AndroidScanResults, RuleResultsData, RuleStatus};
pub use unified_results::{
    convert_scan_results_to_unified_results,
    convert_scan_results_to_unified_rules,
    InstanceResultStatus,
    UnifiedResult,
    UnifiedRule,
};
