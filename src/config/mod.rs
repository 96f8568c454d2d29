// src/config/mod.rs
pub mod assessment;

// Re-export commonly used types
pub use assessment::{
    AssessmentNavState,
    GeneratedAssessmentInstance,
    InstancesMap,
    ManualTestStatus,
    PropertyBag,
    TestStepResult,
    TestType,
    UserCapturedInstance,
};
