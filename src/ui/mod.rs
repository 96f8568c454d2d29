// src/ui/mod.rs
pub mod assessment_instance_table;
pub mod assessment_view;
pub mod automated_checks;
pub mod visual_helper_toggle;

pub use assessment_view::AssessmentViewState;
