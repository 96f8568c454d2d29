// src/handlers/mod.rs
pub mod assessment_instance_table_handler;

pub use assessment_instance_table_handler::{
    AssessmentInstanceRowData,
    AssessmentInstanceTableHandler,
    CapturedInstanceRowData,
    ColumnConfig,
    InstanceTableHandler,
    RowEvent,
};
