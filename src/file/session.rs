// src/file/session.rs
use super::{FileHandler, pretty_config};
use crate::config::TestType;
use crate::state::assessment_state::AssessmentStoreData;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::fs;
use anyhow::{Result, Context};

/// Everything produced by one scan of one target plus the user's manual marks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionFile {
    pub version: String,
    pub target: String,
    #[serde(default)]
    pub scan_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assessments: BTreeMap<TestType, AssessmentStoreData>,
}

impl SessionFile {
    pub fn new() -> Self {
        Self {
            version: "1.0.0".to_string(),
            target: String::new(),
            scan_timestamp: None,
            assessments: BTreeMap::new(),
        }
    }
}

impl Default for SessionFile {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct SessionFileHandler;

impl SessionFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<SessionFile> for SessionFileHandler {
    fn load(&self, path: &Path) -> Result<SessionFile> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        ron::from_str(&content).context("Failed to parse session file")
    }

    fn save(&self, data: &SessionFile, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(data, pretty_config())?;
        fs::write(path, content)?;
        Ok(())
    }
}
