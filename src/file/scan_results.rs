// src/file/scan_results.rs
use super::{FileHandler, pretty_config};
use crate::android::AndroidScanResults;
use std::path::Path;
use std::fs;
use anyhow::{Result, Context};

#[derive(Debug)]
pub struct ScanResultsFileHandler;

impl ScanResultsFileHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FileHandler<AndroidScanResults> for ScanResultsFileHandler {
    fn load(&self, path: &Path) -> Result<AndroidScanResults> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scan results {}", path.display()))?;
        ron::from_str(&content).context("Failed to parse scan results")
    }

    fn save(&self, data: &AndroidScanResults, path: &Path) -> Result<()> {
        let content = ron::ser::to_string_pretty(data, pretty_config())?;
        fs::write(path, content)?;
        Ok(())
    }
}
