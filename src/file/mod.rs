// src/file/mod.rs
use anyhow::{Result, anyhow};
use std::path::Path;
use crate::android::AndroidScanResults;

pub mod session;
pub mod scan_results;

pub use session::SessionFile;

// Core trait for file operations
pub trait FileHandler<T> {
    fn load(&self, path: &Path) -> Result<T>;
    fn save(&self, data: &T, path: &Path) -> Result<()>;
}

pub(crate) fn pretty_config() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::new()
        .new_line("\n".to_string())
        .depth_limit(6)
        .separate_tuple_members(true)
}

#[derive(Debug)]
pub struct FileManager {
    session_handler: session::SessionFileHandler,
    scan_handler: scan_results::ScanResultsFileHandler,
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FileManager {
    pub fn new() -> Self {
        Self {
            session_handler: session::SessionFileHandler::new(),
            scan_handler: scan_results::ScanResultsFileHandler::new(),
        }
    }

    pub fn load_session(&self, path: &Path) -> Result<SessionFile> {
        if !path.exists() {
            return Err(anyhow!("Session file not found: {}", path.display()));
        }

        let session = self.session_handler.load(path)?;
        for (test_type, data) in &session.assessments {
            if data.generated_instances_map.is_none() {
                tracing::warn!(%test_type, "session has no scan data for assessment");
            }
        }
        tracing::info!(path = %path.display(), target = %session.target, "session loaded");
        Ok(session)
    }

    pub fn save_session(&self, session: &SessionFile, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(anyhow!("Directory does not exist: {}", parent.display()));
            }
        }

        self.session_handler.save(session, path)?;
        tracing::info!(path = %path.display(), "session saved");
        Ok(())
    }

    pub fn load_scan_results(&self, path: &Path) -> Result<AndroidScanResults> {
        if !path.exists() {
            return Err(anyhow!("Scan results file not found: {}", path.display()));
        }

        let results = self.scan_handler.load(path)?;
        tracing::info!(
            path = %path.display(),
            device = %results.device_name,
            results = results.axe_results.len(),
            "android scan results loaded"
        );
        Ok(results)
    }

    pub fn save_scan_results(&self, results: &AndroidScanResults, path: &Path) -> Result<()> {
        self.scan_handler.save(results, path)?;
        tracing::info!(path = %path.display(), results = results.axe_results.len(), "android scan results exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratedAssessmentInstance, InstancesMap, ManualTestStatus, PropertyBag, TestStepResult, TestType};
    use crate::state::assessment_state::AssessmentStoreData;
    use std::collections::BTreeMap;
    use std::fs;

    fn sample_session() -> SessionFile {
        let mut results = BTreeMap::new();
        results.insert("headingFunction".to_string(), TestStepResult::new("headingFunction", ManualTestStatus::Unknown));
        let mut bag = PropertyBag::new();
        bag.insert("headingText".to_string(), "Welcome".to_string());

        let mut map = InstancesMap::new();
        map.insert("#main h1".to_string(), GeneratedAssessmentInstance {
            target: vec!["#main h1".to_string()],
            html: "<h1>Welcome</h1>".to_string(),
            test_step_results: results,
            property_bag: bag,
        });

        let mut session = SessionFile::new();
        session.target = "https://example.com".to_string();
        session.assessments.insert(TestType::Headings, AssessmentStoreData {
            generated_instances_map: Some(map),
            manual_instances: Vec::new(),
        });
        session.assessments.insert(TestType::Links, AssessmentStoreData::default());
        session
    }

    #[test]
    fn session_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.ron");
        let manager = FileManager::new();
        let session = sample_session();

        manager.save_session(&session, &path).unwrap();
        let loaded = manager.load_session(&path).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn missing_files_are_reported() {
        let manager = FileManager::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.ron");
        let err = manager.load_session(&path).unwrap_err();
        assert!(err.to_string().contains("Session file not found"));
        assert!(manager.load_scan_results(&path).is_err());
    }

    #[test]
    fn saving_into_missing_directory_fails() {
        let manager = FileManager::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("session.ron");
        assert!(manager.save_session(&SessionFile::new(), &path).is_err());
    }

    #[test]
    fn hand_written_scan_results_parse_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.ron");
        fs::write(&path, r#"(
            device_name: "Pixel 7",
            app_identifier: "com.example.notes",
            scan_timestamp: "2026-03-01T10:00:00Z",
            axe_views: [
                (id: 4, class_name: "android.widget.ImageView"),
            ],
            axe_results: [
                (axe_view_id: 4, rule_id: "ImageViewName", status: Fail),
                (axe_view_id: 4, rule_id: "ColorContrast", status: Pass, props: {"Color Contrast Ratio": "12.0"}),
            ],
        )"#).unwrap();

        let results = FileManager::new().load_scan_results(&path).unwrap();
        assert_eq!(results.device_name, "Pixel 7");
        assert_eq!(results.axe_results.len(), 2);
        assert_eq!(results.view(4).map(|v| v.class_name.as_str()), Some("android.widget.ImageView"));
        assert_eq!(results.axe_results[1].numeric_prop("Color Contrast Ratio"), Some(12.0));

        let exported = dir.path().join("exported.ron");
        FileManager::new().save_scan_results(&results, &exported).unwrap();
        assert_eq!(FileManager::new().load_scan_results(&exported).unwrap(), results);
    }
}
