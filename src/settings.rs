// src/settings.rs
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

pub const APP_DIR: &str = "a11y-insights";
pub const ENV_PREFIX: &str = "A11Y_INSIGHTS";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub log_level: String,
    pub window_width: f32,
    pub window_height: f32,
    pub auto_save: bool,
    #[serde(default)]
    pub last_session: Option<PathBuf>,
}

impl Settings {
    /// Defaults, then `settings.toml` in the user config dir, then `A11Y_INSIGHTS_*` variables.
    pub fn load() -> Result<Self> {
        Self::load_from(settings_file())
    }

    pub fn load_from(file: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("log_level", "info")?
            .set_default("window_width", 1024.0)?
            .set_default("window_height", 768.0)?
            .set_default("auto_save", false)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to build settings")?
            .try_deserialize()
            .context("Failed to read settings")
    }
}

pub fn settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("settings.toml"))
}

pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("logs")
}
