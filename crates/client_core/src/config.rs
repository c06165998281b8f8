use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "roster.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub max_redirects: usize,
    /// Offset applied when timestamps are rendered for display.
    pub display_utc_offset_minutes: i32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: 30,
            max_redirects: 5,
            display_utc_offset_minutes: 0,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Falls back to UTC when the configured offset is out of range.
    pub fn display_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.display_utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    request_timeout_secs: Option<u64>,
    max_redirects: Option<usize>,
    display_utc_offset_minutes: Option<i32>,
}

/// Defaults, then `roster.toml` in the working directory, then the
/// environment.
pub fn load_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();

    match read_settings_file(Path::new(SETTINGS_FILE)) {
        Ok(Some(file_cfg)) => apply_file_settings(&mut settings, file_cfg),
        Ok(None) => {}
        Err(err) => warn!(error = %format!("{err:#}"), "ignoring settings file"),
    }

    apply_env_settings(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn read_settings_file(path: &Path) -> anyhow::Result<Option<FileSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn apply_file_settings(settings: &mut ClientSettings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.max_redirects {
        settings.max_redirects = v;
    }
    if let Some(v) = file_cfg.display_utc_offset_minutes {
        settings.display_utc_offset_minutes = v;
    }
}

fn apply_env_settings(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("ROSTER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = var("APP__MAX_REDIRECTS") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.max_redirects = parsed;
        }
    }

    if let Some(v) = var("APP__DISPLAY_UTC_OFFSET_MINUTES") {
        if let Ok(parsed) = v.parse::<i32>() {
            settings.display_utc_offset_minutes = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
