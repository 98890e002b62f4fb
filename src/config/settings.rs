//! Client settings and configuration types.
//!
//! Settings are persisted to `~/.config/trackmail/settings.json` (or XDG
//! equivalent) and loaded at application startup. Missing files yield the
//! defaults; unknown fields are ignored so older clients tolerate newer
//! files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend API connection settings.
    pub api: ApiSettings,
    /// Inbox fetch and priority-view settings.
    pub inbox: InboxSettings,
}

/// Backend API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the trackmail backend.
    pub base_url: String,
    /// Request timeout.
    #[serde(with = "duration_serde")]
    pub timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Inbox fetch and priority-view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxSettings {
    /// Maximum emails fetched for the full inbox view.
    pub fetch_limit: u32,
    /// Maximum emails fetched for the priority view.
    pub priority_fetch_limit: u32,
    /// Minimum score for an email to appear in the priority view.
    pub priority_threshold: u8,
}

impl Default for InboxSettings {
    fn default() -> Self {
        Self {
            fetch_limit: 50,
            priority_fetch_limit: 20,
            priority_threshold: 60,
        }
    }
}

impl Settings {
    /// Loads settings from the default config path, falling back to
    /// defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parse settings from {}", path.display()))
    }

    /// Saves settings to a specific file, creating parent directories as
    /// needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self).context("serialize settings")?;
        std::fs::write(path, contents)
            .with_context(|| format!("write settings to {}", path.display()))
    }

    /// Returns the default settings file path for this platform.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "trackmail", "trackmail")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
