//! Settings file for the Rxpad CLI.
//!
//! Settings live in a small JSON file in the standard configuration directory
//! (`~/.config/rxpad/settings.json` on most platforms). Every field is
//! optional; absent fields fall back to defaults, and a file that cannot be
//! parsed is ignored with a warning rather than aborting startup.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::expand_tilde;

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "RXPAD_SETTINGS_PATH";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const DEFAULT_SEARCH_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RESULT_LIMIT: usize = 5;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Error surfaced when reading or writing settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persisted setting values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPayload {
    /// Base URL of the search collaborator (`GET {base}/search?q=`)
    pub search_base_url: String,
    /// Offline `drugs.json` catalog; when set, lookups never touch the network
    pub catalog_path: Option<PathBuf>,
    pub request_timeout_secs: u64,
    /// Maximum suggestions returned by the offline catalog
    pub result_limit: usize,
    /// Fallback `tracing` filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for SettingsPayload {
    fn default() -> Self {
        Self {
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            catalog_path: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            result_limit: DEFAULT_RESULT_LIMIT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Settings store backed by a JSON file.
#[derive(Debug)]
pub struct Settings {
    path: PathBuf,
    payload: SettingsPayload,
}

impl Settings {
    /// Load settings from `RXPAD_SETTINGS_PATH` or the default config path.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(default_settings_path())
    }

    /// Like [`Settings::load`], but an unreadable settings file yields
    /// [`Settings::ephemeral`] instead of failing. The error is handed back so
    /// the caller can report it once logging is set up.
    pub fn load_or_ephemeral() -> (Self, Option<SettingsError>) {
        match Self::load() {
            Ok(settings) => (settings, None),
            Err(error) => (Self::ephemeral(), Some(error)),
        }
    }

    /// Load settings from an explicit path.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload,
        })
    }

    /// Build an in-memory store used when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: SettingsPayload::default(),
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn payload(&self) -> &SettingsPayload {
        &self.payload
    }

    pub fn search_base_url(&self) -> &str {
        &self.payload.search_base_url
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.payload.catalog_path.as_deref()
    }
}

fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rxpad")
        .join(SETTINGS_FILE_NAME)
}

fn load_payload(path: &Path) -> Result<SettingsPayload, SettingsError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse settings file; using defaults"
                );
                Ok(SettingsPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(SettingsPayload::default()),
        Err(error) => Err(SettingsError::Io(error)),
    }
}
