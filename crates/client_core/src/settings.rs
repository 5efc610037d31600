//! Client settings: defaults, then an optional TOML file, then environment
//! overrides. Command-line flags are applied last by the binaries.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    api::{normalize_base_url, DEFAULT_REQUEST_TIMEOUT},
    error::ClientError,
    notification::NOTIFICATION_DURATION,
};

pub const DEFAULT_SETTINGS_FILE: &str = "employee_admin.toml";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub notification_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            notification_secs: NOTIFICATION_DURATION.as_secs(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    InvalidBaseUrl(#[from] ClientError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    notification_secs: Option<u64>,
}

/// Loads settings from `explicit_path` (which must exist) or from
/// [`DEFAULT_SETTINGS_FILE`] in the working directory (which may be absent),
/// then applies process environment overrides.
pub fn load_settings(explicit_path: Option<&Path>) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    match explicit_path {
        Some(path) => apply_file(&mut settings, path)?,
        None => {
            let path = Path::new(DEFAULT_SETTINGS_FILE);
            if path.exists() {
                apply_file(&mut settings, path)?;
            }
        }
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    finalize(settings)
}

fn apply_file(settings: &mut Settings, path: &Path) -> Result<(), SettingsError> {
    let raw = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    apply_toml(settings, &raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_toml(settings: &mut Settings, raw: &str) -> Result<(), toml::de::Error> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.notification_secs {
        settings.notification_secs = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_empty("EMPLOYEE_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = non_empty("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = non_empty("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(err) => tracing::warn!("ignoring APP__REQUEST_TIMEOUT_SECS='{v}': {err}"),
        }
    }
}

/// Validates and normalizes the base url. Binaries call this again after
/// applying their own overrides.
pub fn finalize(mut settings: Settings) -> Result<Settings, SettingsError> {
    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    Ok(settings)
}
