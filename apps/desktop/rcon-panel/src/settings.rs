//! Front-end settings read from the environment.
//!
//! An optional `.env` is loaded first (current directory, then the directory
//! of the executable). Durations use humantime syntax (`5s`, `750ms`, `1m`).

use crate::error::PanelError;

use rcon_core::runner::McrconRunner;
use rcon_core::{CONFIG_POLL_INTERVAL, DEFAULT_CONFIG_FILE, DEFAULT_INVOCATION_TIMEOUT};

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::PathBuf;
use std::time::Duration;

use log::debug;

pub const CONFIG_PATH_VAR: &str = "RCON_PANEL_CONFIG";
pub const CLIENT_PATH_VAR: &str = "RCON_CLIENT_PATH";
pub const TIMEOUT_VAR: &str = "RCON_TIMEOUT";
pub const POLL_INTERVAL_VAR: &str = "RCON_POLL_INTERVAL";
pub const LOG_DIR_VAR: &str = "RCON_LOG_DIR";

const APP_DIR_NAME: &str = "rcon-panel";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSettings {
    pub config_path: PathBuf,
    pub client_path: PathBuf,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub log_dir: PathBuf,
}

impl PanelSettings {
    /// Read settings from the process environment.
    ///
    /// Call [`load_dotenv`] first for `.env` values to take part.
    pub fn from_env() -> Result<Self, PanelError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    ///
    /// Unset or blank variables fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PanelError> {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = McrconRunner::default();

        let settings = Self {
            config_path: value(CONFIG_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
            client_path: value(CLIENT_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| defaults.client_path().to_path_buf()),
            timeout: parse_duration(TIMEOUT_VAR, value(TIMEOUT_VAR))?
                .unwrap_or(DEFAULT_INVOCATION_TIMEOUT),
            poll_interval: parse_duration(POLL_INTERVAL_VAR, value(POLL_INTERVAL_VAR))?
                .unwrap_or(CONFIG_POLL_INTERVAL),
            log_dir: value(LOG_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_log_dir),
        };

        debug!("Panel settings: {settings:?}");
        Ok(settings)
    }
}

#[track_caller]
fn parse_duration(key: &str, raw: Option<String>) -> Result<Option<Duration>, PanelError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let duration = humantime::parse_duration(&raw).map_err(|e| PanelError::Settings {
        message: format!("{key}={raw} is not a valid duration: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    if duration.is_zero() {
        return Err(PanelError::Settings {
            message: format!("{key} must be greater than zero"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(Some(duration))
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(env::temp_dir)
        .join(APP_DIR_NAME)
        .join(LOG_DIR_NAME)
}

/// Load the first `.env` found into the process environment.
///
/// Runs before the logger exists, so the loaded path is returned for the
/// caller to log.
pub fn load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }

    let env_path = env::current_exe().ok()?.parent()?.join(".env");
    if !env_path.exists() {
        return None;
    }

    dotenvy::from_path(&env_path).ok().map(|()| env_path)
}
