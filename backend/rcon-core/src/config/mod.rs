//! Durable server credentials.
//!
//! The credential file is a flat JSON object with exactly three string fields
//! (`server_ip`, `port`, `password`), read at startup, on every watcher tick
//! that sees a newer modification time, and written by [`ConfigStore::save`].

pub mod watcher;

pub use watcher::{ConfigEvent, ConfigWatcher};

use crate::error::config::ConfigError;

use common::{ErrorLocation, RedactedSecret};
use models::Credentials;

use std::ffi::OsString;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const TEMP_FILE_SUFFIX: &str = ".tmp";

/// On-disk shape of the credential file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigRecord {
    #[serde(default)]
    pub server_ip: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub password: String,
}

impl From<&Credentials> for ConfigRecord {
    fn from(credentials: &Credentials) -> Self {
        Self {
            server_ip: credentials.host.clone(),
            port: credentials.port.clone(),
            password: credentials.secret.expose().to_string(),
        }
    }
}

impl From<ConfigRecord> for Credentials {
    fn from(record: ConfigRecord) -> Self {
        Credentials {
            host: record.server_ip,
            port: record.port,
            secret: RedactedSecret::new(record.password),
        }
    }
}

/// Credentials swapped in by a reload, with the copy they replaced.
#[derive(Debug, Clone)]
pub struct Reload {
    pub previous: Credentials,
    pub current: Credentials,
}

impl Reload {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Owner of the credential file and of the in-memory copy every invocation reads.
///
/// The in-memory copy is replaced whole under a write lock, so readers see
/// either the old or the new triple, never a mix.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    current: RwLock<Credentials>,
}

impl ConfigStore {
    /// Create a store backed by `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: RwLock::new(Credentials::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the credential file into memory.
    ///
    /// Never fails: a missing, unreadable or malformed file yields empty
    /// credentials and `false`. The flag is `true` only when all three
    /// fields are non-empty.
    pub fn load(&self) -> (Credentials, bool) {
        let credentials = self.read_or_default();
        self.replace(credentials.clone());

        let configured = credentials.is_complete();
        if configured {
            info!("Config loaded from {}", self.path.display());
        }
        (credentials, configured)
    }

    /// Re-read the file and swap the in-memory copy, returning both.
    ///
    /// Same fallback as [`load`](Self::load): a file that cannot be read or
    /// parsed replaces the credentials with empty ones. The previous copy is
    /// taken under the same write lock as the swap.
    pub fn reload(&self) -> Reload {
        let current = self.read_or_default();
        let previous = self.replace(current.clone());
        Reload { previous, current }
    }

    /// Persist `credentials` using temp file + rename, then adopt them in memory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any field is empty (nothing
    /// is written), or a write/serialization error.
    pub fn save(&self, credentials: &Credentials) -> Result<(), ConfigError> {
        validate(credentials)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                location: ErrorLocation::from(Location::caller()),
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(&ConfigRecord::from(credentials)).map_err(|e| {
            ConfigError::SerializeError {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            }
        })?;

        let temp_path = self.temp_path();

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        self.replace(credentials.clone());
        info!(
            "Config saved to {} ({})",
            self.path.display(),
            credentials.endpoint()
        );
        Ok(())
    }

    /// Credentials currently in memory.
    pub fn current(&self) -> Credentials {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_configured(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_complete()
    }

    /// Modification time of the credential file, `None` if it does not exist.
    pub fn modified(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
    }

    fn replace(&self, credentials: Credentials) -> Credentials {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, credentials)
    }

    fn read_or_default(&self) -> Credentials {
        match self.read_record() {
            Ok(credentials) => {
                if !credentials.is_complete() {
                    warn!(
                        "Config at {} is missing required fields",
                        self.path.display()
                    );
                }
                credentials
            }
            Err(e) => {
                warn!("Failed to load config, treating as not configured: {e}");
                Credentials::default()
            }
        }
    }

    fn read_record(&self) -> Result<Credentials, ConfigError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: self.path.clone(),
            source: e,
        })?;

        let record: ConfigRecord =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        debug!("Read config record from {}", self.path.display());
        Ok(Credentials::from(record))
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(TEMP_FILE_SUFFIX);
        PathBuf::from(name)
    }
}

#[track_caller]
fn validate(credentials: &Credentials) -> Result<(), ConfigError> {
    let missing: Vec<&str> = [
        ("server_ip", credentials.host.is_empty()),
        ("port", credentials.port.is_empty()),
        ("password", credentials.secret.is_empty()),
    ]
    .into_iter()
    .filter_map(|(field, empty)| empty.then_some(field))
    .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: format!("Missing required fields: {}", missing.join(", ")),
    })
}
