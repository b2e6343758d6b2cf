//! Optional TOML settings file for the server.
//!
//! Passing `--settings <file>` (or `CLOCK_SETTINGS`) loads defaults for the
//! listener and data directory from a file such as:
//!
//! ```toml
//! [server]
//! bind_address = "0.0.0.0"
//! port = 8080
//!
//! [storage]
//! data_dir = "/var/lib/clock"
//! ```
//!
//! Every field is optional; a missing field takes the built-in default.
//! Command-line flags and environment variables override the file.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::settings::{ServerSettings, DEFAULT_DATA_DIR, DEFAULT_PORT};

/// Error type for settings file operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse settings TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `bind_address` and `port` do not form a socket address.
    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),
}

// ── Settings schema types ─────────────────────────────────────────────────────

/// Top-level settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SettingsFile {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub storage: StorageSection,
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    /// IP address to bind.  `"0.0.0.0"` binds all interfaces.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Where the configuration document lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSection {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl SettingsFile {
    /// Converts the file contents into [`ServerSettings`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidAddress`] if `bind_address` is not an
    /// IP address.
    pub fn into_settings(self) -> Result<ServerSettings, SettingsError> {
        let addr = format!("{}:{}", self.server.bind_address, self.server.port);
        let bind_addr: SocketAddr = addr
            .parse()
            .map_err(|_| SettingsError::InvalidAddress(addr.clone()))?;
        Ok(ServerSettings {
            bind_addr,
            data_dir: self.storage.data_dir,
        })
    }
}

/// Loads a settings file.
///
/// Unlike the configuration document, a settings file that was asked for but
/// does not exist is an error.
///
/// # Errors
///
/// Returns [`SettingsError::Io`] if the file cannot be read and
/// [`SettingsError::Parse`] if the TOML is malformed.
pub fn load_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
