//! File-backed persistence for the configuration document.
//!
//! The device keeps exactly one document, `<data_dir>/config.json`:
//!
//! - The first read after installation finds no file, writes the factory
//!   defaults and returns them.
//! - A write loads the stored document, overlays the editable keys from the
//!   request and rewrites the whole file.  Keys the editor does not own
//!   (`version`, `isAlarmDisabled`, anything unknown) are kept as they are.
//!   A write never creates the document: with no file on disk it fails.
//! - Files are replaced with write-to-temp + rename, so a concurrent `GET`
//!   sees either the old or the new document, never half of one.
//!
//! Only the temp-file step is serialized.  Two overlapping writes each merge
//! onto whatever they read and the last rename wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clock_core::domain::configuration::{is_editable_key, Configuration};
use clock_core::mapping;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

/// File name of the document inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Name of the replacement file written next to the document before the
/// rename.
pub const TEMP_FILE_NAME: &str = ".config.json.tmp";

/// A JSON object, the shape every stored document has.
pub type Document = Map<String, Value>;

/// Error type for configuration store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write found no document to merge onto.
    #[error("no config at {path} to update")]
    Missing { path: PathBuf },

    /// The document exists but could not be read.
    #[error("could not read config at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document was read but is not a JSON object.
    #[error("config at {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// Writing the replacement document failed.
    #[error("I/O error writing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistence port for the single configuration document.
///
/// Implementations must be shareable across request handlers.
pub trait ConfigStore: Send + Sync {
    /// Returns the stored document exactly as persisted, creating it from the
    /// factory defaults when absent.
    fn read_document(&self) -> Result<Document, StoreError>;

    /// Merges the editable keys of `patch` onto the stored document and
    /// persists the result.  Non-editable keys in `patch` are ignored.
    ///
    /// Fails with [`StoreError::Missing`] when no document exists yet.
    fn write(&self, patch: &Document) -> Result<(), StoreError>;

    /// Returns the stored document as a typed [`Configuration`].
    fn read(&self) -> Result<Configuration, StoreError> {
        Ok(mapping::from_document(&self.read_document()?))
    }
}

/// [`ConfigStore`] that keeps the document as pretty-printed JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    version: String,
    // Guards the shared temp file.
    persist_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Creates a store for `<data_dir>/config.json`.
    ///
    /// Nothing is touched on disk until the first read or write.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(CONFIG_FILE_NAME),
            version: env!("CARGO_PKG_VERSION").to_string(),
            persist_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Overrides the firmware version written into a freshly created document.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Full path of the document file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document a new device starts with.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] if the defaults cannot be converted
    /// to JSON (which would indicate a bug in [`Configuration`]).
    pub fn default_document(&self) -> Result<Document, StoreError> {
        let config = Configuration {
            version: Some(self.version.clone()),
            ..Configuration::factory_default()
        };
        match serde_json::to_value(config)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: format!("default configuration serialized to {other}"),
            }),
        }
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_file_name(TEMP_FILE_NAME)
    }

    /// Loads the stored document, `None` when there is no file yet.
    fn load(&self) -> Result<Option<Document>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => self.parse(&text).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Unreadable {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn parse(&self, text: &str) -> Result<Document, StoreError> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: "document is not a JSON object".to_string(),
            }),
            Err(e) => Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Replaces the file with `doc` through [`TEMP_FILE_NAME`].
    ///
    /// On failure the previous document is left as it was.
    fn persist(&self, doc: &Document) -> Result<(), StoreError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let content = serde_json::to_string_pretty(doc)?;
        let tmp = self.temp_path();
        let _guard = self
            .persist_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::fs::write(&tmp, content).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;

        if let Err(source) = std::fs::rename(&tmp, &self.path) {
            // Best effort; the rename error is the one worth reporting.
            let _ = std::fs::remove_file(&tmp);
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }
}

impl ConfigStore for JsonFileStore {
    fn read_document(&self) -> Result<Document, StoreError> {
        if let Some(doc) = self.load()? {
            return Ok(doc);
        }
        let doc = self.default_document()?;
        self.persist(&doc)?;
        info!(path = %self.path.display(), "created default configuration");
        Ok(doc)
    }

    fn write(&self, patch: &Document) -> Result<(), StoreError> {
        let mut doc = self.load()?.ok_or_else(|| StoreError::Missing {
            path: self.path.clone(),
        })?;
        for (key, value) in patch {
            if is_editable_key(key) {
                doc.insert(key.clone(), value.clone());
            } else {
                debug!(key = %key, "ignoring non-editable key in write");
            }
        }
        self.persist(&doc)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
