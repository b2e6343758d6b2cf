//! The operations behind `GET /config` and `POST /writeConfig`.
//!
//! [`ConfigService`] sits between the HTTP handlers and the
//! [`ConfigStore`]: it checks the shape of write requests, splits out the keys
//! a client may not change and logs what happened.  The handlers stay a thin
//! mapping from HTTP to these calls.

use std::sync::Arc;

use clock_core::domain::configuration::is_editable_key;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::infrastructure::store::{ConfigStore, Document, StoreError};

/// Error type for configuration service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The write request body was valid JSON but not an object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// The store failed to read or persist the document.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a write request changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WriteOutcome {
    /// Editable keys that were merged into the stored document.
    pub applied: Vec<String>,
    /// Keys present in the request that the store does not accept.
    pub ignored: Vec<String>,
}

/// Application service over a shared [`ConfigStore`].
///
/// Cheap to clone; every clone uses the same store.
#[derive(Clone)]
pub struct ConfigService {
    store: Arc<dyn ConfigStore>,
}

impl ConfigService {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Returns the stored document, creating the defaults on first use.
    pub fn current_document(&self) -> Result<Document, ServiceError> {
        Ok(self.store.read_document()?)
    }

    /// Applies a `POST /writeConfig` body.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotAnObject`] if `body` is not a JSON object.
    /// - [`ServiceError::Store`] if the stored document cannot be read or the
    ///   merged document cannot be persisted.
    pub fn apply_write(&self, body: &Value) -> Result<WriteOutcome, ServiceError> {
        let patch = body.as_object().ok_or(ServiceError::NotAnObject)?;

        let (applied, ignored): (Vec<String>, Vec<String>) =
            patch.keys().cloned().partition(|key| is_editable_key(key));
        if !ignored.is_empty() {
            warn!(?ignored, "write request contains keys that are not editable");
        }

        self.store.write(patch)?;
        info!(fields = applied.len(), "configuration written");

        Ok(WriteOutcome { applied, ignored })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
