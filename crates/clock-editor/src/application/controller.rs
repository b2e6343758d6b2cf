//! The editor's user-facing operations.
//!
//! [`EditorController`] owns the form ([`FieldSet`]) and the
//! [`NotificationPresenter`], and drives the backend through a [`ConfigApi`]:
//!
//! | Operation         | Backend calls                  | Success notification             |
//! |-------------------|--------------------------------|----------------------------------|
//! | `load`            | `GET /config`                  | none                             |
//! | `save`            | `POST /writeConfig`            | "Configuration saved successfully" |
//! | `export_backup`   | `GET /config`                  | none                             |
//! | `import_backup`   | `POST /writeConfig`, `GET /config` | "Backup uploaded successfully" |
//!
//! Every failure ends the operation with an error notification; nothing is
//! retried.  A backup is only sent after it passes validation *and* the user
//! confirms through the injected [`Confirm`].

use clock_core::mapping::{self, FieldSet, MappingError};
use clock_core::{validate, OptionSets};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::notification::{NotificationKind, NotificationPresenter};
use crate::infrastructure::http_client::{ClientError, ConfigApi};

/// Question asked before a backup overwrites the device.
pub const IMPORT_PROMPT: &str = "This will replace the configuration on the device. Are you sure?";

/// Asks the user a yes/no question.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Error type for editor operations.
///
/// The user-facing text has already been shown through the presenter when one
/// of these is returned.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to load configuration: {0}")]
    Load(ClientError),

    #[error("failed to save configuration: {0}")]
    Save(ClientError),

    #[error("backup text is empty")]
    EmptyBackup,

    #[error("backup text is not valid JSON: {0}")]
    BackupSyntax(#[source] serde_json::Error),

    #[error("backup data is invalid: {}", .0.join("; "))]
    BackupInvalid(Vec<String>),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] MappingError),
}

/// Result of an import the user was asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Uploaded,
    Declined,
}

pub struct EditorController<A, C> {
    api: A,
    confirm: C,
    options: OptionSets,
    fields: FieldSet,
    presenter: NotificationPresenter,
}

impl<A: ConfigApi, C: Confirm> EditorController<A, C> {
    /// Creates a controller with a blank form and the built-in option sets.
    pub fn new(api: A, confirm: C) -> Self {
        Self {
            api,
            confirm,
            options: OptionSets::default(),
            fields: mapping::to_fields(&mapping::from_document(&Map::new())),
            presenter: NotificationPresenter::new(),
        }
    }

    /// Validates backups against `options` instead of the built-in lists.
    pub fn with_options(mut self, options: OptionSets) -> Self {
        self.options = options;
        self
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldSet {
        &mut self.fields
    }

    pub fn presenter(&self) -> &NotificationPresenter {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut NotificationPresenter {
        &mut self.presenter
    }

    /// Fetches the stored configuration and replaces the form with it.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Load`] on a transport failure, a non-200
    /// response or a body that is not a JSON object.
    pub async fn load(&mut self) -> Result<(), EditorError> {
        let fetched = self.api.fetch_config().await.and_then(|doc| {
            mapping::from_value(&doc).map_err(|e| ClientError::Decode(e.to_string()))
        });
        match fetched {
            Ok(config) => {
                self.fields = mapping::to_fields(&config);
                info!(device = %config.device_name, "configuration loaded");
                Ok(())
            }
            Err(e) => {
                let text = match &e {
                    ClientError::Status(status) => {
                        format!("Unable to retrieve configuration, status = {status}")
                    }
                    ClientError::Transport(_) | ClientError::Decode(_) => {
                        "Unable to retrieve configuration".to_string()
                    }
                };
                warn!("load failed: {e}");
                self.presenter.show(text, NotificationKind::Error);
                Err(EditorError::Load(e))
            }
        }
    }

    /// Sends the form to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Save`] if the write is not acknowledged with 200.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let config = mapping::from_fields(&self.fields);
        let body = Value::Object(mapping::editable_document(&config)?);
        self.send(&body).await?;
        info!("configuration saved");
        self.presenter
            .show("Configuration saved successfully", NotificationKind::Success);
        Ok(())
    }

    /// Reloads the configuration and returns it as backup text.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Load`] if the reload fails.
    pub async fn export_backup(&mut self) -> Result<String, EditorError> {
        self.load().await?;
        Ok(mapping::to_backup_json(&mapping::from_fields(&self.fields))?)
    }

    /// Validates `text` as a backup and, once confirmed, uploads it.
    ///
    /// # Errors
    ///
    /// - [`EditorError::EmptyBackup`] for blank text.
    /// - [`EditorError::BackupSyntax`] if `text` is not JSON.
    /// - [`EditorError::BackupInvalid`] with every broken rule.
    /// - [`EditorError::Save`] if the upload fails.
    ///
    /// Declining the confirmation is not an error and leaves the device as it
    /// was.
    pub async fn import_backup(&mut self, text: &str) -> Result<ImportOutcome, EditorError> {
        let text = text.trim();
        if text.is_empty() {
            self.presenter
                .show("Please paste in some backup text", NotificationKind::Error);
            return Err(EditorError::EmptyBackup);
        }

        let backup: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                self.presenter.show(
                    format!("Invalid backup text: {}: {e}", json_error_kind(&e)),
                    NotificationKind::Error,
                );
                return Err(EditorError::BackupSyntax(e));
            }
        };

        let errors = validate(&backup, &self.options);
        if !errors.is_empty() {
            let list: String = errors.iter().map(|e| format!("\n  - {e}")).collect();
            self.presenter
                .show(format!("Invalid backup data:{list}"), NotificationKind::Error);
            return Err(EditorError::BackupInvalid(errors));
        }

        if !self.confirm.confirm(IMPORT_PROMPT) {
            info!("backup import declined");
            return Ok(ImportOutcome::Declined);
        }

        self.send(&backup).await?;
        info!("backup uploaded");
        self.presenter
            .show("Backup uploaded successfully", NotificationKind::Success);
        // The upload stands even if the reload fails; that failure replaces
        // the notification above.
        let _ = self.load().await;
        Ok(ImportOutcome::Uploaded)
    }

    async fn send(&mut self, body: &Value) -> Result<(), EditorError> {
        if let Err(e) = self.api.write_config(body).await {
            let text = match &e {
                ClientError::Status(status) => {
                    format!("Unable to save configuration, status = {status}")
                }
                ClientError::Transport(_) | ClientError::Decode(_) => {
                    "Unable to save configuration".to_string()
                }
            };
            warn!("write failed: {e}");
            self.presenter.show(text, NotificationKind::Error);
            return Err(EditorError::Save(e));
        }
        Ok(())
    }
}

/// Short name for the class of JSON parse failure.
fn json_error_kind(e: &serde_json::Error) -> &'static str {
    use serde_json::error::Category;
    match e.classify() {
        Category::Syntax => "SyntaxError",
        Category::Eof => "UnexpectedEnd",
        Category::Data => "DataError",
        Category::Io => "IoError",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
