//! Application layer for clock-editor.
//!
//! # What lives here? (for beginners)
//!
//! The editor's behaviour, independent of how it talks to the clock or to the
//! user:
//!
//! - [`controller`]: load, save, backup export and backup import.
//! - [`notification`]: the feedback message and its dismiss timer.
//!
//! Both the backend ([`crate::infrastructure::ConfigApi`]) and the yes/no
//! prompt ([`Confirm`]) are traits, so the controller is tested with mocks and
//! never needs a running server or a terminal.

pub mod controller;
pub mod notification;

pub use controller::{Confirm, EditorController, EditorError, ImportOutcome, IMPORT_PROMPT};
pub use notification::{Notification, NotificationKind, NotificationPresenter, Phase};
