//! # clock-core
//!
//! Shared library for the clock configurator containing the configuration
//! model, the colour and alarm-time codecs, the form mapping and the backup
//! validator.
//!
//! This crate is used by both the HTTP backend (`clock-server`) and the editor
//! front end (`clock-editor`).  It has zero dependencies on sockets, files or
//! UI frameworks.
//!
//! # Architecture overview (for beginners)
//!
//! The clock stores one JSON *configuration document*: its name, alarm time,
//! radio settings, display patterns and colours, and location.  The editor
//! shows that document as a form, lets the user change it, and writes it back.
//! Users can also export the whole document as a *backup* and paste it back in
//! later (or on another clock).
//!
//! - **`domain`** – The [`Configuration`] entity plus small pure codecs:
//!   colours (`[r, g, b]` ⇄ `#RRGGBB`), alarm times (minutes ⇄ `HH:MM`) and the
//!   known option sets (alarm activations and display patterns).
//!
//! - **`mapping`** – Converts a [`Configuration`] to and from the form
//!   representation ([`FieldSet`]) and to and from JSON.
//!
//! - **`validation`** – Checks a pasted backup document before it is allowed to
//!   replace the configuration stored on the clock.

pub mod domain;
pub mod mapping;
pub mod validation;

// Re-export the most-used types at the crate root so callers can write
// `clock_core::Configuration` instead of `clock_core::domain::configuration::Configuration`.
pub use domain::colour::Rgb;
pub use domain::configuration::{Configuration, DisplaySlot};
pub use domain::options::{derive_colour_enabled, OptionSets};
pub use mapping::{FieldSet, MappingError};
pub use validation::{validate, validate_backup, ValidationErrors};
