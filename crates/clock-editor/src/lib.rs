//! clock-editor library crate.
//!
//! A terminal stand-in for the clock's web page: it loads the configuration
//! from the device, lets fields be changed by their form ids, saves it back,
//! and exports or imports a whole-configuration backup.
//!
//! ```text
//! [clock-editor]
//!   ├── application/      EditorController, NotificationPresenter
//!   └── infrastructure/
//!         ├── http_client/ reqwest client for GET /config, POST /writeConfig
//!         └── prompt/      dialoguer yes/no confirmation
//!         ↕
//! clock-server (or the device itself)
//! ```

/// Application layer: editor operations and notifications.
pub mod application;

/// Infrastructure layer: HTTP client and terminal prompt.
pub mod infrastructure;
