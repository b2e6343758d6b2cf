//! clock-server library crate.
//!
//! The backend a clock (or its test double) runs so that an editor can read
//! and replace the device configuration over HTTP.
//!
//! # Architecture
//!
//! ```text
//! Editor (JSON over HTTP)
//!         ↕
//! [clock-server]
//!   ├── domain/           ServerSettings
//!   ├── application/      ConfigService: document fetch, write requests
//!   └── infrastructure/
//!         ├── store/      JsonFileStore (config.json on disk)
//!         ├── http/       axum router: GET /config, POST /writeConfig
//!         └── settings_file/ optional TOML settings
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O.
//! - `application` talks to storage only through the
//!   [`infrastructure::store::ConfigStore`] trait, so it can be tested with an
//!   in-memory store.
//! - `infrastructure` owns the file system, the socket and the router.

/// Domain layer: runtime settings.
pub mod domain;

/// Application layer: the operations the HTTP endpoints expose.
pub mod application;

/// Infrastructure layer: file store, HTTP router, settings file.
pub mod infrastructure;
