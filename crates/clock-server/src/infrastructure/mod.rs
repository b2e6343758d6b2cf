//! Infrastructure layer for clock-server.
//!
//! Everything that touches the outside world lives here:
//!
//! - `store`: the configuration document on disk
//! - `http`: the axum router and listener
//! - `settings_file`: the optional TOML settings file
//!
//! Assembling [`crate::domain::ServerSettings`] from the CLI is done in
//! `main.rs`.

pub mod http;
pub mod settings_file;
pub mod store;

pub use http::{router, serve};
pub use store::{ConfigStore, JsonFileStore, StoreError};
