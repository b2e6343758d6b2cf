//! Application layer for clock-server.
//!
//! Coordinates the domain and the store for each HTTP operation.  Nothing in
//! here knows about HTTP status codes or the file system.

pub mod config_service;

pub use config_service::{ConfigService, ServiceError, WriteOutcome};
