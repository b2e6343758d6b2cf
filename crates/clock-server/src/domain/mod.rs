//! Domain layer for clock-server.
//!
//! Holds the plain settings struct the server is started with.  Reading the
//! CLI, the environment or a settings file is done elsewhere; this layer only
//! describes the result.

pub mod settings;

pub use settings::ServerSettings;
