//! Clock configuration server: entry point.
//!
//! Serves the clock's configuration document over HTTP so the editor can read
//! and replace it.  The document is kept in `<data-dir>/config.json` and is
//! created with factory defaults on first access.
//!
//! # Usage
//!
//! ```text
//! clock-server [OPTIONS]
//!
//! Options:
//!   --bind     <IP>    Address to listen on [default: 0.0.0.0]
//!   --port     <PORT>  HTTP port [default: 8080]
//!   --data-dir <DIR>   Directory holding config.json [default: data]
//!   --settings <FILE>  Optional TOML settings file
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable         | Flag         |
//! |------------------|--------------|
//! | `CLOCK_BIND`     | `--bind`     |
//! | `CLOCK_PORT`     | `--port`     |
//! | `CLOCK_DATA_DIR` | `--data-dir` |
//! | `CLOCK_SETTINGS` | `--settings` |
//!
//! Precedence, highest first: flag, environment variable, settings file,
//! built-in default.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clock_server::domain::ServerSettings;
use clock_server::infrastructure::serve;
use clock_server::infrastructure::settings_file::{load_settings_file, SettingsFile};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// HTTP backend for the clock configuration editor.
#[derive(Debug, Parser)]
#[command(
    name = "clock-server",
    about = "Stores and serves the clock configuration document",
    version
)]
struct Cli {
    /// IP address to listen on [default: 0.0.0.0].
    #[arg(long, env = "CLOCK_BIND")]
    bind: Option<String>,

    /// HTTP port [default: 8080].
    #[arg(long, env = "CLOCK_PORT")]
    port: Option<u16>,

    /// Directory holding config.json [default: data].
    #[arg(long, env = "CLOCK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// TOML settings file supplying defaults for the options above.
    #[arg(long, env = "CLOCK_SETTINGS")]
    settings: Option<PathBuf>,
}

impl Cli {
    /// Resolves the final [`ServerSettings`] from flags and the settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded or the bind
    /// address is not a valid IP address.
    fn into_server_settings(self) -> anyhow::Result<ServerSettings> {
        let mut file = match &self.settings {
            Some(path) => load_settings_file(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => SettingsFile::default(),
        };

        if let Some(bind) = self.bind {
            file.server.bind_address = bind;
        }
        if let Some(port) = self.port {
            file.server.port = port;
        }
        if let Some(data_dir) = self.data_dir {
            file.storage.data_dir = data_dir;
        }

        Ok(file.into_settings()?)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Cli::parse().into_server_settings()?;

    info!(
        "clock-server {} starting, bind={}, data_dir={}",
        env!("CARGO_PKG_VERSION"),
        settings.bind_addr,
        settings.data_dir.display()
    );

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => tracing::error!("failed to listen for Ctrl+C signal: {e}"),
        }
    };

    serve(settings, shutdown)
        .await
        .context("clock-server terminated with an error")?;

    info!("clock-server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
