//! Server runtime settings.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Port the device web server listens on.
pub const DEFAULT_PORT: u16 = 8080;

/// Directory holding `config.json`, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Everything the server needs to start.
///
/// Built once in `main.rs` from the CLI, environment and optional settings
/// file, then handed to [`crate::infrastructure::http::serve`].
///
/// # Example
///
/// ```rust
/// use clock_server::domain::ServerSettings;
///
/// let settings = ServerSettings::default();
/// assert_eq!(settings.bind_addr.port(), 8080);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Directory the configuration document is stored in.
    pub data_dir: PathBuf,
}

impl Default for ServerSettings {
    /// | Field     | Default        |
    /// |-----------|----------------|
    /// | bind_addr | `0.0.0.0:8080` |
    /// | data_dir  | `data`         |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_8080() {
        // Arrange / Act
        let settings = ServerSettings::default();
        // Assert
        assert_eq!(settings.bind_addr.port(), 8080);
    }

    #[test]
    fn test_default_binds_all_interfaces() {
        let settings = ServerSettings::default();
        assert_eq!(settings.bind_addr.ip().to_string(), "0.0.0.0");
    }

    #[test]
    fn test_default_data_dir() {
        assert_eq!(ServerSettings::default().data_dir, PathBuf::from("data"));
    }
}
