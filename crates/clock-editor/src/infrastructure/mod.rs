//! Infrastructure layer for clock-editor: the HTTP client and the terminal
//! confirmation prompt.

pub mod http_client;
pub mod prompt;

pub use http_client::{ClientError, ConfigApi, HttpConfigApi};
pub use prompt::{AssumeYes, TerminalConfirm};
