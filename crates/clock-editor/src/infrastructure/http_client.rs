//! HTTP client for the clock backend.
//!
//! [`ConfigApi`] is the seam between the editor controller and the network.
//! [`HttpConfigApi`] implements it with `reqwest`; unit tests use the
//! generated `MockConfigApi`.
//!
//! Requests carry no timeout: a slow write may still land on the device, so
//! it is not reported as a failure early.

use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Error type for backend requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused or reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with something other than 200.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The response body was not the expected JSON.
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// Operations the backend exposes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigApi: Send + Sync {
    /// `GET /config`: the stored configuration document.
    async fn fetch_config(&self) -> Result<Value, ClientError>;

    /// `POST /writeConfig`: merges `body` into the stored document.
    async fn write_config(&self, body: &Value) -> Result<(), ClientError>;
}

/// [`ConfigApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpConfigApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpConfigApi {
    /// Creates a client for the backend at `base_url`, e.g.
    /// `http://192.168.1.40`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the underlying client cannot be
    /// built (TLS backend initialisation failure).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        // The clock sits on the local network; system proxies are not consulted.
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Maps anything other than 200 to [`ClientError::Status`].
fn check_status(status: StatusCode) -> Result<(), ClientError> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(ClientError::Status(status.as_u16()))
    }
}

#[async_trait]
impl ConfigApi for HttpConfigApi {
    async fn fetch_config(&self) -> Result<Value, ClientError> {
        let url = self.url("/config");
        debug!(%url, "fetching configuration");
        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        check_status(response.status())?;
        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn write_config(&self, body: &Value) -> Result<(), ClientError> {
        let url = self.url("/writeConfig");
        debug!(%url, "writing configuration");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        check_status(response.status())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let api = HttpConfigApi::new("http://clock.local/").unwrap();
        assert_eq!(api.base_url(), "http://clock.local");
        assert_eq!(api.url("/config"), "http://clock.local/config");
    }

    #[test]
    fn test_only_200_is_success() {
        assert_eq!(check_status(StatusCode::OK), Ok(()));
        assert_eq!(
            check_status(StatusCode::NO_CONTENT),
            Err(ClientError::Status(204))
        );
        assert_eq!(
            check_status(StatusCode::INTERNAL_SERVER_ERROR),
            Err(ClientError::Status(500))
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Arrange: reserve a free port, then release it so nothing listens there
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let api = HttpConfigApi::new(format!("http://{addr}")).unwrap();

        // Act
        let result = api.fetch_config().await;

        // Assert
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_write_is_not_cut_short() {
        // Arrange: a backend that takes 30 s (virtual) to acknowledge a write
        let app = axum::Router::new().route(
            "/writeConfig",
            axum::routing::post(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(30)).await;
                axum::http::StatusCode::OK
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let api = HttpConfigApi::new(format!("http://{addr}")).unwrap();

        // Act
        let result = api.write_config(&serde_json::json!({ "brightness": 4 })).await;

        // Assert
        assert_eq!(result, Ok(()));
    }
}
