//! HTTP interface of the clock backend.
//!
//! | Method | Path           | Success                           | Failure |
//! |--------|----------------|-----------------------------------|---------|
//! | GET    | `/`            | 302 to `/home.html`               | n/a     |
//! | GET    | `/config`      | 200, the stored document as JSON  | 500     |
//! | POST   | `/writeConfig` | 200, empty body                   | 400 / 500 |
//!
//! `GET /config` is sent with `Cache-Control: no-cache` so a browser never
//! shows a stale configuration after a save.
//!
//! Store access is file I/O, so handlers run it on tokio's blocking pool.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use thiserror::Error;
use tokio::task::{spawn_blocking, JoinError};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::application::{ConfigService, ServiceError};
use crate::domain::ServerSettings;
use crate::infrastructure::store::{ConfigStore, JsonFileStore};

/// Page the device serves as its editor.
pub const HOME_PAGE: &str = "/home.html";

/// Error type for running the HTTP server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The listener could not bind its address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("HTTP server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handler-level error, rendered as a bare status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The blocking task running the store call panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(#[from] JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Service(e @ ServiceError::NotAnObject) => {
                warn!("rejected write request: {e}");
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            ApiError::Service(ServiceError::Store(e)) => {
                error!("configuration store failure: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::Task(e) => {
                error!("configuration store task failed: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Builds the router over `store`.
pub fn router(store: Arc<dyn ConfigStore>) -> Router {
    Router::new()
        .route("/", get(home_redirect))
        .route("/config", get(get_config))
        .route("/writeConfig", post(write_config))
        .layer(TraceLayer::new_for_http())
        .with_state(ConfigService::new(store))
}

/// Binds `settings.bind_addr` and serves until `shutdown` resolves.
///
/// # Errors
///
/// Returns [`ServeError::Bind`] if the address is unavailable, or
/// [`ServeError::Io`] if the accept loop fails.
pub async fn serve<F>(settings: ServerSettings, shutdown: F) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = JsonFileStore::new(&settings.data_dir);
    info!(path = %store.path().display(), "using configuration file");

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: settings.bind_addr,
            source,
        })?;
    info!("listening on {}", settings.bind_addr);

    axum::serve(listener, router(Arc::new(store)))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn home_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, HOME_PAGE)])
}

async fn get_config(State(service): State<ConfigService>) -> Result<Response, ApiError> {
    let doc = spawn_blocking(move || service.current_document()).await??;
    Ok((
        [(header::CACHE_CONTROL, "no-cache")],
        Json(Value::Object(doc)),
    )
        .into_response())
}

async fn write_config(
    State(service): State<ConfigService>,
    Json(body): Json<Value>,
) -> Result<StatusCode, ApiError> {
    spawn_blocking(move || service.apply_write(&body)).await??;
    Ok(StatusCode::OK)
}
