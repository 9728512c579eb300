//! Axum-based HTTP server for the elevator API.
//!
//! Provides REST endpoints for:
//! - GET `/api/status` - Status snapshot as JSON
//! - GET `/api/status/text` - Status snapshot as the plain-text report
//! - POST `/api/start` - Put the elevator in service
//! - POST `/api/stop` - Take the elevator out of service
//! - POST `/api/request` - Queue a passenger

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::WebConfig;
use crate::error::STATUS_OK;
use crate::report::StatusReport;
use crate::traits::ElevatorControl;

use super::api::{error_status, ApiResponse, IssueRequestBody, LifecycleResponse, QueuedResponse};

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/status - Returns the current status snapshot
async fn get_status<C: ElevatorControl + 'static>(
    State(control): State<Arc<C>>,
) -> Json<ApiResponse<StatusReport>> {
    Json(ApiResponse::ok(control.status()))
}

/// GET /api/status/text - Returns the rendered status report
async fn get_status_text<C: ElevatorControl + 'static>(
    State(control): State<Arc<C>>,
) -> String {
    control.status().to_string()
}

/// POST /api/start - Start the elevator
///
/// Runs on the blocking pool since it may join a leftover mover.
async fn start<C: ElevatorControl + 'static>(
    State(control): State<Arc<C>>,
) -> (StatusCode, Json<ApiResponse<LifecycleResponse>>) {
    let task = Arc::clone(&control);
    match tokio::task::spawn_blocking(move || task.start()).await {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(ApiResponse::ok(LifecycleResponse {
                state: control.status().state,
            })),
        ),
        Ok(Err(e)) => (error_status(&e), Json(ApiResponse::err(e.to_string()))),
        Err(e) => internal_error(e),
    }
}

/// POST /api/stop - Stop the elevator
///
/// Waits for the mover to finish its current step, so it runs on the
/// blocking pool.
async fn stop<C: ElevatorControl + 'static>(
    State(control): State<Arc<C>>,
) -> (StatusCode, Json<ApiResponse<LifecycleResponse>>) {
    let task = Arc::clone(&control);
    match tokio::task::spawn_blocking(move || task.stop()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(LifecycleResponse {
                state: control.status().state,
            })),
        ),
        Err(e) => internal_error(e),
    }
}

/// POST /api/request - Queue a passenger
///
/// Accepts JSON: `{"start_floor": 1, "dest_floor": 4, "category": 0}`
async fn issue_request<C: ElevatorControl + 'static>(
    State(control): State<Arc<C>>,
    body: Bytes,
) -> (StatusCode, Json<ApiResponse<QueuedResponse>>) {
    let request: IssueRequestBody = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "malformed request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::err(format!("Invalid request body: {e}"))),
            );
        }
    };

    match control.issue_request(request.start_floor, request.dest_floor, request.category) {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(QueuedResponse {
                request,
                status: STATUS_OK,
            })),
        ),
        Err(e) => (error_status(&e), Json(ApiResponse::err(e.to_string()))),
    }
}

/// Fallback handler for 404
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::err("Not found")),
    )
}

fn internal_error<T>(e: tokio::task::JoinError) -> (StatusCode, Json<ApiResponse<T>>) {
    warn!(error = %e, "control task failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::err("Control task failed")),
    )
}

// ============================================================================
// Server Builder
// ============================================================================

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebServerConfig {
    /// Address to bind to
    pub addr: SocketAddr,
    /// Whether to enable CORS for all origins
    pub cors_permissive: bool,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self::from_config(&WebConfig::default())
    }
}

impl WebServerConfig {
    /// Create a new config with the given address
    pub fn new(addr: impl Into<SocketAddr>) -> Self {
        Self {
            addr: addr.into(),
            ..Default::default()
        }
    }

    /// Set whether CORS should be permissive
    pub fn cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Create from shared WebConfig
    pub fn from_config(config: &WebConfig) -> Self {
        Self {
            addr: ([0, 0, 0, 0], config.port).into(),
            cors_permissive: config.cors_permissive,
        }
    }
}

/// Build the Axum router with all routes
pub fn build_router<C: ElevatorControl + 'static>(
    control: Arc<C>,
    config: &WebServerConfig,
) -> Router {
    let mut router = Router::new()
        .route("/api/status", get(get_status::<C>))
        .route("/api/status/text", get(get_status_text::<C>))
        .route("/api/start", post(start::<C>))
        .route("/api/stop", post(stop::<C>))
        .route("/api/request", post(issue_request::<C>))
        .fallback(not_found)
        .with_state(control);

    if config.cors_permissive {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

/// Serve the API until `shutdown` resolves.
///
/// The elevator itself is left as it is; callers decide whether to stop it
/// once the server has drained.
pub async fn run_server_with_state<C, F>(
    control: Arc<C>,
    config: WebServerConfig,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    C: ElevatorControl + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let router = build_router(control, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "web server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_from_web_config() {
        let web = WebConfig::default().with_port(9000).with_cors(false);
        let config = WebServerConfig::from_config(&web);
        assert_eq!(config.addr.port(), 9000);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn default_server_config_uses_default_port() {
        let config = WebServerConfig::default();
        assert_eq!(config.addr.port(), WebConfig::default().port);
        assert!(config.cors_permissive);
    }
}
