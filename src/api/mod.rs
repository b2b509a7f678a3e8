//! REST API endpoints.
//!
//! Axum-based HTTP API exposing team, grouped and head-to-head handicap
//! statistics over the stored match population.

pub mod extract;
pub mod routes;
pub mod state;

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::storage::StorageError;

use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Run storage reads and aggregation off the async workers.
///
/// When the request deadline fires first, the response is dropped but the
/// blocking task is not cancelled.
pub async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("aggregation task failed: {}", e)))?
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin {
        "*" => layer.allow_origin(Any),
        other => match HeaderValue::from_str(other) {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin {:?}, allowing any", other);
                layer.allow_origin(Any)
            }
        },
    }
}

/// Request deadline from `server.request_timeout_seconds`.
///
/// A request past the deadline gets 408. Work already handed to
/// [`run_blocking`] runs to completion and its result is discarded.
pub fn timeout_layer(server: &ServerConfig) -> TimeoutLayer {
    TimeoutLayer::new(server.request_timeout())
}

async fn not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Build the application router.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/api/health", get(routes::handicap::health))
        .route("/api/handicap/range", get(routes::handicap::handicap_range))
        .route(
            "/api/teams/:team_id/handicap",
            get(routes::handicap::team_handicap),
        )
        .route(
            "/api/teams/:team_id/handicap/grouped",
            get(routes::handicap::grouped_handicap),
        )
        .route(
            "/api/patches/:patch_id/handicap",
            get(routes::handicap::patch_handicap),
        )
        .route("/api/head-to-head", get(routes::head_to_head::head_to_head))
        .fallback(not_found)
        .layer(timeout_layer(server))
        .layer(cors_layer(&server.cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::time::Duration;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_body() {
        let (status, json) = render(ApiError::BadRequest("by must be league or patch".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert_eq!(
            json["error"]["message"],
            "Bad request: by must be league or patch"
        );
    }

    #[tokio::test]
    async fn test_internal_error_status() {
        let (status, json) = render(ApiError::Internal("disk".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    }

    #[tokio::test]
    async fn test_storage_error_maps_to_internal() {
        let err: ApiError = StorageError::PathNotFound("/nope".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn test_rejections_map_to_bad_request() {
        use axum::extract::{FromRequestParts, Path, Query};
        use axum::http::Request;

        let (mut parts, _) = Request::builder()
            .uri("/x?limit=abc")
            .body(())
            .unwrap()
            .into_parts();
        let rejection = Query::<std::collections::HashMap<String, u32>>::from_request_parts(
            &mut parts,
            &(),
        )
        .await
        .unwrap_err();
        let (status, json) = render(rejection.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        // No route matched, so there are no path params to read.
        let rejection = Path::<u64>::from_request_parts(&mut parts, &()).await.unwrap_err();
        let err: ApiError = rejection.into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_timeout_layer_uses_configured_deadline() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::util::ServiceExt;

        let server = ServerConfig {
            request_timeout_seconds: 1,
            ..ServerConfig::default()
        };
        let app: Router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .route("/fast", get(|| async { "done" }))
            .layer(timeout_layer(&server));

        let started = std::time::Instant::now();
        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(started.elapsed() < Duration::from_secs(4));

        let resp = app
            .oneshot(Request::builder().uri("/fast").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_run_blocking_propagates_errors() {
        let ok = run_blocking(|| Ok::<_, ApiError>(42)).await.unwrap();
        assert_eq!(ok, 42);

        let err = run_blocking(|| Err::<u32, _>(ApiError::NotFound("x".into()))).await;
        assert!(matches!(err, Err(ApiError::NotFound(_))));
    }
}
