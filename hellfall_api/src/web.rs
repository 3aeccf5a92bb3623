//! HTTP API for card search
//!
//! Provides REST endpoints for health checks and Scryfall-style card search.
//! Every route is served both at the root and under `/v1`.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::loader::{SearchResults, Snapshot};

/// Shared application state (immutable snapshot, no locking needed)
#[derive(Clone)]
struct AppState {
    snapshot: Arc<Snapshot>,
}

/// Search query parameters
#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// Error body: `{"message": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Response envelope: a status code with either content or an error
#[derive(Debug)]
pub struct ApiResponse<T> {
    code: StatusCode,
    body: Result<T, ErrorBody>,
}

impl<T> ApiResponse<T> {
    pub fn ok(content: T) -> Self {
        Self {
            code: StatusCode::OK,
            body: Ok(content),
        }
    }

    pub fn error(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Err(ErrorBody {
                message: message.to_string(),
            }),
        }
    }

    /// Error whose message is the standard reason phrase of `code`
    pub fn status(code: StatusCode) -> Self {
        Self::error(code, code.canonical_reason().unwrap_or("Unknown Error"))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self.body {
            Ok(content) => (self.code, Json(content)).into_response(),
            Err(error) => (self.code, Json(error)).into_response(),
        }
    }
}

/// Health check body
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// GET /health
async fn health_handler() -> ApiResponse<HealthResponse> {
    ApiResponse::ok(HealthResponse { status: "ok" })
}

/// GET /cards/search?q={query}
async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResponse<SearchResults> {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            log::debug!("Rejected search parameters: {}", rejection);
            return ApiResponse::error(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    // blank is checked on the trimmed text, the query itself is passed on as sent
    let query = match params.q.as_deref() {
        Some(q) if !q.trim().is_empty() => q,
        _ => return ApiResponse::error(StatusCode::BAD_REQUEST, "Empty search"),
    };

    match state.snapshot.search(query) {
        Ok(results) => {
            log::debug!("Search '{}': {} hits", query, results.total);
            ApiResponse::ok(results)
        }
        Err(e) => {
            log::error!("Search error for '{}': {}", query, e);
            ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Search failed")
        }
    }
}

async fn not_found_handler() -> ApiResponse<()> {
    ApiResponse::status(StatusCode::NOT_FOUND)
}

async fn method_not_allowed_handler() -> ApiResponse<()> {
    ApiResponse::status(StatusCode::METHOD_NOT_ALLOWED)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the web server router
pub fn create_router(snapshot: Arc<Snapshot>) -> Router {
    let state = AppState { snapshot };

    let routes = Router::new()
        .route(
            "/health",
            get(health_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/cards/search",
            get(search_handler).fallback(method_not_allowed_handler),
        );

    Router::new()
        .merge(routes.clone())
        .nest("/v1", routes)
        .fallback(not_found_handler)
        .layer(cors_layer())
        .with_state(state)
}

/// Start the web server and run until Ctrl-C
pub async fn serve(snapshot: Arc<Snapshot>, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(snapshot);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
