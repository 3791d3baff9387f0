//! HTTP route definitions.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderName, Method, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::RelayError;
use crate::http::handlers::{generate_latex, health};
use crate::state::RelayState;

/// Create the relay router.
///
/// ```text
/// GET  /health
/// POST /generate-latex
/// ```
pub fn create_router(state: Arc<RelayState>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/generate-latex", post(generate_latex))
        .with_state(state);

    with_middleware(router)
}

/// Panic isolation, request tracing and CORS for any relay router.
pub(crate) fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Open to all origins; the relay only ever listens locally.
fn cors_layer() -> CorsLayer {
    let headers: [HeaderName; 2] = [header::CONTENT_TYPE, header::AUTHORIZATION];
    CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(headers)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic payload".to_string()
    };

    RelayError::Internal {
        message: "Internal Server Error".to_string(),
        details: Some(details),
    }
    .into_response()
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
