// Router assembly for the adjustment service

use axum::{Router, extract::DefaultBodyLimit, routing::post};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::Level;

use crate::handlers;

// Maximum allowed size for image upload requests
pub const MAX_IMAGE_SIZE_BYTES: usize = 100 * 1024 * 1024; // 100MB

pub fn create_app() -> Router {
    // The handler lives at the root; /api/process_image is an alias for
    // clients that address it by its deployed path.
    Router::new()
        .route(
            "/",
            post(handlers::adjust_image).options(handlers::preflight),
        )
        .route(
            "/api/process_image",
            post(handlers::adjust_image).options(handlers::preflight),
        )
        // Apply a layer to limit the maximum size of request bodies
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE_BYTES))
        // Add tracing for HTTP requests and responses
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
}
