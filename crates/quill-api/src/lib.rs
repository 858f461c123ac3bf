//! HTTP surface: axum router, auth guard, and JSON views over the service
//! layer.

pub mod error;
mod guard;
mod routes;
pub mod state;
mod views;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use state::ApiState;

/// The full application: API under `/api`, stored uploads served from
/// `/uploads`, request tracing and optional CORS on top.
pub fn app(state: ApiState) -> Router {
    let uploads_dir = state.uploads_dir();
    let cors_origin = state.cors_origin();

    let mut router = routes::router(state)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(TraceLayer::new_for_http());

    if let Some(origin) = cors_origin {
        let cors = match origin.parse::<HeaderValue>() {
            Ok(origin) => CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                tracing::warn!(origin, "invalid cors origin, allowing any");
                CorsLayer::permissive()
            }
        };
        router = router.layer(cors);
    }

    router
}
