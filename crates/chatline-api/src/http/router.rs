//! Axum router configuration with middleware.
//!
//! Routes:
//! - `/conversations/...` REST endpoints (trailing slash optional on the collection)
//! - `/health/` liveness probe
//! - `/ws` WebSocket reply gateway
//!
//! Middleware: CORS (configurable allow-list), request tracing.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chatline_types::config::ServerConfig;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let conversation_routes = Router::new()
        .route(
            "/conversations",
            post(handlers::conversation::create_conversation),
        )
        .route(
            "/conversations/",
            post(handlers::conversation::create_conversation),
        )
        .route(
            "/conversations/{id}",
            get(handlers::conversation::get_conversation)
                .delete(handlers::conversation::delete_conversation),
        )
        .route(
            "/conversations/{id}/messages",
            get(handlers::message::list_messages).post(handlers::message::create_message),
        )
        .route(
            "/conversations/{id}/messages/{message_id}",
            put(handlers::message::edit_message).delete(handlers::message::delete_message),
        );

    Router::new()
        .merge(conversation_routes)
        .route("/health", get(handlers::health::health_check))
        .route("/health/", get(handlers::health::health_check))
        .route("/ws", get(handlers::ws::ws_handler))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer for the configured origins. A `*` entry allows any origin.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(allowed))
}
