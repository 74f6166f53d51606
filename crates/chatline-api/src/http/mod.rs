//! HTTP layer for chatline.
//!
//! Axum router with the conversation/message REST endpoints, the health
//! probe, the WebSocket reply gateway, CORS, and request tracing.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
