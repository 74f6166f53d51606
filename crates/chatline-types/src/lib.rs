//! Shared domain types for chatline.
//!
//! Conversations, messages, the paginated message envelope, request shapes,
//! error enums, and the server configuration type.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod conversation;
pub mod error;
