//! Infrastructure layer for chatline.
//!
//! Contains the SQLite implementation of the `ConversationRepository` port
//! defined in `chatline-core`, plus the TOML configuration loader.

pub mod config;
pub mod sqlite;
