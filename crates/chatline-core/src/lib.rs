//! Business logic and repository trait definitions for chatline.
//!
//! This crate defines the storage port (`ConversationRepository`) that the
//! infrastructure layer implements, the `ChatService` that validates and
//! orchestrates CRUD calls, and the `ReplyGenerator` capability used by the
//! real-time gateway. It depends only on `chatline-types` -- never on
//! `chatline-infra` or any database/IO crate.

pub mod chat;
pub mod reply;
