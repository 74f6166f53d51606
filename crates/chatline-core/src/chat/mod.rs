//! Conversation and message persistence abstractions for chatline.
//!
//! `repository` defines the `ConversationRepository` trait; `service` holds the
//! validating `ChatService` built on top of it.

pub mod repository;
pub mod service;
