//! HTTP request handlers for the REST API and the WebSocket gateway.

pub mod conversation;
pub mod health;
pub mod message;
pub mod ws;

use uuid::Uuid;

use chatline_types::error::ChatError;

use crate::http::error::AppError;

/// Parse a conversation id from the path.
///
/// Stored ids are UUIDs, so text that does not parse cannot name an existing
/// conversation and is reported as not found.
pub(crate) fn parse_conversation_id(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Chat(ChatError::ConversationNotFound))
}

/// Parse a message id from the path, with the same not-found rule.
pub(crate) fn parse_message_id(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Chat(ChatError::MessageNotFound))
}
