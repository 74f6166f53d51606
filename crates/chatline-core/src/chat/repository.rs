//! ConversationRepository trait definition.
//!
//! Provides CRUD operations for conversations and their messages, plus the
//! count/limit/offset queries message pagination is built from.

use chatline_types::conversation::{Conversation, Message};
use chatline_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for conversation and message persistence.
///
/// Implementations live in chatline-infra (e.g., `SqliteConversationRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
///
/// Every mutating method commits before it returns.
pub trait ConversationRepository: Send + Sync {
    /// Insert a new conversation. The `messages` field is ignored.
    fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Get a conversation by ID, without its messages.
    fn get_conversation(
        &self,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// Delete a conversation and, through the cascade, all of its messages.
    ///
    /// Returns `RepositoryError::NotFound` when no row was removed.
    fn delete_conversation(
        &self,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Insert a message.
    ///
    /// Returns `RepositoryError::NotFound` when the owning conversation does not exist.
    fn create_message(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a message by ID, scoped to its conversation.
    fn get_message(
        &self,
        conversation_id: &Uuid,
        message_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Message>, RepositoryError>> + Send;

    /// Messages of a conversation, ordered by created_at ASC then id ASC.
    fn list_messages(
        &self,
        conversation_id: &Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Total number of messages in a conversation.
    fn count_messages(
        &self,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Overwrite a message's content and updated_at.
    ///
    /// Returns `RepositoryError::NotFound` when the (conversation, message) pair does not exist.
    fn update_message(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove a single message.
    ///
    /// Returns `RepositoryError::NotFound` when the (conversation, message) pair does not exist.
    fn delete_message(
        &self,
        conversation_id: &Uuid,
        message_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
