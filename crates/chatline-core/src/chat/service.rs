//! Chat service orchestrating conversation and message CRUD.
//!
//! ChatService runs the validation pass for every request before the
//! repository is touched, then translates repository outcomes into
//! `ChatError` variants the API layer maps onto HTTP statuses.

use chatline_types::conversation::{
    Conversation, CreateConversationRequest, CreateMessageRequest, MAX_PAGE_SIZE, Message,
    MessagePage, PageRequest, Sender, UpdateMessageRequest, now_timestamp,
};
use chatline_types::error::{ChatError, RepositoryError};
use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::chat::repository::ConversationRepository;

/// Orchestrates conversation lifecycle and message persistence.
///
/// Generic over `ConversationRepository` to maintain clean architecture
/// (chatline-core never depends on chatline-infra).
pub struct ChatService<R: ConversationRepository> {
    repo: R,
}

impl<R: ConversationRepository> ChatService<R> {
    /// Create a new chat service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // --- Conversations ---

    /// Create a conversation for `user_id`.
    pub async fn create_conversation(
        &self,
        request: CreateConversationRequest,
    ) -> Result<Conversation, ChatError> {
        let user_id = validate_user_id(&request.user_id)?;

        let conversation = Conversation {
            id: Uuid::now_v7(),
            user_id,
            created_at: now_timestamp(),
            messages: Vec::new(),
        };

        let conversation = self.repo.create_conversation(&conversation).await?;
        info!(conversation_id = %conversation.id, user_id = %conversation.user_id, "Conversation created");
        Ok(conversation)
    }

    /// Get a conversation together with all of its messages.
    pub async fn get_conversation(&self, conversation_id: &Uuid) -> Result<Conversation, ChatError> {
        let mut conversation = self.require_conversation(conversation_id).await?;
        conversation.messages = self.repo.list_messages(conversation_id, None, None).await?;
        Ok(conversation)
    }

    /// Delete a conversation and every message it owns.
    pub async fn delete_conversation(&self, conversation_id: &Uuid) -> Result<(), ChatError> {
        self.repo
            .delete_conversation(conversation_id)
            .await
            .map_err(|e| not_found_as(e, ChatError::ConversationNotFound))?;
        info!(conversation_id = %conversation_id, "Conversation deleted");
        Ok(())
    }

    // --- Messages ---

    /// Validate and persist a new message in an existing conversation.
    pub async fn create_message(
        &self,
        conversation_id: Uuid,
        request: CreateMessageRequest,
    ) -> Result<Message, ChatError> {
        let sender: Sender = request.sender.parse().map_err(ChatError::Validation)?;
        let content = validate_content(request.content)?;

        let now = now_timestamp();
        let message = Message {
            id: Uuid::now_v7(),
            conversation_id,
            sender,
            content,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .create_message(&message)
            .await
            .map_err(|e| not_found_as(e, ChatError::ConversationNotFound))?;

        info!(
            conversation_id = %conversation_id,
            message_id = %message.id,
            sender = %message.sender,
            "Message created"
        );
        Ok(message)
    }

    /// One page of a conversation's messages, oldest first.
    ///
    /// A page past the end yields an empty `items` list, not an error.
    pub async fn list_messages(
        &self,
        conversation_id: &Uuid,
        page: PageRequest,
    ) -> Result<MessagePage, ChatError> {
        validate_page(&page)?;
        self.require_conversation(conversation_id).await?;

        let total = self.repo.count_messages(conversation_id).await?;
        let items = if page.offset() >= total {
            Vec::new()
        } else {
            self.repo
                .list_messages(
                    conversation_id,
                    Some(i64::from(page.size)),
                    Some(page.offset() as i64),
                )
                .await?
        };

        Ok(MessagePage {
            items,
            total,
            page: page.page,
            size: page.size,
        })
    }

    /// Replace a message's content.
    ///
    /// `updated_at` always moves strictly forward; `created_at` is left as is.
    pub async fn edit_message(
        &self,
        conversation_id: &Uuid,
        message_id: &Uuid,
        request: UpdateMessageRequest,
    ) -> Result<Message, ChatError> {
        let content = validate_content(request.content)?;

        let mut message = self
            .repo
            .get_message(conversation_id, message_id)
            .await?
            .ok_or(ChatError::MessageNotFound)?;

        message.content = content;
        message.updated_at = next_update_time(message.updated_at, now_timestamp());

        self.repo
            .update_message(&message)
            .await
            .map_err(|e| not_found_as(e, ChatError::MessageNotFound))?;

        info!(conversation_id = %conversation_id, message_id = %message_id, "Message edited");
        Ok(message)
    }

    /// Remove a single message.
    pub async fn delete_message(
        &self,
        conversation_id: &Uuid,
        message_id: &Uuid,
    ) -> Result<(), ChatError> {
        self.repo
            .delete_message(conversation_id, message_id)
            .await
            .map_err(|e| not_found_as(e, ChatError::MessageNotFound))?;

        info!(conversation_id = %conversation_id, message_id = %message_id, "Message deleted");
        Ok(())
    }

    async fn require_conversation(&self, conversation_id: &Uuid) -> Result<Conversation, ChatError> {
        self.repo
            .get_conversation(conversation_id)
            .await?
            .ok_or(ChatError::ConversationNotFound)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Trimmed user id, rejected when empty.
pub fn validate_user_id(user_id: &str) -> Result<String, ChatError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(ChatError::Validation("user_id must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Message content is stored verbatim but must contain something besides whitespace.
pub fn validate_content(content: String) -> Result<String, ChatError> {
    if content.trim().is_empty() {
        return Err(ChatError::Validation("content must not be empty".to_string()));
    }
    Ok(content)
}

/// Both coordinates are 1-based; size is capped at [`MAX_PAGE_SIZE`].
pub fn validate_page(page: &PageRequest) -> Result<(), ChatError> {
    if page.page < 1 {
        return Err(ChatError::Validation("page must be >= 1".to_string()));
    }
    if page.size < 1 || page.size > MAX_PAGE_SIZE {
        return Err(ChatError::Validation(format!(
            "size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

fn next_update_time(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

fn not_found_as(err: RepositoryError, not_found: ChatError) -> ChatError {
    match err {
        RepositoryError::NotFound => not_found,
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory repository keeping insertion order, enough to exercise the service.
    #[derive(Default)]
    struct MemoryRepo {
        conversations: Mutex<Vec<Conversation>>,
        messages: Mutex<Vec<Message>>,
    }

    impl ConversationRepository for MemoryRepo {
        async fn create_conversation(
            &self,
            conversation: &Conversation,
        ) -> Result<Conversation, RepositoryError> {
            self.conversations.lock().unwrap().push(conversation.clone());
            Ok(conversation.clone())
        }

        async fn get_conversation(
            &self,
            conversation_id: &Uuid,
        ) -> Result<Option<Conversation>, RepositoryError> {
            Ok(self
                .conversations
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == *conversation_id)
                .cloned())
        }

        async fn delete_conversation(&self, conversation_id: &Uuid) -> Result<(), RepositoryError> {
            let mut conversations = self.conversations.lock().unwrap();
            let before = conversations.len();
            conversations.retain(|c| c.id != *conversation_id);
            if conversations.len() == before {
                return Err(RepositoryError::NotFound);
            }
            self.messages
                .lock()
                .unwrap()
                .retain(|m| m.conversation_id != *conversation_id);
            Ok(())
        }

        async fn create_message(&self, message: &Message) -> Result<(), RepositoryError> {
            let exists = self
                .conversations
                .lock()
                .unwrap()
                .iter()
                .any(|c| c.id == message.conversation_id);
            if !exists {
                return Err(RepositoryError::NotFound);
            }
            self.messages.lock().unwrap().push(message.clone());
            Ok(())
        }

        async fn get_message(
            &self,
            conversation_id: &Uuid,
            message_id: &Uuid,
        ) -> Result<Option<Message>, RepositoryError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.id == *message_id && m.conversation_id == *conversation_id)
                .cloned())
        }

        async fn list_messages(
            &self,
            conversation_id: &Uuid,
            limit: Option<i64>,
            offset: Option<i64>,
        ) -> Result<Vec<Message>, RepositoryError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.conversation_id == *conversation_id)
                .skip(offset.unwrap_or(0) as usize)
                .take(limit.map(|l| l as usize).unwrap_or(usize::MAX))
                .cloned()
                .collect())
        }

        async fn count_messages(&self, conversation_id: &Uuid) -> Result<u64, RepositoryError> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.conversation_id == *conversation_id)
                .count() as u64)
        }

        async fn update_message(&self, message: &Message) -> Result<(), RepositoryError> {
            let mut messages = self.messages.lock().unwrap();
            let slot = messages
                .iter_mut()
                .find(|m| m.id == message.id && m.conversation_id == message.conversation_id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = message.clone();
            Ok(())
        }

        async fn delete_message(
            &self,
            conversation_id: &Uuid,
            message_id: &Uuid,
        ) -> Result<(), RepositoryError> {
            let mut messages = self.messages.lock().unwrap();
            let before = messages.len();
            messages.retain(|m| !(m.id == *message_id && m.conversation_id == *conversation_id));
            if messages.len() == before {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        }
    }

    fn service() -> ChatService<MemoryRepo> {
        ChatService::new(MemoryRepo::default())
    }

    async fn conversation(service: &ChatService<MemoryRepo>) -> Conversation {
        service
            .create_conversation(CreateConversationRequest {
                user_id: "u1".to_string(),
            })
            .await
            .unwrap()
    }

    fn user_message(content: &str) -> CreateMessageRequest {
        CreateMessageRequest {
            sender: "user".to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_conversation_rejects_empty_user_id() {
        let service = service();
        for user_id in ["", "   "] {
            let err = service
                .create_conversation(CreateConversationRequest {
                    user_id: user_id.to_string(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)));
        }
        assert!(service.repo().conversations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_conversation_generates_unique_ids() {
        let service = service();
        let mut ids = HashSet::new();
        for _ in 0..20 {
            let c = conversation(&service).await;
            assert_eq!(c.user_id, "u1");
            assert!(c.messages.is_empty());
            assert!(ids.insert(c.id));
        }
    }

    #[tokio::test]
    async fn test_get_conversation_not_found() {
        let err = service().get_conversation(&Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, ChatError::ConversationNotFound));
    }

    #[tokio::test]
    async fn test_create_message_rejects_unknown_sender_without_persisting() {
        let service = service();
        let c = conversation(&service).await;

        let err = service
            .create_message(
                c.id,
                CreateMessageRequest {
                    sender: "bot".to_string(),
                    content: "hi".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(msg) if msg.contains("bot")));
        assert_eq!(service.repo().count_messages(&c.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_message_rejects_blank_content() {
        let service = service();
        let c = conversation(&service).await;
        let err = service.create_message(c.id, user_message("  \n")).await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_message_unknown_conversation() {
        let err = service()
            .create_message(Uuid::now_v7(), user_message("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::ConversationNotFound));
    }

    #[tokio::test]
    async fn test_create_message_sets_timestamps() {
        let service = service();
        let c = conversation(&service).await;
        let m = service.create_message(c.id, user_message("hi")).await.unwrap();
        assert_eq!(m.sender, Sender::User);
        assert_eq!(m.content, "hi");
        assert_eq!(m.created_at, m.updated_at);

        let fetched = service.get_conversation(&c.id).await.unwrap();
        assert_eq!(fetched.messages, vec![m]);
    }

    #[tokio::test]
    async fn test_list_messages_pages_do_not_overlap() {
        let service = service();
        let c = conversation(&service).await;
        let mut all = HashSet::new();
        for i in 0..25 {
            let m = service
                .create_message(c.id, user_message(&format!("message {i}")))
                .await
                .unwrap();
            all.insert(m.id);
        }

        let mut seen = HashSet::new();
        for page in 1..=3 {
            let result = service
                .list_messages(&c.id, PageRequest { page, size: 10 })
                .await
                .unwrap();
            assert_eq!(result.total, 25);
            assert_eq!(result.page, page);
            for m in result.items {
                assert!(seen.insert(m.id), "message returned on two pages");
            }
        }
        assert_eq!(seen, all);
    }

    #[tokio::test]
    async fn test_list_messages_past_end_is_empty() {
        let service = service();
        let c = conversation(&service).await;
        service.create_message(c.id, user_message("only")).await.unwrap();

        let result = service
            .list_messages(&c.id, PageRequest { page: 5, size: 10 })
            .await
            .unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, 1);
    }

    #[tokio::test]
    async fn test_list_messages_rejects_bad_page() {
        let service = service();
        let c = conversation(&service).await;
        for page in [
            PageRequest { page: 0, size: 10 },
            PageRequest { page: 1, size: 0 },
            PageRequest { page: 1, size: MAX_PAGE_SIZE + 1 },
        ] {
            let err = service.list_messages(&c.id, page).await.unwrap_err();
            assert!(matches!(err, ChatError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_edit_message_advances_updated_at() {
        let service = service();
        let c = conversation(&service).await;
        let m = service.create_message(c.id, user_message("before")).await.unwrap();

        let edited = service
            .edit_message(
                &c.id,
                &m.id,
                UpdateMessageRequest {
                    content: "after".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.content, "after");
        assert_eq!(edited.created_at, m.created_at);
        assert!(edited.updated_at > m.updated_at);
    }

    #[tokio::test]
    async fn test_edit_message_wrong_conversation() {
        let service = service();
        let c1 = conversation(&service).await;
        let c2 = conversation(&service).await;
        let m = service.create_message(c1.id, user_message("hi")).await.unwrap();

        let err = service
            .edit_message(
                &c2.id,
                &m.id,
                UpdateMessageRequest {
                    content: "moved".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::MessageNotFound));
    }

    #[tokio::test]
    async fn test_delete_message() {
        let service = service();
        let c = conversation(&service).await;
        let m = service.create_message(c.id, user_message("bye")).await.unwrap();

        service.delete_message(&c.id, &m.id).await.unwrap();
        let fetched = service.get_conversation(&c.id).await.unwrap();
        assert!(fetched.messages.iter().all(|x| x.id != m.id));

        let err = service.delete_message(&c.id, &m.id).await.unwrap_err();
        assert!(matches!(err, ChatError::MessageNotFound));
    }

    #[tokio::test]
    async fn test_delete_conversation_removes_messages() {
        let service = service();
        let c = conversation(&service).await;
        let m = service.create_message(c.id, user_message("hi")).await.unwrap();

        service.delete_conversation(&c.id).await.unwrap();

        let err = service.get_conversation(&c.id).await.unwrap_err();
        assert!(matches!(err, ChatError::ConversationNotFound));
        let err = service.delete_message(&c.id, &m.id).await.unwrap_err();
        assert!(matches!(err, ChatError::MessageNotFound));
    }

    #[test]
    fn test_next_update_time_is_strictly_later() {
        let t = now_timestamp();
        assert!(next_update_time(t, t) > t);
        assert!(next_update_time(t, t - Duration::seconds(1)) > t);
        let later = t + Duration::seconds(1);
        assert_eq!(next_update_time(t, later), later);
    }
}
