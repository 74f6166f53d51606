//! Message HTTP handlers.
//!
//! Endpoints:
//! - GET    /conversations/{id}/messages?page&size      - Paginated history
//! - POST   /conversations/{id}/messages                - Post a message
//! - PUT    /conversations/{id}/messages/{message_id}   - Edit a message
//! - DELETE /conversations/{id}/messages/{message_id}   - Delete a message

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use chatline_types::conversation::{
    CreateMessageRequest, Message, MessagePage, PageRequest, UpdateMessageRequest,
};

use crate::http::error::AppError;
use crate::http::extractors::validated::{ValidatedJson, ValidatedQuery};
use crate::http::handlers::{parse_conversation_id, parse_message_id};
use crate::state::AppState;

/// GET /conversations/{id}/messages - One page of messages, oldest first.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
) -> Result<Json<MessagePage>, AppError> {
    let cid = parse_conversation_id(&conversation_id)?;
    let page = state.chat_service.list_messages(&cid, page).await?;
    Ok(Json(page))
}

/// POST /conversations/{id}/messages - Add a message to a conversation.
pub async fn create_message(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    ValidatedJson(body): ValidatedJson<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let cid = parse_conversation_id(&conversation_id)?;
    let message = state.chat_service.create_message(cid, body).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// PUT /conversations/{id}/messages/{message_id} - Replace a message's content.
pub async fn edit_message(
    State(state): State<AppState>,
    Path((conversation_id, message_id)): Path<(String, String)>,
    ValidatedJson(body): ValidatedJson<UpdateMessageRequest>,
) -> Result<Json<Message>, AppError> {
    let cid = parse_conversation_id(&conversation_id)?;
    let mid = parse_message_id(&message_id)?;
    let message = state.chat_service.edit_message(&cid, &mid, body).await?;
    Ok(Json(message))
}

/// DELETE /conversations/{id}/messages/{message_id} - Remove a message.
pub async fn delete_message(
    State(state): State<AppState>,
    Path((conversation_id, message_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let cid = parse_conversation_id(&conversation_id)?;
    let mid = parse_message_id(&message_id)?;
    state.chat_service.delete_message(&cid, &mid).await?;
    Ok(StatusCode::NO_CONTENT)
}
