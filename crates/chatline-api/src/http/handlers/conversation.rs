//! Conversation HTTP handlers.
//!
//! Endpoints:
//! - POST   /conversations/     - Create a conversation
//! - GET    /conversations/{id} - Get a conversation with its messages
//! - DELETE /conversations/{id} - Delete a conversation and its messages

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use chatline_types::conversation::{Conversation, CreateConversationRequest};

use crate::http::error::AppError;
use crate::http::extractors::validated::ValidatedJson;
use crate::http::handlers::parse_conversation_id;
use crate::state::AppState;

/// POST /conversations/ - Create a new conversation.
pub async fn create_conversation(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateConversationRequest>,
) -> Result<(StatusCode, Json<Conversation>), AppError> {
    let conversation = state.chat_service.create_conversation(body).await?;
    Ok((StatusCode::CREATED, Json(conversation)))
}

/// GET /conversations/{id} - Get a conversation by ID, messages included.
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Json<Conversation>, AppError> {
    let cid = parse_conversation_id(&conversation_id)?;
    let conversation = state.chat_service.get_conversation(&cid).await?;
    Ok(Json(conversation))
}

/// DELETE /conversations/{id} - Delete a conversation and all of its messages.
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let cid = parse_conversation_id(&conversation_id)?;
    state.chat_service.delete_conversation(&cid).await?;
    Ok(StatusCode::NO_CONTENT)
}
