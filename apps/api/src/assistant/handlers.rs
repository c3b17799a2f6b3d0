//! Axum route handlers for the chat assistant and translation.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chat::ChatReply;
use crate::errors::AppError;
use crate::models::{ChatMessageRow, Language};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub job_id: Uuid,
    pub candidate_id: Option<Uuid>,
    pub message: String,
    pub language: Option<Language>,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_language: Language,
    #[serde(default)]
    pub source_language: Language,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translated_text: String,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let reply = state
        .chat
        .reply(
            request.job_id,
            request.candidate_id,
            &request.message,
            request.language,
        )
        .await?;
    Ok(Json(reply))
}

/// GET /api/v1/chat/:job_id/:candidate_id
pub async fn handle_chat_history(
    State(state): State<AppState>,
    Path((job_id, candidate_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<ChatMessageRow>>, AppError> {
    Ok(Json(state.chat.history(job_id, candidate_id).await?))
}

/// POST /api/v1/translate
///
/// Only `en` and `es` are accepted; anything else fails deserialization.
pub async fn handle_translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text is required".to_string()));
    }
    let translated_text = state
        .translator
        .translate(&request.text, request.source_language, request.target_language)
        .await?;
    Ok(Json(TranslateResponse { translated_text }))
}
