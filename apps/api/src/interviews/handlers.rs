//! Axum route handlers for the Interviews API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{
    cancel_interview, complete_interview, reschedule_interview, schedule_interview,
    CompleteInterviewRequest,
};
use crate::errors::AppError;
use crate::models::{Interview, InterviewReschedule, InterviewStatus, NewInterview};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct InterviewListQuery {
    pub status: Option<InterviewStatus>,
}

/// POST /api/v1/interviews
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    Json(request): Json<NewInterview>,
) -> Result<(StatusCode, Json<Interview>), AppError> {
    let interview = schedule_interview(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(interview)))
}

/// GET /api/v1/interviews?status=scheduled
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    Query(query): Query<InterviewListQuery>,
) -> Result<Json<Vec<Interview>>, AppError> {
    let interviews = state.store.list_interviews(query.status).await?;
    Ok(Json(interviews))
}

/// GET /api/v1/interviews/candidate/:candidate_id
pub async fn handle_list_candidate_interviews(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<Vec<Interview>>, AppError> {
    if state.store.get_candidate(candidate_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Candidate {candidate_id} not found"
        )));
    }
    let interviews = state.store.list_interviews_for_candidate(candidate_id).await?;
    Ok(Json(interviews))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Interview>, AppError> {
    let interview = state
        .store
        .get_interview(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    Ok(Json(interview))
}

/// PUT /api/v1/interviews/:id
pub async fn handle_reschedule_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<InterviewReschedule>,
) -> Result<Json<Interview>, AppError> {
    let interview = reschedule_interview(state.store.as_ref(), id, request).await?;
    Ok(Json(interview))
}

/// POST /api/v1/interviews/:id/complete
pub async fn handle_complete_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteInterviewRequest>,
) -> Result<Json<Interview>, AppError> {
    let interview = complete_interview(state.store.as_ref(), id, request).await?;
    Ok(Json(interview))
}

/// POST /api/v1/interviews/:id/cancel
pub async fn handle_cancel_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Interview>, AppError> {
    let interview = cancel_interview(state.store.as_ref(), id).await?;
    Ok(Json(interview))
}
