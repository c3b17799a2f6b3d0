//! Axum route handlers for the Applications API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::dedup::ApplicationSubmission;
use crate::errors::AppError;
use crate::models::{Application, ApplicationStatus};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitApplicationRequest {
    pub job_id: Uuid,
    #[serde(flatten)]
    pub applicant: ApplicationSubmission,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApplicationListQuery {
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

/// POST /api/v1/applications
///
/// Creates or updates the candidate (keyed by email) and files one application.
/// 409 with the existing `application_id` when the candidate already applied.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let application = state
        .applications
        .submit(request.job_id, request.applicant)
        .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications?job_id=
///
/// Newest first. Without `job_id` every application is returned.
pub async fn handle_list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = state.store.list_applications(query.job_id).await?;
    Ok(Json(applications))
}

/// GET /api/v1/applications/:id
pub async fn handle_get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, AppError> {
    let application = state
        .store
        .get_application(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
    Ok(Json(application))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Application>, AppError> {
    let current = state
        .store
        .get_application(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    if !current.status.can_transition_to(request.status) {
        return Err(AppError::Validation(format!(
            "Cannot move application from '{}' to '{}'",
            current.status.as_str(),
            request.status.as_str()
        )));
    }

    let updated = state
        .store
        .update_application_status(id, request.status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;

    info!(
        application_id = %id,
        from = current.status.as_str(),
        to = updated.status.as_str(),
        "Application status updated"
    );
    Ok(Json(updated))
}

/// DELETE /api/v1/applications/:id
///
/// Removes the application and its interviews. The stored match for the pair
/// stays, and the candidate may apply again.
pub async fn handle_delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_application(id).await? {
        return Err(AppError::NotFound(format!("Application {id} not found")));
    }
    info!(application_id = %id, "Application deleted");
    Ok(StatusCode::NO_CONTENT)
}
