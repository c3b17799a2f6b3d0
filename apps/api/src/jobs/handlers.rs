//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Application, Job, JobStatus, JobUpdate, Language, NewJob};
use crate::state::AppState;
use crate::store::JobFilter;

#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
    pub language: Option<Language>,
}

fn validate_new_job(job: &NewJob) -> Result<(), AppError> {
    if job.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if job.company.trim().is_empty() {
        return Err(AppError::Validation("company is required".to_string()));
    }
    if matches!(job.pay, Some(pay) if pay < Decimal::ZERO) {
        return Err(AppError::Validation("pay cannot be negative".to_string()));
    }
    Ok(())
}

fn validate_job_update(update: &JobUpdate) -> Result<(), AppError> {
    if update.is_empty() {
        return Err(AppError::Validation("no fields to update".to_string()));
    }
    if matches!(&update.title, Some(title) if title.trim().is_empty()) {
        return Err(AppError::Validation("title cannot be blank".to_string()));
    }
    if matches!(&update.company, Some(company) if company.trim().is_empty()) {
        return Err(AppError::Validation("company cannot be blank".to_string()));
    }
    if matches!(update.pay, Some(pay) if pay < Decimal::ZERO) {
        return Err(AppError::Validation("pay cannot be negative".to_string()));
    }
    Ok(())
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(request): Json<NewJob>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    validate_new_job(&request)?;
    let job = state.store.insert_job(request).await?;
    info!(job_id = %job.id, title = %job.title, "Job posted");
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs?status=active&language=es
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = state
        .store
        .list_jobs(JobFilter {
            status: query.status,
            language: query.language,
        })
        .await?;
    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let job = state
        .store
        .get_job(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

/// PUT /api/v1/jobs/:id
///
/// Partial edit. Stored matches for the job are dropped so later reads and
/// rankings score against the edited posting; application score snapshots
/// are left alone.
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JobUpdate>,
) -> Result<Json<Job>, AppError> {
    validate_job_update(&request)?;
    let job = state
        .store
        .update_job(id, &request)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    let dropped = state.orchestrator.invalidate_job(id).await?;
    info!(job_id = %id, dropped_matches = dropped, "Job updated");
    Ok(Json(job))
}

/// POST /api/v1/jobs/:id/close, DELETE /api/v1/jobs/:id
///
/// Soft delete. Closing a closed job returns it unchanged.
pub async fn handle_close_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let job = state
        .store
        .close_job(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    info!(job_id = %id, "Job closed");
    Ok(Json(job))
}

/// GET /api/v1/jobs/:id/applications
///
/// Applications ordered by their submission-time match score, highest first.
pub async fn handle_list_job_applications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Application>>, AppError> {
    if state.store.get_job(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Job {id} not found")));
    }
    let applications = state.store.list_applications_for_job(id).await?;
    Ok(Json(applications))
}
