//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::orchestrator::{RankedCandidate, RankedJob};
use super::rule_based::{rank_jobs, CandidatePreferences, RuleMatch};
use crate::errors::AppError;
use crate::models::{JobStatus, MatchRecord};
use crate::state::AppState;
use crate::store::JobFilter;

const DEFAULT_CANDIDATES_PER_JOB: usize = 10;
const DEFAULT_JOBS_PER_CANDIDATE: usize = 5;
const MAX_LIMIT: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MatchQuery {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Serialize)]
pub struct RankedCandidatesResponse {
    pub job_id: Uuid,
    pub candidates: Vec<RankedCandidate>,
}

#[derive(Debug, Serialize)]
pub struct RankedJobsResponse {
    pub candidate_id: Uuid,
    pub jobs: Vec<RankedJob>,
}

#[derive(Debug, Serialize)]
pub struct PreferenceMatchResponse {
    pub total: usize,
    pub matches: Vec<RuleMatch>,
}

pub fn clamp_limit(requested: Option<usize>, default: usize) -> usize {
    requested.unwrap_or(default).clamp(1, MAX_LIMIT)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/candidates/:candidate_id/match/:job_id?refresh=true
///
/// Stored assessment for the pair; computed on a miss. `refresh` forces a new one.
pub async fn handle_get_match(
    State(state): State<AppState>,
    Path((candidate_id, job_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchRecord>, AppError> {
    let record = state
        .orchestrator
        .get_match(candidate_id, job_id, query.refresh)
        .await?;
    Ok(Json(record))
}

/// GET /api/v1/jobs/:id/candidates?limit=10
pub async fn handle_rank_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<RankedCandidatesResponse>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_CANDIDATES_PER_JOB);
    let candidates = state
        .orchestrator
        .rank_candidates_for_job(job_id, limit)
        .await?;
    Ok(Json(RankedCandidatesResponse { job_id, candidates }))
}

/// GET /api/v1/candidates/:id/jobs?limit=5
pub async fn handle_rank_jobs(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<RankedJobsResponse>, AppError> {
    let limit = clamp_limit(query.limit, DEFAULT_JOBS_PER_CANDIDATE);
    let jobs = state
        .orchestrator
        .rank_jobs_for_candidate(candidate_id, limit)
        .await?;
    Ok(Json(RankedJobsResponse { candidate_id, jobs }))
}

/// POST /api/v1/match/preferences
///
/// Rule-based search over active jobs. No LLM involved.
pub async fn handle_match_preferences(
    State(state): State<AppState>,
    Json(prefs): Json<CandidatePreferences>,
) -> Result<Json<PreferenceMatchResponse>, AppError> {
    if let (Some(min), Some(max)) = (prefs.min_pay, prefs.max_pay) {
        if min > max {
            return Err(AppError::Validation(
                "min_pay cannot be greater than max_pay".to_string(),
            ));
        }
    }

    let jobs = state
        .store
        .list_jobs(JobFilter {
            status: Some(JobStatus::Active),
            language: None,
        })
        .await?;
    let matches = rank_jobs(&prefs, jobs);

    Ok(Json(PreferenceMatchResponse {
        total: matches.len(),
        matches,
    }))
}
