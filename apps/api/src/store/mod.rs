//! Persistence boundary.
//!
//! Everything the service reads or writes goes through `HiringStore`, carried in
//! `AppState` as `Arc<dyn HiringStore>`. Production uses `PgStore`; tests use the
//! in-memory implementation, which enforces the same uniqueness rules.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Application, ApplicationStatus, Candidate, CandidateUpsert, ChatMessageRow, ChatSender,
    Interview, InterviewDecision, InterviewReschedule, InterviewStatus, Job, JobStatus, JobUpdate,
    Language, MatchAssessment, MatchRecord, NewApplication, NewInterview, NewJob,
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unique constraint violated (constraint: {0:?})")]
    UniqueViolation(Option<String>),

    #[error("Invalid reference: {0}")]
    ForeignKeyViolation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Could not decode stored value: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    // unique_violation
                    "23505" => {
                        return StoreError::UniqueViolation(
                            db_err.constraint().map(str::to_string),
                        )
                    }
                    // foreign_key_violation
                    "23503" => return StoreError::ForeignKeyViolation(db_err.message().to_string()),
                    _ => {}
                }
            }
        }
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".to_string()),
            other => StoreError::Database(other),
        }
    }
}

/// Filter for job listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub language: Option<Language>,
}

/// Post-interview outcome written back to an interview row.
#[derive(Debug, Clone)]
pub struct InterviewOutcome {
    pub status: InterviewStatus,
    pub decision: Option<InterviewDecision>,
    pub rating: Option<i32>,
    pub notes: Option<String>,
}

#[async_trait]
pub trait HiringStore: Send + Sync {
    // ── candidates ──────────────────────────────────────────────────────────
    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>, StoreError>;
    async fn get_candidate_by_email(&self, email: &str) -> Result<Option<Candidate>, StoreError>;
    /// Inserts or updates by email. Fields left `None` keep their stored value.
    async fn upsert_candidate(&self, candidate: &CandidateUpsert) -> Result<Candidate, StoreError>;
    /// Newest first.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError>;
    /// Newest first, excluding candidates that already applied to `job_id`.
    async fn list_candidates_without_application(
        &self,
        job_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Candidate>, StoreError>;

    // ── jobs ────────────────────────────────────────────────────────────────
    async fn insert_job(&self, job: NewJob) -> Result<Job, StoreError>;
    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, StoreError>;
    /// Newest first.
    async fn list_jobs(&self, filter: JobFilter) -> Result<Vec<Job>, StoreError>;
    /// Sets status to `closed`. Returns `None` when the job does not exist.
    async fn close_job(&self, id: Uuid) -> Result<Option<Job>, StoreError>;
    /// Applies the fields present in `update`. Returns `None` when the job does not exist.
    async fn update_job(&self, id: Uuid, update: &JobUpdate) -> Result<Option<Job>, StoreError>;

    // ── applications ────────────────────────────────────────────────────────
    async fn find_application(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>, StoreError>;
    async fn get_application(&self, id: Uuid) -> Result<Option<Application>, StoreError>;
    /// Fails with `UniqueViolation` when the (candidate, job) pair already exists.
    async fn insert_application(&self, application: NewApplication) -> Result<Application, StoreError>;
    /// Highest match score first.
    async fn list_applications_for_job(&self, job_id: Uuid) -> Result<Vec<Application>, StoreError>;
    /// Newest first, optionally restricted to one job.
    async fn list_applications(&self, job_id: Option<Uuid>) -> Result<Vec<Application>, StoreError>;
    /// Removes the application and its interviews. `false` when nothing was deleted.
    async fn delete_application(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, StoreError>;

    // ── matches ─────────────────────────────────────────────────────────────
    async fn get_match(&self, candidate_id: Uuid, job_id: Uuid)
        -> Result<Option<MatchRecord>, StoreError>;
    /// Insert-or-overwrite keyed by (candidate_id, job_id).
    async fn upsert_match(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        assessment: &MatchAssessment,
    ) -> Result<MatchRecord, StoreError>;
    /// Drops every stored match for the job. Returns the number removed.
    async fn delete_matches_for_job(&self, job_id: Uuid) -> Result<u64, StoreError>;

    // ── interviews ──────────────────────────────────────────────────────────
    async fn insert_interview(&self, interview: NewInterview) -> Result<Interview, StoreError>;
    async fn get_interview(&self, id: Uuid) -> Result<Option<Interview>, StoreError>;
    async fn update_interview(
        &self,
        id: Uuid,
        outcome: InterviewOutcome,
    ) -> Result<Option<Interview>, StoreError>;
    async fn reschedule_interview(
        &self,
        id: Uuid,
        change: &InterviewReschedule,
    ) -> Result<Option<Interview>, StoreError>;
    /// Soonest first.
    async fn list_interviews(
        &self,
        status: Option<InterviewStatus>,
    ) -> Result<Vec<Interview>, StoreError>;
    /// Interviews across all of the candidate's applications, soonest first.
    async fn list_interviews_for_candidate(
        &self,
        candidate_id: Uuid,
    ) -> Result<Vec<Interview>, StoreError>;

    // ── chat ────────────────────────────────────────────────────────────────
    async fn append_chat_message(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        sender: ChatSender,
        message: &str,
    ) -> Result<ChatMessageRow, StoreError>;
    /// Oldest first. `limit` keeps the most recent messages.
    async fn chat_history(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessageRow>, StoreError>;
}
