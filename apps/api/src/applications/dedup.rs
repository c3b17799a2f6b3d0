//! Application submission with at-most-once semantics per (candidate, job).
//!
//! The duplicate check runs before any scoring work. The store's unique
//! constraint backstops the window between that check and the insert, and a
//! violation there is reported as the same `DuplicateApplication`.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::cache::MatchCache;
use crate::matching::qualitative::MatchScorer;
use crate::models::{Application, Candidate, CandidateUpsert, Job, Language, NewApplication};
use crate::store::{HiringStore, StoreError};

/// Applicant details as submitted with an application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub skills: Option<Vec<String>>,
    pub certifications: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub education: Option<String>,
    pub language_preference: Option<Language>,
    pub resume_url: Option<String>,
}

impl ApplicationSubmission {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name is required".to_string()));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(AppError::Validation("email is required".to_string()));
        }
        if !email.contains('@') {
            return Err(AppError::Validation(format!("'{email}' is not a valid email")));
        }
        if matches!(self.experience_years, Some(years) if years < 0) {
            return Err(AppError::Validation(
                "experience_years cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn to_upsert(&self) -> CandidateUpsert {
        CandidateUpsert {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            phone: self.phone.clone(),
            skills: self.skills.clone(),
            certifications: self.certifications.clone(),
            experience_years: self.experience_years,
            education: self.education.clone(),
            language_preference: self.language_preference,
            resume_url: self.resume_url.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ApplicationDeduplicator {
    store: Arc<dyn HiringStore>,
    scorer: Arc<dyn MatchScorer>,
    cache: MatchCache,
}

impl ApplicationDeduplicator {
    pub fn new(store: Arc<dyn HiringStore>, scorer: Arc<dyn MatchScorer>) -> Self {
        Self {
            cache: MatchCache::new(store.clone()),
            store,
            scorer,
        }
    }

    pub async fn submit(
        &self,
        job_id: Uuid,
        submission: ApplicationSubmission,
    ) -> Result<Application, AppError> {
        submission.validate()?;
        let upsert = submission.to_upsert();

        if let Some(existing) = self.store.get_candidate_by_email(&upsert.email).await? {
            self.reject_if_applied(existing.id, job_id).await?;
        }

        let job = self
            .store
            .get_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
        if !job.is_active() {
            return Err(AppError::Validation(format!(
                "Job {job_id} is closed and no longer accepts applications"
            )));
        }

        let candidate = self.store.upsert_candidate(&upsert).await?;
        let match_score = self.score_best_effort(&candidate, &job).await;

        let inserted = self
            .store
            .insert_application(NewApplication {
                candidate_id: candidate.id,
                job_id,
                match_score,
            })
            .await;

        match inserted {
            Ok(application) => {
                info!(
                    application_id = %application.id,
                    candidate_id = %candidate.id,
                    %job_id,
                    match_score,
                    "Application submitted"
                );
                Ok(application)
            }
            Err(StoreError::UniqueViolation(_)) => {
                self.reject_if_applied(candidate.id, job_id).await?;
                Err(AppError::Conflict(
                    "Candidate has already applied to this job".to_string(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn reject_if_applied(&self, candidate_id: Uuid, job_id: Uuid) -> Result<(), AppError> {
        match self.store.find_application(candidate_id, job_id).await? {
            Some(existing) => Err(AppError::DuplicateApplication {
                application_id: existing.id,
            }),
            None => Ok(()),
        }
    }

    /// Scoring never blocks a submission: failures record a score of 0.
    async fn score_best_effort(&self, candidate: &Candidate, job: &Job) -> i32 {
        let assessment = match self.scorer.assess(candidate, job).await {
            Ok(assessment) => assessment,
            Err(e) => {
                warn!(
                    candidate_id = %candidate.id,
                    job_id = %job.id,
                    "Scoring unavailable, recording match score 0: {e}"
                );
                return 0;
            }
        };

        if let Err(e) = self.cache.store(candidate.id, job.id, &assessment).await {
            warn!(
                candidate_id = %candidate.id,
                job_id = %job.id,
                "Could not store match: {e}"
            );
        }
        assessment.match_score
    }
}
