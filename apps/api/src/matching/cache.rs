//! Cache-aside access to stored match assessments.
//!
//! The `matches` table is the cache: one row per (candidate, job), read before
//! computing and overwritten on every store.

use std::future::Future;
use std::sync::Arc;

use uuid::Uuid;

use super::qualitative::ScoringError;
use crate::models::{MatchAssessment, MatchRecord};
use crate::store::{HiringStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct MatchCache {
    store: Arc<dyn HiringStore>,
}

impl MatchCache {
    pub fn new(store: Arc<dyn HiringStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, candidate_id: Uuid, job_id: Uuid) -> Result<Option<MatchRecord>, StoreError> {
        self.store.get_match(candidate_id, job_id).await
    }

    /// Returns the stored match when there is one. Otherwise runs `compute`,
    /// stores the result and returns it.
    pub async fn get_or_compute<F, Fut>(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        compute: F,
    ) -> Result<MatchRecord, CacheError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<MatchAssessment, ScoringError>>,
    {
        if let Some(existing) = self.get(candidate_id, job_id).await? {
            return Ok(existing);
        }
        let assessment = compute().await?;
        Ok(self.store(candidate_id, job_id, &assessment).await?)
    }

    /// Drops every stored match for the job so the next read recomputes.
    pub async fn forget_job(&self, job_id: Uuid) -> Result<u64, StoreError> {
        self.store.delete_matches_for_job(job_id).await
    }

    /// Insert-or-overwrite. Storing the same assessment twice leaves one row.
    pub async fn store(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        assessment: &MatchAssessment,
    ) -> Result<MatchRecord, StoreError> {
        self.store.upsert_match(candidate_id, job_id, assessment).await
    }
}
