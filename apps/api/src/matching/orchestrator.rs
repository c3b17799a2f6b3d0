//! Batch ranking in both directions.
//!
//! Each ranking oversamples (2 × limit), assesses the sample concurrently under a
//! semaphore bound, stores every success through `MatchCache`, drops failures
//! and returns the top `limit` by score. A failed or slow assessment never
//! cancels its siblings, and a batch with no successes is an empty list.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::cache::{CacheError, MatchCache};
use super::qualitative::{MatchScorer, ScoringError};
use crate::errors::AppError;
use crate::models::{Candidate, Job, JobStatus, MatchAssessment, MatchRecord};
use crate::store::{HiringStore, JobFilter};

const OVERSAMPLE_FACTOR: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    #[serde(flatten)]
    pub assessment: MatchAssessment,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedJob {
    pub job: Job,
    #[serde(flatten)]
    pub assessment: MatchAssessment,
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::Scoring(e) => e.into(),
            CacheError::Store(e) => e.into(),
        }
    }
}

#[derive(Clone)]
pub struct MatchOrchestrator {
    store: Arc<dyn HiringStore>,
    scorer: Arc<dyn MatchScorer>,
    cache: MatchCache,
    max_concurrency: usize,
}

impl MatchOrchestrator {
    pub fn new(
        store: Arc<dyn HiringStore>,
        scorer: Arc<dyn MatchScorer>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            cache: MatchCache::new(store.clone()),
            store,
            scorer,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Stored match for the pair, computed on a miss. `refresh` recomputes and
    /// overwrites whatever is stored.
    pub async fn get_match(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        refresh: bool,
    ) -> Result<MatchRecord, AppError> {
        let candidate = self.require_candidate(candidate_id).await?;
        let job = self.require_job(job_id).await?;

        if refresh {
            let assessment = self.scorer.assess(&candidate, &job).await?;
            return Ok(self.cache.store(candidate_id, job_id, &assessment).await?);
        }

        let scorer = self.scorer.clone();
        Ok(self
            .cache
            .get_or_compute(candidate_id, job_id, || async move {
                scorer.assess(&candidate, &job).await
            })
            .await?)
    }

    /// Forgets every stored match for the job. Called after the job is edited,
    /// so the next read or ranking scores against the new posting.
    pub async fn invalidate_job(&self, job_id: Uuid) -> Result<u64, AppError> {
        Ok(self.cache.forget_job(job_id).await?)
    }

    /// Best candidates for a job among those who have not applied to it.
    pub async fn rank_candidates_for_job(
        &self,
        job_id: Uuid,
        limit: usize,
    ) -> Result<Vec<RankedCandidate>, AppError> {
        let job = self.require_job(job_id).await?;
        let candidates = self
            .store
            .list_candidates_without_application(
                job_id,
                limit.saturating_mul(OVERSAMPLE_FACTOR),
            )
            .await?;

        info!(
            %job_id,
            sampled = candidates.len(),
            limit,
            "Ranking candidates for job"
        );

        let pairs = candidates
            .into_iter()
            .map(|candidate| (candidate, job.clone()))
            .collect();
        let ranked = self
            .assess_all(pairs, limit)
            .await
            .into_iter()
            .map(|(candidate, _, assessment)| RankedCandidate {
                candidate,
                assessment,
            })
            .collect();
        Ok(ranked)
    }

    /// Best active jobs for a candidate.
    pub async fn rank_jobs_for_candidate(
        &self,
        candidate_id: Uuid,
        limit: usize,
    ) -> Result<Vec<RankedJob>, AppError> {
        let candidate = self.require_candidate(candidate_id).await?;
        let jobs = self
            .store
            .list_jobs(JobFilter {
                status: Some(JobStatus::Active),
                language: None,
            })
            .await?;

        info!(
            %candidate_id,
            active_jobs = jobs.len(),
            limit,
            "Ranking jobs for candidate"
        );

        let pairs = jobs
            .into_iter()
            .take(limit.saturating_mul(OVERSAMPLE_FACTOR))
            .map(|job| (candidate.clone(), job))
            .collect();
        let ranked = self
            .assess_all(pairs, limit)
            .await
            .into_iter()
            .map(|(_, job, assessment)| RankedJob { job, assessment })
            .collect();
        Ok(ranked)
    }

    /// Assesses every pair concurrently, keeps the successes, and returns the
    /// top `limit` by score. Ties keep the input order.
    async fn assess_all(
        &self,
        pairs: Vec<(Candidate, Job)>,
        limit: usize,
    ) -> Vec<(Candidate, Job, MatchAssessment)> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut join_set = JoinSet::new();

        for (index, (candidate, job)) in pairs.into_iter().enumerate() {
            let semaphore = semaphore.clone();
            let scorer = self.scorer.clone();
            let cache = self.cache.clone();

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = assess_and_store(scorer.as_ref(), &cache, &candidate, &job).await;
                (index, candidate, job, outcome)
            });
        }

        let mut successes = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, candidate, job, Ok(assessment))) => {
                    successes.push((index, candidate, job, assessment));
                }
                Ok((_, candidate, job, Err(e))) => {
                    warn!(
                        candidate_id = %candidate.id,
                        job_id = %job.id,
                        "Excluding pair from ranking: {e}"
                    );
                }
                Err(e) => error!("Match assessment task failed: {e}"),
            }
        }

        successes.sort_by(|a, b| {
            b.3.match_score
                .cmp(&a.3.match_score)
                .then_with(|| a.0.cmp(&b.0))
        });
        successes.truncate(limit);
        successes
            .into_iter()
            .map(|(_, candidate, job, assessment)| (candidate, job, assessment))
            .collect()
    }

    async fn require_candidate(&self, id: Uuid) -> Result<Candidate, AppError> {
        self.store
            .get_candidate(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
    }

    async fn require_job(&self, id: Uuid) -> Result<Job, AppError> {
        self.store
            .get_job(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
    }
}

/// A fresh assessment that could not be stored is still returned.
async fn assess_and_store(
    scorer: &dyn MatchScorer,
    cache: &MatchCache,
    candidate: &Candidate,
    job: &Job,
) -> Result<MatchAssessment, ScoringError> {
    let assessment = scorer.assess(candidate, job).await?;
    if let Err(e) = cache.store(candidate.id, job.id, &assessment).await {
        warn!(
            candidate_id = %candidate.id,
            job_id = %job.id,
            "Could not store match: {e}"
        );
    }
    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateUpsert, NewApplication};
    use crate::store::memory::MemoryStore;
    use crate::testing::{new_job, StubScorer};

    async fn seed_candidates(store: &MemoryStore, n: usize) -> Vec<Candidate> {
        let mut out = Vec::new();
        for i in 0..n {
            let upsert = CandidateUpsert {
                email: format!("c{i}@example.com"),
                name: format!("Candidate {i}"),
                ..Default::default()
            };
            out.push(store.upsert_candidate(&upsert).await.unwrap());
        }
        out
    }

    fn orchestrator(store: Arc<MemoryStore>, scorer: StubScorer) -> MatchOrchestrator {
        MatchOrchestrator::new(store, Arc::new(scorer), 2)
    }

    #[tokio::test]
    async fn test_rank_candidates_sorts_and_truncates() {
        let store = Arc::new(MemoryStore::new());
        let job = store.insert_job(new_job("Picker")).await.unwrap();
        let candidates = seed_candidates(&store, 4).await;

        let scorer = StubScorer::default()
            .with_score(&candidates[0].email, 40)
            .with_score(&candidates[1].email, 90)
            .with_score(&candidates[2].email, 70)
            .with_score(&candidates[3].email, 55);
        let ranked = orchestrator(store.clone(), scorer)
            .rank_candidates_for_job(job.id, 2)
            .await
            .unwrap();

        let scores: Vec<i32> = ranked.iter().map(|r| r.assessment.match_score).collect();
        assert_eq!(scores, vec![90, 70]);
        assert!(store.get_match(candidates[1].id, job.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failures_are_excluded_not_fatal() {
        let store = Arc::new(MemoryStore::new());
        let job = store.insert_job(new_job("Picker")).await.unwrap();
        let candidates = seed_candidates(&store, 3).await;

        let scorer = StubScorer::default()
            .with_score(&candidates[0].email, 60)
            .failing_for(&candidates[1].email)
            .with_score(&candidates[2].email, 80);
        let ranked = orchestrator(store.clone(), scorer)
            .rank_candidates_for_job(job.id, 5)
            .await
            .unwrap();

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|r| r.candidate.id != candidates[1].id));
    }

    #[tokio::test]
    async fn test_all_failures_yield_empty_list() {
        let store = Arc::new(MemoryStore::new());
        let job = store.insert_job(new_job("Picker")).await.unwrap();
        seed_candidates(&store, 3).await;

        let ranked = orchestrator(store, StubScorer::unavailable())
            .rank_candidates_for_job(job.id, 5)
            .await
            .unwrap();
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn test_applicants_are_not_ranked() {
        let store = Arc::new(MemoryStore::new());
        let job = store.insert_job(new_job("Picker")).await.unwrap();
        let candidates = seed_candidates(&store, 2).await;
        store
            .insert_application(NewApplication {
                candidate_id: candidates[0].id,
                job_id: job.id,
                match_score: 50,
            })
            .await
            .unwrap();

        let ranked = orchestrator(store, StubScorer::default())
            .rank_candidates_for_job(job.id, 5)
            .await
            .unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].candidate.id, candidates[1].id);
    }

    #[tokio::test]
    async fn test_oversamples_twice_the_limit() {
        let store = Arc::new(MemoryStore::new());
        let job = store.insert_job(new_job("Picker")).await.unwrap();
        seed_candidates(&store, 10).await;

        let scorer = StubScorer::default();
        let calls = scorer.calls();
        orchestrator(store, scorer)
            .rank_candidates_for_job(job.id, 3)
            .await
            .unwrap();
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_rank_jobs_skips_closed_jobs() {
        let store = Arc::new(MemoryStore::new());
        let open = store.insert_job(new_job("Open")).await.unwrap();
        let closed = store.insert_job(new_job("Closed")).await.unwrap();
        store.close_job(closed.id).await.unwrap();
        let candidate = seed_candidates(&store, 1).await.remove(0);

        let ranked = orchestrator(store, StubScorer::default())
            .rank_jobs_for_candidate(candidate.id, 5)
            .await
            .unwrap();
        let ids: Vec<Uuid> = ranked.iter().map(|r| r.job.id).collect();
        assert_eq!(ids, vec![open.id]);
    }

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let err = orchestrator(store, StubScorer::default())
            .rank_candidates_for_job(Uuid::new_v4(), 5)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_match_uses_cache_unless_refreshed() {
        let store = Arc::new(MemoryStore::new());
        let job = store.insert_job(new_job("Picker")).await.unwrap();
        let candidate = seed_candidates(&store, 1).await.remove(0);

        let scorer = StubScorer::default();
        let calls = scorer.calls();
        let orchestrator = orchestrator(store, scorer);

        orchestrator.get_match(candidate.id, job.id, false).await.unwrap();
        orchestrator.get_match(candidate.id, job.id, false).await.unwrap();
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);

        orchestrator.get_match(candidate.id, job.id, true).await.unwrap();
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unbounded_limit_saturates() {
        let store = Arc::new(MemoryStore::new());
        let job = store.insert_job(new_job("Picker")).await.unwrap();
        let candidates = seed_candidates(&store, 3).await;
        let orchestrator = orchestrator(store, StubScorer::default());

        let ranked = orchestrator
            .rank_candidates_for_job(job.id, usize::MAX)
            .await
            .unwrap();
        assert_eq!(ranked.len(), 3);

        let jobs = orchestrator
            .rank_jobs_for_candidate(candidates[0].id, usize::MAX)
            .await
            .unwrap();
        assert_eq!(jobs.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidated_job_is_rescored() {
        let store = Arc::new(MemoryStore::new());
        let job = store.insert_job(new_job("Picker")).await.unwrap();
        let candidate = seed_candidates(&store, 1).await.remove(0);

        let scorer = StubScorer::default();
        let calls = scorer.calls();
        let orchestrator = orchestrator(store.clone(), scorer);

        orchestrator.get_match(candidate.id, job.id, false).await.unwrap();
        assert_eq!(orchestrator.invalidate_job(job.id).await.unwrap(), 1);
        assert!(store.get_match(candidate.id, job.id).await.unwrap().is_none());

        orchestrator.get_match(candidate.id, job.id, false).await.unwrap();
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_match_surfaces_scoring_unavailable() {
        let store = Arc::new(MemoryStore::new());
        let job = store.insert_job(new_job("Picker")).await.unwrap();
        let candidate = seed_candidates(&store, 1).await.remove(0);

        let err = orchestrator(store, StubScorer::unavailable())
            .get_match(candidate.id, job.id, false)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ScoringUnavailable(_)));
    }
}
