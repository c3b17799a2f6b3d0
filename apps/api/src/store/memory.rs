//! In-memory `HiringStore` for tests. Enforces the same uniqueness rules as the
//! Postgres schema: one candidate per email and one application per
//! (candidate, job) pair.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{HiringStore, InterviewOutcome, JobFilter, StoreError};
use crate::models::{
    Application, ApplicationStatus, Candidate, CandidateUpsert, ChatMessageRow, ChatSender,
    Interview, InterviewReschedule, InterviewStatus, Job, JobStatus, JobUpdate, MatchAssessment,
    MatchRecord, NewApplication, NewInterview, NewJob,
};

#[derive(Default)]
struct Tables {
    candidates: Vec<Candidate>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
    matches: HashMap<(Uuid, Uuid), MatchRecord>,
    interviews: Vec<Interview>,
    chat: Vec<ChatMessageRow>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    /// `find_application` reports nothing while this is above zero, standing in
    /// for a concurrent writer whose row is not yet visible.
    hidden_lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn application_count(&self) -> usize {
        self.tables.lock().await.applications.len()
    }

    /// The next `n` calls to `find_application` return `None`.
    pub fn hide_next_application_lookups(&self, n: usize) {
        self.hidden_lookups.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl HiringStore for MemoryStore {
    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn get_candidate_by_email(&self, email: &str) -> Result<Option<Candidate>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.candidates.iter().find(|c| c.email == email).cloned())
    }

    async fn upsert_candidate(&self, candidate: &CandidateUpsert) -> Result<Candidate, StoreError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        if let Some(existing) = tables
            .candidates
            .iter_mut()
            .find(|c| c.email == candidate.email)
        {
            *existing = candidate.merge_into(existing, now);
            return Ok(existing.clone());
        }
        let created = candidate.clone().into_new(Uuid::new_v4(), now);
        tables.candidates.push(created.clone());
        Ok(created)
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.candidates.iter().rev().cloned().collect())
    }

    async fn list_candidates_without_application(
        &self,
        job_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Candidate>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .candidates
            .iter()
            .rev()
            .filter(|c| {
                !tables
                    .applications
                    .iter()
                    .any(|a| a.candidate_id == c.id && a.job_id == job_id)
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_job(&self, job: NewJob) -> Result<Job, StoreError> {
        let mut tables = self.tables.lock().await;
        let job = job.into_job(Uuid::new_v4(), Utc::now());
        tables.jobs.push(job.clone());
        Ok(job)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn list_jobs(&self, filter: JobFilter) -> Result<Vec<Job>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .jobs
            .iter()
            .rev()
            .filter(|j| filter.status.map_or(true, |s| j.status == s))
            .filter(|j| filter.language.map_or(true, |l| j.language == l))
            .cloned()
            .collect())
    }

    async fn close_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.jobs.iter_mut().find(|j| j.id == id).map(|job| {
            job.status = JobStatus::Closed;
            job.clone()
        }))
    }

    async fn update_job(&self, id: Uuid, update: &JobUpdate) -> Result<Option<Job>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.jobs.iter_mut().find(|j| j.id == id).map(|job| {
            *job = update.apply_to(job);
            job.clone()
        }))
    }

    async fn find_application(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>, StoreError> {
        let hidden = self
            .hidden_lookups
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if hidden {
            return Ok(None);
        }
        let tables = self.tables.lock().await;
        Ok(tables
            .applications
            .iter()
            .find(|a| a.candidate_id == candidate_id && a.job_id == job_id)
            .cloned())
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.applications.iter().find(|a| a.id == id).cloned())
    }

    async fn insert_application(&self, application: NewApplication) -> Result<Application, StoreError> {
        let mut tables = self.tables.lock().await;
        let taken = tables
            .applications
            .iter()
            .any(|a| a.candidate_id == application.candidate_id && a.job_id == application.job_id);
        if taken {
            return Err(StoreError::UniqueViolation(Some(
                "applications_candidate_job_key".to_string(),
            )));
        }
        if !tables.jobs.iter().any(|j| j.id == application.job_id) {
            return Err(StoreError::ForeignKeyViolation(format!(
                "job {} does not exist",
                application.job_id
            )));
        }
        let created = application.into_application(Uuid::new_v4(), Utc::now());
        tables.applications.push(created.clone());
        Ok(created)
    }

    async fn list_applications_for_job(&self, job_id: Uuid) -> Result<Vec<Application>, StoreError> {
        let tables = self.tables.lock().await;
        let mut apps: Vec<Application> = tables
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        apps.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        Ok(apps)
    }

    async fn list_applications(&self, job_id: Option<Uuid>) -> Result<Vec<Application>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .applications
            .iter()
            .rev()
            .filter(|a| job_id.map_or(true, |id| a.job_id == id))
            .cloned()
            .collect())
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        let before = tables.applications.len();
        tables.applications.retain(|a| a.id != id);
        if tables.applications.len() == before {
            return Ok(false);
        }
        tables.interviews.retain(|i| i.application_id != id);
        Ok(true)
    }

    async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.applications.iter_mut().find(|a| a.id == id).map(|app| {
            app.status = status;
            app.updated_at = Utc::now();
            app.clone()
        }))
    }

    async fn get_match(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<MatchRecord>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.matches.get(&(candidate_id, job_id)).cloned())
    }

    async fn upsert_match(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        assessment: &MatchAssessment,
    ) -> Result<MatchRecord, StoreError> {
        let mut tables = self.tables.lock().await;
        let record = MatchRecord {
            candidate_id,
            job_id,
            assessment: assessment.clone(),
            updated_at: Utc::now(),
        };
        tables.matches.insert((candidate_id, job_id), record.clone());
        Ok(record)
    }

    async fn delete_matches_for_job(&self, job_id: Uuid) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        let before = tables.matches.len();
        tables.matches.retain(|(_, j), _| *j != job_id);
        Ok((before - tables.matches.len()) as u64)
    }

    async fn insert_interview(&self, interview: NewInterview) -> Result<Interview, StoreError> {
        let mut tables = self.tables.lock().await;
        if !tables
            .applications
            .iter()
            .any(|a| a.id == interview.application_id)
        {
            return Err(StoreError::ForeignKeyViolation(format!(
                "application {} does not exist",
                interview.application_id
            )));
        }
        let created = interview.into_interview(Uuid::new_v4(), Utc::now());
        tables.interviews.push(created.clone());
        Ok(created)
    }

    async fn get_interview(&self, id: Uuid) -> Result<Option<Interview>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.interviews.iter().find(|i| i.id == id).cloned())
    }

    async fn update_interview(
        &self,
        id: Uuid,
        outcome: InterviewOutcome,
    ) -> Result<Option<Interview>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.interviews.iter_mut().find(|i| i.id == id).map(|interview| {
            interview.status = outcome.status;
            if outcome.decision.is_some() {
                interview.decision = outcome.decision;
            }
            if outcome.rating.is_some() {
                interview.rating = outcome.rating;
            }
            if let Some(notes) = outcome.notes {
                interview.notes = Some(notes);
            }
            interview.updated_at = Utc::now();
            interview.clone()
        }))
    }

    async fn reschedule_interview(
        &self,
        id: Uuid,
        change: &InterviewReschedule,
    ) -> Result<Option<Interview>, StoreError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.interviews.iter_mut().find(|i| i.id == id).map(|interview| {
            *interview = change.apply_to(interview, Utc::now());
            interview.clone()
        }))
    }

    async fn list_interviews(
        &self,
        status: Option<InterviewStatus>,
    ) -> Result<Vec<Interview>, StoreError> {
        let tables = self.tables.lock().await;
        let mut interviews: Vec<Interview> = tables
            .interviews
            .iter()
            .filter(|i| status.map_or(true, |s| i.status == s))
            .cloned()
            .collect();
        interviews.sort_by_key(|i| i.scheduled_at);
        Ok(interviews)
    }

    async fn list_interviews_for_candidate(
        &self,
        candidate_id: Uuid,
    ) -> Result<Vec<Interview>, StoreError> {
        let tables = self.tables.lock().await;
        let mut interviews: Vec<Interview> = tables
            .interviews
            .iter()
            .filter(|i| {
                tables
                    .applications
                    .iter()
                    .any(|a| a.id == i.application_id && a.candidate_id == candidate_id)
            })
            .cloned()
            .collect();
        interviews.sort_by_key(|i| i.scheduled_at);
        Ok(interviews)
    }

    async fn append_chat_message(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        sender: ChatSender,
        message: &str,
    ) -> Result<ChatMessageRow, StoreError> {
        let mut tables = self.tables.lock().await;
        let row = ChatMessageRow {
            id: Uuid::new_v4(),
            job_id,
            candidate_id,
            sender,
            message: message.to_string(),
            created_at: Utc::now(),
        };
        tables.chat.push(row.clone());
        Ok(row)
    }

    async fn chat_history(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessageRow>, StoreError> {
        let tables = self.tables.lock().await;
        let thread: Vec<ChatMessageRow> = tables
            .chat
            .iter()
            .filter(|m| m.job_id == job_id && m.candidate_id == candidate_id)
            .cloned()
            .collect();
        let skip = match limit {
            Some(n) => thread.len().saturating_sub(n.max(0) as usize),
            None => 0,
        };
        Ok(thread.into_iter().skip(skip).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert(email: &str, name: &str) -> CandidateUpsert {
        CandidateUpsert {
            email: email.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_by_email_keeps_identity() {
        let store = MemoryStore::new();
        let first = store.upsert_candidate(&upsert("a@x.com", "A")).await.unwrap();
        let second = store.upsert_candidate(&upsert("a@x.com", "A2")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "A2");
        assert_eq!(store.list_candidates().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_application_is_unique_violation() {
        let store = MemoryStore::new();
        let candidate = store.upsert_candidate(&upsert("a@x.com", "A")).await.unwrap();
        let job = store
            .insert_job(serde_json::from_str(r#"{"title":"Picker","company":"Acme"}"#).unwrap())
            .await
            .unwrap();
        let new_app = NewApplication {
            candidate_id: candidate.id,
            job_id: job.id,
            match_score: 50,
        };

        store.insert_application(new_app.clone()).await.unwrap();
        let err = store.insert_application(new_app).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn test_chat_history_keeps_most_recent_in_order() {
        let store = MemoryStore::new();
        let (job, cand) = (Uuid::new_v4(), Uuid::new_v4());
        for i in 0..5 {
            store
                .append_chat_message(job, cand, ChatSender::Candidate, &format!("m{i}"))
                .await
                .unwrap();
        }

        let recent = store.chat_history(job, cand, Some(2)).await.unwrap();
        let texts: Vec<&str> = recent.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["m3", "m4"]);
        assert_eq!(store.chat_history(job, cand, None).await.unwrap().len(), 5);
    }
}
