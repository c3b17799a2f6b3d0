//! Test fixtures and doubles shared across module tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::llm_client::{ChatMessage, CompletionClient, LlmError, SamplingConfig};
use crate::matching::qualitative::{MatchScorer, ScoringError};
use crate::models::{
    Candidate, CandidateUpsert, Job, Language, MatchAssessment, NewJob, Recommendation,
    Requirements,
};

pub fn make_candidate(email: &str) -> Candidate {
    CandidateUpsert {
        email: email.to_string(),
        name: "Test Candidate".to_string(),
        ..Default::default()
    }
    .into_new(Uuid::new_v4(), Utc::now())
}

pub fn new_job(title: &str) -> NewJob {
    NewJob {
        title: title.to_string(),
        company: "Acme".to_string(),
        description: None,
        requirements: Requirements::default(),
        pay: None,
        location: None,
        schedule: None,
        job_type: None,
        language: Language::En,
    }
}

pub fn make_job(title: &str) -> Job {
    new_job(title).into_job(Uuid::new_v4(), Utc::now())
}

pub fn assessment(score: i32) -> MatchAssessment {
    MatchAssessment {
        match_score: score,
        reasoning: format!("Scored {score}"),
        strengths: vec!["Reliable".to_string()],
        red_flags: vec![],
        recommendation: if score >= 70 {
            Recommendation::ProceedToInterview
        } else if score >= 50 {
            Recommendation::Maybe
        } else {
            Recommendation::NotAFit
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// StubScorer
// ────────────────────────────────────────────────────────────────────────────

const DEFAULT_STUB_SCORE: i32 = 50;

/// `MatchScorer` double keyed by candidate email.
#[derive(Default)]
pub struct StubScorer {
    scores: HashMap<String, i32>,
    failing: HashSet<String>,
    always_fail: bool,
    yield_first: bool,
    calls: Arc<AtomicUsize>,
}

impl StubScorer {
    /// Every assessment fails.
    pub fn unavailable() -> Self {
        Self {
            always_fail: true,
            ..Default::default()
        }
    }

    pub fn with_score(mut self, email: &str, score: i32) -> Self {
        self.scores.insert(email.to_string(), score);
        self
    }

    pub fn failing_for(mut self, email: &str) -> Self {
        self.failing.insert(email.to_string());
        self
    }

    /// Yields to the scheduler before answering, so concurrent callers interleave.
    pub fn yielding(mut self) -> Self {
        self.yield_first = true;
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl MatchScorer for StubScorer {
    async fn assess(&self, candidate: &Candidate, _job: &Job) -> Result<MatchAssessment, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.yield_first {
            tokio::task::yield_now().await;
        }
        if self.always_fail || self.failing.contains(&candidate.email) {
            return Err(ScoringError::Llm(LlmError::Api {
                status: 503,
                message: "stub outage".to_string(),
            }));
        }
        let score = self
            .scores
            .get(&candidate.email)
            .copied()
            .unwrap_or(DEFAULT_STUB_SCORE);
        Ok(assessment(score))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ScriptedCompletion
// ────────────────────────────────────────────────────────────────────────────

/// `CompletionClient` double. Replies are served in order and the last one
/// repeats once the script runs out.
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Vec<String>,
    fail: bool,
    calls: AtomicUsize,
    last_system: Mutex<String>,
    last_messages: Mutex<Vec<ChatMessage>>,
}

impl ScriptedCompletion {
    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_system(&self) -> String {
        self.last_system.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
        _sampling: &SamplingConfig,
    ) -> Result<String, LlmError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_system.lock() {
            *last = system.to_string();
        }
        if let Ok(mut last) = self.last_messages.lock() {
            *last = messages.to_vec();
        }
        if self.fail {
            return Err(LlmError::Api {
                status: 529,
                message: "overloaded".to_string(),
            });
        }
        self.replies
            .get(index)
            .or_else(|| self.replies.last())
            .cloned()
            .ok_or(LlmError::EmptyContent)
    }
}
