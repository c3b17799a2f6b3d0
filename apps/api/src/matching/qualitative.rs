//! Qualitative scoring: LLM-backed assessment of one candidate against one job.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`; tests swap in a stub.
//! Anything short of a well-formed, schema-valid reply is a `ScoringError`,
//! which callers treat as "scoring unavailable".

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::prompts::{MATCH_PROMPT_TEMPLATE, MATCH_SYSTEM};
use crate::llm_client::prompts::{fill, list_or};
use crate::llm_client::{complete_json, CompletionClient, LlmError, SamplingConfig};
use crate::models::{Candidate, Job, MatchAssessment, Recommendation};

/// Scoring runs at temperature 0 so repeated calls on unchanged inputs stay stable.
const SCORING_SAMPLING: SamplingConfig = SamplingConfig {
    temperature: 0.0,
    max_tokens: 1000,
};

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Malformed assessment: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn assess(&self, candidate: &Candidate, job: &Job) -> Result<MatchAssessment, ScoringError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmMatchScorer
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmMatchScorer {
    llm: Arc<dyn CompletionClient>,
}

impl LlmMatchScorer {
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl MatchScorer for LlmMatchScorer {
    async fn assess(&self, candidate: &Candidate, job: &Job) -> Result<MatchAssessment, ScoringError> {
        let prompt = build_prompt(candidate, job);
        let raw: RawAssessment =
            complete_json(self.llm.as_ref(), MATCH_SYSTEM, &prompt, &SCORING_SAMPLING).await?;
        let assessment = raw.validate()?;

        debug!(
            candidate_id = %candidate.id,
            job_id = %job.id,
            score = assessment.match_score,
            "Match assessed"
        );
        Ok(assessment)
    }
}

pub fn build_prompt(candidate: &Candidate, job: &Job) -> String {
    let skills = list_or(&candidate.skills, "None listed");
    let certifications = list_or(&candidate.certifications, "None");
    let experience = candidate.experience_years.to_string();
    let pay = job
        .pay
        .map(|p| format!("${p}/hour"))
        .unwrap_or_else(|| "Not specified".to_string());
    let schedule = job
        .job_type
        .as_deref()
        .or(job.schedule.as_deref())
        .unwrap_or("Not specified");
    let requirements = list_or(&job.requirements.lines(), "None listed");

    fill(
        MATCH_PROMPT_TEMPLATE,
        &[
            ("skills", skills.as_str()),
            ("experience_years", experience.as_str()),
            ("certifications", certifications.as_str()),
            ("education", candidate.education.as_deref().unwrap_or("Not provided")),
            ("language", candidate.language_preference.display_name()),
            ("title", job.title.as_str()),
            ("company", job.company.as_str()),
            ("pay", pay.as_str()),
            ("location", job.location.as_deref().unwrap_or("Not specified")),
            ("schedule", schedule),
            ("description", job.description.as_deref().unwrap_or("Not provided")),
            ("requirements", requirements.as_str()),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Schema validation
// ────────────────────────────────────────────────────────────────────────────

/// Reply as the model sent it. Every field is checked before it becomes a
/// `MatchAssessment`.
#[derive(Debug, Deserialize)]
struct RawAssessment {
    match_score: Option<Value>,
    reasoning: Option<String>,
    strengths: Option<Vec<String>>,
    red_flags: Option<Vec<String>>,
    recommendation: Option<String>,
}

impl RawAssessment {
    fn validate(self) -> Result<MatchAssessment, ScoringError> {
        let malformed = |msg: &str| ScoringError::Malformed(msg.to_string());

        let score = self
            .match_score
            .as_ref()
            .and_then(integer_score)
            .ok_or_else(|| malformed("match_score must be an integer from 0 to 100"))?;

        let reasoning = self
            .reasoning
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .ok_or_else(|| malformed("reasoning must be a non-empty string"))?;

        let strengths = self
            .strengths
            .ok_or_else(|| malformed("strengths must be an array of strings"))?;
        let red_flags = self
            .red_flags
            .ok_or_else(|| malformed("red_flags must be an array of strings"))?;

        let recommendation = match self.recommendation.as_deref().map(str::trim) {
            Some("proceed_to_interview") => Recommendation::ProceedToInterview,
            Some("maybe") => Recommendation::Maybe,
            Some("not_a_fit") => Recommendation::NotAFit,
            other => {
                return Err(ScoringError::Malformed(format!(
                    "unknown recommendation {other:?}"
                )))
            }
        };

        Ok(MatchAssessment {
            match_score: score,
            reasoning,
            strengths,
            red_flags,
            recommendation,
        })
    }
}

/// Accepts `85` and `85.0`; rejects fractions, strings and out-of-range values.
fn integer_score(value: &Value) -> Option<i32> {
    let n = match value {
        Value::Number(n) => n,
        _ => return None,
    };
    let score = match n.as_i64() {
        Some(i) => i,
        None => {
            let f = n.as_f64()?;
            if f.fract() != 0.0 {
                return None;
            }
            f as i64
        }
    };
    (0..=100).contains(&score).then_some(score as i32)
}
