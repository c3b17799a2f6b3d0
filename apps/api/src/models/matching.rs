use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ProceedToInterview,
    Maybe,
    NotAFit,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::ProceedToInterview => "proceed_to_interview",
            Recommendation::Maybe => "maybe",
            Recommendation::NotAFit => "not_a_fit",
        }
    }
}

/// Validated output of the qualitative (LLM) scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAssessment {
    pub match_score: i32,
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub red_flags: Vec<String>,
    pub recommendation: Recommendation,
}

/// Stored match for a (candidate, job) pair. One live row per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    #[serde(flatten)]
    pub assessment: MatchAssessment,
    pub updated_at: DateTime<Utc>,
}
