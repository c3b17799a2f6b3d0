#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    Reviewing,
    #[serde(alias = "interview")]
    InterviewScheduled,
    Interviewed,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::InterviewScheduled => "interview_scheduled",
            ApplicationStatus::Interviewed => "interviewed",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Hired | ApplicationStatus::Rejected)
    }

    /// Statuses are not strictly linear: any open application may jump forward
    /// (e.g. straight from `submitted` to `interviewed`), but decided applications
    /// stay decided and nothing returns to `submitted`.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        if self.is_terminal() {
            return *self == next;
        }
        next != ApplicationStatus::Submitted || *self == ApplicationStatus::Submitted
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub status: ApplicationStatus,
    /// Score snapshot taken at submission. 0 when scoring was unavailable.
    pub match_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub match_score: i32,
}

impl NewApplication {
    pub fn into_application(self, id: Uuid, now: DateTime<Utc>) -> Application {
        Application {
            id,
            candidate_id: self.candidate_id,
            job_id: self.job_id,
            status: ApplicationStatus::Submitted,
            match_score: self.match_score.clamp(0, 100),
            created_at: now,
            updated_at: now,
        }
    }
}
