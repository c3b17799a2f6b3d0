#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::application::ApplicationStatus;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
            InterviewStatus::NoShow => "no_show",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewDecision {
    Hire,
    Maybe,
    Reject,
}

impl InterviewDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewDecision::Hire => "hire",
            InterviewDecision::Maybe => "maybe",
            InterviewDecision::Reject => "reject",
        }
    }

    /// Application status implied by a post-interview decision.
    pub fn application_status(&self) -> ApplicationStatus {
        match self {
            InterviewDecision::Hire => ApplicationStatus::Hired,
            InterviewDecision::Maybe => ApplicationStatus::Interviewed,
            InterviewDecision::Reject => ApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interview {
    pub id: Uuid,
    pub application_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: InterviewStatus,
    pub decision: Option<InterviewDecision>,
    /// 1–5
    pub rating: Option<i32>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInterview {
    pub application_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

fn default_duration() -> i32 {
    30
}

impl NewInterview {
    pub fn into_interview(self, id: Uuid, now: DateTime<Utc>) -> Interview {
        Interview {
            id,
            application_id: self.application_id,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes,
            status: InterviewStatus::Scheduled,
            decision: None,
            rating: None,
            meeting_link: self.meeting_link,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Reschedule of an open interview. Fields left out keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterviewReschedule {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
}

impl InterviewReschedule {
    pub fn apply_to(&self, interview: &Interview, now: DateTime<Utc>) -> Interview {
        Interview {
            scheduled_at: self.scheduled_at.unwrap_or(interview.scheduled_at),
            duration_minutes: self.duration_minutes.unwrap_or(interview.duration_minutes),
            meeting_link: self
                .meeting_link
                .clone()
                .or_else(|| interview.meeting_link.clone()),
            notes: self.notes.clone().or_else(|| interview.notes.clone()),
            updated_at: now,
            ..interview.clone()
        }
    }
}
