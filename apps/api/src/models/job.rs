#![allow(dead_code)]

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::candidate::Language;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
        }
    }
}

/// Job requirements as posted: either one free-text block or a list of lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Requirements {
    List(Vec<String>),
    Text(String),
}

impl Default for Requirements {
    fn default() -> Self {
        Requirements::List(Vec::new())
    }
}

impl Requirements {
    /// All requirement text joined with spaces.
    pub fn joined(&self) -> String {
        match self {
            Requirements::List(items) => items.join(" "),
            Requirements::Text(text) => text.clone(),
        }
    }

    /// Individual requirement lines. Free text is split on line breaks and semicolons.
    pub fn lines(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Requirements::List(items) => items.iter().map(String::as_str).collect(),
            Requirements::Text(text) => text.split(['\n', ';']).collect(),
        };
        raw.into_iter()
            .map(|line| line.trim().trim_start_matches(['-', '*', '•']).trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Requirements,
    /// Hourly pay.
    pub pay: Option<Decimal>,
    pub location: Option<String>,
    pub schedule: Option<String>,
    /// Full-time / Part-time etc. Preferred over `schedule` when matching.
    pub job_type: Option<String>,
    pub language: Language,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }
}

/// Payload for posting a job. New jobs always start `active`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Requirements,
    pub pay: Option<Decimal>,
    pub location: Option<String>,
    pub schedule: Option<String>,
    pub job_type: Option<String>,
    #[serde(default)]
    pub language: Language,
}

impl NewJob {
    pub fn into_job(self, id: Uuid, now: DateTime<Utc>) -> Job {
        Job {
            id,
            title: self.title,
            company: self.company,
            description: self.description,
            requirements: self.requirements,
            pay: self.pay,
            location: self.location,
            schedule: self.schedule,
            job_type: self.job_type,
            language: self.language,
            status: JobStatus::Active,
            created_at: now,
        }
    }
}

/// Partial edit of a posted job. Fields left out keep their stored value.
/// Status is not editable here; closing goes through its own route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Requirements>,
    pub pay: Option<Decimal>,
    pub location: Option<String>,
    pub schedule: Option<String>,
    pub job_type: Option<String>,
    pub language: Option<Language>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.company.is_none()
            && self.description.is_none()
            && self.requirements.is_none()
            && self.pay.is_none()
            && self.location.is_none()
            && self.schedule.is_none()
            && self.job_type.is_none()
            && self.language.is_none()
    }

    pub fn apply_to(&self, job: &Job) -> Job {
        let pick = |new: &Option<String>, old: &Option<String>| new.clone().or_else(|| old.clone());
        Job {
            title: self.title.clone().unwrap_or_else(|| job.title.clone()),
            company: self.company.clone().unwrap_or_else(|| job.company.clone()),
            description: pick(&self.description, &job.description),
            requirements: self
                .requirements
                .clone()
                .unwrap_or_else(|| job.requirements.clone()),
            pay: self.pay.or(job.pay),
            location: pick(&self.location, &job.location),
            schedule: pick(&self.schedule, &job.schedule),
            job_type: pick(&self.job_type, &job.job_type),
            language: self.language.unwrap_or(job.language),
            ..job.clone()
        }
    }
}
