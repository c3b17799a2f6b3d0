//! Postgres implementation of `HiringStore`.
//!
//! Enum columns are stored as TEXT and decoded through serde, so the snake_case
//! names in the database are the same strings the JSON API uses.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{HiringStore, InterviewOutcome, JobFilter, StoreError};
use crate::models::{
    Application, ApplicationStatus, Candidate, CandidateUpsert, ChatMessageRow, ChatSender,
    Interview, InterviewReschedule, InterviewStatus, Job, JobUpdate, MatchAssessment, MatchRecord,
    NewApplication, NewInterview, NewJob, Requirements,
};

const CANDIDATE_COLUMNS: &str = "id, email, name, phone, skills, certifications, \
    experience_years, education, language_preference, resume_url, created_at, updated_at";

const JOB_COLUMNS: &str = "id, title, company, description, requirements, pay, location, \
    schedule, job_type, language, status, created_at";

const APPLICATION_COLUMNS: &str =
    "id, candidate_id, job_id, status, match_score, created_at, updated_at";

const MATCH_COLUMNS: &str = "candidate_id, job_id, match_score, reasoning, strengths, \
    red_flags, recommendation, updated_at";

const INTERVIEW_COLUMNS: &str = "id, application_id, scheduled_at, duration_minutes, status, \
    decision, rating, meeting_link, notes, created_at, updated_at";

const CHAT_COLUMNS: &str = "id, job_id, candidate_id, sender, message, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Row types
// ────────────────────────────────────────────────────────────────────────────

fn decode<T: DeserializeOwned>(column: &str, raw: &str) -> Result<T, StoreError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|e| StoreError::Decode(format!("{column}='{raw}': {e}")))
}

#[derive(FromRow)]
struct CandidateRow {
    id: Uuid,
    email: String,
    name: String,
    phone: Option<String>,
    skills: Vec<String>,
    certifications: Vec<String>,
    experience_years: i32,
    education: Option<String>,
    language_preference: String,
    resume_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for Candidate {
    type Error = StoreError;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        Ok(Candidate {
            id: row.id,
            email: row.email,
            name: row.name,
            phone: row.phone,
            skills: row.skills,
            certifications: row.certifications,
            experience_years: row.experience_years,
            education: row.education,
            language_preference: decode("language_preference", &row.language_preference)?,
            resume_url: row.resume_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct JobRow {
    id: Uuid,
    title: String,
    company: String,
    description: Option<String>,
    requirements: Json<Requirements>,
    pay: Option<Decimal>,
    location: Option<String>,
    schedule: Option<String>,
    job_type: Option<String>,
    language: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Job {
            id: row.id,
            title: row.title,
            company: row.company,
            description: row.description,
            requirements: row.requirements.0,
            pay: row.pay,
            location: row.location,
            schedule: row.schedule,
            job_type: row.job_type,
            language: decode("language", &row.language)?,
            status: decode("status", &row.status)?,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct ApplicationRow {
    id: Uuid,
    candidate_id: Uuid,
    job_id: Uuid,
    status: String,
    match_score: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = StoreError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Application {
            id: row.id,
            candidate_id: row.candidate_id,
            job_id: row.job_id,
            status: decode("status", &row.status)?,
            match_score: row.match_score,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct MatchRow {
    candidate_id: Uuid,
    job_id: Uuid,
    match_score: i32,
    reasoning: String,
    strengths: Vec<String>,
    red_flags: Vec<String>,
    recommendation: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MatchRow> for MatchRecord {
    type Error = StoreError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        Ok(MatchRecord {
            candidate_id: row.candidate_id,
            job_id: row.job_id,
            assessment: MatchAssessment {
                match_score: row.match_score,
                reasoning: row.reasoning,
                strengths: row.strengths,
                red_flags: row.red_flags,
                recommendation: decode("recommendation", &row.recommendation)?,
            },
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct InterviewRow {
    id: Uuid,
    application_id: Uuid,
    scheduled_at: DateTime<Utc>,
    duration_minutes: i32,
    status: String,
    decision: Option<String>,
    rating: Option<i32>,
    meeting_link: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InterviewRow> for Interview {
    type Error = StoreError;

    fn try_from(row: InterviewRow) -> Result<Self, Self::Error> {
        Ok(Interview {
            id: row.id,
            application_id: row.application_id,
            scheduled_at: row.scheduled_at,
            duration_minutes: row.duration_minutes,
            status: decode("status", &row.status)?,
            decision: row
                .decision
                .as_deref()
                .map(|d| decode("decision", d))
                .transpose()?,
            rating: row.rating,
            meeting_link: row.meeting_link,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct ChatRow {
    id: Uuid,
    job_id: Uuid,
    candidate_id: Uuid,
    sender: String,
    message: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ChatRow> for ChatMessageRow {
    type Error = StoreError;

    fn try_from(row: ChatRow) -> Result<Self, Self::Error> {
        Ok(ChatMessageRow {
            id: row.id,
            job_id: row.job_id,
            candidate_id: row.candidate_id,
            sender: decode("sender", &row.sender)?,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

fn convert_opt<R, T>(row: Option<R>) -> Result<Option<T>, StoreError>
where
    T: TryFrom<R, Error = StoreError>,
{
    row.map(T::try_from).transpose()
}

// ────────────────────────────────────────────────────────────────────────────
// HiringStore
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl HiringStore for PgStore {
    async fn get_candidate(&self, id: Uuid) -> Result<Option<Candidate>, StoreError> {
        let row: Option<CandidateRow> =
            sqlx::query_as(&format!("SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        convert_opt(row)
    }

    async fn get_candidate_by_email(&self, email: &str) -> Result<Option<Candidate>, StoreError> {
        let row: Option<CandidateRow> = sqlx::query_as(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        convert_opt(row)
    }

    async fn upsert_candidate(&self, candidate: &CandidateUpsert) -> Result<Candidate, StoreError> {
        // Parameters are referenced again in DO UPDATE so that a NULL (not sent)
        // keeps the stored value while the INSERT branch falls back to defaults.
        let row: CandidateRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO candidates
                (id, email, name, phone, skills, certifications, experience_years,
                 education, language_preference, resume_url)
            VALUES ($1, $2, $3, $4,
                    COALESCE($5, '{{}}'::text[]), COALESCE($6, '{{}}'::text[]),
                    COALESCE($7, 0), $8, COALESCE($9, 'en'), $10)
            ON CONFLICT (email) DO UPDATE SET
                name = EXCLUDED.name,
                phone = COALESCE($4, candidates.phone),
                skills = COALESCE($5, candidates.skills),
                certifications = COALESCE($6, candidates.certifications),
                experience_years = COALESCE($7, candidates.experience_years),
                education = COALESCE($8, candidates.education),
                language_preference = COALESCE($9, candidates.language_preference),
                resume_url = COALESCE($10, candidates.resume_url),
                updated_at = NOW()
            RETURNING {CANDIDATE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&candidate.email)
        .bind(&candidate.name)
        .bind(candidate.phone.as_deref())
        .bind(candidate.skills.clone())
        .bind(candidate.certifications.clone())
        .bind(candidate.experience_years)
        .bind(candidate.education.as_deref())
        .bind(candidate.language_preference.map(|l| l.as_str()))
        .bind(candidate.resume_url.as_deref())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError> {
        let rows: Vec<CandidateRow> = sqlx::query_as(&format!(
            "SELECT {CANDIDATE_COLUMNS} FROM candidates ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn list_candidates_without_application(
        &self,
        job_id: Uuid,
        limit: usize,
    ) -> Result<Vec<Candidate>, StoreError> {
        let rows: Vec<CandidateRow> = sqlx::query_as(&format!(
            r#"
            SELECT {CANDIDATE_COLUMNS} FROM candidates
            WHERE NOT EXISTS (
                SELECT 1 FROM applications a
                WHERE a.candidate_id = candidates.id AND a.job_id = $1
            )
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(job_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn insert_job(&self, job: NewJob) -> Result<Job, StoreError> {
        let row: JobRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO jobs
                (id, title, company, description, requirements, pay, location,
                 schedule, job_type, language, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'active')
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&job.title)
        .bind(&job.company)
        .bind(job.description.as_deref())
        .bind(Json(&job.requirements))
        .bind(job.pay)
        .bind(job.location.as_deref())
        .bind(job.schedule.as_deref())
        .bind(job.job_type.as_deref())
        .bind(job.language.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let row: Option<JobRow> =
            sqlx::query_as(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        convert_opt(row)
    }

    async fn list_jobs(&self, filter: JobFilter) -> Result<Vec<Job>, StoreError> {
        let rows: Vec<JobRow> = sqlx::query_as(&format!(
            r#"
            SELECT {JOB_COLUMNS} FROM jobs
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR language = $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.language.map(|l| l.as_str()))
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn close_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let row: Option<JobRow> = sqlx::query_as(&format!(
            "UPDATE jobs SET status = 'closed' WHERE id = $1 RETURNING {JOB_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        convert_opt(row)
    }

    async fn update_job(&self, id: Uuid, update: &JobUpdate) -> Result<Option<Job>, StoreError> {
        let row: Option<JobRow> = sqlx::query_as(&format!(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                company = COALESCE($3, company),
                description = COALESCE($4, description),
                requirements = COALESCE($5, requirements),
                pay = COALESCE($6, pay),
                location = COALESCE($7, location),
                schedule = COALESCE($8, schedule),
                job_type = COALESCE($9, job_type),
                language = COALESCE($10, language)
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.company.as_deref())
        .bind(update.description.as_deref())
        .bind(update.requirements.as_ref().map(Json))
        .bind(update.pay)
        .bind(update.location.as_deref())
        .bind(update.schedule.as_deref())
        .bind(update.job_type.as_deref())
        .bind(update.language.map(|l| l.as_str()))
        .fetch_optional(&self.pool)
        .await?;
        convert_opt(row)
    }

    async fn find_application(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>, StoreError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE candidate_id = $1 AND job_id = $2"
        ))
        .bind(candidate_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        convert_opt(row)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>, StoreError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        convert_opt(row)
    }

    async fn insert_application(&self, application: NewApplication) -> Result<Application, StoreError> {
        // No ON CONFLICT: the (candidate_id, job_id) unique constraint must surface
        // as a violation so the caller can report the duplicate.
        let row: ApplicationRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO applications (id, candidate_id, job_id, status, match_score)
            VALUES ($1, $2, $3, 'submitted', $4)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(application.candidate_id)
        .bind(application.job_id)
        .bind(application.match_score.clamp(0, 100))
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn list_applications_for_job(&self, job_id: Uuid) -> Result<Vec<Application>, StoreError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM applications
            WHERE job_id = $1
            ORDER BY match_score DESC, created_at ASC
            "#
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn list_applications(&self, job_id: Option<Uuid>) -> Result<Vec<Application>, StoreError> {
        let rows: Vec<ApplicationRow> = sqlx::query_as(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM applications
            WHERE ($1::uuid IS NULL OR job_id = $1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn delete_application(&self, id: Uuid) -> Result<bool, StoreError> {
        // Interviews go with it (ON DELETE CASCADE).
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_application_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, StoreError> {
        let row: Option<ApplicationRow> = sqlx::query_as(&format!(
            r#"
            UPDATE applications SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;
        convert_opt(row)
    }

    async fn get_match(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<MatchRecord>, StoreError> {
        let row: Option<MatchRow> = sqlx::query_as(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE candidate_id = $1 AND job_id = $2"
        ))
        .bind(candidate_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        convert_opt(row)
    }

    async fn upsert_match(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
        assessment: &MatchAssessment,
    ) -> Result<MatchRecord, StoreError> {
        let row: MatchRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO matches
                (candidate_id, job_id, match_score, reasoning, strengths, red_flags,
                 recommendation, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (candidate_id, job_id) DO UPDATE SET
                match_score = EXCLUDED.match_score,
                reasoning = EXCLUDED.reasoning,
                strengths = EXCLUDED.strengths,
                red_flags = EXCLUDED.red_flags,
                recommendation = EXCLUDED.recommendation,
                updated_at = NOW()
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(candidate_id)
        .bind(job_id)
        .bind(assessment.match_score)
        .bind(&assessment.reasoning)
        .bind(&assessment.strengths)
        .bind(&assessment.red_flags)
        .bind(assessment.recommendation.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn delete_matches_for_job(&self, job_id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM matches WHERE job_id = $1")
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_interview(&self, interview: NewInterview) -> Result<Interview, StoreError> {
        let row: InterviewRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO interviews
                (id, application_id, scheduled_at, duration_minutes, status, meeting_link, notes)
            VALUES ($1, $2, $3, $4, 'scheduled', $5, $6)
            RETURNING {INTERVIEW_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(interview.application_id)
        .bind(interview.scheduled_at)
        .bind(interview.duration_minutes)
        .bind(interview.meeting_link.as_deref())
        .bind(interview.notes.as_deref())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn get_interview(&self, id: Uuid) -> Result<Option<Interview>, StoreError> {
        let row: Option<InterviewRow> = sqlx::query_as(&format!(
            "SELECT {INTERVIEW_COLUMNS} FROM interviews WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        convert_opt(row)
    }

    async fn update_interview(
        &self,
        id: Uuid,
        outcome: InterviewOutcome,
    ) -> Result<Option<Interview>, StoreError> {
        let row: Option<InterviewRow> = sqlx::query_as(&format!(
            r#"
            UPDATE interviews SET
                status = $2,
                decision = COALESCE($3, decision),
                rating = COALESCE($4, rating),
                notes = COALESCE($5, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {INTERVIEW_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(outcome.status.as_str())
        .bind(outcome.decision.map(|d| d.as_str()))
        .bind(outcome.rating)
        .bind(outcome.notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        convert_opt(row)
    }

    async fn reschedule_interview(
        &self,
        id: Uuid,
        change: &InterviewReschedule,
    ) -> Result<Option<Interview>, StoreError> {
        let row: Option<InterviewRow> = sqlx::query_as(&format!(
            r#"
            UPDATE interviews SET
                scheduled_at = COALESCE($2, scheduled_at),
                duration_minutes = COALESCE($3, duration_minutes),
                meeting_link = COALESCE($4, meeting_link),
                notes = COALESCE($5, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {INTERVIEW_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(change.scheduled_at)
        .bind(change.duration_minutes)
        .bind(change.meeting_link.as_deref())
        .bind(change.notes.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        convert_opt(row)
    }

    async fn list_interviews(
        &self,
        status: Option<InterviewStatus>,
    ) -> Result<Vec<Interview>, StoreError> {
        let rows: Vec<InterviewRow> = sqlx::query_as(&format!(
            r#"
            SELECT {INTERVIEW_COLUMNS} FROM interviews
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY scheduled_at ASC
            "#
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn list_interviews_for_candidate(
        &self,
        candidate_id: Uuid,
    ) -> Result<Vec<Interview>, StoreError> {
        let rows: Vec<InterviewRow> = sqlx::query_as(&format!(
            r#"
            SELECT {INTERVIEW_COLUMNS} FROM interviews
            WHERE application_id IN (SELECT id FROM applications WHERE candidate_id = $1)
            ORDER BY scheduled_at ASC
            "#
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }

    async fn append_chat_message(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        sender: ChatSender,
        message: &str,
    ) -> Result<ChatMessageRow, StoreError> {
        let row: ChatRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO chat_messages (id, job_id, candidate_id, sender, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CHAT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(job_id)
        .bind(candidate_id)
        .bind(sender.as_str())
        .bind(message)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn chat_history(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessageRow>, StoreError> {
        let rows: Vec<ChatRow> = sqlx::query_as(&format!(
            r#"
            SELECT {CHAT_COLUMNS} FROM (
                SELECT {CHAT_COLUMNS} FROM chat_messages
                WHERE job_id = $1 AND candidate_id = $2
                ORDER BY created_at DESC
                LIMIT $3
            ) recent
            ORDER BY created_at ASC
            "#
        ))
        .bind(job_id)
        .bind(candidate_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        convert_all(rows)
    }
}
