//! Interview scheduling and outcomes.
//!
//! Interviews drive the application status: scheduling moves it to
//! `interview_scheduled`, and a decision moves it to `hired`, `interviewed`
//! or `rejected`.

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    Application, ApplicationStatus, Interview, InterviewDecision, InterviewReschedule,
    InterviewStatus, NewInterview,
};
use crate::store::{HiringStore, InterviewOutcome};

pub mod handlers;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteInterviewRequest {
    pub decision: Option<InterviewDecision>,
    /// 1–5
    pub rating: Option<i32>,
    pub notes: Option<String>,
    /// Candidate did not attend. No decision is recorded.
    #[serde(default)]
    pub no_show: bool,
}

pub async fn schedule_interview(
    store: &dyn HiringStore,
    request: NewInterview,
) -> Result<Interview, AppError> {
    if request.duration_minutes <= 0 {
        return Err(AppError::Validation(
            "duration_minutes must be positive".to_string(),
        ));
    }

    let application = require_application(store, request.application_id).await?;
    check_transition(&application, ApplicationStatus::InterviewScheduled)?;

    let interview = store.insert_interview(request).await?;
    move_application(store, &application, ApplicationStatus::InterviewScheduled).await?;

    info!(
        interview_id = %interview.id,
        application_id = %application.id,
        scheduled_at = %interview.scheduled_at,
        "Interview scheduled"
    );
    Ok(interview)
}

pub async fn complete_interview(
    store: &dyn HiringStore,
    id: Uuid,
    request: CompleteInterviewRequest,
) -> Result<Interview, AppError> {
    if matches!(request.rating, Some(r) if !(1..=5).contains(&r)) {
        return Err(AppError::Validation("rating must be between 1 and 5".to_string()));
    }
    if request.no_show && request.decision.is_some() {
        return Err(AppError::Validation(
            "a no-show cannot carry a decision".to_string(),
        ));
    }

    let interview = require_scheduled(store, id).await?;
    let application = require_application(store, interview.application_id).await?;

    // A no-show leaves the application where it is.
    let next = if request.no_show {
        None
    } else {
        Some(
            request
                .decision
                .map(|d| d.application_status())
                .unwrap_or(ApplicationStatus::Interviewed),
        )
    };
    if let Some(next) = next {
        check_transition(&application, next)?;
    }

    let outcome = InterviewOutcome {
        status: if request.no_show {
            InterviewStatus::NoShow
        } else {
            InterviewStatus::Completed
        },
        decision: request.decision,
        rating: request.rating,
        notes: request.notes,
    };
    let updated = store
        .update_interview(id, outcome)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;

    if let Some(next) = next {
        move_application(store, &application, next).await?;
    }

    info!(
        interview_id = %id,
        status = updated.status.as_str(),
        decision = ?updated.decision,
        "Interview completed"
    );
    Ok(updated)
}

/// Moves an open interview. Completed, cancelled and no-show interviews are
/// final.
pub async fn reschedule_interview(
    store: &dyn HiringStore,
    id: Uuid,
    change: InterviewReschedule,
) -> Result<Interview, AppError> {
    if matches!(change.duration_minutes, Some(d) if d <= 0) {
        return Err(AppError::Validation(
            "duration_minutes must be positive".to_string(),
        ));
    }

    require_scheduled(store, id).await?;
    let updated = store
        .reschedule_interview(id, &change)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;

    info!(
        interview_id = %id,
        scheduled_at = %updated.scheduled_at,
        "Interview rescheduled"
    );
    Ok(updated)
}

pub async fn cancel_interview(store: &dyn HiringStore, id: Uuid) -> Result<Interview, AppError> {
    require_scheduled(store, id).await?;
    let outcome = InterviewOutcome {
        status: InterviewStatus::Cancelled,
        decision: None,
        rating: None,
        notes: None,
    };
    let updated = store
        .update_interview(id, outcome)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    info!(interview_id = %id, "Interview cancelled");
    Ok(updated)
}

async fn require_application(store: &dyn HiringStore, id: Uuid) -> Result<Application, AppError> {
    store
        .get_application(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
}

async fn require_scheduled(store: &dyn HiringStore, id: Uuid) -> Result<Interview, AppError> {
    let interview = store
        .get_interview(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    if interview.status != InterviewStatus::Scheduled {
        return Err(AppError::Validation(format!(
            "Interview {id} is already {}",
            interview.status.as_str()
        )));
    }
    Ok(interview)
}

/// Runs before any interview row is written.
fn check_transition(application: &Application, next: ApplicationStatus) -> Result<(), AppError> {
    if !application.status.can_transition_to(next) {
        return Err(AppError::Validation(format!(
            "Cannot move application {} from '{}' to '{}'",
            application.id,
            application.status.as_str(),
            next.as_str()
        )));
    }
    Ok(())
}

async fn move_application(
    store: &dyn HiringStore,
    application: &Application,
    next: ApplicationStatus,
) -> Result<(), AppError> {
    store.update_application_status(application.id, next).await?;
    Ok(())
}
