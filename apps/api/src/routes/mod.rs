pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::assistant::handlers as assistant;
use crate::candidates::handlers as candidates;
use crate::interviews::handlers as interviews;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_update_job)
                .delete(jobs::handle_close_job),
        )
        .route("/api/v1/jobs/:id/close", post(jobs::handle_close_job))
        .route(
            "/api/v1/jobs/:id/applications",
            get(jobs::handle_list_job_applications),
        )
        .route(
            "/api/v1/jobs/:id/candidates",
            get(matching::handle_rank_candidates),
        )
        // Candidates
        .route("/api/v1/candidates", get(candidates::handle_list_candidates))
        .route("/api/v1/candidates/:id", get(candidates::handle_get_candidate))
        .route("/api/v1/candidates/:id/jobs", get(matching::handle_rank_jobs))
        .route(
            "/api/v1/candidates/:id/match/:job_id",
            get(matching::handle_get_match),
        )
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications)
                .post(applications::handle_submit_application),
        )
        .route(
            "/api/v1/applications/:id",
            get(applications::handle_get_application)
                .delete(applications::handle_delete_application),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(applications::handle_update_status),
        )
        // Matching
        .route(
            "/api/v1/match/preferences",
            post(matching::handle_match_preferences),
        )
        // Interviews
        .route(
            "/api/v1/interviews",
            get(interviews::handle_list_interviews).post(interviews::handle_schedule_interview),
        )
        .route(
            "/api/v1/interviews/candidate/:candidate_id",
            get(interviews::handle_list_candidate_interviews),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interviews::handle_get_interview).put(interviews::handle_reschedule_interview),
        )
        .route(
            "/api/v1/interviews/:id/complete",
            post(interviews::handle_complete_interview),
        )
        .route(
            "/api/v1/interviews/:id/cancel",
            post(interviews::handle_cancel_interview),
        )
        // Assistant
        .route("/api/v1/chat", post(assistant::handle_chat))
        .route(
            "/api/v1/chat/:job_id/:candidate_id",
            get(assistant::handle_chat_history),
        )
        .route("/api/v1/translate", post(assistant::handle_translate))
        .with_state(state)
}
