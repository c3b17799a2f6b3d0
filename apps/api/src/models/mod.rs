pub mod application;
pub mod candidate;
pub mod chat;
pub mod interview;
pub mod job;
pub mod matching;

pub use application::{Application, ApplicationStatus, NewApplication};
pub use candidate::{Candidate, CandidateUpsert, Language};
pub use chat::{ChatMessageRow, ChatSender};
pub use interview::{
    Interview, InterviewDecision, InterviewReschedule, InterviewStatus, NewInterview,
};
pub use job::{Job, JobStatus, JobUpdate, NewJob, Requirements};
pub use matching::{MatchAssessment, MatchRecord, Recommendation};
