//! Candidate–job matching.
//!
//! - `rule_based`: deterministic preference scoring (no I/O)
//! - `qualitative`: LLM assessment behind the `MatchScorer` trait
//! - `cache`: one stored assessment per (candidate, job)
//! - `orchestrator`: bounded-concurrency ranking in both directions

pub mod cache;
pub mod handlers;
pub mod normalize;
pub mod orchestrator;
pub mod prompts;
pub mod qualitative;
pub mod rule_based;
