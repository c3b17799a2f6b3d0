//! Job-scoped chat assistant.
//!
//! Answers candidate questions about one posting. When the candidate is known,
//! the last ten messages of the thread are sent as context and both turns of
//! the exchange are stored.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use super::prompts::{CHAT_SYSTEM_TEMPLATE, MATCH_CANDIDATE_LANGUAGE};
use crate::errors::AppError;
use crate::llm_client::prompts::{fill, list_or};
use crate::llm_client::{ChatMessage, CompletionClient, SamplingConfig};
use crate::models::{ChatMessageRow, ChatSender, Job, Language};
use crate::store::HiringStore;

const HISTORY_LIMIT: i64 = 10;

const CHAT_SAMPLING: SamplingConfig = SamplingConfig {
    temperature: 0.5,
    max_tokens: 500,
};

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub job_title: String,
}

#[derive(Clone)]
pub struct ChatAssistant {
    store: Arc<dyn HiringStore>,
    llm: Arc<dyn CompletionClient>,
}

impl ChatAssistant {
    pub fn new(store: Arc<dyn HiringStore>, llm: Arc<dyn CompletionClient>) -> Self {
        Self { store, llm }
    }

    pub async fn reply(
        &self,
        job_id: Uuid,
        candidate_id: Option<Uuid>,
        message: &str,
        language: Option<Language>,
    ) -> Result<ChatReply, AppError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AppError::Validation("message is required".to_string()));
        }

        let job = self
            .store
            .get_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

        let history = match candidate_id {
            Some(candidate_id) => {
                if self.store.get_candidate(candidate_id).await?.is_none() {
                    return Err(AppError::NotFound(format!(
                        "Candidate {candidate_id} not found"
                    )));
                }
                self.store
                    .chat_history(job_id, candidate_id, Some(HISTORY_LIMIT))
                    .await?
            }
            None => Vec::new(),
        };

        let system = system_prompt(&job, language);
        let messages = conversation(&history, message);
        let response = self
            .llm
            .complete(&system, &messages, &CHAT_SAMPLING)
            .await?;

        if let Some(candidate_id) = candidate_id {
            self.persist_turn(job_id, candidate_id, ChatSender::Candidate, message)
                .await;
            self.persist_turn(job_id, candidate_id, ChatSender::Ai, &response)
                .await;
        }

        Ok(ChatReply {
            response,
            job_title: job.title,
        })
    }

    pub async fn history(
        &self,
        job_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Vec<ChatMessageRow>, AppError> {
        Ok(self.store.chat_history(job_id, candidate_id, None).await?)
    }

    async fn persist_turn(&self, job_id: Uuid, candidate_id: Uuid, sender: ChatSender, text: &str) {
        if let Err(e) = self
            .store
            .append_chat_message(job_id, candidate_id, sender, text)
            .await
        {
            warn!(%job_id, %candidate_id, sender = sender.as_str(), "Could not store chat message: {e}");
        }
    }
}

fn system_prompt(job: &Job, language: Option<Language>) -> String {
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
    let language_rule = match language {
        Some(lang) => lang.display_name().to_string(),
        None => MATCH_CANDIDATE_LANGUAGE.to_string(),
    };

    fill(
        CHAT_SYSTEM_TEMPLATE,
        &[
            ("title", job.title.as_str()),
            ("company", job.company.as_str()),
            ("pay", pay.as_str()),
            ("location", job.location.as_deref().unwrap_or("Not specified")),
            ("schedule", schedule),
            ("requirements", requirements.as_str()),
            ("description", job.description.as_deref().unwrap_or("Not provided")),
            ("language_rule", language_rule.as_str()),
        ],
    )
}

/// Stored history plus the new message, shaped for the Messages API: starts
/// with a user turn and alternates roles. Consecutive turns from the same
/// side are merged.
fn conversation(history: &[ChatMessageRow], message: &str) -> Vec<ChatMessage> {
    let turns = history
        .iter()
        .map(|row| match row.sender {
            ChatSender::Candidate => ChatMessage::user(row.message.clone()),
            ChatSender::Ai => ChatMessage::assistant(row.message.clone()),
        })
        .chain(std::iter::once(ChatMessage::user(message)));

    let mut out: Vec<ChatMessage> = Vec::new();
    for turn in turns {
        if out.is_empty() && turn.role != "user" {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.role == turn.role => {
                last.content.push_str("\n\n");
                last.content.push_str(&turn.content);
            }
            _ => out.push(turn),
        }
    }
    out
}
