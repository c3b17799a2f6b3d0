//! English/Spanish translation with an injected LRU memo.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use super::lru::LruCache;
use super::prompts::{TRANSLATE_PROMPT_TEMPLATE, TRANSLATE_SYSTEM};
use crate::llm_client::prompts::fill;
use crate::llm_client::{ChatMessage, CompletionClient, LlmError, SamplingConfig};
use crate::models::Language;

const TRANSLATE_SAMPLING: SamplingConfig = SamplingConfig {
    temperature: 0.3,
    max_tokens: 1000,
};

/// Cached translations keyed by (source text, target language).
pub type TranslationCache = LruCache<(String, Language), String>;

pub struct Translator {
    llm: Arc<dyn CompletionClient>,
    cache: Mutex<TranslationCache>,
}

impl Translator {
    pub fn new(llm: Arc<dyn CompletionClient>, cache: TranslationCache) -> Self {
        Self {
            llm,
            cache: Mutex::new(cache),
        }
    }

    pub async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<String, LlmError> {
        if source == target || text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let key = (text.to_string(), target);
        if let Some(hit) = self.cache.lock().await.get(&key) {
            debug!(language = target.as_str(), "Translation cache hit");
            return Ok(hit);
        }

        // The lock is not held across the LLM call; concurrent misses for the
        // same text both translate and the later write wins.
        let prompt = fill(
            TRANSLATE_PROMPT_TEMPLATE,
            &[
                ("source", source.display_name()),
                ("target", target.display_name()),
                ("text", text),
            ],
        );
        let translated = self
            .llm
            .complete(TRANSLATE_SYSTEM, &[ChatMessage::user(prompt)], &TRANSLATE_SAMPLING)
            .await?;

        let mut cache = self.cache.lock().await;
        cache.put(key, translated.clone());
        debug!(cached = cache.len(), "Translation stored");
        Ok(translated)
    }
}
