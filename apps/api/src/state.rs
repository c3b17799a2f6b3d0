use std::sync::Arc;

use crate::applications::ApplicationDeduplicator;
use crate::assistant::lru::LruCache;
use crate::assistant::{ChatAssistant, Translator};
use crate::llm_client::CompletionClient;
use crate::matching::orchestrator::MatchOrchestrator;
use crate::matching::qualitative::MatchScorer;
use crate::store::HiringStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HiringStore>,
    /// Ranking and on-demand match assessment.
    pub orchestrator: MatchOrchestrator,
    pub applications: ApplicationDeduplicator,
    pub chat: ChatAssistant,
    /// Holds the translation LRU; one per process.
    pub translator: Arc<Translator>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn HiringStore>,
        llm: Arc<dyn CompletionClient>,
        scorer: Arc<dyn MatchScorer>,
        match_max_concurrency: usize,
        translation_cache_capacity: usize,
    ) -> Self {
        Self {
            orchestrator: MatchOrchestrator::new(
                store.clone(),
                scorer.clone(),
                match_max_concurrency,
            ),
            applications: ApplicationDeduplicator::new(store.clone(), scorer),
            chat: ChatAssistant::new(store.clone(), llm.clone()),
            translator: Arc::new(Translator::new(
                llm,
                LruCache::new(translation_cache_capacity),
            )),
            store,
        }
    }
}
