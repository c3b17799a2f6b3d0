//! Bilingual candidate-facing helpers: per-job chat and en/es translation.

pub mod chat;
pub mod handlers;
pub mod lru;
pub mod prompts;
pub mod translate;

pub use chat::ChatAssistant;
pub use translate::Translator;
