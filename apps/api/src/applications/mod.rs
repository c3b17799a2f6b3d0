pub mod dedup;
pub mod handlers;

pub use dedup::ApplicationDeduplicator;
