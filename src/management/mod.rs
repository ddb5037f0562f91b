mod cache;
mod orchestrator;

pub use cache::CachedArtists;
pub use cache::RangeCache;
pub use orchestrator::FailurePolicy;
pub use orchestrator::LoadMode;
pub use orchestrator::LoadOptions;
pub use orchestrator::LoadOrchestrator;
pub use orchestrator::LoadOutcome;
pub use orchestrator::Phase;
pub use orchestrator::SessionStart;
pub use orchestrator::Snapshot;
