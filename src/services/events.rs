use std::sync::Mutex;

use crate::models::MediaId;

/// Discrete progress and outcome events emitted while building recommendations
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationEvent {
    /// Empty history, serving trending content instead
    ColdStart,
    FavoritesSelected { count: usize },
    SeedFetched { seed_id: MediaId, candidates: usize },
    SeedFetchFailed { seed_id: MediaId, error: String },
    CandidatesAggregated { unique: usize },
    GenresFormed { genres: usize },
    TrendingFetched { items: usize },
    TrendingFetchFailed { error: String },
    /// Static trending list returned because the graph was unreachable
    FallbackUsed,
}

/// Receives events from the recommendation engine
///
/// Injected so the engine itself never writes to a console or log sink.
pub trait RecommendationObserver: Send + Sync {
    fn on_event(&self, event: &RecommendationEvent);
}

/// Default observer: forwards every event to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RecommendationObserver for TracingObserver {
    fn on_event(&self, event: &RecommendationEvent) {
        match event {
            RecommendationEvent::ColdStart => {
                tracing::info!("No rating history, serving trending recommendations")
            }
            RecommendationEvent::FavoritesSelected { count } => {
                tracing::info!(favorites = count, "Finding recommendations from favorites")
            }
            RecommendationEvent::SeedFetched {
                seed_id,
                candidates,
            } => tracing::debug!(seed_id, candidates, "Similar media fetched"),
            RecommendationEvent::SeedFetchFailed { seed_id, error } => {
                tracing::warn!(seed_id, error = %error, "Error fetching similar media")
            }
            RecommendationEvent::CandidatesAggregated { unique } => {
                tracing::info!(unique, "Found unique recommendations")
            }
            RecommendationEvent::GenresFormed { genres } => {
                tracing::info!(genres, "Organized recommendations into genres")
            }
            RecommendationEvent::TrendingFetched { items } => {
                tracing::info!(items, "Trending media fetched")
            }
            RecommendationEvent::TrendingFetchFailed { error } => {
                tracing::warn!(error = %error, "Error fetching trending media")
            }
            RecommendationEvent::FallbackUsed => {
                tracing::warn!("Serving static trending fallback")
            }
        }
    }
}

/// Keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<RecommendationEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<RecommendationEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl RecommendationObserver for RecordingObserver {
    fn on_event(&self, event: &RecommendationEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}
