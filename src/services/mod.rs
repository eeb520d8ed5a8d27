pub mod aggregation;
pub mod bucketing;
pub mod cold_start;
pub mod events;
pub mod favorites;
pub mod graph;
pub mod recommendations;
pub mod similarity;

pub use events::{RecommendationEvent, RecommendationObserver, RecordingObserver, TracingObserver};
pub use graph::{AniListClient, MediaGraph};
pub use recommendations::RecommendationEngine;
