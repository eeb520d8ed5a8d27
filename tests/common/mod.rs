#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use anime_recs_api::{
    error::{AppError, AppResult},
    models::{MediaId, MediaSummary, RelatedEdge, RelatedMedia, RelationType},
    services::MediaGraph,
};

/// Deterministic in-memory media graph
///
/// Seeds without a fixture fail like an unreachable API, and so does the trending query
/// when no trending page was configured.
#[derive(Default)]
pub struct FixtureGraph {
    related: HashMap<MediaId, RelatedMedia>,
    trending: Option<Vec<MediaSummary>>,
    queried: Mutex<Vec<MediaId>>,
}

impl FixtureGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_related(mut self, seed_id: MediaId, related: RelatedMedia) -> Self {
        self.related.insert(seed_id, related);
        self
    }

    pub fn with_trending(mut self, trending: Vec<MediaSummary>) -> Self {
        self.trending = Some(trending);
        self
    }

    /// Seeds queried so far, in call order
    pub fn queried(&self) -> Vec<MediaId> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MediaGraph for FixtureGraph {
    async fn related_to(&self, seed_id: MediaId) -> AppResult<RelatedMedia> {
        self.queried.lock().unwrap().push(seed_id);
        self.related
            .get(&seed_id)
            .cloned()
            .ok_or_else(|| AppError::ExternalApi(format!("no fixture for {}", seed_id)))
    }

    async fn trending_page(&self, _page: u32, _per_page: u32) -> AppResult<Vec<MediaSummary>> {
        self.trending
            .clone()
            .ok_or_else(|| AppError::MalformedResponse("response has no Page media".to_string()))
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

pub fn media(id: MediaId, average_score: f64, popularity: f64, genres: &[&str]) -> MediaSummary {
    MediaSummary {
        id,
        average_score,
        popularity,
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

pub fn related(recommendations: Vec<MediaSummary>) -> RelatedMedia {
    RelatedMedia {
        recommendations,
        relations: Vec::new(),
    }
}

pub fn continuation(relation_type: RelationType, media: MediaSummary) -> RelatedEdge {
    RelatedEdge {
        relation_type,
        media,
    }
}
