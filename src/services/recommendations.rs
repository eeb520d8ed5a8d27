use std::sync::Arc;

use crate::{
    models::{Rating, RecommendationSet},
    services::{
        aggregation::ScoreAggregator,
        bucketing::{bucketize, top_picks, DEFAULT_MAX_PER_GENRE, TOP_PICKS_LIMIT},
        cold_start::trending_recommendations,
        events::{RecommendationEvent, RecommendationObserver, TracingObserver},
        favorites::select_favorites,
        graph::MediaGraph,
        similarity::fetch_similar,
    },
};

/// Generates genre-bucketed recommendations from a user's rating history
///
/// Favorites are looked up in the media graph one at a time. Their neighbours are scored,
/// merged across seeds and split into a global top list plus one ranked list per genre.
/// Users without history get trending media instead. Graph failures never surface to the
/// caller: a failed seed contributes nothing and a failed trending query falls back to a
/// static list.
#[derive(Clone)]
pub struct RecommendationEngine {
    graph: Arc<dyn MediaGraph>,
    observer: Arc<dyn RecommendationObserver>,
    max_per_genre: usize,
}

impl RecommendationEngine {
    pub fn new(graph: Arc<dyn MediaGraph>) -> Self {
        Self {
            graph,
            observer: Arc::new(TracingObserver),
            max_per_genre: DEFAULT_MAX_PER_GENRE,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RecommendationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_max_per_genre(mut self, max_per_genre: usize) -> Self {
        self.max_per_genre = max_per_genre;
        self
    }

    pub fn max_per_genre(&self) -> usize {
        self.max_per_genre
    }

    pub async fn get_recommendations(&self, user_ratings: &[Rating]) -> RecommendationSet {
        self.get_recommendations_with_cap(user_ratings, self.max_per_genre)
            .await
    }

    pub async fn get_recommendations_with_cap(
        &self,
        user_ratings: &[Rating],
        max_per_genre: usize,
    ) -> RecommendationSet {
        let observer = self.observer.as_ref();

        if user_ratings.is_empty() {
            observer.on_event(&RecommendationEvent::ColdStart);
            return trending_recommendations(self.graph.as_ref(), max_per_genre, observer).await;
        }

        let favorites = select_favorites(user_ratings);
        observer.on_event(&RecommendationEvent::FavoritesSelected {
            count: favorites.len(),
        });

        let mut aggregator = ScoreAggregator::new(user_ratings);
        for seed in &favorites {
            let candidates = fetch_similar(self.graph.as_ref(), seed, observer).await;
            aggregator.merge(candidates);
        }
        let candidates = aggregator.finish();
        observer.on_event(&RecommendationEvent::CandidatesAggregated {
            unique: candidates.len(),
        });

        let genres = bucketize(&candidates, max_per_genre);
        observer.on_event(&RecommendationEvent::GenresFormed {
            genres: genres.len(),
        });

        RecommendationSet::personalized(top_picks(&candidates, TOP_PICKS_LIMIT), genres)
    }
}
