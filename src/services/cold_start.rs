use crate::{
    models::{GenreBucket, MediaId, MediaSummary, RecommendationSet},
    services::{
        bucketing::GenreGroups,
        events::{RecommendationEvent, RecommendationObserver},
        graph::MediaGraph,
    },
};

/// Trending entries requested for users without history
pub const TRENDING_PAGE_SIZE: u32 = 50;

/// Label of the static list served when the graph is unreachable
pub const FALLBACK_LABEL: &str = "Trending Now";

/// Known-good media served when the trending query fails
pub const FALLBACK_IDS: [MediaId; 10] = [
    5114, 16498, 11061, 1535, 9253, 30276, 38000, 40748, 28851, 32281,
];

/// Recommendations for a user with no rating history
///
/// Trending media are grouped by genre in trending order, each bucket capped at
/// `max_per_genre`. This is the same cap the personalized path applies, not a fixed 15;
/// with the default cap the two agree. There is no scoring and no top-picks section. Any
/// failure of the trending query yields [`fallback`].
pub async fn trending_recommendations(
    graph: &dyn MediaGraph,
    max_per_genre: usize,
    observer: &dyn RecommendationObserver,
) -> RecommendationSet {
    match graph.trending_page(1, TRENDING_PAGE_SIZE).await {
        Ok(trending) => {
            observer.on_event(&RecommendationEvent::TrendingFetched {
                items: trending.len(),
            });
            RecommendationSet::new(bucket_trending(trending, max_per_genre))
        }
        Err(e) => {
            observer.on_event(&RecommendationEvent::TrendingFetchFailed {
                error: e.to_string(),
            });
            observer.on_event(&RecommendationEvent::FallbackUsed);
            fallback()
        }
    }
}

/// Groups trending media by genre, keeping trending order inside each bucket
pub fn bucket_trending(trending: Vec<MediaSummary>, max_per_genre: usize) -> Vec<GenreBucket> {
    let mut groups = GenreGroups::new();
    for media in &trending {
        groups.add(&media.genres, media.id);
    }

    groups
        .into_groups()
        .into_iter()
        .filter_map(|(genre, mut ids)| {
            ids.truncate(max_per_genre);
            if ids.is_empty() {
                return None;
            }
            Some(GenreBucket::new(genre, ids))
        })
        .collect()
}

/// The static "Trending Now" set
pub fn fallback() -> RecommendationSet {
    RecommendationSet::new(vec![GenreBucket::new(
        FALLBACK_LABEL,
        FALLBACK_IDS.to_vec(),
    )])
}
