use crate::{
    models::{Candidate, CandidateMap, MediaSummary, Rating, RelatedMedia},
    services::{
        events::{RecommendationEvent, RecommendationObserver},
        graph::MediaGraph,
    },
};

/// Multiplier applied to the seed rating for sequels, prequels and other continuations
pub const CONTINUATION_BOOST: f64 = 1.5;

/// Score of a recommendation edge
///
/// The user's rating of the seed dominates; graph popularity and average score add a
/// small bonus on top.
pub fn recommendation_score(seed_rating: f64, media: &MediaSummary) -> f64 {
    seed_rating + media.popularity / 10_000.0 + media.average_score / 100.0
}

/// Score of a continuation relation, independent of the related media's own stats
pub fn continuation_score(seed_rating: f64) -> f64 {
    seed_rating * CONTINUATION_BOOST
}

/// Turns one seed's graph neighbourhood into scored candidates
///
/// Recommendations are applied first and relations second, so a media id present in both
/// ends up with the relation score. Non-continuation relations are ignored.
pub fn score_related(seed: &Rating, related: RelatedMedia) -> CandidateMap {
    let mut candidates = CandidateMap::new();

    for media in related.recommendations {
        candidates.insert(Candidate {
            id: media.id,
            score: recommendation_score(seed.rating, &media),
            genres: media.genres,
        });
    }

    for edge in related.relations {
        if !edge.relation_type.is_continuation() {
            continue;
        }
        candidates.insert(Candidate {
            id: edge.media.id,
            score: continuation_score(seed.rating),
            genres: edge.media.genres,
        });
    }

    candidates
}

/// Fetches and scores the candidates for one seed
///
/// A failed fetch is reported to the observer and yields an empty map.
pub async fn fetch_similar(
    graph: &dyn MediaGraph,
    seed: &Rating,
    observer: &dyn RecommendationObserver,
) -> CandidateMap {
    match graph.related_to(seed.item_id).await {
        Ok(related) => {
            let candidates = score_related(seed, related);
            observer.on_event(&RecommendationEvent::SeedFetched {
                seed_id: seed.item_id,
                candidates: candidates.len(),
            });
            candidates
        }
        Err(e) => {
            observer.on_event(&RecommendationEvent::SeedFetchFailed {
                seed_id: seed.item_id,
                error: e.to_string(),
            });
            CandidateMap::new()
        }
    }
}
