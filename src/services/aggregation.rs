use std::collections::HashSet;

use crate::models::{CandidateMap, MediaId, Rating};

/// Merges per-seed candidate maps into one map for a single request
///
/// Owns the merged map until [`ScoreAggregator::finish`]. Media the user already rated are
/// dropped; a media id reached from several seeds accumulates the sum of its scores and keeps
/// the genres it was first seen with.
#[derive(Debug, Default)]
pub struct ScoreAggregator {
    rated: HashSet<MediaId>,
    merged: CandidateMap,
}

impl ScoreAggregator {
    pub fn new(history: &[Rating]) -> Self {
        Self {
            rated: history.iter().map(|r| r.item_id).collect(),
            merged: CandidateMap::new(),
        }
    }

    pub fn merge(&mut self, seed_candidates: CandidateMap) {
        for candidate in seed_candidates {
            if self.rated.contains(&candidate.id) {
                continue;
            }
            match self.merged.get_mut(candidate.id) {
                Some(existing) => existing.score += candidate.score,
                None => self.merged.insert(candidate),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.merged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    pub fn finish(self) -> CandidateMap {
        self.merged
    }
}

/// Merges seed maps in order, excluding anything in `history`
pub fn aggregate(
    seed_maps: impl IntoIterator<Item = CandidateMap>,
    history: &[Rating],
) -> CandidateMap {
    let mut aggregator = ScoreAggregator::new(history);
    for seed_map in seed_maps {
        aggregator.merge(seed_map);
    }
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;

    fn seed_map(entries: &[(MediaId, f64, &str)]) -> CandidateMap {
        let mut map = CandidateMap::new();
        for &(id, score, genre) in entries {
            map.insert(Candidate {
                id,
                score,
                genres: vec![genre.to_string()],
            });
        }
        map
    }

    #[test]
    fn test_overlapping_candidates_sum_scores() {
        let merged = aggregate(
            vec![
                seed_map(&[(100, 9.5, "Action")]),
                seed_map(&[(100, 8.25, "Drama"), (200, 7.0, "Comedy")]),
            ],
            &[],
        );

        let overlap = merged.get(100).unwrap();
        assert_eq!(overlap.score, 17.75);
        assert_eq!(overlap.genres, vec!["Action"]);
        assert_eq!(merged.ids().collect::<Vec<_>>(), vec![100, 200]);
    }

    #[test]
    fn test_rated_media_are_excluded() {
        let history = vec![Rating::new(100, 3.0)];
        let merged = aggregate(
            vec![seed_map(&[(100, 9.0, "Action"), (300, 8.0, "Action")])],
            &history,
        );

        assert!(!merged.contains(100));
        assert!(merged.contains(300));
    }

    #[test]
    fn test_incremental_merge() {
        let mut aggregator = ScoreAggregator::new(&[Rating::new(1, 9.0)]);
        assert!(aggregator.is_empty());

        aggregator.merge(seed_map(&[(2, 1.0, "Action")]));
        aggregator.merge(CandidateMap::new());
        aggregator.merge(seed_map(&[(2, 2.0, "Action"), (1, 5.0, "Action")]));

        assert_eq!(aggregator.len(), 1);
        assert_eq!(aggregator.finish().get(2).unwrap().score, 3.0);
    }

    #[test]
    fn test_merge_is_order_independent_for_scores() {
        let a = seed_map(&[(1, 2.0, "Action"), (2, 4.0, "Drama")]);
        let b = seed_map(&[(2, 1.5, "Drama"), (3, 6.0, "Comedy")]);

        let forward = aggregate(vec![a.clone(), b.clone()], &[]);
        let backward = aggregate(vec![b, a], &[]);

        for id in [1, 2, 3] {
            assert_eq!(
                forward.get(id).unwrap().score,
                backward.get(id).unwrap().score
            );
        }
    }
}
