use std::collections::HashMap;

use crate::models::{CandidateMap, GenreBucket, MediaId};

/// Genre label for media the graph returned without genres
pub const OTHER_GENRE: &str = "Other";

pub const DEFAULT_MAX_PER_GENRE: usize = 15;

/// Length of the global top list
pub const TOP_PICKS_LIMIT: usize = 20;

/// Genre groups in first-encountered order
#[derive(Debug)]
pub(crate) struct GenreGroups<T> {
    groups: Vec<(String, Vec<T>)>,
    index: HashMap<String, usize>,
}

impl<T> GenreGroups<T> {
    pub(crate) fn new() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Adds `item` under every genre in `genres`, or under [`OTHER_GENRE`] if there are none
    pub(crate) fn add(&mut self, genres: &[String], item: T)
    where
        T: Clone,
    {
        if genres.is_empty() {
            self.push(OTHER_GENRE, item);
            return;
        }
        for genre in genres {
            self.push(genre, item.clone());
        }
    }

    fn push(&mut self, genre: &str, item: T) {
        match self.index.get(genre) {
            Some(&position) => self.groups[position].1.push(item),
            None => {
                self.index.insert(genre.to_string(), self.groups.len());
                self.groups.push((genre.to_string(), vec![item]));
            }
        }
    }

    pub(crate) fn into_groups(self) -> Vec<(String, Vec<T>)> {
        self.groups
    }
}

/// Groups candidates by genre into capped, score-ranked buckets
///
/// Buckets are ordered largest first. Equal scores and equal bucket sizes keep
/// first-encountered order.
pub fn bucketize(candidates: &CandidateMap, max_per_genre: usize) -> Vec<GenreBucket> {
    let mut groups = GenreGroups::new();
    for candidate in candidates {
        groups.add(&candidate.genres, (candidate.id, candidate.score));
    }

    let mut buckets: Vec<GenreBucket> = groups
        .into_groups()
        .into_iter()
        .filter_map(|(genre, mut entries)| {
            entries.sort_by(|a, b| b.1.total_cmp(&a.1));
            entries.truncate(max_per_genre);
            if entries.is_empty() {
                return None;
            }
            Some(GenreBucket::new(
                genre,
                entries.into_iter().map(|(id, _)| id).collect(),
            ))
        })
        .collect();

    buckets.sort_by(|a, b| b.ids.len().cmp(&a.ids.len()));
    buckets
}

/// Highest-scoring candidates across every genre, before any capping
pub fn top_picks(candidates: &CandidateMap, limit: usize) -> Vec<MediaId> {
    let mut ranked: Vec<(MediaId, f64)> = candidates.iter().map(|c| (c.id, c.score)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().take(limit).map(|(id, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;

    fn candidates(entries: &[(MediaId, f64, &[&str])]) -> CandidateMap {
        let mut map = CandidateMap::new();
        for &(id, score, genres) in entries {
            map.insert(Candidate {
                id,
                score,
                genres: genres.iter().map(|g| g.to_string()).collect(),
            });
        }
        map
    }

    #[test]
    fn test_buckets_rank_by_score() {
        let map = candidates(&[
            (1, 5.0, &["Action"]),
            (2, 9.0, &["Action", "Drama"]),
            (3, 7.0, &["Action"]),
        ]);

        let buckets = bucketize(&map, DEFAULT_MAX_PER_GENRE);

        assert_eq!(buckets[0], GenreBucket::new("Action", vec![2, 3, 1]));
        assert_eq!(buckets[1], GenreBucket::new("Drama", vec![2]));
    }

    #[test]
    fn test_untagged_candidates_go_to_other() {
        let map = candidates(&[(1, 5.0, &[])]);
        assert_eq!(bucketize(&map, 15), vec![GenreBucket::new(OTHER_GENRE, vec![1])]);
    }

    #[test]
    fn test_buckets_are_capped() {
        let entries: Vec<(MediaId, f64, &[&str])> =
            (1..=30).map(|id| (id, id as f64, &["Action"][..])).collect();
        let buckets = bucketize(&candidates(&entries), 15);

        assert_eq!(buckets[0].ids.len(), 15);
        assert_eq!(buckets[0].ids[0], 30);
        assert_eq!(buckets[0].ids[14], 16);
    }

    #[test]
    fn test_larger_buckets_come_first() {
        let mut entries: Vec<(MediaId, f64, &[&str])> = (1..=3).map(|id| (id, 9.0, &["Romance"][..])).collect();
        entries.extend((10..20).map(|id| (id, 1.0, &["Sci-Fi"][..])));

        let buckets = bucketize(&candidates(&entries), 15);

        assert_eq!(buckets[0].label, "Sci-Fi");
        assert_eq!(buckets[0].ids.len(), 10);
        assert_eq!(buckets[1].label, "Romance");
    }

    #[test]
    fn test_ties_keep_first_encountered_order() {
        let map = candidates(&[
            (1, 4.0, &["Mystery"]),
            (2, 4.0, &["Horror"]),
            (3, 4.0, &["Mystery"]),
            (4, 4.0, &["Horror"]),
        ]);

        let buckets = bucketize(&map, 15);

        assert_eq!(buckets[0], GenreBucket::new("Mystery", vec![1, 3]));
        assert_eq!(buckets[1], GenreBucket::new("Horror", vec![2, 4]));
    }

    #[test]
    fn test_zero_cap_drops_every_bucket() {
        let map = candidates(&[(1, 4.0, &["Action"])]);
        assert!(bucketize(&map, 0).is_empty());
    }

    #[test]
    fn test_top_picks_ranks_full_set() {
        let entries: Vec<(MediaId, f64, &[&str])> =
            (1..=25).map(|id| (id, id as f64, &["Action"][..])).collect();
        let picks = top_picks(&candidates(&entries), TOP_PICKS_LIMIT);

        assert_eq!(picks.len(), 20);
        assert_eq!(picks[0], 25);
        assert_eq!(picks[19], 6);
    }

    #[test]
    fn test_top_picks_ignores_genre_cap() {
        let entries: Vec<(MediaId, f64, &[&str])> =
            (1..=5).map(|id| (id, 1.0, &["Action"][..])).collect();
        let map = candidates(&entries);

        assert_eq!(bucketize(&map, 2)[0].ids.len(), 2);
        assert_eq!(top_picks(&map, TOP_PICKS_LIMIT), vec![1, 2, 3, 4, 5]);
    }
}
