use crate::models::Rating;

/// Ratings at or above this value count as favorites
pub const FAVORITE_THRESHOLD: f64 = 7.0;

/// Number of top-rated entries used when nothing reaches the threshold
pub const FALLBACK_FAVORITES: usize = 5;

/// Upper bound on seeds queried per request
pub const MAX_SEEDS: usize = 8;

/// Reduces a rating history to the seeds used for similarity search
///
/// Every rating at or above [`FAVORITE_THRESHOLD`] is kept in history order. When none
/// qualifies, the [`FALLBACK_FAVORITES`] highest ratings are used instead, best first, with
/// ties kept in history order. The result never exceeds [`MAX_SEEDS`] entries.
pub fn select_favorites(ratings: &[Rating]) -> Vec<Rating> {
    let mut favorites: Vec<Rating> = ratings
        .iter()
        .filter(|r| r.rating >= FAVORITE_THRESHOLD)
        .copied()
        .collect();

    if favorites.is_empty() {
        favorites = ratings.to_vec();
        favorites.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        favorites.truncate(FALLBACK_FAVORITES);
    }

    favorites.truncate(MAX_SEEDS);
    favorites
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(pairs: &[(u64, f64)]) -> Vec<Rating> {
        pairs.iter().map(|&(id, r)| Rating::new(id, r)).collect()
    }

    #[test]
    fn test_threshold_keeps_history_order() {
        let history = ratings(&[(1, 9.0), (2, 5.0), (3, 8.0)]);
        assert_eq!(select_favorites(&history), ratings(&[(1, 9.0), (3, 8.0)]));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let history = ratings(&[(1, 7.0), (2, 6.9)]);
        assert_eq!(select_favorites(&history), ratings(&[(1, 7.0)]));
    }

    #[test]
    fn test_fallback_takes_five_highest_descending() {
        let history = ratings(&[(1, 3.0), (2, 6.0), (3, 1.0), (4, 5.0), (5, 2.0), (6, 4.0)]);
        assert_eq!(
            select_favorites(&history),
            ratings(&[(2, 6.0), (4, 5.0), (6, 4.0), (1, 3.0), (5, 2.0)])
        );
    }

    #[test]
    fn test_fallback_ties_keep_history_order() {
        let history = ratings(&[(1, 5.0), (2, 6.0), (3, 5.0)]);
        assert_eq!(
            select_favorites(&history),
            ratings(&[(2, 6.0), (1, 5.0), (3, 5.0)])
        );
    }

    #[test]
    fn test_caps_at_eight_seeds() {
        let history: Vec<Rating> = (1..=12).map(|id| Rating::new(id, 9.0)).collect();
        let favorites = select_favorites(&history);

        assert_eq!(favorites.len(), MAX_SEEDS);
        assert_eq!(favorites.last().unwrap().item_id, 8);
    }

    #[test]
    fn test_out_of_range_ratings_are_accepted() {
        let history = ratings(&[(1, 42.0), (2, -3.0)]);
        assert_eq!(select_favorites(&history), ratings(&[(1, 42.0)]));
    }

    #[test]
    fn test_empty_history() {
        assert!(select_favorites(&[]).is_empty());
    }
}
