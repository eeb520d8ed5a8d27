/// Media graph abstraction
///
/// The engine only needs two queries from the graph: the neighbourhood of one seed
/// (recommendations plus relations) and a page of trending media. Keeping them behind a
/// trait lets tests drive the engine with fixed fixtures.
use crate::{
    error::AppResult,
    models::{MediaId, MediaSummary, RelatedMedia},
};

pub mod anilist;

pub use anilist::AniListClient;

/// Trait for media graph backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MediaGraph: Send + Sync {
    /// Fetch the recommendation and relation edges of a seed
    ///
    /// Returns an error for transport failures and for responses without the seed's media
    /// object. Entries without an id are already dropped from the result.
    async fn related_to(&self, seed_id: MediaId) -> AppResult<RelatedMedia>;

    /// Fetch one page of finished media sorted by trending rank
    async fn trending_page(&self, page: u32, per_page: u32) -> AppResult<Vec<MediaSummary>>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
