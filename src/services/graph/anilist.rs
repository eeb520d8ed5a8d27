/// AniList GraphQL backend
///
/// Both queries go to the same endpoint as a JSON `{query, variables}` POST. A response is
/// only usable when it carries `data` with a non-null `Media` / `Page` object; anything else
/// is reported as an error for that call alone.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{
        anilist::{GraphQlResponse, MediaData, PageData},
        MediaId, MediaSummary, RelatedMedia,
    },
    services::graph::MediaGraph,
};

/// Recommendation edges requested per seed
pub const RECOMMENDATIONS_PER_SEED: u32 = 15;

const RELATED_QUERY: &str = r#"
query ($id: Int, $perPage: Int) {
  Media(id: $id, type: ANIME) {
    recommendations(sort: RATING_DESC, perPage: $perPage) {
      nodes {
        mediaRecommendation {
          id
          averageScore
          popularity
          genres
        }
      }
    }
    relations {
      edges {
        relationType
        node {
          id
          type
          averageScore
          genres
        }
      }
    }
  }
}
"#;

const TRENDING_QUERY: &str = r#"
query ($page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    media(type: ANIME, sort: TRENDING_DESC, status: FINISHED) {
      id
      genres
    }
  }
}
"#;

#[derive(Clone)]
pub struct AniListClient {
    http_client: HttpClient,
    api_url: String,
}

impl AniListClient {
    /// Creates a client whose every request is bounded by `timeout`
    pub fn new(api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_url,
        })
    }

    /// Sends one GraphQL query and returns its decoded `data` payload
    async fn post_query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> AppResult<T> {
        let response = self
            .http_client
            .post(&self.api_url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "AniList API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw AniList API response");

        decode_response(&response_text)
    }
}

/// Extracts `data` from a GraphQL response body
///
/// A body with no `data` becomes `ExternalApi` when the server sent an error message and
/// `MalformedResponse` otherwise.
fn decode_response<T: DeserializeOwned>(body: &str) -> AppResult<T> {
    let envelope: GraphQlResponse<T> = serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, "Failed to deserialize AniList response");
        AppError::MalformedResponse(format!("Failed to parse AniList response: {}", e))
    })?;

    match envelope.data {
        Some(data) => Ok(data),
        None => {
            let message = envelope
                .errors
                .unwrap_or_default()
                .into_iter()
                .find_map(|e| e.message);
            Err(match message {
                Some(message) => AppError::ExternalApi(message),
                None => AppError::MalformedResponse("response has no data".to_string()),
            })
        }
    }
}

#[async_trait::async_trait]
impl MediaGraph for AniListClient {
    async fn related_to(&self, seed_id: MediaId) -> AppResult<RelatedMedia> {
        let data: MediaData = self
            .post_query(
                RELATED_QUERY,
                json!({ "id": seed_id, "perPage": RECOMMENDATIONS_PER_SEED }),
            )
            .await?;

        let media = data.media.ok_or_else(|| {
            AppError::MalformedResponse(format!("response has no Media for {}", seed_id))
        })?;
        let related = RelatedMedia::from(media);

        tracing::debug!(
            seed_id = seed_id,
            recommendations = related.recommendations.len(),
            relations = related.relations.len(),
            provider = self.name(),
            "Related media fetched"
        );

        Ok(related)
    }

    async fn trending_page(&self, page: u32, per_page: u32) -> AppResult<Vec<MediaSummary>> {
        let data: PageData = self
            .post_query(TRENDING_QUERY, json!({ "page": page, "perPage": per_page }))
            .await?;

        let media = data
            .page
            .and_then(|p| p.media)
            .ok_or_else(|| AppError::MalformedResponse("response has no Page media".to_string()))?;

        let trending: Vec<MediaSummary> = media
            .into_iter()
            .flatten()
            .filter_map(MediaSummary::from_api)
            .collect();

        tracing::debug!(
            page = page,
            results = trending.len(),
            provider = self.name(),
            "Trending page fetched"
        );

        Ok(trending)
    }

    fn name(&self) -> &'static str {
        "anilist"
    }
}
