//! AniList GraphQL response types.
//!
//! Every field the API returns is optional here. Conversion into the plain records at the
//! bottom of this file applies defaults once, so scoring code never sees absence.

use serde::Deserialize;

use super::MediaId;

// ============================================================================
// Raw API Types
// ============================================================================

/// GraphQL envelope: `data` is absent or null when the query failed
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    #[serde(default)]
    pub message: Option<String>,
}

/// `data` payload of the related-to-seed query
#[derive(Debug, Deserialize)]
pub struct MediaData {
    #[serde(rename = "Media", default)]
    pub media: Option<ApiMedia>,
}

#[derive(Debug, Deserialize)]
pub struct ApiMedia {
    #[serde(default)]
    pub recommendations: Option<ApiRecommendationConnection>,
    #[serde(default)]
    pub relations: Option<ApiRelationConnection>,
}

#[derive(Debug, Deserialize)]
pub struct ApiRecommendationConnection {
    #[serde(default)]
    pub nodes: Option<Vec<Option<ApiRecommendation>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecommendation {
    #[serde(default)]
    pub media_recommendation: Option<ApiMediaSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ApiRelationConnection {
    #[serde(default)]
    pub edges: Option<Vec<Option<ApiRelationEdge>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRelationEdge {
    #[serde(default)]
    pub relation_type: Option<RelationType>,
    #[serde(default)]
    pub node: Option<ApiMediaSummary>,
}

/// Media fields shared by recommendations, relations and trending results
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMediaSummary {
    #[serde(default)]
    pub id: Option<MediaId>,
    #[serde(default)]
    pub average_score: Option<u32>,
    #[serde(default)]
    pub popularity: Option<u64>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
}

/// `data` payload of the trending-page query
#[derive(Debug, Deserialize)]
pub struct PageData {
    #[serde(rename = "Page", default)]
    pub page: Option<ApiPage>,
}

#[derive(Debug, Deserialize)]
pub struct ApiPage {
    #[serde(default)]
    pub media: Option<Vec<Option<ApiMediaSummary>>>,
}

/// How a related media entry connects to its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    Sequel,
    Prequel,
    SideStory,
    Alternative,
    SpinOff,
    Adaptation,
    Parent,
    Character,
    Summary,
    Source,
    Compilation,
    Contains,
    #[serde(other)]
    Other,
}

impl RelationType {
    /// Direct narrative continuations, boosted regardless of their own popularity
    pub fn is_continuation(self) -> bool {
        matches!(
            self,
            RelationType::Sequel
                | RelationType::Prequel
                | RelationType::SideStory
                | RelationType::Alternative
                | RelationType::SpinOff
        )
    }
}

// ============================================================================
// Parsed Records
// ============================================================================

/// Media entry with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSummary {
    pub id: MediaId,
    pub average_score: f64,
    pub popularity: f64,
    pub genres: Vec<String>,
}

impl MediaSummary {
    /// Returns `None` when the entry carries no id
    pub fn from_api(media: ApiMediaSummary) -> Option<Self> {
        Some(Self {
            id: media.id?,
            average_score: media.average_score.unwrap_or(0) as f64,
            popularity: media.popularity.unwrap_or(0) as f64,
            genres: media.genres.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelatedEdge {
    pub relation_type: RelationType,
    pub media: MediaSummary,
}

/// Everything the graph knows about one seed, in response order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedMedia {
    pub recommendations: Vec<MediaSummary>,
    pub relations: Vec<RelatedEdge>,
}

impl From<ApiMedia> for RelatedMedia {
    fn from(media: ApiMedia) -> Self {
        let recommendations = media
            .recommendations
            .and_then(|r| r.nodes)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|node| node.media_recommendation)
            .filter_map(MediaSummary::from_api)
            .collect();

        let relations = media
            .relations
            .and_then(|r| r.edges)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|edge| {
                let media = MediaSummary::from_api(edge.node?)?;
                Some(RelatedEdge {
                    relation_type: edge.relation_type.unwrap_or(RelationType::Other),
                    media,
                })
            })
            .collect();

        Self {
            recommendations,
            relations,
        }
    }
}
