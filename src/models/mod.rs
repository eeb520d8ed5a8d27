use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use std::collections::HashMap;

pub mod anilist;

pub use anilist::{MediaSummary, RelatedEdge, RelatedMedia, RelationType};

/// AniList media identifier
pub type MediaId = u64;

/// Label of the global top list, always the first section of a personalized set
pub const TOP_PICKS_LABEL: &str = "⭐ Top Picks For You";

/// One entry of a user's rating history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "anime_id", alias = "item_id")]
    pub item_id: MediaId,
    pub rating: f64,
}

impl Rating {
    pub fn new(item_id: MediaId, rating: f64) -> Self {
        Self { item_id, rating }
    }
}

/// An item discovered through the media graph, scored for one user
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: MediaId,
    pub score: f64,
    pub genres: Vec<String>,
}

/// Insertion-ordered map of candidates keyed by media id
///
/// Re-inserting an existing id replaces the candidate but keeps its original position,
/// so rank ties downstream resolve to first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateMap {
    entries: Vec<Candidate>,
    index: HashMap<MediaId, usize>,
}

impl CandidateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a candidate, replacing any existing entry with the same id
    pub fn insert(&mut self, candidate: Candidate) {
        match self.index.get(&candidate.id) {
            Some(&position) => self.entries[position] = candidate,
            None => {
                self.index.insert(candidate.id, self.entries.len());
                self.entries.push(candidate);
            }
        }
    }

    pub fn get(&self, id: MediaId) -> Option<&Candidate> {
        self.index.get(&id).map(|&position| &self.entries[position])
    }

    pub fn get_mut(&mut self, id: MediaId) -> Option<&mut Candidate> {
        let position = *self.index.get(&id)?;
        Some(&mut self.entries[position])
    }

    pub fn contains(&self, id: MediaId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = MediaId> + '_ {
        self.entries.iter().map(|c| c.id)
    }
}

impl IntoIterator for CandidateMap {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a CandidateMap {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A labelled, ranked list of media ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreBucket {
    pub label: String,
    pub ids: Vec<MediaId>,
}

impl GenreBucket {
    pub fn new(label: impl Into<String>, ids: Vec<MediaId>) -> Self {
        Self {
            label: label.into(),
            ids,
        }
    }
}

/// Ordered set of recommendation sections returned to the caller
///
/// Serializes as a JSON object whose keys keep section order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationSet {
    sections: Vec<GenreBucket>,
}

impl RecommendationSet {
    pub fn new(sections: Vec<GenreBucket>) -> Self {
        Self { sections }
    }

    /// Builds a personalized set: top picks first, then the genre buckets as given
    pub fn personalized(top_picks: Vec<MediaId>, genres: Vec<GenreBucket>) -> Self {
        let mut sections = Vec::with_capacity(genres.len() + 1);
        sections.push(GenreBucket::new(TOP_PICKS_LABEL, top_picks));
        sections.extend(genres);
        Self { sections }
    }

    pub fn get(&self, label: &str) -> Option<&[MediaId]> {
        self.sections
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.ids.as_slice())
    }

    pub fn top_picks(&self) -> Option<&[MediaId]> {
        self.get(TOP_PICKS_LABEL)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.label.as_str())
    }

    pub fn sections(&self) -> &[GenreBucket] {
        &self.sections
    }

    /// Every id in every section, top picks included
    pub fn all_ids(&self) -> impl Iterator<Item = MediaId> + '_ {
        self.sections.iter().flat_map(|s| s.ids.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Serialize for RecommendationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.label, &section.ids)?;
        }
        map.end()
    }
}
