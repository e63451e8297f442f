/// Catalog item as delivered by the media server
use crate::types::{HasTrackId, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque catalog record for a single audio item
///
/// Mirrors the subset of the server's item payload the queue engine reads.
/// Every field except `id` is optional and unknown fields are ignored, so
/// sparse responses deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CatalogItem {
    /// Stable track identifier
    pub id: TrackId,

    /// Track title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Artist display names
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artists: Vec<String>,

    /// Artist references (used for artwork fallback)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artist_items: Vec<ArtistRef>,

    /// Album name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Album identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,

    /// Album artist display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,

    /// Duration in server ticks (100ns units)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_time_ticks: Option<u64>,

    /// Image tags keyed by image type ("Primary", "Backdrop", ...)
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub image_tags: HashMap<String, String>,

    /// Primary image tag of the containing album
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_primary_image_tag: Option<String>,

    /// Loudness normalization gain in dB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalization_gain: Option<f64>,

    /// Release year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_year: Option<u32>,

    /// Per-user state (favorite, played)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<UserData>,
}

/// Reference to an artist attached to a catalog item
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ArtistRef {
    /// Artist identifier
    pub id: String,

    /// Artist display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Per-user state of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserData {
    /// Marked as favorite by the user
    pub is_favorite: bool,

    /// Played at least once
    pub played: bool,
}

impl CatalogItem {
    /// Create a bare item with only an identifier
    pub fn new(id: impl Into<TrackId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the title
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Primary image tag of the item itself, if any
    pub fn primary_image_tag(&self) -> Option<&str> {
        self.image_tags.get("Primary").map(String::as_str)
    }

    /// Artist names joined for display, `None` when no artist is known
    pub fn artist_display(&self) -> Option<String> {
        if self.artists.is_empty() {
            self.album_artist.clone()
        } else {
            Some(self.artists.join(", "))
        }
    }
}

impl HasTrackId for CatalogItem {
    fn track_id(&self) -> &TrackId {
        &self.id
    }
}
