/// Resolved, device-ready track
use crate::types::{HasTrackId, TrackId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// A track ready to hand to the playback device
///
/// Identity is the track identifier alone: two values with the same `id`
/// compare equal even when other fields differ (for example after the URL
/// was re-resolved for a different quality).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayableTrack {
    /// Stable catalog identifier
    pub id: TrackId,

    /// Track title
    pub title: Option<String>,

    /// Artist display string
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,

    /// Duration in whole seconds
    pub duration_secs: Option<u64>,

    /// Playback URL or local path (empty until resolved)
    pub url: String,

    /// Artwork URL
    pub artwork_url: Option<String>,

    /// Loudness normalization gain in dB
    pub normalization_gain: Option<f64>,

    /// Original catalog item and source metadata
    pub payload: TrackPayload,
}

/// Opaque extra payload attached to a playable track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPayload {
    /// The original catalog item, serialized as JSON
    pub item: String,

    /// Where the audio comes from
    pub source: TrackSource,

    /// Playback session this track was resolved for
    pub session_id: Option<String>,
}

/// Where a track's audio is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackSource {
    /// Streamed from the media server
    Stream,

    /// Read from a locally downloaded file
    Download { local_path: PathBuf },
}

impl PlayableTrack {
    /// Whether this track plays from a local download
    pub fn is_downloaded(&self) -> bool {
        matches!(self.payload.source, TrackSource::Download { .. })
    }
}

impl PartialEq for PlayableTrack {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PlayableTrack {}

impl Hash for PlayableTrack {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl HasTrackId for PlayableTrack {
    fn track_id(&self) -> &TrackId {
        &self.id
    }
}
