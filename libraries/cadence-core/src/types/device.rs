/// Playback device types
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a playlist registered with the playback device
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DevicePlaylistId(String);

impl DevicePlaylistId {
    /// Create a new playlist ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DevicePlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of what the playback device is doing right now
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceState {
    /// Index of the active entry in the device's playlist
    pub current_index: Option<usize>,

    /// Playlist currently loaded, if any
    pub current_playlist_id: Option<DevicePlaylistId>,

    /// Position within the active track, in seconds
    pub current_position: f64,

    /// Whether audio is currently playing
    pub is_playing: bool,
}

/// Streaming capabilities of the device, used to build stream URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Display name reported to the server
    pub name: String,

    /// Maximum streaming bitrate in bits per second
    pub max_bitrate: Option<u32>,

    /// Containers the device decodes natively
    pub containers: Vec<String>,

    /// Container to request when transcoding is needed
    pub transcoding_container: String,

    /// Codec to request when transcoding is needed
    pub transcoding_codec: String,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            name: "Cadence".to_string(),
            max_bitrate: None,
            containers: ["mp3", "aac", "m4a", "flac", "alac", "opus", "ogg", "wav"]
                .iter()
                .map(|c| (*c).to_string())
                .collect(),
            transcoding_container: "ts".to_string(),
            transcoding_codec: "aac".to_string(),
        }
    }
}
