/// Collaborator contracts for the queue engine
///
/// Everything the engine talks to lives behind one of these traits: the
/// native playback device, the remote catalog, the download manager, the
/// connectivity signal, the playback reporter, and URL building.
use crate::error::Result;
use crate::types::{
    CatalogItem, DevicePlaylistId, DeviceProfile, DeviceState, DownloadedTrack, LibraryFilters,
    NetworkStatus, PlayableTrack, SortOrder, TrackId,
};
use async_trait::async_trait;

/// Native playback device
///
/// The device owns its own playlist. Implementations must keep playing the
/// active entry across `reorder_track`, `remove_track`, and `add_tracks`:
/// the active index follows the active entry.
#[async_trait]
pub trait PlaybackDevice: Send + Sync {
    /// Create an empty playlist and return its identifier
    async fn create_playlist(&self, name: &str) -> Result<DevicePlaylistId>;

    /// Add tracks to a playlist
    ///
    /// `at_index` of `None` appends; otherwise tracks are inserted in order
    /// starting at that position.
    async fn add_tracks(
        &self,
        playlist: &DevicePlaylistId,
        tracks: &[PlayableTrack],
        at_index: Option<usize>,
    ) -> Result<()>;

    /// Make a playlist the active one
    async fn load_playlist(&self, playlist: &DevicePlaylistId) -> Result<()>;

    /// Jump to an entry of the active playlist
    async fn skip_to_index(&self, index: usize) -> Result<()>;

    /// Start or resume playback
    async fn play(&self) -> Result<()>;

    /// Pause playback (idempotent)
    async fn pause(&self) -> Result<()>;

    /// Seek within the active track
    async fn seek(&self, seconds: f64) -> Result<()>;

    /// Current index, playlist, and position
    async fn get_state(&self) -> Result<DeviceState>;

    /// The active playlist's entries, in play order
    async fn get_actual_queue(&self) -> Result<Vec<PlayableTrack>>;

    /// Move the first entry with `track_id` to `new_index`
    async fn reorder_track(
        &self,
        playlist: &DevicePlaylistId,
        track_id: &TrackId,
        new_index: usize,
    ) -> Result<()>;

    /// Remove every entry with `track_id` except the active one
    async fn remove_track(&self, playlist: &DevicePlaylistId, track_id: &TrackId) -> Result<()>;
}

/// Remote music catalog
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch audio items matching `filters`
    async fn fetch_tracks(
        &self,
        filters: &LibraryFilters,
        sort: SortOrder,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CatalogItem>>;
}

/// Read side of the download manager
#[async_trait]
pub trait DownloadManager: Send + Sync {
    /// Every track available locally
    async fn get_all_downloaded(&self) -> Result<Vec<DownloadedTrack>>;
}

/// Connectivity signal
pub trait NetworkMonitor: Send + Sync {
    /// Latest known status, `None` when unknown
    fn status(&self) -> Option<NetworkStatus>;
}

/// Receiver of playback telemetry (resume position, play counts)
#[async_trait]
pub trait PlaybackReporter: Send + Sync {
    /// Report that playback of `track` began at `position_ticks`
    async fn report_playback_started(&self, track: &PlayableTrack, position_ticks: u64)
        -> Result<()>;
}

/// URL building for streams and artwork
#[async_trait]
pub trait MediaUrls: Send + Sync {
    /// Stream URL for a track, `None` when it cannot be built yet
    async fn stream_url(&self, track_id: &TrackId, profile: &DeviceProfile)
        -> Result<Option<String>>;

    /// URL of an item's image identified by its tag
    fn image_url(&self, item_id: &str, tag: &str) -> String;

    /// URL of an artist's primary image
    fn artist_image_url(&self, artist_id: &str) -> String;
}
