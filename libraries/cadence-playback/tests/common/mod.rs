//! Hand-written collaborators for queue service tests
//!
//! `FakeDevice` honors the device contract the engine relies on: the active
//! entry keeps playing across reorders, removals and insertions, and
//! `remove_track` never removes the active entry.

#![allow(dead_code)]

use async_trait::async_trait;
use cadence_core::{
    CadenceError, Catalog, CatalogItem, DevicePlaylistId, DeviceProfile, DeviceState,
    DownloadManager, DownloadedTrack, LibraryFilters, MediaUrls, NetworkMonitor, NetworkStatus,
    PlayableTrack, PlaybackDevice, PlaybackReporter, Result, SortOrder, TrackId,
};
use cadence_playback::{QueueBackends, QueueConfig, QueueService};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

// ===== Device =====

#[derive(Debug, Clone)]
struct Entry {
    token: u64,
    track: PlayableTrack,
}

#[derive(Debug, Default)]
struct DeviceInner {
    playlists: HashMap<DevicePlaylistId, Vec<Entry>>,
    active_playlist: Option<DevicePlaylistId>,
    active_token: Option<u64>,
    playing: bool,
    position: f64,
    next_token: u64,
    next_playlist: u64,
    commands: Vec<String>,
    fail_on: Option<&'static str>,
}

impl DeviceInner {
    fn active_entries(&self) -> Option<&Vec<Entry>> {
        self.active_playlist
            .as_ref()
            .and_then(|id| self.playlists.get(id))
    }

    fn active_index(&self) -> Option<usize> {
        let token = self.active_token?;
        self.active_entries()?.iter().position(|e| e.token == token)
    }

    fn check(&mut self, command: &'static str, detail: String) -> Result<()> {
        self.commands.push(detail);
        if self.fail_on == Some(command) {
            return Err(CadenceError::device(format!("{} rejected", command)));
        }
        Ok(())
    }
}

/// In-memory playback device
#[derive(Debug, Default)]
pub struct FakeDevice {
    inner: Mutex<DeviceInner>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the named command fail from now on
    pub fn fail_on(&self, command: &'static str) {
        self.inner.lock().unwrap().fail_on = Some(command);
    }

    /// Simulate the device advancing on its own
    pub fn advance_to(&self, index: usize) {
        let mut inner = self.inner.lock().unwrap();
        let token = inner.active_entries().and_then(|e| e.get(index)).map(|e| e.token);
        inner.active_token = token;
        inner.position = 0.0;
    }

    pub fn set_position(&self, seconds: f64) {
        self.inner.lock().unwrap().position = seconds;
    }

    pub fn is_playing(&self) -> bool {
        self.inner.lock().unwrap().playing
    }

    pub fn position(&self) -> f64 {
        self.inner.lock().unwrap().position
    }

    pub fn commands(&self) -> Vec<String> {
        self.inner.lock().unwrap().commands.clone()
    }

    pub fn playlist_count(&self) -> usize {
        self.inner.lock().unwrap().playlists.len()
    }

    /// Ids of the active playlist, in play order
    pub fn queue_ids(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .active_entries()
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| e.track.id.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn current_id(&self) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        let index = inner.active_index()?;
        inner
            .active_entries()
            .map(|entries| entries[index].track.id.as_str().to_string())
    }
}

#[async_trait]
impl PlaybackDevice for FakeDevice {
    async fn create_playlist(&self, name: &str) -> Result<DevicePlaylistId> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("create_playlist", format!("create_playlist {}", name))?;
        inner.next_playlist += 1;
        let id = DevicePlaylistId::new(format!("pl-{}", inner.next_playlist));
        inner.playlists.insert(id.clone(), Vec::new());
        Ok(id)
    }

    async fn add_tracks(
        &self,
        playlist: &DevicePlaylistId,
        tracks: &[PlayableTrack],
        at_index: Option<usize>,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check(
            "add_tracks",
            format!("add_tracks {} {:?}", tracks.len(), at_index),
        )?;

        let mut new_entries = Vec::with_capacity(tracks.len());
        for track in tracks {
            inner.next_token += 1;
            new_entries.push(Entry {
                token: inner.next_token,
                track: track.clone(),
            });
        }

        let entries = inner
            .playlists
            .get_mut(playlist)
            .ok_or_else(|| CadenceError::device("unknown playlist"))?;
        let at = at_index.unwrap_or(entries.len()).min(entries.len());
        entries.splice(at..at, new_entries);
        Ok(())
    }

    async fn load_playlist(&self, playlist: &DevicePlaylistId) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("load_playlist", format!("load_playlist {}", playlist))?;
        let first = inner
            .playlists
            .get(playlist)
            .ok_or_else(|| CadenceError::device("unknown playlist"))?
            .first()
            .map(|e| e.token);
        inner.active_playlist = Some(playlist.clone());
        inner.active_token = first;
        inner.playing = false;
        inner.position = 0.0;
        Ok(())
    }

    async fn skip_to_index(&self, index: usize) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("skip_to_index", format!("skip_to_index {}", index))?;
        let token = inner
            .active_entries()
            .and_then(|entries| entries.get(index))
            .map(|e| e.token)
            .ok_or_else(|| CadenceError::device("index out of range"))?;
        inner.active_token = Some(token);
        inner.position = 0.0;
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("play", "play".to_string())?;
        inner.playing = true;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("pause", "pause".to_string())?;
        inner.playing = false;
        Ok(())
    }

    async fn seek(&self, seconds: f64) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("seek", format!("seek {}", seconds))?;
        inner.position = seconds;
        Ok(())
    }

    async fn get_state(&self) -> Result<DeviceState> {
        let inner = self.inner.lock().unwrap();
        Ok(DeviceState {
            current_index: inner.active_index(),
            current_playlist_id: inner.active_playlist.clone(),
            current_position: inner.position,
            is_playing: inner.playing,
        })
    }

    async fn get_actual_queue(&self) -> Result<Vec<PlayableTrack>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .active_entries()
            .map(|entries| entries.iter().map(|e| e.track.clone()).collect())
            .unwrap_or_default())
    }

    async fn reorder_track(
        &self,
        playlist: &DevicePlaylistId,
        track_id: &TrackId,
        new_index: usize,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check(
            "reorder_track",
            format!("reorder_track {} {}", track_id, new_index),
        )?;
        let entries = inner
            .playlists
            .get_mut(playlist)
            .ok_or_else(|| CadenceError::device("unknown playlist"))?;
        if let Some(from) = entries.iter().position(|e| &e.track.id == track_id) {
            let entry = entries.remove(from);
            let to = new_index.min(entries.len());
            entries.insert(to, entry);
        }
        Ok(())
    }

    async fn remove_track(&self, playlist: &DevicePlaylistId, track_id: &TrackId) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.check("remove_track", format!("remove_track {}", track_id))?;
        let active = inner.active_token;
        let entries = inner
            .playlists
            .get_mut(playlist)
            .ok_or_else(|| CadenceError::device("unknown playlist"))?;
        entries.retain(|e| &e.track.id != track_id || Some(e.token) == active);
        Ok(())
    }
}

// ===== Catalog =====

/// Catalog returning a fixed list (or failing)
#[derive(Debug, Default)]
pub struct FixedCatalog {
    items: Mutex<Vec<CatalogItem>>,
    fail: AtomicBool,
    queries: Mutex<Vec<(LibraryFilters, SortOrder, usize, usize)>>,
}

impl FixedCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Default::default()
        }
    }

    pub fn set_items(&self, items: Vec<CatalogItem>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn queries(&self) -> Vec<(LibraryFilters, SortOrder, usize, usize)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Catalog for FixedCatalog {
    async fn fetch_tracks(
        &self,
        filters: &LibraryFilters,
        sort: SortOrder,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CatalogItem>> {
        self.queries
            .lock()
            .unwrap()
            .push((filters.clone(), sort, limit, offset));
        if self.fail.load(Ordering::SeqCst) {
            return Err(CadenceError::catalog("server unreachable"));
        }
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

// ===== Downloads / network / reporting / URLs =====

/// Download index with a fixed set of local files
#[derive(Debug, Default)]
pub struct FixedDownloads {
    tracks: Mutex<Vec<DownloadedTrack>>,
    fail: AtomicBool,
}

impl FixedDownloads {
    pub fn new(ids: &[&str]) -> Self {
        let downloads = Self::default();
        downloads.set(ids);
        downloads
    }

    pub fn set(&self, ids: &[&str]) {
        *self.tracks.lock().unwrap() = ids
            .iter()
            .map(|id| DownloadedTrack {
                track_id: TrackId::new(*id),
                local_path: PathBuf::from(format!("/downloads/{}.flac", id)),
            })
            .collect();
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl DownloadManager for FixedDownloads {
    async fn get_all_downloaded(&self) -> Result<Vec<DownloadedTrack>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CadenceError::download("download index unavailable"));
        }
        Ok(self.tracks.lock().unwrap().clone())
    }
}

/// Network monitor with a settable status
#[derive(Debug, Default)]
pub struct StaticNetwork {
    status: Mutex<Option<NetworkStatus>>,
}

impl StaticNetwork {
    pub fn new(status: Option<NetworkStatus>) -> Self {
        Self {
            status: Mutex::new(status),
        }
    }

    pub fn set(&self, status: Option<NetworkStatus>) {
        *self.status.lock().unwrap() = status;
    }
}

impl NetworkMonitor for StaticNetwork {
    fn status(&self) -> Option<NetworkStatus> {
        *self.status.lock().unwrap()
    }
}

/// Reporter remembering every report
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(TrackId, u64)>>,
    calls: AtomicU64,
}

impl RecordingReporter {
    pub fn reports(&self) -> Vec<(TrackId, u64)> {
        self.reports.lock().unwrap().clone()
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaybackReporter for RecordingReporter {
    async fn report_playback_started(&self, track: &PlayableTrack, position_ticks: u64) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reports
            .lock()
            .unwrap()
            .push((track.id.clone(), position_ticks));
        Ok(())
    }
}

pub struct TestUrls;

#[async_trait]
impl MediaUrls for TestUrls {
    async fn stream_url(
        &self,
        track_id: &TrackId,
        _profile: &DeviceProfile,
    ) -> Result<Option<String>> {
        Ok(Some(format!("https://media.test/Audio/{}/universal", track_id)))
    }

    fn image_url(&self, item_id: &str, tag: &str) -> String {
        format!("https://media.test/Items/{}/Images/Primary?tag={}", item_id, tag)
    }

    fn artist_image_url(&self, artist_id: &str) -> String {
        format!("https://media.test/Items/{}/Images/Primary", artist_id)
    }
}

// ===== Harness =====

pub fn items(ids: &[&str]) -> Vec<CatalogItem> {
    ids.iter()
        .map(|id| CatalogItem::new(*id).with_name(format!("Track {}", id)))
        .collect()
}

pub fn ids(tracks: &[PlayableTrack]) -> Vec<String> {
    tracks.iter().map(|t| t.id.as_str().to_string()).collect()
}

/// Service wired to fakes, with handles to each fake
pub struct Harness {
    pub service: QueueService,
    pub device: Arc<FakeDevice>,
    pub catalog: Arc<FixedCatalog>,
    pub downloads: Arc<FixedDownloads>,
    pub network: Arc<StaticNetwork>,
    pub reporter: Arc<RecordingReporter>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    pub fn with_config(config: QueueConfig) -> Self {
        let device = Arc::new(FakeDevice::new());
        let catalog = Arc::new(FixedCatalog::default());
        let downloads = Arc::new(FixedDownloads::default());
        let network = Arc::new(StaticNetwork::new(Some(NetworkStatus::Online)));
        let reporter = Arc::new(RecordingReporter::default());

        let backends = QueueBackends {
            device: device.clone(),
            catalog: catalog.clone(),
            downloads: downloads.clone(),
            network: network.clone(),
            reporter: reporter.clone(),
            urls: Arc::new(TestUrls),
        };

        Self {
            service: QueueService::new(backends, config),
            device,
            catalog,
            downloads,
            network,
            reporter,
        }
    }

    /// Load `ids` as an album starting at `start`
    pub async fn load(&self, ids: &[&str], start: usize) -> cadence_playback::LoadOutcome {
        self.service
            .load_queue(cadence_playback::LoadRequest::new(
                items(ids),
                start,
                cadence_core::QueueReference::collection("album-1", "Test Album"),
            ))
            .await
            .unwrap()
    }
}
