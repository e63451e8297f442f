/// In-memory playback device that logs every command
use async_trait::async_trait;
use cadence_core::{
    CadenceError, DevicePlaylistId, DeviceState, PlayableTrack, PlaybackDevice, Result, TrackId,
};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Entry {
    // Distinguishes duplicate tracks so the active entry can be followed
    token: u64,
    track: PlayableTrack,
}

#[derive(Debug, Default)]
struct State {
    playlists: HashMap<DevicePlaylistId, Vec<Entry>>,
    active_playlist: Option<DevicePlaylistId>,
    active_token: Option<u64>,
    playing: bool,
    position: f64,
    next_token: u64,
}

impl State {
    fn playlist_mut(&mut self, id: &DevicePlaylistId) -> Result<&mut Vec<Entry>> {
        self.playlists
            .get_mut(id)
            .ok_or_else(|| CadenceError::device(format!("unknown playlist {}", id)))
    }

    fn active_entries(&self) -> &[Entry] {
        self.active_playlist
            .as_ref()
            .and_then(|id| self.playlists.get(id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn active_index(&self) -> Option<usize> {
        let token = self.active_token?;
        self.active_entries().iter().position(|e| e.token == token)
    }
}

/// Playback device for the command line
///
/// Holds playlists in memory and never produces audio. The active entry is
/// tracked by identity, so reorders, removals and insertions never change
/// which track is playing.
#[derive(Debug, Default)]
pub struct ConsoleDevice {
    state: Mutex<State>,
}

impl ConsoleDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track currently active, if any
    pub async fn current_track(&self) -> Option<PlayableTrack> {
        let state = self.state.lock().await;
        let index = state.active_index()?;
        state.active_entries().get(index).map(|e| e.track.clone())
    }

    pub async fn is_playing(&self) -> bool {
        self.state.lock().await.playing
    }
}

#[async_trait]
impl PlaybackDevice for ConsoleDevice {
    async fn create_playlist(&self, name: &str) -> Result<DevicePlaylistId> {
        let id = DevicePlaylistId::new(Uuid::new_v4().to_string());
        self.state
            .lock()
            .await
            .playlists
            .insert(id.clone(), Vec::new());
        info!(playlist = %id, name, "Created playlist");
        Ok(id)
    }

    async fn add_tracks(
        &self,
        playlist: &DevicePlaylistId,
        tracks: &[PlayableTrack],
        at_index: Option<usize>,
    ) -> Result<()> {
        let mut state = self.state.lock().await;
        let first_token = state.next_token;
        state.next_token += tracks.len() as u64;

        let entries = state.playlist_mut(playlist)?;
        let at = at_index.unwrap_or(entries.len()).min(entries.len());
        entries.splice(
            at..at,
            tracks.iter().enumerate().map(|(i, track)| Entry {
                token: first_token + i as u64,
                track: track.clone(),
            }),
        );

        info!(playlist = %playlist, count = tracks.len(), at, "Added tracks");
        Ok(())
    }

    async fn load_playlist(&self, playlist: &DevicePlaylistId) -> Result<()> {
        let mut state = self.state.lock().await;
        let first = state.playlist_mut(playlist)?.first().map(|e| e.token);
        state.active_playlist = Some(playlist.clone());
        state.active_token = first;
        state.playing = false;
        state.position = 0.0;
        info!(playlist = %playlist, "Loaded playlist");
        Ok(())
    }

    async fn skip_to_index(&self, index: usize) -> Result<()> {
        let mut state = self.state.lock().await;
        let token = state
            .active_entries()
            .get(index)
            .map(|e| e.token)
            .ok_or_else(|| CadenceError::device(format!("no entry at index {}", index)))?;
        state.active_token = Some(token);
        state.position = 0.0;
        info!(index, "Skipped");
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.playing = true;
        let title = state
            .active_index()
            .and_then(|i| state.active_entries()[i].track.title.clone());
        info!(title = ?title, "Playing");
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        self.state.lock().await.playing = false;
        info!("Paused");
        Ok(())
    }

    async fn seek(&self, seconds: f64) -> Result<()> {
        self.state.lock().await.position = seconds.max(0.0);
        info!(seconds, "Seeked");
        Ok(())
    }

    async fn get_state(&self) -> Result<DeviceState> {
        let state = self.state.lock().await;
        Ok(DeviceState {
            current_index: state.active_index(),
            current_playlist_id: state.active_playlist.clone(),
            current_position: state.position,
            is_playing: state.playing,
        })
    }

    async fn get_actual_queue(&self) -> Result<Vec<PlayableTrack>> {
        let state = self.state.lock().await;
        Ok(state
            .active_entries()
            .iter()
            .map(|e| e.track.clone())
            .collect())
    }

    async fn reorder_track(
        &self,
        playlist: &DevicePlaylistId,
        track_id: &TrackId,
        new_index: usize,
    ) -> Result<()> {
        let mut state = self.state.lock().await;
        let entries = state.playlist_mut(playlist)?;
        if let Some(from) = entries.iter().position(|e| &e.track.id == track_id) {
            let entry = entries.remove(from);
            let to = new_index.min(entries.len());
            entries.insert(to, entry);
            info!(track_id = %track_id, from, to, "Moved track");
        }
        Ok(())
    }

    async fn remove_track(&self, playlist: &DevicePlaylistId, track_id: &TrackId) -> Result<()> {
        let mut state = self.state.lock().await;
        let active = state.active_token;
        let entries = state.playlist_mut(playlist)?;
        let before = entries.len();
        entries.retain(|e| &e.track.id != track_id || Some(e.token) == active);
        info!(track_id = %track_id, removed = before - entries.len(), "Removed track");
        Ok(())
    }
}
