//! Playback reporting.

use crate::client::MediaServerClient;
use crate::error::Result;
use crate::types::{PlayMethod, PlaybackStartInfo};
use async_trait::async_trait;
use cadence_core::{PlayableTrack, PlaybackReporter};
use tracing::debug;

impl MediaServerClient {
    /// Tell the server playback of an item started.
    pub async fn report_start(&self, info: &PlaybackStartInfo) -> Result<()> {
        let url = self.endpoint("/Sessions/Playing")?;
        debug!(item_id = %info.item_id, position_ticks = info.position_ticks, "Reporting playback start");

        self.send(self.http.post(url).json(info)).await?;
        Ok(())
    }
}

#[async_trait]
impl PlaybackReporter for MediaServerClient {
    async fn report_playback_started(
        &self,
        track: &PlayableTrack,
        position_ticks: u64,
    ) -> cadence_core::Result<()> {
        let play_method = if track.is_downloaded() {
            PlayMethod::DirectPlay
        } else {
            PlayMethod::DirectStream
        };

        self.report_start(&PlaybackStartInfo {
            item_id: track.id.as_str().to_string(),
            position_ticks,
            play_session_id: track.payload.session_id.clone(),
            can_seek: true,
            play_method,
        })
        .await?;
        Ok(())
    }
}
