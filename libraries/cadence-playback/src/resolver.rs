//! Track resolver
//!
//! Maps catalog items to device-ready `PlayableTrack`s. The stream URL may
//! legitimately come back empty at this stage; later playback-info resolution
//! fills it in.

use cadence_core::ticks::ticks_to_seconds;
use cadence_core::{
    CadenceError, CatalogItem, DeviceProfile, MediaUrls, PlayableTrack, TrackId, TrackPayload,
    TrackSource,
};
use futures_util::future::try_join_all;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolves catalog items into playable tracks
#[derive(Clone)]
pub struct TrackResolver {
    urls: Arc<dyn MediaUrls>,
    session_id: Option<String>,
}

impl TrackResolver {
    /// Create a resolver building URLs with `urls`
    pub fn new(urls: Arc<dyn MediaUrls>) -> Self {
        Self {
            urls,
            session_id: None,
        }
    }

    /// Tag resolved tracks with a playback session
    #[must_use]
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Session attached to resolved tracks
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Resolve a single catalog item
    pub async fn resolve(
        &self,
        item: &CatalogItem,
        profile: &DeviceProfile,
        source: TrackSource,
    ) -> cadence_core::Result<PlayableTrack> {
        if item.id.is_empty() {
            return Err(CadenceError::resolution("catalog item has no identifier"));
        }

        let url = match &source {
            TrackSource::Download { local_path } => local_path.to_string_lossy().into_owned(),
            TrackSource::Stream => self
                .urls
                .stream_url(&item.id, profile)
                .await?
                .unwrap_or_default(),
        };

        Ok(PlayableTrack {
            id: item.id.clone(),
            title: item.name.clone(),
            artist: item.artist_display(),
            album: item.album.clone(),
            duration_secs: item.run_time_ticks.map(ticks_to_seconds),
            url,
            artwork_url: self.artwork_url(item),
            normalization_gain: item.normalization_gain,
            payload: TrackPayload {
                item: serde_json::to_string(item)?,
                source,
                session_id: self.session_id.clone(),
            },
        })
    }

    /// Resolve many items concurrently, preserving their order
    ///
    /// Items present in `downloaded` resolve to their local file. The first
    /// failure aborts the whole batch.
    pub async fn resolve_all(
        &self,
        items: &[CatalogItem],
        profile: &DeviceProfile,
        downloaded: &HashMap<TrackId, PathBuf>,
    ) -> cadence_core::Result<Vec<PlayableTrack>> {
        try_join_all(items.iter().map(|item| {
            let source = match downloaded.get(&item.id) {
                Some(path) => TrackSource::Download {
                    local_path: path.clone(),
                },
                None => TrackSource::Stream,
            };
            self.resolve(item, profile, source)
        }))
        .await
    }

    /// Artwork precedence: own image, album image, first artist image
    pub fn artwork_url(&self, item: &CatalogItem) -> Option<String> {
        if let Some(tag) = item.primary_image_tag() {
            return Some(self.urls.image_url(item.id.as_str(), tag));
        }

        if let (Some(album_id), Some(tag)) = (&item.album_id, &item.album_primary_image_tag) {
            return Some(self.urls.image_url(album_id, tag));
        }

        item.artist_items
            .iter()
            .find(|artist| !artist.id.is_empty())
            .map(|artist| self.urls.artist_image_url(&artist.id))
    }
}
