//! Queue load protocol
//!
//! Builds a fresh queue from a source list and a requested start point,
//! registers it with the device, commits it to the store, and optionally
//! starts playback. Any failure before the commit leaves the store exactly
//! as it was.

use crate::availability::filter_available;
use crate::error::{QueueError, Result};
use crate::events::QueueEvent;
use crate::service::OpContext;
use crate::shuffle::shuffle_tracks;
use crate::store::QueueStore;
use cadence_core::ticks::seconds_to_ticks;
use cadence_core::{CatalogItem, NetworkStatus, PlayableTrack, QueueReference, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Parameters of a queue load
#[derive(Debug, Clone)]
pub struct LoadRequest {
    /// Index of the requested first track in `source`
    pub start_index: usize,
    /// Catalog items in canonical order
    pub source: Vec<CatalogItem>,
    /// What the source list represents
    pub queue_ref: QueueReference,
    /// Produce a shuffled live order
    pub shuffled: bool,
    /// Start playback once loaded
    pub start_playback: bool,
}

impl LoadRequest {
    /// Unshuffled load that starts playback
    pub fn new(source: Vec<CatalogItem>, start_index: usize, queue_ref: QueueReference) -> Self {
        Self {
            start_index,
            source,
            queue_ref,
            shuffled: false,
            start_playback: true,
        }
    }

    /// Request a shuffled live order
    #[must_use]
    pub fn shuffled(mut self, shuffled: bool) -> Self {
        self.shuffled = shuffled;
        self
    }

    /// Whether to start playback once loaded
    #[must_use]
    pub fn start_playback(mut self, start: bool) -> Self {
        self.start_playback = start;
        self
    }
}

/// Result of a queue load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOutcome {
    /// Index in the live queue playback starts from
    pub final_start_index: usize,
    /// Live queue as registered with the device
    pub tracks: Vec<PlayableTrack>,
}

pub(crate) async fn load_queue(
    ctx: &OpContext<'_>,
    store: &mut QueueStore,
    request: LoadRequest,
) -> Result<LoadOutcome> {
    let LoadRequest {
        start_index,
        source,
        queue_ref,
        shuffled,
        start_playback,
    } = request;

    if source.is_empty() {
        return Err(QueueError::NothingPlayable);
    }
    let requested: TrackId = source
        .get(start_index)
        .map(|item| item.id.clone())
        .ok_or(QueueError::StartIndexOutOfBounds {
            index: start_index,
            len: source.len(),
        })?;
    let leading: Vec<TrackId> = source[..start_index]
        .iter()
        .map(|item| item.id.clone())
        .collect();

    let device = ctx.backends.device.as_ref();
    device.pause().await?;

    let resolved = prepare_tracks(ctx, source, true).await?;
    if resolved.is_empty() {
        return Err(QueueError::NothingPlayable);
    }

    // The filter keeps or drops every copy of an id together, so the start
    // entry lands after exactly the surviving entries that preceded it.
    let survivors: HashSet<&TrackId> = resolved.iter().map(|t| &t.id).collect();
    let requested_position = survivors
        .contains(&requested)
        .then(|| leading.iter().filter(|id| survivors.contains(id)).count());
    if requested_position.is_none() {
        warn!(track_id = %requested, "Requested start track is unavailable, starting from the top");
    }

    let (live, final_start_index) = if shuffled && resolved.len() > 1 {
        let mut live = resolved.clone();
        match requested_position {
            Some(position) => {
                let first = live.remove(position);
                shuffle_tracks(&mut live);
                live.insert(0, first);
            }
            None => shuffle_tracks(&mut live),
        }
        (live, 0)
    } else {
        (resolved.clone(), requested_position.unwrap_or(0))
    };

    let playlist = device.create_playlist(queue_ref.playlist_name()).await?;
    device.add_tracks(&playlist, &live, None).await?;
    device.load_playlist(&playlist).await?;
    device.skip_to_index(final_start_index).await?;

    info!(
        playlist = %playlist,
        tracks = live.len(),
        start = final_start_index,
        shuffled,
        "Loaded new queue"
    );

    store.set_new_queue(live.clone(), queue_ref, final_start_index, shuffled);
    store.set_unshuffled_queue(resolved);
    if shuffled {
        store.set_canonical_index(requested_position);
    }

    ctx.events.emit(QueueEvent::QueueLoaded {
        length: live.len(),
        start_index: final_start_index,
    });
    if shuffled {
        ctx.events.emit(QueueEvent::ShuffleChanged { shuffled: true });
    }

    if start_playback {
        device.play().await?;
        let track = live[final_start_index].clone();
        ctx.events.emit(QueueEvent::PlaybackStarted {
            track_id: track.id.clone(),
        });
        if ctx.config.report_playback {
            spawn_playback_report(ctx, track);
        }
    }

    Ok(LoadOutcome {
        final_start_index,
        tracks: live,
    })
}

/// Filter (optionally) and resolve catalog items in order
///
/// Download lookups degrade to "nothing downloaded" while the network is
/// healthy; offline they are required and failures propagate.
pub(crate) async fn prepare_tracks(
    ctx: &OpContext<'_>,
    items: Vec<CatalogItem>,
    apply_filter: bool,
) -> Result<Vec<PlayableTrack>> {
    let status = ctx.backends.network.status();
    let downloaded = match ctx.backends.downloads.get_all_downloaded().await {
        Ok(downloaded) => downloaded,
        Err(err) if NetworkStatus::is_streamable(status) => {
            warn!(error = %err, "Download lookup failed, streaming everything");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };

    let paths: HashMap<TrackId, PathBuf> = downloaded
        .into_iter()
        .map(|d| (d.track_id, d.local_path))
        .collect();

    let survivors = if apply_filter {
        let ids: HashSet<TrackId> = paths.keys().cloned().collect();
        filter_available(status, items, &ids)
    } else {
        items
    };

    debug!(
        survivors = survivors.len(),
        downloaded = paths.len(),
        network = ?status,
        "Resolving tracks"
    );

    Ok(ctx
        .resolver
        .resolve_all(&survivors, &ctx.config.device_profile, &paths)
        .await?)
}

fn spawn_playback_report(ctx: &OpContext<'_>, track: PlayableTrack) {
    let reporter = ctx.backends.reporter.clone();
    tokio::spawn(async move {
        if let Err(err) = reporter
            .report_playback_started(&track, seconds_to_ticks(0.0))
            .await
        {
            warn!(track_id = %track.id, error = %err, "Playback report failed");
        }
    });
}
