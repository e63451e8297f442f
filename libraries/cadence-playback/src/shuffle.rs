//! Shuffle / deshuffle state machine
//!
//! ```text
//!              handle_shuffle                handle_shuffle (refresh)
//! Unshuffled ─────────────────▶ Shuffled ◀──────────────────┐
//!     ▲                            │  └──────────────────────┘
//!     └────── handle_deshuffle ────┘
//! ```
//!
//! The whole-library queue is special: shuffling pulls a fresh random sample
//! from the catalog instead of permuting the current list, and deshuffling
//! it samples again because a random library queue has no canonical order.

use crate::device_sync::{adopt_device_index, rebuild_around_current, refresh_from_device};
use crate::error::Result;
use crate::events::{NoticeKind, QueueEvent};
use crate::loader::prepare_tracks;
use crate::service::OpContext;
use crate::store::QueueStore;
use cadence_core::{
    CatalogItem, DevicePlaylistId, DeviceState, LibraryFilters, PlayableTrack, QueueReference,
    SortOrder, SystemQueueKind, TrackId,
};
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Shuffle in place with the thread-local RNG
///
/// Fisher-Yates: every ordering is equally likely.
pub fn shuffle_tracks<T>(tracks: &mut [T]) {
    fisher_yates(tracks, &mut thread_rng());
}

/// Fisher-Yates shuffle with a caller-provided RNG
pub fn fisher_yates<T, R: Rng + ?Sized>(tracks: &mut [T], rng: &mut R) {
    tracks.shuffle(rng);
}

/// What a general shuffle or deshuffle operates on
struct ShuffleTarget {
    playlist: DevicePlaylistId,
    index: usize,
    current: PlayableTrack,
}

fn shuffle_target(
    store: &QueueStore,
    playlist: Option<DevicePlaylistId>,
    min_len: usize,
) -> Option<ShuffleTarget> {
    if store.queue().len() < min_len {
        return None;
    }
    Some(ShuffleTarget {
        playlist: playlist?,
        index: store.current_index()?,
        current: store.current_track()?.clone(),
    })
}

pub(crate) async fn handle_shuffle(
    ctx: &OpContext<'_>,
    store: &mut QueueStore,
    filters: &LibraryFilters,
) -> Result<Vec<PlayableTrack>> {
    if store.queue_ref().is_some_and(QueueReference::is_library) {
        return shuffle_library(ctx, store, filters).await;
    }

    let state = ctx.backends.device.get_state().await?;
    adopt_device_index(store, state.current_index);

    match shuffle_target(store, state.current_playlist_id, 2) {
        Some(target) => shuffle_general(ctx, store, target).await,
        None => {
            ctx.events.notice(NoticeKind::NothingToShuffle);
            Ok(Vec::new())
        }
    }
}

/// Replace the queue with a random sample of the whole library
///
/// No current track is required. The active track, if any, keeps playing
/// from where it was.
pub(crate) async fn shuffle_library(
    ctx: &OpContext<'_>,
    store: &mut QueueStore,
    filters: &LibraryFilters,
) -> Result<Vec<PlayableTrack>> {
    let state = ctx.backends.device.get_state().await?;
    adopt_device_index(store, state.current_index);

    let fetched = ctx
        .backends
        .catalog
        .fetch_tracks(filters, SortOrder::Random, ctx.config.library_sample_size, 0)
        .await;

    match fetched {
        Ok(items) => refill_library(ctx, store, filters, items, &state).await,
        Err(err) => match shuffle_target(store, state.current_playlist_id, 2) {
            Some(target) => {
                warn!(error = %err, "Library sample failed, shuffling the current queue instead");
                shuffle_general(ctx, store, target).await
            }
            None => {
                warn!(error = %err, "Library sample failed");
                ctx.events.notice(NoticeKind::LibraryUnavailable);
                Ok(Vec::new())
            }
        },
    }
}

async fn refill_library(
    ctx: &OpContext<'_>,
    store: &mut QueueStore,
    filters: &LibraryFilters,
    mut items: Vec<CatalogItem>,
    state: &DeviceState,
) -> Result<Vec<PlayableTrack>> {
    let device = ctx.backends.device.as_ref();

    if filters.downloaded_only {
        let downloaded: HashSet<TrackId> = ctx
            .backends
            .downloads
            .get_all_downloaded()
            .await?
            .into_iter()
            .map(|d| d.track_id)
            .collect();
        items.retain(|item| downloaded.contains(&item.id));
    }

    let mut sample = prepare_tracks(ctx, items, true).await?;
    if sample.is_empty() {
        ctx.events.notice(NoticeKind::NothingMatched);
        return Ok(Vec::new());
    }

    let current = store.current_track().cloned();
    let start_index = match &current {
        Some(current) => match sample.iter().position(|t| t.id == current.id) {
            Some(position) => position,
            None => {
                sample.insert(0, current.clone());
                0
            }
        },
        None => 0,
    };

    let queue_ref = QueueReference::system(SystemQueueKind::Library);
    let playlist = device.create_playlist(queue_ref.playlist_name()).await?;
    device.add_tracks(&playlist, &sample, None).await?;
    device.load_playlist(&playlist).await?;
    device.skip_to_index(start_index).await?;
    if current.is_some() {
        device.seek(state.current_position).await?;
        if state.is_playing {
            device.play().await?;
        }
    }

    info!(
        playlist = %playlist,
        tracks = sample.len(),
        start = start_index,
        kept_current = current.is_some(),
        "Refilled library queue"
    );

    store.set_new_queue(sample.clone(), queue_ref, start_index, true);
    store.set_unshuffled_queue(sample.clone());
    store.set_canonical_index(Some(start_index));

    ctx.events.emit(QueueEvent::QueueLoaded {
        length: sample.len(),
        start_index,
    });
    ctx.events.emit(QueueEvent::ShuffleChanged { shuffled: true });

    Ok(sample)
}

async fn shuffle_general(
    ctx: &OpContext<'_>,
    store: &mut QueueStore,
    target: ShuffleTarget,
) -> Result<Vec<PlayableTrack>> {
    let device = ctx.backends.device.as_ref();
    let previous = store.queue().to_vec();

    // A reshuffle keeps the canonical order saved by the first shuffle.
    let (canonical, canonical_slot) =
        if store.shuffled() && !store.unshuffled_queue().is_empty() {
            (store.unshuffled_queue().to_vec(), store.canonical_index())
        } else {
            (previous.clone(), Some(target.index))
        };

    let mut others = without_slot(&previous, Some(target.index));
    shuffle_tracks(&mut others);

    // Nothing upcoming: shuffle the history and keep the current slot.
    let is_last = target.index + 1 >= previous.len();
    let final_index = is_last.then_some(target.index);

    rebuild_around_current(
        device,
        &target.playlist,
        &target.current.id,
        &previous,
        &others,
        final_index,
    )
    .await?;
    refresh_from_device(device, store).await?;

    store.set_shuffled(true);
    store.set_unshuffled_queue(canonical);
    store.set_canonical_index(canonical_slot);

    debug!(
        tracks = store.queue().len(),
        current_index = ?store.current_index(),
        history_only = is_last,
        "Shuffled queue"
    );

    ctx.events.emit(QueueEvent::QueueChanged {
        length: store.queue().len(),
        current_index: store.current_index(),
    });
    ctx.events.emit(QueueEvent::ShuffleChanged { shuffled: true });

    Ok(store.queue().to_vec())
}

pub(crate) async fn handle_deshuffle(
    ctx: &OpContext<'_>,
    store: &mut QueueStore,
    filters: &LibraryFilters,
) -> Result<Vec<PlayableTrack>> {
    if !store.shuffled() || store.unshuffled_queue().is_empty() {
        debug!("Deshuffle requested while not shuffled");
        return Ok(Vec::new());
    }

    // A random library sample has no canonical order to return to.
    if store.queue_ref().is_some_and(QueueReference::is_library) {
        return handle_shuffle(ctx, store, filters).await;
    }

    let device = ctx.backends.device.as_ref();
    let state = device.get_state().await?;
    adopt_device_index(store, state.current_index);

    let Some(target) = shuffle_target(store, state.current_playlist_id, 1) else {
        ctx.events.notice(NoticeKind::NoActivePlaylist);
        return Ok(Vec::new());
    };

    let previous = store.queue().to_vec();
    let final_index = store.canonical_index();
    let others = without_slot(store.unshuffled_queue(), final_index);

    rebuild_around_current(
        device,
        &target.playlist,
        &target.current.id,
        &previous,
        &others,
        final_index,
    )
    .await?;
    refresh_from_device(device, store).await?;

    store.set_shuffled(false);
    store.clear_unshuffled_queue();

    debug!(
        tracks = store.queue().len(),
        current_index = ?store.current_index(),
        "Restored canonical order"
    );

    ctx.events.emit(QueueEvent::QueueChanged {
        length: store.queue().len(),
        current_index: store.current_index(),
    });
    ctx.events.emit(QueueEvent::ShuffleChanged { shuffled: false });

    Ok(store.queue().to_vec())
}

/// Every track except the one at `slot`, in order
fn without_slot(tracks: &[PlayableTrack], slot: Option<usize>) -> Vec<PlayableTrack> {
    tracks
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != slot)
        .map(|(_, track)| track.clone())
        .collect()
}
