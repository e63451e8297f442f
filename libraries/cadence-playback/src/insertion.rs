//! Play-next and play-later
//!
//! Both insert into the live device playlist without interrupting the
//! active track, mirror the insertion into the canonical order, and then
//! re-read the device's queue as the source of truth.

use crate::device_sync::{adopt_device_index, refresh_from_device};
use crate::error::Result;
use crate::events::{NoticeKind, QueueEvent};
use crate::loader::prepare_tracks;
use crate::service::OpContext;
use crate::store::QueueStore;
use cadence_core::{CatalogItem, PlayableTrack, QueueReference, SystemQueueKind};
use tracing::{debug, info};

/// Insert `items` right after the active track
///
/// With nothing queued yet, the items become a new ad-hoc queue that is
/// loaded but not started.
pub(crate) async fn play_next(
    ctx: &OpContext<'_>,
    store: &mut QueueStore,
    items: Vec<CatalogItem>,
) -> Result<Vec<PlayableTrack>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let device = ctx.backends.device.as_ref();
    let tracks = prepare_tracks(ctx, items, false).await?;
    let state = device.get_state().await?;

    let playlist = match state.current_playlist_id {
        Some(playlist) if !store.is_empty() => playlist,
        _ => return start_adhoc_queue(ctx, store, tracks).await,
    };

    adopt_device_index(store, state.current_index);
    let insert_at = state
        .current_index
        .or(store.current_index())
        .map_or(0, |index| index + 1);

    device.add_tracks(&playlist, &tracks, Some(insert_at)).await?;

    let canonical_position = store.canonical_index();
    // A cleared canonical order stays cleared; the live queue is canonical then.
    let unshuffled = store.unshuffled_queue_mut();
    if !unshuffled.is_empty() {
        match canonical_position {
            Some(position) => {
                let tail = unshuffled.split_off(position + 1);
                unshuffled.extend(tracks.iter().cloned());
                unshuffled.extend(tail);
            }
            None => unshuffled.extend(tracks.iter().cloned()),
        }
    }

    refresh_from_device(device, store).await?;

    debug!(
        inserted = tracks.len(),
        at = insert_at,
        tracks = store.queue().len(),
        "Queued tracks to play next"
    );
    ctx.events.emit(QueueEvent::QueueChanged {
        length: store.queue().len(),
        current_index: store.current_index(),
    });

    Ok(tracks)
}

/// Append `items` to the end of the active queue
pub(crate) async fn play_later(
    ctx: &OpContext<'_>,
    store: &mut QueueStore,
    items: Vec<CatalogItem>,
) -> Result<Vec<PlayableTrack>> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let device = ctx.backends.device.as_ref();
    let state = device.get_state().await?;
    let Some(playlist) = state.current_playlist_id else {
        ctx.events.notice(NoticeKind::NoActivePlaylist);
        return Ok(Vec::new());
    };
    adopt_device_index(store, state.current_index);

    let tracks = prepare_tracks(ctx, items, false).await?;
    device.add_tracks(&playlist, &tracks, None).await?;
    let unshuffled = store.unshuffled_queue_mut();
    if !unshuffled.is_empty() {
        unshuffled.extend(tracks.iter().cloned());
    }

    refresh_from_device(device, store).await?;

    debug!(
        appended = tracks.len(),
        tracks = store.queue().len(),
        "Queued tracks to play later"
    );
    ctx.events.emit(QueueEvent::QueueChanged {
        length: store.queue().len(),
        current_index: store.current_index(),
    });

    Ok(tracks)
}

async fn start_adhoc_queue(
    ctx: &OpContext<'_>,
    store: &mut QueueStore,
    tracks: Vec<PlayableTrack>,
) -> Result<Vec<PlayableTrack>> {
    let device = ctx.backends.device.as_ref();
    let queue_ref = QueueReference::system(SystemQueueKind::Adhoc);

    let playlist = device.create_playlist(queue_ref.playlist_name()).await?;
    device.add_tracks(&playlist, &tracks, None).await?;
    device.load_playlist(&playlist).await?;

    info!(playlist = %playlist, tracks = tracks.len(), "Started ad-hoc queue");

    store.set_new_queue(tracks.clone(), queue_ref, 0, false);
    store.set_unshuffled_queue(tracks.clone());

    ctx.events.emit(QueueEvent::QueueLoaded {
        length: tracks.len(),
        start_index: 0,
    });

    Ok(tracks)
}
