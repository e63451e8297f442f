//! Device-side queue rewrites shared by shuffle, deshuffle, and insertion

use crate::store::QueueStore;
use cadence_core::{DevicePlaylistId, PlayableTrack, PlaybackDevice, TrackId};
use std::collections::HashSet;
use tracing::debug;

/// Rewrite the device playlist around the active entry without stopping it
///
/// 1. remove every track id in `previous`; the device keeps the active
///    entry, so it is left alone in the playlist;
/// 2. move the active entry to position 0;
/// 3. insert `others` after it, in order;
/// 4. move the active entry to `final_index` when given.
///
/// `others` may hold more copies of the active track. Reorders address the
/// first entry with an id, which is the active one once it sits at 0.
pub(crate) async fn rebuild_around_current(
    device: &dyn PlaybackDevice,
    playlist: &DevicePlaylistId,
    current: &TrackId,
    previous: &[PlayableTrack],
    others: &[PlayableTrack],
    final_index: Option<usize>,
) -> cadence_core::Result<()> {
    let mut removed: HashSet<&TrackId> = HashSet::new();
    for track in previous {
        if removed.insert(&track.id) {
            device.remove_track(playlist, &track.id).await?;
        }
    }

    device.reorder_track(playlist, current, 0).await?;

    if !others.is_empty() {
        device.add_tracks(playlist, others, Some(1)).await?;
    }

    if let Some(index) = final_index.filter(|i| *i > 0) {
        device.reorder_track(playlist, current, index).await?;
    }

    debug!(
        playlist = %playlist,
        removed = removed.len(),
        inserted = others.len(),
        final_index = ?final_index,
        "Rebuilt device queue around current track"
    );

    Ok(())
}

/// Pull the device's authoritative queue and position into the store
pub(crate) async fn refresh_from_device(
    device: &dyn PlaybackDevice,
    store: &mut QueueStore,
) -> cadence_core::Result<()> {
    let actual = device.get_actual_queue().await?;
    let state = device.get_state().await?;
    store.set_queue(actual);
    store.set_current_index(state.current_index.or(store.current_index()));
    Ok(())
}

/// Adopt the device's active index before operating on the queue
///
/// The device advances through the playlist on its own, so the stored
/// index goes stale between operations.
pub(crate) fn adopt_device_index(store: &mut QueueStore, device_index: Option<usize>) {
    if let Some(index) = device_index.filter(|i| *i < store.queue().len()) {
        store.set_current_index(Some(index));
    }
}
