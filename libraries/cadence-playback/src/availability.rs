//! Availability filter
//!
//! Decides which tracks are playable given connectivity: everything when the
//! network is healthy (or unknown), only local downloads otherwise.

use cadence_core::{HasTrackId, NetworkStatus, TrackId};
use std::collections::HashSet;

/// Keep the candidates that can play under `status`
///
/// Relative order is preserved. With a degraded or offline network and an
/// empty download set the result is empty.
pub fn filter_available<T: HasTrackId>(
    status: Option<NetworkStatus>,
    candidates: Vec<T>,
    downloaded: &HashSet<TrackId>,
) -> Vec<T> {
    if NetworkStatus::is_streamable(status) {
        return candidates;
    }

    candidates
        .into_iter()
        .filter(|c| downloaded.contains(c.track_id()))
        .collect()
}
