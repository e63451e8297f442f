//! Queue state store
//!
//! Single source of truth for the live queue, the canonical (unshuffled)
//! order, the active position, the shuffle flag, and the queue reference.
//! Mutators are crate-private: only the queue operations change it, and
//! they do so while holding the service lock.

use cadence_core::{PlayableTrack, QueueReference};
use serde::{Deserialize, Serialize};

/// Queue state
///
/// Structure while shuffled:
/// ```text
/// queue:            [C, A, D, B]   <- what the device plays
/// unshuffled_queue: [A, B, C, D]   <- canonical order to return to
/// current_index:    0  (C)
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueueStore {
    queue: Vec<PlayableTrack>,
    unshuffled_queue: Vec<PlayableTrack>,
    current_index: Option<usize>,
    current_track: Option<PlayableTrack>,
    shuffled: bool,
    queue_ref: Option<QueueReference>,
    // Slot of the active entry in `unshuffled_queue` while shuffled
    canonical_slot: Option<usize>,
}

/// Owned, read-only copy of the queue state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Live order
    pub queue: Vec<PlayableTrack>,
    /// Canonical order (empty when not shuffled)
    pub unshuffled_queue: Vec<PlayableTrack>,
    /// Active position in `queue`
    pub current_index: Option<usize>,
    /// Active track
    pub current_track: Option<PlayableTrack>,
    /// Whether `queue` is a shuffled order
    pub shuffled: bool,
    /// Origin of the queue
    pub queue_ref: Option<QueueReference>,
}

impl QueueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Live queue, in device order
    pub fn queue(&self) -> &[PlayableTrack] {
        &self.queue
    }

    /// Canonical order saved for deshuffle
    pub fn unshuffled_queue(&self) -> &[PlayableTrack] {
        &self.unshuffled_queue
    }

    /// Index of the active track in the live queue
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// The active track
    pub fn current_track(&self) -> Option<&PlayableTrack> {
        self.current_track.as_ref()
    }

    /// Whether the live queue is shuffled
    pub fn shuffled(&self) -> bool {
        self.shuffled
    }

    /// Origin of the active queue
    pub fn queue_ref(&self) -> Option<&QueueReference> {
        self.queue_ref.as_ref()
    }

    /// Whether no queue is loaded
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Copy the whole state
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            queue: self.queue.clone(),
            unshuffled_queue: self.unshuffled_queue.clone(),
            current_index: self.current_index,
            current_track: self.current_track.clone(),
            shuffled: self.shuffled,
            queue_ref: self.queue_ref.clone(),
        }
    }

    /// Replace the queue wholesale
    ///
    /// Clears `unshuffled_queue`; callers that want one set it afterwards in
    /// the same critical section.
    pub(crate) fn set_new_queue(
        &mut self,
        queue: Vec<PlayableTrack>,
        queue_ref: QueueReference,
        start_index: usize,
        shuffled: bool,
    ) {
        self.queue = queue;
        self.queue_ref = Some(queue_ref);
        self.shuffled = shuffled;
        self.unshuffled_queue.clear();
        self.canonical_slot = None;
        self.set_current_index(Some(start_index));
    }

    /// Replace the live queue, keeping the active position when still valid
    pub(crate) fn set_queue(&mut self, queue: Vec<PlayableTrack>) {
        self.queue = queue;
        self.set_current_index(self.current_index);
    }

    pub(crate) fn set_unshuffled_queue(&mut self, queue: Vec<PlayableTrack>) {
        self.unshuffled_queue = queue;
    }

    pub(crate) fn clear_unshuffled_queue(&mut self) {
        self.unshuffled_queue.clear();
        self.canonical_slot = None;
    }

    /// Position of the active entry in the canonical order
    ///
    /// Unshuffled, the canonical order lines up with the live queue. While
    /// shuffled, the slot recorded by the shuffle is used as long as it still
    /// holds the active track, so repeated tracks resolve to the right copy.
    /// Otherwise the first entry with the active id is taken.
    pub(crate) fn canonical_index(&self) -> Option<usize> {
        let current = self.current_track.as_ref()?;
        let recorded = if self.shuffled {
            self.canonical_slot
        } else {
            self.current_index
        };
        recorded
            .filter(|i| {
                self.unshuffled_queue
                    .get(*i)
                    .is_some_and(|t| t.id == current.id)
            })
            .or_else(|| {
                self.unshuffled_queue
                    .iter()
                    .position(|t| t.id == current.id)
            })
    }

    pub(crate) fn set_canonical_index(&mut self, slot: Option<usize>) {
        self.canonical_slot = slot;
    }

    pub(crate) fn unshuffled_queue_mut(&mut self) -> &mut Vec<PlayableTrack> {
        &mut self.unshuffled_queue
    }

    pub(crate) fn set_shuffled(&mut self, shuffled: bool) {
        self.shuffled = shuffled;
    }

    /// Point at `index`, keeping `current_track` equal to `queue[index]`
    ///
    /// Out-of-range or absent indices clear both fields.
    pub(crate) fn set_current_index(&mut self, index: Option<usize>) {
        match index.and_then(|i| self.queue.get(i).map(|t| (i, t.clone()))) {
            Some((i, track)) => {
                self.current_index = Some(i);
                self.current_track = Some(track);
            }
            None => {
                self.current_index = None;
                self.current_track = None;
            }
        }
    }

    /// Drop everything (sign-out)
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
