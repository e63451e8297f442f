//! Queue Events
//!
//! Event-based communication for UI synchronization. Events are emitted when:
//! - A fresh queue is loaded
//! - The live queue changes (insertions, shuffle, deshuffle)
//! - Shuffle state flips
//! - An operation turns into a no-op the user should hear about (notices)

use cadence_core::TrackId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Events emitted by the queue service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueueEvent {
    /// A new queue replaced the previous one
    QueueLoaded {
        /// Number of tracks in the live queue
        length: usize,
        /// Index playback starts from
        start_index: usize,
    },

    /// Live queue contents or order changed
    QueueChanged {
        /// New queue length
        length: usize,
        /// Index of the active track, if any
        current_index: Option<usize>,
    },

    /// Shuffle was switched on or off
    ShuffleChanged {
        /// Whether the live queue is now shuffled
        shuffled: bool,
    },

    /// Playback was started by a queue load
    PlaybackStarted {
        /// Track playback started on
        track_id: TrackId,
    },

    /// Transient, user-visible notice
    Notice {
        /// What happened
        kind: NoticeKind,
        /// Human-readable text
        message: String,
    },
}

/// Reasons an operation turned into a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    /// Shuffle needs at least two tracks and an active track
    NothingToShuffle,

    /// Append requires a playlist on the device
    NoActivePlaylist,

    /// Library could not be sampled and there was no queue to fall back to
    LibraryUnavailable,

    /// Library sample came back empty under the active filters
    NothingMatched,
}

impl NoticeKind {
    /// Default message for this notice
    pub fn message(self) -> &'static str {
        match self {
            NoticeKind::NothingToShuffle => "Nothing to shuffle",
            NoticeKind::NoActivePlaylist => "Nothing is playing",
            NoticeKind::LibraryUnavailable => "Library is unavailable right now",
            NoticeKind::NothingMatched => "No tracks match the current filters",
        }
    }
}

/// Broadcast sender wrapper; emitting with no subscriber is not an error
#[derive(Debug, Clone)]
pub(crate) struct EventSink {
    sender: broadcast::Sender<QueueEvent>,
}

impl EventSink {
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.sender.subscribe()
    }

    pub(crate) fn emit(&self, event: QueueEvent) {
        let _ = self.sender.send(event);
    }

    pub(crate) fn notice(&self, kind: NoticeKind) {
        tracing::info!(?kind, "Queue notice");
        self.emit(QueueEvent::Notice {
            kind,
            message: kind.message().to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_subscribers_is_fine() {
        let sink = EventSink::new(4);
        sink.emit(QueueEvent::ShuffleChanged { shuffled: true });
    }

    #[test]
    fn subscribers_receive_notices() {
        let sink = EventSink::new(4);
        let mut rx = sink.subscribe();
        sink.notice(NoticeKind::NothingToShuffle);

        match rx.try_recv().unwrap() {
            QueueEvent::Notice { kind, message } => {
                assert_eq!(kind, NoticeKind::NothingToShuffle);
                assert_eq!(message, "Nothing to shuffle");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn events_serialize() {
        let json = serde_json::to_string(&QueueEvent::QueueChanged {
            length: 3,
            current_index: Some(1),
        })
        .unwrap();
        assert!(json.contains("QueueChanged"));
    }
}
