/// Queue reference: what kind of collection produced the active queue
use serde::{Deserialize, Serialize};

/// Tag describing the origin of the current queue
///
/// Only used to pick refill behaviour during shuffle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueReference {
    /// An album or playlist from the catalog
    Collection { id: String, display_name: String },

    /// A symbolic queue owned by the application
    SystemQueue { kind: SystemQueueKind },
}

/// Kinds of symbolic system queues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemQueueKind {
    /// The whole library, sampled at random
    Library,

    /// A queue assembled ad hoc (e.g. by "play next" with nothing playing)
    Adhoc,
}

impl QueueReference {
    /// Reference to a catalog collection
    pub fn collection(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::Collection {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Reference to a system queue
    pub fn system(kind: SystemQueueKind) -> Self {
        Self::SystemQueue { kind }
    }

    /// Whether this queue is the randomly sampled whole library
    pub fn is_library(&self) -> bool {
        matches!(
            self,
            Self::SystemQueue {
                kind: SystemQueueKind::Library
            }
        )
    }

    /// Name used for the device playlist backing this queue
    pub fn playlist_name(&self) -> &str {
        match self {
            Self::Collection { display_name, .. } => display_name,
            Self::SystemQueue {
                kind: SystemQueueKind::Library,
            } => "Library",
            Self::SystemQueue {
                kind: SystemQueueKind::Adhoc,
            } => "Queue",
        }
    }
}
