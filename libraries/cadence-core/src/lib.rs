//! Cadence Core
//!
//! Platform-agnostic core types, collaborator contracts, and error handling
//! for the Cadence playback queue engine.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `CatalogItem`, `PlayableTrack`, `QueueReference`, etc.
//! - **Collaborator Traits**: `PlaybackDevice`, `Catalog`, `DownloadManager`,
//!   `NetworkMonitor`, `PlaybackReporter`, `MediaUrls`
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//! - **Tick conversion**: server ticks (100ns units) to and from seconds
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{QueueReference, SystemQueueKind};
//! use cadence_core::ticks::{seconds_to_ticks, ticks_to_seconds};
//!
//! let library = QueueReference::system(SystemQueueKind::Library);
//! assert!(library.is_library());
//!
//! let album = QueueReference::collection("album-1", "Blue Train");
//! assert_eq!(album.playlist_name(), "Blue Train");
//!
//! assert_eq!(ticks_to_seconds(seconds_to_ticks(215.0)), 215);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod ticks;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use traits::{
    Catalog, DownloadManager, MediaUrls, NetworkMonitor, PlaybackDevice, PlaybackReporter,
};

pub use types::{
    ArtistRef, CatalogItem, DevicePlaylistId, DeviceProfile, DeviceState, DownloadedTrack,
    HasTrackId, LibraryFilters, NetworkStatus, PlayableTrack, QueueReference, SortOrder,
    SystemQueueKind, TrackId, TrackPayload, TrackSource, UserData,
};
