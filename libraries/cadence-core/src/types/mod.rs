/// Core domain types for Cadence
mod catalog;
mod device;
mod ids;
mod library;
mod network;
mod queue_ref;
mod track;

pub use catalog::{ArtistRef, CatalogItem, UserData};
pub use device::{DevicePlaylistId, DeviceProfile, DeviceState};
pub use ids::{HasTrackId, TrackId};
pub use library::{DownloadedTrack, LibraryFilters, SortOrder};
pub use network::NetworkStatus;
pub use queue_ref::{QueueReference, SystemQueueKind};
pub use track::{PlayableTrack, TrackPayload, TrackSource};
