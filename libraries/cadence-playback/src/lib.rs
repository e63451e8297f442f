//! Cadence - Playback Queue Orchestration
//!
//! Builds and maintains the queue an external playback device plays from.
//!
//! This crate provides:
//! - Availability filtering (stream when online, downloads only otherwise)
//! - Catalog item to playable track resolution
//! - Queue loading with optional shuffle
//! - Play-next / play-later insertion without interrupting playback
//! - Shuffle / deshuffle that keeps the canonical order recoverable
//! - Whole-library random refill
//!
//! # Architecture
//!
//! `cadence-playback` owns no I/O of its own. The device, catalog, download
//! index, network monitor and playback reporter are supplied as
//! `cadence-core` traits through [`QueueBackends`]. [`QueueService`]
//! serializes every operation behind a single async mutex, so concurrent
//! callers run one after another in arrival order.
//!
//! # Example: Load and Shuffle
//!
//! ```rust,no_run
//! use cadence_core::{CatalogItem, QueueReference};
//! use cadence_playback::{LoadRequest, QueueBackends, QueueConfig, QueueService};
//!
//! # async fn run(backends: QueueBackends) -> cadence_playback::Result<()> {
//! let service = QueueService::new(backends, QueueConfig::default());
//!
//! let album = vec![CatalogItem::new("a"), CatalogItem::new("b"), CatalogItem::new("c")];
//! let outcome = service
//!     .load_queue(LoadRequest::new(album, 1, QueueReference::collection("al1", "Album")))
//!     .await?;
//! assert_eq!(outcome.final_start_index, 1);
//!
//! service.handle_shuffle().await?;
//! service.handle_deshuffle().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Filtering
//!
//! ```rust
//! use cadence_core::{CatalogItem, NetworkStatus, TrackId};
//! use cadence_playback::filter_available;
//! use std::collections::HashSet;
//!
//! let items = vec![CatalogItem::new("a"), CatalogItem::new("b")];
//! let downloaded: HashSet<TrackId> = [TrackId::new("b")].into_iter().collect();
//!
//! let playable = filter_available(Some(NetworkStatus::Offline), items, &downloaded);
//! assert_eq!(playable.len(), 1);
//! assert_eq!(playable[0].id.as_str(), "b");
//! ```

mod availability;
mod config;
mod device_sync;
mod error;
pub mod events;
mod insertion;
mod loader;
mod resolver;
mod service;
pub mod shuffle;
mod store;

// Public exports
pub use availability::filter_available;
pub use config::QueueConfig;
pub use error::{QueueError, Result};
pub use events::{NoticeKind, QueueEvent};
pub use loader::{LoadOutcome, LoadRequest};
pub use resolver::TrackResolver;
pub use service::{QueueBackends, QueueService};
pub use shuffle::{fisher_yates, shuffle_tracks};
pub use store::{QueueSnapshot, QueueStore};
