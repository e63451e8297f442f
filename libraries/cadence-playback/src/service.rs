//! Queue service
//!
//! Owns the queue store and every collaborator. Each entry point holds one
//! async mutex for its whole duration, so operations run one at a time in
//! arrival order and readers never see a half-applied change.

use crate::config::QueueConfig;
use crate::error::Result;
use crate::events::{EventSink, QueueEvent};
use crate::insertion;
use crate::loader::{self, LoadOutcome, LoadRequest};
use crate::resolver::TrackResolver;
use crate::shuffle;
use crate::store::{QueueSnapshot, QueueStore};
use cadence_core::{
    Catalog, CatalogItem, DownloadManager, LibraryFilters, MediaUrls, NetworkMonitor,
    PlayableTrack, PlaybackDevice, PlaybackReporter,
};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::info;
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// External collaborators the queue engine drives
#[derive(Clone)]
pub struct QueueBackends {
    pub device: Arc<dyn PlaybackDevice>,
    pub catalog: Arc<dyn Catalog>,
    pub downloads: Arc<dyn DownloadManager>,
    pub network: Arc<dyn NetworkMonitor>,
    pub reporter: Arc<dyn PlaybackReporter>,
    pub urls: Arc<dyn MediaUrls>,
}

/// Borrowed view handed to each operation while the lock is held
pub(crate) struct OpContext<'a> {
    pub(crate) backends: &'a QueueBackends,
    pub(crate) resolver: &'a TrackResolver,
    pub(crate) config: &'a QueueConfig,
    pub(crate) events: &'a EventSink,
}

struct Inner {
    store: QueueStore,
    filters: LibraryFilters,
    resolver: TrackResolver,
}

/// Serialized entry point to the playback queue
///
/// # Example
///
/// ```rust,ignore
/// let service = QueueService::new(backends, QueueConfig::default());
/// let mut events = service.subscribe();
///
/// service
///     .load_queue(LoadRequest::new(album_tracks, 2, QueueReference::collection(id, "Album")))
///     .await?;
/// service.handle_shuffle().await?;
/// ```
pub struct QueueService {
    backends: QueueBackends,
    config: QueueConfig,
    events: EventSink,
    inner: Mutex<Inner>,
}

impl QueueService {
    /// Create a service with an empty queue
    pub fn new(backends: QueueBackends, config: QueueConfig) -> Self {
        let resolver = new_resolver(&backends);
        Self {
            backends,
            config,
            events: EventSink::new(EVENT_CAPACITY),
            inner: Mutex::new(Inner {
                store: QueueStore::new(),
                filters: LibraryFilters::default(),
                resolver,
            }),
        }
    }

    /// Subscribe to queue events
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.events.subscribe()
    }

    /// Engine configuration
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Consistent copy of the queue state
    pub async fn snapshot(&self) -> QueueSnapshot {
        self.inner.lock().await.store.snapshot()
    }

    /// Replace the queue with `request.source`
    pub async fn load_queue(&self, request: LoadRequest) -> Result<LoadOutcome> {
        let mut guard = self.inner.lock().await;
        let Inner {
            store, resolver, ..
        } = &mut *guard;
        loader::load_queue(&self.context(resolver), store, request).await
    }

    /// Insert `items` after the active track
    pub async fn play_next(&self, items: Vec<CatalogItem>) -> Result<Vec<PlayableTrack>> {
        let mut guard = self.inner.lock().await;
        let Inner {
            store, resolver, ..
        } = &mut *guard;
        insertion::play_next(&self.context(resolver), store, items).await
    }

    /// Append `items` to the active queue
    pub async fn play_later(&self, items: Vec<CatalogItem>) -> Result<Vec<PlayableTrack>> {
        let mut guard = self.inner.lock().await;
        let Inner {
            store, resolver, ..
        } = &mut *guard;
        insertion::play_later(&self.context(resolver), store, items).await
    }

    /// Shuffle the active queue, or re-sample the library queue
    pub async fn handle_shuffle(&self) -> Result<Vec<PlayableTrack>> {
        let mut guard = self.inner.lock().await;
        let Inner {
            store,
            filters,
            resolver,
        } = &mut *guard;
        shuffle::handle_shuffle(&self.context(resolver), store, filters).await
    }

    /// Replace whatever is queued with a random library sample
    pub async fn shuffle_library(&self) -> Result<Vec<PlayableTrack>> {
        let mut guard = self.inner.lock().await;
        let Inner {
            store,
            filters,
            resolver,
        } = &mut *guard;
        shuffle::shuffle_library(&self.context(resolver), store, filters).await
    }

    /// Return to the canonical order
    pub async fn handle_deshuffle(&self) -> Result<Vec<PlayableTrack>> {
        let mut guard = self.inner.lock().await;
        let Inner {
            store,
            filters,
            resolver,
        } = &mut *guard;
        shuffle::handle_deshuffle(&self.context(resolver), store, filters).await
    }

    /// Filters applied to library samples
    pub async fn set_library_filters(&self, filters: LibraryFilters) {
        self.inner.lock().await.filters = filters;
    }

    /// Active library filters
    pub async fn library_filters(&self) -> LibraryFilters {
        self.inner.lock().await.filters.clone()
    }

    /// Drop all queue state and start a new playback session (sign-out)
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        inner.store.clear();
        inner.filters = LibraryFilters::default();
        inner.resolver = new_resolver(&self.backends);
        info!("Queue state reset");
    }

    fn context<'a>(&'a self, resolver: &'a TrackResolver) -> OpContext<'a> {
        OpContext {
            backends: &self.backends,
            resolver,
            config: &self.config,
            events: &self.events,
        }
    }
}

fn new_resolver(backends: &QueueBackends) -> TrackResolver {
    TrackResolver::new(backends.urls.clone()).with_session(Uuid::new_v4().to_string())
}
