//! Cadence Media Server Client
//!
//! HTTP client for a Jellyfin-style media server.
//!
//! # Features
//!
//! - **Catalog**: random library samples with filters, album/playlist listings
//! - **Media URLs**: universal audio stream URLs and artwork URLs
//! - **Reporting**: playback-started reports
//!
//! `MediaServerClient` implements `Catalog`, `MediaUrls` and
//! `PlaybackReporter` from `cadence-core`, so one instance can back all
//! three slots of the queue engine.
//!
//! # Example
//!
//! ```ignore
//! use cadence_server_client::{MediaServerClient, ServerConfig};
//! use cadence_core::{Catalog, LibraryFilters, SortOrder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::with_credentials("https://media.example.com", "token", "user-1");
//!     let client = MediaServerClient::new(config)?;
//!
//!     let sample = client
//!         .fetch_tracks(&LibraryFilters::default(), SortOrder::Random, 100, 0)
//!         .await?;
//!     println!("Sampled {} tracks", sample.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod library;
mod sessions;
mod types;
mod urls;

// Re-export main types
pub use client::MediaServerClient;
pub use error::{Result, ServerClientError};
pub use types::{ItemsResponse, PlayMethod, PlaybackStartInfo, ServerConfig};
