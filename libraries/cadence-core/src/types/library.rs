/// Library query and download types
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filters applied when sampling the whole library
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryFilters {
    /// Only tracks marked as favorite
    pub favorites_only: bool,

    /// Only tracks never played
    pub unplayed_only: bool,

    /// Restrict to these genres (empty = any)
    pub genre_ids: Vec<String>,

    /// Inclusive production year range
    pub year_range: Option<(u32, u32)>,

    /// Only tracks available as local downloads
    pub downloaded_only: bool,
}

impl LibraryFilters {
    /// Years covered by `year_range`, in ascending order
    ///
    /// A reversed range is normalized rather than treated as empty.
    pub fn years(&self) -> Vec<u32> {
        match self.year_range {
            Some((a, b)) => (a.min(b)..=a.max(b)).collect(),
            None => Vec::new(),
        }
    }
}

/// Sort order for catalog queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Server-side random order
    Random,

    /// Alphabetical by name
    Name,

    /// Most recently added first
    DateAdded,
}

/// A track available on local storage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DownloadedTrack {
    /// Catalog identifier of the downloaded track
    pub track_id: TrackId,

    /// Location of the audio file
    pub local_path: PathBuf,
}
