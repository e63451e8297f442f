/// Download index backed by a local directory
use async_trait::async_trait;
use cadence_core::{DownloadManager, DownloadedTrack, Result, TrackId};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "m4a", "aac", "ogg", "opus", "wav", "alac"];

/// Treats every `<trackId>.<ext>` audio file in a directory as a download
#[derive(Debug, Clone)]
pub struct LocalDownloads {
    directory: PathBuf,
}

impl LocalDownloads {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

fn downloaded_track(path: PathBuf) -> Option<DownloadedTrack> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    if !AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }
    let stem = path.file_stem()?.to_str()?.trim();
    if stem.is_empty() {
        return None;
    }
    let track_id = TrackId::new(stem);
    Some(DownloadedTrack {
        track_id,
        local_path: path,
    })
}

#[async_trait]
impl DownloadManager for LocalDownloads {
    async fn get_all_downloaded(&self) -> Result<Vec<DownloadedTrack>> {
        let mut entries = match tokio::fs::read_dir(&self.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(directory = %self.directory.display(), "No download directory");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut downloads = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(track) = downloaded_track(entry.path()) {
                downloads.push(track);
            }
        }
        downloads.sort_by(|a, b| a.track_id.cmp(&b.track_id));

        debug!(
            directory = %self.directory.display(),
            count = downloads.len(),
            "Scanned downloads"
        );
        Ok(downloads)
    }
}
