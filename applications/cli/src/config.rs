/// CLI configuration
use crate::error::{CliError, Result};
use cadence_playback::QueueConfig;
use cadence_server_client::ServerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_server")]
    pub server: ServerConfig,

    #[serde(default)]
    pub queue: QueueConfig,

    #[serde(default = "default_downloads")]
    pub downloads: DownloadSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadSettings {
    #[serde(default = "default_download_directory")]
    pub directory: PathBuf,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `cadence.toml` in the working
    /// directory is used when present. `CADENCE_`-prefixed variables override
    /// both, with `__` between nested keys (`CADENCE_SERVER__ACCESS_TOKEN`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(CliError::Config(
                "Server URL is required (set CADENCE_SERVER__URL)".to_string(),
            ));
        }

        if self.queue.library_sample_size == 0 {
            return Err(CliError::Config(
                "queue.library_sample_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            queue: QueueConfig::default(),
            downloads: default_downloads(),
        }
    }
}

// Default values
fn default_server() -> ServerConfig {
    ServerConfig::new("")
}

fn default_downloads() -> DownloadSettings {
    DownloadSettings {
        directory: default_download_directory(),
    }
}

fn default_download_directory() -> PathBuf {
    PathBuf::from("./downloads")
}
