//! Types for media server requests and responses.

use cadence_core::CatalogItem;
use serde::{Deserialize, Serialize};

/// Configuration for connecting to a media server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://media.example.com")
    #[serde(default)]
    pub url: String,
    /// Access token of the signed-in user
    #[serde(default)]
    pub access_token: Option<String>,
    /// Identifier of the signed-in user
    #[serde(default)]
    pub user_id: Option<String>,
    /// Identifier this client reports to the server
    #[serde(default = "default_device_id")]
    pub device_id: String,
}

fn default_device_id() -> String {
    "cadence".to_string()
}

impl ServerConfig {
    /// Create a new server config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
            user_id: None,
            device_id: default_device_id(),
        }
    }

    /// Create a config for a signed-in user.
    pub fn with_credentials(
        url: impl Into<String>,
        access_token: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            access_token: Some(access_token.into()),
            user_id: Some(user_id.into()),
            ..Self::new(url)
        }
    }
}

/// Paged item listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemsResponse {
    pub items: Vec<CatalogItem>,
    pub total_record_count: usize,
}

/// How the device is obtaining the audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayMethod {
    /// Local file
    DirectPlay,
    /// Stream from the server
    DirectStream,
}

/// Body of a playback-started report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaybackStartInfo {
    pub item_id: String,
    pub position_ticks: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_session_id: Option<String>,
    pub can_seek: bool,
    pub play_method: PlayMethod,
}
