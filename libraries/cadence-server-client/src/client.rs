//! Main media server client.

use crate::error::{Result, ServerClientError};
use crate::types::ServerConfig;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for a Jellyfin-style media server.
///
/// Implements the catalog, URL-building, and playback-reporting contracts
/// of `cadence-core`.
///
/// # Example
///
/// ```ignore
/// use cadence_server_client::{MediaServerClient, ServerConfig};
///
/// let config = ServerConfig::with_credentials("https://media.example.com", "token", "user-1");
/// let client = MediaServerClient::new(config)?;
///
/// let album = client.fetch_collection_tracks("album-id").await?;
/// println!("Found {} tracks", album.len());
/// ```
#[derive(Debug, Clone)]
pub struct MediaServerClient {
    pub(crate) http: Client,
    pub(crate) config: ServerConfig,
}

impl MediaServerClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: ServerConfig { url, ..config },
        })
    }

    /// Get the server URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Check if the client has an access token.
    pub fn is_authenticated(&self) -> bool {
        self.config.access_token.is_some()
    }

    pub(crate) fn user_id(&self) -> Result<&str> {
        self.config
            .user_id
            .as_deref()
            .ok_or(ServerClientError::AuthRequired)
    }

    /// Absolute URL for `path` (which starts with `/`).
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.config.url, path))
            .map_err(|e| ServerClientError::InvalidUrl(e.to_string()))
    }

    /// Attach the authorization header when a token is present.
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.header(
                reqwest::header::AUTHORIZATION,
                format!("MediaBrowser Token=\"{}\"", token),
            ),
            None => request,
        }
    }

    /// Send an authorized request and map transport and status failures.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorize(request).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ServerClientError::ServerUnreachable(e.to_string())
            } else {
                ServerClientError::Request(e)
            }
        })?;

        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Server responded");

        if status.is_success() {
            Ok(response)
        } else if status.as_u16() == 401 {
            Err(ServerClientError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ServerClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}
