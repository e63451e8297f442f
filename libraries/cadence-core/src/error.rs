/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `CadenceError`
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Core error type for Cadence
///
/// Variants follow the failure taxonomy of the queue engine: resolution,
/// device, catalog, and the plumbing errors underneath them.
#[derive(Error, Debug)]
pub enum CadenceError {
    /// A catalog item could not be turned into a playable track
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// The playback device rejected or failed a command
    #[error("Device error: {0}")]
    Device(String),

    /// A catalog query failed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// The download manager could not be queried
    #[error("Download error: {0}")]
    Download(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl CadenceError {
    /// Create a resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Create a device error
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a download error
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
