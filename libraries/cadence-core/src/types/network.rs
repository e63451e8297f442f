/// Network connectivity signal
use serde::{Deserialize, Serialize};

/// Tri-state connectivity as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    /// Connected and healthy
    Online,

    /// Connected but unreliable or disconnected from the server
    Degraded,

    /// No connectivity
    Offline,
}

impl NetworkStatus {
    /// Whether streaming should be assumed to work
    ///
    /// An unknown status counts as online.
    pub fn is_streamable(status: Option<Self>) -> bool {
        matches!(status, None | Some(Self::Online))
    }
}
