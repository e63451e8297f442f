/// Fixed connectivity signal
use cadence_core::{NetworkMonitor, NetworkStatus};

/// Network monitor reporting a status chosen at startup
#[derive(Debug, Clone, Copy)]
pub struct StaticNetwork(Option<NetworkStatus>);

impl StaticNetwork {
    pub fn new(status: Option<NetworkStatus>) -> Self {
        Self(status)
    }

    /// `--offline` forces download-only playback; otherwise online
    pub fn from_offline_flag(offline: bool) -> Self {
        if offline {
            Self(Some(NetworkStatus::Offline))
        } else {
            Self(Some(NetworkStatus::Online))
        }
    }
}

impl NetworkMonitor for StaticNetwork {
    fn status(&self) -> Option<NetworkStatus> {
        self.0
    }
}
