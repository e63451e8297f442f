//! Queue engine configuration

use cadence_core::DeviceProfile;
use serde::{Deserialize, Serialize};

/// Configuration for the queue service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Tracks fetched per whole-library shuffle (default: 100)
    pub library_sample_size: usize,

    /// Capabilities used when building stream URLs
    pub device_profile: DeviceProfile,

    /// Send a playback-started report when a load starts playback (default: true)
    pub report_playback: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            library_sample_size: 100,
            device_profile: DeviceProfile::default(),
            report_playback: true,
        }
    }
}
