//! Stream and artwork URLs.

use crate::client::MediaServerClient;
use async_trait::async_trait;
use cadence_core::{DeviceProfile, MediaUrls, TrackId};

impl MediaServerClient {
    /// Universal audio endpoint for `track_id`, or `None` without credentials.
    ///
    /// The server direct-streams when the container is in `profile.containers`
    /// and transcodes to the profile's fallback otherwise.
    pub fn universal_audio_url(&self, track_id: &TrackId, profile: &DeviceProfile) -> Option<String> {
        let (Some(token), Some(user_id)) = (&self.config.access_token, &self.config.user_id) else {
            return None;
        };
        let mut url = self
            .endpoint(&format!("/Audio/{}/universal", track_id))
            .ok()?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("UserId", user_id)
                .append_pair("DeviceId", &self.config.device_id)
                .append_pair("Container", &profile.containers.join(","))
                .append_pair("TranscodingContainer", &profile.transcoding_container)
                .append_pair("TranscodingProtocol", "http")
                .append_pair("AudioCodec", &profile.transcoding_codec)
                .append_pair("api_key", token);
            if let Some(bitrate) = profile.max_bitrate {
                pairs.append_pair("MaxStreamingBitrate", &bitrate.to_string());
            }
        }

        Some(url.into())
    }
}

#[async_trait]
impl MediaUrls for MediaServerClient {
    async fn stream_url(
        &self,
        track_id: &TrackId,
        profile: &DeviceProfile,
    ) -> cadence_core::Result<Option<String>> {
        Ok(self.universal_audio_url(track_id, profile))
    }

    fn image_url(&self, item_id: &str, tag: &str) -> String {
        format!("{}/Items/{}/Images/Primary?tag={}", self.config.url, item_id, tag)
    }

    fn artist_image_url(&self, artist_id: &str) -> String {
        format!("{}/Items/{}/Images/Primary", self.config.url, artist_id)
    }
}
