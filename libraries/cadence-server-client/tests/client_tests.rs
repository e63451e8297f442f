//! Tests for the media server client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real server connection.

use cadence_core::{
    CadenceError, Catalog, LibraryFilters, PlayableTrack, PlaybackReporter, SortOrder, TrackId,
    TrackPayload, TrackSource,
};
use cadence_server_client::{MediaServerClient, ServerClientError, ServerConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> MediaServerClient {
    MediaServerClient::new(ServerConfig::with_credentials(
        server.uri(),
        "secret",
        "user-1",
    ))
    .unwrap()
}

fn items_body(ids: &[&str]) -> serde_json::Value {
    json!({
        "Items": ids.iter().map(|id| json!({ "Id": id, "Name": format!("Track {}", id) })).collect::<Vec<_>>(),
        "TotalRecordCount": ids.len(),
    })
}

// =============================================================================
// Server Config Tests
// =============================================================================

mod server_config {
    use super::*;

    #[test]
    fn test_new_with_url() {
        let config = ServerConfig::new("https://example.com");
        assert_eq!(config.url, "https://example.com");
        assert!(config.access_token.is_none());
        assert!(config.user_id.is_none());
        assert_eq!(config.device_id, "cadence");
    }

    #[test]
    fn test_with_credentials() {
        let config = ServerConfig::with_credentials("https://example.com", "tok", "user-1");
        assert_eq!(config.access_token.as_deref(), Some("tok"));
        assert_eq!(config.user_id.as_deref(), Some("user-1"));
    }
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_empty_url_rejected() {
        match MediaServerClient::new(ServerConfig::new("")).unwrap_err() {
            ServerClientError::InvalidUrl(msg) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {:?}", other),
        }
    }

    #[test]
    fn test_scheme_required() {
        let result = MediaServerClient::new(ServerConfig::new("media.example.com"));
        assert!(matches!(result, Err(ServerClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_trailing_slash_removed() {
        let client = MediaServerClient::new(ServerConfig::new("http://localhost:8096/")).unwrap();
        assert_eq!(client.url(), "http://localhost:8096");
    }
}

// =============================================================================
// Catalog Tests
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_random_sample_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Users/user-1/Items"))
            .and(header("Authorization", "MediaBrowser Token=\"secret\""))
            .and(query_param("IncludeItemTypes", "Audio"))
            .and(query_param("Recursive", "true"))
            .and(query_param("SortBy", "Random"))
            .and(query_param("Limit", "100"))
            .and(query_param("StartIndex", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&["a", "b"])))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server)
            .fetch_tracks(&LibraryFilters::default(), SortOrder::Random, 100, 0)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_str(), "a");
        assert_eq!(items[1].name.as_deref(), Some("Track b"));
    }

    #[tokio::test]
    async fn test_filters_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Users/user-1/Items"))
            .and(query_param("Filters", "IsFavorite,IsUnplayed"))
            .and(query_param("GenreIds", "rock|jazz"))
            .and(query_param("Years", "1990,1991"))
            .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&["a"])))
            .expect(1)
            .mount(&server)
            .await;

        let filters = LibraryFilters {
            favorites_only: true,
            unplayed_only: true,
            genre_ids: vec!["rock".into(), "jazz".into()],
            year_range: Some((1990, 1991)),
            downloaded_only: false,
        };
        let items = client_for(&server)
            .fetch_tracks(&filters, SortOrder::Random, 50, 0)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_collection_tracks_use_parent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Users/user-1/Items"))
            .and(query_param("ParentId", "album-9"))
            .and(query_param("SortBy", "ParentIndexNumber,IndexNumber,SortName"))
            .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&["1", "2", "3"])))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server)
            .fetch_collection_tracks("album-9")
            .await
            .unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_unauthorized_is_auth_required() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_collection_tracks("album-9").await;
        assert!(matches!(result, Err(ServerClientError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_server_error_becomes_catalog_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_tracks(&LibraryFilters::default(), SortOrder::Name, 10, 0)
            .await
            .unwrap_err();
        match err {
            CadenceError::Catalog(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("maintenance"));
            }
            other => panic!("Expected catalog error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_collection_tracks("x").await;
        assert!(matches!(result, Err(ServerClientError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_missing_user_is_auth_required() {
        let server = MockServer::start().await;
        let client = MediaServerClient::new(ServerConfig::new(server.uri())).unwrap();

        let result = client.fetch_collection_tracks("x").await;
        assert!(matches!(result, Err(ServerClientError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Nothing listens on port 9 (discard) on test hosts.
        let client = MediaServerClient::new(ServerConfig::with_credentials(
            "http://127.0.0.1:9",
            "tok",
            "user-1",
        ))
        .unwrap();

        let err = client
            .fetch_tracks(&LibraryFilters::default(), SortOrder::Random, 1, 0)
            .await
            .unwrap_err();
        assert!(matches!(err, CadenceError::Network(_)));
    }
}

// =============================================================================
// Playback Reporting Tests
// =============================================================================

mod reporting {
    use super::*;

    fn track(source: TrackSource) -> PlayableTrack {
        PlayableTrack {
            id: TrackId::new("t1"),
            title: None,
            artist: None,
            album: None,
            duration_secs: None,
            url: String::new(),
            artwork_url: None,
            normalization_gain: None,
            payload: TrackPayload {
                item: "{}".into(),
                source,
                session_id: Some("session-1".into()),
            },
        }
    }

    #[tokio::test]
    async fn test_stream_start_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Sessions/Playing"))
            .and(header("Authorization", "MediaBrowser Token=\"secret\""))
            .and(body_json(json!({
                "ItemId": "t1",
                "PositionTicks": 0,
                "PlaySessionId": "session-1",
                "CanSeek": true,
                "PlayMethod": "DirectStream",
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .report_playback_started(&track(TrackSource::Stream), 0)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_download_start_is_direct_play() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/Sessions/Playing"))
            .and(body_json(json!({
                "ItemId": "t1",
                "PositionTicks": 50_000_000,
                "PlaySessionId": "session-1",
                "CanSeek": true,
                "PlayMethod": "DirectPlay",
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let downloaded = track(TrackSource::Download {
            local_path: "/downloads/t1.flac".into(),
        });
        client_for(&server)
            .report_playback_started(&downloaded, 50_000_000)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_report_failure_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .report_playback_started(&track(TrackSource::Stream), 0)
            .await;
        assert!(result.is_err());
    }
}
