//! HTTP-level tests for the API client against a mocked server.

use std::time::Duration;

use serde_json::json;
use unraid_client::{Client, ClientError};
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn mock_server() -> MockServer {
    MockServer::start().await
}

#[tokio::test]
async fn containers_query_decodes_list() {
    let server = mock_server().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "docker": {
                    "containers": [
                        {
                            "id": "abc123",
                            "names": ["/plex"],
                            "image": "plexinc/pms-docker",
                            "state": "RUNNING",
                            "status": "Up 3 days",
                            "autoStart": true
                        },
                        {
                            "id": "def456",
                            "names": ["/sonarr"],
                            "image": "linuxserver/sonarr",
                            "state": "EXITED",
                            "status": "Exited (0)",
                            "autoStart": false
                        }
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "test-key").unwrap();
    let containers = client.containers(TIMEOUT).await.unwrap();

    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0].display_name(), "plex");
    assert!(containers[0].auto_start);
    assert_eq!(containers[1].state, "EXITED");
}

#[tokio::test]
async fn graphql_errors_surface_as_api_error() {
    let server = mock_server().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "array is already started" }
            ]
        })))
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "test-key").unwrap();
    let err = client.start_array(TIMEOUT).await.unwrap_err();

    match err {
        ClientError::Api { message } => assert_eq!(message, "array is already started"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_failure_surfaces_status() {
    let server = mock_server().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "test-key").unwrap();
    let err = client.shares(TIMEOUT).await.unwrap_err();

    match err {
        ClientError::Http { status } => assert_eq!(status, 502),
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn find_container_id_resolves_name() {
    let server = mock_server().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "docker": {
                    "containers": [
                        { "id": "abc123", "names": ["/plex"], "image": "", "state": "RUNNING", "status": "", "autoStart": false }
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "test-key").unwrap();

    let id = client.find_container_id("plex", TIMEOUT).await.unwrap();
    assert_eq!(id, "abc123");

    let err = client.find_container_id("radarr", TIMEOUT).await.unwrap_err();
    assert!(err.to_string().contains("container not found: radarr"));
}

#[tokio::test]
async fn start_container_posts_resolved_id() {
    let server = mock_server().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("containers {"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "docker": {
                    "containers": [
                        { "id": "abc123", "names": ["/plex"], "image": "", "state": "EXITED", "status": "", "autoStart": false }
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("start(id: $id)"))
        .and(body_partial_json(json!({ "variables": { "id": "abc123" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "docker": {
                    "start": { "id": "abc123", "state": "RUNNING" }
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "test-key").unwrap();
    client.start_container("plex", TIMEOUT).await.unwrap();
}

#[tokio::test]
async fn notifications_sends_filter_variables() {
    let server = mock_server().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "variables": {
                "type": "UNREAD",
                "importance": "WARNING",
                "offset": 0,
                "limit": 20
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "notifications": {
                    "list": [
                        {
                            "id": "n1",
                            "title": "Disk warning",
                            "subject": "disk1 is hot",
                            "description": "",
                            "importance": "WARNING",
                            "link": "",
                            "type": "UNREAD",
                            "timestamp": "2025-11-01T12:00:00Z"
                        }
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "test-key").unwrap();
    let list = client
        .notifications("UNREAD", Some("WARNING"), 0, 20, TIMEOUT)
        .await
        .unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list[0].importance, "WARNING");
}

#[tokio::test]
async fn base_url_gets_graphql_suffix() {
    let server = mock_server().await;

    // Mounted at /graphql even though the client was given the bare root.
    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "shares": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(&server.uri(), "test-key").unwrap();
    let shares = client.shares(TIMEOUT).await.unwrap();
    assert!(shares.is_empty());
}
