//! Client tests against a live eden-tags server on an ephemeral port

use eden_tags::client::{resolve_base_url, ClientError, EmotionTagsClient, BASE_URL_ENV, DEFAULT_BASE_URL};
use eden_tags::{build_router, AppState, NewTag, TagStore};
use serial_test::serial;

/// Start the service on 127.0.0.1:0 and return its base URL
async fn spawn_server() -> String {
    let pool = eden_common::db::connect_in_memory().await.unwrap();
    let store = TagStore::open(pool).await.unwrap();
    let app = build_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_client_round_trip() {
    let client = EmotionTagsClient::new(&spawn_server().await).unwrap();

    assert!(client.get_tags().await.unwrap().is_empty());

    let mut request = NewTag::new(" eden-003 ", "bittersweet-longing");
    request.intensity = Some(0.4);
    request.user_id = Some("curator".to_string());
    let created = client.create_tag(&request).await.unwrap();
    assert_eq!(created.track_id, "eden-003");
    assert_eq!(created.intensity, Some(0.4));

    let fetched = client.get_tag(&created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(client.get_tags().await.unwrap(), vec![created]);
}

#[tokio::test]
async fn test_client_surfaces_api_errors() {
    let client = EmotionTagsClient::new(&spawn_server().await).unwrap();

    let mut request = NewTag::new("t1", "joy");
    request.intensity = Some(1.5);
    match client.create_tag(&request).await {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "intensity must be between 0 and 1");
        }
        other => panic!("expected API error, got {:?}", other),
    }

    match client.get_tag("missing").await {
        Err(ClientError::Api { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected 404, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_connection_failure() {
    // Bind then drop to get a port nobody is listening on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = EmotionTagsClient::new(&format!("http://{}", addr)).unwrap();
    assert!(matches!(client.get_tags().await, Err(ClientError::Http(_))));
}

#[test]
fn test_client_rejects_unusable_base_url() {
    assert!(matches!(
        EmotionTagsClient::new("not a url"),
        Err(ClientError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        EmotionTagsClient::new("mailto:someone@example.com"),
        Err(ClientError::InvalidBaseUrl(_))
    ));
}

#[test]
#[serial]
fn test_resolve_base_url() {
    std::env::remove_var(BASE_URL_ENV);
    assert_eq!(resolve_base_url(), DEFAULT_BASE_URL);

    std::env::set_var(BASE_URL_ENV, "  ");
    assert_eq!(resolve_base_url(), DEFAULT_BASE_URL);

    std::env::set_var(BASE_URL_ENV, "http://tags.eden.local:9000");
    assert_eq!(resolve_base_url(), "http://tags.eden.local:9000");

    let client = EmotionTagsClient::from_env().unwrap();
    assert_eq!(client.base_url().as_str(), "http://tags.eden.local:9000/");

    std::env::remove_var(BASE_URL_ENV);
}
