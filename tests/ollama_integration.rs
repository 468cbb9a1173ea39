//! Integration tests for the Ollama chat client
//!
//! Uses a wiremock server to verify the wire format of outgoing requests
//! and the mapping of endpoint failures onto client errors.

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use visionchat::config::OllamaConfig;
use visionchat::media::encode_image;
use visionchat::ollama::OllamaClient;
use visionchat::transcript::{Transcript, Turn};
use visionchat::VisionChatError;

fn client_for(server: &MockServer) -> OllamaClient {
    let config = OllamaConfig {
        host: server.uri(),
        model: "llava:13b".to_string(),
        timeout_seconds: 5,
    };
    OllamaClient::new(&config).unwrap()
}

fn sample_transcript() -> Transcript {
    Transcript::from_turns(vec![
        Turn::system("You are a helpful assistant."),
        Turn::user("Hello!"),
    ])
}

#[tokio::test]
async fn test_send_returns_reply_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llava:13b",
            "message": { "role": "assistant", "content": "Hi there!" },
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client.send(&sample_transcript(), None).await.unwrap();
    assert_eq!(reply, "Hi there!");
}

#[tokio::test]
async fn test_send_is_non_streaming_and_carries_full_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "llava:13b",
            "stream": false,
            "messages": [
                { "role": "system", "content": "You are a helpful assistant." },
                { "role": "user", "content": "Hello!" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": { "role": "assistant", "content": "ok" },
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.send(&sample_transcript(), None).await.unwrap();
}

#[tokio::test]
async fn test_send_attaches_image_to_last_message_only() {
    let dir = TempDir::new().unwrap();
    let img_path = dir.path().join("cat.png");
    std::fs::write(&img_path, b"fake image bytes").unwrap();
    let image = encode_image(&img_path).unwrap();

    let mut transcript = sample_transcript();
    transcript.append_assistant("Hi!");
    transcript.append_user("What is in this picture?");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "You are a helpful assistant." },
                { "role": "user", "content": "Hello!" },
                { "role": "assistant", "content": "Hi!" },
                {
                    "role": "user",
                    "content": "What is in this picture?",
                    "images": [image.as_str()]
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": { "role": "assistant", "content": "A cat." },
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client.send(&transcript, Some(&image)).await.unwrap();
    assert_eq!(reply, "A cat.");
}

#[tokio::test]
async fn test_non_success_status_maps_to_endpoint_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send(&sample_transcript(), None).await.unwrap_err();
    match err.downcast_ref::<VisionChatError>() {
        Some(VisionChatError::EndpointError { status, message }) => {
            assert_eq!(*status, 500);
            assert_eq!(message, "model not loaded");
        }
        other => panic!("Expected EndpointError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_not_found_status_maps_to_endpoint_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send(&sample_transcript(), None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VisionChatError>(),
        Some(VisionChatError::EndpointError { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_unparseable_success_body_maps_to_malformed_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send(&sample_transcript(), None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VisionChatError>(),
        Some(VisionChatError::MalformedReply(_))
    ));
}

#[tokio::test]
async fn test_success_body_missing_message_maps_to_malformed_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llava:13b",
            "done": true
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send(&sample_transcript(), None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VisionChatError>(),
        Some(VisionChatError::MalformedReply(_))
    ));
}

#[tokio::test]
async fn test_success_body_missing_content_maps_to_malformed_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llava:13b",
            "message": { "role": "assistant" },
            "done": true
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.send(&sample_transcript(), None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VisionChatError>(),
        Some(VisionChatError::MalformedReply(_))
    ));
}

#[tokio::test]
async fn test_dead_endpoint_maps_to_endpoint_unreachable() {
    // Start a server only to learn a free port, then shut it down.
    // An unpooled server is required: pooled servers from
    // `MockServer::start()` keep listening after drop.
    let uri = {
        let server = MockServer::builder().start().await;
        server.uri()
    };

    let config = OllamaConfig {
        host: uri,
        model: "llava:13b".to_string(),
        timeout_seconds: 5,
    };
    let client = OllamaClient::new(&config).unwrap();

    let err = client.send(&sample_transcript(), None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VisionChatError>(),
        Some(VisionChatError::EndpointUnreachable(_))
    ));
}
