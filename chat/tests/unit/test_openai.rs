//! Completion client tests against a local stub server

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use oneflow_chat::completion::{CompletionOptions, CompletionProvider, OpenAiClient};
use oneflow_chat::errors::ChatError;

#[derive(Default)]
struct Stub {
    reply: Value,
    status: Option<StatusCode>,
    seen: Mutex<Vec<(Option<String>, Value)>>,
}

async fn completions(
    State(stub): State<Arc<Stub>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.seen.lock().unwrap().push((auth, body));

    match stub.status {
        Some(status) => (status, Json(json!({"error": {"message": "rate limited"}}))),
        None => (StatusCode::OK, Json(stub.reply.clone())),
    }
}

async fn start(stub: Arc<Stub>) -> SocketAddr {
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(stub);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr) -> OpenAiClient {
    let options = CompletionOptions {
        base_url: format!("http://{}/v1/", addr),
        ..Default::default()
    };
    OpenAiClient::new(SecretString::from("sk-test".to_string()), options).unwrap()
}

#[tokio::test]
async fn test_completion_request_shape() {
    let stub = Arc::new(Stub {
        reply: json!({"choices": [{"message": {"role": "assistant", "content": "{\"workflow\": []}"}}]}),
        ..Default::default()
    });
    let addr = start(stub.clone()).await;
    let client = client(addr);

    let reply = client.complete("system text", "user text").await.unwrap();

    assert_eq!(reply, "{\"workflow\": []}");
    assert_eq!(client.options().base_url, format!("http://{}/v1", addr));

    let seen = stub.seen.lock().unwrap();
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-4.1");
    assert_eq!(body["max_tokens"], 2000);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "system text");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "user text");
}

#[tokio::test]
async fn test_error_status_is_generation_error() {
    let stub = Arc::new(Stub {
        status: Some(StatusCode::TOO_MANY_REQUESTS),
        ..Default::default()
    });
    let addr = start(stub).await;

    let err = client(addr).complete("s", "u").await.unwrap_err();

    match err {
        ChatError::GenerationError(msg) => {
            assert!(msg.contains("429"), "{}", msg);
            assert!(msg.contains("rate limited"), "{}", msg);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_reply_without_choices() {
    let stub = Arc::new(Stub {
        reply: json!({"choices": []}),
        ..Default::default()
    });
    let addr = start(stub).await;

    let err = client(addr).complete("s", "u").await.unwrap_err();

    assert!(matches!(err, ChatError::GenerationError(_)));
    assert!(err.to_string().contains("no content"));
}

#[tokio::test]
async fn test_unreachable_provider() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr).complete("s", "u").await.unwrap_err();

    assert!(matches!(err, ChatError::GenerationError(_)));
}
