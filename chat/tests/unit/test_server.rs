//! HTTP route tests

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use oneflow_chat::server::serve::router;
use oneflow_chat::server::state::ServerState;
use oneflow_chat::services::chat::ChatService;

use crate::support::{catalog, ScriptedCompletion};

fn app(replies: &[&str]) -> Router {
    let service = ChatService::new(catalog(), ScriptedCompletion::replying(replies), 10);
    router(Arc::new(ServerState::new(Arc::new(service))))
}

async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = call(app(&[]), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "oneflow-chat");
}

#[tokio::test]
async fn test_empty_request_is_bad_request() {
    let (status, body) = call(
        app(&[]),
        Method::POST,
        "/chat/generate_workflow",
        Some(json!({"request": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body, json!({"success": false, "error": "Empty request"}));
}

#[tokio::test]
async fn test_malformed_canvas_is_bad_request() {
    let (status, body) = call(
        app(&[]),
        Method::POST,
        "/chat/generate_workflow",
        Some(json!({"request": "add a preview", "current_workflow": "not a graph"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body.get("error_kind").is_none());
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn test_generate_workflow() {
    let reply = r#"{"workflow": [{"operation": "add_node", "params": {"node_id": "SaveImage"}}], "description": "save"}"#;
    let (status, body) = call(
        app(&[reply]),
        Method::POST,
        "/chat/generate_workflow",
        Some(json!({"request": "save the image", "current_workflow": null})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["workflow"]["nodes_used"], json!(["SaveImage"]));
    assert_eq!(body["workflow"]["workflow"][0]["operation"], "add_node");
    assert_eq!(body["workflow"]["workflow"][0]["params"]["node_id"], "SaveImage");
}

#[tokio::test]
async fn test_generation_failure_is_reported_in_body() {
    let (status, body) = call(
        app(&["no workflow"]),
        Method::POST,
        "/chat/generate_workflow",
        Some(json!({"request": "save the image"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["error_kind"], "parse");
    assert_eq!(body["raw_response"], "no workflow");
}

#[tokio::test]
async fn test_nodes_info() {
    let (status, body) = call(app(&[]), Method::GET, "/chat/nodes_info", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total_nodes"], 4);
    assert_eq!(body["data"]["categories"]["image"]["count"], 3);
    assert_eq!(body["data"]["categories"]["text"]["nodes"][0]["id"], "TextInput");
}

#[tokio::test]
async fn test_validate_workflow() {
    let (status, body) = call(
        app(&[]),
        Method::POST,
        "/chat/validate_workflow",
        Some(json!({
            "workflow": {"operations": [
                {"operation": "add_node", "params": {"node_id": "UnknownNode"}}
            ]}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["validation"]["valid"], false);
    assert_eq!(
        body["validation"]["errors"],
        json!(["Step 0: Unknown node_id 'UnknownNode'"])
    );
}

#[tokio::test]
async fn test_current_workflow_analysis() {
    let (status, body) = call(
        app(&[]),
        Method::POST,
        "/chat/current_workflow",
        Some(json!({"workflow": {
            "nodes": {"1": {"class_type": "PreviewImage", "inputs": {}}},
            "links": []
        }})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["analysis"]["summary"],
        "Current workflow has 1 nodes, 0 connections, 1 display nodes"
    );
}

#[tokio::test]
async fn test_execute_placeholder_and_status() {
    let app = app(&[]);
    let (_, body) = call(
        app.clone(),
        Method::POST,
        "/chat/execute_workflow",
        Some(json!({"workflow": {"nodes": {}}})),
    )
    .await;
    assert_eq!(body["message"], "Workflow execution not yet implemented");
    assert_eq!(body["workflow"], json!({"nodes": {}}));

    let (_, body) = call(app.clone(), Method::GET, "/chat/status", None).await;
    assert_eq!(body["status"], "active");
    assert_eq!(body["nodes_loaded"], 4);
    assert_eq!(body["chat_entries"], 0);

    let (_, body) = call(app, Method::GET, "/chat/history", None).await;
    assert_eq!(body["data"], json!([]));
}
