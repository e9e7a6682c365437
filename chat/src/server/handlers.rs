//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chat_api::{
    AnalysisResponse, DataResponse, ErrorResponse, ExecuteResponse, GenerateWorkflowRequest,
    HealthResponse,
    StatusResponse, ValidateWorkflowRequest, ValidationResponse, WorkflowEnvelope,
};
use tracing::{debug, info};

use crate::models::result::ErrorKind;
use crate::server::state::ServerState;
use crate::utils::version_info;

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "oneflow-chat".to_string(),
        version: version.version,
    })
}

/// Service status handler
pub async fn status_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let status = state.chat.status();
    Json(StatusResponse {
        success: true,
        status: status.status,
        nodes_loaded: status.nodes_loaded,
        chat_entries: status.chat_entries,
    })
}

/// Catalog summary handler
pub async fn nodes_info_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(DataResponse::ok(state.chat.list_nodes_summary()))
}

/// Recent chat entries handler
pub async fn history_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(DataResponse::ok(state.chat.history()))
}

/// Workflow generation handler
///
/// Rejected input answers 400 with a bare `{success, error}` body; every
/// other outcome, failures included, is reported in a 200 body.
pub async fn generate_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<GenerateWorkflowRequest>,
) -> Response {
    info!(
        "Workflow generation requested ({} chars)",
        payload.request.chars().count()
    );

    let result = state
        .chat
        .generate_workflow(&payload.request, payload.current_workflow)
        .await;

    if result.error_kind == Some(ErrorKind::Input) {
        let error = ErrorResponse::new(result.error.unwrap_or_default());
        return (StatusCode::BAD_REQUEST, Json(error)).into_response();
    }
    Json(result).into_response()
}

/// Operation batch validation handler
pub async fn validate_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<ValidateWorkflowRequest>,
) -> impl IntoResponse {
    let validation = state
        .chat
        .validate_workflow(&payload.workflow, payload.current_workflow);
    debug!(
        "Validation finished: valid={} ({} errors)",
        validation.valid,
        validation.errors.len()
    );

    Json(ValidationResponse {
        success: true,
        validation,
    })
}

/// Canvas analysis handler
pub async fn analyze_handler(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<WorkflowEnvelope>,
) -> impl IntoResponse {
    Json(AnalysisResponse {
        success: true,
        analysis: state.chat.analyze_workflow(&payload.workflow),
    })
}

/// Execution placeholder
pub async fn execute_handler(Json(payload): Json<WorkflowEnvelope>) -> impl IntoResponse {
    Json(ExecuteResponse {
        success: true,
        message: "Workflow execution not yet implemented".to_string(),
        workflow: payload.workflow,
    })
}
