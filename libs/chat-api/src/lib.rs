//! Chat API models
//!
//! Request bodies and response envelopes of the `/chat/*` routes. Payloads
//! owned by the engine (workflows, analyses, node listings) are generic
//! parameters so this crate stays free of engine types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `POST /chat/generate_workflow`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateWorkflowRequest {
    #[serde(default)]
    pub request: String,
    #[serde(default)]
    pub current_workflow: Option<Value>,
}

/// `POST /chat/validate_workflow`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateWorkflowRequest {
    /// `{"operations": [...]}`
    #[serde(default)]
    pub workflow: Value,
    #[serde(default)]
    pub current_workflow: Option<Value>,
}

/// `POST /chat/current_workflow` and `POST /chat/execute_workflow`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowEnvelope {
    #[serde(default)]
    pub workflow: Value,
}

/// `{success: true, data}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{success: true, validation}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse<T> {
    pub success: bool,
    pub validation: T,
}

/// `{success: true, analysis}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse<T> {
    pub success: bool,
    pub analysis: T,
}

/// Placeholder reply of `POST /chat/execute_workflow`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub success: bool,
    pub message: String,
    pub workflow: Value,
}

/// `GET /chat/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub status: String,
    pub nodes_loaded: usize,
    pub chat_entries: usize,
}

/// `{success: false, error}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
