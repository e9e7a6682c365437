//! Chat service
//!
//! Caller-facing boundary over generation, validation and analysis. Owns the
//! chat history; everything else it holds is read-only.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::history::{ChatHistory, HistoryEntry};
use crate::catalog::{NodeCatalog, NodesSummary};
use crate::completion::CompletionProvider;
use crate::errors::ChatError;
use crate::models::graph::GraphSnapshot;
use crate::models::result::{ValidationResult, WorkflowResult};
use crate::workflow::analyzer::{self, GraphAnalysis};
use crate::workflow::generator::WorkflowGenerator;
use crate::workflow::validator;

/// Service status
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub status: String,
    pub nodes_loaded: usize,
    pub chat_entries: usize,
}

pub struct ChatService {
    catalog: Arc<NodeCatalog>,
    generator: WorkflowGenerator,
    history: ChatHistory,
}

impl ChatService {
    pub fn new(
        catalog: Arc<NodeCatalog>,
        completion: Arc<dyn CompletionProvider>,
        history_capacity: usize,
    ) -> Self {
        Self {
            generator: WorkflowGenerator::new(catalog.clone(), completion),
            catalog,
            history: ChatHistory::new(history_capacity),
        }
    }

    /// Generate a workflow, rejecting blank requests before any external call
    pub async fn generate_workflow(
        &self,
        request: &str,
        current_workflow: Option<Value>,
    ) -> WorkflowResult {
        if request.trim().is_empty() {
            return WorkflowResult::failure(
                &ChatError::InputError("Empty request".to_string()),
                None,
            );
        }

        let current = match parse_graph(current_workflow) {
            Ok(current) => current,
            Err(e) => return WorkflowResult::failure(&e, None),
        };

        let result = self.generator.generate(request, current.as_ref()).await;
        let id = self.history.record(request, &result);
        info!("Chat entry {} recorded (success: {})", id, result.success);
        result
    }

    /// Validate `{operations: [...]}` (or `{workflow: [...]}`) against the
    /// catalog and the canvas
    pub fn validate_workflow(
        &self,
        workflow: &Value,
        current_workflow: Option<Value>,
    ) -> ValidationResult {
        let Some(steps) = operations_of(workflow) else {
            return ValidationResult::from_findings(
                vec!["Missing 'operations'".to_string()],
                Vec::new(),
            );
        };

        match parse_graph(current_workflow) {
            Ok(current) => validator::validate(steps, &self.catalog, current.as_ref()),
            Err(e) => ValidationResult::from_findings(vec![e.to_string()], Vec::new()),
        }
    }

    /// Summarize the canvas
    pub fn analyze_workflow(&self, workflow: &Value) -> GraphAnalysis {
        analyzer::analyze_value(workflow)
    }

    pub fn list_nodes_summary(&self) -> NodesSummary {
        self.catalog.summary()
    }

    /// The most recent chat entries, oldest first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.recent()
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            status: "active".to_string(),
            nodes_loaded: self.catalog.len(),
            chat_entries: self.history.len(),
        }
    }
}

fn operations_of(workflow: &Value) -> Option<&[Value]> {
    let steps = match workflow {
        Value::Array(_) => workflow,
        Value::Object(map) => map.get("operations").or_else(|| map.get("workflow"))?,
        _ => return None,
    };
    steps.as_array().map(Vec::as_slice)
}

/// Read an optional canvas payload; `null` means no canvas
pub fn parse_graph(value: Option<Value>) -> Result<Option<GraphSnapshot>, ChatError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
            warn!("Rejecting malformed current_workflow: {}", e);
            ChatError::InputError(format!("Invalid current_workflow: {}", e))
        }),
    }
}
