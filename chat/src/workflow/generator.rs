//! Workflow generation
//!
//! One completion call per request. The reply is located with a single
//! outermost-brace scan and then decoded strictly; any failure yields a
//! failed [`WorkflowResult`] and no partial workflow.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::catalog::NodeCatalog;
use crate::completion::CompletionProvider;
use crate::errors::ChatError;
use crate::models::graph::GraphSnapshot;
use crate::models::operation::{nodes_used, AtomicOperation};
use crate::models::result::{GeneratedWorkflow, WorkflowResult};
use crate::workflow::prompt;

/// Turns natural-language requests into operation sequences
pub struct WorkflowGenerator {
    catalog: Arc<NodeCatalog>,
    completion: Arc<dyn CompletionProvider>,
}

impl WorkflowGenerator {
    pub fn new(catalog: Arc<NodeCatalog>, completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            catalog,
            completion,
        }
    }

    /// Generate a workflow for `user_request`, optionally extending
    /// `current_graph`
    pub async fn generate(
        &self,
        user_request: &str,
        current_graph: Option<&GraphSnapshot>,
    ) -> WorkflowResult {
        let instructions = prompt::build(&self.catalog, user_request, current_graph);
        debug!(
            "Requesting completion (request {} chars, context: {})",
            user_request.len(),
            current_graph.is_some()
        );

        let raw = match self
            .completion
            .complete(&instructions.system, &instructions.user)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error generating workflow: {}", e);
                let e = match e {
                    ChatError::GenerationError(_) => e,
                    other => ChatError::GenerationError(other.to_string()),
                };
                return WorkflowResult::failure(&e, None);
            }
        };

        match self.interpret(user_request, &raw) {
            Ok(workflow) => {
                info!(
                    "Generated workflow with {} operation(s) using {:?}",
                    workflow.workflow.len(),
                    workflow.nodes_used
                );
                WorkflowResult::success(workflow, raw)
            }
            Err(e) => {
                error!("Failed to interpret workflow reply: {}", e);
                WorkflowResult::failure(&e, Some(raw))
            }
        }
    }

    fn interpret(&self, user_request: &str, raw: &str) -> Result<GeneratedWorkflow, ChatError> {
        let payload = extract_payload(raw)?;
        let steps = payload
            .get("workflow")
            .and_then(Value::as_array)
            .ok_or_else(|| ChatError::ParseError("Response missing 'workflow' key".to_string()))?;
        if steps.is_empty() {
            return Err(ChatError::ParseError(
                "Response contained an empty 'workflow'".to_string(),
            ));
        }

        let operations = decode_operations(steps)?;
        for (i, op) in operations.iter().enumerate() {
            if let Some(node_id) = op.added_node() {
                if !self.catalog.contains(node_id) {
                    return Err(ChatError::DecodeError(format!(
                        "Step {}: Unknown node_id '{}'",
                        i, node_id
                    )));
                }
            }
        }

        let description = payload
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(GeneratedWorkflow {
            nodes_used: nodes_used(&operations),
            workflow: operations,
            description,
            user_request: user_request.to_string(),
        })
    }
}

/// Parse the text between the first `{` and the last `}` of `raw`
pub fn extract_payload(raw: &str) -> Result<Value, ChatError> {
    let start = raw.find('{');
    let end = raw.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => {
            return Err(ChatError::ParseError(
                "Failed to parse workflow JSON: no JSON object in reply".to_string(),
            ))
        }
    };

    let value: Value = serde_json::from_str(json)
        .map_err(|e| ChatError::ParseError(format!("Failed to parse workflow JSON: {}", e)))?;
    if !value.is_object() {
        return Err(ChatError::ParseError(
            "Failed to parse workflow JSON: top level is not an object".to_string(),
        ));
    }
    Ok(value)
}

/// Decode every step, failing the whole batch on the first bad one
pub fn decode_operations(steps: &[Value]) -> Result<Vec<AtomicOperation>, ChatError> {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            serde_json::from_value(step.clone())
                .map_err(|e| ChatError::DecodeError(format!("Step {}: {}", i, e)))
        })
        .collect()
}
