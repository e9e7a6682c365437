//! Generation and validation results

use serde::{Deserialize, Serialize};

use crate::errors::ChatError;
use crate::models::operation::AtomicOperation;

/// Failure category of a generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Input,
    Generation,
    Parse,
    Decode,
}

/// A successfully generated workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedWorkflow {
    pub workflow: Vec<AtomicOperation>,
    #[serde(default)]
    pub description: String,
    pub user_request: String,
    pub nodes_used: Vec<String>,
}

/// Outcome of one generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<GeneratedWorkflow>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,

    /// Raw completion text, kept for diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl WorkflowResult {
    pub fn success(workflow: GeneratedWorkflow, raw_response: String) -> Self {
        Self {
            success: true,
            workflow: Some(workflow),
            error: None,
            error_kind: None,
            raw_response: Some(raw_response),
        }
    }

    pub fn failure(error: &ChatError, raw_response: Option<String>) -> Self {
        let error_kind = match error {
            ChatError::InputError(_) => ErrorKind::Input,
            ChatError::ParseError(_) | ChatError::JsonError(_) => ErrorKind::Parse,
            ChatError::DecodeError(_) => ErrorKind::Decode,
            _ => ErrorKind::Generation,
        };
        Self {
            success: false,
            workflow: None,
            error: Some(error.to_string()),
            error_kind: Some(error_kind),
            raw_response,
        }
    }

    pub fn operations(&self) -> &[AtomicOperation] {
        self.workflow
            .as_ref()
            .map(|w| w.workflow.as_slice())
            .unwrap_or_default()
    }
}

/// Outcome of a validation call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
