//! Atomic graph-edit operations

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Canvas position of an added node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One primitive edit.
///
/// Serialized as `{"operation": "<tag>", "params": {...}}`. Node references
/// (`source_node_id`, `target_node_id`, `set_param.node_id`) may name a node
/// added in the same batch or one already on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "params", rename_all = "snake_case")]
pub enum AtomicOperation {
    AddNode {
        /// Node type id from the catalog
        node_id: String,
        #[serde(default)]
        node_params: Map<String, Value>,
        #[serde(default)]
        position: Position,
    },
    LinkNode {
        #[serde(deserialize_with = "node_ref")]
        source_node_id: String,
        source_output: String,
        #[serde(deserialize_with = "node_ref")]
        target_node_id: String,
        target_input: String,
    },
    SetParam {
        #[serde(deserialize_with = "node_ref")]
        node_id: String,
        param_name: String,
        param_value: Value,
    },
}

impl AtomicOperation {
    /// Node type id when this is an `add_node`
    pub fn added_node(&self) -> Option<&str> {
        match self {
            AtomicOperation::AddNode { node_id, .. } => Some(node_id),
            _ => None,
        }
    }
}

/// Distinct node types added by `operations`, in first-use order
pub fn nodes_used(operations: &[AtomicOperation]) -> Vec<String> {
    let mut used: Vec<String> = Vec::new();
    for node_id in operations.iter().filter_map(AtomicOperation::added_node) {
        if !used.iter().any(|u| u == node_id) {
            used.push(node_id.to_string());
        }
    }
    used
}

/// Canonical string form of a node reference, if it is one.
///
/// Editors number their nodes, so integer references are accepted and
/// rendered in decimal.
pub fn node_ref_str(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn node_ref<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    node_ref_str(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("node reference must be a string or number, got {}", value))
    })
}
