//! Graph snapshot models
//!
//! The snapshot format belongs to the graph editor; it is only ever read here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Serialized canvas state sent by the editor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Node id to `{class_type, inputs}`, in canvas order
    #[serde(default)]
    pub nodes: Map<String, Value>,

    /// `[link_id, source_node, source_slot, target_node, target_slot, type]`
    #[serde(default)]
    pub links: Vec<Value>,
}

impl GraphSnapshot {
    pub fn contains_node(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Pretty JSON used as conversational context
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// One node entry of a snapshot
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GraphNode {
    #[serde(default)]
    pub class_type: String,
    #[serde(default)]
    pub inputs: Map<String, Value>,
}

impl GraphNode {
    /// Whether an input value is a `[source_node, output_slot]` reference
    pub fn is_connection(value: &Value) -> bool {
        matches!(value, Value::Array(items) if items.len() >= 2)
    }
}
