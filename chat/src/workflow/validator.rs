//! Referential validation of operation sequences
//!
//! Validation reads raw JSON steps so malformed entries are reported rather
//! than rejected wholesale. Link and parameter targets may be any node added
//! anywhere in the batch or any node already on the canvas. Slot type
//! compatibility and cycles are not checked.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::catalog::NodeCatalog;
use crate::models::graph::GraphSnapshot;
use crate::models::operation::{node_ref_str, AtomicOperation};
use crate::models::result::ValidationResult;

const MISSING: &str = "<missing>";

/// Validate typed operations through their wire form
pub fn validate_operations(
    operations: &[AtomicOperation],
    catalog: &NodeCatalog,
    current_graph: Option<&GraphSnapshot>,
) -> ValidationResult {
    let steps: Vec<Value> = operations
        .iter()
        .map(|op| serde_json::to_value(op).unwrap_or(Value::Null))
        .collect();
    validate(&steps, catalog, current_graph)
}

/// Validate raw steps against the catalog and the canvas
pub fn validate(
    steps: &[Value],
    catalog: &NodeCatalog,
    current_graph: Option<&GraphSnapshot>,
) -> ValidationResult {
    let added = added_nodes(steps, catalog);
    let is_known = |id: &str| {
        added.contains(id) || current_graph.is_some_and(|graph| graph.contains_node(id))
    };

    let mut errors = Vec::new();
    for (i, step) in steps.iter().enumerate() {
        let Some(operation) = step.as_object().and_then(|s| s.get("operation")) else {
            errors.push(format!("Step {}: Missing 'operation'", i));
            continue;
        };
        let empty = Map::new();
        let params = step
            .get("params")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        match operation.as_str() {
            Some("add_node") => match params.get("node_id").and_then(node_ref_str) {
                None => errors.push(format!("Step {}: Missing node_id", i)),
                Some(id) if id.is_empty() => errors.push(format!("Step {}: Missing node_id", i)),
                Some(id) if !catalog.contains(&id) => {
                    errors.push(format!("Step {}: Unknown node_id '{}'", i, id))
                }
                Some(_) => {}
            },
            Some("link_node") => {
                let source = reference(params, "source_node_id");
                if !source.as_deref().is_some_and(&is_known) {
                    errors.push(format!(
                        "Step {}: Source node '{}' not found",
                        i,
                        display_ref(params, "source_node_id")
                    ));
                }
                let target = reference(params, "target_node_id");
                if !target.as_deref().is_some_and(&is_known) {
                    errors.push(format!(
                        "Step {}: Target node '{}' not found",
                        i,
                        display_ref(params, "target_node_id")
                    ));
                }
            }
            Some("set_param") => {
                let node = reference(params, "node_id");
                if !node.as_deref().is_some_and(&is_known) {
                    errors.push(format!(
                        "Step {}: Node '{}' not found",
                        i,
                        display_ref(params, "node_id")
                    ));
                }
            }
            // Unrecognized tags, string or not, carry no references to check
            _ => {}
        }
    }

    ValidationResult::from_findings(errors, Vec::new())
}

/// Catalog-known node ids added anywhere in the batch
fn added_nodes(steps: &[Value], catalog: &NodeCatalog) -> HashSet<String> {
    steps
        .iter()
        .filter(|step| step.get("operation").and_then(Value::as_str) == Some("add_node"))
        .filter_map(|step| step.get("params")?.get("node_id").and_then(node_ref_str))
        .filter(|id| catalog.contains(id))
        .collect()
}

fn reference(params: &Map<String, Value>, key: &str) -> Option<String> {
    params.get(key).and_then(node_ref_str)
}

fn display_ref(params: &Map<String, Value>, key: &str) -> String {
    match params.get(key) {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(value) => node_ref_str(value).unwrap_or_else(|| value.to_string()),
    }
}
