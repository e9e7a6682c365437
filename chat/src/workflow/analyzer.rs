//! Canvas summaries used as conversational context
//!
//! Node classification is a substring heuristic on the type name, not a
//! schema check.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

use crate::models::graph::{GraphNode, GraphSnapshot};

/// Per-node summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub inputs: Map<String, Value>,
    pub outputs: Vec<Value>,
}

/// Normalized link
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub source_node: Value,
    pub source_slot: Value,
    pub target_node: Value,
    pub target_slot: Value,
    #[serde(rename = "type")]
    pub link_type: Value,
}

/// Derived view of a canvas
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphAnalysis {
    pub nodes: Vec<NodeSummary>,
    pub connections: Vec<Connection>,
    pub has_image_input: bool,
    pub has_text_input: bool,
    pub has_image_output: bool,
    pub has_text_output: bool,
    pub existing_editing_nodes: Vec<NodeSummary>,
    pub existing_display_nodes: Vec<NodeSummary>,
    pub summary: String,
    /// Set only when the input could not be analyzed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GraphAnalysis {
    fn degraded(reason: String) -> Self {
        error!("Error analyzing workflow: {}", reason);
        Self {
            summary: "Failed to analyze workflow".to_string(),
            error: Some(reason),
            ..Default::default()
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Analyze an untyped canvas payload, degrading on unexpected shapes
pub fn analyze_value(graph: &Value) -> GraphAnalysis {
    match serde_json::from_value::<GraphSnapshot>(graph.clone()) {
        Ok(snapshot) => analyze(&snapshot),
        Err(e) => GraphAnalysis::degraded(format!("invalid workflow: {}", e)),
    }
}

/// Analyze a canvas snapshot
pub fn analyze(graph: &GraphSnapshot) -> GraphAnalysis {
    match try_analyze(graph) {
        Ok(analysis) => analysis,
        Err(reason) => GraphAnalysis::degraded(reason),
    }
}

fn try_analyze(graph: &GraphSnapshot) -> Result<GraphAnalysis, String> {
    let mut analysis = GraphAnalysis::default();

    for (node_id, raw) in &graph.nodes {
        let node: GraphNode = serde_json::from_value(raw.clone())
            .map_err(|e| format!("node '{}': {}", node_id, e))?;
        let summary = NodeSummary {
            id: node_id.clone(),
            node_type: node.class_type.clone(),
            inputs: node.inputs.clone(),
            outputs: Vec::new(),
        };

        let type_name = node.class_type.to_lowercase();
        if type_name.contains("image") && type_name.contains("edit") {
            analysis.existing_editing_nodes.push(summary.clone());
        }
        if type_name.contains("display") || type_name.contains("preview") {
            analysis.existing_display_nodes.push(summary.clone());
        }

        for (input_name, value) in &node.inputs {
            if GraphNode::is_connection(value) {
                continue;
            }
            let input_name = input_name.to_lowercase();
            if input_name.contains("image") {
                analysis.has_image_input = true;
            }
            if input_name.contains("text") || input_name.contains("prompt") {
                analysis.has_text_input = true;
            }
        }

        analysis.nodes.push(summary);
    }

    for (i, link) in graph.links.iter().enumerate() {
        let items = link
            .as_array()
            .ok_or_else(|| format!("link {} is not a list", i))?;
        if items.len() < 6 {
            continue;
        }

        let connection = Connection {
            source_node: items[1].clone(),
            source_slot: items[2].clone(),
            target_node: items[3].clone(),
            target_slot: items[4].clone(),
            link_type: items[5].clone(),
        };
        match connection.link_type.as_str() {
            Some("IMAGE") => analysis.has_image_output = true,
            Some("STRING") => analysis.has_text_output = true,
            _ => {}
        }
        analysis.connections.push(connection);
    }

    analysis.summary = summarize(&analysis);
    Ok(analysis)
}

fn summarize(analysis: &GraphAnalysis) -> String {
    let mut parts = vec![
        format!("{} nodes", analysis.nodes.len()),
        format!("{} connections", analysis.connections.len()),
    ];
    if !analysis.existing_editing_nodes.is_empty() {
        parts.push(format!(
            "{} image editing nodes",
            analysis.existing_editing_nodes.len()
        ));
    }
    if !analysis.existing_display_nodes.is_empty() {
        parts.push(format!(
            "{} display nodes",
            analysis.existing_display_nodes.len()
        ));
    }
    format!("Current workflow has {}", parts.join(", "))
}
