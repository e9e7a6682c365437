//! Analyzer unit tests

use serde_json::json;

use oneflow_chat::workflow::analyzer::{analyze, analyze_value};

use crate::support::graph;

#[test]
fn test_summary_without_editing_or_display_nodes() {
    let current = graph(json!({
        "nodes": {
            "1": {"class_type": "LoadImage", "inputs": {"image": "cat.png"}},
            "2": {"class_type": "ImageResize", "inputs": {"image": ["1", 0], "width": 512}},
            "3": {"class_type": "SaveImage", "inputs": {"images": ["2", 0]}}
        },
        "links": [[1, "1", 0, "2", 0, "IMAGE"], [2, "2", 0, "3", 0, "IMAGE"]]
    }));

    let analysis = analyze(&current);

    assert_eq!(analysis.summary, "Current workflow has 3 nodes, 2 connections");
    assert_eq!(analysis.nodes.len(), 3);
    assert_eq!(analysis.nodes[0].id, "1");
    assert!(analysis.existing_editing_nodes.is_empty());
    assert!(analysis.existing_display_nodes.is_empty());
}

#[test]
fn test_image_path_input_sets_image_flag() {
    let current = graph(json!({
        "nodes": {"1": {"class_type": "FileLoader", "inputs": {"image_path": "/tmp/a.png"}}}
    }));

    let analysis = analyze(&current);

    assert!(analysis.has_image_input);
    assert!(!analysis.has_text_input);
}

#[test]
fn test_link_types_set_output_flags() {
    let image_only = graph(json!({
        "nodes": {},
        "links": [[1, "1", 0, "2", 0, "IMAGE"]]
    }));
    let text_only = graph(json!({
        "nodes": {},
        "links": [[1, "1", 0, "2", 0, "STRING"]]
    }));

    let image = analyze(&image_only);
    let text = analyze(&text_only);

    assert!(image.has_image_output && !image.has_text_output);
    assert!(text.has_text_output && !text.has_image_output);
    assert_eq!(text.connections[0].link_type, json!("STRING"));
}

#[test]
fn test_short_links_are_skipped() {
    let current = graph(json!({
        "nodes": {},
        "links": [[1, "1", 0, "2"]]
    }));

    let analysis = analyze(&current);

    assert!(analysis.connections.is_empty());
    assert_eq!(analysis.summary, "Current workflow has 0 nodes, 0 connections");
}

#[test]
fn test_malformed_graph_degrades() {
    let analysis = analyze_value(&json!({"nodes": ["not", "a", "map"]}));

    assert!(analysis.is_degraded());
    assert_eq!(analysis.summary, "Failed to analyze workflow");
    assert!(analysis.nodes.is_empty());

    let analysis = analyze_value(&json!({"nodes": {}, "links": ["oops"]}));
    assert!(analysis.is_degraded());
}
