//! Validator unit tests

use serde_json::json;

use oneflow_chat::workflow::validator::validate;

use crate::support::{catalog, graph};

#[test]
fn test_unknown_link_source_against_canvas() {
    let current = graph(json!({
        "nodes": {"1": {"class_type": "PreviewImage", "inputs": {}}},
        "links": []
    }));
    let steps = vec![json!({"operation": "link_node", "params": {
        "source_node_id": "99",
        "target_node_id": "1",
        "source_output": "image",
        "target_input": "image"
    }})];

    let result = validate(&steps, &catalog(), Some(&current));

    assert!(!result.valid);
    assert_eq!(result.errors, vec!["Step 0: Source node '99' not found"]);
}

#[test]
fn test_unknown_node_type() {
    let steps = vec![json!({"operation": "add_node", "params": {"node_id": "UnknownNode"}})];

    let result = validate(&steps, &catalog(), None);

    assert!(!result.valid);
    assert_eq!(result.errors, vec!["Step 0: Unknown node_id 'UnknownNode'"]);
}

#[test]
fn test_forward_reference_is_valid() {
    let steps = vec![
        json!({"operation": "link_node", "params": {
            "source_node_id": "TextInput",
            "source_output": "output_0",
            "target_node_id": "PreviewImage",
            "target_input": "images"
        }}),
        json!({"operation": "add_node", "params": {"node_id": "TextInput"}}),
        json!({"operation": "add_node", "params": {"node_id": "PreviewImage"}}),
    ];

    let result = validate(&steps, &catalog(), None);

    // slot types are not compared, so STRING into IMAGE passes
    assert!(result.valid, "{:?}", result.errors);
    assert!(result.errors.is_empty());
}

#[test]
fn test_set_param_on_canvas_node() {
    let current = graph(json!({
        "nodes": {"4": {"class_type": "TextInput", "inputs": {"text": "hi"}}}
    }));
    let steps = vec![
        json!({"operation": "set_param", "params": {
            "node_id": "4", "param_name": "text", "param_value": "hello"
        }}),
        json!({"operation": "set_param", "params": {
            "node_id": "5", "param_name": "text", "param_value": "hello"
        }}),
    ];

    let result = validate(&steps, &catalog(), Some(&current));

    assert_eq!(result.errors, vec!["Step 1: Node '5' not found"]);
}

#[test]
fn test_add_node_reusing_canvas_id_is_accepted() {
    let current = graph(json!({
        "nodes": {"PreviewImage": {"class_type": "PreviewImage"}}
    }));
    let steps = vec![json!({"operation": "add_node", "params": {"node_id": "PreviewImage"}})];

    assert!(validate(&steps, &catalog(), Some(&current)).valid);
}

#[test]
fn test_validation_is_repeatable_and_read_only() {
    let current = graph(json!({
        "nodes": {"1": {"class_type": "LoadImage", "inputs": {"image": "a.png"}}},
        "links": [[1, "1", 0, "2", 0, "IMAGE"]]
    }));
    let before = current.clone();
    let steps = vec![
        json!({"operation": "link_node", "params": {
            "source_node_id": "1", "source_output": "image",
            "target_node_id": "ghost", "target_input": "images"
        }}),
        json!({"operation": "add_node", "params": {"node_id": "Nope"}}),
    ];
    let catalog = catalog();

    let first = validate(&steps, &catalog, Some(&current));
    let second = validate(&steps, &catalog, Some(&current));

    assert_eq!(first, second);
    assert_eq!(current, before);
    assert_eq!(
        first.errors,
        vec![
            "Step 0: Target node 'ghost' not found",
            "Step 1: Unknown node_id 'Nope'"
        ]
    );
}

#[test]
fn test_unrecognized_operation_tags_pass_through() {
    let steps = vec![
        json!({"operation": 5, "params": {}}),
        json!({"operation": "delete_node", "params": {"node_id": "missing"}}),
        json!({"operation": null}),
    ];

    let result = validate(&steps, &catalog(), None);

    assert!(result.valid, "{:?}", result.errors);
    assert!(result.errors.is_empty());
}
