//! Chat history unit tests

use oneflow_chat::cache::history::{ChatHistory, HISTORY_WINDOW};
use oneflow_chat::errors::ChatError;
use oneflow_chat::models::result::WorkflowResult;

fn failed() -> WorkflowResult {
    WorkflowResult::failure(&ChatError::GenerationError("offline".to_string()), None)
}

#[test]
fn test_history_record_and_read() {
    let history = ChatHistory::new(10);
    assert!(history.is_empty());

    let first = history.record("add a preview", &failed());
    let second = history.record("load an image", &failed());

    assert_eq!(history.len(), 2);
    assert!(second > first);
    let entries = history.recent();
    assert_eq!(entries[0].user_request, "add a preview");
    assert_eq!(entries[1].user_request, "load an image");
    assert!(!entries[0].result.success);
}

#[test]
fn test_history_eviction() {
    let history = ChatHistory::new(3);

    for i in 0..5 {
        history.record(&format!("request {}", i), &failed());
    }

    // Oldest entries are evicted first
    assert_eq!(history.len(), 3);
    let requests: Vec<String> = history
        .recent()
        .into_iter()
        .map(|entry| entry.user_request)
        .collect();
    assert_eq!(requests, vec!["request 2", "request 3", "request 4"]);
}

#[test]
fn test_history_window() {
    let history = ChatHistory::new(200);

    for i in 0..120 {
        history.record(&format!("request {}", i), &failed());
    }

    let recent = history.recent();
    assert_eq!(recent.len(), HISTORY_WINDOW);
    assert_eq!(recent[0].user_request, "request 70");
    assert_eq!(recent[HISTORY_WINDOW - 1].user_request, "request 119");
    assert_eq!(history.window(2).len(), 2);
}

#[test]
fn test_history_zero_capacity_keeps_one() {
    let history = ChatHistory::new(0);

    history.record("a", &failed());
    history.record("b", &failed());

    assert_eq!(history.capacity(), 1);
    assert_eq!(history.recent()[0].user_request, "b");
}
