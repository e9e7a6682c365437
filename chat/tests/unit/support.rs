//! Shared fixtures

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use oneflow_chat::catalog::builtin::BuiltinNodes;
use oneflow_chat::catalog::schema::NodeDeclaration;
use oneflow_chat::catalog::{CatalogBuilder, NodeCatalog, NodePlugin};
use oneflow_chat::completion::CompletionProvider;
use oneflow_chat::errors::ChatError;
use oneflow_chat::models::graph::GraphSnapshot;

/// Completion provider replaying canned replies in order
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedCompletion {
    pub fn replying(replies: &[&str]) -> Arc<Self> {
        let scripted = Self::default();
        {
            let mut queue = scripted.replies.lock().unwrap();
            for reply in replies {
                queue.push_back(Ok(reply.to_string()));
            }
        }
        Arc::new(scripted)
    }

    pub fn failing(message: &str) -> Arc<Self> {
        let scripted = Self::default();
        scripted
            .replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        Arc::new(scripted)
    }

    /// `(system, user)` pairs received so far
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletion {
    async fn complete(
        &self,
        system_instructions: &str,
        user_message: &str,
    ) -> Result<String, ChatError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_instructions.to_string(), user_message.to_string()));
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(ChatError::GenerationError(message)),
            None => Err(ChatError::GenerationError("script exhausted".to_string())),
        }
    }
}

/// A text node on top of the built-ins
pub struct TextNodes;

impl NodePlugin for TextNodes {
    fn name(&self) -> &str {
        "text-nodes"
    }

    fn register(&self, catalog: &mut CatalogBuilder) -> Result<(), ChatError> {
        let map = match json!({
            "required": { "text": ["STRING", { "multiline": true }] }
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let schema = NodeDeclaration {
            category: "text".to_string(),
            function: "emit".to_string(),
            description: "Emit a fixed string".to_string(),
            output_node: false,
            input_types: map,
            return_types: vec!["STRING".to_string()],
            return_names: vec![],
        }
        .into_schema("TextInput", Some("Text Input".to_string()), "test")?;
        catalog.register(schema);
        Ok(())
    }
}

pub fn catalog() -> Arc<NodeCatalog> {
    let mut builder = CatalogBuilder::new();
    builder.register_plugin(&TextNodes);
    builder.register_plugin(&BuiltinNodes);
    Arc::new(builder.build())
}

/// Manifest directory shipped at the workspace root
pub fn shipped_nodes_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../custom_nodes")
}

/// Shipped manifests plus the built-ins, as the server loads them
pub async fn shipped_catalog() -> Arc<NodeCatalog> {
    Arc::new(NodeCatalog::load(&shipped_nodes_dir()).await)
}

pub fn graph(value: Value) -> GraphSnapshot {
    serde_json::from_value(value).unwrap()
}
