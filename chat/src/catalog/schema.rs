//! Node schema models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ChatError;

/// Type tags that carry a literal value rather than a graph connection
const PRIMITIVE_TYPES: &[&str] = &["STRING", "INT", "FLOAT", "BOOLEAN"];

/// How a declared input is fed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InputKind {
    /// A literal value of a primitive type
    Primitive(String),

    /// One of a fixed set of strings
    Choice(Vec<String>),

    /// Wired from another node's output of this type
    Connection(String),
}

impl InputKind {
    /// Type label as shown to the generation step
    pub fn type_label(&self) -> String {
        match self {
            InputKind::Primitive(tag) | InputKind::Connection(tag) => tag.clone(),
            InputKind::Choice(options) => format!("[{}]", options.join(", ")),
        }
    }
}

/// A single named input slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSpec {
    pub name: String,
    pub kind: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

impl InputSpec {
    /// Resolve a raw manifest declaration.
    ///
    /// Accepted forms are `"TYPE"`, `["TYPE"]`, `["TYPE", {config}]` and
    /// `[["a", "b"], {config}]`.
    pub fn resolve(name: &str, raw: &Value) -> Result<Self, ChatError> {
        let invalid = |why: &str| {
            ChatError::CatalogError(format!("input '{}': {}", name, why))
        };

        let (head, config) = match raw {
            Value::String(_) => (raw, None),
            Value::Array(items) => {
                let head = items.first().ok_or_else(|| invalid("empty declaration"))?;
                let config = match items.get(1) {
                    None | Some(Value::Null) => None,
                    Some(Value::Object(map)) => Some(map.clone()),
                    Some(_) => return Err(invalid("config must be an object")),
                };
                (head, config)
            }
            _ => return Err(invalid("expected a type tag or a [type, config] pair")),
        };

        let force_input = config
            .as_ref()
            .and_then(|c| c.get("forceInput"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let kind = match head {
            Value::String(tag) if force_input => InputKind::Connection(tag.clone()),
            Value::String(tag) if PRIMITIVE_TYPES.contains(&tag.as_str()) => {
                InputKind::Primitive(tag.clone())
            }
            Value::String(tag) => InputKind::Connection(tag.clone()),
            Value::Array(options) => InputKind::Choice(
                options
                    .iter()
                    .map(|o| o.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| invalid("choice options must be strings"))?,
            ),
            _ => return Err(invalid("type tag must be a string or a list of choices")),
        };

        Ok(Self {
            name: name.to_string(),
            kind,
            config,
        })
    }

    /// Config rendered inline, `{}` when absent
    pub fn config_label(&self) -> String {
        match &self.config {
            Some(config) => Value::Object(config.clone()).to_string(),
            None => "{}".to_string(),
        }
    }
}

/// A group of inputs such as `required` or `optional`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSection {
    pub name: String,
    pub inputs: Vec<InputSpec>,
}

/// Declared capabilities of one node type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSchema {
    pub node_id: String,
    pub display_name: String,
    pub category: String,
    pub function: String,
    pub description: String,
    pub inputs: Vec<InputSection>,
    pub return_types: Vec<String>,
    pub return_names: Vec<String>,
    pub is_output_node: bool,
    /// `builtin` or the manifest file the node came from
    pub source: String,
}

impl NodeSchema {
    /// Output slots as `(name, type)`, naming unnamed slots `output_<i>`
    pub fn outputs(&self) -> Vec<(String, &str)> {
        self.return_types
            .iter()
            .enumerate()
            .map(|(i, ty)| (output_name(&self.return_names, i), ty.as_str()))
            .collect()
    }

    /// Find a declared input across all sections
    pub fn input(&self, name: &str) -> Option<&InputSpec> {
        self.inputs
            .iter()
            .flat_map(|section| section.inputs.iter())
            .find(|input| input.name == name)
    }
}

/// Name of output slot `index`
pub fn output_name(return_names: &[String], index: usize) -> String {
    return_names
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("output_{}", index))
}

/// A node declaration as it appears in a plugin manifest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeDeclaration {
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub output_node: bool,
    /// Section name to ordered input declarations
    #[serde(default)]
    pub input_types: Map<String, Value>,
    #[serde(default)]
    pub return_types: Vec<String>,
    #[serde(default)]
    pub return_names: Vec<String>,
}

fn default_category() -> String {
    "Unknown".to_string()
}

impl NodeDeclaration {
    /// Resolve the declaration into a schema registered under `node_id`
    pub fn into_schema(
        self,
        node_id: &str,
        display_name: Option<String>,
        source: &str,
    ) -> Result<NodeSchema, ChatError> {
        let mut inputs = Vec::with_capacity(self.input_types.len());
        for (section, declared) in &self.input_types {
            let declared = declared.as_object().ok_or_else(|| {
                ChatError::CatalogError(format!(
                    "node '{}': input section '{}' must be an object",
                    node_id, section
                ))
            })?;
            let specs = declared
                .iter()
                .map(|(name, raw)| InputSpec::resolve(name, raw))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| match e {
                    ChatError::CatalogError(msg) => {
                        ChatError::CatalogError(format!("node '{}': {}", node_id, msg))
                    }
                    other => other,
                })?;
            inputs.push(InputSection {
                name: section.clone(),
                inputs: specs,
            });
        }

        Ok(NodeSchema {
            node_id: node_id.to_string(),
            display_name: display_name.unwrap_or_else(|| node_id.to_string()),
            category: self.category,
            function: self.function,
            description: self.description.trim().to_string(),
            inputs,
            return_types: self.return_types,
            return_names: self.return_names,
            is_output_node: self.output_node,
            source: source.to_string(),
        })
    }
}
