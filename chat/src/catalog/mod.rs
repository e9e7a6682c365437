//! Node catalog
//!
//! The catalog is a closed, enumerable set of node schemas assembled once at
//! startup from registered plugins and read-only afterwards.

pub mod builtin;
pub mod loader;
pub mod schema;

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::builtin::BuiltinNodes;
use crate::catalog::loader::ManifestDir;
use crate::catalog::schema::NodeSchema;
use crate::errors::ChatError;

/// Maximum description length in the catalog listing
pub const SUMMARY_DESCRIPTION_LIMIT: usize = 100;

/// A source of node schemas
pub trait NodePlugin: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Register every schema this plugin provides
    fn register(&self, catalog: &mut CatalogBuilder) -> Result<(), ChatError>;
}

/// Collects schemas in registration order
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    schemas: Vec<NodeSchema>,
    index: HashMap<String, usize>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema. A later registration with the same id replaces the
    /// earlier one but keeps its position.
    pub fn register(&mut self, schema: NodeSchema) {
        match self.index.get(&schema.node_id) {
            Some(&pos) => self.schemas[pos] = schema,
            None => {
                self.index.insert(schema.node_id.clone(), self.schemas.len());
                self.schemas.push(schema);
            }
        }
    }

    /// Run a plugin, logging and skipping it on failure
    pub fn register_plugin(&mut self, plugin: &dyn NodePlugin) {
        let before = self.schemas.len();
        if let Err(e) = plugin.register(self) {
            warn!("Plugin '{}' failed to register: {}", plugin.name(), e);
            return;
        }
        info!(
            "Plugin '{}' registered {} new node(s)",
            plugin.name(),
            self.schemas.len() - before
        );
    }

    pub fn build(self) -> NodeCatalog {
        NodeCatalog {
            schemas: self.schemas,
            index: self.index,
        }
    }
}

/// Immutable mapping from node type id to schema
#[derive(Debug, Default)]
pub struct NodeCatalog {
    schemas: Vec<NodeSchema>,
    index: HashMap<String, usize>,
}

impl NodeCatalog {
    /// Load manifests from `plugin_dir`, then add the built-in nodes
    pub async fn load(plugin_dir: &Path) -> NodeCatalog {
        let mut builder = CatalogBuilder::new();
        let manifests = ManifestDir::scan(plugin_dir).await;
        builder.register_plugin(&manifests);
        builder.register_plugin(&BuiltinNodes);

        let catalog = builder.build();
        info!(
            "Node catalog loaded with {} node(s) from {} manifest(s)",
            catalog.len(),
            manifests.manifest_count()
        );
        catalog
    }

    pub fn get(&self, node_id: &str) -> Option<&NodeSchema> {
        self.index.get(node_id).map(|&pos| &self.schemas[pos])
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.index.contains_key(node_id)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Schemas in registration order
    pub fn iter(&self) -> impl Iterator<Item = &NodeSchema> {
        self.schemas.iter()
    }

    /// Schemas grouped by category, categories in first-seen order
    pub fn by_category(&self) -> Vec<(&str, Vec<&NodeSchema>)> {
        let mut groups: Vec<(&str, Vec<&NodeSchema>)> = Vec::new();
        for schema in &self.schemas {
            match groups.iter_mut().find(|(c, _)| *c == schema.category) {
                Some((_, members)) => members.push(schema),
                None => groups.push((schema.category.as_str(), vec![schema])),
            }
        }
        groups
    }

    /// Listing of available nodes for the frontend
    pub fn summary(&self) -> NodesSummary {
        let categories = self
            .by_category()
            .into_iter()
            .map(|(category, members)| {
                let nodes: Vec<NodeBrief> = members
                    .into_iter()
                    .map(|schema| NodeBrief {
                        id: schema.node_id.clone(),
                        display_name: schema.display_name.clone(),
                        description: truncate_description(&schema.description),
                    })
                    .collect();
                let summary = CategorySummary {
                    count: nodes.len(),
                    nodes,
                };
                (category.to_string(), summary)
            })
            .collect();

        NodesSummary {
            total_nodes: self.len(),
            categories,
        }
    }
}

/// Cut a description to the listing limit, marking the cut with `...`
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > SUMMARY_DESCRIPTION_LIMIT {
        let cut: String = description.chars().take(SUMMARY_DESCRIPTION_LIMIT).collect();
        format!("{}...", cut)
    } else {
        description.to_string()
    }
}

/// Catalog listing
#[derive(Debug, Clone, Serialize)]
pub struct NodesSummary {
    pub total_nodes: usize,
    pub categories: CategoryMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub count: usize,
    pub nodes: Vec<NodeBrief>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeBrief {
    pub id: String,
    pub display_name: String,
    pub description: String,
}

/// Categories keyed by name, serialized as a JSON object in first-seen order
#[derive(Debug, Clone, Default)]
pub struct CategoryMap(Vec<(String, CategorySummary)>);

impl CategoryMap {
    pub fn get(&self, category: &str) -> Option<&CategorySummary> {
        self.0.iter().find(|(c, _)| c == category).map(|(_, s)| s)
    }
}

impl FromIterator<(String, CategorySummary)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (String, CategorySummary)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for CategoryMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, summary) in &self.0 {
            map.serialize_entry(category, summary)?;
        }
        map.end()
    }
}
