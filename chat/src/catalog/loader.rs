//! Plugin manifest discovery
//!
//! Each `*.json` file in the plugin directory declares a
//! `node_class_mappings` object and an optional `node_display_name_mappings`
//! object. Loading is best effort: a file or entry that cannot be read is
//! logged and skipped.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, error, warn};

use crate::catalog::schema::NodeDeclaration;
use crate::catalog::{CatalogBuilder, NodePlugin};
use crate::errors::ChatError;

/// Raw manifest file contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginManifest {
    /// Node id to declaration; entries are decoded one by one
    #[serde(default)]
    pub node_class_mappings: Map<String, Value>,

    #[serde(default)]
    pub node_display_name_mappings: Map<String, Value>,
}

/// Manifests read from one plugin directory
#[derive(Debug, Default)]
pub struct ManifestDir {
    dir: PathBuf,
    manifests: Vec<(String, PluginManifest)>,
}

impl ManifestDir {
    /// Read every manifest in `dir`, in file-name order
    pub async fn scan(dir: &Path) -> Self {
        let mut loaded = Self {
            dir: dir.to_path_buf(),
            manifests: Vec::new(),
        };

        let files = match manifest_files(dir).await {
            Ok(files) => files,
            Err(e) => {
                warn!("Plugin directory {} not readable: {}", dir.display(), e);
                return loaded;
            }
        };

        for path in files {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match read_manifest(&path).await {
                Ok(manifest) => {
                    debug!(
                        "Read manifest {} ({} node(s))",
                        file_name,
                        manifest.node_class_mappings.len()
                    );
                    loaded.manifests.push((file_name, manifest));
                }
                Err(e) => error!("Error loading plugin manifest {}: {}", file_name, e),
            }
        }

        loaded
    }

    pub fn manifest_count(&self) -> usize {
        self.manifests.len()
    }
}

async fn manifest_files(dir: &Path) -> Result<Vec<PathBuf>, ChatError> {
    let mut files = Vec::new();
    let mut entries = fs::read_dir(dir).await?;

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        let is_manifest = path.extension().is_some_and(|ext| ext == "json")
            && !path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with("__"));
        if !is_manifest {
            continue;
        }
        match entry.file_type().await {
            Ok(file_type) if file_type.is_file() => files.push(path),
            Ok(_) => debug!("Skipping non-file manifest entry {}", path.display()),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    files.sort();
    Ok(files)
}

async fn read_manifest(path: &Path) -> Result<PluginManifest, ChatError> {
    let contents = fs::read_to_string(path).await?;
    let manifest = serde_json::from_str(&contents)?;
    Ok(manifest)
}

impl NodePlugin for ManifestDir {
    fn name(&self) -> &str {
        self.dir.to_str().unwrap_or("plugin directory")
    }

    fn register(&self, catalog: &mut CatalogBuilder) -> Result<(), ChatError> {
        for (file_name, manifest) in &self.manifests {
            for (node_id, raw) in &manifest.node_class_mappings {
                let display_name = manifest
                    .node_display_name_mappings
                    .get(node_id)
                    .and_then(Value::as_str)
                    .map(str::to_string);

                let schema = serde_json::from_value::<NodeDeclaration>(raw.clone())
                    .map_err(ChatError::from)
                    .and_then(|decl| decl.into_schema(node_id, display_name, file_name));

                match schema {
                    Ok(schema) => catalog.register(schema),
                    Err(e) => error!(
                        "Error collecting info for node {} in {}: {}",
                        node_id, file_name, e
                    ),
                }
            }
        }
        Ok(())
    }
}
