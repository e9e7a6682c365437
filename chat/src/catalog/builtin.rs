//! Built-in editor nodes that are always available

use serde_json::json;

use crate::catalog::schema::{NodeDeclaration, NodeSchema};
use crate::catalog::{CatalogBuilder, NodePlugin};
use crate::errors::ChatError;

/// Source tag for built-in schemas
pub const BUILTIN_SOURCE: &str = "builtin";

/// `PreviewImage`, `LoadImage` and `SaveImage`
pub struct BuiltinNodes;

impl BuiltinNodes {
    fn schemas() -> Result<Vec<NodeSchema>, ChatError> {
        let preview = NodeDeclaration {
            category: "image".to_string(),
            function: "preview".to_string(),
            description: "Preview an image in the ComfyUI interface".to_string(),
            output_node: true,
            input_types: object(json!({
                "required": { "images": ["IMAGE"] }
            })),
            return_types: vec![],
            return_names: vec![],
        }
        .into_schema("PreviewImage", Some("Preview Image".to_string()), BUILTIN_SOURCE)?;

        let load = NodeDeclaration {
            category: "image".to_string(),
            function: "load_image".to_string(),
            description: "Load an image from file".to_string(),
            output_node: false,
            input_types: object(json!({
                "required": { "image": ["STRING", { "image_upload": true }] }
            })),
            return_types: vec!["IMAGE".to_string(), "MASK".to_string()],
            return_names: vec!["image".to_string(), "mask".to_string()],
        }
        .into_schema("LoadImage", Some("Load Image".to_string()), BUILTIN_SOURCE)?;

        let save = NodeDeclaration {
            category: "image".to_string(),
            function: "save_image".to_string(),
            description: "Save an image to file".to_string(),
            output_node: true,
            input_types: object(json!({
                "required": {
                    "images": ["IMAGE"],
                    "filename_prefix": ["STRING", { "default": "ComfyUI" }]
                }
            })),
            return_types: vec![],
            return_names: vec![],
        }
        .into_schema("SaveImage", Some("Save Image".to_string()), BUILTIN_SOURCE)?;

        Ok(vec![preview, load, save])
    }
}

fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

impl NodePlugin for BuiltinNodes {
    fn name(&self) -> &str {
        BUILTIN_SOURCE
    }

    fn register(&self, catalog: &mut CatalogBuilder) -> Result<(), ChatError> {
        for schema in Self::schemas()? {
            catalog.register(schema);
        }
        Ok(())
    }
}
