//! Instruction payloads for the completion step

use crate::catalog::schema::NodeSchema;
use crate::catalog::NodeCatalog;
use crate::models::graph::GraphSnapshot;

const RULES: &str = r#"## Workflow Generation Rules:

1. **Node Selection**: Only use nodes from the available custom nodes list above
2. **Data Flow**: Ensure correct connections between nodes (image->image, text->text, etc.)
3. **Parameter Passing**: Set reasonable default parameters for each node
4. **Workflow Logic**: Create logical sequences that fulfill user requirements
5. **Minimal Complexity**: Use only necessary nodes to achieve the goal
6. **Text Display**: To show generated text, connect it to a "TextShow" node (or "TextShowAdvanced" for previews and word counts)
7. **Image Editing**: For image modification requests, use "OpenAIImageEditing" node (which has built-in image upload) followed by "PreviewImage" node
8. **Context Awareness**: If current workflow context is provided, modify existing workflows instead of creating new ones when appropriate
9. **Existing Node Integration**: When current workflow contains relevant nodes, connect new nodes to existing ones instead of creating isolated workflows
10. **Node ID Preservation**: When referencing existing nodes from current workflow, use their exact node IDs (e.g., "1", "2", etc.)
"#;

const OUTPUT_FORMAT: &str = r#"## Output Format:

You must respond with a JSON object containing a "workflow" array of atomic operations. Each operation should be one of:

### add_node(node_id, node_params, position)
Adds a node to the workflow
- node_id: The ID of the node from the available nodes list
- node_params: Dictionary of parameters for the node (use defaults from node specs)
- position: {x: number, y: number} for UI positioning

### link_node(source_node_id, source_output, target_node_id, target_input)
Links two nodes together
- source_node_id: ID of the source node
- source_output: Name of the output from source node
- target_node_id: ID of the target node
- target_input: Name of the input on target node

### set_param(node_id, param_name, param_value)
Sets a parameter on a node
- node_id: ID of the node
- param_name: Name of the parameter
- param_value: Value to set
"#;

const EXAMPLES: &str = r#"## Example Response Format:
```json
{
  "workflow": [
    {
      "operation": "add_node",
      "params": {
        "node_id": "OpenAITextGeneration",
        "node_params": {"prompt": "Write a story about a cat", "model": "gpt-4.1", "max_tokens": 1000, "temperature": 0.7},
        "position": {"x": 100, "y": 100}
      }
    },
    {
      "operation": "add_node",
      "params": {"node_id": "TextShow", "node_params": {"title": "Cat Story"}, "position": {"x": 400, "y": 100}}
    },
    {
      "operation": "link_node",
      "params": {"source_node_id": "OpenAITextGeneration", "source_output": "generated_text", "target_node_id": "TextShow", "target_input": "text"}
    }
  ],
  "description": "Generates a story and displays the text."
}
```

## Example: Connecting to Existing Nodes
If current workflow has a LoadImage node with ID "1", and user asks to edit the image:
```json
{
  "workflow": [
    {
      "operation": "add_node",
      "params": {"node_id": "OpenAIImageEditing", "node_params": {"prompt": "Make this image brighter"}, "position": {"x": 300, "y": 100}}
    },
    {
      "operation": "add_node",
      "params": {"node_id": "PreviewImage", "node_params": {}, "position": {"x": 600, "y": 100}}
    },
    {
      "operation": "link_node",
      "params": {"source_node_id": "1", "source_output": "image", "target_node_id": "OpenAIImageEditing", "target_input": "image"}
    },
    {
      "operation": "link_node",
      "params": {"source_node_id": "OpenAIImageEditing", "source_output": "edited_image", "target_node_id": "PreviewImage", "target_input": "images"}
    }
  ],
  "description": "Connects to existing LoadImage node and adds image editing with preview."
}
```
"#;

const NOTES: &str = r#"## Important Notes:
- Always include a description of what the workflow does
- Position nodes logically from left to right based on data flow
- Ensure all required inputs are connected or have default values
- Use output nodes (like PreviewImage) to display results
- Keep workflows simple and focused on the user's specific request
- **CRITICAL**: Output ONLY valid JSON without any comments or extra text
- **NO COMMENTS**: Do not include // comments in JSON as they make it invalid
"#;

const REUSE_DIRECTIVES: &str = "\n\nIMPORTANT: The above workflow already exists on the canvas. When creating link_node operations:\
\n- Use the EXACT node IDs from the current workflow (e.g., if there's a node with ID '1', reference it as '1')\
\n- Connect new nodes TO existing nodes whenever possible\
\n- Reuse existing nodes instead of creating duplicates when appropriate\
\n- If modifying existing workflow, prefer connecting to existing nodes over creating isolated new workflows";

/// System instructions and user message for one completion call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instructions {
    pub system: String,
    pub user: String,
}

/// Build the instruction payload for `user_request`
pub fn build(
    catalog: &NodeCatalog,
    user_request: &str,
    current_graph: Option<&GraphSnapshot>,
) -> Instructions {
    Instructions {
        system: system_prompt(catalog),
        user: user_message(user_request, current_graph),
    }
}

/// Designer instructions wrapped around the catalog listing
pub fn system_prompt(catalog: &NodeCatalog) -> String {
    format!(
        "You are an AI workflow designer for OneFlow, a ComfyUI-based system. \
         Your task is to convert user requirements into structured workflow instructions \
         using available custom nodes.\n\n{}\n{}\n{}\n{}\n{}",
        format_catalog(catalog),
        RULES,
        OUTPUT_FORMAT,
        EXAMPLES,
        NOTES
    )
}

/// Request message, with the canvas state and reuse directives when present
pub fn user_message(user_request: &str, current_graph: Option<&GraphSnapshot>) -> String {
    let mut message = format!("Create a workflow for: {}", user_request);
    if let Some(graph) = current_graph {
        message.push_str("\n\nCurrent workflow context:\n");
        message.push_str(&graph.to_pretty_json());
        message.push_str(REUSE_DIRECTIVES);
    }
    message
}

/// Human-readable capability listing, grouped by category
pub fn format_catalog(catalog: &NodeCatalog) -> String {
    let mut lines = vec!["# Available Custom Nodes\n".to_string()];

    for (category, schemas) in catalog.by_category() {
        lines.push(format!("## Category: {}\n", category));
        for schema in schemas {
            format_node(schema, &mut lines);
        }
    }

    lines.join("\n")
}

fn format_node(schema: &NodeSchema, lines: &mut Vec<String>) {
    lines.push(format!("### {} (ID: {})", schema.display_name, schema.node_id));
    lines.push(format!("**Description:** {}", schema.description));
    lines.push(format!("**Function:** {}", schema.function));
    lines.push(format!("**Output Node:** {}", schema.is_output_node));

    if !schema.inputs.is_empty() {
        lines.push("**Inputs:**".to_string());
        for section in &schema.inputs {
            lines.push(format!("  - {}:", section.name.to_uppercase()));
            for input in &section.inputs {
                lines.push(format!(
                    "    - {}: {} {}",
                    input.name,
                    input.kind.type_label(),
                    input.config_label()
                ));
            }
        }
    }

    let outputs = schema.outputs();
    if !outputs.is_empty() {
        lines.push("**Outputs:**".to_string());
        for (name, ty) in outputs {
            lines.push(format!("  - {}: {}", name, ty));
        }
    }

    lines.push(String::new());
}
