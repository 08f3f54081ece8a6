use serde_json::{json, Value};

use crate::core::Category;

/// Schema of the workflow builder answer: an array of steps
pub fn workflow_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "id": { "type": "string" },
                "type": { "type": "string", "enum": ["trigger", "action", "condition", "ai_agent"] },
                "name": { "type": "string" },
                "description": { "type": "string" },
                "tool": { "type": "string" }
            },
            "required": ["id", "type", "name", "description"]
        }
    })
}

/// Schema of a generated project template
pub fn template_schema() -> Value {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "description": { "type": "string" },
            "category": { "type": "string", "enum": categories },
            "tasks": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["name", "description", "category", "tasks"]
    })
}
