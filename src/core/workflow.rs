use serde::{Deserialize, Serialize};

/// Kind of node in a generated automation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Trigger,
    Action,
    Condition,
    AiAgent,
}

/// One step of a workflow produced by the builder.
///
/// Steps are ordered causally: each one runs after the step before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub id: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    /// Short title
    pub name: String,
    /// What the step does
    pub description: String,
    /// Tool label, e.g. "Gmail" or "Notion"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
}

impl WorkflowStep {
    pub fn new(id: &str, step_type: StepType, name: &str, description: &str, tool: &str) -> Self {
        WorkflowStep {
            id: id.to_string(),
            step_type,
            name: name.to_string(),
            description: description.to_string(),
            tool: Some(tool.to_string()),
        }
    }
}
