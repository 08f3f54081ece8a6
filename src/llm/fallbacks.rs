//! Substitute results returned when no credential is configured or a
//! provider call fails.

use crate::constants::*;
use crate::core::{Category, StepType, TemplateDraft, WorkflowStep};

/// Illustrative lead-handling pipeline shown without a credential
pub fn canned_workflow() -> Vec<WorkflowStep> {
    vec![
        WorkflowStep::new(
            "1",
            StepType::Trigger,
            "New Lead",
            "Triggered when a new lead enters the CRM",
            "HubSpot",
        ),
        WorkflowStep::new(
            "2",
            StepType::AiAgent,
            "Enrich Data",
            "Research company using Gemini",
            "Gemini 2.5 Flash",
        ),
        WorkflowStep::new(
            "3",
            StepType::Action,
            "Draft Email",
            "Draft personalized outreach email",
            "Gmail",
        ),
        WorkflowStep::new(
            "4",
            StepType::Action,
            "Notify Slack",
            "Send notification to sales channel",
            "Slack",
        ),
    ]
}

/// Single error-indicator step
pub fn workflow_failure() -> Vec<WorkflowStep> {
    vec![WorkflowStep::new(
        "err1",
        StepType::AiAgent,
        "Error",
        WORKFLOW_FAILURE_DESCRIPTION,
        "System",
    )]
}

pub fn canned_template() -> TemplateDraft {
    TemplateDraft {
        name: Some(CANNED_TEMPLATE_NAME.to_string()),
        description: Some(CANNED_TEMPLATE_DESCRIPTION.to_string()),
        category: Some(Category::Strategy),
        tasks: Some(CANNED_TEMPLATE_TASKS.iter().map(|t| t.to_string()).collect()),
    }
}

/// Error-labelled template with no tasks
pub fn template_failure() -> TemplateDraft {
    TemplateDraft {
        name: Some(TEMPLATE_FAILURE_NAME.to_string()),
        description: Some(TEMPLATE_FAILURE_DESCRIPTION.to_string()),
        category: Some(Category::Strategy),
        tasks: Some(Vec::new()),
    }
}
