/// Default model used when the configuration does not name one
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Environment variable holding the provider credential by default
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Prompt for the workflow builder; `{request}` is replaced with the user's text
pub const WORKFLOW_PROMPT: &str = "You are an expert AI Automation Architect. Create a structured workflow based on this user request: \"{request}\".

Return a JSON array of steps. Each step should have:
- id: string
- type: 'trigger' | 'action' | 'condition' | 'ai_agent'
- name: string (short title)
- description: string (what it does)
- tool: string (optional, e.g., 'Gmail', 'Gemini', 'Notion')

Keep it logical and sequential.";

/// Prompt for client reports; `{client}` and `{metrics}` are substituted
pub const CLIENT_REPORT_PROMPT: &str = "Generate a brief, professional, 3-sentence executive summary for client \"{client}\" based on these metrics: {metrics}. The tone should be authoritative but helpful.";

/// Prompt for template generation; `{request}` is replaced with the user's text
pub const TEMPLATE_PROMPT: &str = "Create a project management template based on this request: \"{request}\".

Return a JSON object with:
- name: string (Creative project template name)
- description: string (Short description)
- category: 'Design' | 'Development' | 'Marketing' | 'Strategy'
- tasks: string[] (List of 5-8 actionable tasks/milestones)";

/// Report returned when no credential is configured
pub const SIMULATED_REPORT: &str = "Simulated AI Report: Client health is good. Revenue is stable. Recommended action: Upsell AI Content module.";

/// Report returned when the provider call fails
pub const REPORT_FAILURE: &str = "Failed to generate report.";

/// Report returned when the provider answers with no text
pub const REPORT_EMPTY: &str = "No analysis available.";

pub const WORKFLOW_FAILURE_DESCRIPTION: &str = "Failed to generate workflow. Please check API key.";

pub const TEMPLATE_FAILURE_NAME: &str = "Error Generating Template";
pub const TEMPLATE_FAILURE_DESCRIPTION: &str = "Please try again later.";

pub const CANNED_TEMPLATE_NAME: &str = "AI Generated Template";
pub const CANNED_TEMPLATE_DESCRIPTION: &str = "A comprehensive project plan based on your request.";
pub const CANNED_TEMPLATE_TASKS: [&str; 5] = [
    "Kickoff Meeting",
    "Requirement Gathering",
    "Initial Draft",
    "Client Review",
    "Final Delivery",
];

pub const DEFAULT_TEMPLATE_NAME: &str = "Untitled Template";
pub const DEFAULT_TEMPLATE_DESCRIPTION: &str = "No description";

/// Title given to tasks added in the editor
pub const NEW_TASK_PLACEHOLDER: &str = "New Task";

/// Name prefix marking a duplicated template
pub const COPY_PREFIX: &str = "Copy of ";

/// Suffix appended to a template name when a project is spun up from it
pub const NEW_PROJECT_SUFFIX: &str = " - New Client";

pub const TEMPLATE_ID_PREFIX: &str = "t";
pub const PROJECT_ID_PREFIX: &str = "p";
