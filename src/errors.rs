/// Crate-wide error type.
///
/// Provider and parsing variants never escape the generation client; they are
/// logged there and replaced by substitute data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Invalid JSON schema: {0}")]
    SchemaCompile(String),
    #[error("Response does not match schema: {0}")]
    SchemaViolation(String),
    #[error("Unknown provider '{0}'")]
    UnknownProvider(String),
    #[error("Template '{0}' not found")]
    TemplateNotFound(String),
    #[error("Template id '{0}' already exists")]
    DuplicateTemplateId(String),
    #[error("Template '{found}' cannot replace template '{expected}'")]
    TemplateIdMismatch { expected: String, found: String },
    #[error("Project id '{0}' already exists")]
    DuplicateProjectId(String),
    #[error("Project '{id}' has progress {progress}, expected 0..=100")]
    InvalidProgress { id: String, progress: u8 },
    #[error("Client '{0}' not found")]
    ClientNotFound(String),
    #[error("No template is being edited")]
    NoActiveEdit,
    #[error("Template '{0}' is already being edited")]
    EditInProgress(String),
    #[error("Task index {index} out of range (template has {len} tasks)")]
    TaskIndexOutOfRange { index: usize, len: usize },
    #[error("Generation result superseded by a newer request")]
    StaleGeneration,
    #[error("Prompt must not be empty")]
    EmptyPrompt,
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),
}
