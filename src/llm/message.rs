use serde_json::Value;

/// A single prompt sent to a generation provider
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Natural-language instruction
    pub prompt: String,
    /// JSON schema the answer must follow; `None` for free text
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    /// Creates a free-text request
    pub fn text(prompt: impl Into<String>) -> Self {
        GenerationRequest {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    /// Creates a request whose answer must be JSON matching `schema`
    pub fn structured(prompt: impl Into<String>, schema: Value) -> Self {
        GenerationRequest {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }
}
