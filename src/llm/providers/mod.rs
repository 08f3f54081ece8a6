use crate::errors::Error;
use crate::llm::GenerationRequest;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use std::time::Duration;

pub mod gemini;
pub mod openai;

#[async_trait]
pub trait LlmProvider: Debug + Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Sends one prompt and returns the raw answer text
    async fn generate(&self, request: &GenerationRequest) -> Result<String, Error>;
}

/// Builds the HTTP client shared by the providers.
///
/// Without a timeout a call waits for as long as the provider takes.
pub(crate) fn http_client(timeout: Option<Duration>) -> Result<Client, Error> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
