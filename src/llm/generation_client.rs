use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::fallbacks::{canned_template, canned_workflow, template_failure, workflow_failure};
use super::providers::gemini::GeminiProvider;
use super::providers::openai::OpenAiProvider;
use super::providers::LlmProvider;
use super::{parse_validated, template_schema, workflow_schema, GenerationRequest};
use crate::config::GenerationConfig;
use crate::constants::*;
use crate::core::{ClientMetrics, TemplateDraft, WorkflowStep};
use crate::errors::Error;

/// Boundary to the generative model.
///
/// Every operation returns a value of its normal type: a missing credential
/// yields canned data after a simulated delay, and any provider, parse or
/// schema failure yields a substitute. Nothing is retried or cached.
#[derive(Debug)]
pub struct GenerationClient {
    /// `None` when no credential is configured
    provider: Option<Box<dyn LlmProvider>>,
    /// Simulated latency of canned responses
    mock_delay: Duration,
}

impl GenerationClient {
    pub fn new(provider: Option<Box<dyn LlmProvider>>, mock_delay: Duration) -> Self {
        GenerationClient {
            provider,
            mock_delay,
        }
    }

    /// Creates a client from configuration.
    ///
    /// The credential is read from the environment variable named by
    /// `api_key_env`. Its absence is not an error: the client then serves
    /// canned responses.
    ///
    /// # Errors
    /// * `UnknownProvider` if the provider name is not supported
    pub fn from_config(config: &GenerationConfig) -> Result<Self, Error> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let base_url = config.base_url.as_ref();
        let timeout = config.request_timeout;

        let provider: Box<dyn LlmProvider> = match config.provider.as_str() {
            "gemini" | "openai" if api_key.is_none() => {
                warn!(
                    "API key not found in {}. Using mock responses.",
                    config.api_key_env
                );
                return Ok(Self::new(None, config.mock_delay));
            }
            "gemini" => Box::new(GeminiProvider::new(
                api_key.as_deref().unwrap_or_default(),
                &config.model,
                base_url,
                timeout,
            )?),
            "openai" => Box::new(OpenAiProvider::new(
                api_key.as_deref().unwrap_or_default(),
                &config.model,
                base_url,
                timeout,
            )?),
            other => return Err(Error::UnknownProvider(other.to_string())),
        };

        info!("Using {} provider with model {}", provider.name(), config.model);
        Ok(Self::new(Some(provider), config.mock_delay))
    }

    /// Whether calls reach a real provider
    pub fn is_live(&self) -> bool {
        self.provider.is_some()
    }

    /// Designs an automation pipeline from a natural-language request.
    ///
    /// # Returns
    /// * The provider's steps, the four-step illustration without a
    ///   credential, or a single error step on failure
    pub async fn workflow_from_prompt(&self, prompt: &str) -> Vec<WorkflowStep> {
        let Some(provider) = &self.provider else {
            self.simulate_latency().await;
            return canned_workflow();
        };

        let request = GenerationRequest::structured(
            WORKFLOW_PROMPT.replace("{request}", prompt),
            workflow_schema(),
        );
        match self.structured::<Vec<WorkflowStep>>(provider.as_ref(), &request).await {
            Ok(steps) => {
                info!("Generated workflow with {} steps", steps.len());
                steps
            }
            Err(e) => {
                error!("Workflow generation failed: {}", e);
                workflow_failure()
            }
        }
    }

    /// Writes a three-sentence executive summary for a client
    pub async fn client_report(&self, client_name: &str, metrics: &ClientMetrics) -> String {
        let Some(provider) = &self.provider else {
            return SIMULATED_REPORT.to_string();
        };

        let metrics_json = match serde_json::to_string(metrics) {
            Ok(json) => json,
            Err(e) => {
                error!("Could not encode metrics for {}: {}", client_name, e);
                return REPORT_FAILURE.to_string();
            }
        };
        let request = GenerationRequest::text(
            CLIENT_REPORT_PROMPT
                .replace("{client}", client_name)
                .replace("{metrics}", &metrics_json),
        );
        match provider.generate(&request).await {
            Ok(text) if text.trim().is_empty() => REPORT_EMPTY.to_string(),
            Ok(text) => {
                info!("Generated report for {}", client_name);
                text
            }
            Err(e) => {
                error!("Report generation failed for {}: {}", client_name, e);
                REPORT_FAILURE.to_string()
            }
        }
    }

    /// Drafts a project template from a natural-language request.
    ///
    /// The draft may be partial; the caller defaults missing fields when it
    /// promotes the draft into the store.
    pub async fn project_template(&self, prompt: &str) -> TemplateDraft {
        let Some(provider) = &self.provider else {
            self.simulate_latency().await;
            return canned_template();
        };

        let request = GenerationRequest::structured(
            TEMPLATE_PROMPT.replace("{request}", prompt),
            template_schema(),
        );
        match self.structured::<TemplateDraft>(provider.as_ref(), &request).await {
            Ok(draft) => {
                info!("Generated template draft {:?}", draft.name);
                draft
            }
            Err(e) => {
                error!("Template generation failed: {}", e);
                template_failure()
            }
        }
    }

    async fn structured<T: serde::de::DeserializeOwned>(
        &self,
        provider: &dyn LlmProvider,
        request: &GenerationRequest,
    ) -> Result<T, Error> {
        let text = provider.generate(request).await?;
        debug!("Raw {} response: {}", provider.name(), text);
        if text.trim().is_empty() {
            return Err(Error::Provider("Empty response from provider".to_string()));
        }
        let schema = request.response_schema.as_ref().ok_or_else(|| {
            Error::SchemaCompile("structured request without schema".to_string())
        })?;
        parse_validated(schema, &text)
    }

    async fn simulate_latency(&self) {
        if !self.mock_delay.is_zero() {
            tokio::time::sleep(self.mock_delay).await;
        }
    }
}
