use super::{http_client, LlmProvider};
use crate::errors::Error;
use crate::llm::GenerationRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Provider implementation for Google's Gemini `generateContent` API
#[derive(Debug)]
pub struct GeminiProvider {
    /// API key sent in the `x-goog-api-key` header
    api_key: String,
    /// Model identifier (e.g. "gemini-2.5-flash")
    model: String,
    /// Endpoint root, without trailing slash
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider instance
    ///
    /// # Arguments
    /// * `api_key` - Credential for the API
    /// * `model` - The model identifier to use
    /// * `base_url` - Endpoint override; the public endpoint when `None`
    /// * `timeout` - Per-request timeout; none when `None`
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: Option<&Url>,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let base_url = base_url
            .map(|u| u.as_str().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(GeminiProvider {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url,
            client: http_client(timeout)?,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    /// Calls `generateContent`, requesting JSON output when the request
    /// carries a schema
    async fn generate(&self, request: &GenerationRequest) -> Result<String, Error> {
        let mut request_body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }]
        });
        if let Some(schema) = &request.response_schema {
            request_body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": to_gemini_schema(schema)
            });
        }

        let res = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await?;
            return Err(Error::Provider(format!("Gemini API error {}: {}", status, text)));
        }

        let json_resp: Value = res.json().await?;
        let parts = json_resp["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| Error::Provider("No candidates in Gemini response".to_string()))?;
        let content: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
        debug!("Gemini response: {}", content);
        Ok(content.trim().to_string())
    }
}

/// Rewrites a JSON schema into Gemini's dialect, which spells type names
/// in upper case
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    let converted = match (key.as_str(), value) {
                        ("type", Value::String(t)) => Value::String(t.to_uppercase()),
                        _ => to_gemini_schema(value),
                    };
                    (key.clone(), converted)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::workflow_schema;
    use mockito::{Matcher, Server};

    const PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn provider(server: &Server) -> GeminiProvider {
        let url = Url::parse(&server.url()).unwrap();
        GeminiProvider::new("secret", "gemini-2.5-flash", Some(&url), None).unwrap()
    }

    #[test]
    fn schema_types_are_upper_cased() {
        let converted = to_gemini_schema(&workflow_schema());
        assert_eq!(converted["type"], "ARRAY");
        assert_eq!(converted["items"]["type"], "OBJECT");
        assert_eq!(converted["items"]["properties"]["type"]["type"], "STRING");
        assert_eq!(
            converted["items"]["properties"]["type"]["enum"][3],
            "ai_agent"
        );
        assert_eq!(converted["items"]["required"][1], "type");
    }

    #[tokio::test]
    async fn sends_schema_and_joins_parts() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "secret")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "plan it" }] }],
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"[{\"id\":"},{"text":"\"1\"}]"}]}}]}"#)
            .create_async()
            .await;

        let text = provider(&server)
            .generate(&GenerationRequest::structured("plan it", workflow_schema()))
            .await
            .unwrap();
        assert_eq!(text, r#"[{"id":"1"}]"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn free_text_request_has_no_generation_config() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", PATH)
            .match_body(Matcher::Json(json!({
                "contents": [{ "role": "user", "parts": [{ "text": "summarize" }] }]
            })))
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":" Summary. "}]}}]}"#)
            .create_async()
            .await;

        let text = provider(&server)
            .generate(&GenerationRequest::text("summarize"))
            .await
            .unwrap();
        assert_eq!(text, "Summary.");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", PATH)
            .with_status(403)
            .with_body("API key not valid")
            .create_async()
            .await;

        let err = provider(&server)
            .generate(&GenerationRequest::text("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Provider(msg) if msg.contains("API key not valid")));
    }

    #[tokio::test]
    async fn missing_candidates_is_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", PATH)
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        assert!(provider(&server)
            .generate(&GenerationRequest::text("x"))
            .await
            .is_err());
    }
}
