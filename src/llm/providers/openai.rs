use super::{http_client, LlmProvider};
use crate::errors::Error;
use crate::llm::GenerationRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use std::time::Duration;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const RESPONSE_FORMAT_NAME: &str = "response";
const WRAPPED_FIELD: &str = "result";

/// Provider implementation for OpenAI's chat completions API
#[derive(Debug)]
pub struct OpenAiProvider {
    /// OpenAI API key
    api_key: String,
    /// Model identifier to use (e.g. "gpt-4o-mini")
    model: String,
    base_url: String,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: Option<&Url>,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let base_url = base_url
            .map(|u| u.as_str().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(OpenAiProvider {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url,
            client: http_client(timeout)?,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    /// Calls chat completions. A schema, when present, is sent as a strict
    /// `json_schema` response format and the answer is mapped back onto the
    /// original schema's shape.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, Error> {
        let mut request_body = json!({
          "model": self.model,
          "messages": [{ "role": "user", "content": request.prompt }],
          "temperature": 0.7
        });
        let wrapped = request.response_schema.as_ref().map(|schema| !is_object_schema(schema));
        if let Some(schema) = &request.response_schema {
            request_body["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": RESPONSE_FORMAT_NAME,
                    "schema": to_openai_schema(schema),
                    "strict": true
                }
            });
        }

        let res = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !res.status().is_success() {
            let text = res.text().await?;
            return Err(Error::Provider(format!("OpenAI API error: {}", text)));
        }

        let json_resp: Value = res.json().await?;
        let content = json_resp["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| Error::Provider("No content in OpenAI response".to_string()))?
            .trim();

        match wrapped {
            None => Ok(content.to_string()),
            Some(wrapped) => {
                let mut answer: Value = serde_json::from_str(content)?;
                if wrapped {
                    answer = answer
                        .get_mut(WRAPPED_FIELD)
                        .map(Value::take)
                        .ok_or_else(|| {
                            Error::Provider(format!("OpenAI answer lacks '{}'", WRAPPED_FIELD))
                        })?;
                }
                Ok(strip_nulls(answer).to_string())
            }
        }
    }
}

fn is_object_schema(schema: &Value) -> bool {
    schema["type"] == "object"
}

/// Rewrites a JSON schema into the subset strict mode accepts.
///
/// The root must be an object, so any other root is nested under
/// `result`. Every object closes its properties and lists all of them as
/// required; properties that were optional become nullable instead.
pub fn to_openai_schema(schema: &Value) -> Value {
    let strict = close_objects(schema);
    if is_object_schema(schema) {
        return strict;
    }
    json!({
        "type": "object",
        "properties": { WRAPPED_FIELD: strict },
        "required": [WRAPPED_FIELD],
        "additionalProperties": false
    })
}

fn close_objects(schema: &Value) -> Value {
    let Value::Object(map) = schema else {
        return schema.clone();
    };
    let mut out = map.clone();
    if let Some(items) = map.get("items") {
        out.insert("items".to_string(), close_objects(items));
    }
    if let Some(Value::Object(properties)) = map.get("properties") {
        let required: Vec<&str> = map
            .get("required")
            .and_then(Value::as_array)
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        let properties: Map<String, Value> = properties
            .iter()
            .map(|(name, prop)| {
                let prop = close_objects(prop);
                if required.contains(&name.as_str()) {
                    (name.clone(), prop)
                } else {
                    (name.clone(), nullable(prop))
                }
            })
            .collect();
        out.insert(
            "required".to_string(),
            Value::Array(properties.keys().cloned().map(Value::String).collect()),
        );
        out.insert("properties".to_string(), Value::Object(properties));
        out.insert("additionalProperties".to_string(), Value::Bool(false));
    }
    Value::Object(out)
}

fn nullable(mut prop: Value) -> Value {
    if let Some(Value::String(t)) = prop.get("type").cloned() {
        prop["type"] = json!([t, "null"]);
    }
    if let Some(Value::Array(values)) = prop.get_mut("enum") {
        values.push(Value::Null);
    }
    prop
}

/// Drops the `null` members strict mode fills in for optional properties
fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{template_schema, workflow_schema};
    use mockito::{Matcher, Server};

    fn provider(server: &Server) -> OpenAiProvider {
        let url = Url::parse(&server.url()).unwrap();
        OpenAiProvider::new("sk-test", "gpt-4o-mini", Some(&url), None).unwrap()
    }

    #[tokio::test]
    async fn schema_is_sent_as_strict_response_format() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "messages": [{ "role": "user", "content": "a plan" }],
                "response_format": {
                    "type": "json_schema",
                    "json_schema": {
                        "name": "response",
                        "strict": true,
                        "schema": {
                            "type": "object",
                            "additionalProperties": false
                        }
                    }
                }
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"{\"name\":\"n\"}\n"}}]}"#)
            .create_async()
            .await;

        let text = provider(&server)
            .generate(&GenerationRequest::structured("a plan", template_schema()))
            .await
            .unwrap();
        assert_eq!(text, r#"{"name":"n"}"#);
    }

    #[tokio::test]
    async fn array_answers_are_unwrapped() {
        let mut server = Server::new_async().await;
        let content = json!({
            "result": [{ "id": "1", "type": "trigger", "name": "n", "description": "d", "tool": null }]
        })
        .to_string();
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::PartialJson(json!({
                "response_format": { "json_schema": { "schema": { "required": ["result"] } } }
            })))
            .with_status(200)
            .with_body(json!({ "choices": [{ "message": { "content": content } }] }).to_string())
            .create_async()
            .await;

        let text = provider(&server)
            .generate(&GenerationRequest::structured("steps", workflow_schema()))
            .await
            .unwrap();
        let answer: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            answer,
            json!([{ "id": "1", "type": "trigger", "name": "n", "description": "d" }])
        );
    }

    #[tokio::test]
    async fn free_text_has_no_response_format() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1/chat/completions")
            .match_body(Matcher::Json(json!({
                "model": "gpt-4o-mini",
                "messages": [{ "role": "user", "content": "summarize" }],
                "temperature": 0.7
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":" Fine. "}}]}"#)
            .create_async()
            .await;

        let text = provider(&server)
            .generate(&GenerationRequest::text("summarize"))
            .await
            .unwrap();
        assert_eq!(text, "Fine.");
    }

    #[test]
    fn optional_properties_become_nullable() {
        let schema = to_openai_schema(&workflow_schema());
        let step = &schema["properties"]["result"]["items"];
        assert_eq!(step["additionalProperties"], false);
        assert_eq!(step["properties"]["tool"]["type"], json!(["string", "null"]));
        assert_eq!(step["properties"]["id"]["type"], "string");
        assert_eq!(step["required"].as_array().unwrap().len(), 5);
    }
}
