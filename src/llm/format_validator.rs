use jsonschema::Validator;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::Error;

/// Creates a JSON Schema validator
///
/// # Arguments
/// * `schema` - The JSON Schema document
///
/// # Returns
/// * `Result<Validator, Error>` - The compiled validator on success, or an error
pub fn build_validator(schema: &Value) -> Result<Validator, Error> {
    jsonschema::validator_for(schema).map_err(|e| Error::SchemaCompile(e.to_string()))
}

/// Parses a provider answer, checks it against `schema` and deserializes it.
///
/// Answers wrapped in a markdown code fence are unwrapped first.
///
/// # Errors
/// * `SerdeError` if the text is not JSON or does not fit `T`
/// * `SchemaViolation` listing every violation found
pub fn parse_validated<T: DeserializeOwned>(schema: &Value, response: &str) -> Result<T, Error> {
    let validator = build_validator(schema)?;
    let value: Value = serde_json::from_str(strip_code_fence(response))?;
    let violations: Vec<String> = validator
        .iter_errors(&value)
        .map(|e| e.to_string())
        .collect();
    if !violations.is_empty() {
        return Err(Error::SchemaViolation(violations.join("; ")));
    }
    Ok(serde_json::from_value(value)?)
}

/// Returns the body of a ```` ``` ```` fenced block, or the trimmed input
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string ("json") on the opening line
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    body.trim_end().trim_end_matches("```").trim()
}
