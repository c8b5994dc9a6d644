//! The `llm` profile type: credentials and parameters for an LLM provider

use serde_json::Value;

use crate::field::{FieldKind, FieldMap, FieldSpec};
use crate::spec::ProfileSpec;

/// Known providers and their default API endpoints.
const PROVIDERS: [(&str, &str); 4] = [
    ("openai", "https://api.openai.com"),
    ("anthropic", "https://api.anthropic.com"),
    ("azure", "https://YOUR_RESOURCE_NAME.openai.azure.com"),
    ("cohere", "https://api.cohere.ai"),
];

pub fn spec() -> ProfileSpec {
    ProfileSpec::new("llm")
        .field(FieldSpec::required("name", FieldKind::Str, "Profile name"))
        .field(FieldSpec::required(
            "provider",
            FieldKind::Str,
            "LLM provider (openai, anthropic, azure, cohere)",
        ))
        .field(FieldSpec::required("model", FieldKind::Str, "Model name"))
        .field(FieldSpec::optional(
            "deployment",
            FieldKind::Str,
            "Deployment name (for Azure)",
        ))
        .field(FieldSpec::required("api_key", FieldKind::Str, "API key"))
        .field(FieldSpec::optional(
            "base_url",
            FieldKind::Str,
            "Base URL for the API",
        ))
        .field(FieldSpec::optional(
            "api_version",
            FieldKind::Str,
            "API version",
        ))
        .field(FieldSpec::optional(
            "temperature",
            FieldKind::Number,
            "Sampling temperature (0.0-1.0)",
        ))
        .with_validator(validate)
        .with_defaults(default_value)
}

fn validate(fields: &FieldMap) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(provider) = fields.get("provider").and_then(Value::as_str) {
        if !PROVIDERS.iter().any(|(known, _)| *known == provider) {
            let known: Vec<&str> = PROVIDERS.iter().map(|(name, _)| *name).collect();
            errors.push(format!(
                "provider must be one of: {} (got `{provider}`)",
                known.join(", ")
            ));
        }
    }

    if let Some(temperature) = fields.get("temperature").and_then(Value::as_f64) {
        if !(0.0..=1.0).contains(&temperature) {
            errors.push(format!(
                "temperature must be between 0.0 and 1.0 (got {temperature})"
            ));
        }
    }

    errors
}

fn default_value(field: &str, fields: &FieldMap) -> Option<Value> {
    match field {
        "base_url" => {
            let provider = fields.get("provider")?.as_str()?;
            PROVIDERS
                .iter()
                .find(|(known, _)| *known == provider)
                .map(|(_, url)| Value::from(*url))
        }
        "api_version" => Some(Value::from("v1")),
        "temperature" => serde_json::Number::from_f64(0.7).map(Value::Number),
        // deployment has no default; it stays absent unless supplied
        _ => None,
    }
}
