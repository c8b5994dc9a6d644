//! Flattening command-line input into the engine's field map
//!
//! The core never deals with argument mechanics: whatever the user typed
//! (`--set` pairs or a JSON object) is parsed into one flat map here,
//! before it reaches the resolver or the profile engine.

use serde_json::Value;

use profile_meta::FieldMap;

use crate::error::{CliError, Result};

/// Parse repeated `KEY=VALUE` pairs into profile fields.
///
/// Values stay strings; the engine's kind checking coerces them per the
/// profile spec, so `--set temperature=0.7` and `--set ssl=true` arrive
/// with the right types and `--set name=123` stays the string it is.
pub fn profile_fields_from_pairs(pairs: &[String]) -> Result<FieldMap> {
    let mut map = FieldMap::new();
    for pair in pairs {
        let (key, value) = split_pair(pair)?;
        map.insert(key.to_string(), Value::from(value));
    }
    Ok(map)
}

/// Parse repeated `KEY=VALUE` pairs into settings.
///
/// Settings have no spec to coerce against, so scalars are inferred:
/// `true`/`false` become booleans, numeric literals become numbers,
/// everything else stays a string.
pub fn settings_from_pairs(pairs: &[String]) -> Result<FieldMap> {
    let mut map = FieldMap::new();
    for pair in pairs {
        let (key, value) = split_pair(pair)?;
        map.insert(key.to_string(), infer_scalar(value));
    }
    Ok(map)
}

/// Parse a JSON object into a flat field map.
///
/// Null values count as absent and are dropped before the map reaches the
/// core, matching what an omitted command-line option produces.
pub fn parse_json_object(input: &str) -> Result<FieldMap> {
    let value: Value = serde_json::from_str(input)
        .map_err(|e| CliError::user(format!("Invalid JSON input: {e}")))?;
    match value {
        Value::Object(map) => Ok(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        _ => Err(CliError::user("JSON input must be an object")),
    }
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    let Some((key, value)) = pair.split_once('=') else {
        return Err(CliError::user(format!("Expected KEY=VALUE, got `{pair}`")));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::user(format!("Expected KEY=VALUE, got `{pair}`")));
    }
    Ok((key, value))
}

fn infer_scalar(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::from(raw)
}
