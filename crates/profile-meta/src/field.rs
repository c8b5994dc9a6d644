//! Field specifications and value kind checking

use serde::Serialize;
use serde_json::Value;

/// A flat map of field name to scalar value.
///
/// This is the shape in which profile data and free-form settings travel
/// through the engine: the command layer flattens its typed arguments (or
/// JSON bulk input) into one of these before anything else happens.
/// Insertion order is preserved, which keeps listings stable.
pub type FieldMap = serde_json::Map<String, Value>;

/// Semantic kind of a profile field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// UTF-8 string
    #[serde(rename = "string")]
    Str,
    /// Integer or float
    #[serde(rename = "number")]
    Number,
    /// Boolean
    #[serde(rename = "boolean")]
    Bool,
}

impl FieldKind {
    /// Human-readable kind name, used in validation messages and schema
    /// listings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::Number => "number",
            Self::Bool => "boolean",
        }
    }

    /// Check a value against this kind, coercing from a string where the
    /// kind allows it.
    ///
    /// Command-line input arrives as strings, so `Number` accepts `"0.7"`
    /// and `Bool` accepts `"true"`/`"false"`. Structured values (arrays,
    /// objects) and nulls are never valid field values.
    pub fn coerce(&self, field: &str, value: &Value) -> Result<Value, String> {
        match self {
            Self::Str => match value {
                Value::String(_) => Ok(value.clone()),
                other => Err(format!(
                    "field `{field}` must be a string, got {}",
                    describe(other)
                )),
            },
            Self::Number => match value {
                Value::Number(_) => Ok(value.clone()),
                Value::String(s) => parse_number(s).ok_or_else(|| {
                    format!("field `{field}` must be a number, got `{s}`")
                }),
                other => Err(format!(
                    "field `{field}` must be a number, got {}",
                    describe(other)
                )),
            },
            Self::Bool => match value {
                Value::Bool(_) => Ok(value.clone()),
                Value::String(s) => match s.as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    _ => Err(format!(
                        "field `{field}` must be a boolean (true or false), got `{s}`"
                    )),
                },
                other => Err(format!(
                    "field `{field}` must be a boolean, got {}",
                    describe(other)
                )),
            },
        }
    }
}

fn parse_number(s: &str) -> Option<Value> {
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::from(i));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declarative description of a single profile field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    required: bool,
    description: String,
}

impl FieldSpec {
    /// A field that must be present on every valid profile.
    pub fn required(
        name: impl Into<String>,
        kind: FieldKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            description: description.into(),
        }
    }

    /// A field that may be absent; the spec's default generator gets a
    /// chance to fill it.
    pub fn optional(
        name: impl Into<String>,
        kind: FieldKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
