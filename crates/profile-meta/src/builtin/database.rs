//! The `database` profile type: connection parameters for a database

use serde_json::Value;

use crate::field::{FieldKind, FieldMap, FieldSpec};
use crate::spec::ProfileSpec;

/// Known engines and their conventional ports. SQLite is file-backed and
/// has neither host nor port.
const ENGINES: [(&str, Option<i64>); 3] = [
    ("postgres", Some(5432)),
    ("mysql", Some(3306)),
    ("sqlite", None),
];

pub fn spec() -> ProfileSpec {
    ProfileSpec::new("database")
        .field(FieldSpec::required("name", FieldKind::Str, "Profile name"))
        .field(FieldSpec::required(
            "engine",
            FieldKind::Str,
            "Database engine (postgres, mysql, sqlite)",
        ))
        .field(FieldSpec::optional("host", FieldKind::Str, "Server host"))
        .field(FieldSpec::optional("port", FieldKind::Number, "Server port"))
        .field(FieldSpec::required(
            "database",
            FieldKind::Str,
            "Database name or file path",
        ))
        .field(FieldSpec::optional("username", FieldKind::Str, "Username"))
        .field(FieldSpec::optional("password", FieldKind::Str, "Password"))
        .field(FieldSpec::optional(
            "ssl",
            FieldKind::Bool,
            "Require an encrypted connection",
        ))
        .with_validator(validate)
        .with_defaults(default_value)
}

fn validate(fields: &FieldMap) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(engine) = fields.get("engine").and_then(Value::as_str) {
        if !ENGINES.iter().any(|(known, _)| *known == engine) {
            let known: Vec<&str> = ENGINES.iter().map(|(name, _)| *name).collect();
            errors.push(format!(
                "engine must be one of: {} (got `{engine}`)",
                known.join(", ")
            ));
        }
    }

    if let Some(port) = fields.get("port").and_then(Value::as_i64) {
        if !(1..=65535).contains(&port) {
            errors.push(format!("port must be between 1 and 65535 (got {port})"));
        }
    }

    errors
}

fn default_value(field: &str, fields: &FieldMap) -> Option<Value> {
    let engine = fields.get("engine").and_then(Value::as_str);
    match field {
        "host" => match engine {
            Some("sqlite") | None => None,
            Some(_) => Some(Value::from("localhost")),
        },
        "port" => {
            let engine = engine?;
            ENGINES
                .iter()
                .find(|(known, _)| *known == engine)
                .and_then(|(_, port)| *port)
                .map(Value::from)
        }
        "ssl" => Some(Value::Bool(false)),
        _ => None,
    }
}
