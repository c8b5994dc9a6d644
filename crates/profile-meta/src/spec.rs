//! Declarative profile type specifications

use serde_json::Value;

use crate::field::{FieldMap, FieldSpec};

/// Business-rule validator for a profile type.
///
/// Runs after kind checking, so field values it reads are already the
/// declared kinds. Returns every problem found, not just the first; the
/// engine aggregates the messages into a single validation failure.
pub type Validator = fn(&FieldMap) -> Vec<String>;

/// Default-value generator for a profile type.
///
/// Called for each optional field still absent after validation, with the
/// fields already present. May derive a default from other values (the
/// `llm` type derives `base_url` from `provider`). Returning `None` leaves
/// the field absent.
pub type DefaultGenerator = fn(&str, &FieldMap) -> Option<Value>;

/// Immutable description of a profile type.
///
/// Built once at startup per type and handed to the engine by reference;
/// the engine never needs to know concrete type names.
#[derive(Debug, Clone)]
pub struct ProfileSpec {
    type_name: String,
    fields: Vec<FieldSpec>,
    validator: Option<Validator>,
    defaults: Option<DefaultGenerator>,
}

impl ProfileSpec {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
            validator: None,
            defaults: None,
        }
    }

    /// Append a field. Declaration order is the order fields are listed in
    /// schema output and applied during default generation.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_defaults(mut self, defaults: DefaultGenerator) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up the spec for a single field by name.
    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Run the business-rule validator, if any.
    pub fn run_validator(&self, fields: &FieldMap) -> Vec<String> {
        match self.validator {
            Some(validator) => validator(fields),
            None => Vec::new(),
        }
    }

    /// Produce a default for `field`, if the spec defines one.
    pub fn default_value(&self, field: &str, fields: &FieldMap) -> Option<Value> {
        self.defaults.and_then(|generate| generate(field, fields))
    }
}
