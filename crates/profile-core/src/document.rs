//! The persisted configuration document and its merge semantics
//!
//! A `ConfigDocument` is the unit owned by one filesystem location. It is
//! parsed from TOML by default (JSON/YAML for named files with those
//! extensions); profile field values are dynamic scalars carried as
//! `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use profile_meta::FieldMap;

/// Profiles of one type, keyed by profile name.
///
/// Insertion order is preserved (the map type keeps key order), which is
/// what makes `list` output stable. Order is never significant for
/// precedence.
pub type ProfileTable = serde_json::Map<String, Value>;

/// A named profile record.
///
/// The `name` field doubles as the storage key; the remaining fields are
/// scalars typed by the profile type's spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile {
    fields: FieldMap,
}

impl Profile {
    pub fn from_fields(fields: FieldMap) -> Self {
        Self { fields }
    }

    /// Interpret a stored value as a profile. Non-object values (possible
    /// after hand-editing) yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|fields| Self {
            fields: fields.clone(),
        })
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    /// The profile name, if the record carries one.
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}

/// The persisted configuration document.
///
/// Invariants:
/// - every name in `defaults[type]` exists in `profiles[type]`
/// - at most one default per profile type (enforced by overwrite)
///
/// A cleared default is represented by removing the key; the serializer
/// never emits a null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Profile-type name -> profile name -> record
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, ProfileTable>,

    /// Profile-type name -> name of the type's default profile
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<String, String>,

    /// Free-form tool settings
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub settings: FieldMap,
}

impl ConfigDocument {
    /// Look up a stored profile record.
    pub fn profile(&self, type_name: &str, name: &str) -> Option<&Value> {
        self.profiles.get(type_name)?.get(name)
    }

    /// All profiles of one type, in insertion order.
    pub fn profiles_of(&self, type_name: &str) -> Option<&ProfileTable> {
        self.profiles.get(type_name)
    }

    /// Insert or replace a profile record.
    pub fn insert_profile(&mut self, type_name: &str, name: &str, record: Value) {
        self.profiles
            .entry(type_name.to_string())
            .or_default()
            .insert(name.to_string(), record);
    }

    /// Remove a profile record.
    ///
    /// If the removed profile was the type's default, the default
    /// reference is cleared too, so both changes land in the same write.
    pub fn remove_profile(&mut self, type_name: &str, name: &str) -> Option<Value> {
        let removed = self.profiles.get_mut(type_name)?.remove(name)?;
        if self.defaults.get(type_name).is_some_and(|d| d == name) {
            self.defaults.remove(type_name);
        }
        Some(removed)
    }

    /// Name of the default profile for a type, if one is set.
    pub fn default_profile(&self, type_name: &str) -> Option<&str> {
        self.defaults.get(type_name).map(String::as_str)
    }

    /// Mark a profile as the type's default, replacing any prior default.
    pub fn set_default_profile(&mut self, type_name: &str, name: &str) {
        self.defaults
            .insert(type_name.to_string(), name.to_string());
    }

    /// Merge another document into this one; `other` takes precedence.
    ///
    /// Profiles merge type by type and name by name: records present in
    /// both are deep-merged key-wise, records and whole types present only
    /// here survive untouched. Defaults and settings are key-wise
    /// overrides.
    pub fn merge(&mut self, other: &ConfigDocument) {
        for (type_name, table) in &other.profiles {
            let existing = self.profiles.entry(type_name.clone()).or_default();
            for (name, record) in table {
                match existing.get_mut(name) {
                    Some(base) => deep_merge_value(base, record),
                    None => {
                        existing.insert(name.clone(), record.clone());
                    }
                }
            }
        }

        for (type_name, name) in &other.defaults {
            self.defaults.insert(type_name.clone(), name.clone());
        }

        for (key, value) in &other.settings {
            match self.settings.get_mut(key) {
                Some(base) => deep_merge_value(base, value),
                None => {
                    self.settings.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

/// Deep merge two JSON values.
///
/// If both values are objects, merge them recursively with `other` taking
/// precedence. Otherwise, `other` replaces `base`.
pub(crate) fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                match base_map.get_mut(key) {
                    Some(base_val) => deep_merge_value(base_val, other_val),
                    None => {
                        base_map.insert(key.clone(), other_val.clone());
                    }
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}
