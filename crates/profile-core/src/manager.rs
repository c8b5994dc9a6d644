//! Generic profile CRUD and validation engine
//!
//! One `ProfileManager` instance serves one profile type, described by a
//! [`ProfileSpec`]. The engine never knows concrete type names; adding a
//! profile type is a registry entry, not an engine change.

use serde_json::Value;

use profile_meta::{FieldMap, ProfileSpec};

use crate::document::Profile;
use crate::error::{Error, Result};
use crate::scope::{ScopeResolver, ScopeSelector};
use crate::store::DocumentStore;

/// CRUD + validation engine over profiles of one type.
///
/// Every operation resolves the scope to a single document, loads it,
/// mutates it, and persists it in one atomic write. Validation runs the
/// same full pass on `create` and `edit`: a change to one field may
/// invalidate a previously valid combination, so partial revalidation is
/// never enough.
pub struct ProfileManager<'a> {
    spec: &'a ProfileSpec,
    scopes: &'a ScopeResolver,
    store: DocumentStore,
}

impl<'a> ProfileManager<'a> {
    pub fn new(spec: &'a ProfileSpec, scopes: &'a ScopeResolver) -> Self {
        Self {
            spec,
            scopes,
            store: DocumentStore::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        self.spec.type_name()
    }

    /// Create a new profile from a flat field map.
    ///
    /// The data must carry a non-empty `name` not already present at the
    /// scope. Optional fields absent from the data are filled by the
    /// spec's default generator. Returns the stored record.
    pub fn create(&self, data: &FieldMap, scope: &ScopeSelector) -> Result<Profile> {
        let path = self.scopes.resolve(scope)?;
        let fields = self.validate(data, None)?;
        let name = stored_name(&fields)?;

        let mut document = self.store.load(&path)?;
        if document.profile(self.type_name(), &name).is_some() {
            return Err(Error::Conflict { name });
        }

        document.insert_profile(self.type_name(), &name, Value::Object(fields.clone()));
        self.store.save(&path, &document)?;

        tracing::debug!(profile_type = self.type_name(), name = %name, %path, "profile created");
        Ok(Profile::from_fields(fields))
    }

    /// All profiles of this type at the scope, in stored order.
    pub fn list(&self, scope: &ScopeSelector) -> Result<Vec<Profile>> {
        let path = self.scopes.resolve(scope)?;
        let document = self.store.load(&path)?;

        Ok(document
            .profiles_of(self.type_name())
            .map(|table| table.values().filter_map(Profile::from_value).collect())
            .unwrap_or_default())
    }

    /// Fetch one profile by name.
    pub fn get(&self, name: &str, scope: &ScopeSelector) -> Result<Profile> {
        let path = self.scopes.resolve(scope)?;
        let document = self.store.load(&path)?;

        document
            .profile(self.type_name(), name)
            .and_then(Profile::from_value)
            .ok_or_else(|| Error::not_found(name))
    }

    /// Apply a partial update to an existing profile.
    ///
    /// The updates are shallow-merged over the stored record and the
    /// merged result goes through the full validation pass. The `name`
    /// field cannot be changed through an edit.
    pub fn edit(
        &self,
        name: &str,
        updates: &FieldMap,
        scope: &ScopeSelector,
    ) -> Result<Profile> {
        let path = self.scopes.resolve(scope)?;
        let mut document = self.store.load(&path)?;

        let existing = document
            .profile(self.type_name(), name)
            .and_then(Profile::from_value)
            .ok_or_else(|| Error::not_found(name))?;

        let mut merged = existing.fields().clone();
        for (key, value) in updates {
            merged.insert(key.clone(), value.clone());
        }

        let fields = self.validate(&merged, Some(name))?;
        document.insert_profile(self.type_name(), name, Value::Object(fields.clone()));
        self.store.save(&path, &document)?;

        tracing::debug!(profile_type = self.type_name(), name = %name, %path, "profile updated");
        Ok(Profile::from_fields(fields))
    }

    /// Remove a profile.
    ///
    /// If it was the type's default at this scope, the default reference
    /// is cleared in the same write.
    pub fn delete(&self, name: &str, scope: &ScopeSelector) -> Result<()> {
        let path = self.scopes.resolve(scope)?;
        let mut document = self.store.load(&path)?;

        document
            .remove_profile(self.type_name(), name)
            .ok_or_else(|| Error::not_found(name))?;
        self.store.save(&path, &document)?;

        tracing::debug!(profile_type = self.type_name(), name = %name, %path, "profile deleted");
        Ok(())
    }

    /// Mark a profile as the type's default at this scope, replacing any
    /// prior default.
    pub fn set_default(&self, name: &str, scope: &ScopeSelector) -> Result<()> {
        let path = self.scopes.resolve(scope)?;
        let mut document = self.store.load(&path)?;

        if document.profile(self.type_name(), name).is_none() {
            return Err(Error::not_found(name));
        }

        document.set_default_profile(self.type_name(), name);
        self.store.save(&path, &document)
    }

    /// The profile currently marked default at this scope, if any.
    ///
    /// A dangling reference (possible after hand-editing) reads as unset.
    pub fn get_default(&self, scope: &ScopeSelector) -> Result<Option<Profile>> {
        let path = self.scopes.resolve(scope)?;
        let document = self.store.load(&path)?;

        let Some(name) = document.default_profile(self.type_name()) else {
            return Ok(None);
        };

        match document
            .profile(self.type_name(), name)
            .and_then(Profile::from_value)
        {
            Some(profile) => Ok(Some(profile)),
            None => {
                tracing::warn!(
                    profile_type = self.type_name(),
                    name,
                    "default references a profile that does not exist"
                );
                Ok(None)
            }
        }
    }

    /// The full validation pass shared by `create` and `edit`.
    ///
    /// Stages: required-field presence, per-field kind check/coercion,
    /// business-rule validator. All findings are collected before failing
    /// so the caller can report everything in one pass. On success, the
    /// default generator fills every optional field still absent, in
    /// declaration order.
    fn validate(&self, data: &FieldMap, fixed_name: Option<&str>) -> Result<FieldMap> {
        let mut errors = Vec::new();
        let mut fields = FieldMap::new();

        // Required presence. The engine requires `name` whether or not the
        // spec declares it.
        let mut required: Vec<&str> = self
            .spec
            .fields()
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.name())
            .collect();
        if !required.contains(&"name") {
            required.insert(0, "name");
        }
        for field in required {
            if !data.contains_key(field) {
                errors.push(format!("missing required field: {field}"));
            }
        }

        // Engine-level name rules: non-empty, and fixed across edits.
        if let Some(value) = data.get("name") {
            match value.as_str() {
                Some("") => errors.push("profile name must not be empty".to_string()),
                Some(name) => {
                    if let Some(fixed) = fixed_name {
                        if name != fixed {
                            errors.push(format!(
                                "the name field cannot be changed (profile is `{fixed}`)"
                            ));
                        }
                    }
                }
                None => {} // the kind check below reports the type problem
            }
        }

        // Kind check / coercion per declared field; unknown fields are
        // rejected rather than silently persisted.
        for (key, value) in data {
            match self.spec.field_spec(key) {
                Some(field) => match field.kind().coerce(key, value) {
                    Ok(coerced) => {
                        fields.insert(key.clone(), coerced);
                    }
                    Err(message) => errors.push(message),
                },
                None if key == "name" => {
                    // Engine-owned field for specs that do not declare it.
                    if value.is_string() {
                        fields.insert(key.clone(), value.clone());
                    } else {
                        errors.push("field `name` must be a string".to_string());
                    }
                }
                None => errors.push(format!(
                    "unknown field `{key}` for profile type `{}`",
                    self.type_name()
                )),
            }
        }

        // Business rules see the coerced values.
        errors.extend(self.spec.run_validator(&fields));

        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        // Fill defaults for absent optional fields, in declaration order.
        for field in self.spec.fields() {
            if !fields.contains_key(field.name()) {
                if let Some(value) = self.spec.default_value(field.name(), &fields) {
                    fields.insert(field.name().to_string(), value);
                }
            }
        }

        Ok(fields)
    }
}

fn stored_name(fields: &FieldMap) -> Result<String> {
    fields
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::validation(vec!["missing required field: name".to_string()]))
}
