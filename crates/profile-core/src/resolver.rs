//! Effective-parameter resolution and settings persistence
//!
//! The `ConfigResolver` merges command-supplied parameters with the
//! persisted document at one location, following the precedence
//! (highest first): supplied parameter, stored setting, built-in default.

use profile_fs::NormalizedPath;
use serde_json::Value;

use profile_meta::FieldMap;

use crate::document::ConfigDocument;
use crate::error::{Error, Result};
use crate::store::DocumentStore;

/// Built-in default settings, the lowest precedence layer.
pub fn builtin_defaults() -> FieldMap {
    let mut defaults = FieldMap::new();
    defaults.insert("output_format".to_string(), Value::from("json"));
    defaults.insert("color_theme".to_string(), Value::from("dark"));
    defaults.insert("log_level".to_string(), Value::from("info"));
    defaults
}

/// Merges supplied parameters over one persisted document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver {
    store: DocumentStore,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the effective parameter set for a command invocation.
    ///
    /// Merge is key-wise: a supplied key always overrides; an absent
    /// supplied key falls through to the stored setting; a key absent from
    /// both falls through to the built-in default. Null supplied values
    /// count as absent (an option the user did not pass).
    ///
    /// Returns the loaded document alongside so a command needing both
    /// does a single read.
    pub fn resolve(
        &self,
        supplied: &FieldMap,
        path: &NormalizedPath,
    ) -> Result<(FieldMap, ConfigDocument)> {
        let document = self.store.load(path)?;

        let mut effective = builtin_defaults();
        for (key, value) in &document.settings {
            effective.insert(key.clone(), value.clone());
        }
        for (key, value) in supplied {
            if value.is_null() {
                continue;
            }
            effective.insert(key.clone(), value.clone());
        }

        tracing::debug!(%path, keys = effective.len(), "resolved effective parameters");
        Ok((effective, document))
    }

    /// Overwrite the document's settings with `params` and persist.
    pub fn save(&self, params: &FieldMap, path: &NormalizedPath) -> Result<ConfigDocument> {
        let mut document = self.store.load(path)?;
        document.settings = params.clone();
        self.store.save(path, &document)?;
        Ok(document)
    }

    /// Shallow-merge `params` into the document's settings and persist.
    ///
    /// Supplied keys replace, others are untouched; applying the same
    /// params twice is a no-op the second time.
    pub fn update(&self, params: &FieldMap, path: &NormalizedPath) -> Result<ConfigDocument> {
        let mut document = self.store.load(path)?;
        for (key, value) in params {
            document.settings.insert(key.clone(), value.clone());
        }
        self.store.save(path, &document)?;
        Ok(document)
    }

    /// Replace the entire document at `path`.
    pub fn replace(&self, document: &ConfigDocument, path: &NormalizedPath) -> Result<()> {
        self.store.save(path, document)
    }

    /// Import the document at `source` into `dest`.
    ///
    /// With `replace`, dest becomes a copy of source. Otherwise source is
    /// deep-merged into dest profile-type by profile-type with the usual
    /// key-wise override; profile types present only in dest survive.
    pub fn import_from(
        &self,
        source: &NormalizedPath,
        dest: &NormalizedPath,
        replace: bool,
    ) -> Result<ConfigDocument> {
        if !source.is_file() {
            return Err(Error::SourceNotFound {
                path: source.to_native(),
            });
        }

        let imported = self.store.load(source)?;
        let merged = if replace {
            imported
        } else {
            let mut current = self.store.load(dest)?;
            current.merge(&imported);
            current
        };

        self.store.save(dest, &merged)?;
        tracing::debug!(%source, %dest, replace, "import complete");
        Ok(merged)
    }

    /// Write a copy of the document at `source` to an arbitrary file.
    ///
    /// The output format follows the destination extension.
    pub fn export(&self, source: &NormalizedPath, dest: &NormalizedPath) -> Result<()> {
        if !source.is_file() {
            return Err(Error::SourceNotFound {
                path: source.to_native(),
            });
        }
        let document = self.store.load(source)?;
        self.store.save(dest, &document)
    }

    /// Reset the document at `path` to the built-in defaults.
    pub fn reset(&self, path: &NormalizedPath) -> Result<ConfigDocument> {
        let document = ConfigDocument {
            settings: builtin_defaults(),
            ..Default::default()
        };
        self.store.save(path, &document)?;
        Ok(document)
    }

    /// Load the document at `path` without merging anything.
    pub fn load(&self, path: &NormalizedPath) -> Result<ConfigDocument> {
        self.store.load(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn params(pairs: &[(&str, Value)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn supplied_overrides_stored_overrides_builtin() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("config.toml"));
        let resolver = ConfigResolver::new();

        resolver
            .save(&params(&[("log_level", json!("warn"))]), &path)
            .unwrap();

        let (effective, _) = resolver
            .resolve(&params(&[("output_format", json!("table"))]), &path)
            .unwrap();

        // supplied wins
        assert_eq!(effective["output_format"], json!("table"));
        // stored wins over builtin
        assert_eq!(effective["log_level"], json!("warn"));
        // builtin fills the rest
        assert_eq!(effective["color_theme"], json!("dark"));
    }

    #[test]
    fn null_supplied_values_fall_through() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("config.toml"));
        let resolver = ConfigResolver::new();

        let (effective, _) = resolver
            .resolve(&params(&[("log_level", Value::Null)]), &path)
            .unwrap();
        assert_eq!(effective["log_level"], json!("info"));
    }

    #[test]
    fn save_overwrites_settings_wholesale() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("config.toml"));
        let resolver = ConfigResolver::new();

        resolver
            .save(
                &params(&[("a", json!(1)), ("b", json!(2))]),
                &path,
            )
            .unwrap();
        let document = resolver.save(&params(&[("c", json!(3))]), &path).unwrap();

        assert_eq!(document.settings.len(), 1);
        assert_eq!(document.settings["c"], json!(3));
    }

    #[test]
    fn update_is_a_shallow_merge_and_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("config.toml"));
        let resolver = ConfigResolver::new();

        resolver
            .save(
                &params(&[("keep", json!("me")), ("change", json!("old"))]),
                &path,
            )
            .unwrap();

        let updates = params(&[("change", json!("new"))]);
        let once = resolver.update(&updates, &path).unwrap();
        assert_eq!(once.settings["keep"], json!("me"));
        assert_eq!(once.settings["change"], json!("new"));

        let twice = resolver.update(&updates, &path).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn update_preserves_profiles() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("config.toml"));
        let resolver = ConfigResolver::new();

        let mut document = ConfigDocument::default();
        document.insert_profile("llm", "work", json!({"name": "work"}));
        resolver.replace(&document, &path).unwrap();

        let updated = resolver
            .update(&params(&[("log_level", json!("debug"))]), &path)
            .unwrap();
        assert!(updated.profile("llm", "work").is_some());
    }

    #[test]
    fn import_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let source = NormalizedPath::new(temp.path().join("absent.toml"));
        let dest = NormalizedPath::new(temp.path().join("dest.toml"));

        let err = ConfigResolver::new()
            .import_from(&source, &dest, false)
            .unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }

    #[test]
    fn import_merge_keeps_dest_only_profile_types() {
        let temp = TempDir::new().unwrap();
        let source_path = NormalizedPath::new(temp.path().join("source.toml"));
        let dest_path = NormalizedPath::new(temp.path().join("dest.toml"));
        let resolver = ConfigResolver::new();

        let mut source = ConfigDocument::default();
        source.insert_profile("llm", "work", json!({"name": "work"}));
        resolver.replace(&source, &source_path).unwrap();

        let mut dest = ConfigDocument::default();
        dest.insert_profile("database", "main", json!({"name": "main"}));
        resolver.replace(&dest, &dest_path).unwrap();

        let merged = resolver
            .import_from(&source_path, &dest_path, false)
            .unwrap();
        assert!(merged.profile("database", "main").is_some());
        assert!(merged.profile("llm", "work").is_some());
    }

    #[test]
    fn import_replace_discards_dest() {
        let temp = TempDir::new().unwrap();
        let source_path = NormalizedPath::new(temp.path().join("source.toml"));
        let dest_path = NormalizedPath::new(temp.path().join("dest.toml"));
        let resolver = ConfigResolver::new();

        let mut source = ConfigDocument::default();
        source.insert_profile("llm", "work", json!({"name": "work"}));
        resolver.replace(&source, &source_path).unwrap();

        let mut dest = ConfigDocument::default();
        dest.insert_profile("database", "main", json!({"name": "main"}));
        resolver.replace(&dest, &dest_path).unwrap();

        let replaced = resolver
            .import_from(&source_path, &dest_path, true)
            .unwrap();
        assert!(replaced.profile("database", "main").is_none());
        assert_eq!(replaced, source);
    }

    #[test]
    fn export_follows_destination_extension() {
        let temp = TempDir::new().unwrap();
        let source_path = NormalizedPath::new(temp.path().join("config.toml"));
        let dest_path = NormalizedPath::new(temp.path().join("backup.json"));
        let resolver = ConfigResolver::new();

        resolver
            .save(&params(&[("log_level", json!("debug"))]), &source_path)
            .unwrap();
        resolver.export(&source_path, &dest_path).unwrap();

        let exported: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dest_path.to_native()).unwrap())
                .unwrap();
        assert_eq!(exported["settings"]["log_level"], json!("debug"));
    }

    #[test]
    fn reset_writes_builtin_defaults() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("config.toml"));
        let resolver = ConfigResolver::new();

        let mut document = ConfigDocument::default();
        document.insert_profile("llm", "work", json!({"name": "work"}));
        resolver.replace(&document, &path).unwrap();

        let fresh = resolver.reset(&path).unwrap();
        assert!(fresh.profiles.is_empty());
        assert_eq!(fresh.settings, builtin_defaults());
        assert_eq!(resolver.load(&path).unwrap(), fresh);
    }
}
