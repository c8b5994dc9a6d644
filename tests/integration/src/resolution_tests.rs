//! End-to-end configuration resolution and import/export

use pretty_assertions::assert_eq;
use profile_core::{
    ConfigDocument, ConfigResolver, DocumentStore, ScopeResolver, ScopeSelector, builtin_defaults,
};
use profile_fs::NormalizedPath;
use profile_meta::FieldMap;
use serde_json::{Value, json};
use tempfile::TempDir;

fn params(pairs: &[(&str, Value)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn effective_parameters_follow_the_precedence_chain() {
    let temp = TempDir::new().unwrap();
    let root = NormalizedPath::new(temp.path());
    let scopes = ScopeResolver::with_global_config_dir(root, temp.path().join("global"));
    let resolver = ConfigResolver::new();

    let local = scopes.resolve(&ScopeSelector::local()).unwrap();
    resolver
        .update(&params(&[("log_level", json!("warn"))]), &local)
        .unwrap();

    // Nothing supplied: stored setting wins over builtin, builtins fill.
    let (effective, _) = resolver.resolve(&FieldMap::new(), &local).unwrap();
    assert_eq!(effective["log_level"], json!("warn"));
    assert_eq!(effective["output_format"], json!("json"));

    // Supplied wins over both.
    let (effective, _) = resolver
        .resolve(&params(&[("log_level", json!("trace"))]), &local)
        .unwrap();
    assert_eq!(effective["log_level"], json!("trace"));
}

#[test]
fn round_trip_preserves_the_document_exactly() {
    let temp = TempDir::new().unwrap();
    let store = DocumentStore::new();

    let mut document = ConfigDocument::default();
    document.settings = builtin_defaults();
    document.insert_profile(
        "llm",
        "work",
        json!({"name": "work", "provider": "openai", "temperature": 0.7}),
    );
    document.insert_profile("llm", "play", json!({"name": "play", "provider": "cohere"}));
    document.insert_profile(
        "database",
        "main",
        json!({"name": "main", "engine": "postgres", "port": 5432, "ssl": false}),
    );
    document.set_default_profile("llm", "work");

    for file_name in ["doc.toml", "doc.json", "doc.yaml"] {
        let path = NormalizedPath::new(temp.path().join(file_name));
        store.save(&path, &document).unwrap();
        let loaded = store.load(&path).unwrap();
        assert_eq!(loaded, document, "round trip failed for {file_name}");
    }
}

#[test]
fn import_merges_while_replace_copies() {
    let temp = TempDir::new().unwrap();
    let resolver = ConfigResolver::new();
    let source_path = NormalizedPath::new(temp.path().join("source.toml"));
    let dest_path = NormalizedPath::new(temp.path().join("dest.toml"));

    let mut source = ConfigDocument::default();
    source.insert_profile("llm", "incoming", json!({"name": "incoming"}));
    source.settings.insert("log_level".into(), json!("debug"));
    resolver.replace(&source, &source_path).unwrap();

    let mut dest = ConfigDocument::default();
    dest.insert_profile("database", "kept", json!({"name": "kept"}));
    dest.settings.insert("color_theme".into(), json!("light"));
    resolver.replace(&dest, &dest_path).unwrap();

    // Merge: both sides present afterwards.
    let merged = resolver
        .import_from(&source_path, &dest_path, false)
        .unwrap();
    assert!(merged.profile("database", "kept").is_some());
    assert!(merged.profile("llm", "incoming").is_some());
    assert_eq!(merged.settings["color_theme"], json!("light"));
    assert_eq!(merged.settings["log_level"], json!("debug"));

    // Replace: dest becomes a copy of source.
    let replaced = resolver
        .import_from(&source_path, &dest_path, true)
        .unwrap();
    assert_eq!(replaced, source);
    assert_eq!(resolver.load(&dest_path).unwrap(), source);
}

#[test]
fn import_across_formats() {
    let temp = TempDir::new().unwrap();
    let resolver = ConfigResolver::new();
    let source_path = NormalizedPath::new(temp.path().join("shared.json"));
    let dest_path = NormalizedPath::new(temp.path().join("config.toml"));

    std::fs::write(
        source_path.to_native(),
        r#"{"profiles": {"llm": {"work": {"name": "work"}}}}"#,
    )
    .unwrap();

    let merged = resolver
        .import_from(&source_path, &dest_path, false)
        .unwrap();
    assert!(merged.profile("llm", "work").is_some());

    // The destination was written as TOML.
    let raw = std::fs::read_to_string(dest_path.to_native()).unwrap();
    assert!(raw.contains("[profiles.llm.work]"), "got: {raw}");
}

#[test]
fn export_then_reimport_is_lossless() {
    let temp = TempDir::new().unwrap();
    let resolver = ConfigResolver::new();
    let original_path = NormalizedPath::new(temp.path().join("config.toml"));
    let exported_path = NormalizedPath::new(temp.path().join("backup.yaml"));
    let restored_path = NormalizedPath::new(temp.path().join("restored.toml"));

    let mut document = ConfigDocument::default();
    document.insert_profile("llm", "work", json!({"name": "work", "temperature": 0.5}));
    document.set_default_profile("llm", "work");
    resolver.replace(&document, &original_path).unwrap();

    resolver.export(&original_path, &exported_path).unwrap();
    resolver
        .import_from(&exported_path, &restored_path, true)
        .unwrap();

    assert_eq!(resolver.load(&restored_path).unwrap(), document);
}
