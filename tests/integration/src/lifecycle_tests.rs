//! End-to-end profile lifecycle across scopes
//!
//! These tests drive the whole stack (registry -> manager -> store -> fs)
//! the way one tool invocation after another would.

use profile_core::{Error, ProfileManager, ScopeResolver, ScopeSelector};
use profile_fs::NormalizedPath;
use profile_meta::{FieldMap, ProfileRegistry};
use serde_json::{Value, json};
use tempfile::TempDir;

struct Harness {
    _temp: TempDir,
    scopes: ScopeResolver,
    registry: ProfileRegistry,
}

impl Harness {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = NormalizedPath::new(temp.path().join("project"));
        std::fs::create_dir_all(root.to_native()).unwrap();
        let scopes =
            ScopeResolver::with_global_config_dir(root, temp.path().join("global-config"));
        Self {
            _temp: temp,
            scopes,
            registry: ProfileRegistry::with_builtins(),
        }
    }

    fn llm(&self) -> ProfileManager<'_> {
        ProfileManager::new(self.registry.get("llm").unwrap(), &self.scopes)
    }

    fn database(&self) -> ProfileManager<'_> {
        ProfileManager::new(self.registry.get("database").unwrap(), &self.scopes)
    }
}

fn fields(pairs: &[(&str, Value)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn llm_fields(name: &str) -> FieldMap {
    fields(&[
        ("name", json!(name)),
        ("provider", json!("openai")),
        ("model", json!("gpt-4")),
        ("api_key", json!("k")),
    ])
}

#[test]
fn full_lifecycle_in_one_scope() {
    let harness = Harness::new();
    let manager = harness.llm();
    let local = ScopeSelector::local();

    // create two, list in insertion order
    manager.create(&llm_fields("first"), &local).unwrap();
    manager.create(&llm_fields("second"), &local).unwrap();
    let names: Vec<String> = manager
        .list(&local)
        .unwrap()
        .iter()
        .map(|p| p.name().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["first", "second"]);

    // pick a default, edit the other, delete the default
    manager.set_default("first", &local).unwrap();
    manager
        .edit("second", &fields(&[("model", json!("gpt-4o"))]), &local)
        .unwrap();
    manager.delete("first", &local).unwrap();

    assert!(manager.get_default(&local).unwrap().is_none());
    let remaining = manager.list(&local).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].get("model"), Some(&json!("gpt-4o")));
}

#[test]
fn profile_types_share_a_document_without_interfering() {
    let harness = Harness::new();
    let local = ScopeSelector::local();

    harness.llm().create(&llm_fields("work"), &local).unwrap();
    harness
        .database()
        .create(
            &fields(&[
                ("name", json!("main")),
                ("engine", json!("postgres")),
                ("database", json!("app")),
            ]),
            &local,
        )
        .unwrap();

    harness.llm().set_default("work", &local).unwrap();
    harness.database().set_default("main", &local).unwrap();

    // Deleting the llm default must not affect the database default.
    harness.llm().delete("work", &local).unwrap();
    assert!(harness.llm().get_default(&local).unwrap().is_none());
    let db_default = harness.database().get_default(&local).unwrap().unwrap();
    assert_eq!(db_default.name(), Some("main"));
}

#[test]
fn named_file_scope_with_json_extension() {
    let harness = Harness::new();
    let file_path = harness._temp.path().join("team.json");
    let selector = ScopeSelector::file(file_path.to_string_lossy().to_string());

    let manager = harness.llm();
    manager.create(&llm_fields("shared"), &selector).unwrap();

    // The file is real JSON, hand-editable.
    let raw = std::fs::read_to_string(&file_path).unwrap();
    let parsed: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["profiles"]["llm"]["shared"]["name"], json!("shared"));

    // And the engine reads it back.
    let profile = manager.get("shared", &selector).unwrap();
    assert_eq!(profile.get("base_url"), Some(&json!("https://api.openai.com")));
}

#[test]
fn hand_edits_are_observed_on_the_next_invocation() {
    let harness = Harness::new();
    let local = ScopeSelector::local();
    let manager = harness.llm();

    manager.create(&llm_fields("work"), &local).unwrap();

    // Hand-edit the stored model between invocations.
    let path = harness.scopes.resolve(&local).unwrap();
    let content = std::fs::read_to_string(path.to_native()).unwrap();
    std::fs::write(
        path.to_native(),
        content.replace("gpt-4", "hand-edited-model"),
    )
    .unwrap();

    let profile = manager.get("work", &local).unwrap();
    assert_eq!(profile.get("model"), Some(&json!("hand-edited-model")));
}

#[test]
fn dangling_default_reads_as_unset() {
    let harness = Harness::new();
    let local = ScopeSelector::local();
    let manager = harness.llm();

    manager.create(&llm_fields("work"), &local).unwrap();
    manager.set_default("work", &local).unwrap();

    // Hand-edit the document so the default points at nothing.
    let path = harness.scopes.resolve(&local).unwrap();
    let content = std::fs::read_to_string(path.to_native()).unwrap();
    std::fs::write(
        path.to_native(),
        content.replace("[profiles.llm.work]", "[profiles.llm.other]"),
    )
    .unwrap();

    assert!(manager.get_default(&local).unwrap().is_none());
}

#[test]
fn failed_operations_leave_the_document_unchanged() {
    let harness = Harness::new();
    let local = ScopeSelector::local();
    let manager = harness.llm();

    manager.create(&llm_fields("work"), &local).unwrap();
    let path = harness.scopes.resolve(&local).unwrap();
    let before = std::fs::read_to_string(path.to_native()).unwrap();

    let conflict = manager.create(&llm_fields("work"), &local).unwrap_err();
    assert!(matches!(conflict, Error::Conflict { .. }));

    let invalid = manager
        .edit("work", &fields(&[("temperature", json!(5))]), &local)
        .unwrap_err();
    assert!(matches!(invalid, Error::Validation { .. }));

    let after = std::fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(before, after);
}
