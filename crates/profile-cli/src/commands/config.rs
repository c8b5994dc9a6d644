//! Configuration document commands

use colored::Colorize;
use dialoguer::Confirm;
use serde_json::Value;

use profile_core::{ConfigDocument, Scope, ScopeSelector};
use profile_fs::expand_user;

use crate::cli::ScopeArgs;
use crate::context::CliContext;
use crate::error::{CliError, Result};
use crate::params;

/// Display the document at the selected scope.
pub fn run_show(ctx: &CliContext, scope: &ScopeArgs, json_output: bool) -> Result<()> {
    let selector = scope.selector();
    let path = ctx.scopes.resolve(&selector)?;
    let document = ctx.resolver.load(&path)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&document).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "{} {}",
        "Configuration".bold(),
        format!("({})", selector.effective_scope()).dimmed()
    );
    println!("  {:<10} {}", "Location:".dimmed(), path);
    println!();

    let rendered = toml::to_string_pretty(&document)
        .map_err(|e| CliError::user(format!("Cannot render document: {e}")))?;
    if rendered.is_empty() {
        ctx.info("(empty document)");
    } else {
        print!("{rendered}");
    }
    Ok(())
}

/// Overwrite the settings section with the given parameters.
pub fn run_save(ctx: &CliContext, scope: &ScopeArgs, set: &[String]) -> Result<()> {
    let selector = scope.selector();
    let path = ctx.scopes.resolve(&selector)?;
    let settings = params::settings_from_pairs(set)?;

    ctx.resolver.save(&settings, &path)?;
    ctx.success(format!(
        "Settings saved to the {} configuration.",
        selector.effective_scope()
    ));
    Ok(())
}

/// Shallow-merge parameters into the settings section.
pub fn run_update(
    ctx: &CliContext,
    scope: &ScopeArgs,
    set: &[String],
    json: Option<&str>,
) -> Result<()> {
    let settings = match json {
        Some(input) => params::parse_json_object(input)?,
        None => params::settings_from_pairs(set)?,
    };
    if settings.is_empty() {
        return Err(CliError::user(
            "Nothing to update: pass --set KEY=VALUE or --json '{...}'",
        ));
    }

    let selector = scope.selector();
    let path = ctx.scopes.resolve(&selector)?;
    ctx.resolver.update(&settings, &path)?;
    ctx.success(format!(
        "Settings updated in the {} configuration.",
        selector.effective_scope()
    ));
    Ok(())
}

/// Replace the whole document from a JSON object.
pub fn run_replace(ctx: &CliContext, scope: &ScopeArgs, json: &str) -> Result<()> {
    let document: ConfigDocument = serde_json::from_str(json)
        .map_err(|e| CliError::user(format!("Invalid document JSON: {e}")))?;

    let selector = scope.selector();
    let path = ctx.scopes.resolve(&selector)?;
    ctx.resolver.replace(&document, &path)?;
    ctx.success(format!(
        "Replaced the {} configuration.",
        selector.effective_scope()
    ));
    Ok(())
}

/// Turn one side of an import (`--from-*` / `--to-*` flags) into a scope
/// selector. Exactly one of the three must be given.
pub fn endpoint_selector(
    global: bool,
    local: bool,
    file: Option<&str>,
    role: &str,
) -> Result<ScopeSelector> {
    if global {
        Ok(ScopeSelector::global())
    } else if local {
        Ok(ScopeSelector::local())
    } else if let Some(path) = file {
        Ok(ScopeSelector::file(path))
    } else {
        Err(CliError::user(format!(
            "Specify a {role} configuration: --{role}-global, --{role}-local or --{role}-file <PATH>"
        )))
    }
}

/// Import one document into another.
pub fn run_import(
    ctx: &CliContext,
    from: &ScopeSelector,
    to: &ScopeSelector,
    replace: bool,
) -> Result<()> {
    let source = ctx.scopes.resolve(from)?;
    let dest = ctx.scopes.resolve(to)?;

    ctx.resolver.import_from(&source, &dest, replace)?;
    ctx.success(if replace {
        "Configuration replaced from the import source."
    } else {
        "Configuration imported."
    });
    Ok(())
}

/// Export the selected document to an arbitrary file.
pub fn run_export(ctx: &CliContext, scope: &ScopeArgs, to_file: &str) -> Result<()> {
    let selector = scope.selector();
    let source = ctx.scopes.resolve(&selector)?;
    let dest = expand_user(to_file);

    ctx.resolver.export(&source, &dest)?;
    ctx.success(format!("Configuration exported to {dest}."));
    Ok(())
}

/// Reset the selected document to the built-in defaults.
pub fn run_reset(ctx: &CliContext, scope: &ScopeArgs, yes: bool) -> Result<()> {
    let selector = scope.selector();
    let path = ctx.scopes.resolve(&selector)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Reset the {} configuration to defaults?",
                selector.effective_scope()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.info("Reset aborted.");
            return Ok(());
        }
    }

    ctx.resolver.reset(&path)?;
    ctx.success(format!(
        "Reset the {} configuration to defaults.",
        selector.effective_scope()
    ));
    Ok(())
}

/// Print `pm profile ... create` command lines that recreate the stored
/// profiles, one per profile.
pub fn run_generate(ctx: &CliContext, scope: &ScopeArgs) -> Result<()> {
    let selector = scope.selector();
    let path = ctx.scopes.resolve(&selector)?;
    let document = ctx.resolver.load(&path)?;

    let scope_flag = match selector.effective_scope() {
        Scope::Global => "--global".to_string(),
        Scope::Local => "--local".to_string(),
        Scope::File => format!("--file {path}"),
    };

    for (type_name, table) in &document.profiles {
        for record in table.values() {
            let Some(fields) = record.as_object() else {
                continue;
            };
            let mut command = format!("pm profile {type_name} create");
            for (key, value) in fields {
                command.push_str(&format!(" --set \"{key}={}\"", render_value(value)));
            }
            command.push(' ');
            command.push_str(&scope_flag);
            println!("{command}");
        }
    }
    Ok(())
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profile_core::ScopeResolver;
    use profile_fs::NormalizedPath;
    use tempfile::TempDir;

    fn test_context(temp: &TempDir) -> CliContext {
        let root = NormalizedPath::new(temp.path().join("project"));
        std::fs::create_dir_all(root.to_native()).unwrap();
        CliContext::with_scopes(
            ScopeResolver::with_global_config_dir(root, temp.path().join("global-config")),
            true,
        )
    }

    #[test]
    fn save_then_show_round_trips() {
        let temp = TempDir::new().unwrap();
        let ctx = test_context(&temp);
        let scope = ScopeArgs::default();

        run_save(&ctx, &scope, &["log_level=debug".to_string()]).unwrap();
        run_show(&ctx, &scope, true).unwrap();
        run_show(&ctx, &scope, false).unwrap();
    }

    #[test]
    fn update_without_input_is_an_error() {
        let temp = TempDir::new().unwrap();
        let ctx = test_context(&temp);

        let result = run_update(&ctx, &ScopeArgs::default(), &[], None);
        assert!(result.is_err());
    }

    #[test]
    fn replace_rejects_malformed_documents() {
        let temp = TempDir::new().unwrap();
        let ctx = test_context(&temp);

        let result = run_replace(&ctx, &ScopeArgs::default(), "{\"defaults\": []}");
        assert!(result.is_err());
    }

    #[test]
    fn import_requires_both_endpoints() {
        assert!(endpoint_selector(false, false, None, "from").is_err());
        assert!(endpoint_selector(true, false, None, "from").is_ok());
        assert!(endpoint_selector(false, false, Some("x.toml"), "to").is_ok());
    }

    #[test]
    fn import_between_files_merges() {
        let temp = TempDir::new().unwrap();
        let ctx = test_context(&temp);

        let source = temp.path().join("source.toml");
        std::fs::write(
            &source,
            "[profiles.llm.work]\nname = \"work\"\n",
        )
        .unwrap();

        run_save(&ctx, &ScopeArgs::default(), &["keep=me".to_string()]).unwrap();

        let from = ScopeSelector::file(source.to_string_lossy().to_string());
        let to = ScopeSelector::local();
        run_import(&ctx, &from, &to, false).unwrap();

        let path = ctx.scopes.resolve(&to).unwrap();
        let merged = ctx.resolver.load(&path).unwrap();
        assert!(merged.profile("llm", "work").is_some());
        assert_eq!(merged.settings["keep"], serde_json::json!("me"));
    }

    #[test]
    fn reset_with_yes_skips_the_prompt() {
        let temp = TempDir::new().unwrap();
        let ctx = test_context(&temp);
        let scope = ScopeArgs::default();

        run_save(&ctx, &scope, &["custom=1".to_string()]).unwrap();
        run_reset(&ctx, &scope, true).unwrap();

        let path = ctx.scopes.resolve(&scope.selector()).unwrap();
        let document = ctx.resolver.load(&path).unwrap();
        assert!(!document.settings.contains_key("custom"));
        assert_eq!(document.settings["output_format"], serde_json::json!("json"));
    }

    #[test]
    fn generate_runs_on_populated_documents() {
        let temp = TempDir::new().unwrap();
        let ctx = test_context(&temp);
        let scope = ScopeArgs::default();

        let path = ctx.scopes.resolve(&scope.selector()).unwrap();
        let mut document = ConfigDocument::default();
        document.insert_profile(
            "llm",
            "work",
            serde_json::json!({"name": "work", "provider": "openai"}),
        );
        ctx.resolver.replace(&document, &path).unwrap();

        run_generate(&ctx, &scope).unwrap();
    }
}
