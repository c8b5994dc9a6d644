//! Generic profile commands
//!
//! Every handler works for any registered profile type: the type name from
//! the command line is resolved to a spec through the registry, and the
//! spec drives the engine.

use colored::Colorize;
use serde_json::Value;

use profile_core::{Profile, ProfileManager, ScopeSelector};

use crate::cli::ScopeArgs;
use crate::context::CliContext;
use crate::error::Result;
use crate::params;

pub fn run_create(
    ctx: &CliContext,
    type_name: &str,
    scope: &ScopeArgs,
    set: &[String],
    json: Option<&str>,
) -> Result<()> {
    let spec = ctx.spec(type_name)?;
    let data = match json {
        Some(input) => params::parse_json_object(input)?,
        None => params::profile_fields_from_pairs(set)?,
    };

    let selector = scope.selector();
    let manager = ProfileManager::new(spec, &ctx.scopes);
    let profile = manager.create(&data, &selector)?;

    ctx.success(format!(
        "{type_name} profile '{}' created in the {} configuration.",
        profile.name().unwrap_or_default(),
        selector.effective_scope()
    ));
    if !ctx.quiet {
        print_profile(&profile);
    }
    Ok(())
}

pub fn run_list(
    ctx: &CliContext,
    type_name: &str,
    scope: &ScopeArgs,
    json_output: bool,
) -> Result<()> {
    let spec = ctx.spec(type_name)?;
    let selector = scope.selector();
    let manager = ProfileManager::new(spec, &ctx.scopes);
    let profiles = manager.list(&selector)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&profiles).unwrap_or_default()
        );
        return Ok(());
    }

    if profiles.is_empty() {
        ctx.info(format!(
            "No {type_name} profiles found in the {} configuration.",
            selector.effective_scope()
        ));
        return Ok(());
    }

    let default_name = manager
        .get_default(&selector)?
        .and_then(|p| p.name().map(str::to_string));

    println!(
        "{} {}",
        format!("{type_name} profiles").bold(),
        format!("({})", selector.effective_scope()).dimmed()
    );
    println!();
    for profile in &profiles {
        let name = profile.name().unwrap_or("(unnamed)");
        let marker = if default_name.as_deref() == Some(name) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        let summary = profile
            .fields()
            .iter()
            .filter(|(key, _)| key.as_str() != "name")
            .map(|(key, value)| format!("{key}={}", render_value(value)))
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {marker} {:<16} {}", name.bold(), summary.dimmed());
    }
    Ok(())
}

pub fn run_show(
    ctx: &CliContext,
    type_name: &str,
    name: &str,
    scope: &ScopeArgs,
    json_output: bool,
) -> Result<()> {
    let spec = ctx.spec(type_name)?;
    let manager = ProfileManager::new(spec, &ctx.scopes);
    let profile = manager.get(name, &scope.selector())?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&profile).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", format!("{type_name} profile: {name}").bold());
    println!();
    print_profile(&profile);
    Ok(())
}

pub fn run_edit(
    ctx: &CliContext,
    type_name: &str,
    name: &str,
    scope: &ScopeArgs,
    set: &[String],
    json: Option<&str>,
) -> Result<()> {
    let spec = ctx.spec(type_name)?;
    let updates = match json {
        Some(input) => params::parse_json_object(input)?,
        None => params::profile_fields_from_pairs(set)?,
    };

    let selector = scope.selector();
    let manager = ProfileManager::new(spec, &ctx.scopes);
    let profile = manager.edit(name, &updates, &selector)?;

    ctx.success(format!("{type_name} profile '{name}' updated."));
    if !ctx.quiet {
        print_profile(&profile);
    }
    Ok(())
}

pub fn run_delete(
    ctx: &CliContext,
    type_name: &str,
    name: &str,
    scope: &ScopeArgs,
) -> Result<()> {
    let spec = ctx.spec(type_name)?;
    let selector = scope.selector();
    let manager = ProfileManager::new(spec, &ctx.scopes);
    manager.delete(name, &selector)?;

    ctx.success(format!(
        "{type_name} profile '{name}' deleted from the {} configuration.",
        selector.effective_scope()
    ));
    Ok(())
}

pub fn run_use(
    ctx: &CliContext,
    type_name: &str,
    name: &str,
    scope: &ScopeArgs,
) -> Result<()> {
    let spec = ctx.spec(type_name)?;
    let selector = scope.selector();
    let manager = ProfileManager::new(spec, &ctx.scopes);
    manager.set_default(name, &selector)?;

    ctx.success(format!(
        "'{name}' is now the default {type_name} profile in the {} configuration.",
        selector.effective_scope()
    ));
    Ok(())
}

pub fn run_default(
    ctx: &CliContext,
    type_name: &str,
    scope: &ScopeArgs,
    json_output: bool,
) -> Result<()> {
    let spec = ctx.spec(type_name)?;
    let selector = scope.selector();
    let manager = ProfileManager::new(spec, &ctx.scopes);

    // With no scope given this shows the active default: the local one,
    // falling back to the global one.
    let fallback = selector == ScopeSelector::unspecified();
    let found = match manager.get_default(&selector)? {
        Some(profile) => Some(profile),
        None if fallback => manager.get_default(&ScopeSelector::global())?,
        None => None,
    };

    match found {
        Some(profile) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&profile).unwrap_or_default()
                );
            } else {
                println!(
                    "{}",
                    format!(
                        "Default {type_name} profile: {}",
                        profile.name().unwrap_or("(unnamed)")
                    )
                    .bold()
                );
                println!();
                print_profile(&profile);
            }
        }
        None if fallback => ctx.info(format!(
            "No default {type_name} profile set in the local or global configuration."
        )),
        None => ctx.info(format!(
            "No default {type_name} profile set in the {} configuration.",
            selector.effective_scope()
        )),
    }
    Ok(())
}

fn print_profile(profile: &Profile) {
    for (key, value) in profile.fields() {
        println!(
            "  {:<14} {}",
            format!("{key}:").dimmed(),
            render_value(value)
        );
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
