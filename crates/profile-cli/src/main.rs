//! Profile Manager CLI
//!
//! The `pm` binary: layered configuration documents and named, typed
//! profiles at global, project-local, and named-file scopes.

mod cli;
mod commands;
mod context;
mod error;
mod params;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, ConfigAction, ProfileAction};
use context::CliContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(command) => execute_command(command, cli.quiet),
        None => {
            println!("{} Profile Manager CLI", "pm".green().bold());
            println!();
            println!("Run {} for available commands.", "pm --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(command: Commands, quiet: bool) -> Result<()> {
    match command {
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pm", &mut std::io::stdout());
            Ok(())
        }
        Commands::Config { action } => {
            let ctx = CliContext::from_cwd(quiet)?;
            run_config(&ctx, action)
        }
        Commands::Profile {
            profile_type,
            action,
        } => {
            let ctx = CliContext::from_cwd(quiet)?;
            run_profile(&ctx, &profile_type, action)
        }
        Commands::Schema {
            profile_type,
            json_output,
        } => {
            let ctx = CliContext::from_cwd(quiet)?;
            commands::schema::run_schema(&ctx, profile_type.as_deref(), json_output)
        }
    }
}

fn run_config(ctx: &CliContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show { scope, json_output } => {
            commands::config::run_show(ctx, &scope, json_output)
        }
        ConfigAction::Save { scope, set } => commands::config::run_save(ctx, &scope, &set),
        ConfigAction::Update { scope, set, json } => {
            commands::config::run_update(ctx, &scope, &set, json.as_deref())
        }
        ConfigAction::Replace { scope, json } => {
            commands::config::run_replace(ctx, &scope, &json)
        }
        ConfigAction::Import {
            from_global,
            from_local,
            from_file,
            to_global,
            to_local,
            to_file,
            replace,
        } => {
            let from = commands::config::endpoint_selector(
                from_global,
                from_local,
                from_file.as_deref(),
                "from",
            )?;
            let to = commands::config::endpoint_selector(
                to_global,
                to_local,
                to_file.as_deref(),
                "to",
            )?;
            commands::config::run_import(ctx, &from, &to, replace)
        }
        ConfigAction::Export { scope, to_file } => {
            commands::config::run_export(ctx, &scope, &to_file)
        }
        ConfigAction::Reset { scope, yes } => commands::config::run_reset(ctx, &scope, yes),
        ConfigAction::Generate { scope } => commands::config::run_generate(ctx, &scope),
    }
}

fn run_profile(ctx: &CliContext, profile_type: &str, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Create { scope, set, json } => {
            commands::profile::run_create(ctx, profile_type, &scope, &set, json.as_deref())
        }
        ProfileAction::List { scope, json_output } => {
            commands::profile::run_list(ctx, profile_type, &scope, json_output)
        }
        ProfileAction::Show {
            name,
            scope,
            json_output,
        } => commands::profile::run_show(ctx, profile_type, &name, &scope, json_output),
        ProfileAction::Edit {
            name,
            scope,
            set,
            json,
        } => commands::profile::run_edit(ctx, profile_type, &name, &scope, &set, json.as_deref()),
        ProfileAction::Delete { name, scope } => {
            commands::profile::run_delete(ctx, profile_type, &name, &scope)
        }
        ProfileAction::Use { name, scope } => {
            commands::profile::run_use(ctx, profile_type, &name, &scope)
        }
        ProfileAction::Default { scope, json_output } => {
            commands::profile::run_default(ctx, profile_type, &scope, json_output)
        }
    }
}
