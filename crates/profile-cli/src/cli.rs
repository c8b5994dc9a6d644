//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use profile_core::{Scope, ScopeSelector};

/// Profile Manager - layered configuration and named profiles for the command line
#[derive(Parser, Debug)]
#[command(name = "pm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration documents (global, local, named files)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage profiles of a registered type
    ///
    /// Examples:
    ///   pm profile llm create --set name=work --set provider=openai \
    ///     --set model=gpt-4 --set api_key=sk-...
    ///   pm profile llm list
    ///   pm profile llm use work --global
    Profile {
        /// Profile type (see `pm schema` for registered types)
        #[arg(value_name = "TYPE")]
        profile_type: String,

        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Show the field schema of one or all profile types
    Schema {
        /// Profile type to describe; all types when omitted
        #[arg(value_name = "TYPE")]
        profile_type: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json_output: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration document operations
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Display the configuration document
    Show {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json_output: bool,
    },

    /// Overwrite the settings section with the given parameters
    Save {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Setting as KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Merge parameters into the settings section
    Update {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Setting as KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// JSON object with settings to merge, instead of --set pairs
        #[arg(long, value_name = "JSON", conflicts_with = "set")]
        json: Option<String>,
    },

    /// Replace the whole document from a JSON object
    Replace {
        #[command(flatten)]
        scope: ScopeArgs,

        /// The full document as JSON
        #[arg(value_name = "JSON")]
        json: String,
    },

    /// Import another configuration document
    ///
    /// Without --replace the source is deep-merged into the destination;
    /// profile types present only in the destination survive.
    Import {
        /// Import from the global configuration
        #[arg(long, conflicts_with_all = ["from_local", "from_file"])]
        from_global: bool,

        /// Import from the project-local configuration
        #[arg(long, conflicts_with = "from_file")]
        from_local: bool,

        /// Import from a named configuration file
        #[arg(long, value_name = "PATH")]
        from_file: Option<String>,

        /// Import into the global configuration
        #[arg(long, conflicts_with_all = ["to_local", "to_file"])]
        to_global: bool,

        /// Import into the project-local configuration
        #[arg(long, conflicts_with = "to_file")]
        to_local: bool,

        /// Import into a named configuration file
        #[arg(long, value_name = "PATH")]
        to_file: Option<String>,

        /// Replace the destination instead of merging
        #[arg(long)]
        replace: bool,
    },

    /// Export the document to a file (format follows the extension)
    Export {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Destination file
        #[arg(long, value_name = "PATH")]
        to_file: String,
    },

    /// Reset the document to the built-in defaults
    Reset {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Print commands that recreate the stored profiles
    Generate {
        #[command(flatten)]
        scope: ScopeArgs,
    },
}

/// Profile operations, generic over the profile type
#[derive(Subcommand, Debug)]
pub enum ProfileAction {
    /// Create a new profile
    Create {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Field as KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// All fields as one JSON object, instead of --set pairs
        #[arg(long, value_name = "JSON", conflicts_with = "set")]
        json: Option<String>,
    },

    /// List profiles at the scope
    List {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json_output: bool,
    },

    /// Show one profile
    Show {
        /// Profile name
        name: String,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json_output: bool,
    },

    /// Edit an existing profile (fields not mentioned are kept)
    Edit {
        /// Profile name
        name: String,

        #[command(flatten)]
        scope: ScopeArgs,

        /// Field as KEY=VALUE (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Updates as one JSON object, instead of --set pairs
        #[arg(long, value_name = "JSON", conflicts_with = "set")]
        json: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Set a profile as the type's default
    Use {
        /// Profile name
        name: String,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Show the type's current default profile
    Default {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json_output: bool,
    },
}

/// Where a command operates.
///
/// An explicit `--global`/`--local` always wins; `--file` alongside one of
/// them is ignored. A bare `--file` means file scope. Nothing means local.
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Operate on the global configuration
    #[arg(long, conflicts_with = "local")]
    pub global: bool,

    /// Operate on the project-local configuration (the default)
    #[arg(long)]
    pub local: bool,

    /// Operate on a named configuration file (`~` is expanded)
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,
}

impl ScopeArgs {
    pub fn selector(&self) -> ScopeSelector {
        let scope = if self.global {
            Some(Scope::Global)
        } else if self.local {
            Some(Scope::Local)
        } else if self.file.is_some() {
            Some(Scope::File)
        } else {
            None
        };
        ScopeSelector {
            scope,
            file_path: self.file.clone(),
        }
    }
}
