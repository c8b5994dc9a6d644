//! Per-invocation context
//!
//! One `CliContext` is built at the start of a command run and passed down
//! explicitly. There is no ambient global state: the registry, the scope
//! resolver and the config resolver live here and nowhere else.

use colored::Colorize;

use profile_core::{ConfigResolver, ScopeResolver};
use profile_fs::NormalizedPath;
use profile_meta::{ProfileRegistry, ProfileSpec};

use crate::error::{CliError, Result};

pub struct CliContext {
    pub registry: ProfileRegistry,
    pub scopes: ScopeResolver,
    pub resolver: ConfigResolver,
    pub quiet: bool,
}

impl CliContext {
    /// Build the context for the current working directory.
    pub fn from_cwd(quiet: bool) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Ok(Self::with_scopes(
            ScopeResolver::new(NormalizedPath::new(cwd)),
            quiet,
        ))
    }

    /// Build the context around a prepared scope resolver. Tests use this
    /// to point the global scope at a temp directory.
    pub fn with_scopes(scopes: ScopeResolver, quiet: bool) -> Self {
        Self {
            registry: ProfileRegistry::with_builtins(),
            scopes,
            resolver: ConfigResolver::new(),
            quiet,
        }
    }

    /// Resolve a profile type named on the command line.
    pub fn spec(&self, type_name: &str) -> Result<&ProfileSpec> {
        self.registry.get(type_name).ok_or_else(|| {
            CliError::user(format!(
                "Unknown profile type '{type_name}'. Registered types: {}",
                self.registry.all().join(", ")
            ))
        })
    }

    /// Print a success line unless --quiet was given.
    pub fn success(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message.as_ref());
        }
    }

    /// Print an informational line unless --quiet was given.
    pub fn info(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref().dimmed());
        }
    }
}
