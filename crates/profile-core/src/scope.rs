//! Scope resolution: mapping a scope selector to a configuration location

use std::path::PathBuf;

use profile_fs::{NormalizedPath, expand_user};

use crate::error::{Error, Result};

/// Directory under the platform config dir holding the global document.
pub const GLOBAL_DIR: &str = "profile-manager";

/// Directory under the project root holding the local document.
pub const LOCAL_DIR: &str = ".profile-manager";

/// File name of the configuration document at the fixed scopes.
pub const CONFIG_FILE: &str = "config.toml";

/// A named configuration location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Fixed path under the user's home configuration directory
    Global,
    /// Fixed path under the project root
    Local,
    /// Caller-supplied file path
    File,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Local => "local",
            Self::File => "file",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the command line said about where to operate.
///
/// Both parts are optional; [`ScopeSelector::effective_scope`] applies the
/// defaulting rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeSelector {
    pub scope: Option<Scope>,
    pub file_path: Option<String>,
}

impl ScopeSelector {
    /// Neither scope nor path given.
    pub fn unspecified() -> Self {
        Self::default()
    }

    pub fn global() -> Self {
        Self {
            scope: Some(Scope::Global),
            file_path: None,
        }
    }

    pub fn local() -> Self {
        Self {
            scope: Some(Scope::Local),
            file_path: None,
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            scope: Some(Scope::File),
            file_path: Some(path.into()),
        }
    }

    /// The scope this selector lands on:
    ///
    /// - an explicit scope always wins; a file path supplied alongside
    ///   `global` or `local` is ignored
    /// - a file path with no scope means `file`
    /// - nothing at all means `local`
    pub fn effective_scope(&self) -> Scope {
        match (self.scope, &self.file_path) {
            (Some(scope), _) => scope,
            (None, Some(_)) => Scope::File,
            (None, None) => Scope::Local,
        }
    }
}

/// Maps a [`ScopeSelector`] to a concrete configuration location.
///
/// Resolution is pure: the project root and the global directory are
/// captured at construction, and `resolve` performs no I/O and has no side
/// effects. The global directory can be overridden for tests.
#[derive(Debug, Clone)]
pub struct ScopeResolver {
    root: NormalizedPath,
    global_config_dir_override: Option<PathBuf>,
}

impl ScopeResolver {
    /// Create a resolver for the given project root.
    ///
    /// Uses the platform-appropriate global config directory:
    /// - Linux: `~/.config/profile-manager/`
    /// - macOS: `~/Library/Application Support/profile-manager/`
    /// - Windows: `%APPDATA%\profile-manager\`
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            global_config_dir_override: None,
        }
    }

    /// Create a resolver with a custom global config directory, so tests
    /// can control the global path without touching the real user config.
    pub fn with_global_config_dir(root: NormalizedPath, global_config_dir: PathBuf) -> Self {
        Self {
            root,
            global_config_dir_override: Some(global_config_dir),
        }
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join(GLOBAL_DIR))
    }

    /// Resolve a selector to the location of its configuration document.
    ///
    /// `file` scope requires a non-empty path and expands a leading `~`.
    pub fn resolve(&self, selector: &ScopeSelector) -> Result<NormalizedPath> {
        match selector.effective_scope() {
            Scope::Global => {
                let dir = self.global_config_dir().ok_or_else(|| {
                    Error::invalid_scope("no platform configuration directory available")
                })?;
                Ok(NormalizedPath::new(dir.join(CONFIG_FILE)))
            }
            Scope::Local => Ok(self.root.join(LOCAL_DIR).join(CONFIG_FILE)),
            Scope::File => {
                let path = selector
                    .file_path
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| {
                        Error::invalid_scope("file scope requires a configuration file path")
                    })?;
                Ok(expand_user(path))
            }
        }
    }

    /// The project root this resolver was built for.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }
}
