//! Loading and saving configuration documents

use profile_fs::{ConfigStore, NormalizedPath};

use crate::document::ConfigDocument;
use crate::error::{Error, Result};

/// Document-level store on top of the format-agnostic file store.
///
/// Two rules distinguish it from a plain file read:
///
/// - a path with no file behind it reads as an empty default document, so
///   first use needs no init step
/// - a file that exists but does not parse is a hard error; user data is
///   never silently discarded or regenerated
///
/// There is no caching: every `load` re-reads from disk so external edits
/// are observed on the next invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentStore {
    store: ConfigStore,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the document at `path`.
    pub fn load(&self, path: &NormalizedPath) -> Result<ConfigDocument> {
        if !path.is_file() {
            tracing::debug!(%path, "no document on disk, starting from empty");
            return Ok(ConfigDocument::default());
        }

        self.store.load(path).map_err(|e| match e {
            profile_fs::Error::ConfigParse { path, message, .. } => {
                Error::CorruptConfig { path, message }
            }
            other => Error::Fs(other),
        })
    }

    /// Persist the document at `path` atomically.
    pub fn save(&self, path: &NormalizedPath, document: &ConfigDocument) -> Result<()> {
        self.store.save(path, document)?;
        tracing::debug!(%path, "document saved");
        Ok(())
    }
}
