//! Configuration resolution and profile lifecycle engine
//!
//! This crate is the core of Profile Manager. It owns:
//!
//! - **ConfigDocument**: the persisted unit (`profiles`, `defaults`,
//!   `settings`) with deep-merge semantics
//! - **DocumentStore**: load/save with atomic replace-by-rename; a missing
//!   file reads as an empty document, a present-but-unparsable file is an
//!   error and is never discarded
//! - **ScopeResolver**: pure mapping from a scope selector (global, local,
//!   named file) to a concrete location
//! - **ConfigResolver**: effective-parameter merging (supplied over stored
//!   over built-in defaults) and the settings/import operations
//! - **ProfileManager**: generic CRUD + validation engine over profiles of
//!   one registered type
//!
//! # Architecture
//!
//! `profile-core` sits between the metadata layer and the CLI:
//!
//! ```text
//!        profile-cli
//!             |
//!       profile-core
//!        |         |
//!   profile-fs  profile-meta
//! ```
//!
//! One command invocation performs at most one load/mutate/persist cycle
//! against exactly one document. There is no cross-document state and no
//! in-process caching: every load re-reads from disk, so concurrent
//! hand-edits are observed on the next invocation.

pub mod document;
pub mod error;
pub mod manager;
pub mod resolver;
pub mod scope;
pub mod store;

pub use document::{ConfigDocument, Profile, ProfileTable};
pub use error::{Error, Result};
pub use manager::ProfileManager;
pub use resolver::{ConfigResolver, builtin_defaults};
pub use scope::{Scope, ScopeResolver, ScopeSelector};
pub use store::DocumentStore;
