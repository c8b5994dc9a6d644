//! Profile type metadata for Profile Manager
//!
//! A profile type is described declaratively by a [`ProfileSpec`]: an
//! ordered list of typed fields plus two extension points (a business-rule
//! validator and a default-value generator). The [`ProfileRegistry`] is the
//! process-wide catalog of specs; adding a new profile type means
//! registering a spec, never touching the engine.

pub mod builtin;
pub mod field;
pub mod registry;
pub mod spec;

pub use field::{FieldKind, FieldMap, FieldSpec};
pub use registry::ProfileRegistry;
pub use spec::{DefaultGenerator, ProfileSpec, Validator};
