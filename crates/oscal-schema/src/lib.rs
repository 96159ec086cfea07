//! # oscal-schema: Validation & Reference Checking
//!
//! Batch validation of OSCAL documents and integrity checks over their
//! identifier graph. Every operation here is a pure function over an input
//! tree: no I/O beyond optional config loading, no shared state, safe to
//! run in parallel across documents.
//!
//! ## Validation (`validate`)
//!
//! [`DocumentValidator::validate_value`] takes an untyped JSON tree and
//! returns either a [`ValidatedDocument`] or a [`ValidationReport`] holding
//! every violation found (pattern, cardinality, structure, duplicate
//! identifier), each with its JSON Pointer path, the expected form, and the
//! actual value.
//!
//! ## Identifier Registry (`registry`)
//!
//! [`IdentifierRegistry`] is the per-document identifier table. Duplicates
//! are rejected eagerly at registration; references resolve lazily.
//!
//! ## Reference Checking (`references`)
//!
//! [`ReferenceChecker`] resolves every weak reference against the document
//! and any attached upstream documents, reporting dangling references,
//! references into unsupplied imports, and parameter dependency cycles.
//!
//! ## Crate Policy
//!
//! - Depends only on `oscal-core` and `oscal-model` internally.
//! - Validation never stops at the first violation.
//! - The embedded envelope schema's `$id` must not change without updating
//!   every consumer that references it.

pub mod config;
pub mod references;
pub mod registry;
pub mod validate;

pub use config::{validate_config, ConfigError, PatternPolicy, ReferencePolicy, ValidationConfig};
pub use references::{
    upstream_kinds, DanglingReference, DependencyCycle, ExternalReference, ReferenceChecker,
    ReferenceOutcome, ReferenceReport, ResolvedIn,
};
pub use registry::{IdentifierRegistry, Registration, RegistryError};
pub use validate::{
    DocumentValidator, SchemaValidationError, ValidatedDocument, ValidationReport, Violation,
    ViolationKind,
};
