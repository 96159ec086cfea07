//! # oscal-core: Foundational Types for the OSCAL Document Model
//!
//! This crate is the leaf of the workspace DAG. It defines the primitives
//! every OSCAL model type is built from, and the traversal contract the
//! validator, the identifier registry, and the reference checker share.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for constrained strings.** `OscalUuid`, `Token`,
//!    `DateTimeWithTimezone`, `NonBlank`, `Email`, `UriRef`. A document can
//!    hold a malformed value in memory; the pattern is checked by
//!    [`FieldClass::matches`] so validation reports every failure at once
//!    instead of deserialization stopping at the first one.
//!
//! 2. **Two disjoint identifier spaces.** UUID-keyed entities (parties,
//!    components, observations, …) and document-scoped token entities
//!    (controls, parts, parameters, roles). [`EntityKind::space`] classifies
//!    every referencable kind, so a UUID reference can never be looked up
//!    among tokens.
//!
//! 3. **Typed weak references.** [`Id<K>`] defines an entity of kind `K`;
//!    [`Ref<K>`] points at one. Both are plain strings on the wire and are
//!    resolved lazily through a registry, never by pointer.
//!
//! 4. **One traversal.** Every model type implements [`Walk`]; validation,
//!    registry construction, and reference collection are [`Visitor`]s over
//!    the same walk with JSON-Pointer paths.
//!
//! 5. **`CanonicalBytes` newtype.** Document digests flow through
//!    `CanonicalBytes::new()` (RFC 8785) so structural equality is
//!    independent of key order.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `oscal-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

#[macro_use]
mod macros;

pub mod canonical;
pub mod datatypes;
pub mod digest;
pub mod error;
pub mod identity;
pub mod patterns;
pub mod reference;
pub mod temporal;
pub mod walk;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use datatypes::{Email, Href, ImportHref, NonBlank, UriRef};
pub use digest::{sha256_digest, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, OscalError};
pub use identity::{OscalUuid, Token};
pub use patterns::FieldClass;
pub use reference::{kind, EntityKind, Id, IdentifierSpace, Kind, Ref};
pub use temporal::{DateTimeWithTimezone, DateWithTimezone};
pub use walk::{child_path, parent_path, Cardinality, HrefRole, Visitor, Walk};
