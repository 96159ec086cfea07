//! # Identifier Registry
//!
//! One registry per document instance. UUID-keyed entities share a single
//! namespace; token-keyed entities have one namespace per [`EntityKind`],
//! so a control and a part may both be called `ac-1`.
//!
//! Registration is eager: a duplicate is rejected at the moment it is
//! registered and the first registration stays in place. Resolution is
//! lazy: references are looked up only when someone asks.

use std::collections::BTreeMap;

use oscal_core::{parent_path, EntityKind, IdentifierSpace, Visitor, Walk};
use oscal_model::Document;
use serde::Serialize;
use thiserror::Error;

/// Where an identifier was defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// The kind the entity was registered as.
    pub kind: EntityKind,
    /// JSON Pointer of the defining entity (not of its id field).
    pub path: String,
}

/// Errors raised by registration and resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The identifier is already registered in this scope.
    #[error("duplicate {kind} identifier {id:?}: defined at {first_path} and again at {second_path}")]
    DuplicateIdentifier {
        kind: EntityKind,
        id: String,
        /// The registration that was kept.
        first_path: String,
        /// The registration that was rejected.
        second_path: String,
    },

    /// No entity of an acceptable kind has this identifier.
    #[error("unresolved {kind} reference {id:?}")]
    UnresolvedReference { kind: EntityKind, id: String },

    /// A kind was registered through the wrong identifier space.
    #[error("{kind} identifiers live in the {expected:?} space")]
    WrongSpace {
        kind: EntityKind,
        expected: IdentifierSpace,
    },
}

/// Identifier table for one document.
#[derive(Debug, Clone, Default)]
pub struct IdentifierRegistry {
    uuids: BTreeMap<String, Registration>,
    tokens: BTreeMap<(EntityKind, String), Registration>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a UUID-space entity.
    ///
    /// # Errors
    ///
    /// `DuplicateIdentifier` if the UUID is already registered under any
    /// UUID-space kind. The existing registration is unaffected.
    pub fn register_uuid(
        &mut self,
        kind: EntityKind,
        uuid: &str,
        entity_path: &str,
    ) -> Result<(), RegistryError> {
        if kind.space() != IdentifierSpace::Uuid {
            return Err(RegistryError::WrongSpace {
                kind,
                expected: kind.space(),
            });
        }
        // UUIDs are compared case-insensitively.
        let key = uuid.to_ascii_lowercase();
        if let Some(existing) = self.uuids.get(&key) {
            return Err(RegistryError::DuplicateIdentifier {
                kind,
                id: uuid.to_string(),
                first_path: existing.path.clone(),
                second_path: entity_path.to_string(),
            });
        }
        self.uuids.insert(
            key,
            Registration {
                kind,
                path: entity_path.to_string(),
            },
        );
        Ok(())
    }

    /// Register a token-space entity.
    ///
    /// # Errors
    ///
    /// `DuplicateIdentifier` if the token is already registered for `kind`.
    pub fn register_token(
        &mut self,
        kind: EntityKind,
        token: &str,
        entity_path: &str,
    ) -> Result<(), RegistryError> {
        if kind.space() != IdentifierSpace::Token {
            return Err(RegistryError::WrongSpace {
                kind,
                expected: kind.space(),
            });
        }
        let key = (kind, token.to_string());
        if let Some(existing) = self.tokens.get(&key) {
            return Err(RegistryError::DuplicateIdentifier {
                kind,
                id: token.to_string(),
                first_path: existing.path.clone(),
                second_path: entity_path.to_string(),
            });
        }
        self.tokens.insert(
            key,
            Registration {
                kind,
                path: entity_path.to_string(),
            },
        );
        Ok(())
    }

    /// Register through whichever space `kind` lives in.
    pub fn register(
        &mut self,
        kind: EntityKind,
        id: &str,
        entity_path: &str,
    ) -> Result<(), RegistryError> {
        match kind.space() {
            IdentifierSpace::Uuid => self.register_uuid(kind, id, entity_path),
            IdentifierSpace::Token => self.register_token(kind, id, entity_path),
        }
    }

    /// Look up the entity a reference of `kind` points at.
    ///
    /// Polymorphic kinds accept any registered kind they cover; a
    /// registered entity of a kind the reference does not accept does not
    /// resolve it.
    ///
    /// # Errors
    ///
    /// `UnresolvedReference` if nothing acceptable is registered under `id`.
    pub fn resolve(&self, kind: EntityKind, id: &str) -> Result<&Registration, RegistryError> {
        let found = match kind.space() {
            IdentifierSpace::Uuid => self
                .uuids
                .get(&id.to_ascii_lowercase())
                .filter(|r| kind.accepts(r.kind)),
            IdentifierSpace::Token => self
                .tokens
                .get(&(kind, id.to_string()))
                .or_else(|| self.resolve_token_fallback(kind, id)),
        };
        found.ok_or_else(|| RegistryError::UnresolvedReference {
            kind,
            id: id.to_string(),
        })
    }

    // Objective references also match part ids.
    fn resolve_token_fallback(&self, kind: EntityKind, id: &str) -> Option<&Registration> {
        self.tokens
            .iter()
            .find(|((k, t), _)| *k != kind && kind.accepts(*k) && t == id)
            .map(|(_, r)| r)
    }

    /// Returns true if `resolve` would succeed.
    pub fn contains(&self, kind: EntityKind, id: &str) -> bool {
        self.resolve(kind, id).is_ok()
    }

    /// Number of registered identifiers across both spaces.
    pub fn len(&self) -> usize {
        self.uuids.len() + self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every registration, UUIDs first, each group in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Registration)> {
        self.uuids
            .iter()
            .map(|(id, r)| (id.as_str(), r))
            .chain(self.tokens.iter().map(|((_, id), r)| (id.as_str(), r)))
    }

    /// Register every definition in `doc`.
    ///
    /// Returns the registry together with one `DuplicateIdentifier` per
    /// rejected registration, in document order. Empty identifiers are
    /// skipped; a missing id is a cardinality problem, not a duplicate.
    pub fn build(doc: &Document) -> (Self, Vec<RegistryError>) {
        let mut builder = Builder::default();
        doc.walk("", &mut builder);
        tracing::debug!(
            kind = %doc.kind(),
            registered = builder.registry.len(),
            duplicates = builder.errors.len(),
            "built identifier registry"
        );
        (builder.registry, builder.errors)
    }
}

#[derive(Default)]
struct Builder {
    registry: IdentifierRegistry,
    errors: Vec<RegistryError>,
}

impl Visitor for Builder {
    fn visit_definition(&mut self, path: &str, kind: EntityKind, id: &str) {
        if id.is_empty() {
            return;
        }
        if let Err(err) = self.registry.register(kind, id, parent_path(path)) {
            tracing::warn!(%err, "identifier rejected");
            self.errors.push(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UUID_A: &str = "123e4567-e89b-42d3-a456-426614174000";

    #[test]
    fn test_uuid_duplicate_across_kinds() {
        let mut reg = IdentifierRegistry::new();
        reg.register_uuid(EntityKind::Party, UUID_A, "/m/parties/0").unwrap();
        let err = reg
            .register_uuid(EntityKind::Component, UUID_A, "/s/components/0")
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateIdentifier {
                kind: EntityKind::Component,
                id: UUID_A.to_string(),
                first_path: "/m/parties/0".to_string(),
                second_path: "/s/components/0".to_string(),
            }
        );
        // Original registration survives.
        assert_eq!(reg.resolve(EntityKind::Party, UUID_A).unwrap().path, "/m/parties/0");
    }

    #[test]
    fn test_uuid_case_insensitive() {
        let mut reg = IdentifierRegistry::new();
        reg.register_uuid(EntityKind::Party, UUID_A, "/p").unwrap();
        assert!(reg.contains(EntityKind::Party, &UUID_A.to_ascii_uppercase()));
    }

    #[test]
    fn test_token_kinds_are_independent() {
        let mut reg = IdentifierRegistry::new();
        reg.register_token(EntityKind::Control, "ac-1", "/c").unwrap();
        reg.register_token(EntityKind::Part, "ac-1", "/p").unwrap();
        reg.register_token(EntityKind::Group, "ac-1", "/g").unwrap();
        assert!(reg.register_token(EntityKind::Control, "ac-1", "/c2").is_err());
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_wrong_space_rejected() {
        let mut reg = IdentifierRegistry::new();
        assert!(matches!(
            reg.register_token(EntityKind::Party, "x", "/p"),
            Err(RegistryError::WrongSpace { .. })
        ));
        assert!(matches!(
            reg.register_uuid(EntityKind::Control, UUID_A, "/c"),
            Err(RegistryError::WrongSpace { .. })
        ));
    }

    #[test]
    fn test_resolve_respects_kind() {
        let mut reg = IdentifierRegistry::new();
        reg.register_uuid(EntityKind::Observation, UUID_A, "/o").unwrap();
        assert!(reg.contains(EntityKind::Observation, UUID_A));
        assert_eq!(
            reg.resolve(EntityKind::Risk, UUID_A).unwrap_err(),
            RegistryError::UnresolvedReference {
                kind: EntityKind::Risk,
                id: UUID_A.to_string()
            }
        );
    }

    #[test]
    fn test_polymorphic_resolution() {
        let mut reg = IdentifierRegistry::new();
        reg.register_uuid(EntityKind::Component, UUID_A, "/c").unwrap();
        assert!(reg.contains(EntityKind::Subject, UUID_A));
        assert!(reg.contains(EntityKind::Actor, UUID_A));

        let mut reg = IdentifierRegistry::new();
        reg.register_uuid(EntityKind::Observation, UUID_A, "/o").unwrap();
        assert!(!reg.contains(EntityKind::Subject, UUID_A));
    }

    #[test]
    fn test_objective_resolves_against_parts() {
        let mut reg = IdentifierRegistry::new();
        reg.register_token(EntityKind::Part, "ac-1_obj", "/p").unwrap();
        assert!(reg.contains(EntityKind::Objective, "ac-1_obj"));
        assert!(!reg.contains(EntityKind::Control, "ac-1_obj"));
    }

    #[test]
    fn test_build_skips_empty_ids() {
        let doc = Document::from_json_str(
            r#"{"catalog": {"controls": [{"title": "a"}, {"title": "b"}]}}"#,
        )
        .unwrap();
        let (reg, errors) = IdentifierRegistry::build(&doc);
        assert!(errors.is_empty());
        assert!(reg.is_empty());
    }
}
