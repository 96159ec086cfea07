//! # Document Envelope
//!
//! An OSCAL JSON document is an object with exactly one root key naming its
//! model. [`Document`] is that envelope as an externally tagged enum, so a
//! second root key or an unknown one fails decoding.
//!
//! All traversal of a whole document starts here: the root key becomes the
//! first JSON Pointer segment (`/catalog/...`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use oscal_core::{sha256_digest, CanonicalBytes, ContentDigest, OscalError, OscalUuid, Visitor, Walk};

use crate::assessment_plan::AssessmentPlan;
use crate::assessment_results::AssessmentResults;
use crate::catalog::Catalog;
use crate::component_definition::ComponentDefinition;
use crate::metadata::{BackMatter, Metadata};
use crate::poam::PlanOfActionAndMilestones;
use crate::profile::Profile;
use crate::ssp::SystemSecurityPlan;

/// Top-level key allowed alongside the root, pointing at a JSON Schema.
const SCHEMA_KEY: &str = "$schema";

/// The seven OSCAL document models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Catalog,
    Profile,
    ComponentDefinition,
    SystemSecurityPlan,
    AssessmentPlan,
    AssessmentResults,
    PlanOfActionAndMilestones,
}

impl DocumentKind {
    /// All kinds, in layer order.
    pub const ALL: [DocumentKind; 7] = [
        Self::Catalog,
        Self::Profile,
        Self::ComponentDefinition,
        Self::SystemSecurityPlan,
        Self::AssessmentPlan,
        Self::AssessmentResults,
        Self::PlanOfActionAndMilestones,
    ];

    /// The JSON root key for this kind.
    pub fn root_key(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Profile => "profile",
            Self::ComponentDefinition => "component-definition",
            Self::SystemSecurityPlan => "system-security-plan",
            Self::AssessmentPlan => "assessment-plan",
            Self::AssessmentResults => "assessment-results",
            Self::PlanOfActionAndMilestones => "plan-of-action-and-milestones",
        }
    }

    /// Inverse of [`DocumentKind::root_key`].
    pub fn from_root_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.root_key() == key)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.root_key())
    }
}

/// A complete OSCAL document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Document {
    Catalog(Catalog),
    Profile(Profile),
    ComponentDefinition(ComponentDefinition),
    SystemSecurityPlan(SystemSecurityPlan),
    AssessmentPlan(AssessmentPlan),
    AssessmentResults(AssessmentResults),
    PlanOfActionAndMilestones(PlanOfActionAndMilestones),
}

/// Dispatch an expression over the root of every variant.
macro_rules! each_root {
    ($doc:expr, $root:ident => $body:expr) => {
        match $doc {
            Document::Catalog($root) => $body,
            Document::Profile($root) => $body,
            Document::ComponentDefinition($root) => $body,
            Document::SystemSecurityPlan($root) => $body,
            Document::AssessmentPlan($root) => $body,
            Document::AssessmentResults($root) => $body,
            Document::PlanOfActionAndMilestones($root) => $body,
        }
    };
}

impl Document {
    /// Decode a parsed JSON tree. A top-level `$schema` key is ignored.
    pub fn from_value(value: Value) -> Result<Self, OscalError> {
        let value = match value {
            Value::Object(mut map) => {
                map.remove(SCHEMA_KEY);
                Value::Object(map)
            }
            other => other,
        };
        let doc: Document =
            serde_json::from_value(value).map_err(|e| OscalError::Serialization(e.to_string()))?;
        tracing::debug!(kind = %doc.kind(), uuid = %doc.uuid(), "decoded OSCAL document");
        Ok(doc)
    }

    /// Encode as a JSON tree with the root key.
    pub fn to_value(&self) -> Result<Value, OscalError> {
        serde_json::to_value(self).map_err(|e| OscalError::Serialization(e.to_string()))
    }

    /// Parse OSCAL JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, OscalError> {
        let value: Value =
            serde_json::from_str(s).map_err(|e| OscalError::Serialization(e.to_string()))?;
        Self::from_value(value)
    }

    /// Render pretty-printed OSCAL JSON.
    pub fn to_json_string(&self) -> Result<String, OscalError> {
        serde_json::to_string_pretty(self).map_err(|e| OscalError::Serialization(e.to_string()))
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Catalog(_) => DocumentKind::Catalog,
            Self::Profile(_) => DocumentKind::Profile,
            Self::ComponentDefinition(_) => DocumentKind::ComponentDefinition,
            Self::SystemSecurityPlan(_) => DocumentKind::SystemSecurityPlan,
            Self::AssessmentPlan(_) => DocumentKind::AssessmentPlan,
            Self::AssessmentResults(_) => DocumentKind::AssessmentResults,
            Self::PlanOfActionAndMilestones(_) => DocumentKind::PlanOfActionAndMilestones,
        }
    }

    /// The document-scoped UUID of the root.
    pub fn uuid(&self) -> &OscalUuid {
        each_root!(self, root => &root.uuid)
    }

    pub fn metadata(&self) -> &Metadata {
        each_root!(self, root => &root.metadata)
    }

    pub fn back_matter(&self) -> Option<&BackMatter> {
        each_root!(self, root => root.back_matter.as_ref())
    }

    /// SHA-256 over the RFC 8785 canonical form.
    ///
    /// Two documents have the same digest exactly when they have the same
    /// content: object key order is irrelevant, sequence order is not.
    pub fn digest(&self) -> Result<ContentDigest, OscalError> {
        let canonical = CanonicalBytes::new(self)?;
        Ok(sha256_digest(&canonical))
    }

    /// The JSON Pointer of the root object, e.g. `/catalog`.
    pub fn root_path(&self) -> String {
        format!("/{}", self.kind().root_key())
    }
}

impl Walk for Document {
    fn walk<V: Visitor + ?Sized>(&self, _path: &str, visitor: &mut V) {
        let root = self.root_path();
        each_root!(self, inner => inner.walk(&root, visitor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "catalog": {
            "uuid": "123e4567-e89b-42d3-a456-426614174000",
            "metadata": {
                "title": "Test",
                "last-modified": "2024-01-15T12:00:00Z",
                "version": "1.0",
                "oscal-version": "1.1.2"
            }
        }
    }"#;

    #[test]
    fn test_kind_root_keys_round_trip() {
        for kind in DocumentKind::ALL {
            assert_eq!(DocumentKind::from_root_key(kind.root_key()), Some(kind));
        }
        assert_eq!(DocumentKind::from_root_key("mapping-collection"), None);
    }

    #[test]
    fn test_parse_minimal_catalog() {
        let doc = Document::from_json_str(MINIMAL).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Catalog);
        assert_eq!(doc.uuid().as_str(), "123e4567-e89b-42d3-a456-426614174000");
        assert_eq!(doc.metadata().title, "Test");
        assert!(doc.back_matter().is_none());
        assert_eq!(doc.root_path(), "/catalog");
    }

    #[test]
    fn test_schema_key_is_ignored() {
        let mut value: Value = serde_json::from_str(MINIMAL).unwrap();
        value["$schema"] = Value::String("https://example.org/oscal.json".into());
        assert!(Document::from_value(value).is_ok());
    }

    #[test]
    fn test_two_roots_rejected() {
        let mut value: Value = serde_json::from_str(MINIMAL).unwrap();
        value["profile"] = value["catalog"].clone();
        assert!(matches!(
            Document::from_value(value),
            Err(OscalError::Serialization(_))
        ));
    }

    #[test]
    fn test_unknown_root_rejected() {
        let err = Document::from_json_str(r#"{"mapping-collection": {}}"#).unwrap_err();
        assert!(matches!(err, OscalError::Serialization(_)));
    }

    #[test]
    fn test_to_value_keeps_root_key() {
        let doc = Document::from_json_str(MINIMAL).unwrap();
        let value = doc.to_value().unwrap();
        assert!(value.get("catalog").is_some());
        assert_eq!(value["catalog"]["metadata"]["oscal-version"], "1.1.2");
    }

    #[test]
    fn test_walk_paths_start_at_root_key() {
        struct Paths(Vec<String>);
        impl Visitor for Paths {
            fn visit_required(&mut self, path: &str, _count: usize) {
                self.0.push(path.to_string());
            }
        }
        let doc = Document::from_json_str(MINIMAL).unwrap();
        let mut v = Paths(Vec::new());
        doc.walk("", &mut v);
        assert!(v.0.contains(&"/catalog/uuid".to_string()));
        assert!(v.0.contains(&"/catalog/metadata/title".to_string()));
    }
}
