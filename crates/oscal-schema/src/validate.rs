//! # Document Validation
//!
//! Batch validation of OSCAL documents. Nothing here stops at the first
//! problem: every pass runs, every violation is collected, and the caller
//! gets the complete list in one report.
//!
//! ## Passes
//!
//! 1. **Envelope.** The raw tree is checked against the embedded
//!    `oscal-document.schema.json` (Draft 2020-12): exactly one known root,
//!    root `uuid` and `metadata`, and the four required metadata fields.
//! 2. **Decode.** The tree is decoded into a typed [`Document`]. Records
//!    default their missing fields, so only a wrong JSON type or a bad
//!    envelope fails here.
//! 3. **Fields.** One walk over the typed tree checks every constrained
//!    string against its [`FieldClass`] and every required field for
//!    presence.
//! 4. **Uniqueness.** The [`IdentifierRegistry`] is built; each rejected
//!    registration is a `DuplicateIdentifier`.
//!
//! ## Report Order
//!
//! Violations are sorted by path, then kind, and at most one violation of
//! each kind is kept per path. A missing required field reported by both
//! the envelope schema and the field pass therefore appears once, and
//! validating the same document twice yields the same report.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use jsonschema::error::ValidationErrorKind;
use jsonschema::Validator;
use oscal_core::{EntityKind, FieldClass, HrefRole, Visitor, Walk};
use oscal_model::Document;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::{PatternPolicy, ValidationConfig};
use crate::registry::{IdentifierRegistry, RegistryError};

/// The envelope schema, embedded at compile time.
const ENVELOPE_SCHEMA: &str = include_str!("../schemas/oscal-document.schema.json");
const ENVELOPE_SCHEMA_NAME: &str = "oscal-document.schema.json";

/// Longest value excerpt quoted in a violation.
const MAX_ACTUAL_LEN: usize = 120;

/// Error constructing a [`DocumentValidator`].
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The embedded schema is not valid JSON.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoadError { schema_name: String, reason: String },

    /// The schema could not be compiled.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError { schema_name: String, reason: String },
}

/// The kind of a field-level violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// The tree does not have the shape of an OSCAL document.
    StructuralViolation,
    /// A required field is missing or empty.
    CardinalityViolation,
    /// A value does not match the pattern of its field class.
    PatternViolation,
    /// An identifier is defined twice in its scope.
    DuplicateIdentifier,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuralViolation => "structural-violation",
            Self::CardinalityViolation => "cardinality-violation",
            Self::PatternViolation => "pattern-violation",
            Self::DuplicateIdentifier => "duplicate-identifier",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation violation.
///
/// Field order is the report sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Violation {
    /// JSON Pointer to the offending field. Empty for the document root.
    pub path: String,
    pub kind: ViolationKind,
    /// What the field should hold.
    pub expected: String,
    /// What it holds, quoted or summarized.
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "(root)" } else { &self.path };
        write!(
            f,
            "  {path}: {}: expected {}, found {}",
            self.kind, self.expected, self.actual
        )
    }
}

/// Every violation found in one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
    /// Collection stopped at the configured cap.
    truncated: bool,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} violation(s)", self.violations.len())?;
        if self.truncated {
            f.write_str(" (truncated)")?;
        }
        f.write_str(":")?;
        for v in &self.violations {
            write!(f, "\n{v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

impl ValidationReport {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// All violations, sorted by path then kind.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations of one kind, in report order.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Violations at exactly `path`.
    pub fn at_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.path == path)
    }

    /// Returns true if collection stopped at the configured cap.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

/// A document that passed every validation pass.
#[derive(Debug, Clone)]
pub struct ValidatedDocument {
    document: Document,
    registry: IdentifierRegistry,
}

impl ValidatedDocument {
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The document's identifier table, free of duplicates.
    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    pub fn into_parts(self) -> (Document, IdentifierRegistry) {
        (self.document, self.registry)
    }
}

/// Validates raw and typed OSCAL documents.
///
/// The envelope schema is compiled once at construction; a validator can
/// be shared across threads and reused for any number of documents.
pub struct DocumentValidator {
    envelope: Validator,
    config: ValidationConfig,
}

impl fmt::Debug for DocumentValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentValidator")
            .field("schema", &ENVELOPE_SCHEMA_NAME)
            .field("config", &self.config)
            .finish()
    }
}

impl DocumentValidator {
    /// A validator with the default (strictest) configuration.
    pub fn new() -> Result<Self, SchemaValidationError> {
        Self::with_config(ValidationConfig::default())
    }

    /// # Errors
    ///
    /// `SchemaLoadError` or `ValidatorBuildError` if the embedded schema is
    /// broken.
    pub fn with_config(config: ValidationConfig) -> Result<Self, SchemaValidationError> {
        let schema: Value = serde_json::from_str(ENVELOPE_SCHEMA).map_err(|e| {
            SchemaValidationError::SchemaLoadError {
                schema_name: ENVELOPE_SCHEMA_NAME.to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let envelope = opts.build(&schema).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: ENVELOPE_SCHEMA_NAME.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { envelope, config })
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a parsed JSON tree through all four passes.
    ///
    /// # Errors
    ///
    /// The full [`ValidationReport`] if any pass found a violation.
    pub fn validate_value(&self, value: &Value) -> Result<ValidatedDocument, ValidationReport> {
        let mut sink = Sink::new(self.config.max_violations);
        self.check_envelope(value, &mut sink);
        let envelope_failed = !sink.is_empty();

        let document = match Document::from_value(value.clone()) {
            Ok(document) => document,
            Err(err) => {
                // A broken envelope already explains the decode failure.
                if !envelope_failed {
                    sink.push(Violation {
                        path: String::new(),
                        kind: ViolationKind::StructuralViolation,
                        expected: "a decodable OSCAL document".to_string(),
                        actual: err.to_string(),
                    });
                }
                let report = sink.finish();
                tracing::debug!(violations = report.len(), "document failed to decode");
                return Err(report);
            }
        };

        let registry = self.check_document(&document, &mut sink);
        let report = sink.finish();
        tracing::debug!(
            kind = %document.kind(),
            violations = report.len(),
            truncated = report.is_truncated(),
            "validated document"
        );
        if report.is_empty() {
            Ok(ValidatedDocument { document, registry })
        } else {
            Err(report)
        }
    }

    /// Parse JSON text, then [`validate_value`](Self::validate_value).
    pub fn validate_json_str(&self, s: &str) -> Result<ValidatedDocument, ValidationReport> {
        match serde_json::from_str::<Value>(s) {
            Ok(value) => self.validate_value(&value),
            Err(e) => Err(ValidationReport {
                violations: vec![Violation {
                    path: String::new(),
                    kind: ViolationKind::StructuralViolation,
                    expected: "well-formed JSON".to_string(),
                    actual: e.to_string(),
                }],
                truncated: false,
            }),
        }
    }

    /// Run the field and uniqueness passes on an in-memory document.
    ///
    /// An empty report means the document is valid.
    pub fn validate_document(&self, document: &Document) -> ValidationReport {
        let mut sink = Sink::new(self.config.max_violations);
        self.check_document(document, &mut sink);
        sink.finish()
    }

    fn check_envelope(&self, value: &Value, sink: &mut Sink) {
        for err in self.envelope.iter_errors(value) {
            let instance_path = err.instance_path.to_string();
            let violation = match &err.kind {
                ValidationErrorKind::Required { property } => Violation {
                    path: format!("{instance_path}/{}", property.as_str().unwrap_or_default()),
                    kind: ViolationKind::CardinalityViolation,
                    expected: "a value".to_string(),
                    actual: "missing".to_string(),
                },
                _ => Violation {
                    path: instance_path,
                    kind: ViolationKind::StructuralViolation,
                    expected: format!("document shape per {}", err.schema_path),
                    actual: summarize(&err.instance),
                },
            };
            sink.push(violation);
        }
    }

    fn check_document(&self, document: &Document, sink: &mut Sink) -> IdentifierRegistry {
        let mut fields = FieldCheck {
            policy: &self.config.patterns,
            missing: HashSet::new(),
            sink: &mut *sink,
        };
        document.walk("", &mut fields);

        let (registry, duplicates) = IdentifierRegistry::build(document);
        for err in duplicates {
            if let RegistryError::DuplicateIdentifier {
                kind,
                id,
                first_path,
                second_path,
            } = err
            {
                sink.push(Violation {
                    path: second_path,
                    kind: ViolationKind::DuplicateIdentifier,
                    expected: format!("a {kind} identifier unique in this document"),
                    actual: format!("{id:?}, already defined at {first_path}"),
                });
            }
        }
        registry
    }
}

/// Collects violations up to an optional cap. A second violation of the
/// same kind at the same path is dropped before it counts against the cap.
struct Sink {
    cap: Option<usize>,
    seen: BTreeSet<(String, ViolationKind)>,
    violations: Vec<Violation>,
    truncated: bool,
}

impl Sink {
    fn new(cap: Option<usize>) -> Self {
        Self {
            cap,
            seen: BTreeSet::new(),
            violations: Vec::new(),
            truncated: false,
        }
    }

    fn push(&mut self, violation: Violation) {
        let key = (violation.path.clone(), violation.kind);
        if self.seen.contains(&key) {
            return;
        }
        if self.cap.is_some_and(|cap| self.violations.len() >= cap) {
            self.truncated = true;
            return;
        }
        self.seen.insert(key);
        self.violations.push(violation);
    }

    fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    fn finish(mut self) -> ValidationReport {
        self.violations.sort();
        ValidationReport {
            violations: self.violations,
            truncated: self.truncated,
        }
    }
}

/// The field pass: presence of required fields and pattern of every
/// constrained string.
struct FieldCheck<'a> {
    policy: &'a PatternPolicy,
    /// Required fields found empty. Their (empty) values are not
    /// additionally reported as pattern failures.
    missing: HashSet<String>,
    sink: &'a mut Sink,
}

impl FieldCheck<'_> {
    fn check(&mut self, path: &str, class: FieldClass, value: &str, expected: String) {
        if self.missing.contains(path) || !self.policy.enforces(class) {
            return;
        }
        if !class.matches(value) {
            self.sink.push(Violation {
                path: path.to_string(),
                kind: ViolationKind::PatternViolation,
                expected,
                actual: quote(value),
            });
        }
    }

    fn check_identifier(&mut self, path: &str, kind: EntityKind, id: &str) {
        let class = kind.space().field_class();
        self.check(path, class, id, format!("{} ({kind} identifier)", class.expected()));
    }
}

impl Visitor for FieldCheck<'_> {
    fn visit_value(&mut self, path: &str, class: FieldClass, value: &str) {
        self.check(path, class, value, class.expected().to_string());
    }

    fn visit_definition(&mut self, path: &str, kind: EntityKind, id: &str) {
        self.check_identifier(path, kind, id);
    }

    fn visit_reference(&mut self, path: &str, kind: EntityKind, id: &str) {
        self.check_identifier(path, kind, id);
    }

    fn visit_href(&mut self, path: &str, href: &str, _role: HrefRole) {
        self.check(
            path,
            FieldClass::NonBlank,
            href,
            "URI reference without surrounding whitespace".to_string(),
        );
    }

    fn visit_required(&mut self, path: &str, count: usize) {
        if count == 0 {
            self.missing.insert(path.to_string());
            self.sink.push(Violation {
                path: path.to_string(),
                kind: ViolationKind::CardinalityViolation,
                expected: "a value".to_string(),
                actual: "missing".to_string(),
            });
        }
    }
}

fn quote(value: &str) -> String {
    if value.chars().count() > MAX_ACTUAL_LEN {
        let head: String = value.chars().take(MAX_ACTUAL_LEN).collect();
        format!("{head:?}…")
    } else {
        format!("{value:?}")
    }
}

/// Short description of a JSON value for a report.
fn summarize(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        Value::Array(items) => format!("array of {} item(s)", items.len()),
        Value::String(s) => quote(s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_catalog() -> Value {
        json!({
            "catalog": {
                "uuid": "123e4567-e89b-42d3-a456-426614174000",
                "metadata": {
                    "title": "Test",
                    "last-modified": "2024-01-15T12:00:00Z",
                    "version": "1.0",
                    "oscal-version": "1.1.2"
                },
                "controls": [{"id": "ac-1", "title": "Policy"}]
            }
        })
    }

    #[test]
    fn test_embedded_schema_compiles() {
        assert!(DocumentValidator::new().is_ok());
    }

    #[test]
    fn test_minimal_catalog_is_valid() {
        let validator = DocumentValidator::new().unwrap();
        let validated = validator.validate_value(&minimal_catalog()).unwrap();
        assert!(validated.registry().contains(EntityKind::Control, "ac-1"));
    }

    #[test]
    fn test_missing_metadata_title_reported_once() {
        let validator = DocumentValidator::new().unwrap();
        let mut doc = minimal_catalog();
        doc["catalog"]["metadata"].as_object_mut().unwrap().remove("title");
        let report = validator.validate_value(&doc).unwrap_err();
        assert_eq!(report.len(), 1, "{report}");
        let v = &report.violations()[0];
        assert_eq!(v.path, "/catalog/metadata/title");
        assert_eq!(v.kind, ViolationKind::CardinalityViolation);
    }

    #[test]
    fn test_two_roots_is_structural() {
        let validator = DocumentValidator::new().unwrap();
        let mut doc = minimal_catalog();
        doc["profile"] = doc["catalog"].clone();
        let report = validator.validate_value(&doc).unwrap_err();
        assert!(report.of_kind(ViolationKind::StructuralViolation).count() >= 1);
        assert!(report.at_path("").count() >= 1);
    }

    #[test]
    fn test_wrong_json_type_is_structural() {
        let validator = DocumentValidator::new().unwrap();
        let mut doc = minimal_catalog();
        doc["catalog"]["controls"][0]["title"] = json!(7);
        let report = validator.validate_value(&doc).unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations()[0].kind, ViolationKind::StructuralViolation);
    }

    #[test]
    fn test_all_patterns_collected_in_one_pass() {
        let validator = DocumentValidator::new().unwrap();
        let mut doc = minimal_catalog();
        doc["catalog"]["metadata"]["last-modified"] = json!("2024-01-15 12:00");
        doc["catalog"]["metadata"]["version"] = json!(" 1.0");
        doc["catalog"]["controls"][0]["id"] = json!("1bad");
        let report = validator.validate_value(&doc).unwrap_err();
        let paths: Vec<&str> = report
            .of_kind(ViolationKind::PatternViolation)
            .map(|v| v.path.as_str())
            .collect();
        assert_eq!(
            paths,
            vec![
                "/catalog/controls/0/id",
                "/catalog/metadata/last-modified",
                "/catalog/metadata/version",
            ]
        );
    }

    #[test]
    fn test_timestamp_policy_toggle() {
        let mut config = ValidationConfig::default();
        config.patterns.check_timestamps = false;
        let validator = DocumentValidator::with_config(config).unwrap();
        let mut doc = minimal_catalog();
        doc["catalog"]["metadata"]["last-modified"] = json!("2024-01-15 12:00");
        assert!(validator.validate_value(&doc).is_ok());
    }

    #[test]
    fn test_violation_cap_truncates() {
        let config = ValidationConfig {
            max_violations: Some(1),
            ..ValidationConfig::default()
        };
        let validator = DocumentValidator::with_config(config).unwrap();
        let mut doc = minimal_catalog();
        doc["catalog"]["uuid"] = json!("nope");
        doc["catalog"]["controls"][0]["id"] = json!("1bad");
        let report = validator.validate_value(&doc).unwrap_err();
        assert_eq!(report.len(), 1);
        assert!(report.is_truncated());
    }

    #[test]
    fn test_repeated_violation_does_not_consume_cap() {
        let config = ValidationConfig {
            max_violations: Some(2),
            ..ValidationConfig::default()
        };
        let validator = DocumentValidator::with_config(config).unwrap();
        let mut doc = minimal_catalog();
        // Reported by both the envelope and the field pass.
        doc["catalog"]["metadata"].as_object_mut().unwrap().remove("title");
        doc["catalog"]["controls"][0]["id"] = json!("1bad");

        let report = validator.validate_value(&doc).unwrap_err();
        assert!(!report.is_truncated(), "{report}");
        let found: Vec<(&str, ViolationKind)> = report
            .violations()
            .iter()
            .map(|v| (v.path.as_str(), v.kind))
            .collect();
        assert_eq!(
            found,
            vec![
                ("/catalog/controls/0/id", ViolationKind::PatternViolation),
                ("/catalog/metadata/title", ViolationKind::CardinalityViolation),
            ]
        );
    }

    #[test]
    fn test_malformed_json_text() {
        let validator = DocumentValidator::new().unwrap();
        let report = validator.validate_json_str("{\"catalog\":").unwrap_err();
        assert_eq!(report.len(), 1);
        assert_eq!(report.violations()[0].path, "");
    }

    #[test]
    fn test_quote_truncates_long_values() {
        let long = "x".repeat(500);
        assert!(quote(&long).chars().count() < 200);
        assert_eq!(quote("ab"), "\"ab\"");
    }
}
