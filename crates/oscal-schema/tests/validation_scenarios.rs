//! Integration test: end-to-end validation and reference-checking scenarios
//! on small hand-written documents.

use std::path::PathBuf;

use oscal_core::EntityKind;
use oscal_model::Document;
use oscal_schema::{
    DocumentValidator, ReferenceChecker, ReferenceOutcome, ResolvedIn, ViolationKind,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn repo_root() -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.pop(); // crates/
    dir.pop(); // repo root
    dir
}

fn metadata() -> Value {
    json!({
        "title": "Scenario",
        "last-modified": "2024-03-01T09:30:00-05:00",
        "version": "1.0",
        "oscal-version": "1.1.2"
    })
}

fn catalog_with(controls: Value, groups: Value) -> Value {
    json!({
        "catalog": {
            "uuid": "5a1c7b42-3e0d-4f7a-9b21-6c8d0e4f2a13",
            "metadata": metadata(),
            "controls": controls,
            "groups": groups
        }
    })
}

// ── Uniqueness ──────────────────────────────────────────────────────────

#[test]
fn test_duplicate_control_id_at_different_depths_names_both_paths() {
    let doc = catalog_with(
        json!([{"id": "ac-1", "title": "Top"}]),
        json!([{
            "id": "ac",
            "title": "Access Control",
            "controls": [{
                "id": "ac-2",
                "title": "Account Management",
                "controls": [{"id": "ac-1", "title": "Nested"}]
            }]
        }]),
    );
    let validator = DocumentValidator::new().unwrap();
    let report = validator.validate_value(&doc).unwrap_err();

    let duplicates: Vec<_> = report.of_kind(ViolationKind::DuplicateIdentifier).collect();
    assert_eq!(duplicates.len(), 1, "{report}");
    assert_eq!(report.len(), 1, "{report}");

    let v = duplicates[0];
    let text = format!("{} {}", v.path, v.actual);
    assert!(text.contains("/catalog/controls/0"), "{text}");
    assert!(text.contains("/catalog/groups/0/controls/0/controls/0"), "{text}");
    assert!(v.actual.contains("ac-1"));
}

#[test]
fn test_control_and_group_share_token_without_conflict() {
    let doc = catalog_with(
        json!([]),
        json!([{"id": "ac", "title": "Group", "controls": [{"id": "ac", "title": "Control"}]}]),
    );
    let validator = DocumentValidator::new().unwrap();
    assert!(validator.validate_value(&doc).is_ok());
}

// ── Patterns ────────────────────────────────────────────────────────────

#[test]
fn test_not_a_uuid_yields_exactly_one_pattern_violation() {
    let validator = DocumentValidator::new().unwrap();
    let mut doc = catalog_with(json!([]), json!([]));
    doc["catalog"]["uuid"] = json!("not-a-uuid");

    let report = validator.validate_value(&doc).unwrap_err();
    assert_eq!(report.len(), 1, "{report}");
    let v = &report.violations()[0];
    assert_eq!(v.path, "/catalog/uuid");
    assert_eq!(v.kind, ViolationKind::PatternViolation);
    assert_eq!(v.actual, "\"not-a-uuid\"");
}

#[test]
fn test_valid_v4_uuid_yields_no_violation() {
    let validator = DocumentValidator::new().unwrap();
    let mut doc = catalog_with(json!([]), json!([]));
    doc["catalog"]["uuid"] = json!("123e4567-e89b-42d3-a456-426614174000");
    assert!(validator.validate_value(&doc).is_ok());
}

#[test]
fn test_leap_day_only_in_leap_years() {
    let validator = DocumentValidator::new().unwrap();
    let mut doc = catalog_with(json!([]), json!([]));

    doc["catalog"]["metadata"]["last-modified"] = json!("2024-02-29T00:00:00Z");
    assert!(validator.validate_value(&doc).is_ok());

    doc["catalog"]["metadata"]["last-modified"] = json!("2023-02-29T00:00:00Z");
    let report = validator.validate_value(&doc).unwrap_err();
    assert_eq!(report.len(), 1);
    assert_eq!(report.violations()[0].path, "/catalog/metadata/last-modified");
}

#[test]
fn test_empty_control_id_is_cardinality_only() {
    let validator = DocumentValidator::new().unwrap();
    let doc = catalog_with(json!([{"id": "", "title": "No id"}]), json!([]));
    let report = validator.validate_value(&doc).unwrap_err();
    assert_eq!(report.len(), 1, "{report}");
    assert_eq!(report.violations()[0].path, "/catalog/controls/0/id");
    assert_eq!(report.violations()[0].kind, ViolationKind::CardinalityViolation);
}

#[test]
fn test_missing_metadata_reports_every_required_field() {
    let validator = DocumentValidator::new().unwrap();
    let doc = json!({"catalog": {"uuid": "5a1c7b42-3e0d-4f7a-9b21-6c8d0e4f2a13"}});
    let report = validator.validate_value(&doc).unwrap_err();
    let paths: Vec<&str> = report
        .of_kind(ViolationKind::CardinalityViolation)
        .map(|v| v.path.as_str())
        .collect();
    assert!(paths.contains(&"/catalog/metadata"));
    assert!(paths.contains(&"/catalog/metadata/title"));
    assert!(paths.contains(&"/catalog/metadata/oscal-version"));
}

#[test]
fn test_schema_key_is_accepted() {
    let validator = DocumentValidator::new().unwrap();
    let mut doc = catalog_with(json!([]), json!([]));
    doc["$schema"] = json!("https://example.org/oscal_catalog_schema.json");
    assert!(validator.validate_value(&doc).is_ok());
}

// ── References ──────────────────────────────────────────────────────────

#[test]
fn test_profile_alteration_against_catalog_without_control_dangles() {
    let catalog = Document::from_value(catalog_with(
        json!([{"id": "ac-2", "title": "Account Management"}]),
        json!([]),
    ))
    .unwrap();
    let profile = Document::from_value(json!({
        "profile": {
            "uuid": "6b2d8c53-4f1e-4a8b-8c32-7d9e1f5a3b24",
            "metadata": metadata(),
            "imports": [{"href": "catalog.json", "include-all": {}}],
            "modify": {
                "alters": [
                    {"control-id": "ac-1", "adds": [{"position": "ending", "title": "Extra"}]},
                    {"control-id": "ac-2"}
                ]
            }
        }
    }))
    .unwrap();

    let report = ReferenceChecker::new()
        .with_import("catalog.json", &catalog)
        .check(&profile);

    let dangling: Vec<_> = report.dangling().collect();
    assert_eq!(dangling.len(), 1, "{report}");
    assert_eq!(dangling[0].path, "/profile/modify/alters/0/control-id");
    assert_eq!(dangling[0].kind, EntityKind::Control);
    assert_eq!(dangling[0].target, "ac-1");

    // Checking continued past the dangling alteration.
    assert!(matches!(
        report.outcome_at("/profile/modify/alters/1/control-id"),
        Some(ReferenceOutcome::Resolved { resolved_in: ResolvedIn::Import(href), .. })
            if href == "catalog.json"
    ));
}

fn load_results() -> Value {
    let path = repo_root().join("fixtures").join("assessment-results.json");
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_finding_with_unknown_observation_dangles() {
    let mut value = load_results();
    value["assessment-results"]["results"][0]["findings"][0]["related-observations"][0]
        ["observation-uuid"] = json!("0f1e2d3c-4b5a-4978-8695-a4b3c2d1e0f9");
    let doc = Document::from_value(value).unwrap();

    let report = ReferenceChecker::new().check(&doc);
    let dangling: Vec<_> = report.dangling().collect();
    assert_eq!(dangling.len(), 1, "{report}");
    assert_eq!(
        dangling[0].path,
        "/assessment-results/results/0/findings/0/related-observations/0/observation-uuid"
    );
    assert_eq!(dangling[0].kind, EntityKind::Observation);
}

#[test]
fn test_finding_observation_resolves_to_unique_instance() {
    let doc = Document::from_value(load_results()).unwrap();
    let report = ReferenceChecker::new().check(&doc);
    assert!(report.is_clean(), "{report}");

    match report
        .outcome_at("/assessment-results/results/0/findings/1/related-observations/0/observation-uuid")
    {
        Some(ReferenceOutcome::Resolved { target_path, resolved_in, .. }) => {
            assert_eq!(target_path, "/assessment-results/results/0/observations/1");
            assert_eq!(*resolved_in, ResolvedIn::Local);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn test_reference_to_wrong_kind_dangles() {
    // A risk uuid used where an observation is expected.
    let mut value = load_results();
    value["assessment-results"]["results"][0]["findings"][0]["related-observations"][0]
        ["observation-uuid"] = json!("8293a4b5-c6d7-4e8f-99a0-1a2b3c4d5e6f");
    let doc = Document::from_value(value).unwrap();
    let report = ReferenceChecker::new().check(&doc);
    assert_eq!(report.dangling().count(), 1, "{report}");
}

fn load_fixture(name: &str) -> Document {
    let path = repo_root().join("fixtures").join(name);
    Document::from_json_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// A checker with the assessment-results import chain attached.
fn checker_with_results_chain() -> ReferenceChecker {
    [
        "assessment-plan.json",
        "system-security-plan.json",
        "profile.json",
        "catalog.json",
    ]
    .iter()
    .fold(ReferenceChecker::new(), |checker, name| {
        checker.with_import(*name, &load_fixture(name))
    })
}

#[test]
fn test_finding_target_resolves_in_catalog() {
    let doc = Document::from_value(load_results()).unwrap();
    let report = checker_with_results_chain().check(&doc);
    assert!(report.is_clean(), "{report}");
    assert!(matches!(
        report.outcome_at("/assessment-results/results/0/findings/1/target/target-id"),
        Some(ReferenceOutcome::Resolved { resolved_in: ResolvedIn::Import(href), .. })
            if href == "catalog.json"
    ));
}

#[test]
fn test_unknown_finding_target_dangles_with_full_chain() {
    let mut value = load_results();
    value["assessment-results"]["results"][0]["findings"][0]["target"]["target-id"] =
        json!("zz-99_obj");
    let doc = Document::from_value(value).unwrap();

    let report = checker_with_results_chain().check(&doc);
    let dangling: Vec<_> = report.dangling().collect();
    assert_eq!(dangling.len(), 1, "{report}");
    assert_eq!(
        dangling[0].path,
        "/assessment-results/results/0/findings/0/target/target-id"
    );
    assert_eq!(dangling[0].kind, EntityKind::Objective);
    assert_eq!(dangling[0].target, "zz-99_obj");
}

#[test]
fn test_duplicate_mitigating_factor_uuid_is_reported() {
    let mut value = load_results();
    let risk = &mut value["assessment-results"]["results"][0]["risks"][0];
    let factor = risk["mitigating-factors"][0].clone();
    let uuid = factor["uuid"].as_str().unwrap().to_string();
    risk["mitigating-factors"].as_array_mut().unwrap().push(factor);

    let report = DocumentValidator::new()
        .unwrap()
        .validate_value(&value)
        .unwrap_err();
    let duplicates: Vec<_> = report.of_kind(ViolationKind::DuplicateIdentifier).collect();
    assert_eq!(duplicates.len(), 1, "{report}");
    assert_eq!(
        duplicates[0].path,
        "/assessment-results/results/0/risks/0/mitigating-factors/1"
    );
    assert!(duplicates[0].actual.contains(&uuid));
}

#[test]
fn test_step_uuid_shared_with_activity_is_reported() {
    let path = repo_root().join("fixtures").join("assessment-plan.json");
    let mut value: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let activity = &mut value["assessment-plan"]["local-definitions"]["activities"][0];
    activity["steps"][0]["uuid"] = activity["uuid"].clone();

    let report = DocumentValidator::new()
        .unwrap()
        .validate_value(&value)
        .unwrap_err();
    assert_eq!(report.of_kind(ViolationKind::DuplicateIdentifier).count(), 1, "{report}");
}

// ── Idempotence ─────────────────────────────────────────────────────────

fn control_id() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-c]{2}-[1-3]",
        Just(String::new()),
        Just("1bad".to_string()),
        Just(" ac-1".to_string()),
    ]
}

fn uuid_like() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("5a1c7b42-3e0d-4f7a-9b21-6c8d0e4f2a13".to_string()),
        "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
        "[a-z -]{0,12}",
    ]
}

proptest! {
    #[test]
    fn prop_validation_is_idempotent(
        uuid in uuid_like(),
        ids in proptest::collection::vec(control_id(), 0..8),
        stamp in "[0-9T:Z-]{0,24}",
    ) {
        let controls: Vec<Value> = ids
            .iter()
            .map(|id| json!({"id": id, "title": "C"}))
            .collect();
        let mut doc = catalog_with(json!(controls), json!([]));
        doc["catalog"]["uuid"] = json!(uuid);
        doc["catalog"]["metadata"]["last-modified"] = json!(stamp);

        let validator = DocumentValidator::new().unwrap();
        let first = validator.validate_value(&doc).map(|v| v.document().clone());
        let second = validator.validate_value(&doc).map(|v| v.document().clone());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_one_duplicate_per_repeated_id(
        ids in proptest::collection::vec("[a-b]{2}-[1-2]", 1..10),
    ) {
        let controls: Vec<Value> = ids
            .iter()
            .map(|id| json!({"id": id, "title": "C"}))
            .collect();
        let doc = catalog_with(json!(controls), json!([]));
        let distinct: std::collections::BTreeSet<&String> = ids.iter().collect();

        let validator = DocumentValidator::new().unwrap();
        let expected = ids.len() - distinct.len();
        match validator.validate_value(&doc) {
            Ok(_) => prop_assert_eq!(expected, 0),
            Err(report) => {
                prop_assert_eq!(report.len(), expected);
                prop_assert_eq!(
                    report.of_kind(ViolationKind::DuplicateIdentifier).count(),
                    expected
                );
            }
        }
    }
}
