//! # Reference Checking
//!
//! Confirms that every weak reference in a document names an existing
//! entity of an acceptable kind. References are resolved against the
//! document's own [`IdentifierRegistry`] first, then against the registries
//! of any upstream documents attached with [`ReferenceChecker::with_import`].
//!
//! A reference that fails to resolve is not always an error. A profile
//! naming control `ac-1` cannot be judged without its catalog, so when the
//! target kind normally lives upstream and the import chain was not
//! supplied in full, the outcome is [`ReferenceOutcome::External`] instead
//! of a dangling reference.
//!
//! Dangling references are reportable, never fatal: a document under
//! authoring is allowed to be partial.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use oscal_core::{EntityKind, HrefRole, Visitor, Walk};
use oscal_model::{Document, DocumentKind};
use serde::Serialize;
use thiserror::Error;

use crate::config::ReferencePolicy;
use crate::registry::IdentifierRegistry;

/// Kinds a fragment href may point at, tried in order.
const FRAGMENT_TARGETS: [EntityKind; 5] = [
    EntityKind::Resource,
    EntityKind::Control,
    EntityKind::Group,
    EntityKind::Part,
    EntityKind::Parameter,
];

/// A reference whose target does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("dangling {kind} reference {target:?} at {path}")]
pub struct DanglingReference {
    /// JSON Pointer of the referencing field.
    pub path: String,
    pub kind: EntityKind,
    pub target: String,
}

/// A reference that can only be checked against a document not supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalReference {
    pub path: String,
    /// `None` for an import href itself.
    pub kind: Option<EntityKind>,
    pub target: String,
}

/// Where a resolved reference found its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvedIn {
    /// The checked document.
    Local,
    /// An attached import, by href.
    Import(String),
}

/// The outcome of one reference occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceOutcome {
    Resolved {
        path: String,
        kind: EntityKind,
        target: String,
        /// JSON Pointer of the target entity within its document.
        target_path: String,
        resolved_in: ResolvedIn,
    },
    Dangling(DanglingReference),
    External(ExternalReference),
}

impl ReferenceOutcome {
    /// JSON Pointer of the referencing field.
    pub fn path(&self) -> &str {
        match self {
            Self::Resolved { path, .. } => path,
            Self::Dangling(d) => &d.path,
            Self::External(e) => &e.path,
        }
    }
}

/// A cycle in catalog parameter `depends-on` chains.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("parameter dependency cycle at {path}: {}", .parameters.join(" -> "))]
pub struct DependencyCycle {
    /// JSON Pointer of the first parameter in the cycle.
    pub path: String,
    /// Parameter ids in dependency order, starting with the smallest id.
    pub parameters: Vec<String>,
}

/// Everything the checker found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceReport {
    outcomes: Vec<ReferenceOutcome>,
    cycles: Vec<DependencyCycle>,
}

impl ReferenceReport {
    /// Every outcome in document order.
    pub fn outcomes(&self) -> &[ReferenceOutcome] {
        &self.outcomes
    }

    /// The outcome recorded for the field at `path`.
    pub fn outcome_at(&self, path: &str) -> Option<&ReferenceOutcome> {
        self.outcomes.iter().find(|o| o.path() == path)
    }

    pub fn dangling(&self) -> impl Iterator<Item = &DanglingReference> {
        self.outcomes.iter().filter_map(|o| match o {
            ReferenceOutcome::Dangling(d) => Some(d),
            _ => None,
        })
    }

    pub fn external(&self) -> impl Iterator<Item = &ExternalReference> {
        self.outcomes.iter().filter_map(|o| match o {
            ReferenceOutcome::External(e) => Some(e),
            _ => None,
        })
    }

    pub fn resolved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ReferenceOutcome::Resolved { .. }))
            .count()
    }

    pub fn cycles(&self) -> &[DependencyCycle] {
        &self.cycles
    }

    /// Returns true if nothing dangles and no dependency cycle exists.
    /// External references do not count against a document.
    pub fn is_clean(&self) -> bool {
        self.dangling().next().is_none() && self.cycles.is_empty()
    }
}

impl fmt::Display for ReferenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} resolved, {} dangling, {} external, {} cycle(s)",
            self.resolved_count(),
            self.dangling().count(),
            self.external().count(),
            self.cycles.len()
        )?;
        for d in self.dangling() {
            write!(f, "\n  {d}")?;
        }
        for c in &self.cycles {
            write!(f, "\n  {c}")?;
        }
        Ok(())
    }
}

/// An upstream document attached to a checker.
#[derive(Debug, Clone)]
struct AttachedImport {
    registry: IdentifierRegistry,
    /// The attached document's own external imports.
    imports: Vec<String>,
}

/// Checks references in a document, optionally against upstream documents.
///
/// ```ignore
/// let report = ReferenceChecker::new()
///     .with_import("catalog.json", &catalog)
///     .check(&profile);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceChecker {
    policy: ReferencePolicy,
    imports: BTreeMap<String, AttachedImport>,
}

impl ReferenceChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: ReferencePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach the document an import `href` points at. The href must match
    /// the importing document's href text exactly.
    ///
    /// Duplicate identifiers in `document` are ignored here; validate it
    /// separately.
    pub fn with_import(mut self, href: impl Into<String>, document: &Document) -> Self {
        let (registry, _) = IdentifierRegistry::build(document);
        let imports = import_hrefs(document);
        self.imports
            .insert(href.into(), AttachedImport { registry, imports });
        self
    }

    /// Check every reference in `document`.
    pub fn check(&self, document: &Document) -> ReferenceReport {
        let (registry, _) = IdentifierRegistry::build(document);
        let mut collected = Collector::default();
        document.walk("", &mut collected);

        let upstream_complete = self.upstream_complete(&collected.import_hrefs());
        let upstream = upstream_kinds(document.kind());

        let mut outcomes = Vec::with_capacity(collected.references.len() + collected.hrefs.len());
        for (path, kind, target) in collected.references {
            let outcome = match self.resolve(&registry, kind, &target) {
                Some((target_path, resolved_in)) => ReferenceOutcome::Resolved {
                    path,
                    kind,
                    target,
                    target_path,
                    resolved_in,
                },
                None if !upstream_complete && upstream.contains(&kind) => {
                    if !self.policy.report_external {
                        continue;
                    }
                    ReferenceOutcome::External(ExternalReference {
                        path,
                        kind: Some(kind),
                        target,
                    })
                }
                None => {
                    tracing::warn!(%path, %kind, %target, "dangling reference");
                    ReferenceOutcome::Dangling(DanglingReference { path, kind, target })
                }
            };
            outcomes.push(outcome);
        }

        for (path, href, role) in collected.hrefs {
            if let Some(outcome) = self.check_href(&registry, path, href, role) {
                outcomes.push(outcome);
            }
        }

        let cycles = if self.policy.check_parameter_cycles {
            parameter_cycles(document, &registry)
        } else {
            Vec::new()
        };
        for cycle in &cycles {
            tracing::warn!(%cycle, "parameter dependency cycle");
        }

        let report = ReferenceReport { outcomes, cycles };
        tracing::debug!(kind = %document.kind(), %report, "checked references");
        report
    }

    fn resolve(
        &self,
        local: &IdentifierRegistry,
        kind: EntityKind,
        target: &str,
    ) -> Option<(String, ResolvedIn)> {
        if let Ok(r) = local.resolve(kind, target) {
            return Some((r.path.clone(), ResolvedIn::Local));
        }
        self.imports.iter().find_map(|(href, import)| {
            import
                .registry
                .resolve(kind, target)
                .ok()
                .map(|r| (r.path.clone(), ResolvedIn::Import(href.clone())))
        })
    }

    fn check_href(
        &self,
        local: &IdentifierRegistry,
        path: String,
        href: String,
        role: HrefRole,
    ) -> Option<ReferenceOutcome> {
        if let Some(fragment) = href.strip_prefix('#').filter(|f| !f.is_empty()) {
            if !self.policy.check_fragments {
                return None;
            }
            // Fragments name entities in this document only.
            let found = FRAGMENT_TARGETS
                .iter()
                .find_map(|&kind| local.resolve(kind, fragment).ok().map(|r| (kind, r)));
            return Some(match found {
                Some((kind, r)) => ReferenceOutcome::Resolved {
                    path,
                    kind,
                    target: fragment.to_string(),
                    target_path: r.path.clone(),
                    resolved_in: ResolvedIn::Local,
                },
                None => {
                    tracing::warn!(%path, %href, "dangling fragment href");
                    ReferenceOutcome::Dangling(DanglingReference {
                        path,
                        kind: EntityKind::Resource,
                        target: fragment.to_string(),
                    })
                }
            });
        }
        match role {
            // Link targets outside the document are never fetched.
            HrefRole::Link => None,
            HrefRole::Import if self.imports.contains_key(&href) => {
                Some(ReferenceOutcome::Resolved {
                    path,
                    kind: EntityKind::Resource,
                    target: href.clone(),
                    target_path: String::new(),
                    resolved_in: ResolvedIn::Import(href),
                })
            }
            HrefRole::Import if self.policy.report_external => {
                Some(ReferenceOutcome::External(ExternalReference {
                    path,
                    kind: None,
                    target: href,
                }))
            }
            HrefRole::Import => None,
        }
    }

    /// Returns true if every import reachable from `hrefs` is attached.
    fn upstream_complete(&self, hrefs: &[String]) -> bool {
        let mut seen = BTreeSet::new();
        let mut pending: Vec<&String> = hrefs.iter().collect();
        while let Some(href) = pending.pop() {
            if !seen.insert(href) {
                continue;
            }
            match self.imports.get(href) {
                Some(import) => pending.extend(import.imports.iter()),
                None => return false,
            }
        }
        true
    }
}

/// Entity kinds a document of `kind` normally imports rather than defines.
pub fn upstream_kinds(kind: DocumentKind) -> &'static [EntityKind] {
    use EntityKind::*;
    match kind {
        DocumentKind::Catalog => &[],
        DocumentKind::Profile => &[Control, Group, Part, Parameter],
        DocumentKind::ComponentDefinition => &[Control, Part, Parameter, Component],
        DocumentKind::SystemSecurityPlan => &[Control, Part, Parameter, Objective],
        DocumentKind::AssessmentPlan => &[
            Control, Part, Parameter, Objective, Component, InventoryItem, User, Location,
            Party, Role, Subject, Statement, ImplementedRequirement, Provided, Responsibility,
            Actor,
        ],
        DocumentKind::AssessmentResults => &[
            Control, Part, Parameter, Objective, Component, InventoryItem, User, Location,
            Party, Role, Subject, Statement, ImplementedRequirement, Provided, Responsibility,
            Actor, Task, Activity, SubjectPlaceholder, AssessmentPlatform, AssessmentMethod,
        ],
        DocumentKind::PlanOfActionAndMilestones => &[
            Control, Part, Parameter, Objective, Component, InventoryItem, User, Location,
            Party, Role, Subject, Statement, ImplementedRequirement, Provided, Responsibility,
            Actor, Task, AssessmentPlatform,
        ],
    }
}

/// The external import hrefs of a document.
fn import_hrefs(document: &Document) -> Vec<String> {
    let mut collected = Collector::default();
    document.walk("", &mut collected);
    collected.import_hrefs()
}

/// Gathers references and hrefs in walk order.
#[derive(Default)]
struct Collector {
    references: Vec<(String, EntityKind, String)>,
    hrefs: Vec<(String, String, HrefRole)>,
}

impl Collector {
    fn import_hrefs(&self) -> Vec<String> {
        self.hrefs
            .iter()
            .filter(|(_, href, role)| *role == HrefRole::Import && !href.starts_with('#'))
            .map(|(_, href, _)| href.clone())
            .collect()
    }
}

impl Visitor for Collector {
    fn visit_reference(&mut self, path: &str, kind: EntityKind, id: &str) {
        // An empty reference is a cardinality problem, reported by validation.
        if !id.is_empty() {
            self.references
                .push((path.to_string(), kind, id.to_string()));
        }
    }

    fn visit_href(&mut self, path: &str, href: &str, role: HrefRole) {
        if !href.is_empty() {
            self.hrefs
                .push((path.to_string(), href.to_string(), role));
        }
    }
}

/// Cycles in the parameter `depends-on` graph of a catalog or profile,
/// each reported once.
///
/// A profile's graph holds the parameters it defines plus the dependencies
/// its `set-parameters` declare; a setting's `depends-on` replaces that of
/// the parameter it targets. Edges inherited from imported catalogs are not
/// followed.
fn parameter_cycles(document: &Document, registry: &IdentifierRegistry) -> Vec<DependencyCycle> {
    // Each parameter depends on at most one other.
    let mut edges: HashMap<&str, &str> = HashMap::new();
    // Where a setting introduced an edge, for parameters defined upstream.
    let mut settings: HashMap<&str, String> = HashMap::new();
    match document {
        Document::Catalog(catalog) => edges.extend(catalog.parameters_iter().filter_map(|p| {
            p.depends_on
                .as_ref()
                .map(|dep| (p.id.as_str(), dep.as_str()))
        })),
        Document::Profile(profile) => {
            edges.extend(profile.parameters_iter().filter_map(|p| {
                p.depends_on
                    .as_ref()
                    .map(|dep| (p.id.as_str(), dep.as_str()))
            }));
            let set_parameters = profile.modify.iter().flat_map(|m| m.set_parameters.iter());
            for (i, setting) in set_parameters.enumerate() {
                if let Some(dep) = &setting.depends_on {
                    let id = setting.param_id.as_str();
                    edges.insert(id, dep.as_str());
                    settings
                        .entry(id)
                        .or_insert_with(|| format!("/profile/modify/set-parameters/{i}"));
                }
            }
        }
        _ => return Vec::new(),
    }

    let mut starts: Vec<&str> = edges.keys().copied().collect();
    starts.sort_unstable();

    let mut done: BTreeSet<&str> = BTreeSet::new();
    let mut cycles = Vec::new();
    for start in starts {
        let mut chain: Vec<&str> = Vec::new();
        let mut node = start;
        loop {
            if done.contains(node) {
                break;
            }
            if let Some(pos) = chain.iter().position(|n| *n == node) {
                cycles.push(rotate_cycle(&chain[pos..], registry, &settings));
                break;
            }
            chain.push(node);
            match edges.get(node) {
                Some(&next) => node = next,
                None => break,
            }
        }
        done.extend(chain);
    }
    cycles
}

fn rotate_cycle(
    members: &[&str],
    registry: &IdentifierRegistry,
    settings: &HashMap<&str, String>,
) -> DependencyCycle {
    let min = members
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| **id)
        .map_or(0, |(i, _)| i);
    let parameters: Vec<String> = members[min..]
        .iter()
        .chain(&members[..min])
        .map(|id| id.to_string())
        .collect();
    let path = parameters
        .first()
        .and_then(|id| {
            registry
                .resolve(EntityKind::Parameter, id)
                .ok()
                .map(|r| r.path.clone())
                .or_else(|| settings.get(id.as_str()).cloned())
        })
        .unwrap_or_default();
    DependencyCycle { path, parameters }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(json: &str) -> Document {
        Document::from_json_str(&format!(r#"{{"catalog": {json}}}"#)).unwrap()
    }

    #[test]
    fn test_local_references_resolve() {
        let doc = catalog(
            r#"{"params": [{"id": "a"}, {"id": "b", "depends-on": "a"}]}"#,
        );
        let report = ReferenceChecker::new().check(&doc);
        assert!(report.is_clean(), "{report}");
        assert_eq!(report.resolved_count(), 1);
        match report.outcome_at("/catalog/params/1/depends-on") {
            Some(ReferenceOutcome::Resolved { target_path, resolved_in, .. }) => {
                assert_eq!(target_path, "/catalog/params/0");
                assert_eq!(*resolved_in, ResolvedIn::Local);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_catalog_has_no_upstream() {
        let doc = catalog(r#"{"params": [{"id": "b", "depends-on": "missing"}]}"#);
        let report = ReferenceChecker::new().check(&doc);
        let dangling: Vec<_> = report.dangling().collect();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].path, "/catalog/params/0/depends-on");
        assert_eq!(dangling[0].target, "missing");
    }

    #[test]
    fn test_cycle_reported_once_from_smallest() {
        let doc = catalog(
            r#"{"params": [
                {"id": "c", "depends-on": "a"},
                {"id": "a", "depends-on": "b"},
                {"id": "b", "depends-on": "c"},
                {"id": "d", "depends-on": "a"},
                {"id": "s", "depends-on": "s"}
            ]}"#,
        );
        let report = ReferenceChecker::new().check(&doc);
        assert_eq!(report.cycles().len(), 2);
        assert_eq!(report.cycles()[0].parameters, vec!["a", "b", "c"]);
        assert_eq!(report.cycles()[0].path, "/catalog/params/1");
        assert_eq!(report.cycles()[1].parameters, vec!["s"]);
        assert!(!report.is_clean());
    }

    fn profile(json: &str) -> Document {
        Document::from_json_str(&format!(r#"{{"profile": {json}}}"#)).unwrap()
    }

    #[test]
    fn test_cycle_through_profile_added_and_group_params() {
        let doc = profile(
            r#"{
                "imports": [{"href": "catalog.json"}],
                "merge": {"custom": {"groups": [{
                    "title": "Custom",
                    "groups": [{"title": "Nested", "params": [{"id": "p-a", "depends-on": "p-b"}]}]
                }]}},
                "modify": {"alters": [{
                    "control-id": "ac-1",
                    "adds": [{"params": [{"id": "p-b", "depends-on": "p-a"}]}]
                }]}
            }"#,
        );
        let report = ReferenceChecker::new().check(&doc);
        assert_eq!(report.cycles().len(), 1, "{report}");
        assert_eq!(report.cycles()[0].parameters, vec!["p-a", "p-b"]);
        assert_eq!(
            report.cycles()[0].path,
            "/profile/merge/custom/groups/0/groups/0/params/0"
        );
    }

    #[test]
    fn test_set_parameter_dependency_closes_cycle() {
        let doc = profile(
            r#"{
                "imports": [{"href": "catalog.json"}],
                "modify": {
                    "set-parameters": [
                        {"param-id": "ac-1_prm_1", "depends-on": "ac-1_prm_2"},
                        {"param-id": "ac-1_prm_2", "depends-on": "ac-1_prm_1"}
                    ]
                }
            }"#,
        );
        let report = ReferenceChecker::new().check(&doc);
        assert_eq!(report.cycles().len(), 1, "{report}");
        assert_eq!(report.cycles()[0].parameters, vec!["ac-1_prm_1", "ac-1_prm_2"]);
        assert_eq!(report.cycles()[0].path, "/profile/modify/set-parameters/0");
    }

    #[test]
    fn test_setting_replaces_added_param_dependency() {
        let doc = profile(
            r#"{
                "imports": [{"href": "catalog.json"}],
                "modify": {
                    "set-parameters": [{"param-id": "p-a", "depends-on": "p-c"}],
                    "alters": [{
                        "control-id": "ac-1",
                        "adds": [{"params": [
                            {"id": "p-a", "depends-on": "p-b"},
                            {"id": "p-b", "depends-on": "p-a"}
                        ]}]
                    }]
                }
            }"#,
        );
        let report = ReferenceChecker::new().check(&doc);
        assert!(report.cycles().is_empty(), "{report}");
    }

    #[test]
    fn test_cycle_check_can_be_disabled() {
        let doc = catalog(r#"{"params": [{"id": "s", "depends-on": "s"}]}"#);
        let policy = ReferencePolicy {
            check_parameter_cycles: false,
            ..ReferencePolicy::default()
        };
        let report = ReferenceChecker::new().with_policy(policy).check(&doc);
        assert!(report.cycles().is_empty());
    }

    #[test]
    fn test_fragment_href_must_name_local_entity() {
        let doc = catalog(
            r##"{
                "controls": [{"id": "ac-1", "links": [{"href": "#ac-2"}, {"href": "#ac-1"}]}]
            }"##,
        );
        let report = ReferenceChecker::new().check(&doc);
        let dangling: Vec<_> = report.dangling().collect();
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].path, "/catalog/controls/0/links/0/href");
        assert_eq!(dangling[0].target, "ac-2");
    }

    #[test]
    fn test_unattached_import_makes_upstream_external() {
        let profile = Document::from_json_str(
            r#"{"profile": {
                "imports": [{"href": "https://example.org/catalog.json"}],
                "modify": {"alters": [{"control-id": "ac-1"}]}
            }}"#,
        )
        .unwrap();
        let report = ReferenceChecker::new().check(&profile);
        assert!(report.is_clean());
        let external: Vec<_> = report.external().collect();
        assert_eq!(external.len(), 2);
        assert_eq!(external[0].kind, Some(EntityKind::Control));
        assert_eq!(external[1].kind, None);

        let quiet = ReferenceChecker::new()
            .with_policy(ReferencePolicy {
                report_external: false,
                ..ReferencePolicy::default()
            })
            .check(&profile);
        assert!(quiet.outcomes().is_empty());
    }

    #[test]
    fn test_upstream_kinds_grow_down_the_layers() {
        let ap = upstream_kinds(DocumentKind::AssessmentPlan);
        let ar = upstream_kinds(DocumentKind::AssessmentResults);
        assert!(upstream_kinds(DocumentKind::Catalog).is_empty());
        assert!(ap.iter().all(|k| ar.contains(k)));
        assert!(!ar.contains(&EntityKind::Observation));
    }
}
