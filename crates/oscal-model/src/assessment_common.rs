//! # Assessment Common Substrate
//!
//! Tasks, activities, subjects, observations, risks and their supporting
//! records, shared by the assessment plan, assessment results, and POA&M.
//!
//! Observations and risks are defined once and referenced by UUID from
//! findings and POA&M items, never embedded.

use serde::{Deserialize, Serialize};

use oscal_core::{
    kind, DateTimeWithTimezone, Href, Id, ImportHref, NonBlank, OscalUuid, Ref, Token, UriRef,
};

use crate::catalog_common::{IncludeAll, Part};
use crate::implementation_common::{ImplementationStatus, SystemComponent};
use crate::metadata::{Link, Property, ResponsibleParty, ResponsibleRole};

/// The SSP an assessment plan or POA&M is about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImportSsp {
    pub href: ImportHref,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ImportSsp { href, remarks } require [href]);

// ─── Objectives and Methods ──────────────────────────────────────────

/// Assessment objectives defined for a control beyond those in the catalog.
/// The parts carry the objective ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LocalObjective {
    pub control_id: Ref<kind::Control>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(LocalObjective {
    control_id, description, props, links, parts, remarks,
} require [control_id, parts]);

/// A method used to assess an objective (examine, interview, test).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentMethod {
    pub uuid: Id<kind::AssessmentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    pub part: AssessmentPart,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(AssessmentMethod { uuid, description, props, links, part, remarks } require [uuid]);

/// A part of assessment prose. Identified by UUID rather than token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<OscalUuid>,
    pub name: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ns: Option<UriRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prose: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<AssessmentPart>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl_walk!(AssessmentPart {
    uuid, name, ns, class, title, props, prose, parts, links,
} require [name]);

// ─── Activities and Tasks ────────────────────────────────────────────

/// An assessment activity, performed as part of one or more tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Activity {
    pub uuid: Id<kind::Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_controls: Option<ReviewedControls>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Activity {
    uuid, title, description, props, links, steps, related_controls, responsible_roles,
    remarks,
} require [uuid, description]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Step {
    pub uuid: Id<kind::Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_controls: Option<ReviewedControls>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Step {
    uuid, title, description, props, links, reviewed_controls, responsible_roles, remarks,
} require [uuid, description]);

/// A scheduled unit of assessment work. Tasks nest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Task {
    pub uuid: Id<kind::Task>,
    /// `milestone` or `action`.
    #[serde(rename = "type")]
    pub r#type: Token,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<TaskTiming>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TaskDependency>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub associated_activities: Vec<AssociatedActivity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<AssessmentSubject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Task {
    uuid, r#type, title, description, props, links, timing, dependencies, tasks,
    associated_activities, subjects, responsible_roles, remarks,
} require [uuid, r#type, title]);

/// When a task occurs. One of the three variants is normally present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TaskTiming {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_date: Option<OnDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at_frequency: Option<Frequency>,
}

impl_walk!(TaskTiming { on_date, within_date_range, at_frequency });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OnDate {
    pub date: DateTimeWithTimezone,
}

impl_walk!(OnDate { date } require [date]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DateRange {
    pub start: DateTimeWithTimezone,
    pub end: DateTimeWithTimezone,
}

impl_walk!(DateRange { start, end } require [start, end]);

/// Every `period` `unit`s, e.g. every 30 days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Frequency {
    pub period: u32,
    pub unit: NonBlank,
}

impl_walk!(Frequency { period, unit } require [unit]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TaskDependency {
    pub task_uuid: Ref<kind::Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(TaskDependency { task_uuid, remarks } require [task_uuid]);

/// An activity performed as part of a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssociatedActivity {
    pub activity_uuid: Ref<kind::Activity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    pub subjects: Vec<AssessmentSubject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(AssociatedActivity {
    activity_uuid, props, links, responsible_roles, subjects, remarks,
} require [activity_uuid, subjects]);

// ─── Reviewed Controls ───────────────────────────────────────────────

/// The controls and objectives in scope for an assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReviewedControls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    pub control_selections: Vec<ControlSelection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub control_objective_selections: Vec<ObjectiveSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ReviewedControls {
    description, props, links, control_selections, control_objective_selections, remarks,
} require [control_selections]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ControlSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<IncludeAll>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_controls: Vec<SelectControl>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_controls: Vec<SelectControl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ControlSelection {
    description, props, links, include_all, include_controls, exclude_controls, remarks,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ObjectiveSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<IncludeAll>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_objectives: Vec<SelectObjective>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_objectives: Vec<SelectObjective>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ObjectiveSelection {
    description, props, links, include_all, include_objectives, exclude_objectives, remarks,
});

/// A control, optionally narrowed to some of its statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectControl {
    pub control_id: Ref<kind::Control>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statement_ids: Vec<Ref<kind::Part>>,
}

impl_walk!(SelectControl { control_id, statement_ids } require [control_id]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectObjective {
    pub objective_id: Ref<kind::Objective>,
}

impl_walk!(SelectObjective { objective_id } require [objective_id]);

// ─── Subjects ────────────────────────────────────────────────────────

/// A subject to be filled in from the results of one or more tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SubjectPlaceholder {
    pub uuid: Id<kind::SubjectPlaceholder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sources: Vec<PlaceholderSource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(SubjectPlaceholder {
    uuid, description, sources, props, links, remarks,
} require [uuid, sources]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlaceholderSource {
    pub task_uuid: Ref<kind::Task>,
}

impl_walk!(PlaceholderSource { task_uuid } require [task_uuid]);

/// A set of subjects selected by type, with explicit includes and excludes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentSubject {
    /// `component`, `inventory-item`, `location`, `party`, or `user`.
    #[serde(rename = "type")]
    pub r#type: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<IncludeAll>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_subjects: Vec<SelectSubject>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_subjects: Vec<SelectSubject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(AssessmentSubject {
    r#type, description, props, links, include_all, include_subjects, exclude_subjects,
    remarks,
} require [r#type]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectSubject {
    pub subject_uuid: Ref<kind::Subject>,
    #[serde(rename = "type")]
    pub r#type: Token,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(SelectSubject { subject_uuid, r#type, props, links, remarks } require [subject_uuid, r#type]);

/// A single identified subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SubjectReference {
    pub subject_uuid: Ref<kind::Subject>,
    #[serde(rename = "type")]
    pub r#type: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(SubjectReference {
    subject_uuid, r#type, title, props, links, remarks,
} require [subject_uuid, r#type]);

// ─── Assessment Assets ───────────────────────────────────────────────

/// Tools and platforms used to perform the assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentAssets {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<SystemComponent>,
    pub assessment_platforms: Vec<AssessmentPlatform>,
}

impl_walk!(AssessmentAssets { components, assessment_platforms } require [assessment_platforms]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentPlatform {
    pub uuid: Id<kind::AssessmentPlatform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uses_components: Vec<UsesComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(AssessmentPlatform {
    uuid, title, props, links, uses_components, remarks,
} require [uuid]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UsesComponent {
    pub component_uuid: Ref<kind::Component>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_parties: Vec<ResponsibleParty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(UsesComponent {
    component_uuid, props, links, responsible_parties, remarks,
} require [component_uuid]);

// ─── Observations ────────────────────────────────────────────────────

/// What a finding is about, and its determined status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FindingTarget {
    /// `statement-id` or `objective-id`.
    #[serde(rename = "type")]
    pub r#type: NonBlank,
    /// An objective id or a control statement (part) id.
    pub target_id: Ref<kind::Objective>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    pub status: TargetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_status: Option<ImplementationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(FindingTarget {
    r#type, target_id, title, description, props, links, status, implementation_status,
    remarks,
} require [r#type, target_id]);

/// `satisfied` or `not-satisfied`, with an optional reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TargetStatus {
    pub state: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(TargetStatus { state, reason, remarks } require [state]);

/// Evidence gathered during an assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Observation {
    pub uuid: Id<kind::Observation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// `EXAMINE`, `INTERVIEW`, `TEST`, or `UNKNOWN`.
    pub methods: Vec<NonBlank>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<Token>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<Origin>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<SubjectReference>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relevant_evidence: Vec<RelevantEvidence>,
    pub collected: DateTimeWithTimezone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTimeWithTimezone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Observation {
    uuid, title, description, props, links, methods, types, origins, subjects,
    relevant_evidence, collected, expires, remarks,
} require [uuid, description, methods, collected]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RelevantEvidence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<Href>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(RelevantEvidence { href, description, props, links, remarks } require [description]);

/// Who or what produced an observation or risk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Origin {
    pub actors: Vec<OriginActor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_tasks: Vec<TaskReference>,
}

impl_walk!(Origin { actors, related_tasks } require [actors]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OriginActor {
    /// `tool`, `assessment-platform`, or `party`.
    #[serde(rename = "type")]
    pub r#type: Token,
    pub actor_uuid: Ref<kind::Actor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<Ref<kind::Role>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl_walk!(OriginActor { r#type, actor_uuid, role_id, props, links } require [r#type, actor_uuid]);

/// A task, and the subjects it was performed against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TaskReference {
    pub task_uuid: Ref<kind::Task>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_parties: Vec<ResponsibleParty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<AssessmentSubject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified_subject: Option<IdentifiedSubject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(TaskReference {
    task_uuid, props, links, responsible_parties, subjects, identified_subject, remarks,
} require [task_uuid]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IdentifiedSubject {
    pub subject_placeholder_uuid: Ref<kind::SubjectPlaceholder>,
    pub subjects: Vec<AssessmentSubject>,
}

impl_walk!(IdentifiedSubject {
    subject_placeholder_uuid, subjects,
} require [subject_placeholder_uuid, subjects]);

// ─── Risks ───────────────────────────────────────────────────────────

/// An identified risk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Risk {
    pub uuid: Id<kind::Risk>,
    pub title: String,
    pub description: String,
    pub statement: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    /// `open`, `investigating`, `remediating`, `deviation-requested`,
    /// `deviation-approved`, or `closed`.
    pub status: Token,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<Origin>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub threat_ids: Vec<ThreatId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub characterizations: Vec<Characterization>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mitigating_factors: Vec<MitigatingFactor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTimeWithTimezone>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub remediations: Vec<RiskResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_log: Option<RiskLog>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_observations: Vec<RelatedObservation>,
}

impl_walk!(Risk {
    uuid, title, description, statement, props, links, status, origins, threat_ids,
    characterizations, mitigating_factors, deadline, remediations, risk_log,
    related_observations,
} require [uuid, title, description, statement, status]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ThreatId {
    pub system: UriRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<Href>,
    pub id: String,
}

impl_walk!(ThreatId { system, href, id } require [system, id]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Characterization {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    pub origin: Origin,
    pub facets: Vec<Facet>,
}

impl_walk!(Characterization { props, links, origin, facets } require [facets]);

/// One characteristic of a risk, e.g. likelihood or impact, under a
/// named system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Facet {
    pub name: Token,
    pub system: UriRef,
    pub value: NonBlank,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Facet { name, system, value, props, links, remarks } require [name, system, value]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MitigatingFactor {
    pub uuid: Id<kind::MitigatingFactor>,
    /// The SSP implementation statement this factor relies on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_uuid: Option<Ref<kind::Statement>>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<SubjectReference>,
}

impl_walk!(MitigatingFactor {
    uuid, implementation_uuid, description, props, links, subjects,
} require [uuid, description]);

/// A planned or completed response to a risk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RiskResponse {
    pub uuid: Id<kind::RiskResponse>,
    /// `recommendation`, `planned`, or `completed`.
    pub lifecycle: Token,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<Origin>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required_assets: Vec<RequiredAsset>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(RiskResponse {
    uuid, lifecycle, title, description, props, links, origins, required_assets, tasks,
    remarks,
} require [uuid, lifecycle, title, description]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RequiredAsset {
    pub uuid: Id<kind::RequiredAsset>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<SubjectReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(RequiredAsset {
    uuid, subjects, title, description, props, links, remarks,
} require [uuid, description]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RiskLog {
    pub entries: Vec<RiskLogEntry>,
}

impl_walk!(RiskLog { entries } require [entries]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RiskLogEntry {
    pub uuid: Id<kind::RiskLogEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: DateTimeWithTimezone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTimeWithTimezone>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logged_by: Vec<LoggedBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_change: Option<Token>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_responses: Vec<RelatedResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(RiskLogEntry {
    uuid, title, description, start, end, props, links, logged_by, status_change,
    related_responses, remarks,
} require [uuid, start]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RelatedResponse {
    pub response_uuid: Ref<kind::RiskResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_tasks: Vec<TaskReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(RelatedResponse {
    response_uuid, props, links, related_tasks, remarks,
} require [response_uuid]);

/// The party and role that made a log entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggedBy {
    pub party_uuid: Ref<kind::Party>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<Ref<kind::Role>>,
}

impl_walk!(LoggedBy { party_uuid, role_id } require [party_uuid]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RelatedObservation {
    pub observation_uuid: Ref<kind::Observation>,
}

impl_walk!(RelatedObservation { observation_uuid } require [observation_uuid]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RelatedRisk {
    pub risk_uuid: Ref<kind::Risk>,
}

impl_walk!(RelatedRisk { risk_uuid } require [risk_uuid]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_timing_variants_are_plain_options() {
        let task: Task = serde_json::from_str(
            r#"{"uuid":"a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d","type":"action","title":"Scan",
                "timing":{"at-frequency":{"period":30,"unit":"days"}},
                "tasks":[{"uuid":"b1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d","type":"milestone","title":"Done"}]}"#,
        )
        .unwrap();
        let timing = task.timing.as_ref().unwrap();
        assert!(timing.on_date.is_none());
        assert_eq!(timing.at_frequency.as_ref().unwrap().period, 30);
        assert_eq!(task.tasks.len(), 1);
    }

    #[test]
    fn test_observation_round_trip_keeps_field_order_independent_content() {
        let json = serde_json::json!({
            "uuid": "c1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d",
            "description": "Password policy reviewed.",
            "methods": ["EXAMINE"],
            "collected": "2024-03-01T10:00:00-05:00",
            "origins": [{"actors": [{"type": "party", "actor-uuid": "d1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d"}]}]
        });
        let obs: Observation = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&obs).unwrap(), json);
    }
}
