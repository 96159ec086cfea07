//! # Assessment Results
//!
//! The outcome of one or more assessments. Each result carries its own
//! observations, risks and findings; findings point at observations and
//! risks by UUID.

use serde::{Deserialize, Serialize};

use oscal_core::{kind, DateTimeWithTimezone, Id, OscalUuid, Ref};

use crate::assessment_common::{
    Activity, AssessmentAssets, AssessmentPart, FindingTarget, ImportSsp, LocalObjective,
    LoggedBy, Observation, Origin, RelatedObservation, RelatedRisk, ReviewedControls, Risk, Task,
    TaskReference,
};
use crate::implementation_common::{InventoryItem, SystemComponent, SystemUser};
use crate::metadata::{BackMatter, Link, Metadata, Property, ResponsibleParty};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentResults {
    pub uuid: OscalUuid,
    pub metadata: Metadata,
    /// The assessment plan these results were produced from. Same shape as
    /// an SSP import.
    pub import_ap: ImportSsp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_definitions: Option<ResultsLocalDefinitions>,
    pub results: Vec<AssessmentResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

impl_walk!(AssessmentResults {
    uuid, metadata, import_ap, local_definitions, results, back_matter,
} require [uuid, results]);

/// Document-wide definitions shared by every result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResultsLocalDefinitions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub objectives_and_methods: Vec<LocalObjective>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ResultsLocalDefinitions { objectives_and_methods, activities, remarks });

/// One assessment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentResult {
    pub uuid: Id<kind::Result>,
    pub title: String,
    pub description: String,
    pub start: DateTimeWithTimezone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTimeWithTimezone>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_definitions: Option<ResultLocalDefinitions>,
    pub reviewed_controls: ReviewedControls,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attestations: Vec<Attestation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_log: Option<AssessmentLog>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<Observation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<Risk>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub findings: Vec<Finding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(AssessmentResult {
    uuid, title, description, start, end, props, links, local_definitions, reviewed_controls,
    attestations, assessment_log, observations, risks, findings, remarks,
} require [uuid, title, description, start]);

impl AssessmentResult {
    /// The observation with the given UUID.
    pub fn observation(&self, uuid: &str) -> Option<&Observation> {
        self.observations.iter().find(|o| o.uuid.as_str() == uuid)
    }

    /// The risk with the given UUID.
    pub fn risk(&self, uuid: &str) -> Option<&Risk> {
        self.risks.iter().find(|r| r.uuid.as_str() == uuid)
    }

    /// Observations a finding relates to, in the finding's order. References
    /// that match nothing are skipped.
    pub fn observations_for<'a>(&'a self, finding: &'a Finding) -> impl Iterator<Item = &'a Observation> {
        finding
            .related_observations
            .iter()
            .filter_map(|r| self.observation(r.observation_uuid.as_str()))
    }
}

/// Entities defined for a single result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResultLocalDefinitions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<SystemComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inventory_items: Vec<InventoryItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<SystemUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_assets: Option<AssessmentAssets>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
}

impl_walk!(ResultLocalDefinitions {
    components, inventory_items, users, assessment_assets, tasks,
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Attestation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_parties: Vec<ResponsibleParty>,
    pub parts: Vec<AssessmentPart>,
}

impl_walk!(Attestation { responsible_parties, parts } require [parts]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentLog {
    pub entries: Vec<AssessmentLogEntry>,
}

impl_walk!(AssessmentLog { entries } require [entries]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentLogEntry {
    pub uuid: OscalUuid,
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
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_tasks: Vec<TaskReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(AssessmentLogEntry {
    uuid, title, description, start, end, props, links, logged_by, related_tasks, remarks,
} require [uuid, start]);

/// A conclusion about one control objective or statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Finding {
    pub uuid: Id<kind::Finding>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<Origin>,
    pub target: FindingTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_statement_uuid: Option<Ref<kind::Statement>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_observations: Vec<RelatedObservation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_risks: Vec<RelatedRisk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Finding {
    uuid, title, description, props, links, origins, target, implementation_statement_uuid,
    related_observations, related_risks, remarks,
} require [uuid, title, description]);

#[cfg(test)]
mod tests {
    use super::*;

    const OBS: &str = "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d";
    const MISSING: &str = "f1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d";

    fn result() -> AssessmentResult {
        serde_json::from_value(serde_json::json!({
            "uuid": "b1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d",
            "title": "Annual",
            "description": "Annual assessment.",
            "start": "2024-03-01T00:00:00Z",
            "observations": [{
                "uuid": OBS,
                "description": "Checked.",
                "methods": ["TEST"],
                "collected": "2024-03-02T00:00:00Z"
            }],
            "findings": [{
                "uuid": "c1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d",
                "title": "AC-1",
                "description": "Satisfied.",
                "target": {"type": "objective-id", "target-id": "ac-1_obj", "status": {"state": "satisfied"}},
                "related-observations": [{"observation-uuid": OBS}, {"observation-uuid": MISSING}]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_observation_lookup() {
        let r = result();
        assert_eq!(r.observation(OBS).unwrap().description, "Checked.");
        assert!(r.observation(MISSING).is_none());
        assert!(r.risk(OBS).is_none());
    }

    #[test]
    fn test_observations_for_skips_dangling() {
        let r = result();
        let found: Vec<&str> = r
            .observations_for(&r.findings[0])
            .map(|o| o.uuid.as_str())
            .collect();
        assert_eq!(found, vec![OBS]);
    }
}
