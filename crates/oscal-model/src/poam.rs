//! # Plan of Action and Milestones
//!
//! Open risks and the remediation plan for each. POA&M items point at the
//! document's observations and risks by UUID.

use serde::{Deserialize, Serialize};

use oscal_core::{kind, Id, OscalUuid};

use crate::assessment_common::{
    AssessmentAssets, ImportSsp, Observation, OriginActor, RelatedObservation, RelatedRisk, Risk,
    TaskReference,
};
use crate::implementation_common::{InventoryItem, SystemComponent, SystemId};
use crate::metadata::{BackMatter, Link, Metadata, Property};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PlanOfActionAndMilestones {
    pub uuid: OscalUuid,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_ssp: Option<ImportSsp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_id: Option<SystemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_definitions: Option<PoamLocalDefinitions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<Observation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub risks: Vec<Risk>,
    pub poam_items: Vec<PoamItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

impl_walk!(PlanOfActionAndMilestones {
    uuid, metadata, import_ssp, system_id, local_definitions, observations, risks, poam_items,
    back_matter,
} require [uuid, poam_items]);

impl PlanOfActionAndMilestones {
    /// The observation with the given UUID.
    pub fn observation(&self, uuid: &str) -> Option<&Observation> {
        self.observations.iter().find(|o| o.uuid.as_str() == uuid)
    }

    /// The risk with the given UUID.
    pub fn risk(&self, uuid: &str) -> Option<&Risk> {
        self.risks.iter().find(|r| r.uuid.as_str() == uuid)
    }

    /// Risks a POA&M item relates to. References that match nothing are
    /// skipped.
    pub fn risks_for<'a>(&'a self, item: &'a PoamItem) -> impl Iterator<Item = &'a Risk> {
        item.related_risks
            .iter()
            .filter_map(|r| self.risk(r.risk_uuid.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PoamLocalDefinitions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<SystemComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inventory_items: Vec<InventoryItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_assets: Option<AssessmentAssets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(PoamLocalDefinitions { components, inventory_items, assessment_assets, remarks });

/// One tracked weakness and its remediation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PoamItem {
    pub uuid: Id<kind::PoamItem>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<PoamItemOrigin>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_observations: Vec<RelatedObservation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_risks: Vec<RelatedRisk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(PoamItem {
    uuid, title, description, props, links, origins, related_observations, related_risks,
    remarks,
} require [uuid, title, description]);

/// Like an observation origin, but without related tasks being required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PoamItemOrigin {
    pub actors: Vec<OriginActor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_tasks: Vec<TaskReference>,
}

impl_walk!(PoamItemOrigin { actors, related_tasks } require [actors]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risks_for_resolves_by_uuid() {
        let poam: PlanOfActionAndMilestones = serde_json::from_value(serde_json::json!({
            "risks": [{
                "uuid": "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d",
                "title": "Weak passwords",
                "description": "d",
                "statement": "s",
                "status": "open"
            }],
            "poam-items": [{
                "uuid": "b1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d",
                "title": "Fix passwords",
                "description": "d",
                "related-risks": [{"risk-uuid": "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d"}]
            }]
        }))
        .unwrap();
        let item = &poam.poam_items[0];
        let titles: Vec<&str> = poam.risks_for(item).map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Weak passwords"]);
        assert!(poam.observation("a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d").is_none());
    }
}
