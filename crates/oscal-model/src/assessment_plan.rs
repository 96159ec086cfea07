//! # Assessment Plan
//!
//! The planned assessment of a system described by an imported SSP: what
//! will be reviewed, against which subjects, by which tasks and activities.

use serde::{Deserialize, Serialize};

use oscal_core::OscalUuid;

use crate::assessment_common::{
    Activity, AssessmentAssets, AssessmentSubject, ImportSsp, LocalObjective, ReviewedControls,
    Task,
};
use crate::catalog_common::Part;
use crate::implementation_common::{InventoryItem, SystemComponent, SystemUser};
use crate::metadata::{BackMatter, Metadata};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentPlan {
    pub uuid: OscalUuid,
    pub metadata: Metadata,
    pub import_ssp: ImportSsp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_definitions: Option<AssessmentLocalDefinitions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_and_conditions: Option<TermsAndConditions>,
    pub reviewed_controls: ReviewedControls,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assessment_subjects: Vec<AssessmentSubject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_assets: Option<AssessmentAssets>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

impl_walk!(AssessmentPlan {
    uuid, metadata, import_ssp, local_definitions, terms_and_conditions, reviewed_controls,
    assessment_subjects, assessment_assets, tasks, back_matter,
} require [uuid]);

impl AssessmentPlan {
    /// All tasks, including nested ones, depth-first.
    pub fn tasks_iter(&self) -> impl Iterator<Item = &Task> {
        fn visit<'a>(tasks: &'a [Task], out: &mut Vec<&'a Task>) {
            for task in tasks {
                out.push(task);
                visit(&task.tasks, out);
            }
        }
        let mut out = Vec::new();
        visit(&self.tasks, &mut out);
        out.into_iter()
    }
}

/// Entities used by the assessment that are not defined in the imported SSP.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AssessmentLocalDefinitions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<SystemComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inventory_items: Vec<InventoryItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<SystemUser>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub objectives_and_methods: Vec<LocalObjective>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<Activity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(AssessmentLocalDefinitions {
    components, inventory_items, users, objectives_and_methods, activities, remarks,
});

/// Rules of engagement, disclosures, and similar terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TermsAndConditions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
}

impl_walk!(TermsAndConditions { parts });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_iter_includes_nested() {
        let plan: AssessmentPlan = serde_json::from_value(serde_json::json!({
            "tasks": [
                {"uuid": "a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d", "type": "milestone", "title": "Kickoff",
                 "tasks": [{"uuid": "b1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d", "type": "action", "title": "Scan"}]},
                {"uuid": "c1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d", "type": "milestone", "title": "Report"}
            ]
        }))
        .unwrap();
        let titles: Vec<&str> = plan.tasks_iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Kickoff", "Scan", "Report"]);
    }

    #[test]
    fn test_missing_sections_decode_as_defaults() {
        let plan: AssessmentPlan = serde_json::from_str("{}").unwrap();
        assert!(plan.local_definitions.is_none());
        assert!(plan.reviewed_controls.control_selections.is_empty());
    }
}
