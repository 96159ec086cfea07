//! # Catalog
//!
//! A catalog is a tree of groups and controls. Containment is owned: a
//! control's sub-controls are a `Vec<Control>`, so the tree has no cycles by
//! construction and a control appears at exactly one position.

use serde::{Deserialize, Serialize};

use oscal_core::{kind, Id, OscalUuid, Token};

use crate::catalog_common::{Parameter, Part};
use crate::metadata::{BackMatter, Link, Metadata, Property};

/// A collection of controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Catalog {
    pub uuid: OscalUuid,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<Control>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

impl_walk!(Catalog { uuid, metadata, params, controls, groups, back_matter } require [uuid]);

/// A group of controls, or of groups of controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id<kind::Group>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Token>,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<Control>,
}

impl_walk!(Group {
    id, class, title, params, props, links, parts, groups, controls,
} require [title]);

/// A security or privacy control, possibly with enhancements as
/// sub-controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Control {
    pub id: Id<kind::Control>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Token>,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<Control>,
}

impl_walk!(Control {
    id, class, title, params, props, links, parts, controls,
} require [id, title]);

impl Control {
    /// The part with the given id anywhere in this control's part tree.
    /// Sub-controls are not searched.
    pub fn find_part(&self, id: &str) -> Option<&Part> {
        self.parts
            .iter()
            .flat_map(Part::descendants)
            .find(|p| p.id.as_ref().is_some_and(|pid| pid.as_str() == id))
    }
}

impl Catalog {
    /// Depth-first iterator over every control: top-level controls first,
    /// then each group in order, with sub-controls following their parent.
    pub fn controls_iter(&self) -> impl Iterator<Item = &Control> {
        fn visit_control<'a>(control: &'a Control, out: &mut Vec<&'a Control>) {
            out.push(control);
            for child in &control.controls {
                visit_control(child, out);
            }
        }

        fn visit_group<'a>(group: &'a Group, out: &mut Vec<&'a Control>) {
            for control in &group.controls {
                visit_control(control, out);
            }
            for nested in &group.groups {
                visit_group(nested, out);
            }
        }

        let mut out = Vec::new();
        for control in &self.controls {
            visit_control(control, &mut out);
        }
        for group in &self.groups {
            visit_group(group, &mut out);
        }
        out.into_iter()
    }

    /// The control with the given id at any depth.
    pub fn find_control(&self, id: &str) -> Option<&Control> {
        self.controls_iter().find(|c| c.id.as_str() == id)
    }

    /// Every parameter: catalog-level, then group-level, then control-level,
    /// each in document order.
    pub fn parameters_iter(&self) -> impl Iterator<Item = &Parameter> {
        let mut groups: Vec<&Group> = Vec::new();
        let mut stack: Vec<&Group> = self.groups.iter().rev().collect();
        while let Some(group) = stack.pop() {
            groups.push(group);
            stack.extend(group.groups.iter().rev());
        }
        self.params
            .iter()
            .chain(groups.into_iter().flat_map(|g| g.params.iter()))
            .chain(self.controls_iter().flat_map(|c| c.params.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        serde_json::from_str(
            r#"{
              "uuid": "74c8ba1e-5cd4-4ad1-bbfd-d888e2f6c724",
              "metadata": {"title": "Test", "last-modified": "2024-01-15T12:00:00Z",
                           "version": "1.0", "oscal-version": "1.1.2"},
              "params": [{"id": "cat_prm"}],
              "controls": [{"id": "top-1", "title": "Top"}],
              "groups": [
                {"id": "ac", "title": "Access Control",
                 "params": [{"id": "ac_prm"}],
                 "controls": [
                   {"id": "ac-1", "title": "Policy", "params": [{"id": "ac-1_prm_1"}],
                    "parts": [{"id": "ac-1_smt", "name": "statement",
                               "parts": [{"id": "ac-1_smt.a", "name": "item"}]}]},
                   {"id": "ac-2", "title": "Accounts",
                    "controls": [{"id": "ac-2.1", "title": "Automated"}]}
                 ],
                 "groups": [{"id": "ac-sub", "title": "Sub",
                             "controls": [{"id": "ac-9", "title": "Nested"}]}]},
                {"id": "au", "title": "Audit", "controls": [{"id": "au-1", "title": "Audit Policy"}]}
              ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_controls_iter_depth_first() {
        let cat = catalog();
        let ids: Vec<&str> = cat.controls_iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["top-1", "ac-1", "ac-2", "ac-2.1", "ac-9", "au-1"]);
    }

    #[test]
    fn test_find_control_nested() {
        let cat = catalog();
        assert_eq!(cat.find_control("ac-2.1").map(|c| c.title.as_str()), Some("Automated"));
        assert_eq!(cat.find_control("ac-9").map(|c| c.title.as_str()), Some("Nested"));
        assert!(cat.find_control("zz-1").is_none());
    }

    #[test]
    fn test_parameters_iter_order() {
        let cat = catalog();
        let ids: Vec<&str> = cat.parameters_iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["cat_prm", "ac_prm", "ac-1_prm_1"]);
    }

    #[test]
    fn test_find_part() {
        let cat = catalog();
        let ac1 = cat.find_control("ac-1").unwrap();
        assert_eq!(ac1.find_part("ac-1_smt.a").map(|p| p.name.as_str()), Some("item"));
        assert!(ac1.find_part("ac-2_smt").is_none());
    }
}
