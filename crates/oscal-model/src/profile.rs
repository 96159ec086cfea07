//! # Profile
//!
//! A profile selects controls from imported catalogs or profiles, says how
//! to merge them, and declares modifications. Modifications are declarative
//! diffs (`set-parameters`, `alters`); applying them is a resolver's job and
//! never mutates this structure.

use serde::{Deserialize, Serialize};

use oscal_core::{kind, Id, ImportHref, NonBlank, OscalUuid, Ref, Token};

use crate::catalog_common::{Constraint, Guideline, IncludeAll, Parameter, Part, Selection};
use crate::metadata::{BackMatter, Link, Metadata, Property};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Profile {
    pub uuid: OscalUuid,
    pub metadata: Metadata,
    pub imports: Vec<Import>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge: Option<Merge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modify: Option<Modify>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

impl_walk!(Profile { uuid, metadata, imports, merge, modify, back_matter } require [uuid, imports]);

impl Profile {
    /// Alterations targeting the given control id, in document order.
    pub fn alterations_for<'a>(&'a self, control_id: &'a str) -> impl Iterator<Item = &'a Alteration> {
        self.modify
            .iter()
            .flat_map(|m| m.alters.iter())
            .filter(move |a| a.control_id.as_str() == control_id)
    }

    /// Every parameter the profile defines: custom group parameters
    /// depth-first, then parameters added by alterations.
    pub fn parameters_iter(&self) -> impl Iterator<Item = &Parameter> {
        let mut groups: Vec<&ProfileGroup> = Vec::new();
        let mut stack: Vec<&ProfileGroup> = self
            .merge
            .iter()
            .filter_map(|m| m.custom.as_ref())
            .flat_map(|c| c.groups.iter().rev())
            .collect();
        while let Some(group) = stack.pop() {
            groups.push(group);
            stack.extend(group.groups.iter().rev());
        }
        groups
            .into_iter()
            .flat_map(|g| g.params.iter())
            .chain(
                self.modify
                    .iter()
                    .flat_map(|m| m.alters.iter())
                    .flat_map(|a| a.adds.iter())
                    .flat_map(|add| add.params.iter()),
            )
    }
}

/// An imported catalog or profile and the controls selected from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Import {
    pub href: ImportHref,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<IncludeAll>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_controls: Vec<ControlSelector>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_controls: Vec<ControlSelector>,
}

impl_walk!(Import { href, include_all, include_controls, exclude_controls } require [href]);

/// Selects controls by id or by id pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ControlSelector {
    /// `yes` or `no`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_child_controls: Option<Token>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub with_ids: Vec<Ref<kind::Control>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matching: Vec<MatchingPattern>,
}

impl_walk!(ControlSelector { with_child_controls, with_ids, matching });

/// A glob over control ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MatchingPattern {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<NonBlank>,
}

impl_walk!(MatchingPattern { pattern });

// ─── Merge ───────────────────────────────────────────────────────────

/// How imported controls are merged.
///
/// `combine`, `as-is` and `custom` are independent optional fields; their
/// conventional exclusivity is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Merge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combine: Option<Combine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_is: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomGrouping>,
}

impl_walk!(Merge { combine, as_is, custom });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Combine {
    /// `use-first`, `merge`, or `keep`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<NonBlank>,
}

impl_walk!(Combine { method });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CustomGrouping {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ProfileGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insert_controls: Vec<InsertControls>,
}

impl_walk!(CustomGrouping { groups, insert_controls });

/// A group in a custom merge structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProfileGroup {
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
    pub groups: Vec<ProfileGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insert_controls: Vec<InsertControls>,
}

impl_walk!(ProfileGroup {
    id, class, title, params, props, links, parts, groups, insert_controls,
} require [title]);

/// Controls placed at this point of a custom grouping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InsertControls {
    /// `keep`, `ascending`, or `descending`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<IncludeAll>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_controls: Vec<ControlSelector>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_controls: Vec<ControlSelector>,
}

impl_walk!(InsertControls { order, include_all, include_controls, exclude_controls });

// ─── Modify ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Modify {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub set_parameters: Vec<ParameterSetting>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alters: Vec<Alteration>,
}

impl_walk!(Modify { set_parameters, alters });

/// An override of an imported parameter's properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParameterSetting {
    pub param_id: Ref<kind::Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Ref<kind::Parameter>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub guidelines: Vec<Guideline>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<NonBlank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Selection>,
}

impl_walk!(ParameterSetting {
    param_id, class, depends_on, props, links, label, usage, constraints, guidelines, values,
    select,
} require [param_id]);

/// Removals followed by additions against one control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Alteration {
    pub control_id: Ref<kind::Control>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removes: Vec<Removal>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub adds: Vec<Addition>,
}

impl_walk!(Alteration { control_id, removes, adds } require [control_id]);

/// Selects content to remove from the altered control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Removal {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_name: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_class: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_id: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_item_name: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_ns: Option<Token>,
}

impl_walk!(Removal { by_name, by_class, by_id, by_item_name, by_ns });

/// Content added to the altered control, at `position` relative to `by-id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Addition {
    /// `before`, `after`, `starting`, or `ending`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub by_id: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,
}

impl_walk!(Addition { position, by_id, title, params, props, links, parts });
