//! # Catalog Common Substrate
//!
//! Parts, parameters, and their constraints. Shared by catalogs, profile
//! additions and groups, and assessment objectives.

use serde::{Deserialize, Serialize};

use oscal_core::{kind, Id, NonBlank, Ref, Token, UriRef};

use crate::metadata::{Link, Property};

/// A named, typed fragment of prose or structure.
///
/// `(name, ns, class)` need not be unique among siblings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id<kind::Part>>,
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
    pub parts: Vec<Part>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl_walk!(Part { id, name, ns, class, title, props, prose, parts, links } require [name]);

impl Part {
    /// Depth-first iterator over this part and all nested parts.
    pub fn descendants(&self) -> impl Iterator<Item = &Part> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.parts.iter().rev());
            Some(next)
        })
    }
}

/// A placeholder value within a control, assignable by a profile or an
/// implementation.
///
/// A parameter usually carries either `values` or `select`; both are plain
/// optional fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Parameter {
    pub id: Id<kind::Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Token>,
    /// Another parameter this one's value derives from. Must not form a cycle.
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Parameter {
    id, class, depends_on, props, links, label, usage, constraints, guidelines, values,
    select, remarks,
} require [id]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Constraint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<ConstraintTest>,
}

impl_walk!(Constraint { description, tests });

/// A formal test expression over a parameter value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConstraintTest {
    pub expression: NonBlank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ConstraintTest { expression, remarks } require [expression]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Guideline {
    pub prose: String,
}

impl_walk!(Guideline { prose } require [prose]);

/// A set of choices for a parameter value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Selection {
    /// `one` or `one-or-more`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_many: Option<Token>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choice: Vec<String>,
}

impl_walk!(Selection { how_many, choice });

/// Presence marker meaning "include everything". Carries no fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeAll {}

impl_walk!(IncludeAll {});
