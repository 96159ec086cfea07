//! # Component Definition
//!
//! Reusable descriptions of components and capabilities and the controls
//! they help satisfy, ready to be incorporated into an SSP.

use serde::{Deserialize, Serialize};

use oscal_core::{kind, Id, ImportHref, NonBlank, OscalUuid, Ref};

use crate::implementation_common::{Protocol, SetParameter};
use crate::metadata::{BackMatter, Link, Metadata, Property, ResponsibleRole};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ComponentDefinition {
    pub uuid: OscalUuid,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub import_component_definitions: Vec<ImportComponentDefinition>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<DefinedComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<Capability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

impl_walk!(ComponentDefinition {
    uuid, metadata, import_component_definitions, components, capabilities, back_matter,
} require [uuid]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImportComponentDefinition {
    pub href: ImportHref,
}

impl_walk!(ImportComponentDefinition { href } require [href]);

/// A component as defined for reuse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DefinedComponent {
    pub uuid: Id<kind::Component>,
    #[serde(rename = "type")]
    pub r#type: NonBlank,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub protocols: Vec<Protocol>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub control_implementations: Vec<ControlImplementationSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(DefinedComponent {
    uuid, r#type, title, description, purpose, props, links, responsible_roles, protocols,
    control_implementations, remarks,
} require [uuid, r#type, title, description]);

/// A grouping of other components that together provide a capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Capability {
    pub uuid: Id<kind::Capability>,
    pub name: NonBlank,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub incorporates_components: Vec<IncorporatesComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub control_implementations: Vec<ControlImplementationSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Capability {
    uuid, name, description, props, links, incorporates_components, control_implementations,
    remarks,
} require [uuid, name, description]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IncorporatesComponent {
    pub component_uuid: Ref<kind::Component>,
    pub description: String,
}

impl_walk!(IncorporatesComponent { component_uuid, description } require [component_uuid]);

/// Implementations of controls from one source catalog or profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ControlImplementationSet {
    pub uuid: OscalUuid,
    /// The catalog or profile the implemented controls come from.
    pub source: ImportHref,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub set_parameters: Vec<SetParameter>,
    pub implemented_requirements: Vec<ComponentRequirement>,
}

impl_walk!(ControlImplementationSet {
    uuid, source, description, props, links, set_parameters, implemented_requirements,
} require [uuid, source, implemented_requirements]);

/// How a component implements one control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ComponentRequirement {
    pub uuid: Id<kind::ImplementedRequirement>,
    pub control_id: Ref<kind::Control>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub set_parameters: Vec<SetParameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<ComponentStatement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ComponentRequirement {
    uuid, control_id, description, props, links, set_parameters, responsible_roles,
    statements, remarks,
} require [uuid, control_id]);

/// How a component implements one statement of a control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ComponentStatement {
    pub statement_id: Ref<kind::Part>,
    pub uuid: Id<kind::Statement>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ComponentStatement {
    statement_id, uuid, description, props, links, responsible_roles, remarks,
} require [statement_id, uuid]);
