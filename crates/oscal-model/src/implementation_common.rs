//! # Implementation Common Substrate
//!
//! System components, users, inventory, and parameter settings shared by
//! the SSP, the assessment documents, and the POA&M.

use serde::{Deserialize, Serialize};

use oscal_core::{kind, Id, NonBlank, OscalUuid, Ref, Token, UriRef};

use crate::metadata::{Link, Property, ResponsibleParty, ResponsibleRole};

/// A component of the system under description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemComponent {
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
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub protocols: Vec<Protocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(SystemComponent {
    uuid, r#type, title, description, purpose, props, links, status, responsible_roles,
    protocols, remarks,
} require [uuid, r#type, title, description]);

/// Operational state of a component: `under-development`, `operational`,
/// `disposition`, or `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ComponentStatus {
    pub state: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ComponentStatus { state, remarks } require [state]);

/// A network service exposed by a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Protocol {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<OscalUuid>,
    pub name: NonBlank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub port_ranges: Vec<PortRange>,
}

impl_walk!(Protocol { uuid, name, title, port_ranges } require [name]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PortRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
    /// `TCP` or `UDP`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<Token>,
}

impl_walk!(PortRange { start, end, transport });

/// Implementation state of a control or objective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImplementationStatus {
    pub state: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ImplementationStatus { state, remarks } require [state]);

/// A type of user that interacts with the system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemUser {
    pub uuid: Id<kind::User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<NonBlank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub role_ids: Vec<Ref<kind::Role>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authorized_privileges: Vec<AuthorizedPrivilege>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(SystemUser {
    uuid, title, short_name, description, props, links, role_ids, authorized_privileges,
    remarks,
} require [uuid]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AuthorizedPrivilege {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub functions_performed: Vec<NonBlank>,
}

impl_walk!(AuthorizedPrivilege {
    title, description, functions_performed,
} require [title, functions_performed]);

/// A single managed asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InventoryItem {
    pub uuid: Id<kind::InventoryItem>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_parties: Vec<ResponsibleParty>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implemented_components: Vec<ImplementedComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(InventoryItem {
    uuid, description, props, links, responsible_parties, implemented_components, remarks,
} require [uuid, description]);

/// A component implemented by an inventory item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImplementedComponent {
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

impl_walk!(ImplementedComponent {
    component_uuid, props, links, responsible_parties, remarks,
} require [component_uuid]);

/// A value assigned to a parameter by an implementation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SetParameter {
    pub param_id: Ref<kind::Parameter>,
    pub values: Vec<NonBlank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(SetParameter { param_id, values, remarks } require [param_id, values]);

/// A system identifier under an identification scheme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemId {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_type: Option<UriRef>,
    pub id: String,
}

impl_walk!(SystemId { identifier_type, id } require [id]);
