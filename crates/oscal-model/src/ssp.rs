//! # System Security Plan
//!
//! How a system implements the control baseline of an imported profile:
//! the system's characteristics, its implementation (users, components,
//! inventory), and per-control implementation statements.

use serde::{Deserialize, Serialize};

use oscal_core::{kind, DateWithTimezone, Id, ImportHref, NonBlank, OscalUuid, Ref, Token, UriRef};

use crate::implementation_common::{
    ImplementationStatus, InventoryItem, SetParameter, SystemComponent, SystemId, SystemUser,
};
use crate::metadata::{BackMatter, Link, Metadata, Property, ResponsibleParty, ResponsibleRole};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemSecurityPlan {
    pub uuid: OscalUuid,
    pub metadata: Metadata,
    pub import_profile: ImportProfile,
    pub system_characteristics: SystemCharacteristics,
    pub system_implementation: SystemImplementation,
    pub control_implementation: ControlImplementation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_matter: Option<BackMatter>,
}

impl_walk!(SystemSecurityPlan {
    uuid, metadata, import_profile, system_characteristics, system_implementation,
    control_implementation, back_matter,
} require [uuid]);

impl SystemSecurityPlan {
    /// The system component with the given UUID.
    pub fn component(&self, uuid: &str) -> Option<&SystemComponent> {
        self.system_implementation
            .components
            .iter()
            .find(|c| c.uuid.as_str() == uuid)
    }

    /// The implemented requirement for the given control id.
    pub fn implemented_requirement(&self, control_id: &str) -> Option<&ImplementedRequirement> {
        self.control_implementation
            .implemented_requirements
            .iter()
            .find(|r| r.control_id.as_str() == control_id)
    }
}

/// The profile this plan implements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImportProfile {
    pub href: ImportHref,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ImportProfile { href, remarks } require [href]);

// ─── System Characteristics ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemCharacteristics {
    pub system_ids: Vec<SystemId>,
    pub system_name: NonBlank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_name_short: Option<NonBlank>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_authorized: Option<DateWithTimezone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_sensitivity_level: Option<NonBlank>,
    pub system_information: SystemInformation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_impact_level: Option<SecurityImpactLevel>,
    pub status: SystemStatus,
    pub authorization_boundary: ArchitectureView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_architecture: Option<ArchitectureView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_flow: Option<ArchitectureView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_parties: Vec<ResponsibleParty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(SystemCharacteristics {
    system_ids, system_name, system_name_short, description, props, links, date_authorized,
    security_sensitivity_level, system_information, security_impact_level, status,
    authorization_boundary, network_architecture, data_flow, responsible_parties, remarks,
} require [system_ids, system_name, description]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemInformation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    pub information_types: Vec<InformationType>,
}

impl_walk!(SystemInformation { props, links, information_types } require [information_types]);

/// A category of information processed by the system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InformationType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Id<kind::InformationType>>,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categorizations: Vec<Categorization>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidentiality_impact: Option<Impact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_impact: Option<Impact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_impact: Option<Impact>,
}

impl_walk!(InformationType {
    uuid, title, description, categorizations, props, links, confidentiality_impact,
    integrity_impact, availability_impact,
} require [title, description]);

/// Information type identifiers under a categorization system
/// (e.g. NIST SP 800-60).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Categorization {
    pub system: UriRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub information_type_ids: Vec<String>,
}

impl_walk!(Categorization { system, information_type_ids } require [system]);

/// Base and selected impact level for one security objective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Impact {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    pub base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_justification: Option<String>,
}

impl_walk!(Impact { props, links, base, selected, adjustment_justification } require [base]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SecurityImpactLevel {
    pub security_objective_confidentiality: NonBlank,
    pub security_objective_integrity: NonBlank,
    pub security_objective_availability: NonBlank,
}

impl_walk!(SecurityImpactLevel {
    security_objective_confidentiality, security_objective_integrity,
    security_objective_availability,
} require [
    security_objective_confidentiality, security_objective_integrity,
    security_objective_availability,
]);

/// Operational status of the system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemStatus {
    pub state: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(SystemStatus { state, remarks } require [state]);

/// The shape shared by the authorization boundary, network architecture,
/// and data flow descriptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ArchitectureView {
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagrams: Vec<Diagram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ArchitectureView { description, props, links, diagrams, remarks } require [description]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Diagram {
    pub uuid: Id<kind::Diagram>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Diagram { uuid, description, props, links, caption, remarks } require [uuid]);

// ─── System Implementation ───────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemImplementation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leveraged_authorizations: Vec<LeveragedAuthorization>,
    pub users: Vec<SystemUser>,
    pub components: Vec<SystemComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inventory_items: Vec<InventoryItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(SystemImplementation {
    props, links, leveraged_authorizations, users, components, inventory_items, remarks,
} require [users, components]);

/// An external authorization this system inherits controls from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LeveragedAuthorization {
    pub uuid: Id<kind::LeveragedAuthorization>,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    pub party_uuid: Ref<kind::Party>,
    pub date_authorized: DateWithTimezone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(LeveragedAuthorization {
    uuid, title, props, links, party_uuid, date_authorized, remarks,
} require [uuid, title, party_uuid, date_authorized]);

// ─── Control Implementation ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ControlImplementation {
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub set_parameters: Vec<SetParameter>,
    pub implemented_requirements: Vec<ImplementedRequirement>,
}

impl_walk!(ControlImplementation {
    description, set_parameters, implemented_requirements,
} require [implemented_requirements]);

/// How the system implements one control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImplementedRequirement {
    pub uuid: Id<kind::ImplementedRequirement>,
    pub control_id: Ref<kind::Control>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub set_parameters: Vec<SetParameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub statements: Vec<Statement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_components: Vec<ByComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ImplementedRequirement {
    uuid, control_id, props, links, set_parameters, responsible_roles, statements,
    by_components, remarks,
} require [uuid, control_id]);

/// Implementation of one statement of a control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Statement {
    pub statement_id: Ref<kind::Part>,
    pub uuid: Id<kind::Statement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_components: Vec<ByComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Statement {
    statement_id, uuid, props, links, responsible_roles, by_components, remarks,
} require [statement_id, uuid]);

/// How one component contributes to a control or statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ByComponent {
    pub component_uuid: Ref<kind::Component>,
    pub uuid: Id<kind::ByComponent>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub set_parameters: Vec<SetParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation_status: Option<ImplementationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<Export>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inherited: Vec<Inherited>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub satisfied: Vec<Satisfied>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ByComponent {
    component_uuid, uuid, description, props, links, set_parameters, implementation_status,
    export, inherited, satisfied, responsible_roles, remarks,
} require [component_uuid, uuid, description]);

/// Capabilities this system provides to, and responsibilities it leaves
/// with, leveraging systems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Export {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub provided: Vec<Provided>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsibilities: Vec<Responsibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Export { description, props, links, provided, responsibilities, remarks });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Provided {
    pub uuid: Id<kind::Provided>,
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

impl_walk!(Provided {
    uuid, description, props, links, responsible_roles, remarks,
} require [uuid, description]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Responsibility {
    pub uuid: Id<kind::Responsibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provided_uuid: Option<Ref<kind::Provided>>,
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

impl_walk!(Responsibility {
    uuid, provided_uuid, description, props, links, responsible_roles, remarks,
} require [uuid, description]);

/// A capability inherited from a leveraged system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Inherited {
    pub uuid: OscalUuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provided_uuid: Option<Ref<kind::Provided>>,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_roles: Vec<ResponsibleRole>,
}

impl_walk!(Inherited {
    uuid, provided_uuid, description, props, links, responsible_roles,
} require [uuid, description]);

/// A leveraged system's responsibility this system satisfies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Satisfied {
    pub uuid: OscalUuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsibility_uuid: Option<Ref<kind::Responsibility>>,
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

impl_walk!(Satisfied {
    uuid, responsibility_uuid, description, props, links, responsible_roles, remarks,
} require [uuid, description]);
