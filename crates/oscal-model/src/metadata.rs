//! # Metadata Substrate
//!
//! Publication metadata shared by every document type, the party, role and
//! location definitions that other sections reference by identifier, and the
//! back-matter resource collection.
//!
//! Parties, roles and locations are defined here and only here. Everywhere
//! else they appear as [`Ref`]s: `party-uuids`, `role-id`, `location-uuids`.

use serde::{Deserialize, Serialize};

use oscal_core::{
    kind, DateTimeWithTimezone, Email, Href, Id, NonBlank, OscalUuid, Ref, Token, UriRef,
};

// ─── Publication Metadata ────────────────────────────────────────────

/// Document-level publication metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Metadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTimeWithTimezone>,
    pub last_modified: DateTimeWithTimezone,
    pub version: NonBlank,
    pub oscal_version: NonBlank,
    /// Most recent first by convention. Order is preserved, not checked.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub revisions: Vec<RevisionHistoryEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub document_ids: Vec<DocumentIdentifier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parties: Vec<Party>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responsible_parties: Vec<ResponsibleParty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Metadata {
    title, published, last_modified, version, oscal_version, revisions, document_ids,
    props, links, roles, locations, parties, responsible_parties, remarks,
} require [title, last_modified, version, oscal_version]);

impl Metadata {
    /// The party with the given UUID.
    pub fn party(&self, uuid: &str) -> Option<&Party> {
        self.parties.iter().find(|p| p.uuid.as_str() == uuid)
    }

    /// The role with the given id.
    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id.as_str() == id)
    }

    /// The location with the given UUID.
    pub fn location(&self, uuid: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.uuid.as_str() == uuid)
    }
}

/// A previous published version of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RevisionHistoryEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTimeWithTimezone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTimeWithTimezone>,
    pub version: NonBlank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oscal_version: Option<NonBlank>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(RevisionHistoryEntry {
    title, published, last_modified, version, oscal_version, props, links, remarks,
} require [version]);

/// An identifier for the document under some external scheme (e.g. a DOI).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DocumentIdentifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<UriRef>,
    pub identifier: String,
}

impl_walk!(DocumentIdentifier { scheme, identifier } require [identifier]);

// ─── Properties and Links ────────────────────────────────────────────

/// A name/value pair with an optional namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Property {
    pub name: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<OscalUuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ns: Option<UriRef>,
    pub value: NonBlank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Property { name, uuid, ns, value, class, remarks } require [name, value]);

/// A reference to a local or remote resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Link {
    pub href: Href,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<NonBlank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl_walk!(Link { href, rel, media_type, text } require [href]);

// ─── Roles, Parties, Locations ───────────────────────────────────────

/// A function assumed or expected to be assumed by a party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Role {
    pub id: Id<kind::Role>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<NonBlank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Role { id, title, short_name, description, props, links, remarks } require [id, title]);

/// A person or organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Party {
    pub uuid: Id<kind::Party>,
    /// `person` or `organization`.
    #[serde(rename = "type")]
    pub r#type: NonBlank,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NonBlank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<NonBlank>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_ids: Vec<ExternalId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<Email>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telephone_numbers: Vec<TelephoneNumber>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub location_uuids: Vec<Ref<kind::Location>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub member_of_organizations: Vec<Ref<kind::Party>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Party {
    uuid, r#type, name, short_name, external_ids, props, links, email_addresses,
    telephone_numbers, addresses, location_uuids, member_of_organizations, remarks,
} require [uuid, r#type]);

/// An identifier for a party under an external scheme (e.g. ORCID).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExternalId {
    pub scheme: UriRef,
    pub id: String,
}

impl_walk!(ExternalId { scheme, id } require [scheme, id]);

/// A physical point of presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Location {
    pub uuid: Id<kind::Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<Email>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telephone_numbers: Vec<TelephoneNumber>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<UriRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Location {
    uuid, title, address, email_addresses, telephone_numbers, urls, props, links, remarks,
} require [uuid]);

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Address {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Token>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addr_lines: Vec<NonBlank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<NonBlank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<NonBlank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<NonBlank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<NonBlank>,
}

impl_walk!(Address { r#type, addr_lines, city, state, postal_code, country });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TelephoneNumber {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub r#type: Option<NonBlank>,
    pub number: String,
}

impl_walk!(TelephoneNumber { r#type, number } require [number]);

// ─── Responsibility Assignments ──────────────────────────────────────

/// Parties assigned to a role for the enclosing object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResponsibleParty {
    pub role_id: Ref<kind::Role>,
    pub party_uuids: Vec<Ref<kind::Party>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ResponsibleParty {
    role_id, party_uuids, props, links, remarks,
} require [role_id, party_uuids]);

/// A role with optional assigned parties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResponsibleRole {
    pub role_id: Ref<kind::Role>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub party_uuids: Vec<Ref<kind::Party>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(ResponsibleRole { role_id, props, links, party_uuids, remarks } require [role_id]);

// ─── Back Matter ─────────────────────────────────────────────────────

/// Resources referenced from the document body, usually by `#<uuid>` href.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BackMatter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

impl_walk!(BackMatter { resources });

impl BackMatter {
    /// The resource with the given UUID.
    pub fn resource(&self, uuid: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.uuid.as_str() == uuid)
    }
}

/// A citation, remote link set, or embedded payload.
///
/// Either `rlinks` or `base64` is the usual realization of the content; both
/// may be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Resource {
    pub uuid: Id<kind::Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub document_ids: Vec<DocumentIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<Citation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rlinks: Vec<Rlink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<Base64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl_walk!(Resource {
    uuid, title, description, props, document_ids, citation, rlinks, base64, remarks,
} require [uuid]);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Citation {
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl_walk!(Citation { text, props, links } require [text]);

/// A remote location of the resource content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Rlink {
    pub href: Href,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<NonBlank>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hashes: Vec<Hash>,
}

impl_walk!(Rlink { href, media_type, hashes } require [href]);

/// Base64-encoded resource content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Base64 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<NonBlank>,
    pub value: String,
}

impl_walk!(Base64 { filename, media_type, value } require [value]);

/// A digest of remote content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Hash {
    /// E.g. `SHA-256`.
    pub algorithm: NonBlank,
    pub value: String,
}

impl_walk!(Hash { algorithm, value } require [algorithm, value]);
