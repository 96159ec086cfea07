//! # Entity Kinds and Typed References
//!
//! Every referencable OSCAL entity belongs to an [`EntityKind`], and every
//! kind lives in exactly one [`IdentifierSpace`]. The defining identifier of
//! an entity is an [`Id<K>`]; a weak edge to it is a [`Ref<K>`]. `K` is a
//! zero-sized marker from [`kind`], so a `Ref<kind::Party>` cannot be stored
//! where a `Ref<kind::Role>` is expected.
//!
//! ## Security Invariant
//!
//! UUID references resolve only among UUID-keyed entities and token
//! references only among token-keyed entities of the same kind. Confusing the
//! two scopes would let a control id silently satisfy a role reference.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::patterns::FieldClass;
use crate::walk::{Cardinality, Visitor, Walk};

/// The identifier space a kind is keyed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierSpace {
    /// Globally unique version-4 UUIDs. One namespace per document.
    Uuid,
    /// Document-scoped tokens. One namespace per kind per document.
    Token,
}

impl IdentifierSpace {
    /// The field class identifiers in this space must match.
    pub fn field_class(&self) -> FieldClass {
        match self {
            Self::Uuid => FieldClass::Uuid,
            Self::Token => FieldClass::Token,
        }
    }
}

/// All referencable entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    // ── token space ──
    /// Catalog control.
    Control,
    /// Catalog or profile control group.
    Group,
    /// Control part; statement ids reference parts.
    Part,
    /// Control or catalog parameter.
    Parameter,
    /// Metadata role.
    Role,
    /// Assessment objective (a part of an objective control).
    Objective,

    // ── uuid space ──
    /// Metadata party.
    Party,
    /// Metadata location.
    Location,
    /// Back-matter resource.
    Resource,
    /// System or defined component.
    Component,
    /// Component-definition capability.
    Capability,
    /// Inventory item.
    InventoryItem,
    /// System user.
    User,
    /// Authorization-boundary, network, or data-flow diagram.
    Diagram,
    /// Information type.
    InformationType,
    /// Leveraged authorization.
    LeveragedAuthorization,
    /// Implemented control requirement.
    ImplementedRequirement,
    /// Statement-level implementation.
    Statement,
    /// Component control implementation (`by-component`).
    ByComponent,
    /// Exported provided capability.
    Provided,
    /// Exported customer responsibility.
    Responsibility,
    /// Assessment task.
    Task,
    /// Assessment activity.
    Activity,
    /// Assessment method.
    AssessmentMethod,
    /// Assessment subject placeholder.
    SubjectPlaceholder,
    /// Assessment platform.
    AssessmentPlatform,
    /// Assessment result.
    Result,
    /// Observation.
    Observation,
    /// Identified risk.
    Risk,
    /// Risk response (remediation).
    RiskResponse,
    /// Risk log entry.
    RiskLogEntry,
    /// Step of an activity.
    Step,
    /// Mitigating factor of a risk.
    MitigatingFactor,
    /// Asset a risk response requires.
    RequiredAsset,
    /// Finding.
    Finding,
    /// POA&M item.
    PoamItem,

    // ── polymorphic targets (uuid space) ──
    /// Anything an assessment can be about.
    Subject,
    /// Anything that can originate an observation or risk.
    Actor,
}

impl EntityKind {
    /// The identifier space this kind lives in.
    pub fn space(&self) -> IdentifierSpace {
        match self {
            Self::Control
            | Self::Group
            | Self::Part
            | Self::Parameter
            | Self::Role
            | Self::Objective => IdentifierSpace::Token,
            _ => IdentifierSpace::Uuid,
        }
    }

    /// Returns true if this kind is only ever a reference target and never
    /// the kind of a concrete definition.
    pub fn is_polymorphic(&self) -> bool {
        matches!(self, Self::Subject | Self::Actor)
    }

    /// Returns true if an entity registered as `found` satisfies a reference
    /// to `self`.
    pub fn accepts(&self, found: EntityKind) -> bool {
        match self {
            Self::Subject => matches!(
                found,
                Self::Component
                    | Self::InventoryItem
                    | Self::Location
                    | Self::Party
                    | Self::User
                    | Self::Resource
            ),
            Self::Actor => matches!(
                found,
                Self::Party | Self::Component | Self::AssessmentPlatform
            ),
            // Objectives are parts of the control statement tree.
            Self::Objective => matches!(found, Self::Objective | Self::Part),
            other => *other == found,
        }
    }

    /// Kebab-case name as used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Group => "group",
            Self::Part => "part",
            Self::Parameter => "parameter",
            Self::Role => "role",
            Self::Objective => "objective",
            Self::Party => "party",
            Self::Location => "location",
            Self::Resource => "resource",
            Self::Component => "component",
            Self::Capability => "capability",
            Self::InventoryItem => "inventory-item",
            Self::User => "user",
            Self::Diagram => "diagram",
            Self::InformationType => "information-type",
            Self::LeveragedAuthorization => "leveraged-authorization",
            Self::ImplementedRequirement => "implemented-requirement",
            Self::Statement => "statement",
            Self::ByComponent => "by-component",
            Self::Provided => "provided",
            Self::Responsibility => "responsibility",
            Self::Task => "task",
            Self::Activity => "activity",
            Self::AssessmentMethod => "assessment-method",
            Self::SubjectPlaceholder => "subject-placeholder",
            Self::AssessmentPlatform => "assessment-platform",
            Self::Result => "result",
            Self::Observation => "observation",
            Self::Risk => "risk",
            Self::RiskResponse => "risk-response",
            Self::RiskLogEntry => "risk-log-entry",
            Self::Step => "step",
            Self::MitigatingFactor => "mitigating-factor",
            Self::RequiredAsset => "required-asset",
            Self::Finding => "finding",
            Self::PoamItem => "poam-item",
            Self::Subject => "subject",
            Self::Actor => "actor",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A zero-sized marker naming the target kind of an [`Id`] or [`Ref`].
pub trait Kind: 'static {
    /// The runtime kind tag.
    const KIND: EntityKind;
}

/// Marker types, one per [`EntityKind`].
pub mod kind {
    use super::{EntityKind, Kind};

    macro_rules! kinds {
        ($($name:ident),* $(,)?) => {
            $(
                #[doc = concat!("Marker for [`EntityKind::", stringify!($name), "`].")]
                #[derive(Debug)]
                pub enum $name {}

                impl Kind for $name {
                    const KIND: EntityKind = EntityKind::$name;
                }
            )*
        };
    }

    kinds!(
        Control,
        Group,
        Part,
        Parameter,
        Role,
        Objective,
        Party,
        Location,
        Resource,
        Component,
        Capability,
        InventoryItem,
        User,
        Diagram,
        InformationType,
        LeveragedAuthorization,
        ImplementedRequirement,
        Statement,
        ByComponent,
        Provided,
        Responsibility,
        Task,
        Activity,
        AssessmentMethod,
        SubjectPlaceholder,
        AssessmentPlatform,
        Result,
        Observation,
        Risk,
        RiskResponse,
        RiskLogEntry,
        Step,
        MitigatingFactor,
        RequiredAsset,
        Finding,
        PoamItem,
        Subject,
        Actor,
    );
}

macro_rules! typed_identifier {
    ($(#[$meta:meta])* $name:ident, $visit:ident) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize)]
        #[serde(transparent, bound = "")]
        pub struct $name<K: Kind> {
            value: String,
            #[serde(skip)]
            _kind: PhantomData<fn() -> K>,
        }

        impl<K: Kind> $name<K> {
            /// Wrap a raw identifier without checking it.
            pub fn new(value: impl Into<String>) -> Self {
                Self {
                    value: value.into(),
                    _kind: PhantomData,
                }
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.value
            }

            /// The target kind.
            pub fn kind(&self) -> EntityKind {
                K::KIND
            }

            /// Returns true if the identifier matches the pattern of its space.
            pub fn is_valid(&self) -> bool {
                K::KIND.space().field_class().matches(&self.value)
            }
        }

        impl<K: Kind> Clone for $name<K> {
            fn clone(&self) -> Self {
                Self::new(self.value.clone())
            }
        }

        impl<K: Kind> Default for $name<K> {
            fn default() -> Self {
                Self::new(String::new())
            }
        }

        impl<K: Kind> PartialEq for $name<K> {
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        impl<K: Kind> Eq for $name<K> {}

        impl<K: Kind> Hash for $name<K> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.value.hash(state);
            }
        }

        impl<K: Kind> fmt::Debug for $name<K> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}<{}>({:?})", stringify!($name), K::KIND, self.value)
            }
        }

        impl<K: Kind> fmt::Display for $name<K> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.value)
            }
        }

        impl<K: Kind> From<&str> for $name<K> {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl<K: Kind> From<String> for $name<K> {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl<K: Kind> Cardinality for $name<K> {
            fn count(&self) -> usize {
                usize::from(!self.value.is_empty())
            }
        }

        impl<K: Kind> Walk for $name<K> {
            fn walk<V: Visitor + ?Sized>(&self, path: &str, visitor: &mut V) {
                visitor.$visit(path, K::KIND, &self.value);
            }
        }
    };
}

typed_identifier! {
    /// The defining identifier of an entity of kind `K`.
    Id, visit_definition
}

typed_identifier! {
    /// A weak reference to an entity of kind `K`, resolved lazily.
    Ref, visit_reference
}

impl<K: Kind> Id<K> {
    /// Generate a fresh random identifier. Meaningful for UUID-space kinds.
    pub fn new_v4() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// A reference pointing at this definition.
    pub fn to_ref(&self) -> Ref<K> {
        Ref::new(self.value.clone())
    }
}

impl<K: Kind> Ref<K> {
    /// Returns true if this reference targets `id`.
    pub fn targets(&self, id: &Id<K>) -> bool {
        self.value == id.value
    }
}
