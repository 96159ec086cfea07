//! # oscal-model: The OSCAL Document Model
//!
//! Record types for the seven OSCAL models and the substrates they share,
//! layered leaves first:
//!
//! | Layer | Modules |
//! |---|---|
//! | Metadata | [`metadata`] |
//! | Catalog common | [`catalog_common`] |
//! | Implementation common | [`implementation_common`] |
//! | Assessment common | [`assessment_common`] |
//! | Document roots | [`catalog`], [`profile`], [`component_definition`], [`ssp`], [`assessment_plan`], [`assessment_results`], [`poam`] |
//!
//! [`Document`] is the envelope over the seven roots.
//!
//! ## Conventions
//!
//! - Field names serialize in OSCAL JSON kebab-case.
//! - Every record decodes with missing fields defaulted. Required fields
//!   are not `Option`; a missing one decodes as empty and is reported by
//!   the cardinality pass in `oscal-schema` together with every other
//!   violation, instead of aborting the decode.
//! - Sequences are omitted when empty.
//! - Identifiers are [`oscal_core::Id`] at their definition and
//!   [`oscal_core::Ref`] wherever they are referenced. Nothing is embedded
//!   by value across a reference edge.
//! - Containment trees (controls, groups, parts, tasks) own their children.
//!   Profile alterations and other modifications are declarative records
//!   applied by an external resolver, never in-place edits.

#[macro_use]
mod macros;

pub mod assessment_common;
pub mod assessment_plan;
pub mod assessment_results;
pub mod catalog;
pub mod catalog_common;
pub mod component_definition;
pub mod document;
pub mod implementation_common;
pub mod metadata;
pub mod poam;
pub mod profile;
pub mod ssp;

pub use assessment_plan::AssessmentPlan;
pub use assessment_results::{AssessmentResult, AssessmentResults, Finding};
pub use catalog::{Catalog, Control, Group};
pub use catalog_common::{IncludeAll, Parameter, Part};
pub use component_definition::{ComponentDefinition, DefinedComponent};
pub use document::{Document, DocumentKind};
pub use metadata::{BackMatter, Metadata, Party, Resource, Role};
pub use poam::{PlanOfActionAndMilestones, PoamItem};
pub use profile::{Alteration, Profile};
pub use ssp::SystemSecurityPlan;
