//! # Error Types
//!
//! Errors raised by the constructors and conversions in this crate. All
//! errors use `thiserror` for derive-based `Display` and `Error`.
//!
//! Field-level validation failures are *not* errors here: the validator in
//! `oscal-schema` collects them as structured violations. The variants below
//! cover conversions a caller asks for explicitly, such as turning a checked
//! timestamp string into a `chrono` value.

use thiserror::Error;

use crate::patterns::FieldClass;

/// Top-level error type for the OSCAL core primitives.
#[derive(Error, Debug)]
pub enum OscalError {
    /// A value did not match the pattern of its field class.
    #[error("invalid {class} value {value:?}: expected {}", class.expected())]
    InvalidValue {
        /// Constraint class the value was checked against.
        class: FieldClass,
        /// The offending raw value.
        value: String,
    },

    /// A timestamp matched its pattern but could not be converted.
    #[error("timestamp conversion failed for {value:?}: {reason}")]
    Timestamp {
        /// The raw timestamp.
        value: String,
        /// Underlying parser message.
        reason: String,
    },

    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl OscalError {
    /// Shorthand for [`OscalError::InvalidValue`].
    pub fn invalid(class: FieldClass, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            class,
            value: value.into(),
        }
    }
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// OSCAL numeric fields (port ranges, task frequencies) are integers.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
