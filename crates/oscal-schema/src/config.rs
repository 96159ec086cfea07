//! # Validation Configuration
//!
//! Policy knobs for [`crate::DocumentValidator`] and
//! [`crate::ReferenceChecker`]. The defaults check everything; a config file
//! (YAML or JSON) can relax individual pattern classes for documents
//! produced by tools known to emit, say, offset-less timestamps.
//!
//! ```yaml
//! patterns:
//!   check-emails: false
//! references:
//!   report-external: true
//! max-violations: 500
//! ```

use std::path::Path;

use oscal_core::FieldClass;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading or checking a [`ValidationConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config io error for '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A field holds a value that makes no sense.
    #[error("invalid config field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Which pattern classes are enforced. UUIDs, tokens and non-blank strings
/// are always checked: identifier resolution depends on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PatternPolicy {
    /// Date-time and date fields.
    pub check_timestamps: bool,
    pub check_emails: bool,
    /// `ns`, `system`, and other absolute-URI fields.
    pub check_namespace_uris: bool,
}

impl Default for PatternPolicy {
    fn default() -> Self {
        Self {
            check_timestamps: true,
            check_emails: true,
            check_namespace_uris: true,
        }
    }
}

impl PatternPolicy {
    /// Returns true if values of `class` should be checked.
    pub fn enforces(&self, class: FieldClass) -> bool {
        match class {
            FieldClass::DateTime | FieldClass::Date => self.check_timestamps,
            FieldClass::Email => self.check_emails,
            FieldClass::Uri => self.check_namespace_uris,
            FieldClass::Uuid | FieldClass::Token | FieldClass::NonBlank => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReferencePolicy {
    /// Include references into unsupplied upstream documents in the report.
    pub report_external: bool,
    /// Resolve `#fragment` hrefs against back-matter resources.
    pub check_fragments: bool,
    /// Look for cycles in catalog parameter `depends-on` chains.
    pub check_parameter_cycles: bool,
}

impl Default for ReferencePolicy {
    fn default() -> Self {
        Self {
            report_external: true,
            check_fragments: true,
            check_parameter_cycles: true,
        }
    }
}

/// Top-level validation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ValidationConfig {
    pub patterns: PatternPolicy,
    pub references: ReferencePolicy,
    /// Stop collecting after this many violations. `None` collects all.
    pub max_violations: Option<usize>,
}

impl ValidationConfig {
    /// Parse from YAML text. Missing fields take their defaults.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load from a file. `.json` files are read as JSON, anything else as
    /// YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = if path.extension().is_some_and(|e| e == "json") {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        tracing::debug!(path = %path.display(), ?config, "loaded validation config");
        Ok(config)
    }
}

/// Sanity-check a configuration.
///
/// # Errors
///
/// `ConfigError::Invalid` if `max-violations` is zero, which would make
/// every document fail with an empty report.
pub fn validate_config(config: &ValidationConfig) -> Result<(), ConfigError> {
    if config.max_violations == Some(0) {
        return Err(ConfigError::Invalid {
            field: "max-violations",
            reason: "must be at least 1 when set".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_check_everything() {
        let config = ValidationConfig::default();
        for class in [
            FieldClass::Uuid,
            FieldClass::Token,
            FieldClass::DateTime,
            FieldClass::Date,
            FieldClass::NonBlank,
            FieldClass::Email,
            FieldClass::Uri,
        ] {
            assert!(config.patterns.enforces(class), "{class}");
        }
        assert!(config.references.report_external);
        assert_eq!(config.max_violations, None);
    }

    #[test]
    fn test_yaml_partial_override() {
        let config = ValidationConfig::from_yaml_str(
            "patterns:\n  check-emails: false\nmax-violations: 50\n",
        )
        .unwrap();
        assert!(!config.patterns.enforces(FieldClass::Email));
        assert!(config.patterns.enforces(FieldClass::DateTime));
        assert!(config.patterns.enforces(FieldClass::Uuid));
        assert_eq!(config.max_violations, Some(50));
    }

    #[test]
    fn test_json_config() {
        let config =
            ValidationConfig::from_json_str(r#"{"references": {"report-external": false}}"#)
                .unwrap();
        assert!(!config.references.report_external);
        assert!(config.references.check_fragments);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            ValidationConfig::from_yaml_str("max-violation: 3\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_zero_cap_rejected() {
        let err = ValidationConfig::from_yaml_str("max-violations: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max-violations", .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ValidationConfig::load(Path::new("/nonexistent/oscal.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
