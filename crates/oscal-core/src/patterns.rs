//! # String Patterns
//!
//! The field-level string constraints every OSCAL document must satisfy.
//! Each constrained field belongs to exactly one [`FieldClass`], and each
//! class is backed by one compiled regular expression.
//!
//! The timestamp and date patterns accept only calendar-valid dates in the
//! years 1900 through 2999: February 29 is accepted only in leap years, and
//! 30-day months reject day 31.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Version-4, variant-1 UUID.
pub const UUID_PATTERN: &str =
    r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-4[0-9A-Fa-f]{3}-[89ABab][0-9A-Fa-f]{3}-[0-9A-Fa-f]{12}$";

/// First character of a token: underscore, ASCII letter, or a letter from
/// the permitted Unicode ranges.
const TOKEN_START: &str = r"_A-Za-z\x{00C0}-\x{00D6}\x{00D8}-\x{00F6}\x{00F8}-\x{02FF}\x{0370}-\x{037D}\x{037F}-\x{1FFF}\x{200C}-\x{200D}\x{2070}-\x{218F}\x{2C00}-\x{2FEF}\x{3001}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFFD}";

/// Additional characters allowed after the first.
const TOKEN_REST: &str = r"\-\.0-9\x{00B7}\x{0300}-\x{036F}\x{203F}-\x{2040}";

/// Calendar-valid `YYYY-MM-DD` with leap-year handling.
const DATE: &str = concat!(
    r"(?:",
    r"(?:(?:2000|2400|2800|(?:19|2[0-9])(?:0[48]|[2468][048]|[13579][26]))-02-29)",
    r"|(?:(?:19|2[0-9])[0-9]{2}-02-(?:0[1-9]|1[0-9]|2[0-8]))",
    r"|(?:(?:19|2[0-9])[0-9]{2}-(?:0[13578]|10|12)-(?:0[1-9]|[12][0-9]|3[01]))",
    r"|(?:(?:19|2[0-9])[0-9]{2}-(?:0[469]|11)-(?:0[1-9]|[12][0-9]|30))",
    r")"
);

const TIME: &str = r"T(?:2[0-3]|[01][0-9]):[0-5][0-9]:[0-5][0-9](?:\.[0-9]+)?";

const OFFSET: &str = r"(?:Z|[+-][0-9]{2}:[0-9]{2})";

/// Non-empty, no leading or trailing whitespace.
pub const NON_BLANK_PATTERN: &str = r"^\S(.*\S)?$";

/// Loose RFC 5322 address shape.
pub const EMAIL_PATTERN: &str = r"^.+@.+";

/// Absolute URI: a scheme followed by a non-empty remainder.
pub const URI_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$";

static UUID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UUID_PATTERN).expect("UUID pattern compiles"));

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&token_pattern()).expect("token pattern compiles")
});

static DATE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&date_time_pattern()).expect("date-time pattern compiles")
});

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&date_pattern()).expect("date pattern compiles"));

static NON_BLANK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NON_BLANK_PATTERN).expect("non-blank pattern compiles"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

static URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URI_PATTERN).expect("URI pattern compiles"));

/// The full token pattern.
pub fn token_pattern() -> String {
    format!("^[{TOKEN_START}][{TOKEN_START}{TOKEN_REST}]*$")
}

/// The full RFC 3339 date-time-with-offset pattern.
pub fn date_time_pattern() -> String {
    format!("^{DATE}{TIME}{OFFSET}$")
}

/// The date pattern with an optional offset.
pub fn date_pattern() -> String {
    format!("^{DATE}{OFFSET}?$")
}

/// The constraint class of a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldClass {
    /// Version-4 UUID.
    Uuid,
    /// Restricted token (`id`, `class`, `name`, role and control ids).
    Token,
    /// RFC 3339 date-time with a mandatory offset.
    DateTime,
    /// Calendar date with an optional offset.
    Date,
    /// Non-empty string without leading or trailing whitespace.
    NonBlank,
    /// Email address.
    Email,
    /// Absolute URI.
    Uri,
}

impl FieldClass {
    /// Returns true if `value` satisfies this class's pattern.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Uuid => UUID_RE.is_match(value),
            Self::Token => TOKEN_RE.is_match(value),
            Self::DateTime => DATE_TIME_RE.is_match(value),
            Self::Date => DATE_RE.is_match(value),
            Self::NonBlank => NON_BLANK_RE.is_match(value),
            Self::Email => EMAIL_RE.is_match(value),
            Self::Uri => URI_RE.is_match(value),
        }
    }

    /// Short human-readable description of what the pattern expects.
    pub fn expected(&self) -> &'static str {
        match self {
            Self::Uuid => "version-4 UUID",
            Self::Token => "token (letter or underscore, then letters, digits, '-', '.')",
            Self::DateTime => "RFC 3339 date-time with time zone offset",
            Self::Date => "calendar date with optional time zone offset",
            Self::NonBlank => "non-empty string without leading or trailing whitespace",
            Self::Email => "email address",
            Self::Uri => "absolute URI",
        }
    }

    /// Returns the class name as used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Token => "token",
            Self::DateTime => "date-time",
            Self::Date => "date",
            Self::NonBlank => "non-blank",
            Self::Email => "email",
            Self::Uri => "uri",
        }
    }
}

impl std::fmt::Display for FieldClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_v4_accepted() {
        assert!(FieldClass::Uuid.matches("123e4567-e89b-42d3-a456-426614174000"));
        assert!(FieldClass::Uuid.matches("A1B2C3D4-E5F6-4A7B-8C9D-0E1F2A3B4C5D"));
    }

    #[test]
    fn test_uuid_wrong_version_or_variant_rejected() {
        // Version nibble is 1, not 4.
        assert!(!FieldClass::Uuid.matches("123e4567-e89b-12d3-a456-426614174000"));
        // Variant nibble is c.
        assert!(!FieldClass::Uuid.matches("123e4567-e89b-42d3-c456-426614174000"));
        assert!(!FieldClass::Uuid.matches("not-a-uuid"));
        assert!(!FieldClass::Uuid.matches(""));
    }

    #[test]
    fn test_token_shapes() {
        assert!(FieldClass::Token.matches("ac-1"));
        assert!(FieldClass::Token.matches("ac-2.3"));
        assert!(FieldClass::Token.matches("_private"));
        assert!(FieldClass::Token.matches("contrôle"));
        assert!(!FieldClass::Token.matches("1ac"));
        assert!(!FieldClass::Token.matches("-ac"));
        assert!(!FieldClass::Token.matches("ac 1"));
        assert!(!FieldClass::Token.matches(""));
    }

    #[test]
    fn test_token_combining_mark_only_after_first() {
        assert!(FieldClass::Token.matches("e\u{0301}"));
        assert!(!FieldClass::Token.matches("\u{0301}e"));
    }

    #[test]
    fn test_date_time_offsets() {
        assert!(FieldClass::DateTime.matches("2024-01-15T12:00:00Z"));
        assert!(FieldClass::DateTime.matches("2024-01-15T12:00:00.123-05:00"));
        assert!(!FieldClass::DateTime.matches("2024-01-15T12:00:00"));
        assert!(!FieldClass::DateTime.matches("2024-01-15"));
    }

    #[test]
    fn test_date_time_leap_years() {
        assert!(FieldClass::DateTime.matches("2024-02-29T00:00:00Z"));
        assert!(FieldClass::DateTime.matches("2000-02-29T00:00:00Z"));
        assert!(!FieldClass::DateTime.matches("2023-02-29T00:00:00Z"));
        assert!(!FieldClass::DateTime.matches("2100-02-29T00:00:00Z"));
        assert!(!FieldClass::DateTime.matches("1900-02-29T00:00:00Z"));
    }

    #[test]
    fn test_date_time_month_lengths() {
        assert!(FieldClass::DateTime.matches("2024-01-31T00:00:00Z"));
        assert!(!FieldClass::DateTime.matches("2024-04-31T00:00:00Z"));
        assert!(!FieldClass::DateTime.matches("2024-13-01T00:00:00Z"));
        assert!(!FieldClass::DateTime.matches("2024-06-01T24:00:00Z"));
    }

    #[test]
    fn test_date_optional_offset() {
        assert!(FieldClass::Date.matches("2024-03-01"));
        assert!(FieldClass::Date.matches("2024-03-01Z"));
        assert!(FieldClass::Date.matches("2024-03-01+02:00"));
        assert!(!FieldClass::Date.matches("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn test_non_blank() {
        assert!(FieldClass::NonBlank.matches("x"));
        assert!(FieldClass::NonBlank.matches("1.0 final"));
        assert!(!FieldClass::NonBlank.matches(""));
        assert!(!FieldClass::NonBlank.matches(" leading"));
        assert!(!FieldClass::NonBlank.matches("trailing "));
    }

    #[test]
    fn test_email_and_uri() {
        assert!(FieldClass::Email.matches("owner@example.org"));
        assert!(!FieldClass::Email.matches("owner.example.org"));
        assert!(FieldClass::Uri.matches("http://csrc.nist.gov/ns/oscal"));
        assert!(FieldClass::Uri.matches("urn:ietf:rfc:3986"));
        assert!(!FieldClass::Uri.matches("relative/path"));
    }
}
