//! # Identifier Newtypes
//!
//! The two identifier shapes of an OSCAL document.
//!
//! - [`OscalUuid`]: a version-4 UUID. Used wherever an entity must stay
//!   referencable across document revisions, and for the document itself.
//! - [`Token`]: a restricted identifier-character-class string. Used for
//!   `class`, `name`, `rel` and the other non-identifying labels.
//!
//! Identifiers that *define* or *reference* an entity are typed more
//! precisely as [`crate::Id`] and [`crate::Ref`]; these two newtypes cover
//! the remaining UUID and token fields.

use crate::error::OscalError;
use crate::patterns::FieldClass;

pattern_string! {
    /// A version-4 UUID held as its raw string.
    OscalUuid => Uuid
}

pattern_string! {
    /// A document-scoped token held as its raw string.
    Token => Token
}

impl OscalUuid {
    /// Generate a new random UUID.
    pub fn new_v4() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing `uuid::Uuid`.
    pub fn from_uuid(value: uuid::Uuid) -> Self {
        Self(value.hyphenated().to_string())
    }

    /// Parse into a `uuid::Uuid`, rejecting values that are not v4-shaped.
    pub fn to_uuid(&self) -> Result<uuid::Uuid, OscalError> {
        if !self.is_valid() {
            return Err(OscalError::invalid(FieldClass::Uuid, &self.0));
        }
        uuid::Uuid::parse_str(&self.0).map_err(|_| OscalError::invalid(FieldClass::Uuid, &self.0))
    }
}

impl From<uuid::Uuid> for OscalUuid {
    fn from(value: uuid::Uuid) -> Self {
        Self::from_uuid(value)
    }
}

impl Token {
    /// Construct a token, rejecting values outside the token character class.
    pub fn parse(value: &str) -> Result<Self, OscalError> {
        let token = Self::new(value);
        if token.is_valid() {
            Ok(token)
        } else {
            Err(OscalError::invalid(FieldClass::Token, value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_uuid_is_valid() {
        let id = OscalUuid::new_v4();
        assert!(id.is_valid());
        assert_eq!(id.to_uuid().unwrap().get_version_num(), 4);
    }

    #[test]
    fn test_to_uuid_rejects_v1() {
        let id = OscalUuid::new("123e4567-e89b-12d3-a456-426614174000");
        assert!(!id.is_valid());
        assert!(id.to_uuid().is_err());
    }

    #[test]
    fn test_uuid_serde_is_plain_string() {
        let id = OscalUuid::new("123e4567-e89b-42d3-a456-426614174000");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"123e4567-e89b-42d3-a456-426614174000\"");
        let back: OscalUuid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_malformed_uuid_still_deserializes() {
        let id: OscalUuid = serde_json::from_str("\"not-a-uuid\"").unwrap();
        assert_eq!(id.as_str(), "not-a-uuid");
        assert!(!id.is_valid());
    }

    #[test]
    fn test_token_parse() {
        assert!(Token::parse("sp800-53").is_ok());
        assert!(Token::parse("800-53").is_err());
    }
}
