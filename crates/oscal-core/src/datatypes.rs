//! # Constrained String Datatypes
//!
//! Newtypes for the remaining constrained string fields, plus the two
//! `href` shapes.
//!
//! An `href` is a URI reference. When it is a bare fragment (`#<id>`) it
//! points into the current document, conventionally at a back-matter
//! resource UUID; otherwise it names an external location that this model
//! never fetches.

use serde::{Deserialize, Serialize};

use crate::patterns::FieldClass;
use crate::walk::{Cardinality, HrefRole, Visitor, Walk};

pattern_string! {
    /// A string that is non-empty and has no leading or trailing whitespace.
    NonBlank => NonBlank
}

pattern_string! {
    /// An email address.
    Email => Email
}

pattern_string! {
    /// An absolute URI, used for `ns` and `system` namespaces.
    UriRef => Uri
}

macro_rules! href_string {
    ($(#[$meta:meta])* $name:ident => $role:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw URI reference.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw value.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The fragment identifier if this is a same-document reference.
            pub fn fragment(&self) -> Option<&str> {
                self.0.strip_prefix('#').filter(|f| !f.is_empty())
            }

            /// Returns true if this points outside the current document.
            pub fn is_external(&self) -> bool {
                self.fragment().is_none()
            }

            /// Returns true if the value is a non-blank URI reference.
            pub fn is_valid(&self) -> bool {
                FieldClass::NonBlank.matches(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl Cardinality for $name {
            fn count(&self) -> usize {
                usize::from(!self.0.is_empty())
            }
        }

        impl Walk for $name {
            fn walk<V: Visitor + ?Sized>(&self, path: &str, visitor: &mut V) {
                visitor.visit_href(path, &self.0, HrefRole::$role);
            }
        }
    };
}

href_string! {
    /// A link, rlink, or evidence target.
    Href => Link
}

href_string! {
    /// The target of a cross-document import (catalog, profile, SSP,
    /// assessment plan, component definition).
    ImportHref => Import
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_detection() {
        let local = Href::new("#a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d");
        assert_eq!(local.fragment(), Some("a1b2c3d4-e5f6-4a7b-8c9d-0e1f2a3b4c5d"));
        assert!(!local.is_external());

        let remote = ImportHref::new("https://example.org/catalog.json");
        assert_eq!(remote.fragment(), None);
        assert!(remote.is_external());
    }

    #[test]
    fn test_bare_hash_is_not_a_fragment() {
        assert_eq!(Href::new("#").fragment(), None);
    }

    #[test]
    fn test_non_blank_validity() {
        assert!(NonBlank::from("1.0.0").is_valid());
        assert!(!NonBlank::from(" 1.0.0").is_valid());
    }
}
