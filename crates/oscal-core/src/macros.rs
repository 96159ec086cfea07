//! Declarative helpers for the constrained string newtypes.

/// Declare a `#[serde(transparent)]` string newtype whose value must match
/// the pattern of a [`crate::FieldClass`].
macro_rules! pattern_string {
    ($(#[$meta:meta])* $name:ident => $class:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw value without checking it.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw value.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume self and return the raw value.
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Returns true if the value matches its required pattern.
            pub fn is_valid(&self) -> bool {
                $crate::FieldClass::$class.matches(&self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl $crate::Cardinality for $name {
            fn count(&self) -> usize {
                usize::from(!self.0.is_empty())
            }
        }

        impl $crate::Walk for $name {
            fn walk<V: $crate::Visitor + ?Sized>(&self, path: &str, visitor: &mut V) {
                visitor.visit_value(path, $crate::FieldClass::$class, &self.0);
            }
        }
    };
}
