//! # Tree Traversal
//!
//! [`Walk`] is implemented by every OSCAL model type. A walk visits each
//! constrained leaf, defining identifier, reference, and href exactly once,
//! passing a JSON Pointer built from the wire (kebab-case) field names, e.g.
//! `/catalog/groups/0/controls/2/id`.
//!
//! Consumers implement [`Visitor`] and override only the hooks they need.
//! The pattern validator, the identifier registry builder, and the reference
//! collector in `oscal-schema` are all visitors over the same walk, so they
//! can never disagree about which fields exist.

use serde::{Deserialize, Serialize};

use crate::patterns::FieldClass;
use crate::reference::EntityKind;

/// What an `href` is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HrefRole {
    /// Link, rlink, or evidence target.
    Link,
    /// Cross-document import.
    Import,
}

/// Hooks invoked during a [`Walk`]. All default to no-ops.
pub trait Visitor {
    /// A constrained string leaf.
    fn visit_value(&mut self, path: &str, class: FieldClass, value: &str) {
        let _ = (path, class, value);
    }

    /// The defining identifier of an entity. `path` points at the
    /// identifier field; the entity itself is its parent.
    fn visit_definition(&mut self, path: &str, kind: EntityKind, id: &str) {
        let _ = (path, kind, id);
    }

    /// A weak reference to an entity.
    fn visit_reference(&mut self, path: &str, kind: EntityKind, id: &str) {
        let _ = (path, kind, id);
    }

    /// An `href` value.
    fn visit_href(&mut self, path: &str, href: &str, role: HrefRole) {
        let _ = (path, href, role);
    }

    /// A field that must hold at least one value. `count` comes from
    /// [`Cardinality::count`].
    fn visit_required(&mut self, path: &str, count: usize) {
        let _ = (path, count);
    }
}

/// Number of values present in a field, for minimum-cardinality checks.
///
/// A sequence counts its elements; an optional or string-valued field counts
/// as one when present and non-empty.
pub trait Cardinality {
    /// Values present.
    fn count(&self) -> usize;
}

impl<T> Cardinality for Vec<T> {
    fn count(&self) -> usize {
        self.len()
    }
}

impl<T> Cardinality for Option<T> {
    fn count(&self) -> usize {
        usize::from(self.is_some())
    }
}

impl Cardinality for String {
    fn count(&self) -> usize {
        usize::from(!self.is_empty())
    }
}

/// A value that can be traversed by a [`Visitor`].
pub trait Walk {
    /// Visit this value located at `path`.
    fn walk<V: Visitor + ?Sized>(&self, path: &str, visitor: &mut V);
}

/// Append a field segment to a JSON Pointer.
///
/// Rust field names are mapped to their wire names: a raw-identifier prefix
/// is dropped and underscores become hyphens.
pub fn child_path(parent: &str, field: &str) -> String {
    let field = field.trim_start_matches("r#").replace('_', "-");
    format!("{parent}/{field}")
}

/// The JSON Pointer of the entity that owns the field at `path`.
pub fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

impl<T: Walk> Walk for Option<T> {
    fn walk<V: Visitor + ?Sized>(&self, path: &str, visitor: &mut V) {
        if let Some(inner) = self {
            inner.walk(path, visitor);
        }
    }
}

impl<T: Walk> Walk for Vec<T> {
    fn walk<V: Visitor + ?Sized>(&self, path: &str, visitor: &mut V) {
        for (i, item) in self.iter().enumerate() {
            item.walk(&format!("{path}/{i}"), visitor);
        }
    }
}

impl<T: Walk> Walk for Box<T> {
    fn walk<V: Visitor + ?Sized>(&self, path: &str, visitor: &mut V) {
        (**self).walk(path, visitor);
    }
}

macro_rules! opaque_leaf {
    ($($ty:ty),*) => {
        $(
            impl Walk for $ty {
                fn walk<V: Visitor + ?Sized>(&self, _path: &str, _visitor: &mut V) {}
            }
        )*
    };
}

// Free text and numbers carry no pattern.
opaque_leaf!(String, bool, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::OscalUuid;

    #[derive(Default)]
    struct Collect(Vec<String>);

    impl Visitor for Collect {
        fn visit_value(&mut self, path: &str, _class: FieldClass, value: &str) {
            self.0.push(format!("{path}={value}"));
        }
    }

    #[test]
    fn test_child_path_maps_wire_names() {
        assert_eq!(child_path("", "back_matter"), "/back-matter");
        assert_eq!(child_path("/party", "r#type"), "/party/type");
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("/catalog/controls/0/id"), "/catalog/controls/0");
        assert_eq!(parent_path("/uuid"), "");
    }

    #[test]
    fn test_cardinality_counts() {
        assert_eq!(Vec::<u32>::new().count(), 0);
        assert_eq!(vec![1, 2].count(), 2);
        assert_eq!(String::new().count(), 0);
        assert_eq!(Some(3).count(), 1);
        assert_eq!(OscalUuid::new("").count(), 0);
    }

    #[test]
    fn test_vec_and_option_paths() {
        let ids = vec![OscalUuid::new("a"), OscalUuid::new("b")];
        let maybe: Option<OscalUuid> = Some(OscalUuid::new("c"));
        let mut v = Collect::default();
        ids.walk("/xs", &mut v);
        maybe.walk("/y", &mut v);
        assert_eq!(v.0, vec!["/xs/0=a", "/xs/1=b", "/y=c"]);
    }
}
