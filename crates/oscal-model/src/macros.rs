//! Traversal boilerplate for record types.

/// Implement [`oscal_core::Walk`] for a record by walking the listed fields
/// in order. Fields listed under `require` are first reported through
/// [`oscal_core::Visitor::visit_required`] with their present-value count.
macro_rules! impl_walk {
    ($ty:ident { $($field:ident),* $(,)? } $(require [$($req:ident),* $(,)?])?) => {
        impl oscal_core::Walk for $ty {
            #[allow(unused_variables)]
            fn walk<V: oscal_core::Visitor + ?Sized>(&self, path: &str, visitor: &mut V) {
                $($(
                    visitor.visit_required(
                        &oscal_core::child_path(path, stringify!($req)),
                        oscal_core::Cardinality::count(&self.$req),
                    );
                )*)?
                $(
                    oscal_core::Walk::walk(
                        &self.$field,
                        &oscal_core::child_path(path, stringify!($field)),
                        visitor,
                    );
                )*
            }
        }
    };
}
