//! Opaque ID newtypes for netlist entities.
//!
//! [`WireId`] and [`ElementId`] are thin `u32` wrappers used as indices into
//! the netlist's vectors. The [`define_id!`](crate::define_id) macro is
//! exported so that downstream crates can declare their own index types the
//! same way.

/// Declares a `Copy` `u32` newtype with `from_raw`/`as_raw`, `Display`, and
/// serde support. The invoking crate must depend on `serde`.
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the ID as a vector index.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a wire in the netlist.
    WireId
);

define_id!(
    /// Opaque, copyable ID for a placeable element in the netlist.
    ElementId
);
