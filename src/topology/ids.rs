//! `VertexId` and `FaceId`: strong, zero-cost handles for mesh entities
//!
//! Vertices and faces live in dense arenas inside a [`Mesh`](super::mesh::Mesh),
//! so an id is simply the position of its entity in that arena. Wrapping the
//! raw index keeps vertex and face indices from being mixed up, while
//! `repr(transparent)` keeps the layout identical to `u32` so id slices can be
//! handed to a GPU index buffer without conversion.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates an id from a raw arena index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            /// Returns the raw `u32` value.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Returns the id as an arena index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Creates an id from an arena index.
            ///
            /// Returns `None` when the index does not fit in `u32`.
            #[inline]
            pub fn from_index(index: usize) -> Option<Self> {
                u32::try_from(index).ok().map($name)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw integer.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(id: $name) -> usize {
                id.index()
            }
        }
    };
}

arena_id!(
    /// Index of a vertex in a mesh's vertex arena.
    VertexId
);

arena_id!(
    /// Index of a face in a mesh's face arena.
    ///
    /// Face ids are shared between a mesh and any graph extracted from it.
    FaceId
);

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::{assert_eq_align, assert_eq_size};

    assert_eq_size!(VertexId, u32);
    assert_eq_size!(FaceId, u32);
    assert_eq_align!(VertexId, u32);
}
