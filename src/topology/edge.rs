//! Undirected mesh edges keyed by their endpoint pair.

use std::fmt;

use crate::topology::ids::VertexId;

/// An undirected edge, stored with its endpoints normalised so that
/// `lo() <= hi()`. Two loops walking the same edge in opposite directions
/// produce the same key.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct EdgeKey {
    lo: VertexId,
    hi: VertexId,
}

impl EdgeKey {
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            EdgeKey { lo: a, hi: b }
        } else {
            EdgeKey { lo: b, hi: a }
        }
    }

    #[inline]
    pub fn lo(self) -> VertexId {
        self.lo
    }

    #[inline]
    pub fn hi(self) -> VertexId {
        self.hi
    }

    /// Both endpoints, lowest id first.
    #[inline]
    pub fn vertices(self) -> (VertexId, VertexId) {
        (self.lo, self.hi)
    }

    /// True when the edge starts and ends at the same vertex.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.lo == self.hi
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}
