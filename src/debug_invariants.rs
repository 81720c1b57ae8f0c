//! Structural invariant checks for meshes and face graphs.
//!
//! Constructors call [`debug_invariants!`](crate::debug_invariants) on their
//! output; the check compiles away in release builds unless the
//! `check-invariants` or `strict-invariants` feature is enabled.

use crate::mesh_error::MeshError;

/// A structure whose internal tables must agree with each other.
pub trait DebugInvariants {
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// Size summary used in invariant panic messages, e.g.
    /// `mesh with 8 vertices, 6 faces`.
    fn invariant_context(&self) -> String;

    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(*self, "debug_assert_invariants");
    }
}

/// Panic with `value`'s size summary and the calling `site` if its
/// invariants do not hold.
#[doc(hidden)]
#[track_caller]
pub fn assert_invariants<T: DebugInvariants + ?Sized>(value: &T, site: &str) {
    if let Err(e) = value.validate_invariants() {
        panic!("broken {} after {site}: {e}", value.invariant_context());
    }
}

/// Check the invariants of a mesh or face graph when invariant checking is
/// enabled; `$site` names the constructor in the panic message.
#[macro_export]
macro_rules! debug_invariants {
    ($value:expr, $site:expr) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        $crate::debug_invariants::assert_invariants(&$value, $site);
    };
}
