//! Coordinate scaling for meshes.

use crate::topology::mesh::{Mesh, Point3};

/// Scale every vertex of `mesh` component-wise by `factors`.
///
/// Only positions change; face loops and the edge table are kept as is.
pub fn scale(mut mesh: Mesh, factors: Point3) -> Mesh {
    for pos in mesh.positions_mut() {
        for (coord, f) in pos.iter_mut().zip(factors) {
            *coord *= f;
        }
    }
    mesh
}
