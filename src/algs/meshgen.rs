//! Parametric cuboid generator.
//!
//! A cuboid with `a × b × c` segments is built the way a modelling tool
//! would do it by hand:
//!
//! 1. seed a unit cube centred at the origin,
//! 2. subdivide the edges running along each axis into that axis's segment
//!    count (strip-splitting every quad they bound),
//! 3. scale by `(a, b, c)` so every grid cell becomes a unit square.
//!
//! Scaling commutes with subdividing axis-aligned edges. By default the seed
//! is scaled first, which puts every grid vertex on an exact multiple of 0.5.

use serde::{Deserialize, Serialize};

use crate::algs::subdivide::{Axis, subdivide_along_axis};
use crate::algs::transform::scale;
use crate::mesh_error::MeshError;
use crate::topology::ids::VertexId;
use crate::topology::mesh::{Mesh, Point3};

/// Smallest accepted segment count per axis.
pub const MIN_SEGMENTS: usize = 1;
/// Largest accepted segment count per axis.
pub const MAX_SEGMENTS: usize = 256;

/// Segment counts of a cuboid, one per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CuboidParams {
    pub x_segments: usize,
    pub y_segments: usize,
    pub z_segments: usize,
}

impl Default for CuboidParams {
    fn default() -> Self {
        CuboidParams {
            x_segments: 10,
            y_segments: 3,
            z_segments: 1,
        }
    }
}

impl CuboidParams {
    pub fn new(x_segments: usize, y_segments: usize, z_segments: usize) -> Self {
        CuboidParams {
            x_segments,
            y_segments,
            z_segments,
        }
    }

    /// Segment count along `axis`.
    #[inline]
    pub fn segments(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x_segments,
            Axis::Y => self.y_segments,
            Axis::Z => self.z_segments,
        }
    }

    /// Check every count lies in `[MIN_SEGMENTS, MAX_SEGMENTS]`.
    pub fn validate(&self) -> Result<(), MeshError> {
        for (name, value) in [
            ("x_segments", self.x_segments),
            ("y_segments", self.y_segments),
            ("z_segments", self.z_segments),
        ] {
            if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&value) {
                return Err(MeshError::InvalidParameter {
                    name,
                    value,
                    min: MIN_SEGMENTS,
                    max: MAX_SEGMENTS,
                });
            }
        }
        Ok(())
    }

    /// Quad count of the finished cuboid: `2·(ab + bc + ac)`.
    pub fn face_count(&self) -> usize {
        let (a, b, c) = (self.x_segments, self.y_segments, self.z_segments);
        2 * (a * b + b * c + a * c)
    }

    /// Vertex count of the finished cuboid (Euler: `V = E − F + 2`).
    pub fn vertex_count(&self) -> usize {
        self.face_count() + 2
    }

    /// Edge count of the finished cuboid; every quad edge is shared twice.
    pub fn edge_count(&self) -> usize {
        2 * self.face_count()
    }

    /// Extents of the finished cuboid.
    pub fn extents(&self) -> Point3 {
        [
            self.x_segments as f64,
            self.y_segments as f64,
            self.z_segments as f64,
        ]
    }
}

/// Generation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuboidOpts {
    /// Scale the seed cube before subdividing instead of after.
    pub scale_first: bool,
}

impl Default for CuboidOpts {
    fn default() -> Self {
        CuboidOpts { scale_first: true }
    }
}

/// Unit cube centred at the origin: 8 vertices at `(±0.5, ±0.5, ±0.5)` and
/// 6 quads wound counter-clockwise when seen from outside.
///
/// Vertex `i` sits on the positive side of axis `k` iff bit `k` of `i` is set.
pub fn unit_cube() -> Mesh {
    let vertices: Vec<Point3> = (0..8u32)
        .map(|i| {
            let side = |bit: u32| if i & (1 << bit) != 0 { 0.5 } else { -0.5 };
            [side(0), side(1), side(2)]
        })
        .collect();
    let faces: Vec<Vec<VertexId>> = [
        [0, 4, 6, 2], // -x
        [1, 3, 7, 5], // +x
        [0, 1, 5, 4], // -y
        [2, 6, 7, 3], // +y
        [0, 2, 3, 1], // -z
        [4, 5, 7, 6], // +z
    ]
    .iter()
    .map(|f| f.iter().copied().map(VertexId::new).collect())
    .collect();
    Mesh::from_valid_loops(vertices, faces)
}

/// Build a closed quad cuboid with `a × b × c` segments and extents
/// `a × b × c`, centred at the origin.
///
/// Fails with [`MeshError::InvalidParameter`] if any count is outside
/// `[MIN_SEGMENTS, MAX_SEGMENTS]`.
pub fn build_cuboid(a: usize, b: usize, c: usize) -> Result<Mesh, MeshError> {
    build_cuboid_with(CuboidParams::new(a, b, c), CuboidOpts::default())
}

/// [`build_cuboid`] with explicit parameters and options.
pub fn build_cuboid_with(params: CuboidParams, opts: CuboidOpts) -> Result<Mesh, MeshError> {
    params.validate()?;
    log::debug!(
        "building {}x{}x{} cuboid (scale_first={})",
        params.x_segments,
        params.y_segments,
        params.z_segments,
        opts.scale_first
    );

    let mut mesh = unit_cube();
    if opts.scale_first {
        mesh = scale(mesh, params.extents());
    }
    for axis in Axis::ALL {
        mesh = subdivide_along_axis(&mesh, axis, params.segments(axis))?;
    }
    if !opts.scale_first {
        mesh = scale(mesh, params.extents());
    }

    log::debug!(
        "cuboid done: {} vertices, {} edges, {} faces",
        mesh.vertex_count(),
        mesh.edge_count(),
        mesh.face_count()
    );
    Ok(mesh)
}
