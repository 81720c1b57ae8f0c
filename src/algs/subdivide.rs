//! Edge subdivision with quad strip splitting.
//!
//! [`subdivide_edges`] cuts a set of edges into `n` equal segments. Faces are
//! rebuilt so the result has no T-junctions:
//!
//! * a quad whose two *opposite* edges are both cut is split into `n` strip
//!   quads running between the two edges;
//! * any other face touching a cut edge keeps its shape and gains the new
//!   vertices in its loop.
//!
//! Interior vertices of an edge are created once and shared by every face
//! using that edge.

use std::collections::BTreeSet;

use hashbrown::HashMap;
use itertools::Either;

use crate::mesh_error::{MeshError, invalid_mesh};
use crate::topology::edge::EdgeKey;
use crate::topology::ids::VertexId;
use crate::topology::mesh::{Mesh, Point3, loop_edges};

/// A principal coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index into a [`Point3`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Point `k/n` of the way from `p` to `q`.
///
/// Computed as `(p·(n−k) + q·k) / n`, which is exact whenever the products
/// and their sum are representable, so grid points on integer-sized boxes
/// land on exact coordinates. Callers keep `k <= n` and `n > 0`.
#[inline]
pub(crate) fn lerp_step(p: Point3, q: Point3, k: usize, n: usize) -> Point3 {
    debug_assert!(0 < n && k <= n, "step {k} outside 0..={n}");
    let (wp, wq, n) = ((n - k) as f64, k as f64, n as f64);
    [
        (p[0] * wp + q[0] * wq) / n,
        (p[1] * wp + q[1] * wq) / n,
        (p[2] * wp + q[2] * wq) / n,
    ]
}

/// Edges whose endpoints differ in the `axis` coordinate.
///
/// On an axis-aligned box every edge runs along exactly one axis.
pub fn edges_along_axis(mesh: &Mesh, axis: Axis) -> Vec<EdgeKey> {
    let positions = mesh.positions();
    let a = axis.index();
    mesh.edges()
        .map(|(e, _)| e)
        .filter(|e| positions[e.lo().index()][a] != positions[e.hi().index()][a])
        .collect()
}

/// Subdivide every edge along `axis` into `segments` pieces.
pub fn subdivide_along_axis(mesh: &Mesh, axis: Axis, segments: usize) -> Result<Mesh, MeshError> {
    let edges = edges_along_axis(mesh, axis);
    log::trace!(
        "subdividing {} edges along {axis:?} into {segments} segments",
        edges.len()
    );
    subdivide_edges(mesh, &edges, segments)
}

/// Interior vertices inserted on each cut edge, ordered from `lo` to `hi`.
struct EdgeCuts {
    interior: HashMap<EdgeKey, Vec<VertexId>>,
}

impl EdgeCuts {
    fn is_cut(&self, a: VertexId, b: VertexId) -> bool {
        self.interior.contains_key(&EdgeKey::new(a, b))
    }

    /// Interior vertices of `a → b` in walking order, empty if the edge is
    /// not cut.
    fn between(&self, a: VertexId, b: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let key = EdgeKey::new(a, b);
        let cut = self.interior.get(&key).map(Vec::as_slice).unwrap_or_default();
        if key.lo() == a {
            Either::Left(cut.iter().copied())
        } else {
            Either::Right(cut.iter().rev().copied())
        }
    }

    /// Full vertex chain `a, …, b`.
    fn chain(&self, a: VertexId, b: VertexId) -> Vec<VertexId> {
        std::iter::once(a)
            .chain(self.between(a, b))
            .chain(std::iter::once(b))
            .collect()
    }
}

/// Split each edge in `edges` into `segments` equal pieces and rebuild the
/// faces touching them.
///
/// `segments == 1` returns an unchanged copy. Every edge must belong to
/// `mesh`.
pub fn subdivide_edges(
    mesh: &Mesh,
    edges: &[EdgeKey],
    segments: usize,
) -> Result<Mesh, MeshError> {
    if segments == 0 || u32::try_from(segments).is_err() {
        return Err(MeshError::InvalidParameter {
            name: "segments",
            value: segments,
            min: 1,
            max: u32::MAX as usize,
        });
    }
    let selected: BTreeSet<EdgeKey> = edges.iter().copied().collect();
    if let Some(missing) = selected.iter().find(|e| mesh.edge_faces(**e).is_none()) {
        return Err(invalid_mesh(format!("edge {missing} is not part of the mesh")));
    }
    if segments == 1 || selected.is_empty() {
        return Ok(mesh.clone());
    }

    let new_vertices = selected.len() * (segments - 1);
    if u32::try_from(mesh.vertex_count() + new_vertices).is_err() {
        return Err(invalid_mesh(format!(
            "subdivision would create {} vertices, exceeding the u32 id space",
            mesh.vertex_count() + new_vertices
        )));
    }

    let mut vertices = mesh.positions().to_vec();
    vertices.reserve(new_vertices);
    let mut cuts = EdgeCuts {
        interior: HashMap::with_capacity(selected.len()),
    };
    // BTreeSet order keeps vertex numbering deterministic
    for &edge in &selected {
        let (p, q) = (vertices[edge.lo().index()], vertices[edge.hi().index()]);
        let mut interior = Vec::with_capacity(segments - 1);
        for k in 1..segments {
            interior.push(VertexId::new(vertices.len() as u32));
            vertices.push(lerp_step(p, q, k, segments));
        }
        cuts.interior.insert(edge, interior);
    }

    let mut faces = Vec::with_capacity(mesh.face_count());
    for (_, face) in mesh.faces() {
        let cut_at: Vec<usize> = loop_edges(face)
            .enumerate()
            .filter(|&(_, (a, b))| cuts.is_cut(a, b))
            .map(|(i, _)| i)
            .collect();
        match cut_at.as_slice() {
            [] => faces.push(face.to_vec()),
            &[i, j] if face.len() == 4 && j == i + 2 => {
                split_quad_strips(face, i, &cuts, &mut faces)
            }
            _ => {
                let mut grown = Vec::with_capacity(face.len() + cut_at.len() * (segments - 1));
                for (a, b) in loop_edges(face) {
                    grown.push(a);
                    grown.extend(cuts.between(a, b));
                }
                faces.push(grown);
            }
        }
    }

    Ok(Mesh::from_valid_loops(vertices, faces))
}

/// Replace `quad` by strips between its cut edges at loop positions
/// `first` and `first + 2`. Strips keep the winding of the original quad.
fn split_quad_strips(
    quad: &[VertexId],
    first: usize,
    cuts: &EdgeCuts,
    out: &mut Vec<Vec<VertexId>>,
) {
    let v = |i: usize| quad[(first + i) % 4];
    // v0 → v1 and v3 → v2 run in the same direction
    let near = cuts.chain(v(0), v(1));
    let far = cuts.chain(v(3), v(2));
    for k in 0..near.len() - 1 {
        out.push(vec![near[k], near[k + 1], far[k + 1], far[k]]);
    }
}
