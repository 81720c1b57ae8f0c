//! Polygon surface meshes stored as dense vertex/face arenas.
//!
//! [`Mesh`] is the validated, immutable representation produced by the
//! generators in [`crate::algs`]. It owns
//!
//! * a vertex arena (`VertexId` = position in the arena),
//! * a face arena of cyclic vertex loops (`FaceId` = position in the arena),
//! * an edge table mapping every undirected loop edge to the faces using it.
//!
//! Host code that hands in its own buffers can use [`IndexedFaces`] instead,
//! which performs no validation up front. Algorithms accept either through the
//! [`PolygonMesh`] trait.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::mesh_error::{MeshError, invalid_mesh};
use crate::topology::edge::EdgeKey;
use crate::topology::ids::{FaceId, VertexId};

/// A vertex position.
pub type Point3 = [f64; 3];

/// Read access to a polygon mesh: vertex count plus one vertex loop per face.
///
/// Implementors make no promise that their loops are well formed; consumers
/// that need that guarantee call [`validate_face_loop`].
pub trait PolygonMesh {
    /// Number of vertices; valid vertex ids are `0..vertex_count()`.
    fn vertex_count(&self) -> usize;

    /// Number of faces; face ids are `0..face_count()`.
    fn face_count(&self) -> usize;

    /// Cyclic vertex loop of `face`.
    ///
    /// # Panics
    /// May panic when `face` is out of range.
    fn face_loop(&self, face: FaceId) -> &[VertexId];

    /// Iterates all face ids in arena order.
    fn face_ids(&self) -> impl Iterator<Item = FaceId> {
        (0..self.face_count() as u32).map(FaceId::new)
    }
}

/// Check that `face` has at least three vertices, that every vertex id is
/// below `vertex_count`, and that no two consecutive vertices coincide.
pub fn validate_face_loop(
    face: FaceId,
    vertices: &[VertexId],
    vertex_count: usize,
) -> Result<(), MeshError> {
    if vertices.len() < 3 {
        return Err(invalid_mesh(format!(
            "face {face} has {} vertices, expected at least 3",
            vertices.len()
        )));
    }
    if let Some(v) = vertices.iter().find(|v| v.index() >= vertex_count) {
        return Err(invalid_mesh(format!(
            "face {face} references missing vertex {v} (mesh has {vertex_count} vertices)"
        )));
    }
    if let Some((a, _)) = loop_edges(vertices).find(|(a, b)| a == b) {
        return Err(invalid_mesh(format!(
            "face {face} repeats vertex {a} on consecutive loop positions"
        )));
    }
    Ok(())
}

/// Directed edges of a cyclic loop, closing the last vertex back to the first.
#[inline]
pub fn loop_edges(vertices: &[VertexId]) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
    vertices.iter().copied().circular_tuple_windows()
}

fn check_arena_len(what: &str, len: usize) -> Result<(), MeshError> {
    if u32::try_from(len).is_err() {
        return Err(invalid_mesh(format!(
            "{len} {what} exceed the u32 id space"
        )));
    }
    Ok(())
}

/// A validated polygon mesh with an edge → faces table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IndexedFaces", into = "IndexedFaces")]
pub struct Mesh {
    vertices: Vec<Point3>,
    faces: Vec<Vec<VertexId>>,
    edges: BTreeMap<EdgeKey, Vec<FaceId>>,
}

impl Mesh {
    /// Build a mesh from vertex positions and face loops.
    ///
    /// Fails with [`MeshError::InvalidMesh`] if any loop is malformed (see
    /// [`validate_face_loop`]). Edges shared by more than two faces are
    /// recorded, not rejected; see [`crate::topology::validation`].
    pub fn new(vertices: Vec<Point3>, faces: Vec<Vec<VertexId>>) -> Result<Self, MeshError> {
        check_arena_len("vertices", vertices.len())?;
        check_arena_len("faces", faces.len())?;
        for (i, face) in faces.iter().enumerate() {
            validate_face_loop(FaceId::new(i as u32), face, vertices.len())?;
        }

        Ok(Mesh::from_valid_loops(vertices, faces))
    }

    /// Build the edge table for loops that are already known to be valid.
    pub(crate) fn from_valid_loops(vertices: Vec<Point3>, faces: Vec<Vec<VertexId>>) -> Self {
        let mut edges: BTreeMap<EdgeKey, Vec<FaceId>> = BTreeMap::new();
        for (i, face) in faces.iter().enumerate() {
            let fid = FaceId::new(i as u32);
            for (a, b) in loop_edges(face) {
                let users = edges.entry(EdgeKey::new(a, b)).or_default();
                // a loop that walks the same edge twice still registers once
                if users.last() != Some(&fid) {
                    users.push(fid);
                }
            }
        }

        let mesh = Mesh {
            vertices,
            faces,
            edges,
        };
        crate::debug_invariants!(mesh, "Mesh::from_valid_loops");
        mesh
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All vertex positions, indexed by `VertexId`.
    #[inline]
    pub fn positions(&self) -> &[Point3] {
        &self.vertices
    }

    /// Position of `v`, or `None` if it is out of range.
    #[inline]
    pub fn position(&self, v: VertexId) -> Option<Point3> {
        self.vertices.get(v.index()).copied()
    }

    /// Vertex loop of `face`, or `None` if it is out of range.
    #[inline]
    pub fn face(&self, face: FaceId) -> Option<&[VertexId]> {
        self.faces.get(face.index()).map(Vec::as_slice)
    }

    /// Iterates `(id, loop)` for every face in arena order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &[VertexId])> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId::new(i as u32), f.as_slice()))
    }

    /// Iterates `(edge, faces using it)` in edge-key order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &[FaceId])> + '_ {
        self.edges.iter().map(|(&e, fs)| (e, fs.as_slice()))
    }

    /// Faces using `edge`, or `None` if no loop contains it.
    pub fn edge_faces(&self, edge: EdgeKey) -> Option<&[FaceId]> {
        self.edges.get(&edge).map(Vec::as_slice)
    }

    /// Undirected edges of `face` in loop order.
    pub fn face_edges(&self, face: FaceId) -> impl Iterator<Item = EdgeKey> + '_ {
        self.face(face)
            .into_iter()
            .flat_map(|f| loop_edges(f).map(|(a, b)| EdgeKey::new(a, b)))
    }

    /// True when every edge is shared by exactly two faces.
    pub fn is_closed(&self) -> bool {
        self.edges.values().all(|fs| fs.len() == 2)
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for a mesh without vertices.
    pub fn bounding_box(&self) -> Option<(Point3, Point3)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(mut lo, mut hi), p| {
            for axis in 0..3 {
                lo[axis] = lo[axis].min(p[axis]);
                hi[axis] = hi[axis].max(p[axis]);
            }
            (lo, hi)
        }))
    }

    /// Flattened face index buffer plus per-face start offsets.
    ///
    /// `offsets` has `face_count() + 1` entries; face `i` occupies
    /// `indices[offsets[i]..offsets[i + 1]]`.
    pub fn face_index_buffer(&self) -> (Vec<u32>, Vec<u32>) {
        let mut indices = Vec::with_capacity(self.faces.iter().map(Vec::len).sum());
        let mut offsets = Vec::with_capacity(self.faces.len() + 1);
        offsets.push(0);
        for face in &self.faces {
            indices.extend(face.iter().map(|v| v.get()));
            offsets.push(indices.len() as u32);
        }
        (indices, offsets)
    }

    /// Give back the vertex and face arenas, dropping the edge table.
    pub fn into_parts(self) -> (Vec<Point3>, Vec<Vec<VertexId>>) {
        (self.vertices, self.faces)
    }

    /// Mutable positions. Topology, and therefore the edge table, is untouched.
    #[inline]
    pub(crate) fn positions_mut(&mut self) -> &mut [Point3] {
        &mut self.vertices
    }
}

impl PolygonMesh for Mesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    fn face_loop(&self, face: FaceId) -> &[VertexId] {
        &self.faces[face.index()]
    }
}

impl crate::debug_invariants::DebugInvariants for Mesh {
    fn invariant_context(&self) -> String {
        format!(
            "mesh with {} vertices, {} faces",
            self.vertices.len(),
            self.faces.len()
        )
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        let mut incidences = 0usize;
        for (fid, face) in self.faces() {
            validate_face_loop(fid, face, self.vertices.len())?;
            for (a, b) in loop_edges(face) {
                let key = EdgeKey::new(a, b);
                match self.edges.get(&key) {
                    Some(users) if users.contains(&fid) => {}
                    _ => {
                        return Err(invalid_mesh(format!(
                            "edge {key} of face {fid} is missing from the edge table"
                        )));
                    }
                }
            }
            incidences += face.len();
        }
        let registered: usize = self.edges.values().map(Vec::len).sum();
        if registered > incidences {
            return Err(invalid_mesh(format!(
                "edge table registers {registered} face uses but loops only have {incidences}"
            )));
        }
        Ok(())
    }
}

/// Unvalidated vertex and face buffers, as handed over by a host application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexedFaces {
    pub positions: Vec<Point3>,
    pub faces: Vec<Vec<VertexId>>,
}

impl IndexedFaces {
    pub fn new(positions: Vec<Point3>, faces: Vec<Vec<VertexId>>) -> Self {
        IndexedFaces { positions, faces }
    }

    /// Rebuild face loops from a flattened index buffer and per-face offsets,
    /// the inverse of [`Mesh::face_index_buffer`].
    ///
    /// `offsets` must start at 0, be non-decreasing and end at
    /// `indices.len()`. Loop contents are not checked here.
    pub fn from_index_buffer(
        positions: Vec<Point3>,
        indices: &[u32],
        offsets: &[u32],
    ) -> Result<Self, MeshError> {
        if offsets.first() != Some(&0) || offsets.last().map(|&o| o as usize) != Some(indices.len())
        {
            return Err(invalid_mesh(format!(
                "face offsets must start at 0 and end at {}",
                indices.len()
            )));
        }
        let mut faces = Vec::with_capacity(offsets.len() - 1);
        for (start, end) in offsets.iter().map(|&o| o as usize).tuple_windows() {
            if end < start || end > indices.len() {
                return Err(invalid_mesh(format!(
                    "face offsets {start}..{end} do not fit an index buffer of {}",
                    indices.len()
                )));
            }
            faces.push(indices[start..end].iter().copied().map(VertexId::new).collect());
        }
        Ok(IndexedFaces { positions, faces })
    }
}

impl PolygonMesh for IndexedFaces {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    fn face_loop(&self, face: FaceId) -> &[VertexId] {
        &self.faces[face.index()]
    }
}

impl TryFrom<IndexedFaces> for Mesh {
    type Error = MeshError;

    fn try_from(raw: IndexedFaces) -> Result<Self, Self::Error> {
        Mesh::new(raw.positions, raw.faces)
    }
}

impl From<Mesh> for IndexedFaces {
    fn from(mesh: Mesh) -> Self {
        let (positions, faces) = mesh.into_parts();
        IndexedFaces { positions, faces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_invariants::DebugInvariants;

    fn ids(raw: &[u32]) -> Vec<VertexId> {
        raw.iter().copied().map(VertexId::new).collect()
    }

    // two triangles sharing the edge (1, 2)
    fn two_triangles() -> Mesh {
        Mesh::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
            ],
            vec![ids(&[0, 1, 2]), ids(&[2, 1, 3])],
        )
        .unwrap()
    }

    #[test]
    fn edge_table_registers_shared_edges() {
        let mesh = two_triangles();
        assert_eq!(mesh.edge_count(), 5);
        let shared = EdgeKey::new(VertexId::new(1), VertexId::new(2));
        assert_eq!(
            mesh.edge_faces(shared),
            Some(&[FaceId::new(0), FaceId::new(1)][..])
        );
        assert!(!mesh.is_closed());
        mesh.validate_invariants().unwrap();
    }

    fn stale_edge_table() -> Mesh {
        let mut mesh = two_triangles();
        mesh.edges
            .remove(&EdgeKey::new(VertexId::new(1), VertexId::new(2)));
        mesh
    }

    #[test]
    fn stale_edge_table_fails_validation() {
        let mesh = stale_edge_table();
        assert_eq!(mesh.invariant_context(), "mesh with 4 vertices, 2 faces");
        assert_eq!(
            mesh.validate_invariants(),
            Err(invalid_mesh(
                "edge (1, 2) of face 0 is missing from the edge table"
            ))
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "broken mesh with 4 vertices, 2 faces after debug_assert_invariants")]
    fn debug_assert_names_the_broken_mesh() {
        stale_edge_table().debug_assert_invariants();
    }

    #[test]
    fn face_edges_follow_loop_order() {
        let mesh = two_triangles();
        let edges: Vec<_> = mesh.face_edges(FaceId::new(0)).collect();
        assert_eq!(
            edges,
            vec![
                EdgeKey::new(VertexId::new(0), VertexId::new(1)),
                EdgeKey::new(VertexId::new(1), VertexId::new(2)),
                EdgeKey::new(VertexId::new(2), VertexId::new(0)),
            ]
        );
        assert_eq!(mesh.face_edges(FaceId::new(9)).count(), 0);
    }

    #[test]
    fn rejects_short_loops() {
        let err = Mesh::new(vec![[0.0; 3]; 2], vec![ids(&[0, 1])]).unwrap_err();
        assert!(matches!(err, MeshError::InvalidMesh(_)));
    }

    #[test]
    fn rejects_out_of_range_vertices() {
        let err = Mesh::new(vec![[0.0; 3]; 3], vec![ids(&[0, 1, 3])]).unwrap_err();
        assert!(matches!(err, MeshError::InvalidMesh(msg) if msg.contains("missing vertex 3")));
    }

    #[test]
    fn rejects_degenerate_edges() {
        let err = Mesh::new(vec![[0.0; 3]; 3], vec![ids(&[0, 1, 1, 2])]).unwrap_err();
        assert!(matches!(err, MeshError::InvalidMesh(_)));
    }

    #[test]
    fn bounding_box_spans_all_vertices() {
        let mesh = two_triangles();
        assert_eq!(
            mesh.bounding_box(),
            Some(([0.0, 0.0, 0.0], [1.0, 1.0, 0.0]))
        );
        let empty = Mesh::new(Vec::new(), Vec::new()).unwrap();
        assert_eq!(empty.bounding_box(), None);
    }

    #[test]
    fn index_buffer_roundtrip() {
        let mesh = two_triangles();
        let (indices, offsets) = mesh.face_index_buffer();
        assert_eq!(indices, vec![0, 1, 2, 2, 1, 3]);
        assert_eq!(offsets, vec![0, 3, 6]);

        let raw =
            IndexedFaces::from_index_buffer(mesh.positions().to_vec(), &indices, &offsets).unwrap();
        assert_eq!(Mesh::try_from(raw).unwrap(), mesh);
    }

    #[test]
    fn index_buffer_rejects_bad_offsets() {
        let err = IndexedFaces::from_index_buffer(vec![[0.0; 3]; 3], &[0, 1, 2], &[0, 2]);
        assert!(matches!(err, Err(MeshError::InvalidMesh(_))));
        let err = IndexedFaces::from_index_buffer(vec![[0.0; 3]; 3], &[0, 1, 2], &[0, 3, 1, 3]);
        assert!(matches!(err, Err(MeshError::InvalidMesh(_))));
    }

    #[test]
    fn deserialize_validates() {
        let json = r#"{"positions":[[0,0,0],[1,0,0]],"faces":[[0,1,5]]}"#;
        assert!(serde_json::from_str::<Mesh>(json).is_err());

        let mesh = two_triangles();
        let s = serde_json::to_string(&mesh).unwrap();
        let back: Mesh = serde_json::from_str(&s).unwrap();
        assert_eq!(back, mesh);
    }
}
