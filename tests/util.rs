#![allow(dead_code)]
use mesh_graphify::algs::dual_graph::{FaceGraph, FacePair};
use mesh_graphify::topology::ids::{FaceId, VertexId};
use mesh_graphify::topology::mesh::{IndexedFaces, Mesh, Point3};
use std::collections::BTreeSet;

pub fn vid(u: u32) -> VertexId {
    VertexId::new(u)
}

pub fn fid(u: u32) -> FaceId {
    FaceId::new(u)
}

/// Face loops from raw indices.
pub fn loops(raw: &[&[u32]]) -> Vec<Vec<VertexId>> {
    raw.iter()
        .map(|l| l.iter().copied().map(VertexId::new).collect())
        .collect()
}

/// Corner positions of `face`.
pub fn face_points(mesh: &Mesh, face: &[VertexId]) -> Vec<Point3> {
    face.iter().map(|&v| mesh.positions()[v.index()]).collect()
}

/// Newell normal of a polygon (length = twice the area).
pub fn newell_normal(points: &[Point3]) -> Point3 {
    let mut n = [0.0; 3];
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        n[0] += (p[1] - q[1]) * (p[2] + q[2]);
        n[1] += (p[2] - q[2]) * (p[0] + q[0]);
        n[2] += (p[0] - q[0]) * (p[1] + q[1]);
    }
    n
}

/// Reorder faces so that new face `i` is old face `perm[i]`.
pub fn permute_faces(raw: &IndexedFaces, perm: &[usize]) -> IndexedFaces {
    IndexedFaces::new(
        raw.positions.clone(),
        perm.iter().map(|&old| raw.faces[old].clone()).collect(),
    )
}

/// Adjacency of `graph` expressed in the face ids of the unpermuted mesh.
pub fn unpermute_pairs(graph: &FaceGraph, perm: &[usize]) -> BTreeSet<FacePair> {
    graph
        .adjacency()
        .iter()
        .filter_map(|p| FacePair::new(fid(perm[p.lo().index()] as u32), fid(perm[p.hi().index()] as u32)))
        .collect()
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}
