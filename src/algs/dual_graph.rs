//! Face-adjacency (*dual*) graph of a polygon mesh.
//
// Each *face* is a node; an undirected edge joins two faces whenever they
// share at least one mesh edge. An edge belongs to a face when the face's
// loop visits both endpoints consecutively, in either direction.
//
// The graph is stored as two ordered sets, so it is symmetric, self-free and
// independent of the order faces or edges were visited in. A CSR view
// (`xadj`/`adjncy`, ParMETIS style) is built once at construction for
// neighbour queries and handed out by `FaceGraph::to_csr`.

use std::collections::BTreeSet;
use std::fmt;

use hashbrown::HashMap;
use itertools::Itertools;
use serde::Serialize;

use crate::mesh_error::MeshError;
use crate::topology::edge::EdgeKey;
use crate::topology::ids::FaceId;
use crate::topology::mesh::{PolygonMesh, loop_edges, validate_face_loop};
use crate::topology::validation::{NonManifoldHandling, check_edge_manifold};

/// An unordered pair of distinct faces, stored as `lo < hi`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FacePair {
    lo: FaceId,
    hi: FaceId,
}

impl FacePair {
    /// Pair `a` with `b`; `None` when they are the same face.
    #[inline]
    pub fn new(a: FaceId, b: FaceId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(FacePair { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(FacePair { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[inline]
    pub fn lo(self) -> FaceId {
        self.lo
    }

    #[inline]
    pub fn hi(self) -> FaceId {
        self.hi
    }

    /// The face paired with `f`, if `f` is part of the pair.
    #[inline]
    pub fn other(self, f: FaceId) -> Option<FaceId> {
        if f == self.lo {
            Some(self.hi)
        } else if f == self.hi {
            Some(self.lo)
        } else {
            None
        }
    }
}

impl fmt::Display for FacePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

/// CSR triple
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DualGraph {
    pub xadj: Vec<usize>,
    pub adjncy: Vec<usize>,
}

impl DualGraph {
    /// Neighbour slice of node `i`, sorted ascending.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }
}

/// Face-adjacency graph: one node per face, one edge per adjacent face pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FaceGraph {
    nodes: BTreeSet<FaceId>,
    adjacency: BTreeSet<FacePair>,
    #[serde(skip)]
    csr: DualGraph,
}

impl FaceGraph {
    fn from_sets(nodes: BTreeSet<FaceId>, adjacency: BTreeSet<FacePair>) -> Self {
        let n = nodes.len();
        let mut lists: Vec<Vec<usize>> = vec![Vec::new(); n];
        for pair in &adjacency {
            lists[pair.lo.index()].push(pair.hi.index());
            lists[pair.hi.index()].push(pair.lo.index());
        }
        let mut xadj = Vec::with_capacity(n + 1);
        let mut adjncy = Vec::with_capacity(2 * adjacency.len());
        xadj.push(0);
        for mut nbrs in lists {
            nbrs.sort_unstable();
            adjncy.extend(nbrs);
            xadj.push(adjncy.len());
        }

        let graph = FaceGraph {
            nodes,
            adjacency,
            csr: DualGraph { xadj, adjncy },
        };
        crate::debug_invariants!(graph, "FaceGraph::from_sets");
        graph
    }

    /// Face ids of the source mesh.
    #[inline]
    pub fn nodes(&self) -> &BTreeSet<FaceId> {
        &self.nodes
    }

    /// Adjacent face pairs.
    #[inline]
    pub fn adjacency(&self) -> &BTreeSet<FacePair> {
        &self.adjacency
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.adjacency.len()
    }

    /// True when `a` and `b` share a mesh edge.
    pub fn are_adjacent(&self, a: FaceId, b: FaceId) -> bool {
        FacePair::new(a, b).is_some_and(|p| self.adjacency.contains(&p))
    }

    /// Faces adjacent to `face`, ascending. Empty for unknown faces.
    pub fn neighbors(&self, face: FaceId) -> impl Iterator<Item = FaceId> + '_ {
        let nbrs: &[usize] = if self.nodes.contains(&face) {
            self.csr.neighbors(face.index())
        } else {
            &[]
        };
        nbrs.iter().map(|&i| FaceId::new(i as u32))
    }

    /// Number of faces adjacent to `face`.
    pub fn degree(&self, face: FaceId) -> usize {
        if self.nodes.contains(&face) {
            self.csr.neighbors(face.index()).len()
        } else {
            0
        }
    }

    /// CSR adjacency; node `i` is face `i`.
    pub fn to_csr(&self) -> DualGraph {
        self.csr.clone()
    }
}

/// Prints `{nodes: {0, 1, 2}, adjacency: {(0, 1), (1, 2)}}`.
impl fmt::Display for FaceGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{nodes: {{{}}}, adjacency: {{{}}}}}",
            self.nodes.iter().join(", "),
            self.adjacency.iter().join(", ")
        )
    }
}

impl crate::debug_invariants::DebugInvariants for FaceGraph {
    fn invariant_context(&self) -> String {
        format!(
            "face graph with {} nodes, {} edges",
            self.nodes.len(),
            self.adjacency.len()
        )
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        // nodes are the dense range 0..n
        if let Some((i, f)) = self
            .nodes
            .iter()
            .enumerate()
            .find(|&(i, f)| f.index() != i)
        {
            return Err(MeshError::InvalidMesh(format!(
                "face graph node {f} found at position {i}; nodes must be dense"
            )));
        }
        for pair in &self.adjacency {
            if pair.lo >= pair.hi || !self.nodes.contains(&pair.hi) {
                return Err(MeshError::InvalidMesh(format!(
                    "face graph edge {pair} does not join two distinct nodes"
                )));
            }
        }
        if self.csr.adjncy.len() != 2 * self.adjacency.len() {
            return Err(MeshError::InvalidMesh(
                "face graph CSR view is out of sync with its edge set".into(),
            ));
        }
        Ok(())
    }
}

/// Options for face graph extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FaceGraphOpts {
    /// What to do with edges shared by three or more faces. Unless the
    /// policy is `Error`, all faces around such an edge are pairwise adjacent.
    pub non_manifold: NonManifoldHandling,
}

/// Extract the face-adjacency graph of `mesh` with default options.
///
/// Fails with [`MeshError::InvalidMesh`] if a face loop has fewer than three
/// vertices, references a vertex outside the mesh, or repeats a vertex on
/// consecutive positions (including last to first).
pub fn extract_face_graph<M>(mesh: &M) -> Result<FaceGraph, MeshError>
where
    M: PolygonMesh + ?Sized,
{
    extract_face_graph_with(mesh, FaceGraphOpts::default())
}

/// Extract the face-adjacency graph of `mesh`.
pub fn extract_face_graph_with<M>(mesh: &M, opts: FaceGraphOpts) -> Result<FaceGraph, MeshError>
where
    M: PolygonMesh + ?Sized,
{
    // 0. validate every loop before building anything
    if u32::try_from(mesh.face_count()).is_err() {
        return Err(MeshError::InvalidMesh(format!(
            "{} faces exceed the u32 id space",
            mesh.face_count()
        )));
    }
    let vertex_count = mesh.vertex_count();
    for face in mesh.face_ids() {
        validate_face_loop(face, mesh.face_loop(face), vertex_count)?;
    }

    // 1. edge → faces index
    let mut edge_faces: HashMap<EdgeKey, Vec<FaceId>> = HashMap::new();
    for face in mesh.face_ids() {
        for (a, b) in loop_edges(mesh.face_loop(face)) {
            let users = edge_faces.entry(EdgeKey::new(a, b)).or_default();
            if users.last() != Some(&face) {
                users.push(face);
            }
        }
    }

    // 2. every pair of faces around an edge is adjacent
    let mut adjacency = BTreeSet::new();
    let mut non_manifold = Vec::new();
    for (&edge, faces) in &edge_faces {
        if faces.len() > 2 {
            non_manifold.push(edge);
        }
        adjacency.extend(
            faces
                .iter()
                .tuple_combinations()
                .filter_map(|(&a, &b)| FacePair::new(a, b)),
        );
    }
    non_manifold.sort_unstable();
    for edge in non_manifold {
        check_edge_manifold(edge, &edge_faces[&edge], opts.non_manifold)?;
    }

    // 3. isolated faces are still nodes
    let nodes: BTreeSet<FaceId> = mesh.face_ids().collect();
    log::debug!(
        "face graph: {} nodes, {} edges from {} mesh edges",
        nodes.len(),
        adjacency.len(),
        edge_faces.len()
    );
    Ok(FaceGraph::from_sets(nodes, adjacency))
}
