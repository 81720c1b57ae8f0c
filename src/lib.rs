#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-graphify
//!
//! mesh-graphify is a small, host-independent kernel for two polygon-mesh
//! algorithms:
//!
//! - **Parametric cuboid generation**: [`build_cuboid`](algs::meshgen::build_cuboid)
//!   builds a closed quad mesh with an `a × b × c` grid of unit cells, centred
//!   at the origin, by seeding a unit cube, subdividing the edges along each
//!   axis and scaling.
//! - **Face-adjacency graph extraction**:
//!   [`extract_face_graph`](algs::dual_graph::extract_face_graph) derives the
//!   dual graph of any polygon mesh: one node per face, one edge per pair of
//!   faces sharing a mesh edge.
//!
//! Both operate on the shared [`Mesh`](topology::mesh::Mesh) arena (or any
//! [`PolygonMesh`](topology::mesh::PolygonMesh)) and neither calls the other.
//! Everything is synchronous; results are immutable and `Send + Sync`.
//!
//! ## Usage
//!
//! ```rust
//! use mesh_graphify::prelude::*;
//!
//! let cuboid = build_cuboid(3, 2, 1)?;
//! assert_eq!(cuboid.face_count(), 2 * (3 * 2 + 2 * 1 + 3 * 1));
//!
//! let graph = extract_face_graph(&cuboid)?;
//! assert_eq!(graph.node_count(), cuboid.face_count());
//! # Ok::<(), MeshError>(())
//! ```
//!
//! ## Logging
//! The crate emits records through the [`log`] facade and never installs a
//! logger itself.

pub mod algs;
pub mod debug_invariants;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

static_assertions::assert_impl_all!(topology::mesh::Mesh: Send, Sync);
static_assertions::assert_impl_all!(algs::dual_graph::FaceGraph: Send, Sync);

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::dual_graph::{
        DualGraph, FaceGraph, FaceGraphOpts, FacePair, extract_face_graph, extract_face_graph_with,
    };
    pub use crate::algs::meshgen::{
        CuboidOpts, CuboidParams, MAX_SEGMENTS, MIN_SEGMENTS, build_cuboid, build_cuboid_with,
    };
    pub use crate::algs::subdivide::Axis;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshError;
    pub use crate::topology::edge::EdgeKey;
    pub use crate::topology::ids::{FaceId, VertexId};
    pub use crate::topology::mesh::{IndexedFaces, Mesh, Point3, PolygonMesh};
    pub use crate::topology::validation::NonManifoldHandling;
}
