//! Re-export public algorithms.

pub mod dual_graph;
pub mod meshgen;
pub mod subdivide;
pub mod transform;

pub use dual_graph::{extract_face_graph, extract_face_graph_with};
pub use meshgen::{build_cuboid, build_cuboid_with};
