//! Top-level module for mesh topology abstractions.
//!
//! This module provides the shared mesh representation used by every
//! algorithm in the crate:
//! - Arena ids for vertices and faces
//! - Undirected edge keys
//! - The validated `Mesh` arena, raw `IndexedFaces` buffers and the
//!   `PolygonMesh` trait over both
//! - Manifoldness checks

pub mod edge;
pub mod ids;
pub mod mesh;
pub mod validation;

pub use edge::EdgeKey;
pub use ids::{FaceId, VertexId};
pub use mesh::{IndexedFaces, Mesh, Point3, PolygonMesh};
