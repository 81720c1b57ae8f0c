//! MeshError: Unified error type for mesh-graphify public APIs
//!
//! Every fallible operation in the crate returns this error. Failures are
//! detected before any output is constructed, so an `Err` never comes with a
//! partially built mesh or graph.

use thiserror::Error;

use crate::topology::edge::EdgeKey;
use crate::topology::ids::FaceId;

/// Unified error type for mesh generation and graph extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A generation parameter fell outside its accepted range.
    #[error("invalid parameter `{name}` = {value}: expected a value in [{min}, {max}]")]
    InvalidParameter {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
    /// A face loop is malformed or references a vertex that does not exist.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
    /// An edge is shared by more than two faces and the caller asked for
    /// non-manifold input to be rejected.
    #[error("non-manifold edge {edge}: shared by {} faces", .faces.len())]
    NonManifoldEdge { edge: EdgeKey, faces: Vec<FaceId> },
}

pub(crate) fn invalid_mesh(message: impl Into<String>) -> MeshError {
    MeshError::InvalidMesh(message.into())
}
