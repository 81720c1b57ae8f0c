//! Topology validation helpers.

use crate::mesh_error::MeshError;
use crate::topology::edge::EdgeKey;
use crate::topology::ids::FaceId;
use crate::topology::mesh::Mesh;

/// Behavior for non-manifold detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NonManifoldHandling {
    /// Accept non-manifold edges silently.
    Ignore,
    /// Log a warning on non-manifold edges and accept them.
    #[default]
    Warn,
    /// Return an error on non-manifold edges.
    Error,
}

/// Apply `handling` to an edge shared by `faces`. Edges with at most two
/// faces always pass.
pub fn check_edge_manifold(
    edge: EdgeKey,
    faces: &[FaceId],
    handling: NonManifoldHandling,
) -> Result<(), MeshError> {
    if faces.len() <= 2 {
        return Ok(());
    }
    match handling {
        NonManifoldHandling::Ignore => Ok(()),
        NonManifoldHandling::Warn => {
            log::warn!(
                "Non-manifold edge detected: edge={edge} incident_faces={}",
                faces.len()
            );
            Ok(())
        }
        NonManifoldHandling::Error => Err(MeshError::NonManifoldEdge {
            edge,
            faces: faces.to_vec(),
        }),
    }
}

/// Edge counts grouped by how many faces use each edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifoldReport {
    /// Edges used by exactly one face.
    pub boundary_edges: usize,
    /// Edges used by exactly two faces.
    pub manifold_edges: usize,
    /// Edges used by three or more faces.
    pub non_manifold_edges: Vec<EdgeKey>,
}

impl ManifoldReport {
    /// True when the surface has no boundary and no non-manifold edges.
    pub fn is_closed_manifold(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges.is_empty()
    }
}

/// Classify every edge of `mesh` by its face count.
pub fn manifold_report(mesh: &Mesh) -> ManifoldReport {
    let mut report = ManifoldReport::default();
    for (edge, faces) in mesh.edges() {
        match faces.len() {
            1 => report.boundary_edges += 1,
            2 => report.manifold_edges += 1,
            _ => report.non_manifold_edges.push(edge),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::ids::VertexId;

    fn v(i: u32) -> VertexId {
        VertexId::new(i)
    }

    // three triangles fanned around the edge (0, 1)
    fn fin_mesh() -> Mesh {
        Mesh::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, -1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
            vec![
                vec![v(0), v(1), v(2)],
                vec![v(1), v(0), v(3)],
                vec![v(0), v(1), v(4)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn report_counts_edges_by_valence() {
        let report = manifold_report(&fin_mesh());
        assert_eq!(report.boundary_edges, 6);
        assert_eq!(report.manifold_edges, 0);
        assert_eq!(report.non_manifold_edges, vec![EdgeKey::new(v(0), v(1))]);
        assert!(!report.is_closed_manifold());
    }

    #[test]
    fn handling_policies() {
        let mesh = fin_mesh();
        let fin = EdgeKey::new(v(0), v(1));
        let faces = mesh.edge_faces(fin).unwrap();
        assert!(check_edge_manifold(fin, faces, NonManifoldHandling::Ignore).is_ok());
        assert!(check_edge_manifold(fin, faces, NonManifoldHandling::Warn).is_ok());
        let err = check_edge_manifold(fin, faces, NonManifoldHandling::Error).unwrap_err();
        assert_eq!(
            err,
            MeshError::NonManifoldEdge {
                edge: EdgeKey::new(v(0), v(1)),
                faces: vec![FaceId::new(0), FaceId::new(1), FaceId::new(2)],
            }
        );
    }

    #[test]
    fn manifold_edges_always_pass() {
        let faces = [FaceId::new(0), FaceId::new(1)];
        let edge = EdgeKey::new(v(0), v(1));
        assert!(check_edge_manifold(edge, &faces, NonManifoldHandling::Error).is_ok());
    }
}
