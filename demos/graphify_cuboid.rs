use mesh_graphify::algs::dual_graph::extract_face_graph;
use mesh_graphify::algs::meshgen::{CuboidOpts, CuboidParams, build_cuboid_with};
use mesh_graphify::mesh_error::MeshError;

fn main() -> Result<(), MeshError> {
    let params = CuboidParams::default();
    let cuboid = build_cuboid_with(params, CuboidOpts::default())?;
    println!(
        "Cuboid ({}, {}, {}): {} vertices, {} edges, {} faces",
        params.x_segments,
        params.y_segments,
        params.z_segments,
        cuboid.vertex_count(),
        cuboid.edge_count(),
        cuboid.face_count()
    );

    let graph = extract_face_graph(&cuboid)?;
    assert_eq!(graph.node_count(), params.face_count());
    assert_eq!(graph.edge_count(), params.edge_count());
    println!("{graph}");

    Ok(())
}
