use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_graphify::algs::dual_graph::extract_face_graph;
use mesh_graphify::algs::meshgen::build_cuboid;

fn bench_build_cuboid(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_cuboid");
    for &n in &[4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| build_cuboid(black_box(n), black_box(n), black_box(n)).unwrap())
        });
    }
    group.finish();
}

fn bench_extract_face_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_face_graph");
    for &n in &[4usize, 16, 64] {
        let mesh = build_cuboid(n, n, n).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &mesh, |b, mesh| {
            b.iter(|| extract_face_graph(black_box(mesh)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_cuboid, bench_extract_face_graph);
criterion_main!(benches);
