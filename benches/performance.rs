// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{Point3, Vector3};
use obbkit::{BoxBuilder, BuildConfig, Primitive};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let builder = BoxBuilder::default();

    let cube = Primitive::cube(Vector3::new(10.0, 10.0, 10.0), true).to_mesh();
    group.bench_function("cube", |b| {
        b.iter(|| builder.build(black_box(&cube.view().unwrap())).unwrap());
    });

    for segments in [8u32, 16, 32] {
        let sphere = Primitive::sphere(5.0, segments).to_mesh();
        group.bench_with_input(BenchmarkId::new("sphere", segments), &sphere, |b, mesh| {
            b.iter(|| builder.build(black_box(&mesh.view().unwrap())).unwrap());
        });
    }

    let sphere = Primitive::sphere(5.0, 16).to_mesh();
    let all_faces = BoxBuilder::new(BuildConfig {
        skip_parallel_faces: false,
        ..BuildConfig::default()
    });
    group.bench_function("sphere_all_faces", |b| {
        b.iter(|| all_faces.build(black_box(&sphere.view().unwrap())).unwrap());
    });

    group.finish();
}

fn bench_intersects_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersects_line");

    let mesh = Primitive::sphere(1.0, 16).to_mesh();
    let obb = BoxBuilder::default().build(&mesh.view().unwrap()).unwrap();
    let eye = Point3::new(0.2, 0.1, -10.0);

    let hit = Vector3::z();
    group.bench_function("hit", |b| {
        b.iter(|| obb.intersects_line(black_box(&eye), black_box(&hit)));
    });

    let miss = Vector3::new(1.0, 0.0, 0.2).normalize();
    group.bench_function("miss", |b| {
        b.iter(|| obb.intersects_line(black_box(&eye), black_box(&miss)));
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_intersects_line);
criterion_main!(benches);
