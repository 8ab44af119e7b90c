// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Built-in meshes for models, tests and benchmarks

use super::MeshBuffers;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Geometric primitives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Cube { size: Vector3<f32>, center: bool },
    Pyramid { base: f32, height: f32 },
    Sphere { radius: f32, segments: u32 },
}

impl Primitive {
    pub fn cube(size: Vector3<f32>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    /// Square pyramid standing on the y = 0 plane, centered on the y axis
    pub fn pyramid(base: f32, height: f32) -> Self {
        Self::Pyramid { base, height }
    }

    pub fn sphere(radius: f32, segments: u32) -> Self {
        let segments = if segments > 2 { segments } else { 32 };
        Self::Sphere { radius, segments }
    }

    /// Unit-sized primitive by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cube" => Some(Self::cube(Vector3::new(1.0, 1.0, 1.0), true)),
            "pyramid" => Some(Self::pyramid(1.0, 1.0)),
            "sphere" => Some(Self::sphere(1.0, 16)),
            _ => None,
        }
    }

    pub fn to_mesh(&self) -> MeshBuffers {
        match self {
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Pyramid { base, height } => generate_pyramid_mesh(*base, *height),
            Self::Sphere { radius, segments } => generate_sphere_mesh(*radius, *segments),
        }
    }
}

fn generate_cube_mesh(size: Vector3<f32>, center: bool) -> MeshBuffers {
    let min = if center { -size / 2.0 } else { Vector3::zeros() };
    let max = min + size;

    let positions = [
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];

    let triangles = [
        // Front (z+)
        [4, 5, 6],
        [4, 6, 7],
        // Back (z-)
        [1, 0, 3],
        [1, 3, 2],
        // Right (x+)
        [5, 1, 2],
        [5, 2, 6],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Top (y+)
        [7, 6, 2],
        [7, 2, 3],
        // Bottom (y-)
        [0, 1, 5],
        [0, 5, 4],
    ];

    MeshBuffers::from_triangles(&positions, &triangles)
}

fn generate_pyramid_mesh(base: f32, height: f32) -> MeshBuffers {
    let b = base / 2.0;
    let positions = [
        Point3::new(-b, 0.0, -b),
        Point3::new(b, 0.0, -b),
        Point3::new(b, 0.0, b),
        Point3::new(-b, 0.0, b),
        Point3::new(0.0, height, 0.0),
    ];

    let triangles = [
        // Base (y-)
        [0, 1, 2],
        [0, 2, 3],
        // Sides
        [0, 4, 1],
        [1, 4, 2],
        [2, 4, 3],
        [3, 4, 0],
    ];

    MeshBuffers::from_triangles(&positions, &triangles)
}

fn generate_sphere_mesh(radius: f32, segments: u32) -> MeshBuffers {
    let stacks = segments;
    let slices = segments;

    let mut coordinates = Vec::new();
    let mut normals = Vec::new();

    for i in 0..=stacks {
        let phi = PI * i as f32 / stacks as f32;
        let y = radius * phi.cos();
        let r = radius * phi.sin();

        for j in 0..=slices {
            let theta = 2.0 * PI * j as f32 / slices as f32;
            let x = r * theta.cos();
            let z = r * theta.sin();

            coordinates.extend_from_slice(&[x, y, z]);
            normals.push(Vector3::new(x, y, z).try_normalize(f32::EPSILON).unwrap_or(Vector3::y()));
        }
    }

    let mut elements = Vec::new();
    for i in 0..stacks {
        for j in 0..slices {
            let first = i * (slices + 1) + j;
            let second = first + slices + 1;

            elements.extend_from_slice(&[first, second, first + 1]);
            elements.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    MeshBuffers::new(coordinates, normals, elements)
}
