// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Oriented bounding box with a cached world-space state
//!
//! The box keeps the prism it was built from in object space and derives
//! everything a line query needs from the current transform: world vertices,
//! one unit normal per pair of parallel faces and every vertex projected onto
//! each of the three planes through the origin. The cache is refreshed
//! whenever [`OrientedBox::apply_transform`] runs, and a freshly built box has
//! already been transformed by the identity.

use super::mesh::MeshView;
use super::prism::{Prism, PRISM_ELEMENTS, PRISM_VERTICES};
use super::projection::project_on_plane;
use super::BoxBuilder;
use crate::error::ObbResult;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Number of face-normal axes
pub const AXIS_COUNT: usize = 3;

/// Element entries per pair of parallel faces (2 faces x 2 triangles x 3)
const ELEMENTS_PER_AXIS: usize = 12;

/// Relative size below which an edge or face of the box counts as collapsed
const COLLAPSE_EPS: f32 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    start_vertices: [Point3<f32>; PRISM_VERTICES],
    vertices: [Point3<f32>; PRISM_VERTICES],
    normals: [Vector3<f32>; AXIS_COUNT],
    projected: [Point3<f32>; PRISM_VERTICES * AXIS_COUNT],
    volume: f32,
}

impl OrientedBox {
    /// Build the box for mesh buffers with the default configuration
    pub fn build(coordinates: &[f32], normals: &[Vector3<f32>], elements: &[u32]) -> ObbResult<Self> {
        let mesh = MeshView::new(coordinates, normals, elements)?;
        BoxBuilder::default().build(&mesh)
    }

    /// Wrap a winning prism, transformed by the identity
    pub fn from_prism(prism: Prism) -> Self {
        let mut obb = Self {
            start_vertices: prism.vertices,
            vertices: prism.vertices,
            normals: [Vector3::zeros(); AXIS_COUNT],
            projected: [Point3::origin(); PRISM_VERTICES * AXIS_COUNT],
            volume: prism.volume,
        };
        obb.apply_transform(&Matrix4::identity());
        obb
    }

    /// Triangle list over [`OrientedBox::world_vertices`], same for every box
    pub fn elements() -> &'static [u32; 36] {
        &PRISM_ELEMENTS
    }

    /// Object-space vertices, fixed at construction
    pub fn local_vertices(&self) -> &[Point3<f32>; PRISM_VERTICES] {
        &self.start_vertices
    }

    /// Vertices under the last applied transform
    pub fn world_vertices(&self) -> &[Point3<f32>; PRISM_VERTICES] {
        &self.vertices
    }

    /// World vertices as a flat xyz buffer, ready for upload
    pub fn coords(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
    }

    /// Unit normals of the three face pairs under the last transform
    pub fn normals(&self) -> &[Vector3<f32>; AXIS_COUNT] {
        &self.normals
    }

    /// Object-space volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Mean of the world vertices
    pub fn center(&self) -> Point3<f32> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / PRISM_VERTICES as f32)
    }

    /// World vertices projected onto the plane through the origin normal to `axis`
    pub(crate) fn projected_on_axis(&self, axis: usize) -> &[Point3<f32>] {
        let start = axis * PRISM_VERTICES;
        &self.projected[start..start + PRISM_VERTICES]
    }

    /// Map the object-space vertices through `matrix` and refresh the cache
    ///
    /// `matrix` uses nalgebra's column-vector convention.
    pub fn apply_transform(&mut self, matrix: &Matrix4<f32>) {
        for (world, local) in self.vertices.iter_mut().zip(&self.start_vertices) {
            *world = matrix.transform_point(local);
        }
        self.compute_normals();
    }

    /// Same as [`OrientedBox::apply_transform`] for a row-major matrix buffer
    pub fn apply_row_major_transform(&mut self, matrix: &[f32; 16]) {
        self.apply_transform(&Matrix4::from_row_slice(matrix));
    }

    fn compute_normals(&mut self) {
        let scale = self.longest_edge();
        let mut face_normals = [None; AXIS_COUNT];
        for (axis, slot) in face_normals.iter_mut().enumerate() {
            let base = axis * ELEMENTS_PER_AXIS;
            let a = self.vertex_by_element(base);
            let b = self.vertex_by_element(base + 1);
            let c = self.vertex_by_element(base + 2);
            *slot = (b - a)
                .cross(&(c - a))
                .try_normalize(COLLAPSE_EPS * scale * scale + f32::MIN_POSITIVE);
        }

        self.normals = match face_normals {
            [Some(a), Some(b), Some(c)] => [a, b, c],
            _ => self.edge_axes(scale),
        };

        let origin = Point3::origin();
        for (axis, normal) in self.normals.iter().enumerate() {
            for (i, vertex) in self.vertices.iter().enumerate() {
                self.projected[axis * PRISM_VERTICES + i] = project_on_plane(&origin, normal, vertex);
            }
        }
    }

    fn longest_edge(&self) -> f32 {
        let v = &self.vertices;
        [v[1] - v[0], v[3] - v[0], v[4] - v[0]]
            .iter()
            .map(|e| e.norm())
            .fold(0.0_f32, f32::max)
    }

    /// Axes for a box with a collapsed face pair
    ///
    /// Uses the surviving edge directions from vertex 0 and completes them to
    /// three independent unit axes, so a flat, linear or point-like box still
    /// has a full set of separating planes.
    fn edge_axes(&self, scale: f32) -> [Vector3<f32>; AXIS_COUNT] {
        let v = &self.vertices;
        let min_len = COLLAPSE_EPS * scale + f32::MIN_POSITIVE;
        let mut axes: Vec<Vector3<f32>> = Vec::with_capacity(AXIS_COUNT);

        for edge in [v[1] - v[0], v[3] - v[0], v[4] - v[0]] {
            let Some(dir) = edge.try_normalize(min_len) else {
                continue;
            };
            let independent = match axes.as_slice() {
                [] => true,
                [a] => a.cross(&dir).norm() > COLLAPSE_EPS,
                [a, b] => a.cross(b).normalize().dot(&dir).abs() > COLLAPSE_EPS,
                _ => false,
            };
            if independent {
                axes.push(dir);
            }
        }

        match axes.as_slice() {
            [a, b, c] => [*a, *b, *c],
            [a, b] => [*a, *b, a.cross(b).normalize()],
            [a] => {
                let helper = if a.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
                let b = a.cross(&helper).normalize();
                [*a, b, a.cross(&b)]
            }
            _ => [Vector3::x(), Vector3::y(), Vector3::z()],
        }
    }

    fn vertex_by_element(&self, offset: usize) -> Point3<f32> {
        self.vertices[PRISM_ELEMENTS[offset] as usize]
    }
}
