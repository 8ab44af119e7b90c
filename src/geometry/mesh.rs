// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh buffers handed to the box builder

use crate::error::{ObbError, ObbResult};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Indices per triangle in an element list
pub const ELEMENTS_PER_FACE: usize = 3;

/// Borrowed view over flat mesh buffers
///
/// `coordinates` holds xyz triples, `normals` one unit vector per vertex and
/// `elements` vertex-id triples. The view is checked once on creation so the
/// builder can index without bounds errors.
#[derive(Debug, Clone, Copy)]
pub struct MeshView<'a> {
    coordinates: &'a [f32],
    normals: &'a [Vector3<f32>],
    elements: &'a [u32],
}

impl<'a> MeshView<'a> {
    /// Validate and wrap mesh buffers
    pub fn new(
        coordinates: &'a [f32],
        normals: &'a [Vector3<f32>],
        elements: &'a [u32],
    ) -> ObbResult<Self> {
        if coordinates.len() % 3 != 0 {
            return Err(ObbError::invalid_mesh(format!(
                "coordinate buffer length {} is not a multiple of 3",
                coordinates.len()
            )));
        }

        let vertex_count = coordinates.len() / 3;
        if normals.len() != vertex_count {
            return Err(ObbError::invalid_mesh(format!(
                "{} normals for {} vertices",
                normals.len(),
                vertex_count
            )));
        }

        if elements.len() % ELEMENTS_PER_FACE != 0 {
            return Err(ObbError::invalid_mesh(format!(
                "element buffer length {} is not a multiple of {}",
                elements.len(),
                ELEMENTS_PER_FACE
            )));
        }

        if let Some(bad) = elements.iter().find(|&&e| e as usize >= vertex_count) {
            return Err(ObbError::invalid_mesh(format!(
                "element {} references a mesh with {} vertices",
                bad, vertex_count
            )));
        }

        Ok(Self {
            coordinates,
            normals,
            elements,
        })
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.coordinates.len() / 3
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.elements.len() / ELEMENTS_PER_FACE
    }

    /// Position of vertex `index`
    pub fn point(&self, index: usize) -> Point3<f32> {
        let base = index * 3;
        Point3::new(
            self.coordinates[base],
            self.coordinates[base + 1],
            self.coordinates[base + 2],
        )
    }

    /// Iterate over all vertex positions in index order
    pub fn points(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.coordinates
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
    }

    /// Iterate over triangles as vertex-id triples
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.elements
            .chunks_exact(ELEMENTS_PER_FACE)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    pub fn normals(&self) -> &'a [Vector3<f32>] {
        self.normals
    }
}

/// Owned mesh buffers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub coordinates: Vec<f32>,
    pub normals: Vec<Vector3<f32>>,
    pub elements: Vec<u32>,
}

impl MeshBuffers {
    pub fn new(coordinates: Vec<f32>, normals: Vec<Vector3<f32>>, elements: Vec<u32>) -> Self {
        Self {
            coordinates,
            normals,
            elements,
        }
    }

    /// Build buffers from positions and triangles, deriving vertex normals
    pub fn from_triangles(positions: &[Point3<f32>], triangles: &[[u32; 3]]) -> Self {
        let coordinates = positions.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
        let elements: Vec<u32> = triangles.iter().flatten().copied().collect();
        let normals = accumulate_vertex_normals(positions, &elements);
        Self::new(coordinates, normals, elements)
    }

    /// Borrow as a validated view
    pub fn view(&self) -> ObbResult<MeshView<'_>> {
        MeshView::new(&self.coordinates, &self.normals, &self.elements)
    }

    pub fn vertex_count(&self) -> usize {
        self.coordinates.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.elements.len() / ELEMENTS_PER_FACE
    }
}

/// Per-vertex normals as the normalized running sum of adjacent face normals
///
/// Each face contributes once per corner, and the accumulated normal is
/// renormalized after every contribution. Vertices not referenced by any face
/// keep a zero normal.
pub fn accumulate_vertex_normals(positions: &[Point3<f32>], elements: &[u32]) -> Vec<Vector3<f32>> {
    let mut normals = vec![Vector3::zeros(); positions.len()];

    for tri in elements.chunks_exact(ELEMENTS_PER_FACE) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let face = (positions[b] - positions[a]).cross(&(positions[c] - positions[a]));
        let Some(face) = face.try_normalize(f32::EPSILON) else {
            continue;
        };

        for index in [a, b, c] {
            let sum: Vector3<f32> = normals[index] + face;
            normals[index] = sum.try_normalize(f32::EPSILON).unwrap_or(face);
        }
    }

    normals
}
