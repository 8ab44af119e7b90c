// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! obbkit
//!
//! Approximate minimum-volume oriented bounding boxes for triangle meshes and
//! line picking against them. A box is built once per mesh by wrapping the
//! mesh's projection onto every face plane, fitting the least-area rectangle
//! with rotating calipers and extruding it over the mesh; the smallest prism
//! wins. The box then follows its model's transform and answers infinite-line
//! queries with a separating axis test.
//!
//! Box state is plain data owned by its model. Queries take `&self` and
//! transform updates take `&mut self`, so concurrent readers are fine and a
//! writer must hold exclusive access.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod scene;
pub mod transform;

pub use config::BuildConfig;
pub use error::{DegenerateFace, ObbError, ObbResult};
pub use geometry::{BoxBuilder, LineIntersection, MeshBuffers, MeshView, OrientedBox, Primitive};
pub use scene::{BoundedModel, ParameterLine, ParameterLineKind, Scene};
pub use transform::Transform;

use nalgebra::Vector3;

/// Build the oriented box for flat mesh buffers
pub fn build_box(
    coordinates: &[f32],
    normals: &[Vector3<f32>],
    elements: &[u32],
    config: &BuildConfig,
) -> ObbResult<OrientedBox> {
    let mesh = MeshView::new(coordinates, normals, elements)?;
    BoxBuilder::new(config.clone()).build(&mesh)
}
