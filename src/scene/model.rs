// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh with its transform and bounding box kept in step

use super::ParameterLine;
use crate::error::ObbResult;
use crate::geometry::{BoxBuilder, LineIntersection, MeshBuffers, OrientedBox, Primitive};
use crate::transform::Transform;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// A mesh placed in the world
///
/// Every transform change goes through this type and reapplies the box
/// transform, so line queries always see the current placement.
#[derive(Debug, Clone)]
pub struct BoundedModel {
    mesh: MeshBuffers,
    transform: Transform,
    obb: OrientedBox,
    lines: Vec<ParameterLine>,
}

impl BoundedModel {
    pub fn new(mesh: MeshBuffers, builder: &BoxBuilder) -> ObbResult<Self> {
        let obb = builder.build(&mesh.view()?)?;
        for (i, vertex) in obb.world_vertices().iter().enumerate() {
            debug!(i, x = vertex.x, y = vertex.y, z = vertex.z, "final box vertex");
        }

        Ok(Self {
            mesh,
            transform: Transform::default(),
            obb,
            lines: Vec::new(),
        })
    }

    pub fn from_primitive(primitive: Primitive, builder: &BoxBuilder) -> ObbResult<Self> {
        Self::new(primitive.to_mesh(), builder)
    }

    pub fn with_lines(mut self, lines: Vec<ParameterLine>) -> Self {
        self.lines = lines;
        self
    }

    pub fn mesh(&self) -> &MeshBuffers {
        &self.mesh
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn obb(&self) -> &OrientedBox {
        &self.obb
    }

    pub fn lines(&self) -> &[ParameterLine] {
        &self.lines
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        self.refresh();
    }

    pub fn move_by(&mut self, delta: &Vector3<f32>) {
        self.transform.translate(delta);
        self.refresh();
    }

    pub fn scale_by(&mut self, delta: &Vector3<f32>) {
        self.transform.rescale(delta);
        self.refresh();
    }

    /// Drag parameter line `index` by `delta`; false if there is no such line
    pub fn trigger_line(&mut self, index: usize, delta: &Vector3<f32>) -> bool {
        match self.lines.get(index).copied() {
            Some(line) => {
                line.trigger(self, delta);
                true
            }
            None => false,
        }
    }

    pub fn intersects_line(&self, point: &Point3<f32>, dir: &Vector3<f32>) -> LineIntersection {
        self.obb.intersects_line(point, dir)
    }

    fn refresh(&mut self) {
        self.obb.apply_transform(&self.transform.matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ParameterLineKind;

    fn unit_cube() -> BoundedModel {
        BoundedModel::from_primitive(
            Primitive::cube(Vector3::new(1.0, 1.0, 1.0), true),
            &BoxBuilder::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_move_updates_box() {
        let mut model = unit_cube();
        let eye = Point3::new(0.0, 0.0, -10.0);
        assert!(model.intersects_line(&eye, &Vector3::z()).hit);

        model.move_by(&Vector3::new(3.0, 0.0, 0.0));
        assert!(!model.intersects_line(&eye, &Vector3::z()).hit);
        assert!(model
            .intersects_line(&Point3::new(3.0, 0.0, -10.0), &Vector3::z())
            .hit);
    }

    #[test]
    fn test_scale_grows_box() {
        let mut model = unit_cube();
        let eye = Point3::new(1.2, 0.0, -10.0);
        assert!(!model.intersects_line(&eye, &Vector3::z()).hit);

        model.scale_by(&Vector3::new(2.0, 0.0, 0.0));
        assert!(model.intersects_line(&eye, &Vector3::z()).hit);
    }

    #[test]
    fn test_trigger_line_by_index() {
        let mut model = unit_cube().with_lines(vec![ParameterLine::new(
            ParameterLineKind::Move,
            Vector3::zeros(),
            Vector3::y(),
        )]);

        assert!(model.trigger_line(0, &Vector3::new(0.0, 1.0, 0.0)));
        assert!(!model.trigger_line(1, &Vector3::new(0.0, 1.0, 0.0)));
        assert_eq!(model.transform().position, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_set_transform_resets_placement() {
        let mut model = unit_cube();
        model.move_by(&Vector3::new(4.0, 4.0, 4.0));
        model.set_transform(Transform::default());
        assert_eq!(model.obb().world_vertices(), model.obb().local_vertices());
    }
}
