// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene module - models, their handles and ray picking

mod model;
mod parameter_line;

pub use model::BoundedModel;
pub use parameter_line::{ParameterLine, ParameterLineKind};

use crate::error::{ObbError, ObbResult};
use nalgebra::{Point3, Vector3};

/// Models in the world plus the current selection
#[derive(Debug, Default)]
pub struct Scene {
    models: Vec<BoundedModel>,
    selected: Option<usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model and return its id
    pub fn add(&mut self, model: BoundedModel) -> usize {
        self.models.push(model);
        self.models.len() - 1
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&BoundedModel> {
        self.models.get(id)
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut BoundedModel> {
        self.models.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoundedModel> {
        self.models.iter()
    }

    pub fn select(&mut self, id: usize) -> ObbResult<()> {
        self.check(id)?;
        self.selected = Some(id);
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&BoundedModel> {
        self.selected.and_then(|id| self.models.get(id))
    }

    pub fn selected_mut(&mut self) -> Option<&mut BoundedModel> {
        self.selected.and_then(|id| self.models.get_mut(id))
    }

    /// Remove a model; later ids shift down by one
    pub fn delete(&mut self, id: usize) -> ObbResult<BoundedModel> {
        self.check(id)?;
        self.selected = match self.selected {
            Some(selected) if selected == id => None,
            Some(selected) if selected > id => Some(selected - 1),
            other => other,
        };
        Ok(self.models.remove(id))
    }

    /// Nearest model in front of the ray
    ///
    /// A model qualifies when its box is hit and lies ahead of `point` along
    /// `dir`; ties on distance keep the lower id.
    pub fn pick(&self, point: &Point3<f32>, dir: &Vector3<f32>) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;

        for (id, model) in self.models.iter().enumerate() {
            let result = model.intersects_line(point, dir);
            if !(result.hit && result.all_on_same_side) {
                continue;
            }

            let distance = (model.obb().center() - point).dot(dir);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((id, distance));
            }
        }

        best.map(|(id, _)| id)
    }

    /// Pick and select in one step
    pub fn pick_and_select(&mut self, point: &Point3<f32>, dir: &Vector3<f32>) -> Option<usize> {
        let picked = self.pick(point, dir);
        if picked.is_some() {
            self.selected = picked;
        }
        picked
    }

    fn check(&self, id: usize) -> ObbResult<()> {
        if id >= self.models.len() {
            return Err(ObbError::ModelOutOfBounds {
                id,
                len: self.models.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoxBuilder, Primitive};

    fn cube_at(x: f32) -> BoundedModel {
        let mut model = BoundedModel::from_primitive(
            Primitive::cube(Vector3::new(1.0, 1.0, 1.0), true),
            &BoxBuilder::default(),
        )
        .unwrap();
        model.move_by(&Vector3::new(x, 0.0, 0.0));
        model
    }

    #[test]
    fn test_select_and_delete() {
        let mut scene = Scene::new();
        let a = scene.add(cube_at(0.0));
        let b = scene.add(cube_at(5.0));

        scene.select(b).unwrap();
        assert!(matches!(
            scene.select(7),
            Err(ObbError::ModelOutOfBounds { id: 7, len: 2 })
        ));

        scene.delete(a).unwrap();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.selected_id(), Some(0));

        scene.delete(0).unwrap();
        assert_eq!(scene.selected_id(), None);
        assert!(scene.delete(0).is_err());
    }

    #[test]
    fn test_pick_nearest_in_front() {
        let mut scene = Scene::new();
        let far = scene.add(cube_at(10.0));
        let near = scene.add(cube_at(4.0));
        scene.add(cube_at(-6.0));

        let eye = Point3::new(0.0, 0.0, 0.0);
        assert_eq!(scene.pick(&eye, &Vector3::x()), Some(near));
        assert_eq!(scene.pick(&Point3::new(7.0, 0.0, 0.0), &Vector3::x()), Some(far));
        assert_eq!(scene.pick(&eye, &Vector3::y()), None);
    }

    #[test]
    fn test_pick_and_select() {
        let mut scene = Scene::new();
        let id = scene.add(cube_at(3.0));
        assert_eq!(scene.pick_and_select(&Point3::origin(), &Vector3::x()), Some(id));
        assert_eq!(scene.selected_id(), Some(id));

        assert_eq!(scene.pick_and_select(&Point3::origin(), &-Vector3::x()), None);
        assert_eq!(scene.selected_id(), Some(id));
    }
}
