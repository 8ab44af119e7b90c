// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Model placement: position and scale

use nalgebra::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// Placement of a model in the world
///
/// `angle` is carried along for callers that track it but is not part of
/// [`Transform::matrix`]; boxes only ever see scale and translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub angle: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            angle: Vector3::zeros(),
        }
    }
}

impl Transform {
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Scale first, then translate
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position) * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    pub fn translate(&mut self, delta: &Vector3<f32>) {
        self.position += delta;
    }

    /// Add `delta` to the per-axis scale factors
    pub fn rescale(&mut self, delta: &Vector3<f32>) {
        self.scale += delta;
    }
}
