// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parameter lines: handles that move or scale their model when dragged

use super::BoundedModel;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterLineKind {
    Scale,
    Move,
}

impl ParameterLineKind {
    /// Single-letter tag used in parameter line files
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Scale => "s",
            Self::Move => "m",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "s" => Some(Self::Scale),
            "m" => Some(Self::Move),
            _ => None,
        }
    }
}

/// Handle anchored at `origin`, pointing along `direction`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterLine {
    pub kind: ParameterLineKind,
    pub origin: Vector3<f32>,
    pub direction: Vector3<f32>,
}

impl ParameterLine {
    pub fn new(kind: ParameterLineKind, origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            kind,
            origin,
            direction,
        }
    }

    /// Apply `delta` to the model according to the handle kind
    pub fn trigger(&self, model: &mut BoundedModel, delta: &Vector3<f32>) {
        match self.kind {
            ParameterLineKind::Scale => model.scale_by(delta),
            ParameterLineKind::Move => model.move_by(delta),
        }
    }

    /// Drag along the handle direction by `amount`
    pub fn trigger_along(&self, model: &mut BoundedModel, amount: f32) {
        let delta = self
            .direction
            .try_normalize(f32::EPSILON)
            .map_or_else(Vector3::zeros, |dir| dir * amount);
        self.trigger(model, &delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoxBuilder, Primitive};

    fn model() -> BoundedModel {
        BoundedModel::from_primitive(
            Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false),
            &BoxBuilder::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_tags_roundtrip() {
        for kind in [ParameterLineKind::Scale, ParameterLineKind::Move] {
            assert_eq!(ParameterLineKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ParameterLineKind::from_tag("a"), None);
    }

    #[test]
    fn test_move_line_moves() {
        let mut model = model();
        let line = ParameterLine::new(ParameterLineKind::Move, Vector3::zeros(), Vector3::x());
        line.trigger_along(&mut model, 2.0);

        assert_eq!(model.transform().position, Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(model.transform().scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_scale_line_scales() {
        let mut model = model();
        let line = ParameterLine::new(ParameterLineKind::Scale, Vector3::zeros(), Vector3::y());
        line.trigger(&mut model, &Vector3::new(0.0, 1.0, 0.0));

        assert_eq!(model.transform().scale, Vector3::new(1.0, 2.0, 1.0));
        assert_eq!(model.transform().position, Vector3::zeros());
    }
}
