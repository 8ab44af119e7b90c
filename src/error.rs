// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for box construction and scene management

use thiserror::Error;

/// Result type alias for box operations.
pub type ObbResult<T> = Result<T, ObbError>;

/// Errors that can occur while building or managing oriented boxes.
#[derive(Debug, Error)]
pub enum ObbError {
    /// Mesh buffers are inconsistent with each other.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// Mesh exceeds the configured triangle limit.
    #[error("mesh has {triangles} triangles, limit is {limit}")]
    MeshTooLarge { triangles: usize, limit: usize },

    /// No face of the mesh produced a usable prism.
    #[error("no valid prism found for mesh")]
    NoValidPrism,

    /// Model id does not exist in the scene.
    #[error("model id {id} is out of bounds (scene has {len} models)")]
    ModelOutOfBounds { id: usize, len: usize },
}

/// Reason a single face produced no candidate prism.
///
/// Faces failing this way are skipped by the builder; construction only fails
/// when every face is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DegenerateFace {
    /// Face vertices are colinear or repeated
    #[error("face normal is undefined")]
    NoNormal,

    /// Not enough projected points to wrap
    #[error("{0} projected points, need at least 2")]
    TooFewPoints(usize),

    /// Hull walk did not return to its seed point
    #[error("hull did not close after {0} steps")]
    HullNotClosed(usize),

    /// Hull has fewer than three vertices
    #[error("hull has only {0} vertices")]
    TooFewHullVertices(usize),

    /// Every hull edge is colinear with the rest of the hull
    #[error("hull is flat, no caliper direction has a width")]
    FlatHull,

    /// Extruded prism volume is not finite
    #[error("prism volume is not finite")]
    NonFiniteVolume,
}

impl ObbError {
    /// Create an invalid mesh error.
    pub fn invalid_mesh(details: impl Into<String>) -> Self {
        Self::InvalidMesh(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ObbError::invalid_mesh("index 9 out of range");
        assert!(format!("{err}").contains("index 9"));

        let err = ObbError::NoValidPrism;
        assert!(format!("{err}").contains("no valid prism"));

        let err = ObbError::MeshTooLarge {
            triangles: 10,
            limit: 4,
        };
        assert!(format!("{err}").contains("limit is 4"));
    }
}
