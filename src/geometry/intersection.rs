// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Line vs. oriented box test (separating axis theorem)

use super::obb::{OrientedBox, AXIS_COUNT};
use super::projection::project_on_plane;
use nalgebra::{Point3, Vector3};

/// Below this length a projected line direction is treated as a point
const DIR_EPS: f32 = 1e-6;

/// Result of [`OrientedBox::intersects_line`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineIntersection {
    /// The infinite line passes through the box
    pub hit: bool,
    /// In every tested plane some box vertex lies ahead of the line point
    /// along the line direction
    pub all_on_same_side: bool,
}

impl OrientedBox {
    /// Test the infinite line `point + t * dir` against the box
    ///
    /// `dir` must be a unit vector. Each face normal defines a plane through
    /// the origin; the line and the cached vertex projections are compared on
    /// the in-plane axis perpendicular to the projected line. A box interval
    /// that does not straddle the line on any plane separates them. Planes in
    /// which the line collapses to a point (line parallel to that face normal)
    /// are left to the other two axes.
    pub fn intersects_line(&self, point: &Point3<f32>, dir: &Vector3<f32>) -> LineIntersection {
        debug_assert!((dir.norm() - 1.0).abs() < 1e-3, "line direction must be normalized");

        let origin = Point3::origin();
        let mut all_on_same_side = true;

        for axis in 0..AXIS_COUNT {
            let normal = &self.normals()[axis];
            let pos = project_on_plane(&origin, normal, point);
            let projected_dir = project_on_plane(&origin, normal, &Point3::from(*dir)).coords;

            let Some(line_normal) = projected_dir.cross(normal).try_normalize(DIR_EPS) else {
                continue;
            };

            let mut min_frac = f32::MAX;
            let mut max_frac = f32::MIN;
            let mut any_ahead = false;

            for vertex in self.projected_on_axis(axis) {
                let frac = (vertex - pos).dot(&line_normal);
                min_frac = min_frac.min(frac);
                max_frac = max_frac.max(frac);

                if all_on_same_side && !any_ahead {
                    let along = vertex - (pos + line_normal * frac);
                    any_ahead = along.dot(&projected_dir) > 0.0;
                }
            }

            all_on_same_side = all_on_same_side && any_ahead;

            // Offsets are relative to the projected line point
            if min_frac > 0.0 || max_frac < 0.0 {
                return LineIntersection {
                    hit: false,
                    all_on_same_side,
                };
            }
        }

        LineIntersection {
            hit: true,
            all_on_same_side,
        }
    }
}
