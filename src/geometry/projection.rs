// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Orthogonal projections onto planes and lines

use nalgebra::{Point3, Vector3};

/// Project `point` onto the plane through `source` with unit normal `normal`
pub fn project_on_plane(
    source: &Point3<f32>,
    normal: &Vector3<f32>,
    point: &Point3<f32>,
) -> Point3<f32> {
    let dist = (point - source).dot(normal);
    point - normal * dist
}

/// Project `point` onto the line through `source` with unit direction `dir`
pub fn project_on_line(source: &Point3<f32>, dir: &Vector3<f32>, point: &Point3<f32>) -> Point3<f32> {
    project_on_line_with_frac(source, dir, point).0
}

/// Like [`project_on_line`], also returning `frac` with `projection = source + dir * frac`
pub fn project_on_line_with_frac(
    source: &Point3<f32>,
    dir: &Vector3<f32>,
    point: &Point3<f32>,
) -> (Point3<f32>, f32) {
    let frac = dir.dot(&(point - source));
    (source + dir * frac, frac)
}

/// Index of the point farthest from `points[0]`
///
/// The scan starts from index 1, so index 0 is never returned. Returns `None`
/// for fewer than two points.
pub fn find_farthest(points: &[Point3<f32>]) -> Option<usize> {
    let origin = points.first()?;
    let first = points.get(1)?;

    let mut farthest = 1;
    let mut max_dist = (first - origin).norm();

    for (i, point) in points.iter().enumerate().skip(2) {
        let dist = (point - origin).norm();
        if dist > max_dist {
            max_dist = dist;
            farthest = i;
        }
    }

    Some(farthest)
}
