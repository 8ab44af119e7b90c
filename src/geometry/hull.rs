// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar convex hull by gift wrapping
//!
//! Works on points that already lie on a common plane; the plane normal
//! decides the orientation test.

use super::projection::find_farthest;
use crate::error::DegenerateFace;
use nalgebra::{Point3, Vector3};

/// Wrap coplanar `points` into a convex polygon
///
/// The walk starts at the point farthest from `points[0]` and repeatedly picks
/// the candidate with the most negative turn `dot(normal, cross(edge, c - end))`.
/// Points closer than `tolerance` are treated as the same point and never
/// become the next edge end. A candidate within `tolerance` of the current
/// edge line counts as colinear and only wins when it lies farther along the
/// edge. The walk stops when it comes back to a point already on the hull.
pub fn convex_hull(
    points: &[Point3<f32>],
    normal: &Vector3<f32>,
    tolerance: f32,
) -> Result<Vec<Point3<f32>>, DegenerateFace> {
    let seed = find_farthest(points).ok_or(DegenerateFace::TooFewPoints(points.len()))?;
    let same = |a: &Point3<f32>, b: &Point3<f32>| (a - b).norm() <= tolerance;

    let mut hull: Vec<Point3<f32>> = Vec::new();
    let mut point_on_hull = points[seed];

    loop {
        hull.push(point_on_hull);
        // A hull can never hold more vertices than there are points
        if hull.len() > points.len() {
            return Err(DegenerateFace::HullNotClosed(hull.len()));
        }

        let mut end: Option<Point3<f32>> = None;
        for candidate in points {
            if same(candidate, &point_on_hull) {
                continue;
            }
            let Some(current) = end else {
                end = Some(*candidate);
                continue;
            };

            let edge = current - point_on_hull;
            let turn = edge.cross(&(candidate - current)).dot(normal);
            // |turn| / |edge| is the candidate's distance from the edge line
            let colinear_limit = tolerance * edge.norm();

            if turn < -colinear_limit
                || (turn.abs() <= colinear_limit
                    && (candidate - point_on_hull).dot(&edge) > edge.norm_squared())
            {
                end = Some(*candidate);
            }
        }

        let Some(end) = end else {
            return Err(DegenerateFace::TooFewHullVertices(hull.len()));
        };

        if let Some(start) = hull.iter().position(|vertex| same(&end, vertex)) {
            hull.drain(..start);
            break;
        }
        point_on_hull = end;
    }

    if hull.len() < 3 {
        return Err(DegenerateFace::TooFewHullVertices(hull.len()));
    }

    Ok(hull)
}

/// Area of a planar polygon given in winding order
pub fn polygon_area(polygon: &[Point3<f32>]) -> f32 {
    let Some(origin) = polygon.first() else {
        return 0.0;
    };

    let mut doubled = Vector3::zeros();
    for pair in polygon.windows(2).skip(1) {
        doubled += (pair[0] - origin).cross(&(pair[1] - origin));
    }
    doubled.norm() / 2.0
}
