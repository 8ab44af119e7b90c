// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Minimum-area bounding rectangle of a planar hull (rotating calipers)

use super::projection::project_on_line_with_frac;
use nalgebra::{Point3, Vector3};

/// Rectangle aligned to one hull edge
///
/// Spans `[min_frac, max_frac]` along `dir` from `origin` and
/// `[min_offset, max_offset]` along `normal`. For a true hull edge every point
/// lies on one side, so `min_offset` is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub origin: Point3<f32>,
    pub dir: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub min_frac: f32,
    pub max_frac: f32,
    pub min_offset: f32,
    pub max_offset: f32,
}

impl Rectangle {
    pub fn length(&self) -> f32 {
        self.max_frac - self.min_frac
    }

    pub fn width(&self) -> f32 {
        self.max_offset - self.min_offset
    }

    pub fn area(&self) -> f32 {
        self.length() * self.width()
    }

    /// Corners in box-face order: 0 -> 1 along `dir`, 1 -> 2 along `normal`
    pub fn corners(&self) -> [Point3<f32>; 4] {
        let base = self.origin + self.normal * self.min_offset;
        let c0 = base + self.dir * self.min_frac;
        let c1 = base + self.dir * self.max_frac;
        let across = self.normal * self.width();
        [c0, c1, c1 + across, c0 + across]
    }
}

/// Search hull edges for the least-area enclosing rectangle
///
/// Edges run from `hull[i - 1]` to `hull[i]` for `i` in `1..len`. The closing
/// edge `hull[len - 1] -> hull[0]` is only tried with `include_closing_edge`.
/// Edges shorter than `tolerance`, or with no hull point farther than
/// `tolerance` from their line, are skipped. Returns `None` when no edge is
/// usable.
pub fn min_bounding_rect(
    hull: &[Point3<f32>],
    include_closing_edge: bool,
    tolerance: f32,
) -> Option<Rectangle> {
    let mut edges: Vec<(Point3<f32>, Point3<f32>)> =
        hull.windows(2).map(|pair| (pair[0], pair[1])).collect();
    if include_closing_edge {
        if let (Some(&last), Some(&first)) = (hull.last(), hull.first()) {
            edges.push((last, first));
        }
    }

    let mut best: Option<Rectangle> = None;

    for (origin, next) in edges {
        let Some(rect) = rect_for_edge(hull, origin, next, tolerance) else {
            continue;
        };
        if best.map_or(true, |b| rect.area() < b.area()) {
            best = Some(rect);
        }
    }

    best
}

fn rect_for_edge(
    hull: &[Point3<f32>],
    origin: Point3<f32>,
    next: Point3<f32>,
    tolerance: f32,
) -> Option<Rectangle> {
    let dir = (next - origin).try_normalize(tolerance)?;

    // First hull point clearly off the edge line fixes the normal side
    let normal = hull.iter().find_map(|sample| {
        let (projected, _) = project_on_line_with_frac(&origin, &dir, sample);
        let offset = sample - projected;
        if offset.norm() > tolerance {
            offset.try_normalize(f32::EPSILON)
        } else {
            None
        }
    })?;

    let mut min_frac = f32::MAX;
    let mut max_frac = f32::MIN;
    let mut min_offset = 0.0_f32;
    let mut max_offset = 0.0_f32;

    for point in hull {
        let (_, frac) = project_on_line_with_frac(&origin, &dir, point);
        min_frac = min_frac.min(frac);
        max_frac = max_frac.max(frac);

        let offset = (point - origin).dot(&normal);
        min_offset = min_offset.min(offset);
        max_offset = max_offset.max(offset);
    }

    Some(Rectangle {
        origin,
        dir,
        normal,
        min_frac,
        max_frac,
        min_offset,
        max_offset,
    })
}
