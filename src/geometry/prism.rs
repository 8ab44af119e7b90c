// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Extrusion of a bounding rectangle into an 8-vertex prism

use super::calipers::Rectangle;
use crate::error::DegenerateFace;
use nalgebra::Point3;

/// Number of prism vertices
pub const PRISM_VERTICES: usize = 8;

/// Triangle list shared by every prism
///
/// ```text
/// 0 1    4 5
/// 3 2    7 6
/// ```
///
/// Every 12 entries cover one pair of parallel faces, and the first triangle
/// of each group spans that pair's plane.
pub const PRISM_ELEMENTS: [u32; 36] = [
    0, 1, 2, // rectangle face
    0, 2, 3, //
    4, 5, 6, // opposite face
    4, 6, 7, //
    0, 1, 5, // side along the caliper edge
    0, 4, 5, //
    2, 3, 7, // opposite side
    2, 6, 7, //
    0, 3, 7, // side across the caliper edge
    0, 4, 7, //
    1, 2, 6, // opposite side
    1, 5, 6, //
];

/// Candidate box: rectangle corners pushed to both ends of the mesh extent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prism {
    pub vertices: [Point3<f32>; PRISM_VERTICES],
    pub volume: f32,
}

/// Extend `rect` along its normal to cover the mesh
///
/// `points` are the true mesh vertices and `projected` their projections onto
/// the rectangle's plane, index for index. The signed offset of each vertex
/// from its projection bounds the prism on both sides.
pub fn extrude(
    rect: &Rectangle,
    points: impl IntoIterator<Item = Point3<f32>>,
    projected: &[Point3<f32>],
) -> Result<Prism, DegenerateFace> {
    let corners = rect.corners();
    let rect_normal = (corners[1] - corners[0])
        .cross(&(corners[2] - corners[0]))
        .try_normalize(f32::EPSILON)
        .ok_or(DegenerateFace::FlatHull)?;

    let mut min_frac = f32::MAX;
    let mut max_frac = f32::MIN;
    for (point, projection) in points.into_iter().zip(projected) {
        let frac = (point - projection).dot(&rect_normal);
        min_frac = min_frac.min(frac);
        max_frac = max_frac.max(frac);
    }

    let back = rect_normal * min_frac;
    let front = rect_normal * max_frac;

    let vertices = [
        corners[0] + back,
        corners[1] + back,
        corners[2] + back,
        corners[3] + back,
        corners[0] + front,
        corners[1] + front,
        corners[2] + front,
        corners[3] + front,
    ];

    let volume = rect.area() * (max_frac - min_frac);
    if !volume.is_finite() {
        return Err(DegenerateFace::NonFiniteVolume);
    }

    Ok(Prism { vertices, volume })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::calipers::min_bounding_rect;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_extrude_unit_square() {
        let hull = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let rect = min_bounding_rect(&hull, false, 1e-5).unwrap();

        // Mesh points above and below the plane z = 0
        let points = vec![
            Point3::new(0.0, 0.0, -0.5),
            Point3::new(1.0, 1.0, 2.0),
            Point3::new(0.5, 0.5, 0.0),
        ];
        let projected: Vec<_> = points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect();

        let prism = extrude(&rect, points, &projected).unwrap();
        assert_relative_eq!(prism.volume, 2.5, epsilon = 1e-5);

        let depth = prism.vertices[4] - prism.vertices[0];
        assert_relative_eq!(depth.norm(), 2.5, epsilon = 1e-5);
        assert_relative_eq!(depth.normalize().cross(&Vector3::z()).norm(), 0.0, epsilon = 1e-6);
        for i in 0..4 {
            assert_relative_eq!(prism.vertices[i + 4] - prism.vertices[i], depth, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_flat_mesh_gives_zero_volume() {
        let hull = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ];
        let rect = min_bounding_rect(&hull, false, 1e-5).unwrap();
        let prism = extrude(&rect, hull.clone(), &hull).unwrap();
        assert_eq!(prism.volume, 0.0);
    }

    #[test]
    fn test_element_table_indexes_eight_vertices() {
        assert!(PRISM_ELEMENTS.iter().all(|&e| (e as usize) < PRISM_VERTICES));
        for vertex in 0..PRISM_VERTICES as u32 {
            assert!(PRISM_ELEMENTS.contains(&vertex));
        }
    }
}
