// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Box construction: one candidate prism per mesh face, smallest volume wins

use super::calipers::min_bounding_rect;
use super::hull::convex_hull;
use super::mesh::MeshView;
use super::obb::OrientedBox;
use super::prism::{extrude, Prism};
use super::projection::{find_farthest, project_on_plane};
use crate::config::BuildConfig;
use crate::error::{DegenerateFace, ObbError, ObbResult};
use nalgebra::{Point3, Vector3};
use tracing::{debug, info, trace};

/// Normals closer than this (as `1 - dot`) count as the same face direction
const PARALLEL_EPS: f32 = 1e-6;

/// Builds oriented boxes under a [`BuildConfig`]
#[derive(Debug, Clone, Default)]
pub struct BoxBuilder {
    config: BuildConfig,
}

impl BoxBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the box for `mesh`
    pub fn build(&self, mesh: &MeshView<'_>) -> ObbResult<OrientedBox> {
        let prism = self.best_prism(mesh)?;
        Ok(OrientedBox::from_prism(prism))
    }

    /// Smallest-volume candidate over all faces
    pub fn best_prism(&self, mesh: &MeshView<'_>) -> ObbResult<Prism> {
        let triangles = mesh.triangle_count();
        if let Some(limit) = self.config.max_triangles {
            if triangles > limit {
                return Err(ObbError::MeshTooLarge { triangles, limit });
            }
        }

        info!(
            vertices = mesh.vertex_count(),
            triangles, "computing oriented bounding box"
        );

        let mut best: Option<Prism> = None;
        let mut tried_normals: Vec<Vector3<f32>> = Vec::new();
        let mut skipped = 0usize;

        for (face, corners) in mesh.triangles().enumerate() {
            let Some(normal) = face_normal(mesh, corners) else {
                debug!(face, reason = %DegenerateFace::NoNormal, "skipping face");
                skipped += 1;
                continue;
            };

            if self.config.skip_parallel_faces {
                if tried_normals.iter().any(|n| 1.0 - n.dot(&normal) < PARALLEL_EPS) {
                    trace!(face, "face parallel to an earlier one");
                    continue;
                }
                tried_normals.push(normal);
            }

            let origin = mesh.point(corners[0]);
            match self.candidate(mesh, &origin, &normal) {
                Ok(prism) => {
                    trace!(face, volume = prism.volume, "candidate prism");
                    if best.map_or(true, |b| prism.volume < b.volume) {
                        best = Some(prism);
                    }
                }
                Err(reason) => {
                    debug!(face, reason = %reason, "skipping face");
                    skipped += 1;
                }
            }
        }

        let best = best.ok_or(ObbError::NoValidPrism)?;
        info!(volume = best.volume, skipped, "oriented bounding box ready");
        Ok(best)
    }

    /// Candidate prism for the plane through `origin` with unit `normal`
    pub fn candidate(
        &self,
        mesh: &MeshView<'_>,
        origin: &Point3<f32>,
        normal: &Vector3<f32>,
    ) -> Result<Prism, DegenerateFace> {
        let projected: Vec<Point3<f32>> = mesh
            .points()
            .map(|p| project_on_plane(origin, normal, &p))
            .collect();

        let tolerance = self.tolerance(&projected);
        let hull = convex_hull(&projected, normal, tolerance)?;
        let rect = min_bounding_rect(&hull, self.config.include_closing_edge, tolerance)
            .ok_or(DegenerateFace::FlatHull)?;

        extrude(&rect, mesh.points(), &projected)
    }

    /// Distance below which two projected points are the same point
    ///
    /// Scales with both the spread of the point set, measured from
    /// `points[0]` to the hull seed, and the largest coordinate magnitude, so
    /// rounding noise of a mesh far from the origin stays below it.
    fn tolerance(&self, projected: &[Point3<f32>]) -> f32 {
        let extent = find_farthest(projected)
            .map(|i| (projected[i] - projected[0]).norm())
            .unwrap_or(0.0);
        let magnitude = projected
            .iter()
            .map(|p| p.coords.amax())
            .fold(0.0_f32, f32::max);
        self.config.colinear_epsilon * extent.max(magnitude)
    }
}

/// Unit normal of a mesh face, `None` for degenerate faces
fn face_normal(mesh: &MeshView<'_>, [a, b, c]: [usize; 3]) -> Option<Vector3<f32>> {
    let first = mesh.point(a) - mesh.point(b);
    let second = mesh.point(b) - mesh.point(c);
    first.cross(&second).try_normalize(f32::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoundingBox, MeshBuffers, Primitive};
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_cube_volume() {
        let cube = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh();
        let prism = BoxBuilder::default().best_prism(&cube.view().unwrap()).unwrap();
        assert_relative_eq!(prism.volume, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_projected_points_lie_on_face_plane() {
        let mesh = Primitive::pyramid(2.0, 3.0).to_mesh();
        let view = mesh.view().unwrap();
        for corners in view.triangles() {
            let normal = face_normal(&view, corners).unwrap();
            let origin = view.point(corners[0]);
            for point in view.points() {
                let projected = project_on_plane(&origin, &normal, &point);
                assert!((projected - origin).dot(&normal).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_parallel_face_skipping_keeps_result() {
        let mesh = Primitive::cube(Vector3::new(2.0, 1.0, 3.0), true).to_mesh();
        let view = mesh.view().unwrap();

        let all_faces = BoxBuilder::new(BuildConfig {
            skip_parallel_faces: false,
            ..BuildConfig::default()
        });
        let deduped = BoxBuilder::default();

        let a = all_faces.best_prism(&view).unwrap();
        let b = deduped.best_prism(&view).unwrap();
        assert_relative_eq!(a.volume, b.volume, epsilon = 1e-5);
        assert_relative_eq!(a.volume, 6.0, epsilon = 1e-4);
    }

    #[test]
    fn test_not_larger_than_axis_aligned_box() {
        for mesh in [
            Primitive::pyramid(1.5, 2.0).to_mesh(),
            Primitive::sphere(1.0, 12).to_mesh(),
            Primitive::cube(Vector3::new(1.0, 4.0, 0.5), false).to_mesh(),
        ] {
            let view = mesh.view().unwrap();
            let aabb = BoundingBox::from_points(view.points());
            let prism = BoxBuilder::default().best_prism(&view).unwrap();
            assert!(
                prism.volume <= aabb.volume() * (1.0 + 1e-4),
                "obb {} > aabb {}",
                prism.volume,
                aabb.volume()
            );
        }
    }

    #[test]
    fn test_empty_elements_fail() {
        let mesh = MeshBuffers::new(vec![0.0; 9], vec![Vector3::z(); 3], Vec::new());
        let result = BoxBuilder::default().best_prism(&mesh.view().unwrap());
        assert!(matches!(result, Err(ObbError::NoValidPrism)));
    }

    #[test]
    fn test_degenerate_faces_are_skipped() {
        let mut mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh();
        // Prepend a face that repeats one vertex
        mesh.elements.splice(0..0, [0, 0, 1]);
        let prism = BoxBuilder::default().best_prism(&mesh.view().unwrap()).unwrap();
        assert_relative_eq!(prism.volume, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_triangle_limit() {
        let mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh();
        let builder = BoxBuilder::new(BuildConfig {
            max_triangles: Some(4),
            ..BuildConfig::default()
        });
        assert!(matches!(
            builder.best_prism(&mesh.view().unwrap()),
            Err(ObbError::MeshTooLarge { triangles: 12, limit: 4 })
        ));
    }
}
