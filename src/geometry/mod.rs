// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh buffers, box construction and line queries

mod bbox;
mod builder;
mod calipers;
mod hull;
mod intersection;
mod mesh;
mod obb;
mod primitives;
mod prism;
mod projection;

pub use bbox::BoundingBox;
pub use builder::BoxBuilder;
pub use calipers::{min_bounding_rect, Rectangle};
pub use hull::{convex_hull, polygon_area};
pub use intersection::LineIntersection;
pub use mesh::{accumulate_vertex_normals, MeshBuffers, MeshView, ELEMENTS_PER_FACE};
pub use obb::{OrientedBox, AXIS_COUNT};
pub use primitives::Primitive;
pub use prism::{extrude, Prism, PRISM_ELEMENTS, PRISM_VERTICES};
pub use projection::{find_farthest, project_on_line, project_on_line_with_frac, project_on_plane};
