//! # Cylinder Primitives
//!
//! Cylinders, hexagonal prisms and rings around the `+y` axis.
//!
//! Caps are fans of quads with a repeated center corner
//! (`[center, p_i, p_j, center]`), which keeps every face a quad.

use super::circle_point;
use crate::error::Result;
use crate::mesh::{FaceId, QuadMesh};
use config::constants::{DEFAULT_FACE_COLOR, HEXAGON_SEGMENTS, MIN_RADIAL_SEGMENTS};
use glam::{Vec3, Vec4};
use std::ops::Range;

/// Returns the quads of a capped cylinder.
///
/// The first `segments` quads are the side wall, followed by `segments`
/// top cap quads and `segments` bottom cap quads. `segments` is raised to
/// at least [`MIN_RADIAL_SEGMENTS`] and must not exceed `MAX_SEGMENTS`.
pub fn cylinder_quads(
    center: Vec3,
    radius: f32,
    height: f32,
    segments: u32,
) -> Result<Vec<[Vec3; 4]>> {
    let n = QuadMesh::check_segments("cylinder segments", segments)?.max(MIN_RADIAL_SEGMENTS);
    let up = Vec3::Y * (height * 0.5);
    let top_center = center + up;
    let bottom_center = center - up;
    let top = |i: u32| top_center + circle_point(i % n, n) * radius;
    let bottom = |i: u32| bottom_center + circle_point(i % n, n) * radius;

    let mut quads = Vec::with_capacity(3 * n as usize);
    quads.extend((0..n).map(|i| [bottom(i), top(i), top(i + 1), bottom(i + 1)]));
    quads.extend((0..n).map(|i| [top_center, top(i + 1), top(i), top_center]));
    quads.extend((0..n).map(|i| [bottom_center, bottom(i), bottom(i + 1), bottom_center]));
    Ok(quads)
}

/// Returns the quads of a flat ring (a washer with thickness).
///
/// Quads come as `segments` top faces, `segments` bottom faces, then the
/// outer and inner walls. `segments` is raised to at least
/// [`MIN_RADIAL_SEGMENTS`] and must not exceed `MAX_SEGMENTS`.
pub fn ring_quads(
    center: Vec3,
    outer_radius: f32,
    inner_radius: f32,
    height: f32,
    segments: u32,
) -> Result<Vec<[Vec3; 4]>> {
    let n = QuadMesh::check_segments("ring segments", segments)?.max(MIN_RADIAL_SEGMENTS);
    let up = Vec3::Y * (height * 0.5);
    let at = |i: u32, radius: f32, level: Vec3| center + level + circle_point(i % n, n) * radius;
    let outer_top = |i| at(i, outer_radius, up);
    let outer_bottom = |i| at(i, outer_radius, -up);
    let inner_top = |i| at(i, inner_radius, up);
    let inner_bottom = |i| at(i, inner_radius, -up);

    let mut quads = Vec::with_capacity(4 * n as usize);
    quads.extend((0..n).map(|i| [inner_top(i), inner_top(i + 1), outer_top(i + 1), outer_top(i)]));
    quads.extend(
        (0..n).map(|i| [inner_bottom(i), outer_bottom(i), outer_bottom(i + 1), inner_bottom(i + 1)]),
    );
    quads.extend(
        (0..n).map(|i| [outer_bottom(i), outer_top(i), outer_top(i + 1), outer_bottom(i + 1)]),
    );
    quads.extend(
        (0..n).map(|i| [inner_bottom(i), inner_bottom(i + 1), inner_top(i + 1), inner_top(i)]),
    );
    Ok(quads)
}

impl QuadMesh {
    /// Adds a white cylinder.
    pub fn create_cylinder(
        &mut self,
        center: Vec3,
        radius: f32,
        height: f32,
        segments: u32,
    ) -> Result<Range<FaceId>> {
        self.create_color_cylinder(center, radius, height, segments, Vec4::from_array(DEFAULT_FACE_COLOR))
    }

    /// Adds a cylinder with every face set to `color`.
    pub fn create_color_cylinder(
        &mut self,
        center: Vec3,
        radius: f32,
        height: f32,
        segments: u32,
        color: Vec4,
    ) -> Result<Range<FaceId>> {
        let quads = cylinder_quads(center, radius, height, segments)?;
        self.reserve_faces(quads.len())?;
        Ok(self.push_quads(quads, color))
    }

    /// Adds a white hexagonal prism.
    pub fn create_hexagon(&mut self, center: Vec3, radius: f32, height: f32) -> Result<Range<FaceId>> {
        self.create_cylinder(center, radius, height, HEXAGON_SEGMENTS)
    }

    /// Adds a white ring.
    pub fn create_ring(
        &mut self,
        center: Vec3,
        outer_radius: f32,
        inner_radius: f32,
        height: f32,
        segments: u32,
    ) -> Result<Range<FaceId>> {
        let quads = ring_quads(center, outer_radius, inner_radius, height, segments)?;
        self.reserve_faces(quads.len())?;
        Ok(self.push_quads(quads, Vec4::from_array(DEFAULT_FACE_COLOR)))
    }
}
