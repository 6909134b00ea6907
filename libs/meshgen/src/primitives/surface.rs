//! # Surface Primitives
//!
//! Tori and flat grids. Neither has an opcode of its own; a session
//! records the `add_face` (and `slice`) calls they are made of.

use super::circle_point;
use crate::error::Result;
use crate::mesh::{FaceId, QuadMesh};
use config::constants::{DEFAULT_FACE_COLOR, MIN_RADIAL_SEGMENTS};
use glam::{Vec2, Vec3, Vec4};
use std::ops::Range;

/// Returns the quads of a torus lying in the XZ plane.
///
/// `rings` counts steps around the main circle and `sides` steps around
/// the tube; both are raised to at least [`MIN_RADIAL_SEGMENTS`] and must
/// not exceed `MAX_SEGMENTS`. Quads are ordered ring by ring.
pub fn torus_quads(
    center: Vec3,
    major_radius: f32,
    minor_radius: f32,
    rings: u32,
    sides: u32,
) -> Result<Vec<[Vec3; 4]>> {
    let rings = QuadMesh::check_segments("torus rings", rings)?.max(MIN_RADIAL_SEGMENTS);
    let sides = QuadMesh::check_segments("torus sides", sides)?.max(MIN_RADIAL_SEGMENTS);
    let point = |ring: u32, side: u32| {
        let around = circle_point(ring % rings, rings);
        let tube = circle_point(side % sides, sides);
        // tube.x is the radial offset, tube.z the height
        center + around * (major_radius + minor_radius * tube.x) + Vec3::Y * (minor_radius * tube.z)
    };

    let mut quads = Vec::with_capacity(rings as usize * sides as usize);
    for ring in 0..rings {
        for side in 0..sides {
            quads.push([
                point(ring, side),
                point(ring, side + 1),
                point(ring + 1, side + 1),
                point(ring + 1, side),
            ]);
        }
    }
    Ok(quads)
}

/// Returns a flat `+y` facing quad of the given XZ extent.
pub fn grid_quad(center: Vec3, size: Vec2) -> [Vec3; 4] {
    let hx = size.x * 0.5;
    let hz = size.y * 0.5;
    [
        center + Vec3::new(-hx, 0.0, -hz),
        center + Vec3::new(-hx, 0.0, hz),
        center + Vec3::new(hx, 0.0, hz),
        center + Vec3::new(hx, 0.0, -hz),
    ]
}

impl QuadMesh {
    /// Adds a white torus.
    pub fn create_torus(
        &mut self,
        center: Vec3,
        major_radius: f32,
        minor_radius: f32,
        rings: u32,
        sides: u32,
    ) -> Result<Range<FaceId>> {
        let quads = torus_quads(center, major_radius, minor_radius, rings, sides)?;
        self.reserve_faces(quads.len())?;
        Ok(self.push_quads(quads, Vec4::from_array(DEFAULT_FACE_COLOR)))
    }

    /// Adds a flat grid of `segments_x` by `segments_y` cells.
    ///
    /// Limits are checked before the base face is added, so a rejected grid
    /// adds nothing.
    pub fn create_grid(
        &mut self,
        center: Vec3,
        size: Vec2,
        segments_x: u32,
        segments_y: u32,
    ) -> Result<Vec<FaceId>> {
        self.check_grid_budget(segments_x, segments_y)?;
        let face = self.add_face(grid_quad(center, size));
        self.slice(face, segments_x, segments_y)
    }

    /// Checks a grid request against the segment limit and the face budget.
    pub(crate) fn check_grid_budget(&self, segments_x: u32, segments_y: u32) -> Result<()> {
        let x = Self::check_segments("grid segments", segments_x)?.max(1) as usize;
        let y = Self::check_segments("grid segments", segments_y)?.max(1) as usize;
        self.reserve_faces(x * y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_torus_faces_point_out_of_tube() {
        let mut mesh = QuadMesh::new();
        let faces = mesh.create_torus(Vec3::ZERO, 3.0, 1.0, 12, 8).unwrap();
        assert_eq!(faces.len(), 96);

        for face in faces {
            let center = mesh.get_center(face).unwrap();
            let radial = Vec3::new(center.x, 0.0, center.z).normalize();
            let tube_center = radial * 3.0;
            let normal = mesh.face(face).unwrap().normal;
            assert!(normal.dot(center - tube_center) > 0.0, "face {face} points inwards");
        }
    }

    #[test]
    fn test_torus_extent() {
        let quads = torus_quads(Vec3::new(0.0, 5.0, 0.0), 2.0, 0.5, 16, 8).unwrap();
        let max_x = quads.iter().flatten().map(|p| p.x).fold(f32::MIN, f32::max);
        let max_y = quads.iter().flatten().map(|p| p.y).fold(f32::MIN, f32::max);
        assert_relative_eq!(max_x, 2.5, epsilon = 1e-5);
        assert!(max_y <= 5.5 + 1e-5);
    }

    #[test]
    fn test_torus_clamps_segments() {
        assert_eq!(torus_quads(Vec3::ZERO, 1.0, 0.25, 0, 1).unwrap().len(), 9);
    }

    #[test]
    fn test_grid() {
        let mut mesh = QuadMesh::new();
        let cells = mesh.create_grid(Vec3::ZERO, Vec2::new(4.0, 2.0), 4, 2).unwrap();
        assert_eq!(cells.len(), 8);
        assert_eq!(mesh.face_count(), 8);
        for cell in cells {
            assert!(mesh.face(cell).unwrap().normal.abs_diff_eq(Vec3::Y, 1e-5));
        }
    }

    #[test]
    fn test_oversized_grid_adds_nothing() {
        let mut mesh = QuadMesh::new();
        assert!(mesh.create_grid(Vec3::ZERO, Vec2::ONE, 65536, 65536).is_err());
        assert!(mesh.create_torus(Vec3::ZERO, 1.0, 0.5, 100_000, 3).is_err());
        assert_eq!(mesh.face_count(), 0);
    }
}
