//! # Cube Primitive
//!
//! Axis-aligned and rotated boxes made of six quads.

use crate::mesh::{FaceId, QuadMesh};
use config::constants::DEFAULT_FACE_COLOR;
use glam::{EulerRot, Quat, Vec3, Vec4};
use std::ops::Range;

/// Returns the six faces of a box centered at `center`.
///
/// Faces come in the order front (-z), back (+z), left (-x), right (+x),
/// top (+y), bottom (-y), each wound so its normal points outwards.
///
/// # Example
///
/// ```rust
/// use meshgen::primitives::cube_quads;
/// use glam::Vec3;
///
/// let quads = cube_quads(Vec3::ZERO, Vec3::splat(2.0));
/// assert_eq!(quads[4][0], Vec3::new(-1.0, 1.0, -1.0));
/// ```
pub fn cube_quads(center: Vec3, size: Vec3) -> [[Vec3; 4]; 6] {
    let half = size * 0.5;
    let p = |x: f32, y: f32, z: f32| center + Vec3::new(x, y, z) * half;

    [
        // front (-z)
        [p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, -1.0, -1.0)],
        // back (+z)
        [p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(-1.0, 1.0, 1.0)],
        // left (-x)
        [p(-1.0, -1.0, -1.0), p(-1.0, -1.0, 1.0), p(-1.0, 1.0, 1.0), p(-1.0, 1.0, -1.0)],
        // right (+x)
        [p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0), p(1.0, -1.0, 1.0)],
        // top (+y)
        [p(-1.0, 1.0, -1.0), p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0)],
        // bottom (-y)
        [p(-1.0, -1.0, -1.0), p(1.0, -1.0, -1.0), p(1.0, -1.0, 1.0), p(-1.0, -1.0, 1.0)],
    ]
}

/// Returns the faces of a box rotated about its center.
///
/// `rotation` holds Euler angles in radians, applied in XYZ order.
pub fn rotated_cube_quads(center: Vec3, size: Vec3, rotation: Vec3) -> [[Vec3; 4]; 6] {
    let quat = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
    cube_quads(Vec3::ZERO, size).map(|quad| quad.map(|corner| center + quat * corner))
}

impl QuadMesh {
    /// Adds a white box. Returns the ids of its six faces.
    pub fn add_cube(&mut self, center: Vec3, size: Vec3) -> Range<FaceId> {
        self.add_color_cube(center, size, Vec4::from_array(DEFAULT_FACE_COLOR))
    }

    /// Adds a box with every face set to `color`.
    pub fn add_color_cube(&mut self, center: Vec3, size: Vec3, color: Vec4) -> Range<FaceId> {
        self.push_quads(cube_quads(center, size), color)
    }

    /// Adds a white box rotated about its center.
    pub fn add_cube_rot(&mut self, center: Vec3, size: Vec3, rotation: Vec3) -> Range<FaceId> {
        self.push_quads(
            rotated_cube_quads(center, size, rotation),
            Vec4::from_array(DEFAULT_FACE_COLOR),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const OUTWARD: [Vec3; 6] = [
        Vec3::NEG_Z,
        Vec3::Z,
        Vec3::NEG_X,
        Vec3::X,
        Vec3::Y,
        Vec3::NEG_Y,
    ];

    #[test]
    fn test_cube_face_count_and_normals() {
        let mut mesh = QuadMesh::new();
        let faces = mesh.add_cube(Vec3::ZERO, Vec3::ONE);
        assert_eq!(faces, 0..6);
        assert_eq!(mesh.vertex_count(), 24);
        for (face, expected) in faces.zip(OUTWARD) {
            assert_eq!(mesh.face(face).unwrap().normal, expected);
        }
    }

    #[test]
    fn test_cube_is_centered() {
        let mut mesh = QuadMesh::new();
        mesh.add_cube(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0));
        let min = mesh.vertices().iter().copied().reduce(Vec3::min).unwrap();
        let max = mesh.vertices().iter().copied().reduce(Vec3::max).unwrap();
        assert_eq!(min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_color_cube() {
        let mut mesh = QuadMesh::new();
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let faces = mesh.add_color_cube(Vec3::ZERO, Vec3::ONE, red);
        assert!(faces.map(|f| mesh.face(f).unwrap().color).all(|c| c == red));
    }

    #[test]
    fn test_rotated_cube_turns_normals() {
        let mut mesh = QuadMesh::new();
        let faces = mesh.add_cube_rot(Vec3::X, Vec3::ONE, Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert_eq!(faces.len(), 6);
        // a quarter turn about +y takes the +x face to -z
        let right = mesh.face(3).unwrap().normal;
        assert!(right.abs_diff_eq(Vec3::NEG_Z, 1e-5), "{right:?}");
        let center = mesh.vertices().iter().copied().sum::<Vec3>() / 24.0;
        assert!(center.abs_diff_eq(Vec3::X, 1e-5));
    }
}
