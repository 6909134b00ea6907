//! # Primitives
//!
//! Quad generators for the built-in shapes. Each shape is available as a
//! plain list of quads (corner positions in outward-facing winding) and as
//! a [`QuadMesh`] builder that appends those quads as faces.
//!
//! All shapes use `+y` as up and are placed by their center.

pub mod cube;
pub mod cylinder;
pub mod surface;

pub use cube::{cube_quads, rotated_cube_quads};
pub use cylinder::{cylinder_quads, ring_quads};
pub use surface::{grid_quad, torus_quads};

use crate::mesh::{FaceId, QuadMesh, CORNER_UVS};
use glam::{Vec3, Vec4};
use std::ops::Range;

impl QuadMesh {
    /// Appends one face per quad and returns the range of new face ids.
    pub(crate) fn push_quads<I>(&mut self, quads: I, color: Vec4) -> Range<FaceId>
    where
        I: IntoIterator<Item = [Vec3; 4]>,
    {
        let start = self.faces.len() as FaceId;
        for quad in quads {
            self.push_face(quad, CORNER_UVS, color);
        }
        start..self.faces.len() as FaceId
    }
}

/// Point on the unit circle in the XZ plane.
#[inline]
pub(crate) fn circle_point(segment: u32, segments: u32) -> Vec3 {
    let angle = std::f32::consts::TAU * segment as f32 / segments as f32;
    Vec3::new(angle.cos(), 0.0, angle.sin())
}
