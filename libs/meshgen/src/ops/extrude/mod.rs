//! # Extrusion
//!
//! Edge and face extrusion, and the edge-bridging primitive they share.
//!
//! Newly stitched faces keep a consistent winding with their neighbours:
//! [`QuadMesh::combine_edges`] orients its quad away from the two faces it
//! bridges, so extruded sides always face out of the extruded volume.

use crate::error::Result;
use crate::mesh::{quad_normal, EdgeId, FaceId, QuadMesh, CORNER_UVS};
use glam::Vec3;

/// Returns true when triangle `p0 p1 p2` winds clockwise with respect to
/// `reference`, i.e. its kernel normal `(p1 - p0) x (p2 - p0)` does not point
/// against `reference`.
#[inline]
pub fn is_clockwise(p0: Vec3, p1: Vec3, p2: Vec3, reference: Vec3) -> bool {
    (p1 - p0).cross(p2 - p0).dot(reference) >= 0.0
}

impl QuadMesh {
    /// Creates a face bridging `edge` to a copy of it displaced by `offset`.
    ///
    /// For an edge `a -> b` the new face is `[b, a, a + offset, b + offset]`,
    /// which runs the shared edge backwards and so agrees with the source
    /// face's winding.
    pub fn extrude_edge(&mut self, edge: EdgeId, offset: Vec3) -> Result<FaceId> {
        let (a, b) = self.edge_endpoints(edge)?;
        let color = self.faces[self.edges[edge as usize].face as usize].color;
        Ok(self.push_face([b, a, a + offset, b + offset], CORNER_UVS, color))
    }

    /// Extrudes `edge` outwards within its face's plane by `distance`.
    ///
    /// The direction runs from the face center to the edge midpoint.
    pub fn extrude_edge_normal(&mut self, edge: EdgeId, distance: f32) -> Result<FaceId> {
        let (a, b) = self.edge_endpoints(edge)?;
        let center = self.get_center(self.edges[edge as usize].face)?;
        let direction = ((a + b) * 0.5 - center).normalize_or_zero();
        self.extrude_edge(edge, direction * distance)
    }

    /// Builds a quad bridging two edges.
    ///
    /// Endpoints are paired so the quad does not cross itself. The winding
    /// is then checked against the direction pointing from the two source
    /// faces towards the new face (or, when that direction lies in the new
    /// face's plane, against the sum of the source normals) and flipped when
    /// it disagrees. The result does not depend on argument order.
    pub fn combine_edges(&mut self, edge_a: EdgeId, edge_b: EdgeId) -> Result<FaceId> {
        let (a0, a1) = self.edge_endpoints(edge_a)?;
        let (b0, b1) = self.edge_endpoints(edge_b)?;
        let face_a = self.face(self.edges[edge_a as usize].face)?;
        let face_b = self.face(self.edges[edge_b as usize].face)?;
        let center_a = self.get_center(self.edges[edge_a as usize].face)?;
        let center_b = self.get_center(self.edges[edge_b as usize].face)?;

        // pair a0 with whichever end of b is closer overall
        let parallel = a0.distance(b0) + a1.distance(b1) <= a0.distance(b1) + a1.distance(b0);
        let (near_a0, near_a1) = if parallel { (b0, b1) } else { (b1, b0) };
        let mut corners = [a1, a0, near_a0, near_a1];

        let center = corners.iter().copied().sum::<Vec3>() / 4.0;
        let mut reference = center - (center_a + center_b) * 0.5;
        if quad_normal(&corners).dot(reference).abs() <= self.tolerance {
            reference = face_a.normal + face_b.normal;
        }
        if !is_clockwise(corners[0], corners[1], corners[3], reference) {
            corners = [a0, a1, near_a1, near_a0];
        }

        Ok(self.push_face(corners, CORNER_UVS, face_a.color))
    }

    /// Extrudes a face along its normal by `factor`.
    ///
    /// A displaced copy of the face (the cap) is added and its boundary is
    /// stitched to the original with four side faces; the original face is
    /// kept. For negative factors the cap winding is reversed so it faces
    /// away from the extruded volume. All new faces take the source color.
    /// Returns the cap.
    pub fn extrude_face(&mut self, face: FaceId, factor: f32) -> Result<FaceId> {
        let source = self.face(face)?;
        let corners = self.face_vertices(face)?;
        let source_edges = self.face_edges(face)?;

        let moved = corners.map(|corner| corner + source.normal * factor);
        let reversed = factor < 0.0;
        let cap_corners = if reversed {
            [moved[0], moved[3], moved[2], moved[1]]
        } else {
            moved
        };
        let cap = self.push_face(cap_corners, CORNER_UVS, source.color);
        let cap_edges = self.face_edges(cap)?;

        for (i, source_edge) in source_edges.iter().enumerate() {
            let cap_edge = if reversed { cap_edges[3 - i] } else { cap_edges[i] };
            self.combine_edges(cap_edge, *source_edge)?;
        }
        Ok(cap)
    }
}
