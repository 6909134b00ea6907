//! # Adjacency and Picking
//!
//! Faces never share edge slots, so neighbours are found by comparing
//! edge endpoint positions within the store tolerance.

use crate::error::Result;
use crate::mesh::{EdgeId, FaceId, QuadMesh};
use glam::Vec3;

impl QuadMesh {
    /// Returns the edges of other faces whose endpoints coincide with the
    /// endpoints of `edge`, in either direction. Results are in id order.
    pub fn get_connected_edges(&self, edge: EdgeId) -> Result<Vec<EdgeId>> {
        let (a, b) = self.edge_endpoints(edge)?;
        let face = self.edges[edge as usize].face;
        let eps = self.tolerance;

        let mut connected = Vec::new();
        for (index, other) in self.edges.iter().enumerate() {
            if other.face == face {
                continue;
            }
            let c = self.vertices[other.vertex as usize];
            let d = self.vertices[self.edges[other.next as usize].vertex as usize];
            let same = c.abs_diff_eq(a, eps) && d.abs_diff_eq(b, eps);
            let reversed = c.abs_diff_eq(b, eps) && d.abs_diff_eq(a, eps);
            if same || reversed {
                connected.push(index as EdgeId);
            }
        }
        Ok(connected)
    }

    /// Collects every face reachable from `face` through connected edges.
    ///
    /// `face` itself is included. Faces already present in `out` are
    /// treated as visited and are not walked through again.
    pub fn find_adjacent_faces(&self, face: FaceId, out: &mut Vec<FaceId>) -> Result<()> {
        self.check_face(face)?;
        if out.contains(&face) {
            return Ok(());
        }
        out.push(face);

        let mut pending = vec![face];
        while let Some(current) = pending.pop() {
            for edge in self.face_edges(current)? {
                for connected in self.get_connected_edges(edge)? {
                    let neighbour = self.edges[connected as usize].face;
                    if !out.contains(&neighbour) {
                        out.push(neighbour);
                        pending.push(neighbour);
                    }
                }
            }
        }
        Ok(())
    }

    /// Casts a ray and returns the closest face it hits.
    ///
    /// Each quad is tested as the triangles `(v0, v1, v2)` and
    /// `(v0, v2, v3)`; faces are hit from either side. Equal distances go
    /// to the lower face id.
    pub fn intersects(&self, origin: Vec3, direction: Vec3) -> Option<FaceId> {
        let mut closest: Option<(f32, FaceId)> = None;
        for face in 0..self.faces.len() {
            let edge = self.faces[face].edge;
            let c = self.cycle_positions(edge);
            let hit = [(c[0], c[1], c[2]), (c[0], c[2], c[3])]
                .into_iter()
                .filter_map(|(v0, v1, v2)| {
                    ray_triangle(origin, direction, v0, v1, v2, self.tolerance)
                })
                .reduce(f32::min);

            if let Some(t) = hit {
                if closest.map_or(true, |(best, _)| t < best) {
                    closest = Some((t, face as FaceId));
                }
            }
        }
        closest.map(|(_, face)| face)
    }
}

/// Möller–Trumbore ray/triangle test returning the ray parameter of the hit.
fn ray_triangle(origin: Vec3, direction: Vec3, v0: Vec3, v1: Vec3, v2: Vec3, epsilon: f32) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = direction.cross(edge2);
    let a = edge1.dot(h);
    // parallel to the triangle plane
    if a.abs() < f32::EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > epsilon).then_some(t)
}
