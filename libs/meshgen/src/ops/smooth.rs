//! # Smoothing
//!
//! Rounds a patch of faces by pushing its vertices through a fixed per-axis
//! blend relative to the patch centroid. The blend maps the cube
//! `[-1, 1]^3` onto the unit ball, so a box patch comes out as a rounded
//! blob of the given radius.

use crate::error::Result;
use crate::mesh::{FaceId, QuadMesh, VertexId};
use glam::Vec3;

/// Applies the smoothing blend to a point given relative to the centroid,
/// in units of the smoothing radius.
///
/// `x' = x * sqrt(1 - y²/2 - z²/2 + y²z²/3)`, and cyclically for `y` and
/// `z`. The radicand is clamped at zero.
pub fn smooth_projection(l: Vec3) -> Vec3 {
    let (x2, y2, z2) = (l.x * l.x, l.y * l.y, l.z * l.z);
    let blend = |a2: f32, b2: f32| (1.0 - a2 / 2.0 - b2 / 2.0 + a2 * b2 / 3.0).max(0.0).sqrt();
    Vec3::new(l.x * blend(y2, z2), l.y * blend(z2, x2), l.z * blend(x2, y2))
}

impl QuadMesh {
    /// Smooths the vertices of `faces` around their centroid.
    ///
    /// Every target is computed from the original positions and all
    /// clusters move together, so a target landing on another input
    /// position never drags that cluster twice. Positions that would not
    /// move are skipped. A non-positive radius leaves the mesh untouched.
    ///
    /// The returned `(vertex, delta)` moves reproduce the result when
    /// applied one by one as welded moves: a move whose target coincides
    /// with a position still waiting to move is ordered after that move.
    pub fn smooth(&mut self, faces: &[FaceId], radius: f32) -> Result<Vec<(VertexId, Vec3)>> {
        for face in faces {
            self.check_face(*face)?;
        }
        if radius <= 0.0 {
            return Ok(Vec::new());
        }

        let mut unique: Vec<(VertexId, Vec3)> = Vec::new();
        for face in faces {
            for vertex in self.face_vertex_ids(*face)? {
                let position = self.vertices[vertex as usize];
                if !unique.iter().any(|(_, p)| p.abs_diff_eq(position, self.tolerance)) {
                    unique.push((vertex, position));
                }
            }
        }
        if unique.is_empty() {
            return Ok(Vec::new());
        }

        let centroid = unique.iter().map(|(_, p)| *p).sum::<Vec3>() / unique.len() as f32;
        let planned: Vec<PlannedMove> = unique
            .into_iter()
            .filter_map(|(vertex, position)| {
                let target = centroid + smooth_projection((position - centroid) / radius) * radius;
                let delta = target - position;
                (delta != Vec3::ZERO).then_some(PlannedMove { vertex, position, delta })
            })
            .collect();

        let clusters: Vec<(Vec3, Vec3)> = planned.iter().map(|m| (m.position, m.delta)).collect();
        self.move_clusters(&clusters);
        Ok(replay_order(planned, self.tolerance))
    }
}

#[derive(Debug, Clone, Copy)]
struct PlannedMove {
    vertex: VertexId,
    position: Vec3,
    delta: Vec3,
}

/// Orders moves so none lands on a position that has yet to move.
///
/// A cycle of such moves cannot be ordered; its members keep their input
/// order.
fn replay_order(mut pending: Vec<PlannedMove>, tolerance: f32) -> Vec<(VertexId, Vec3)> {
    let mut ordered = Vec::with_capacity(pending.len());
    while !pending.is_empty() {
        let blocked = |index: usize| {
            let target = pending[index].position + pending[index].delta;
            pending
                .iter()
                .enumerate()
                .any(|(other, m)| other != index && m.position.abs_diff_eq(target, tolerance))
        };
        let next = (0..pending.len()).find(|i| !blocked(*i)).unwrap_or(0);
        let m = pending.remove(next);
        ordered.push((m.vertex, m.delta));
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_projection_keeps_axes_and_rounds_corners() {
        assert_eq!(smooth_projection(Vec3::X), Vec3::X);
        assert_eq!(smooth_projection(Vec3::ZERO), Vec3::ZERO);

        let corner = smooth_projection(Vec3::ONE);
        assert_relative_eq!(corner.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(corner.x, (1.0f32 / 3.0).sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_projection_clamps_radicand() {
        let far = smooth_projection(Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(far, Vec3::new(0.0, 3.0, 0.0));
        let clamped = smooth_projection(Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(clamped.x, 0.0);
    }

    #[test]
    fn test_smooth_square_onto_circle() {
        let mut mesh = QuadMesh::new();
        let face = mesh.add_face([
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ]);

        let moves = mesh.smooth(&[face], 1.0).unwrap();
        assert_eq!(moves.len(), 4);
        for corner in mesh.face_vertices(face).unwrap() {
            assert_relative_eq!(corner.length(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(corner.x.abs(), corner.y.abs(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_smooth_moves_welded_neighbours() {
        let mut mesh = QuadMesh::new();
        let face = mesh.add_face([
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ]);
        let neighbour = mesh.add_face([
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(3.0, -1.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]);

        mesh.smooth(&[face], 1.0).unwrap();
        let shared = mesh.face_vertices(face).unwrap()[1];
        assert_eq!(mesh.face_vertices(neighbour).unwrap()[0], shared);
        assert_eq!(mesh.face_vertices(neighbour).unwrap()[1], Vec3::new(3.0, -1.0, 0.0));
    }

    #[test]
    fn test_smooth_non_positive_radius_is_noop() {
        let mut mesh = QuadMesh::new();
        let face = mesh.add_face([Vec3::ZERO, Vec3::X, Vec3::X + Vec3::Y, Vec3::Y]);
        assert!(mesh.smooth(&[face], 0.0).unwrap().is_empty());
        assert_eq!(mesh.face_vertices(face).unwrap()[2], Vec3::X + Vec3::Y);
        assert!(mesh.smooth(&[face, 7], 1.0).unwrap_err().is_index_error());
    }

    #[test]
    fn test_smooth_target_on_other_input_moves_once() {
        // each outer corner projects exactly onto an inner corner
        let half = 0.5f32.sqrt();
        let outer = [
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(-1.0, 0.0, 1.0),
        ];
        let inner = outer.map(|p| p * half);
        assert_eq!(smooth_projection(outer[0]), inner[0]);

        let mut mesh = QuadMesh::new();
        let a = mesh.add_face(outer);
        let b = mesh.add_face(inner);
        let moves = mesh.smooth(&[a, b], 1.0).unwrap();
        assert_eq!(moves.len(), 8);

        // outer corners stop on the unit circle instead of following the
        // inner corners inwards
        for (target, moved) in inner.iter().zip(mesh.face_vertices(a).unwrap()) {
            assert!(moved.abs_diff_eq(*target, 1e-6));
        }
        for moved in mesh.face_vertices(b).unwrap() {
            assert_relative_eq!(moved.length(), 0.75f32.sqrt(), epsilon = 1e-6);
        }

        let mut replayed = QuadMesh::new();
        replayed.add_face(outer);
        replayed.add_face(inner);
        for (vertex, delta) in moves {
            replayed.move_vertex(vertex, delta).unwrap();
        }
        assert_eq!(replayed.vertices(), mesh.vertices());
    }
}
