//! # Moves, Groups and Colors
//!
//! Welded moves gather every vertex sharing a position with the target
//! (within the store tolerance) and move them together, so geometry built
//! from separate faces behaves as one surface. Group transforms are rigid
//! and never weld: only faces tagged with the group move.

use crate::error::Result;
use crate::mesh::{EdgeId, FaceId, GroupId, QuadMesh, VertexId};
use config::constants::DEBUG_PALETTE;
use glam::{EulerRot, Quat, Vec3, Vec4};

impl QuadMesh {
    // =========================================================================
    // WELDED MOVES
    // =========================================================================

    /// Moves a vertex and every vertex coincident with it by `delta`.
    pub fn move_vertex(&mut self, vertex: VertexId, delta: Vec3) -> Result<()> {
        let position = self.vertex(vertex)?;
        self.move_clusters(&[(position, delta)]);
        Ok(())
    }

    /// Moves both endpoints of an edge, welded, by `delta`.
    pub fn move_edge(&mut self, edge: EdgeId, delta: Vec3) -> Result<()> {
        let (a, b) = self.edge_endpoints(edge)?;
        self.move_clusters(&[(a, delta), (b, delta)]);
        Ok(())
    }

    /// Moves the four corners of a face, welded, by `delta`.
    pub fn move_face(&mut self, face: FaceId, delta: Vec3) -> Result<()> {
        let corners = self.face_vertices(face)?;
        let moves = corners.map(|corner| (corner, delta));
        self.move_clusters(&moves);
        Ok(())
    }

    /// Scales a face about its center.
    ///
    /// Each corner cluster moves by `(corner - center) * (factor - 1)`, so
    /// a factor of one leaves the face in place and factors below one pull
    /// the corners inwards.
    pub fn scale_face(&mut self, face: FaceId, factor: f32) -> Result<()> {
        let corners = self.face_vertices(face)?;
        let center = self.get_center(face)?;
        let moves = corners.map(|corner| (corner, (corner - center) * (factor - 1.0)));
        self.move_clusters(&moves);
        Ok(())
    }

    /// Applies one delta per cluster position.
    ///
    /// Every cluster is gathered before anything moves, and a vertex that
    /// falls in several clusters moves once, with the first delta.
    pub(crate) fn move_clusters(&mut self, moves: &[(Vec3, Vec3)]) {
        let mut claimed = vec![false; self.vertices.len()];
        let mut planned: Vec<(VertexId, Vec3)> = Vec::new();
        for (position, delta) in moves {
            for vertex in self.find_vertices(*position, self.tolerance) {
                if !claimed[vertex as usize] {
                    claimed[vertex as usize] = true;
                    planned.push((vertex, *delta));
                }
            }
        }

        for (vertex, delta) in &planned {
            self.vertices[*vertex as usize] += *delta;
        }
        let moved: Vec<VertexId> = planned.iter().map(|(vertex, _)| *vertex).collect();
        self.refresh_normals_for(&moved);
    }

    // =========================================================================
    // GROUP TRANSFORMS
    // =========================================================================

    fn group_vertex_ids(&self, group: GroupId) -> Vec<VertexId> {
        self.edges
            .iter()
            .filter(|e| self.faces[e.face as usize].group == group)
            .map(|e| e.vertex)
            .collect()
    }

    /// Translates every face of `group` by `delta`.
    pub fn move_group(&mut self, group: GroupId, delta: Vec3) -> Result<()> {
        self.check_group(group)?;
        for vertex in self.group_vertex_ids(group) {
            self.vertices[vertex as usize] += delta;
        }
        Ok(())
    }

    /// Rotates every face of `group` about the centroid of its vertices.
    ///
    /// `rotation` holds Euler angles in radians, applied in XYZ order.
    pub fn rotate_group(&mut self, group: GroupId, rotation: Vec3) -> Result<()> {
        self.check_group(group)?;
        let vertices = self.group_vertex_ids(group);
        if vertices.is_empty() {
            return Ok(());
        }

        let centroid = vertices
            .iter()
            .map(|v| self.vertices[*v as usize])
            .sum::<Vec3>()
            / vertices.len() as f32;
        let quat = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
        for vertex in &vertices {
            let position = &mut self.vertices[*vertex as usize];
            *position = centroid + quat * (*position - centroid);
        }
        self.refresh_normals_for(&vertices);
        Ok(())
    }

    /// Duplicates every face of `group`, displaced by `offset`, into a new
    /// group. Returns the new group id.
    pub fn copy_group(&mut self, group: GroupId, offset: Vec3) -> Result<GroupId> {
        self.check_group(group)?;
        let faces = self.group_faces(group);
        self.reserve_faces(faces.len())?;
        let copy = self.allocate_group();
        for face in faces {
            let edges = self.face_edges(face)?;
            let corners = self.face_vertices(face)?.map(|corner| corner + offset);
            let uvs = edges.map(|e| self.edges[e as usize].uv);
            let color = self.faces[face as usize].color;
            let new_face = self.push_face(corners, uvs, color);
            self.faces[new_face as usize].group = copy;
        }
        Ok(copy)
    }

    // =========================================================================
    // COLOR AND SELECTION
    // =========================================================================

    /// Sets the color of one face.
    pub fn set_color(&mut self, face: FaceId, color: Vec4) -> Result<()> {
        let index = self.check_face(face)?;
        self.faces[index].color = color;
        Ok(())
    }

    /// Sets the color of every selected face and returns those faces.
    pub fn set_selection_color(&mut self, color: Vec4) -> Vec<FaceId> {
        let selected = self.selected_faces();
        for face in &selected {
            self.faces[*face as usize].color = color;
        }
        selected
    }

    /// Toggles the selection flag of a face and returns the new state.
    pub fn select_face(&mut self, face: FaceId) -> Result<bool> {
        let index = self.check_face(face)?;
        let selected = !self.faces[index].selected;
        self.faces[index].selected = selected;
        Ok(selected)
    }

    /// Deselects every face.
    pub fn clear_selection(&mut self) {
        for face in &mut self.faces {
            face.selected = false;
        }
    }

    /// Returns the selected faces in id order.
    pub fn selected_faces(&self) -> Vec<FaceId> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.selected)
            .map(|(i, _)| i as FaceId)
            .collect()
    }

    /// Paints face `i` with palette entry `i % 8`.
    pub fn debug_colors(&mut self) {
        for (i, face) in self.faces.iter_mut().enumerate() {
            face.color = Vec4::from_array(DEBUG_PALETTE[i % DEBUG_PALETTE.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::UNGROUPED;
    use std::f32::consts::FRAC_PI_2;

    fn square_at(origin: Vec3) -> [Vec3; 4] {
        [
            origin,
            origin + Vec3::X,
            origin + Vec3::X + Vec3::Y,
            origin + Vec3::Y,
        ]
    }

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a:?} != {b:?}");
    }

    #[test]
    fn test_move_vertex_moves_welded_cluster() {
        let mut mesh = QuadMesh::new();
        let left = mesh.add_face(square_at(Vec3::ZERO));
        let right = mesh.add_face(square_at(Vec3::X));
        // corner 1 of the left face sits on corner 0 of the right face
        let shared = mesh.face_vertex_ids(left).unwrap()[1];

        mesh.move_vertex(shared, Vec3::Z).unwrap();
        assert_vec3_eq(mesh.face_vertices(left).unwrap()[1], Vec3::new(1.0, 0.0, 1.0));
        assert_vec3_eq(mesh.face_vertices(right).unwrap()[0], Vec3::new(1.0, 0.0, 1.0));
        // the untouched corners stay put
        assert_vec3_eq(mesh.face_vertices(right).unwrap()[1], Vec3::new(2.0, 0.0, 0.0));
        assert_ne!(mesh.face(left).unwrap().normal, Vec3::Z);
    }

    #[test]
    fn test_move_edge_and_face() {
        let mut mesh = QuadMesh::new();
        let face = mesh.add_face(square_at(Vec3::ZERO));
        mesh.move_edge(mesh.face(face).unwrap().edge, -Vec3::Y).unwrap();
        let corners = mesh.face_vertices(face).unwrap();
        assert_vec3_eq(corners[0], -Vec3::Y);
        assert_vec3_eq(corners[1], Vec3::new(1.0, -1.0, 0.0));

        let before = mesh.face_vertices(face).unwrap();
        mesh.move_face(face, Vec3::new(0.0, 0.0, 3.0)).unwrap();
        for (after, before) in mesh.face_vertices(face).unwrap().iter().zip(before) {
            assert_vec3_eq(*after, before + Vec3::new(0.0, 0.0, 3.0));
        }
    }

    #[test]
    fn test_move_face_moves_each_vertex_once() {
        let mut mesh = QuadMesh::new();
        let c = Vec3::ZERO;
        // fan cap style face with a repeated corner
        let face = mesh.add_face([c, Vec3::X, Vec3::Y, c]);
        mesh.move_face(face, Vec3::Z).unwrap();
        let corners = mesh.face_vertices(face).unwrap();
        assert_vec3_eq(corners[0], Vec3::Z);
        assert_vec3_eq(corners[3], Vec3::Z);
    }

    #[test]
    fn test_scale_face() {
        let mut mesh = QuadMesh::new();
        let face = mesh.add_face(square_at(Vec3::ZERO));
        let original = mesh.face_vertices(face).unwrap();

        mesh.scale_face(face, 1.0).unwrap();
        for (after, before) in mesh.face_vertices(face).unwrap().iter().zip(original) {
            assert!(after.abs_diff_eq(before, 1e-6));
        }

        mesh.scale_face(face, 0.5).unwrap();
        let corners = mesh.face_vertices(face).unwrap();
        assert_vec3_eq(corners[0], Vec3::new(0.25, 0.25, 0.0));
        assert_vec3_eq(corners[2], Vec3::new(0.75, 0.75, 0.0));
        assert_vec3_eq(mesh.get_center(face).unwrap(), Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_move_group_leaves_other_faces() {
        let mut mesh = QuadMesh::new();
        let loose = mesh.add_face(square_at(Vec3::ZERO));
        let group = mesh.start_group();
        let member = mesh.add_face(square_at(Vec3::ZERO));
        mesh.end_group();

        let delta = Vec3::new(1.0, 2.0, 3.0);
        mesh.move_group(group, delta).unwrap();
        for (after, before) in mesh
            .face_vertices(member)
            .unwrap()
            .iter()
            .zip(square_at(Vec3::ZERO))
        {
            assert_eq!(*after, before + delta);
        }
        assert_eq!(mesh.face_vertices(loose).unwrap(), square_at(Vec3::ZERO));
    }

    #[test]
    fn test_rotate_group_about_centroid() {
        let mut mesh = QuadMesh::new();
        let group = mesh.start_group();
        let face = mesh.add_face(square_at(Vec3::ZERO));
        mesh.end_group();

        mesh.rotate_group(group, Vec3::new(FRAC_PI_2, 0.0, 0.0)).unwrap();
        assert_vec3_eq(mesh.get_center(face).unwrap(), Vec3::new(0.5, 0.5, 0.0));
        // +Z rotated a quarter turn about X points along -Y
        assert_vec3_eq(mesh.face(face).unwrap().normal, -Vec3::Y);
    }

    #[test]
    fn test_copy_group_creates_new_group() {
        let mut mesh = QuadMesh::new();
        let group = mesh.start_group();
        let face = mesh.add_face(square_at(Vec3::ZERO));
        mesh.set_color(face, Vec4::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        mesh.end_group();

        let copy = mesh.copy_group(group, Vec3::X * 5.0).unwrap();
        assert_ne!(copy, group);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.group_faces(copy), vec![1]);
        assert_eq!(mesh.face(1).unwrap().color, Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_vec3_eq(mesh.get_center(1).unwrap(), Vec3::new(5.5, 0.5, 0.0));
        assert_eq!(mesh.active_group(), UNGROUPED);
    }

    #[test]
    fn test_unknown_group_is_an_error() {
        let mut mesh = QuadMesh::new();
        mesh.add_face(square_at(Vec3::ZERO));
        assert!(mesh.move_group(0, Vec3::X).unwrap_err().is_index_error());
        assert!(mesh.rotate_group(UNGROUPED, Vec3::X).is_err());
        assert!(mesh.copy_group(4, Vec3::X).is_err());
        assert_eq!(mesh.face_vertices(0).unwrap(), square_at(Vec3::ZERO));
    }

    #[test]
    fn test_selection_and_colors() {
        let mut mesh = QuadMesh::new();
        for i in 0..3 {
            mesh.add_face(square_at(Vec3::X * i as f32));
        }
        assert!(mesh.select_face(0).unwrap());
        assert!(mesh.select_face(2).unwrap());
        assert!(mesh.select_face(1).unwrap());
        assert!(!mesh.select_face(1).unwrap());
        assert_eq!(mesh.selected_faces(), vec![0, 2]);

        let green = Vec4::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(mesh.set_selection_color(green), vec![0, 2]);
        assert_eq!(mesh.face(0).unwrap().color, green);
        assert_eq!(mesh.face(1).unwrap().color, Vec4::ONE);

        mesh.clear_selection();
        assert!(mesh.selected_faces().is_empty());
        assert!(mesh.select_face(9).is_err());
        assert!(mesh.set_color(9, green).is_err());
    }

    #[test]
    fn test_debug_colors_cycle_palette() {
        let mut mesh = QuadMesh::new();
        for i in 0..10 {
            mesh.add_face(square_at(Vec3::Z * i as f32));
        }
        mesh.debug_colors();
        assert_eq!(mesh.face(0).unwrap().color, Vec4::from_array(DEBUG_PALETTE[0]));
        assert_eq!(mesh.face(9).unwrap().color, Vec4::from_array(DEBUG_PALETTE[1]));
    }
}
