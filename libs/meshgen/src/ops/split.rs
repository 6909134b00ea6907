//! # Splitting and Slicing
//!
//! Operations that cut one face into several while keeping every piece a
//! quad. Only the cut face's own vertices move; neighbours keep their
//! positions, and the freed area is filled with new faces.

use crate::error::Result;
use crate::mesh::{EdgeId, FaceId, QuadMesh, CORNER_UVS};
use glam::{Vec2, Vec3};

impl QuadMesh {
    /// Splits a face parallel to `edge`.
    ///
    /// For a face `a b c d` with `edge = a -> b`, the two vertices ahead of
    /// the edge are pulled towards it: `c <- b + (c - b) * factor` and
    /// `d <- a + (d - a) * factor`. The gap between the pulled vertices and
    /// their old positions becomes a new face `[d', c', c, d]`, which is
    /// returned.
    pub fn hsplit_edge(&mut self, edge: EdgeId, factor: f32) -> Result<FaceId> {
        let e = self.edge(edge)?;
        let e_b = self.edges[e.next as usize];
        let e_c = self.edges[e_b.next as usize];
        let e_d = self.edges[e.prev as usize];

        let a = self.vertices[e.vertex as usize];
        let b = self.vertices[e_b.vertex as usize];
        let c = self.vertices[e_c.vertex as usize];
        let d = self.vertices[e_d.vertex as usize];

        let c_split = b + (c - b) * factor;
        let d_split = a + (d - a) * factor;
        self.set_vertex(e_c.vertex, c_split);
        self.set_vertex(e_d.vertex, d_split);

        let color = self.faces[e.face as usize].color;
        let gap = self.push_face([d_split, c_split, c, d], CORNER_UVS, color);
        self.calculate_normal(e.face)?;
        Ok(gap)
    }

    /// Splits a face across `edge`: the same split as
    /// [`QuadMesh::hsplit_edge`], taken relative to the edge after `edge`.
    pub fn vsplit_edge(&mut self, edge: EdgeId, factor: f32) -> Result<FaceId> {
        let next = self.edge(edge)?.next;
        self.hsplit_edge(next, factor)
    }

    /// Cuts a face into a regular `segments_x` by `segments_y` grid.
    ///
    /// Cells are laid out bilinearly over the face corners, row by row from
    /// the first corner. The first cell reuses the original face; the other
    /// cells are new faces with the original color. Each cell's UVs cover
    /// its part of the unit square. Segment counts below one are treated as
    /// one. Counts above `MAX_SEGMENTS`, or a grid that would pass the face
    /// budget, fail with `LimitExceeded` and leave the mesh untouched.
    /// Returns every cell, original first.
    pub fn slice(&mut self, face: FaceId, segments_x: u32, segments_y: u32) -> Result<Vec<FaceId>> {
        let corners = self.face_vertices(face)?;
        let vertex_ids = self.face_vertex_ids(face)?;
        let edges = self.face_edges(face)?;
        let color = self.faces[face as usize].color;
        let segments_x = Self::check_segments("slice segments", segments_x)?.max(1);
        let segments_y = Self::check_segments("slice segments", segments_y)?.max(1);
        let cell_count = segments_x as usize * segments_y as usize;
        self.reserve_faces(cell_count - 1)?;

        let point = |u: f32, v: f32| -> Vec3 {
            let near = corners[0].lerp(corners[1], u);
            let far = corners[3].lerp(corners[2], u);
            near.lerp(far, v)
        };

        let mut cells = Vec::with_capacity(cell_count);
        for j in 0..segments_y {
            let v0 = j as f32 / segments_y as f32;
            let v1 = (j + 1) as f32 / segments_y as f32;
            for i in 0..segments_x {
                let u0 = i as f32 / segments_x as f32;
                let u1 = (i + 1) as f32 / segments_x as f32;

                let cell = [point(u0, v0), point(u1, v0), point(u1, v1), point(u0, v1)];
                let uvs = [
                    Vec2::new(u0, v0),
                    Vec2::new(u1, v0),
                    Vec2::new(u1, v1),
                    Vec2::new(u0, v1),
                ];

                if i == 0 && j == 0 {
                    for k in 0..4 {
                        self.set_vertex(vertex_ids[k], cell[k]);
                        self.edges[edges[k] as usize].uv = uvs[k];
                    }
                    cells.push(face);
                } else {
                    cells.push(self.push_face(cell, uvs, color));
                }
            }
        }

        self.calculate_normal(face)?;
        Ok(cells)
    }
}
