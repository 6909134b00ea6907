//! # Quad Mesh Store
//!
//! Owns the three parallel arrays of the kernel: vertex positions, edges and
//! quad faces. Every face owns exactly four edges linked into a cycle through
//! `next`/`prev`; every edge owns its start vertex. Faces never share vertex
//! slots, so neighbouring faces are related only by coincident positions,
//! found on demand with [`QuadMesh::find_vertices`] and
//! [`QuadMesh::find_edges`].

use crate::error::{ElementKind, MeshGenError, Result};
use config::constants::{DEFAULT_FACE_COLOR, MAX_FACES, MAX_SEGMENTS, UNGROUPED, VERTEX_EPSILON};
use glam::{Vec2, Vec3, Vec4};

/// Index of a vertex slot.
pub type VertexId = u32;
/// Index of an edge slot.
pub type EdgeId = u32;
/// Index of a face slot.
pub type FaceId = u32;
/// Group tag of a face; [`UNGROUPED`] when the face belongs to no group.
pub type GroupId = i32;

/// UVs assigned to the corners of a fresh face, in winding order.
pub const CORNER_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Directed edge of a single face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Next edge of the same face.
    pub next: EdgeId,
    /// Previous edge of the same face.
    pub prev: EdgeId,
    /// Start vertex of this edge.
    pub vertex: VertexId,
    /// Face owning this edge.
    pub face: FaceId,
    /// Texture coordinate of the start vertex.
    pub uv: Vec2,
}

/// Quad face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// First edge of the face's cycle.
    pub edge: EdgeId,
    /// Cached normal; refreshed by [`QuadMesh::calculate_normal`].
    pub normal: Vec3,
    /// RGBA color in [0, 1].
    pub color: Vec4,
    /// Group tag.
    pub group: GroupId,
    /// Selection flag.
    pub selected: bool,
}

/// Quad-only face/edge/vertex store.
///
/// # Example
///
/// ```rust
/// use meshgen::QuadMesh;
/// use glam::Vec3;
///
/// let mut mesh = QuadMesh::new();
/// let face = mesh.add_face([
///     Vec3::new(0.0, 0.0, 0.0),
///     Vec3::new(1.0, 0.0, 0.0),
///     Vec3::new(1.0, 1.0, 0.0),
///     Vec3::new(0.0, 1.0, 0.0),
/// ]);
/// assert_eq!(mesh.face_count(), 1);
/// assert_eq!(mesh.face(face).unwrap().normal, Vec3::Z);
/// ```
#[derive(Debug, Clone)]
pub struct QuadMesh {
    pub(crate) vertices: Vec<Vec3>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) faces: Vec<Face>,
    pub(crate) tolerance: f32,
    pub(crate) active_group: GroupId,
    pub(crate) next_group: GroupId,
}

impl Default for QuadMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadMesh {
    /// Creates an empty store using [`VERTEX_EPSILON`] for position matching.
    pub fn new() -> Self {
        Self::with_tolerance(VERTEX_EPSILON)
    }

    /// Creates an empty store with a custom matching tolerance.
    pub fn with_tolerance(tolerance: f32) -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            tolerance,
            active_group: UNGROUPED,
            next_group: 0,
        }
    }

    /// Returns the position matching tolerance.
    #[inline]
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the store holds no faces and no loose vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// Returns all vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Returns all edges.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns all faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    // =========================================================================
    // CHECKED ACCESS
    // =========================================================================

    pub(crate) fn check_vertex(&self, vertex: VertexId) -> Result<usize> {
        let index = vertex as usize;
        if index < self.vertices.len() {
            Ok(index)
        } else {
            Err(MeshGenError::out_of_range(ElementKind::Vertex, vertex, self.vertices.len()))
        }
    }

    pub(crate) fn check_edge(&self, edge: EdgeId) -> Result<usize> {
        let index = edge as usize;
        if index < self.edges.len() {
            Ok(index)
        } else {
            Err(MeshGenError::out_of_range(ElementKind::Edge, edge, self.edges.len()))
        }
    }

    pub(crate) fn check_face(&self, face: FaceId) -> Result<usize> {
        let index = face as usize;
        if index < self.faces.len() {
            Ok(index)
        } else {
            Err(MeshGenError::out_of_range(ElementKind::Face, face, self.faces.len()))
        }
    }

    /// Fails when `segments` is above [`MAX_SEGMENTS`].
    pub(crate) fn check_segments(what: &'static str, segments: u32) -> Result<u32> {
        if segments > MAX_SEGMENTS {
            return Err(MeshGenError::limit_exceeded(
                what,
                u64::from(segments),
                u64::from(MAX_SEGMENTS),
            ));
        }
        Ok(segments)
    }

    /// Fails when adding `additional` faces would pass [`MAX_FACES`].
    ///
    /// Bulk operations call this before touching the store so a rejected
    /// request leaves the mesh unchanged.
    pub(crate) fn reserve_faces(&self, additional: usize) -> Result<()> {
        let requested = self.faces.len().saturating_add(additional);
        if requested > MAX_FACES {
            return Err(MeshGenError::limit_exceeded(
                "face count",
                requested as u64,
                MAX_FACES as u64,
            ));
        }
        Ok(())
    }

    /// Returns the position of a vertex.
    pub fn vertex(&self, vertex: VertexId) -> Result<Vec3> {
        Ok(self.vertices[self.check_vertex(vertex)?])
    }

    /// Returns a copy of an edge.
    pub fn edge(&self, edge: EdgeId) -> Result<Edge> {
        Ok(self.edges[self.check_edge(edge)?])
    }

    /// Returns a copy of a face.
    pub fn face(&self, face: FaceId) -> Result<Face> {
        Ok(self.faces[self.check_face(face)?])
    }

    /// Returns the four edges of a face in winding order.
    pub fn face_edges(&self, face: FaceId) -> Result<[EdgeId; 4]> {
        let first = self.faces[self.check_face(face)?].edge;
        let mut edges = [first; 4];
        for i in 1..4 {
            edges[i] = self.edges[edges[i - 1] as usize].next;
        }
        Ok(edges)
    }

    /// Returns the four vertex ids of a face in winding order.
    pub fn face_vertex_ids(&self, face: FaceId) -> Result<[VertexId; 4]> {
        Ok(self.face_edges(face)?.map(|e| self.edges[e as usize].vertex))
    }

    /// Returns the four corner positions of a face in winding order.
    pub fn face_vertices(&self, face: FaceId) -> Result<[Vec3; 4]> {
        Ok(self
            .face_vertex_ids(face)?
            .map(|v| self.vertices[v as usize]))
    }

    /// Returns the start and end position of an edge.
    pub fn edge_endpoints(&self, edge: EdgeId) -> Result<(Vec3, Vec3)> {
        let e = self.edges[self.check_edge(edge)?];
        let next = self.edges[e.next as usize];
        Ok((
            self.vertices[e.vertex as usize],
            self.vertices[next.vertex as usize],
        ))
    }

    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self, position: Vec3) -> VertexId {
        let index = self.vertices.len() as VertexId;
        self.vertices.push(position);
        index
    }

    /// Appends a quad built from four new vertices, in the given winding.
    ///
    /// The face gets the default color and the active group.
    pub fn add_face(&mut self, corners: [Vec3; 4]) -> FaceId {
        self.push_face(corners, CORNER_UVS, Vec4::from_array(DEFAULT_FACE_COLOR))
    }

    pub(crate) fn push_face(&mut self, corners: [Vec3; 4], uvs: [Vec2; 4], color: Vec4) -> FaceId {
        // Bulk paths stay under MAX_FACES, so face and edge ids fit in u32.
        debug_assert!(self.edges.len() + 4 <= u32::MAX as usize);
        let face = self.faces.len() as FaceId;
        let first = self.edges.len() as EdgeId;

        for (i, corner) in corners.iter().enumerate() {
            let vertex = self.add_vertex(*corner);
            let i = i as EdgeId;
            self.edges.push(Edge {
                next: first + (i + 1) % 4,
                prev: first + (i + 3) % 4,
                vertex,
                face,
                uv: uvs[i as usize],
            });
        }

        self.faces.push(Face {
            edge: first,
            normal: quad_normal(&corners),
            color,
            group: self.active_group,
            selected: false,
        });
        face
    }

    /// Overwrites one vertex slot, leaving coincident vertices alone.
    pub(crate) fn set_vertex(&mut self, vertex: VertexId, position: Vec3) {
        self.vertices[vertex as usize] = position;
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    /// Returns every vertex within `epsilon` of `position`, in insertion order.
    pub fn find_vertices(&self, position: Vec3, epsilon: f32) -> Vec<VertexId> {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.abs_diff_eq(position, epsilon))
            .map(|(i, _)| i as VertexId)
            .collect()
    }

    /// Returns every edge whose start vertex lies within `epsilon` of
    /// `position`, in insertion order.
    pub fn find_edges(&self, position: Vec3, epsilon: f32) -> Vec<EdgeId> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| self.vertices[e.vertex as usize].abs_diff_eq(position, epsilon))
            .map(|(i, _)| i as EdgeId)
            .collect()
    }

    // =========================================================================
    // DERIVED DATA
    // =========================================================================

    /// Recomputes and caches the normal of one face.
    pub fn calculate_normal(&mut self, face: FaceId) -> Result<Vec3> {
        let corners = self.face_vertices(face)?;
        let normal = quad_normal(&corners);
        self.faces[face as usize].normal = normal;
        Ok(normal)
    }

    /// Recomputes every cached face normal.
    pub fn recalculate_normals(&mut self) {
        for face in 0..self.faces.len() {
            let edge = self.faces[face].edge;
            let corners = self.cycle_positions(edge);
            self.faces[face].normal = quad_normal(&corners);
        }
    }

    /// Refreshes the normals of the faces owning the given vertices.
    pub(crate) fn refresh_normals_for(&mut self, vertices: &[VertexId]) {
        let mut touched: Vec<FaceId> = self
            .edges
            .iter()
            .filter(|e| vertices.contains(&e.vertex))
            .map(|e| e.face)
            .collect();
        touched.sort_unstable();
        touched.dedup();
        for face in touched {
            let edge = self.faces[face as usize].edge;
            let corners = self.cycle_positions(edge);
            self.faces[face as usize].normal = quad_normal(&corners);
        }
    }

    pub(crate) fn cycle_positions(&self, first: EdgeId) -> [Vec3; 4] {
        let mut edge = first;
        let mut corners = [Vec3::ZERO; 4];
        for corner in &mut corners {
            let e = self.edges[edge as usize];
            *corner = self.vertices[e.vertex as usize];
            edge = e.next;
        }
        corners
    }

    /// Returns the average of a face's four corners.
    pub fn get_center(&self, face: FaceId) -> Result<Vec3> {
        let corners = self.face_vertices(face)?;
        Ok(corners.iter().copied().sum::<Vec3>() / 4.0)
    }

    // =========================================================================
    // GROUPS
    // =========================================================================

    /// Returns the group new faces are tagged with.
    #[inline]
    pub fn active_group(&self) -> GroupId {
        self.active_group
    }

    /// Opens a new group; faces created until [`QuadMesh::end_group`] join it.
    pub fn start_group(&mut self) -> GroupId {
        let group = self.next_group;
        self.next_group += 1;
        self.active_group = group;
        group
    }

    /// Closes the active group.
    pub fn end_group(&mut self) {
        self.active_group = UNGROUPED;
    }

    /// Allocates a group id without making it active.
    pub(crate) fn allocate_group(&mut self) -> GroupId {
        let group = self.next_group;
        self.next_group += 1;
        group
    }

    pub(crate) fn check_group(&self, group: GroupId) -> Result<()> {
        if (0..self.next_group).contains(&group) {
            Ok(())
        } else {
            Err(MeshGenError::out_of_range(
                ElementKind::Group,
                group,
                self.next_group.max(0) as usize,
            ))
        }
    }

    /// Returns the faces tagged with `group`, in id order.
    pub fn group_faces(&self, group: GroupId) -> Vec<FaceId> {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.group == group)
            .map(|(i, _)| i as FaceId)
            .collect()
    }

    /// Empties the store and resets the group counters.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.faces.clear();
        self.active_group = UNGROUPED;
        self.next_group = 0;
    }
}

/// Normal of a quad: `(v1 - v0) x (v3 - v0)`, normalized.
///
/// Quads with repeated corners fall back to the first three distinct
/// corners in cycle order; fully degenerate quads get a zero normal.
pub fn quad_normal(corners: &[Vec3; 4]) -> Vec3 {
    let normal = (corners[1] - corners[0])
        .cross(corners[3] - corners[0])
        .normalize_or_zero();
    if normal != Vec3::ZERO {
        return normal;
    }

    let mut distinct: Vec<Vec3> = Vec::with_capacity(4);
    for corner in corners {
        if !distinct.contains(corner) {
            distinct.push(*corner);
        }
    }
    if distinct.len() < 3 {
        return Vec3::ZERO;
    }
    (distinct[1] - distinct[0])
        .cross(distinct[2] - distinct[0])
        .normalize_or_zero()
}
