//! # MeshGen Session
//!
//! [`MeshGen`] owns a [`QuadMesh`] and the [`OpcodeLog`] of every mutating
//! call made through it. Each recording method first applies the store
//! operation and appends its opcode only when that succeeded, so replaying
//! the log on an empty session reproduces the mesh.
//!
//! Calls without an opcode of their own record the catalog operations they
//! are made of.

use crate::error::Result;
use crate::mesh::{EdgeId, FaceId, GroupId, QuadMesh, VertexId};
use crate::opcode::{Opcode, OpcodeLog};
use crate::primitives::{grid_quad, torus_quads};
use config::constants::KernelConfig;
use glam::{Vec2, Vec3, Vec4};
use log::debug;
use std::ops::Range;

/// A mesh generation session: mesh store, opcode log and configuration.
///
/// # Example
///
/// ```rust
/// use meshgen::MeshGen;
/// use glam::Vec3;
///
/// let mut session = MeshGen::new();
/// session.add_cube(Vec3::ZERO, Vec3::ONE);
/// let cap = session.extrude_face(4, 1.0).unwrap();
///
/// assert_eq!(session.mesh().face_count(), 11);
/// assert_eq!(session.log().len(), 2);
///
/// let mut replayed = MeshGen::new();
/// replayed.execute_opcodes(session.log()).unwrap();
/// assert_eq!(replayed.mesh().face_vertices(cap).unwrap(), session.mesh().face_vertices(cap).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct MeshGen {
    mesh: QuadMesh,
    log: OpcodeLog,
    config: KernelConfig,
}

impl Default for MeshGen {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshGen {
    /// Creates an empty session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(KernelConfig::default())
    }

    /// Creates an empty session using `config`.
    pub fn with_config(config: KernelConfig) -> Self {
        Self {
            mesh: QuadMesh::with_tolerance(config.tolerance),
            log: OpcodeLog::new(),
            config,
        }
    }

    /// Returns the mesh store.
    #[inline]
    pub fn mesh(&self) -> &QuadMesh {
        &self.mesh
    }

    /// Mutable store access for unrecorded work such as export.
    #[inline]
    pub(crate) fn mesh_mut(&mut self) -> &mut QuadMesh {
        &mut self.mesh
    }

    /// Returns the opcode log.
    #[inline]
    pub fn log(&self) -> &OpcodeLog {
        &self.log
    }

    /// Returns the session configuration.
    #[inline]
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Empties the mesh and the log, and resets the group counters.
    pub fn clear(&mut self) {
        self.mesh.clear();
        self.log.clear();
    }

    /// Recomputes every cached face normal. Not recorded.
    pub fn recalculate_normals(&mut self) {
        self.mesh.recalculate_normals();
    }

    fn record(&mut self, opcode: Opcode) {
        self.log.record(&opcode);
    }

    // =========================================================================
    // FACES AND PRIMITIVES
    // =========================================================================

    /// Adds a quad from four corners.
    ///
    /// ## Parameters
    ///
    /// - `corners`: Positions in winding order; the normal follows the
    ///   right-hand rule over this order
    ///
    /// ## Returns
    ///
    /// The id of the new face. The face gets the default color and joins
    /// the active group, if any.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use meshgen::MeshGen;
    /// use glam::Vec3;
    ///
    /// let mut session = MeshGen::new();
    /// let face = session.add_face([Vec3::ZERO, Vec3::X, Vec3::X + Vec3::Y, Vec3::Y]);
    /// assert_eq!(session.mesh().face(face).unwrap().normal, Vec3::Z);
    /// ```
    pub fn add_face(&mut self, corners: [Vec3; 4]) -> FaceId {
        let face = self.mesh.add_face(corners);
        self.record(Opcode::AddFace { corners });
        face
    }

    /// Adds an axis-aligned white cube centered on `position`.
    ///
    /// Returns the six new faces, in the order `-x +x -y +y -z +z`.
    pub fn add_cube(&mut self, position: Vec3, size: Vec3) -> Range<FaceId> {
        let faces = self.mesh.add_cube(position, size);
        self.record(Opcode::AddCube { position, size });
        faces
    }

    /// Adds a white cube rotated by XYZ Euler angles (radians) about its
    /// center.
    pub fn add_cube_rot(&mut self, position: Vec3, size: Vec3, rotation: Vec3) -> Range<FaceId> {
        let faces = self.mesh.add_cube_rot(position, size, rotation);
        self.record(Opcode::AddCubeRot { position, size, rotation });
        faces
    }

    /// Adds an axis-aligned cube with every face set to `color`.
    pub fn add_color_cube(&mut self, position: Vec3, size: Vec3, color: Vec4) -> Range<FaceId> {
        let faces = self.mesh.add_color_cube(position, size, color);
        self.record(Opcode::AddColorCube { position, size, color });
        faces
    }

    /// Adds a capped white cylinder around the `+y` axis.
    ///
    /// ## Parameters
    ///
    /// - `position`: Center of the cylinder
    /// - `radius`, `height`: Extent; the caps sit at `position.y +- height / 2`
    /// - `segments`: Steps around the axis, raised to at least three
    ///
    /// ## Returns
    ///
    /// The new faces: side wall, top cap, then bottom cap. A segment count
    /// above `MAX_SEGMENTS` fails with `LimitExceeded` and records nothing.
    pub fn create_cylinder(
        &mut self,
        position: Vec3,
        radius: f32,
        height: f32,
        segments: u32,
    ) -> Result<Range<FaceId>> {
        let faces = self.mesh.create_cylinder(position, radius, height, segments)?;
        self.record(Opcode::AddCylinder { position, radius, height, segments });
        Ok(faces)
    }

    /// Like [`MeshGen::create_cylinder`], with every face set to `color`.
    pub fn create_color_cylinder(
        &mut self,
        position: Vec3,
        radius: f32,
        height: f32,
        segments: u32,
        color: Vec4,
    ) -> Result<Range<FaceId>> {
        let faces = self
            .mesh
            .create_color_cylinder(position, radius, height, segments, color)?;
        self.record(Opcode::AddColCylinder { position, radius, height, segments, color });
        Ok(faces)
    }

    /// Adds a six-sided prism.
    pub fn create_hexagon(&mut self, position: Vec3, radius: f32, height: f32) -> Result<Range<FaceId>> {
        let faces = self.mesh.create_hexagon(position, radius, height)?;
        self.record(Opcode::AddHexagon { position, radius, height });
        Ok(faces)
    }

    /// Adds a flat ring between `inner_radius` and `outer_radius`.
    ///
    /// Faces come as top, bottom, outer wall, inner wall. Segment limits
    /// match [`MeshGen::create_cylinder`].
    pub fn create_ring(
        &mut self,
        position: Vec3,
        outer_radius: f32,
        inner_radius: f32,
        height: f32,
        segments: u32,
    ) -> Result<Range<FaceId>> {
        let faces = self
            .mesh
            .create_ring(position, outer_radius, inner_radius, height, segments)?;
        self.record(Opcode::AddRing {
            position,
            outer_radius,
            inner_radius,
            height,
            segments,
        });
        Ok(faces)
    }

    /// Adds a torus, recorded as one `add_face` per quad.
    ///
    /// The quads are generated and checked against the face budget before
    /// any face is added.
    pub fn create_torus(
        &mut self,
        position: Vec3,
        major_radius: f32,
        minor_radius: f32,
        rings: u32,
        sides: u32,
    ) -> Result<Range<FaceId>> {
        let quads = torus_quads(position, major_radius, minor_radius, rings, sides)?;
        self.mesh.reserve_faces(quads.len())?;
        let start = self.mesh.face_count() as FaceId;
        for quad in quads {
            self.add_face(quad);
        }
        Ok(start..self.mesh.face_count() as FaceId)
    }

    /// Adds a flat `+y` grid, recorded as `add_face` followed by `slice`.
    ///
    /// ## Returns
    ///
    /// The grid cells row by row. An oversized grid fails before the base
    /// face is added, so nothing is recorded.
    pub fn create_grid(
        &mut self,
        position: Vec3,
        size: Vec2,
        segments_x: u32,
        segments_y: u32,
    ) -> Result<Vec<FaceId>> {
        self.mesh.check_grid_budget(segments_x, segments_y)?;
        let face = self.add_face(grid_quad(position, size));
        self.slice(face, segments_x, segments_y)
    }

    // =========================================================================
    // EDGE AND FACE OPERATIONS
    // =========================================================================

    /// Extrudes an edge by `offset`; recorded as `make_face`.
    pub fn extrude_edge(&mut self, edge: EdgeId, offset: Vec3) -> Result<FaceId> {
        let face = self.mesh.extrude_edge(edge, offset)?;
        self.record(Opcode::MakeFace { edge, offset });
        Ok(face)
    }

    /// Extrudes an edge by `distance` along its face's normal.
    pub fn extrude_edge_normal(&mut self, edge: EdgeId, distance: f32) -> Result<FaceId> {
        let face = self.mesh.extrude_edge_normal(edge, distance)?;
        self.record(Opcode::ExtrudeEdgeNormal { edge, distance });
        Ok(face)
    }

    /// Bridges two edges with a new face.
    ///
    /// ## Parameters
    ///
    /// - `edge_a`, `edge_b`: Edges to join; endpoints are paired so the
    ///   bridge does not cross itself, whatever the argument order
    ///
    /// ## Returns
    ///
    /// The bridging face, wound away from both source faces, or
    /// `IndexOutOfRange` if either edge is unknown.
    pub fn combine_edges(&mut self, edge_a: EdgeId, edge_b: EdgeId) -> Result<FaceId> {
        let face = self.mesh.combine_edges(edge_a, edge_b)?;
        self.record(Opcode::CombineEdges { edge_a, edge_b });
        Ok(face)
    }

    /// Extrudes a face along its normal. Returns the cap face.
    pub fn extrude_face(&mut self, face: FaceId, factor: f32) -> Result<FaceId> {
        let cap = self.mesh.extrude_face(face, factor)?;
        self.record(Opcode::ExtrudeFace { face, factor });
        Ok(cap)
    }

    /// Splits the face of `edge` parallel to it. Returns the new face.
    pub fn hsplit_edge(&mut self, edge: EdgeId, factor: f32) -> Result<FaceId> {
        let face = self.mesh.hsplit_edge(edge, factor)?;
        self.record(Opcode::HSplit { edge, factor });
        Ok(face)
    }

    /// Splits the face of `edge` across it. Returns the new face.
    pub fn vsplit_edge(&mut self, edge: EdgeId, factor: f32) -> Result<FaceId> {
        let face = self.mesh.vsplit_edge(edge, factor)?;
        self.record(Opcode::VSplit { edge, factor });
        Ok(face)
    }

    /// Quarters a face with one h-split and two v-splits.
    ///
    /// Returns the quarters with the original face first.
    pub fn subdivide(&mut self, face: FaceId) -> Result<[FaceId; 4]> {
        let first = self.mesh.face(face)?.edge;
        let upper = self.hsplit_edge(first, 0.5)?;
        let lower_left = self.vsplit_edge(first, 0.5)?;
        let upper_first = self.mesh.face(upper)?.edge;
        let upper_left = self.vsplit_edge(upper_first, 0.5)?;
        Ok([face, lower_left, upper, upper_left])
    }

    /// Cuts a face into a `segments_x` by `segments_y` grid.
    ///
    /// ## Returns
    ///
    /// Every cell, original face first. Counts above `MAX_SEGMENTS` fail
    /// with `LimitExceeded` and leave the face as it was.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use meshgen::{MeshGen, MeshGenError};
    /// use glam::Vec3;
    ///
    /// let mut session = MeshGen::new();
    /// let face = session.add_face([Vec3::ZERO, Vec3::X, Vec3::X + Vec3::Y, Vec3::Y]);
    /// assert_eq!(session.slice(face, 3, 2).unwrap().len(), 6);
    ///
    /// let err = session.slice(face, 65536, 65536).unwrap_err();
    /// assert!(matches!(err, MeshGenError::LimitExceeded { .. }));
    /// ```
    pub fn slice(&mut self, face: FaceId, segments_x: u32, segments_y: u32) -> Result<Vec<FaceId>> {
        let cells = self.mesh.slice(face, segments_x, segments_y)?;
        self.record(Opcode::Slice { face, segments_x, segments_y });
        Ok(cells)
    }

    /// Slices a face into `segments` by `segments` cells.
    pub fn slice_uniform(&mut self, face: FaceId, segments: u32) -> Result<Vec<FaceId>> {
        let cells = self.mesh.slice(face, segments, segments)?;
        self.record(Opcode::SliceUniform { face, segments });
        Ok(cells)
    }

    /// Scales a face's corners about its center.
    pub fn scale_face(&mut self, face: FaceId, factor: f32) -> Result<()> {
        self.mesh.scale_face(face, factor)?;
        self.record(Opcode::ScaleFace { face, factor });
        Ok(())
    }

    // =========================================================================
    // WELDED MOVES AND SMOOTHING
    // =========================================================================

    /// Moves every vertex coincident with `vertex` by `delta`.
    ///
    /// ## Parameters
    ///
    /// - `vertex`: Any vertex of the cluster; coincidence uses the session
    ///   tolerance
    /// - `delta`: Displacement applied once to each clustered vertex
    ///
    /// ## Returns
    ///
    /// `IndexOutOfRange` if `vertex` is unknown; nothing is recorded then.
    pub fn move_vertex(&mut self, vertex: VertexId, delta: Vec3) -> Result<()> {
        self.mesh.move_vertex(vertex, delta)?;
        self.record(Opcode::MoveVertex { vertex, delta });
        Ok(())
    }

    /// Welded move of both endpoints of an edge.
    pub fn move_edge(&mut self, edge: EdgeId, delta: Vec3) -> Result<()> {
        self.mesh.move_edge(edge, delta)?;
        self.record(Opcode::MoveEdge { edge, delta });
        Ok(())
    }

    /// Welded move of all four corners of a face.
    pub fn move_face(&mut self, face: FaceId, delta: Vec3) -> Result<()> {
        self.mesh.move_face(face, delta)?;
        self.record(Opcode::MoveFace { face, delta });
        Ok(())
    }

    /// Smooths `faces` around their centroid; recorded as one
    /// `move_vertex` per moved position.
    pub fn smooth(&mut self, faces: &[FaceId], radius: f32) -> Result<()> {
        let moves = self.mesh.smooth(faces, radius)?;
        for (vertex, delta) in moves {
            self.record(Opcode::MoveVertex { vertex, delta });
        }
        Ok(())
    }

    /// Smooths the connected patch containing `face`.
    pub fn smooth_connected(&mut self, face: FaceId, radius: f32) -> Result<()> {
        let mut faces = Vec::new();
        self.mesh.find_adjacent_faces(face, &mut faces)?;
        self.smooth(&faces, radius)
    }

    // =========================================================================
    // COLOR AND SELECTION
    // =========================================================================

    /// Sets one face's color, RGBA in `[0, 1]`.
    pub fn set_color(&mut self, face: FaceId, color: Vec4) -> Result<()> {
        self.mesh.set_color(face, color)?;
        self.record(Opcode::SetColor { face, color });
        Ok(())
    }

    /// Colors the selected faces; recorded as one `set_color` per face so
    /// replay does not depend on selection state.
    pub fn set_selection_color(&mut self, color: Vec4) -> Vec<FaceId> {
        let faces = self.mesh.set_selection_color(color);
        for face in &faces {
            self.record(Opcode::SetColor { face: *face, color });
        }
        faces
    }

    /// Colors the selected faces; recorded as `select_color`, which colors
    /// whatever is selected when the log is replayed.
    pub fn select_color(&mut self, color: Vec4) -> Vec<FaceId> {
        let faces = self.mesh.set_selection_color(color);
        self.record(Opcode::SelectColor { color });
        faces
    }

    /// Toggles selection of a face. Not recorded.
    pub fn select_face(&mut self, face: FaceId) -> Result<bool> {
        self.mesh.select_face(face)
    }

    /// Deselects every face. Not recorded.
    pub fn clear_selection(&mut self) {
        self.mesh.clear_selection();
    }

    /// Paints faces from the debug palette, cycling by face id.
    pub fn debug_colors(&mut self) {
        self.mesh.debug_colors();
        self.record(Opcode::DebugColors);
    }

    // =========================================================================
    // GROUPS
    // =========================================================================

    /// Opens a new group; faces added until [`MeshGen::end_group`] join it.
    ///
    /// ## Returns
    ///
    /// The group id. Ids count up from zero per session.
    pub fn start_group(&mut self) -> GroupId {
        let group = self.mesh.start_group();
        self.record(Opcode::StartGroup);
        group
    }

    /// Closes the open group. Later faces are ungrouped.
    pub fn end_group(&mut self) {
        self.mesh.end_group();
        self.record(Opcode::EndGroup);
    }

    /// Translates every vertex of a group.
    pub fn move_group(&mut self, group: GroupId, delta: Vec3) -> Result<()> {
        self.mesh.move_group(group, delta)?;
        self.record(Opcode::MoveGroup { group, delta });
        Ok(())
    }

    /// Rotates a group about the centroid of its vertices.
    pub fn rotate_group(&mut self, group: GroupId, rotation: Vec3) -> Result<()> {
        self.mesh.rotate_group(group, rotation)?;
        self.record(Opcode::RotateGroup { group, rotation });
        Ok(())
    }

    /// Copies a group's faces, displaced by `offset`, into a new group.
    ///
    /// ## Returns
    ///
    /// The new group id. Fails with `LimitExceeded` if the copy would pass
    /// the face budget.
    pub fn copy_group(&mut self, group: GroupId, offset: Vec3) -> Result<GroupId> {
        let copy = self.mesh.copy_group(group, offset)?;
        self.record(Opcode::CopyGroup { group, offset });
        Ok(copy)
    }

    // =========================================================================
    // REPLAY
    // =========================================================================

    /// Applies one opcode through the matching recording method.
    ///
    /// Opcodes that add a fixed number of faces are checked against the
    /// face budget first; bulk opcodes check their own totals.
    ///
    /// ## Returns
    ///
    /// The store error of the underlying call, or `LimitExceeded` when the
    /// mesh has no room left. A failed opcode is not recorded.
    pub fn execute_opcode(&mut self, opcode: &Opcode) -> Result<()> {
        self.mesh.reserve_faces(fixed_face_cost(opcode))?;
        match *opcode {
            Opcode::AddCube { position, size } => {
                self.add_cube(position, size);
            }
            Opcode::AddCubeRot { position, size, rotation } => {
                self.add_cube_rot(position, size, rotation);
            }
            Opcode::SetColor { face, color } => self.set_color(face, color)?,
            Opcode::SliceUniform { face, segments } => {
                self.slice_uniform(face, segments)?;
            }
            Opcode::Slice { face, segments_x, segments_y } => {
                self.slice(face, segments_x, segments_y)?;
            }
            Opcode::MoveEdge { edge, delta } => self.move_edge(edge, delta)?,
            Opcode::VSplit { edge, factor } => {
                self.vsplit_edge(edge, factor)?;
            }
            Opcode::HSplit { edge, factor } => {
                self.hsplit_edge(edge, factor)?;
            }
            Opcode::MakeFace { edge, offset } => {
                self.extrude_edge(edge, offset)?;
            }
            Opcode::AddFace { corners } => {
                self.add_face(corners);
            }
            Opcode::CombineEdges { edge_a, edge_b } => {
                self.combine_edges(edge_a, edge_b)?;
            }
            Opcode::DebugColors => self.debug_colors(),
            Opcode::ExtrudeFace { face, factor } => {
                self.extrude_face(face, factor)?;
            }
            Opcode::ScaleFace { face, factor } => self.scale_face(face, factor)?,
            Opcode::AddColorCube { position, size, color } => {
                self.add_color_cube(position, size, color);
            }
            Opcode::AddCylinder { position, radius, height, segments } => {
                self.create_cylinder(position, radius, height, segments)?;
            }
            Opcode::AddColCylinder { position, radius, height, segments, color } => {
                self.create_color_cylinder(position, radius, height, segments, color)?;
            }
            Opcode::MoveVertex { vertex, delta } => self.move_vertex(vertex, delta)?,
            Opcode::AddHexagon { position, radius, height } => {
                self.create_hexagon(position, radius, height)?;
            }
            Opcode::MoveFace { face, delta } => self.move_face(face, delta)?,
            Opcode::ExtrudeEdgeNormal { edge, distance } => {
                self.extrude_edge_normal(edge, distance)?;
            }
            Opcode::AddRing { position, outer_radius, inner_radius, height, segments } => {
                self.create_ring(position, outer_radius, inner_radius, height, segments)?;
            }
            Opcode::SelectColor { color } => {
                self.select_color(color);
            }
            Opcode::StartGroup => {
                self.start_group();
            }
            Opcode::EndGroup => self.end_group(),
            Opcode::RotateGroup { group, rotation } => self.rotate_group(group, rotation)?,
            Opcode::MoveGroup { group, delta } => self.move_group(group, delta)?,
            Opcode::CopyGroup { group, offset } => {
                self.copy_group(group, offset)?;
            }
        }
        Ok(())
    }

    /// Replays every entry of `log`, stopping at the first failure.
    ///
    /// Returns the number of opcodes applied. Replayed opcodes are recorded
    /// into this session's own log.
    pub fn execute_opcodes(&mut self, log: &OpcodeLog) -> Result<usize> {
        let mut applied = 0;
        for opcode in log.iter() {
            self.execute_opcode(&opcode?)?;
            applied += 1;
        }
        debug!(
            "replayed {} opcodes ({} faces)",
            applied,
            self.mesh.face_count()
        );
        Ok(applied)
    }
}

/// Faces an opcode adds when that count does not depend on its arguments.
fn fixed_face_cost(opcode: &Opcode) -> usize {
    match opcode {
        Opcode::AddCube { .. } | Opcode::AddCubeRot { .. } | Opcode::AddColorCube { .. } => 6,
        Opcode::ExtrudeFace { .. } => 5,
        Opcode::AddFace { .. }
        | Opcode::MakeFace { .. }
        | Opcode::ExtrudeEdgeNormal { .. }
        | Opcode::CombineEdges { .. }
        | Opcode::HSplit { .. }
        | Opcode::VSplit { .. } => 1,
        _ => 0,
    }
}
