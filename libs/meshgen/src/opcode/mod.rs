//! # Opcodes
//!
//! Every mutating call on a [`MeshGen`](crate::MeshGen) session is recorded
//! as an [`Opcode`]: a typed description of the call that can be replayed
//! against a fresh session. The [`catalog`] gives each opcode its stable name
//! and argument schema; the [`OpcodeLog`] stores recorded opcodes as a flat
//! float buffer following that schema.
//!
//! ## Example
//!
//! ```rust
//! use meshgen::opcode::{Opcode, OpcodeLog, OpcodeType};
//! use glam::Vec3;
//!
//! let mut log = OpcodeLog::new();
//! log.record(&Opcode::AddCube { position: Vec3::ZERO, size: Vec3::ONE });
//! assert_eq!(log.entries()[0].op_type, OpcodeType::AddCube);
//! assert_eq!(log.data().len(), 6);
//! ```

pub mod catalog;
mod history;

pub use catalog::{lookup, spec, OpcodeSpec, CATALOG};
pub use history::{DataStore, OpcodeEntry, OpcodeLog};

use crate::mesh::{EdgeId, FaceId, GroupId, VertexId};
use glam::{Vec3, Vec4};

// =============================================================================
// ARGUMENTS
// =============================================================================

/// Storage kind of one opcode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// One float slot.
    Float,
    /// Three float slots.
    Vec3,
    /// One slot holding a truncated integer.
    Int,
    /// Four float slots, RGBA in [0, 1].
    Color,
}

impl ArgKind {
    /// Number of `f32` slots this kind occupies.
    #[inline]
    pub const fn slots(self) -> usize {
        match self {
            ArgKind::Float | ArgKind::Int => 1,
            ArgKind::Vec3 => 3,
            ArgKind::Color => 4,
        }
    }
}

/// One decoded argument value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArgValue {
    Float(f32),
    Vec3(Vec3),
    Int(i64),
    Color(Vec4),
}

impl ArgValue {
    /// Returns the storage kind of this value.
    pub fn kind(&self) -> ArgKind {
        match self {
            ArgValue::Float(_) => ArgKind::Float,
            ArgValue::Vec3(_) => ArgKind::Vec3,
            ArgValue::Int(_) => ArgKind::Int,
            ArgValue::Color(_) => ArgKind::Color,
        }
    }

    /// Reads a value of `kind` from exactly `kind.slots()` slots.
    pub fn from_slots(kind: ArgKind, slots: &[f32]) -> Self {
        match kind {
            ArgKind::Float => ArgValue::Float(slots[0]),
            ArgKind::Vec3 => ArgValue::Vec3(Vec3::from_slice(slots)),
            ArgKind::Int => ArgValue::Int(slots[0] as i64),
            ArgKind::Color => ArgValue::Color(Vec4::from_slice(slots)),
        }
    }

    /// Appends this value's slots.
    pub fn write_slots(&self, out: &mut Vec<f32>) {
        match self {
            ArgValue::Float(value) => out.push(*value),
            ArgValue::Vec3(value) => out.extend_from_slice(&value.to_array()),
            ArgValue::Int(value) => out.push(*value as f32),
            ArgValue::Color(value) => out.extend_from_slice(&value.to_array()),
        }
    }
}

// =============================================================================
// OPCODE TYPE
// =============================================================================

/// Numeric opcode type; the discriminant is the catalog index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum OpcodeType {
    AddCube = 0,
    AddCubeRot,
    SetColor,
    SliceUniform,
    Slice,
    MoveEdge,
    VSplit,
    HSplit,
    MakeFace,
    AddFace,
    CombineEdges,
    DebugColors,
    ExtrudeFace,
    ScaleFace,
    AddColorCube,
    AddCylinder,
    AddColCylinder,
    MoveVertex,
    AddHexagon,
    MoveFace,
    ExtrudeEdgeNormal,
    AddRing,
    SelectColor,
    StartGroup,
    EndGroup,
    RotateGroup,
    MoveGroup,
    CopyGroup,
}

impl OpcodeType {
    /// Number of opcode types.
    pub const COUNT: usize = 28;

    /// Numeric id of this type.
    #[inline]
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Converts a numeric id back into a type.
    pub fn from_id(id: u32) -> Option<Self> {
        CATALOG.get(id as usize).map(|spec| spec.op_type)
    }

    /// Catalog entry of this type.
    #[inline]
    pub fn spec(self) -> &'static OpcodeSpec {
        catalog::spec(self)
    }

    /// Script name of this type.
    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

// =============================================================================
// OPCODE
// =============================================================================

/// A recorded, replayable geometry call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Opcode {
    AddCube { position: Vec3, size: Vec3 },
    AddCubeRot { position: Vec3, size: Vec3, rotation: Vec3 },
    SetColor { face: FaceId, color: Vec4 },
    SliceUniform { face: FaceId, segments: u32 },
    Slice { face: FaceId, segments_x: u32, segments_y: u32 },
    MoveEdge { edge: EdgeId, delta: Vec3 },
    VSplit { edge: EdgeId, factor: f32 },
    HSplit { edge: EdgeId, factor: f32 },
    /// Extrudes an edge by an explicit offset.
    MakeFace { edge: EdgeId, offset: Vec3 },
    AddFace { corners: [Vec3; 4] },
    CombineEdges { edge_a: EdgeId, edge_b: EdgeId },
    DebugColors,
    ExtrudeFace { face: FaceId, factor: f32 },
    ScaleFace { face: FaceId, factor: f32 },
    AddColorCube { position: Vec3, size: Vec3, color: Vec4 },
    AddCylinder { position: Vec3, radius: f32, height: f32, segments: u32 },
    AddColCylinder { position: Vec3, radius: f32, height: f32, segments: u32, color: Vec4 },
    MoveVertex { vertex: VertexId, delta: Vec3 },
    AddHexagon { position: Vec3, radius: f32, height: f32 },
    MoveFace { face: FaceId, delta: Vec3 },
    ExtrudeEdgeNormal { edge: EdgeId, distance: f32 },
    AddRing { position: Vec3, outer_radius: f32, inner_radius: f32, height: f32, segments: u32 },
    /// Colors the current selection.
    SelectColor { color: Vec4 },
    StartGroup,
    EndGroup,
    RotateGroup { group: GroupId, rotation: Vec3 },
    MoveGroup { group: GroupId, delta: Vec3 },
    CopyGroup { group: GroupId, offset: Vec3 },
}

impl Opcode {
    /// Returns the type tag of this opcode.
    pub fn op_type(&self) -> OpcodeType {
        match self {
            Opcode::AddCube { .. } => OpcodeType::AddCube,
            Opcode::AddCubeRot { .. } => OpcodeType::AddCubeRot,
            Opcode::SetColor { .. } => OpcodeType::SetColor,
            Opcode::SliceUniform { .. } => OpcodeType::SliceUniform,
            Opcode::Slice { .. } => OpcodeType::Slice,
            Opcode::MoveEdge { .. } => OpcodeType::MoveEdge,
            Opcode::VSplit { .. } => OpcodeType::VSplit,
            Opcode::HSplit { .. } => OpcodeType::HSplit,
            Opcode::MakeFace { .. } => OpcodeType::MakeFace,
            Opcode::AddFace { .. } => OpcodeType::AddFace,
            Opcode::CombineEdges { .. } => OpcodeType::CombineEdges,
            Opcode::DebugColors => OpcodeType::DebugColors,
            Opcode::ExtrudeFace { .. } => OpcodeType::ExtrudeFace,
            Opcode::ScaleFace { .. } => OpcodeType::ScaleFace,
            Opcode::AddColorCube { .. } => OpcodeType::AddColorCube,
            Opcode::AddCylinder { .. } => OpcodeType::AddCylinder,
            Opcode::AddColCylinder { .. } => OpcodeType::AddColCylinder,
            Opcode::MoveVertex { .. } => OpcodeType::MoveVertex,
            Opcode::AddHexagon { .. } => OpcodeType::AddHexagon,
            Opcode::MoveFace { .. } => OpcodeType::MoveFace,
            Opcode::ExtrudeEdgeNormal { .. } => OpcodeType::ExtrudeEdgeNormal,
            Opcode::AddRing { .. } => OpcodeType::AddRing,
            Opcode::SelectColor { .. } => OpcodeType::SelectColor,
            Opcode::StartGroup => OpcodeType::StartGroup,
            Opcode::EndGroup => OpcodeType::EndGroup,
            Opcode::RotateGroup { .. } => OpcodeType::RotateGroup,
            Opcode::MoveGroup { .. } => OpcodeType::MoveGroup,
            Opcode::CopyGroup { .. } => OpcodeType::CopyGroup,
        }
    }

    /// Returns the arguments in catalog order.
    pub fn args(&self) -> Vec<ArgValue> {
        use ArgValue::{Color, Float, Int, Vec3 as V3};

        let id = |value: u32| Int(i64::from(value));
        let group = |value: GroupId| Int(i64::from(value));

        match *self {
            Opcode::AddCube { position, size } => vec![V3(position), V3(size)],
            Opcode::AddCubeRot { position, size, rotation } => {
                vec![V3(position), V3(size), V3(rotation)]
            }
            Opcode::SetColor { face, color } => vec![id(face), Color(color)],
            Opcode::SliceUniform { face, segments } => vec![id(face), id(segments)],
            Opcode::Slice { face, segments_x, segments_y } => {
                vec![id(face), id(segments_x), id(segments_y)]
            }
            Opcode::MoveEdge { edge, delta } => vec![id(edge), V3(delta)],
            Opcode::VSplit { edge, factor } => vec![id(edge), Float(factor)],
            Opcode::HSplit { edge, factor } => vec![id(edge), Float(factor)],
            Opcode::MakeFace { edge, offset } => vec![id(edge), V3(offset)],
            Opcode::AddFace { corners } => corners.iter().map(|c| V3(*c)).collect(),
            Opcode::CombineEdges { edge_a, edge_b } => vec![id(edge_a), id(edge_b)],
            Opcode::DebugColors => Vec::new(),
            Opcode::ExtrudeFace { face, factor } => vec![id(face), Float(factor)],
            Opcode::ScaleFace { face, factor } => vec![id(face), Float(factor)],
            Opcode::AddColorCube { position, size, color } => {
                vec![V3(position), V3(size), Color(color)]
            }
            Opcode::AddCylinder { position, radius, height, segments } => {
                vec![V3(position), Float(radius), Float(height), id(segments)]
            }
            Opcode::AddColCylinder { position, radius, height, segments, color } => vec![
                V3(position),
                Float(radius),
                Float(height),
                id(segments),
                Color(color),
            ],
            Opcode::MoveVertex { vertex, delta } => vec![id(vertex), V3(delta)],
            Opcode::AddHexagon { position, radius, height } => {
                vec![V3(position), Float(radius), Float(height)]
            }
            Opcode::MoveFace { face, delta } => vec![id(face), V3(delta)],
            Opcode::ExtrudeEdgeNormal { edge, distance } => vec![id(edge), Float(distance)],
            Opcode::AddRing { position, outer_radius, inner_radius, height, segments } => vec![
                V3(position),
                Float(outer_radius),
                Float(inner_radius),
                Float(height),
                id(segments),
            ],
            Opcode::SelectColor { color } => vec![Color(color)],
            Opcode::StartGroup => Vec::new(),
            Opcode::EndGroup => Vec::new(),
            Opcode::RotateGroup { group: g, rotation } => vec![group(g), V3(rotation)],
            Opcode::MoveGroup { group: g, delta } => vec![group(g), V3(delta)],
            Opcode::CopyGroup { group: g, offset } => vec![group(g), V3(offset)],
        }
    }

    /// Builds an opcode from arguments in catalog order.
    ///
    /// Returns `None` when the values do not match the catalog schema.
    pub fn from_args(op_type: OpcodeType, args: &[ArgValue]) -> Option<Self> {
        let kinds: Vec<ArgKind> = args.iter().map(ArgValue::kind).collect();
        if kinds.as_slice() != op_type.spec().args {
            return None;
        }

        let mut args = ArgCursor { args, next: 0 };
        let opcode = match op_type {
            OpcodeType::AddCube => Opcode::AddCube {
                position: args.vec3()?,
                size: args.vec3()?,
            },
            OpcodeType::AddCubeRot => Opcode::AddCubeRot {
                position: args.vec3()?,
                size: args.vec3()?,
                rotation: args.vec3()?,
            },
            OpcodeType::SetColor => Opcode::SetColor {
                face: args.id()?,
                color: args.color()?,
            },
            OpcodeType::SliceUniform => Opcode::SliceUniform {
                face: args.id()?,
                segments: args.count()?,
            },
            OpcodeType::Slice => Opcode::Slice {
                face: args.id()?,
                segments_x: args.count()?,
                segments_y: args.count()?,
            },
            OpcodeType::MoveEdge => Opcode::MoveEdge {
                edge: args.id()?,
                delta: args.vec3()?,
            },
            OpcodeType::VSplit => Opcode::VSplit {
                edge: args.id()?,
                factor: args.float()?,
            },
            OpcodeType::HSplit => Opcode::HSplit {
                edge: args.id()?,
                factor: args.float()?,
            },
            OpcodeType::MakeFace => Opcode::MakeFace {
                edge: args.id()?,
                offset: args.vec3()?,
            },
            OpcodeType::AddFace => Opcode::AddFace {
                corners: [args.vec3()?, args.vec3()?, args.vec3()?, args.vec3()?],
            },
            OpcodeType::CombineEdges => Opcode::CombineEdges {
                edge_a: args.id()?,
                edge_b: args.id()?,
            },
            OpcodeType::DebugColors => Opcode::DebugColors,
            OpcodeType::ExtrudeFace => Opcode::ExtrudeFace {
                face: args.id()?,
                factor: args.float()?,
            },
            OpcodeType::ScaleFace => Opcode::ScaleFace {
                face: args.id()?,
                factor: args.float()?,
            },
            OpcodeType::AddColorCube => Opcode::AddColorCube {
                position: args.vec3()?,
                size: args.vec3()?,
                color: args.color()?,
            },
            OpcodeType::AddCylinder => Opcode::AddCylinder {
                position: args.vec3()?,
                radius: args.float()?,
                height: args.float()?,
                segments: args.count()?,
            },
            OpcodeType::AddColCylinder => Opcode::AddColCylinder {
                position: args.vec3()?,
                radius: args.float()?,
                height: args.float()?,
                segments: args.count()?,
                color: args.color()?,
            },
            OpcodeType::MoveVertex => Opcode::MoveVertex {
                vertex: args.id()?,
                delta: args.vec3()?,
            },
            OpcodeType::AddHexagon => Opcode::AddHexagon {
                position: args.vec3()?,
                radius: args.float()?,
                height: args.float()?,
            },
            OpcodeType::MoveFace => Opcode::MoveFace {
                face: args.id()?,
                delta: args.vec3()?,
            },
            OpcodeType::ExtrudeEdgeNormal => Opcode::ExtrudeEdgeNormal {
                edge: args.id()?,
                distance: args.float()?,
            },
            OpcodeType::AddRing => Opcode::AddRing {
                position: args.vec3()?,
                outer_radius: args.float()?,
                inner_radius: args.float()?,
                height: args.float()?,
                segments: args.count()?,
            },
            OpcodeType::SelectColor => Opcode::SelectColor {
                color: args.color()?,
            },
            OpcodeType::StartGroup => Opcode::StartGroup,
            OpcodeType::EndGroup => Opcode::EndGroup,
            OpcodeType::RotateGroup => Opcode::RotateGroup {
                group: args.group()?,
                rotation: args.vec3()?,
            },
            OpcodeType::MoveGroup => Opcode::MoveGroup {
                group: args.group()?,
                delta: args.vec3()?,
            },
            OpcodeType::CopyGroup => Opcode::CopyGroup {
                group: args.group()?,
                offset: args.vec3()?,
            },
        };
        Some(opcode)
    }

    /// Decodes an opcode from its slots.
    ///
    /// Returns `None` when the slot count does not match the catalog.
    pub fn decode(op_type: OpcodeType, slots: &[f32]) -> Option<Self> {
        let spec = op_type.spec();
        if slots.len() != spec.slot_count() {
            return None;
        }
        let mut at = 0;
        let mut values = Vec::with_capacity(spec.arg_count());
        for kind in spec.args {
            values.push(ArgValue::from_slots(*kind, &slots[at..at + kind.slots()]));
            at += kind.slots();
        }
        Self::from_args(op_type, &values)
    }

    /// Appends this opcode's slots.
    pub fn encode(&self, out: &mut Vec<f32>) {
        for value in self.args() {
            value.write_slots(out);
        }
    }
}

/// Sequential reader over catalog-ordered arguments. Each accessor yields
/// `None` when the next value has another kind or the values run out.
struct ArgCursor<'a> {
    args: &'a [ArgValue],
    next: usize,
}

impl ArgCursor<'_> {
    fn take(&mut self) -> Option<ArgValue> {
        let value = *self.args.get(self.next)?;
        self.next += 1;
        Some(value)
    }

    fn float(&mut self) -> Option<f32> {
        match self.take()? {
            ArgValue::Float(value) => Some(value),
            _ => None,
        }
    }

    fn vec3(&mut self) -> Option<Vec3> {
        match self.take()? {
            ArgValue::Vec3(value) => Some(value),
            _ => None,
        }
    }

    fn color(&mut self) -> Option<Vec4> {
        match self.take()? {
            ArgValue::Color(value) => Some(value),
            _ => None,
        }
    }

    fn int(&mut self) -> Option<i64> {
        match self.take()? {
            ArgValue::Int(value) => Some(value),
            _ => None,
        }
    }

    /// Element ids; negative values map to `u32::MAX`, which never names
    /// an element and so fails the range check at replay.
    fn id(&mut self) -> Option<u32> {
        Some(u32::try_from(self.int()?).unwrap_or(u32::MAX))
    }

    /// Segment counts; negative values clamp to zero.
    fn count(&mut self) -> Option<u32> {
        Some(self.int()?.clamp(0, i64::from(u32::MAX)) as u32)
    }

    fn group(&mut self) -> Option<GroupId> {
        Some(self.int()?.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as GroupId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_round_trips_through_slots() {
        let samples = [
            Opcode::AddCubeRot {
                position: Vec3::new(1.0, 2.0, 3.0),
                size: Vec3::ONE,
                rotation: Vec3::new(0.0, 0.5, 0.0),
            },
            Opcode::SetColor { face: 7, color: Vec4::new(1.0, 0.0, 0.0, 1.0) },
            Opcode::Slice { face: 2, segments_x: 3, segments_y: 4 },
            Opcode::AddFace { corners: [Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y] },
            Opcode::AddRing {
                position: Vec3::ZERO,
                outer_radius: 2.0,
                inner_radius: 1.0,
                height: 0.5,
                segments: 12,
            },
            Opcode::RotateGroup { group: 3, rotation: Vec3::Y },
            Opcode::EndGroup,
        ];
        for opcode in samples {
            let mut slots = Vec::new();
            opcode.encode(&mut slots);
            assert_eq!(slots.len(), opcode.op_type().spec().slot_count());
            assert_eq!(Opcode::decode(opcode.op_type(), &slots), Some(opcode));
        }
    }

    #[test]
    fn test_decode_rejects_wrong_width() {
        assert_eq!(Opcode::decode(OpcodeType::AddCube, &[0.0; 5]), None);
        assert_eq!(Opcode::decode(OpcodeType::StartGroup, &[1.0]), None);
    }

    #[test]
    fn test_from_args_rejects_wrong_kinds() {
        let args = [ArgValue::Float(1.0), ArgValue::Float(2.0)];
        assert_eq!(Opcode::from_args(OpcodeType::ExtrudeFace, &args), None);
    }

    #[test]
    fn test_arg_cursor_reports_mismatch() {
        let values = [ArgValue::Int(-4), ArgValue::Float(0.5)];
        let mut cursor = ArgCursor { args: &values, next: 0 };
        assert_eq!(cursor.vec3(), None);
        assert_eq!(cursor.float(), Some(0.5));
        assert_eq!(cursor.int(), None);

        let mut cursor = ArgCursor { args: &values, next: 0 };
        assert_eq!(cursor.id(), Some(u32::MAX));
        assert_eq!(cursor.count(), None);
    }

    #[test]
    fn test_int_slots_truncate() {
        let opcode = Opcode::decode(OpcodeType::ExtrudeFace, &[2.9, 1.5]).unwrap();
        assert_eq!(opcode, Opcode::ExtrudeFace { face: 2, factor: 1.5 });
    }

    #[test]
    fn test_negative_ids_never_name_an_element() {
        let opcode = Opcode::decode(OpcodeType::MoveFace, &[-1.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(opcode, Opcode::MoveFace { face: u32::MAX, delta: Vec3::ZERO });
    }

    #[test]
    fn test_type_ids() {
        assert_eq!(OpcodeType::AddCube.id(), 0);
        assert_eq!(OpcodeType::CopyGroup.id(), 27);
        assert_eq!(OpcodeType::from_id(28), None);
        assert_eq!(OpcodeType::ExtrudeEdgeNormal.name(), "extrude_edge_normal");
    }
}
