//! # Opcode Catalog
//!
//! Static table mapping opcode name, numeric type and argument kinds. The
//! table is the schema for both the flat [`DataStore`](super::DataStore)
//! encoding and the text script format, so names and argument order are
//! frozen.

use super::{ArgKind, OpcodeType};

use ArgKind::{Color, Float, Int, Vec3};

/// Catalog entry describing one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeSpec {
    /// Opcode type.
    pub op_type: OpcodeType,
    /// Script name.
    pub name: &'static str,
    /// Argument kinds in storage order.
    pub args: &'static [ArgKind],
}

impl OpcodeSpec {
    /// Number of arguments.
    #[inline]
    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// Number of `f32` slots the arguments occupy.
    pub fn slot_count(&self) -> usize {
        self.args.iter().map(|kind| kind.slots()).sum()
    }
}

const fn entry(op_type: OpcodeType, name: &'static str, args: &'static [ArgKind]) -> OpcodeSpec {
    OpcodeSpec { op_type, name, args }
}

/// Every opcode, indexed by its numeric type.
pub static CATALOG: [OpcodeSpec; OpcodeType::COUNT] = [
    entry(OpcodeType::AddCube, "add_cube", &[Vec3, Vec3]),
    entry(OpcodeType::AddCubeRot, "add_cube_rot", &[Vec3, Vec3, Vec3]),
    entry(OpcodeType::SetColor, "set_color", &[Int, Color]),
    entry(OpcodeType::SliceUniform, "slice_uniform", &[Int, Int]),
    entry(OpcodeType::Slice, "slice", &[Int, Int, Int]),
    entry(OpcodeType::MoveEdge, "move_edge", &[Int, Vec3]),
    entry(OpcodeType::VSplit, "v_split", &[Int, Float]),
    entry(OpcodeType::HSplit, "h_split", &[Int, Float]),
    entry(OpcodeType::MakeFace, "make_face", &[Int, Vec3]),
    entry(OpcodeType::AddFace, "add_face", &[Vec3, Vec3, Vec3, Vec3]),
    entry(OpcodeType::CombineEdges, "combine_edges", &[Int, Int]),
    entry(OpcodeType::DebugColors, "debug_colors", &[]),
    entry(OpcodeType::ExtrudeFace, "extrude_face", &[Int, Float]),
    entry(OpcodeType::ScaleFace, "scale_face", &[Int, Float]),
    entry(OpcodeType::AddColorCube, "add_color_cube", &[Vec3, Vec3, Color]),
    entry(OpcodeType::AddCylinder, "add_cylinder", &[Vec3, Float, Float, Int]),
    entry(OpcodeType::AddColCylinder, "add_col_cylinder", &[Vec3, Float, Float, Int, Color]),
    entry(OpcodeType::MoveVertex, "move_vertex", &[Int, Vec3]),
    entry(OpcodeType::AddHexagon, "add_hexagon", &[Vec3, Float, Float]),
    entry(OpcodeType::MoveFace, "move_face", &[Int, Vec3]),
    entry(OpcodeType::ExtrudeEdgeNormal, "extrude_edge_normal", &[Int, Float]),
    entry(OpcodeType::AddRing, "add_ring", &[Vec3, Float, Float, Float, Int]),
    entry(OpcodeType::SelectColor, "select_color", &[Color]),
    entry(OpcodeType::StartGroup, "start_group", &[]),
    entry(OpcodeType::EndGroup, "end_group", &[]),
    entry(OpcodeType::RotateGroup, "rotate_group", &[Int, Vec3]),
    entry(OpcodeType::MoveGroup, "move_group", &[Int, Vec3]),
    entry(OpcodeType::CopyGroup, "copy_group", &[Int, Vec3]),
];

/// Returns the catalog entry of an opcode type.
#[inline]
pub fn spec(op_type: OpcodeType) -> &'static OpcodeSpec {
    &CATALOG[op_type as usize]
}

/// Looks up a catalog entry by script name.
pub fn lookup(name: &str) -> Option<&'static OpcodeSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}
