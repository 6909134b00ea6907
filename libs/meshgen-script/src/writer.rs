//! # Script Writer
//!
//! Encodes an [`OpcodeLog`] as text, one `name arg arg ...` line per
//! entry. Floats use the shortest representation that reads back to the
//! same `f32`, vectors are comma-joined without spaces, ints print as
//! integers and colors are scaled to `[0, 255]`.

use config::constants::COLOR_SCALE;
use log::warn;
use meshgen::{ArgKind, OpcodeLog};
use std::fmt::Write;

/// Writes every entry of `log` as a script.
///
/// Entries whose slots cannot be read are left out with a warning.
///
/// ## Example
///
/// ```rust
/// use meshgen::MeshGen;
/// use meshgen_script::write_script;
/// use glam::Vec3;
///
/// let mut session = MeshGen::new();
/// session.add_cube(Vec3::ZERO, Vec3::new(1.0, 2.5, 1.0));
/// assert_eq!(write_script(session.log()), "add_cube 0,0,0 1,2.5,1\n");
/// ```
pub fn write_script(log: &OpcodeLog) -> String {
    let mut out = String::new();
    for (index, entry) in log.entries().iter().enumerate() {
        let slots = match log.get_data(entry) {
            Ok(slots) => slots,
            Err(error) => {
                warn!("not writing opcode {}: {}", index, error);
                continue;
            }
        };
        let spec = entry.op_type.spec();
        out.push_str(spec.name);

        let mut at = 0;
        for kind in spec.args {
            let width = kind.slots();
            out.push(' ');
            write_arg(&mut out, *kind, &slots[at..at + width]);
            at += width;
        }
        out.push('\n');
    }
    out
}

fn write_arg(out: &mut String, kind: ArgKind, slots: &[f32]) {
    match kind {
        ArgKind::Float | ArgKind::Vec3 => write_joined(out, slots, 1.0),
        ArgKind::Int => {
            let _ = write!(out, "{}", slots[0] as i64);
        }
        ArgKind::Color => write_joined(out, slots, COLOR_SCALE),
    }
}

fn write_joined(out: &mut String, slots: &[f32], scale: f32) {
    for (i, value) in slots.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", value * scale);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};
    use meshgen::{Opcode, OpcodeType};

    fn script_of(opcodes: &[Opcode]) -> String {
        let mut log = OpcodeLog::new();
        for opcode in opcodes {
            log.record(opcode);
        }
        write_script(&log)
    }

    #[test]
    fn test_write_argument_kinds() {
        let script = script_of(&[
            Opcode::SetColor {
                face: 3,
                color: Vec4::new(1.0, 0.5, 0.0, 1.0),
            },
            Opcode::AddCylinder {
                position: Vec3::new(-1.5, 0.0, 2.0),
                radius: 0.25,
                height: 3.0,
                segments: 12,
            },
            Opcode::DebugColors,
            Opcode::RotateGroup {
                group: 0,
                rotation: Vec3::new(0.1, 0.0, 0.0),
            },
        ]);
        assert_eq!(
            script,
            "set_color 3 255,127.5,0,255\n\
             add_cylinder -1.5,0,2 0.25 3 12\n\
             debug_colors\n\
             rotate_group 0 0.1,0,0\n"
        );
    }

    #[test]
    fn test_write_then_parse_reproduces_slots() {
        let mut log = OpcodeLog::new();
        log.record(&Opcode::AddRing {
            position: Vec3::new(0.3, -7.25, 1e-3),
            outer_radius: 2.0 / 3.0,
            inner_radius: 0.1,
            height: 1.0,
            segments: 9,
        });
        log.record(&Opcode::Slice {
            face: 2,
            segments_x: 3,
            segments_y: 2,
        });
        let parsed = crate::parse_script(&write_script(&log));
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.log.data().as_slice(), log.data().as_slice());
    }

    #[test]
    fn test_truncated_entry_is_left_out() {
        let mut log = OpcodeLog::new();
        log.record(&Opcode::EndGroup);
        log.push_raw(OpcodeType::MoveFace, &[1.0]);
        assert_eq!(write_script(&log), "end_group\n");
    }
}
