//! # MeshGen
//!
//! Procedural quad mesh generation with a replayable opcode log.
//!
//! ## Architecture
//!
//! ```text
//! MeshGen session ──► QuadMesh store ──► build(sink) / .mesh export
//!        │
//!        └──► OpcodeLog (typed opcodes over a flat float DataStore)
//! ```
//!
//! - **Mesh Store**: quad faces with a 4-edge cycle each; neighbouring
//!   faces are related by coincident vertex positions, not shared slots
//! - **Geometry Operations**: extrude, split, slice, combine, welded moves,
//!   groups, smoothing, ray picking and primitives
//! - **Opcode Log**: every mutating call through [`MeshGen`] is recorded
//!   and can be replayed with [`MeshGen::execute_opcodes`]
//! - **Export**: a flat quad-vertex stream, in memory or as a `.mesh` file
//!
//! ## Usage
//!
//! ```rust
//! use meshgen::MeshGen;
//! use glam::{Vec3, Vec4};
//!
//! let mut session = MeshGen::new();
//! let faces = session.add_cube(Vec3::ZERO, Vec3::ONE);
//! session.set_color(faces.start, Vec4::new(1.0, 0.0, 0.0, 1.0)).unwrap();
//!
//! let mut vertices = Vec::new();
//! session.build(&mut vertices);
//! assert_eq!(vertices.len(), 24);
//! ```

pub mod error;
pub mod export;
pub mod mesh;
pub mod opcode;
pub mod ops;
pub mod primitives;
pub mod session;

pub use error::{ElementKind, MeshGenError, Result};
pub use export::{read_mesh, MeshSink, MeshVertex};
pub use mesh::{quad_normal, Edge, EdgeId, Face, FaceId, GroupId, QuadMesh, VertexId};
pub use opcode::{ArgKind, ArgValue, Opcode, OpcodeLog, OpcodeType};
pub use session::MeshGen;
