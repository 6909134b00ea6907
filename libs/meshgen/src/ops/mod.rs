//! # Mesh Operations
//!
//! Geometry operations on the [`QuadMesh`](crate::QuadMesh) store: extrusion
//! and edge combination, splitting and slicing, welded moves and group
//! transforms, smoothing, adjacency and ray picking.
//!
//! These operate on the store only; recording into the opcode log happens
//! one level up in [`MeshGen`](crate::MeshGen).

pub mod adjacency;
pub mod extrude;
pub mod smooth;
pub mod split;
pub mod transform;

pub use extrude::is_clockwise;
pub use smooth::smooth_projection;
