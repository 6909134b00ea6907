//! # Config Crate
//!
//! Centralized configuration constants for the quad mesh generation kernel.
//! Matching tolerances, default face attributes and asset locations are
//! defined here so the mesh and script crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{KernelConfig, VERTEX_EPSILON};
//!
//! let delta: f32 = 5e-7;
//! assert!(delta.abs() <= VERTEX_EPSILON);
//!
//! let config = KernelConfig::default();
//! assert_eq!(config.tolerance, VERTEX_EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Format Stable**: Values that saved scripts and meshes depend on live here

pub mod constants;
