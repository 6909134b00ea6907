//! # Configuration Constants
//!
//! Centralized constants for the mesh generation kernel. Matching tolerances,
//! default colors, primitive limits and asset locations are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Position matching and export snapping tolerances
//! - **Faces**: Default face attributes (color, group)
//! - **Primitives**: Tessellation limits for radial primitives
//! - **Capacity**: Face budget for operations that add faces in bulk
//! - **Assets**: Script and mesh file locations
//! - **Binary Format**: Layout of exported vertex records

use std::fmt;
use std::path::PathBuf;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Tolerance used when searching for coincident vertices.
///
/// Two positions are treated as the same point when every component differs
/// by at most this value. Welded moves, adjacency discovery and edge
/// combination all rely on it, and saved scripts depend on it staying fixed.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_EPSILON;
///
/// fn coincident(a: [f32; 3], b: [f32; 3]) -> bool {
///     (0..3).all(|i| (a[i] - b[i]).abs() <= VERTEX_EPSILON)
/// }
///
/// assert!(coincident([1.0, 2.0, 3.0], [1.0, 2.0, 3.0000005]));
/// ```
pub const VERTEX_EPSILON: f32 = 1e-6;

/// Values closer to zero than this are written as exactly `0.0` on export.
///
/// # Example
///
/// ```rust
/// use config::constants::EXPORT_SNAP_EPSILON;
///
/// let value: f32 = -3e-8;
/// let snapped = if value.abs() < EXPORT_SNAP_EPSILON { 0.0 } else { value };
/// assert_eq!(snapped, 0.0);
/// ```
pub const EXPORT_SNAP_EPSILON: f32 = 1e-6;

// =============================================================================
// FACE CONSTANTS
// =============================================================================

/// Color given to every new face (opaque white).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_FACE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Group id of faces created outside a `start_group`/`end_group` bracket.
pub const UNGROUPED: i32 = -1;

/// Scale between kernel colors ([0, 1]) and script colors ([0, 255]).
pub const COLOR_SCALE: f32 = 255.0;

/// Palette cycled through by `debug_colors`.
pub const DEBUG_PALETTE: [[f32; 4]; 8] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, 1.0],
    [1.0, 0.5, 0.0, 1.0],
    [0.5, 0.0, 1.0, 1.0],
];

// =============================================================================
// PRIMITIVE CONSTANTS
// =============================================================================

/// Minimum number of segments for cylinders and rings.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_RADIAL_SEGMENTS;
///
/// let requested = 1u32;
/// assert_eq!(requested.max(MIN_RADIAL_SEGMENTS), 3);
/// ```
pub const MIN_RADIAL_SEGMENTS: u32 = 3;

/// Segment count of the hexagonal prism primitive.
pub const HEXAGON_SEGMENTS: u32 = 6;

/// Largest segment count accepted per axis by slicing, grids and radial
/// primitives. Larger requests fail instead of being clamped.
///
/// # Example
///
/// ```rust
/// use config::constants::{MAX_FACES, MAX_SEGMENTS};
///
/// // a full-size slice still fits the face budget
/// assert!((MAX_SEGMENTS as usize).pow(2) < MAX_FACES);
/// ```
pub const MAX_SEGMENTS: u32 = 1 << 10;

// =============================================================================
// CAPACITY CONSTANTS
// =============================================================================

/// Face budget checked before an operation that adds faces in bulk.
///
/// Ids travel through `f32` opcode slots, which hold integers exactly up
/// to 2^24, so scripts can name every face below this budget.
pub const MAX_FACES: usize = 1 << 24;

// =============================================================================
// ASSET CONSTANTS
// =============================================================================

/// Directory holding text scripts, relative to the working directory.
pub const SCRIPT_DIR: &str = "resources/meshes";

/// Directory receiving exported binary meshes.
pub const MESH_DIR: &str = "content/meshes";

/// File extension of text scripts.
pub const SCRIPT_EXTENSION: &str = "txt";

/// File extension of binary meshes.
pub const MESH_EXTENSION: &str = "mesh";

// =============================================================================
// BINARY FORMAT CONSTANTS
// =============================================================================

/// Number of `f32` values per exported vertex: position (3), normal (3),
/// uv (2), color (4).
pub const MESH_VERTEX_FLOATS: usize = 12;

/// Size in bytes of one exported vertex record.
pub const MESH_VERTEX_BYTES: usize = MESH_VERTEX_FLOATS * 4;

// =============================================================================
// KERNEL CONFIGURATION
// =============================================================================

/// Runtime configuration of a mesh generation session.
///
/// # Examples
/// ```
/// use config::constants::KernelConfig;
/// let config = KernelConfig::default();
/// assert!(config.tolerance > 0.0);
/// assert!(config.script_path("cube").ends_with("cube.txt"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KernelConfig {
    /// Coincident-position tolerance used by searches and welded moves.
    pub tolerance: f32,
    /// Directory for text scripts.
    pub script_dir: PathBuf,
    /// Directory for binary meshes.
    pub mesh_dir: PathBuf,
}

impl KernelConfig {
    /// Builds a configuration, rejecting non-positive tolerances.
    ///
    /// # Examples
    /// ```
    /// use config::constants::KernelConfig;
    /// let cfg = KernelConfig::new(1.0e-5, "scripts", "out").expect("valid config");
    /// assert_eq!(cfg.tolerance, 1.0e-5);
    /// assert!(KernelConfig::new(0.0, "scripts", "out").is_err());
    /// ```
    pub fn new(
        tolerance: f32,
        script_dir: impl Into<PathBuf>,
        mesh_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if !(tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        Ok(Self {
            tolerance,
            script_dir: script_dir.into(),
            mesh_dir: mesh_dir.into(),
        })
    }

    /// Path of the text script called `name`.
    pub fn script_path(&self, name: &str) -> PathBuf {
        self.script_dir.join(format!("{name}.{SCRIPT_EXTENSION}"))
    }

    /// Path of the binary mesh called `name`.
    pub fn mesh_path(&self, name: &str) -> PathBuf {
        self.mesh_dir.join(format!("{name}.{MESH_EXTENSION}"))
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            tolerance: VERTEX_EPSILON,
            script_dir: PathBuf::from(SCRIPT_DIR),
            mesh_dir: PathBuf::from(MESH_DIR),
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    InvalidTolerance(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Snaps values within [`EXPORT_SNAP_EPSILON`] of zero to exactly zero.
///
/// # Example
///
/// ```rust
/// use config::constants::snap_to_zero;
///
/// assert_eq!(snap_to_zero(1e-9), 0.0);
/// assert_eq!(snap_to_zero(0.25), 0.25);
/// ```
#[inline]
pub fn snap_to_zero(value: f32) -> f32 {
    if value.abs() < EXPORT_SNAP_EPSILON {
        0.0
    } else {
        value
    }
}
