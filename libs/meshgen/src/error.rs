//! # MeshGen Errors
//!
//! Error types for mesh store, geometry and export operations.

use std::fmt;
use thiserror::Error;

/// Result alias used throughout the kernel.
pub type Result<T> = std::result::Result<T, MeshGenError>;

/// Kind of element an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Vertex,
    Edge,
    Face,
    Group,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Edge => "edge",
            ElementKind::Face => "face",
            ElementKind::Group => "group",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while editing, replaying or exporting a mesh.
#[derive(Debug, Error)]
pub enum MeshGenError {
    /// An id does not name an existing element
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: ElementKind,
        index: i64,
        len: usize,
    },

    /// A log entry cannot be decoded
    #[error("invalid opcode entry: type {type_id} at offset {offset}")]
    InvalidOpcode { type_id: u32, offset: usize },

    /// A segment count or face total is over its limit
    #[error("{what} {requested} exceeds the limit of {limit}")]
    LimitExceeded {
        what: &'static str,
        requested: u64,
        limit: u64,
    },

    /// A binary mesh file is malformed
    #[error("invalid mesh file: {message}")]
    InvalidMeshFile { message: String },

    /// File open, read or write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MeshGenError {
    /// Creates an index out of range error.
    pub fn out_of_range(kind: ElementKind, index: impl Into<i64>, len: usize) -> Self {
        Self::IndexOutOfRange {
            kind,
            index: index.into(),
            len,
        }
    }

    /// Creates an invalid mesh file error.
    pub fn invalid_mesh_file(message: impl Into<String>) -> Self {
        Self::InvalidMeshFile {
            message: message.into(),
        }
    }

    /// Creates a limit exceeded error.
    pub fn limit_exceeded(what: &'static str, requested: u64, limit: u64) -> Self {
        Self::LimitExceeded {
            what,
            requested,
            limit,
        }
    }

    /// Returns true if this error reports a bad element id.
    pub fn is_index_error(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }
}
