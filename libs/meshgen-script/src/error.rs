//! # Script Errors
//!
//! [`ParseError`] is a diagnostic: the parser records it, skips the
//! offending instruction and keeps going. [`ScriptError`] is what the
//! file-level operations return.

use crate::span::Span;
use meshgen::MeshGenError;
use std::fmt;
use thiserror::Error;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A skipped instruction and where it was.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Source location.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.kind,
            self.span.start.line + 1,
            self.span.start.column + 1
        )
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// PARSE ERROR KIND
// =============================================================================

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Name not in the opcode catalog.
    UnknownOpcode {
        /// The name as written.
        name: String,
    },

    /// Number of values does not match the catalog slot count.
    ArgumentCount {
        /// Slots the opcode takes.
        expected: usize,
        /// Values found.
        found: usize,
    },

    /// A character that cannot start a token.
    UnexpectedCharacter {
        /// The offending text.
        text: String,
    },

    /// Number-like text that does not parse as a finite `f32`.
    InvalidNumber {
        /// The invalid text.
        text: String,
    },

    /// A line that holds values but does not start with an opcode name.
    MissingOpcode,

    /// A second opcode name on a line that already has one.
    ExtraOpcode {
        /// The second name.
        name: String,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOpcode { name } => write!(f, "unknown opcode '{}'", name),
            Self::ArgumentCount { expected, found } => {
                write!(f, "expected {} values, found {}", expected, found)
            }
            Self::UnexpectedCharacter { text } => {
                write!(f, "unexpected character '{}'", text)
            }
            Self::InvalidNumber { text } => write!(f, "invalid number '{}'", text),
            Self::MissingOpcode => write!(f, "values without an opcode name"),
            Self::ExtraOpcode { name } => write!(f, "second opcode '{}' on one line", name),
        }
    }
}

// =============================================================================
// SCRIPT ERROR
// =============================================================================

/// Failure of a script file operation.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Reading or writing the script file failed.
    #[error("script I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Replaying an instruction failed.
    #[error("script replay failed: {0}")]
    Mesh(#[from] MeshGenError),
}

// =============================================================================
// TESTS
// =============================================================================
