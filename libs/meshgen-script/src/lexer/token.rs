//! # Tokens
//!
//! Token types for the script lexer.

use crate::span::Span;

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Source span.
    pub span: Span,
    /// Token text.
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
        Self { kind, span, text }
    }

    /// Check if token is EOF.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Opcode name like `add_cube`.
    Name,
    /// Number like `-1.5` or `2e3`. The text is not validated yet.
    Number,
    /// `,` between vector components.
    Delimiter,
    /// End of a line.
    Newline,
    /// A character that cannot start any token.
    Error,
    /// End of input.
    Eof,
}
