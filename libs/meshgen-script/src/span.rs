//! # Source Spans
//!
//! Locations inside a script, used by tokens and diagnostics.

/// A point in the source text.
///
/// `line` and `column` are 0-indexed; diagnostics print them 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset.
    pub byte: usize,
    /// Line number.
    pub line: usize,
    /// Column in characters.
    pub column: usize,
}

impl Position {
    /// Creates a position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }
}

/// A half-open range of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// First position covered.
    pub start: Position,
    /// Position just past the end.
    pub end: Position,
}

impl Span {
    /// Creates a span.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Returns a span from the start of `self` to the end of `other`.
    pub const fn to(self, other: Span) -> Span {
        Span::new(self.start, other.end)
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.byte.saturating_sub(self.start.byte)
    }

    /// Returns true if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_to() {
        let a = Span::new(Position::new(0, 0, 0), Position::new(3, 0, 3));
        let b = Span::new(Position::new(8, 1, 2), Position::new(10, 1, 4));
        let joined = a.to(b);
        assert_eq!(joined.start.byte, 0);
        assert_eq!(joined.end.line, 1);
        assert_eq!(joined.len(), 10);
    }

    #[test]
    fn test_empty_span() {
        let at = Position::new(4, 0, 4);
        assert!(Span::new(at, at).is_empty());
    }
}
