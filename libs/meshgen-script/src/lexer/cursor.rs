//! # Character Cursor
//!
//! Peekable character cursor for the script lexer. Tracks byte, line and
//! column as it advances.

use crate::span::Position;

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with position tracking.
///
/// Walks a script one `char` at a time. Lines and columns count from zero;
/// columns count characters, not bytes.
///
/// ## Example
///
/// ```rust
/// use meshgen_script::lexer::Cursor;
///
/// let mut cursor = Cursor::new("add_cube");
/// assert_eq!(cursor.advance(), Some('a'));
/// assert_eq!(cursor.position().byte, 1);
/// ```
pub struct Cursor<'a> {
    /// Script text.
    source: &'a str,
    /// Byte offset of the current character.
    byte: usize,
    /// Current line.
    line: usize,
    /// Current column.
    column: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `source`.
    ///
    /// ## Parameters
    ///
    /// - `source`: Script text to walk
    ///
    /// ## Example
    ///
    /// ```rust
    /// use meshgen_script::lexer::Cursor;
    ///
    /// let cursor = Cursor::new("debug_colors");
    /// assert!(!cursor.is_eof());
    /// ```
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            byte: 0,
            line: 0,
            column: 0,
        }
    }

    /// Returns the position of the current character.
    ///
    /// ## Returns
    ///
    /// Byte offset, line and column of the next character to be consumed
    pub fn position(&self) -> Position {
        Position::new(self.byte, self.line, self.column)
    }

    /// Returns true once every character has been consumed.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    /// Returns the current character without consuming it.
    ///
    /// ## Returns
    ///
    /// The character, or `None` at end of input
    ///
    /// ## Example
    ///
    /// ```rust
    /// use meshgen_script::lexer::Cursor;
    ///
    /// let cursor = Cursor::new("0,1");
    /// assert_eq!(cursor.peek(), Some('0'));
    /// assert_eq!(cursor.peek(), Some('0'));
    /// ```
    pub fn peek(&self) -> Option<char> {
        self.source[self.byte..].chars().next()
    }

    /// Returns the character after the current one.
    ///
    /// The lexer uses this to tell a signed number (`-1`) from a lone sign.
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.byte..].chars();
        chars.next();
        chars.next()
    }

    /// Consumes the current character.
    ///
    /// A consumed `\n` moves to column 0 of the next line.
    ///
    /// ## Returns
    ///
    /// The consumed character, or `None` at end of input
    ///
    /// ## Example
    ///
    /// ```rust
    /// use meshgen_script::lexer::Cursor;
    ///
    /// let mut cursor = Cursor::new("1\n2");
    /// cursor.advance();
    /// cursor.advance();
    /// assert_eq!(cursor.position().line, 1);
    /// assert_eq!(cursor.position().column, 0);
    /// ```
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while `predicate` holds.
    ///
    /// ## Parameters
    ///
    /// - `predicate`: Test applied to each character before consuming it;
    ///   the first character that fails is left in place
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }

    /// Returns the source text between two byte offsets.
    ///
    /// ## Parameters
    ///
    /// - `start`, `end`: Byte offsets taken from [`Cursor::position`], so
    ///   both lie on character boundaries
    ///
    /// ## Example
    ///
    /// ```rust
    /// use meshgen_script::lexer::Cursor;
    ///
    /// let mut cursor = Cursor::new("slice 3");
    /// cursor.advance_while(|c| c != ' ');
    /// assert_eq!(cursor.slice(0, cursor.position().byte), "slice");
    /// ```
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_empty() {
        let cursor = Cursor::new("");
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_cursor_peek_does_not_advance() {
        let cursor = Cursor::new("1,2");
        assert_eq!(cursor.peek(), Some('1'));
        assert_eq!(cursor.peek(), Some('1'));
        assert_eq!(cursor.peek_next(), Some(','));
    }

    #[test]
    fn test_cursor_newline() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        assert_eq!(cursor.position().column, 1);
        cursor.advance();
        assert_eq!(cursor.position().line, 1);
        assert_eq!(cursor.position().column, 0);
    }

    #[test]
    fn test_cursor_advance_while() {
        let mut cursor = Cursor::new("slice 3");
        cursor.advance_while(|c| c.is_ascii_alphabetic());
        assert_eq!(cursor.peek(), Some(' '));
        assert_eq!(cursor.slice(0, 5), "slice");
    }

    #[test]
    fn test_cursor_utf8() {
        let mut cursor = Cursor::new("é1");
        assert_eq!(cursor.advance(), Some('é'));
        assert_eq!(cursor.position().byte, 2);
        assert_eq!(cursor.position().column, 1);
    }
}
