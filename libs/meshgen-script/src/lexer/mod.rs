//! # Script Lexer
//!
//! Tokenizes a MeshGen script. Spaces, tabs and carriage returns separate
//! tokens; `#` and `//` start a comment running to the end of the line.
//!
//! ## Example
//!
//! ```rust
//! use meshgen_script::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("slice 0 3 2\n").tokenize();
//! assert_eq!(tokens[0].kind, TokenKind::Name);
//! assert_eq!(tokens[3].text, "2");
//! assert_eq!(tokens[4].kind, TokenKind::Newline);
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::span::{Position, Span};

// =============================================================================
// LEXER
// =============================================================================

/// Script lexer.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The last token is always [`TokenKind::Eof`].
    pub fn tokenize(mut self) -> Vec<Token> {
        while !self.cursor.is_eof() {
            self.skip_blanks_and_comments();
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token();
        }

        let eof = self.cursor.position();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(eof, eof), String::new()));
        self.tokens
    }

    fn skip_blanks_and_comments(&mut self) {
        loop {
            self.cursor
                .advance_while(|c| c != '\n' && c.is_whitespace());

            let comment = match (self.cursor.peek(), self.cursor.peek_next()) {
                (Some('#'), _) => true,
                (Some('/'), Some('/')) => true,
                _ => false,
            };
            if !comment {
                break;
            }
            self.cursor.advance_while(|c| c != '\n');
        }
    }

    fn scan_token(&mut self) {
        let start = self.cursor.position();
        let c = match self.cursor.advance() {
            Some(c) => c,
            None => return,
        };

        match c {
            '\n' => self.push(TokenKind::Newline, start),
            ',' => self.push(TokenKind::Delimiter, start),
            c if c.is_ascii_alphabetic() || c == '_' => {
                self.cursor
                    .advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
                self.push(TokenKind::Name, start);
            }
            c if c.is_ascii_digit() => self.scan_number(start, c),
            '.' if self.next_is_digit() => self.scan_number(start, c),
            '+' | '-' if self.next_is_digit() || self.cursor.peek() == Some('.') => {
                self.scan_number(start, c)
            }
            _ => self.push(TokenKind::Error, start),
        }
    }

    fn next_is_digit(&self) -> bool {
        self.cursor.peek().map_or(false, |c| c.is_ascii_digit())
    }

    /// Scans the rest of a number whose first character is consumed.
    ///
    /// Trailing letters, dots or underscores are glued onto the token so
    /// that text like `1.2.3` or `4x` surfaces as one invalid number.
    fn scan_number(&mut self, start: Position, first: char) {
        let mut has_dot = first == '.';
        let mut has_exponent = false;

        while let Some(c) = self.cursor.peek() {
            match c {
                '0'..='9' => {
                    self.cursor.advance();
                }
                '.' if !has_dot && !has_exponent => {
                    has_dot = true;
                    self.cursor.advance();
                }
                'e' | 'E' if !has_exponent => {
                    has_exponent = true;
                    self.cursor.advance();
                    if matches!(self.cursor.peek(), Some('+') | Some('-')) {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
        self.cursor
            .advance_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');

        self.push(TokenKind::Number, start);
    }

    fn push(&mut self, kind: TokenKind, start: Position) {
        let end = self.cursor.position();
        let text = self.cursor.slice(start.byte, end.byte).to_string();
        self.tokens.push(Token::new(kind, Span::new(start, end), text));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_instruction() {
        let tokens = Lexer::new("add_cube 0,0,0 1,1,1").tokenize();
        assert_eq!(tokens.len(), 12);
        assert_eq!(tokens[0].kind, TokenKind::Name);
        assert_eq!(tokens[0].text, "add_cube");
        assert_eq!(tokens[1].kind, TokenKind::Number);
        assert_eq!(tokens[2].kind, TokenKind::Delimiter);
        assert!(tokens[11].is_eof());
    }

    #[test]
    fn test_tokenize_numbers() {
        let tokens = Lexer::new("-1.5 +2 .25 3e-2 -.5 7.").tokenize();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["-1.5", "+2", ".25", "3e-2", "-.5", "7.", ""]);
        assert!(tokens[..6].iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_malformed_number_is_one_token() {
        let tokens = Lexer::new("1.2.3 4x").tokenize();
        assert_eq!(tokens[0].text, "1.2.3");
        assert_eq!(tokens[1].text, "4x");
        assert_eq!(tokens[1].kind, TokenKind::Number);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        assert_eq!(
            kinds("# header\n\r\n\tdebug_colors // trailing\n"),
            vec![
                TokenKind::Newline,
                TokenKind::Newline,
                TokenKind::Name,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_error_characters() {
        assert_eq!(
            kinds("move_face (1) / -"),
            vec![
                TokenKind::Name,
                TokenKind::Error,
                TokenKind::Number,
                TokenKind::Error,
                TokenKind::Error,
                TokenKind::Error,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_token_positions() {
        let tokens = Lexer::new("a 1\nb 22").tokenize();
        let b = &tokens[3];
        assert_eq!(b.text, "b");
        assert_eq!(b.span.start.line, 1);
        assert_eq!(b.span.start.column, 0);
        assert_eq!(tokens[4].span.start.byte, 6);
        assert_eq!(tokens[4].span.len(), 2);
    }
}
