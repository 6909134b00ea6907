//! # Script Parser
//!
//! Turns a token stream into an [`OpcodeLog`]. Each line holds at most one
//! instruction: an opcode name followed by its argument values, separated
//! by blanks or commas.
//!
//! Parsing is best-effort and never crosses a line break: a line with an
//! unknown name, a bad number, a stray character or the wrong number of
//! values is skipped and reported as one [`ParseError`], and its
//! neighbours still parse.
//!
//! ## Example
//!
//! ```rust
//! use meshgen_script::parse_script;
//!
//! let parsed = parse_script("add_cube 0,0,0 1,1,1\nbogus 1\nset_color 0 255,0,0,255\n");
//! assert_eq!(parsed.log.len(), 2);
//! assert_eq!(parsed.errors.len(), 1);
//! ```

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Lexer, Token, TokenKind};
use config::constants::COLOR_SCALE;
use log::warn;
use meshgen::opcode::{lookup, OpcodeSpec};
use meshgen::{ArgKind, OpcodeLog};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Result of parsing a script.
#[derive(Debug, Clone, Default)]
pub struct ParsedScript {
    /// Instructions that parsed cleanly, in source order.
    pub log: OpcodeLog,
    /// One entry per skipped instruction.
    pub errors: Vec<ParseError>,
}

/// Parses a script into a fresh opcode log.
///
/// Each diagnostic is also logged with `warn!`.
pub fn parse_script(source: &str) -> ParsedScript {
    let tokens = Lexer::new(source).tokenize();
    let mut parser = Parser::new(&tokens);
    parser.parse();
    ParsedScript {
        log: parser.log,
        errors: parser.errors,
    }
}

// =============================================================================
// PARSER
// =============================================================================

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    log: OpcodeLog,
    errors: Vec<ParseError>,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            log: OpcodeLog::new(),
            errors: Vec::new(),
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn parse(&mut self) {
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Eof => break,
                TokenKind::Name => self.parse_instruction(),
                TokenKind::Newline | TokenKind::Delimiter => self.pos += 1,
                TokenKind::Number => {
                    self.report(ParseError::new(ParseErrorKind::MissingOpcode, token.span));
                    self.skip_line();
                }
                TokenKind::Error => {
                    self.report(unexpected(token));
                    self.skip_line();
                }
            }
        }
    }

    /// Moves to the line break ending the current line, or to the end.
    fn skip_line(&mut self) {
        while let Some(token) = self.peek() {
            if matches!(token.kind, TokenKind::Newline | TokenKind::Eof) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Parses one instruction starting at a `Name` token and running to the
    /// end of its line.
    fn parse_instruction(&mut self) {
        let Some(name) = self.peek() else {
            return;
        };
        self.pos += 1;

        let mut span = name.span;
        let mut slots = Vec::new();
        let mut problem = None;

        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Newline | TokenKind::Eof => break,
                TokenKind::Delimiter => {}
                TokenKind::Number => match parse_number(&token.text) {
                    Some(value) => slots.push(value),
                    None if problem.is_none() => {
                        problem = Some(ParseError::new(
                            ParseErrorKind::InvalidNumber {
                                text: token.text.clone(),
                            },
                            token.span,
                        ));
                    }
                    None => {}
                },
                TokenKind::Name if problem.is_none() => {
                    problem = Some(ParseError::new(
                        ParseErrorKind::ExtraOpcode {
                            name: token.text.clone(),
                        },
                        token.span,
                    ));
                }
                TokenKind::Error if problem.is_none() => problem = Some(unexpected(token)),
                TokenKind::Name | TokenKind::Error => {}
            }
            span = span.to(token.span);
            self.pos += 1;
        }

        let Some(spec) = lookup(&name.text) else {
            self.report(ParseError::new(
                ParseErrorKind::UnknownOpcode {
                    name: name.text.clone(),
                },
                name.span,
            ));
            return;
        };
        if let Some(error) = problem {
            self.report(error);
            return;
        }
        if slots.len() != spec.slot_count() {
            self.report(ParseError::new(
                ParseErrorKind::ArgumentCount {
                    expected: spec.slot_count(),
                    found: slots.len(),
                },
                span,
            ));
            return;
        }

        normalize_slots(spec, &mut slots);
        self.log.push_raw(spec.op_type, &slots);
    }

    fn report(&mut self, error: ParseError) {
        warn!("skipping script instruction: {}", error);
        self.errors.push(error);
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnexpectedCharacter {
            text: token.text.clone(),
        },
        token.span,
    )
}

fn parse_number(text: &str) -> Option<f32> {
    text.parse::<f32>().ok().filter(|value| value.is_finite())
}

/// Converts script values to stored slots: ints truncate toward zero and
/// colors scale from `[0, 255]` to `[0, 1]`.
fn normalize_slots(spec: &OpcodeSpec, slots: &mut [f32]) {
    let mut at = 0;
    for kind in spec.args {
        let width = kind.slots();
        match kind {
            ArgKind::Int => slots[at] = slots[at].trunc(),
            ArgKind::Color => {
                for value in &mut slots[at..at + width] {
                    *value /= COLOR_SCALE;
                }
            }
            ArgKind::Float | ArgKind::Vec3 => {}
        }
        at += width;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use meshgen::{Opcode, OpcodeType};

    fn decoded(parsed: &ParsedScript) -> Vec<Opcode> {
        parsed.log.iter().map(|op| op.unwrap()).collect()
    }

    #[test]
    fn test_parse_cube_and_color() {
        let parsed = parse_script("add_cube 0,0,0 1,1,1\nset_color 0 255,0,0,255\n");
        assert!(parsed.errors.is_empty());
        let ops = decoded(&parsed);
        assert_eq!(ops.len(), 2);
        assert_eq!(
            ops[1],
            Opcode::SetColor {
                face: 0,
                color: glam::Vec4::new(1.0, 0.0, 0.0, 1.0),
            }
        );
    }

    #[test]
    fn test_garbage_line_keeps_neighbours() {
        let parsed = parse_script("add_cube 0,0,0 1,1,1\n@@@\nadd_cube 3,0,0 1,1,1\n");
        assert_eq!(parsed.log.len(), 2);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(
            parsed.errors[0].kind,
            ParseErrorKind::UnexpectedCharacter {
                text: "@".to_string()
            }
        );
        assert_eq!(parsed.errors[0].span.start.line, 1);
    }

    #[test]
    fn test_values_do_not_continue_onto_next_line() {
        let parsed = parse_script("add_cube 0,0,0 1,1,1\n1,2,3\n");
        assert_eq!(parsed.log.len(), 1);
        assert_eq!(parsed.log.entries()[0].op_type, OpcodeType::AddCube);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].kind, ParseErrorKind::MissingOpcode);
        assert_eq!(parsed.errors[0].span.start.line, 1);

        let split = parse_script("move_face 2\n0,1,0\nstart_group");
        assert_eq!(split.log.len(), 1);
        assert_eq!(split.log.entries()[0].op_type, OpcodeType::StartGroup);
        assert_eq!(split.errors.len(), 2);
    }

    #[test]
    fn test_second_name_on_line_is_rejected() {
        let parsed = parse_script("debug_colors end_group\nstart_group");
        assert_eq!(parsed.log.len(), 1);
        assert_eq!(
            parsed.errors[0].kind,
            ParseErrorKind::ExtraOpcode {
                name: "end_group".to_string()
            }
        );
    }

    #[test]
    fn test_ints_truncate_toward_zero() {
        let parsed = parse_script("slice 4.9 -2.7 3");
        let entry = parsed.log.entries()[0];
        assert_eq!(parsed.log.get_data(&entry).unwrap(), &[4.0, -2.0, 3.0]);
    }

    #[test]
    fn test_float_arguments_keep_precision() {
        let parsed = parse_script("extrude_face 3 0.125\nh_split 1 1e-1");
        let ops = decoded(&parsed);
        assert_eq!(ops[0], Opcode::ExtrudeFace { face: 3, factor: 0.125 });
        match ops[1] {
            Opcode::HSplit { edge, factor } => {
                assert_eq!(edge, 1);
                assert_abs_diff_eq!(factor, 0.1, epsilon = 1e-7);
            }
            ref other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_opcode_is_skipped() {
        let parsed = parse_script("add_sphere 0,0,0 1\ndebug_colors\n");
        assert_eq!(parsed.log.len(), 1);
        assert_eq!(
            parsed.errors[0].kind,
            ParseErrorKind::UnknownOpcode {
                name: "add_sphere".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_count_is_skipped() {
        let parsed = parse_script("set_color 0 255,0,0\nend_group\n");
        assert_eq!(parsed.log.len(), 1);
        assert_eq!(parsed.log.entries()[0].op_type, OpcodeType::EndGroup);
        assert_eq!(
            parsed.errors[0].kind,
            ParseErrorKind::ArgumentCount {
                expected: 5,
                found: 4
            }
        );
        assert_eq!(parsed.errors[0].span.start.line, 0);
    }

    #[test]
    fn test_bad_number_and_stray_character() {
        let parsed = parse_script("move_vertex 1 1.2.3,0,0\nmove_vertex 1 (0,0,0)\nmove_vertex 1 0,0,1");
        assert_eq!(parsed.log.len(), 1);
        assert_eq!(parsed.errors.len(), 2);
        assert!(matches!(
            parsed.errors[0].kind,
            ParseErrorKind::InvalidNumber { .. }
        ));
        assert_eq!(
            parsed.errors[1].kind,
            ParseErrorKind::UnexpectedCharacter {
                text: "(".to_string()
            }
        );
        assert_eq!(parsed.errors[1].span.start.line, 1);
    }

    #[test]
    fn test_orphan_numbers_reported_once_per_line() {
        let parsed = parse_script("1 2 3\n4,5\ndebug_colors");
        assert_eq!(parsed.log.len(), 1);
        assert_eq!(parsed.errors.len(), 2);
        assert!(parsed.errors.iter().all(|e| e.kind == ParseErrorKind::MissingOpcode));
        assert_eq!(parsed.errors[1].span.start.line, 1);
    }

    #[test]
    fn test_overflowing_number_is_invalid() {
        let parsed = parse_script("scale_face 0 1e60");
        assert!(parsed.log.is_empty());
        assert!(matches!(
            parsed.errors[0].kind,
            ParseErrorKind::InvalidNumber { .. }
        ));
    }

    #[test]
    fn test_empty_script() {
        let parsed = parse_script("# nothing here\n\n");
        assert!(parsed.log.is_empty());
        assert!(parsed.errors.is_empty());
    }
}
