//! # MeshGen Script
//!
//! Text encoding of a MeshGen opcode log: one instruction per line, an
//! opcode name followed by its arguments in catalog order.
//!
//! ```text
//! add_cube 0,0,0 1,1,1
//! set_color 0 255,0,0,255
//! slice 2 3 2
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → OpcodeLog → MeshGen replay
//! OpcodeLog → Writer → Source Text
//! ```
//!
//! Loading is best-effort end to end. Malformed instructions are dropped by
//! the parser and failing instructions are dropped during replay; both are
//! logged with `warn!` and counted in the [`LoadReport`].
//!
//! ## Example
//!
//! ```rust
//! use meshgen::MeshGen;
//! use meshgen_script::TextScript;
//!
//! let mut session = MeshGen::new();
//! let report = session.load_script("add_cube 0,0,0 1,1,1\nset_color 0 255,0,0,255\n");
//! assert_eq!(report.applied, 2);
//! assert_eq!(session.mesh().face_count(), 6);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod writer;

pub use error::{ParseError, ParseErrorKind, ScriptError};
pub use parser::{parse_script, ParsedScript};
pub use span::{Position, Span};
pub use writer::write_script;

use log::{debug, warn};
use meshgen::{MeshGen, MeshGenError};
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// LOAD REPORT
// =============================================================================

/// Outcome of loading a script into a session.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Instructions replayed successfully.
    pub applied: usize,
    /// Instructions the parser skipped.
    pub parse_errors: Vec<ParseError>,
    /// Instructions that failed during replay, by index in the parsed log.
    pub replay_errors: Vec<(usize, MeshGenError)>,
}

impl LoadReport {
    /// Returns true if every instruction parsed and applied.
    pub fn is_clean(&self) -> bool {
        self.parse_errors.is_empty() && self.replay_errors.is_empty()
    }

    /// Converts the first replay failure into an error.
    ///
    /// Parse diagnostics do not fail the load; they only mean some lines
    /// were never part of the log.
    pub fn into_result(self) -> Result<usize, ScriptError> {
        match self.replay_errors.into_iter().next() {
            Some((_, error)) => Err(error.into()),
            None => Ok(self.applied),
        }
    }
}

// =============================================================================
// SESSION EXTENSION
// =============================================================================

/// Saving and loading a session's opcode log as text.
pub trait TextScript {
    /// Writes the log to `<script_dir>/<name>.txt` and returns the path.
    fn save_text(&self, name: &str) -> Result<PathBuf, ScriptError>;

    /// Writes the log to `path`, creating parent directories.
    fn save_text_to(&self, path: &Path) -> Result<(), ScriptError>;

    /// Loads `<script_dir>/<name>.txt` on top of the current mesh.
    fn load_text(&mut self, name: &str) -> Result<LoadReport, ScriptError>;

    /// Loads the script at `path` on top of the current mesh.
    fn load_text_from(&mut self, path: &Path) -> Result<LoadReport, ScriptError>;

    /// Parses `source`, replays every instruction that parsed and then
    /// recalculates normals.
    ///
    /// ## Returns
    ///
    /// A [`LoadReport`]. Lines that fail to parse and instructions that fail
    /// to replay are skipped with a warning and listed in the report; the
    /// rest of the script still applies.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use meshgen::MeshGen;
    /// use meshgen_script::TextScript;
    ///
    /// let mut session = MeshGen::new();
    /// let report = session.load_script("add_cube 0,0,0 1,1,1\n@@@\nadd_cube 3,0,0 1,1,1\n");
    /// assert_eq!(report.applied, 2);
    /// assert_eq!(report.parse_errors.len(), 1);
    /// assert_eq!(session.mesh().face_count(), 12);
    /// ```
    fn load_script(&mut self, source: &str) -> LoadReport;
}

impl TextScript for MeshGen {
    fn save_text(&self, name: &str) -> Result<PathBuf, ScriptError> {
        let path = self.config().script_path(name);
        self.save_text_to(&path)?;
        Ok(path)
    }

    fn save_text_to(&self, path: &Path) -> Result<(), ScriptError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, write_script(self.log()))?;
        debug!(
            "wrote {} instructions to {}",
            self.log().len(),
            path.display()
        );
        Ok(())
    }

    fn load_text(&mut self, name: &str) -> Result<LoadReport, ScriptError> {
        let path = self.config().script_path(name);
        self.load_text_from(&path)
    }

    fn load_text_from(&mut self, path: &Path) -> Result<LoadReport, ScriptError> {
        let source = fs::read_to_string(path)?;
        let report = self.load_script(&source);
        debug!(
            "loaded {}: {} applied, {} skipped",
            path.display(),
            report.applied,
            report.parse_errors.len() + report.replay_errors.len()
        );
        Ok(report)
    }

    fn load_script(&mut self, source: &str) -> LoadReport {
        let parsed = parse_script(source);
        let mut report = LoadReport {
            parse_errors: parsed.errors,
            ..LoadReport::default()
        };

        for (index, opcode) in parsed.log.iter().enumerate() {
            match opcode.and_then(|opcode| self.execute_opcode(&opcode)) {
                Ok(()) => report.applied += 1,
                Err(error) => {
                    warn!("skipping script instruction {}: {}", index, error);
                    report.replay_errors.push((index, error));
                }
            }
        }
        self.recalculate_normals();
        report
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_replay_failures_are_skipped() {
        let mut session = MeshGen::new();
        let report = session.load_script("move_face 9 0,1,0\nadd_cube 0,0,0 1,1,1\n");
        assert_eq!(report.applied, 1);
        assert_eq!(report.replay_errors.len(), 1);
        assert_eq!(report.replay_errors[0].0, 0);
        assert!(report.replay_errors[0].1.is_index_error());
        assert_eq!(session.mesh().face_count(), 6);
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_load_appends_to_session() {
        let mut session = MeshGen::new();
        session.add_cube(Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
        let report = session.load_script("add_hexagon 0,0,0 1 1\n");
        assert!(report.is_clean());
        assert_eq!(session.mesh().face_count(), 6 + 18);
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn test_clean_report_into_result() {
        let mut session = MeshGen::new();
        let report = session.load_script("start_group\nadd_cube 0,0,0 1,1,1\nend_group\n");
        assert_eq!(report.into_result().unwrap(), 3);
    }
}
