//! Error types for lease schedule extraction.

use std::fmt;

use thiserror::Error;

/// Primary error type for schedule extraction.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The document could not be read or the clip region produced no text.
    #[error("extraction error: {0}")]
    Extraction(String),

    /// The rows do not start the way the schedule layout requires.
    #[error("structural error at row {index}: expected {expected}, got {observed}")]
    Structural {
        index: usize,
        expected: &'static str,
        observed: String,
    },

    #[error("invalid parameter: {0}")]
    InvalidParams(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for ScheduleError.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// What made a line ambiguous to tokenize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityKind {
    /// Only one non-empty chunk; the column it belongs to is a guess.
    SingleChunk,
    /// More than four chunks were left after merging the description column.
    ExcessChunks(usize),
}

/// A recoverable tokenizer anomaly.
///
/// The affected row is still emitted with best-effort normalization; this
/// records where it happened so callers can review it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAmbiguity {
    pub kind: AmbiguityKind,
    /// Zero-indexed page, counted from the first extracted page.
    pub page: usize,
    /// Zero-indexed line within the page.
    pub line: usize,
    /// Raw line as produced by the extractor.
    pub text: String,
}

impl fmt::Display for ParseAmbiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AmbiguityKind::SingleChunk => write!(
                f,
                "page {} line {}: single column, placed in first field: {:?}",
                self.page, self.line, self.text
            ),
            AmbiguityKind::ExcessChunks(n) => write!(
                f,
                "page {} line {}: {} columns after merge, surplus folded into last field: {:?}",
                self.page, self.line, n, self.text
            ),
        }
    }
}
