//! Row tokenizer.
//!
//! Splits raw extracted lines into four-column [`Row`]s. Column boundaries
//! are runs of spaces; the extractor does not keep them consistent, so
//! unexpected column counts are normalized here.

use itertools::Itertools;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{AmbiguityKind, ParseAmbiguity};
use crate::params::{ScheduleParams, TwoChunkPlacement};
use crate::row::{COLUMN_COUNT, NOTE_MARKER, Row};

/// Marker of the register's closing line.
const END_OF_REGISTER: &str = "end of register";

/// Page artifact printed alone on a line.
const PAGE_ARTIFACT: &str = "p";

/// A line turned into a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    pub row: Row,
    /// Set when the column placement is a guess.
    pub ambiguity: Option<AmbiguityKind>,
}

/// Check if a line is extractor noise that carries no schedule data.
pub fn is_noise(line: &str) -> bool {
    line.to_lowercase().contains(END_OF_REGISTER) || line.trim() == PAGE_ARTIFACT
}

/// Splits lines into rows.
#[derive(Debug, Clone)]
pub struct RowTokenizer {
    column_gap: Regex,
    two_chunk: TwoChunkPlacement,
}

impl Default for RowTokenizer {
    fn default() -> Self {
        Self::from_params(&ScheduleParams::default())
    }
}

impl RowTokenizer {
    /// Create a tokenizer splitting on `min_column_gap` or more spaces.
    pub fn new(min_column_gap: usize, two_chunk: TwoChunkPlacement) -> Self {
        let gap = min_column_gap.max(1);
        Self {
            column_gap: Regex::new(&format!("[ ]{{{gap},}}")).expect("valid column gap pattern"),
            two_chunk,
        }
    }

    pub fn from_params(params: &ScheduleParams) -> Self {
        Self::new(params.min_column_gap, params.two_chunk)
    }

    /// Tokenize one raw line. Returns None for noise lines.
    pub fn tokenize(&self, line: &str) -> Option<Tokenized> {
        if is_noise(line) {
            return None;
        }

        let mut chunks: Vec<String> = self.column_gap.split(line).map(str::to_string).collect();
        let mut ambiguity = None;

        // A double space inside the description splits it in two.
        if chunks.len() > COLUMN_COUNT {
            let merged = format!("{} {}", chunks[1], chunks[2]);
            chunks[1] = merged;
            chunks.remove(2);
        }

        if chunks.len() > COLUMN_COUNT {
            ambiguity = Some(AmbiguityKind::ExcessChunks(chunks.len()));
            let surplus = chunks.split_off(COLUMN_COUNT - 1);
            chunks.push(surplus.iter().filter(|c| !c.is_empty()).join(" "));
        }

        if chunks.len() == 2 {
            self.place_two_chunks(&mut chunks);
        }

        if chunks.len() == 1
            && !chunks[0].trim().is_empty()
            && !chunks[0].starts_with(NOTE_MARKER)
        {
            ambiguity = Some(AmbiguityKind::SingleChunk);
        }

        chunks.resize(COLUMN_COUNT, String::new());
        let fields: [String; COLUMN_COUNT] = chunks.try_into().ok()?;

        Some(Tokenized {
            row: Row::new(fields),
            ambiguity,
        })
    }

    fn place_two_chunks(&self, chunks: &mut Vec<String>) {
        match self.two_chunk {
            TwoChunkPlacement::LeadingGap => {
                if chunks[0].is_empty() {
                    chunks.insert(0, String::new());
                } else {
                    chunks.insert(1, String::new());
                }
            }
            TwoChunkPlacement::Sequential => {}
        }
    }

    /// Tokenize every line of every page, in order.
    ///
    /// Noise lines are dropped. Ambiguous lines still produce a row and are
    /// reported alongside the rows.
    pub fn tokenize_pages(&self, pages: &[Vec<String>]) -> (Vec<Row>, Vec<ParseAmbiguity>) {
        info!("splitting extracted text into rows");
        let mut rows = Vec::new();
        let mut ambiguities = Vec::new();

        for (page_idx, lines) in pages.iter().enumerate() {
            for (line_idx, line) in lines.iter().enumerate() {
                let Some(tokenized) = self.tokenize(line) else {
                    debug!(page = page_idx, line = line_idx, "dropped noise line {:?}", line);
                    continue;
                };
                if let Some(kind) = tokenized.ambiguity {
                    let ambiguity = ParseAmbiguity {
                        kind,
                        page: page_idx,
                        line: line_idx,
                        text: line.clone(),
                    };
                    match kind {
                        AmbiguityKind::SingleChunk => debug!("{}", ambiguity),
                        AmbiguityKind::ExcessChunks(_) => warn!("{}", ambiguity),
                    }
                    ambiguities.push(ambiguity);
                }
                rows.push(tokenized.row);
            }
        }

        info!(rows = rows.len(), "split extracted text into rows");
        (rows, ambiguities)
    }
}
