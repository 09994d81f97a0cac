//! High-level extraction API.
//!
//! Provides the main public API for schedule extraction:
//! - `extract_schedule()` - Read a page source and build the schedule
//! - `schedule_from_lines()` - Build the schedule from already extracted lines
//! - `save_schedule()` - Write the schedule JSON to a file

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::assembler::assemble;
use crate::entry::LeaseSchedule;
use crate::error::{ParseAmbiguity, Result, ScheduleError};
use crate::params::ScheduleParams;
use crate::row::Row;
use crate::source::PageTextSource;
use crate::tokenizer::RowTokenizer;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleReport {
    pub schedule: LeaseSchedule,
    /// Lines whose column placement was guessed.
    pub warnings: Vec<ParseAmbiguity>,
}

/// Extract the schedule from a page source.
///
/// # Arguments
/// * `source` - Supplies the clipped page lines
/// * `params` - Layout parameters (None for the register defaults)
///
/// # Example
/// ```ignore
/// use lease_schedule_core::high_level::extract_schedule;
/// use lease_schedule_core::source::TextPages;
///
/// let text = std::fs::read_to_string("register.txt")?;
/// let report = extract_schedule(&mut TextPages::from_form_feed(&text), None)?;
/// ```
pub fn extract_schedule<S: PageTextSource + ?Sized>(
    source: &mut S,
    params: Option<ScheduleParams>,
) -> Result<ScheduleReport> {
    let params = params.unwrap_or_default();
    params.validate()?;

    info!(start_page = params.start_page + 1, "extracting text from document");
    let pages = source.clipped_lines(params.clip, params.start_page)?;
    info!(pages = pages.len(), "finished extracting text");

    schedule_from_lines(&pages, &params)
}

/// Build the schedule from clipped page lines.
///
/// Fails when the pages hold no text, or when the row after the front-matter
/// is not the first entry.
pub fn schedule_from_lines(
    pages: &[Vec<String>],
    params: &ScheduleParams,
) -> Result<ScheduleReport> {
    if pages.iter().flatten().all(|line| line.trim().is_empty()) {
        return Err(ScheduleError::Extraction("clip region yields no text".to_string()));
    }

    let tokenizer = RowTokenizer::from_params(params);
    let (rows, warnings) = tokenizer.tokenize_pages(pages);
    if !warnings.is_empty() {
        warn!(count = warnings.len(), "ambiguous lines tokenized on a best-effort basis");
    }

    let schedule_rows = skip_front_matter(&rows, params.skip_rows)?;
    let entries = assemble(schedule_rows);
    info!(entries = entries.len(), "finished processing schedule");

    Ok(ScheduleReport {
        schedule: LeaseSchedule::new(entries),
        warnings,
    })
}

/// Drop the front-matter rows and check the schedule starts on an entry.
pub fn skip_front_matter(rows: &[Row], skip_rows: usize) -> Result<&[Row]> {
    match rows.get(skip_rows) {
        Some(first) if first.is_entry_start() => Ok(&rows[skip_rows..]),
        Some(first) => Err(ScheduleError::Structural {
            index: skip_rows,
            expected: "an entry number in the first column",
            observed: first.to_string(),
        }),
        None => Err(ScheduleError::Structural {
            index: skip_rows,
            expected: "an entry number in the first column",
            observed: format!("end of rows ({} rows in total)", rows.len()),
        }),
    }
}

/// Write the schedule to `path` as JSON.
///
/// The document is serialized in full before the file is touched.
pub fn save_schedule(schedule: &LeaseSchedule, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    info!("saving schedule to {}", path.display());
    let json = schedule.to_json_string()?;
    fs::write(path, json)?;
    info!("schedule saved to {}", path.display());
    Ok(())
}
