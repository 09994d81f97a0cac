//! Page text sources.
//!
//! The pipeline does not read PDFs itself. A [`PageTextSource`] hands it the
//! raw lines found inside the clip rectangle of each page.

use crate::error::{Result, ScheduleError};
use crate::params::ClipRect;

/// Form feed, the page separator of pre-extracted text.
pub const PAGE_SEPARATOR: char = '\x0c';

/// Supplies raw text lines from a clipped region of each page.
pub trait PageTextSource {
    /// Lines inside `clip` for each page from `start_page` (zero-indexed)
    /// to the end of the document, in reading order.
    fn clipped_lines(&mut self, clip: ClipRect, start_page: usize) -> Result<Vec<Vec<String>>>;
}

/// Split the clipped text of one page into lines.
///
/// The page text is trimmed as a whole first, so an empty page yields a
/// single empty line and the first line loses its indentation.
pub fn split_page_text(text: &str) -> Vec<String> {
    text.trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Text that has already been extracted, one string per page.
///
/// The clip rectangle is assumed to have been applied by whatever produced
/// the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPages {
    pages: Vec<String>,
}

impl TextPages {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Parse form-feed separated pages, as written by `pdftotext`.
    pub fn from_form_feed(text: &str) -> Self {
        let mut pages: Vec<String> = text.split(PAGE_SEPARATOR).map(str::to_string).collect();
        // pdftotext terminates every page, leaving an empty tail.
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageTextSource for TextPages {
    fn clipped_lines(&mut self, _clip: ClipRect, start_page: usize) -> Result<Vec<Vec<String>>> {
        if start_page >= self.pages.len() {
            return Err(ScheduleError::Extraction(format!(
                "start page {} is beyond the document ({} pages)",
                start_page + 1,
                self.pages.len()
            )));
        }
        Ok(self.pages[start_page..]
            .iter()
            .map(|page| split_page_text(page))
            .collect())
    }
}
