//! Page text source backed by PDFium.

use std::path::{Path, PathBuf};

use lease_schedule_core::error::{Result, ScheduleError};
use lease_schedule_core::params::ClipRect;
use lease_schedule_core::source::{PageTextSource, split_page_text};
use pdfium_render::prelude::*;
use tracing::debug;

/// Reads clipped page text from a PDF file through PDFium.
pub struct PdfiumSource {
    pdfium: Pdfium,
    path: PathBuf,
}

impl PdfiumSource {
    /// Bind PDFium and prepare to read `path`.
    ///
    /// The library is looked up in `lib_dir` when given, then next to the
    /// executable, then in `./lib/`, then on the system library path.
    pub fn new(path: impl Into<PathBuf>, lib_dir: Option<&Path>) -> Result<Self> {
        let pdfium = Pdfium::new(bind_pdfium(lib_dir)?);
        Ok(Self {
            pdfium,
            path: path.into(),
        })
    }
}

fn bind_pdfium(lib_dir: Option<&Path>) -> Result<Box<dyn PdfiumLibraryBindings>> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let candidates = lib_dir
        .map(Path::to_path_buf)
        .into_iter()
        .chain(exe_dir)
        .chain(Some(PathBuf::from("./lib/")));

    for dir in candidates {
        match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&dir)) {
            Ok(bindings) => return Ok(bindings),
            Err(e) => debug!("no PDFium library in {}: {}", dir.display(), e),
        }
    }

    Pdfium::bind_to_system_library()
        .map_err(|e| ScheduleError::Extraction(format!("could not load the PDFium library: {e}")))
}

/// Convert a top-left origin clip into PDFium's bottom-left page space.
fn page_rect(clip: ClipRect, page_height: f32) -> PdfRect {
    PdfRect::new_from_values(
        page_height - clip.bottom,
        clip.left,
        page_height - clip.top,
        clip.right,
    )
}

impl PageTextSource for PdfiumSource {
    fn clipped_lines(&mut self, clip: ClipRect, start_page: usize) -> Result<Vec<Vec<String>>> {
        let header = std::fs::read(&self.path)?;
        if header.len() < 8 || !header.starts_with(b"%PDF-") {
            return Err(ScheduleError::Extraction(format!(
                "{} is not a PDF file",
                self.path.display()
            )));
        }

        let document = self
            .pdfium
            .load_pdf_from_byte_vec(header, None)
            .map_err(|e| ScheduleError::Extraction(format!("{}: {e}", self.path.display())))?;

        let page_count = document.pages().len() as usize;
        if start_page >= page_count {
            return Err(ScheduleError::Extraction(format!(
                "start page {} is beyond the document ({} pages)",
                start_page + 1,
                page_count
            )));
        }

        let mut pages = Vec::with_capacity(page_count - start_page);
        for (page_idx, page) in document.pages().iter().enumerate().skip(start_page) {
            let rect = page_rect(clip, page.height().value);
            let text = page
                .text()
                .map_err(|e| ScheduleError::Extraction(format!("page {}: {e}", page_idx + 1)))?
                .inside_rect(rect);
            debug!(page = page_idx + 1, chars = text.len(), "extracted clipped text");
            pages.push(split_page_text(&text));
        }
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_flips_to_bottom_left_origin() {
        let rect = page_rect(ClipRect::new(50.0, 116.0, 600.0, 812.0), 842.0);
        assert_eq!(rect.bottom.value, 30.0);
        assert_eq!(rect.top.value, 726.0);
        assert_eq!(rect.left.value, 50.0);
        assert_eq!(rect.right.value, 600.0);
    }
}
