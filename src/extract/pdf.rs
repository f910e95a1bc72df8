//! PDF extraction with per-page OCR fallback.
//!
//! Each page first uses its native text layer. Only when that is blank is
//! the page rasterized on its own and passed to the OCR backend.

use std::path::Path;

use tempfile::TempDir;

use super::{ExtractError, FormatExtractor};
use crate::models::{Extraction, ExtractionUnit, FileType, Location};
use crate::ocr::{OcrBackend, PdfPageSource, Poppler};

/// Extracts per-page text from PDFs.
pub struct PdfExtractor {
    pages: Box<dyn PdfPageSource>,
    /// OCR fallback; `None` disables it.
    ocr: Option<Box<dyn OcrBackend>>,
}

impl PdfExtractor {
    /// Extractor using Poppler for pages and the given OCR backend.
    pub fn new(ocr: Option<Box<dyn OcrBackend>>) -> Self {
        Self::with_page_source(Box::new(Poppler::new()), ocr)
    }

    pub fn with_page_source(
        pages: Box<dyn PdfPageSource>,
        ocr: Option<Box<dyn OcrBackend>>,
    ) -> Self {
        Self { pages, ocr }
    }

    pub fn ocr_enabled(&self) -> bool {
        self.ocr.is_some()
    }

    /// Walk the pages, appending units as they are produced so a failure
    /// part-way through keeps the earlier pages.
    fn extract_pages(&self, path: &Path, units: &mut Vec<ExtractionUnit>) -> Result<(), ExtractError> {
        let page_count = self.pages.page_count(path)?;
        tracing::debug!("{} has {} pages", path.display(), page_count);

        for page in 1..=page_count {
            let native = self.pages.page_text(path, page)?;
            if !native.trim().is_empty() {
                units.push(ExtractionUnit::new(Location::Page(page), native));
                continue;
            }

            let Some(ocr) = self.ocr.as_ref() else {
                continue;
            };

            let temp_dir = TempDir::new()?;
            let image = self.pages.render_page(path, page, temp_dir.path())?;
            let result = ocr.ocr_image(&image)?;
            tracing::debug!(
                "OCR of page {} of {} took {}ms ({})",
                page,
                path.display(),
                result.processing_time_ms,
                result.backend
            );

            if !result.text.trim().is_empty() {
                units.push(ExtractionUnit::new(Location::Page(page), result.text));
            }
        }

        Ok(())
    }
}

impl FormatExtractor for PdfExtractor {
    fn file_type(&self) -> FileType {
        FileType::Pdf
    }

    /// Never fails: errors stop the file, are logged, and the pages read so
    /// far are returned.
    fn extract(&self, path: &Path) -> Result<Extraction, ExtractError> {
        let mut units = Vec::new();
        if let Err(e) = self.extract_pages(path, &mut units) {
            tracing::warn!(
                "Error reading PDF {} (kept {} pages): {}",
                path.display(),
                units.len(),
                e
            );
        }
        Ok(Extraction::from_units(units))
    }
}
