//! PDF page tooling backed by poppler-utils.
//!
//! - `pdfinfo` for the page count
//! - `pdftotext` for the native text layer of a single page
//! - `pdftoppm` to rasterize a single page for OCR

use std::path::{Path, PathBuf};
use std::process::Command;

use super::backend::{command_stdout, OcrError};
use crate::utils::check_binary;

/// Default rasterization resolution for OCR.
pub const DEFAULT_DPI: u32 = 300;

/// Per-page access to a PDF.
pub trait PdfPageSource {
    /// Number of pages. Fails if the file cannot be opened as a PDF.
    fn page_count(&self, pdf_path: &Path) -> Result<u32, OcrError>;

    /// Native text layer of one page (1-indexed).
    fn page_text(&self, pdf_path: &Path, page: u32) -> Result<String, OcrError>;

    /// Rasterize exactly one page into `output_dir`, returning the image path.
    fn render_page(&self, pdf_path: &Path, page: u32, output_dir: &Path)
        -> Result<PathBuf, OcrError>;
}

/// Poppler command-line tools.
#[derive(Debug, Clone)]
pub struct Poppler {
    dpi: u32,
}

impl Default for Poppler {
    fn default() -> Self {
        Self { dpi: DEFAULT_DPI }
    }
}

impl Poppler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rasterization resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Whether page rendering is possible.
    pub fn can_render() -> bool {
        check_binary("pdftoppm")
    }
}

/// Parse the `Pages:` line of `pdfinfo` output.
fn parse_page_count(pdfinfo_output: &str) -> Option<u32> {
    pdfinfo_output
        .lines()
        .find(|line| line.starts_with("Pages:"))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse().ok())
}

/// Find the image pdftoppm wrote for a page.
///
/// pdftoppm zero-pads the page number to the width of the document's page
/// count: page-1.png, page-01.png, page-001.png...
fn find_page_image(dir: &Path, page: u32) -> Option<PathBuf> {
    (1..=6)
        .map(|digits| dir.join(format!("page-{:0width$}.png", page, width = digits)))
        .find(|path| path.exists())
}

impl PdfPageSource for Poppler {
    fn page_count(&self, pdf_path: &Path) -> Result<u32, OcrError> {
        let output = Command::new("pdfinfo").arg(pdf_path).output();
        let stdout = command_stdout(output, "pdfinfo (install poppler-utils)", "pdfinfo failed")?;

        parse_page_count(&stdout).ok_or_else(|| {
            OcrError::OcrFailed(format!("pdfinfo reported no page count for {}", pdf_path.display()))
        })
    }

    fn page_text(&self, pdf_path: &Path, page: u32) -> Result<String, OcrError> {
        let page_str = page.to_string();
        let output = Command::new("pdftotext")
            .args(["-layout", "-enc", "UTF-8", "-f", &page_str, "-l", &page_str])
            .arg(pdf_path)
            .arg("-") // Output to stdout
            .output();

        command_stdout(
            output,
            "pdftotext (install poppler-utils)",
            &format!("pdftotext failed on page {}", page),
        )
    }

    fn render_page(
        &self,
        pdf_path: &Path,
        page: u32,
        output_dir: &Path,
    ) -> Result<PathBuf, OcrError> {
        let page_str = page.to_string();
        let dpi = self.dpi.to_string();
        let output = Command::new("pdftoppm")
            .args(["-png", "-r", &dpi, "-f", &page_str, "-l", &page_str])
            .arg(pdf_path)
            .arg(output_dir.join("page"))
            .output();

        command_stdout(
            output,
            "pdftoppm (install poppler-utils)",
            &format!("pdftoppm failed to convert page {}", page),
        )?;

        find_page_image(output_dir, page)
            .ok_or_else(|| OcrError::OcrFailed(format!("No image generated for page {}", page)))
    }
}
