//! Format-specific text extraction.
//!
//! Each supported format implements [`FormatExtractor`]; the
//! [`ExtractorRegistry`] maps a [`FileType`] to its extractor. Supporting a
//! new format means adding a `FileType` variant and registering one more
//! extractor.

mod docx;
mod ooxml;
mod pdf;
mod pptx;
mod xlsx;

use std::path::Path;

use thiserror::Error;

use crate::models::{Extraction, FileType};
use crate::ocr::OcrError;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use pptx::PptxExtractor;
pub use xlsx::{XlsxExtractor, CELL_SEPARATOR};

/// Errors that can occur during text extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid Office package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Malformed XML in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Missing package part: {0}")]
    MissingPart(String),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error(transparent)]
    Ocr(#[from] OcrError),
}

/// Turns one file into extraction units.
pub trait FormatExtractor {
    /// The format this extractor handles.
    fn file_type(&self) -> FileType;

    /// Extract the units of a file, in file order.
    fn extract(&self, path: &Path) -> Result<Extraction, ExtractError>;
}

/// Extractors keyed by file type.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn FormatExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the four built-in formats.
    pub fn standard(pdf: PdfExtractor) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DocxExtractor::new()));
        registry.register(Box::new(PptxExtractor::new()));
        registry.register(Box::new(XlsxExtractor::new()));
        registry.register(Box::new(pdf));
        registry
    }

    /// Register an extractor, replacing any previous one for the same type.
    pub fn register(&mut self, extractor: Box<dyn FormatExtractor>) {
        let file_type = extractor.file_type();
        self.extractors.retain(|e| e.file_type() != file_type);
        self.extractors.push(extractor);
    }

    /// Extractor for a file type.
    pub fn get(&self, file_type: FileType) -> Option<&dyn FormatExtractor> {
        self.extractors
            .iter()
            .find(|e| e.file_type() == file_type)
            .map(|e| e.as_ref())
    }

    /// Registered file types.
    pub fn file_types(&self) -> impl Iterator<Item = FileType> + '_ {
        self.extractors.iter().map(|e| e.file_type())
    }
}
