//! OCR and PDF page tooling.
//!
//! - pdfinfo / pdftotext / pdftoppm (Poppler) for page counts, native text
//!   and page rasterization
//! - Tesseract OCR for rasterized pages
//!
//! Backends implement [`OcrBackend`] so the PDF extractor can be driven by
//! any engine, including in-memory fakes.

mod backend;
mod pdf_utils;
mod tesseract;

pub use backend::{OcrBackend, OcrError, OcrResult};
pub use pdf_utils::{PdfPageSource, Poppler, DEFAULT_DPI};
pub use tesseract::{TesseractBackend, DEFAULT_LANGUAGE};
