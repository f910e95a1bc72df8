//! Tesseract OCR backend implementation.
//!
//! Uses Tesseract via command-line for text extraction.

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use super::backend::{command_stdout, OcrBackend, OcrError, OcrResult};
use crate::utils::check_binary;

/// Default Tesseract language.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Tesseract OCR backend.
#[derive(Debug, Clone)]
pub struct TesseractBackend {
    language: String,
}

impl TesseractBackend {
    /// Create a new Tesseract backend for English text.
    pub fn new() -> Self {
        Self::with_language(DEFAULT_LANGUAGE)
    }

    /// Create a backend for a Tesseract language code (e.g. "eng", "deu+fra").
    pub fn with_language(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match command_stdout(output, "tesseract (install tesseract-ocr)", "tesseract failed") {
            Err(OcrError::ToolNotFound(_)) => Err(OcrError::BackendNotAvailable(
                "tesseract not found (install tesseract-ocr)".to_string(),
            )),
            other => other,
        }
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        check_binary("tesseract")
    }

    fn availability_hint(&self) -> String {
        if !check_binary("tesseract") {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        } else if !check_binary("pdftoppm") {
            "pdftoppm not installed. Install with: apt install poppler-utils".to_string()
        } else {
            "Tesseract is available".to_string()
        }
    }

    fn ocr_image(&self, image_path: &Path) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let text = self.run_tesseract(image_path)?;

        Ok(OcrResult {
            text,
            backend: self.name(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_setting() {
        assert_eq!(TesseractBackend::new().language(), "eng");
        assert_eq!(TesseractBackend::with_language("deu").language(), "deu");
    }

    #[test]
    fn test_availability_hint_is_descriptive() {
        let hint = TesseractBackend::new().availability_hint();
        assert!(hint.contains("esseract") || hint.contains("pdftoppm"));
    }
}
