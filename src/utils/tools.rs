//! External tool discovery.

/// Tools used for PDF text extraction and the OCR fallback.
pub const PDF_TOOLS: [&str; 3] = ["pdfinfo", "pdftotext", "pdftoppm"];

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Availability of every external tool, in a stable order.
pub fn check_tools() -> Vec<(&'static str, bool)> {
    PDF_TOOLS
        .iter()
        .chain(std::iter::once(&"tesseract"))
        .map(|tool| (*tool, check_binary(tool)))
        .collect()
}
