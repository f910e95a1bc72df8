//! Shared utility functions.
//!
//! - `tools`: locating external binaries (poppler, tesseract)
//! - `download`: fetching model files

mod download;
mod tools;

pub use download::{download_file, ensure_file, DownloadError};
pub use tools::{check_binary, check_tools, PDF_TOOLS};
