//! doccorpus - sentence corpus extraction from office documents and PDFs.
//!
//! Walks a directory tree, extracts text from .docx, .pptx, .xlsx and .pdf
//! files, splits it into sentences and writes one row per sentence to CSV
//! and XLSX.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod output;
pub mod segment;
pub mod utils;
