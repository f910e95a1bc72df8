//! Tabular output of the corpus.
//!
//! The same rows go to a CSV file and an XLSX workbook, in record order,
//! under a fixed header.

mod csv_file;
mod xlsx_file;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::models::{FileType, Record};

pub use csv_file::write_csv;
pub use xlsx_file::{write_xlsx, XLSX_MAX_STRING_LEN};

/// Column headers, in output order.
pub const HEADERS: [&str; 7] = [
    "File Path",
    "File Name",
    "File Type",
    "Page/Slide/Sheet",
    "Extracted sentence",
    "Comments",
    "Metadata",
];

/// Errors writing output files.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write XLSX {path}: {source}")]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

/// One output row, borrowed from a [`Record`].
#[derive(Debug, Serialize)]
pub(crate) struct Row<'a> {
    #[serde(rename = "File Path")]
    pub file_path: &'a str,
    #[serde(rename = "File Name")]
    pub file_name: &'a str,
    #[serde(rename = "File Type")]
    pub file_type: FileType,
    #[serde(rename = "Page/Slide/Sheet")]
    pub location: Option<String>,
    #[serde(rename = "Extracted sentence")]
    pub sentence: &'a str,
    #[serde(rename = "Comments")]
    pub comments: Option<&'a str>,
    #[serde(rename = "Metadata")]
    pub metadata: Option<&'a str>,
}

impl<'a> From<&'a Record> for Row<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            file_path: &record.source_dir,
            file_name: &record.file_name,
            file_type: record.file_type,
            location: record.location.as_cell(),
            sentence: &record.sentence,
            comments: record.comments.as_deref(),
            metadata: record.metadata.as_deref(),
        }
    }
}

/// Writes the corpus to both a CSV file and an XLSX workbook.
#[derive(Debug, Clone)]
pub struct TabularWriter {
    csv_path: PathBuf,
    xlsx_path: PathBuf,
}

impl TabularWriter {
    pub fn new(csv_path: impl Into<PathBuf>, xlsx_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            xlsx_path: xlsx_path.into(),
        }
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    pub fn xlsx_path(&self) -> &Path {
        &self.xlsx_path
    }

    /// Write both files, replacing any existing ones.
    pub fn write(&self, records: &[Record]) -> Result<(), OutputError> {
        write_csv(&self.csv_path, records)?;
        write_xlsx(&self.xlsx_path, records)?;
        Ok(())
    }
}
