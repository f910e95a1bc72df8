//! Extraction units and output records.

use std::fmt;

use super::FileType;

/// Position of a piece of text within its source file.
///
/// The variant is fixed per file type: word documents carry no position,
/// presentations a slide number, spreadsheets a sheet and row, PDFs a page.
/// All numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Document,
    Slide(u32),
    Sheet { name: String, row: u32 },
    Page(u32),
}

impl Location {
    /// Numeric value for slide and page locations.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            Self::Slide(n) | Self::Page(n) => Some(*n),
            _ => None,
        }
    }

    /// Text form used in output cells; `None` for [`Location::Document`].
    pub fn as_cell(&self) -> Option<String> {
        match self {
            Self::Document => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => Ok(()),
            Self::Slide(n) | Self::Page(n) => write!(f, "{}", n),
            Self::Sheet { name, row } => write!(f, "{}:{}", name, row),
        }
    }
}

/// Raw text taken from one position of a file, before sentence segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionUnit {
    pub location: Location,
    pub text: String,
}

impl ExtractionUnit {
    pub fn new(location: Location, text: impl Into<String>) -> Self {
        Self {
            location,
            text: text.into(),
        }
    }
}

/// Everything an extractor produced for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Units in file order.
    pub units: Vec<ExtractionUnit>,
    /// File-wide review comments. Only word documents set this.
    pub comments: Option<Vec<String>>,
}

impl Extraction {
    pub fn from_units(units: Vec<ExtractionUnit>) -> Self {
        Self {
            units,
            comments: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// One output row: a single sentence with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Directory containing the source file.
    pub source_dir: String,
    pub file_name: String,
    pub file_type: FileType,
    pub location: Location,
    pub sentence: String,
    /// Review comments of the whole file joined with `" | "` (word documents only).
    pub comments: Option<String>,
    /// Reserved column, never populated.
    pub metadata: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(Location::Document.to_string(), "");
        assert_eq!(Location::Slide(3).to_string(), "3");
        assert_eq!(Location::Page(12).to_string(), "12");
        let sheet = Location::Sheet {
            name: "Sheet1".to_string(),
            row: 1,
        };
        assert_eq!(sheet.to_string(), "Sheet1:1");
    }

    #[test]
    fn test_location_cell_and_number() {
        assert_eq!(Location::Document.as_cell(), None);
        assert_eq!(Location::Slide(2).as_cell().as_deref(), Some("2"));
        assert_eq!(Location::Page(4).as_number(), Some(4));
        let sheet = Location::Sheet {
            name: "Data".to_string(),
            row: 9,
        };
        assert_eq!(sheet.as_number(), None);
    }
}
