//! Supported document formats.

use serde::{Deserialize, Serialize};

/// Document format, derived from a file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Docx,
    Pptx,
    Xlsx,
    Pdf,
}

impl FileType {
    /// Every supported format, in dispatch order.
    pub const ALL: [FileType; 4] = [Self::Docx, Self::Pptx, Self::Xlsx, Self::Pdf];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Pptx => "pptx",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    /// Parse an extension (without the dot). Case-insensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "pptx" => Some(Self::Pptx),
            "xlsx" => Some(Self::Xlsx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Determine the format from a file name using the text after the final `.`.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        file_name
            .rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name() {
        assert_eq!(FileType::from_file_name("report.docx"), Some(FileType::Docx));
        assert_eq!(FileType::from_file_name("Deck.PPTX"), Some(FileType::Pptx));
        assert_eq!(FileType::from_file_name("a.b.xlsx"), Some(FileType::Xlsx));
        assert_eq!(FileType::from_file_name("scan.Pdf"), Some(FileType::Pdf));
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert_eq!(FileType::from_file_name("notes.txt"), None);
        assert_eq!(FileType::from_file_name("docx"), None);
        assert_eq!(FileType::from_file_name("archive.docx.bak"), None);
    }

    #[test]
    fn test_as_str_roundtrips_all() {
        for file_type in FileType::ALL {
            assert_eq!(FileType::from_extension(file_type.as_str()), Some(file_type));
        }
    }
}
