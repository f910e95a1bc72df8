//! Abbreviation model for sentence boundary detection.
//!
//! A model is a plain-text list of abbreviations (one per line, `#` starts a
//! comment). It is resolved once per process: an explicitly configured file,
//! then a cached copy in the data directory, then a configured download URL,
//! then the built-in English list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::SegmenterConfig;
use crate::utils::{ensure_file, DownloadError};

const BUILTIN_ENGLISH: &str = include_str!("english.abbrev");

/// Capitalised words that usually open a sentence rather than continue a
/// name, so a single-letter word before them ends the sentence.
const SENTENCE_STARTERS: &[&str] = &[
    "a", "after", "all", "an", "and", "as", "at", "but", "each", "for", "he", "her", "his",
    "however", "i", "if", "in", "it", "its", "no", "now", "of", "on", "our", "she", "so",
    "some", "that", "the", "their", "then", "there", "these", "they", "this", "those", "to",
    "we", "what", "when", "which", "while", "with", "you",
];

/// Errors resolving or loading a segmentation model.
#[derive(Debug, Error)]
pub enum SegmenterError {
    #[error("Segmentation model not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Failed to read segmentation model {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// Where a model was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Builtin,
    File(PathBuf),
}

/// Known abbreviations for one language.
#[derive(Debug, Clone)]
pub struct AbbreviationModel {
    language: String,
    abbreviations: HashSet<String>,
    source: ModelSource,
}

impl AbbreviationModel {
    /// Parse model text.
    pub fn parse(language: &str, contents: &str, source: ModelSource) -> Self {
        let abbreviations = contents
            .lines()
            .map(|line| line.split('#').next().unwrap_or("").trim())
            .filter(|line| !line.is_empty())
            .map(|line| line.trim_end_matches('.').to_lowercase())
            .collect();

        Self {
            language: language.to_string(),
            abbreviations,
            source,
        }
    }

    /// The model compiled into the binary.
    pub fn builtin_english() -> Self {
        Self::parse("english", BUILTIN_ENGLISH, ModelSource::Builtin)
    }

    /// Load a model file.
    pub fn from_file(language: &str, path: &Path) -> Result<Self, SegmenterError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SegmenterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(
            language,
            &contents,
            ModelSource::File(path.to_path_buf()),
        ))
    }

    /// Fetch or verify the model described by `config`.
    pub fn resolve(config: &SegmenterConfig) -> Result<Self, SegmenterError> {
        if let Some(path) = config.model_path() {
            if !path.exists() {
                return Err(SegmenterError::ModelNotFound(path));
            }
            return Self::from_file(&config.language, &path);
        }

        let cached = config.cache_path();
        if cached.exists() {
            tracing::debug!("Using cached segmentation model {}", cached.display());
            return Self::from_file(&config.language, &cached);
        }

        if let Some(url) = config.model_url.as_deref() {
            ensure_file(url, &cached)?;
            return Self::from_file(&config.language, &cached);
        }

        if config.language != "english" {
            tracing::warn!(
                "No segmentation model for '{}', using built-in English abbreviations",
                config.language
            );
        }
        Ok(Self::builtin_english())
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.abbreviations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abbreviations.is_empty()
    }

    /// Whether `word` commonly starts a sentence.
    pub fn is_sentence_starter(&self, word: &str) -> bool {
        SENTENCE_STARTERS.contains(&word.to_lowercase().as_str())
    }

    /// Whether `word` (without its trailing period) is a known abbreviation.
    pub fn contains(&self, word: &str) -> bool {
        self.abbreviations.contains(&word.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &Path) -> SegmenterConfig {
        SegmenterConfig {
            cache_dir: Some(dir.to_string_lossy().to_string()),
            ..SegmenterConfig::default()
        }
    }

    #[test]
    fn test_parse_ignores_comments_and_case() {
        let model = AbbreviationModel::parse(
            "english",
            "# header\nDr.\n  etc  # trailing comment\n\n",
            ModelSource::Builtin,
        );
        assert_eq!(model.len(), 2);
        assert!(model.contains("dr"));
        assert!(model.contains("DR"));
        assert!(model.contains("etc"));
    }

    #[test]
    fn test_sentence_starters() {
        let model = AbbreviationModel::builtin_english();
        assert!(model.is_sentence_starter("The"));
        assert!(model.is_sentence_starter("it"));
        assert!(!model.is_sentence_starter("Tolkien"));
    }

    #[test]
    fn test_builtin_has_common_titles() {
        let model = AbbreviationModel::builtin_english();
        assert!(model.contains("mr"));
        assert!(model.contains("Prof"));
        assert!(!model.contains("hello"));
        assert_eq!(model.source(), &ModelSource::Builtin);
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.abbrev");
        std::fs::write(&path, "zzz\n").unwrap();

        let config = SegmenterConfig {
            model_path: Some(path.to_string_lossy().to_string()),
            ..config_in(dir.path())
        };
        let model = AbbreviationModel::resolve(&config).unwrap();
        assert!(model.contains("zzz"));
        assert_eq!(model.source(), &ModelSource::File(path));
    }

    #[test]
    fn test_resolve_missing_explicit_path_is_error() {
        let dir = tempdir().unwrap();
        let config = SegmenterConfig {
            model_path: Some(dir.path().join("absent.abbrev").to_string_lossy().to_string()),
            ..config_in(dir.path())
        };
        assert!(matches!(
            AbbreviationModel::resolve(&config),
            Err(SegmenterError::ModelNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_prefers_cache_over_url() {
        let dir = tempdir().unwrap();
        let config = SegmenterConfig {
            model_url: Some("http://127.0.0.1:9/never-fetched".to_string()),
            ..config_in(dir.path())
        };
        std::fs::write(config.cache_path(), "cachedabbr\n").unwrap();

        let model = AbbreviationModel::resolve(&config).unwrap();
        assert!(model.contains("cachedabbr"));
    }

    #[test]
    fn test_resolve_falls_back_to_builtin() {
        let dir = tempdir().unwrap();
        let model = AbbreviationModel::resolve(&config_in(dir.path())).unwrap();
        assert_eq!(model.source(), &ModelSource::Builtin);
    }
}
