//! Configuration management for doccorpus using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ocr::{DEFAULT_DPI, DEFAULT_LANGUAGE};

/// Default CSV destination.
pub const DEFAULT_CSV_OUTPUT: &str = "extracted_corpus.csv";
/// Default XLSX destination.
pub const DEFAULT_XLSX_OUTPUT: &str = "extracted_corpus.xlsx";

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// PDF OCR fallback settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Rasterize and OCR pages that have no text layer.
    pub enabled: bool,
    /// Tesseract language code.
    pub language: String,
    /// Render resolution for rasterized pages.
    pub dpi: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: DEFAULT_LANGUAGE.to_string(),
            dpi: DEFAULT_DPI,
        }
    }
}

/// Sentence segmentation model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Explicit abbreviation model file. Must exist when set.
    pub model_path: Option<String>,
    /// Where to fetch the model from when no cached copy exists.
    pub model_url: Option<String>,
    /// Model language; also the cache file name.
    pub language: String,
    /// Override for the model cache directory.
    pub cache_dir: Option<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            model_url: None,
            language: "english".to_string(),
            cache_dir: None,
        }
    }
}

impl SegmenterConfig {
    /// Configured model file, with `~` expanded.
    pub fn model_path(&self) -> Option<PathBuf> {
        self.model_path.as_deref().map(expand_path)
    }

    /// Location of the cached model for the configured language.
    pub fn cache_path(&self) -> PathBuf {
        let dir = match self.cache_dir.as_deref() {
            Some(dir) => expand_path(dir),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("doccorpus")
                .join("punkt"),
        };
        dir.join(format!("{}.abbrev", self.language))
    }
}

/// Directory traversal settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Descend into symlinked directories.
    pub follow_links: bool,
    /// Abort on the first file that fails to extract.
    pub strict: bool,
}

/// Output destinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv: String,
    pub xlsx: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv: DEFAULT_CSV_OUTPUT.to_string(),
            xlsx: DEFAULT_XLSX_OUTPUT.to_string(),
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub segmenter: SegmenterConfig,
    pub walk: WalkConfig,
    pub output: OutputConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    ///
    /// Falls back to defaults when no doccorpus config file is found. A file
    /// that is found but cannot be parsed is an error.
    pub async fn load() -> Result<Self, ConfigError> {
        // Use prefer for file discovery, then parse with serde
        let discovered = match prefer::load("doccorpus").await {
            Ok(pref_config) => pref_config.source_path().map(|p| p.to_path_buf()),
            Err(e) => {
                tracing::debug!("No config file discovered: {}", e);
                None
            }
        };

        match discovered {
            Some(path) => Self::load_from_path(&path).await,
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file path.
    /// Format is chosen by extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(ext, &contents)?;
        config.source_path = Some(path.to_path_buf());

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(ext: &str, contents: &str) -> Result<Self, ConfigError> {
        Ok(match ext {
            "toml" => toml::from_str(contents)?,
            "yaml" | "yml" => serde_yaml::from_str(contents)?,
            _ => serde_json::from_str(contents)?,
        })
    }
}

/// Expand a leading `~` to the home directory.
fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.ocr.enabled);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.ocr.dpi, 300);
        assert_eq!(config.segmenter.language, "english");
        assert!(!config.walk.follow_links);
        assert!(!config.walk.strict);
        assert_eq!(config.output.csv, "extracted_corpus.csv");
        assert_eq!(config.output.xlsx, "extracted_corpus.xlsx");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::parse(
            "toml",
            r#"
            [ocr]
            enabled = false

            [walk]
            strict = true
            "#,
        )
        .unwrap();

        assert!(!config.ocr.enabled);
        assert_eq!(config.ocr.language, "eng");
        assert!(config.walk.strict);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_yaml_and_json() {
        let yaml = Config::parse("yml", "ocr:\n  language: deu\n  dpi: 150\n").unwrap();
        assert_eq!(yaml.ocr.language, "deu");
        assert_eq!(yaml.ocr.dpi, 150);

        let json = Config::parse("json", r#"{"output": {"csv": "out.csv"}}"#).unwrap();
        assert_eq!(json.output.csv, "out.csv");
        assert_eq!(json.output.xlsx, DEFAULT_XLSX_OUTPUT);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(matches!(
            Config::parse("toml", "[ocr\nenabled = "),
            Err(ConfigError::Toml(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_path_sets_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doccorpus.toml");
        std::fs::write(&path, "[segmenter]\nlanguage = \"german\"\n").unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.segmenter.language, "german");
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_load_from_missing_path_is_error() {
        let dir = tempdir().unwrap();
        let err = Config::load_from_path(&dir.path().join("nope.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_segmenter_paths() {
        let config = SegmenterConfig {
            cache_dir: Some("/tmp/models".to_string()),
            language: "german".to_string(),
            ..SegmenterConfig::default()
        };
        assert_eq!(config.cache_path(), PathBuf::from("/tmp/models/german.abbrev"));
        assert_eq!(config.model_path(), None);

        let config = SegmenterConfig {
            model_path: Some("/opt/punkt/english.abbrev".to_string()),
            ..SegmenterConfig::default()
        };
        assert_eq!(
            config.model_path(),
            Some(PathBuf::from("/opt/punkt/english.abbrev"))
        );
    }
}
