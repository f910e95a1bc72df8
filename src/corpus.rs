//! Directory walking and per-file dispatch.
//!
//! Every file under the root is matched to an extractor by extension, its
//! units are split into sentences, and one [`Record`] is emitted per
//! sentence. A file that fails to extract is logged and counted; the run
//! continues unless strict mode is on.

use std::path::{Path, PathBuf};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use walkdir::WalkDir;

use crate::extract::{ExtractError, ExtractorRegistry};
use crate::models::{Extraction, FileType, Record};
use crate::segment::SentenceSegmenter;

/// Separator for joining a word document's comments into one cell.
pub const COMMENT_SEPARATOR: &str = " | ";

/// Errors that abort a corpus run.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to extract {path}: {source}")]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },
}

/// How the walk behaves.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Descend into symlinked directories.
    pub follow_links: bool,
    /// Abort on the first file that fails to extract.
    pub strict: bool,
    /// Show a progress bar on stderr.
    pub show_progress: bool,
}

/// Counts for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusSummary {
    /// Files found under the root.
    pub files_seen: usize,
    /// Files with a known extension that extracted cleanly.
    pub processed: usize,
    /// Files with an unknown extension.
    pub skipped: usize,
    /// Files whose extraction failed.
    pub failed: usize,
    /// Records produced.
    pub records: usize,
}

/// Builds the sentence corpus for a directory tree.
pub struct CorpusBuilder<'a> {
    registry: &'a ExtractorRegistry,
    segmenter: &'a SentenceSegmenter,
    options: WalkOptions,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(registry: &'a ExtractorRegistry, segmenter: &'a SentenceSegmenter) -> Self {
        Self {
            registry,
            segmenter,
            options: WalkOptions::default(),
        }
    }

    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Walk `root` and return the records of every supported file, in
    /// traversal order, with a summary of the run.
    pub fn build(&self, root: &Path) -> Result<(Vec<Record>, CorpusSummary), CorpusError> {
        if !root.is_dir() {
            return Err(CorpusError::NotADirectory(root.to_path_buf()));
        }

        let files = self.collect_files(root);
        let mut summary = CorpusSummary {
            files_seen: files.len(),
            ..CorpusSummary::default()
        };
        let mut records = Vec::new();

        let pb = self.progress_bar(files.len() as u64);

        for path in &files {
            let file_name = file_name_of(path);
            pb.set_message(file_name.clone());

            let Some(file_type) = FileType::from_file_name(&file_name) else {
                tracing::debug!("Skipping unsupported file {}", path.display());
                summary.skipped += 1;
                pb.inc(1);
                continue;
            };

            let Some(extractor) = self.registry.get(file_type) else {
                tracing::debug!("No extractor registered for {}", file_type);
                summary.skipped += 1;
                pb.inc(1);
                continue;
            };

            match extractor.extract(path) {
                Ok(extraction) => {
                    let before = records.len();
                    self.push_records(&mut records, path, &file_name, file_type, extraction);
                    tracing::info!(
                        "{} produced {} sentences",
                        path.display(),
                        records.len() - before
                    );
                    summary.processed += 1;
                }
                Err(source) => {
                    summary.failed += 1;
                    if self.options.strict {
                        pb.finish_and_clear();
                        return Err(CorpusError::Extraction {
                            path: path.clone(),
                            source,
                        });
                    }
                    pb.suspend(|| {
                        tracing::warn!("Error reading {}: {}", path.display(), source);
                        eprintln!("  {} {}", style("✗").red(), path.display());
                    });
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();
        summary.records = records.len();
        Ok((records, summary))
    }

    /// All regular files under `root`, sorted by name within each directory.
    /// Unreadable entries are logged and left out.
    fn collect_files(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(self.options.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            // is_file follows symlinks, so linked files are included
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.into_path())
            .collect()
    }

    fn push_records(
        &self,
        records: &mut Vec<Record>,
        path: &Path,
        file_name: &str,
        file_type: FileType,
        extraction: Extraction,
    ) {
        let source_dir = path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let comments = extraction
            .comments
            .map(|comments| comments.join(COMMENT_SEPARATOR));

        for unit in extraction.units {
            for sentence in self.segmenter.split(&unit.text) {
                records.push(Record {
                    source_dir: source_dir.clone(),
                    file_name: file_name.to_string(),
                    file_type,
                    location: unit.location.clone(),
                    sentence,
                    comments: comments.clone(),
                    metadata: None,
                });
            }
        }
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
        );
        pb
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
