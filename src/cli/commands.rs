//! CLI commands implementation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use console::style;

use crate::config::{Config, OcrConfig};
use crate::corpus::{CorpusBuilder, CorpusSummary, WalkOptions};
use crate::extract::{ExtractorRegistry, PdfExtractor};
use crate::ocr::{OcrBackend, Poppler, TesseractBackend};
use crate::output::TabularWriter;
use crate::segment::SentenceSegmenter;
use crate::utils::check_tools;

#[derive(Parser, Debug)]
#[command(name = "doccorpus")]
#[command(about = "Extract a sentence corpus from Word, PowerPoint, Excel and PDF files")]
#[command(version)]
pub struct Cli {
    /// Directory to scan recursively
    pub root_dir: PathBuf,

    /// CSV output path
    #[arg(long = "output-csv", alias = "output_csv", value_name = "PATH")]
    pub output_csv: Option<PathBuf>,

    /// XLSX output path
    #[arg(long = "output-xlsx", alias = "output_xlsx", value_name = "PATH")]
    pub output_xlsx: Option<PathBuf>,

    /// Config file (skips auto-discovery)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable the OCR fallback for PDF pages without a text layer
    #[arg(long)]
    pub no_ocr: bool,

    /// Tesseract language for OCR (default: eng)
    #[arg(long, value_name = "LANG")]
    pub ocr_language: Option<String>,

    /// Abort on the first file that fails to extract
    #[arg(long)]
    pub strict: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Effective settings for one run: CLI flags over config file over defaults.
#[derive(Debug, Clone)]
struct RunSettings {
    root_dir: PathBuf,
    csv_path: PathBuf,
    xlsx_path: PathBuf,
    ocr: OcrConfig,
    walk: WalkOptions,
}

impl RunSettings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        let mut ocr = config.ocr.clone();
        if cli.no_ocr {
            ocr.enabled = false;
        }
        if let Some(language) = &cli.ocr_language {
            ocr.language = language.clone();
        }

        Self {
            root_dir: cli.root_dir.clone(),
            csv_path: cli
                .output_csv
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.output.csv)),
            xlsx_path: cli
                .output_xlsx
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.output.xlsx)),
            ocr,
            walk: WalkOptions {
                follow_links: config.walk.follow_links,
                strict: cli.strict || config.walk.strict,
                show_progress: !cli.no_progress,
            },
        }
    }
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path).await?,
        None => Config::load().await?,
    };
    let settings = RunSettings::resolve(&cli, &config);

    let segmenter = SentenceSegmenter::setup(&config.segmenter)
        .context("Failed to set up sentence segmentation")?;

    report_missing_tools();
    let pdf = PdfExtractor::with_page_source(
        Box::new(Poppler::new().with_dpi(settings.ocr.dpi)),
        ocr_backend(&settings.ocr),
    );
    let registry = ExtractorRegistry::standard(pdf);

    cmd_extract(&settings, &registry, &segmenter)
}

fn cmd_extract(
    settings: &RunSettings,
    registry: &ExtractorRegistry,
    segmenter: &SentenceSegmenter,
) -> anyhow::Result<()> {
    println!(
        "{} Scanning {}",
        style("→").cyan(),
        settings.root_dir.display()
    );

    let (records, summary) = CorpusBuilder::new(registry, segmenter)
        .with_options(settings.walk.clone())
        .build(&settings.root_dir)?;

    print_summary(&summary);
    println!("Total sentences extracted: {}", records.len());

    let writer = TabularWriter::new(&settings.csv_path, &settings.xlsx_path);
    writer.write(&records)?;

    println!(
        "{} Saved CSV: {}",
        style("✓").green(),
        display_path(writer.csv_path())
    );
    println!(
        "{} Saved XLSX: {}",
        style("✓").green(),
        display_path(writer.xlsx_path())
    );

    Ok(())
}

fn print_summary(summary: &CorpusSummary) {
    println!(
        "{} {} files: {} processed, {} skipped, {} failed",
        style("✓").green(),
        summary.files_seen,
        summary.processed,
        summary.skipped,
        summary.failed
    );
    if summary.failed > 0 {
        println!(
            "  {} Some files could not be read; rerun with -v for details",
            style("!").yellow()
        );
    }
}

/// Warn about missing external tools. PDF files still fail per file when
/// the text tools are absent.
fn report_missing_tools() {
    for (tool, available) in check_tools() {
        if !available {
            eprintln!(
                "{} {} not found in PATH",
                style("!").yellow(),
                style(tool).bold()
            );
        }
    }
}

/// The OCR backend for the PDF fallback, or `None` when it is disabled or
/// its tools are missing.
fn ocr_backend(config: &OcrConfig) -> Option<Box<dyn OcrBackend>> {
    if !config.enabled {
        tracing::info!("OCR fallback disabled");
        return None;
    }

    let tesseract = TesseractBackend::with_language(&config.language);
    if !tesseract.is_available() || !Poppler::can_render() {
        eprintln!(
            "{} OCR fallback disabled: {}",
            style("!").yellow(),
            tesseract.availability_hint()
        );
        return None;
    }

    tracing::info!(
        "OCR fallback enabled ({}, language {}, {} dpi)",
        tesseract.name(),
        tesseract.language(),
        config.dpi
    );
    Some(Box::new(tesseract))
}

/// Absolute form of an output path for display.
fn display_path(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("doccorpus").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_come_from_config() {
        let cli = parse(&["docs"]);
        let settings = RunSettings::resolve(&cli, &Config::default());

        assert_eq!(settings.root_dir, PathBuf::from("docs"));
        assert_eq!(settings.csv_path, PathBuf::from("extracted_corpus.csv"));
        assert_eq!(settings.xlsx_path, PathBuf::from("extracted_corpus.xlsx"));
        assert!(settings.ocr.enabled);
        assert_eq!(settings.ocr.language, "eng");
        assert!(!settings.walk.strict);
        assert!(settings.walk.show_progress);
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.output.csv = "from_config.csv".to_string();
        config.ocr.language = "deu".to_string();

        let cli = parse(&[
            "docs",
            "--output_csv",
            "cli.csv",
            "--output-xlsx",
            "cli.xlsx",
            "--no-ocr",
            "--ocr-language",
            "fra",
            "--strict",
            "--no-progress",
        ]);
        let settings = RunSettings::resolve(&cli, &config);

        assert_eq!(settings.csv_path, PathBuf::from("cli.csv"));
        assert_eq!(settings.xlsx_path, PathBuf::from("cli.xlsx"));
        assert!(!settings.ocr.enabled);
        assert_eq!(settings.ocr.language, "fra");
        assert!(settings.walk.strict);
        assert!(!settings.walk.show_progress);
    }

    #[test]
    fn test_config_values_used_without_flags() {
        let mut config = Config::default();
        config.output.xlsx = "corpus.xlsx".to_string();
        config.walk.strict = true;
        config.walk.follow_links = true;
        config.ocr.enabled = false;

        let settings = RunSettings::resolve(&parse(&["docs"]), &config);
        assert_eq!(settings.xlsx_path, PathBuf::from("corpus.xlsx"));
        assert!(settings.walk.strict);
        assert!(settings.walk.follow_links);
        assert!(ocr_backend(&settings.ocr).is_none());
    }

    #[test]
    fn test_config_only_from_flag() {
        let cli = parse(&["docs"]);
        assert_eq!(cli.config, None);

        let cli = parse(&["docs", "-c", "custom.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_root_dir_required() {
        assert!(Cli::try_parse_from(["doccorpus"]).is_err());
    }
}
