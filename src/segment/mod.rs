//! Sentence segmentation.
//!
//! Boundaries come from Unicode sentence segmentation (UAX #29) and are then
//! refined with an [`AbbreviationModel`]: a period after a known
//! abbreviation, an initial, or a dotted form like `e.g.` does not end a
//! sentence. Line breaks on their own never end a sentence.

mod model;

use std::sync::{Arc, OnceLock};

use unicode_segmentation::UnicodeSegmentation;

use crate::config::SegmenterConfig;

pub use model::{AbbreviationModel, ModelSource, SegmenterError};

static MODEL: OnceLock<Arc<AbbreviationModel>> = OnceLock::new();

/// Splits text blocks into sentences.
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    model: Arc<AbbreviationModel>,
}

impl SentenceSegmenter {
    /// Segmenter over an explicit model.
    pub fn new(model: AbbreviationModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Resolve the process-wide model once and return a segmenter using it.
    ///
    /// The first successful call fetches or verifies the model; later calls
    /// return the same model regardless of `config`.
    pub fn setup(config: &SegmenterConfig) -> Result<Self, SegmenterError> {
        if let Some(model) = MODEL.get() {
            return Ok(Self {
                model: model.clone(),
            });
        }

        let model = AbbreviationModel::resolve(config)?;
        tracing::info!(
            "Loaded {} segmentation model ({} abbreviations, {:?})",
            model.language(),
            model.len(),
            model.source()
        );
        let model = MODEL.get_or_init(|| Arc::new(model)).clone();
        Ok(Self { model })
    }

    pub fn model(&self) -> &AbbreviationModel {
        &self.model
    }

    /// Split a block of text into trimmed, non-empty sentences.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let flattened = flatten_line_breaks(text);
        let pieces: Vec<(usize, &str)> = flattened.split_sentence_bound_indices().collect();

        let mut sentences = Vec::new();
        let mut start = 0;
        for (i, (offset, piece)) in pieces.iter().enumerate() {
            let end = offset + piece.len();
            if let Some((_, next)) = pieces.get(i + 1) {
                if self.continues_after(piece, next) {
                    continue;
                }
            }
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
        push_trimmed(&mut sentences, &text[start..]);

        sentences
    }

    /// Whether a candidate sentence ending in a period actually stops at an
    /// abbreviation and continues into the next piece.
    fn continues_after(&self, piece: &str, next: &str) -> bool {
        let Some(word) = word_before_period(piece) else {
            return false;
        };

        if self.model.contains(word) {
            return true;
        }

        // Dotted forms like "e.g." or "U.S."
        if word.contains('.') {
            return word.split('.').all(|part| {
                let letters = part.chars().count();
                (1..=2).contains(&letters) && part.chars().all(char::is_alphabetic)
            });
        }

        // A single letter is an initial only when a name follows
        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => self.starts_name(next),
            _ => false,
        }
    }

    /// Whether `next` opens with another initial or a capitalised word that
    /// is not a usual sentence opener.
    fn starts_name(&self, next: &str) -> bool {
        let Some(word) = next.split_whitespace().next() else {
            return false;
        };
        let word = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '.');

        if let Some(letter) = word.strip_suffix('.') {
            let mut chars = letter.chars();
            if matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase()) {
                return true;
            }
        }

        let word = word.trim_end_matches('.');
        word.chars().next().is_some_and(char::is_uppercase) && !self.model.is_sentence_starter(word)
    }
}

/// Replace line and paragraph separators with spaces, keeping byte offsets
/// aligned with the input.
fn flatten_line_breaks(text: &str) -> String {
    let mut flattened = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}' => {
                flattened.extend(std::iter::repeat(' ').take(c.len_utf8()));
            }
            _ => flattened.push(c),
        }
    }
    flattened
}

/// The word immediately before a trailing period, without leading
/// punctuation. `None` if the piece does not end in a period.
fn word_before_period(piece: &str) -> Option<&str> {
    let last = piece.trim_end().rsplit(char::is_whitespace).next()?;
    let word = last.strip_suffix('.')?;
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    (!word.is_empty()).then_some(word)
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
