//! Word document (.docx) extraction.
//!
//! Body paragraphs come from `word/document.xml`; review comments from
//! `word/comments.xml`. Comments belong to the whole file, not to the
//! paragraph they are anchored on.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::ooxml::{xml_error, Package};
use super::{ExtractError, FormatExtractor};
use crate::models::{Extraction, ExtractionUnit, FileType, Location};

const DOCUMENT_PART: &str = "word/document.xml";
const COMMENTS_PART: &str = "word/comments.xml";

/// Extracts non-blank body paragraphs and review comments from .docx files.
#[derive(Debug, Default, Clone)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FormatExtractor for DocxExtractor {
    fn file_type(&self) -> FileType {
        FileType::Docx
    }

    fn extract(&self, path: &Path) -> Result<Extraction, ExtractError> {
        let mut package = Package::open(path)?;

        let document = package.require_part(DOCUMENT_PART)?;
        let units = body_paragraphs(&document)?
            .into_iter()
            .map(|text| ExtractionUnit::new(Location::Document, text))
            .collect();

        let comments = match package.read_part(COMMENTS_PART)? {
            Some(xml) => comment_texts(&xml)?,
            None => Vec::new(),
        };

        Ok(Extraction {
            units,
            comments: Some(comments),
        })
    }
}

/// Trimmed, non-blank text of every paragraph that is a direct child of
/// `container`, grouped by container element.
///
/// Text inside text boxes (`w:txbxContent`) and nested tables is not part of
/// the container's own paragraphs.
fn paragraphs_in(
    xml: &str,
    part: &str,
    container: &[u8],
) -> Result<Vec<Vec<String>>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut paragraph: Option<String> = None;
    let mut in_text = false;
    let mut text_box_depth = 0usize;

    loop {
        match reader.read_event().map_err(|e| xml_error(part, e))? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                let parent = stack.last().map(Vec::as_slice);
                match name.as_slice() {
                    n if n == container => groups.push(Vec::new()),
                    b"w:p" if parent == Some(container) => paragraph = Some(String::new()),
                    b"w:txbxContent" if paragraph.is_some() => text_box_depth += 1,
                    b"w:t" if paragraph.is_some() && text_box_depth == 0 => in_text = true,
                    _ => {}
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let in_run = stack.last().map(Vec::as_slice) == Some(b"w:r".as_slice());
                if let Some(text) = paragraph.as_mut().filter(|_| in_run && text_box_depth == 0) {
                    match e.name().as_ref() {
                        b"w:tab" => text.push('\t'),
                        b"w:br" | b"w:cr" => text.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(e) if in_text => {
                let text = e.unescape().map_err(|e| xml_error(part, e))?;
                if let Some(paragraph) = paragraph.as_mut() {
                    paragraph.push_str(&text);
                }
            }
            Event::End(e) => {
                stack.pop();
                let parent = stack.last().map(Vec::as_slice);
                match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:txbxContent" if paragraph.is_some() => {
                        text_box_depth = text_box_depth.saturating_sub(1)
                    }
                    b"w:p" if parent == Some(container) => {
                        let text = paragraph.take().unwrap_or_default();
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            if let Some(group) = groups.last_mut() {
                                group.push(trimmed.to_string());
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(groups)
}

/// Non-blank body paragraphs of `word/document.xml`, in document order.
pub(crate) fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractError> {
    Ok(paragraphs_in(xml, DOCUMENT_PART, b"w:body")?
        .into_iter()
        .flatten()
        .collect())
}

/// Text of each comment in `word/comments.xml`; a comment's paragraphs are
/// joined by newlines. Empty comments are dropped.
pub(crate) fn comment_texts(xml: &str) -> Result<Vec<String>, ExtractError> {
    Ok(paragraphs_in(xml, COMMENTS_PART, b"w:comment")?
        .into_iter()
        .map(|paragraphs| paragraphs.join("\n"))
        .filter(|text| !text.is_empty())
        .collect())
}
