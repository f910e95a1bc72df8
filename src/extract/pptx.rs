//! Presentation (.pptx) extraction.
//!
//! Slides are read in presentation order. Each slide becomes one unit: the
//! text of its top-level shapes, blank shapes skipped, joined by a space.

use std::path::Path;
use std::sync::LazyLock;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use regex::Regex;

use super::ooxml::{attribute, relationships, resolve_target, xml_error, Package};
use super::{ExtractError, FormatExtractor};
use crate::models::{Extraction, ExtractionUnit, FileType, Location};

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

static SLIDE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ppt/slides/slide(\d+)\.xml$").expect("valid slide regex"));

/// Extracts per-slide text from .pptx files.
#[derive(Debug, Default, Clone)]
pub struct PptxExtractor;

impl PptxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FormatExtractor for PptxExtractor {
    fn file_type(&self) -> FileType {
        FileType::Pptx
    }

    fn extract(&self, path: &Path) -> Result<Extraction, ExtractError> {
        let mut package = Package::open(path)?;

        let mut units = Vec::new();
        for (index, part) in slide_parts(&mut package)?.iter().enumerate() {
            let xml = package.require_part(part)?;
            let text = shape_texts(&xml, part)?.join(" ");
            units.push(ExtractionUnit::new(Location::Slide(index as u32 + 1), text));
        }

        Ok(Extraction::from_units(units))
    }
}

/// Slide part names in presentation order.
///
/// Uses the slide id list of `ppt/presentation.xml`; packages without one
/// fall back to numeric `slideN.xml` order.
fn slide_parts(package: &mut Package) -> Result<Vec<String>, ExtractError> {
    if let (Some(presentation), Some(rels)) = (
        package.read_part(PRESENTATION_PART)?,
        package.read_part(PRESENTATION_RELS_PART)?,
    ) {
        let targets = relationships(&rels, PRESENTATION_RELS_PART)?;
        let ordered: Vec<String> = slide_relationship_ids(&presentation)?
            .iter()
            .filter_map(|id| targets.get(id))
            .map(|target| resolve_target("ppt", target))
            .collect();
        if !ordered.is_empty() {
            return Ok(ordered);
        }
    }

    let mut numbered: Vec<(u32, String)> = package
        .part_names()
        .into_iter()
        .filter_map(|name| {
            let number = SLIDE_PART.captures(&name)?.get(1)?.as_str().parse().ok()?;
            Some((number, name))
        })
        .collect();
    numbered.sort();
    Ok(numbered.into_iter().map(|(_, name)| name).collect())
}

/// Relationship ids of `p:sldIdLst`, in order.
fn slide_relationship_ids(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader
            .read_event()
            .map_err(|e| xml_error(PRESENTATION_PART, e))?
        {
            Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"p:sldId" => {
                if let Some(id) = attribute(e, b"r:id") {
                    ids.push(id);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(ids)
}

/// Trimmed, non-blank text of each top-level shape on a slide.
///
/// Grouped shapes, tables and charts carry no text of their own at the top
/// level and are skipped. A shape's paragraphs are joined by newlines.
pub(crate) fn shape_texts(xml: &str, part: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut shapes = Vec::new();
    let mut paragraphs: Option<Vec<String>> = None;
    let mut paragraph: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(|e| xml_error(part, e))? {
            Event::Start(e) => {
                let parent = stack.last().map(Vec::as_slice);
                match e.name().as_ref() {
                    b"p:sp" if parent == Some(b"p:spTree".as_slice()) => {
                        paragraphs = Some(Vec::new())
                    }
                    b"a:p" if paragraphs.is_some() => paragraph = Some(String::new()),
                    b"a:t" if paragraph.is_some() => in_text = true,
                    _ => {}
                }
                stack.push(e.name().as_ref().to_vec());
            }
            Event::Empty(e) => match e.name().as_ref() {
                b"a:br" => {
                    if let Some(paragraph) = paragraph.as_mut() {
                        paragraph.push('\n');
                    }
                }
                b"a:p" => {
                    if let Some(paragraphs) = paragraphs.as_mut() {
                        paragraphs.push(String::new());
                    }
                }
                _ => {}
            },
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
                    b"a:t" => in_text = false,
                    b"a:p" => {
                        if let (Some(text), Some(paragraphs)) = (paragraph.take(), paragraphs.as_mut()) {
                            paragraphs.push(text);
                        }
                    }
                    b"p:sp" if parent == Some(b"p:spTree".as_slice()) => {
                        let text = paragraphs.take().unwrap_or_default().join("\n");
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            shapes.push(trimmed.to_string());
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(shapes)
}
