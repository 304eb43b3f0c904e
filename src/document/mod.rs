//! Document model - the block sequence of a DOCX body plus its styles

mod body;
mod paragraph;
mod run;
mod styles;
mod table;

pub use body::Block;
pub use paragraph::Paragraph;
pub use run::{BreakType, Run, RunContent, RunProperties};
pub use styles::{ResolvedStyle, Style, StyleType, Styles};
pub use table::{Table, TableCell, TableRow, VMerge};

use crate::error::{Error, Result};
use crate::opc::{rel_types, Package, WORD_MAIN_TYPES};
use crate::xml::{skip_element, unexpected_eof};
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

/// A parsed DOCX document
#[derive(Clone, Debug, Default)]
pub struct Document {
    /// Body content in document order
    blocks: Vec<Block>,
    /// Style definitions
    styles: Styles,
}

impl Document {
    /// Open a document from a file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let package = Package::open(path)?;
        Self::from_package(&package)
    }

    /// Open a document from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let package = Package::from_bytes(bytes)?;
        Self::from_package(&package)
    }

    /// Build the document from an already opened package
    pub fn from_package(package: &Package) -> Result<Self> {
        let doc_part = package
            .main_document_part()
            .ok_or_else(|| Error::MissingPart("Main document part not found".into()))?;

        if !WORD_MAIN_TYPES.contains(&doc_part.content_type()) {
            return Err(Error::UnsupportedContentType(
                doc_part.content_type().to_string(),
            ));
        }

        let styles_part = package
            .related_part(doc_part, rel_types::STYLES)
            .or_else(|| package.related_part(doc_part, rel_types::STYLES_STRICT));
        let styles_xml = match styles_part {
            Some(part) => Some(part.data_as_str()?),
            None => {
                debug!("document has no styles part");
                None
            }
        };

        Self::from_xml(doc_part.data_as_str()?, styles_xml)
    }

    /// Parse from the XML of the main document part and, optionally, styles.xml
    pub fn from_xml(document_xml: &str, styles_xml: Option<&str>) -> Result<Self> {
        let blocks = parse_document_xml(document_xml)?;
        let styles = match styles_xml {
            Some(xml) => Styles::from_xml(xml)?,
            None => Styles::new(),
        };
        Ok(Self { blocks, styles })
    }

    /// Create a document from blocks and styles
    pub fn from_blocks(blocks: Vec<Block>, styles: Styles) -> Self {
        Self { blocks, styles }
    }

    /// Body content in document order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Style definitions
    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Get all paragraphs
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    /// Get all tables
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(Block::as_table)
    }

    /// Resolved style names of a paragraph
    pub fn paragraph_style<'a>(&'a self, para: &'a Paragraph) -> Option<ResolvedStyle<'a>> {
        self.styles.resolve(para.style())
    }
}

/// Parse document.xml content into body blocks
fn parse_document_xml(xml: &str) -> Result<Vec<Block>> {
    // Text is not trimmed: whitespace inside w:t is content.
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut blocks = None;
    let mut in_document = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().local_name().as_ref() {
                b"body" => blocks = Some(body::parse_body(&mut reader)?),
                b"document" => in_document = true,
                _ => skip_element(&mut reader, &e)?,
            },
            Event::Empty(e) => {
                if e.name().local_name().as_ref() == b"body" {
                    blocks = Some(Vec::new());
                }
            }
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"document" {
                    in_document = false;
                }
            }
            Event::Eof if in_document => return Err(unexpected_eof("w:document")),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    blocks.ok_or_else(|| Error::InvalidDocument("Missing w:body element".into()))
}
