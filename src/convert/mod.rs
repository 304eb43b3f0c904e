//! DOCX to Markdown conversion
//!
//! Walks the body blocks in order and emits Markdown lines:
//!
//! - a paragraph without visible text becomes an empty line
//! - heading and list styles become `#`..`###` and `- ` lines with the trimmed text
//! - any other paragraph becomes its runs' text with bold/italic markup
//! - a table becomes a pipe table framed by empty lines

mod emphasis;
mod style;
mod table;

pub use emphasis::{EmphasisPolicy, ItalicMarker, Nesting};
pub use style::{Matching, StyleKind, StyleMap, StyleRule};
pub use table::render_table;

use crate::document::{Block, Document, Paragraph};
use crate::error::Result;
use log::{info, warn};
use std::path::Path;

/// Options for DOCX to Markdown conversion
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Style name classification table
    pub style_map: StyleMap,
    /// Bold/italic markup policy
    pub emphasis: EmphasisPolicy,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style_map(mut self, style_map: StyleMap) -> Self {
        self.style_map = style_map;
        self
    }

    pub fn with_emphasis(mut self, emphasis: EmphasisPolicy) -> Self {
        self.emphasis = emphasis;
        self
    }
}

/// Converts documents to Markdown with a fixed set of options
#[derive(Clone, Debug, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Open and convert a `.docx` file
    pub fn convert_path<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let doc = Document::open(path)?;
        Ok(self.convert_document(&doc))
    }

    /// Convert a `.docx` held in memory
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<String> {
        let doc = Document::from_bytes(bytes)?;
        Ok(self.convert_document(&doc))
    }

    /// Convert a parsed document; lines are joined with `\n`, no trailing newline
    pub fn convert_document(&self, doc: &Document) -> String {
        self.lines(doc).join("\n")
    }

    /// Output lines for a parsed document, in document order
    pub fn lines(&self, doc: &Document) -> Vec<String> {
        let mut lines = Vec::new();

        for block in doc.blocks() {
            match block {
                Block::Paragraph(para) => lines.push(self.paragraph_line(doc, para)),
                Block::Table(table) => {
                    let rendered = render_table(table);
                    if rendered.is_empty() {
                        warn!("skipping table without rows");
                        continue;
                    }
                    lines.push(String::new());
                    lines.extend(rendered);
                    lines.push(String::new());
                }
            }
        }

        info!(
            "converted {} blocks into {} lines",
            doc.blocks().len(),
            lines.len()
        );
        lines
    }

    /// Classify a paragraph by its resolved style names
    pub fn classify(&self, doc: &Document, para: &Paragraph) -> StyleKind {
        match doc.paragraph_style(para) {
            Some(style) => self.options.style_map.classify(style.name, style.base_name),
            None => StyleKind::Body,
        }
    }

    /// The single output line for a paragraph
    fn paragraph_line(&self, doc: &Document, para: &Paragraph) -> String {
        let text = para.text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        if let Some(marker) = self.classify(doc, para).marker() {
            return format!("{} {}", marker, trimmed);
        }

        // Text comes only from runs here, so a non-blank paragraph has at least one.
        para.runs()
            .map(|run| self.options.emphasis.wrap(&run.text(), run.bold(), run.italic()))
            .collect()
    }
}

/// Convert a `.docx` file with default options
pub fn convert<P: AsRef<Path>>(path: P) -> Result<String> {
    Converter::default().convert_path(path)
}
