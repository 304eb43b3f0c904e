//! # docx-markdown
//!
//! Convert DOCX documents to Markdown.
//!
//! Headings and list paragraphs are recognised by style name, bold and
//! italic runs become `**`/`*` markup and tables become pipe tables.
//! Images, headers/footers, footnotes and hyperlink targets are dropped.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docx_markdown::{convert, ConvertOptions, Converter, StyleMap};
//!
//! // Default options
//! let markdown = convert("report.docx")?;
//!
//! // Substring style matching, as older converters did
//! let converter = Converter::new(ConvertOptions::new().with_style_map(StyleMap::substring()));
//! let markdown = converter.convert_path("report.docx")?;
//! ```

pub mod convert;
pub mod document;
pub mod error;
pub mod opc;
pub mod xml;

pub use convert::{
    convert, ConvertOptions, Converter, EmphasisPolicy, ItalicMarker, Matching, Nesting,
    StyleKind, StyleMap, StyleRule,
};
pub use document::{Block, Document, Paragraph, Run, Table};
pub use error::{Error, Result};
pub use opc::{Package, Part, PartUri};
