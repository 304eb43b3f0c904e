//! Run element (w:r) - a contiguous run of text with uniform formatting

use crate::error::Result;
use crate::xml::{get_w_attr, get_w_val, parse_bool, read_text, skip_element, unexpected_eof};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Run element (w:r)
#[derive(Clone, Debug, Default)]
pub struct Run {
    /// Direct run properties
    pub properties: Option<RunProperties>,
    /// Run content
    pub content: Vec<RunContent>,
}

/// Text-bearing content within a run
#[derive(Clone, Debug, PartialEq)]
pub enum RunContent {
    /// Text (w:t)
    Text(String),
    /// Tab (w:tab, w:ptab)
    Tab,
    /// Break (w:br)
    Break(BreakType),
    /// Carriage return (w:cr)
    CarriageReturn,
    /// Non-breaking hyphen
    NoBreakHyphen,
}

/// Break type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BreakType {
    #[default]
    TextWrapping,
    Page,
    Column,
}

/// Run properties (w:rPr), only what the converter reads
#[derive(Clone, Debug, Default)]
pub struct RunProperties {
    /// Character style ID
    pub style: Option<String>,
    /// Bold; `None` when not set directly on the run
    pub bold: Option<bool>,
    /// Italic; `None` when not set directly on the run
    pub italic: Option<bool>,
}

impl Run {
    /// Create a run with plain text
    pub fn new(text: impl Into<String>) -> Self {
        Run {
            content: vec![RunContent::Text(text.into())],
            ..Default::default()
        }
    }

    /// Parse from reader (after w:r start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, _start: &BytesStart) -> Result<Self> {
        let mut run = Run::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"rPr" => run.properties = Some(RunProperties::from_reader(reader)?),
                    b"t" => run.content.push(RunContent::Text(read_text(reader, &e)?)),
                    _ => {
                        // drawings, fields, deleted text, alternate content
                        skip_element(reader, &e)?;
                    }
                },
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"tab" | b"ptab" => run.content.push(RunContent::Tab),
                    b"br" => {
                        let break_type = match get_w_attr(&e, "type").as_deref() {
                            Some("page") => BreakType::Page,
                            Some("column") => BreakType::Column,
                            _ => BreakType::TextWrapping,
                        };
                        run.content.push(RunContent::Break(break_type));
                    }
                    b"cr" => run.content.push(RunContent::CarriageReturn),
                    b"noBreakHyphen" => run.content.push(RunContent::NoBreakHyphen),
                    _ => {}
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"r" {
                        break;
                    }
                }
                Event::Eof => return Err(unexpected_eof("w:r")),
                _ => {}
            }
            buf.clear();
        }

        Ok(run)
    }

    /// Get all text in this run
    pub fn text(&self) -> String {
        let mut result = String::new();
        for content in &self.content {
            match content {
                RunContent::Text(t) => result.push_str(t),
                RunContent::Tab => result.push('\t'),
                RunContent::Break(BreakType::TextWrapping) => result.push('\n'),
                RunContent::Break(_) => {}
                RunContent::CarriageReturn => result.push('\n'),
                RunContent::NoBreakHyphen => result.push('-'),
            }
        }
        result
    }

    /// Check if bold
    pub fn bold(&self) -> bool {
        self.properties.as_ref().and_then(|p| p.bold).unwrap_or(false)
    }

    /// Check if italic
    pub fn italic(&self) -> bool {
        self.properties.as_ref().and_then(|p| p.italic).unwrap_or(false)
    }

    /// Set bold
    pub fn set_bold(&mut self, bold: bool) {
        self.properties.get_or_insert_with(Default::default).bold = Some(bold);
    }

    /// Set italic
    pub fn set_italic(&mut self, italic: bool) {
        self.properties.get_or_insert_with(Default::default).italic = Some(italic);
    }
}

impl RunProperties {
    /// Parse from reader (after w:rPr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut props = RunProperties::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => skip_element(reader, &e)?,
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"rStyle" => props.style = get_w_val(&e),
                    b"b" => props.bold = Some(parse_bool(&e)),
                    b"i" => props.italic = Some(parse_bool(&e)),
                    _ => {}
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"rPr" {
                        break;
                    }
                }
                Event::Eof => return Err(unexpected_eof("w:rPr")),
                _ => {}
            }
            buf.clear();
        }

        Ok(props)
    }
}
