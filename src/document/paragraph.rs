//! Paragraph element (w:p)

use crate::document::Run;
use crate::error::Result;
use crate::xml::{get_w_val, skip_element, unexpected_eof};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Paragraph element (w:p)
#[derive(Clone, Debug, Default)]
pub struct Paragraph {
    /// Paragraph style ID (w:pStyle)
    pub style: Option<String>,
    /// Runs in document order, including those nested in hyperlinks
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Create a new paragraph with a single plain run
    pub fn new(text: impl Into<String>) -> Self {
        Paragraph {
            style: None,
            runs: vec![Run::new(text)],
        }
    }

    /// Parse paragraph from reader (after w:p start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, _start: &BytesStart) -> Result<Self> {
        let mut para = Paragraph::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"pPr" => para.style = parse_style_id(reader)?,
                    b"r" => para.runs.push(Run::from_reader(reader, &e)?),
                    b"hyperlink" => read_hyperlink_runs(reader, &mut para.runs)?,
                    _ => skip_element(reader, &e)?,
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"p" {
                        break;
                    }
                }
                Event::Eof => return Err(unexpected_eof("w:p")),
                _ => {}
            }
            buf.clear();
        }

        Ok(para)
    }

    /// Get all text in this paragraph
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text()).collect()
    }

    /// Get style ID
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Get all runs
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter()
    }

    /// Check whether the paragraph has no visible text
    pub fn is_blank(&self) -> bool {
        self.text().trim().is_empty()
    }

    /// Add a run to this paragraph
    pub fn add_run(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Set style ID
    pub fn set_style(&mut self, style: impl Into<String>) {
        self.style = Some(style.into());
    }
}

/// Read w:pPr, keeping only the style ID
fn parse_style_id<R: BufRead>(reader: &mut Reader<R>) -> Result<Option<String>> {
    let mut style = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if e.name().local_name().as_ref() == b"pStyle" {
                    style = get_w_val(&e);
                }
                skip_element(reader, &e)?;
            }
            Event::Empty(e) => {
                if e.name().local_name().as_ref() == b"pStyle" {
                    style = get_w_val(&e);
                }
            }
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"pPr" {
                    break;
                }
            }
            Event::Eof => return Err(unexpected_eof("w:pPr")),
            _ => {}
        }
        buf.clear();
    }

    Ok(style)
}

/// Append the runs of a w:hyperlink; the link target itself is dropped
fn read_hyperlink_runs<R: BufRead>(reader: &mut Reader<R>, runs: &mut Vec<Run>) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if e.name().local_name().as_ref() == b"r" {
                    runs.push(Run::from_reader(reader, &e)?);
                } else {
                    skip_element(reader, &e)?;
                }
            }
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"hyperlink" {
                    break;
                }
            }
            Event::Eof => return Err(unexpected_eof("w:hyperlink")),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
