//! Document body and block-level content

use crate::document::{Paragraph, Table};
use crate::error::Result;
use crate::xml::{skip_element, unexpected_eof};
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

/// Block-level content of a document body, in document order
#[derive(Clone, Debug)]
pub enum Block {
    /// Paragraph
    Paragraph(Paragraph),
    /// Table
    Table(Table),
}

/// Parse the children of w:body (after its start tag).
///
/// Only direct paragraphs and tables are kept; content controls, section
/// properties and other wrappers are skipped whole.
pub fn parse_body<R: BufRead>(reader: &mut Reader<R>) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().local_name().as_ref() {
                b"p" => blocks.push(Block::Paragraph(Paragraph::from_reader(reader, &e)?)),
                b"tbl" => blocks.push(Block::Table(Table::from_reader(reader, &e)?)),
                other => {
                    debug!("skipping body element <{}>", String::from_utf8_lossy(other));
                    skip_element(reader, &e)?;
                }
            },
            Event::Empty(e) => {
                if e.name().local_name().as_ref() == b"p" {
                    blocks.push(Block::Paragraph(Paragraph::default()));
                }
            }
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"body" {
                    break;
                }
            }
            Event::Eof => return Err(unexpected_eof("w:body")),
            _ => {}
        }
        buf.clear();
    }

    Ok(blocks)
}

impl Block {
    /// The paragraph, if this block is one
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }

    /// The table, if this block is one
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        }
    }
}
