//! Table elements (w:tbl, w:tr, w:tc)

use crate::document::Paragraph;
use crate::error::Result;
use crate::xml::{get_w_val, skip_element, unexpected_eof};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Table element (w:tbl)
#[derive(Clone, Debug, Default)]
pub struct Table {
    /// Table rows
    pub rows: Vec<TableRow>,
}

/// Table row (w:tr)
#[derive(Clone, Debug, Default)]
pub struct TableRow {
    /// Cells as they appear in the XML (merged cells once)
    pub cells: Vec<TableCell>,
}

/// Table cell (w:tc)
#[derive(Clone, Debug, Default)]
pub struct TableCell {
    /// Cell content (paragraphs; nested tables are dropped)
    pub paragraphs: Vec<Paragraph>,
    /// Number of grid columns spanned (w:gridSpan)
    pub grid_span: u32,
    /// Vertical merge state (w:vMerge)
    pub v_merge: Option<VMerge>,
}

/// Vertical merge type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VMerge {
    /// Start of a new vertical merge group
    Restart,
    /// Continuation of the cell above
    Continue,
}

impl Table {
    /// Create a table from rows of cell texts
    pub fn from_data<S: AsRef<str>>(data: &[&[S]]) -> Self {
        let rows = data
            .iter()
            .map(|row| TableRow {
                cells: row.iter().map(|text| TableCell::new(text.as_ref())).collect(),
            })
            .collect();
        Table { rows }
    }

    /// Parse from reader (after w:tbl start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>, _start: &BytesStart) -> Result<Self> {
        let mut table = Table::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"tr" => table.rows.push(TableRow::from_reader(reader)?),
                    _ => skip_element(reader, &e)?,
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tbl" {
                        break;
                    }
                }
                Event::Eof => return Err(unexpected_eof("w:tbl")),
                _ => {}
            }
            buf.clear();
        }

        Ok(table)
    }

    /// Get row count
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell texts laid out on the table grid.
    ///
    /// A cell spanning `n` grid columns appears `n` times in its row, and a
    /// vertically continued cell repeats the text of the cell above it in the
    /// same grid column. Rows keep their own widths.
    pub fn grid_texts(&self) -> Vec<Vec<String>> {
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let mut texts = Vec::new();
            for cell in &row.cells {
                let column = texts.len();
                let text = match cell.v_merge {
                    Some(VMerge::Continue) => grid
                        .last()
                        .and_then(|above| above.get(column))
                        .cloned()
                        .unwrap_or_default(),
                    _ => cell.text(),
                };
                for _ in 0..cell.grid_span.max(1) {
                    texts.push(text.clone());
                }
            }
            grid.push(texts);
        }

        grid
    }
}

impl TableRow {
    /// Parse from reader (after w:tr start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut row = TableRow::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"tc" => row.cells.push(TableCell::from_reader(reader)?),
                    _ => skip_element(reader, &e)?,
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tr" {
                        break;
                    }
                }
                Event::Eof => return Err(unexpected_eof("w:tr")),
                _ => {}
            }
            buf.clear();
        }

        Ok(row)
    }
}

impl TableCell {
    /// Create a new cell with text
    pub fn new(text: impl Into<String>) -> Self {
        TableCell {
            paragraphs: vec![Paragraph::new(text)],
            grid_span: 1,
            v_merge: None,
        }
    }

    /// Parse from reader (after w:tc start tag)
    pub fn from_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<Self> {
        let mut cell = TableCell {
            grid_span: 1,
            ..Default::default()
        };
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"tcPr" => cell.read_properties(reader)?,
                    b"p" => cell.paragraphs.push(Paragraph::from_reader(reader, &e)?),
                    b"tbl" => {
                        debug!("skipping nested table");
                        skip_element(reader, &e)?;
                    }
                    _ => skip_element(reader, &e)?,
                },
                Event::Empty(e) => {
                    if e.name().local_name().as_ref() == b"p" {
                        cell.paragraphs.push(Paragraph::default());
                    }
                }
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tc" {
                        break;
                    }
                }
                Event::Eof => return Err(unexpected_eof("w:tc")),
                _ => {}
            }
            buf.clear();
        }

        Ok(cell)
    }

    /// Read w:tcPr (after its start tag), keeping span and merge state
    fn read_properties<R: BufRead>(&mut self, reader: &mut Reader<R>) -> Result<()> {
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => skip_element(reader, &e)?,
                Event::Empty(e) => match e.name().local_name().as_ref() {
                    b"gridSpan" => {
                        self.grid_span = get_w_val(&e)
                            .and_then(|v| v.parse().ok())
                            .filter(|&span| span > 0)
                            .unwrap_or(1);
                    }
                    b"vMerge" => {
                        self.v_merge = Some(match get_w_val(&e).as_deref() {
                            Some("restart") => VMerge::Restart,
                            _ => VMerge::Continue,
                        });
                    }
                    _ => {}
                },
                Event::End(e) => {
                    if e.name().local_name().as_ref() == b"tcPr" {
                        break;
                    }
                }
                Event::Eof => return Err(unexpected_eof("w:tcPr")),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Get cell text (all paragraphs joined by newlines)
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
