//! Style definitions (styles.xml)
//!
//! Paragraphs reference styles by ID; classification works on the style's
//! display name and on the name of the style it is based on.

use crate::error::Result;
use crate::xml::{get_w_attr, get_w_val, skip_element, unexpected_eof};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::BufRead;

/// Style type (w:type)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StyleType {
    #[default]
    Paragraph,
    Character,
    Table,
    Numbering,
}

impl StyleType {
    /// Parse from OOXML string value
    pub fn parse(s: &str) -> Self {
        match s {
            "character" => StyleType::Character,
            "table" => StyleType::Table,
            "numbering" => StyleType::Numbering,
            _ => StyleType::Paragraph,
        }
    }
}

/// A single style definition (w:style)
#[derive(Clone, Debug, Default)]
pub struct Style {
    /// Style ID, referenced from w:pStyle
    pub id: String,
    /// Display name (w:name), e.g. "heading 1"
    pub name: Option<String>,
    /// ID of the parent style (w:basedOn)
    pub based_on: Option<String>,
    /// Style type
    pub style_type: StyleType,
    /// Whether this is the default style of its type
    pub is_default: bool,
}

impl Style {
    /// Display name, falling back to the ID when the style has no w:name
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// A paragraph's style after resolution against the style table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedStyle<'a> {
    /// Name of the paragraph's style
    pub name: &'a str,
    /// Name of the style it is based on, if any
    pub base_name: Option<&'a str>,
}

/// Style definitions from styles.xml
#[derive(Clone, Debug, Default)]
pub struct Styles {
    styles: HashMap<String, Style>,
    default_paragraph: Option<String>,
}

impl Styles {
    /// Create an empty style table (document without a styles part)
    pub fn new() -> Self {
        Styles::default()
    }

    /// Parse styles.xml content
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut styles = Styles::default();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().local_name().as_ref() {
                    b"style" => {
                        let style = read_style(&mut reader, &e)?;
                        styles.insert(style);
                    }
                    b"styles" => {}
                    // docDefaults, latentStyles
                    _ => skip_element(&mut reader, &e)?,
                },
                Event::Empty(e) => {
                    if e.name().local_name().as_ref() == b"style" {
                        styles.insert(style_header(&e));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        debug!("parsed {} styles", styles.styles.len());
        Ok(styles)
    }

    /// Add a style; the last paragraph style flagged default wins
    pub fn insert(&mut self, style: Style) {
        if style.is_default && style.style_type == StyleType::Paragraph {
            self.default_paragraph = Some(style.id.clone());
        }
        self.styles.insert(style.id.clone(), style);
    }

    /// Get a style by ID
    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    /// Number of styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// The default paragraph style ("Normal" in most documents)
    pub fn default_paragraph_style(&self) -> Option<&Style> {
        self.get(self.default_paragraph.as_deref()?)
    }

    /// Look up a paragraph style by ID.
    ///
    /// A missing ID, an unknown ID, or an ID naming a non-paragraph style
    /// resolves to the default paragraph style.
    pub fn paragraph_style(&self, id: Option<&str>) -> Option<&Style> {
        let found = id
            .and_then(|id| self.get(id))
            .filter(|s| s.style_type == StyleType::Paragraph);

        match (found, id) {
            (Some(style), _) => Some(style),
            (None, Some(id)) => {
                debug!("style '{}' not defined, using default paragraph style", id);
                self.default_paragraph_style()
            }
            (None, None) => self.default_paragraph_style(),
        }
    }

    /// The style a style is based on
    pub fn base_style(&self, style: &Style) -> Option<&Style> {
        self.get(style.based_on.as_deref()?)
    }

    /// Resolve the names used for classification of a paragraph style ID.
    ///
    /// Without any style definitions the raw ID stands in for the name.
    pub fn resolve<'a>(&'a self, id: Option<&'a str>) -> Option<ResolvedStyle<'a>> {
        if self.is_empty() {
            return id.map(|id| ResolvedStyle {
                name: id,
                base_name: None,
            });
        }

        let style = self.paragraph_style(id)?;
        Some(ResolvedStyle {
            name: style.name(),
            base_name: self.base_style(style).map(|base| base.name()),
        })
    }
}

/// Attributes of a w:style start tag
fn style_header(start: &BytesStart) -> Style {
    Style {
        id: get_w_attr(start, "styleId").unwrap_or_default(),
        style_type: get_w_attr(start, "type")
            .map(|t| StyleType::parse(&t))
            .unwrap_or_default(),
        is_default: matches!(
            get_w_attr(start, "default").as_deref(),
            Some("1" | "true" | "on")
        ),
        ..Default::default()
    }
}

/// Read a w:style element (after its start tag)
fn read_style<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Style> {
    let mut style = style_header(start);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                read_style_field(&mut style, &e);
                skip_element(reader, &e)?;
            }
            Event::Empty(e) => read_style_field(&mut style, &e),
            Event::End(e) => {
                if e.name().local_name().as_ref() == b"style" {
                    break;
                }
            }
            Event::Eof => return Err(unexpected_eof("w:style")),
            _ => {}
        }
        buf.clear();
    }

    Ok(style)
}

/// Pick up w:name or w:basedOn, whether written empty or with an end tag
fn read_style_field(style: &mut Style, element: &BytesStart) {
    match element.name().local_name().as_ref() {
        b"name" => style.name = get_w_val(element),
        b"basedOn" => style.based_on = get_w_val(element),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults><w:rPrDefault><w:rPr><w:sz w:val="22"/></w:rPr></w:rPrDefault></w:docDefaults>
  <w:latentStyles w:count="1"><w:lsdException w:name="heading 1"/></w:latentStyles>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr><w:keepNext/><w:outlineLvl w:val="0"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListBullet">
    <w:name w:val="List Bullet"/>
    <w:basedOn w:val="Normal"/>
  </w:style>
  <w:style w:type="paragraph" w:customStyle="1" w:styleId="Todo">
    <w:name w:val="Todo"/>
    <w:basedOn w:val="ListBullet"/>
  </w:style>
  <w:style w:type="character" w:styleId="Strong">
    <w:name w:val="Strong"/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="NoName"/>
</w:styles>"#;

    #[test]
    fn test_parse_styles() {
        let styles = Styles::from_xml(STYLES_XML).unwrap();
        assert_eq!(styles.len(), 6);

        let heading = styles.get("Heading1").unwrap();
        assert_eq!(heading.name(), "heading 1");
        assert_eq!(heading.based_on.as_deref(), Some("Normal"));
        assert_eq!(styles.get("Strong").unwrap().style_type, StyleType::Character);
        assert_eq!(styles.get("NoName").unwrap().name(), "NoName");
        assert_eq!(styles.default_paragraph_style().unwrap().id, "Normal");
    }

    #[test]
    fn test_resolve_with_base() {
        let styles = Styles::from_xml(STYLES_XML).unwrap();
        assert_eq!(
            styles.resolve(Some("Todo")),
            Some(ResolvedStyle {
                name: "Todo",
                base_name: Some("List Bullet"),
            })
        );
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let styles = Styles::from_xml(STYLES_XML).unwrap();
        let normal = ResolvedStyle {
            name: "Normal",
            base_name: None,
        };
        assert_eq!(styles.resolve(None), Some(normal));
        assert_eq!(styles.resolve(Some("Missing")), Some(normal));
        assert_eq!(styles.resolve(Some("Strong")), Some(normal));
    }

    #[test]
    fn test_resolve_without_styles_uses_id() {
        let styles = Styles::new();
        assert_eq!(
            styles.resolve(Some("Heading1")).map(|s| s.name),
            Some("Heading1")
        );
        assert_eq!(styles.resolve(None), None);
    }

    #[test]
    fn test_name_and_base_with_end_tags() {
        let xml = r#"<w:styles>
  <w:style w:type="paragraph" w:styleId="Sub"><w:name w:val="List Sub"></w:name><w:basedOn w:val="Normal"></w:basedOn></w:style>
</w:styles>"#;
        let styles = Styles::from_xml(xml).unwrap();
        let sub = styles.get("Sub").unwrap();
        assert_eq!(sub.name(), "List Sub");
        assert_eq!(sub.based_on.as_deref(), Some("Normal"));
    }

    #[test]
    fn test_truncated_style_is_error() {
        let xml = r#"<w:styles><w:style w:type="paragraph" w:styleId="Normal"><w:name w:val="Normal"/>"#;
        assert!(Styles::from_xml(xml).is_err());
    }
}
