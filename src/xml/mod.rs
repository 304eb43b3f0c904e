//! quick-xml helpers shared by the package and document readers

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Helper to get attribute value from BytesStart
pub fn get_attr(element: &BytesStart, name: &str) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name.as_bytes())
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

/// Get a `w:`-prefixed attribute, accepting the unprefixed form too
pub fn get_w_attr(element: &BytesStart, local: &str) -> Option<String> {
    get_attr(element, &format!("w:{}", local)).or_else(|| get_attr(element, local))
}

/// Helper to get w:val attribute (common in OOXML)
pub fn get_w_val(element: &BytesStart) -> Option<String> {
    get_w_attr(element, "val")
}

/// Parse a boolean value from OOXML (handles "1", "true", "on", or missing val)
pub fn parse_bool(element: &BytesStart) -> bool {
    match get_w_val(element) {
        None => true, // <w:b/>
        Some(v) => matches!(v.as_str(), "1" | "true" | "on"),
    }
}

/// Error for input that ends while `element` is still open
pub fn unexpected_eof(element: &str) -> Error {
    Error::InvalidDocument(format!("unexpected end of XML inside <{}>", element))
}

/// Skip an element and all its children (call after its start tag was read)
pub fn skip_element<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<()> {
    let target = start.name().as_ref().to_vec();
    let mut depth = 1;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == target => depth += 1,
            Event::End(e) if e.name().as_ref() == target => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Event::Eof => return Err(unexpected_eof(&String::from_utf8_lossy(&target))),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Read the unescaped text content of a leaf element such as `w:t`
pub fn read_text<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<String> {
    let target = start.name().as_ref().to_vec();
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Start(e) => skip_element(reader, &e)?,
            Event::End(e) if e.name().as_ref() == target => break,
            Event::Eof => return Err(unexpected_eof(&String::from_utf8_lossy(&target))),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_start(xml: &str) -> (Reader<&[u8]>, BytesStart<'static>) {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf).unwrap() {
                Event::Start(e) | Event::Empty(e) => return (reader, e.into_owned()),
                Event::Eof => panic!("no element in {xml}"),
                _ => {}
            }
            buf.clear();
        }
    }

    #[test]
    fn test_parse_bool_variants() {
        let (_, e) = first_start(r#"<w:b/>"#);
        assert!(parse_bool(&e));
        let (_, e) = first_start(r#"<w:b w:val="0"/>"#);
        assert!(!parse_bool(&e));
        let (_, e) = first_start(r#"<w:b w:val="false"/>"#);
        assert!(!parse_bool(&e));
        let (_, e) = first_start(r#"<w:i val="on"/>"#);
        assert!(parse_bool(&e));
    }

    #[test]
    fn test_get_w_attr_prefers_prefixed() {
        let (_, e) = first_start(r#"<w:style w:styleId="Heading1" w:type="paragraph"/>"#);
        assert_eq!(get_w_attr(&e, "styleId").as_deref(), Some("Heading1"));
        assert_eq!(get_w_attr(&e, "type").as_deref(), Some("paragraph"));
        assert_eq!(get_w_attr(&e, "default"), None);
    }

    #[test]
    fn test_read_text_keeps_whitespace_and_entities() {
        let (mut reader, e) = first_start(r#"<w:t xml:space="preserve"> a &amp; b </w:t>"#);
        assert_eq!(read_text(&mut reader, &e).unwrap(), " a & b ");
    }

    #[test]
    fn test_skip_element_nested_same_name() {
        let xml = r#"<w:tbl><w:tbl><w:tr/></w:tbl></w:tbl><w:p/>"#;
        let (mut reader, e) = first_start(xml);
        skip_element(&mut reader, &e).unwrap();

        let mut buf = Vec::new();
        match reader.read_event_into(&mut buf).unwrap() {
            Event::Empty(e) => assert_eq!(e.name().as_ref(), b"w:p"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_element_is_error() {
        let (mut reader, e) = first_start(r#"<w:sdt><w:sdtContent><w:p>"#);
        let err = skip_element(&mut reader, &e).unwrap_err();
        assert!(err.to_string().contains("<w:sdt>"), "{err}");

        let (mut reader, e) = first_start(r#"<w:t>half"#);
        assert!(matches!(read_text(&mut reader, &e), Err(Error::InvalidDocument(_))));
    }
}
