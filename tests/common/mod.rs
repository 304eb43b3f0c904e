//! In-memory DOCX fixtures

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="{PART}" ContentType="{MAIN}"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;

/// styles.xml with the built-in styles Word writes for a blank document
pub const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:customStyle="1" w:styleId="Task"><w:name w:val="Task"/><w:basedOn w:val="ListBullet"/></w:style>
  <w:style w:type="paragraph" w:customStyle="1" w:styleId="NotAList"><w:name w:val="Not a List"/><w:basedOn w:val="Normal"/></w:style>
  <w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/></w:style>
</w:styles>"#;

const MAIN_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

/// Route library logs to the test harness; `RUST_LOG=debug` shows skipped elements
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrap body XML in a w:document element
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<w:body>{}<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr></w:body>
</w:document>"#,
        body
    )
}

/// Builder for a minimal but complete .docx package
pub struct DocxBuilder {
    body: String,
    styles: Option<String>,
    main_content_type: String,
    override_part_name: String,
    truncate_at: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self {
            body: String::new(),
            styles: Some(STYLES.to_string()),
            main_content_type: MAIN_DOCUMENT.to_string(),
            override_part_name: "/word/document.xml".to_string(),
            truncate_at: None,
        }
    }

    pub fn body(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    pub fn paragraph(self, style: Option<&str>, runs: &str) -> Self {
        let ppr = style
            .map(|s| format!(r#"<w:pPr><w:pStyle w:val="{}"/></w:pPr>"#, s))
            .unwrap_or_default();
        self.body(&format!("<w:p>{}{}</w:p>", ppr, runs))
    }

    pub fn without_styles(mut self) -> Self {
        self.styles = None;
        self
    }

    pub fn main_content_type(mut self, content_type: &str) -> Self {
        self.main_content_type = content_type.to_string();
        self
    }

    /// Spell the main part's name differently in `[Content_Types].xml`
    pub fn override_part_name(mut self, part_name: &str) -> Self {
        self.override_part_name = part_name.to_string();
        self
    }

    /// Cut document.xml off just after the first occurrence of `marker`
    pub fn truncate_document_at(mut self, marker: &str) -> Self {
        self.truncate_at = Some(marker.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        let mut entries = vec![
            (
                "[Content_Types].xml",
                CONTENT_TYPES
                    .replace("{PART}", &self.override_part_name)
                    .replace("{MAIN}", &self.main_content_type),
            ),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("word/document.xml", self.document()),
        ];
        if let Some(styles) = &self.styles {
            entries.push(("word/_rels/document.xml.rels", DOCUMENT_RELS.to_string()));
            entries.push(("word/styles.xml", styles.clone()));
        }

        for (name, data) in entries {
            zip.start_file(name, options).unwrap();
            zip.write_all(data.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    fn document(&self) -> String {
        let xml = document_xml(&self.body);
        match self.truncate_at.as_deref().and_then(|marker| {
            xml.find(marker).map(|pos| pos + marker.len())
        }) {
            Some(end) => xml[..end].to_string(),
            None => xml,
        }
    }
}

/// A w:r with optional bold/italic flags
pub fn run(text: &str, bold: bool, italic: bool) -> String {
    let mut rpr = String::new();
    if bold {
        rpr.push_str("<w:b/>");
    }
    if italic {
        rpr.push_str("<w:i/>");
    }
    if !rpr.is_empty() {
        rpr = format!("<w:rPr>{}</w:rPr>", rpr);
    }
    format!(r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#, rpr, text)
}

/// A w:tbl with one paragraph per cell
pub fn table(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl><w:tblPr><w:tblStyle w:val=\"TableGrid\"/></w:tblPr>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in *row {
            xml.push_str(&format!("<w:tc><w:p>{}</w:p></w:tc>", run(cell, false, false)));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}
