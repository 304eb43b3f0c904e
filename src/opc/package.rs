//! OPC Package implementation
//!
//! Reads DOCX files as ZIP packages

use crate::error::{Error, Result};
use crate::opc::relationships::rel_types;
use crate::opc::{ContentTypes, Part, PartUri, Relationships};
use log::debug;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use zip::read::ZipArchive;

const CONTENT_TYPES_NAME: &str = "[Content_Types].xml";
const PACKAGE_RELS_NAME: &str = "_rels/.rels";

/// An OPC package (ZIP-based container for DOCX files)
#[derive(Debug)]
pub struct Package {
    /// All parts in the package
    parts: HashMap<PartUri, Part>,
    /// Package-level relationships (/_rels/.rels)
    relationships: Relationships,
    /// Content types ([Content_Types].xml)
    content_types: ContentTypes,
}

impl Package {
    /// Open a package from a file path.
    ///
    /// The whole archive is read into memory and the file is closed on return.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Open a package from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Open a package from a reader
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let content_types = ContentTypes::from_xml(
            &read_entry(&mut archive, CONTENT_TYPES_NAME)?
                .ok_or_else(|| Error::MissingPart(CONTENT_TYPES_NAME.into()))?,
        )?;
        let relationships = match read_entry(&mut archive, PACKAGE_RELS_NAME)? {
            Some(xml) => Relationships::from_xml(&xml)?,
            None => Relationships::new(),
        };

        let mut package = Self {
            parts: HashMap::new(),
            relationships,
            content_types,
        };
        package.read_parts(&mut archive)?;
        package.read_part_relationships(&mut archive)?;

        debug!("opened package with {} parts", package.parts.len());
        Ok(package)
    }

    /// Get a part by URI
    pub fn part(&self, uri: &PartUri) -> Option<&Part> {
        self.parts.get(uri)
    }

    /// Get all parts
    pub fn parts(&self) -> impl Iterator<Item = (&PartUri, &Part)> {
        self.parts.iter()
    }

    /// Get package-level relationships
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Get content types
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Get the main document part (transitional or strict relationship)
    pub fn main_document_part(&self) -> Option<&Part> {
        let rel = self
            .relationships
            .by_type(rel_types::OFFICE_DOCUMENT)
            .or_else(|| self.relationships.by_type(rel_types::OFFICE_DOCUMENT_STRICT))?;
        let uri = PartUri::new(&rel.target).ok()?;
        self.parts.get(&uri)
    }

    /// Follow the first relationship of `rel_type` from `source` to its target part
    pub fn related_part(&self, source: &Part, rel_type: &str) -> Option<&Part> {
        let rel = source.relationships().by_type(rel_type)?;
        let uri = source.uri().resolve(&rel.target).ok()?;
        self.parts.get(&uri)
    }

    fn read_parts<R: Read + Seek>(&mut self, archive: &mut ZipArchive<R>) -> Result<()> {
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            if name.ends_with('/') || name == CONTENT_TYPES_NAME {
                continue;
            }

            let uri = PartUri::new(&name)?;
            if uri.is_relationships() {
                continue;
            }

            let content_type = self
                .content_types
                .get(&uri)
                .unwrap_or("application/octet-stream")
                .to_string();

            let mut data = Vec::new();
            file.read_to_end(&mut data)?;

            self.parts
                .insert(uri.clone(), Part::new(uri, content_type, data));
        }

        Ok(())
    }

    fn read_part_relationships<R: Read + Seek>(
        &mut self,
        archive: &mut ZipArchive<R>,
    ) -> Result<()> {
        for part in self.parts.values_mut() {
            let rels_uri = part.uri().relationships_uri();
            if let Some(xml) = read_entry(archive, rels_uri.zip_name())? {
                part.set_relationships(Relationships::from_xml(&xml)?);
            }
        }

        Ok(())
    }
}

/// Read a named archive entry as text, `None` if it does not exist.
///
/// An exact name wins; otherwise the entry is matched ignoring ASCII case.
fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let entry = archive
        .file_names()
        .find(|entry| *entry == name)
        .or_else(|| {
            archive
                .file_names()
                .find(|entry| entry.eq_ignore_ascii_case(name))
        })
        .map(str::to_string);
    let Some(entry) = entry else {
        return Ok(None);
    };

    let mut file = archive.by_name(&entry)?;

    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&data);
    Ok(Some(std::str::from_utf8(data)?.to_string()))
}
