//! Part representation for OPC packages

use crate::opc::{PartUri, Relationships};

/// A part within an OPC package
#[derive(Clone, Debug)]
pub struct Part {
    uri: PartUri,
    content_type: String,
    data: Vec<u8>,
    relationships: Relationships,
}

impl Part {
    /// Create a new part with no relationships
    pub fn new(uri: PartUri, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            uri,
            content_type: content_type.into(),
            data,
            relationships: Relationships::new(),
        }
    }

    /// Get the part URI
    pub fn uri(&self) -> &PartUri {
        &self.uri
    }

    /// Get the content type
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the raw data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get data as UTF-8, skipping a byte order mark if present
    pub fn data_as_str(&self) -> Result<&str, std::str::Utf8Error> {
        let data = self.data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&self.data);
        std::str::from_utf8(data)
    }

    /// Relationships originating from this part
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub(crate) fn set_relationships(&mut self, rels: Relationships) {
        self.relationships = rels;
    }
}
