//! Open Packaging Convention (OPC) reader
//!
//! A DOCX file is a ZIP archive of XML parts tied together by
//! `[Content_Types].xml` and `.rels` files. Only reading is supported.

mod content_types;
mod package;
mod part;
mod part_uri;
mod relationships;

pub use content_types::{ContentTypes, MAIN_DOCUMENT, WORD_MAIN_TYPES};
pub use package::Package;
pub use part::Part;
pub use part_uri::PartUri;
pub use relationships::{rel_types, Relationship, Relationships, TargetMode};
