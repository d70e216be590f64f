//! # Vendor XML Tree
//!
//! Vendor files (ACAML, ACMD, SCML, Fileset manifests, OPC content types) are
//! small enough to hold in memory, and the report templates need random
//! access to arbitrary descendants. This module parses a document into an
//! owned element tree with `quick-xml`, resolves namespaces, and writes the
//! tree back out without losing prefixes or namespace declarations.
//!
//! ## Tree Shape
//!
//! ```text
//! Document
//! └── Element (root)
//!     ├── Node::Text      (whitespace and character data are kept verbatim)
//!     ├── Node::Element
//!     │   └── ...
//!     └── Node::Text
//! ```
//!
//! Comments, processing instructions and the XML declaration are dropped.
//! CDATA sections become ordinary text nodes.

mod element;
mod error;
mod parser;
mod writer;


pub use element::{Descendants, Document, Element, Node};
pub use error::XmlError;
pub use parser::{parse_document, sanitize};
pub use writer::{element_to_string, write_document};
