//! # Schema-Aware Text Reports
//!
//! Turns a vendor XML document into a plain-text summary. The root element
//! is classified into a [`SchemaKind`], and each kind maps to one fixed
//! template. Every named template ends with the full serialized XML, so no
//! information is lost when a template skips a field.
//!
//! ## Dispatch Order
//!
//! | Kind | Matched by |
//! |------|------------|
//! | Fileset | local name `*Fileset` or `urn:schemas-agilent-com:Fileset` |
//! | ACAML | local name `*ACAML` or `urn:schemas-agilent-com:acaml21` |
//! | SampleContainerInfo | un-namespaced `SampleContainerInfo` |
//! | ContentTypes | local name `*Types` or the OPC content-types namespace |
//! | ACMD | local name `*ACMD` or `urn:schemas-agilent-com:acmd20` |
//! | Unknown | anything else (generic dump) |
//!
//! Missing elements or attributes never fail a report: values print as
//! `N/A` and sections whose container is absent are omitted.

mod acaml;
mod acmd;
mod builder;
mod content_types;
mod fileset;
mod group;
mod sample_container;


use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::xml::{element_to_string, parse_document, sanitize, Document, Element};

pub use builder::NOT_AVAILABLE;
pub use group::group_first_seen;
pub use sample_container::DEVICE_CONTENT_PREVIEW_CHARS;

/// Agilent Fileset manifest namespace
pub const FILESET_NAMESPACE: &str = "urn:schemas-agilent-com:Fileset";
/// ACAML 2.1 namespace
pub const ACAML_NAMESPACE: &str = "urn:schemas-agilent-com:acaml21";
/// Open Packaging Conventions content-types namespace
pub const CONTENT_TYPES_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/package/2006/content-types";
/// ACMD 2.0 namespace
pub const ACMD_NAMESPACE: &str = "urn:schemas-agilent-com:acmd20";

/// Known vendor XML schemas
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SchemaKind {
    /// Acquisition file manifest
    Fileset,
    /// Agilent Common Analytical Markup Language result set
    Acaml,
    /// Sample container (vial tray) description
    SampleContainerInfo,
    /// OPC `[Content_Types].xml`
    ContentTypes,
    /// Acquisition method / data description
    Acmd,
    /// Anything else
    Unknown,
}

impl SchemaKind {
    /// Classify a document by its root element, first match wins
    pub fn classify(root: &Element) -> Self {
        let local = root.local_name();
        let namespace = root.namespace().unwrap_or_default();

        if local.ends_with("Fileset") || namespace.contains(FILESET_NAMESPACE) {
            SchemaKind::Fileset
        } else if local.ends_with("ACAML") || namespace.contains(ACAML_NAMESPACE) {
            SchemaKind::Acaml
        } else if root.namespace().is_none() && root.name() == "SampleContainerInfo" {
            SchemaKind::SampleContainerInfo
        } else if local.ends_with("Types") || namespace.contains(CONTENT_TYPES_NAMESPACE) {
            SchemaKind::ContentTypes
        } else if local.ends_with("ACMD") || namespace.contains(ACMD_NAMESPACE) {
            SchemaKind::Acmd
        } else {
            SchemaKind::Unknown
        }
    }

    /// Human-readable schema name
    pub fn title(&self) -> &'static str {
        match self {
            SchemaKind::Fileset => "Fileset",
            SchemaKind::Acaml => "ACAML",
            SchemaKind::SampleContainerInfo => "SampleContainerInfo",
            SchemaKind::ContentTypes => "Content Types",
            SchemaKind::Acmd => "ACMD",
            SchemaKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Errors that can occur while producing a report from a file
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error reading the source file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered text report
#[derive(Debug, Clone)]
pub struct Report {
    /// Detected schema, `None` when the source was not well-formed XML
    pub schema: Option<SchemaKind>,
    /// Report body
    pub text: String,
}

/// Render a parsed document
///
/// The generic dump for unknown schemas uses the re-serialized document;
/// use [`render_source`] to dump the original text instead.
pub fn render(document: &Document) -> String {
    render_with_source(document, None)
}

/// Parse and render XML source text
///
/// A parse failure is not an error: the report then carries the parser
/// message followed by the raw text.
pub fn render_source(source: &str) -> Report {
    match parse_document(source) {
        Ok(document) => Report {
            schema: Some(SchemaKind::classify(&document.root)),
            text: render_with_source(&document, Some(source)),
        },
        Err(e) => {
            debug!("Falling back to raw dump: {}", e);
            Report {
                schema: None,
                text: format!("Error processing file: {}\n\nFile content:\n{}", e, source),
            }
        }
    }
}

/// Read, sanitize and render an XML file
pub fn render_file(path: &Path) -> Result<Report, ReportError> {
    let source = sanitize(&fs::read(path)?);
    Ok(render_source(&source))
}

fn render_with_source(document: &Document, source: Option<&str>) -> String {
    let root = &document.root;
    match SchemaKind::classify(root) {
        SchemaKind::Fileset => fileset::render(root),
        SchemaKind::Acaml => acaml::render(root),
        SchemaKind::SampleContainerInfo => sample_container::render(root),
        SchemaKind::ContentTypes => content_types::render(root),
        SchemaKind::Acmd => acmd::render(root),
        SchemaKind::Unknown => {
            let content = match source {
                Some(source) => source.to_string(),
                None => element_to_string(root).unwrap_or_default(),
            };
            format!(
                "Unknown XML type: {}\n\nFull Content:\n{}",
                root.clark_name(),
                content
            )
        }
    }
}
