/// Errors that can occur while parsing or writing vendor XML
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// Error reported by the XML pull parser
    #[error("XML parsing error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// Malformed attribute list on an element
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Invalid character or entity reference
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Document structure is not well formed (no root, unclosed elements, ...)
    #[error("Malformed XML document: {0}")]
    Malformed(String),

    /// I/O error while reading or writing a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output was not valid UTF-8
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
