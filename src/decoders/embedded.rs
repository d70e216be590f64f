//! Embedded content decoding
//!
//! Agilent files carry nested XML documents as text inside ordinary
//! elements (`XmlContent`, the `InjectionMetaDataItems` custom field). The
//! payload is GZip-compressed and then Base64-encoded:
//!
//! 1. Strip whitespace and Base64 decode the text
//! 2. Check the GZip magic bytes and inflate
//! 3. Interpret the result as UTF-8 XML text

use std::borrow::Cow;
use std::io::Read;

use base64::prelude::*;
use flate2::read::GzDecoder;
use log::debug;

use super::DecodeError;

/// `ContentType` attribute value announcing a Base64+GZip payload
pub const GZIP_BASE64_CONTENT_TYPE: &str = "GZipCompressedBase64Xml";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Decode a Base64 string and inflate it as a GZip stream
pub fn decode_gzip_base64(blob: &str) -> Result<String, DecodeError> {
    let compact: String = blob.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let compressed = BASE64_STANDARD.decode(compact.as_bytes())?;

    if !compressed.starts_with(&GZIP_MAGIC) {
        return Err(DecodeError::NotGzip);
    }

    let mut decoder = GzDecoder::new(&compressed[..]);
    let mut inflated = Vec::new();
    decoder.read_to_end(&mut inflated)?;

    Ok(String::from_utf8(inflated)?)
}

/// Text recovered from an embedded content block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedText {
    /// Payload was Base64+GZip and decoded cleanly
    Inflated(String),
    /// No compressed encoding was declared; entity-unescaped text
    Plain(String),
    /// Decoding was attempted and failed; entity-unescaped raw text
    Fallback {
        /// Best-effort text
        text: String,
        /// Why decoding failed
        reason: String,
    },
}

impl EmbeddedText {
    /// The recovered text, whichever way it was obtained
    pub fn text(&self) -> &str {
        match self {
            EmbeddedText::Inflated(text) | EmbeddedText::Plain(text) => text,
            EmbeddedText::Fallback { text, .. } => text,
        }
    }

    /// Consume and return the recovered text
    pub fn into_text(self) -> String {
        match self {
            EmbeddedText::Inflated(text) | EmbeddedText::Plain(text) => text,
            EmbeddedText::Fallback { text, .. } => text,
        }
    }

    /// Whether decoding failed and the text is a degraded copy
    pub fn is_fallback(&self) -> bool {
        matches!(self, EmbeddedText::Fallback { .. })
    }
}

/// Decode an embedded content block according to its declared content type
///
/// Only [`GZIP_BASE64_CONTENT_TYPE`] triggers inflation; a failure there is
/// not fatal and degrades to [`EmbeddedText::Fallback`]. A block declared as
/// compressed that already holds markup (inflated by an earlier conversion)
/// is returned unchanged as [`EmbeddedText::Plain`].
pub fn decode_content(content_type: Option<&str>, text: &str) -> EmbeddedText {
    if text.is_empty() {
        return EmbeddedText::Plain(String::new());
    }

    if content_type == Some(GZIP_BASE64_CONTENT_TYPE) {
        // '<' is outside the Base64 alphabet
        if text.trim_start().starts_with('<') {
            return EmbeddedText::Plain(text.to_string());
        }
        return match decode_gzip_base64(text) {
            Ok(inflated) => EmbeddedText::Inflated(inflated),
            Err(e) => {
                debug!("Embedded content did not decode, using raw text: {}", e);
                EmbeddedText::Fallback {
                    text: unescape_lenient(text),
                    reason: e.to_string(),
                }
            }
        };
    }

    EmbeddedText::Plain(unescape_lenient(text))
}

/// Resolve character and entity references, keeping the text as-is when it
/// contains a stray `&`
fn unescape_lenient(text: &str) -> String {
    quick_xml::escape::unescape(text)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| text.to_string())
}
