use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;

use super::embedded::decode_gzip_base64;
use super::{write_no_clobber, ConvertError, DecodeError};
use crate::xml::{parse_document, sanitize, write_document, Element};

/// Element whose text carries a Base64+GZip nested document
pub const XML_CONTENT_TAG: &str = "XmlContent";

/// Default output path for an SCML file: `<base>_scml.xml`
pub fn scml_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}_scml.xml", stem))
}

/// Replace the text of every `XmlContent` element with its decoded payload
///
/// Returns the number of blocks decoded. Empty blocks are left alone; any
/// other block that fails to decode aborts with the error.
pub fn decode_xml_content_blocks(root: &mut Element) -> Result<usize, DecodeError> {
    let mut decoded = 0;
    root.try_visit_mut(&mut |element: &mut Element| -> Result<(), DecodeError> {
        if element.local_name() != XML_CONTENT_TAG {
            return Ok(());
        }
        let raw = element.text().unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(());
        }
        let payload = decode_gzip_base64(raw.trim())?;
        element.set_text(payload);
        decoded += 1;
        Ok(())
    })?;
    Ok(decoded)
}

/// Convert an SCML container into plain XML
///
/// `output` defaults to [`scml_output_path`]. All embedded blocks are
/// decoded in memory before anything is written.
pub fn scml_to_xml(input: &Path, output: Option<&Path>) -> Result<PathBuf, ConvertError> {
    if !input.is_file() {
        return Err(ConvertError::MissingInput(input.to_path_buf()));
    }
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| scml_output_path(input));
    if output.exists() {
        return Err(ConvertError::AlreadyConverted(output));
    }

    let source = sanitize(&fs::read(input)?);
    let mut document = parse_document(&source)?;
    let blocks = decode_xml_content_blocks(&mut document.root)?;
    let xml = write_document(&document)?;

    write_no_clobber(&output, |file| file.write_all(xml.as_bytes()))?;

    info!(
        "Decoded {} XmlContent block(s): {} -> {}",
        blocks,
        input.display(),
        output.display()
    );
    Ok(output)
}
