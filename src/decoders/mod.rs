//! # Format Decoders
//!
//! Single-file conversions used by the pipeline stages:
//!
//! | Source | Decoder | Output |
//! |--------|---------|--------|
//! | `.dx` | [`DxConverter`] (external interpreter) | `<base>/` directory |
//! | `.scml` | [`scml_to_xml`] | `<base>_scml.xml` |
//! | `.acaml` / `.acmd` / `.mfx` | [`copy_rename`] | `<base>_<ext>.xml` |
//!
//! Decoders never delete their input. They return the output path once it
//! is confirmed on disk and leave the delete decision to the caller.

mod dx;
mod embedded;
mod error;
mod rename;
mod scml;

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

pub use dx::{DxConverter, DxMode};
pub use embedded::{decode_content, decode_gzip_base64, EmbeddedText, GZIP_BASE64_CONTENT_TYPE};
pub use error::{ConvertError, DecodeError, ProcessError};
pub use rename::copy_rename;
pub use scml::{decode_xml_content_blocks, scml_output_path, scml_to_xml, XML_CONTENT_TAG};

/// Write a new file without ever replacing an existing one
///
/// Content is staged in a temporary file next to `output` and then linked
/// into place, so a concurrent or pre-existing destination is left intact.
pub(crate) fn write_no_clobber<F>(output: &Path, fill: F) -> Result<(), ConvertError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    if output.exists() {
        return Err(ConvertError::AlreadyConverted(output.to_path_buf()));
    }

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    fill(staged.as_file_mut())?;
    staged.as_file_mut().sync_all()?;

    staged.persist_noclobber(output).map_err(|e| {
        if e.error.kind() == io::ErrorKind::AlreadyExists {
            ConvertError::AlreadyConverted(output.to_path_buf())
        } else {
            ConvertError::Io(e.error)
        }
    })?;

    ensure_exists(output)
}

/// Confirm an output path is present on disk
pub(crate) fn ensure_exists(output: &Path) -> Result<(), ConvertError> {
    if fs::metadata(output).is_ok() {
        Ok(())
    } else {
        Err(ConvertError::OutputMissing(output.to_path_buf()))
    }
}
