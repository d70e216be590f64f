use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use super::{write_no_clobber, ConvertError};

/// Copy a vendor file verbatim to a new `.xml` name
///
/// ACAML, ACMD and MFX files are already XML; only the extension is wrong.
/// `output_name` defaults to `<stem>.xml`. The input is left in place and
/// an existing destination is never overwritten.
pub fn copy_rename(
    input: &Path,
    output_dir: &Path,
    output_name: Option<&str>,
) -> Result<PathBuf, ConvertError> {
    if !input.is_file() {
        return Err(ConvertError::MissingInput(input.to_path_buf()));
    }

    let output_name = match output_name {
        Some(name) => name.to_string(),
        None => {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            format!("{}.xml", stem)
        }
    };
    let output = output_dir.join(output_name);

    let permissions = fs::metadata(input)?.permissions();
    write_no_clobber(&output, |staged| {
        let mut source = File::open(input)?;
        io::copy(&mut source, staged)?;
        staged.set_permissions(permissions)
    })?;

    debug!("Copied {} -> {}", input.display(), output.display());
    Ok(output)
}
