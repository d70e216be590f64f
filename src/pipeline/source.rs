use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::warn;
use serde::Serialize;
use walkdir::WalkDir;

use crate::decoders::{scml_output_path, DxConverter};

/// Timestamp format of text report file names
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// File types handled by the pipeline, keyed by extension
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SourceKind {
    /// `.dx` proprietary container
    Dx,
    /// `.scml` sample container with encoded blocks
    Scml,
    /// `.acaml` result set
    Acaml,
    /// `.acmd` acquisition description
    Acmd,
    /// `.mfx` method file
    Mfx,
    /// `.xml` ready for reporting
    Xml,
}

impl SourceKind {
    /// Identify a file by extension, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "dx" => Some(SourceKind::Dx),
            "scml" => Some(SourceKind::Scml),
            "acaml" => Some(SourceKind::Acaml),
            "acmd" => Some(SourceKind::Acmd),
            "mfx" => Some(SourceKind::Mfx),
            "xml" => Some(SourceKind::Xml),
            _ => None,
        }
    }
}

/// A discovered file awaiting conversion
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceFile {
    /// Location on disk
    pub path: PathBuf,
    /// File type
    pub kind: SourceKind,
}

impl SourceFile {
    /// Wrap a path if its extension is a known source type
    pub fn new(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let kind = SourceKind::from_path(&path)?;
        Some(Self { path, kind })
    }

    /// Where the converted output of this file goes
    ///
    /// `now` only matters for `.xml` files, whose reports are timestamped.
    pub fn output_path(&self, now: &DateTime<Local>) -> PathBuf {
        match self.kind {
            SourceKind::Dx => DxConverter::output_dir(&self.path),
            SourceKind::Scml => scml_output_path(&self.path),
            SourceKind::Acaml | SourceKind::Acmd | SourceKind::Mfx => {
                renamed_xml_path(&self.path)
            }
            SourceKind::Xml => report_output_path(&self.path, now),
        }
    }
}

/// `<base>_<ext>.xml`, keeping the extension as written
pub fn renamed_xml_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let ext = input.extension().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}_{}.xml", stem, ext))
}

/// `<base>_<YYYYMMDD_HHMMSS>.txt`
pub fn report_output_path(input: &Path, now: &DateTime<Local>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!(
        "{}_{}.txt",
        stem,
        now.format(REPORT_TIMESTAMP_FORMAT)
    ))
}

/// Recursively collect files of the given kinds under `root`
///
/// The list is built completely before any file is processed, so outputs
/// written during a stage are never picked up by the same stage.
pub fn discover(root: &Path, kinds: &[SourceKind]) -> Vec<SourceFile> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| SourceFile::new(entry.into_path()))
        .filter(|file| kinds.contains(&file.kind))
        .collect()
}
