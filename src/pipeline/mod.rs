//! # Conversion Pipeline
//!
//! Drives the whole batch: copy the input tree, then run one global pass per
//! file type. Every file of a type is finished before the next type starts.
//!
//! ```text
//! CopyTree
//!   -> ConvertExternalFormat       (*.dx    -> <base>/)
//!   -> ConvertEncodedXmlContainer  (*.scml  -> <base>_scml.xml)
//!   -> RenameProprietaryToXml      (*.acaml -> <base>_acaml.xml, ...)
//!   -> ParseXmlToReport            (*.xml   -> <base>_<YYYYMMDD_HHMMSS>.txt)
//! ```
//!
//! Each file goes through an explicit two-phase commit: [`Pipeline::convert`]
//! produces the output and returns a [`ConversionResult`]; [`commit`] then
//! deletes the source only when that result is a success and the output is
//! present on disk. A failure on one file is logged and the stage moves on.

mod copy;
mod error;
mod source;
mod stage;

#[cfg(test)]
mod tests;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{error, info, warn};

use crate::decoders::{copy_rename, ensure_exists, scml_to_xml, ConvertError, DxConverter};
use crate::report::{render_file, ReportError};

pub use copy::copy_tree;
pub use error::PipelineError;
pub use source::{
    discover, renamed_xml_path, report_output_path, SourceFile, SourceKind,
    REPORT_TIMESTAMP_FORMAT,
};
pub use stage::{ConversionResult, Outcome, PipelineSummary, Stage, StageStats};

/// Default directory scanned for instrument data
pub const DEFAULT_INPUT_DIR: &str = "Data_to_parse";
/// Default directory receiving the working copy
pub const DEFAULT_OUTPUT_DIR: &str = "Output";

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Source tree, never modified
    pub input_dir: PathBuf,
    /// Working copy that is converted in place
    pub output_dir: PathBuf,
    /// `.dx` interpreter settings
    pub dx: DxConverter,
    /// Leave `.dx` files untouched
    pub skip_dx: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dx: DxConverter::default(),
            skip_dx: false,
        }
    }
}

/// Sequential batch converter
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run all stages
    ///
    /// Only a failure of the initial tree copy aborts the run.
    pub fn run(&self) -> Result<PipelineSummary, PipelineError> {
        info!("=== Starting Data Processing Pipeline ===");

        info!("=== {} ===", Stage::CopyTree);
        let copied = copy_tree(&self.config.input_dir, &self.config.output_dir)?;
        let mut copy_stats = StageStats::new(Stage::CopyTree);
        copy_stats.discovered = copied;
        copy_stats.converted = copied;

        let mut summary = PipelineSummary {
            output_root: self.config.output_dir.clone(),
            stages: vec![copy_stats],
        };

        for stage in &Stage::ALL[1..] {
            let stats = self.run_stage(*stage, &self.config.output_dir);
            summary.stages.push(stats);
        }

        info!("=== Processing Complete ===");
        Ok(summary)
    }

    /// Run one conversion stage over every matching file under `root`
    pub fn run_stage(&self, stage: Stage, root: &Path) -> StageStats {
        let mut stats = StageStats::new(stage);
        if stage == Stage::CopyTree {
            return stats;
        }
        if stage == Stage::ConvertExternalFormat && self.config.skip_dx {
            info!("Skipping .dx conversion");
            return stats;
        }

        info!("=== {} ===", stage);
        let files = discover(root, stage.kinds());
        stats.discovered = files.len();

        for file in files {
            info!("Processing: {}", file.path.display());
            let result = self.convert(&file);
            stats.record(&result.outcome);

            match &result.outcome {
                Outcome::Converted => info!("Converted to: {}", result.output.display()),
                Outcome::Skipped => {
                    info!("Skipping - already converted: {}", result.output.display())
                }
                Outcome::Failed(message) => {
                    error!("Error processing {}: {}", file.path.display(), message)
                }
            }

            match commit(&result) {
                Ok(true) => {
                    stats.removed += 1;
                    info!("Removed original: {}", file.path.display());
                }
                Ok(false) if result.is_success() => {
                    warn!("Output not found, keeping original: {}", file.path.display());
                }
                Ok(false) => {}
                Err(e) => error!(
                    "Converted but failed to remove original {}: {}",
                    file.path.display(),
                    e
                ),
            }
        }

        stats
    }

    /// Produce the output for one file without touching the source
    pub fn convert(&self, file: &SourceFile) -> ConversionResult {
        let now = Local::now();
        let output = file.output_path(&now);
        let stage = match file.kind {
            SourceKind::Dx => Stage::ConvertExternalFormat,
            SourceKind::Scml => Stage::ConvertEncodedXmlContainer,
            SourceKind::Acaml | SourceKind::Acmd | SourceKind::Mfx => {
                Stage::RenameProprietaryToXml
            }
            SourceKind::Xml => Stage::ParseXmlToReport,
        };

        let outcome = if stage.skips_existing_output() && output.exists() {
            Outcome::Skipped
        } else {
            let produced = match file.kind {
                SourceKind::Dx => self.convert_dx(&file.path),
                SourceKind::Scml => scml_to_xml(&file.path, Some(&output)).map(|_| ()),
                SourceKind::Acaml | SourceKind::Acmd | SourceKind::Mfx => {
                    convert_rename(&file.path, &output)
                }
                SourceKind::Xml => convert_report(&file.path, &output),
            };
            match produced {
                Ok(()) => Outcome::Converted,
                Err(ConvertError::AlreadyConverted(_)) => Outcome::Skipped,
                Err(e) => Outcome::Failed(e.to_string()),
            }
        };

        ConversionResult {
            source: file.clone(),
            output,
            outcome,
        }
    }

    fn convert_dx(&self, input: &Path) -> Result<(), ConvertError> {
        let output = self.config.dx.convert(input)?;
        ensure_exists(&output)
    }
}

fn convert_rename(input: &Path, output: &Path) -> Result<(), ConvertError> {
    let dir = output.parent().unwrap_or_else(|| Path::new("."));
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    copy_rename(input, dir, name.as_deref()).map(|_| ())
}

fn convert_report(input: &Path, output: &Path) -> Result<(), ConvertError> {
    let report = render_file(input).map_err(|ReportError::Io(e)| ConvertError::Io(e))?;
    if report.schema.is_none() {
        warn!("Malformed XML, writing raw dump: {}", input.display());
    }
    fs::write(output, report.text)?;
    ensure_exists(output)
}

/// Delete the source of a successful conversion
///
/// Returns `Ok(true)` when the source was removed. Nothing is deleted unless
/// the result is a success and its output exists on disk.
pub fn commit(result: &ConversionResult) -> io::Result<bool> {
    if !result.is_success() || fs::metadata(&result.output).is_err() {
        return Ok(false);
    }
    fs::remove_file(&result.source.path)?;
    Ok(true)
}
