use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::source::{SourceFile, SourceKind};

/// The five global passes of a pipeline run, in execution order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Stage {
    /// Copy the input tree into the output tree
    CopyTree,
    /// `.dx` through the external interpreter
    ConvertExternalFormat,
    /// `.scml` encoded containers to XML
    ConvertEncodedXmlContainer,
    /// `.acaml` / `.acmd` / `.mfx` renamed to XML
    RenameProprietaryToXml,
    /// `.xml` to text reports
    ParseXmlToReport,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 5] = [
        Stage::CopyTree,
        Stage::ConvertExternalFormat,
        Stage::ConvertEncodedXmlContainer,
        Stage::RenameProprietaryToXml,
        Stage::ParseXmlToReport,
    ];

    /// Source kinds consumed by this stage
    pub fn kinds(&self) -> &'static [SourceKind] {
        match self {
            Stage::CopyTree => &[],
            Stage::ConvertExternalFormat => &[SourceKind::Dx],
            Stage::ConvertEncodedXmlContainer => &[SourceKind::Scml],
            Stage::RenameProprietaryToXml => {
                &[SourceKind::Acaml, SourceKind::Acmd, SourceKind::Mfx]
            }
            Stage::ParseXmlToReport => &[SourceKind::Xml],
        }
    }

    /// Whether an existing output means "already converted"
    pub fn skips_existing_output(&self) -> bool {
        !matches!(self, Stage::ParseXmlToReport)
    }

    /// Heading used in logs
    pub fn title(&self) -> &'static str {
        match self {
            Stage::CopyTree => "Copying input folders",
            Stage::ConvertExternalFormat => "Processing .dx files",
            Stage::ConvertEncodedXmlContainer => "Processing .scml files",
            Stage::RenameProprietaryToXml => "Processing acaml/acmd/mfx files",
            Stage::ParseXmlToReport => "Processing XML files",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What happened to one source file
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Output written and confirmed on disk
    Converted,
    /// Output already existed; source left untouched
    Skipped,
    /// Conversion failed; source left untouched
    Failed(String),
}

/// Result of the produce phase for one file
///
/// The source is only deleted by [`super::commit`] after inspecting this.
#[derive(Clone, Debug, Serialize)]
pub struct ConversionResult {
    /// The consumed file
    pub source: SourceFile,
    /// Expected output path (file or directory)
    pub output: PathBuf,
    /// Outcome of the conversion
    pub outcome: Outcome,
}

impl ConversionResult {
    /// Whether the output was produced by this run
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Converted)
    }
}

/// Counters for one stage
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StageStats {
    /// Stage these counters belong to
    pub stage: Stage,
    /// Matching files found (entries copied for [`Stage::CopyTree`])
    pub discovered: usize,
    /// Files converted
    pub converted: usize,
    /// Files skipped because their output already existed
    pub skipped: usize,
    /// Files that failed
    pub failed: usize,
    /// Originals deleted after conversion
    pub removed: usize,
}

impl StageStats {
    /// Empty counters for a stage
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            discovered: 0,
            converted: 0,
            skipped: 0,
            failed: 0,
            removed: 0,
        }
    }

    pub(crate) fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Converted => self.converted += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Statistics for a complete run
#[derive(Clone, Debug, Serialize)]
pub struct PipelineSummary {
    /// Root of the output tree
    pub output_root: PathBuf,
    /// Per-stage counters in execution order
    pub stages: Vec<StageStats>,
}

impl PipelineSummary {
    /// Counters for one stage, if it ran
    pub fn stage(&self, stage: Stage) -> Option<&StageStats> {
        self.stages.iter().find(|s| s.stage == stage)
    }

    /// Total per-file failures across all stages
    pub fn total_failed(&self) -> usize {
        self.stages.iter().map(|s| s.failed).sum()
    }

    /// Total conversions across all stages
    pub fn total_converted(&self) -> usize {
        self.stages.iter().map(|s| s.converted).sum()
    }
}
