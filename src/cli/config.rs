//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can specify settings in a config file:
//!
//! ```toml
//! # labxml.toml
//! [pipeline]
//! input_dir = "Data_to_parse"
//! output_dir = "Output"
//! skip_dx = false
//!
//! [dx]
//! interpreter = "Rscript"
//! interpreter_args = ["--vanilla"]
//! script = "dx_converter.R"
//! mode = "clean"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use labxml::decoders::DxMode;

/// Root configuration structure for labxml.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Directory and stage settings.
    #[serde(default)]
    pub pipeline: PipelineSection,

    /// External interpreter settings for `.dx` files.
    #[serde(default)]
    pub dx: DxSection,
}

/// Configuration for the run command.
#[derive(Debug, Default, Deserialize)]
pub struct PipelineSection {
    /// Directory scanned for instrument data.
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the converted copy.
    pub output_dir: Option<PathBuf>,

    /// Leave `.dx` files untouched.
    pub skip_dx: Option<bool>,
}

/// Configuration for the `.dx` interpreter.
#[derive(Debug, Default, Deserialize)]
pub struct DxSection {
    /// Interpreter executable.
    pub interpreter: Option<PathBuf>,

    /// Arguments placed before the script path.
    pub interpreter_args: Option<Vec<String>>,

    /// Extraction script.
    pub script: Option<PathBuf>,

    /// Detail level passed to the script.
    pub mode: Option<DxMode>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
