//! `.dx` conversion through an external statistics interpreter
//!
//! `.dx` files are proprietary containers with no public layout. An R script
//! extracts their tabular data; this module only drives the subprocess:
//!
//! ```text
//! Rscript --vanilla dx_converter.R <file.dx> <clean|full>
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::ProcessError;

/// Output mode passed to the interpreter script
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DxMode {
    /// Only the derived tabular file
    #[default]
    Clean,
    /// Tabular file plus auxiliary files
    Full,
}

impl DxMode {
    /// Argument value understood by the script
    pub fn as_str(&self) -> &'static str {
        match self {
            DxMode::Clean => "clean",
            DxMode::Full => "full",
        }
    }
}

impl fmt::Display for DxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DxMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clean" => Ok(DxMode::Clean),
            "full" => Ok(DxMode::Full),
            _ => Err(format!("Unknown dx mode '{}'. Valid options: clean, full", s)),
        }
    }
}

/// Runs the `.dx` extraction script
#[derive(Debug, Clone)]
pub struct DxConverter {
    interpreter: PathBuf,
    interpreter_args: Vec<String>,
    script: PathBuf,
    mode: DxMode,
}

impl Default for DxConverter {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from("Rscript"),
            interpreter_args: vec!["--vanilla".to_string()],
            script: PathBuf::from("dx_converter.R"),
            mode: DxMode::Clean,
        }
    }
}

impl DxConverter {
    /// Create a converter with the default interpreter and script
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interpreter binary (a bare name is looked up on PATH)
    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Set the arguments placed before the script path
    pub fn with_interpreter_args(mut self, args: Vec<String>) -> Self {
        self.interpreter_args = args;
        self
    }

    /// Set the script path
    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = script.into();
        self
    }

    /// Set the output mode
    pub fn with_mode(mut self, mode: DxMode) -> Self {
        self.mode = mode;
        self
    }

    /// Configured mode
    pub fn mode(&self) -> DxMode {
        self.mode
    }

    /// Directory the script writes its output to: the input path without
    /// its extension
    pub fn output_dir(input: &Path) -> PathBuf {
        input.with_extension("")
    }

    /// Run the script on one file and block until it exits
    pub fn convert(&self, input: &Path) -> Result<PathBuf, ProcessError> {
        if !input.exists() {
            return Err(ProcessError::InputNotFound(input.to_path_buf()));
        }
        if !self.script.exists() {
            return Err(ProcessError::ScriptNotFound(self.script.clone()));
        }
        // A bare command name is resolved through PATH at spawn time
        if self.interpreter.components().count() > 1 && !self.interpreter.exists() {
            return Err(ProcessError::InterpreterNotFound(self.interpreter.clone()));
        }

        debug!(
            "Running {} {:?} {} {} {}",
            self.interpreter.display(),
            self.interpreter_args,
            self.script.display(),
            input.display(),
            self.mode
        );

        let output = Command::new(&self.interpreter)
            .args(&self.interpreter_args)
            .arg(&self.script)
            .arg(input)
            .arg(self.mode.as_str())
            .output()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::NotFound {
                    ProcessError::InterpreterNotFound(self.interpreter.clone())
                } else {
                    ProcessError::Spawn {
                        interpreter: self.interpreter.clone(),
                        source,
                    }
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !stdout.trim().is_empty() {
            debug!("{}", stdout.trim_end());
        }

        if !output.status.success() {
            return Err(ProcessError::Failed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        if !stderr.trim().is_empty() {
            warn!("Interpreter stderr for {}: {}", input.display(), stderr.trim());
        }

        let output_dir = Self::output_dir(input);
        info!("Converted {} -> {}", input.display(), output_dir.display());
        Ok(output_dir)
    }
}
