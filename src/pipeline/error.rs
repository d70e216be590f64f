use std::path::PathBuf;

/// Errors that abort a whole pipeline run
///
/// Per-file failures never surface here; they are recorded in the stage
/// statistics and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input directory does not exist or is not a directory
    #[error("Input directory does not exist: {}", .0.display())]
    InputDirMissing(PathBuf),

    /// One of the input and output directories lies inside the other
    #[error("Input directory {} and output directory {} must not be nested", .input.display(), .output.display())]
    NestedOutput {
        /// Input directory
        input: PathBuf,
        /// Output directory
        output: PathBuf,
    },

    /// Copying the input tree failed
    #[error("Failed to copy {}: {source}", .path.display())]
    Copy {
        /// Path being copied or cleaned
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}
