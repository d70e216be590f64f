use std::path::PathBuf;

use crate::xml::XmlError;

/// Errors that can occur while decoding an embedded Base64+GZip payload
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Payload is not valid Base64 (bad alphabet or padding)
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes do not start with the GZip magic number
    #[error("Payload is not a GZip stream (missing 1f 8b magic bytes)")]
    NotGzip,

    /// GZip stream is corrupt or truncated
    #[error("Decompression error: {0}")]
    Inflate(#[from] std::io::Error),

    /// Inflated payload is not UTF-8 text
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Errors raised while running the external `.dx` interpreter
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The file to convert does not exist
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The interpreter script does not exist
    #[error("Interpreter script not found: {}", .0.display())]
    ScriptNotFound(PathBuf),

    /// The interpreter binary does not exist or is not on PATH
    #[error("Interpreter not found: {}", .0.display())]
    InterpreterNotFound(PathBuf),

    /// The interpreter could not be started
    #[error("Failed to start interpreter {}: {source}", .interpreter.display())]
    Spawn {
        /// Interpreter that failed to start
        interpreter: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The interpreter ran but exited unsuccessfully
    #[error("Interpreter failed ({status}): {stderr}")]
    Failed {
        /// Exit status as reported by the OS
        status: String,
        /// Captured standard error
        stderr: String,
    },
}

/// Errors that can occur while converting a single file
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Source file is absent
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Destination already exists; the file is treated as converted
    #[error("Output file already exists: {}", .0.display())]
    AlreadyConverted(PathBuf),

    /// Write reported success but the output is not on disk
    #[error("Output file was not created: {}", .0.display())]
    OutputMissing(PathBuf),

    /// Embedded payload could not be decoded
    #[error("Embedded content error: {0}")]
    Decode(#[from] DecodeError),

    /// External interpreter failure
    #[error("External conversion error: {0}")]
    Process(#[from] ProcessError),

    /// Source XML could not be parsed or written
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
