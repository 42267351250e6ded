//! Error types for bundle operations.

use thiserror::Error;

/// Errors that can occur while deriving the unofficial bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ZIP archive error.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Required input file does not exist.
    #[error("Missing required file: {0}")]
    MissingFile(String),

    /// Archive entry expected by an edit is not present.
    #[error("Missing archive entry: {0}")]
    MissingEntry(String),

    /// Manifest is structurally unusable.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// External archive tool exited unsuccessfully.
    #[error("{tool} {operation} failed with {}", describe_exit(.code))]
    ToolFailed {
        tool: String,
        operation: &'static str,
        code: Option<i32>,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
