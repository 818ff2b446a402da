use std::fmt;

use serde::Serialize;
use ts_rs::TS;

/// Structured error type for the rendering core. Replaces stringly-typed errors
/// so the host can match on error codes and display appropriate UI.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "code", content = "detail")]
#[ts(export)]
pub enum BackdropError {
    /// A color string did not match the 6-hex-digit pattern (optional `#` prefix).
    InvalidColorFormat { value: String },
    ValidationError { message: String },
    IoError { message: String },
    JsonError { message: String },
}

impl fmt::Display for BackdropError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackdropError::InvalidColorFormat { value } => {
                write!(f, "Invalid color format: {value:?}")
            }
            BackdropError::ValidationError { message } => write!(f, "{message}"),
            BackdropError::IoError { message } => write!(f, "I/O error: {message}"),
            BackdropError::JsonError { message } => write!(f, "JSON error: {message}"),
        }
    }
}

impl std::error::Error for BackdropError {}

impl From<std::io::Error> for BackdropError {
    fn from(e: std::io::Error) -> Self {
        BackdropError::IoError {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for BackdropError {
    fn from(e: serde_json::Error) -> Self {
        BackdropError::JsonError {
            message: e.to_string(),
        }
    }
}

/// Allow converting BackdropError to String for host IPC layers.
impl From<BackdropError> for String {
    fn from(e: BackdropError) -> String {
        e.to_string()
    }
}
