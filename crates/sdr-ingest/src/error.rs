//! Error types for decoding and reading SDR files.

use std::path::PathBuf;

use thiserror::Error;

/// A single line failed to decode against its layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Line is not exactly the layout's length (exact line policy only).
    #[error("invalid line length: expected {expected}, got {actual}")]
    LineLengthMismatch { expected: usize, actual: usize },

    /// Field's column range falls outside the line (strict bounds only).
    #[error(
        "field {field}: position out of bounds (start: {start}, end: {end}, line length: {line_length})"
    )]
    FieldOutOfBounds {
        field: String,
        start: usize,
        end: usize,
        line_length: usize,
    },

    /// Required field is blank after trimming.
    #[error("required field {field} is empty")]
    RequiredFieldEmpty { field: String },
}

/// Errors raised while reading or decoding whole files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Decoding stopped at a line; no records from the file are kept.
    #[error("error parsing line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: DecodeError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// 1-based line number for decode failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            IngestError::Line { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
