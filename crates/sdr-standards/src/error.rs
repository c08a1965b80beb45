#![deny(unsafe_code)]

use std::path::PathBuf;

use sdr_model::{FormatId, ModelError};

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("invalid layout in {path}: {source}")]
    Model {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    #[error("missing field table listed in manifest: {path}")]
    MissingFieldsFile { path: PathBuf },

    #[error("manifest has no canonical layout for {format}")]
    MissingFormat { format: FormatId },

    #[error("duplicate {variant} layout for {format}")]
    DuplicateLayout { format: FormatId, variant: String },

    #[error("unknown format: {token}")]
    UnknownFormat { token: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Csv {
            path: path.into(),
            message: message.into(),
        }
    }
}
