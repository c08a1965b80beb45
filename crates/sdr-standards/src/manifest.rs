#![deny(unsafe_code)]

use std::path::Path;

use sdr_model::{DecodeOptions, FormatId};
use serde::Deserialize;

use crate::error::StandardsError;

/// Name of the manifest file inside a layouts directory.
pub const MANIFEST_FILE: &str = "manifest.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(rename = "layout", default)]
    pub layouts: Vec<ManifestLayout>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestLayout {
    pub format: FormatId,
    /// Named alternative revision; absent for the canonical layout.
    #[serde(default)]
    pub variant: Option<String>,
    pub description: String,
    pub line_length: usize,
    /// Field table file, relative to the manifest.
    pub fields: String,
    #[serde(default)]
    pub options: DecodeOptions,
}

pub fn parse_manifest(contents: &str, path: &Path) -> Result<Manifest, StandardsError> {
    toml::from_str(contents).map_err(|source| StandardsError::Toml {
        path: path.to_path_buf(),
        source,
    })
}
