use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::format::FormatId;

/// Outcome of converting one input file.
///
/// This is the only structure handed to reporting layers; errors are kept as
/// display strings so results can be serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub record_count: usize,
    pub format: Option<FormatId>,
    pub success: bool,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ProcessingResult {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            record_count: 0,
            format: None,
            success: false,
            error: None,
            warnings: Vec::new(),
        }
    }

    pub fn file_name(&self) -> String {
        self.input_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input_path.display().to_string())
    }
}
