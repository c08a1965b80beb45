//! Machine-readable run report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use sdr_model::ProcessingResult;

/// Write every file's result to `path` as a pretty-printed JSON array.
pub fn write_report(path: &Path, results: &[ProcessingResult]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)
        .with_context(|| format!("write report {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("write report {}", path.display()))
}

/// Process exit code for a run: 1 when any file failed.
pub fn exit_code(results: &[ProcessingResult]) -> i32 {
    i32::from(results.iter().any(|result| !result.success))
}
