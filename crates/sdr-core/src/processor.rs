//! File conversion pipeline: read, classify, decode, join, write.

use std::path::{Path, PathBuf};
use std::time::Instant;

use sdr_ingest::{IngestError, decode_content, read_text};
use sdr_model::{FormatId, ProcessingResult};
use sdr_output::{OutputError, write_csv};
use sdr_standards::LayoutRegistry;
use thiserror::Error;
use tracing::{debug, error, info, info_span};

use crate::dispatch::Dispatcher;
use crate::lookup::CompletionLookup;
use crate::table::DecodedTable;

const OUTPUT_SUFFIX: &str = "_parsed.csv";

/// Options for a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Directory that receives the CSV files.
    pub output_dir: PathBuf,
    /// Join completion indicators onto course-enrolment files.
    pub with_completion: bool,
    /// Decode (and join) without writing anything.
    pub dry_run: bool,
}

/// Reasons a single file fails to convert.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("unable to determine file type from filename: {filename}")]
    UnknownFormat { filename: String },

    #[error("failed to read file: {0}")]
    Read(#[source] IngestError),

    #[error("failed to parse file: {0}")]
    Decode(#[source] IngestError),

    #[error("failed to write CSV: {0}")]
    Write(#[from] OutputError),
}

/// Output file name for an input file: `.txt` (any case) is replaced by
/// `_parsed.csv`; other names keep their full name.
pub fn output_file_name(filename: &str) -> String {
    let stem = filename
        .len()
        .checked_sub(4)
        .filter(|&cut| filename.is_char_boundary(cut))
        .filter(|&cut| filename[cut..].eq_ignore_ascii_case(".txt"))
        .map_or(filename, |cut| &filename[..cut]);
    format!("{stem}{OUTPUT_SUFFIX}")
}

/// Converts files one at a time against a shared layout registry.
#[derive(Debug, Clone)]
pub struct Processor<'a> {
    registry: &'a LayoutRegistry,
    options: ProcessOptions,
}

impl<'a> Processor<'a> {
    pub fn new(registry: &'a LayoutRegistry, options: ProcessOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Convert one file. Failures are captured in the result, never returned.
    pub fn process_file(&self, path: &Path) -> ProcessingResult {
        let span = info_span!("file", path = %path.display());
        let _guard = span.enter();
        let start = Instant::now();

        let mut result = ProcessingResult::new(path);
        match self.convert(path, &mut result) {
            Ok(()) => {
                result.success = true;
                info!(
                    format = result.format.map(FormatId::code),
                    records = result.record_count,
                    warnings = result.warnings.len(),
                    duration_ms = start.elapsed().as_millis(),
                    "file converted"
                );
            }
            Err(err) => {
                error!(error = %err, "file conversion failed");
                result.error = Some(err.to_string());
            }
        }
        result
    }

    /// Convert files strictly in order. One failure never stops the rest.
    pub fn process_batch(&self, paths: &[PathBuf]) -> Vec<ProcessingResult> {
        let start = Instant::now();
        let results: Vec<ProcessingResult> =
            paths.iter().map(|path| self.process_file(path)).collect();
        let failed = results.iter().filter(|result| !result.success).count();
        info!(
            files = results.len(),
            succeeded = results.len() - failed,
            failed,
            duration_ms = start.elapsed().as_millis(),
            "batch complete"
        );
        results
    }

    fn convert(&self, path: &Path, result: &mut ProcessingResult) -> Result<(), ProcessError> {
        let content = read_text(path).map_err(ProcessError::Read)?;
        let filename = result.file_name();

        let layout = Dispatcher::new(self.registry)
            .classify(&filename, &content)
            .ok_or_else(|| ProcessError::UnknownFormat {
                filename: filename.clone(),
            })?;
        result.format = Some(layout.format());
        debug!(
            format = layout.format().code(),
            policy = %layout.options().label(),
            "layout selected"
        );

        let records = decode_content(layout, &content).map_err(ProcessError::Decode)?;
        result.record_count = records.len();

        let mut table = DecodedTable::new(layout, records);
        if self.options.with_completion && layout.format() == FormatId::CourseEnrolment {
            let lookup = CompletionLookup::load_for(path, self.registry);
            let stats = lookup.stats();
            debug!(
                entries = stats.entries,
                warnings = stats.warnings,
                "completion lookup ready"
            );
            result.warnings.extend(lookup.warnings().iter().cloned());
            table = table.with_completion(&lookup);
        }

        if self.options.dry_run {
            debug!("dry run; no output written");
            return Ok(());
        }

        let output_path = self.options.output_dir.join(output_file_name(&filename));
        write_csv(&output_path, &table)?;
        result.output_path = Some(output_path);
        Ok(())
    }
}
