//! Completion lookup joined onto course-enrolment rows.
//!
//! The engine never fails: anything that goes wrong while loading the
//! companion completion file becomes a warning, and every lookup then
//! answers [`UNAVAILABLE`].

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use sdr_ingest::{decode_content, find_companion_file, read_text};
use sdr_model::{FormatId, Record};
use sdr_standards::LayoutRegistry;
use tracing::{debug, info, trace, warn};

use crate::redact::redact_value;

/// Indicator returned when no completion value is available.
pub const UNAVAILABLE: &str = "N/A";

const KEY_SEPARATOR: &str = "||";
const UNAVAILABLE_SUFFIX: &str = "completion data will show as N/A";

/// Student id, course code and course start date, trimmed and joined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey(String);

impl CompositeKey {
    pub fn new(id: &str, course: &str, start: &str) -> Self {
        Self([id.trim(), course.trim(), start.trim()].join(KEY_SEPARATOR))
    }

    fn from_record(record: &Record) -> Self {
        Self::new(
            record.value("ID"),
            record.value("COURSE"),
            record.value("CRS_SRT"),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Summary of a loaded lookup, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupStats {
    pub loaded: bool,
    pub entries: usize,
    pub warnings: usize,
}

/// Index from [`CompositeKey`] to completion indicator.
#[derive(Debug, Clone, Default)]
pub struct CompletionLookup {
    index: HashMap<CompositeKey, String>,
    loaded: bool,
    source: Option<PathBuf>,
    warnings: Vec<String>,
}

impl CompletionLookup {
    /// Discover, decode and index the completion file that accompanies
    /// `primary`, using the canonical completion layout.
    pub fn load_for(primary: &Path, registry: &LayoutRegistry) -> Self {
        let mut lookup = Self {
            loaded: true,
            ..Self::default()
        };

        let Some(path) =
            find_companion_file(primary, FormatId::CourseEnrolment, FormatId::Completion)
        else {
            lookup.push_warning(format!(
                "No COMP file found in the same directory - {UNAVAILABLE_SUFFIX}"
            ));
            return lookup;
        };
        info!(path = %path.display(), "loading completion data");

        let content = match read_text(&path) {
            Ok(content) => content,
            Err(err) => {
                lookup.push_warning(format!(
                    "Failed to read COMP file ({}): {err} - {UNAVAILABLE_SUFFIX}",
                    path.display()
                ));
                lookup.source = Some(path);
                return lookup;
            }
        };

        let layout = registry.layout_for(FormatId::Completion);
        match decode_content(layout, &content) {
            Ok(records) => lookup.index_records(&records),
            Err(err) => lookup.push_warning(format!(
                "Failed to parse COMP file ({}): {err} - {UNAVAILABLE_SUFFIX}",
                path.display()
            )),
        }
        lookup.source = Some(path);
        lookup
    }

    /// Build an index from already-decoded completion records.
    pub fn from_records(records: &[Record]) -> Self {
        let mut lookup = Self {
            loaded: true,
            ..Self::default()
        };
        lookup.index_records(records);
        lookup
    }

    fn index_records(&mut self, records: &[Record]) {
        if records.iter().any(|record| record.get("COMPLETE").is_none()) {
            self.push_warning(format!(
                "Completion layout has no COMPLETE field - {UNAVAILABLE_SUFFIX}"
            ));
            return;
        }
        for record in records {
            let key = CompositeKey::from_record(record);
            let complete = record.value("COMPLETE").to_string();
            if let Some(previous) = self.index.insert(key, complete) {
                trace!(
                    key = redact_value(CompositeKey::from_record(record).as_str()),
                    previous = redact_value(&previous),
                    "duplicate completion key; keeping the later record"
                );
            }
        }
        debug!(entries = self.index.len(), "completion index built");
    }

    fn push_warning(&mut self, warning: String) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Completion indicator for the given enrolment, or [`UNAVAILABLE`].
    pub fn lookup(&self, id: &str, course: &str, start: &str) -> &str {
        if !self.loaded {
            return UNAVAILABLE;
        }
        self.index
            .get(&CompositeKey::new(id, course, start))
            .map_or(UNAVAILABLE, String::as_str)
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Path of the completion file that was found, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn stats(&self) -> LookupStats {
        LookupStats {
            loaded: self.loaded,
            entries: self.index.len(),
            warnings: self.warnings.len(),
        }
    }
}
