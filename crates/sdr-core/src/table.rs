use sdr_model::{Record, RecordLayout};
use sdr_output::RowSource;

use crate::lookup::CompletionLookup;

/// Title of the appended completion column.
pub const COMPLETION_HEADER: &str = "Student Course Completion indicator";

/// Spacer columns written between the record fields and the indicator.
const SPACERS: [&str; 2] = ["", ""];

/// Decoded records of one file, optionally joined with completion
/// indicators, presented as rows for output.
#[derive(Debug, Clone)]
pub struct DecodedTable<'a> {
    layout: &'a RecordLayout,
    records: Vec<Record>,
    completion: Option<Vec<String>>,
}

impl<'a> DecodedTable<'a> {
    pub fn new(layout: &'a RecordLayout, records: Vec<Record>) -> Self {
        Self {
            layout,
            records,
            completion: None,
        }
    }

    /// Attach one completion indicator per record, keyed on the record's
    /// `ID`, `COURSE` and `CRS_SRT` values.
    #[must_use]
    pub fn with_completion(mut self, lookup: &CompletionLookup) -> Self {
        let indicators = self
            .records
            .iter()
            .map(|record| {
                lookup
                    .lookup(
                        record.value("ID"),
                        record.value("COURSE"),
                        record.value("CRS_SRT"),
                    )
                    .to_string()
            })
            .collect();
        self.completion = Some(indicators);
        self
    }

    pub fn layout(&self) -> &RecordLayout {
        self.layout
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn completion(&self) -> Option<&[String]> {
        self.completion.as_deref()
    }
}

impl RowSource for DecodedTable<'_> {
    fn header(&self) -> Vec<&str> {
        let mut header = self.layout.titles();
        if self.completion.is_some() {
            header.extend(SPACERS);
            header.push(COMPLETION_HEADER);
        }
        header
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn row(&self, index: usize) -> Vec<&str> {
        let mut row: Vec<&str> = self.records[index]
            .values()
            .iter()
            .map(String::as_str)
            .collect();
        if let Some(completion) = &self.completion {
            row.extend(SPACERS);
            row.push(&completion[index]);
        }
        row
    }
}
