//! Declarative fixed-width layouts.

use std::collections::BTreeSet;
use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::format::FormatId;
use crate::options::DecodeOptions;
use crate::record::Record;

/// One column of a fixed-width layout.
///
/// `start` is 1-based, matching the published file specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub name: String,
    pub title: String,
    pub start: usize,
    pub length: usize,
    pub required: bool,
}

impl FieldLayout {
    pub fn required(
        name: impl Into<String>,
        title: impl Into<String>,
        start: usize,
        length: usize,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            start,
            length,
            required: true,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        title: impl Into<String>,
        start: usize,
        length: usize,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, title, start, length)
        }
    }

    /// Zero-based, end-exclusive column range.
    pub fn range(&self) -> Range<usize> {
        let start = self.start.saturating_sub(1);
        start..start + self.length
    }

    /// 1-based column of the last character of this field.
    pub fn last_column(&self) -> usize {
        self.start + self.length.saturating_sub(1)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::InvalidField {
                name: self.name.clone(),
                message: "name must not be empty".to_string(),
            });
        }
        if self.start == 0 {
            return Err(ModelError::InvalidField {
                name: self.name.clone(),
                message: "start column is 1-based and must be at least 1".to_string(),
            });
        }
        if self.length == 0 {
            return Err(ModelError::InvalidField {
                name: self.name.clone(),
                message: "length must be at least 1".to_string(),
            });
        }
        if self.start.checked_add(self.length).is_none() {
            return Err(ModelError::InvalidField {
                name: self.name.clone(),
                message: "start and length run past the addressable columns".to_string(),
            });
        }
        Ok(())
    }
}

/// The positional schema of one record format.
///
/// Field order is both parse order and output column order. Layouts are
/// hand-authored; overlapping columns are not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    format: FormatId,
    description: String,
    line_length: usize,
    fields: Vec<FieldLayout>,
    options: DecodeOptions,
    names: Arc<[String]>,
}

impl RecordLayout {
    pub fn new(
        format: FormatId,
        description: impl Into<String>,
        line_length: usize,
        fields: Vec<FieldLayout>,
    ) -> Result<Self> {
        if line_length == 0 {
            return Err(ModelError::InvalidLineLength);
        }
        let mut seen = BTreeSet::new();
        for field in &fields {
            field.validate()?;
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        let names: Arc<[String]> = fields.iter().map(|field| field.name.clone()).collect();
        Ok(Self {
            format,
            description: description.into(),
            line_length,
            fields,
            options: DecodeOptions::default(),
            names,
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn format(&self) -> FormatId {
        self.format
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn line_length(&self) -> usize {
        self.line_length
    }

    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Field titles in layout order, used as the CSV header.
    pub fn titles(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.title.as_str()).collect()
    }

    /// Build a record from values given in layout order.
    ///
    /// Missing trailing values are filled with empty strings and extra values
    /// are dropped, so the record always has one value per field.
    pub fn record(&self, mut values: Vec<String>) -> Record {
        values.resize(self.fields.len(), String::new());
        Record::new(Arc::clone(&self.names), values)
    }
}
