//! Whole-file decoding.

use sdr_model::{Record, RecordLayout};
use tracing::debug;

use crate::decode::decode_line;
use crate::error::{IngestError, Result};

/// Convert CRLF and lone CR line endings to LF.
pub fn normalize_line_endings(content: &str) -> std::borrow::Cow<'_, str> {
    if content.contains('\r') {
        std::borrow::Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        std::borrow::Cow::Borrowed(content)
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Decode every data line of `content` with `layout`.
///
/// Whitespace-only lines at either end are dropped; line numbers count from
/// the first non-blank line. Whitespace-only lines in between are skipped but
/// still counted. Data lines are never trimmed before decoding. The first
/// failure aborts the whole file.
pub fn decode_content(layout: &RecordLayout, content: &str) -> Result<Vec<Record>> {
    let content = normalize_line_endings(content);
    let lines: Vec<&str> = content.split('\n').collect();

    let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
        debug!(format = %layout.format(), "no data lines");
        return Ok(Vec::new());
    };
    let last = lines
        .iter()
        .rposition(|line| !is_blank(line))
        .unwrap_or(first);

    let mut records = Vec::with_capacity(last - first + 1);
    for (index, line) in lines[first..=last].iter().enumerate() {
        if is_blank(line) {
            continue;
        }
        let record = decode_line(layout, line).map_err(|source| IngestError::Line {
            line: index + 1,
            source,
        })?;
        records.push(record);
    }

    debug!(
        format = %layout.format(),
        records = records.len(),
        "decoded file content"
    );
    Ok(records)
}
