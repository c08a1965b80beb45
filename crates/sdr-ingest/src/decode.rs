//! Single-line fixed-width decoding.
//!
//! Columns are counted in characters, not bytes, so a multi-byte character
//! occupies one column and slicing never splits it.

use std::borrow::Cow;

use sdr_model::{BoundsPolicy, LinePolicy, Record, RecordLayout};

use crate::error::DecodeError;

/// Apply the layout's line policy: pad/truncate to the expected length, or
/// reject a line of the wrong length.
pub fn prepare_line<'a>(layout: &RecordLayout, line: &'a str) -> Result<Cow<'a, str>, DecodeError> {
    let expected = layout.line_length();
    let actual = line.chars().count();
    if actual == expected {
        return Ok(Cow::Borrowed(line));
    }
    match layout.options().line_policy {
        LinePolicy::Exact => Err(DecodeError::LineLengthMismatch { expected, actual }),
        LinePolicy::PadOrTruncate if actual < expected => {
            let mut padded = String::with_capacity(line.len() + expected - actual);
            padded.push_str(line);
            padded.extend(std::iter::repeat_n(' ', expected - actual));
            Ok(Cow::Owned(padded))
        }
        LinePolicy::PadOrTruncate => {
            let cut = line
                .char_indices()
                .nth(expected)
                .map_or(line.len(), |(offset, _)| offset);
            Ok(Cow::Borrowed(&line[..cut]))
        }
    }
}

/// Decode one line into a record using `layout`.
///
/// Pure: the result depends only on the line and the layout.
pub fn decode_line(layout: &RecordLayout, line: &str) -> Result<Record, DecodeError> {
    let options = layout.options();
    let prepared = prepare_line(layout, line)?;

    // offsets[k] is the byte offset of column k; the last entry is the end.
    let mut offsets: Vec<usize> = prepared.char_indices().map(|(offset, _)| offset).collect();
    offsets.push(prepared.len());
    let columns = offsets.len() - 1;

    let mut values = Vec::with_capacity(layout.fields().len());
    for field in layout.fields() {
        let range = field.range();
        let raw = if range.end > columns {
            match options.bounds {
                BoundsPolicy::Strict => {
                    return Err(DecodeError::FieldOutOfBounds {
                        field: field.name.clone(),
                        start: range.start,
                        end: range.end,
                        line_length: columns,
                    });
                }
                BoundsPolicy::Lenient => "",
            }
        } else {
            &prepared[offsets[range.start]..offsets[range.end]]
        };

        let value = options.trim.apply(raw);
        if field.required && value.is_empty() {
            return Err(DecodeError::RequiredFieldEmpty {
                field: field.name.clone(),
            });
        }
        values.push(value.to_string());
    }
    Ok(layout.record(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdr_model::{DecodeOptions, FieldLayout, FormatId, TrimMode};

    fn layout(options: DecodeOptions) -> RecordLayout {
        RecordLayout::new(
            FormatId::Qualification,
            "test",
            10,
            vec![
                FieldLayout::required("A", "A", 1, 4),
                FieldLayout::optional("B", "B", 5, 3),
                FieldLayout::optional("C", "C", 8, 3),
            ],
        )
        .unwrap()
        .with_options(options)
    }

    #[test]
    fn pads_short_lines() {
        let layout = layout(DecodeOptions::lenient());
        assert_eq!(prepare_line(&layout, "AB").unwrap(), "AB        ");
        let record = decode_line(&layout, "1234ab").unwrap();
        assert_eq!(record.values(), ["1234", "ab", ""]);
    }

    #[test]
    fn truncates_long_lines() {
        let layout = layout(DecodeOptions::lenient());
        let record = decode_line(&layout, "1234abcxyzGARBAGE").unwrap();
        assert_eq!(record.get("C"), Some("xyz"));
    }

    #[test]
    fn exact_policy_rejects_other_lengths() {
        let layout = layout(DecodeOptions::strict());
        assert_eq!(
            decode_line(&layout, "1234").unwrap_err(),
            DecodeError::LineLengthMismatch {
                expected: 10,
                actual: 4
            }
        );
        assert!(decode_line(&layout, "1234abcxyz").is_ok());
    }

    #[test]
    fn strict_bounds_reports_field_past_line() {
        let layout = RecordLayout::new(
            FormatId::Completion,
            "overhang",
            4,
            vec![
                FieldLayout::required("A", "A", 1, 2),
                FieldLayout::optional("B", "B", 3, 5),
            ],
        )
        .unwrap();

        let lenient = decode_line(&layout, "AABB").unwrap();
        assert_eq!(lenient.get("B"), Some(""));

        let strict = layout.with_options(DecodeOptions::strict());
        assert_eq!(
            decode_line(&strict, "AABB").unwrap_err(),
            DecodeError::FieldOutOfBounds {
                field: "B".to_string(),
                start: 2,
                end: 7,
                line_length: 4
            }
        );
    }

    #[test]
    fn required_blank_field_fails() {
        let layout = layout(DecodeOptions::lenient());
        assert_eq!(
            decode_line(&layout, "    abc").unwrap_err(),
            DecodeError::RequiredFieldEmpty {
                field: "A".to_string()
            }
        );
    }

    #[test]
    fn trailing_trim_keeps_leading_spaces() {
        let both = layout(DecodeOptions::lenient());
        let trailing = layout(DecodeOptions::lenient().with_trim(TrimMode::Trailing));
        let line = "  12 b  c";
        assert_eq!(decode_line(&both, line).unwrap().get("A"), Some("12"));
        assert_eq!(decode_line(&trailing, line).unwrap().get("A"), Some("  12"));
        assert_eq!(decode_line(&trailing, line).unwrap().get("B"), Some(" b"));
    }

    #[test]
    fn multibyte_characters_count_as_one_column() {
        let layout = layout(DecodeOptions::lenient());
        let record = decode_line(&layout, "Māorab cdefgh").unwrap();
        assert_eq!(record.get("A"), Some("Māor"));
        assert_eq!(record.get("B"), Some("ab"));
        assert_eq!(record.get("C"), Some("cde"));
    }
}
