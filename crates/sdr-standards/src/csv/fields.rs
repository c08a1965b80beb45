#![deny(unsafe_code)]

use std::path::Path;

use sdr_model::FieldLayout;

use crate::error::StandardsError;

/// Parse a field table with the columns `Name,Title,Start,Length,Required`.
///
/// Rows keep file order; it is the layout's column order.
pub fn parse_fields_csv(contents: &str, path: &Path) -> Result<Vec<FieldLayout>, StandardsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(contents.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| StandardsError::csv(path, e.to_string()))?
        .clone();

    let mut fields = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row.map_err(|e| StandardsError::csv(path, e.to_string()))?;
        let row_number = idx + 2;

        let get = |name: &str| -> Option<String> {
            headers
                .iter()
                .position(|h| h.trim_matches('\u{feff}') == name)
                .and_then(|i| row.get(i))
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };
        let require = |name: &str| -> Result<String, StandardsError> {
            get(name).ok_or_else(|| {
                StandardsError::csv(path, format!("row {row_number}: missing {name}"))
            })
        };
        let number = |name: &str| -> Result<usize, StandardsError> {
            let raw = require(name)?;
            raw.parse::<usize>().map_err(|_| {
                StandardsError::csv(
                    path,
                    format!("row {row_number}: {name} is not a column number: {raw}"),
                )
            })
        };

        let name = require("Name")?;
        let title = get("Title").unwrap_or_else(|| name.clone());
        let start = number("Start")?;
        let length = number("Length")?;
        let required = get("Required").as_deref().is_some_and(parse_flag);

        fields.push(FieldLayout {
            name,
            title,
            start,
            length,
            required,
        });
    }
    Ok(fields)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_uppercase().as_str(),
        "Y" | "YES" | "TRUE" | "1" | "R" | "REQ"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_order() {
        let csv = "Name,Title,Start,Length,Required\n\
                   ID,\"Student Identification Code\",1,13,Y\n\
                   CRS_END,,45,8,N\n";
        let fields = parse_fields_csv(csv, Path::new("comp.csv")).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].title, "Student Identification Code");
        assert!(fields[0].required);
        assert_eq!(fields[1].title, "CRS_END");
        assert!(!fields[1].required);
        assert_eq!(fields[1].start, 45);
    }

    #[test]
    fn reports_bad_numbers_with_row() {
        let csv = "Name,Title,Start,Length,Required\nID,Id,one,13,Y\n";
        let err = parse_fields_csv(csv, Path::new("x.csv")).unwrap_err();
        assert!(err.to_string().contains("row 2: Start is not a column number"));
    }
}
