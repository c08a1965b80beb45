//! Companion-file and data-file discovery.

use std::path::{Path, PathBuf};

use sdr_model::FormatId;

use crate::detect::detect_format;
use crate::error::{IngestError, Result};

const TXT: &str = "txt";

/// Locate the companion file of `to` format next to `primary`.
///
/// A primary named `COUR2024.txt` yields the suffix `2024`, so `COMP2024.txt`
/// is tried before a bare `COMP.txt`. Each candidate is tried in upper, lower
/// and capitalized spelling, with `.txt` and then with the primary's own
/// extension spelling.
pub fn find_companion_file(primary: &Path, from: FormatId, to: FormatId) -> Option<PathBuf> {
    let dir = primary.parent().unwrap_or_else(|| Path::new(""));
    let name = primary.file_name()?.to_string_lossy();
    let upper = name.to_ascii_uppercase();

    let suffix = upper
        .strip_prefix(from.code())
        .and_then(|rest| rest.strip_suffix(".TXT"))
        .map(|middle| {
            // Keep the primary's own spelling of the suffix.
            let start = from.code().len();
            name[start..start + middle.len()].to_string()
        })
        .unwrap_or_default();

    let own_ext = primary
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .filter(|ext| ext != TXT);

    let mut stems = Vec::with_capacity(6);
    if !suffix.is_empty() {
        stems.extend(spellings(to).map(|code| format!("{code}{suffix}")));
    }
    stems.extend(spellings(to));

    stems.iter().find_map(|stem| {
        std::iter::once(TXT)
            .chain(own_ext.as_deref())
            .map(|ext| dir.join(format!("{stem}.{ext}")))
            .find(|candidate| candidate.is_file())
    })
}

fn spellings(format: FormatId) -> impl Iterator<Item = String> {
    let upper = format.code().to_string();
    let lower = upper.to_ascii_lowercase();
    let capitalized = format!("{}{}", &upper[..1], &lower[1..]);
    [upper, lower, capitalized].into_iter()
}

/// List the `.txt` data files in `dir` whose names match `format`, or any
/// known format when `format` is `None`.
///
/// Files are grouped in format priority order and sorted by name within a
/// group.
pub fn list_data_files(dir: &Path, format: Option<FormatId>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files: Vec<(FormatId, PathBuf)> = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TXT));
        if !is_txt {
            continue;
        }

        let Some(detected) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(detect_format)
        else {
            continue;
        };
        if format.is_none_or(|wanted| wanted == detected) {
            files.push((detected, path));
        }
    }

    files.sort_by(|(fa, a), (fb, b)| fa.cmp(fb).then_with(|| a.file_name().cmp(&b.file_name())));
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "").unwrap();
        path
    }

    #[test]
    fn suffixed_companion_wins_over_bare() {
        let temp = TempDir::new().unwrap();
        let primary = touch(temp.path(), "COUR2024.txt");
        touch(temp.path(), "COMP.txt");
        let suffixed = touch(temp.path(), "comp2024.txt");

        let found = find_companion_file(&primary, FormatId::CourseEnrolment, FormatId::Completion);
        assert_eq!(found, Some(suffixed));
    }

    #[test]
    fn bare_companion_is_the_fallback() {
        let temp = TempDir::new().unwrap();
        let primary = touch(temp.path(), "cour_2024.TXT");
        let bare = touch(temp.path(), "Comp.TXT");

        let found = find_companion_file(&primary, FormatId::CourseEnrolment, FormatId::Completion);
        assert_eq!(found, Some(bare));
    }

    #[test]
    fn missing_companion_is_none() {
        let temp = TempDir::new().unwrap();
        let primary = touch(temp.path(), "COUR.txt");
        fs::create_dir(temp.path().join("COMP.txt")).unwrap();
        assert_eq!(
            find_companion_file(&primary, FormatId::CourseEnrolment, FormatId::Completion),
            None
        );
    }

    #[test]
    fn data_files_group_by_priority() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "COMP2024.txt");
        touch(temp.path(), "cour_b.txt");
        touch(temp.path(), "COUR_a.TXT");
        touch(temp.path(), "STUD.txt");
        touch(temp.path(), "STUD.csv");
        touch(temp.path(), "notes.txt");
        fs::create_dir(temp.path().join("QUAL.txt")).unwrap();

        let names = |files: Vec<PathBuf>| -> Vec<String> {
            files
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect()
        };

        let all = list_data_files(temp.path(), None).unwrap();
        assert_eq!(
            names(all),
            vec!["STUD.txt", "COUR_a.TXT", "cour_b.txt", "COMP2024.txt"]
        );

        let comp = list_data_files(temp.path(), Some(FormatId::Completion)).unwrap();
        assert_eq!(names(comp), vec!["COMP2024.txt"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = list_data_files(&temp.path().join("nope"), None).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
