//! Format detection from filenames and, as a fallback, line structure.

use sdr_model::FormatId;

/// Detect the format from a file name.
///
/// The name is matched case-insensitively against each format code in
/// priority order; the first code contained anywhere in the name wins.
pub fn detect_format(filename: &str) -> Option<FormatId> {
    let upper = filename.to_ascii_uppercase();
    FormatId::ALL
        .into_iter()
        .find(|format| upper.contains(format.code()))
}

/// Structural check for a course-enrolment line.
///
/// The line must be exactly `line_length` characters, start with a 4-digit
/// provider code, and carry a student id (columns 5-14) and a qualification
/// code (columns 15-20).
pub fn looks_like_course_enrolment(line: &str, line_length: usize) -> bool {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() != line_length || chars.len() < 20 {
        return false;
    }
    let segment = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();

    let provider = segment(0..4);
    let provider = provider.trim();
    if provider.len() != 4 || !provider.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    !segment(4..14).trim().is_empty() && !segment(14..20).trim().is_empty()
}
