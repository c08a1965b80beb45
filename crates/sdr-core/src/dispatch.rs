//! Layout selection for input files.

use sdr_ingest::{detect_format, looks_like_course_enrolment, normalize_line_endings};
use sdr_model::{FormatId, RecordLayout};
use sdr_standards::LayoutRegistry;
use tracing::debug;

/// Picks the record layout for a file.
///
/// A filename match is authoritative. When the name says nothing, the first
/// data line is checked against the course-enrolment structure.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'a> {
    registry: &'a LayoutRegistry,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a LayoutRegistry) -> Self {
        Self { registry }
    }

    /// Layout chosen from the filename alone.
    pub fn select(&self, filename: &str) -> Option<&'a RecordLayout> {
        detect_format(filename).map(|format| self.registry.layout_for(format))
    }

    /// Layout chosen from the filename, falling back to the content.
    pub fn classify(&self, filename: &str, content: &str) -> Option<&'a RecordLayout> {
        if let Some(layout) = self.select(filename) {
            return Some(layout);
        }

        let cour = self.registry.layout_for(FormatId::CourseEnrolment);
        let content = normalize_line_endings(content);
        let first = content.split('\n').find(|line| !line.trim().is_empty())?;
        if looks_like_course_enrolment(first, cour.line_length()) {
            debug!(filename, "classified as course enrolment from line structure");
            return Some(cour);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cour_line() -> String {
        format!("{:<4}{:<10}{:<6}{:<166}", "9170", "917000047", "NZ1234", "2102-530")
    }

    #[test]
    fn filename_wins_over_content() {
        let registry = LayoutRegistry::embedded().unwrap();
        let dispatcher = Dispatcher::new(&registry);
        let layout = dispatcher.classify("QUAL9170.txt", &cour_line()).unwrap();
        assert_eq!(layout.format(), FormatId::Qualification);
    }

    #[test]
    fn content_fallback_finds_course_enrolment() {
        let registry = LayoutRegistry::embedded().unwrap();
        let dispatcher = Dispatcher::new(&registry);
        assert!(dispatcher.select("extract.txt").is_none());

        let content = format!("\r\n  \r\n{}\r\n", cour_line());
        let layout = dispatcher.classify("extract.txt", &content).unwrap();
        assert_eq!(layout.format(), FormatId::CourseEnrolment);
    }

    #[test]
    fn undetermined_stays_undetermined() {
        let registry = LayoutRegistry::embedded().unwrap();
        let dispatcher = Dispatcher::new(&registry);
        assert!(dispatcher.classify("extract.txt", "").is_none());
        assert!(dispatcher.classify("extract.txt", "hello world\n").is_none());
    }
}
