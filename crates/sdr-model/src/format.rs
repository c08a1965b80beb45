//! Format identifiers for the supported SDR record kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the five fixed-width SDR record kinds.
///
/// The variant order is the filename detection priority: when a name contains
/// more than one token, the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormatId {
    #[serde(rename = "STUD")]
    Student,
    #[serde(rename = "COUR")]
    CourseEnrolment,
    #[serde(rename = "CREG")]
    CourseRegister,
    #[serde(rename = "COMP")]
    Completion,
    #[serde(rename = "QUAL")]
    Qualification,
}

impl FormatId {
    /// All formats in detection priority order.
    pub const ALL: [FormatId; 5] = [
        FormatId::Student,
        FormatId::CourseEnrolment,
        FormatId::CourseRegister,
        FormatId::Completion,
        FormatId::Qualification,
    ];

    /// The canonical token used in filenames and on the command line.
    pub fn code(self) -> &'static str {
        match self {
            FormatId::Student => "STUD",
            FormatId::CourseEnrolment => "COUR",
            FormatId::CourseRegister => "CREG",
            FormatId::Completion => "COMP",
            FormatId::Qualification => "QUAL",
        }
    }

    /// Long-form name, accepted as an alias of [`FormatId::code`].
    pub fn name(self) -> &'static str {
        match self {
            FormatId::Student => "student",
            FormatId::CourseEnrolment => "course-enrolment",
            FormatId::CourseRegister => "course-register",
            FormatId::Completion => "completion",
            FormatId::Qualification => "qualification",
        }
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for FormatId {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = value.trim();
        FormatId::ALL
            .into_iter()
            .find(|format| {
                token.eq_ignore_ascii_case(format.code()) || token.eq_ignore_ascii_case(format.name())
            })
            .ok_or_else(|| ModelError::UnknownFormat {
                token: token.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_names_case_insensitively() {
        assert_eq!("cour".parse::<FormatId>().unwrap(), FormatId::CourseEnrolment);
        assert_eq!(" COMP ".parse::<FormatId>().unwrap(), FormatId::Completion);
        assert_eq!(
            "Course-Register".parse::<FormatId>().unwrap(),
            FormatId::CourseRegister
        );
        assert!(matches!(
            "ENRL".parse::<FormatId>(),
            Err(ModelError::UnknownFormat { token }) if token == "ENRL"
        ));
    }

    #[test]
    fn priority_order_is_stable() {
        let codes: Vec<&str> = FormatId::ALL.iter().map(|f| f.code()).collect();
        assert_eq!(codes, vec!["STUD", "COUR", "CREG", "COMP", "QUAL"]);
    }
}
