//! Per-layout decoding policies.

use serde::{Deserialize, Serialize};

/// How a line whose length differs from the layout's line length is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinePolicy {
    /// Right-pad short lines with spaces and cut long lines to length.
    #[default]
    PadOrTruncate,
    /// Reject any line that is not exactly the expected length.
    Exact,
}

/// What to do when a field's column range falls outside the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundsPolicy {
    /// Fail the line with a field-out-of-bounds error.
    Strict,
    /// Substitute an empty value.
    #[default]
    Lenient,
}

/// Which side of an extracted value is trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrimMode {
    #[default]
    Both,
    /// Keep leading spaces; for layouts where they carry meaning.
    Trailing,
}

impl TrimMode {
    pub fn apply(self, value: &str) -> &str {
        match self {
            TrimMode::Both => value.trim(),
            TrimMode::Trailing => value.trim_end(),
        }
    }
}

/// Decoding options attached to a [`crate::RecordLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodeOptions {
    #[serde(default)]
    pub line_policy: LinePolicy,
    #[serde(default)]
    pub bounds: BoundsPolicy,
    #[serde(default)]
    pub trim: TrimMode,
}

impl DecodeOptions {
    /// Pad/truncate with lenient bounds, trimming both sides.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Exact line length with strict bounds.
    pub fn strict() -> Self {
        Self {
            line_policy: LinePolicy::Exact,
            bounds: BoundsPolicy::Strict,
            trim: TrimMode::Both,
        }
    }

    #[must_use]
    pub fn with_trim(mut self, trim: TrimMode) -> Self {
        self.trim = trim;
        self
    }

    /// Short label used in listings, e.g. `pad-or-truncate/lenient/both`.
    pub fn label(&self) -> String {
        let line = match self.line_policy {
            LinePolicy::PadOrTruncate => "pad-or-truncate",
            LinePolicy::Exact => "exact",
        };
        let bounds = match self.bounds {
            BoundsPolicy::Strict => "strict",
            BoundsPolicy::Lenient => "lenient",
        };
        let trim = match self.trim {
            TrimMode::Both => "both",
            TrimMode::Trailing => "trailing",
        };
        format!("{line}/{bounds}/{trim}")
    }
}
