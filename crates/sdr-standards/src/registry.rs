#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use sdr_model::{FormatId, RecordLayout};
use tracing::debug;

use crate::csv::fields::parse_fields_csv;
use crate::error::StandardsError;
use crate::manifest::{MANIFEST_FILE, Manifest, ManifestLayout, parse_manifest};

const EMBEDDED_ROOT: &str = "<embedded>";

const EMBEDDED_FILES: &[(&str, &str)] = &[
    (MANIFEST_FILE, include_str!("../layouts/manifest.toml")),
    ("stud.csv", include_str!("../layouts/stud.csv")),
    ("cour.csv", include_str!("../layouts/cour.csv")),
    ("creg.csv", include_str!("../layouts/creg.csv")),
    ("comp.csv", include_str!("../layouts/comp.csv")),
    ("comp_legacy.csv", include_str!("../layouts/comp_legacy.csv")),
    ("qual.csv", include_str!("../layouts/qual.csv")),
];

/// Immutable set of record layouts, one canonical layout per format plus
/// any named variants.
///
/// Built once at startup and passed by reference to whatever needs it.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    /// Canonical layouts indexed by `FormatId as usize`.
    layouts: Vec<RecordLayout>,
    variants: BTreeMap<(FormatId, String), RecordLayout>,
}

impl LayoutRegistry {
    /// Registry built from the layout tables compiled into the crate.
    pub fn embedded() -> Result<Self, StandardsError> {
        Self::load(Path::new(EMBEDDED_ROOT), |name| {
            EMBEDDED_FILES
                .iter()
                .find(|(file, _)| *file == name)
                .map(|(_, contents)| (*contents).to_string())
                .ok_or_else(|| StandardsError::MissingFieldsFile {
                    path: Path::new(EMBEDDED_ROOT).join(name),
                })
        })
    }

    /// Registry built from a directory holding `manifest.toml` and the field
    /// tables it lists.
    pub fn from_dir(dir: &Path) -> Result<Self, StandardsError> {
        Self::load(dir, |name| {
            let path = dir.join(name);
            if !path.is_file() {
                return Err(StandardsError::MissingFieldsFile { path });
            }
            std::fs::read_to_string(&path).map_err(|e| StandardsError::io(path, e))
        })
    }

    /// Registry from already-built layouts. Layouts are canonical; every
    /// format must appear exactly once.
    pub fn from_layouts(
        layouts: impl IntoIterator<Item = RecordLayout>,
    ) -> Result<Self, StandardsError> {
        let mut canonical: BTreeMap<FormatId, RecordLayout> = BTreeMap::new();
        for layout in layouts {
            let format = layout.format();
            if canonical.insert(format, layout).is_some() {
                return Err(StandardsError::DuplicateLayout {
                    format,
                    variant: "canonical".to_string(),
                });
            }
        }
        Self::assemble(canonical, BTreeMap::new())
    }

    fn load<F>(root: &Path, read: F) -> Result<Self, StandardsError>
    where
        F: Fn(&str) -> Result<String, StandardsError>,
    {
        let manifest_path = root.join(MANIFEST_FILE);
        let manifest: Manifest = parse_manifest(&read(MANIFEST_FILE)?, &manifest_path)?;

        let mut canonical = BTreeMap::new();
        let mut variants = BTreeMap::new();
        for entry in &manifest.layouts {
            let layout = build_layout(root, entry, &read)?;
            match &entry.variant {
                None => {
                    if canonical.insert(entry.format, layout).is_some() {
                        return Err(StandardsError::DuplicateLayout {
                            format: entry.format,
                            variant: "canonical".to_string(),
                        });
                    }
                }
                Some(name) => {
                    let key = (entry.format, name.to_ascii_lowercase());
                    if variants.insert(key, layout).is_some() {
                        return Err(StandardsError::DuplicateLayout {
                            format: entry.format,
                            variant: name.clone(),
                        });
                    }
                }
            }
        }
        let registry = Self::assemble(canonical, variants)?;
        debug!(
            root = %root.display(),
            layouts = registry.layouts.len(),
            variants = registry.variants.len(),
            "layout registry loaded"
        );
        Ok(registry)
    }

    fn assemble(
        mut canonical: BTreeMap<FormatId, RecordLayout>,
        variants: BTreeMap<(FormatId, String), RecordLayout>,
    ) -> Result<Self, StandardsError> {
        let mut layouts = Vec::with_capacity(FormatId::ALL.len());
        for format in FormatId::ALL {
            let layout = canonical
                .remove(&format)
                .ok_or(StandardsError::MissingFormat { format })?;
            layouts.push(layout);
        }
        Ok(Self { layouts, variants })
    }

    /// Canonical layout for a format.
    pub fn layout_for(&self, format: FormatId) -> &RecordLayout {
        &self.layouts[format as usize]
    }

    /// Canonical layout for a format token such as `COUR` or `course-enrolment`.
    pub fn layout_for_token(&self, token: &str) -> Result<&RecordLayout, StandardsError> {
        let format: FormatId = token.parse().map_err(|_| StandardsError::UnknownFormat {
            token: token.trim().to_string(),
        })?;
        Ok(self.layout_for(format))
    }

    /// Named variant of a format's layout (case-insensitive name).
    pub fn variant(&self, format: FormatId, name: &str) -> Option<&RecordLayout> {
        self.variants.get(&(format, name.to_ascii_lowercase()))
    }

    /// Supported formats in detection priority order.
    pub fn formats(&self) -> impl Iterator<Item = FormatId> + '_ {
        self.layouts.iter().map(RecordLayout::format)
    }

    /// Canonical layouts in detection priority order.
    pub fn layouts(&self) -> impl Iterator<Item = &RecordLayout> {
        self.layouts.iter()
    }

    pub fn variants(&self) -> impl Iterator<Item = (&str, &RecordLayout)> {
        self.variants
            .iter()
            .map(|((_, name), layout)| (name.as_str(), layout))
    }
}

fn build_layout<F>(
    root: &Path,
    entry: &ManifestLayout,
    read: &F,
) -> Result<RecordLayout, StandardsError>
where
    F: Fn(&str) -> Result<String, StandardsError>,
{
    let path: PathBuf = root.join(&entry.fields);
    let contents = read(&entry.fields)?;
    let fields = parse_fields_csv(&contents, &path)?;
    let layout = RecordLayout::new(
        entry.format,
        entry.description.clone(),
        entry.line_length,
        fields,
    )
    .map_err(|source| StandardsError::Model {
        path: path.clone(),
        source,
    })?;
    Ok(layout.with_options(entry.options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdr_model::{FieldLayout, LinePolicy};

    #[test]
    fn embedded_registry_has_every_format() {
        let registry = LayoutRegistry::embedded().unwrap();
        let formats: Vec<FormatId> = registry.formats().collect();
        assert_eq!(formats, FormatId::ALL.to_vec());
    }

    #[test]
    fn canonical_completion_is_65_columns() {
        let registry = LayoutRegistry::embedded().unwrap();
        let comp = registry.layout_for(FormatId::Completion);
        assert_eq!(comp.line_length(), 65);
        assert_eq!(comp.fields().len(), 8);
        assert!(comp.has_field("COMPLETE"));
        assert_eq!(comp.options().line_policy, LinePolicy::PadOrTruncate);
    }

    #[test]
    fn legacy_completion_is_strict() {
        let registry = LayoutRegistry::embedded().unwrap();
        let legacy = registry.variant(FormatId::Completion, "LEGACY").unwrap();
        assert_eq!(legacy.line_length(), 52);
        assert_eq!(legacy.fields().len(), 4);
        assert_eq!(legacy.options().line_policy, LinePolicy::Exact);
        assert!(registry.variant(FormatId::Student, "legacy").is_none());
    }

    #[test]
    fn unknown_token_is_an_error() {
        let registry = LayoutRegistry::embedded().unwrap();
        assert!(registry.layout_for_token("cour").is_ok());
        let err = registry.layout_for_token("ENRL").unwrap_err();
        assert!(matches!(err, StandardsError::UnknownFormat { token } if token == "ENRL"));
    }

    #[test]
    fn from_layouts_requires_every_format() {
        let only_student = RecordLayout::new(
            FormatId::Student,
            "Student File",
            5,
            vec![FieldLayout::required("ID", "Id", 1, 5)],
        )
        .unwrap();
        let err = LayoutRegistry::from_layouts([only_student]).unwrap_err();
        assert!(matches!(
            err,
            StandardsError::MissingFormat {
                format: FormatId::CourseEnrolment
            }
        ));
    }
}
