use std::fs;
use std::path::{Path, PathBuf};

use sdr_model::{FormatId, TrimMode};
use sdr_standards::{LayoutRegistry, StandardsError};

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn shipped_layouts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("layouts")
}

/// Minimal manifest with one single-field table per format.
fn write_minimal_layouts(dir: &Path, extra: &str) {
    let mut manifest = String::new();
    for format in FormatId::ALL {
        let file = format!("{}.csv", format.code().to_lowercase());
        manifest.push_str(&format!(
            "[[layout]]\nformat = \"{}\"\ndescription = \"{} test\"\nline_length = 10\nfields = \"{file}\"\n\n",
            format.code(),
            format.code()
        ));
        write(
            &dir.join(&file),
            "Name,Title,Start,Length,Required\nID,Identifier,1,10,Y\n",
        );
    }
    manifest.push_str(extra);
    write(&dir.join("manifest.toml"), &manifest);
}

#[test]
fn shipped_directory_matches_embedded_tables() {
    let embedded = LayoutRegistry::embedded().expect("embedded registry");
    let from_disk = LayoutRegistry::from_dir(&shipped_layouts_dir()).expect("registry from dir");
    for format in FormatId::ALL {
        assert_eq!(embedded.layout_for(format), from_disk.layout_for(format));
    }
}

#[test]
fn registry_summary_snapshot() {
    let registry = LayoutRegistry::embedded().expect("embedded registry");
    let mut lines = Vec::new();
    for layout in registry.layouts() {
        lines.push(format!(
            "{} {} {} {}",
            layout.format(),
            layout.line_length(),
            layout.fields().len(),
            layout.options().label()
        ));
    }
    for (name, layout) in registry.variants() {
        lines.push(format!(
            "{}:{} {} {} {}",
            layout.format(),
            name,
            layout.line_length(),
            layout.fields().len(),
            layout.options().label()
        ));
    }
    insta::assert_snapshot!(lines.join("\n"), @r"
    STUD 116 25 pad-or-truncate/lenient/both
    COUR 186 20 pad-or-truncate/lenient/both
    CREG 148 17 pad-or-truncate/lenient/both
    COMP 65 8 pad-or-truncate/lenient/both
    QUAL 50 9 pad-or-truncate/lenient/both
    COMP:legacy 52 4 exact/strict/both
    ");
}

#[test]
fn shipped_fields_fit_their_line_length() {
    let registry = LayoutRegistry::embedded().expect("embedded registry");
    let all = registry
        .layouts()
        .chain(registry.variants().map(|(_, layout)| layout));
    for layout in all {
        for field in layout.fields() {
            assert!(
                field.last_column() <= layout.line_length(),
                "{} {} ends at {} past {}",
                layout.format(),
                field.name,
                field.last_column(),
                layout.line_length()
            );
        }
    }
}

#[test]
fn loads_custom_directory_with_trim_option() {
    let dir = tempfile::tempdir().unwrap();
    write_minimal_layouts(
        dir.path(),
        "[[layout]]\nformat = \"QUAL\"\nvariant = \"padded\"\ndescription = \"padded\"\n\
         line_length = 10\nfields = \"qual.csv\"\noptions = { trim = \"trailing\" }\n",
    );
    let registry = LayoutRegistry::from_dir(dir.path()).expect("custom registry");
    assert_eq!(
        registry.layout_for(FormatId::Student).description(),
        "STUD test"
    );
    let padded = registry
        .variant(FormatId::Qualification, "padded")
        .expect("variant");
    assert_eq!(padded.options().trim, TrimMode::Trailing);
}

#[test]
fn missing_table_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_minimal_layouts(dir.path(), "");
    fs::remove_file(dir.path().join("creg.csv")).unwrap();
    let err = LayoutRegistry::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::MissingFieldsFile { path } if path.ends_with("creg.csv")));
}

#[test]
fn duplicate_canonical_layout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write_minimal_layouts(
        dir.path(),
        "[[layout]]\nformat = \"STUD\"\ndescription = \"again\"\nline_length = 10\nfields = \"stud.csv\"\n",
    );
    let err = LayoutRegistry::from_dir(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        StandardsError::DuplicateLayout {
            format: FormatId::Student,
            ..
        }
    ));
}

#[test]
fn invalid_field_is_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    write_minimal_layouts(dir.path(), "");
    write(
        &dir.path().join("qual.csv"),
        "Name,Title,Start,Length,Required\nID,Identifier,0,10,Y\n",
    );
    let err = LayoutRegistry::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::Model { ref path, .. } if path.ends_with("qual.csv")));
    assert!(err.to_string().contains("1-based"));
}

#[test]
fn overflowing_field_is_rejected_at_load() {
    let dir = tempfile::tempdir().unwrap();
    write_minimal_layouts(dir.path(), "");
    write(
        &dir.path().join("stud.csv"),
        &format!(
            "Name,Title,Start,Length,Required\nID,Identifier,1,10,Y\nBIG,Big,2,{},N\n",
            usize::MAX
        ),
    );
    let err = LayoutRegistry::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, StandardsError::Model { ref path, .. } if path.ends_with("stud.csv")));
    assert!(err.to_string().contains("BIG"));
}
