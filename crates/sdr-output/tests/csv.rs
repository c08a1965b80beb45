//! CSV writer tests.

use sdr_output::{OutputError, RowSource, write_csv, write_csv_to};

struct Rows {
    header: Vec<&'static str>,
    rows: Vec<Vec<&'static str>>,
}

impl RowSource for Rows {
    fn header(&self) -> Vec<&str> {
        self.header.clone()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, index: usize) -> Vec<&str> {
        self.rows[index].clone()
    }
}

fn render(source: &Rows) -> String {
    let mut buf = Vec::new();
    write_csv_to(&mut buf, source).expect("write csv");
    String::from_utf8(buf).expect("utf8")
}

#[test]
fn cells_needing_quotes_are_quoted_once() {
    let source = Rows {
        header: vec!["Course Code", "Title"],
        rows: vec![
            vec!["2102-530", "Maths, Stats"],
            vec!["2102-531", "The \"Basics\""],
            vec!["2102-532", "plain"],
        ],
    };
    insta::assert_snapshot!(render(&source), @r#"
    Course Code,Title
    2102-530,"Maths, Stats"
    2102-531,"The ""Basics"""
    2102-532,plain
    "#);
}

#[test]
fn empty_source_writes_header_only() {
    let source = Rows {
        header: vec!["Provider Code", "", "", "Indicator"],
        rows: Vec::new(),
    };
    assert!(source.is_empty());
    assert_eq!(render(&source), "Provider Code,,,Indicator\n");
}

#[test]
fn write_csv_creates_parent_directories() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("out").join("nested").join("STUD_parsed.csv");
    let source = Rows {
        header: vec!["A"],
        rows: vec![vec!["1"]],
    };
    write_csv(&path, &source).expect("write");
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "A\n1\n");
}

#[test]
fn unwritable_path_is_an_io_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let blocker = temp.path().join("file");
    std::fs::write(&blocker, "x").expect("write blocker");
    let source = Rows {
        header: vec!["A"],
        rows: Vec::new(),
    };
    let err = write_csv(&blocker.join("out.csv"), &source).unwrap_err();
    assert!(matches!(err, OutputError::Io { .. }));
}
