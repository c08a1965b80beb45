//! CSV output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::RowSource;
use crate::error::{OutputError, Result};

/// Write `source` as CSV to `path`, creating parent directories as needed.
pub fn write_csv(path: &Path, source: &impl RowSource) -> Result<()> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_csv_to(&mut writer, source)?;
    writer.flush().map_err(io_err)?;

    debug!(path = %path.display(), rows = source.len(), "wrote CSV");
    Ok(())
}

/// Write `source` as CSV to any writer.
///
/// Quoting is left entirely to the `csv` crate: cells are written as-is.
pub fn write_csv_to<W: Write>(writer: W, source: &impl RowSource) -> Result<()> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(source.header())?;
    for index in 0..source.len() {
        csv.write_record(source.row(index))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}
