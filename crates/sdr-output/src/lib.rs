//! Output generation for converted SDR files.

pub mod csv_writer;
pub mod error;

pub use csv_writer::{write_csv, write_csv_to};
pub use error::{OutputError, Result};

/// A header plus rows of string cells, ready to be written out.
///
/// Writers only ever see this view, so they never branch on record format.
pub trait RowSource {
    /// Column titles, in output order.
    fn header(&self) -> Vec<&str>;

    /// Number of data rows.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells of row `index`, one per header column.
    fn row(&self, index: usize) -> Vec<&str>;
}
