//! Data model shared by the SDR conversion crates.

pub mod error;
pub mod format;
pub mod layout;
pub mod options;
pub mod processing;
pub mod record;

pub use error::{ModelError, Result};
pub use format::FormatId;
pub use layout::{FieldLayout, RecordLayout};
pub use options::{BoundsPolicy, DecodeOptions, LinePolicy, TrimMode};
pub use processing::ProcessingResult;
pub use record::Record;
