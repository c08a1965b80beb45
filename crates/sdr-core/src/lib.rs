//! Conversion pipeline for SDR fixed-width files.
//!
//! [`Processor`] drives each file through layout selection
//! ([`Dispatcher`]), decoding, the optional completion join
//! ([`CompletionLookup`]) and CSV output ([`DecodedTable`]).

pub mod dispatch;
pub mod lookup;
pub mod processor;
pub mod redact;
pub mod table;

pub use dispatch::Dispatcher;
pub use lookup::{CompletionLookup, CompositeKey, LookupStats, UNAVAILABLE};
pub use processor::{ProcessError, ProcessOptions, Processor, output_file_name};
pub use table::{COMPLETION_HEADER, DecodedTable};
