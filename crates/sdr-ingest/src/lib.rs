//! Fixed-width ingestion for SDR data files.
//!
//! Decoding is layout-driven: every function here takes a
//! [`RecordLayout`](sdr_model::RecordLayout) and knows nothing about
//! individual formats beyond filename detection.

pub mod decode;
pub mod detect;
pub mod discovery;
pub mod error;
pub mod file;
pub mod read;

pub use decode::{decode_line, prepare_line};
pub use detect::{detect_format, looks_like_course_enrolment};
pub use discovery::{find_companion_file, list_data_files};
pub use error::{DecodeError, IngestError, Result};
pub use file::{decode_content, normalize_line_endings};
pub use read::read_text;
