use std::path::Path;

use tracing::warn;

use crate::error::{IngestError, Result};

/// Read a data file into memory.
///
/// Invalid UTF-8 (typically Latin-1 text from older extracts) is replaced
/// with one U+FFFD per invalid byte rather than rejected, so each bad byte
/// still occupies one column.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => {
            let (text, replaced) = replace_invalid_bytes(&err.into_bytes());
            warn!(
                path = %path.display(),
                replaced,
                "file is not valid UTF-8; invalid bytes replaced"
            );
            Ok(text)
        }
    }
}

/// Lossy decode that keeps one character per invalid byte.
fn replace_invalid_bytes(bytes: &[u8]) -> (String, usize) {
    let mut text = String::with_capacity(bytes.len());
    let mut replaced = 0;
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        let invalid = chunk.invalid().len();
        text.extend(std::iter::repeat_n(char::REPLACEMENT_CHARACTER, invalid));
        replaced += invalid;
    }
    (text, replaced)
}
