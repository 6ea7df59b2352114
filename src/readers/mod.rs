//! Format readers.
//!
//! Each reader parses a file fully into an ordered message list. Malformed
//! individual entries are skipped with a warning (graceful partial recovery);
//! structural failures - unparsable document, wrong root element, no valid
//! records at all - abort the read with `InvalidData`.

pub mod android;
pub mod suite_csv;
pub mod winphone;

use std::fs;
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::models::{FormatKind, Message};

pub use android::read_android;
pub use suite_csv::read_suite_csv;
pub use winphone::read_winphone;

/// Dispatch to the reader for `format`.
pub fn read(format: FormatKind, path: &Path) -> Result<Vec<Message>> {
    match format {
        FormatKind::WinPhone => read_winphone(path),
        FormatKind::Android => read_android(path),
        FormatKind::SuiteCsv => read_suite_csv(path),
    }
}

/// Read a whole file as text, tolerating non-UTF-8 bytes and a leading BOM.
pub(crate) fn load_file(path: &Path) -> Result<String> {
    if path.as_os_str().is_empty() {
        return Err(ConvertError::InvalidArgument("empty input path".to_string()));
    }
    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(content.strip_prefix('\u{feff}').map_or_else(|| content.to_string(), str::to_string))
}
