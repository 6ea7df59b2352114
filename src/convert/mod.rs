//! Conversion orchestrator.
//!
//! Drives one whole conversion: detect the source format, read the file into
//! a message list, sort it the way the target app expects, and write it out.
//! Runs to completion or fails as one unit; each call owns its message list
//! and file handles, so concurrent conversions need no shared state.

use std::path::Path;

use crate::detect::detect;
use crate::error::{ConvertError, Result};
use crate::models::{FormatKind, recipient_count};
use crate::readers;
use crate::writers::{self, WriteOptions};

/// Convert `input` into `target` format at `output`.
///
/// Returns the recipient-expanded message count (an outgoing message with N
/// recipients counts N), the same figure the Android format's `count`
/// attribute carries, for consistent user display across targets.
pub fn convert(
    input: &Path,
    output: &Path,
    target: FormatKind,
    options: &WriteOptions,
) -> Result<usize> {
    if input.as_os_str().is_empty() {
        return Err(ConvertError::InvalidArgument("empty input path".to_string()));
    }
    if output.as_os_str().is_empty() {
        return Err(ConvertError::InvalidArgument("empty output path".to_string()));
    }

    let summary = detect(input)?;
    let source = summary.format.ok_or(ConvertError::UnknownFormat)?;

    let mut messages = readers::read(source, input)?;

    // Target apps expect opposite orderings; stable sort keeps the recipient
    // order of coalesced groups intact
    match target {
        FormatKind::Android => messages.sort_by_key(|m| m.timestamp),
        FormatKind::WinPhone | FormatKind::SuiteCsv => {
            messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }
    }

    writers::write(target, output, &messages, options)?;
    Ok(recipient_count(&messages))
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_unknown_input_format() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("notes.txt");
        std::fs::write(&input, "not a backup at all").unwrap();

        let result = convert(
            &input,
            &dir.path().join("out.xml"),
            FormatKind::Android,
            &WriteOptions::default(),
        );
        assert!(matches!(result, Err(ConvertError::UnknownFormat)));
    }

    #[test]
    fn test_empty_paths_rejected() {
        let result =
            convert(Path::new(""), Path::new("out.xml"), FormatKind::Android, &WriteOptions::default());
        assert!(matches!(result, Err(ConvertError::InvalidArgument(_))));

        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.xml");
        std::fs::write(&input, "<smses count=\"0\"/>").unwrap();
        let result =
            convert(&input, Path::new(""), FormatKind::WinPhone, &WriteOptions::default());
        assert!(matches!(result, Err(ConvertError::InvalidArgument(_))));
    }
}
