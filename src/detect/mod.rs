//! Format sniffing.
//!
//! Classifies a file into one of the supported formats and extracts a
//! lightweight summary (message count, embedded comments) without building
//! the full message list. Parse failures of one candidate format degrade to
//! trying the next; only "nothing matched" is reported, and only as an
//! unknown classification, never as an error.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{ConvertError, Result};
use crate::models::FormatKind;
use crate::readers::load_file;

/// What the detector learned about a file.
#[derive(Debug, Clone)]
pub struct FileSummary {
    /// `None` when no supported format matched.
    pub format: Option<FormatKind>,
    /// Immediate children of the root element (XML), or valid records (CSV).
    pub message_count: usize,
    /// Leading XML comment nodes, joined with newlines. Empty for CSV.
    pub comments: String,
}

/// Sniff a file's content and classify it.
///
/// Returns `Io` only when the file cannot be read at all; content that
/// matches no format yields a summary with `format: None`.
pub fn detect(path: &Path) -> Result<FileSummary> {
    if path.as_os_str().is_empty() {
        return Err(ConvertError::InvalidArgument("empty input path".to_string()));
    }
    let content = load_file(path)?;

    if let Some(summary) = sniff_xml(&content) {
        return Ok(summary);
    }
    if let Some(summary) = sniff_csv(&content) {
        return Ok(summary);
    }

    Ok(FileSummary { format: None, message_count: 0, comments: String::new() })
}

/// Try to classify XML content by its root element, collecting any comment
/// nodes that precede the root. Returns `None` on malformed XML or an
/// unrecognized root.
fn sniff_xml(content: &str) -> Option<FileSummary> {
    let mut reader = Reader::from_str(content);
    let config = reader.config_mut();
    config.trim_text_start = true;
    config.trim_text_end = true;

    let mut comments = String::new();
    let format;

    // Scan up to the root element; anything before it may be a comment
    loop {
        match reader.read_event() {
            Ok(Event::Comment(text)) => {
                if !comments.is_empty() {
                    comments.push('\n');
                }
                comments.push_str(&String::from_utf8_lossy(text.as_ref()));
            }
            Ok(Event::Start(start)) => {
                format = match start.name().as_ref() {
                    b"ArrayOfMessage" => FormatKind::WinPhone,
                    b"smses" => FormatKind::Android,
                    _ => return None,
                };
                break;
            }
            Ok(Event::Empty(start)) => {
                // An empty root has zero children but still classifies
                let format = match start.name().as_ref() {
                    b"ArrayOfMessage" => FormatKind::WinPhone,
                    b"smses" => FormatKind::Android,
                    _ => return None,
                };
                return Some(FileSummary { format: Some(format), message_count: 0, comments });
            }
            Ok(Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Text(_)) => {}
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    // Count the root's immediate child elements
    let mut count = 0usize;
    let mut depth = 0usize;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    count += 1;
                }
                depth += 1;
            }
            Ok(Event::Empty(_)) => {
                if depth == 0 {
                    count += 1;
                }
            }
            Ok(Event::End(_)) => {
                if depth == 0 {
                    break; // root closed
                }
                depth -= 1;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    Some(FileSummary { format: Some(format), message_count: count, comments })
}

/// Try to classify CSV content: at least one record with exactly 8 fields
/// whose first field is the literal token `sms`.
fn sniff_csv(content: &str) -> Option<FileSummary> {
    let mut reader =
        csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(content.as_bytes());

    let mut count = 0usize;
    for record in reader.records() {
        let Ok(record) = record else { continue };
        if record.len() == 8 && record.get(0) == Some("sms") {
            count += 1;
        }
    }

    if count > 0 {
        Some(FileSummary {
            format: Some(FormatKind::SuiteCsv),
            message_count: count,
            comments: String::new(),
        })
    } else {
        None
    }
}
