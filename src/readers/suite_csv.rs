//! Reader for the desktop phone-suite CSV export (read-only legacy source).
//!
//! One record per line, exactly 8 fields:
//!
//! ```text
//! sms,<status>,<from>,<to>,,<YYYY.MM.DD HH:MM>,,<body>
//! ```
//!
//! The status token carries substring flags: `READ` marks the message read,
//! `RECEIVED` marks it incoming (anything else is a sent message). The
//! timestamp is local wall-clock time in the exact literal pattern above;
//! any deviation drops the record. There is no writer for this format.

use std::path::Path;

use chrono::{Local, NaiveDateTime, TimeZone, Utc};

use crate::error::{ConvertError, Result};
use crate::models::{Message, normalize_text};
use crate::readers::load_file;
use crate::utils::time::Ticks;

pub fn read_suite_csv(path: &Path) -> Result<Vec<Message>> {
    let content = load_file(path)?;
    parse(&content)
}

fn parse(content: &str) -> Result<Vec<Message>> {
    let mut reader =
        csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(content.as_bytes());

    let mut messages = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else { continue };
        if record.len() != 8 || record.get(0) != Some("sms") {
            continue; // other export record types share the file
        }

        let status = record.get(1).unwrap_or_default();
        let is_read = status.contains("READ");
        let is_incoming = status.contains("RECEIVED");

        let number = if is_incoming { record.get(2) } else { record.get(3) }.unwrap_or_default();
        if number.is_empty() {
            eprintln!("Warning: Skipping sms record with no phone number");
            continue;
        }

        let raw_timestamp = record.get(5).unwrap_or_default();
        let Some(timestamp) = parse_local_timestamp(raw_timestamp) else {
            eprintln!("Warning: Skipping sms record with bad timestamp: {raw_timestamp:?}");
            continue;
        };

        messages.push(Message {
            timestamp,
            is_incoming,
            is_read,
            text: normalize_text(record.get(7).unwrap_or_default()),
            recipients: vec![number.to_string()],
        });
    }

    if messages.is_empty() {
        return Err(ConvertError::InvalidData("no phone-suite sms records found".to_string()));
    }
    Ok(messages)
}

/// Parse `YYYY.MM.DD HH:MM` with literal separators at fixed offsets,
/// interpreted as local wall-clock time. Returns `None` for any deviation,
/// including times that do not exist in the local timezone.
fn parse_local_timestamp(s: &str) -> Option<Ticks> {
    let bytes = s.as_bytes();
    if bytes.len() != 16 {
        return None;
    }
    for (i, &c) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 => c == b'.',
            10 => c == b' ',
            13 => c == b':',
            _ => c.is_ascii_digit(),
        };
        if !ok {
            return None;
        }
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y.%m.%d %H:%M").ok()?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(Ticks::from_epoch_ms(local.with_timezone(&Utc).timestamp_millis()))
}
