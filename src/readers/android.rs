//! Reader for the "SMS Backup & Restore" (Android) XML format.
//!
//! ```xml
//! <smses count="2" backup_set="..." backup_date="1488996424918">
//!   <sms protocol="0" address="+40000000000" date="1488572656975" type="1"
//!        subject="null" body="Message Text" read="1" date_sent="0"
//!        readable_date="Mar 3, 2017 22:24:16"/>
//! </smses>
//! ```
//!
//! An outgoing group send appears as one `sms` row per recipient, all sharing
//! the same `date` and `body`. Adjacent rows like that are coalesced back
//! into a single multi-recipient message; the check only looks at the
//! currently open group, never searches the whole list.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ConvertError, Result};
use crate::models::{Message, normalize_text};
use crate::readers::load_file;
use crate::utils::time::Ticks;

pub fn read_android(path: &Path) -> Result<Vec<Message>> {
    let content = load_file(path)?;
    parse(&content)
}

fn invalid(e: impl std::fmt::Display) -> ConvertError {
    ConvertError::InvalidData(e.to_string())
}

fn parse(content: &str) -> Result<Vec<Message>> {
    let mut reader = Reader::from_str(content);
    let config = reader.config_mut();
    config.trim_text_start = true;
    config.trim_text_end = true;

    // Locate the root element
    loop {
        match reader.read_event().map_err(invalid)? {
            Event::Start(start) if start.name().as_ref() == b"smses" => break,
            Event::Empty(start) if start.name().as_ref() == b"smses" => return Ok(Vec::new()),
            Event::Start(_) | Event::Empty(_) => {
                return Err(invalid("expected smses root element"));
            }
            Event::Eof => return Err(invalid("missing smses root element")),
            _ => {}
        }
    }

    // Fold rows into messages, keeping at most one open outgoing group that
    // subsequent matching rows append their recipient to.
    let mut messages: Vec<Message> = Vec::new();
    let mut open: Option<Message> = None;

    loop {
        let event = reader.read_event().map_err(invalid)?;
        match event {
            Event::Start(ref start) | Event::Empty(ref start)
                if start.name().as_ref() == b"sms" =>
            {
                if matches!(event, Event::Start(_)) {
                    // Row with children; attributes are all we need
                    reader.read_to_end(start.to_end().name()).map_err(invalid)?;
                }
                let Some(row) = parse_row(start) else { continue };
                match open.take() {
                    Some(mut group) if coalesces(&group, &row) => {
                        group.recipients.extend(row.recipients);
                        open = Some(group);
                    }
                    previous => {
                        messages.extend(previous);
                        open = Some(row);
                    }
                }
            }
            Event::Start(start) => {
                reader.read_to_end(start.to_end().name()).map_err(invalid)?;
            }
            Event::End(_) | Event::Eof => break,
            _ => {}
        }
    }

    messages.extend(open);
    Ok(messages)
}

/// Whether `row` is another recipient of the open outgoing group.
fn coalesces(group: &Message, row: &Message) -> bool {
    !group.is_incoming
        && !row.is_incoming
        && group.timestamp == row.timestamp
        && group.text == row.text
}

/// Build a single-recipient message from one `sms` row's attributes.
/// Rows missing any required attribute are skipped.
fn parse_row(start: &BytesStart<'_>) -> Option<Message> {
    let mut address = None;
    let mut date = None;
    let mut body = None;
    let mut sms_type = None;
    let mut read = None;

    for attr in start.attributes() {
        let Ok(attr) = attr else { continue };
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => continue,
        };
        match attr.key.as_ref() {
            b"address" => address = Some(value),
            b"date" => date = Some(value),
            b"body" => body = Some(value),
            b"type" => sms_type = Some(value),
            b"read" => read = Some(value),
            _ => {}
        }
    }

    let (Some(address), Some(date), Some(body), Some(sms_type), Some(read)) =
        (address, date, body, sms_type, read)
    else {
        eprintln!("Warning: Skipping sms row with missing attributes");
        return None;
    };

    let Ok(epoch_ms) = date.trim().parse::<i64>() else {
        eprintln!("Warning: Skipping sms row with unparsable date: {date}");
        return None;
    };

    Some(Message {
        timestamp: Ticks::from_epoch_ms(epoch_ms),
        is_incoming: sms_type == "1", // 1 = incoming, 2 = outgoing
        is_read: read != "0",         // 0 = unread
        text: normalize_text(&body),
        recipients: vec![address],
    })
}
