//! Reader for the "contacts+message backup" (Windows Phone) XML format.
//!
//! ```xml
//! <ArrayOfMessage>
//!   <Message>
//!     <Recepients/>
//!     <Body>Message Text</Body>
//!     <IsIncoming>true</IsIncoming>
//!     <IsRead>true</IsRead>
//!     <Attachments/>
//!     <LocalTimestamp>131329631293736951</LocalTimestamp>
//!     <Sender>+00000000000</Sender>
//!   </Message>
//! </ArrayOfMessage>
//! ```
//!
//! Element names below the root are matched ASCII-case-insensitively; backups
//! in the wild vary in casing. `LocalTimestamp` is already in 100ns ticks, so
//! no epoch conversion happens here. Overlapping backups duplicate entries,
//! so exact duplicates are dropped after ingestion.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ConvertError, Result};
use crate::models::{Message, normalize_text};
use crate::readers::load_file;
use crate::utils::time::Ticks;

pub fn read_winphone(path: &Path) -> Result<Vec<Message>> {
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
            Event::Start(start) if start.name().as_ref() == b"ArrayOfMessage" => break,
            Event::Start(_) | Event::Empty(_) => {
                return Err(invalid("expected ArrayOfMessage root element"));
            }
            Event::Eof => return Err(invalid("missing ArrayOfMessage root element")),
            _ => {}
        }
    }

    let mut messages = Vec::new();
    loop {
        match reader.read_event().map_err(invalid)? {
            Event::Start(start) if name_is(&start, b"message") => {
                if let Some(message) = parse_message(&mut reader)? {
                    messages.push(message);
                }
            }
            Event::Start(start) => {
                // Unrelated child; skip its whole subtree
                reader.read_to_end(start.to_end().name()).map_err(invalid)?;
            }
            Event::End(_) | Event::Eof => break,
            _ => {}
        }
    }

    // Overlapping backups produce exact duplicates
    messages.dedup();
    Ok(messages)
}

fn name_is(start: &BytesStart<'_>, lower: &[u8]) -> bool {
    start.name().as_ref().eq_ignore_ascii_case(lower)
}

/// Parse one `Message` element. Returns `None` for malformed entries
/// (missing direction or body, or no usable recipient), which are skipped
/// rather than failing the whole file.
fn parse_message(reader: &mut Reader<&[u8]>) -> Result<Option<Message>> {
    let mut body: Option<String> = None;
    let mut is_incoming: Option<bool> = None;
    let mut is_read: Option<bool> = None;
    let mut timestamp: Option<Ticks> = None;
    let mut sender: Option<String> = None;
    let mut recipients: Option<Vec<String>> = None;

    loop {
        match reader.read_event().map_err(invalid)? {
            Event::Start(start) => {
                if name_is(&start, b"body") {
                    body = Some(element_text(reader)?);
                } else if name_is(&start, b"isincoming") {
                    is_incoming = Some(element_text(reader)? == "true");
                } else if name_is(&start, b"isread") {
                    is_read = Some(element_text(reader)? == "true");
                } else if name_is(&start, b"localtimestamp") {
                    timestamp = element_text(reader)?.trim().parse().ok().map(Ticks);
                } else if name_is(&start, b"sender") {
                    sender = Some(element_text(reader)?);
                } else if name_is(&start, b"recepients") {
                    recipients = Some(parse_recipients(reader)?);
                } else {
                    reader.read_to_end(start.to_end().name()).map_err(invalid)?;
                }
            }
            Event::Empty(start) => {
                // Self-closed field: present with an empty value
                if name_is(&start, b"body") {
                    body = Some(String::new());
                } else if name_is(&start, b"isincoming") {
                    is_incoming = Some(false);
                } else if name_is(&start, b"sender") {
                    sender = Some(String::new());
                } else if name_is(&start, b"recepients") {
                    recipients = Some(Vec::new());
                }
            }
            Event::End(_) => break,
            Event::Eof => return Err(invalid("truncated Message element")),
            _ => {}
        }
    }

    let (Some(is_incoming), Some(body)) = (is_incoming, body) else {
        eprintln!("Warning: Skipping Message entry with missing direction or body");
        return Ok(None);
    };

    let recipients = if is_incoming {
        sender.map(|s| vec![s])
    } else {
        recipients.filter(|r| !r.is_empty())
    };
    let Some(recipients) = recipients else {
        eprintln!("Warning: Skipping Message entry with no usable recipient");
        return Ok(None);
    };

    Ok(Some(Message {
        timestamp: timestamp.unwrap_or_default(),
        is_incoming,
        is_read: is_read.unwrap_or(true),
        text: normalize_text(&body),
        recipients,
    }))
}

/// Collect the `string` children of a `Recepients` container.
fn parse_recipients(reader: &mut Reader<&[u8]>) -> Result<Vec<String>> {
    let mut numbers = Vec::new();
    loop {
        match reader.read_event().map_err(invalid)? {
            Event::Start(start) if name_is(&start, b"string") => {
                numbers.push(element_text(reader)?);
            }
            Event::Start(start) => {
                reader.read_to_end(start.to_end().name()).map_err(invalid)?;
            }
            Event::Empty(start) if name_is(&start, b"string") => {
                numbers.push(String::new());
            }
            Event::End(_) => break,
            Event::Eof => return Err(invalid("truncated Recepients element")),
            _ => {}
        }
    }
    Ok(numbers)
}

/// Text content of the element whose start tag was just consumed.
fn element_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event().map_err(invalid)? {
            Event::Text(t) => text.push_str(&t.unescape().map_err(invalid)?),
            Event::CData(t) => text.push_str(&String::from_utf8_lossy(t.as_ref())),
            Event::Start(_) => depth += 1,
            Event::Empty(_) => {}
            Event::End(_) => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            Event::Eof => return Err(invalid("truncated element")),
            _ => {}
        }
    }
    Ok(text)
}
