//! Writer for the "contacts+message backup" (Windows Phone) XML format.
//!
//! Emits the declaration, two comment nodes (creation stamp, project link),
//! then one `Message` element per message. The `Recepients` list is filled
//! only for outgoing messages; `Sender` only for incoming ones. Timestamps
//! go out as raw decimal ticks.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::Result;
use crate::models::Message;
use crate::writers::{WriteOptions, check_output_path, write_failed};

pub fn write_winphone(path: &Path, messages: &[Message], options: &WriteOptions) -> Result<()> {
    check_output_path(path)?;
    let file = File::create(path)?;
    let mut writer = Writer::new_with_indent(BufWriter::new(file), b'\t', 1);
    emit(&mut writer, messages, options).map_err(write_failed)?;
    writer.into_inner().flush()?;
    Ok(())
}

fn emit<W: Write>(
    writer: &mut Writer<W>,
    messages: &[Message],
    options: &WriteOptions,
) -> std::result::Result<(), quick_xml::Error> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let stamp = match &options.comment {
        Some(comment) => comment.clone(),
        None => format!(
            " File created by {} on {} ",
            options.app_name,
            Local::now().format("%Y/%m/%d %H:%M:%S")
        ),
    };
    writer.write_event(Event::Comment(BytesText::from_escaped(stamp.as_str())))?;
    let link = format!(" {} ", options.app_link);
    writer.write_event(Event::Comment(BytesText::from_escaped(link.as_str())))?;

    writer.write_event(Event::Start(BytesStart::new("ArrayOfMessage")))?;

    for message in messages {
        writer.write_event(Event::Start(BytesStart::new("Message")))?;

        if message.is_incoming || message.recipients.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("Recepients")))?;
        } else {
            writer.write_event(Event::Start(BytesStart::new("Recepients")))?;
            for number in &message.recipients {
                text_element(writer, "string", number)?;
            }
            writer.write_event(Event::End(BytesEnd::new("Recepients")))?;
        }

        text_element(writer, "Body", &message.text)?;
        text_element(writer, "IsIncoming", if message.is_incoming { "true" } else { "false" })?;
        text_element(writer, "IsRead", if message.is_read { "true" } else { "false" })?;
        writer.write_event(Event::Empty(BytesStart::new("Attachments")))?;
        text_element(writer, "LocalTimestamp", &message.timestamp.0.to_string())?;

        let sender = if message.is_incoming {
            message.recipients.first().map(String::as_str).unwrap_or("")
        } else {
            ""
        };
        text_element(writer, "Sender", sender)?;

        writer.write_event(Event::End(BytesEnd::new("Message")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("ArrayOfMessage")))?;
    Ok(())
}

/// Emit `<name>value</name>`, or a self-closed element for an empty value.
fn text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> std::result::Result<(), quick_xml::Error> {
    if value.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
    }
    Ok(())
}
