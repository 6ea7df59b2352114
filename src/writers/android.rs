//! Writer for the "SMS Backup & Restore" (Android) XML format.
//!
//! The consuming app expects a precise node layout, otherwise the imported
//! backup is listed with a timestamp somewhere in the 70s:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8" standalone="yes"?>
//! <!--File created by XXX on YYY-->
//! <?xml-stylesheet type="text/xsl" href="sms.xsl"?>
//! <smses count="..." backup_set="GUID" backup_date="...">
//! ```
//!
//! Rules: exactly those four nodes in that order, a single comment node, and
//! no leading whitespace padding inside the comment.
//!
//! Each message is exploded into one `sms` row per recipient - the exact
//! inverse of the reader's coalescing - so `count` is the recipient-expanded
//! total, not the message count.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Message, recipient_count};
use crate::utils::time::Ticks;
use crate::writers::{WriteOptions, check_output_path, write_failed};

pub fn write_android(path: &Path, messages: &[Message], options: &WriteOptions) -> Result<()> {
    check_output_path(path)?;
    let file = File::create(path)?;
    let mut writer = Writer::new_with_indent(BufWriter::new(file), b' ', 2);
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
            "File created by {} on {}, {}",
            options.app_name,
            Local::now().format("%Y/%m/%d %H:%M:%S"),
            options.app_link
        ),
    };
    writer.write_event(Event::Comment(BytesText::from_escaped(stamp.as_str())))?;
    writer.write_event(Event::PI(BytesPI::new(r#"xml-stylesheet type="text/xsl" href="sms.xsl""#)))?;

    let count = recipient_count(messages).to_string();
    let backup_set = Uuid::new_v4().to_string();
    let backup_date = Ticks::now().to_epoch_ms().to_string();

    let mut root = BytesStart::new("smses");
    root.push_attribute(("count", count.as_str()));
    root.push_attribute(("backup_set", backup_set.as_str()));
    root.push_attribute(("backup_date", backup_date.as_str()));
    writer.write_event(Event::Start(root))?;

    for message in messages {
        let date = message.timestamp.to_epoch_ms().to_string();
        let readable_date = message
            .timestamp
            .to_utc()
            .map(|dt| dt.format("%Y/%m/%d %H:%M:%S").to_string())
            .unwrap_or_default();

        // One row per recipient, cloning the shared fields
        for number in &message.recipients {
            let mut row = BytesStart::new("sms");
            row.push_attribute(("protocol", "0"));
            row.push_attribute(("address", number.as_str()));
            row.push_attribute(("date", date.as_str()));
            row.push_attribute(("type", if message.is_incoming { "1" } else { "2" }));
            row.push_attribute(("subject", "null"));
            row.push_attribute(("body", message.text.as_str()));
            row.push_attribute(("read", if message.is_read { "1" } else { "0" }));
            row.push_attribute(("date_sent", ""));
            row.push_attribute(("readable_date", readable_date.as_str()));
            writer.write_event(Event::Empty(row))?;
        }
    }

    writer.write_event(Event::End(BytesEnd::new("smses")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::readers::android::read_android;

    fn sample_messages() -> Vec<Message> {
        vec![
            Message {
                timestamp: Ticks::from_epoch_ms(1_488_572_656_975),
                is_incoming: true,
                is_read: true,
                text: "incoming text".to_string(),
                recipients: vec!["+40700000001".to_string()],
            },
            Message {
                timestamp: Ticks::from_epoch_ms(1_488_572_942_710),
                is_incoming: false,
                is_read: false,
                text: "group text".to_string(),
                recipients: vec!["+40700000002".to_string(), "+40700000003".to_string()],
            },
        ]
    }

    #[test]
    fn test_node_order_and_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sms.xml");
        write_android(&path, &sample_messages(), &WriteOptions::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let decl = content.find(r#"<?xml version="1.0""#).unwrap();
        let comment = content.find("<!--").unwrap();
        let stylesheet = content.find(r#"<?xml-stylesheet type="text/xsl" href="sms.xsl"?>"#).unwrap();
        let root = content.find("<smses ").unwrap();
        assert!(decl < comment && comment < stylesheet && stylesheet < root);

        // Exactly one comment, with no whitespace padding
        assert_eq!(content.matches("<!--").count(), 1);
        assert!(content.contains("<!--File created by "));

        assert!(content.contains(r#"count="3""#));
        assert!(content.contains(r#"backup_set=""#));
    }

    #[test]
    fn test_explodes_one_row_per_recipient() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sms.xml");
        write_android(&path, &sample_messages(), &WriteOptions::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("<sms ").count(), 3);
        assert!(content.contains(r#"address="+40700000002" date="1488572942710" type="2""#));
        assert!(content.contains(r#"address="+40700000003" date="1488572942710" type="2""#));
        assert!(content.contains(r#"read="0""#));
        assert!(content.contains(r#"readable_date="2017/03/03 20:29:02""#));
    }

    #[test]
    fn test_coalesce_explode_inverse() {
        // Writing the coalesced form and reading it back must reproduce the
        // same messages, with the group in its original recipient order
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sms.xml");
        let messages = sample_messages();

        write_android(&path, &messages, &WriteOptions::default()).unwrap();
        let back = read_android(&path).unwrap();
        assert_eq!(back, messages);
    }

    #[test]
    fn test_unsupported_csv_target() {
        use crate::models::FormatKind;
        use crate::writers::write;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let result = write(FormatKind::SuiteCsv, &path, &[], &WriteOptions::default());
        assert!(matches!(result, Err(crate::error::ConvertError::Unsupported(_))));
    }
}
