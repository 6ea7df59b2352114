//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder for WinPhone "contacts+message backup" XML fixtures
pub struct WinPhoneFileBuilder {
    entries: Vec<String>,
    comments: Vec<String>,
}

impl WinPhoneFileBuilder {
    pub fn new() -> Self {
        Self { entries: Vec::new(), comments: Vec::new() }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comments.push(comment.to_string());
        self
    }

    pub fn with_incoming(mut self, sender: &str, body: &str, ticks: i64) -> Self {
        let mut entry = String::new();
        write!(
            entry,
            "<Message><Recepients/><Body>{body}</Body><IsIncoming>true</IsIncoming>\
             <IsRead>true</IsRead><Attachments/><LocalTimestamp>{ticks}</LocalTimestamp>\
             <Sender>{sender}</Sender></Message>"
        )
        .unwrap();
        self.entries.push(entry);
        self
    }

    pub fn with_outgoing(mut self, recipients: &[&str], body: &str, ticks: i64) -> Self {
        let strings: String =
            recipients.iter().map(|r| format!("<string>{r}</string>")).collect();
        let mut entry = String::new();
        write!(
            entry,
            "<Message><Recepients>{strings}</Recepients><Body>{body}</Body>\
             <IsIncoming>false</IsIncoming><IsRead>true</IsRead><Attachments/>\
             <LocalTimestamp>{ticks}</LocalTimestamp><Sender/></Message>"
        )
        .unwrap();
        self.entries.push(entry);
        self
    }

    pub fn build(&self) -> String {
        let mut content = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        for comment in &self.comments {
            writeln!(content, "<!--{comment}-->").unwrap();
        }
        content.push_str("<ArrayOfMessage>\n");
        for entry in &self.entries {
            writeln!(content, "  {entry}").unwrap();
        }
        content.push_str("</ArrayOfMessage>\n");
        content
    }
}

/// Builder for Android "SMS Backup & Restore" XML fixtures
pub struct AndroidFileBuilder {
    rows: Vec<String>,
}

impl AndroidFileBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn with_row(mut self, address: &str, epoch_ms: i64, sms_type: u8, body: &str) -> Self {
        self.rows.push(format!(
            r#"<sms protocol="0" address="{address}" date="{epoch_ms}" type="{sms_type}" subject="null" body="{body}" read="1" date_sent="0" readable_date="x"/>"#
        ));
        self
    }

    pub fn build(&self) -> String {
        let mut content = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        writeln!(
            content,
            r#"<smses count="{}" backup_set="cb081d84-aca6-4a12-ab0d-30cfdcf1891f" backup_date="1488996424918">"#,
            self.rows.len()
        )
        .unwrap();
        for row in &self.rows {
            writeln!(content, "  {row}").unwrap();
        }
        content.push_str("</smses>\n");
        content
    }
}

/// A scratch directory holding fixture files
pub struct FixtureDir {
    temp_dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> Self {
        Self { temp_dir: TempDir::new().expect("Failed to create temp dir") }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write fixture file");
        path
    }
}
