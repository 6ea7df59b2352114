//! SMS Archive Converter - convert SMS backups between mobile archive formats
//!
//! This library converts message archives between three backup formats: the
//! "contacts+message backup" XML schema (Windows Phone), the "SMS Backup &
//! Restore" XML schema (Android), and a desktop phone-suite CSV export.
//! It supports:
//!
//! - Sniffing a file's format and summarizing it without a full parse
//! - Parsing each source format into a common in-memory message model
//! - Normalizing timestamps, read/incoming flags, and multi-recipient groups
//! - Serializing back out with the byte-level layout the consuming apps need
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use sms_convert::{FormatKind, WriteOptions, convert};
//!
//! let count = convert(
//!     Path::new("backup.msg"),
//!     Path::new("sms.xml"),
//!     FormatKind::Android,
//!     &WriteOptions::default(),
//! )?;
//! println!("Converted {count} messages");
//! # Ok::<(), sms_convert::ConvertError>(())
//! ```

pub mod cli;
pub mod convert;
pub mod detect;
pub mod error;
pub mod models;
pub mod readers;
pub mod utils;
pub mod writers;

// Re-export commonly used types
pub use convert::convert;
pub use detect::{FileSummary, detect};
pub use error::ConvertError;
pub use models::{FormatKind, Message};
pub use utils::time::Ticks;
pub use writers::WriteOptions;
