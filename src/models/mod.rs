//! Data models for SMS archive conversion.
//!
//! - [`Message`] - the canonical in-memory representation of one SMS (or one
//!   logical multi-recipient send)
//! - [`FormatKind`] - the supported archive formats
//!
//! A message list is created fresh by a reader per conversion, sorted by the
//! orchestrator, and serialized read-only by a writer.

pub mod format;
pub mod message;

pub use format::FormatKind;
pub use message::{Message, normalize_text, recipient_count};
