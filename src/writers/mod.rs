//! Format writers.
//!
//! Each writer serializes a message list into the exact byte layout its
//! consuming app expects. Writers never mutate the list; ordering is the
//! orchestrator's job. There is no CSV writer - that format is a read-only
//! legacy source.

pub mod android;
pub mod winphone;

use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::models::{FormatKind, Message};

pub use android::write_android;
pub use winphone::write_winphone;

/// Stamp configuration for generated files, passed explicitly into writers
/// instead of living in process-wide state.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Tool name written into the creation-stamp comment.
    pub app_name: String,
    /// Project link written alongside the stamp.
    pub app_link: String,
    /// Overrides the generated creation-stamp comment when set.
    pub comment: Option<String>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            app_name: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            app_link: "https://github.com/sms-tools/sms-convert".to_string(),
            comment: None,
        }
    }
}

/// Dispatch to the writer for `format`.
pub fn write(
    format: FormatKind,
    path: &Path,
    messages: &[Message],
    options: &WriteOptions,
) -> Result<()> {
    match format {
        FormatKind::WinPhone => write_winphone(path, messages, options),
        FormatKind::Android => write_android(path, messages, options),
        FormatKind::SuiteCsv => Err(ConvertError::Unsupported(FormatKind::SuiteCsv)),
    }
}

/// Map a serializer failure into the writer error taxonomy.
pub(crate) fn write_failed(e: impl std::fmt::Display) -> ConvertError {
    ConvertError::Io(std::io::Error::other(e.to_string()))
}

/// Validate the output path before creating anything.
pub(crate) fn check_output_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(ConvertError::InvalidArgument("empty output path".to_string()));
    }
    Ok(())
}
