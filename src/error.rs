use thiserror::Error;

use crate::models::FormatKind;

/// Error taxonomy for the conversion core.
///
/// Malformed individual records inside an otherwise well-formed file are
/// skipped by the readers and never surface here; these variants cover
/// whole-operation failures only.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Empty or otherwise unusable path argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The file does not parse as the expected format (bad markup, wrong
    /// root element, or no valid records at all).
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The detector matched none of the supported formats.
    #[error("unrecognized input format")]
    UnknownFormat,

    /// File open/read/write failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// No writer exists for the requested target format.
    #[error("writing {0} files is not supported")]
    Unsupported(FormatKind),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
