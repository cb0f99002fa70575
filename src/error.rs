//! Error types

use thiserror::Error;

/// Coarse classification of [`Error`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input or a missing required field
    InvalidArgument,
    /// A charset label that cannot be resolved
    UnsupportedCharset,
}

/// Errors raised while constructing or parsing a data URI
#[derive(Debug, Error)]
pub enum Error {
    #[error("`mime` must not be empty")]
    MissingMime,

    #[error("URI must start with a case-insensitive `data:`")]
    MissingScheme,

    #[error("URI must contain a `,`")]
    MissingComma,

    #[error("malformed percent-escape at byte offset {offset}")]
    MalformedEscape { offset: usize },

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("charset `{0}` not supported")]
    UnsupportedCharset(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedCharset(_) => ErrorKind::UnsupportedCharset,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
