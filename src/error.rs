//! Error types for pcmflow

use thiserror::Error;

/// Result type alias for pcmflow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pcmflow
///
/// Malformed containers never show up here: the chunk walker recovers from
/// them locally and only reports them through the `is_valid`/`is_streamed`
/// flags of the parsed [`AudioFormatInfo`](crate::format::wav::AudioFormatInfo).
#[derive(Error, Debug)]
pub enum Error {
    /// IO error raised by a byte sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Framing that could not be produced or consumed
    #[error("Format error: {0}")]
    Format(String),

    /// Codec tag or negotiated format not supported
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Caller broke an API precondition (write before begin, no sink, write after close)
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a format error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Error::Format(msg.into())
    }

    /// Create an unsupported error
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        Error::Unsupported(msg.into())
    }

    /// Create a precondition violation
    pub fn precondition<S: Into<String>>(msg: S) -> Self {
        Error::Precondition(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// True when the caller, not the data, is at fault
    pub fn is_precondition(&self) -> bool {
        matches!(self, Error::Precondition(_))
    }
}
