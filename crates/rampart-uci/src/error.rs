//! UCI protocol errors.

/// Errors raised while parsing or serving UCI commands.
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    /// A `position` command named neither `startpos` nor `fen`.
    #[error("position command must start with 'startpos' or 'fen'")]
    MalformedPosition,

    /// A `go depth` value was missing or not a number.
    #[error("invalid depth value {value:?}")]
    InvalidDepth {
        /// The offending token, empty when absent.
        value: String,
    },

    /// Reading stdin failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
