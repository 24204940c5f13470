use std::path::PathBuf;
use thiserror::Error;

/// Failures while obtaining words for a new round.
///
/// Both are recoverable: the session reports them and goes back to the menu.
#[derive(Debug, Error)]
pub enum WordbankError {
    /// The word source could not be opened or read.
    #[error("word source {} is unavailable: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was read but no line passed validation.
    #[error("word source contains no playable words")]
    NoPlayableWords,
}

/// Invalid round configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max attempts must be at least 1")]
    ZeroAttempts,

    #[error("placeholder '{0}' is also a letter of the alphabet")]
    PlaceholderInAlphabet(char),

    #[error("the alphabet has no letters")]
    EmptyAlphabet,
}
