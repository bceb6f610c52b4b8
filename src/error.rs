//! Error types for papyrus-lex

use thiserror::Error;

/// Result type alias for papyrus-lex operations
pub type Result<T> = std::result::Result<T, LexError>;

/// Errors raised at the edges of the lexer (configuration, files, arguments).
///
/// Styling, folding and matching never fail; they degrade to "no style",
/// "no fold" or "no match" instead.
#[derive(Error, Debug)]
pub enum LexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Cannot serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("No such profile: {0}")]
    UnknownProfile(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
