//! papyrus-lex - incremental lexer for Papyrus scripts
//!
//! Styling, folding and block keyword matching for an editor host. The
//! host implements [`host::Host`]; [`syntax::DocumentLexer`] answers its
//! requests. [`buffer::Buffer`] is an in-memory host.

pub mod buffer;
pub mod config;
pub mod error;
pub mod host;
pub mod line;
pub mod render;
pub mod syntax;

pub use buffer::Buffer;
pub use config::Config;
pub use error::{LexError, Result};
pub use host::{ContentChange, Host};
pub use syntax::{DocumentLexer, MatchResult, Refresh, SettingChange};
