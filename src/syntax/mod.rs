//! Papyrus lexer core
//!
//! Tokenizing, styling, folding and block keyword matching for Papyrus
//! scripts, driven line by line by an editor host.

pub mod builtin;
mod classes;
mod folding;
mod manager;
mod matcher;
mod properties;
mod style;
mod styler;
mod tokens;
mod words;

pub use classes::{ClassNameResolver, Profile, SCRIPT_EXTENSION};
pub use folding::{fold_line, FoldLevel, FOLD_LEVEL_BASE};
pub use manager::{DocumentLexer, Refresh, SettingChange};
pub use matcher::{match_keyword, MatchResult};
pub use properties::{PropertyRecord, PropertyTracker};
pub use style::{Color, LineEndState, Style, StyleSpan};
pub use styler::{style_line, LineStyles, StyleContext};
pub use tokens::{tokenize, Token, TokenKind};
pub use words::{WordList, WordListKind, WordLists};
