//! Lexical styles and line-end state
//!
//! A `Style` is the category assigned to every styled byte of the
//! document. Hosts persist styles per byte and hand them back when the
//! folder and the keyword matcher need to tell code from comments.

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    BrightBlack,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Lexical category of a character range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Style {
    /// Plain text
    #[default]
    Default = 0,
    /// Operators and operator words (`+`, `=`, `as`, `new`)
    Operator = 1,
    /// Flow-control block words (`If`, `EndWhile`, `Return`)
    FlowControl = 2,
    /// Built-in type names
    Type = 3,
    /// Declaration keywords (`Function`, `Property`, `State`)
    Keyword = 4,
    /// Secondary keyword list
    KeywordAlt = 5,
    /// `;` line comment
    Comment = 6,
    /// `;/ ... /;` block comment
    CommentMultiLine = 7,
    /// `{ ... }` documentation comment
    CommentDoc = 8,
    /// Numeric literal
    Number = 9,
    /// String literal
    String = 10,
    /// Name of a declared property
    Property = 11,
    /// Identifier that resolves to a script file
    Class = 12,
    /// Identifier directly followed by `(`
    Function = 13,
}

impl Style {
    /// All styles, ordered by id
    pub const ALL: [Style; 14] = [
        Style::Default,
        Style::Operator,
        Style::FlowControl,
        Style::Type,
        Style::Keyword,
        Style::KeywordAlt,
        Style::Comment,
        Style::CommentMultiLine,
        Style::CommentDoc,
        Style::Number,
        Style::String,
        Style::Property,
        Style::Class,
        Style::Function,
    ];

    /// Numeric id as persisted by hosts
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Style for a persisted id, `Default` for unknown ids
    pub fn from_id(id: u8) -> Self {
        Self::ALL.get(id as usize).copied().unwrap_or_default()
    }

    /// Whether text of this style is inert (comment or string) for folding
    pub fn is_comment_or_string(self) -> bool {
        matches!(
            self,
            Style::Comment | Style::CommentMultiLine | Style::CommentDoc | Style::String
        )
    }

    /// Get the default terminal color for this style
    pub fn default_color(self) -> Color {
        match self {
            Style::Default => Color::Default,
            Style::Operator => Color::BrightWhite,
            Style::FlowControl => Color::Magenta,
            Style::Type => Color::Yellow,
            Style::Keyword => Color::Blue,
            Style::KeywordAlt => Color::BrightBlue,
            Style::Comment | Style::CommentMultiLine => Color::BrightBlack,
            Style::CommentDoc => Color::BrightGreen,
            Style::Number => Color::Cyan,
            Style::String => Color::Green,
            Style::Property => Color::BrightMagenta,
            Style::Class => Color::BrightCyan,
            Style::Function => Color::BrightYellow,
        }
    }

    /// Get a human-readable name for this style
    pub fn name(self) -> &'static str {
        match self {
            Style::Default => "Default",
            Style::Operator => "Operator",
            Style::FlowControl => "FlowControl",
            Style::Type => "Type",
            Style::Keyword => "Keyword",
            Style::KeywordAlt => "KeywordAlt",
            Style::Comment => "Comment",
            Style::CommentMultiLine => "CommentMultiLine",
            Style::CommentDoc => "CommentDoc",
            Style::Number => "Number",
            Style::String => "String",
            Style::Property => "Property",
            Style::Class => "Class",
            Style::Function => "Function",
        }
    }
}

/// Mode carried from the end of one line into the next
///
/// Only the two multi-line comment forms survive a line break; strings and
/// line comments are always closed by the end of their line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEndState {
    #[default]
    Default,
    CommentMultiLine,
    CommentDoc,
}

impl LineEndState {
    /// State implied by the style recorded at the end of a line
    pub fn from_style(style: Style) -> Self {
        match style {
            Style::CommentMultiLine => LineEndState::CommentMultiLine,
            Style::CommentDoc => LineEndState::CommentDoc,
            _ => LineEndState::Default,
        }
    }
}

/// A styled byte range within the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Style to apply to this span
    pub style: Style,
}

impl StyleSpan {
    /// Create a new span
    pub fn new(start: usize, end: usize, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
