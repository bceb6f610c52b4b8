//! Line style state machine
//!
//! Walks the tokens of one line, assigning a style to each and carrying a
//! mode (inside a string, a comment, ...) from token to token. Only the two
//! block comment modes survive the end of the line.

use super::classes::{ClassNameResolver, Profile};
use super::properties::PropertyTracker;
use super::style::{LineEndState, Style, StyleSpan};
use super::tokens::{tokenize, Token, TokenKind};
use super::words::WordLists;

/// Styling mode within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Default,
    Comment,
    CommentMultiLine,
    CommentDoc,
    String,
}

impl Mode {
    fn style(self) -> Style {
        match self {
            Mode::Default => Style::Default,
            Mode::Comment => Style::Comment,
            Mode::CommentMultiLine => Style::CommentMultiLine,
            Mode::CommentDoc => Style::CommentDoc,
            Mode::String => Style::String,
        }
    }

    fn end_state(self) -> LineEndState {
        match self {
            Mode::CommentMultiLine => LineEndState::CommentMultiLine,
            Mode::CommentDoc => LineEndState::CommentDoc,
            Mode::Default | Mode::Comment | Mode::String => LineEndState::Default,
        }
    }
}

impl From<LineEndState> for Mode {
    fn from(state: LineEndState) -> Self {
        match state {
            LineEndState::Default => Mode::Default,
            LineEndState::CommentMultiLine => Mode::CommentMultiLine,
            LineEndState::CommentDoc => Mode::CommentDoc,
        }
    }
}

/// Result of styling a single line
#[derive(Debug)]
pub struct LineStyles {
    /// Spans covering the line text, gaps included
    pub spans: Vec<StyleSpan>,
    /// Style left open at the end of the text, before the line break resets
    /// strings and line comments
    pub trailing: Style,
    /// State for the next line
    pub end_state: LineEndState,
}

/// Everything identifier classification consults besides the text
pub struct StyleContext<'a> {
    pub words: &'a WordLists,
    pub properties: &'a mut PropertyTracker,
    pub classes: &'a mut ClassNameResolver,
    pub profile: Option<&'a Profile>,
}

/// Style one line of text
///
/// `base` is the document offset of the line, `line` its index (used for
/// property declarations) and `incoming` the state left by the previous line.
pub fn style_line(
    text: &str,
    base: usize,
    line: usize,
    incoming: LineEndState,
    ctx: &mut StyleContext<'_>,
) -> LineStyles {
    let tokens = tokenize(text, base);
    let mut spans = Vec::with_capacity(tokens.len() * 2);
    let mut mode = Mode::from(incoming);
    let mut cursor = base;

    for (i, token) in tokens.iter().enumerate() {
        if token.start > cursor {
            spans.push(StyleSpan::new(cursor, token.start, mode.style()));
        }

        let style = match mode {
            Mode::CommentDoc => {
                if token.is("}") {
                    mode = Mode::Default;
                }
                Style::CommentDoc
            }
            Mode::CommentMultiLine => {
                let closes = token.is(";")
                    && i > 0
                    && tokens[i - 1].is("/")
                    && tokens[i - 1].touches(token);
                if closes {
                    mode = Mode::Default;
                }
                Style::CommentMultiLine
            }
            Mode::Comment => Style::Comment,
            Mode::String => {
                if token.is("\"") && !is_escaped(&tokens[..i]) {
                    mode = Mode::Default;
                }
                Style::String
            }
            Mode::Default => {
                let (style, next_mode) = classify(&tokens, i, line, ctx);
                mode = next_mode;
                style
            }
        };

        spans.push(StyleSpan::new(token.start, token.end, style));
        cursor = token.end;
    }

    let line_end = base + text.len();
    if line_end > cursor {
        spans.push(StyleSpan::new(cursor, line_end, mode.style()));
    }

    LineStyles {
        spans,
        trailing: mode.style(),
        end_state: mode.end_state(),
    }
}

/// Whether a closing quote is escaped by an odd run of backslash tokens
fn is_escaped(before: &[Token]) -> bool {
    let backslashes = before.iter().rev().take_while(|t| t.is("\\")).count();
    backslashes % 2 == 1
}

/// Style a token met in default mode, returning the mode that follows it
fn classify(tokens: &[Token], i: usize, line: usize, ctx: &mut StyleContext<'_>) -> (Style, Mode) {
    let token = &tokens[i];
    let next = tokens.get(i + 1);

    match token.kind {
        TokenKind::Special if token.is("{") => (Style::CommentDoc, Mode::CommentDoc),
        TokenKind::Special if token.is(";") => {
            if next.is_some_and(|n| n.is("/") && token.touches(n)) {
                (Style::CommentMultiLine, Mode::CommentMultiLine)
            } else {
                (Style::Comment, Mode::Comment)
            }
        }
        TokenKind::Special if token.is("\"") => (Style::String, Mode::String),
        TokenKind::Special => {
            let style = if ctx.words.operators.contains(&token.content) {
                Style::Operator
            } else {
                Style::Default
            };
            (style, Mode::Default)
        }
        TokenKind::Numeric => (Style::Number, Mode::Default),
        TokenKind::Identifier => (classify_identifier(token, next, line, ctx), Mode::Default),
    }
}

fn classify_identifier(
    token: &Token,
    next: Option<&Token>,
    line: usize,
    ctx: &mut StyleContext<'_>,
) -> Style {
    let word = token.content.as_str();
    let words = ctx.words;

    let ends_alnum = word.chars().last().is_some_and(char::is_alphanumeric);
    if !words.flow_control.contains(word) && ends_alnum && next.is_some_and(|n| n.is("(")) {
        return Style::Function;
    }
    if words.types.contains(word) {
        return Style::Type;
    }
    if words.flow_control.contains(word) {
        return Style::FlowControl;
    }
    if words.keywords.contains(word) {
        if word == "property" {
            if let Some(name) = next.filter(|n| !n.is(";") && n.kind == TokenKind::Identifier) {
                ctx.properties.register(&name.content, line);
            }
        }
        return Style::Keyword;
    }
    if words.keywords_alt.contains(word) {
        return Style::KeywordAlt;
    }
    if words.operators.contains(word) {
        return Style::Operator;
    }
    if ctx.properties.is_property(word) {
        return Style::Property;
    }
    if let Some(profile) = ctx.profile {
        if ctx.classes.is_class(word, profile) {
            return Style::Class;
        }
    }
    Style::Default
}
