//! Line tokenizer
//!
//! Splits one line of Papyrus source into identifiers, numbers and
//! single-character specials. Whitespace separates tokens and is never
//! returned. Offsets are byte offsets into the document, so multi-byte
//! characters advance them by their UTF-8 width.

use std::iter::Peekable;
use std::str::CharIndices;

/// Kind of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Letter or `_`, then alphanumerics, `_` or `:`
    Identifier,
    /// Decimal, hex (`0x1F`), negative (`-3`) or dotted (`1.5`) literal
    Numeric,
    /// Any other single non-whitespace character
    Special,
}

/// A classified piece of one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Case-folded text
    pub content: String,
    pub kind: TokenKind,
    /// Document offset of the first byte
    pub start: usize,
    /// Document offset one past the last byte
    pub end: usize,
}

impl Token {
    /// Check the case-folded text
    pub fn is(&self, text: &str) -> bool {
        self.content == text
    }

    /// Whether `next` starts exactly where this token ends
    pub fn touches(&self, next: &Token) -> bool {
        self.end == next.start
    }
}

/// Tokenize one line (without its line terminator)
///
/// `base` is the document offset of the first byte of `text`.
pub fn tokenize(text: &str, base: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let kind = if ch.is_alphabetic() || ch == '_' {
            chars.next();
            skip_while(&mut chars, |c| c.is_alphanumeric() || c == '_' || c == ':');
            TokenKind::Identifier
        } else if ch.is_ascii_digit() || ch == '-' {
            scan_number(&mut chars)
        } else {
            chars.next();
            TokenKind::Special
        };

        let end = chars.peek().map_or(text.len(), |&(pos, _)| pos);
        tokens.push(Token {
            content: text[start..end].to_lowercase(),
            kind,
            start: base + start,
            end: base + end,
        });
    }

    tokens
}

fn skip_while(chars: &mut Peekable<CharIndices<'_>>, pred: impl Fn(char) -> bool) {
    while chars.next_if(|&(_, c)| pred(c)).is_some() {}
}

/// Consume a numeric literal starting at the current character
///
/// A lone `-` is not a number and comes back as `Special`.
fn scan_number(chars: &mut Peekable<CharIndices<'_>>) -> TokenKind {
    let Some((_, first)) = chars.next() else {
        return TokenKind::Special;
    };
    let mut len = 1;
    let mut seen_digit = first.is_ascii_digit();
    let mut hex = false;

    while let Some(&(_, c)) = chars.peek() {
        let accept = if c.is_ascii_digit() {
            true
        } else if c == '.' {
            seen_digit
        } else if c == 'x' || c == 'X' {
            len == 1 && first == '0'
        } else {
            hex && c.is_ascii_hexdigit()
        };
        if !accept {
            break;
        }
        if c == 'x' || c == 'X' {
            hex = true;
        }
        seen_digit |= c.is_ascii_digit();
        len += 1;
        chars.next();
    }

    if first == '-' && len == 1 {
        TokenKind::Special
    } else {
        TokenKind::Numeric
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(String, TokenKind)> {
        tokenize(text, 0)
            .into_iter()
            .map(|t| (t.content, t.kind))
            .collect()
    }

    #[test]
    fn test_identifiers_are_case_folded() {
        let tokens = tokenize("  ScriptName MyQuest:Stage01 ", 10);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].content, "scriptname");
        assert_eq!(tokens[0].start, 12);
        assert_eq!(tokens[0].end, 22);
        assert_eq!(tokens[1].content, "myquest:stage01");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_lone_minus_is_special() {
        assert_eq!(kinds("-"), vec![("-".to_string(), TokenKind::Special)]);
        assert_eq!(
            kinds("a - b"),
            vec![
                ("a".to_string(), TokenKind::Identifier),
                ("-".to_string(), TokenKind::Special),
                ("b".to_string(), TokenKind::Identifier),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("-12"), vec![("-12".to_string(), TokenKind::Numeric)]);
        assert_eq!(kinds("1.25"), vec![("1.25".to_string(), TokenKind::Numeric)]);
        assert_eq!(kinds("0x1F"), vec![("0x1f".to_string(), TokenKind::Numeric)]);
        // `-` only leads, so the second one starts a new token
        assert_eq!(
            kinds("5-3"),
            vec![
                ("5".to_string(), TokenKind::Numeric),
                ("-3".to_string(), TokenKind::Numeric),
            ]
        );
        // `.` needs a digit before it
        assert_eq!(
            kinds("-.5"),
            vec![
                ("-".to_string(), TokenKind::Special),
                (".".to_string(), TokenKind::Special),
                ("5".to_string(), TokenKind::Numeric),
            ]
        );
        // a digit before the `.` is enough, hex or not
        assert_eq!(kinds("0x1.5"), vec![("0x1.5".to_string(), TokenKind::Numeric)]);
        // hex digits only after a `0x` prefix
        assert_eq!(
            kinds("12ab"),
            vec![
                ("12".to_string(), TokenKind::Numeric),
                ("ab".to_string(), TokenKind::Identifier),
            ]
        );
    }

    #[test]
    fn test_specials_are_single_characters() {
        let tokens = tokenize(";/", 0);
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].is(";"));
        assert!(tokens[1].is("/"));
        assert!(tokens[0].touches(&tokens[1]));
    }

    #[test]
    fn test_multibyte_offsets() {
        // "é" is two bytes, "😀" four
        let tokens = tokenize("café 😀 x", 100);
        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[0].start, tokens[0].end), (100, 105));
        assert_eq!(tokens[1].kind, TokenKind::Special);
        assert_eq!((tokens[1].start, tokens[1].end), (106, 110));
        assert_eq!((tokens[2].start, tokens[2].end), (111, 112));
    }
}
