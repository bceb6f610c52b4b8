//! Fold level computation
//!
//! Fold levels come from counting fold-open and fold-close words per line,
//! skipping anything the styler marked as comment or string.

use super::style::Style;
use super::tokens::Token;
use super::words::WordLists;

/// Level of an unindented line
pub const FOLD_LEVEL_BASE: i32 = 0x400;

/// Fold information for one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldLevel {
    /// Level of this line
    pub level: i32,
    /// Level in effect for the following line
    pub next: i32,
    /// Whether the line starts a foldable block
    pub header: bool,
}

impl Default for FoldLevel {
    fn default() -> Self {
        Self {
            level: FOLD_LEVEL_BASE,
            next: FOLD_LEVEL_BASE,
            header: false,
        }
    }
}

/// Compute the fold level of one line
///
/// `tokens` pairs each token with the style already recorded for it,
/// `previous` is the running level left by the line above.
pub fn fold_line(
    tokens: &[(Token, Style)],
    previous: i32,
    words: &WordLists,
    fold_middle: bool,
) -> FoldLevel {
    let mut opens = 0;
    let mut closes = 0;
    let mut middles = 0;

    for (token, style) in tokens {
        if style.is_comment_or_string() {
            continue;
        }
        if words.fold_open.contains(&token.content) {
            opens += 1;
        }
        if words.fold_close.contains(&token.content) {
            closes += 1;
        }
        if words.fold_middle.contains(&token.content) {
            middles += 1;
        }
    }

    let next = previous + opens - closes;
    if fold_middle && middles == 1 && opens == 0 && closes == 0 {
        return FoldLevel {
            level: previous - 1,
            next,
            header: true,
        };
    }

    FoldLevel {
        level: previous,
        next,
        header: opens > closes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::builtin::papyrus_word_lists;
    use crate::syntax::tokens::tokenize;

    fn styled(text: &str, style: Style) -> Vec<(Token, Style)> {
        tokenize(text, 0).into_iter().map(|t| (t, style)).collect()
    }

    #[test]
    fn test_open_word_makes_header() {
        let words = papyrus_word_lists();
        let fold = fold_line(&styled("If x > 1", Style::Default), FOLD_LEVEL_BASE, &words, false);
        assert!(fold.header);
        assert_eq!(fold.level, FOLD_LEVEL_BASE);
        assert_eq!(fold.next, FOLD_LEVEL_BASE + 1);
    }

    #[test]
    fn test_balanced_line_keeps_level() {
        let words = papyrus_word_lists();
        let tokens = styled("Function Foo() native", Style::Default);
        let fold = fold_line(&tokens, FOLD_LEVEL_BASE + 2, &words, false);
        assert!(!fold.header);
        assert_eq!(fold.level, FOLD_LEVEL_BASE + 2);
        assert_eq!(fold.next, FOLD_LEVEL_BASE + 2);
    }

    #[test]
    fn test_close_word_lowers_next_line() {
        let words = papyrus_word_lists();
        let fold = fold_line(&styled("EndIf", Style::Default), FOLD_LEVEL_BASE + 1, &words, false);
        assert!(!fold.header);
        assert_eq!(fold.next, FOLD_LEVEL_BASE);
    }

    #[test]
    fn test_comment_words_ignored() {
        let words = papyrus_word_lists();
        let fold = fold_line(&styled("If While", Style::Comment), FOLD_LEVEL_BASE, &words, false);
        assert!(!fold.header);
        assert_eq!(fold.next, FOLD_LEVEL_BASE);
    }

    #[test]
    fn test_middle_word() {
        let words = papyrus_word_lists();
        let tokens = styled("Else", Style::Default);
        let running = FOLD_LEVEL_BASE + 1;

        let plain = fold_line(&tokens, running, &words, false);
        assert!(!plain.header);
        assert_eq!(plain.level, running);

        let middle = fold_line(&tokens, running, &words, true);
        assert!(middle.header);
        assert_eq!(middle.level, running - 1);
        assert_eq!(middle.next, running);
    }
}
