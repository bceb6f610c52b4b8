//! Keyword lists
//!
//! Eight case-insensitive word sets drive classification and folding.
//! Lists are written the way editor hosts usually store them: words
//! separated by whitespace.

use std::collections::HashSet;

/// Role of a word list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordListKind {
    Operators,
    FlowControl,
    Types,
    Keywords,
    KeywordsAlt,
    FoldOpen,
    FoldMiddle,
    FoldClose,
}

impl WordListKind {
    pub const ALL: [WordListKind; 8] = [
        WordListKind::Operators,
        WordListKind::FlowControl,
        WordListKind::Types,
        WordListKind::Keywords,
        WordListKind::KeywordsAlt,
        WordListKind::FoldOpen,
        WordListKind::FoldMiddle,
        WordListKind::FoldClose,
    ];
}

/// A case-insensitive set of words
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Build from a whitespace separated list
    pub fn from_words(list: &str) -> Self {
        Self {
            words: list.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    /// Membership test for an already case-folded word
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The full set of lists used by one lexer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordLists {
    pub operators: WordList,
    pub flow_control: WordList,
    pub types: WordList,
    pub keywords: WordList,
    pub keywords_alt: WordList,
    pub fold_open: WordList,
    pub fold_middle: WordList,
    pub fold_close: WordList,
}

impl WordLists {
    /// Get a list by role
    pub fn get(&self, kind: WordListKind) -> &WordList {
        match kind {
            WordListKind::Operators => &self.operators,
            WordListKind::FlowControl => &self.flow_control,
            WordListKind::Types => &self.types,
            WordListKind::Keywords => &self.keywords,
            WordListKind::KeywordsAlt => &self.keywords_alt,
            WordListKind::FoldOpen => &self.fold_open,
            WordListKind::FoldMiddle => &self.fold_middle,
            WordListKind::FoldClose => &self.fold_close,
        }
    }

    /// Replace a list by role
    pub fn set(&mut self, kind: WordListKind, list: WordList) {
        let slot = match kind {
            WordListKind::Operators => &mut self.operators,
            WordListKind::FlowControl => &mut self.flow_control,
            WordListKind::Types => &mut self.types,
            WordListKind::Keywords => &mut self.keywords,
            WordListKind::KeywordsAlt => &mut self.keywords_alt,
            WordListKind::FoldOpen => &mut self.fold_open,
            WordListKind::FoldMiddle => &mut self.fold_middle,
            WordListKind::FoldClose => &mut self.fold_close,
        };
        *slot = list;
    }
}
