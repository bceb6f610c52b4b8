//! Editor host interface
//!
//! The lexer never owns the document. Everything it reads or writes goes
//! through a `Host`: text, per-byte styles, fold levels, the shared search
//! register, word characters, match indicators and file navigation.

use std::ops::{Deref, DerefMut, Range};
use std::path::Path;

use crate::syntax::{FoldLevel, Style};

/// Search direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl SearchDirection {
    /// Whether `a` is met before `b` when scanning in this direction
    pub fn precedes(self, a: &Range<usize>, b: &Range<usize>) -> bool {
        match self {
            SearchDirection::Forward => a.start < b.start,
            SearchDirection::Backward => a.start > b.start,
        }
    }

    /// Position just past `hit` in this direction
    pub fn past(self, hit: &Range<usize>) -> usize {
        match self {
            SearchDirection::Forward => hit.end,
            SearchDirection::Backward => hit.start,
        }
    }

    /// The document range between `pos` and `limit`, exclusive of `limit`
    pub fn between(self, pos: usize, limit: &Range<usize>) -> Range<usize> {
        match self {
            SearchDirection::Forward => pos..limit.start.max(pos),
            SearchDirection::Backward => limit.end.min(pos)..pos,
        }
    }
}

/// Flags applied to `Host::search_in_target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchFlags {
    pub whole_word: bool,
    pub match_case: bool,
}

/// The host's shared search register
///
/// A target with `start > end` is searched backward, finding the match
/// closest to `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchState {
    pub target_start: usize,
    pub target_end: usize,
    pub flags: SearchFlags,
}

impl SearchState {
    pub fn direction(&self) -> SearchDirection {
        if self.target_start > self.target_end {
            SearchDirection::Backward
        } else {
            SearchDirection::Forward
        }
    }
}

/// An edit notification: `lines_added` lines were inserted (positive) or
/// removed (negative) at `line`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentChange {
    pub line: usize,
    pub lines_added: isize,
}

/// Editor surface consumed by the lexer
///
/// Offsets are byte offsets into the UTF-8 document. Reads may come back
/// shorter than requested; callers clamp to what they got.
pub trait Host {
    /// Document length in bytes
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn line_count(&self) -> usize;

    /// Offset of the first byte of `line`
    fn line_start(&self, line: usize) -> usize;

    /// Offset just before the line terminator of `line`
    fn line_end(&self, line: usize) -> usize;

    /// Line containing `offset`
    fn line_of_offset(&self, offset: usize) -> usize;

    /// Text of `start..end`
    fn text_range(&self, start: usize, end: usize) -> String;

    fn style_at(&self, offset: usize) -> Style;

    fn set_style(&mut self, start: usize, end: usize, style: Style);

    fn fold_level(&self, line: usize) -> Option<FoldLevel>;

    fn set_fold_level(&mut self, line: usize, level: FoldLevel);

    fn search_state(&self) -> SearchState;

    fn set_search_state(&mut self, state: SearchState);

    /// Search the current target for `needle`
    ///
    /// On success the target is moved to the match, as editor search
    /// registers do.
    fn search_in_target(&mut self, needle: &str) -> Option<Range<usize>>;

    /// Characters that make up a word
    fn word_chars(&self) -> String;

    fn set_word_chars(&mut self, chars: &str);

    /// Word around `offset` under the current word characters; empty when
    /// `offset` touches no word
    fn word_range_at(&self, offset: usize) -> Range<usize>;

    fn clear_indicator(&mut self, indicator: u32, start: usize, end: usize);

    fn fill_indicator(&mut self, indicator: u32, start: usize, end: usize);

    /// Ask the host to open a file
    fn open_file(&mut self, path: &Path);
}

/// Snapshot of the search register, restored when dropped
///
/// Derefs to the host so the register can be used freely while held.
pub struct SearchGuard<'a, H: Host + ?Sized> {
    host: &'a mut H,
    saved: SearchState,
}

impl<'a, H: Host + ?Sized> SearchGuard<'a, H> {
    pub fn new(host: &'a mut H) -> Self {
        let saved = host.search_state();
        Self { host, saved }
    }
}

impl<H: Host + ?Sized> Deref for SearchGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: Host + ?Sized> DerefMut for SearchGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: Host + ?Sized> Drop for SearchGuard<'_, H> {
    fn drop(&mut self) {
        self.host.set_search_state(self.saved);
    }
}

/// Temporary override of the host's word characters, restored when dropped
pub struct WordCharsGuard<'a, H: Host + ?Sized> {
    host: &'a mut H,
    saved: String,
}

impl<'a, H: Host + ?Sized> WordCharsGuard<'a, H> {
    /// Add `extra` to the current word characters
    pub fn extend(host: &'a mut H, extra: &str) -> Self {
        let saved = host.word_chars();
        let mut chars = saved.clone();
        chars.extend(extra.chars().filter(|c| !saved.contains(*c)));
        host.set_word_chars(&chars);
        Self { host, saved }
    }
}

impl<H: Host + ?Sized> Deref for WordCharsGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: Host + ?Sized> DerefMut for WordCharsGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: Host + ?Sized> Drop for WordCharsGuard<'_, H> {
    fn drop(&mut self) {
        self.host.set_word_chars(&self.saved);
    }
}
