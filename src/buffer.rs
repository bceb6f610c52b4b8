//! In-memory document implementing the editor host interface
//!
//! Used by the command-line tool and the tests. Lines are stored without
//! terminators; every line but the last is followed by a single `\n`.

use std::collections::HashMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

use regex::RegexBuilder;

use crate::host::{ContentChange, Host, SearchDirection, SearchState};
use crate::line::Line;
use crate::syntax::{FoldLevel, Style};

/// Word characters used until the host overrides them
pub const DEFAULT_WORD_CHARS: &str =
    "_0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A document containing text and lexer state
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text
    lines: Vec<Line>,
    /// Document offset of each line
    starts: Vec<usize>,
    /// Buffer name (e.g., "Quest.psc")
    name: String,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
    search: SearchState,
    word_chars: String,
    indicators: HashMap<u32, Vec<Range<usize>>>,
    /// Files the lexer asked to open
    opened: Vec<PathBuf>,
}

impl Buffer {
    /// Create a new empty buffer with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_text(name, "")
    }

    /// Create a buffer holding `text`
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let mut lines: Vec<Line> = text.lines().map(Line::from).collect();
        if text.is_empty() || text.ends_with('\n') {
            lines.push(Line::new());
        }
        let mut buffer = Self {
            lines,
            starts: Vec::new(),
            name: name.into(),
            filename: None,
            search: SearchState::default(),
            word_chars: DEFAULT_WORD_CHARS.to_string(),
            indicators: HashMap::new(),
            opened: Vec::new(),
        };
        buffer.recompute_starts();
        buffer
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        let mut buffer = Self::from_text(name, &content);
        buffer.filename = Some(path.to_path_buf());
        Ok(buffer)
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&PathBuf> {
        self.filename.as_ref()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Get all lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The whole document as one string
    pub fn text(&self) -> String {
        let texts: Vec<&str> = self.lines.iter().map(Line::text).collect();
        texts.join("\n")
    }

    /// Offset of the first occurrence of `needle`, case-sensitive
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.text().find(needle)
    }

    /// Offset of the `nth` (0-based) occurrence of `needle`
    pub fn find_nth(&self, needle: &str, nth: usize) -> Option<usize> {
        self.text().match_indices(needle).nth(nth).map(|(pos, _)| pos)
    }

    /// Ranges currently painted with an indicator
    pub fn indicator_ranges(&self, indicator: u32) -> &[Range<usize>] {
        self.indicators.get(&indicator).map_or(&[], Vec::as_slice)
    }

    /// Files the lexer asked the host to open
    pub fn opened_files(&self) -> &[PathBuf] {
        &self.opened
    }

    /// Insert lines before line `at`
    pub fn insert_lines(&mut self, at: usize, texts: &[&str]) -> ContentChange {
        let at = at.min(self.lines.len());
        self.lines
            .splice(at..at, texts.iter().map(|t| Line::from(*t)));
        self.recompute_starts();
        ContentChange {
            line: at,
            lines_added: texts.len() as isize,
        }
    }

    /// Delete `count` lines starting at `at`, keeping at least one line
    pub fn delete_lines(&mut self, at: usize, count: usize) -> ContentChange {
        let end = (at + count).min(self.lines.len());
        let at = at.min(end);
        self.lines.drain(at..end);
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
        self.recompute_starts();
        ContentChange {
            line: at,
            lines_added: -((end - at) as isize),
        }
    }

    /// Replace the text of one line in place
    pub fn replace_line(&mut self, at: usize, text: &str) -> ContentChange {
        if let Some(line) = self.lines.get_mut(at) {
            *line = Line::from(text);
            self.recompute_starts();
        }
        ContentChange {
            line: at,
            lines_added: 0,
        }
    }

    fn recompute_starts(&mut self) {
        self.starts.clear();
        let mut offset = 0;
        for line in &self.lines {
            self.starts.push(offset);
            offset += line.len() + 1;
        }
    }

    fn is_word_char(&self, ch: char) -> bool {
        self.word_chars.contains(ch) || (!ch.is_ascii() && ch.is_alphanumeric())
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        let line_idx = self.line_of_offset(offset);
        let line = self.lines.get(line_idx)?;
        let idx = offset.checked_sub(self.starts[line_idx])?;
        if idx < line.len() {
            line.text().get(idx..).and_then(|s| s.chars().next())
        } else if idx == line.len() && line_idx + 1 < self.lines.len() {
            Some('\n')
        } else {
            None
        }
    }

    fn char_before(&self, offset: usize) -> Option<char> {
        if offset == 0 || offset > self.len() {
            return None;
        }
        let line_idx = self.line_of_offset(offset);
        let idx = offset - self.starts[line_idx];
        if idx == 0 {
            return Some('\n');
        }
        self.lines[line_idx]
            .text()
            .get(..idx)
            .and_then(|s| s.chars().next_back())
    }

    fn is_whole_word(&self, text: &str, hit: &Range<usize>) -> bool {
        let before = text[..hit.start].chars().next_back();
        let after = text[hit.end..].chars().next();
        !before.is_some_and(|c| self.is_word_char(c)) && !after.is_some_and(|c| self.is_word_char(c))
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new("*scratch*")
    }
}

impl Host for Buffer {
    fn len(&self) -> usize {
        match (self.starts.last(), self.lines.last()) {
            (Some(start), Some(line)) => start + line.len(),
            _ => 0,
        }
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_start(&self, line: usize) -> usize {
        self.starts.get(line).copied().unwrap_or_else(|| self.len())
    }

    fn line_end(&self, line: usize) -> usize {
        match self.lines.get(line) {
            Some(l) => self.starts[line] + l.len(),
            None => self.len(),
        }
    }

    fn line_of_offset(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset).saturating_sub(1)
    }

    fn text_range(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let mut out = String::new();
        if start >= end {
            return out;
        }
        for line_idx in self.line_of_offset(start)..self.lines.len() {
            let line_start = self.starts[line_idx];
            if line_start >= end {
                break;
            }
            let line = &self.lines[line_idx];
            out.push_str(line.safe_slice(start.saturating_sub(line_start), end - line_start));
            let terminator = line_start + line.len();
            if line_idx + 1 < self.lines.len() && start <= terminator && terminator < end {
                out.push('\n');
            }
        }
        out
    }

    fn style_at(&self, offset: usize) -> Style {
        let line_idx = self.line_of_offset(offset);
        match self.lines.get(line_idx) {
            Some(line) => line.style_at(offset - self.starts[line_idx]),
            None => Style::Default,
        }
    }

    fn set_style(&mut self, start: usize, end: usize, style: Style) {
        if start >= end {
            return;
        }
        for line_idx in self.line_of_offset(start)..self.lines.len() {
            let line_start = self.starts[line_idx];
            if line_start >= end {
                break;
            }
            self.lines[line_idx].set_styles(
                start.saturating_sub(line_start),
                end - line_start,
                style,
            );
        }
    }

    fn fold_level(&self, line: usize) -> Option<FoldLevel> {
        self.lines.get(line).and_then(Line::fold)
    }

    fn set_fold_level(&mut self, line: usize, level: FoldLevel) {
        if let Some(l) = self.lines.get_mut(line) {
            l.set_fold(level);
        }
    }

    fn search_state(&self) -> SearchState {
        self.search
    }

    fn set_search_state(&mut self, state: SearchState) {
        self.search = state;
    }

    fn search_in_target(&mut self, needle: &str) -> Option<Range<usize>> {
        if needle.is_empty() {
            return None;
        }
        let text = self.text();
        let state = self.search;
        let lo = state.target_start.min(state.target_end);
        let hi = state.target_start.max(state.target_end).min(text.len());
        let haystack = text.get(lo..hi)?;

        let regex = RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(!state.flags.match_case)
            .build()
            .ok()?;
        let mut hits = regex
            .find_iter(haystack)
            .map(|m| lo + m.start()..lo + m.end())
            .filter(|hit| !state.flags.whole_word || self.is_whole_word(&text, hit));

        let hit = match state.direction() {
            SearchDirection::Forward => hits.next(),
            SearchDirection::Backward => hits.last(),
        }?;
        self.search.target_start = hit.start;
        self.search.target_end = hit.end;
        Some(hit)
    }

    fn word_chars(&self) -> String {
        self.word_chars.clone()
    }

    fn set_word_chars(&mut self, chars: &str) {
        self.word_chars = chars.to_string();
    }

    fn word_range_at(&self, offset: usize) -> Range<usize> {
        let mut start = offset.min(self.len());
        while let Some(ch) = self.char_before(start).filter(|&c| self.is_word_char(c)) {
            start -= ch.len_utf8();
        }
        let mut end = offset.min(self.len());
        while let Some(ch) = self.char_at(end).filter(|&c| self.is_word_char(c)) {
            end += ch.len_utf8();
        }
        start..end
    }

    fn clear_indicator(&mut self, indicator: u32, start: usize, end: usize) {
        let Some(ranges) = self.indicators.get_mut(&indicator) else {
            return;
        };
        let mut kept = Vec::with_capacity(ranges.len());
        for range in ranges.drain(..) {
            if range.end <= start || range.start >= end {
                kept.push(range);
                continue;
            }
            if range.start < start {
                kept.push(range.start..start);
            }
            if range.end > end {
                kept.push(end..range.end);
            }
        }
        *ranges = kept;
    }

    fn fill_indicator(&mut self, indicator: u32, start: usize, end: usize) {
        if start < end {
            self.indicators.entry(indicator).or_default().push(start..end);
        }
    }

    fn open_file(&mut self, path: &Path) {
        self.opened.push(path.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SearchFlags;

    fn search(buffer: &mut Buffer, needle: &str, start: usize, end: usize) -> Option<Range<usize>> {
        buffer.set_search_state(SearchState {
            target_start: start,
            target_end: end,
            flags: SearchFlags {
                whole_word: true,
                match_case: false,
            },
        });
        buffer.search_in_target(needle)
    }

    #[test]
    fn test_offsets() {
        let buffer = Buffer::from_text("t", "If x\n  EndIf\n");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.len(), 13);
        assert_eq!(buffer.line_start(1), 5);
        assert_eq!(buffer.line_end(1), 12);
        assert_eq!(buffer.line_of_offset(4), 0);
        assert_eq!(buffer.line_of_offset(5), 1);
        assert_eq!(buffer.line_of_offset(13), 2);
        assert_eq!(buffer.text_range(3, 9), "x\n  En");
        assert_eq!(buffer.text_range(0, 100), "If x\n  EndIf\n");
    }

    #[test]
    fn test_styles_span_lines() {
        let mut buffer = Buffer::from_text("t", "ab\ncd");
        buffer.set_style(1, 4, Style::String);
        assert_eq!(buffer.style_at(0), Style::Default);
        assert_eq!(buffer.style_at(1), Style::String);
        assert_eq!(buffer.style_at(2), Style::String);
        assert_eq!(buffer.style_at(3), Style::String);
        assert_eq!(buffer.style_at(4), Style::Default);
    }

    #[test]
    fn test_whole_word_search_both_ways() {
        let mut buffer = Buffer::from_text("t", "If ElseIf\nendif ENDIF");
        assert_eq!(search(&mut buffer, "if", 0, 100), Some(0..2));
        assert_eq!(search(&mut buffer, "if", 1, 100), None);
        assert_eq!(search(&mut buffer, "endif", 0, 100), Some(10..15));
        assert_eq!(search(&mut buffer, "endif", 100, 0), Some(16..21));
        assert_eq!(buffer.search_state().target_start, 16);
        assert_eq!(search(&mut buffer, "endif", 15, 0), Some(10..15));
    }

    #[test]
    fn test_word_range_and_word_chars() {
        let mut buffer = Buffer::from_text("t", "x = Quest:Stage");
        assert_eq!(buffer.word_range_at(6), 4..9);
        assert_eq!(buffer.word_range_at(9), 4..9);
        assert_eq!(buffer.word_range_at(2), 2..2);
        buffer.set_word_chars(&format!("{}:", DEFAULT_WORD_CHARS));
        assert_eq!(buffer.word_range_at(6), 4..15);
    }

    #[test]
    fn test_indicators() {
        let mut buffer = Buffer::from_text("t", "0123456789");
        buffer.fill_indicator(1, 0, 4);
        buffer.fill_indicator(1, 6, 9);
        buffer.clear_indicator(1, 2, 7);
        assert_eq!(buffer.indicator_ranges(1), &[0..2, 7..9]);
        buffer.clear_indicator(1, 0, buffer.len());
        assert!(buffer.indicator_ranges(1).is_empty());
        assert!(buffer.indicator_ranges(5).is_empty());
    }

    #[test]
    fn test_edits_report_changes() {
        let mut buffer = Buffer::from_text("t", "a\nb\nc");
        assert_eq!(
            buffer.insert_lines(1, &["x", "y"]),
            ContentChange { line: 1, lines_added: 2 }
        );
        assert_eq!(buffer.text(), "a\nx\ny\nb\nc");
        assert_eq!(
            buffer.delete_lines(3, 1),
            ContentChange { line: 3, lines_added: -1 }
        );
        assert_eq!(buffer.text(), "a\nx\ny\nc");
        assert_eq!(buffer.replace_line(0, "z").lines_added, 0);
        assert_eq!(buffer.line_start(1), 2);
    }
}
