//! Line representation for the in-memory document

use unicode_width::UnicodeWidthStr;

use crate::syntax::{FoldLevel, Style};

/// A single line of text with its lexer state
///
/// `styles` holds one entry per byte plus one for the line terminator.
#[derive(Debug, Clone)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
    styles: Vec<Style>,
    fold: Option<FoldLevel>,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self::from_string(String::new())
    }

    /// Create a line from a string
    pub fn from_string(s: String) -> Self {
        let styles = vec![Style::Default; s.len() + 1];
        Self {
            text: s,
            styles,
            fold: None,
        }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Style of the byte at `idx`; `idx == len()` is the terminator
    pub fn style_at(&self, idx: usize) -> Style {
        self.styles.get(idx).copied().unwrap_or_default()
    }

    /// Style bytes `start..end`, clamped to the line and its terminator
    pub fn set_styles(&mut self, start: usize, end: usize, style: Style) {
        let end = end.min(self.styles.len());
        if start < end {
            self.styles[start..end].fill(style);
        }
    }

    pub fn fold(&self) -> Option<FoldLevel> {
        self.fold
    }

    pub fn set_fold(&mut self, fold: FoldLevel) {
        self.fold = Some(fold);
    }

    /// Get byte position for a given column (display position)
    /// Returns None if column is beyond line end
    pub fn col_to_byte(&self, col: usize) -> Option<usize> {
        let mut current_col = 0;
        for (byte_idx, ch) in self.text.char_indices() {
            if current_col >= col {
                return Some(byte_idx);
            }
            current_col += unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
        }
        if current_col >= col {
            Some(self.text.len())
        } else {
            None
        }
    }

    /// Get column (display position) for a given byte position
    pub fn byte_to_col(&self, byte_pos: usize) -> usize {
        self.safe_slice(0, byte_pos).width()
    }

    /// Find the nearest valid UTF-8 char boundary at or before `pos`
    fn floor_char_boundary(&self, pos: usize) -> usize {
        if pos >= self.text.len() {
            return self.text.len();
        }
        let mut p = pos;
        while p > 0 && !self.text.is_char_boundary(p) {
            p -= 1;
        }
        p
    }

    /// Find the nearest valid UTF-8 char boundary at or after `pos`
    fn ceil_char_boundary(&self, pos: usize) -> usize {
        if pos >= self.text.len() {
            return self.text.len();
        }
        let mut p = pos;
        while p < self.text.len() && !self.text.is_char_boundary(p) {
            p += 1;
        }
        p
    }

    /// Safely slice the line text, adjusting to valid UTF-8 boundaries
    /// Returns empty string if range is invalid
    pub fn safe_slice(&self, start: usize, end: usize) -> &str {
        if start >= self.text.len() {
            return "";
        }
        let start = self.floor_char_boundary(start);
        let end = self.ceil_char_boundary(end.min(self.text.len()));
        if start >= end {
            return "";
        }
        &self.text[start..end]
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}
