//! Terminal output for styled documents

use std::io::Write;

use crossterm::queue;
use crossterm::style::{self, Print, ResetColor, SetForegroundColor};

use crate::buffer::Buffer;
use crate::error::Result;
use crate::host::Host;
use crate::syntax::{Color, FoldLevel, MatchResult, Style, FOLD_LEVEL_BASE};

impl From<Color> for style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Default => style::Color::Reset,
            Color::Green => style::Color::DarkGreen,
            Color::Yellow => style::Color::DarkYellow,
            Color::Blue => style::Color::DarkBlue,
            Color::Magenta => style::Color::DarkMagenta,
            Color::Cyan => style::Color::DarkCyan,
            Color::BrightBlack => style::Color::DarkGrey,
            Color::BrightGreen => style::Color::Green,
            Color::BrightYellow => style::Color::Yellow,
            Color::BrightBlue => style::Color::Blue,
            Color::BrightMagenta => style::Color::Magenta,
            Color::BrightCyan => style::Color::Cyan,
            Color::BrightWhite => style::Color::White,
        }
    }
}

/// Writes a styled buffer to a terminal
pub struct Renderer<W: Write> {
    out: W,
    /// Prefix each line with its fold level
    pub show_folds: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_folds: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print every line, one color run per style run
    pub fn render(&mut self, buffer: &Buffer) -> Result<()> {
        for (idx, line) in buffer.lines().iter().enumerate() {
            if self.show_folds {
                queue!(self.out, Print(fold_gutter(line.fold())))?;
            }
            let base = buffer.line_start(idx);
            let text = line.text();
            let mut run_start = 0;
            let mut run_style = line.style_at(0);
            for (pos, _) in text.char_indices().skip(1) {
                let style = buffer.style_at(base + pos);
                if style != run_style {
                    self.write_run(&text[run_start..pos], run_style)?;
                    run_start = pos;
                    run_style = style;
                }
            }
            self.write_run(&text[run_start..], run_style)?;
            queue!(self.out, Print("\n"))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn write_run(&mut self, text: &str, style: Style) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if style == Style::Default {
            queue!(self.out, Print(text))?;
        } else {
            queue!(
                self.out,
                SetForegroundColor(style.default_color().into()),
                Print(text),
                ResetColor
            )?;
        }
        Ok(())
    }

    /// Describe a match result, one line per highlighted range
    pub fn render_match(&mut self, buffer: &Buffer, result: &MatchResult) -> Result<()> {
        let status = if result.found { "matched" } else { "unmatched" };
        queue!(self.out, Print(format!("{}\n", status)))?;
        for range in result.highlights() {
            let line = buffer.line_of_offset(range.start);
            let col = buffer
                .line(line)
                .map_or(0, |l| l.byte_to_col(range.start - buffer.line_start(line)));
            let word = buffer.text_range(range.start, range.end);
            queue!(
                self.out,
                Print(format!("  {}:{} {}\n", line + 1, col + 1, word))
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

fn fold_gutter(fold: Option<FoldLevel>) -> String {
    match fold {
        Some(fold) => format!(
            "{:>3}{} ",
            fold.level - FOLD_LEVEL_BASE,
            if fold.header { '+' } else { ' ' }
        ),
        None => "     ".to_string(),
    }
}
