//! Document lexer
//!
//! This module provides the DocumentLexer that owns the per-document lexer
//! state (word lists, settings, tracked properties, class cache, last match)
//! and answers the host's restyle, fold, match and navigation requests.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::host::{ContentChange, Host, WordCharsGuard};

use super::classes::{ClassNameResolver, Profile};
use super::folding::{fold_line, FoldLevel, FOLD_LEVEL_BASE};
use super::matcher::{match_keyword, MatchResult};
use super::properties::PropertyTracker;
use super::style::{LineEndState, Style};
use super::styler::{style_line, StyleContext};
use super::tokens::tokenize;
use super::words::{WordList, WordListKind, WordLists};

/// A single setting changed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingChange {
    FoldMiddle(bool),
    ClassCache(bool),
    KeywordMatching(bool),
    MatchedIndicator(u32),
    UnmatchedIndicator(u32),
    ActiveProfile(Option<String>),
    Profiles(Vec<Profile>),
    /// Replace one word list; `None` restores the built-in list
    Words(WordListKind, Option<String>),
}

/// Work the host must redo after a setting change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    None,
    /// Styles (and therefore folds) are stale
    Restyle,
    /// Only fold levels are stale
    Refold,
    /// Only match highlights are stale
    Repaint,
}

/// Lexer state for one open document
#[derive(Debug)]
pub struct DocumentLexer {
    config: Config,
    words: WordLists,
    properties: PropertyTracker,
    classes: ClassNameResolver,
    last_match: Option<MatchResult>,
    /// Indicator the last match was painted with
    painted: Option<u32>,
}

impl DocumentLexer {
    pub fn new(config: Config) -> Self {
        let words = config.words.build();
        let classes = ClassNameResolver::new(config.class_cache);
        Self {
            config,
            words,
            properties: PropertyTracker::new(),
            classes,
            last_match: None,
            painted: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn words(&self) -> &WordLists {
        &self.words
    }

    pub fn properties(&self) -> &PropertyTracker {
        &self.properties
    }

    pub fn classes(&self) -> &ClassNameResolver {
        &self.classes
    }

    /// Result of the last `match_at`
    pub fn last_match(&self) -> Option<&MatchResult> {
        self.last_match.as_ref()
    }

    /// Style `lines`, starting from `incoming`, and return the state left
    /// after the last line
    pub fn restyle<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        lines: RangeInclusive<usize>,
        incoming: LineEndState,
    ) -> LineEndState {
        let last = (*lines.end()).min(host.line_count().saturating_sub(1));
        let first = *lines.start();
        log::debug!("restyle lines {}..={} from {:?}", first, last, incoming);

        let mut ctx = StyleContext {
            words: &self.words,
            properties: &mut self.properties,
            classes: &mut self.classes,
            profile: self.config.profile(),
        };
        let mut state = incoming;
        for line in first..=last {
            let start = host.line_start(line);
            let end = host.line_end(line);
            let text = host.text_range(start, end);
            let expected = end.saturating_sub(start);
            if text.len() < expected {
                log::warn!("short read on line {}: {} of {} bytes", line, text.len(), expected);
                host.set_style(start + text.len(), end, Style::Default);
            }

            let styled = style_line(&text, start, line, state, &mut ctx);
            for span in &styled.spans {
                host.set_style(span.start, span.end, span.style);
            }
            if line + 1 < host.line_count() {
                host.set_style(end, end + 1, styled.trailing);
            }
            state = styled.end_state;
        }
        state
    }

    /// Style `lines`, taking the incoming state from the line above
    pub fn restyle_lines<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        lines: RangeInclusive<usize>,
    ) -> LineEndState {
        let incoming = match lines.start().checked_sub(1) {
            Some(prev) => LineEndState::from_style(host.style_at(host.line_end(prev))),
            None => LineEndState::Default,
        };
        self.restyle(host, lines, incoming)
    }

    /// Compute fold levels for `lines`, starting from `incoming` (the level
    /// in effect for the first line)
    ///
    /// Styles must be current; comment and string words do not fold.
    pub fn fold<H: Host + ?Sized>(
        &self,
        host: &mut H,
        lines: RangeInclusive<usize>,
        incoming: i32,
    ) -> Vec<FoldLevel> {
        let last = (*lines.end()).min(host.line_count().saturating_sub(1));
        let first = *lines.start();
        log::debug!("fold lines {}..={} from level {:#x}", first, last, incoming);

        let mut levels = Vec::new();
        let mut previous = incoming;
        for line in first..=last {
            let start = host.line_start(line);
            let text = host.text_range(start, host.line_end(line));
            let tokens: Vec<_> = tokenize(&text, start)
                .into_iter()
                .map(|token| {
                    let style = host.style_at(token.start);
                    (token, style)
                })
                .collect();
            let level = fold_line(&tokens, previous, &self.words, self.config.fold_middle);
            host.set_fold_level(line, level);
            previous = level.next;
            levels.push(level);
        }
        levels
    }

    /// Fold `lines`, taking the incoming level from the line above
    pub fn fold_lines<H: Host + ?Sized>(
        &self,
        host: &mut H,
        lines: RangeInclusive<usize>,
    ) -> Vec<FoldLevel> {
        let incoming = match lines.start().checked_sub(1) {
            Some(prev) => host.fold_level(prev).map_or(FOLD_LEVEL_BASE, |f| f.next),
            None => FOLD_LEVEL_BASE,
        };
        self.fold(host, lines, incoming)
    }

    /// Keep tracked properties in step with an edit
    pub fn on_content_changed(&mut self, change: ContentChange) {
        log::debug!(
            "content changed at line {} ({:+} lines)",
            change.line,
            change.lines_added
        );
        self.properties.on_edit(change.line, change.lines_added);
    }

    /// Match the block keyword at `caret` and highlight the result
    ///
    /// Previous highlights are cleared over the whole document first.
    pub fn match_at<H: Host + ?Sized>(&mut self, host: &mut H, caret: usize) -> MatchResult {
        self.clear_highlights(host);
        if !self.config.keyword_matching {
            self.last_match = None;
            return MatchResult::none();
        }
        let result = match_keyword(host, caret);
        self.paint(host, &result);
        self.last_match = Some(result.clone());
        result
    }

    /// Redraw the last match with the current indicator settings
    pub fn repaint<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.clear_highlights(host);
        if !self.config.keyword_matching {
            return;
        }
        if let Some(result) = self.last_match.take() {
            self.paint(host, &result);
            self.last_match = Some(result);
        }
    }

    fn clear_highlights<H: Host + ?Sized>(&mut self, host: &mut H) {
        let len = host.len();
        let mut indicators = vec![self.config.matched_indicator, self.config.unmatched_indicator];
        indicators.extend(self.painted.take());
        indicators.sort_unstable();
        indicators.dedup();
        for indicator in indicators {
            host.clear_indicator(indicator, 0, len);
        }
    }

    fn paint<H: Host + ?Sized>(&mut self, host: &mut H, result: &MatchResult) {
        let indicator = if result.found {
            self.config.matched_indicator
        } else {
            self.config.unmatched_indicator
        };
        let ranges = result.highlights();
        if ranges.is_empty() {
            return;
        }
        for range in ranges {
            host.fill_indicator(indicator, range.start, range.end);
        }
        self.painted = Some(indicator);
    }

    /// Open the script named by the identifier at `offset`
    ///
    /// `:` counts as a word character while the name is read. Returns the
    /// opened path; does nothing without an active profile or a hit.
    pub fn resolve_class_link<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        offset: usize,
    ) -> Option<PathBuf> {
        let profile = self.config.profile()?;
        let mut host = WordCharsGuard::extend(host, ":");
        let word = host.word_range_at(offset);
        if word.is_empty() {
            return None;
        }
        let name = host.text_range(word.start, word.end);
        let path = self.classes.locate(&name, profile)?;
        log::debug!("navigating from {} to {}", name, path.display());
        host.open_file(&path);
        Some(path)
    }

    /// Apply a setting change, returning the work the host must redo
    pub fn apply(&mut self, change: SettingChange) -> Result<Refresh> {
        let refresh = match change {
            SettingChange::FoldMiddle(enabled) => {
                self.config.fold_middle = enabled;
                Refresh::Refold
            }
            SettingChange::ClassCache(enabled) => {
                self.config.class_cache = enabled;
                self.classes.set_caching(enabled);
                Refresh::None
            }
            SettingChange::KeywordMatching(enabled) => {
                self.config.keyword_matching = enabled;
                Refresh::Repaint
            }
            SettingChange::MatchedIndicator(indicator) => {
                self.config.matched_indicator = indicator;
                Refresh::Repaint
            }
            SettingChange::UnmatchedIndicator(indicator) => {
                self.config.unmatched_indicator = indicator;
                Refresh::Repaint
            }
            SettingChange::ActiveProfile(Some(name)) => {
                self.config.select_profile(&name)?;
                self.classes.clear();
                Refresh::Restyle
            }
            SettingChange::ActiveProfile(None) => {
                self.config.active_profile = None;
                self.classes.clear();
                Refresh::Restyle
            }
            SettingChange::Profiles(profiles) => {
                self.config.profiles = profiles;
                self.classes.clear();
                Refresh::Restyle
            }
            SettingChange::Words(kind, words) => self.set_words(kind, words),
        };
        log::debug!("setting changed, refresh: {:?}", refresh);
        Ok(refresh)
    }

    fn set_words(&mut self, kind: WordListKind, words: Option<String>) -> Refresh {
        let list = match &words {
            Some(words) => WordList::from_words(words),
            None => WordList::from_words(super::builtin::default_list(kind)),
        };
        let slot = match kind {
            WordListKind::Operators => &mut self.config.words.operators,
            WordListKind::FlowControl => &mut self.config.words.flow_control,
            WordListKind::Types => &mut self.config.words.types,
            WordListKind::Keywords => &mut self.config.words.keywords,
            WordListKind::KeywordsAlt => &mut self.config.words.keywords_alt,
            WordListKind::FoldOpen => &mut self.config.words.fold_open,
            WordListKind::FoldMiddle => &mut self.config.words.fold_middle,
            WordListKind::FoldClose => &mut self.config.words.fold_close,
        };
        *slot = words;
        self.words.set(kind, list);
        match kind {
            WordListKind::FoldOpen | WordListKind::FoldMiddle | WordListKind::FoldClose => {
                Refresh::Refold
            }
            _ => Refresh::Restyle,
        }
    }
}

impl Default for DocumentLexer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
