//! Block keyword matching
//!
//! Given a block keyword under the caret, find the keyword that closes (or
//! opens) the same block. Declaration blocks (`Function`, `State`, ...)
//! cannot nest, so the nearest counterpart wins. `If` and `While` blocks
//! nest, so same-kind blocks met on the way are skipped as a whole.
//!
//! Every search goes through the host's search register and is checked
//! against the style at the hit, so words inside strings and comments never
//! match. The register is restored before returning.

use std::ops::Range;

use crate::host::{Host, SearchDirection, SearchFlags, SearchGuard, SearchState};

use super::style::Style;

const BRANCH_WORDS: &[&str] = &["else", "elseif"];

/// Non-nesting declaration pairs: (openers, closers)
const DECLARATIONS: &[(&[&str], &[&str])] = &[
    (&["function"], &["endfunction", "native"]),
    (&["struct"], &["endstruct"]),
    (&["property"], &["endproperty", "auto", "autoreadonly"]),
    (&["group"], &["endgroup"]),
    (&["state"], &["endstate"]),
    (&["event"], &["endevent"]),
];

/// Nesting flow-control pairs: (opener, closer, branch words)
const FLOW_BLOCKS: &[(&str, &str, &[&str])] = &[
    ("if", "endif", BRANCH_WORDS),
    ("while", "endwhile", &[]),
];

/// What the caret word asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Construct {
    /// Nearest of `counterparts`, styled as a keyword
    Declaration {
        counterparts: &'static [&'static str],
        direction: SearchDirection,
    },
    /// Counterpart of a nesting block
    Flow(NestedBlock),
    /// `Else`/`ElseIf`: both ends of the enclosing `If`
    Branch,
}

impl Construct {
    fn for_word(word: &str) -> Option<Self> {
        for &(openers, closers) in DECLARATIONS {
            if openers.contains(&word) {
                return Some(Construct::Declaration {
                    counterparts: closers,
                    direction: SearchDirection::Forward,
                });
            }
            if closers.contains(&word) {
                return Some(Construct::Declaration {
                    counterparts: openers,
                    direction: SearchDirection::Backward,
                });
            }
        }
        for &(opener, closer, branches) in FLOW_BLOCKS {
            if word == opener {
                return Some(Construct::Flow(NestedBlock::forward(opener, closer, branches)));
            }
            if word == closer {
                return Some(Construct::Flow(NestedBlock::backward(opener, closer, branches)));
            }
        }
        BRANCH_WORDS.contains(&word).then_some(Construct::Branch)
    }

    fn style(&self) -> Style {
        match self {
            Construct::Declaration { .. } => Style::Keyword,
            Construct::Flow(_) | Construct::Branch => Style::FlowControl,
        }
    }
}

/// A nesting block seen from one end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NestedBlock {
    /// The word at the end we start from; meeting it again means nesting
    same: &'static str,
    /// The word at the other end
    counterpart: &'static str,
    direction: SearchDirection,
    /// Words reported between the two ends
    auxiliary: &'static [&'static str],
}

impl NestedBlock {
    fn forward(opener: &'static str, closer: &'static str, aux: &'static [&'static str]) -> Self {
        Self {
            same: opener,
            counterpart: closer,
            direction: SearchDirection::Forward,
            auxiliary: aux,
        }
    }

    fn backward(opener: &'static str, closer: &'static str, aux: &'static [&'static str]) -> Self {
        Self {
            same: closer,
            counterpart: opener,
            direction: SearchDirection::Backward,
            auxiliary: aux,
        }
    }

    fn without_auxiliary(self) -> Self {
        Self {
            auxiliary: &[],
            ..self
        }
    }
}

/// Outcome of a match request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    /// Every counterpart was found
    pub found: bool,
    /// The block keyword under the caret, if there was one
    pub keyword: Option<Range<usize>>,
    /// Matched keyword(s); two for `Else`/`ElseIf`
    pub counterparts: Vec<Range<usize>>,
    /// Branch words of the matched block, in document order
    pub auxiliary: Vec<Range<usize>>,
}

impl MatchResult {
    /// No block keyword at the caret
    pub fn none() -> Self {
        Self::default()
    }

    fn unmatched(keyword: Range<usize>) -> Self {
        Self {
            keyword: Some(keyword),
            ..Self::default()
        }
    }

    /// First counterpart
    pub fn range(&self) -> Option<Range<usize>> {
        self.counterparts.first().cloned()
    }

    /// Ranges to highlight: the caret word, branch words and, when found,
    /// the counterparts
    pub fn highlights(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = self.keyword.iter().cloned().collect();
        ranges.extend(self.auxiliary.iter().cloned());
        if self.found {
            ranges.extend(self.counterparts.iter().cloned());
        }
        ranges.sort_by_key(|r| (r.start, r.end));
        ranges.dedup();
        ranges
    }
}

/// Find the structural counterpart of the block keyword at `caret`
///
/// The host's search register is left as it was found.
pub fn match_keyword<H: Host + ?Sized>(host: &mut H, caret: usize) -> MatchResult {
    let mut guard = SearchGuard::new(host);
    let host = &mut *guard;

    let word = host.word_range_at(caret);
    if word.is_empty() {
        return MatchResult::none();
    }
    let text = host.text_range(word.start, word.end).to_lowercase();
    let Some(construct) = Construct::for_word(&text) else {
        return MatchResult::none();
    };
    if host.style_at(word.start) != construct.style() {
        return MatchResult::none();
    }

    match construct {
        Construct::Declaration {
            counterparts,
            direction,
        } => match_declaration(host, word, counterparts, direction),
        Construct::Flow(block) => {
            let from = block.direction.past(&word);
            match resolve_nested(host, &block, from) {
                Some((end, auxiliary)) => MatchResult {
                    found: true,
                    keyword: Some(word),
                    counterparts: vec![end],
                    auxiliary,
                },
                None => MatchResult::unmatched(word),
            }
        }
        Construct::Branch => match_branch(host, word),
    }
}

fn match_declaration<H: Host + ?Sized>(
    host: &mut H,
    word: Range<usize>,
    counterparts: &[&str],
    direction: SearchDirection,
) -> MatchResult {
    let from = direction.past(&word);
    let nearest = counterparts
        .iter()
        .filter_map(|c| find_styled(host, c, from, direction, Style::Keyword))
        .reduce(|best, hit| if direction.precedes(&hit, &best) { hit } else { best });

    match nearest {
        Some(hit) => MatchResult {
            found: true,
            keyword: Some(word),
            counterparts: vec![hit],
            auxiliary: Vec::new(),
        },
        None => MatchResult::unmatched(word),
    }
}

fn match_branch<H: Host + ?Sized>(host: &mut H, word: Range<usize>) -> MatchResult {
    let (opener, closer, branches) = FLOW_BLOCKS[0];
    let up = resolve_nested(host, &NestedBlock::backward(opener, closer, branches), word.start);
    let down = resolve_nested(host, &NestedBlock::forward(opener, closer, branches), word.end);

    let found = up.is_some() && down.is_some();
    let mut result = MatchResult::unmatched(word);
    for (end, auxiliary) in [up, down].into_iter().flatten() {
        result.counterparts.push(end);
        result.auxiliary.extend(auxiliary);
    }
    result.found = found;
    result.counterparts.sort_by_key(|r| r.start);
    result.auxiliary.sort_by_key(|r| r.start);
    result
}

/// Resolve the far end of a nesting block, starting at `from`
///
/// Returns the counterpart and the block's own auxiliary words. `None` when
/// the block, or any block nested inside it, is unterminated.
fn resolve_nested<H: Host + ?Sized>(
    host: &mut H,
    block: &NestedBlock,
    from: usize,
) -> Option<(Range<usize>, Vec<Range<usize>>)> {
    let direction = block.direction;
    let mut pos = from;
    let mut auxiliary = Vec::new();

    loop {
        let end = find_styled(host, block.counterpart, pos, direction, Style::FlowControl)?;
        let nested = find_styled(host, block.same, pos, direction, Style::FlowControl)
            .filter(|nested| direction.precedes(nested, &end));

        let Some(nested) = nested else {
            auxiliary.extend(collect_styled(host, block.auxiliary, direction.between(pos, &end)));
            auxiliary.sort_by_key(|r: &Range<usize>| r.start);
            return Some((end, auxiliary));
        };

        auxiliary.extend(collect_styled(host, block.auxiliary, direction.between(pos, &nested)));
        let inner = block.without_auxiliary();
        let (inner_end, _) = resolve_nested(host, &inner, direction.past(&nested))?;
        pos = direction.past(&inner_end);
    }
}

/// Nearest whole-word occurrence of `word` from `from` to the document edge
/// in `direction` whose style is `style`
fn find_styled<H: Host + ?Sized>(
    host: &mut H,
    word: &str,
    from: usize,
    direction: SearchDirection,
    style: Style,
) -> Option<Range<usize>> {
    let edge = match direction {
        SearchDirection::Forward => host.len(),
        SearchDirection::Backward => 0,
    };
    let mut from = from;

    loop {
        set_target(host, from, edge);
        let hit = host.search_in_target(word)?;
        if host.style_at(hit.start) == style {
            return Some(hit);
        }
        let past = direction.past(&hit);
        if past == from {
            return None;
        }
        from = past;
    }
}

/// Every styled occurrence of any of `words` inside `range`, in document order
fn collect_styled<H: Host + ?Sized>(
    host: &mut H,
    words: &[&str],
    range: Range<usize>,
) -> Vec<Range<usize>> {
    let mut hits = Vec::new();
    for word in words {
        let mut from = range.start;
        while from < range.end {
            set_target(host, from, range.end);
            let Some(hit) = host.search_in_target(word) else {
                break;
            };
            from = hit.end.max(from + 1);
            if host.style_at(hit.start) == Style::FlowControl {
                hits.push(hit);
            }
        }
    }
    hits.sort_by_key(|r| r.start);
    hits
}

fn set_target<H: Host + ?Sized>(host: &mut H, start: usize, end: usize) {
    host.set_search_state(SearchState {
        target_start: start,
        target_end: end,
        flags: SearchFlags {
            whole_word: true,
            match_case: false,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_for_word() {
        assert_eq!(
            Construct::for_word("native"),
            Some(Construct::Declaration {
                counterparts: &["function"],
                direction: SearchDirection::Backward,
            })
        );
        assert_eq!(
            Construct::for_word("endwhile"),
            Some(Construct::Flow(NestedBlock::backward("while", "endwhile", &[])))
        );
        assert_eq!(Construct::for_word("elseif"), Some(Construct::Branch));
        assert_eq!(Construct::for_word("return"), None);
        assert_eq!(Construct::Branch.style(), Style::FlowControl);
    }

    #[test]
    fn test_highlights_skip_counterparts_when_unmatched() {
        let result = MatchResult {
            found: false,
            keyword: Some(10..14),
            counterparts: vec![0..2],
            auxiliary: vec![5..9],
        };
        assert_eq!(result.highlights(), vec![5..9, 10..14]);

        let found = MatchResult {
            found: true,
            ..result
        };
        assert_eq!(found.highlights(), vec![0..2, 5..9, 10..14]);
        assert_eq!(found.range(), Some(0..2));
    }
}
