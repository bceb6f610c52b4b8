//! Built-in Papyrus word lists
//!
//! Used for any list the configuration leaves unset.

use super::words::{WordList, WordListKind, WordLists};

const OPERATORS: &str = "+ - * / % = < > ! & | ^ ( ) [ ] , . as is new";

const FLOW_CONTROL: &str = "if elseif else endif while endwhile return";

const TYPES: &str = "bool float int string var";

const KEYWORDS: &str = "auto autoreadonly betaonly collapsed collapsedonbase collapsedonref \
    conditional const customevent debugonly default endevent endfunction endgroup \
    endproperty endstate endstruct event extends false function global group hidden \
    import mandatory native none parent property scriptevent scriptname self state \
    struct true";

const KEYWORDS_ALT: &str = "length getstate gotostate onbeginstate onendstate oninit";

const FOLD_OPEN: &str = "if while function event state struct group";

const FOLD_MIDDLE: &str = "else elseif";

// `native` closes the fold a native `Function` header would otherwise open
const FOLD_CLOSE: &str = "endif endwhile endfunction endevent endstate endstruct endgroup native";

/// Default text of a list
pub fn default_list(kind: WordListKind) -> &'static str {
    match kind {
        WordListKind::Operators => OPERATORS,
        WordListKind::FlowControl => FLOW_CONTROL,
        WordListKind::Types => TYPES,
        WordListKind::Keywords => KEYWORDS,
        WordListKind::KeywordsAlt => KEYWORDS_ALT,
        WordListKind::FoldOpen => FOLD_OPEN,
        WordListKind::FoldMiddle => FOLD_MIDDLE,
        WordListKind::FoldClose => FOLD_CLOSE,
    }
}

/// Get all built-in lists
pub fn papyrus_word_lists() -> WordLists {
    let mut lists = WordLists::default();
    for kind in WordListKind::ALL {
        lists.set(kind, WordList::from_words(default_list(kind)));
    }
    lists
}
