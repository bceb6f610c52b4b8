//! End-to-end lexer behaviour over an in-memory buffer

use std::fs;
use std::ops::Range;

use papyrus_lex::buffer::DEFAULT_WORD_CHARS;
use papyrus_lex::host::{SearchFlags, SearchState};
use papyrus_lex::syntax::{LineEndState, Profile, Style, FOLD_LEVEL_BASE};
use papyrus_lex::{Buffer, Config, DocumentLexer, Host, SettingChange};

fn load(text: &str) -> (DocumentLexer, Buffer) {
    load_with(Config::default(), text)
}

fn load_with(config: Config, text: &str) -> (DocumentLexer, Buffer) {
    let mut lexer = DocumentLexer::new(config);
    let mut buffer = Buffer::from_text("Test.psc", text);
    let last = buffer.line_count() - 1;
    lexer.restyle(&mut buffer, 0..=last, LineEndState::Default);
    (lexer, buffer)
}

fn word(buffer: &Buffer, needle: &str, nth: usize) -> Range<usize> {
    let start = buffer.find_nth(needle, nth).unwrap();
    start..start + needle.len()
}

#[test]
fn test_nested_if_matches_outer_endif() {
    let (mut lexer, mut buffer) = load("If a\n  If b\n    x = 1\n  EndIf\nEndIf\n");
    let outer_end = word(&buffer, "EndIf", 1);

    let result = lexer.match_at(&mut buffer, 0);
    assert!(result.found);
    assert_eq!(result.range(), Some(outer_end));
    assert!(result.auxiliary.is_empty());
}

#[test]
fn test_inner_endif_matches_inner_if() {
    let (mut lexer, mut buffer) = load("If a\n  If b\n    x = 1\n  EndIf\nEndIf\n");
    let inner_if = word(&buffer, "If", 1);
    let inner_end = word(&buffer, "EndIf", 0);

    let result = lexer.match_at(&mut buffer, inner_end.start + 2);
    assert!(result.found);
    assert_eq!(result.range(), Some(inner_if));
    assert_eq!(result.keyword, Some(inner_end));
}

#[test]
fn test_outer_endif_skips_nested_block() {
    let (mut lexer, mut buffer) = load("If a\n  If b\n  EndIf\nEndIf");
    let outer_end = word(&buffer, "EndIf", 1);
    let result = lexer.match_at(&mut buffer, outer_end.end);
    assert!(result.found);
    assert_eq!(result.range(), Some(0..2));
}

#[test]
fn test_while_and_string_text() {
    let (mut lexer, mut buffer) = load("While x\n  s = \"While\"\nEndWhile");
    let end = word(&buffer, "EndWhile", 0);

    let result = lexer.match_at(&mut buffer, 3);
    assert!(result.found);
    assert_eq!(result.range(), Some(end));

    let quoted = word(&buffer, "While", 1);
    assert_eq!(buffer.style_at(quoted.start), Style::String);
    let inside = lexer.match_at(&mut buffer, quoted.start + 1);
    assert!(!inside.found);
    assert!(inside.highlights().is_empty());
}

#[test]
fn test_comment_words_are_skipped() {
    let (mut lexer, mut buffer) = load("While x\n  ; EndWhile\nEndWhile");
    let end = word(&buffer, "EndWhile", 1);
    let result = lexer.match_at(&mut buffer, 0);
    assert_eq!(result.range(), Some(end));
}

#[test]
fn test_else_highlights_both_ends() {
    let (mut lexer, mut buffer) = load("If a\n  x = 1\nElse\n  x = 2\nEndIf");
    let if_word = word(&buffer, "If", 0);
    let else_word = word(&buffer, "Else", 0);
    let end = word(&buffer, "EndIf", 0);

    let result = lexer.match_at(&mut buffer, else_word.start);
    assert!(result.found);
    assert_eq!(result.highlights(), vec![if_word.clone(), else_word.clone(), end.clone()]);
    assert_eq!(buffer.indicator_ranges(8), &[if_word, else_word, end]);
}

#[test]
fn test_if_collects_branches_in_order() {
    let (mut lexer, mut buffer) = load("If a\nElseIf b\n  If c\n  Else\n  EndIf\nElse\nEndIf");
    let elseif = word(&buffer, "ElseIf", 0);
    let last_else = buffer.find("Else\nEndIf").unwrap();
    let outer_else = last_else..last_else + 4;

    let result = lexer.match_at(&mut buffer, 0);
    assert!(result.found);
    // the nested block's Else is not reported
    assert_eq!(result.auxiliary, vec![elseif, outer_else]);
    assert_eq!(result.range(), Some(word(&buffer, "EndIf", 1)));
}

#[test]
fn test_unterminated_if() {
    let (mut lexer, mut buffer) = load("If a\n  x = 1\nElse\n  x = 2\n");
    let result = lexer.match_at(&mut buffer, 0);
    assert!(!result.found);
    assert!(result.auxiliary.is_empty());
    assert_eq!(result.highlights(), vec![0..2]);
    assert_eq!(buffer.indicator_ranges(9), &[0..2]);
    assert!(buffer.indicator_ranges(8).is_empty());
}

#[test]
fn test_unterminated_nested_block_fails_outer() {
    let (mut lexer, mut buffer) = load("While a\n  While b\nEndWhile");
    let result = lexer.match_at(&mut buffer, 0);
    assert!(!result.found);
}

#[test]
fn test_declaration_pairs() {
    let text = "Function Foo()\n  If x\n  EndIf\nEndFunction\nFunction Bar() native\n\
                Int Property Gold Auto\nState Busy\nEndState";
    let (mut lexer, mut buffer) = load(text);

    let result = lexer.match_at(&mut buffer, 0);
    assert_eq!(result.range(), Some(word(&buffer, "EndFunction", 0)));

    let bar = word(&buffer, "Function", 2);
    let native = lexer.match_at(&mut buffer, bar.start);
    assert_eq!(native.range(), Some(word(&buffer, "native", 0)));

    let auto = word(&buffer, "Auto", 0);
    let property = lexer.match_at(&mut buffer, auto.start);
    assert_eq!(property.range(), Some(word(&buffer, "Property", 0)));

    let end_state = word(&buffer, "EndState", 0);
    let state = lexer.match_at(&mut buffer, end_state.start);
    assert_eq!(state.range(), Some(word(&buffer, "State", 0)));
}

#[test]
fn test_match_leaves_search_register_alone() {
    let (mut lexer, mut buffer) = load("If a\n  If b\nEndIf");
    let saved = SearchState {
        target_start: 7,
        target_end: 2,
        flags: SearchFlags {
            whole_word: false,
            match_case: true,
        },
    };
    buffer.set_search_state(saved);
    assert!(!lexer.match_at(&mut buffer, 0).found);
    assert_eq!(buffer.search_state(), saved);
}

#[test]
fn test_block_comment_over_three_lines() {
    let (mut lexer, mut buffer) = load(";/ If a\n While b\n/;\nIf c\nEndIf");
    for offset in 0..buffer.line_end(2) {
        assert_eq!(buffer.style_at(offset), Style::CommentMultiLine, "offset {}", offset);
    }
    let if_c = word(&buffer, "If c", 0).start;
    assert_eq!(buffer.style_at(if_c), Style::FlowControl);

    let levels = lexer.fold_lines(&mut buffer, 0..=4);
    assert!(levels[..3].iter().all(|l| !l.header && l.level == FOLD_LEVEL_BASE));
    assert!(levels[3].header);

    let result = lexer.match_at(&mut buffer, if_c);
    assert!(result.found);
}

#[test]
fn test_doc_comment_spans_lines() {
    let (_, buffer) = load("{ Adds two\n  numbers }\nInt x");
    assert_eq!(buffer.style_at(0), Style::CommentDoc);
    assert_eq!(buffer.style_at(12), Style::CommentDoc);
    assert_eq!(buffer.style_at(word(&buffer, "Int", 0).start), Style::Type);
}

#[test]
fn test_restyle_after_edit_reopens_comment() {
    let (mut lexer, mut buffer) = load("Int a\nInt b\nInt c");
    buffer.replace_line(0, ";/ Int a");
    let state = lexer.restyle_lines(&mut buffer, 0..=0);
    assert_eq!(state, LineEndState::CommentMultiLine);
    lexer.restyle_lines(&mut buffer, 1..=2);
    assert_eq!(buffer.style_at(buffer.line_start(2)), Style::CommentMultiLine);
}

#[test]
fn test_properties_track_edits() {
    let text = "ScriptName Test\n\nInt Property Health Auto\nHealth = 1";
    let (mut lexer, mut buffer) = load(text);
    let usage = buffer.line_start(3);
    assert_eq!(buffer.style_at(usage), Style::Property);
    assert_eq!(lexer.properties().record("health").map(|r| r.line), Some(2));

    let change = buffer.insert_lines(1, &["", "", ""]);
    lexer.on_content_changed(change);
    assert_eq!(lexer.properties().record("health").map(|r| r.line), Some(5));

    let change = buffer.delete_lines(5, 1);
    lexer.on_content_changed(change);
    assert!(lexer.properties().record("health").is_none());
    assert!(!lexer.properties().is_property("health"));

    let last = buffer.line_count() - 1;
    lexer.restyle(&mut buffer, 0..=last, LineEndState::Default);
    assert_eq!(buffer.style_at(buffer.line_start(5)), Style::Default);
}

#[test]
fn test_fold_levels() {
    let (lexer, mut buffer) = load("Function F()\n  If x\n    y = 1\n  EndIf\nEndFunction");
    let levels = lexer.fold_lines(&mut buffer, 0..=4);
    let shape: Vec<(i32, bool)> = levels
        .iter()
        .map(|l| (l.level - FOLD_LEVEL_BASE, l.header))
        .collect();
    assert_eq!(shape, vec![(0, true), (1, true), (2, false), (2, false), (1, false)]);
    assert_eq!(levels[4].next, FOLD_LEVEL_BASE);
}

#[test]
fn test_fold_middle_setting() {
    let (mut lexer, mut buffer) = load("If a\nElse\nEndIf");
    let plain = lexer.fold_lines(&mut buffer, 0..=2);
    assert!(!plain[1].header);

    lexer.apply(SettingChange::FoldMiddle(true)).unwrap();
    let middle = lexer.fold_lines(&mut buffer, 0..=2);
    assert!(middle[1].header);
    assert_eq!(middle[1].level, FOLD_LEVEL_BASE);
    assert_eq!(middle[1].next, FOLD_LEVEL_BASE + 1);
}

#[test]
fn test_class_names_style_and_navigate() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("Quest")).unwrap();
    fs::write(dir.path().join("Quest").join("Stage.psc"), "ScriptName Quest:Stage\n").unwrap();
    fs::write(dir.path().join("Actor.psc"), "ScriptName Actor\n").unwrap();

    let mut config = Config::default();
    config
        .profiles
        .push(Profile::new("sse", vec![dir.path().to_path_buf()]));
    config.select_profile("sse").unwrap();

    let (mut lexer, mut buffer) = load_with(config, "Quest:Stage s\nActor a\nWeapon w");
    assert_eq!(buffer.style_at(0), Style::Class);
    assert_eq!(buffer.style_at(word(&buffer, "Actor", 0).start), Style::Class);
    assert_eq!(buffer.style_at(word(&buffer, "Weapon", 0).start), Style::Default);
    assert_eq!(lexer.classes().cached("sse"), (2, 4));

    let path = lexer.resolve_class_link(&mut buffer, 8).unwrap();
    assert!(path.ends_with("Stage.psc"));
    assert_eq!(buffer.opened_files(), &[path]);
    assert_eq!(buffer.word_chars(), DEFAULT_WORD_CHARS);

    let weapon = word(&buffer, "Weapon", 0).start;
    assert!(lexer.resolve_class_link(&mut buffer, weapon).is_none());
    assert_eq!(buffer.opened_files().len(), 1);
}

#[test]
fn test_navigation_needs_profile() {
    let (mut lexer, mut buffer) = load("Actor a");
    assert!(lexer.resolve_class_link(&mut buffer, 0).is_none());
    assert!(buffer.opened_files().is_empty());
}

#[test]
fn test_config_file_drives_lexer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("papyrus-lex.toml");
    fs::write(&path, "keyword_matching = false\n[words]\ntypes = \"Actor\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    let (mut lexer, mut buffer) = load_with(config, "Actor a\nInt b\nIf x\nEndIf");
    assert_eq!(buffer.style_at(0), Style::Type);
    assert_eq!(buffer.style_at(buffer.line_start(1)), Style::Default);

    let if_x = buffer.line_start(2);
    assert!(!lexer.match_at(&mut buffer, if_x).found);
    assert!(buffer.indicator_ranges(9).is_empty());
}
