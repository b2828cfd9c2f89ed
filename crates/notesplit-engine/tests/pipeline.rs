//! End-to-end properties of the tokenize → assemble → split pipeline.

use notesplit_engine::{
    AttrValue, SplitConfig, Token, TokenKind, assemble::assemble, lexing::tokenize, render,
    split_note,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn assembled(text: &str) -> Vec<Token> {
    assemble(tokenize(text)).unwrap()
}

#[rstest]
#[case::empty("")]
#[case::only_blank_lines("\n\n\n")]
#[case::no_trailing_terminator("# A\nbody")]
#[case::trailing_terminator("# A\nbody\n")]
#[case::crlf_terminators("# A\r\nbody\r\n")]
#[case::deep_lists("- a\n  - b\n    - c\n- d\n")]
#[case::unterminated_fence("```\nnever closed\n")]
#[case::mixed_note(
    "# Title\n\nintro text\n\n## Tasks\n- [ ] open\n- [x] closed\n  1. sub\n\n## Data\n| a | b |\n| --- | --- |\n| 1 | 2 |\n\n```py\n# comment\n```\n\n$$\nx^2\n$$\n\n> quote\n> more\n\n[^1]: footnote\n---\nlast line"
)]
fn round_trip_is_byte_exact(#[case] text: &str) {
    assert_eq!(render(&assembled(text)), text);
}

#[test]
fn rendering_then_retokenizing_is_structurally_stable() {
    let text = "## A\n- one\n  - two\n\n```\nraw # line\n```\n## B\ntail\n";
    let first = assembled(text);
    let second = assembled(&render(&first));
    assert_eq!(first, second);
}

#[test]
fn sections_retokenize_to_equal_structure() {
    let config = SplitConfig::new(
        TokenKind::Header,
        [("level".to_string(), AttrValue::Int(2))],
    )
    .unwrap();
    let text = "# Intro\npre\n## A\n- item\n  - sub\n## B\n```\ncode\n```\n";
    let outcome = split_note(text, &config).unwrap();

    for section in &outcome.sections {
        let rendered = section.render();
        let reparsed = assembled(&rendered);
        assert_eq!(reparsed, section.children().unwrap());
    }
}

#[test]
fn preamble_and_sections_partition_the_document() {
    let config = SplitConfig::for_kind(TokenKind::Header);
    let text = "loose line\n# A\na\n# B\nb\n";
    let outcome = split_note(text, &config).unwrap();

    let mut reassembled = render(&outcome.preamble);
    for section in &outcome.sections {
        reassembled.push_str(&section.render());
    }
    assert_eq!(reassembled, text);
}

#[test]
fn fence_opacity_survives_the_whole_pipeline() {
    let config = SplitConfig::for_kind(TokenKind::Header);
    let outcome = split_note("# real\n```\n# fake\n```\n", &config).unwrap();
    assert_eq!(outcome.sections.len(), 1);
}

#[test]
fn list_nesting_depth_matches_indentation_runs() {
    let tokens = assembled("1. a\n2. b\n  - c\n  - d\n    a) e\n3. f\n");
    assert_eq!(tokens.len(), 1);

    let top = tokens[0].children().unwrap();
    assert_eq!(top.len(), 4);
    let mid = top[2].children().unwrap();
    assert_eq!(mid.len(), 3);
    let deep = mid[2].children().unwrap();
    assert_eq!(deep.len(), 1);
    assert_eq!(deep[0].kind(), TokenKind::LetteredListItem);
}

#[test]
fn splitting_by_to_do_items_inside_lists_finds_nothing() {
    // Items fold into lists, so the item kind never appears top-level.
    let config = SplitConfig::for_kind(TokenKind::ToDo);
    let text = "- [ ] a\n- [ ] b\n";
    let outcome = split_note(text, &config).unwrap();
    assert!(outcome.sections.is_empty());
    assert_eq!(render(&outcome.preamble), text);
}
