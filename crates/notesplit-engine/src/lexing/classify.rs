//! # Line Classification
//!
//! Maps one line of text to exactly one atomic [`TokenKind`] using an
//! ordered recognizer table: the first pattern that matches wins, so table
//! order encodes precedence for overlapping patterns. A completed to-do
//! (`- [x] ...`) is tested before the generic bullet pattern it would also
//! match; a table divider is tested before the row pattern that matches
//! every divider.
//!
//! Classification is purely a function of the line — no lookback, no
//! lookahead. Context-dependent exceptions (lines inside a fence) are the
//! assembler's job, not the classifier's.

use std::sync::OnceLock;

use regex::Regex;

use crate::tokens::TokenKind;

/// Recognizers in precedence order. A line matching none of these
/// classifies as `Text`.
const RECOGNIZERS: &[(TokenKind, &str)] = &[
    (TokenKind::EmptyLine, r"^\s*$"),
    (TokenKind::Header, r"^#+ .+"),
    (
        TokenKind::HorizontalRule,
        r"^\s*(?:(?:-\s*){3,}|(?:\*\s*){3,}|(?:_\s*){3,})$",
    ),
    (TokenKind::CodeFence, r"^(?:```|~~~)"),
    (TokenKind::MathFence, r"^\s*\$\$\s*$"),
    (TokenKind::Blockquote, r"^>+ .+"),
    (TokenKind::ToDo, r"^\s*- \[\s\] .+"),
    (TokenKind::Done, r"^\s*- \[[xX]\] .+"),
    (TokenKind::Footnote, r"^\[\^.+\]: .+"),
    (TokenKind::UnorderedListItem, r"^\s*[*+-] \S.*"),
    (TokenKind::NumberedListItem, r"^\s*\d+[.)]\s.*"),
    (TokenKind::LetteredListItem, r"^\s*[A-Za-z][.)]\s.*"),
    (TokenKind::TableDivider, r"^\|(?: +:?-+:? +\|)+$"),
    (TokenKind::TableRow, r"^\| .+ \|$"),
];

fn recognizers() -> &'static [(TokenKind, Regex)] {
    static COMPILED: OnceLock<Vec<(TokenKind, Regex)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        RECOGNIZERS
            .iter()
            .map(|(kind, pattern)| {
                (
                    *kind,
                    Regex::new(pattern).expect("recognizer pattern compiles"),
                )
            })
            .collect()
    })
}

/// Classifies individual lines into atomic token kinds.
pub struct LineClassifier;

impl LineClassifier {
    /// Returns the one atomic kind this line belongs to.
    ///
    /// The line terminator, if present, is ignored for matching.
    pub fn classify(&self, line: &str) -> TokenKind {
        let stripped = line.trim_end_matches(['\r', '\n']);
        for (kind, pattern) in recognizers() {
            if pattern.is_match(stripped) {
                return *kind;
            }
        }
        TokenKind::Text
    }
}

/// Whether `line` textually matches a closing code fence.
pub(crate) fn is_code_fence(line: &str) -> bool {
    fence_pattern(TokenKind::CodeFence).is_match(line.trim_end_matches(['\r', '\n']))
}

/// Whether `line` textually matches a closing math fence.
pub(crate) fn is_math_fence(line: &str) -> bool {
    fence_pattern(TokenKind::MathFence).is_match(line.trim_end_matches(['\r', '\n']))
}

fn fence_pattern(kind: TokenKind) -> &'static Regex {
    recognizers()
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, pattern)| pattern)
        .expect("fence kinds are in the recognizer table")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", TokenKind::EmptyLine)]
    #[case("   \t", TokenKind::EmptyLine)]
    #[case("# Title", TokenKind::Header)]
    #[case("### Sub title", TokenKind::Header)]
    #[case("#no space", TokenKind::Text)]
    #[case("---", TokenKind::HorizontalRule)]
    #[case("* * *", TokenKind::HorizontalRule)]
    #[case("___", TokenKind::HorizontalRule)]
    #[case("```rust", TokenKind::CodeFence)]
    #[case("~~~", TokenKind::CodeFence)]
    #[case("$$", TokenKind::MathFence)]
    #[case("> quoted", TokenKind::Blockquote)]
    #[case(">> nested quote", TokenKind::Blockquote)]
    #[case("- [ ] wash dishes", TokenKind::ToDo)]
    #[case("- [x] wash dishes", TokenKind::Done)]
    #[case("- [X] wash dishes", TokenKind::Done)]
    #[case("[^1]: a footnote", TokenKind::Footnote)]
    #[case("- plain bullet", TokenKind::UnorderedListItem)]
    #[case("+ plus bullet", TokenKind::UnorderedListItem)]
    #[case("  * indented bullet", TokenKind::UnorderedListItem)]
    #[case("1. first", TokenKind::NumberedListItem)]
    #[case("12) twelfth", TokenKind::NumberedListItem)]
    #[case("a. lettered", TokenKind::LetteredListItem)]
    #[case("B) lettered", TokenKind::LetteredListItem)]
    #[case("| a | b |", TokenKind::TableRow)]
    #[case("| --- | :-: |", TokenKind::TableDivider)]
    #[case("ordinary prose", TokenKind::Text)]
    #[case("  indented prose", TokenKind::Text)]
    fn classifies_lines(#[case] line: &str, #[case] expected: TokenKind) {
        assert_eq!(LineClassifier.classify(line), expected);
    }

    #[test]
    fn done_wins_over_bullet() {
        // Both patterns match; precedence decides.
        assert_eq!(LineClassifier.classify("- [x] shipped"), TokenKind::Done);
    }

    #[test]
    fn rule_wins_over_bullet() {
        assert_eq!(
            LineClassifier.classify("- - -"),
            TokenKind::HorizontalRule
        );
    }

    #[test]
    fn divider_wins_over_row() {
        assert_eq!(
            LineClassifier.classify("| --- | --- |"),
            TokenKind::TableDivider
        );
    }

    #[test]
    fn terminator_is_ignored() {
        assert_eq!(LineClassifier.classify("# Title\n"), TokenKind::Header);
        assert_eq!(LineClassifier.classify("\r\n"), TokenKind::EmptyLine);
    }

    #[test]
    fn classification_is_deterministic() {
        let line = "- [ ] same line";
        assert_eq!(
            LineClassifier.classify(line),
            LineClassifier.classify(line)
        );
    }

    #[test]
    fn fence_close_checks() {
        assert!(is_code_fence("```\n"));
        assert!(is_code_fence("~~~extra"));
        assert!(!is_code_fence("`` not a fence"));
        assert!(is_math_fence("$$\n"));
        assert!(!is_math_fence("$$ x^2 $$"));
    }
}
