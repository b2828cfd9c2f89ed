//! # Lexing
//!
//! Turns a document into its flat sequence of atomic tokens, one per line.
//!
//! Lines are split *inclusively* on `\n`, so every token's `content` keeps
//! its terminator and the concatenation of all contents is the original
//! document, byte for byte. Nothing is normalized or trimmed; blank lines
//! become `EmptyLine` tokens in place.

pub mod classify;
pub mod indent;

pub use classify::LineClassifier;

use crate::tokens::Token;

/// Converts raw text to the flat atomic token sequence.
///
/// An empty document yields an empty sequence. Order and line count are
/// preserved exactly, including leading and trailing blank lines.
pub fn tokenize(text: &str) -> Vec<Token> {
    let classifier = LineClassifier;
    text.split_inclusive('\n')
        .map(|line| {
            let kind = classifier.classify(line);
            Token::from_classified(kind, line.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use pretty_assertions::assert_eq;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).iter().map(Token::kind).collect()
    }

    #[test]
    fn one_token_per_line() {
        assert_eq!(
            kinds("# A\n\ntext\n"),
            vec![TokenKind::Header, TokenKind::EmptyLine, TokenKind::Text]
        );
    }

    #[test]
    fn empty_document_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn blank_lines_are_preserved() {
        assert_eq!(
            kinds("\n\n\n"),
            vec![
                TokenKind::EmptyLine,
                TokenKind::EmptyLine,
                TokenKind::EmptyLine
            ]
        );
    }

    #[test]
    fn last_line_without_terminator_is_kept() {
        let tokens = tokenize("a\nb");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].content(), Some("b"));
    }

    #[test]
    fn contents_concatenate_to_the_source() {
        let text = "# A\r\n\r\n- item\n\ttabbed\nlast";
        let rendered: String = tokenize(text)
            .iter()
            .filter_map(Token::content)
            .collect();
        assert_eq!(rendered, text);
    }

    #[test]
    fn fence_interior_is_not_contextualized_here() {
        // The lexer has no fence mode; a header-looking line after a fence
        // still classifies as a header. The assembler re-tags it.
        assert_eq!(
            kinds("```\n# not a header\n```\n"),
            vec![TokenKind::CodeFence, TokenKind::Header, TokenKind::CodeFence]
        );
    }
}
