//! # Token Model
//!
//! A single closed sum type, [`Token`], covers every kind of line and block
//! the engine knows about.
//!
//! *Atomic* variants own exactly one source line in `content` — terminator
//! included, when the source has one. *Compound* variants own an ordered,
//! never-empty sequence of child tokens. Rendering is concatenation all the
//! way down, which is what makes the round-trip byte-exact.
//!
//! Per-kind attributes (`level`, `body`, `language`) are derived once at
//! construction from the terminator-stripped view of the line and are
//! immutable afterwards. Compound tokens inherit their attributes from their
//! first child.

pub mod registry;

use crate::error::EmptyInputError;
use crate::lexing::indent::indentation_level;

/// A typed piece of a note: one source line, or an ordered run of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A line matching no other pattern. The classifier's fallback.
    Text { content: String, level: usize },
    /// A line that is empty or whitespace-only.
    EmptyLine { content: String },
    /// A header line. `body` is the title without the leading `#`s and
    /// whitespace; `level` is the count of leading `#`s.
    Header {
        content: String,
        body: String,
        level: usize,
    },
    HorizontalRule { content: String },
    /// A `> quote` line.
    Blockquote { content: String, level: usize },
    /// A footnote definition line (`[^name]: ...`).
    Footnote { content: String },
    /// An unfinished to-do item (`- [ ] ...`).
    ToDo { content: String, level: usize },
    /// A completed to-do item (`- [x] ...`).
    Done { content: String, level: usize },
    UnorderedListItem { content: String, level: usize },
    NumberedListItem { content: String, level: usize },
    LetteredListItem { content: String, level: usize },
    TableRow { content: String },
    TableDivider { content: String },
    /// A code block delimiter. `language` is the text after the backticks
    /// or tildes, trimmed; empty when absent.
    CodeFence { content: String, language: String },
    /// A verbatim line inside a code block.
    Code { content: String },
    /// A math block delimiter (`$$`).
    MathFence { content: String },
    /// A verbatim line inside a math block.
    Math { content: String },

    /// Consecutive blockquote lines.
    BlockquoteBlock { children: Vec<Token>, level: usize },
    /// A list run at one indentation level; deeper sublists nest as single
    /// `TextList` children.
    TextList { children: Vec<Token>, level: usize },
    /// Consecutive table rows and dividers.
    Table { children: Vec<Token> },
    /// Opening fence, verbatim body, and (when present) closing fence.
    CodeBlock { children: Vec<Token>, language: String },
    MathBlock { children: Vec<Token> },
    /// A contiguous slice of the document produced by the splitter.
    /// Sections never nest other sections.
    Section { children: Vec<Token> },
}

/// The tag of a [`Token`] variant, plus the abstract categories that may be
/// chosen as split targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,
    EmptyLine,
    Header,
    HorizontalRule,
    Blockquote,
    Footnote,
    ToDo,
    Done,
    UnorderedListItem,
    NumberedListItem,
    LetteredListItem,
    TableRow,
    TableDivider,
    CodeFence,
    Code,
    MathFence,
    Math,
    BlockquoteBlock,
    TextList,
    Table,
    CodeBlock,
    MathBlock,
    Section,
    /// Category: any of the five list-item kinds.
    TextListItem,
    /// Category: numbered or lettered list items.
    OrderedListItem,
    /// Category: table rows and dividers.
    TablePart,
    /// Category: code or math fences.
    Fence,
}

impl TokenKind {
    /// Whether a token of concrete kind `kind` counts as this kind.
    ///
    /// Concrete kinds match only themselves; category kinds match each of
    /// their member kinds.
    pub fn matches(self, kind: TokenKind) -> bool {
        if self == kind {
            return true;
        }
        match self {
            TokenKind::TextListItem => matches!(
                kind,
                TokenKind::ToDo
                    | TokenKind::Done
                    | TokenKind::UnorderedListItem
                    | TokenKind::NumberedListItem
                    | TokenKind::LetteredListItem
            ),
            TokenKind::OrderedListItem => matches!(
                kind,
                TokenKind::NumberedListItem | TokenKind::LetteredListItem
            ),
            TokenKind::TablePart => {
                matches!(kind, TokenKind::TableRow | TokenKind::TableDivider)
            }
            TokenKind::Fence => matches!(kind, TokenKind::CodeFence | TokenKind::MathFence),
            _ => false,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(registry::display_name(*self))
    }
}

/// The value of one token attribute, as used in split predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Int(i64),
    Str(String),
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

impl Token {
    /// Builds the atomic token for a line the classifier assigned `kind`.
    ///
    /// The classifier only ever produces pattern-backed atomic kinds; any
    /// other kind falls back to `Text`, the same fallback the classifier
    /// itself uses.
    pub fn from_classified(kind: TokenKind, line: String) -> Token {
        match kind {
            TokenKind::Text => Token::text(line),
            TokenKind::EmptyLine => Token::EmptyLine { content: line },
            TokenKind::Header => Token::header(line),
            TokenKind::HorizontalRule => Token::HorizontalRule { content: line },
            TokenKind::Blockquote => {
                let level = indentation_level(&line);
                Token::Blockquote {
                    content: line,
                    level,
                }
            }
            TokenKind::Footnote => Token::Footnote { content: line },
            TokenKind::ToDo => {
                let level = indentation_level(&line);
                Token::ToDo {
                    content: line,
                    level,
                }
            }
            TokenKind::Done => {
                let level = indentation_level(&line);
                Token::Done {
                    content: line,
                    level,
                }
            }
            TokenKind::UnorderedListItem => {
                let level = indentation_level(&line);
                Token::UnorderedListItem {
                    content: line,
                    level,
                }
            }
            TokenKind::NumberedListItem => {
                let level = indentation_level(&line);
                Token::NumberedListItem {
                    content: line,
                    level,
                }
            }
            TokenKind::LetteredListItem => {
                let level = indentation_level(&line);
                Token::LetteredListItem {
                    content: line,
                    level,
                }
            }
            TokenKind::TableRow => Token::TableRow { content: line },
            TokenKind::TableDivider => Token::TableDivider { content: line },
            TokenKind::CodeFence => Token::code_fence(line),
            TokenKind::Code => Token::Code { content: line },
            TokenKind::MathFence => Token::MathFence { content: line },
            TokenKind::Math => Token::Math { content: line },
            _ => Token::text(line),
        }
    }

    pub fn text(line: String) -> Token {
        let level = indentation_level(&line);
        Token::Text {
            content: line,
            level,
        }
    }

    pub fn header(line: String) -> Token {
        let stripped = strip_terminator(&line);
        let after_marks = stripped.trim_start_matches('#');
        let level = stripped.len() - after_marks.len();
        let body = after_marks.trim_start().to_string();
        Token::Header {
            content: line,
            body,
            level,
        }
    }

    pub fn code_fence(line: String) -> Token {
        let language = strip_terminator(&line)
            .trim_start_matches(['`', '~'])
            .trim()
            .to_string();
        Token::CodeFence {
            content: line,
            language,
        }
    }

    /// Folds consecutive blockquote lines into one block. The block's level
    /// is the first child's level.
    pub fn blockquote_block(children: Vec<Token>) -> Result<Token, EmptyInputError> {
        let level = first_child_level(&children, TokenKind::BlockquoteBlock)?;
        Ok(Token::BlockquoteBlock { children, level })
    }

    /// Folds a run of list items (and nested sublists) into one list at the
    /// first child's level.
    pub fn text_list(children: Vec<Token>) -> Result<Token, EmptyInputError> {
        let level = first_child_level(&children, TokenKind::TextList)?;
        Ok(Token::TextList { children, level })
    }

    pub fn table(children: Vec<Token>) -> Result<Token, EmptyInputError> {
        require_children(&children, TokenKind::Table)?;
        Ok(Token::Table { children })
    }

    /// Folds a fenced code run. The block's language comes from the opening
    /// fence.
    pub fn code_block(children: Vec<Token>) -> Result<Token, EmptyInputError> {
        require_children(&children, TokenKind::CodeBlock)?;
        let language = match &children[0] {
            Token::CodeFence { language, .. } => language.clone(),
            _ => String::new(),
        };
        Ok(Token::CodeBlock { children, language })
    }

    pub fn math_block(children: Vec<Token>) -> Result<Token, EmptyInputError> {
        require_children(&children, TokenKind::MathBlock)?;
        Ok(Token::MathBlock { children })
    }

    pub fn section(children: Vec<Token>) -> Result<Token, EmptyInputError> {
        require_children(&children, TokenKind::Section)?;
        Ok(Token::Section { children })
    }

    /// The concrete kind of this token. Never a category kind.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Text { .. } => TokenKind::Text,
            Token::EmptyLine { .. } => TokenKind::EmptyLine,
            Token::Header { .. } => TokenKind::Header,
            Token::HorizontalRule { .. } => TokenKind::HorizontalRule,
            Token::Blockquote { .. } => TokenKind::Blockquote,
            Token::Footnote { .. } => TokenKind::Footnote,
            Token::ToDo { .. } => TokenKind::ToDo,
            Token::Done { .. } => TokenKind::Done,
            Token::UnorderedListItem { .. } => TokenKind::UnorderedListItem,
            Token::NumberedListItem { .. } => TokenKind::NumberedListItem,
            Token::LetteredListItem { .. } => TokenKind::LetteredListItem,
            Token::TableRow { .. } => TokenKind::TableRow,
            Token::TableDivider { .. } => TokenKind::TableDivider,
            Token::CodeFence { .. } => TokenKind::CodeFence,
            Token::Code { .. } => TokenKind::Code,
            Token::MathFence { .. } => TokenKind::MathFence,
            Token::Math { .. } => TokenKind::Math,
            Token::BlockquoteBlock { .. } => TokenKind::BlockquoteBlock,
            Token::TextList { .. } => TokenKind::TextList,
            Token::Table { .. } => TokenKind::Table,
            Token::CodeBlock { .. } => TokenKind::CodeBlock,
            Token::MathBlock { .. } => TokenKind::MathBlock,
            Token::Section { .. } => TokenKind::Section,
        }
    }

    /// The source line of an atomic token, terminator included.
    pub fn content(&self) -> Option<&str> {
        match self {
            Token::Text { content, .. }
            | Token::EmptyLine { content }
            | Token::Header { content, .. }
            | Token::HorizontalRule { content }
            | Token::Blockquote { content, .. }
            | Token::Footnote { content }
            | Token::ToDo { content, .. }
            | Token::Done { content, .. }
            | Token::UnorderedListItem { content, .. }
            | Token::NumberedListItem { content, .. }
            | Token::LetteredListItem { content, .. }
            | Token::TableRow { content }
            | Token::TableDivider { content }
            | Token::CodeFence { content, .. }
            | Token::Code { content }
            | Token::MathFence { content }
            | Token::Math { content } => Some(content),
            _ => None,
        }
    }

    /// The ordered children of a compound token.
    pub fn children(&self) -> Option<&[Token]> {
        match self {
            Token::BlockquoteBlock { children, .. }
            | Token::TextList { children, .. }
            | Token::Table { children }
            | Token::CodeBlock { children, .. }
            | Token::MathBlock { children }
            | Token::Section { children } => Some(children),
            _ => None,
        }
    }

    pub fn level(&self) -> Option<usize> {
        match self {
            Token::Text { level, .. }
            | Token::Header { level, .. }
            | Token::Blockquote { level, .. }
            | Token::ToDo { level, .. }
            | Token::Done { level, .. }
            | Token::UnorderedListItem { level, .. }
            | Token::NumberedListItem { level, .. }
            | Token::LetteredListItem { level, .. }
            | Token::BlockquoteBlock { level, .. }
            | Token::TextList { level, .. } => Some(*level),
            _ => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            Token::CodeFence { language, .. } | Token::CodeBlock { language, .. } => {
                Some(language)
            }
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Token::Header { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Looks up an attribute by its registry name.
    pub fn attr(&self, name: &str) -> Option<AttrValue> {
        match name {
            "level" => self.level().map(|l| AttrValue::Int(l as i64)),
            "language" => self.language().map(|l| AttrValue::Str(l.to_string())),
            "body" => self.body().map(|b| AttrValue::Str(b.to_string())),
            _ => None,
        }
    }

    /// Writes this token's raw text into `out`.
    pub fn render_into(&self, out: &mut String) {
        if let Some(content) = self.content() {
            out.push_str(content);
        } else if let Some(children) = self.children() {
            for child in children {
                child.render_into(out);
            }
        }
    }

    /// This token's raw text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    /// Consumes an atomic token, returning its raw line. Used when the
    /// assembler re-tags lines inside a fence.
    pub(crate) fn into_content(self) -> String {
        match self {
            Token::Text { content, .. }
            | Token::EmptyLine { content }
            | Token::Header { content, .. }
            | Token::HorizontalRule { content }
            | Token::Blockquote { content, .. }
            | Token::Footnote { content }
            | Token::ToDo { content, .. }
            | Token::Done { content, .. }
            | Token::UnorderedListItem { content, .. }
            | Token::NumberedListItem { content, .. }
            | Token::LetteredListItem { content, .. }
            | Token::TableRow { content }
            | Token::TableDivider { content }
            | Token::CodeFence { content, .. }
            | Token::Code { content }
            | Token::MathFence { content }
            | Token::Math { content } => content,
            other => other.render(),
        }
    }
}

fn require_children(children: &[Token], kind: TokenKind) -> Result<(), EmptyInputError> {
    if children.is_empty() {
        return Err(EmptyInputError { kind });
    }
    Ok(())
}

fn first_child_level(children: &[Token], kind: TokenKind) -> Result<usize, EmptyInputError> {
    require_children(children, kind)?;
    Ok(children[0].level().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_attributes() {
        let token = Token::header("### Deep title\n".to_string());
        assert_eq!(token.level(), Some(3));
        assert_eq!(token.body(), Some("Deep title"));
        assert_eq!(token.render(), "### Deep title\n");
    }

    #[test]
    fn code_fence_language() {
        let token = Token::code_fence("```rust\n".to_string());
        assert_eq!(token.language(), Some("rust"));

        let bare = Token::code_fence("~~~\n".to_string());
        assert_eq!(bare.language(), Some(""));
    }

    #[test]
    fn code_block_inherits_language() {
        let block = Token::code_block(vec![
            Token::code_fence("```python\n".to_string()),
            Token::Code {
                content: "x = 1\n".to_string(),
            },
            Token::code_fence("```\n".to_string()),
        ])
        .unwrap();
        assert_eq!(block.language(), Some("python"));
    }

    #[test]
    fn compound_with_no_children_is_rejected() {
        let err = Token::text_list(vec![]).unwrap_err();
        assert_eq!(err.kind, TokenKind::TextList);
        assert!(Token::section(vec![]).is_err());
    }

    #[test]
    fn text_list_inherits_first_child_level() {
        let list = Token::text_list(vec![Token::from_classified(
            TokenKind::UnorderedListItem,
            "  - indented\n".to_string(),
        )])
        .unwrap();
        assert_eq!(list.level(), Some(2));
    }

    #[test]
    fn category_kinds_match_members() {
        assert!(TokenKind::TextListItem.matches(TokenKind::Done));
        assert!(TokenKind::OrderedListItem.matches(TokenKind::LetteredListItem));
        assert!(!TokenKind::OrderedListItem.matches(TokenKind::UnorderedListItem));
        assert!(TokenKind::Fence.matches(TokenKind::MathFence));
        assert!(TokenKind::Header.matches(TokenKind::Header));
        assert!(!TokenKind::Header.matches(TokenKind::Text));
    }

    #[test]
    fn attr_lookup_by_name() {
        let token = Token::header("## A\n".to_string());
        assert_eq!(token.attr("level"), Some(AttrValue::Int(2)));
        assert_eq!(token.attr("body"), Some(AttrValue::Str("A".to_string())));
        assert_eq!(token.attr("language"), None);
    }

    #[test]
    fn render_is_concatenation_of_children() {
        let block = Token::blockquote_block(vec![
            Token::from_classified(TokenKind::Blockquote, "> one\n".to_string()),
            Token::from_classified(TokenKind::Blockquote, "> two".to_string()),
        ])
        .unwrap();
        assert_eq!(block.render(), "> one\n> two");
    }
}
