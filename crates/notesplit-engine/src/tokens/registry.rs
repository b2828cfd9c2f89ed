//! # Token Type Registry
//!
//! A statically declared catalog of every [`TokenKind`]: its human-readable
//! name and the attribute names a split predicate may constrain. The
//! display names are the lowercased, space-separated forms of the variant
//! identifiers ("unordered list item"), which is how a chosen split type is
//! persisted in settings and read back.
//!
//! The table is the single source of truth for configuration validation:
//! unknown names and unknown attributes are both caught here.

use crate::error::ConfigurationError;
use crate::tokens::TokenKind;

struct KindEntry {
    kind: TokenKind,
    name: &'static str,
    attrs: &'static [&'static str],
}

const LEVEL: &[&str] = &["level"];

const CATALOG: &[KindEntry] = &[
    KindEntry {
        kind: TokenKind::Text,
        name: "text",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::EmptyLine,
        name: "empty line",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::Header,
        name: "header",
        attrs: &["body", "level"],
    },
    KindEntry {
        kind: TokenKind::HorizontalRule,
        name: "horizontal rule",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::Blockquote,
        name: "blockquote",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::Footnote,
        name: "footnote",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::ToDo,
        name: "to do",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::Done,
        name: "done",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::UnorderedListItem,
        name: "unordered list item",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::NumberedListItem,
        name: "numbered list item",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::LetteredListItem,
        name: "lettered list item",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::TableRow,
        name: "table row",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::TableDivider,
        name: "table divider",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::CodeFence,
        name: "code fence",
        attrs: &["language"],
    },
    KindEntry {
        kind: TokenKind::Code,
        name: "code",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::MathFence,
        name: "math fence",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::Math,
        name: "math",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::BlockquoteBlock,
        name: "blockquote block",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::TextList,
        name: "text list",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::Table,
        name: "table",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::CodeBlock,
        name: "code block",
        attrs: &["language"],
    },
    KindEntry {
        kind: TokenKind::MathBlock,
        name: "math block",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::Section,
        name: "section",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::TextListItem,
        name: "text list item",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::OrderedListItem,
        name: "ordered list item",
        attrs: LEVEL,
    },
    KindEntry {
        kind: TokenKind::TablePart,
        name: "table part",
        attrs: &[],
    },
    KindEntry {
        kind: TokenKind::Fence,
        name: "fence",
        attrs: &[],
    },
];

fn entry(kind: TokenKind) -> &'static KindEntry {
    CATALOG
        .iter()
        .find(|e| e.kind == kind)
        .expect("every TokenKind is cataloged")
}

/// The human-readable name of a kind, e.g. `"unordered list item"`.
pub fn display_name(kind: TokenKind) -> &'static str {
    entry(kind).name
}

/// The inverse of [`display_name`], used when persisted settings are
/// reloaded.
pub fn kind_named(name: &str) -> Result<TokenKind, ConfigurationError> {
    CATALOG
        .iter()
        .find(|e| e.name == name)
        .map(|e| e.kind)
        .ok_or_else(|| ConfigurationError::UnknownKind {
            name: name.to_string(),
        })
}

/// The attribute names a split predicate may constrain for `kind`.
pub fn attribute_names(kind: TokenKind) -> &'static [&'static str] {
    entry(kind).attrs
}

/// All display names, in catalog order. Useful for settings UIs and error
/// messages.
pub fn all_names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|e| e.name)
}
