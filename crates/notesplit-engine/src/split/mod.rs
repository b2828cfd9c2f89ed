//! # Section Splitting
//!
//! Cuts the assembled top-level token sequence into `Section`s anchored at
//! tokens matching a [`SplitConfig`]: a target kind (possibly an abstract
//! category) plus an attribute predicate.
//!
//! Splitting is a single pure pass. A token starts a new section when its
//! concrete kind matches the target and every configured attribute equals
//! the token's value; the section then accumulates everything up to the
//! next split point. Tokens before the first split point are returned as a
//! separate preamble, not wrapped in a section — callers decide what to do
//! with it. Only the top-level sequence is inspected: a split-type token
//! buried inside a compound block is never a split point.

use crate::error::{ConfigurationError, EmptyInputError};
use crate::tokens::{AttrValue, Token, TokenKind, registry};

/// A validated split criterion: which tokens start a new section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    kind: TokenKind,
    attrs: Vec<(String, AttrValue)>,
}

impl SplitConfig {
    /// Builds a criterion for `kind` with no attribute constraints: any
    /// instance of the kind is a split point.
    pub fn for_kind(kind: TokenKind) -> Self {
        Self {
            kind,
            attrs: Vec::new(),
        }
    }

    /// Builds a criterion with attribute constraints, validating each
    /// attribute name against the registry's catalog for `kind`.
    ///
    /// String values that are all digits are coerced to integers, so a
    /// predicate loaded from settings as `{"level": "2"}` behaves like
    /// `{"level": 2}`.
    pub fn new(
        kind: TokenKind,
        attrs: impl IntoIterator<Item = (String, AttrValue)>,
    ) -> Result<Self, ConfigurationError> {
        let known = registry::attribute_names(kind);
        let mut validated = Vec::new();
        for (name, value) in attrs {
            if !known.contains(&name.as_str()) {
                return Err(ConfigurationError::UnknownAttribute { kind, attr: name });
            }
            validated.push((name, coerce_numeric(value)));
        }
        Ok(Self {
            kind,
            attrs: validated,
        })
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Whether `token` is a split point under this criterion.
    pub fn matches(&self, token: &Token) -> bool {
        if !self.kind.matches(token.kind()) {
            return false;
        }
        self.attrs
            .iter()
            .all(|(name, value)| token.attr(name).as_ref() == Some(value))
    }
}

fn coerce_numeric(value: AttrValue) -> AttrValue {
    match value {
        AttrValue::Str(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            match s.parse() {
                Ok(n) => AttrValue::Int(n),
                Err(_) => AttrValue::Str(s),
            }
        }
        other => other,
    }
}

/// The result of splitting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOutcome {
    /// Tokens before the first split point, in order. The whole document
    /// when nothing matched.
    pub preamble: Vec<Token>,
    /// The sections, in document order. Each is a `Token::Section` whose
    /// first child is a split point.
    pub sections: Vec<Token>,
}

/// Splits an assembled top-level token sequence into sections.
///
/// Zero matches is not an error: the outcome then has no sections and the
/// entire input as preamble.
pub fn split(tokens: Vec<Token>, config: &SplitConfig) -> Result<SplitOutcome, EmptyInputError> {
    let mut preamble = Vec::new();
    let mut open_sections: Vec<Vec<Token>> = Vec::new();

    for token in tokens {
        if config.matches(&token) {
            open_sections.push(vec![token]);
        } else if let Some(current) = open_sections.last_mut() {
            current.push(token);
        } else {
            preamble.push(token);
        }
    }

    let sections = open_sections
        .into_iter()
        .map(Token::section)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SplitOutcome { preamble, sections })
}
