use thiserror::Error;

use crate::tokens::TokenKind;

/// A split configuration the engine cannot act on. Surfaced before any
/// splitting happens; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A persisted split-type name that matches nothing in the registry.
    #[error("unknown token kind name: {name:?}")]
    UnknownKind { name: String },

    /// A split predicate naming an attribute the chosen kind does not carry.
    #[error("token kind \"{kind}\" has no attribute named {attr:?}")]
    UnknownAttribute { kind: TokenKind, attr: String },
}

/// An attempt to construct a compound token with zero children. Well-formed
/// assembly never produces this; it is an internal invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot build a \"{kind}\" token with no children")]
pub struct EmptyInputError {
    pub kind: TokenKind,
}
