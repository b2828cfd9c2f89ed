//! # notesplit-engine
//!
//! Lossless tokenizing, block assembly, and section splitting for
//! markdown-like notes.
//!
//! The pipeline has three single-pass stages:
//!
//! 1. **Lexing** (`lexing`): the document is split into lines, each line is
//!    classified into exactly one atomic [`Token`] by an ordered recognizer
//!    table.
//! 2. **Assembly** (`assemble`): runs of related atomic tokens are folded
//!    into compound tokens — blockquote runs, tables, fenced code/math
//!    blocks, and nested text lists.
//! 3. **Splitting** (`split`): the assembled top-level sequence is cut into
//!    [`Token::Section`]s anchored at tokens matching a [`SplitConfig`].
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input lands in exactly one atomic token's `content`,
//! line terminators included. Rendering any token sequence concatenates
//! those contents back, so the round-trip is byte-exact for every input,
//! with or without a trailing newline:
//!
//! ```
//! use notesplit_engine::{assemble::assemble, lexing::tokenize, render};
//!
//! let text = "# Title\n\n- item\n  - subitem";
//! let tokens = assemble(tokenize(text)).unwrap();
//! assert_eq!(render(&tokens), text);
//! ```

pub mod assemble;
pub mod error;
pub mod lexing;
pub mod split;
pub mod tokens;

pub use error::{ConfigurationError, EmptyInputError};
pub use split::{SplitConfig, SplitOutcome};
pub use tokens::{AttrValue, Token, TokenKind, registry};

/// Renders a token sequence back to its raw text.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.render_into(&mut out);
    }
    out
}

/// Runs the full pipeline on one document: tokenize, assemble, split.
pub fn split_note(text: &str, config: &SplitConfig) -> Result<SplitOutcome, EmptyInputError> {
    let tokens = lexing::tokenize(text);
    let assembled = assemble::assemble(tokens)?;
    split::split(assembled, config)
}
