//! # Block Assembly
//!
//! Folds the flat atomic token sequence into compound blocks in one
//! left-to-right pass. The [`BlockAssembler`] is a state machine with two
//! pieces of open state:
//!
//! - a *run* slot for the at-most-one open blockquote run, table, or fenced
//!   block, and
//! - an explicit stack of open list builders, innermost last, for nested
//!   text lists.
//!
//! ## Fence opacity
//!
//! An open fence suspends classification entirely: every following token is
//! re-tagged as verbatim `Code`/`Math` from its raw line, whatever the lexer
//! thought it was, until a line textually matches a closing fence of the
//! same family. A fence still open at end of input folds to the last line —
//! graceful degradation, not an error.
//!
//! ## List nesting
//!
//! Items at one indentation level share a `TextList`; a deeper item opens a
//! nested list that folds back in as a single child when a later item
//! returns to an equal-or-lesser level. Item kind never partitions a list,
//! only level and run contiguity do.

use crate::error::EmptyInputError;
use crate::lexing::classify;
use crate::tokens::{Token, TokenKind};

/// Which family of fence is open: code (``` or ~~~) or math ($$).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceFamily {
    Code,
    Math,
}

/// The at-most-one open non-list run.
#[derive(Debug)]
enum RunState {
    None,
    Quote(Vec<Token>),
    Table(Vec<Token>),
    Fence {
        family: FenceFamily,
        children: Vec<Token>,
    },
}

/// One open list at one indentation level.
#[derive(Debug)]
struct ListBuilder {
    level: usize,
    children: Vec<Token>,
}

pub struct BlockAssembler {
    run: RunState,
    lists: Vec<ListBuilder>,
    out: Vec<Token>,
}

impl BlockAssembler {
    pub fn new() -> Self {
        Self {
            run: RunState::None,
            lists: Vec::new(),
            out: vec![],
        }
    }

    pub fn push(&mut self, token: Token) -> Result<(), EmptyInputError> {
        if matches!(self.run, RunState::Fence { .. }) {
            return self.consume_fenced_line(token);
        }

        match token.kind() {
            TokenKind::CodeFence => self.open_fence(FenceFamily::Code, token),
            TokenKind::MathFence => self.open_fence(FenceFamily::Math, token),
            TokenKind::Blockquote => {
                self.close_lists()?;
                match &mut self.run {
                    RunState::Quote(children) => children.push(token),
                    _ => {
                        self.flush_run()?;
                        self.run = RunState::Quote(vec![token]);
                    }
                }
                Ok(())
            }
            TokenKind::TableRow | TokenKind::TableDivider => {
                self.close_lists()?;
                match &mut self.run {
                    RunState::Table(children) => children.push(token),
                    _ => {
                        self.flush_run()?;
                        self.run = RunState::Table(vec![token]);
                    }
                }
                Ok(())
            }
            kind if TokenKind::TextListItem.matches(kind) => {
                self.flush_run()?;
                self.push_list_item(token)
            }
            // Header, HorizontalRule, Footnote, Text, EmptyLine pass
            // through unfolded and end every open run.
            _ => {
                self.flush_run()?;
                self.close_lists()?;
                self.out.push(token);
                Ok(())
            }
        }
    }

    /// Closes everything still open and returns the top-level sequence.
    pub fn finish(mut self) -> Result<Vec<Token>, EmptyInputError> {
        self.fold_fence()?;
        self.flush_run()?;
        self.close_lists()?;
        Ok(self.out)
    }

    fn open_fence(&mut self, family: FenceFamily, token: Token) -> Result<(), EmptyInputError> {
        self.flush_run()?;
        self.close_lists()?;
        self.run = RunState::Fence {
            family,
            children: vec![token],
        };
        Ok(())
    }

    /// Re-tags one raw line inside an open fence, closing the fence when
    /// the line matches the family's delimiter.
    fn consume_fenced_line(&mut self, token: Token) -> Result<(), EmptyInputError> {
        let line = token.into_content();
        let mut closed = false;
        if let RunState::Fence { family, children } = &mut self.run {
            let family = *family;
            closed = match family {
                FenceFamily::Code => classify::is_code_fence(&line),
                FenceFamily::Math => classify::is_math_fence(&line),
            };
            let retagged = match (family, closed) {
                (FenceFamily::Code, true) => Token::code_fence(line),
                (FenceFamily::Math, true) => Token::MathFence { content: line },
                (FenceFamily::Code, false) => Token::Code { content: line },
                (FenceFamily::Math, false) => Token::Math { content: line },
            };
            children.push(retagged);
        }
        if closed {
            self.fold_fence()?;
        }
        Ok(())
    }

    fn fold_fence(&mut self) -> Result<(), EmptyInputError> {
        if let RunState::Fence { family, children } =
            std::mem::replace(&mut self.run, RunState::None)
        {
            let block = match family {
                FenceFamily::Code => Token::code_block(children)?,
                FenceFamily::Math => Token::math_block(children)?,
            };
            self.out.push(block);
        }
        Ok(())
    }

    fn flush_run(&mut self) -> Result<(), EmptyInputError> {
        match std::mem::replace(&mut self.run, RunState::None) {
            RunState::None => {}
            RunState::Quote(children) => self.out.push(Token::blockquote_block(children)?),
            RunState::Table(children) => self.out.push(Token::table(children)?),
            // Only a matching delimiter or end of input closes a fence.
            fence @ RunState::Fence { .. } => self.run = fence,
        }
        Ok(())
    }

    fn push_list_item(&mut self, item: Token) -> Result<(), EmptyInputError> {
        let level = item.level().unwrap_or(0);

        // An item shallower than the open list closes it (and any deeper
        // lists), walking up until a list of equal-or-lesser level.
        while self.lists.last().is_some_and(|list| list.level > level) {
            self.fold_top_list()?;
        }

        match self.lists.last_mut() {
            Some(top) if top.level == level => top.children.push(item),
            _ => self.lists.push(ListBuilder {
                level,
                children: vec![item],
            }),
        }
        Ok(())
    }

    /// Closes the innermost open list, folding it into its parent list or
    /// the top-level output.
    fn fold_top_list(&mut self) -> Result<(), EmptyInputError> {
        if let Some(builder) = self.lists.pop() {
            let list = Token::text_list(builder.children)?;
            match self.lists.last_mut() {
                Some(parent) => parent.children.push(list),
                None => self.out.push(list),
            }
        }
        Ok(())
    }

    fn close_lists(&mut self) -> Result<(), EmptyInputError> {
        while !self.lists.is_empty() {
            self.fold_top_list()?;
        }
        Ok(())
    }
}

impl Default for BlockAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Folds eligible runs in the flat token sequence into compound tokens.
pub fn assemble(tokens: Vec<Token>) -> Result<Vec<Token>, EmptyInputError> {
    let mut assembler = BlockAssembler::new();
    for token in tokens {
        assembler.push(token)?;
    }
    assembler.finish()
}
