//! # Abstract Syntax Tree
//!
//! This module defines the tokens and tree nodes of the language: a tiny imperative
//! language with variable declarations, assignment, `if`, `while` and `print`.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Typed binary operators and the [`Operator`] node payload
//! - **[expressions]** - Arithmetic: [`Expression`], [`Term`], [`Factor`]
//! - **[conditions]** - Boolean guards: [`Condition`], [`ConditionTerm`]
//! - **[statements]** - [`Statement`], [`Block`] and the [`Program`] root
//!
//! ## Quick Start
//!
//! ```text
//! var i; i into 0;
//! while i < 10 {
//!     print i * 2;
//!     i into i + 1;
//! }
//! ```
//!
//! ## Ownership
//!
//! Every node owns its children through `Box` or `Vec`. There are no shared or parent
//! references, so dropping the [`Program`] drops the whole tree. Operator chains are
//! unlinked in a loop when dropped, and walked with [`Expression::chain`],
//! [`Term::chain`] and [`Condition::chain`], so their length never reaches the stack.
//!
//! ## Precedence
//!
//! From loosest to tightest: `&&`/`||`, comparisons, `+`/`-`, `*`/`/`/`%`. Each binary
//! level folds to the left: `1 - 2 - 3` is `(1 - 2) - 3`.
pub mod conditions;
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod tokens;

pub use conditions::{Condition, ConditionTerm};
pub use expressions::{Expression, Factor, Term};
pub use operators::BinOp;
pub use statements::{Block, Program, Statement};
pub use tokens::{Position, Token, TokenKind};

/// Operator of a binary node: the typed operator and the token it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub op: BinOp,
    pub token: Token,
}
