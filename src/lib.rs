pub mod ast;
pub mod cli;
pub mod lexer;
pub mod parser;
pub mod printer;

pub use ast::{
    BinOp, Block, Condition, ConditionTerm, Expression, Factor, Operator, Program, Statement,
    Term, Token, TokenKind,
};
pub use lexer::{LexError, Lexer, Position};
pub use parser::{parse_chars, parse_program, Expected, ParseError, Parser, MAX_NESTING};
pub use printer::{to_source, to_tree};
