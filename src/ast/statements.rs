use crate::ast::{Condition, Expression, Token};

/// Root of a parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub block: Block,
}

/// Statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Variable declaration
    ///
    /// # Example
    /// ```text
    /// var total
    /// ```
    Declaration { name: Token },

    /// Assignment of an expression to a variable
    ///
    /// # Example
    /// ```text
    /// total into total + 1
    /// ```
    Assignment { name: Token, value: Expression },

    /// Conditional block
    ///
    /// # Example
    /// ```text
    /// if a < b { print a }
    /// ```
    If { condition: Condition, body: Block },

    /// Loop
    ///
    /// # Example
    /// ```text
    /// while i < 10 { i into i + 1 }
    /// ```
    While { condition: Condition, body: Block },

    /// Print the value of an expression
    ///
    /// # Example
    /// ```text
    /// print total
    /// ```
    Print(Expression),
}
