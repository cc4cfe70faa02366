use crate::ast::{Token, TokenKind};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Arithmetic
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Modulo (`%`)
    Modulo,

    // Logical
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,
}

impl BinOp {
    /// Operator named by `token`, if the token's kind and lexeme agree.
    ///
    /// The lone `=` and `!` lex as comparison operators but have no operator here.
    pub fn from_token(token: &Token) -> Option<BinOp> {
        let op = match (token.kind, token.lexeme.as_str()) {
            (TokenKind::ComparisonOp, "==") => BinOp::Equal,
            (TokenKind::ComparisonOp, "!=") => BinOp::NotEqual,
            (TokenKind::ComparisonOp, "<") => BinOp::LessThan,
            (TokenKind::ComparisonOp, ">") => BinOp::GreaterThan,
            (TokenKind::ComparisonOp, "<=") => BinOp::LessEqual,
            (TokenKind::ComparisonOp, ">=") => BinOp::GreaterEqual,
            (TokenKind::AdditiveOp, "+") => BinOp::Add,
            (TokenKind::AdditiveOp, "-") => BinOp::Subtract,
            (TokenKind::MultiplicativeOp, "*") => BinOp::Multiply,
            (TokenKind::MultiplicativeOp, "/") => BinOp::Divide,
            (TokenKind::MultiplicativeOp, "%") => BinOp::Modulo,
            (TokenKind::LogicalOp, "&&") => BinOp::And,
            (TokenKind::LogicalOp, "||") => BinOp::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::LessThan => "<",
            BinOp::GreaterThan => ">",
            BinOp::LessEqual => "<=",
            BinOp::GreaterEqual => ">=",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Modulo => "%",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}
