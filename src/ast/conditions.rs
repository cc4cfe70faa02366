use crate::ast::{BinOp, Expression, Factor, Operator, Position, Term, Token};
use std::mem;

/// Boolean condition guarding an `if` or `while`.
///
/// Comparisons joined by `&&` / `||`, folded to the left with no precedence between the
/// two logical operators: `a && b || c` is `(a && b) || c`.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// A single condition term
    Term(Box<ConditionTerm>),

    /// Logical operation
    ///
    /// # Example
    /// ```text
    /// a < b && c == d
    /// ```
    Logical {
        left: Box<Condition>,
        op: Operator,
        right: Box<ConditionTerm>,
    },
}

/// Operand of a logical operator.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionTerm {
    /// Parenthesised condition
    ///
    /// # Example
    /// ```text
    /// (a < b || b < c)
    /// ```
    Grouped(Box<Condition>),

    /// Comparison of two expressions
    ///
    /// # Example
    /// ```text
    /// count * 2 >= limit
    /// ```
    Comparison {
        left: Expression,
        op: Operator,
        right: Expression,
    },
}

impl From<ConditionTerm> for Condition {
    fn from(term: ConditionTerm) -> Self {
        Condition::Term(Box::new(term))
    }
}

impl Condition {
    /// First term and the `(operator, term)` pairs that follow it, in source order.
    pub fn chain(&self) -> (&ConditionTerm, Vec<(&Operator, &ConditionTerm)>) {
        let mut rest = Vec::new();
        let mut node = self;
        let first = loop {
            match node {
                Condition::Term(term) => break term.as_ref(),
                Condition::Logical { left, op, right } => {
                    rest.push((op, right.as_ref()));
                    node = left.as_ref();
                }
            }
        };
        rest.reverse();
        (first, rest)
    }

    fn hollow() -> Self {
        let operand = || Expression::Term(Term::Factor(Factor::hollow()));
        Condition::from(ConditionTerm::Comparison {
            left: operand(),
            op: Operator {
                op: BinOp::Equal,
                token: Token::end_of_input(Position::new(1, 1)),
            },
            right: operand(),
        })
    }
}

impl Drop for Condition {
    fn drop(&mut self) {
        let Condition::Logical { left, .. } = self else {
            return;
        };
        // Logical chains are as deep as they are long; unlink them in a loop.
        let mut spine = mem::replace(left.as_mut(), Condition::hollow());
        loop {
            let next = match &mut spine {
                Condition::Logical { left, .. } => {
                    mem::replace(left.as_mut(), Condition::hollow())
                }
                Condition::Term(_) => break,
            };
            spine = next;
        }
    }
}
