use crate::ast::{Operator, Position, Token};
use std::mem;

/// Arithmetic expression: terms joined by `+` / `-`.
///
/// Chains fold to the left, so `a - b + c` is `(a - b) + c`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A single term with no additive operator
    Term(Term),

    /// Additive operation
    ///
    /// # Example
    /// ```text
    /// total + 1
    /// a - b + c
    /// ```
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Term,
    },
}

/// Factors joined by `*`, `/` or `%`. Binds tighter than [`Expression`].
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A single factor with no multiplicative operator
    Factor(Factor),

    /// Multiplicative operation
    ///
    /// # Example
    /// ```text
    /// width * height
    /// n % 2
    /// ```
    Binary {
        left: Box<Term>,
        op: Operator,
        right: Factor,
    },
}

/// Number literal or variable reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    /// A `Number` or `Identifier` token
    pub token: Token,
}

impl Expression {
    /// First term and the `(operator, term)` pairs that follow it, in source order.
    pub fn chain(&self) -> (&Term, Vec<(&Operator, &Term)>) {
        let mut rest = Vec::new();
        let mut node = self;
        let first = loop {
            match node {
                Expression::Term(term) => break term,
                Expression::Binary { left, op, right } => {
                    rest.push((op, right));
                    node = left.as_ref();
                }
            }
        };
        rest.reverse();
        (first, rest)
    }

    fn hollow() -> Self {
        Expression::Term(Term::Factor(Factor::hollow()))
    }
}

// Left-fold chains are as deep as they are long; unlink them in a loop.
impl Drop for Expression {
    fn drop(&mut self) {
        let Expression::Binary { left, .. } = self else {
            return;
        };
        let mut spine = mem::replace(left.as_mut(), Expression::hollow());
        loop {
            let next = match &mut spine {
                Expression::Binary { left, .. } => {
                    mem::replace(left.as_mut(), Expression::hollow())
                }
                Expression::Term(_) => break,
            };
            spine = next;
        }
    }
}

impl Term {
    /// First factor and the `(operator, factor)` pairs that follow it, in source order.
    pub fn chain(&self) -> (&Factor, Vec<(&Operator, &Factor)>) {
        let mut rest = Vec::new();
        let mut node = self;
        let first = loop {
            match node {
                Term::Factor(factor) => break factor,
                Term::Binary { left, op, right } => {
                    rest.push((op, right));
                    node = left.as_ref();
                }
            }
        };
        rest.reverse();
        (first, rest)
    }
}

impl Drop for Term {
    fn drop(&mut self) {
        let Term::Binary { left, .. } = self else {
            return;
        };
        let mut spine = mem::replace(left.as_mut(), Term::Factor(Factor::hollow()));
        loop {
            let next = match &mut spine {
                Term::Binary { left, .. } => {
                    mem::replace(left.as_mut(), Term::Factor(Factor::hollow()))
                }
                Term::Factor(_) => break,
            };
            spine = next;
        }
    }
}

impl Factor {
    /// Placeholder left behind while a chain is taken apart.
    pub(crate) fn hollow() -> Self {
        Factor {
            token: Token::end_of_input(Position::new(1, 1)),
        }
    }
}
