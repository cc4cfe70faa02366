//! AST -> JSON conversion utilities

use crate::ast::{
    Block, Condition, ConditionTerm, Expression, Factor, Operator, Program, Statement, Term,
    Token,
};
use serde_json::{json, Value};

/// Convert a token to a JSON object with its kind, text and position
pub fn token_to_json(token: &Token) -> Value {
    json!({
        "kind": token.kind.name(),
        "lexeme": token.lexeme,
        "line": token.position.line,
        "column": token.position.column,
    })
}

/// Convert a parsed program to a JSON tree
pub fn program_to_json(program: &Program) -> Value {
    json!({
        "type": "Program",
        "block": block_to_json(&program.block),
    })
}

fn block_to_json(block: &Block) -> Value {
    json!({
        "type": "Block",
        "statements": block.statements.iter().map(statement_to_json).collect::<Vec<_>>(),
    })
}

fn statement_to_json(statement: &Statement) -> Value {
    match statement {
        Statement::Declaration { name } => json!({
            "type": "Declaration",
            "name": token_to_json(name),
        }),
        Statement::Assignment { name, value } => json!({
            "type": "Assignment",
            "name": token_to_json(name),
            "value": expression_to_json(value),
        }),
        Statement::If { condition, body } => json!({
            "type": "If",
            "condition": condition_to_json(condition),
            "body": block_to_json(body),
        }),
        Statement::While { condition, body } => json!({
            "type": "While",
            "condition": condition_to_json(condition),
            "body": block_to_json(body),
        }),
        Statement::Print(value) => json!({
            "type": "Print",
            "value": expression_to_json(value),
        }),
    }
}

fn operator_to_json(op: &Operator) -> Value {
    json!({
        "symbol": op.op.symbol(),
        "line": op.token.position.line,
        "column": op.token.position.column,
    })
}

/// Operator chains come out flat: `operators[i]` sits between `operands[i]` and
/// `operands[i + 1]`. A chain with a single operand collapses to that operand.
fn chain_to_json<'a, T: 'a>(
    first: &'a T,
    rest: Vec<(&'a Operator, &'a T)>,
    kind: &str,
    operand_to_json: impl Fn(&'a T) -> Value,
) -> Value {
    if rest.is_empty() {
        return operand_to_json(first);
    }
    let mut operands = vec![operand_to_json(first)];
    let mut operators = Vec::with_capacity(rest.len());
    for (op, operand) in rest {
        operators.push(operator_to_json(op));
        operands.push(operand_to_json(operand));
    }
    json!({
        "type": kind,
        "operators": operators,
        "operands": operands,
    })
}

fn condition_to_json(condition: &Condition) -> Value {
    let (first, rest) = condition.chain();
    chain_to_json(first, rest, "Condition", condition_term_to_json)
}

fn condition_term_to_json(term: &ConditionTerm) -> Value {
    match term {
        ConditionTerm::Grouped(inner) => json!({
            "type": "Grouped",
            "condition": condition_to_json(inner),
        }),
        ConditionTerm::Comparison { left, op, right } => json!({
            "type": "Comparison",
            "operator": operator_to_json(op),
            "left": expression_to_json(left),
            "right": expression_to_json(right),
        }),
    }
}

fn expression_to_json(expression: &Expression) -> Value {
    let (first, rest) = expression.chain();
    chain_to_json(first, rest, "Expression", term_to_json)
}

fn term_to_json(term: &Term) -> Value {
    let (first, rest) = term.chain();
    chain_to_json(first, rest, "Term", factor_to_json)
}

fn factor_to_json(factor: &Factor) -> Value {
    json!({
        "type": "Factor",
        "token": token_to_json(&factor.token),
    })
}
