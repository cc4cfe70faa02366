//! Text renderings of a parsed [`Program`].
//!
//! Two formats are provided:
//!
//! - **Tree** via [`to_tree()`] - an indented outline of every node, for debugging
//! - **Source** via [`to_source()`] - canonical program text that parses back to the
//!   same tree
//!
//! # Examples
//!
//! ```
//! use into_lang::parse_program;
//! use into_lang::printer::{to_source, to_tree};
//!
//! let program = parse_program("var x x into 1 + 2").unwrap();
//!
//! assert_eq!(to_source(&program), "var x;\nx into 1 + 2;\n");
//! assert!(to_tree(&program).contains("Expression: +"));
//! ```

use crate::ast::{
    Block, Condition, ConditionTerm, Expression, Factor, Program, Statement, Term,
};

pub struct TreePrinter {
    output: String,
}

/// A node still waiting to be written by [`TreePrinter`].
enum Node<'a> {
    Block(&'a Block),
    Statement(&'a Statement),
    Condition(&'a Condition),
    ConditionTerm(&'a ConditionTerm),
    Expression(&'a Expression),
    Term(&'a Term),
    Factor(&'a Factor),
}

impl TreePrinter {
    pub fn new() -> Self {
        TreePrinter {
            output: String::new(),
        }
    }

    /// Walks the tree with an explicit stack, so operator chains of any length print
    /// without recursion.
    pub fn print(mut self, program: &Program) -> String {
        self.line(0, "Program");
        let mut pending = vec![(Node::Block(&program.block), 1)];
        while let Some((node, indent)) = pending.pop() {
            let children = self.visit(node, indent);
            pending.extend(children.into_iter().rev().map(|child| (child, indent + 1)));
        }
        self.output
    }

    fn line(&mut self, indent: usize, label: &str) {
        self.output.push_str(&"  ".repeat(indent));
        self.output.push_str(label);
        self.output.push('\n');
    }

    /// Writes the label of `node` and returns its children in print order.
    fn visit<'a>(&mut self, node: Node<'a>, indent: usize) -> Vec<Node<'a>> {
        match node {
            Node::Block(block) => {
                self.line(indent, "Block");
                block.statements.iter().map(Node::Statement).collect()
            }
            Node::Statement(statement) => self.visit_statement(statement, indent),
            Node::Condition(Condition::Term(term)) => {
                self.line(indent, "Condition");
                vec![Node::ConditionTerm(term)]
            }
            Node::Condition(Condition::Logical { left, op, right }) => {
                self.line(indent, &format!("Condition: {}", op.op.symbol()));
                vec![Node::Condition(left), Node::ConditionTerm(right)]
            }
            Node::ConditionTerm(ConditionTerm::Grouped(inner)) => {
                self.line(indent, "Grouped");
                vec![Node::Condition(inner)]
            }
            Node::ConditionTerm(ConditionTerm::Comparison { left, op, right }) => {
                self.line(indent, &format!("Comparison: {}", op.op.symbol()));
                vec![Node::Expression(left), Node::Expression(right)]
            }
            Node::Expression(Expression::Term(term)) => {
                self.line(indent, "Expression");
                vec![Node::Term(term)]
            }
            Node::Expression(Expression::Binary { left, op, right }) => {
                self.line(indent, &format!("Expression: {}", op.op.symbol()));
                vec![Node::Expression(left), Node::Term(right)]
            }
            Node::Term(Term::Factor(factor)) => {
                self.line(indent, "Term");
                vec![Node::Factor(factor)]
            }
            Node::Term(Term::Binary { left, op, right }) => {
                self.line(indent, &format!("Term: {}", op.op.symbol()));
                vec![Node::Term(left), Node::Factor(right)]
            }
            Node::Factor(factor) => {
                self.line(indent, &format!("Factor: {}", factor.token.lexeme));
                Vec::new()
            }
        }
    }

    fn visit_statement<'a>(&mut self, statement: &'a Statement, indent: usize) -> Vec<Node<'a>> {
        match statement {
            Statement::Declaration { name } => {
                self.line(indent, &format!("Declaration: {}", name.lexeme));
                Vec::new()
            }
            Statement::Assignment { name, value } => {
                self.line(indent, &format!("Assignment: {}", name.lexeme));
                vec![Node::Expression(value)]
            }
            Statement::If { condition, body } => {
                self.line(indent, "If statement");
                vec![Node::Condition(condition), Node::Block(body)]
            }
            Statement::While { condition, body } => {
                self.line(indent, "While statement");
                vec![Node::Condition(condition), Node::Block(body)]
            }
            Statement::Print(value) => {
                self.line(indent, "Print statement");
                vec![Node::Expression(value)]
            }
        }
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes programs back out as source text.
pub struct SourcePrinter {
    indent_width: usize,
}

impl SourcePrinter {
    pub fn new(indent_width: usize) -> Self {
        SourcePrinter { indent_width }
    }

    pub fn print(&self, program: &Program) -> String {
        self.print_block(&program.block, 0)
    }

    fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_width * level)
    }

    fn print_block(&self, block: &Block, level: usize) -> String {
        block
            .statements
            .iter()
            .map(|s| format!("{}{}\n", self.indent(level), self.print_statement(s, level)))
            .collect()
    }

    fn print_statement(&self, statement: &Statement, level: usize) -> String {
        match statement {
            Statement::Declaration { name } => format!("var {};", name.lexeme),
            Statement::Assignment { name, value } => {
                format!("{} into {};", name.lexeme, self.print_expression(value))
            }
            Statement::If { condition, body } => {
                format!("if {}", self.print_braced(condition, body, level))
            }
            Statement::While { condition, body } => {
                format!("while {}", self.print_braced(condition, body, level))
            }
            Statement::Print(value) => format!("print {};", self.print_expression(value)),
        }
    }

    fn print_braced(&self, condition: &Condition, body: &Block, level: usize) -> String {
        if body.is_empty() {
            return format!("{} {{}}", self.print_condition(condition));
        }
        format!(
            "{} {{\n{}{}}}",
            self.print_condition(condition),
            self.print_block(body, level + 1),
            self.indent(level)
        )
    }

    fn print_condition(&self, condition: &Condition) -> String {
        let (first, rest) = condition.chain();
        let mut text = self.print_condition_term(first);
        for (op, term) in rest {
            text.push_str(&format!(" {} {}", op.op.symbol(), self.print_condition_term(term)));
        }
        text
    }

    fn print_condition_term(&self, term: &ConditionTerm) -> String {
        match term {
            ConditionTerm::Grouped(inner) => format!("({})", self.print_condition(inner)),
            ConditionTerm::Comparison { left, op, right } => format!(
                "{} {} {}",
                self.print_expression(left),
                op.op.symbol(),
                self.print_expression(right)
            ),
        }
    }

    fn print_expression(&self, expression: &Expression) -> String {
        let (first, rest) = expression.chain();
        let mut text = self.print_term(first);
        for (op, term) in rest {
            text.push_str(&format!(" {} {}", op.op.symbol(), self.print_term(term)));
        }
        text
    }

    fn print_term(&self, term: &Term) -> String {
        let (first, rest) = term.chain();
        let mut text = first.token.lexeme.clone();
        for (op, factor) in rest {
            text.push_str(&format!(" {} {}", op.op.symbol(), factor.token.lexeme));
        }
        text
    }
}

/// Renders the tree as an indented outline, two spaces per level.
///
/// Every node and every token lexeme appears, so two programs with equal outlines have
/// the same shape.
pub fn to_tree(program: &Program) -> String {
    TreePrinter::new().print(program)
}

/// Renders canonical source: one statement per line ending in `;`, bodies indented by
/// four spaces.
pub fn to_source(program: &Program) -> String {
    SourcePrinter::new(4).print(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_program;

    #[test]
    fn test_tree_outline() {
        let program = parse_program("var x\nx into 5").unwrap();
        let expected = "\
Program
  Block
    Declaration: x
    Assignment: x
      Expression
        Term
          Factor: 5
";
        assert_eq!(to_tree(&program), expected);
    }

    #[test]
    fn test_source_nested_blocks() {
        let program =
            parse_program("while i < 3 { if (i == 1 || i == 2) { print i } i into i + 1 }")
                .unwrap();
        let expected = "\
while i < 3 {
    if (i == 1 || i == 2) {
        print i;
    }
    i into i + 1;
}
";
        assert_eq!(to_source(&program), expected);
    }

    #[test]
    fn test_source_empty_body() {
        let program = parse_program("if a > b {}").unwrap();
        assert_eq!(to_source(&program), "if a > b {}\n");
    }
}
