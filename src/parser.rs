use crate::{
    ast::{
        BinOp, Block, Condition, ConditionTerm, Expression, Factor, Operator, Program, Statement,
        Term, Token, TokenKind,
    },
    lexer::{LexError, Lexer, Position},
};
use std::{fmt, mem};
use thiserror::Error;

/// Deepest combined nesting of braced blocks and parenthesised conditions.
///
/// Each level costs a few stack frames in the parser, the printers and the drop of the
/// tree, so input nested past this depth is rejected with
/// [`ParseError::NestingTooDeep`] instead of exhausting the stack.
pub const MAX_NESTING: usize = 64;

/// What the parser was looking for when it gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Kind(TokenKind),
    Keyword(&'static str),
    Symbol(&'static str),
    /// Number or identifier
    Operand,
    /// `(` or the start of a comparison
    ConditionTerm,
    ComparisonOperator,
    Statement,
    /// Inside `{ ... }`: another statement or the closing brace
    StatementOrClose,
    /// At top level: another statement or the end of the input
    StatementOrEnd,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{}", kind),
            Expected::Keyword(word) => write!(f, "keyword `{}`", word),
            Expected::Symbol(symbol) => write!(f, "`{}`", symbol),
            Expected::Operand => write!(f, "number or identifier"),
            Expected::ConditionTerm => write!(f, "`(` or a comparison"),
            Expected::ComparisonOperator => {
                write!(f, "comparison operator (==, !=, <, >, <=, >=)")
            }
            Expected::Statement => write!(f, "statement"),
            Expected::StatementOrClose => write!(f, "statement or `}}`"),
            Expected::StatementOrEnd => write!(f, "statement or end of input"),
        }
    }
}

/// Diagnostic for a failed parse. The first problem found ends the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("syntax error at {}: expected {expected}, found {found}", .found.position)]
    UnexpectedToken { expected: Expected, found: Token },

    #[error("syntax error at {position}: expected {expected}, found end of input")]
    UnexpectedEof { expected: Expected, position: Position },

    #[error(
        "syntax error at {}: missing operand after `{}`, found {found}",
        .found.position,
        .operator.lexeme
    )]
    MissingOperand { operator: Token, found: Token },

    #[error("syntax error at {position}: nesting deeper than {limit} levels")]
    NestingTooDeep { position: Position, limit: usize },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::UnexpectedToken { found, .. } => found.position,
            ParseError::UnexpectedEof { position, .. } => *position,
            ParseError::MissingOperand { found, .. } => found.position,
            ParseError::NestingTooDeep { position, .. } => *position,
        }
    }
}

type Result<T> = std::result::Result<T, ParseError>;

/// Recursive-descent parser with a single token of lookahead.
pub struct Parser<I: Iterator<Item = char>> {
    lexer: Lexer<I>,
    current_token: Token,
    depth: usize,
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn new(mut lexer: Lexer<I>) -> Result<Self> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            depth: 0,
        })
    }

    /// Moves to the next token and hands back the one just consumed.
    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current_token, next))
    }

    fn check_kind(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    fn check_symbol(&self, symbol: &str) -> bool {
        self.current_token.is_symbol(symbol)
    }

    fn expect_kind(&mut self, kind: TokenKind) -> Result<Token> {
        if !self.check_kind(kind) {
            return Err(self.unexpected(Expected::Kind(kind)));
        }
        self.advance()
    }

    fn expect_keyword(&mut self, word: &'static str) -> Result<Token> {
        if !self.current_token.is_keyword(word) {
            return Err(self.unexpected(Expected::Keyword(word)));
        }
        self.advance()
    }

    fn expect_symbol(&mut self, symbol: &'static str) -> Result<Token> {
        if !self.check_symbol(symbol) {
            return Err(self.unexpected(Expected::Symbol(symbol)));
        }
        self.advance()
    }

    /// Error for the current token not being `expected`.
    ///
    /// A stray invalid character is reported as such rather than as a grammar mismatch.
    fn unexpected(&self, expected: Expected) -> ParseError {
        let found = &self.current_token;
        match found.kind {
            TokenKind::Invalid => invalid_character(found),
            TokenKind::EndOfInput => ParseError::UnexpectedEof {
                expected,
                position: found.position,
            },
            _ => ParseError::UnexpectedToken {
                expected,
                found: found.clone(),
            },
        }
    }

    fn starts_statement(&self) -> bool {
        match self.current_token.kind {
            TokenKind::Identifier => true,
            TokenKind::Keyword => matches!(
                self.current_token.lexeme.as_str(),
                "var" | "if" | "while" | "print"
            ),
            _ => false,
        }
    }

    fn starts_operand(&self) -> bool {
        matches!(
            self.current_token.kind,
            TokenKind::Number | TokenKind::Identifier
        )
    }

    /// After a binary operator the right-hand side has to begin here.
    fn require_operand(&self, operator: &Token, present: bool) -> Result<()> {
        if present {
            return Ok(());
        }
        let found = &self.current_token;
        if found.kind == TokenKind::Invalid {
            return Err(invalid_character(found));
        }
        Err(ParseError::MissingOperand {
            operator: operator.clone(),
            found: found.clone(),
        })
    }

    /// Runs `production` one nesting level deeper, starting at the current token.
    fn nested<T>(&mut self, production: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                position: self.current_token.position,
                limit: MAX_NESTING,
            });
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    /// Consumes the current token if it is a `kind` operator the grammar knows.
    fn take_operator(&mut self, kind: TokenKind) -> Result<Option<Operator>> {
        if !self.check_kind(kind) {
            return Ok(None);
        }
        match BinOp::from_token(&self.current_token) {
            Some(op) => {
                let token = self.advance()?;
                Ok(Some(Operator { op, token }))
            }
            None => Ok(None),
        }
    }

    /// Program := Block EndOfInput
    pub fn parse_program(&mut self) -> Result<Program> {
        log::debug!("parsing program");
        let block = self.parse_block()?;
        if !self.check_kind(TokenKind::EndOfInput) {
            return Err(self.unexpected(Expected::StatementOrEnd));
        }
        log::debug!("parsed program with {} top-level statements", block.len());
        Ok(Program { block })
    }

    /// Block := ( Statement ';'? )*
    ///
    /// Stops at the first token that cannot start a statement and leaves it for the
    /// caller, which knows whether `}` or the end of input belongs there.
    pub fn parse_block(&mut self) -> Result<Block> {
        log::trace!("block at {}", self.current_token.position);
        let mut statements = Vec::new();

        while self.starts_statement() {
            statements.push(self.parse_statement()?);
            if self.check_symbol(";") {
                self.advance()?;
            }
        }

        Ok(Block { statements })
    }

    pub fn parse_statement(&mut self) -> Result<Statement> {
        match (self.current_token.kind, self.current_token.lexeme.as_str()) {
            (TokenKind::Keyword, "var") => self.parse_declaration(),
            (TokenKind::Identifier, _) => self.parse_assignment(),
            (TokenKind::Keyword, "if") => self.parse_if(),
            (TokenKind::Keyword, "while") => self.parse_while(),
            (TokenKind::Keyword, "print") => self.parse_print(),
            _ => Err(self.unexpected(Expected::Statement)),
        }
    }

    /// Declaration := 'var' Identifier
    pub fn parse_declaration(&mut self) -> Result<Statement> {
        log::trace!("declaration at {}", self.current_token.position);
        self.expect_keyword("var")?;
        let name = self.expect_kind(TokenKind::Identifier)?;
        Ok(Statement::Declaration { name })
    }

    /// Assignment := Identifier 'into' Expression
    pub fn parse_assignment(&mut self) -> Result<Statement> {
        log::trace!("assignment at {}", self.current_token.position);
        let name = self.expect_kind(TokenKind::Identifier)?;
        self.expect_keyword("into")?;
        let value = self.parse_expression()?;
        Ok(Statement::Assignment { name, value })
    }

    /// If := 'if' Condition '{' Block '}'
    pub fn parse_if(&mut self) -> Result<Statement> {
        log::trace!("if at {}", self.current_token.position);
        self.expect_keyword("if")?;
        let condition = self.parse_condition()?;
        let body = self.parse_braced_block()?;
        Ok(Statement::If { condition, body })
    }

    /// While := 'while' Condition '{' Block '}'
    pub fn parse_while(&mut self) -> Result<Statement> {
        log::trace!("while at {}", self.current_token.position);
        self.expect_keyword("while")?;
        let condition = self.parse_condition()?;
        let body = self.parse_braced_block()?;
        Ok(Statement::While { condition, body })
    }

    /// Print := 'print' Expression
    pub fn parse_print(&mut self) -> Result<Statement> {
        log::trace!("print at {}", self.current_token.position);
        self.expect_keyword("print")?;
        let value = self.parse_expression()?;
        Ok(Statement::Print(value))
    }

    fn parse_braced_block(&mut self) -> Result<Block> {
        if !self.check_symbol("{") {
            return Err(self.unexpected(Expected::Symbol("{")));
        }
        self.nested(|parser| {
            parser.advance()?;
            let body = parser.parse_block()?;
            if !parser.check_symbol("}") {
                return Err(parser.unexpected(Expected::StatementOrClose));
            }
            parser.advance()?;
            Ok(body)
        })
    }

    /// Condition := ConditionTerm ( ('&&'|'||') ConditionTerm )*
    pub fn parse_condition(&mut self) -> Result<Condition> {
        log::trace!("condition at {}", self.current_token.position);
        let mut left = Condition::from(self.parse_condition_term()?);

        while let Some(op) = self.take_operator(TokenKind::LogicalOp)? {
            let present = self.starts_operand() || self.check_symbol("(");
            self.require_operand(&op.token, present)?;
            let right = self.parse_condition_term()?;

            left = Condition::Logical {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    /// ConditionTerm := '(' Condition ')' | Expression CompOp Expression
    pub fn parse_condition_term(&mut self) -> Result<ConditionTerm> {
        if self.check_symbol("(") {
            return self.nested(|parser| {
                parser.advance()?;
                let inner = parser.parse_condition()?;
                parser.expect_symbol(")")?;
                Ok(ConditionTerm::Grouped(Box::new(inner)))
            });
        }

        if !self.starts_operand() {
            return Err(self.unexpected(Expected::ConditionTerm));
        }
        let left = self.parse_expression()?;

        let Some(op) = self.take_operator(TokenKind::ComparisonOp)? else {
            return Err(self.unexpected(Expected::ComparisonOperator));
        };
        self.require_operand(&op.token, self.starts_operand())?;
        let right = self.parse_expression()?;

        Ok(ConditionTerm::Comparison { left, op, right })
    }

    /// Expression := Term ( ('+'|'-') Term )*
    pub fn parse_expression(&mut self) -> Result<Expression> {
        let mut left = Expression::Term(self.parse_term()?);

        while let Some(op) = self.take_operator(TokenKind::AdditiveOp)? {
            self.require_operand(&op.token, self.starts_operand())?;
            let right = self.parse_term()?;

            left = Expression::Binary {
                left: Box::new(left),
                op,
                right,
            };
        }
        Ok(left)
    }

    /// Term := Factor ( ('*'|'/'|'%') Factor )*
    pub fn parse_term(&mut self) -> Result<Term> {
        let mut left = Term::Factor(self.parse_factor()?);

        while let Some(op) = self.take_operator(TokenKind::MultiplicativeOp)? {
            self.require_operand(&op.token, self.starts_operand())?;
            let right = self.parse_factor()?;

            left = Term::Binary {
                left: Box::new(left),
                op,
                right,
            };
        }
        Ok(left)
    }

    /// Factor := Number | Identifier
    pub fn parse_factor(&mut self) -> Result<Factor> {
        if !self.starts_operand() {
            return Err(self.unexpected(Expected::Operand));
        }
        let token = self.advance()?;
        Ok(Factor { token })
    }
}

fn invalid_character(token: &Token) -> ParseError {
    let ch = token.lexeme.chars().next().unwrap_or('\u{fffd}');
    ParseError::Lex(LexError::InvalidCharacter {
        ch,
        position: token.position,
    })
}

/// Parses a complete program held in memory.
pub fn parse_program(source: &str) -> Result<Program> {
    parse_chars(source.chars())
}

/// Parses a complete program from any character source, read strictly left to right.
pub fn parse_chars<C: IntoIterator<Item = char>>(chars: C) -> Result<Program> {
    let mut parser = Parser::new(Lexer::from_chars(chars.into_iter()))?;
    parser.parse_program()
}
