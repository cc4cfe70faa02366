use std::fmt;

/// Longest lexeme the tokenizer accepts, in characters.
pub const MAX_LEXEME_LEN: usize = 100;

/// Reserved words. Anything else shaped like an identifier is an identifier.
pub const KEYWORDS: [&str; 5] = ["var", "into", "if", "while", "print"];

/// A 1-based line/column location in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Variable name
    ///
    /// Must start with letter or underscore, followed by letters, digits, or underscores.
    ///
    /// # Examples
    /// ```text
    /// total
    /// loop_count
    /// _tmp
    /// ```
    Identifier,

    /// One of the reserved words
    ///
    /// # Examples
    /// ```text
    /// var
    /// into
    /// if
    /// while
    /// print
    /// ```
    Keyword,

    /// Integer or decimal literal, kept as source text
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// 7.
    /// ```
    Number,

    /// String literal enclosed in double quotes
    ///
    /// The lexeme holds the text between the quotes, escapes left as written.
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "say \"hi\""
    /// ```
    String,

    /// `+` or `-`
    AdditiveOp,

    /// `*`, `/` or `%`
    MultiplicativeOp,

    /// `==`, `!=`, `<`, `>`, `<=`, `>=`, and the lone `=` / `!`
    ComparisonOp,

    /// `&&` or `||`
    LogicalOp,

    /// `{`, `}`, `(`, `)` or `;`
    Symbol,

    /// End of input. Repeats forever once reached.
    EndOfInput,

    /// A character with no lexical role
    Invalid,
}

impl TokenKind {
    /// Upper-case name used by the token dump.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::AdditiveOp => "ADD_OP",
            TokenKind::MultiplicativeOp => "MULT_OP",
            TokenKind::ComparisonOp => "COMP_OP",
            TokenKind::LogicalOp => "LOGICAL_OP",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::EndOfInput => "EOF",
            TokenKind::Invalid => "UNKNOWN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::AdditiveOp => "additive operator",
            TokenKind::MultiplicativeOp => "multiplicative operator",
            TokenKind::ComparisonOp => "comparison operator",
            TokenKind::LogicalOp => "logical operator",
            TokenKind::Symbol => "symbol",
            TokenKind::EndOfInput => "end of input",
            TokenKind::Invalid => "invalid character",
        };
        f.write_str(text)
    }
}

/// A lexical token: kind, source text and where it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    pub fn end_of_input(position: Position) -> Self {
        Token::new(TokenKind::EndOfInput, "", position)
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == word
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme == symbol
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::String => write!(f, "string \"{}\"", self.lexeme),
            kind => write!(f, "{} `{}`", kind, self.lexeme),
        }
    }
}
