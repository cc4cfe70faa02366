use crate::ast::tokens::{KEYWORDS, MAX_LEXEME_LEN};
use crate::ast::{Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

pub use crate::ast::Position;

/// Errors raised while turning characters into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("lexical error at {position}: unterminated string literal")]
    UnterminatedString { position: Position },

    #[error("lexical error at {position}: invalid character '{ch}'")]
    InvalidCharacter { ch: char, position: Position },

    #[error("lexical error at {position}: token longer than {limit} characters")]
    LexemeTooLong { position: Position, limit: usize },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnterminatedString { position }
            | LexError::InvalidCharacter { position, .. }
            | LexError::LexemeTooLong { position, .. } => *position,
        }
    }
}

/// On-demand tokenizer over any character source.
///
/// Looks at most one character ahead and never pushes characters back.
pub struct Lexer<I: Iterator<Item = char>> {
    input: Peekable<I>,
    line: usize,
    column: usize,
    exhausted: bool,
}

impl<'a> Lexer<Chars<'a>> {
    pub fn new(input: &'a str) -> Self {
        Lexer::from_chars(input.chars())
    }

    /// Every token of `input`, ending with exactly one `EndOfInput`.
    pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
        Lexer::new(input).collect()
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn from_chars(chars: I) -> Self {
        Lexer {
            input: chars.peekable(),
            line: 1,
            column: 1,
            exhausted: false,
        }
    }

    fn current_char(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn current_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Skips whitespace and `//` comments.
    ///
    /// Telling a comment from a division needs two characters, so a lone `/` is already
    /// consumed when we find out; it comes back as a finished token.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            match self.current_char() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('/') => {
                    let start = self.current_position();
                    self.advance();
                    if self.current_char() == Some('/') {
                        while let Some(ch) = self.advance() {
                            if ch == '\n' {
                                break;
                            }
                        }
                    } else {
                        return Some(Token::new(TokenKind::MultiplicativeOp, "/", start));
                    }
                }
                _ => return None,
            }
        }
    }

    fn push_checked(
        lexeme: &mut String,
        len: &mut usize,
        ch: char,
        start: Position,
    ) -> Result<(), LexError> {
        if *len >= MAX_LEXEME_LEN {
            return Err(LexError::LexemeTooLong {
                position: start,
                limit: MAX_LEXEME_LEN,
            });
        }
        lexeme.push(ch);
        *len += 1;
        Ok(())
    }

    fn read_identifier(&mut self, start: Position) -> Result<Token, LexError> {
        let mut lexeme = String::new();
        let mut len = 0;
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                Self::push_checked(&mut lexeme, &mut len, ch, start)?;
                self.advance();
            } else {
                break;
            }
        }

        let kind = if KEYWORDS.contains(&lexeme.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Ok(Token::new(kind, lexeme, start))
    }

    fn read_number(&mut self, start: Position) -> Result<Token, LexError> {
        let mut lexeme = String::new();
        let mut len = 0;
        let mut has_decimal = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                Self::push_checked(&mut lexeme, &mut len, ch, start)?;
                self.advance();
            } else if ch == '.' && !has_decimal {
                has_decimal = true;
                Self::push_checked(&mut lexeme, &mut len, ch, start)?;
                self.advance();
            } else {
                break;
            }
        }

        Ok(Token::new(TokenKind::Number, lexeme, start))
    }

    fn read_string(&mut self, start: Position) -> Result<Token, LexError> {
        let mut lexeme = String::new();
        let mut len = 0;
        self.advance(); // opening quote

        loop {
            match self.advance() {
                None => return Err(LexError::UnterminatedString { position: start }),
                Some('"') => return Ok(Token::new(TokenKind::String, lexeme, start)),
                Some('\\') => {
                    // Escapes are kept as written: the backslash and the next character.
                    let escaped = self
                        .advance()
                        .ok_or(LexError::UnterminatedString { position: start })?;
                    Self::push_checked(&mut lexeme, &mut len, '\\', start)?;
                    Self::push_checked(&mut lexeme, &mut len, escaped, start)?;
                }
                Some(ch) => Self::push_checked(&mut lexeme, &mut len, ch, start)?,
            }
        }
    }

    /// `=`, `!`, `<` or `>`, optionally followed by `=`.
    fn read_comparison(&mut self, first: char, start: Position) -> Token {
        self.advance();
        let mut lexeme = String::from(first);
        if self.current_char() == Some('=') {
            self.advance();
            lexeme.push('=');
        }
        Token::new(TokenKind::ComparisonOp, lexeme, start)
    }

    /// `&&` or `||`. A single `&` or `|` is an invalid token.
    fn read_logical(&mut self, first: char, start: Position) -> Token {
        self.advance();
        if self.current_char() == Some(first) {
            self.advance();
            Token::new(TokenKind::LogicalOp, format!("{first}{first}"), start)
        } else {
            Token::new(TokenKind::Invalid, first, start)
        }
    }

    fn single(&mut self, kind: TokenKind, ch: char, start: Position) -> Token {
        self.advance();
        Token::new(kind, ch, start)
    }

    /// Produces the next token. Once the input is exhausted every call returns
    /// `EndOfInput`.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let token = self.lex_token()?;
        log::trace!(
            "token {} {:?} at {}",
            token.kind.name(),
            token.lexeme,
            token.position
        );
        Ok(token)
    }

    fn lex_token(&mut self) -> Result<Token, LexError> {
        if let Some(slash) = self.skip_trivia() {
            return Ok(slash);
        }

        let start = self.current_position();
        let token = match self.current_char() {
            None => Token::end_of_input(start),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.read_identifier(start)?,
            Some(ch) if ch.is_ascii_digit() => self.read_number(start)?,
            Some('"') => self.read_string(start)?,
            Some(ch @ ('=' | '!' | '<' | '>')) => self.read_comparison(ch, start),
            Some(ch @ ('&' | '|')) => self.read_logical(ch, start),
            Some(ch @ ('+' | '-')) => self.single(TokenKind::AdditiveOp, ch, start),
            Some(ch @ ('*' | '%')) => self.single(TokenKind::MultiplicativeOp, ch, start),
            Some(ch @ ('{' | '}' | '(' | ')' | ';')) => self.single(TokenKind::Symbol, ch, start),
            Some(ch) => self.single(TokenKind::Invalid, ch, start),
        };
        Ok(token)
    }
}

/// Yields tokens up to and including the first `EndOfInput`, or up to the first error.
impl<I: Iterator<Item = char>> Iterator for Lexer<I> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let result = self.next_token();
        if !matches!(&result, Ok(token) if !token.is_eof()) {
            self.exhausted = true;
        }
        Some(result)
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("var into if while print");
    for word in KEYWORDS {
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Keyword);
        assert_eq!(token.lexeme, word);
    }
    assert!(lexer.next_token().unwrap().is_eof());
}

#[test]
fn test_slash_is_not_comment() {
    let mut lexer = Lexer::new("a / b // trailing");
    assert_eq!(lexer.next_token().unwrap().lexeme, "a");
    let slash = lexer.next_token().unwrap();
    assert_eq!(slash.kind, TokenKind::MultiplicativeOp);
    assert_eq!(slash.position, Position::new(1, 3));
    assert_eq!(lexer.next_token().unwrap().lexeme, "b");
    assert!(lexer.next_token().unwrap().is_eof());
}

#[test]
fn test_positions() {
    let mut lexer = Lexer::new("var x\n  print x");
    assert_eq!(lexer.next_token().unwrap().position, Position::new(1, 1));
    assert_eq!(lexer.next_token().unwrap().position, Position::new(1, 5));
    assert_eq!(lexer.next_token().unwrap().position, Position::new(2, 3));
    assert_eq!(lexer.next_token().unwrap().position, Position::new(2, 9));
}

#[test]
fn test_slash_position_after_comment() {
    let tokens = Lexer::tokenize("// note\n  a / b").unwrap();
    assert_eq!(tokens[1].lexeme, "/");
    assert_eq!(tokens[1].position, Position::new(2, 5));
    assert_eq!(tokens[2].position, Position::new(2, 7));
}
