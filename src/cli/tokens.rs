//! Tokenizer-only dump, for inspecting what the lexer sees

use super::{token_to_json, CliError, CommandOptions};
use crate::ast::{Token, TokenKind};
use crate::lexer::Lexer;
use std::io::Write;

/// One line of the token dump
pub fn format_token(token: &Token) -> String {
    let value = match token.kind {
        TokenKind::EndOfInput => "EOF",
        _ => token.lexeme.as_str(),
    };
    format!("Token Type: {}, Value: '{}'", token.kind.name(), value)
}

/// Tokenize the source into `out`, up to and including end of input.
///
/// Tokens are written as they are lexed. On a lexical error everything lexed before it
/// has already been written (as a JSON array with `--json`) and the error is returned.
pub fn execute_tokens<W: Write>(options: &CommandOptions, out: &mut W) -> Result<(), CliError> {
    let mut values = Vec::new();

    for result in Lexer::new(&options.source) {
        let token = match result {
            Ok(token) => token,
            Err(e) => {
                if options.json {
                    write_json(out, values)?;
                }
                return Err(e.into());
            }
        };

        if options.json {
            values.push(token_to_json(&token));
        } else {
            writeln!(out, "{}", format_token(&token))?;
        }
    }

    if options.json {
        write_json(out, values)?;
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, values: Vec<serde_json::Value>) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(&serde_json::Value::Array(values))?;
    writeln!(out, "{}", json)?;
    Ok(())
}
