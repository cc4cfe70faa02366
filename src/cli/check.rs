//! Parse source text and render the result

use super::{program_to_json, CliError};
use crate::parse_program;
use crate::printer::{to_source, to_tree};

/// Options shared by the parse and token commands
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Program source text
    pub source: String,
    /// Emit JSON instead of the human-readable form
    pub json: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq, Eq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid {
        /// Number of top-level statements
        statements: usize,
    },
}

/// Parse the source and render the AST as an outline or as pretty JSON
pub fn execute_parse(options: &CommandOptions) -> Result<String, CliError> {
    let program = parse_program(&options.source)?;

    if options.json {
        let json = serde_json::to_string_pretty(&program_to_json(&program))?;
        return Ok(format!("{}\n", json));
    }

    Ok(format!("AST for the parsed program:\n{}", to_tree(&program)))
}

/// Only validate syntax
pub fn execute_check(source: &str) -> Result<CheckResult, CliError> {
    let program = parse_program(source)?;
    Ok(CheckResult::SyntaxValid {
        statements: program.block.len(),
    })
}

/// Reformat the source into its canonical layout
pub fn execute_fmt(source: &str) -> Result<String, CliError> {
    let program = parse_program(source)?;
    Ok(to_source(&program))
}
