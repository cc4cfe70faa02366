use clap::{Parser as ClapParser, Subcommand};
use into_lang::cli::{self, CheckResult, CliError, CommandOptions};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "into")]
#[command(about = "Tokenizer and parser for the into language")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a program and print its syntax tree
    Parse {
        /// Source file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the tokens of a program, one per line
    Tokens {
        /// Source file (reads from stdin if not provided)
        file: Option<PathBuf>,

        /// Print the tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Only validate syntax
    Check {
        /// Source file (reads from stdin if not provided)
        file: Option<PathBuf>,
    },

    /// Print a program in canonical layout
    Fmt {
        /// Source file (reads from stdin if not provided)
        file: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { file, json } => read_source(file).and_then(|source| {
            cli::execute_parse(&CommandOptions { source, json }).map(|out| print!("{}", out))
        }),
        Commands::Tokens { file, json } => read_source(file).and_then(|source| {
            cli::execute_tokens(&CommandOptions { source, json }, &mut io::stdout().lock())
        }),
        Commands::Check { file } => read_source(file).and_then(|source| run_check(&source)),
        Commands::Fmt { file } => read_source(file)
            .and_then(|source| cli::execute_fmt(&source).map(|out| print!("{}", out))),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_source(file: Option<PathBuf>) -> Result<String, CliError> {
    match file {
        Some(path) => {
            log::debug!("reading {}", path.display());
            fs::read_to_string(&path).map_err(CliError::Io)
        }
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(source: &str) -> Result<(), CliError> {
    match cli::execute_check(source)? {
        CheckResult::SyntaxValid { statements } => {
            log::debug!("{} top-level statements", statements);
            println!("Syntax is valid");
        }
    }
    Ok(())
}
