use into_lang::cli::{self, CheckResult, CliError, CommandOptions};
use into_lang::{parse_chars, parse_program, to_source, to_tree, ParseError};

const PROGRAMS: &[&str] = &[
    "",
    "var x",
    "var x; x into 5; print x;",
    "print 1 + 2 * 3 - 4 / 5 % 6",
    "print a - b - c",
    "print a * b * c + d * e",
    "if a < b && c == d { print a; }",
    "if a <= 1 || b >= 2 && c != 3 { }",
    "if (a > b) { print a }",
    "while (a < b || (c < d && e < f)) && g == h { a into a + 1 }",
    "while 1.5 * x < limit { if x % 2 == 0 { print x } x into x + 1 }",
    "// factorial\nvar n var acc\nn into 5 acc into 1\nwhile n > 1 {\n  acc into acc * n\n  n into n - 1\n}\nprint acc\n",
];

fn round_trip(source: &str) {
    let original = parse_program(source).unwrap();
    let printed = to_source(&original);
    let reparsed = parse_program(&printed)
        .unwrap_or_else(|e| panic!("Reparse failed for {:?}: {}\n{}", source, e, printed));

    assert_eq!(to_tree(&original), to_tree(&reparsed), "Tree mismatch for {:?}", source);
    assert_eq!(printed, to_source(&reparsed), "Output not stable for {:?}", source);
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_round_trip_corpus() {
    for source in PROGRAMS {
        round_trip(source);
    }
}

#[test]
fn test_round_trip_deep_nesting() {
    let mut source = String::new();
    for depth in 0..20 {
        source.push_str(&format!("while d{} < 1 {{\n", depth));
    }
    source.push_str("print 0\n");
    for _ in 0..20 {
        source.push_str("}\n");
    }
    round_trip(&source);
}

#[test]
fn test_long_operator_chains() {
    let length = 100_000;
    let sources = [
        format!("print 1{}", "+1".repeat(length)),
        format!("x into 2{}", "*2".repeat(length)),
        format!("if a < 1{} {{}}", " && a < 1".repeat(length)),
    ];

    for source in &sources {
        let program = parse_program(source).unwrap();

        let printed = to_source(&program);
        let reparsed = parse_program(&printed).unwrap();
        assert_eq!(to_source(&reparsed), printed);

        let json = cli::program_to_json(&program);
        let statement = &json["block"]["statements"][0];
        let chain = match statement["type"].as_str() {
            Some("If") => &statement["condition"],
            _ => &statement["value"],
        };
        assert_eq!(chain["operators"].as_array().unwrap().len(), length);
        assert_eq!(chain["operands"].as_array().unwrap().len(), length + 1);
        assert!(serde_json::to_string(&json).is_ok());

        drop(reparsed);
        drop(program);
    }
}

#[test]
fn test_tree_of_long_chain() {
    let length = 1_000;
    let program = parse_program(&format!("print 1{}", "-1".repeat(length))).unwrap();
    let tree = to_tree(&program);

    // Program, Block, Print statement, then an Expression, Term and Factor per operand.
    assert_eq!(tree.lines().count(), 3 * (length + 1) + 3);
    assert_eq!(tree.matches("Expression: -").count(), length);
}

#[test]
fn test_parse_chars_matches_parse_program() {
    let source = PROGRAMS[10];
    let from_str = parse_program(source).unwrap();
    let from_chars = parse_chars(source.chars().collect::<Vec<_>>()).unwrap();
    assert_eq!(from_str, from_chars);
}

// ============================================================================
// CLI commands
// ============================================================================

#[test]
fn test_cli_parse_tree() {
    let options = CommandOptions {
        source: "print x".to_string(),
        json: false,
    };
    let output = cli::execute_parse(&options).unwrap();
    let expected = "\
AST for the parsed program:
Program
  Block
    Print statement
      Expression
        Term
          Factor: x
";
    assert_eq!(output, expected);
}

#[test]
fn test_cli_parse_json() {
    let options = CommandOptions {
        source: "x into 1 + y".to_string(),
        json: true,
    };
    let output = cli::execute_parse(&options).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    let statement = &json["block"]["statements"][0];
    assert_eq!(statement["type"], "Assignment");
    assert_eq!(statement["name"]["lexeme"], "x");
    assert_eq!(statement["value"]["type"], "Expression");
    assert_eq!(statement["value"]["operators"][0]["symbol"], "+");
    assert_eq!(statement["value"]["operands"][0]["token"]["lexeme"], "1");
    assert_eq!(statement["value"]["operands"][1]["token"]["kind"], "IDENTIFIER");
}

#[test]
fn test_cli_parse_error() {
    let options = CommandOptions {
        source: "if a < b { print a".to_string(),
        json: false,
    };
    let err = cli::execute_parse(&options).unwrap_err();
    assert!(matches!(err, CliError::Parse(ParseError::UnexpectedEof { .. })));
    assert!(err.to_string().starts_with("Parse error: syntax error at 1:19"));
}

fn run_tokens(source: &str, json: bool) -> (String, Result<(), CliError>) {
    let options = CommandOptions {
        source: source.to_string(),
        json,
    };
    let mut out = Vec::new();
    let result = cli::execute_tokens(&options, &mut out);
    (String::from_utf8(out).unwrap(), result)
}

#[test]
fn test_cli_tokens() {
    let (output, result) = run_tokens("123 + 45", false);
    result.unwrap();
    let expected = "\
Token Type: NUMBER, Value: '123'
Token Type: ADD_OP, Value: '+'
Token Type: NUMBER, Value: '45'
Token Type: EOF, Value: 'EOF'
";
    assert_eq!(output, expected);
}

#[test]
fn test_cli_tokens_json() {
    let (output, result) = run_tokens("var x", true);
    result.unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    let tokens = json.as_array().unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0]["kind"], "KEYWORD");
    assert_eq!(tokens[1]["column"], 5);
    assert_eq!(tokens[2]["kind"], "EOF");
}

#[test]
fn test_cli_tokens_keep_invalid_characters() {
    let (output, result) = run_tokens("a @ b", false);
    result.unwrap();
    assert!(output.contains("Token Type: UNKNOWN, Value: '@'"));
}

#[test]
fn test_cli_tokens_lex_error() {
    let (output, result) = run_tokens("\"abc", false);
    assert!(matches!(result, Err(CliError::Lex(_))));
    assert_eq!(output, "");
}

#[test]
fn test_cli_tokens_before_lex_error_are_written() {
    let (output, result) = run_tokens("var x \"abc", false);
    let err = result.unwrap_err();
    assert!(matches!(err, CliError::Lex(_)));
    assert!(err.to_string().contains("1:7"));
    let expected = "\
Token Type: KEYWORD, Value: 'var'
Token Type: IDENTIFIER, Value: 'x'
";
    assert_eq!(output, expected);
}

#[test]
fn test_cli_tokens_json_before_lex_error() {
    let (output, result) = run_tokens("var x \"abc", true);
    assert!(result.is_err());
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    let tokens = json.as_array().unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1]["lexeme"], "x");
}

#[test]
fn test_cli_check() {
    assert_eq!(
        cli::execute_check("var x; x into 1").unwrap(),
        CheckResult::SyntaxValid { statements: 2 }
    );
    assert!(cli::execute_check("var").is_err());
}

#[test]
fn test_cli_fmt() {
    let output = cli::execute_fmt("var x x into 1+2*x if x>3{print x}").unwrap();
    let expected = "\
var x;
x into 1 + 2 * x;
if x > 3 {
    print x;
}
";
    assert_eq!(output, expected);
}
