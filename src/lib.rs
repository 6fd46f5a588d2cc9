#![allow(clippy::module_inception)]

use crate::ast::statements::Program;
use crate::checker::checker::Checker;
use crate::errors::errors::PassError;

pub mod ast;
pub mod checker;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod types;

extern crate regex;

/// Runs the whole front end over `source`: scan, parse, check.
///
/// On success the returned program has every expression annotated with
/// its type and the implicit conversions inserted; the checker comes
/// along for callers that want the symbol table.
pub fn analyze(source: &str) -> Result<(Program, Checker), PassError> {
    let tokens = lexer::lexer::tokenize(source).map_err(PassError::Lex)?;
    let mut program = parser::parser::parse(tokens)?;
    let checker = checker::checker::check(&mut program)?;
    Ok((program, checker))
}

/// The 1-based `line` of `source`, without its newline.
pub fn source_line(source: &str, line: u32) -> Option<&str> {
    source.lines().nth(line.saturating_sub(1) as usize)
}

/// Renders every diagnostic in `error` with its source line.
///
/// ```text
/// error: "x" is not declared
///    |
/// 20 | x = 1;
///    |
/// ```
pub fn render_error(source: &str, error: &PassError) -> String {
    match error {
        PassError::Lex(errors) => errors
            .iter()
            .map(|e| render_diagnostic(source, &e.to_string(), Some(e.line())))
            .collect(),
        PassError::Syntax(e) => render_diagnostic(source, &e.to_string(), Some(e.line())),
        PassError::Check(e) => render_diagnostic(source, &e.to_string(), e.line()),
    }
}

fn render_diagnostic(source: &str, message: &str, line: Option<u32>) -> String {
    let mut out = format!("error: {}\n", message);

    if let Some(line) = line {
        if let Some(text) = source_line(source, line) {
            let number = line.to_string();
            let padding = number.len() + 2;
            out.push_str(&format!("{:>padding$}\n", "|"));
            out.push_str(&format!("{} | {}\n", number, text.trim()));
            out.push_str(&format!("{:>padding$}\n", "|"));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{render_error, source_line};
    use crate::errors::errors::{PassError, SyntaxError};

    #[test]
    fn test_source_line() {
        let source = "first\nsecond\nthird";

        assert_eq!(source_line(source, 1), Some("first"));
        assert_eq!(source_line(source, 3), Some("third"));
        assert_eq!(source_line(source, 4), None);
        assert_eq!(source_line(source, 0), Some("first"));
    }

    #[test]
    fn test_render_error_includes_source_line() {
        let source = "int x;\nx @ 1;\n";
        let error = PassError::Syntax(SyntaxError::UnexpectedToken {
            token: String::from("@"),
            line: 2,
        });

        let rendered = render_error(source, &error);

        assert!(rendered.starts_with("error: unexpected token \"@\""));
        assert!(rendered.contains("2 | x @ 1;"));
    }

    #[test]
    fn test_render_error_out_of_range_line() {
        let error = PassError::Syntax(SyntaxError::UnexpectedToken {
            token: String::from("Eof"),
            line: 9,
        });

        let rendered = render_error("int x;", &error);

        assert!(rendered.starts_with("error:"));
        assert!(!rendered.contains('|'));
    }
}
