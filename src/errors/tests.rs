//! Unit tests for error display and line reporting.

use super::errors::{CheckError, LexError, PassError, SyntaxError};
use crate::types::types::{BinOp, Type, UnOp};

#[test]
fn test_lex_error_messages() {
    let error = LexError::UnrecognisedCharacter {
        character: '@',
        line: 3,
    };
    assert_eq!(error.to_string(), "character '@' is not allowed");
    assert_eq!(error.line(), 3);

    let error = LexError::MalformedInt {
        lexeme: String::from("0123"),
        line: 1,
    };
    assert_eq!(error.to_string(), "malformed integer literal \"0123\"");
}

#[test]
fn test_syntax_error_messages() {
    let error = SyntaxError::UnexpectedToken {
        token: String::from(";"),
        line: 2,
    };
    assert_eq!(error.to_string(), "unexpected token \";\"");
    assert_eq!(error.line(), 2);

    let error = SyntaxError::UnexpectedTokenDetailed {
        token: String::from("return"),
        message: String::from("expected a declaration"),
        line: 5,
    };
    assert_eq!(
        error.to_string(),
        "unexpected token \"return\" (expected a declaration)"
    );
}

#[test]
fn test_check_error_messages() {
    let error = CheckError::IncompatibleBinaryOp {
        op: BinOp::Add,
        left: Type::Int,
        right: Type::Bool,
        line: 4,
    };
    assert_eq!(
        error.to_string(),
        "operator + is not defined for 'int' and 'bool'"
    );
    assert_eq!(error.line(), Some(4));

    let error = CheckError::IncompatibleUnaryOp {
        op: UnOp::Not,
        operand: Type::Float,
        line: 1,
    };
    assert_eq!(error.to_string(), "unary operator ! is not defined for 'float'");

    assert_eq!(CheckError::MissingMain.line(), None);
    assert_eq!(
        CheckError::MissingMain.to_string(),
        "no function named 'main' was declared"
    );
}

#[test]
fn test_pass_error_wraps_each_stage() {
    let lex = PassError::Lex(vec![
        LexError::UnterminatedString { line: 7 },
        LexError::UnrecognisedCharacter {
            character: '#',
            line: 9,
        },
    ]);
    assert_eq!(lex.to_string(), "lexical analysis failed with 2 error(s)");
    assert_eq!(lex.line(), Some(7));

    let syntax: PassError = SyntaxError::InvalidAssignmentTarget { line: 3 }.into();
    assert_eq!(syntax.to_string(), "invalid assignment target");
    assert_eq!(syntax.line(), Some(3));

    let check: PassError = CheckError::MissingMain.into();
    assert_eq!(check.line(), None);
}
