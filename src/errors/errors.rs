use thiserror::Error;

use crate::types::types::{BinOp, Type, UnOp};

/// Errors raised while scanning source text.
///
/// Lexical errors are recoverable: the lexer reports the offending
/// character or literal, skips it, and keeps scanning so that a single
/// pass surfaces every diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("character {character:?} is not allowed")]
    UnrecognisedCharacter { character: char, line: u32 },
    #[error("malformed integer literal {lexeme:?}")]
    MalformedInt { lexeme: String, line: u32 },
    #[error("malformed float literal {lexeme:?}")]
    MalformedFloat { lexeme: String, line: u32 },
    #[error("unsupported escape sequence {escape:?} in string literal")]
    UnsupportedEscape { escape: String, line: u32 },
    #[error("unterminated string literal")]
    UnterminatedString { line: u32 },
    #[error("unterminated block comment")]
    UnterminatedComment { line: u32 },
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            LexError::UnrecognisedCharacter { line, .. } => *line,
            LexError::MalformedInt { line, .. } => *line,
            LexError::MalformedFloat { line, .. } => *line,
            LexError::UnsupportedEscape { line, .. } => *line,
            LexError::UnterminatedString { line } => *line,
            LexError::UnterminatedComment { line } => *line,
        }
    }
}

/// Errors raised while parsing the token stream.
///
/// Syntax errors are fatal to the parse: there is no resynchronization,
/// the first unexpected token aborts and is reported with its line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("unexpected token {token:?}")]
    UnexpectedToken { token: String, line: u32 },
    #[error("unexpected token {token:?} ({message})")]
    UnexpectedTokenDetailed {
        token: String,
        message: String,
        line: u32,
    },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget { line: u32 },
    #[error("call target must be a function name")]
    InvalidCallTarget { line: u32 },
}

impl SyntaxError {
    pub fn line(&self) -> u32 {
        match self {
            SyntaxError::UnexpectedToken { line, .. } => *line,
            SyntaxError::UnexpectedTokenDetailed { line, .. } => *line,
            SyntaxError::InvalidAssignmentTarget { line } => *line,
            SyntaxError::InvalidCallTarget { line } => *line,
        }
    }
}

/// Errors raised during semantic checking.
///
/// Check errors are fatal to the pass and name the offending identifier,
/// operator or types wherever one exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("no function named 'main' was declared")]
    MissingMain,
    #[error("'main' must return int and take no parameters")]
    MalformedMain { line: u32 },
    #[error("{name:?} is not declared")]
    NotDeclared { name: String, line: u32 },
    #[error("{name:?} is already declared in this scope")]
    AlreadyDeclared { name: String, line: u32 },
    #[error("parameter {name:?} is duplicated in function {function:?}")]
    DuplicateParameter {
        name: String,
        function: String,
        line: u32,
    },
    #[error("variable {name:?} cannot be declared with type 'void'")]
    VoidVariable { name: String, line: u32 },
    #[error("condition must be of type 'bool', found {found}")]
    ConditionNotBool { found: Type, line: u32 },
    #[error("operator {op} is not defined for {left} and {right}")]
    IncompatibleBinaryOp {
        op: BinOp,
        left: Type,
        right: Type,
        line: u32,
    },
    #[error("unary operator {op} is not defined for {operand}")]
    IncompatibleUnaryOp { op: UnOp, operand: Type, line: u32 },
    #[error("cannot assign {found} to {name:?} of type {expected}")]
    AssignmentTypeMismatch {
        name: String,
        expected: Type,
        found: Type,
        line: u32,
    },
    #[error("array index must be of type 'int', found {found}")]
    IndexNotInt { found: Type, line: u32 },
    #[error("{name:?} is not an array")]
    NotAnArray { name: String, line: u32 },
    #[error("array size must be of type 'int', found {found}")]
    SizeNotInt { found: Type, line: u32 },
    #[error("{name:?} is not a function")]
    NotAFunction { name: String, line: u32 },
    #[error("{name:?} is a function, not a value")]
    NotAVariable { name: String, line: u32 },
    #[error("{name:?} expects {expected} argument(s), received {received}")]
    ArityMismatch {
        name: String,
        expected: usize,
        received: usize,
        line: u32,
    },
    #[error("argument {position} of {name:?} expects {expected}, found {found}")]
    ArgumentTypeMismatch {
        name: String,
        position: usize,
        expected: Type,
        found: Type,
        line: u32,
    },
    #[error("'{keyword}' used outside of a while loop")]
    BreakOutsideLoop { keyword: &'static str, line: u32 },
    #[error("return type {found} does not match declared type {expected}")]
    ReturnTypeMismatch {
        expected: Type,
        found: Type,
        line: u32,
    },
    #[error("return without a value in a function returning {expected}")]
    MissingReturnValue { expected: Type, line: u32 },
}

impl CheckError {
    pub fn line(&self) -> Option<u32> {
        match self {
            CheckError::MissingMain => None,
            CheckError::MalformedMain { line } => Some(*line),
            CheckError::NotDeclared { line, .. } => Some(*line),
            CheckError::AlreadyDeclared { line, .. } => Some(*line),
            CheckError::DuplicateParameter { line, .. } => Some(*line),
            CheckError::VoidVariable { line, .. } => Some(*line),
            CheckError::ConditionNotBool { line, .. } => Some(*line),
            CheckError::IncompatibleBinaryOp { line, .. } => Some(*line),
            CheckError::IncompatibleUnaryOp { line, .. } => Some(*line),
            CheckError::AssignmentTypeMismatch { line, .. } => Some(*line),
            CheckError::IndexNotInt { line, .. } => Some(*line),
            CheckError::NotAnArray { line, .. } => Some(*line),
            CheckError::SizeNotInt { line, .. } => Some(*line),
            CheckError::NotAFunction { line, .. } => Some(*line),
            CheckError::NotAVariable { line, .. } => Some(*line),
            CheckError::ArityMismatch { line, .. } => Some(*line),
            CheckError::ArgumentTypeMismatch { line, .. } => Some(*line),
            CheckError::BreakOutsideLoop { line, .. } => Some(*line),
            CheckError::ReturnTypeMismatch { line, .. } => Some(*line),
            CheckError::MissingReturnValue { line, .. } => Some(*line),
        }
    }
}

/// Umbrella error for the whole pipeline, one variant per pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PassError {
    #[error("lexical analysis failed with {} error(s)", .0.len())]
    Lex(Vec<LexError>),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Check(#[from] CheckError),
}

impl PassError {
    /// Line of the first reported diagnostic, if any carries one.
    pub fn line(&self) -> Option<u32> {
        match self {
            PassError::Lex(errors) => errors.first().map(|e| e.line()),
            PassError::Syntax(error) => Some(error.line()),
            PassError::Check(error) => error.line(),
        }
    }
}
