use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    /// Reserved words, checked before falling back to a generic identifier.
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("void", TokenKind::Void);
        map.insert("bool", TokenKind::Bool);
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("return", TokenKind::Return);
        map.insert("break", TokenKind::Break);
        map.insert("continue", TokenKind::Continue);
        map.insert("size", TokenKind::Size);
        map.insert("new", TokenKind::New);
        map.insert("true", TokenKind::BoolLit);
        map.insert("false", TokenKind::BoolLit);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Eof,
    IntLit,
    FloatLit,
    BoolLit,
    StringLit,
    Ident,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assign,    // =
    Equals,    // ==
    Not,       // !
    NotEquals, // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    Semicolon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Void,
    Bool,
    Int,
    Float,
    If,
    Else,
    While,
    Return,
    Break,
    Continue,
    Size,
    New,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Decoded literal payload, converted at scan time.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Bool(v) => write!(f, "{}", v),
            Literal::Int(v) => write!(f, "{}", v),
            Literal::Float(v) => write!(f, "{}", v),
            Literal::Str(v) => write!(f, "{}", v),
        }
    }
}

/// Smallest lexical unit: kind, original text, decoded value and line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.literal {
            Some(value) => write!(f, "{} ({})", self.kind, value),
            None => write!(f, "{} ({})", self.kind, self.lexeme),
        }
    }
}

impl Token {
    pub fn is_type_spec(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Void | TokenKind::Bool | TokenKind::Int | TokenKind::Float
        )
    }
}

/// Renders the token stream as a three column report (type, value, line),
/// the shape consumed by the "dump tokens" path of the driver.
pub fn token_table(tokens: &[Token]) -> String {
    let mut out = String::from("type            value                lineno\n");
    for token in tokens {
        if token.kind == TokenKind::Eof {
            continue;
        }
        let value = match &token.literal {
            Some(value) => value.to_string(),
            None => token.lexeme.clone(),
        };
        out.push_str(&format!("{:<15} {:<20} {:>6}\n", token.kind.to_string(), value, token.line));
    }
    out
}
