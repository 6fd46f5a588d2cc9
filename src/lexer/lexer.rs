use regex::Regex;

use crate::{errors::errors::LexError, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Literal, Token, TokenKind, RESERVED_LOOKUP};

pub type PatternHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: PatternHandler,
}

/// Scanner over a single source string.
///
/// The lexer walks an ordered pattern table; the first pattern matching at
/// the cursor wins, so malformed-literal patterns sit in front of the
/// valid ones and two-character operators in front of their one-character
/// prefixes. Tokens come out one at a time through `Iterator`; a fresh
/// `Lexer::new` over the same source restarts the sequence.
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    source: String,
    pos: usize,
    line: u32,
    errors: Vec<LexError>,
    emitted_eof: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            pos: 0,
            line: 1,
            errors: vec![],
            emitted_eof: false,
            patterns: vec![
                RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new(r"^/\*(?s:.)*?\*/").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new(r"^/\*").unwrap(), handler: open_comment_handler },
                RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
                // Leading-zero literals look octal but are unsupported; they
                // must be rejected before the valid number patterns run.
                RegexPattern { regex: Regex::new(r"^0\d+(\.\d+([eE][-+]?\d+)?|[eE][-+]?\d+)").unwrap(), handler: malformed_float_handler },
                RegexPattern { regex: Regex::new(r"^(0|[1-9]\d*)(\.\d+([eE][-+]?\d+)?|[eE][-+]?\d+)").unwrap(), handler: float_handler },
                RegexPattern { regex: Regex::new(r"^0\d+").unwrap(), handler: malformed_int_handler },
                RegexPattern { regex: Regex::new(r"^(0|[1-9]\d*)").unwrap(), handler: int_handler },
                RegexPattern { regex: Regex::new(r#"^"(\\.|[^"\\\n])*""#).unwrap(), handler: string_handler },
                RegexPattern { regex: Regex::new(r#"^"(\\.|[^"\\\n])*"#).unwrap(), handler: open_string_handler },
                RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals) },
                RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals) },
                RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals) },
                RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals) },
                RegexPattern { regex: Regex::new(r"^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And) },
                RegexPattern { regex: Regex::new(r"^\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or) },
                RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less) },
                RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater) },
                RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign) },
                RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not) },
                RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus) },
                RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash) },
                RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star) },
                RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash) },
                RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent) },
                RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen) },
                RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen) },
                RegexPattern { regex: Regex::new(r"^\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly) },
                RegexPattern { regex: Regex::new(r"^\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly) },
                RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket) },
                RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket) },
                RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot) },
                RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma) },
                RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon) },
            ],
            source: String::from(source),
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    /// Advances past `text` while keeping the line counter in sync with
    /// any newlines it contains.
    pub fn advance_over(&mut self, text: &str) {
        self.line += text.matches('\n').count() as u32;
        self.pos += text.len();
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn report(&mut self, error: LexError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    fn next_token(&mut self) -> Option<Token> {
        loop {
            if self.at_eof() {
                if self.emitted_eof {
                    return None;
                }
                self.emitted_eof = true;
                return Some(MK_TOKEN!(TokenKind::Eof, "", None, self.line));
            }

            let mut matched: Option<(PatternHandler, String)> = None;
            for pattern in self.patterns.iter() {
                if let Some(found) = pattern.regex.find(self.remainder()) {
                    matched = Some((pattern.handler, String::from(found.as_str())));
                    break;
                }
            }

            match matched {
                Some((handler, text)) => {
                    if let Some(token) = handler(self, &text) {
                        return Some(token);
                    }
                }
                None => {
                    // Unrecognised character: report it, skip it, resume.
                    let character = self.remainder().chars().next().unwrap();
                    self.report(LexError::UnrecognisedCharacter {
                        character,
                        line: self.line,
                    });
                    self.advance_n(character.len_utf8());
                }
            }
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

fn skip_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.advance_over(matched);
    None
}

fn open_comment_handler(lexer: &mut Lexer, _matched: &str) -> Option<Token> {
    lexer.report(LexError::UnterminatedComment { line: lexer.line() });
    let rest = String::from(lexer.remainder());
    lexer.advance_over(&rest);
    None
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let line = lexer.line();
    let token = match RESERVED_LOOKUP.get(matched) {
        Some(TokenKind::BoolLit) => MK_TOKEN!(
            TokenKind::BoolLit,
            matched,
            Some(Literal::Bool(matched == "true")),
            line
        ),
        Some(kind) => MK_TOKEN!(*kind, matched, None, line),
        None => MK_TOKEN!(TokenKind::Ident, matched, None, line),
    };
    lexer.advance_n(matched.len());
    Some(token)
}

fn int_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let line = lexer.line();
    lexer.advance_n(matched.len());
    match matched.parse::<i64>() {
        Ok(value) => Some(MK_TOKEN!(
            TokenKind::IntLit,
            matched,
            Some(Literal::Int(value)),
            line
        )),
        Err(_) => {
            lexer.report(LexError::MalformedInt {
                lexeme: String::from(matched),
                line,
            });
            None
        }
    }
}

fn float_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let line = lexer.line();
    lexer.advance_n(matched.len());
    match matched.parse::<f64>() {
        Ok(value) => Some(MK_TOKEN!(
            TokenKind::FloatLit,
            matched,
            Some(Literal::Float(value)),
            line
        )),
        Err(_) => {
            lexer.report(LexError::MalformedFloat {
                lexeme: String::from(matched),
                line,
            });
            None
        }
    }
}

fn malformed_int_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let line = lexer.line();
    lexer.report(LexError::MalformedInt {
        lexeme: String::from(matched),
        line,
    });
    lexer.advance_n(matched.len());
    None
}

fn malformed_float_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let line = lexer.line();
    lexer.report(LexError::MalformedFloat {
        lexeme: String::from(matched),
        line,
    });
    lexer.advance_n(matched.len());
    None
}

fn string_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    let line = lexer.line();
    lexer.advance_n(matched.len());

    // Strip the quotes, then decode escapes. Only \' \" \\ \n are
    // supported; any other escape poisons the whole literal.
    let inner = &matched[1..matched.len() - 1];
    let mut decoded = String::new();
    let mut chars = inner.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => decoded.push('\n'),
            Some('\'') => decoded.push('\''),
            Some('"') => decoded.push('"'),
            Some('\\') => decoded.push('\\'),
            Some(other) => {
                lexer.report(LexError::UnsupportedEscape {
                    escape: format!("\\{}", other),
                    line,
                });
                return None;
            }
            // The string pattern never ends on a lone backslash.
            None => unreachable!(),
        }
    }

    Some(MK_TOKEN!(
        TokenKind::StringLit,
        matched,
        Some(Literal::Str(decoded)),
        line
    ))
}

fn open_string_handler(lexer: &mut Lexer, matched: &str) -> Option<Token> {
    lexer.report(LexError::UnterminatedString { line: lexer.line() });
    lexer.advance_n(matched.len());
    None
}

/// Scans the whole source, returning the EOF-terminated token stream or
/// every lexical diagnostic the scan produced.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Vec<LexError>> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    for token in lexer.by_ref() {
        tokens.push(token);
    }

    if lexer.errors().is_empty() {
        Ok(tokens)
    } else {
        Err(lexer.into_errors())
    }
}
