//! Parser state and the top level parse entry point.
//!
//! The parser walks the token stream with a cursor and dispatches through
//! lookup tables:
//!
//! - statement handlers keyed by leading token
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - binding powers for operator precedence

use std::collections::HashMap;

use crate::{
    ast::statements::Program,
    errors::errors::SyntaxError,
    lexer::tokens::{Token, TokenKind},
    MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_decl,
};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // The cursor relies on an Eof sentinel at the end of the stream.
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map(|t| t.line).unwrap_or(1);
            tokens.push(MK_TOKEN!(TokenKind::Eof, "", None, line));
        }
        let mut parser = Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        parser
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    pub fn current_line(&self) -> u32 {
        self.current_token().line
    }

    /// Kind of the token `offset` places ahead of the cursor.
    pub fn peek_kind(&self, offset: usize) -> TokenKind {
        let pos = (self.pos + offset).min(self.tokens.len() - 1);
        self.tokens[pos].kind
    }

    /// Advances past the current token and returns it.
    pub fn advance(&mut self) -> &Token {
        let pos = self.pos.min(self.tokens.len() - 1);
        self.pos += 1;
        &self.tokens[pos]
    }

    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<SyntaxError>,
    ) -> Result<Token, SyntaxError> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.unexpected()),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, SyntaxError> {
        self.expect_error(expected_kind, None)
    }

    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len() && self.current_token_kind() != TokenKind::Eof
    }

    /// Builds the default error for the current token.
    pub fn unexpected(&self) -> SyntaxError {
        let token = self.current_token();
        SyntaxError::UnexpectedToken {
            token: self.describe_current(),
            line: token.line,
        }
    }

    pub fn unexpected_with(&self, message: &str) -> SyntaxError {
        SyntaxError::UnexpectedTokenDetailed {
            token: self.describe_current(),
            message: String::from(message),
            line: self.current_line(),
        }
    }

    fn describe_current(&self) -> String {
        let token = self.current_token();
        if token.lexeme.is_empty() {
            token.kind.to_string()
        } else {
            token.lexeme.clone()
        }
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn binding_power_of(&self, kind: TokenKind) -> BindingPower {
        *self
            .binding_power_lookup
            .get(&kind)
            .unwrap_or(&BindingPower::Default)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token. The
    /// binding power is only defaulted, never overwritten, so a token
    /// carrying both a prefix and an infix role keeps its infix power.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.binding_power_lookup
            .entry(kind)
            .or_insert(BindingPower::Primary);
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a leading token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }
}

/// Parses a whole token stream into a `Program`.
///
/// The first unexpected token aborts the parse; there is no
/// resynchronization.
pub fn parse(tokens: Vec<Token>) -> Result<Program, SyntaxError> {
    let mut parser = Parser::new(tokens);
    let mut decls = vec![];

    while parser.has_tokens() {
        decls.push(parse_decl(&mut parser)?);
    }

    Ok(Program { decls })
}
