use crate::{
    ast::expressions::TypeSpec,
    ast::statements::{CompoundStmt, Decl, FuncDecl, Param, Stmt, VarDecl},
    errors::errors::SyntaxError,
    lexer::tokens::TokenKind,
};

use super::{
    expr::parse_expr,
    lookups::BindingPower,
    parser::Parser,
};

pub fn type_spec_of(kind: TokenKind) -> Option<TypeSpec> {
    match kind {
        TokenKind::Void => Some(TypeSpec::Void),
        TokenKind::Bool => Some(TypeSpec::Bool),
        TokenKind::Int => Some(TypeSpec::Int),
        TokenKind::Float => Some(TypeSpec::Float),
        _ => None,
    }
}

/// Parses one global declaration. Both forms start with a type keyword
/// and a name; the token after the name decides between a function and
/// a variable.
pub fn parse_decl(parser: &mut Parser) -> Result<Decl, SyntaxError> {
    let type_spec = match type_spec_of(parser.current_token_kind()) {
        Some(spec) => spec,
        None => return Err(parser.unexpected_with("expected a declaration")),
    };
    let line = parser.advance().line;
    let name = parser.expect(TokenKind::Ident)?.lexeme;

    if parser.current_token_kind() == TokenKind::OpenParen {
        let func = parse_func_decl(parser, type_spec, name, line)?;
        return Ok(Decl::Func(func));
    }

    let is_array = parse_array_suffix(parser)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Decl::Var(VarDecl {
        type_spec,
        name,
        is_array,
        line,
    }))
}

fn parse_func_decl(
    parser: &mut Parser,
    return_type: TypeSpec,
    name: String,
    line: u32,
) -> Result<FuncDecl, SyntaxError> {
    parser.expect(TokenKind::OpenParen)?;

    // `(void)` spells an empty parameter list.
    if parser.current_token_kind() == TokenKind::Void
        && parser.peek_kind(1) == TokenKind::CloseParen
    {
        parser.advance();
    }

    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        params.push(parse_param(parser)?);
        if parser.current_token_kind() != TokenKind::CloseParen {
            parser.expect(TokenKind::Comma)?;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_compound(parser)?;

    Ok(FuncDecl {
        return_type,
        name,
        params,
        body,
        line,
    })
}

fn parse_param(parser: &mut Parser) -> Result<Param, SyntaxError> {
    let type_spec = match type_spec_of(parser.current_token_kind()) {
        Some(spec) => spec,
        None => return Err(parser.unexpected_with("expected a parameter type")),
    };
    let line = parser.advance().line;
    let name = parser.expect(TokenKind::Ident)?.lexeme;
    let is_array = parse_array_suffix(parser)?;

    Ok(Param {
        type_spec,
        name,
        is_array,
        line,
    })
}

/// Consumes a `[]` suffix if one follows the declared name.
fn parse_array_suffix(parser: &mut Parser) -> Result<bool, SyntaxError> {
    if parser.current_token_kind() != TokenKind::OpenBracket {
        return Ok(false);
    }
    parser.expect(TokenKind::OpenBracket)?;
    parser.expect(TokenKind::CloseBracket)?;
    Ok(true)
}

/// `{ local declarations, then statements }`
pub fn parse_compound(parser: &mut Parser) -> Result<CompoundStmt, SyntaxError> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut decls = vec![];
    while parser.current_token().is_type_spec() {
        let type_spec = match type_spec_of(parser.current_token_kind()) {
            Some(spec) => spec,
            None => return Err(parser.unexpected()),
        };
        let line = parser.advance().line;
        let name = parser.expect(TokenKind::Ident)?.lexeme;
        let is_array = parse_array_suffix(parser)?;
        parser.expect(TokenKind::Semicolon)?;
        decls.push(VarDecl {
            type_spec,
            name,
            is_array,
            line,
        });
    }

    let mut stmts = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected_with("expected '}'"));
        }
        stmts.push(parse_stmt(parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(CompoundStmt { decls, stmts })
}

/// Dispatches on the leading token; anything without a registered
/// handler is an expression statement.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    match parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        Some(handler) => handler(parser),
        None => parse_expr_stmt(parser),
    }
}

fn parse_expr_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Stmt::Expr(expr))
}

pub fn parse_null_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    parser.expect(TokenKind::Semicolon)?;
    Ok(Stmt::Null)
}

pub fn parse_compound_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    Ok(Stmt::Compound(parse_compound(parser)?))
}

/// An `else` always binds to the nearest unmatched `if`.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    parser.expect(TokenKind::If)?;
    parser.expect(TokenKind::OpenParen)?;
    let cond = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let then = Box::new(parse_stmt(parser)?);
    let else_ = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If { cond, then, else_ })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    parser.expect(TokenKind::While)?;
    parser.expect(TokenKind::OpenParen)?;
    let cond = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::While { cond, body })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    let line = parser.expect(TokenKind::Return)?.line;

    let value = if parser.current_token_kind() == TokenKind::Semicolon {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return { value, line })
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    let line = parser.expect(TokenKind::Break)?.line;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Stmt::Break { line })
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, SyntaxError> {
    let line = parser.expect(TokenKind::Continue)?.line;
    parser.expect(TokenKind::Semicolon)?;
    Ok(Stmt::Continue { line })
}
