use crate::{
    ast::expressions::{Expr, ExprKind, TypeSpec},
    errors::errors::SyntaxError,
    lexer::tokens::TokenKind,
    types::types::{BinOp, UnOp},
};

use super::{lookups::BindingPower, parser::Parser, stmt::type_spec_of};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, SyntaxError> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud_fn = match parser.get_nud_lookup().get(&token_kind) {
        Some(handler) => *handler,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud_fn(parser)?;

    // While the next operator binds tighter than the current level,
    // keep folding it into the left hand side.
    while parser.binding_power_of(parser.current_token_kind()) > bp {
        let token_kind = parser.current_token_kind();
        let led_fn = match parser.get_led_lookup().get(&token_kind) {
            Some(handler) => *handler,
            None => return Err(parser.unexpected()),
        };

        let operator_bp = parser.binding_power_of(token_kind);
        left = led_fn(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, SyntaxError> {
    match parser.current_token_kind() {
        TokenKind::IntLit | TokenKind::FloatLit | TokenKind::BoolLit | TokenKind::StringLit => {
            match parser.current_token().literal.clone() {
                Some(literal) => {
                    let line = parser.advance().line;
                    Ok(Expr::new(ExprKind::Const(literal), line))
                }
                None => Err(parser.unexpected()),
            }
        }
        TokenKind::Ident => {
            let token = parser.advance();
            Ok(Expr::new(ExprKind::Var(token.lexeme.clone()), token.line))
        }
        _ => Err(parser.unexpected()),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, SyntaxError> {
    let operator_token = parser.advance().clone();
    let op = binary_op_of(operator_token.kind);

    // Re-entering at the operator's own power makes same-level operators
    // associate to the left.
    let right = parse_expr(parser, bp)?;

    Ok(Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        operator_token.line,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, SyntaxError> {
    let operator_token = parser.advance().clone();
    let op = match operator_token.kind {
        TokenKind::Plus => UnOp::Plus,
        TokenKind::Dash => UnOp::Minus,
        _ => UnOp::Not,
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        operator_token.line,
    ))
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, SyntaxError> {
    let operator_token = parser.advance().clone();

    // Assignment is right associative, so the right hand side restarts
    // at the bottom of the precedence ladder.
    let value = parse_expr(parser, BindingPower::Default)?;

    match left.kind {
        ExprKind::Var(name) => Ok(Expr::new(
            ExprKind::VarAssign {
                name,
                value: Box::new(value),
            },
            operator_token.line,
        )),
        ExprKind::ArrayLookup { name, index } => Ok(Expr::new(
            ExprKind::ArrayAssign {
                name,
                index,
                value: Box::new(value),
            },
            operator_token.line,
        )),
        _ => Err(SyntaxError::InvalidAssignmentTarget { line: left.line }),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, SyntaxError> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, SyntaxError> {
    let callee = match left.kind {
        ExprKind::Var(name) => name,
        _ => return Err(SyntaxError::InvalidCallTarget { line: left.line }),
    };

    parser.expect(TokenKind::OpenParen)?;
    let mut args = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Default)?);
        if parser.current_token_kind() != TokenKind::CloseParen {
            parser.expect(TokenKind::Comma)?;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::new(ExprKind::Call { callee, args }, left.line))
}

pub fn parse_array_lookup_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, SyntaxError> {
    let name = match left.kind {
        ExprKind::Var(name) => name,
        _ => return Err(parser.unexpected_with("only a named array can be indexed")),
    };

    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::new(
        ExprKind::ArrayLookup {
            name,
            index: Box::new(index),
        },
        left.line,
    ))
}

/// `name.size`, the only member access in the language.
pub fn parse_size_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, SyntaxError> {
    let name = match left.kind {
        ExprKind::Var(name) => name,
        _ => return Err(parser.unexpected_with("only a named array has a size")),
    };

    parser.expect(TokenKind::Dot)?;
    parser.expect_error(
        TokenKind::Size,
        Some(parser.unexpected_with("expected 'size' after '.'")),
    )?;

    Ok(Expr::new(ExprKind::ArraySize { name }, left.line))
}

pub fn parse_new_array_expr(parser: &mut Parser) -> Result<Expr, SyntaxError> {
    let new_token = parser.advance().clone();

    let elem = match type_spec_of(parser.current_token_kind()) {
        Some(TypeSpec::Void) => {
            return Err(parser.unexpected_with("'void' is not a valid array element type"))
        }
        Some(spec) => {
            parser.advance();
            spec
        }
        None => return Err(parser.unexpected_with("expected an element type after 'new'")),
    };

    parser.expect(TokenKind::OpenBracket)?;
    let size = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::new(
        ExprKind::NewArray {
            elem,
            size: Box::new(size),
        },
        new_token.line,
    ))
}

fn binary_op_of(kind: TokenKind) -> BinOp {
    match kind {
        TokenKind::Plus => BinOp::Add,
        TokenKind::Dash => BinOp::Sub,
        TokenKind::Star => BinOp::Mul,
        TokenKind::Slash => BinOp::Div,
        TokenKind::Percent => BinOp::Mod,
        TokenKind::Less => BinOp::Less,
        TokenKind::LessEquals => BinOp::LessEquals,
        TokenKind::Greater => BinOp::Greater,
        TokenKind::GreaterEquals => BinOp::GreaterEquals,
        TokenKind::Equals => BinOp::Equals,
        TokenKind::NotEquals => BinOp::NotEquals,
        TokenKind::And => BinOp::And,
        // Only tokens registered with `parse_binary_expr` reach here.
        _ => BinOp::Or,
    }
}
