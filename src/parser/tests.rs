//! Unit tests for the parser module.
//!
//! Programs are scanned with the real lexer, then the resulting trees
//! are destructured to check shape, precedence and associativity.

use super::parser::parse;
use crate::{
    ast::expressions::{ExprKind, TypeSpec},
    ast::statements::{Decl, Program, Stmt},
    errors::errors::SyntaxError,
    lexer::lexer::tokenize,
    types::types::{BinOp, UnOp},
};

fn parse_source(source: &str) -> Result<Program, SyntaxError> {
    parse(tokenize(source).unwrap())
}

/// Parses `source` as the body of `void f() { ... }` and returns the
/// first statement.
fn first_stmt(source: &str) -> Stmt {
    let program = parse_source(&format!("void f() {{ {} }}", source)).unwrap();
    match &program.decls[0] {
        Decl::Func(func) => func.body.stmts[0].clone(),
        other => panic!("expected a function, got {:?}", other),
    }
}

fn first_expr(source: &str) -> ExprKind {
    match first_stmt(&format!("{};", source)) {
        Stmt::Expr(expr) => expr.kind,
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_global_var_decls() {
    let program = parse_source("int x; float ys[];").unwrap();

    assert_eq!(program.decls.len(), 2);
    match &program.decls[0] {
        Decl::Var(var) => {
            assert_eq!(var.type_spec, TypeSpec::Int);
            assert_eq!(var.name, "x");
            assert!(!var.is_array);
        }
        other => panic!("expected a variable, got {:?}", other),
    }
    match &program.decls[1] {
        Decl::Var(var) => {
            assert_eq!(var.type_spec, TypeSpec::Float);
            assert!(var.is_array);
        }
        other => panic!("expected a variable, got {:?}", other),
    }
}

#[test]
fn test_func_decl_with_params() {
    let program = parse_source("int add(int a, float b, int xs[]) { return a; }").unwrap();

    match &program.decls[0] {
        Decl::Func(func) => {
            assert_eq!(func.return_type, TypeSpec::Int);
            assert_eq!(func.name, "add");
            assert_eq!(func.params.len(), 3);
            assert_eq!(func.params[1].type_spec, TypeSpec::Float);
            assert!(func.params[2].is_array);
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_void_spells_empty_param_list() {
    let program = parse_source("int zero(void) { return 0; }").unwrap();

    match &program.decls[0] {
        Decl::Func(func) => assert!(func.params.is_empty()),
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_local_decls_precede_stmts() {
    let program = parse_source("void f() { int x; bool done; x = 1; }").unwrap();

    match &program.decls[0] {
        Decl::Func(func) => {
            assert_eq!(func.body.decls.len(), 2);
            assert_eq!(func.body.stmts.len(), 1);
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    match first_expr("1 + 2 * 3") {
        ExprKind::Binary { op, right, .. } => {
            assert_eq!(op, BinOp::Add);
            match right.kind {
                ExprKind::Binary { op, .. } => assert_eq!(op, BinOp::Mul),
                other => panic!("expected a product on the right, got {:?}", other),
            }
        }
        other => panic!("expected a sum, got {:?}", other),
    }
}

#[test]
fn test_same_level_operators_are_left_associative() {
    match first_expr("10 - 4 - 3") {
        ExprKind::Binary { op, left, .. } => {
            assert_eq!(op, BinOp::Sub);
            match left.kind {
                ExprKind::Binary { op, .. } => assert_eq!(op, BinOp::Sub),
                other => panic!("expected a nested difference, got {:?}", other),
            }
        }
        other => panic!("expected a difference, got {:?}", other),
    }
}

#[test]
fn test_grouping_overrides_precedence() {
    match first_expr("(1 + 2) * 3") {
        ExprKind::Binary { op, left, .. } => {
            assert_eq!(op, BinOp::Mul);
            match left.kind {
                ExprKind::Binary { op, .. } => assert_eq!(op, BinOp::Add),
                other => panic!("expected a sum on the left, got {:?}", other),
            }
        }
        other => panic!("expected a product, got {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    match first_expr("a = b = 1") {
        ExprKind::VarAssign { name, value } => {
            assert_eq!(name, "a");
            match value.kind {
                ExprKind::VarAssign { name, .. } => assert_eq!(name, "b"),
                other => panic!("expected a nested assignment, got {:?}", other),
            }
        }
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_unary_binds_tighter_than_multiplication() {
    match first_expr("-a * b") {
        ExprKind::Binary { op, left, .. } => {
            assert_eq!(op, BinOp::Mul);
            match left.kind {
                ExprKind::Unary { op, .. } => assert_eq!(op, UnOp::Minus),
                other => panic!("expected a negation on the left, got {:?}", other),
            }
        }
        other => panic!("expected a product, got {:?}", other),
    }
}

#[test]
fn test_logical_precedence() {
    // a || b && c parses as a || (b && c)
    match first_expr("a || b && c") {
        ExprKind::Binary { op, right, .. } => {
            assert_eq!(op, BinOp::Or);
            match right.kind {
                ExprKind::Binary { op, .. } => assert_eq!(op, BinOp::And),
                other => panic!("expected a conjunction, got {:?}", other),
            }
        }
        other => panic!("expected a disjunction, got {:?}", other),
    }
}

#[test]
fn test_array_lookup_and_assign() {
    match first_expr("a[i + 1] = 2") {
        ExprKind::ArrayAssign { name, index, .. } => {
            assert_eq!(name, "a");
            assert!(matches!(index.kind, ExprKind::Binary { .. }));
        }
        other => panic!("expected an array assignment, got {:?}", other),
    }
}

#[test]
fn test_array_size_member() {
    match first_expr("a.size") {
        ExprKind::ArraySize { name } => assert_eq!(name, "a"),
        other => panic!("expected a size access, got {:?}", other),
    }
}

#[test]
fn test_new_array_expr() {
    match first_expr("a = new int[n * 2]") {
        ExprKind::VarAssign { value, .. } => match value.kind {
            ExprKind::NewArray { elem, .. } => assert_eq!(elem, TypeSpec::Int),
            other => panic!("expected an allocation, got {:?}", other),
        },
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_new_void_array_is_rejected() {
    let error = parse_source("void f() { x = new void[3]; }").unwrap_err();

    assert!(matches!(
        error,
        SyntaxError::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_call_with_args() {
    match first_expr("add(1, 2.5)") {
        ExprKind::Call { callee, args } => {
            assert_eq!(callee, "add");
            assert_eq!(args.len(), 2);
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_call_target_must_be_a_name() {
    let error = parse_source("void f() { 3(1); }").unwrap_err();

    assert_eq!(error, SyntaxError::InvalidCallTarget { line: 1 });
}

#[test]
fn test_invalid_assignment_target() {
    let error = parse_source("void f() { 1 = 2; }").unwrap_err();

    assert_eq!(error, SyntaxError::InvalidAssignmentTarget { line: 1 });
}

#[test]
fn test_dangling_else_binds_nearest_if() {
    let stmt = first_stmt("if (a) if (b) x = 1; else x = 2;");

    match stmt {
        Stmt::If { then, else_, .. } => {
            assert!(else_.is_none());
            assert!(matches!(*then, Stmt::If { else_: Some(_), .. }));
        }
        other => panic!("expected an if, got {:?}", other),
    }
}

#[test]
fn test_while_with_break_and_continue() {
    let stmt = first_stmt("while (x > 0) { x = x - 1; if (x == 2) break; continue; }");

    match stmt {
        Stmt::While { body, .. } => match *body {
            Stmt::Compound(compound) => {
                assert_eq!(compound.stmts.len(), 3);
                assert!(matches!(compound.stmts[2], Stmt::Continue { .. }));
            }
            other => panic!("expected a compound body, got {:?}", other),
        },
        other => panic!("expected a while, got {:?}", other),
    }
}

#[test]
fn test_return_without_value() {
    assert!(matches!(
        first_stmt("return;"),
        Stmt::Return { value: None, .. }
    ));
}

#[test]
fn test_null_stmt() {
    assert!(matches!(first_stmt(";"), Stmt::Null));
}

#[test]
fn test_missing_semicolon_is_an_error() {
    let error = parse_source("void f() { x = 1 }").unwrap_err();

    assert!(matches!(error, SyntaxError::UnexpectedToken { .. }));
}

#[test]
fn test_top_level_requires_a_declaration() {
    let error = parse_source("x = 1;").unwrap_err();

    match error {
        SyntaxError::UnexpectedTokenDetailed { message, .. } => {
            assert_eq!(message, "expected a declaration");
        }
        other => panic!("expected a detailed error, got {:?}", other),
    }
}

#[test]
fn test_unterminated_compound() {
    let error = parse_source("void f() { x = 1;").unwrap_err();

    assert!(matches!(
        error,
        SyntaxError::UnexpectedTokenDetailed { .. }
    ));
}

#[test]
fn test_error_reports_line() {
    let error = parse_source("void f() {\n  x = ;\n}").unwrap_err();

    assert_eq!(error.line(), 2);
}
