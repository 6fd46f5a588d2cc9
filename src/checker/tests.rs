//! Unit tests for the semantic pass.
//!
//! Sources go through the real lexer and parser; assertions inspect the
//! returned error or the annotated tree.

use super::checker::{check, Checker};
use super::symbols::{ScopeStack, Symbol};
use crate::{
    ast::expressions::ExprKind,
    ast::statements::{Decl, Program, Stmt},
    errors::errors::CheckError,
    lexer::lexer::tokenize,
    parser::parser::parse,
    types::types::{BinOp, Type},
};

fn parse_source(source: &str) -> Program {
    parse(tokenize(source).unwrap()).unwrap()
}

fn check_source(source: &str) -> Result<Checker, CheckError> {
    let mut program = parse_source(source);
    check(&mut program)
}

/// Wraps `body` in a well formed `main` and checks it.
fn check_body(body: &str) -> Result<Checker, CheckError> {
    check_source(&format!("int main() {{ {} return 0; }}", body))
}

#[test]
fn test_minimal_program() {
    assert!(check_source("int main() { return 0; }").is_ok());
}

#[test]
fn test_missing_main() {
    assert_eq!(
        check_source("int helper() { return 1; }").unwrap_err(),
        CheckError::MissingMain
    );
}

#[test]
fn test_variable_named_main_is_not_enough() {
    assert_eq!(
        check_source("int main;").unwrap_err(),
        CheckError::MissingMain
    );
}

#[test]
fn test_malformed_main() {
    assert_eq!(
        check_source("void main() { }").unwrap_err(),
        CheckError::MalformedMain { line: 1 }
    );
    assert_eq!(
        check_source("int main(int argc) { return argc; }").unwrap_err(),
        CheckError::MalformedMain { line: 1 }
    );
}

#[test]
fn test_undeclared_variable() {
    assert_eq!(
        check_body("x = 1;").unwrap_err(),
        CheckError::NotDeclared {
            name: String::from("x"),
            line: 1
        }
    );
}

#[test]
fn test_redeclaration_in_same_scope() {
    let error = check_body("int x; int x;").unwrap_err();

    assert!(matches!(error, CheckError::AlreadyDeclared { name, .. } if name == "x"));
}

#[test]
fn test_shadowing_in_inner_block_is_allowed() {
    assert!(check_body("int x; x = 1; { float x; x = 2.5; }").is_ok());
}

#[test]
fn test_global_and_local_may_share_a_name() {
    assert!(check_source("int x; int main() { bool x; x = true; return 0; }").is_ok());
}

#[test]
fn test_void_variable_is_rejected() {
    assert!(matches!(
        check_source("void x; int main() { return 0; }").unwrap_err(),
        CheckError::VoidVariable { .. }
    ));
    assert!(matches!(
        check_body("void x;").unwrap_err(),
        CheckError::VoidVariable { .. }
    ));
    assert!(matches!(
        check_source("int f(void p) { return 0; } int main() { return 0; }").unwrap_err(),
        CheckError::VoidVariable { .. }
    ));
}

#[test]
fn test_duplicate_parameter() {
    let error =
        check_source("int f(int a, float a) { return 0; } int main() { return 0; }").unwrap_err();

    assert_eq!(
        error,
        CheckError::DuplicateParameter {
            name: String::from("a"),
            function: String::from("f"),
            line: 1
        }
    );
}

#[test]
fn test_condition_must_be_bool() {
    assert!(matches!(
        check_body("if (1) ;").unwrap_err(),
        CheckError::ConditionNotBool { found: Type::Int, .. }
    ));
    assert!(matches!(
        check_body("while (1.5) ;").unwrap_err(),
        CheckError::ConditionNotBool { found: Type::Float, .. }
    ));
}

#[test]
fn test_incompatible_binary_operands() {
    let error = check_body("int x; x = 1 + true;").unwrap_err();

    assert!(matches!(
        error,
        CheckError::IncompatibleBinaryOp {
            op: BinOp::Add,
            left: Type::Int,
            right: Type::Bool,
            ..
        }
    ));
}

#[test]
fn test_modulo_rejects_floats() {
    assert!(matches!(
        check_body("float y; y = 1.0 % 2.0;").unwrap_err(),
        CheckError::IncompatibleBinaryOp { op: BinOp::Mod, .. }
    ));
}

#[test]
fn test_unary_not_requires_bool() {
    assert!(matches!(
        check_body("bool b; b = !3;").unwrap_err(),
        CheckError::IncompatibleUnaryOp { .. }
    ));
}

#[test]
fn test_mixed_arithmetic_widens_the_int_side() {
    let mut program = parse_source("int main() { float y; y = 1 + 2.5; return 0; }");
    check(&mut program).unwrap();

    let main = match &program.decls[0] {
        Decl::Func(func) => func,
        other => panic!("expected a function, got {:?}", other),
    };
    let value = match &main.body.stmts[0] {
        Stmt::Expr(expr) => match &expr.kind {
            ExprKind::VarAssign { value, .. } => value,
            other => panic!("expected an assignment, got {:?}", other),
        },
        other => panic!("expected an expression statement, got {:?}", other),
    };

    assert_eq!(value.ty, Some(Type::Float));
    match &value.kind {
        ExprKind::Binary { left, right, .. } => {
            assert!(matches!(left.kind, ExprKind::IntToFloat(_)));
            assert_eq!(left.ty, Some(Type::Float));
            assert!(matches!(right.kind, ExprKind::Const(_)));
        }
        other => panic!("expected a sum, got {:?}", other),
    }
}

#[test]
fn test_comparisons_do_not_insert_conversions() {
    let mut program = parse_source("int main() { bool b; b = 1 < 2.5; return 0; }");
    check(&mut program).unwrap();

    let main = match &program.decls[0] {
        Decl::Func(func) => func,
        other => panic!("expected a function, got {:?}", other),
    };
    match &main.body.stmts[0] {
        Stmt::Expr(expr) => match &expr.kind {
            ExprKind::VarAssign { value, .. } => match &value.kind {
                ExprKind::Binary { left, .. } => {
                    assert!(matches!(left.kind, ExprKind::Const(_)));
                }
                other => panic!("expected a comparison, got {:?}", other),
            },
            other => panic!("expected an assignment, got {:?}", other),
        },
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_checking_twice_yields_the_same_tree() {
    let mut program = parse_source(
        "int main() { float y; int i; i = 3; y = i * 2.0 + 1.5; return 0; }",
    );
    check(&mut program).unwrap();
    let once = program.clone();

    check(&mut program).unwrap();
    assert_eq!(program, once);
}

#[test]
fn test_assignment_type_mismatch() {
    let error = check_body("int x; x = 1.5;").unwrap_err();

    assert_eq!(
        error,
        CheckError::AssignmentTypeMismatch {
            name: String::from("x"),
            expected: Type::Int,
            found: Type::Float,
            line: 1
        }
    );
}

#[test]
fn test_array_operations() {
    assert!(check_body("int a[]; int n; a = new int[10]; a[0] = a.size; n = a[1];").is_ok());
}

#[test]
fn test_array_index_must_be_int() {
    assert!(matches!(
        check_body("int a[]; a = new int[5]; a[1.5] = 0;").unwrap_err(),
        CheckError::IndexNotInt { found: Type::Float, .. }
    ));
}

#[test]
fn test_indexing_a_scalar() {
    assert!(matches!(
        check_body("int x; x = 1; x[0] = 2;").unwrap_err(),
        CheckError::NotAnArray { .. }
    ));
}

#[test]
fn test_size_of_a_scalar() {
    assert!(matches!(
        check_body("int x; int n; n = x.size;").unwrap_err(),
        CheckError::NotAnArray { .. }
    ));
}

#[test]
fn test_new_array_size_must_be_int() {
    assert!(matches!(
        check_body("int a[]; a = new int[1.5];").unwrap_err(),
        CheckError::SizeNotInt { found: Type::Float, .. }
    ));
}

#[test]
fn test_array_element_type_mismatch() {
    assert!(matches!(
        check_body("int a[]; a = new float[3];").unwrap_err(),
        CheckError::AssignmentTypeMismatch { .. }
    ));
}

#[test]
fn test_call_checks_arity_and_types() {
    let ok = "float half(float v) { return v / 2.0; }\n\
              int main() { float y; y = half(3.0); return 0; }";
    assert!(check_source(ok).is_ok());

    let arity = "float half(float v) { return v / 2.0; }\n\
                 int main() { float y; y = half(3.0, 1.0); return 0; }";
    assert!(matches!(
        check_source(arity).unwrap_err(),
        CheckError::ArityMismatch { expected: 1, received: 2, .. }
    ));

    let arg = "float half(float v) { return v / 2.0; }\n\
               int main() { float y; y = half(true); return 0; }";
    assert!(matches!(
        check_source(arg).unwrap_err(),
        CheckError::ArgumentTypeMismatch { position: 1, .. }
    ));
}

#[test]
fn test_calling_a_variable() {
    assert!(matches!(
        check_body("int x; x = x(1);").unwrap_err(),
        CheckError::NotAFunction { .. }
    ));
}

#[test]
fn test_function_name_as_value() {
    let source = "int f() { return 1; } int main() { int x; x = f + 1; return 0; }";

    assert!(matches!(
        check_source(source).unwrap_err(),
        CheckError::NotAVariable { .. }
    ));
}

#[test]
fn test_recursion_is_allowed() {
    let source = "int fact(int n) {\n\
                    if (n <= 1) return 1;\n\
                    return n * fact(n - 1);\n\
                  }\n\
                  int main() { return fact(5); }";

    assert!(check_source(source).is_ok());
}

#[test]
fn test_forward_reference_fails() {
    let source = "int main() { return later(); }\n\
                  int later() { return 1; }";

    assert!(matches!(
        check_source(source).unwrap_err(),
        CheckError::NotDeclared { name, .. } if name == "later"
    ));
}

#[test]
fn test_builtin_printf() {
    assert!(check_body("printf(\"hello\\n\");").is_ok());
    assert!(matches!(
        check_body("printf(1);").unwrap_err(),
        CheckError::ArgumentTypeMismatch { .. }
    ));
}

#[test]
fn test_builtins_cannot_be_redefined() {
    assert!(matches!(
        check_source("void printf(int x) { } int main() { return 0; }").unwrap_err(),
        CheckError::AlreadyDeclared { name, .. } if name == "printf"
    ));
}

#[test]
fn test_break_outside_loop() {
    assert_eq!(
        check_body("break;").unwrap_err(),
        CheckError::BreakOutsideLoop {
            keyword: "break",
            line: 1
        }
    );
    assert_eq!(
        check_body("continue;").unwrap_err(),
        CheckError::BreakOutsideLoop {
            keyword: "continue",
            line: 1
        }
    );
}

#[test]
fn test_break_inside_nested_block_of_loop() {
    assert!(check_body("while (true) { if (true) { break; } }").is_ok());
}

#[test]
fn test_break_after_loop_is_still_outside() {
    assert!(matches!(
        check_body("while (true) { break; } continue;").unwrap_err(),
        CheckError::BreakOutsideLoop { keyword: "continue", .. }
    ));
}

#[test]
fn test_return_type_mismatch() {
    assert!(matches!(
        check_source("int main() { return 1.5; }").unwrap_err(),
        CheckError::ReturnTypeMismatch { expected: Type::Int, found: Type::Float, .. }
    ));
}

#[test]
fn test_return_without_value_in_int_function() {
    assert!(matches!(
        check_source("int main() { return; }").unwrap_err(),
        CheckError::MissingReturnValue { expected: Type::Int, .. }
    ));
}

#[test]
fn test_return_value_in_void_function() {
    let source = "void f() { return 1; } int main() { return 0; }";

    assert!(matches!(
        check_source(source).unwrap_err(),
        CheckError::ReturnTypeMismatch { expected: Type::Void, .. }
    ));
}

#[test]
fn test_bare_return_in_void_function() {
    assert!(check_source("void f() { return; } int main() { return 0; }").is_ok());
}

#[test]
fn test_symbol_table_lists_globals() {
    let checker = check_source("int counter; int main() { return 0; }").unwrap();
    let table = checker.symbol_table();

    assert!(table.contains("counter"));
    assert!(table.contains("main"));
    assert!(table.contains("printf"));
    assert!(table.contains("variable"));
}

#[test]
fn test_scope_stack_shadowing_and_pop() {
    let mut scopes = ScopeStack::new();
    assert!(scopes.declare("x", Symbol::Variable { ty: Type::Int }));
    assert!(!scopes.declare("x", Symbol::Variable { ty: Type::Float }));

    scopes.push();
    assert!(scopes.declare("x", Symbol::Variable { ty: Type::Float }));
    assert_eq!(
        scopes.lookup("x"),
        Some(&Symbol::Variable { ty: Type::Float })
    );

    scopes.pop();
    assert_eq!(
        scopes.lookup("x"),
        Some(&Symbol::Variable { ty: Type::Int })
    );

    // The global scope survives a stray pop.
    scopes.pop();
    assert_eq!(scopes.depth(), 1);
    assert!(scopes.lookup("x").is_some());
}
