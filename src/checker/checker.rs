//! The semantic pass.
//!
//! A single in-order walk over the tree that resolves names against the
//! scope stack, computes a type for every expression, and rewrites mixed
//! int/float arithmetic by wrapping the int side in an `IntToFloat`
//! conversion. The walk stops at the first semantic error; `main` is
//! validated once the whole unit has been seen, so every declaration is
//! checked before the entry point requirement can fail.

use std::collections::HashMap;
use std::mem;

use crate::{
    ast::expressions::{Expr, ExprKind, TypeSpec},
    ast::statements::{CompoundStmt, Decl, FuncDecl, Param, Program, Stmt, VarDecl},
    errors::errors::CheckError,
    lexer::tokens::Literal,
    types::types::{binary_result, unary_result, Type},
};

use super::symbols::{symbol_table, ScopeStack, Symbol};

#[derive(Debug)]
pub struct Checker {
    scopes: ScopeStack,
    loop_depth: u32,
    current_return: Option<Type>,
}

/// Checks a whole program, annotating expressions with their types.
///
/// The returned `Checker` retains the global scope so the caller can
/// dump the symbol table. Checking an already annotated tree computes
/// the same types again; the pass is idempotent.
pub fn check(program: &mut Program) -> Result<Checker, CheckError> {
    let mut checker = Checker::new();

    for decl in &mut program.decls {
        match decl {
            Decl::Var(var) => checker.check_global_var(var)?,
            Decl::Func(func) => checker.check_func(func)?,
        }
    }

    checker.check_main(program)?;
    Ok(checker)
}

impl Checker {
    fn new() -> Checker {
        let mut scopes = ScopeStack::new();

        // Builtins live in the global scope like any declared function.
        scopes.declare(
            "printf",
            Symbol::Function {
                params: vec![Type::Str],
                return_type: Type::Void,
            },
        );
        scopes.declare(
            "scanf",
            Symbol::Function {
                params: vec![Type::Int],
                return_type: Type::Void,
            },
        );

        Checker {
            scopes,
            loop_depth: 0,
            current_return: None,
        }
    }

    pub fn symbol_table(&self) -> String {
        symbol_table(self.scopes.globals())
    }

    pub fn globals(&self) -> &HashMap<String, Symbol> {
        self.scopes.globals()
    }

    fn check_global_var(&mut self, decl: &VarDecl) -> Result<(), CheckError> {
        self.declare_var(decl)
    }

    fn declare_var(&mut self, decl: &VarDecl) -> Result<(), CheckError> {
        if decl.type_spec == TypeSpec::Void {
            return Err(CheckError::VoidVariable {
                name: decl.name.clone(),
                line: decl.line,
            });
        }
        let ty = decl.type_spec.to_type(decl.is_array);
        if !self.scopes.declare(&decl.name, Symbol::Variable { ty }) {
            return Err(CheckError::AlreadyDeclared {
                name: decl.name.clone(),
                line: decl.line,
            });
        }
        Ok(())
    }

    fn check_func(&mut self, func: &mut FuncDecl) -> Result<(), CheckError> {
        let params: Vec<Type> = func
            .params
            .iter()
            .map(|p| p.type_spec.to_type(p.is_array))
            .collect();
        let symbol = Symbol::Function {
            params,
            return_type: func.return_type.to_type(false),
        };

        // Declared before the body is checked, so recursion resolves.
        if !self.scopes.declare(&func.name, symbol) {
            return Err(CheckError::AlreadyDeclared {
                name: func.name.clone(),
                line: func.line,
            });
        }

        self.scopes.push();
        let previous_return = self.current_return.replace(func.return_type.to_type(false));
        let result = self.check_func_inner(func);
        self.current_return = previous_return;
        self.scopes.pop();
        result
    }

    fn check_func_inner(&mut self, func: &mut FuncDecl) -> Result<(), CheckError> {
        for param in &func.params {
            self.declare_param(param, &func.name)?;
        }
        self.check_compound(&mut func.body)
    }

    fn declare_param(&mut self, param: &Param, function: &str) -> Result<(), CheckError> {
        if param.type_spec == TypeSpec::Void {
            return Err(CheckError::VoidVariable {
                name: param.name.clone(),
                line: param.line,
            });
        }
        let ty = param.type_spec.to_type(param.is_array);
        if !self.scopes.declare(&param.name, Symbol::Parameter { ty }) {
            return Err(CheckError::DuplicateParameter {
                name: param.name.clone(),
                function: String::from(function),
                line: param.line,
            });
        }
        Ok(())
    }

    fn check_compound(&mut self, compound: &mut CompoundStmt) -> Result<(), CheckError> {
        self.scopes.push();
        let result = self.check_compound_inner(compound);
        self.scopes.pop();
        result
    }

    fn check_compound_inner(&mut self, compound: &mut CompoundStmt) -> Result<(), CheckError> {
        for decl in &compound.decls {
            self.declare_var(decl)?;
        }
        for stmt in &mut compound.stmts {
            self.check_stmt(stmt)?;
        }
        Ok(())
    }

    fn check_stmt(&mut self, stmt: &mut Stmt) -> Result<(), CheckError> {
        match stmt {
            Stmt::Null => Ok(()),
            Stmt::Expr(expr) => {
                self.check_expr(expr)?;
                Ok(())
            }
            Stmt::Compound(compound) => self.check_compound(compound),
            Stmt::If { cond, then, else_ } => {
                self.check_cond(cond)?;
                self.check_stmt(then)?;
                if let Some(else_) = else_ {
                    self.check_stmt(else_)?;
                }
                Ok(())
            }
            Stmt::While { cond, body } => {
                self.check_cond(cond)?;
                self.loop_depth += 1;
                let result = self.check_stmt(body);
                self.loop_depth -= 1;
                result
            }
            Stmt::Return { value, line } => self.check_return(value.as_mut(), *line),
            Stmt::Break { line } => {
                if self.loop_depth == 0 {
                    return Err(CheckError::BreakOutsideLoop {
                        keyword: "break",
                        line: *line,
                    });
                }
                Ok(())
            }
            Stmt::Continue { line } => {
                if self.loop_depth == 0 {
                    return Err(CheckError::BreakOutsideLoop {
                        keyword: "continue",
                        line: *line,
                    });
                }
                Ok(())
            }
        }
    }

    fn check_cond(&mut self, cond: &mut Expr) -> Result<(), CheckError> {
        let found = self.check_expr(cond)?;
        if found != Type::Bool {
            return Err(CheckError::ConditionNotBool {
                found,
                line: cond.line,
            });
        }
        Ok(())
    }

    fn check_return(&mut self, value: Option<&mut Expr>, line: u32) -> Result<(), CheckError> {
        let expected = self.current_return.clone().unwrap_or(Type::Void);

        match value {
            None => {
                if expected != Type::Void {
                    return Err(CheckError::MissingReturnValue { expected, line });
                }
                Ok(())
            }
            Some(value) => {
                let found = self.check_expr(value)?;
                if found != expected {
                    return Err(CheckError::ReturnTypeMismatch {
                        expected,
                        found,
                        line,
                    });
                }
                Ok(())
            }
        }
    }

    fn check_expr(&mut self, expr: &mut Expr) -> Result<Type, CheckError> {
        let line = expr.line;
        let ty = match &mut expr.kind {
            ExprKind::Const(literal) => match literal {
                Literal::Bool(_) => Type::Bool,
                Literal::Int(_) => Type::Int,
                Literal::Float(_) => Type::Float,
                Literal::Str(_) => Type::Str,
            },
            ExprKind::Var(name) => self.value_type_of(name, line)?,
            ExprKind::ArrayLookup { name, index } => {
                let elem = self.element_type_of(name, line)?;
                self.check_index(index)?;
                elem
            }
            ExprKind::ArraySize { name } => {
                self.element_type_of(name, line)?;
                Type::Int
            }
            ExprKind::NewArray { elem, size } => {
                let found = self.check_expr(size)?;
                if found != Type::Int {
                    return Err(CheckError::SizeNotInt { found, line: size.line });
                }
                Type::Array(Box::new(elem.to_type(false)))
            }
            ExprKind::Unary { op, operand } => {
                let found = self.check_expr(operand)?;
                match unary_result(*op, &found) {
                    Some(ty) => ty,
                    None => {
                        return Err(CheckError::IncompatibleUnaryOp {
                            op: *op,
                            operand: found,
                            line,
                        })
                    }
                }
            }
            ExprKind::Binary { op, left, right } => {
                let left_ty = self.check_expr(left)?;
                let right_ty = self.check_expr(right)?;
                let result = match binary_result(*op, &left_ty, &right_ty) {
                    Some(ty) => ty,
                    None => {
                        return Err(CheckError::IncompatibleBinaryOp {
                            op: *op,
                            left: left_ty,
                            right: right_ty,
                            line,
                        })
                    }
                };
                // Mixed arithmetic widens the int side in the tree, so
                // later passes see the conversion explicitly.
                if op.is_arithmetic() {
                    if left_ty == Type::Int && right_ty == Type::Float {
                        widen(left);
                    } else if left_ty == Type::Float && right_ty == Type::Int {
                        widen(right);
                    }
                }
                result
            }
            ExprKind::VarAssign { name, value } => {
                let expected = self.value_type_of(name, line)?;
                let found = self.check_expr(value)?;
                if found != expected {
                    return Err(CheckError::AssignmentTypeMismatch {
                        name: name.clone(),
                        expected,
                        found,
                        line,
                    });
                }
                expected
            }
            ExprKind::ArrayAssign { name, index, value } => {
                let elem = self.element_type_of(name, line)?;
                self.check_index(index)?;
                let found = self.check_expr(value)?;
                if found != elem {
                    return Err(CheckError::AssignmentTypeMismatch {
                        name: name.clone(),
                        expected: elem,
                        found,
                        line,
                    });
                }
                elem
            }
            ExprKind::Call { callee, args } => self.check_call(callee.clone(), args, line)?,
            ExprKind::IntToFloat(inner) => {
                self.check_expr(inner)?;
                Type::Float
            }
        };

        expr.ty = Some(ty.clone());
        Ok(ty)
    }

    /// Type of `name` used as a value.
    fn value_type_of(&self, name: &str, line: u32) -> Result<Type, CheckError> {
        match self.scopes.lookup(name) {
            Some(Symbol::Variable { ty }) | Some(Symbol::Parameter { ty }) => Ok(ty.clone()),
            Some(Symbol::Function { .. }) => Err(CheckError::NotAVariable {
                name: String::from(name),
                line,
            }),
            None => Err(CheckError::NotDeclared {
                name: String::from(name),
                line,
            }),
        }
    }

    /// Element type of `name`, which must be bound to an array.
    fn element_type_of(&self, name: &str, line: u32) -> Result<Type, CheckError> {
        match self.value_type_of(name, line)? {
            Type::Array(elem) => Ok(*elem),
            _ => Err(CheckError::NotAnArray {
                name: String::from(name),
                line,
            }),
        }
    }

    fn check_index(&mut self, index: &mut Expr) -> Result<(), CheckError> {
        let found = self.check_expr(index)?;
        if found != Type::Int {
            return Err(CheckError::IndexNotInt {
                found,
                line: index.line,
            });
        }
        Ok(())
    }

    fn check_call(
        &mut self,
        callee: String,
        args: &mut [Expr],
        line: u32,
    ) -> Result<Type, CheckError> {
        let (params, return_type) = match self.scopes.lookup(&callee) {
            Some(Symbol::Function {
                params,
                return_type,
            }) => (params.clone(), return_type.clone()),
            Some(_) => {
                return Err(CheckError::NotAFunction {
                    name: callee,
                    line,
                })
            }
            None => {
                return Err(CheckError::NotDeclared {
                    name: callee,
                    line,
                })
            }
        };

        if args.len() != params.len() {
            return Err(CheckError::ArityMismatch {
                name: callee,
                expected: params.len(),
                received: args.len(),
                line,
            });
        }

        for (position, (arg, expected)) in args.iter_mut().zip(&params).enumerate() {
            let found = self.check_expr(arg)?;
            if found != *expected {
                return Err(CheckError::ArgumentTypeMismatch {
                    name: callee,
                    position: position + 1,
                    expected: expected.clone(),
                    found,
                    line: arg.line,
                });
            }
        }

        Ok(return_type)
    }

    /// `main` must exist, return int and take no parameters.
    fn check_main(&self, program: &Program) -> Result<(), CheckError> {
        match self.scopes.globals().get("main") {
            Some(Symbol::Function {
                params,
                return_type,
            }) => {
                if params.is_empty() && *return_type == Type::Int {
                    Ok(())
                } else {
                    Err(CheckError::MalformedMain {
                        line: main_line(program),
                    })
                }
            }
            _ => Err(CheckError::MissingMain),
        }
    }
}

/// Wraps an already checked int expression in an `IntToFloat` node.
/// Re-checking the wrapped tree types the node as float and never wraps
/// twice.
fn widen(expr: &mut Expr) {
    let line = expr.line;
    let placeholder = Expr::new(ExprKind::Const(Literal::Int(0)), line);
    let inner = mem::replace(expr, placeholder);
    expr.kind = ExprKind::IntToFloat(Box::new(inner));
    expr.ty = Some(Type::Float);
}

fn main_line(program: &Program) -> u32 {
    program
        .decls
        .iter()
        .find_map(|decl| match decl {
            Decl::Func(func) if func.name == "main" => Some(func.line),
            _ => None,
        })
        .unwrap_or(1)
}
