//! Indented text rendering of the syntax tree, the "dump tree" path of
//! the driver. Typed expressions print their computed type so a dump
//! after checking shows the widening conversions.

use super::expressions::{Expr, ExprKind};
use super::statements::{CompoundStmt, Decl, FuncDecl, Program, Stmt, VarDecl};

pub fn render_program(program: &Program) -> String {
    let mut out = String::from("Program\n");
    for decl in &program.decls {
        match decl {
            Decl::Var(var) => render_var_decl(var, 1, &mut out),
            Decl::Func(func) => render_func_decl(func, 1, &mut out),
        }
    }
    out
}

fn push_line(depth: usize, text: &str, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}

fn render_var_decl(decl: &VarDecl, depth: usize, out: &mut String) {
    let suffix = if decl.is_array { "[]" } else { "" };
    push_line(
        depth,
        &format!("VarDecl {} {}{}", decl.type_spec, decl.name, suffix),
        out,
    );
}

fn render_func_decl(decl: &FuncDecl, depth: usize, out: &mut String) {
    let params: Vec<String> = decl
        .params
        .iter()
        .map(|p| {
            let suffix = if p.is_array { "[]" } else { "" };
            format!("{} {}{}", p.type_spec, p.name, suffix)
        })
        .collect();
    push_line(
        depth,
        &format!(
            "FuncDecl {} {}({})",
            decl.return_type,
            decl.name,
            params.join(", ")
        ),
        out,
    );
    render_compound(&decl.body, depth + 1, out);
}

fn render_compound(compound: &CompoundStmt, depth: usize, out: &mut String) {
    push_line(depth, "Compound", out);
    for decl in &compound.decls {
        render_var_decl(decl, depth + 1, out);
    }
    for stmt in &compound.stmts {
        render_stmt(stmt, depth + 1, out);
    }
}

fn render_stmt(stmt: &Stmt, depth: usize, out: &mut String) {
    match stmt {
        Stmt::Null => push_line(depth, "Null", out),
        Stmt::Expr(expr) => {
            push_line(depth, "ExprStmt", out);
            render_expr(expr, depth + 1, out);
        }
        Stmt::Compound(compound) => render_compound(compound, depth, out),
        Stmt::If { cond, then, else_ } => {
            push_line(depth, "If", out);
            render_expr(cond, depth + 1, out);
            render_stmt(then, depth + 1, out);
            if let Some(else_) = else_ {
                push_line(depth, "Else", out);
                render_stmt(else_, depth + 1, out);
            }
        }
        Stmt::While { cond, body } => {
            push_line(depth, "While", out);
            render_expr(cond, depth + 1, out);
            render_stmt(body, depth + 1, out);
        }
        Stmt::Return { value, .. } => {
            push_line(depth, "Return", out);
            if let Some(value) = value {
                render_expr(value, depth + 1, out);
            }
        }
        Stmt::Break { .. } => push_line(depth, "Break", out),
        Stmt::Continue { .. } => push_line(depth, "Continue", out),
    }
}

fn render_expr(expr: &Expr, depth: usize, out: &mut String) {
    let label = match &expr.ty {
        Some(ty) => format!("{} : {}", expr.label(), ty),
        None => expr.label(),
    };
    push_line(depth, &label, out);
    match &expr.kind {
        ExprKind::Const(_) | ExprKind::Var(_) | ExprKind::ArraySize { .. } => {}
        ExprKind::ArrayLookup { index, .. } => render_expr(index, depth + 1, out),
        ExprKind::NewArray { size, .. } => render_expr(size, depth + 1, out),
        ExprKind::Unary { operand, .. } => render_expr(operand, depth + 1, out),
        ExprKind::Binary { left, right, .. } => {
            render_expr(left, depth + 1, out);
            render_expr(right, depth + 1, out);
        }
        ExprKind::VarAssign { value, .. } => render_expr(value, depth + 1, out),
        ExprKind::ArrayAssign { index, value, .. } => {
            render_expr(index, depth + 1, out);
            render_expr(value, depth + 1, out);
        }
        ExprKind::Call { args, .. } => {
            for arg in args {
                render_expr(arg, depth + 1, out);
            }
        }
        ExprKind::IntToFloat(inner) => render_expr(inner, depth + 1, out),
    }
}
