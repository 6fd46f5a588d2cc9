use super::expressions::{Expr, TypeSpec};

/// A whole translation unit: the ordered list of global declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub decls: Vec<Decl>,
}

/// Top-level declaration. Inside a compound statement only the `Var`
/// form is legal; the parser enforces that.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    Func(FuncDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub type_spec: TypeSpec,
    pub name: String,
    pub is_array: bool,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub type_spec: TypeSpec,
    pub name: String,
    pub is_array: bool,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub return_type: TypeSpec,
    pub name: String,
    pub params: Vec<Param>,
    pub body: CompoundStmt,
    pub line: u32,
}

/// `{ local declarations, then statements }`
///
/// Declarations must precede statements, mirroring the grammar; the
/// split makes the scope rules of the checker straightforward.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStmt {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A bare `;`.
    Null,
    Expr(Expr),
    Compound(CompoundStmt),
    If {
        cond: Expr,
        then: Box<Stmt>,
        else_: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    Return {
        value: Option<Expr>,
        line: u32,
    },
    Break {
        line: u32,
    },
    Continue {
        line: u32,
    },
}
