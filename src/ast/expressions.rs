use crate::lexer::tokens::Literal;
use crate::types::types::{BinOp, Type, UnOp};

/// An expression node.
///
/// `ty` starts out as `None` and is filled in exactly once by the
/// checker; the parser never touches it. Re-checking a typed tree
/// recomputes the same types, so the field is written idempotently.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Option<Type>,
    pub line: u32,
}

impl Expr {
    pub fn new(kind: ExprKind, line: u32) -> Expr {
        Expr {
            kind,
            ty: None,
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Literal constant carried over from the token stream.
    Const(Literal),
    /// Plain variable reference.
    Var(String),
    /// `name[index]`
    ArrayLookup { name: String, index: Box<Expr> },
    /// `name.size`
    ArraySize { name: String },
    /// `new elem[size]`
    NewArray { elem: TypeSpec, size: Box<Expr> },
    /// Prefix operator application.
    Unary { op: UnOp, operand: Box<Expr> },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `name = value`
    VarAssign { name: String, value: Box<Expr> },
    /// `name[index] = value`
    ArrayAssign {
        name: String,
        index: Box<Expr>,
        value: Box<Expr>,
    },
    Call { callee: String, args: Vec<Expr> },
    /// Implicit int-to-float conversion inserted by the checker around
    /// the int side of a mixed arithmetic operation.
    IntToFloat(Box<Expr>),
}

impl Expr {
    /// Short node label used by the tree renderer.
    pub fn label(&self) -> String {
        match &self.kind {
            ExprKind::Const(value) => format!("Const {}", value),
            ExprKind::Var(name) => format!("Var {}", name),
            ExprKind::ArrayLookup { name, .. } => format!("ArrayLookup {}", name),
            ExprKind::ArraySize { name } => format!("ArraySize {}", name),
            ExprKind::NewArray { elem, .. } => format!("NewArray {}", elem),
            ExprKind::Unary { op, .. } => format!("Unary {}", op),
            ExprKind::Binary { op, .. } => format!("Binary {}", op),
            ExprKind::VarAssign { name, .. } => format!("VarAssign {}", name),
            ExprKind::ArrayAssign { name, .. } => format!("ArrayAssign {}", name),
            ExprKind::Call { callee, .. } => format!("Call {}", callee),
            ExprKind::IntToFloat(_) => String::from("IntToFloat"),
        }
    }
}

/// Type keyword as written in source. Converted to a semantic `Type` by
/// the checker, where the array flag of the declaration is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSpec {
    Void,
    Bool,
    Int,
    Float,
}

impl TypeSpec {
    pub fn to_type(self, is_array: bool) -> Type {
        let base = match self {
            TypeSpec::Void => Type::Void,
            TypeSpec::Bool => Type::Bool,
            TypeSpec::Int => Type::Int,
            TypeSpec::Float => Type::Float,
        };
        if is_array {
            Type::Array(Box::new(base))
        } else {
            base
        }
    }
}

impl std::fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeSpec::Void => "void",
            TypeSpec::Bool => "bool",
            TypeSpec::Int => "int",
            TypeSpec::Float => "float",
        };
        write!(f, "{}", name)
    }
}
