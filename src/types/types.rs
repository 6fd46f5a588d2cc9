use std::fmt::Display;

/// Semantic type of an expression or declaration.
///
/// `Str` only ever appears as the type of a string literal argument, and
/// `Array` wraps the element type of a declared or freshly allocated
/// array. Comparison is structural, so `Array(Int) == Array(Int)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Void,
    Bool,
    Int,
    Float,
    Str,
    Array(Box<Type>),
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Void => write!(f, "'void'"),
            Type::Bool => write!(f, "'bool'"),
            Type::Int => write!(f, "'int'"),
            Type::Float => write!(f, "'float'"),
            Type::Str => write!(f, "'string'"),
            Type::Array(elem) => write!(f, "'{}[]'", elem.bare_name()),
        }
    }
}

impl Type {
    fn bare_name(&self) -> String {
        match self {
            Type::Void => String::from("void"),
            Type::Bool => String::from("bool"),
            Type::Int => String::from("int"),
            Type::Float => String::from("float"),
            Type::Str => String::from("string"),
            Type::Array(elem) => format!("{}[]", elem.bare_name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
}

impl BinOp {
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOp::Less
                | BinOp::LessEquals
                | BinOp::Greater
                | BinOp::GreaterEquals
                | BinOp::Equals
                | BinOp::NotEquals
        )
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Less => "<",
            BinOp::LessEquals => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEquals => ">=",
            BinOp::Equals => "==",
            BinOp::NotEquals => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus,
    Minus,
    Not,
}

impl Display for UnOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            UnOp::Plus => "+",
            UnOp::Minus => "-",
            UnOp::Not => "!",
        };
        write!(f, "{}", symbol)
    }
}

/// Result type of a binary operation, or `None` when the operand pair is
/// not in the operator's domain.
///
/// Mixed int/float operands are accepted here; the checker is the one
/// inserting the widening conversion on the int side. `%` stays int-only
/// and the logical operators demand booleans on both sides.
pub fn binary_result(op: BinOp, left: &Type, right: &Type) -> Option<Type> {
    match op {
        BinOp::Mod => match (left, right) {
            (Type::Int, Type::Int) => Some(Type::Int),
            _ => None,
        },
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div => match (left, right) {
            (Type::Int, Type::Int) => Some(Type::Int),
            (l, r) if l.is_numeric() && r.is_numeric() => Some(Type::Float),
            _ => None,
        },
        BinOp::Less | BinOp::LessEquals | BinOp::Greater | BinOp::GreaterEquals => {
            match (left, right) {
                (l, r) if l.is_numeric() && r.is_numeric() => Some(Type::Bool),
                _ => None,
            }
        }
        BinOp::Equals | BinOp::NotEquals => match (left, right) {
            (l, r) if l.is_numeric() && r.is_numeric() => Some(Type::Bool),
            (Type::Bool, Type::Bool) => Some(Type::Bool),
            _ => None,
        },
        BinOp::And | BinOp::Or => match (left, right) {
            (Type::Bool, Type::Bool) => Some(Type::Bool),
            _ => None,
        },
    }
}

/// Result type of a unary operation, or `None` when the operand is not
/// in the operator's domain.
pub fn unary_result(op: UnOp, operand: &Type) -> Option<Type> {
    match op {
        UnOp::Plus | UnOp::Minus => match operand {
            Type::Int => Some(Type::Int),
            Type::Float => Some(Type::Float),
            _ => None,
        },
        UnOp::Not => match operand {
            Type::Bool => Some(Type::Bool),
            _ => None,
        },
    }
}
