use crate::compiler::common::{token::Token, types::Type};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    // division where at least one operand is float, only created by the typechecker
    DivFloat,
}

impl BinOp {
    /// Maps the lexeme of a compound assignment to the operation it expands to
    pub fn from_compound(lexeme: &str) -> Option<BinOp> {
        match lexeme {
            "+=" => Some(BinOp::Add),
            "-=" => Some(BinOp::Sub),
            "*=" => Some(BinOp::Mul),
            "/=" => Some(BinOp::Div),
            _ => None,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BinOp::Add => "Add",
                BinOp::Sub => "Sub",
                BinOp::Mul => "Mul",
                BinOp::Div => "Div",
                BinOp::DivFloat => "DivFloat",
            }
        )
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExprKind {
    Binary {
        left: Box<ExprKind>,
        token: Token,
        op: BinOp,
        right: Box<ExprKind>,
    },
    // literal token keeps its lexeme so that it can be emitted unmodified
    Constant {
        token: Token,
        ty: Type,
    },
    VarRead(Token),
}

pub trait PrintIndent {
    fn print_indent(&self, indent_level: usize) -> String;
}
impl PrintIndent for ExprKind {
    fn print_indent(&self, indent_level: usize) -> String {
        match &self {
            ExprKind::Binary { left, op, right, .. } => format!(
                "Binary: {}\n{}\n{}",
                op,
                indent_fmt(left.as_ref(), indent_level + 1),
                indent_fmt(right.as_ref(), indent_level + 1)
            ),
            ExprKind::Constant { token, ty } => format!("Constant: {} {}", token.unwrap_string(), ty),
            ExprKind::VarRead(name) => format!("VarRead: '{}'", name.unwrap_string()),
        }
    }
}

pub fn indent_fmt<T: PrintIndent>(object: &T, indent_level: usize) -> String {
    let indent = "-".repeat(indent_level);

    format!("{}{}", indent, object.print_indent(indent_level))
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", indent_fmt(self, 0))
    }
}
