use crate::compiler::common::{environment::SymbolRef, token::Token, types::*};
use crate::compiler::parser::hir::expr::BinOp;

/// An identifier together with the entry it resolved to
#[derive(Clone, Debug, PartialEq)]
pub struct VarSymbol {
    pub name: Token,
    pub entry: SymbolRef,
}

impl VarSymbol {
    pub fn new(name: Token, entry: SymbolRef) -> Self {
        VarSymbol { name, entry }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Binary { left: Box<Expr>, op: BinOp, right: Box<Expr> },
    Constant(String),
    VarRead(VarSymbol),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: Type,
}

impl Expr {
    pub fn descriptor(&self) -> TypeDescriptor {
        self.ty.into()
    }
}
