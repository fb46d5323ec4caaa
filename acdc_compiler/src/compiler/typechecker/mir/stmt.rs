use crate::compiler::common::environment::SymbolRef;
use crate::compiler::common::token::Token;
use crate::compiler::typechecker::mir::expr::*;

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub items: Vec<DeclStmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DeclStmt {
    Declaration(Declarator),
    Assign { target: VarSymbol, expr: Expr },
    Print(VarSymbol),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Declarator {
    pub name: Token,
    pub entry: SymbolRef,
    pub init: Option<Expr>,
}
