use crate::compiler::common::{token::Token, types::Type};
use crate::compiler::parser::hir::expr::*;
use std::fmt;

/// Root of the parse-tree, owning every item in source order
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub items: Vec<DeclStmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum DeclStmt {
    Declaration(Declaration),
    Stmt(Stmt),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Declaration {
    pub ty: Type,
    pub name: Token,
    pub init: Option<ExprKind>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Stmt {
    // compound assignments are already expanded: `a += 1` is stored as `a = a + 1`
    Assign { name: Token, expr: ExprKind },
    Print(Token),
}

impl PrintIndent for DeclStmt {
    fn print_indent(&self, indent_level: usize) -> String {
        match self {
            DeclStmt::Declaration(Declaration { ty, name, init }) => {
                let init = init
                    .as_ref()
                    .map(|expr| format!("\n{}", indent_fmt(expr, indent_level + 1)))
                    .unwrap_or_default();

                format!("Declaration: {} '{}'{}", ty, name.unwrap_string(), init)
            }
            DeclStmt::Stmt(Stmt::Assign { name, expr }) => format!(
                "Assignment: '{}'\n{}",
                name.unwrap_string(),
                indent_fmt(expr, indent_level + 1)
            ),
            DeclStmt::Stmt(Stmt::Print(name)) => format!("Print: '{}'", name.unwrap_string()),
        }
    }
}

impl fmt::Display for DeclStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", indent_fmt(self, 0))
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.items
                .iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        )
    }
}
