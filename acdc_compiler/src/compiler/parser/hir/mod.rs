//! Parse-tree produced by the [parser](crate::compiler::parser).
//! It is never mutated afterwards, the typechecker builds a separate [mir](crate::compiler::typechecker::mir).

pub mod expr;
pub mod stmt;
