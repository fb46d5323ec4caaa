//! Type-annotated tree produced by the [typechecker](crate::compiler::typechecker).
//! Every identifier carries its resolved symbol-table entry and every division is resolved
//! into integer or fixed-precision division, so codegen never has to re-derive types.

pub mod expr;
pub mod stmt;
