//! [Scanner](scanner) -> [Parser](parser) -> [Typechecker](typechecker) -> [Codegen](codegen)

pub mod codegen;
pub mod common;
pub mod parser;
pub mod scanner;
pub mod typechecker;
