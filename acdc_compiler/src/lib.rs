pub mod compiler;

use compiler::{
    codegen::CodeGenerator,
    common::{environment::SymbolTable, error::*},
    parser::{hir, Parser},
    scanner::Scanner,
    typechecker::{mir, TypeChecker},
};
pub use compiler::typechecker::RegisterPolicy;

use tracing::debug;

/// Settings of a single compilation
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub register_policy: RegisterPolicy,

    // print the parse-tree to stderr before checking
    pub dump_ast: bool,
}

/// The dc program together with the resource failures found while generating it.
/// A non-empty `log` means `code` is only the prefix up to the first failing item.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub code: String,
    pub log: Vec<CodegenError>,
}

impl Generated {
    pub fn is_complete(&self) -> bool {
        self.log.is_empty()
    }
}

// Scans and parses the source into the parse-tree
pub fn parse(source: &str) -> Result<hir::stmt::Program, SyntacticError> {
    Parser::new(Scanner::from_source(source)).parse()
}

// Checks the parse-tree, returning the annotated tree and the filled symbol-table
pub fn check(
    program: &hir::stmt::Program,
    options: &Options,
) -> Result<(mir::stmt::Program, SymbolTable), SemanticError> {
    TypeChecker::new(options.register_policy).check(program)
}

// Turns the annotated tree into dc text
pub fn generate(program: &mir::stmt::Program) -> Generated {
    let (code, log) = CodeGenerator::new().translate(program);

    Generated { code, log }
}

pub fn compile(source: &str, options: &Options) -> Result<Generated, AcdcError> {
    debug!(bytes = source.len(), ?options, "compiling");

    // Scan and parse into the parse-tree
    let program = parse(source)?;

    if options.dump_ast {
        eprintln!("{}", program);
    }

    // Check for semantic errors and assign registers
    let (program, _) = check(&program, options)?;

    // Emit dc, stopping at the first item without registers
    Ok(generate(&program))
}
