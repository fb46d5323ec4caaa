//! Lowers the [mir](crate::compiler::typechecker::mir) into [dc instructions](dc::Dc).<br>
//! Code is produced one top-level item at a time. When a variable turns out to have no
//! register the generator logs it once and halts, keeping everything emitted before that item.

pub mod dc;

use crate::compiler::codegen::dc::*;
use crate::compiler::common::{environment::Register, error::CodegenError};
use crate::compiler::parser::hir::expr::BinOp;
use crate::compiler::typechecker::mir::{expr::*, stmt::*};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Emitting,
    Halted,
}

pub struct CodeGenerator {
    // instructions of every fully translated item
    output: Vec<Dc>,

    // first failure, generation stops once this is non-empty
    log: Vec<CodegenError>,

    state: State,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        CodeGenerator {
            output: Vec::with_capacity(64),
            log: Vec::new(),
            state: State::Emitting,
        }
    }

    /// Translates the whole program, returning the dc text and the error log
    pub fn translate(mut self, program: &Program) -> (String, Vec<CodegenError>) {
        for item in &program.items {
            if self.state == State::Halted {
                break;
            }
            self.cg_item(item);
        }

        debug!(instructions = self.output.len(), halted = self.state == State::Halted, "generated dc");

        (render(&self.output), self.log)
    }

    // the item is only committed once all of its registers resolved
    fn cg_item(&mut self, item: &DeclStmt) {
        let mut buffer = Vec::new();

        match translate_item(item, &mut buffer) {
            Ok(()) => self.output.append(&mut buffer),
            Err(err) => {
                warn!(%err, emitted = self.output.len(), "halting code generation");

                self.log.push(err);
                self.state = State::Halted;
            }
        }
    }
}

fn translate_item(item: &DeclStmt, out: &mut Vec<Dc>) -> Result<(), CodegenError> {
    match item {
        DeclStmt::Declaration(Declarator { name, entry, init }) => {
            // a declaration without initializer needs no code
            if let Some(init) = init {
                cg_expr(init, out)?;
                out.push(Dc::Store(register(&name.unwrap_string(), entry.reg)?));
            }
        }
        DeclStmt::Assign { target, expr } => {
            cg_expr(expr, out)?;
            out.push(Dc::Store(var_register(target)?));
        }
        DeclStmt::Print(var) => {
            out.push(Dc::Load(var_register(var)?));
            out.push(Dc::Print);
            out.push(Dc::Newline);
        }
    }
    Ok(())
}

fn cg_expr(expr: &Expr, out: &mut Vec<Dc>) -> Result<(), CodegenError> {
    match &expr.kind {
        ExprKind::Constant(value) => out.push(Dc::Literal(value.clone())),
        ExprKind::VarRead(var) => out.push(Dc::Load(var_register(var)?)),
        ExprKind::Binary { left, op, right } => {
            cg_expr(left, out)?;
            cg_expr(right, out)?;
            out.push(match op {
                BinOp::Add => Dc::Add,
                BinOp::Sub => Dc::Sub,
                BinOp::Mul => Dc::Mul,
                BinOp::Div => Dc::Div,
                BinOp::DivFloat => Dc::DivFloat,
            });
        }
    }
    Ok(())
}

fn var_register(var: &VarSymbol) -> Result<Register, CodegenError> {
    register(&var.name.unwrap_string(), var.entry.reg)
}

fn register(name: &str, reg: Option<Register>) -> Result<Register, CodegenError> {
    reg.ok_or_else(|| CodegenError::RegistersExhausted { name: name.to_string() })
}
