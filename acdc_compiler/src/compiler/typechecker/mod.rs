//! Converts the hir parse-tree into the type-annotated [mir].<br>
//! Checks declarations and uses of variables, computes the type of every expression,
//! widens int into float and hands out a register for every declared variable.
//! Stops at the first semantic error.

pub mod mir;

use crate::compiler::common::{environment::*, error::*, token::Token, types::*};
use crate::compiler::parser::hir;
use crate::compiler::parser::hir::expr::BinOp;
use tracing::{debug, trace, warn};

/// What happens when more variables are declared than there are registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterPolicy {
    /// Declarations past the last register stay unassigned; codegen reports it when the
    /// variable is first used
    #[default]
    Lazy,
    /// The first declaration that doesn't get a register is a semantic error
    Eager,
}

pub struct TypeChecker {
    // symbol table, one per compilation
    env: SymbolTable,

    // index of the next register to hand out
    next_register: usize,

    policy: RegisterPolicy,

    // checked items in source order
    items: Vec<mir::stmt::DeclStmt>,
}

impl TypeChecker {
    pub fn new(policy: RegisterPolicy) -> Self {
        TypeChecker {
            env: SymbolTable::new(),
            next_register: 0,
            policy,
            items: Vec::new(),
        }
    }

    /// Checks every item of the program. Returns the annotated tree and the filled
    /// symbol-table, or the first semantic error found.
    pub fn check(
        mut self,
        program: &hir::stmt::Program,
    ) -> Result<(mir::stmt::Program, SymbolTable), SemanticError> {
        for item in &program.items {
            // items after the first error are skipped entirely
            self.visit_item(item)?;
        }

        debug!(items = self.items.len(), variables = self.env.len(), "checked program");

        Ok((mir::stmt::Program { items: self.items }, self.env))
    }

    fn visit_item(&mut self, item: &hir::stmt::DeclStmt) -> Result<TypeDescriptor, SemanticError> {
        match item {
            hir::stmt::DeclStmt::Declaration(decl) => self.declaration(decl),
            hir::stmt::DeclStmt::Stmt(hir::stmt::Stmt::Assign { name, expr }) => {
                self.assignment(name, expr)
            }
            hir::stmt::DeclStmt::Stmt(hir::stmt::Stmt::Print(name)) => self.print(name),
        }
    }

    fn declaration(&mut self, decl: &hir::stmt::Declaration) -> Result<TypeDescriptor, SemanticError> {
        let name = decl.name.unwrap_string();
        let reg = Register::nth(self.next_register);

        if reg.is_none() && self.policy == RegisterPolicy::Eager && !self.env.contains(&name) {
            return Err(SemanticError::RegistersExhausted {
                name,
                max: REGISTER_COUNT,
                line: decl.name.line,
            });
        }

        // a failed insertion doesn't use up a register
        let entry = self.env.declare(&decl.name, Attributes::new(decl.ty, reg))?;
        self.next_register += 1;

        match reg {
            Some(reg) => trace!(%name, register = %reg, "assigned register"),
            None => warn!(%name, line = decl.name.line, "no register left for variable"),
        }

        // the variable is already visible inside its own initializer
        let init = match &decl.init {
            Some(init) => {
                let init = self.visit_expr(init)?;

                if !TypeDescriptor::from(decl.ty).compatible(&init.descriptor()) {
                    return Err(SemanticError::IncompatibleInit {
                        name,
                        declared: decl.ty,
                        found: init.ty,
                        line: decl.name.line,
                    });
                }
                Some(store_into(decl.ty, init))
            }
            None => None,
        };

        self.items.push(mir::stmt::DeclStmt::Declaration(mir::stmt::Declarator {
            name: decl.name.clone(),
            entry,
            init,
        }));

        Ok(TypeDescriptor::Ok)
    }

    fn assignment(&mut self, name: &Token, expr: &hir::expr::ExprKind) -> Result<TypeDescriptor, SemanticError> {
        let target = self.ident(name)?;
        let expr = self.visit_expr(expr)?;

        if !TypeDescriptor::from(target.entry.ty).compatible(&expr.descriptor()) {
            return Err(SemanticError::IncompatibleAssign {
                name: name.unwrap_string(),
                target: target.entry.ty,
                found: expr.ty,
                line: name.line,
            });
        }

        let expr = store_into(target.entry.ty, expr);
        self.items.push(mir::stmt::DeclStmt::Assign { target, expr });

        Ok(TypeDescriptor::Ok)
    }

    fn print(&mut self, name: &Token) -> Result<TypeDescriptor, SemanticError> {
        let target = self.ident(name)?;
        self.items.push(mir::stmt::DeclStmt::Print(target));

        Ok(TypeDescriptor::Ok)
    }

    fn ident(&self, name: &Token) -> Result<mir::expr::VarSymbol, SemanticError> {
        let entry = self.env.lookup(name)?;

        Ok(mir::expr::VarSymbol::new(name.clone(), entry))
    }

    pub fn visit_expr(&mut self, expr: &hir::expr::ExprKind) -> Result<mir::expr::Expr, SemanticError> {
        match expr {
            hir::expr::ExprKind::Binary { left, op, right, .. } => self.binary(left, *op, right),
            hir::expr::ExprKind::Constant { token, ty } => Ok(mir::expr::Expr {
                kind: mir::expr::ExprKind::Constant(token.unwrap_string()),
                ty: *ty,
            }),
            hir::expr::ExprKind::VarRead(name) => {
                let symbol = self.ident(name)?;

                Ok(mir::expr::Expr {
                    ty: symbol.entry.ty,
                    kind: mir::expr::ExprKind::VarRead(symbol),
                })
            }
        }
    }

    fn binary(
        &mut self,
        left: &hir::expr::ExprKind,
        op: BinOp,
        right: &hir::expr::ExprKind,
    ) -> Result<mir::expr::Expr, SemanticError> {
        let left = self.visit_expr(left)?;
        let right = self.visit_expr(right)?;
        let ty = left.ty.widen(right.ty);

        // dc needs its precision raised to divide reals
        let op = match (op, ty) {
            (BinOp::Div, Type::Float) => BinOp::DivFloat,
            (op, _) => op,
        };

        Ok(mir::expr::Expr {
            kind: mir::expr::ExprKind::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            },
            ty,
        })
    }
}

// an int value stored into a float variable is computed with float division throughout
fn store_into(target: Type, expr: mir::expr::Expr) -> mir::expr::Expr {
    if target == Type::Float && expr.ty == Type::Int {
        widen_expr(expr)
    } else {
        expr
    }
}

fn widen_expr(expr: mir::expr::Expr) -> mir::expr::Expr {
    let kind = match expr.kind {
        mir::expr::ExprKind::Binary { left, op, right } => mir::expr::ExprKind::Binary {
            left: Box::new(widen_expr(*left)),
            op: if op == BinOp::Div { BinOp::DivFloat } else { op },
            right: Box::new(widen_expr(*right)),
        },
        kind => kind,
    };

    mir::expr::Expr { kind, ty: Type::Float }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::parser::tests::setup;

    fn setup_check(input: &str, policy: RegisterPolicy) -> Result<(mir::stmt::Program, SymbolTable), SemanticError> {
        let program = setup(input).parse().unwrap();
        TypeChecker::new(policy).check(&program)
    }

    // setup environment (declare variables)
    fn setup_env(typechecker: &mut TypeChecker, env: &str) {
        let program = setup(env).parse().unwrap();
        for item in &program.items {
            typechecker.visit_item(item).unwrap();
        }
    }

    macro_rules! assert_type {
        ($input:expr,$expected_type:expr,$env:expr) => {
            let expr = setup($input).expression().unwrap();

            let mut typechecker = TypeChecker::new(RegisterPolicy::Lazy);
            setup_env(&mut typechecker, $env);

            let actual = typechecker.visit_expr(&expr).unwrap();

            assert_eq!(actual.ty, $expected_type);
        };
    }

    macro_rules! assert_check_err {
        ($input:expr,$expected_err:pat) => {
            let actual = setup_check($input, RegisterPolicy::Lazy).unwrap_err();

            assert!(
                matches!(actual, $expected_err),
                "actual: {:?}, expected: {}",
                actual,
                stringify!($expected_err),
            );
        };
    }

    fn find_op(expr: &mir::expr::Expr) -> Option<BinOp> {
        match &expr.kind {
            mir::expr::ExprKind::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }

    #[test]
    fn expression_types() {
        assert_type!("1 + 2 * 3", Type::Int, "");
        assert_type!("1 + 2.5", Type::Float, "");
        assert_type!("a / b", Type::Int, "int a; int b;");
        assert_type!("a - f", Type::Float, "int a; float f;");
        assert_type!("f", Type::Float, "float f;");
    }

    #[test]
    fn integer_division_stays_div() {
        let expr = setup("1 / 6").expression().unwrap();
        let actual = TypeChecker::new(RegisterPolicy::Lazy).visit_expr(&expr).unwrap();

        assert_eq!(find_op(&actual), Some(BinOp::Div));
    }

    #[test]
    fn mixed_division_becomes_div_float() {
        let expr = setup("x / 2").expression().unwrap();
        let mut typechecker = TypeChecker::new(RegisterPolicy::Lazy);
        setup_env(&mut typechecker, "float x;");

        let actual = typechecker.visit_expr(&expr).unwrap();

        assert_eq!(actual.ty, Type::Float);
        assert_eq!(find_op(&actual), Some(BinOp::DivFloat));
    }

    #[test]
    fn parse_tree_stays_unmodified() {
        let program = setup("float x; x = 5.0 / 2;").parse().unwrap();
        let before = program.to_string();

        TypeChecker::new(RegisterPolicy::Lazy).check(&program).unwrap();

        assert_eq!(program.to_string(), before);
        assert!(before.contains("Binary: Div\n"));
    }

    #[test]
    fn double_declaration() {
        assert_check_err!("int a; float a;", SemanticError::AlreadyDeclared { line: 1, .. });
    }

    #[test]
    fn undeclared_variable() {
        assert_check_err!("int a;\nprint b;", SemanticError::Undeclared { line: 2, .. });
        assert_check_err!("a = 1;", SemanticError::Undeclared { .. });
        assert_check_err!("int a = a + c;", SemanticError::Undeclared { .. });
    }

    #[test]
    fn float_into_int_is_rejected() {
        assert_check_err!(
            "int a; a = 1.5;",
            SemanticError::IncompatibleAssign { target: Type::Int, found: Type::Float, .. }
        );
        assert_check_err!(
            "float f; int a = f * 2;",
            SemanticError::IncompatibleInit { declared: Type::Int, found: Type::Float, .. }
        );
    }

    #[test]
    fn int_widens_into_float() {
        assert!(setup_check("float x; x = 5/2; float y = 3;", RegisterPolicy::Lazy).is_ok());
    }

    #[test]
    fn int_division_stored_into_float_is_widened() {
        let (program, _) = setup_check("float x; x = 5/2; int a = 1/6;", RegisterPolicy::Lazy).unwrap();

        let mir::stmt::DeclStmt::Assign { expr, .. } = &program.items[1] else {
            unreachable!("second item is an assignment")
        };
        assert_eq!(expr.ty, Type::Float);
        assert_eq!(find_op(expr), Some(BinOp::DivFloat));

        let mir::stmt::DeclStmt::Declaration(decl) = &program.items[2] else {
            unreachable!("third item is a declaration")
        };
        assert_eq!(find_op(decl.init.as_ref().unwrap()), Some(BinOp::Div));
    }

    #[test]
    fn self_reference_in_initializer_is_visible() {
        assert!(setup_check("int a = a + 1;", RegisterPolicy::Lazy).is_ok());
    }

    #[test]
    fn registers_assigned_in_declaration_order() {
        let (program, env) = setup_check("float x; int y; print x; int z;", RegisterPolicy::Lazy).unwrap();

        assert_eq!(program.items.len(), 4);
        assert_eq!(env.get("x").unwrap().reg, Register::nth(0));
        assert_eq!(env.get("y").unwrap().reg, Register::nth(1));
        assert_eq!(env.get("z").unwrap().reg, Register::nth(2));
        assert_eq!(env.get("z").unwrap().ty, Type::Int);
    }

    #[test]
    fn failed_declaration_keeps_register() {
        let program = setup("int a; float a;").parse().unwrap();
        let mut typechecker = TypeChecker::new(RegisterPolicy::Lazy);

        for item in &program.items {
            let _ = typechecker.visit_item(item);
        }

        assert_eq!(typechecker.next_register, 1);
    }

    #[test]
    fn stops_at_first_error() {
        let program = setup("int a; print b; int c;").parse().unwrap();
        let mut typechecker = TypeChecker::new(RegisterPolicy::Lazy);
        let mut result = Ok(TypeDescriptor::Ok);

        for item in &program.items {
            result = typechecker.visit_item(item);
            if result.is_err() {
                break;
            }
        }

        assert!(result.is_err());
        assert!(!typechecker.env.contains("c"));
        assert_eq!(typechecker.items.len(), 1);
    }

    #[test]
    fn identifiers_cache_entry() {
        let (program, _) = setup_check("float v; v = v;", RegisterPolicy::Lazy).unwrap();

        let mir::stmt::DeclStmt::Assign { target, expr } = &program.items[1] else {
            unreachable!("second item is an assignment")
        };
        let mir::expr::ExprKind::VarRead(symbol) = &expr.kind else {
            unreachable!("right side is a variable")
        };

        assert_eq!(target.entry.reg, Register::nth(0));
        assert_eq!(symbol.entry, target.entry);
    }

    fn many_declarations(count: usize) -> String {
        (0..count).map(|i| format!("int v{};", i)).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn lazy_policy_leaves_overflow_unassigned() {
        let (_, env) = setup_check(&many_declarations(28), RegisterPolicy::Lazy).unwrap();

        assert_eq!(env.get("v25").unwrap().reg, Register::nth(25));
        assert_eq!(env.get("v26").unwrap().reg, None);
        assert_eq!(env.get("v27").unwrap().reg, None);
    }

    #[test]
    fn eager_policy_fails_at_first_overflow() {
        let actual = setup_check(&many_declarations(28), RegisterPolicy::Eager).unwrap_err();

        assert_eq!(
            actual,
            SemanticError::RegistersExhausted {
                name: "v26".to_string(),
                max: REGISTER_COUNT,
                line: 27,
            }
        );
    }
}
