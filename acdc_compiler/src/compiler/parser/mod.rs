//! Recursive descent parser building the [parse-tree](hir) and checking syntax errors.<br>
//! Tokens are pulled from the scanner one at a time. Parsing stops at the first error,
//! there is no synchronization.

pub mod hir;

use crate::compiler::common::{error::*, token::*, types::Type};
use crate::compiler::parser::hir::{expr::*, stmt::*};
use crate::compiler::scanner::Scanner;
use tracing::debug;

// helper macros that allow comparing enums without specifying their fields
macro_rules! match_next {
    ($parser:expr, $expected:pat) => {{
        let (kind, _) = $parser.peek_kind()?;
        if matches!(kind, $expected) {
            Some($parser.tokens.next()?)
        } else {
            None
        }
    }};
}
macro_rules! consume {
    ($parser:expr,$expected:pat,$msg:expr) => {{
        let (kind, line) = $parser.peek_kind()?;
        if matches!(kind, $expected) {
            $parser.tokens.next().map_err(SyntacticError::from)
        } else {
            Err(SyntacticError::Unexpected { expected: $msg, found: kind, line })
        }
    }};
}

pub struct Parser<I: Iterator<Item = char>> {
    tokens: Scanner<I>,
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn new(tokens: Scanner<I>) -> Self {
        Parser { tokens }
    }

    // <program> ::= (<declaration> | <statement>)* <eof>
    pub fn parse(mut self) -> Result<Program, SyntacticError> {
        let mut items = Vec::new();

        loop {
            let (kind, line) = self.peek_kind()?;
            match kind {
                kind if kind.is_type() => items.push(DeclStmt::Declaration(self.declaration()?)),
                TokenKind::Ident | TokenKind::Print => items.push(DeclStmt::Stmt(self.statement()?)),
                TokenKind::Eof => break,
                found => {
                    return Err(SyntacticError::Unexpected {
                        expected: "declaration or statement",
                        found,
                        line,
                    })
                }
            }
        }
        consume!(self, TokenKind::Eof, "end of input")?;

        debug!(items = items.len(), "parsed program");

        Ok(Program { items })
    }

    fn peek_kind(&mut self) -> Result<(TokenKind, usize), SyntacticError> {
        let token = self.tokens.peek()?;
        Ok((token.kind, token.line))
    }

    // <declaration> ::= <type> <identifier> ';'
    //                 | <type> <identifier> '=' <expression> ';'
    fn declaration(&mut self) -> Result<Declaration, SyntacticError> {
        let ty = self.type_specifier()?;
        let name = consume!(self, TokenKind::Ident, "identifier")?;

        let (kind, line) = self.peek_kind()?;
        let init = match kind {
            TokenKind::Semicolon => None,
            TokenKind::Equal => {
                self.tokens.next()?;
                Some(self.expression()?)
            }
            found => {
                return Err(SyntacticError::Unexpected { expected: "'=' or ';'", found, line });
            }
        };
        consume!(self, TokenKind::Semicolon, "';'")?;

        Ok(Declaration { ty, name, init })
    }

    // <type> ::= 'int' | 'float'
    fn type_specifier(&mut self) -> Result<Type, SyntacticError> {
        let token = consume!(self, TokenKind::TyInt | TokenKind::TyFloat, "type")?;

        Ok(if token.kind == TokenKind::TyInt {
            Type::Int
        } else {
            Type::Float
        })
    }

    // <statement> ::= <identifier> <assign-op> <expression> ';'
    //               | 'print' <identifier> ';'
    fn statement(&mut self) -> Result<Stmt, SyntacticError> {
        let (kind, line) = self.peek_kind()?;

        match kind {
            TokenKind::Ident => {
                let name = self.tokens.next()?;
                let expr = self.assignment(&name)?;
                consume!(self, TokenKind::Semicolon, "';'")?;

                Ok(Stmt::Assign { name, expr })
            }
            TokenKind::Print => {
                self.tokens.next()?;
                let name = consume!(self, TokenKind::Ident, "identifier")?;
                consume!(self, TokenKind::Semicolon, "';'")?;

                Ok(Stmt::Print(name))
            }
            found => Err(SyntacticError::Unexpected { expected: "statement", found, line }),
        }
    }

    // <assign-op> ::= '=' | '+=' | '-=' | '*=' | '/='
    // `a op= expr` is desugared into `a = a op expr`
    fn assignment(&mut self, name: &Token) -> Result<ExprKind, SyntacticError> {
        let (kind, line) = self.peek_kind()?;

        match kind {
            TokenKind::Equal => {
                self.tokens.next()?;
                self.expression()
            }
            TokenKind::CompoundAssign => {
                let token = self.tokens.next()?;
                let lexeme = token.unwrap_string();
                let op = BinOp::from_compound(&lexeme)
                    .ok_or(SyntacticError::InvalidCompoundOp { lexeme, line })?;
                let right = self.expression()?;

                Ok(binary(ExprKind::VarRead(name.clone()), token, op, right))
            }
            found => Err(SyntacticError::Unexpected {
                expected: "assignment operator",
                found,
                line,
            }),
        }
    }

    // <expression> ::= <term> (('+' | '-') <term>)*
    pub fn expression(&mut self) -> Result<ExprKind, SyntacticError> {
        let mut expr = self.term()?;

        while let Some(token) = match_next!(self, TokenKind::Plus | TokenKind::Minus) {
            let op = if token.kind == TokenKind::Plus { BinOp::Add } else { BinOp::Sub };
            let right = self.term()?;
            expr = binary(expr, token, op, right);
        }
        Ok(expr)
    }

    // <term> ::= <value> (('*' | '/') <value>)*
    fn term(&mut self) -> Result<ExprKind, SyntacticError> {
        let mut expr = self.value()?;

        while let Some(token) = match_next!(self, TokenKind::Star | TokenKind::Slash) {
            let op = if token.kind == TokenKind::Star { BinOp::Mul } else { BinOp::Div };
            let right = self.value()?;
            expr = binary(expr, token, op, right);
        }
        Ok(expr)
    }

    // <value> ::= <int-literal> | <float-literal> | <identifier>
    fn value(&mut self) -> Result<ExprKind, SyntacticError> {
        if let Some(token) = match_next!(self, TokenKind::IntLit) {
            return Ok(ExprKind::Constant { token, ty: Type::Int });
        }
        if let Some(token) = match_next!(self, TokenKind::FloatLit) {
            return Ok(ExprKind::Constant { token, ty: Type::Float });
        }
        if let Some(name) = match_next!(self, TokenKind::Ident) {
            return Ok(ExprKind::VarRead(name));
        }

        let (found, line) = self.peek_kind()?;
        Err(SyntacticError::Unexpected { expected: "expression", found, line })
    }
}

fn binary(left: ExprKind, token: Token, op: BinOp, right: ExprKind) -> ExprKind {
    ExprKind::Binary {
        left: Box::new(left),
        token,
        op,
        right: Box::new(right),
    }
}
