//! The errors emitted throughout all of acdc

use crate::compiler::common::{token::TokenKind, types::Type};
use std::error::Error as StdError;
use thiserror::Error;

/// Maximum number of digits allowed after the decimal point of a float literal
pub const MAX_FRACTION_DIGITS: usize = 5;

/// Errors of the [scanner](crate::compiler::scanner)
#[derive(Debug, Error, PartialEq, Clone)]
pub enum LexicalError {
    #[error("illegal character {c:?}")]
    UnexpectedChar { c: char, line: usize },

    #[error("invalid number '{lexeme}': missing digits after the decimal point")]
    MissingFraction { lexeme: String, line: usize },

    #[error("invalid number '{lexeme}': more than {} digits after the decimal point", MAX_FRACTION_DIGITS)]
    FractionTooLong { lexeme: String, line: usize },
}

impl LexicalError {
    pub fn line(&self) -> usize {
        match self {
            LexicalError::UnexpectedChar { line, .. }
            | LexicalError::MissingFraction { line, .. }
            | LexicalError::FractionTooLong { line, .. } => *line,
        }
    }
}

/// Errors of the [parser](crate::compiler::parser)
#[derive(Debug, Error, PartialEq, Clone)]
pub enum SyntacticError {
    /// The scanner failed while the parser was inspecting the next token
    #[error("could not read next token")]
    Lexical(#[from] LexicalError),

    #[error("expected {expected}, found {found}")]
    Unexpected { expected: &'static str, found: TokenKind, line: usize },

    #[error("invalid compound assignment operator '{lexeme}'")]
    InvalidCompoundOp { lexeme: String, line: usize },
}

impl SyntacticError {
    pub fn line(&self) -> usize {
        match self {
            SyntacticError::Lexical(e) => e.line(),
            SyntacticError::Unexpected { line, .. } | SyntacticError::InvalidCompoundOp { line, .. } => {
                *line
            }
        }
    }
}

/// Errors of the [typechecker](crate::compiler::typechecker)
#[derive(Debug, Error, PartialEq, Clone)]
pub enum SemanticError {
    #[error("variable '{name}' is already declared")]
    AlreadyDeclared { name: String, line: usize },

    #[error("variable '{name}' is not declared")]
    Undeclared { name: String, line: usize },

    #[error("incompatible types in initialization of '{name}': cannot initialize '{declared}' with '{found}'")]
    IncompatibleInit { name: String, declared: Type, found: Type, line: usize },

    #[error("incompatible types in assignment to '{name}': cannot assign '{found}' to '{target}'")]
    IncompatibleAssign { name: String, target: Type, found: Type, line: usize },

    #[error("no register left for variable '{name}': at most {max} variables can be declared")]
    RegistersExhausted { name: String, max: usize, line: usize },
}

impl SemanticError {
    pub fn line(&self) -> usize {
        match self {
            SemanticError::AlreadyDeclared { line, .. }
            | SemanticError::Undeclared { line, .. }
            | SemanticError::IncompatibleInit { line, .. }
            | SemanticError::IncompatibleAssign { line, .. }
            | SemanticError::RegistersExhausted { line, .. } => *line,
        }
    }
}

/// Resource failures of the [code generator](crate::compiler::codegen).
/// These are logged instead of returned so that the program generated so far stays usable.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum CodegenError {
    #[error("registers exhausted: variable '{name}' has no register assigned")]
    RegistersExhausted { name: String },
}

/// The high-level error type, which is used by both lib.rs and main.rs
#[derive(Debug, Error)]
pub enum AcdcError {
    /// Lexical or syntactic error while building the AST
    #[error(transparent)]
    Syntax(#[from] SyntacticError),
    /// Error found during semantic analysis
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    /// Error when doing system operations (reading/writing files etc)
    #[error("{0}")]
    Sys(String),
}

impl AcdcError {
    pub fn line(&self) -> Option<usize> {
        match self {
            AcdcError::Syntax(e) => Some(e.line()),
            AcdcError::Semantic(e) => Some(e.line()),
            AcdcError::Sys(_) => None,
        }
    }

    /// Prints the error to `stderr` together with the offending line of `source`.<br>
    /// If `no_color` is specified then only prints without any highlighting and color codes.
    pub fn print(&self, source: &str, no_color: bool) {
        if let AcdcError::Sys(msg) = self {
            eprintln!("acdc: {}", msg);
            return;
        }
        let phase = match self {
            AcdcError::Syntax(SyntacticError::Lexical(_)) => "lexical error",
            AcdcError::Syntax(_) => "syntax error",
            _ => "semantic error",
        };

        eprintln!(
            "{}: {}",
            color_text(phase, Color::Red, true, no_color),
            color_text(&self.to_string(), Color::White, true, no_color),
        );

        if let Some(line_index) = self.line() {
            eprintln!(
                "{}  {} line {}",
                color_text("|", Color::Blue, false, no_color),
                color_text("-->", Color::Blue, false, no_color),
                line_index
            );
            if let Some(line_string) = source.lines().nth(line_index.saturating_sub(1)) {
                eprintln!("{}", color_text("|", Color::Blue, false, no_color));
                eprintln!(
                    "{} {}",
                    color_text(&line_index.to_string(), Color::Blue, true, no_color),
                    line_string
                );
                eprintln!("{}", color_text("|", Color::Blue, false, no_color));
            }
        }

        let mut cause = self.source();
        while let Some(e) = cause {
            eprintln!("{} {}", color_text("caused by:", Color::Blue, true, no_color), e);
            cause = e.source();
        }
    }
}

enum Color {
    Red,
    Blue,
    White,
}
impl Color {
    fn code(&self) -> usize {
        match self {
            Color::Red => 31,
            Color::Blue => 34,
            Color::White => 37,
        }
    }
}
fn color_text(text: &str, color: Color, bold: bool, no_color: bool) -> String {
    if no_color {
        text.to_string()
    } else {
        format!(
            "\x1b[{};{}m{}\x1b[0m",
            color.code(),
            if bold { "1" } else { "" },
            text
        )
    }
}
