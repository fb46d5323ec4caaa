use crate::compiler::common::environment::Register;
use std::fmt::Display;

// Instructions of the dc stack-language that ac programs are lowered to.
// Every variant renders as one or more whitespace-separated dc tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Dc {
    // numeric literal pushed unmodified
    Literal(String),

    // push the value of a register
    Load(Register),
    // pop into a register
    Store(Register),

    Add,
    Sub,
    Mul,
    Div,
    // division with the precision raised to 5 decimal places and reset afterwards
    DivFloat,

    // print top of stack without popping
    Print,
    // pop and print as string, used to emit the newline after `p`
    Newline,
}

impl Display for Dc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dc::Literal(value) => write!(f, "{}", value),
            Dc::Load(reg) => write!(f, "l{}", reg),
            Dc::Store(reg) => write!(f, "s{}", reg),
            Dc::Add => write!(f, "+"),
            Dc::Sub => write!(f, "-"),
            Dc::Mul => write!(f, "*"),
            Dc::Div => write!(f, "/"),
            Dc::DivFloat => write!(f, "5 k / 0 k"),
            Dc::Print => write!(f, "p"),
            Dc::Newline => write!(f, "P"),
        }
    }
}

/// Joins instructions into the final dc program text
pub fn render(instructions: &[Dc]) -> String {
    instructions
        .iter()
        .map(|instr| instr.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
