use std::fmt::Display;

/// The two value types of ac
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
}

impl Type {
    /// Result type of an arithmetic operation: float if either side is float
    pub fn widen(self, other: Type) -> Type {
        if self == Type::Float || other == Type::Float {
            Type::Float
        } else {
            Type::Int
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Type::Int => "int",
                Type::Float => "float",
            }
        )
    }
}

/// The result of checking a node.
/// Expressions describe themselves as [`TypeDescriptor::Int`] or [`TypeDescriptor::Float`],
/// declarations and statements as [`TypeDescriptor::Ok`].
/// The error case is carried by the `Err` side of the checker's results as a
/// [`SemanticError`](crate::compiler::common::error::SemanticError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeDescriptor {
    Int,
    Float,
    Ok,
}

impl TypeDescriptor {
    /// Whether a value described by `source` can be stored where `self` is expected.
    /// Int widens into float, never the other way around.
    pub fn compatible(&self, source: &TypeDescriptor) -> bool {
        self == source || (*self == TypeDescriptor::Float && *source == TypeDescriptor::Int)
    }
}

impl From<Type> for TypeDescriptor {
    fn from(ty: Type) -> Self {
        match ty {
            Type::Int => TypeDescriptor::Int,
            Type::Float => TypeDescriptor::Float,
        }
    }
}
