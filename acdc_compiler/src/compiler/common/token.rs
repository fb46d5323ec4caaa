use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Type keywords.
    TyInt,
    TyFloat,

    // Keywords.
    Print,

    Ident,

    // Delimiters.
    Equal,
    Semicolon,

    // `+=`, `-=`, `*=`, `/=` with the operator kept in the lexeme
    CompoundAssign,

    // Arithmetic operators.
    Plus,
    Minus,
    Star,
    Slash,

    // Literals.
    IntLit,
    FloatLit,

    Eof,
}

impl TokenKind {
    pub fn is_type(&self) -> bool {
        matches!(self, TokenKind::TyInt | TokenKind::TyFloat)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TokenKind::TyInt => "'int'",
                TokenKind::TyFloat => "'float'",
                TokenKind::Print => "'print'",
                TokenKind::Ident => "identifier",
                TokenKind::Equal => "'='",
                TokenKind::Semicolon => "';'",
                TokenKind::CompoundAssign => "compound assignment",
                TokenKind::Plus => "'+'",
                TokenKind::Minus => "'-'",
                TokenKind::Star => "'*'",
                TokenKind::Slash => "'/'",
                TokenKind::IntLit => "integer literal",
                TokenKind::FloatLit => "float literal",
                TokenKind::Eof => "<EOF>",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub lexeme: Option<String>,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, lexeme: impl Into<String>) -> Self {
        Token { kind, line, lexeme: Some(lexeme.into()) }
    }
    pub fn eof(line: usize) -> Self {
        Token { kind: TokenKind::Eof, line, lexeme: None }
    }

    /// Returns the lexeme of tokens that carry one, an empty string for [`TokenKind::Eof`]
    pub fn unwrap_string(&self) -> String {
        self.lexeme.clone().unwrap_or_default()
    }
}
