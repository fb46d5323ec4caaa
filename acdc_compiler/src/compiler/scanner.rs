//! Converts a stream of characters into [tokens](Token) on demand.<br>
//! Only a single token of lookahead is ever buffered.

use crate::compiler::common::{error::*, token::*};
use std::collections::HashMap;
use std::iter::{Fuse, Peekable};
use std::str::Chars;

pub struct Scanner<I: Iterator<Item = char>> {
    // Source used for iterating
    source: Peekable<Fuse<I>>,

    // Current line, only used for diagnostics
    line: usize,

    // Reserved keywords which cannot be an identifier
    keywords: HashMap<&'static str, TokenKind>,

    // Token returned by `peek` but not yet consumed by `next`
    peeked: Option<Token>,
}

impl<'a> Scanner<Chars<'a>> {
    pub fn from_source(source: &'a str) -> Self {
        Scanner::new(source.chars())
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn new(source: I) -> Self {
        Scanner {
            source: source.fuse().peekable(),
            line: 1,
            keywords: HashMap::from([
                ("int", TokenKind::TyInt),
                ("float", TokenKind::TyFloat),
                ("print", TokenKind::Print),
            ]),
            peeked: None,
        }
    }

    /// Returns the next token without consuming it
    pub fn peek(&mut self) -> Result<&Token, LexicalError> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan_token()?,
        };

        Ok(self.peeked.insert(token))
    }

    /// Returns and consumes the next token.
    /// Once the end of input is reached every call returns [`TokenKind::Eof`].
    pub fn next(&mut self) -> Result<Token, LexicalError> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan_token(),
        }
    }

    fn scan_token(&mut self) -> Result<Token, LexicalError> {
        self.skip_whitespace();

        let Some(c) = self.source.next() else {
            return Ok(Token::eof(self.line));
        };

        match c {
            '+' => Ok(self.operator(c, TokenKind::Plus)),
            '-' => Ok(self.operator(c, TokenKind::Minus)),
            '*' => Ok(self.operator(c, TokenKind::Star)),
            '/' => Ok(self.operator(c, TokenKind::Slash)),
            '=' => Ok(Token::new(TokenKind::Equal, self.line, "=")),
            ';' => Ok(Token::new(TokenKind::Semicolon, self.line, ";")),

            _ if c.is_ascii_digit() => self.number(c),
            _ if c.is_ascii_alphabetic() => Ok(self.identifier(c)),

            _ => Err(LexicalError::UnexpectedChar { c, line: self.line }),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.source.next_if(|c| matches!(c, ' ' | '\t' | '\r' | '\n')) {
            if c == '\n' {
                self.line += 1;
            }
        }
    }

    // an arithmetic operator directly followed by '=' becomes a compound assignment
    fn operator(&mut self, c: char, if_not: TokenKind) -> Token {
        match self.source.next_if_eq(&'=') {
            Some(_) => Token::new(TokenKind::CompoundAssign, self.line, format!("{}=", c)),
            None => Token::new(if_not, self.line, c.to_string()),
        }
    }

    fn number(&mut self, first: char) -> Result<Token, LexicalError> {
        let mut num = String::from(first);
        self.digits(&mut num);

        if self.source.next_if_eq(&'.').is_none() {
            return Ok(Token::new(TokenKind::IntLit, self.line, num));
        }
        num.push('.');

        let fraction_digits = self.digits(&mut num);

        if fraction_digits == 0 {
            Err(LexicalError::MissingFraction { lexeme: num, line: self.line })
        } else if fraction_digits > MAX_FRACTION_DIGITS {
            Err(LexicalError::FractionTooLong { lexeme: num, line: self.line })
        } else {
            Ok(Token::new(TokenKind::FloatLit, self.line, num))
        }
    }

    // appends a run of digits to `num` and returns how many were read
    fn digits(&mut self, num: &mut String) -> usize {
        let mut count = 0;
        while let Some(digit) = self.source.next_if(|c| c.is_ascii_digit()) {
            num.push(digit);
            count += 1;
        }
        count
    }

    fn identifier(&mut self, first: char) -> Token {
        let mut value = String::from(first);
        while let Some(c) = self.source.next_if(|c| c.is_ascii_alphanumeric()) {
            value.push(c);
        }

        match self.keywords.get(value.as_str()) {
            Some(keyword) => Token::new(*keyword, self.line, value),
            None => Token::new(TokenKind::Ident, self.line, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_kinds(source: &str) -> Result<Vec<TokenKind>, LexicalError> {
        let mut scanner = Scanner::from_source(source);
        let mut kinds = Vec::new();

        loop {
            let token = scanner.next()?;
            if token.kind == TokenKind::Eof {
                return Ok(kinds);
            }
            kinds.push(token.kind);
        }
    }

    #[test]
    fn keywords_and_identifiers() {
        let actual = scan_kinds("int temp float print\nab1 printx int x").unwrap();
        let expected = vec![
            TokenKind::TyInt,
            TokenKind::Ident,
            TokenKind::TyFloat,
            TokenKind::Print,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::TyInt,
            TokenKind::Ident,
        ];

        assert_eq!(actual, expected);
    }

    #[test]
    fn peek_is_stable_until_next() {
        let mut scanner = Scanner::from_source("int temp;");

        assert_eq!(scanner.peek().unwrap().kind, TokenKind::TyInt);
        assert_eq!(scanner.next().unwrap().kind, TokenKind::TyInt);
        assert_eq!(scanner.peek().unwrap().kind, TokenKind::Ident);
        assert_eq!(scanner.peek().unwrap().kind, TokenKind::Ident);

        let token = scanner.next().unwrap();
        assert_eq!(token.kind, TokenKind::Ident);
        assert_eq!(token.line, 1);
        assert_eq!(token.lexeme.as_deref(), Some("temp"));
    }

    #[test]
    fn eof_is_repeatable() {
        let mut scanner = Scanner::from_source("  \n");

        assert_eq!(scanner.next().unwrap(), Token::eof(2));
        assert_eq!(scanner.peek().unwrap().kind, TokenKind::Eof);
        assert_eq!(scanner.next().unwrap().kind, TokenKind::Eof);
        assert_eq!(scanner.next().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn integer_and_float_literals() {
        let mut scanner = Scanner::from_source("30 09 5.2 0.12345");

        for (kind, lexeme) in [
            (TokenKind::IntLit, "30"),
            (TokenKind::IntLit, "09"),
            (TokenKind::FloatLit, "5.2"),
            (TokenKind::FloatLit, "0.12345"),
        ] {
            let token = scanner.next().unwrap();
            assert_eq!(token.kind, kind);
            assert_eq!(token.lexeme.as_deref(), Some(lexeme));
        }
    }

    #[test]
    fn float_without_fraction() {
        let actual = scan_kinds("float a = 5.;").unwrap_err();

        assert_eq!(
            actual,
            LexicalError::MissingFraction { lexeme: "5.".to_string(), line: 1 }
        );
    }

    #[test]
    fn float_with_too_many_fraction_digits() {
        let actual = scan_kinds("\n\n3.123456").unwrap_err();

        assert_eq!(
            actual,
            LexicalError::FractionTooLong { lexeme: "3.123456".to_string(), line: 3 }
        );
    }

    #[test]
    fn operators_and_compound_assignments() {
        let mut scanner = Scanner::from_source("+ += - -= * *= / /= = ;");
        let mut actual = Vec::new();

        loop {
            let token = scanner.next().unwrap();
            if token.kind == TokenKind::Eof {
                break;
            }
            actual.push((token.kind, token.unwrap_string()));
        }

        let expected = vec![
            (TokenKind::Plus, "+".to_string()),
            (TokenKind::CompoundAssign, "+=".to_string()),
            (TokenKind::Minus, "-".to_string()),
            (TokenKind::CompoundAssign, "-=".to_string()),
            (TokenKind::Star, "*".to_string()),
            (TokenKind::CompoundAssign, "*=".to_string()),
            (TokenKind::Slash, "/".to_string()),
            (TokenKind::CompoundAssign, "/=".to_string()),
            (TokenKind::Equal, "=".to_string()),
            (TokenKind::Semicolon, ";".to_string()),
        ];

        assert_eq!(actual, expected);
    }

    #[test]
    fn operator_followed_by_space_and_equal_does_not_merge() {
        let actual = scan_kinds("a + = 1").unwrap();

        assert_eq!(
            actual,
            vec![TokenKind::Ident, TokenKind::Plus, TokenKind::Equal, TokenKind::IntLit]
        );
    }

    #[test]
    fn detects_invalid_char_with_line() {
        let actual = scan_kinds("int c;\n\nc = 0$").unwrap_err();

        assert_eq!(actual, LexicalError::UnexpectedChar { c: '$', line: 3 });
    }

    #[test]
    fn errors_on_non_ascii_letters() {
        let actual = scan_kinds("int ä;").unwrap_err();

        assert_eq!(actual, LexicalError::UnexpectedChar { c: 'ä', line: 1 });
    }

    #[test]
    fn tracks_lines() {
        let mut scanner = Scanner::from_source("int a;\r\n\tprint a;\n");
        let lines: Vec<usize> = std::iter::from_fn(|| {
            let token = scanner.next().unwrap();
            (token.kind != TokenKind::Eof).then_some(token.line)
        })
        .collect();

        assert_eq!(lines, vec![1, 1, 1, 2, 2, 2]);
    }
}
