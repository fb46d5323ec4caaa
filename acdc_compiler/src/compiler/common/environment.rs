//! The symbol-table used to store the type and register of every declared variable

use crate::compiler::common::{error::*, token::*, types::*};
use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

/// Number of registers addressable by a single lowercase letter in dc
pub const REGISTER_COUNT: usize = 26;

/// A dc storage register, always in `'a'..='z'`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(char);

impl Register {
    /// The register handed out to the `index`-th declaration.
    /// Returns `None` once the alphabet is exhausted.
    pub fn nth(index: usize) -> Option<Register> {
        if index < REGISTER_COUNT {
            Some(Register((b'a' + index as u8) as char))
        } else {
            None
        }
    }
    pub fn name(&self) -> char {
        self.0
    }
}

impl Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The information stored for a variable in the symbol-table
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    /// Type given in the declaration
    pub ty: Type,

    /// `None` when the variable was declared after all registers were handed out
    pub reg: Option<Register>,
}

impl Attributes {
    pub fn new(ty: Type, reg: Option<Register>) -> Self {
        Attributes { ty, reg }
    }
}

/// Shared, read-only handle to an entry; cached on identifier nodes after checking
pub type SymbolRef = Rc<Attributes>;

/// Single flat scope of variables. One table lives for exactly one compilation.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    vars: HashMap<String, SymbolRef>,

    // declaration order, only used for display
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.order.clear();
    }

    /// Inserts a new variable. Fails if the name already exists since there is no shadowing.
    pub fn declare(&mut self, name: &Token, attrs: Attributes) -> Result<SymbolRef, SemanticError> {
        let key = name.unwrap_string();

        if self.vars.contains_key(&key) {
            return Err(SemanticError::AlreadyDeclared { name: key, line: name.line });
        }

        let entry = Rc::new(attrs);
        self.vars.insert(key.clone(), Rc::clone(&entry));
        self.order.push(key);

        Ok(entry)
    }

    pub fn lookup(&self, name: &Token) -> Result<SymbolRef, SemanticError> {
        let key = name.unwrap_string();

        self.get(&key)
            .cloned()
            .ok_or(SemanticError::Undeclared { name: key, line: name.line })
    }

    pub fn get(&self, name: &str) -> Option<&SymbolRef> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- SYMBOL TABLE ---")?;
        for name in &self.order {
            let entry = &self.vars[name];
            let reg = entry
                .reg
                .map(|reg| reg.to_string())
                .unwrap_or_else(|| "-".to_string());

            writeln!(f, "{} | {} | {}", name, entry.ty, reg)?;
        }
        write!(f, "--------------------")
    }
}
