//! Address-to-name symbol table.
//!
//! Used only by the disassembler to annotate branch and jump targets with
//! function names. Lookup misses degrade to no annotation; the table never
//! affects execution.

use std::collections::BTreeMap;

/// A table mapping code addresses to symbol names.
///
/// Populated by the loader from an ELF symbol table, or built by hand in
/// tests. Lookups are exact-address only.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    syms: BTreeMap<u32, String>,
}

impl SymbolTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a symbol at the given address, replacing any previous name.
    pub fn insert(&mut self, addr: u32, name: impl Into<String>) {
        let _ = self.syms.insert(addr, name.into());
    }

    /// Returns the name bound to exactly `addr`, if any.
    pub fn lookup(&self, addr: u32) -> Option<&str> {
        self.syms.get(&addr).map(String::as_str)
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.syms.len()
    }

    /// True when the table holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.syms.is_empty()
    }
}
