//! Symbol table of expanded structures.
//!
//! Keyed by fully-qualified name. An entry is registered before its members
//! are expanded, so a second visit to the same name during that expansion
//! finds the entry and stops instead of recursing.

use std::collections::HashMap;
use std::rc::Rc;

use rtti_schema::Structure;

/// Structures built so far, by fully-qualified name.
///
/// At most one descriptor is kept per name; lookups hand out the shared
/// `Rc`, never a rebuilt copy.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    structures: HashMap<String, Rc<Structure>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a structure by fully-qualified name.
    pub fn get(&self, fully_qualified_name: &str) -> Option<Rc<Structure>> {
        self.structures.get(fully_qualified_name).cloned()
    }

    pub fn contains(&self, fully_qualified_name: &str) -> bool {
        self.structures.contains_key(fully_qualified_name)
    }

    /// Register or overwrite the entry for `structure`'s fully-qualified name.
    pub(crate) fn insert(&mut self, structure: Rc<Structure>) -> Option<Rc<Structure>> {
        self.structures
            .insert(structure.fully_qualified_name.clone(), structure)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Iterate over all entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Structure>> {
        self.structures.values()
    }

    /// All entries sorted by fully-qualified name.
    pub fn sorted(&self) -> Vec<Rc<Structure>> {
        let mut all: Vec<Rc<Structure>> = self.structures.values().cloned().collect();
        all.sort_by(|a, b| a.fully_qualified_name.cmp(&b.fully_qualified_name));
        all
    }
}
