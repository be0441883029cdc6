//! The reflection pass: type classification and structure expansion.

use std::collections::VecDeque;
use std::rc::Rc;

use rtti_schema::{Structure, StructureRef, Type};

use crate::config::BuildConfig;
use crate::declare::{Declared, Declaration};
use crate::reflect::Reflect;
use crate::symbols::SymbolTable;

/// A structure that was referenced but not yet expanded.
struct Pending<C> {
    fully_qualified_name: String,
    expand: for<'x> fn(&mut Cx<'x, C>),
}

fn expand_pending<T: Declared + ?Sized, C: BuildConfig>(cx: &mut Cx<'_, C>) {
    cx.structure::<T>();
}

/// Traversal context handed to every classification and expansion step.
///
/// Carries the pass configuration by reference plus the shared symbol
/// table and the queue of referenced structures still to expand.
pub struct Cx<'a, C> {
    config: &'a C,
    symbols: &'a mut SymbolTable,
    pending: &'a mut VecDeque<Pending<C>>,
}

impl<'a, C: BuildConfig> Cx<'a, C> {
    /// Configuration of the current pass
    pub fn config(&self) -> &'a C {
        self.config
    }

    /// Describe a type token.
    pub fn reflect<T: Reflect + ?Sized>(&mut self) -> Type {
        T::reflect(self)
    }

    /// Light reference to a declared structure.
    ///
    /// Does not expand `T`. If `T` is not in the symbol table yet it is queued
    /// and expanded once the current query has finished.
    pub fn reference<T: Declared + ?Sized>(&mut self) -> StructureRef {
        let fully_qualified_name = T::fully_qualified_name();
        if !self.symbols.contains(&fully_qualified_name) {
            log::trace!("queueing {} for expansion", fully_qualified_name);
            self.pending.push_back(Pending {
                fully_qualified_name: fully_qualified_name.clone(),
                expand: expand_pending::<T, C>,
            });
        }
        StructureRef {
            name: T::NAME.to_string(),
            fully_qualified_name,
        }
    }

    /// Reflect a declared structure occurrence as a `Type`.
    pub fn structure_ref<T: Declared + ?Sized>(&mut self) -> Type {
        Type::Structure(self.reference::<T>())
    }

    /// Expand a declared structure, or return the memoized expansion.
    pub fn structure<T: Declared + ?Sized>(&mut self) -> Rc<Structure> {
        let fully_qualified_name = T::fully_qualified_name();
        if let Some(existing) = self.symbols.get(&fully_qualified_name) {
            log::trace!("symbol table hit for {}", fully_qualified_name);
            return existing;
        }

        log::debug!("expanding structure {}", fully_qualified_name);

        // Registered before the members so that any path leading back to this
        // name stops at the symbol table.
        self.symbols.insert(Rc::new(Structure::new(
            T::NAME,
            fully_qualified_name.clone(),
        )));

        let mut decl = Declaration::new(self, Structure::new(T::NAME, fully_qualified_name));
        T::declare(&mut decl);
        let structure = Rc::new(decl.finish());

        self.symbols.insert(Rc::clone(&structure));
        structure
    }
}

/// Entry point of a reflection pass.
///
/// Owns the configuration and the symbol table. Structures expanded through
/// one builder are shared by all later queries on it. The builder is not
/// `Send`: a pass runs on one thread from start to finish.
pub struct Builder<C> {
    config: C,
    symbols: SymbolTable,
    pending: VecDeque<Pending<C>>,
}

impl<C: BuildConfig> Builder<C> {
    /// Start a pass with an empty symbol table.
    pub fn new(config: C) -> Self {
        Self::with_symbols(config, SymbolTable::new())
    }

    /// Start a pass that reuses structures discovered by an earlier pass.
    ///
    /// The caller is responsible for the earlier pass having used an
    /// equivalent configuration.
    pub fn with_symbols(config: C, symbols: SymbolTable) -> Self {
        Self {
            config,
            symbols,
            pending: VecDeque::new(),
        }
    }

    /// Configuration of this pass
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Describe a type token.
    pub fn type_of<T: Reflect + ?Sized>(&mut self) -> Type {
        let ty = self.cx().reflect::<T>();
        self.drain_pending();
        ty
    }

    /// Expand a declared structure with all of its members.
    pub fn structure<T: Declared + ?Sized>(&mut self) -> Rc<Structure> {
        let structure = self.cx().structure::<T>();
        self.drain_pending();
        structure
    }

    /// Look up any structure expanded so far by fully-qualified name.
    pub fn lookup(&self, fully_qualified_name: &str) -> Option<Rc<Structure>> {
        self.symbols.get(fully_qualified_name)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Finish the pass and keep its structures for a later one.
    pub fn into_symbols(self) -> SymbolTable {
        self.symbols
    }

    fn cx(&mut self) -> Cx<'_, C> {
        Cx {
            config: &self.config,
            symbols: &mut self.symbols,
            pending: &mut self.pending,
        }
    }

    /// Expand every structure referenced during the last query.
    fn drain_pending(&mut self) {
        while let Some(next) = self.pending.pop_front() {
            if self.symbols.contains(&next.fully_qualified_name) {
                continue;
            }
            log::trace!("draining {}", next.fully_qualified_name);
            let mut cx = Cx {
                config: &self.config,
                symbols: &mut self.symbols,
                pending: &mut self.pending,
            };
            (next.expand)(&mut cx);
        }
    }
}
