//! Type introspection for API types exposed to the scripting runtime
//!
//! Turns Rust type tokens and declared resource/struct types into the
//! schema tree of `rtti-schema`:
//! - [`Builder::type_of`] describes one type occurrence
//! - [`Builder::structure`] expands a declared type with all its members
//! - [`Builder::lookup`] finds any structure reached so far by its
//!   fully-qualified name
//!
//! Every structure is expanded at most once per [`SymbolTable`]. Types that
//! reference themselves, directly or through other types, come back as
//! light [`StructureRef`]s at the point where the cycle closes.

mod builder;
pub mod config;
mod declare;
pub mod host;
mod reflect;
mod symbols;

pub use builder::{Builder, Cx};
pub use config::{BuildConfig, FeatureFlags};
pub use declare::{Declaration, Declared};
pub use reflect::{Reflect, Signature, Variants};
pub use symbols::SymbolTable;

// Re-export the schema so declarations and `declared_types!` need one import.
pub use rtti_schema::{self as schema, BuiltinModule, Structure, StructureRef, Type};

#[cfg(test)]
mod tests;
