//! Symbol model for jprops.
//!
//! This crate stands in for the host compiler's symbol table. It owns:
//! - Arenas of class, method and field symbols addressed by typed ids
//! - A type table with a Java-style assignability oracle
//! - Property markers attached to fields (`var`, `val`, `set`, `auto`)
//! - The `SymbolModel` trait the inference engine is written against
//!
//! `SymbolTable` is the in-memory implementation used by the driver and by
//! tests. It is always passed explicitly; there is no global table.

mod error;
pub use error::SymbolError;

pub mod ids;
pub use ids::{ClassId, FieldId, MemberId, MethodId, TypeId};

pub mod symbols;
pub use symbols::{
    ClassKind, ClassSymbol, FieldSymbol, Markers, MethodSymbol, Mutability, PropMarker,
};

pub mod types;
pub use types::{PrimitiveKind, TypeData, TypeTable};

pub mod model;
pub use model::SymbolModel;

mod table;
pub use table::SymbolTable;

mod lookup;
