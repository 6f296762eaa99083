use crate::ids::{ClassId, FieldId, MethodId, TypeId};
use thiserror::Error;

/// Internal inconsistencies in the symbol model.
///
/// None of these are produced by well-formed input: they mean a caller holds
/// an id from a different table or tried to enter a member twice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("unknown class symbol {0:?}")]
    UnknownClass(ClassId),
    #[error("unknown method symbol {0:?}")]
    UnknownMethod(MethodId),
    #[error("unknown field symbol {0:?}")]
    UnknownField(FieldId),
    #[error("unknown type {0:?}")]
    UnknownType(TypeId),
    #[error("class `{class}` already declares a field named `{name}`")]
    DuplicateField { class: String, name: String },
}
