//! The symbol-model boundary used by property inference.
//!
//! Inference never touches a concrete table. It reads classes, walks the
//! hierarchy, queries assignability and writes fields exclusively through
//! this trait, so a host compiler can plug its own symbol table in.

use crate::error::SymbolError;
use crate::ids::{ClassId, FieldId, MemberId, MethodId, TypeId};
use crate::symbols::{ClassSymbol, FieldSymbol, Markers, MethodSymbol};
use jprops_common::Modifiers;

pub trait SymbolModel {
    fn class(&self, id: ClassId) -> Result<&ClassSymbol, SymbolError>;

    fn method(&self, id: MethodId) -> Result<&MethodSymbol, SymbolError>;

    fn field(&self, id: FieldId) -> Result<&FieldSymbol, SymbolError>;

    /// Every class known to the model, in declaration order.
    fn classes(&self) -> Vec<ClassId>;

    /// Members of `class`. With `include_inherited`, members of all
    /// ancestors follow the class's own members.
    fn members(&self, class: ClassId, include_inherited: bool) -> Result<Vec<MemberId>, SymbolError>;

    /// Own members of `class` with the given simple name.
    fn members_by_name(&self, class: ClassId, name: &str) -> Result<Vec<MemberId>, SymbolError>;

    /// Whether a value of type `from` can be assigned to a location of type `to`.
    fn is_assignable(&self, from: TypeId, to: TypeId) -> bool;

    fn is_same_type(&self, a: TypeId, b: TypeId) -> bool {
        a == b
    }

    fn is_void(&self, ty: TypeId) -> bool {
        ty == TypeId::VOID
    }

    /// Enter a new field into the live member list of `class`.
    fn declare_field(
        &mut self,
        class: ClassId,
        name: &str,
        type_id: TypeId,
        modifiers: Modifiers,
        markers: Markers,
    ) -> Result<FieldId, SymbolError>;

    /// Replace the modifier flags of an existing field in place.
    fn rewrite_flags(&mut self, field: FieldId, modifiers: Modifiers) -> Result<(), SymbolError>;

    /// Replace the marker set of an existing field.
    fn set_field_markers(&mut self, field: FieldId, markers: Markers) -> Result<(), SymbolError>;

    /// Record that `method` is accounted for as a property accessor.
    fn mark_property_accessor(&mut self, method: MethodId) -> Result<(), SymbolError>;

    fn supertype(&self, class: ClassId) -> Result<Option<ClassId>, SymbolError> {
        Ok(self.class(class)?.supertype)
    }

    fn interfaces(&self, class: ClassId) -> Result<Vec<ClassId>, SymbolError> {
        Ok(self.class(class)?.interfaces.clone())
    }

    /// The top-level class that lexically contains `class` (or `class` itself).
    fn outermost_class(&self, class: ClassId) -> Result<ClassId, SymbolError> {
        let mut current = class;
        let mut depth = 0;
        while let Some(outer) = self.class(current)?.outer {
            current = outer;
            depth += 1;
            if depth > jprops_common::limits::MAX_ANCESTRY_DEPTH {
                break;
            }
        }
        Ok(current)
    }
}
