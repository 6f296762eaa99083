//! Shared fixture for inference integration tests.
#![allow(dead_code)]

use jprops_common::{Access, Modifiers};
use jprops_infer::{InferenceOutcome, PropertyInference};
use jprops_symbols::{
    ClassId, ClassKind, FieldId, FieldSymbol, MethodId, Mutability, PrimitiveKind, SymbolModel,
    SymbolTable, TypeId,
};
use smallvec::smallvec;

pub const PUBLIC: Modifiers = Modifiers::PUBLIC;
pub const PRIVATE: Modifiers = Modifiers::PRIVATE;
pub const PROTECTED: Modifiers = Modifiers::PROTECTED;
pub const PACKAGE: Modifiers = Modifiers::empty();

/// A symbol table preloaded with `Object`, `Number`, `Integer` (boxing
/// `int`) and `String`.
pub struct Fixture {
    pub table: SymbolTable,
    pub object: ClassId,
    pub number: ClassId,
    pub integer: ClassId,
    pub string: ClassId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut table = SymbolTable::new();
        let object = table.declare_class("Object", "java.lang", ClassKind::Class);
        let number = table.declare_class("Number", "java.lang", ClassKind::Class);
        let integer = table.declare_class("Integer", "java.lang", ClassKind::Class);
        let string = table.declare_class("String", "java.lang", ClassKind::Class);
        table.set_object_class(object).expect("object");
        table.set_supertype(number, object).expect("extends");
        table.set_supertype(integer, number).expect("extends");
        table.set_supertype(string, object).expect("extends");
        table.register_box(PrimitiveKind::Int, integer).expect("box");
        Self {
            table,
            object,
            number,
            integer,
            string,
        }
    }

    pub fn class(&mut self, name: &str, package: &str) -> ClassId {
        let class = self.table.declare_class(name, package, ClassKind::Class);
        self.table.set_supertype(class, self.object).expect("extends");
        class
    }

    pub fn interface(&mut self, name: &str, package: &str) -> ClassId {
        self.table.declare_class(name, package, ClassKind::Interface)
    }

    pub fn extends(&mut self, class: ClassId, supertype: ClassId) {
        self.table.set_supertype(class, supertype).expect("extends");
    }

    pub fn implements(&mut self, class: ClassId, interface: ClassId) {
        self.table.add_interface(class, interface).expect("implements");
    }

    pub fn ty(&self, class: ClassId) -> TypeId {
        self.table.class_type(class).expect("class type")
    }

    pub fn getter(&mut self, class: ClassId, name: &str, ty: TypeId, mods: Modifiers) -> MethodId {
        self.table
            .declare_method(class, name, vec![], ty, mods)
            .expect("getter")
    }

    pub fn setter(&mut self, class: ClassId, name: &str, ty: TypeId, mods: Modifiers) -> MethodId {
        self.table
            .declare_method(class, name, vec![ty], TypeId::VOID, mods)
            .expect("setter")
    }

    pub fn field(&mut self, class: ClassId, name: &str, ty: TypeId, mods: Modifiers) -> FieldId {
        self.table
            .declare_field(class, name, ty, mods, smallvec![])
            .expect("field")
    }

    pub fn infer(&mut self, class: ClassId) -> InferenceOutcome {
        PropertyInference::new(&mut self.table)
            .infer_properties(class)
            .expect("inference")
    }

    /// The field named `name` declared directly on `class`.
    pub fn own_field(&self, class: ClassId, name: &str) -> Option<&FieldSymbol> {
        self.table
            .fields_of(class)
            .expect("fields")
            .into_iter()
            .map(|id| self.table.field(id).expect("field"))
            .find(|field| field.name == name)
    }

    pub fn own_field_count(&self, class: ClassId) -> usize {
        self.table.fields_of(class).expect("fields").len()
    }

    /// Comparable view of every field of `class`.
    pub fn snapshot(&self, class: ClassId) -> Vec<FieldView> {
        self.table
            .fields_of(class)
            .expect("fields")
            .into_iter()
            .map(|id| {
                let field = self.table.field(id).expect("field");
                FieldView {
                    name: field.name.clone(),
                    type_id: field.type_id,
                    modifiers: field.modifiers,
                    mutability: field.mutability(),
                    auto: field.auto_marker(),
                }
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub type_id: TypeId,
    pub modifiers: Modifiers,
    pub mutability: Option<Mutability>,
    pub auto: Option<Option<Access>>,
}
