//! Type representation and interning.
//!
//! Types are interned so that identity is `TypeId` equality. Builtin types
//! occupy fixed slots (`TypeId::VOID` .. `TypeId::DOUBLE`); class and array
//! types are allocated on demand.

use crate::error::SymbolError;
use crate::ids::{ClassId, TypeId};
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Char,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "boolean" => Self::Boolean,
            "byte" => Self::Byte,
            "short" => Self::Short,
            "char" => Self::Char,
            "int" => Self::Int,
            "long" => Self::Long,
            "float" => Self::Float,
            "double" => Self::Double,
            _ => return None,
        })
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Simple name of the wrapper class used for boxing.
    pub const fn wrapper_name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Char => "Character",
            Self::Int => "Integer",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
        }
    }

    pub const fn type_id(self) -> TypeId {
        match self {
            Self::Boolean => TypeId::BOOLEAN,
            Self::Byte => TypeId::BYTE,
            Self::Short => TypeId::SHORT,
            Self::Char => TypeId::CHAR,
            Self::Int => TypeId::INT,
            Self::Long => TypeId::LONG,
            Self::Float => TypeId::FLOAT,
            Self::Double => TypeId::DOUBLE,
        }
    }

    /// Widening primitive conversion (identity excluded).
    pub fn widens_to(self, target: Self) -> bool {
        use PrimitiveKind::*;
        matches!(
            (self, target),
            (Byte, Short | Int | Long | Float | Double)
                | (Short, Int | Long | Float | Double)
                | (Char, Int | Long | Float | Double)
                | (Int, Long | Float | Double)
                | (Long, Float | Double)
                | (Float, Double)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Void,
    /// Type of the `null` literal.
    Null,
    Primitive(PrimitiveKind),
    Class(ClassId),
    Array(TypeId),
}

impl TypeData {
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Null | Self::Class(_) | Self::Array(_))
    }
}

/// Interner for `TypeData`.
#[derive(Clone, Debug)]
pub struct TypeTable {
    types: Vec<TypeData>,
    index: FxHashMap<TypeData, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = Self {
            types: Vec::with_capacity(TypeId::FIRST_USER as usize),
            index: FxHashMap::default(),
        };
        table.intern(TypeData::Void);
        table.intern(TypeData::Null);
        for kind in PrimitiveKind::ALL {
            let id = table.intern(TypeData::Primitive(kind));
            debug_assert_eq!(id, kind.type_id());
        }
        table
    }

    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.index.get(&data) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(data);
        self.index.insert(data, id);
        id
    }

    pub fn class(&mut self, class: ClassId) -> TypeId {
        self.intern(TypeData::Class(class))
    }

    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    pub fn get(&self, id: TypeId) -> Result<TypeData, SymbolError> {
        self.types
            .get(id.0 as usize)
            .copied()
            .ok_or(SymbolError::UnknownType(id))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}
