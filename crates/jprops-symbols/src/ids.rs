//! Typed indices into the symbol and type arenas.

use serde::{Deserialize, Serialize};

/// Index of a class or interface symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassId(pub u32);

/// Index of a method symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MethodId(pub u32);

/// Index of a field symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldId(pub u32);

/// Interned type. Equal ids mean identical types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const VOID: Self = Self(0);
    pub const NULL: Self = Self(1);
    pub const BOOLEAN: Self = Self(2);
    pub const BYTE: Self = Self(3);
    pub const SHORT: Self = Self(4);
    pub const CHAR: Self = Self(5);
    pub const INT: Self = Self(6);
    pub const LONG: Self = Self(7);
    pub const FLOAT: Self = Self(8);
    pub const DOUBLE: Self = Self(9);

    /// First id handed out for non-builtin types.
    pub const FIRST_USER: u32 = 10;
}

/// A declared member of a class, in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberId {
    Method(MethodId),
    Field(FieldId),
}

impl MemberId {
    pub const fn as_method(self) -> Option<MethodId> {
        match self {
            Self::Method(id) => Some(id),
            Self::Field(_) => None,
        }
    }

    pub const fn as_field(self) -> Option<FieldId> {
        match self {
            Self::Field(id) => Some(id),
            Self::Method(_) => None,
        }
    }
}
