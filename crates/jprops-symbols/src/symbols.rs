//! Class, method and field symbols.

use crate::ids::{ClassId, MemberId, TypeId};
use jprops_common::{Access, Modifiers};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
}

/// A class or interface known to the model.
#[derive(Clone, Debug)]
pub struct ClassSymbol {
    pub name: String,
    /// Dotted package name; empty for the default package.
    pub package: String,
    pub kind: ClassKind,
    pub modifiers: Modifiers,
    /// Lexically enclosing class for nested classes.
    pub outer: Option<ClassId>,
    pub supertype: Option<ClassId>,
    pub interfaces: Vec<ClassId>,
    /// Declared members in declaration order. Synthesized fields are
    /// appended.
    pub members: Vec<MemberId>,
    /// The class's own reference type.
    pub type_id: TypeId,
}

impl ClassSymbol {
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }
}

#[derive(Clone, Debug)]
pub struct MethodSymbol {
    pub name: String,
    pub params: Vec<TypeId>,
    pub return_type: TypeId,
    pub modifiers: Modifiers,
    pub owner: ClassId,
    /// Set once the method has been accounted for as a property accessor.
    /// Methods carrying this marker are ignored by later inference runs.
    pub property_accessor: bool,
}

impl MethodSymbol {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn access(&self) -> Access {
        self.modifiers.access()
    }
}

/// Read/write classification of a property backing field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    /// Read-write: getter and setter.
    Var,
    /// Read-only: getter only.
    Val,
    /// Write-only: setter only.
    Set,
}

impl Mutability {
    pub const fn is_readable(self) -> bool {
        matches!(self, Self::Var | Self::Val)
    }

    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Var | Self::Set)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Val => "val",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for Mutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker annotations attached to a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropMarker {
    Mutability(Mutability),
    /// Hidden marker on fields produced or claimed by inference.
    ///
    /// `declared_access` is set when the field existed before inference and
    /// its access was rewritten; such fields are never erased.
    Auto { declared_access: Option<Access> },
}

pub type Markers = SmallVec<[PropMarker; 2]>;

#[derive(Clone, Debug)]
pub struct FieldSymbol {
    pub name: String,
    pub type_id: TypeId,
    pub modifiers: Modifiers,
    pub owner: ClassId,
    pub markers: Markers,
}

impl FieldSymbol {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    pub fn access(&self) -> Access {
        self.modifiers.access()
    }

    pub fn mutability(&self) -> Option<Mutability> {
        self.markers.iter().find_map(|marker| match marker {
            PropMarker::Mutability(m) => Some(*m),
            PropMarker::Auto { .. } => None,
        })
    }

    /// The `auto` marker, as `Some(declared_access)` when present.
    pub fn auto_marker(&self) -> Option<Option<Access>> {
        self.markers.iter().find_map(|marker| match marker {
            PropMarker::Auto { declared_access } => Some(*declared_access),
            PropMarker::Mutability(_) => None,
        })
    }

    pub fn is_synthesized(&self) -> bool {
        self.auto_marker().is_some()
    }

    /// A field tagged `var`, `val` or `set`.
    pub fn is_property_field(&self) -> bool {
        self.mutability().is_some()
    }

    pub fn is_readable_property(&self) -> bool {
        self.mutability().is_some_and(Mutability::is_readable)
    }

    pub fn is_writable_property(&self) -> bool {
        self.mutability().is_some_and(Mutability::is_writable)
    }

    /// Access the field was declared with, before inference rewrote it.
    pub fn declared_access(&self) -> Access {
        self.auto_marker()
            .flatten()
            .unwrap_or_else(|| self.access())
    }
}
