//! Declaration modifiers and access levels.
//!
//! Bit values follow the class-file access flags so that flag sets coming
//! from a host compiler can be taken over without translation.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Modifier flags carried by classes, methods and fields.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const ABSTRACT = 0x0400;
    }
}

impl Modifiers {
    /// All visibility bits. Package access is the absence of all three.
    pub const ACCESS_MASK: Self = Self::PUBLIC.union(Self::PRIVATE).union(Self::PROTECTED);

    /// Parse a single source-level modifier keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Self::PUBLIC),
            "private" => Some(Self::PRIVATE),
            "protected" => Some(Self::PROTECTED),
            "static" => Some(Self::STATIC),
            "final" => Some(Self::FINAL),
            "abstract" => Some(Self::ABSTRACT),
            _ => None,
        }
    }

    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    pub const fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    /// Access level encoded in these flags.
    pub fn access(self) -> Access {
        Access::of(self)
    }

    /// Replace the visibility bits, keeping every other modifier.
    #[must_use]
    pub fn with_access(self, access: Access) -> Self {
        self.difference(Self::ACCESS_MASK) | access.modifiers()
    }

    /// Only the static bit of these flags.
    #[must_use]
    pub fn static_bit(self) -> Self {
        self.intersection(Self::STATIC)
    }
}

/// Access level of a member, ordered from most restrictive to most
/// permissive so that `max` yields the weakest access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Private,
    Package,
    Protected,
    Public,
}

impl Access {
    /// Decode the access level from modifier flags.
    ///
    /// Malformed flag sets with several visibility bits resolve to the most
    /// permissive one.
    pub fn of(modifiers: Modifiers) -> Self {
        if modifiers.contains(Modifiers::PUBLIC) {
            Self::Public
        } else if modifiers.contains(Modifiers::PROTECTED) {
            Self::Protected
        } else if modifiers.contains(Modifiers::PRIVATE) {
            Self::Private
        } else {
            Self::Package
        }
    }

    /// The more permissive of two access levels.
    pub fn weakest(self, other: Self) -> Self {
        self.max(other)
    }

    /// Visibility bits for this level (empty for package access).
    pub const fn modifiers(self) -> Modifiers {
        match self {
            Self::Private => Modifiers::PRIVATE,
            Self::Package => Modifiers::empty(),
            Self::Protected => Modifiers::PROTECTED,
            Self::Public => Modifiers::PUBLIC,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Package => "package",
            Self::Protected => "protected",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "tests/modifiers_tests.rs"]
mod tests;
