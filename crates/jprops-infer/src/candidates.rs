//! Accessor candidate extraction.
//!
//! Scans the methods declared directly on a class and derives property
//! names from `get`/`is`/`set` prefixed accessors. Nothing is written to the
//! symbol model in this phase.

use indexmap::IndexMap;
use jprops_symbols::{ClassId, MethodId, MethodSymbol, SymbolError, SymbolModel, TypeId};
use std::fmt;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessorPrefix {
    Get,
    Is,
    Set,
}

impl AccessorPrefix {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Is => "is",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for AccessorPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A method that looks like an accessor for property `name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropAttrs {
    pub prefix: AccessorPrefix,
    pub name: String,
    /// Getter return type or setter parameter type.
    pub type_id: TypeId,
    pub method: MethodId,
}

impl PropAttrs {
    /// Getter candidate: no parameters, non-void return, `get` or `is` prefix.
    pub fn from_getter(
        model: &dyn SymbolModel,
        id: MethodId,
        method: &MethodSymbol,
    ) -> Option<Self> {
        if model.is_void(method.return_type) || !method.params.is_empty() {
            return None;
        }
        [AccessorPrefix::Get, AccessorPrefix::Is]
            .into_iter()
            .find_map(|prefix| Self::derive(id, method, prefix, method.return_type))
    }

    /// Setter candidate: exactly one parameter, `set` prefix.
    pub fn from_setter(id: MethodId, method: &MethodSymbol) -> Option<Self> {
        match method.params.as_slice() {
            [param] => Self::derive(id, method, AccessorPrefix::Set, *param),
            _ => None,
        }
    }

    fn derive(
        id: MethodId,
        method: &MethodSymbol,
        prefix: AccessorPrefix,
        type_id: TypeId,
    ) -> Option<Self> {
        let name = derive_property_name(&method.name, prefix)?;
        Some(Self {
            prefix,
            name,
            type_id,
            method: id,
        })
    }
}

/// Derive a property name from an accessor method name.
///
/// `getFoo` and `get$foo` lower-case the first suffix character (`foo`,
/// `$foo`); `get_Foo` strips leading underscores and keeps the case (`Foo`).
/// An empty or all-underscore suffix, or one starting with any other
/// character, yields `None`.
pub fn derive_property_name(method_name: &str, prefix: AccessorPrefix) -> Option<String> {
    let suffix = method_name.strip_prefix(prefix.as_str())?;
    let first = suffix.chars().next()?;
    if first.is_uppercase() || first == '$' {
        let mut name = String::with_capacity(suffix.len());
        name.extend(first.to_lowercase());
        name.push_str(&suffix[first.len_utf8()..]);
        Some(name)
    } else if first == '_' {
        let stripped = suffix.trim_start_matches('_');
        (!stripped.is_empty()).then(|| stripped.to_string())
    } else {
        None
    }
}

/// Property name to candidates, in declaration order.
pub type CandidateMap = IndexMap<String, Vec<PropAttrs>>;

/// Getter and setter candidates of one class.
#[derive(Clone, Debug, Default)]
pub struct Candidates {
    pub getters: CandidateMap,
    pub setters: CandidateMap,
}

impl Candidates {
    /// Collect candidates from the methods declared directly on `class`.
    ///
    /// Methods already marked as property accessors are skipped so that a
    /// repeated run sees nothing new.
    pub fn gather(model: &dyn SymbolModel, class: ClassId) -> Result<Self, SymbolError> {
        let mut candidates = Self::default();
        for member in model.members(class, false)? {
            let Some(id) = member.as_method() else {
                continue;
            };
            let method = model.method(id)?;
            if method.property_accessor {
                trace!(method = %method.name, "already a property accessor");
                continue;
            }
            if let Some(attrs) = PropAttrs::from_getter(model, id, method) {
                Self::insert(&mut candidates.getters, attrs);
            }
            if let Some(attrs) = PropAttrs::from_setter(id, method) {
                Self::insert(&mut candidates.setters, attrs);
            }
        }
        Ok(candidates)
    }

    fn insert(map: &mut CandidateMap, attrs: PropAttrs) {
        let entry = map.entry(attrs.name.clone()).or_default();
        if !entry.iter().any(|existing| existing.method == attrs.method) {
            entry.push(attrs);
        }
    }

    pub fn getters_of(&self, name: &str) -> &[PropAttrs] {
        self.getters.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn setters_of(&self, name: &str) -> &[PropAttrs] {
        self.setters.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every accessor method recorded for `name`, getters first.
    pub fn methods_of(&self, name: &str) -> impl Iterator<Item = MethodId> + '_ {
        self.getters_of(name)
            .iter()
            .chain(self.setters_of(name))
            .map(|attrs| attrs.method)
    }

    pub fn is_empty(&self) -> bool {
        self.getters.is_empty() && self.setters.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/candidates_tests.rs"]
mod tests;
