//! Search for a field of a given name in a class's ancestry.

use crate::access::is_inherited;
use jprops_common::limits::MAX_ANCESTRY_DEPTH;
use jprops_symbols::{ClassId, FieldId, SymbolError, SymbolModel};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Result of a successful ancestry search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldHit {
    /// A field inherited into the origin class.
    Inherited(FieldId),
    /// The closest field of that name is not inherited into the origin
    /// (private to another top-level class, package access from another
    /// package, or a static interface field).
    Hidden(FieldId),
}

impl FieldHit {
    pub const fn inherited(self) -> Option<FieldId> {
        match self {
            Self::Inherited(id) => Some(id),
            Self::Hidden(_) => None,
        }
    }
}

/// Find the field named `name` that `origin` would see, starting at `origin`.
///
/// Search order is the class itself, then the superclass chain, then the
/// interfaces in declaration order. The first field found on a class or its
/// superclass chain ends the search, visible or not. On the interface side
/// only an inherited, non-static hit ends the search, so a diamond reached
/// through the superclass never consults the interfaces.
pub fn find_existing_field(
    model: &dyn SymbolModel,
    name: &str,
    origin: ClassId,
) -> Result<Option<FieldHit>, SymbolError> {
    let mut visited = FxHashSet::default();
    find_in(model, name, origin, origin, &mut visited, 0)
}

fn find_in(
    model: &dyn SymbolModel,
    name: &str,
    class: ClassId,
    origin: ClassId,
    visited: &mut FxHashSet<ClassId>,
    depth: u32,
) -> Result<Option<FieldHit>, SymbolError> {
    if depth > MAX_ANCESTRY_DEPTH {
        trace!(name, class = class.0, "ancestry walk too deep, giving up");
        return Ok(None);
    }
    // A class reached twice (diamond or malformed cycle) has nothing new.
    if !visited.insert(class) {
        return Ok(None);
    }

    for member in model.members_by_name(class, name)? {
        let Some(field_id) = member.as_field() else {
            continue;
        };
        let field = model.field(field_id)?;
        return Ok(Some(
            if is_inherited(model, field.owner, field.modifiers, origin)? {
                FieldHit::Inherited(field_id)
            } else {
                FieldHit::Hidden(field_id)
            },
        ));
    }

    if let Some(supertype) = model.supertype(class)? {
        if let Some(hit) = find_in(model, name, supertype, origin, visited, depth + 1)? {
            return Ok(Some(hit));
        }
    }

    for interface in model.interfaces(class)? {
        if let Some(FieldHit::Inherited(field_id)) =
            find_in(model, name, interface, origin, visited, depth + 1)?
        {
            if !model.field(field_id)?.is_static() {
                return Ok(Some(FieldHit::Inherited(field_id)));
            }
        }
    }
    Ok(None)
}
