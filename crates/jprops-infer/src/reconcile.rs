//! Pair reconciliation.
//!
//! Turns accessor candidates into resolved properties (read-write,
//! read-only, write-only) and decides, per property, what to do about a
//! field of the same name that may already exist in the ancestry.

use crate::ancestry::{FieldHit, find_existing_field};
use crate::candidates::{Candidates, PropAttrs};
use jprops_common::Access;
use jprops_symbols::{ClassId, FieldId, MethodId, Mutability, SymbolError, SymbolModel, TypeId};
use tracing::{debug, trace};

/// A property chosen from the candidates of one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedProperty {
    pub class: ClassId,
    pub name: String,
    pub mutability: Mutability,
    pub type_id: TypeId,
    /// Weakest access of the chosen accessors.
    pub access: Access,
    pub is_static: bool,
    pub getter: Option<MethodId>,
    pub setter: Option<MethodId>,
}

/// Outcome of matching all candidates of a class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Read-write properties first, then read-only, then write-only.
    pub properties: Vec<ResolvedProperty>,
    /// Names with getters and setters but no compatible pair among them.
    pub unpaired: Vec<String>,
}

/// What to do with the backing field of a resolved property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldPlan {
    /// Enter a new field into the class.
    Create {
        access: Access,
        is_static: bool,
        mutability: Mutability,
        /// Compatible property field in an ancestor that bounded `access`.
        ancestor: Option<FieldId>,
    },
    /// Claim a field the class already declares.
    Retag {
        field: FieldId,
        access: Access,
        declared_access: Access,
        mutability: Mutability,
    },
    /// An existing field cannot back this property; leave the class alone.
    Conflict { field: FieldId },
}

/// Match candidates into properties: read-write pairs over all names, then
/// read-only getters, then write-only setters.
pub fn resolve_properties(
    model: &dyn SymbolModel,
    class: ClassId,
    candidates: &Candidates,
) -> Result<Resolution, SymbolError> {
    let mut resolution = Resolution::default();

    for (name, getters) in &candidates.getters {
        let setters = candidates.setters_of(name);
        if getters.is_empty() || setters.is_empty() {
            continue;
        }
        match resolve_read_write(model, class, getters, setters)? {
            Some(property) => resolution.properties.push(property),
            None => {
                debug!(name = %name, "no assignable getter/setter pair");
                resolution.unpaired.push(name.clone());
            }
        }
    }

    for (name, getters) in &candidates.getters {
        if let Some(getter) = getters.first() {
            if candidates.setters_of(name).is_empty() {
                resolution
                    .properties
                    .push(resolve_single(model, class, getter, Mutability::Val)?);
            }
        }
    }

    for (name, setters) in &candidates.setters {
        if let Some(setter) = setters.first() {
            if candidates.getters_of(name).is_empty() {
                resolution
                    .properties
                    .push(resolve_single(model, class, setter, Mutability::Set)?);
            }
        }
    }

    Ok(resolution)
}

/// First compatible pair, scanning getters outer and setters inner. A pair
/// is compatible when the getter type is assignable to the setter type and
/// both accessors agree on static-ness.
pub fn resolve_read_write(
    model: &dyn SymbolModel,
    class: ClassId,
    getters: &[PropAttrs],
    setters: &[PropAttrs],
) -> Result<Option<ResolvedProperty>, SymbolError> {
    for get in getters {
        let getter = model.method(get.method)?;
        for set in setters {
            let setter = model.method(set.method)?;
            if !model.is_assignable(get.type_id, set.type_id)
                || getter.is_static() != setter.is_static()
            {
                trace!(name = %get.name, getter = %getter.name, setter = %setter.name, "incompatible pair");
                continue;
            }
            return Ok(Some(ResolvedProperty {
                class,
                name: get.name.clone(),
                mutability: Mutability::Var,
                type_id: more_specific_type(model, get.type_id, set.type_id),
                access: getter.access().weakest(setter.access()),
                is_static: getter.is_static(),
                getter: Some(get.method),
                setter: Some(set.method),
            }));
        }
    }
    Ok(None)
}

fn resolve_single(
    model: &dyn SymbolModel,
    class: ClassId,
    attrs: &PropAttrs,
    mutability: Mutability,
) -> Result<ResolvedProperty, SymbolError> {
    let method = model.method(attrs.method)?;
    let (getter, setter) = match mutability {
        Mutability::Set => (None, Some(attrs.method)),
        Mutability::Var | Mutability::Val => (Some(attrs.method), None),
    };
    Ok(ResolvedProperty {
        class,
        name: attrs.name.clone(),
        mutability,
        type_id: attrs.type_id,
        access: method.access(),
        is_static: method.is_static(),
        getter,
        setter,
    })
}

/// The narrower of two types: either one when identical, otherwise the one
/// assignable to the other.
pub fn more_specific_type(model: &dyn SymbolModel, a: TypeId, b: TypeId) -> TypeId {
    if model.is_same_type(a, b) || model.is_assignable(a, b) {
        a
    } else {
        b
    }
}

/// Decide how `property` gets its backing field given the fields already
/// visible from its class.
///
/// An existing field is reusable when its type is assignable to the
/// property type, its static-ness matches, it is not declared by an
/// interface, and it is not a plain public field (those stay direct field
/// accesses). A reusable field on the class itself is re-tagged in place; a
/// reusable property field on an ancestor bounds the access of a new field.
/// Every other existing field is a conflict.
pub fn plan_field(
    model: &dyn SymbolModel,
    property: &ResolvedProperty,
) -> Result<FieldPlan, SymbolError> {
    let hit = find_existing_field(model, &property.name, property.class)?;
    let Some(field_id) = hit.and_then(FieldHit::inherited) else {
        return Ok(FieldPlan::Create {
            access: property.access,
            is_static: property.is_static,
            mutability: property.mutability,
            ancestor: None,
        });
    };

    let field = model.field(field_id)?;
    let owner = model.class(field.owner)?;
    let reusable = model.is_assignable(field.type_id, property.type_id)
        && field.is_static() == property.is_static
        && !owner.is_interface()
        && (!field.modifiers.is_public() || field.is_property_field());

    if reusable {
        let access = field.access().weakest(property.access);
        if field.owner == property.class {
            return Ok(FieldPlan::Retag {
                field: field_id,
                access,
                declared_access: field.declared_access(),
                mutability: property.mutability,
            });
        }
        if field.is_property_field() {
            // Keep the inherited half of the property usable through this class.
            let mutability = match property.mutability {
                Mutability::Val if field.is_writable_property() => Mutability::Var,
                Mutability::Set if field.is_readable_property() => Mutability::Var,
                other => other,
            };
            return Ok(FieldPlan::Create {
                access,
                is_static: property.is_static,
                mutability,
                ancestor: Some(field_id),
            });
        }
    }

    debug!(
        name = %property.name,
        owner = %owner.name,
        "existing field conflicts with inferred property"
    );
    Ok(FieldPlan::Conflict { field: field_id })
}
