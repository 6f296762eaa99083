//! Backing-field synthesis.
//!
//! Applies a [`FieldPlan`] to the live symbol model: enters a new field or
//! rewrites and re-tags an existing one. Every field touched here carries a
//! mutability marker plus the hidden `auto` marker.

use crate::reconcile::{FieldPlan, ResolvedProperty};
use jprops_common::{Access, Modifiers};
use jprops_symbols::{
    FieldId, Markers, MethodId, Mutability, PropMarker, SymbolError, SymbolModel,
};
use smallvec::smallvec;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Synthesized {
    /// A new field was entered into the class.
    Created(FieldId),
    /// A field the class already declared was claimed as backing field.
    Retagged(FieldId),
}

impl Synthesized {
    pub const fn field(self) -> FieldId {
        match self {
            Self::Created(id) | Self::Retagged(id) => id,
        }
    }
}

fn property_markers(mutability: Mutability, declared_access: Option<Access>) -> Markers {
    smallvec![
        PropMarker::Mutability(mutability),
        PropMarker::Auto { declared_access }
    ]
}

/// Apply `plan` for `property`. Returns `None` for a conflict, in which case
/// the model is left untouched.
pub fn apply(
    model: &mut dyn SymbolModel,
    property: &ResolvedProperty,
    plan: &FieldPlan,
) -> Result<Option<Synthesized>, SymbolError> {
    match *plan {
        FieldPlan::Create {
            access,
            is_static,
            mutability,
            ancestor,
        } => {
            let mut modifiers = access.modifiers();
            if is_static {
                modifiers |= Modifiers::STATIC;
            }
            let id = model.declare_field(
                property.class,
                &property.name,
                property.type_id,
                modifiers,
                property_markers(mutability, None),
            )?;
            debug!(
                name = %property.name,
                %access,
                %mutability,
                is_static,
                bounded_by_ancestor = ancestor.is_some(),
                "synthesized backing field"
            );
            Ok(Some(Synthesized::Created(id)))
        }
        FieldPlan::Retag {
            field,
            access,
            declared_access,
            mutability,
        } => {
            let modifiers = model.field(field)?.modifiers.with_access(access);
            model.rewrite_flags(field, modifiers)?;
            model.set_field_markers(field, property_markers(mutability, Some(declared_access)))?;
            debug!(
                name = %property.name,
                %declared_access,
                %access,
                %mutability,
                "re-tagged existing field"
            );
            Ok(Some(Synthesized::Retagged(field)))
        }
        FieldPlan::Conflict { .. } => Ok(None),
    }
}

/// Mark accessor methods so that later runs skip them.
pub fn mark_accessors(
    model: &mut dyn SymbolModel,
    methods: impl IntoIterator<Item = MethodId>,
) -> Result<(), SymbolError> {
    for method in methods {
        model.mark_property_accessor(method)?;
    }
    Ok(())
}
