//! Name-based field resolution as seen from an access site.

use crate::error::SymbolError;
use crate::ids::{ClassId, FieldId};
use crate::model::SymbolModel;
use crate::table::SymbolTable;
use jprops_common::limits::MAX_ANCESTRY_DEPTH;
use rustc_hash::FxHashSet;

impl SymbolTable {
    /// Resolve `name` as a field reference written inside `site` against the
    /// members of `target` and its ancestors.
    ///
    /// Fields carrying the `auto` marker are invisible from code in their
    /// own class: inside the class, the property must go through its
    /// accessors. The search then continues with the ancestors.
    pub fn resolve_field(
        &self,
        site: ClassId,
        target: ClassId,
        name: &str,
    ) -> Result<Option<FieldId>, SymbolError> {
        let mut visited = FxHashSet::default();
        self.resolve_field_in(site, target, name, &mut visited, 0)
    }

    fn resolve_field_in(
        &self,
        site: ClassId,
        class: ClassId,
        name: &str,
        visited: &mut FxHashSet<ClassId>,
        depth: u32,
    ) -> Result<Option<FieldId>, SymbolError> {
        if depth > MAX_ANCESTRY_DEPTH || !visited.insert(class) {
            return Ok(None);
        }
        for member in self.members_by_name(class, name)? {
            let Some(field_id) = member.as_field() else {
                continue;
            };
            let field = self.field(field_id)?;
            if field.is_synthesized() && field.owner == site {
                continue;
            }
            return Ok(Some(field_id));
        }
        if let Some(supertype) = self.supertype(class)? {
            if let Some(found) = self.resolve_field_in(site, supertype, name, visited, depth + 1)? {
                return Ok(Some(found));
            }
        }
        for interface in self.interfaces(class)? {
            if let Some(found) = self.resolve_field_in(site, interface, name, visited, depth + 1)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}
