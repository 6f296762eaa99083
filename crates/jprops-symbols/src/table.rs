//! In-memory symbol table.

use crate::error::SymbolError;
use crate::ids::{ClassId, FieldId, MemberId, MethodId, TypeId};
use crate::model::SymbolModel;
use crate::symbols::{ClassKind, ClassSymbol, FieldSymbol, Markers, MethodSymbol};
use crate::types::{PrimitiveKind, TypeData, TypeTable};
use jprops_common::Modifiers;
use jprops_common::limits::MAX_ANCESTRY_DEPTH;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

/// Arena-backed symbol table implementing [`SymbolModel`].
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    classes: Vec<ClassSymbol>,
    methods: Vec<MethodSymbol>,
    fields: Vec<FieldSymbol>,
    types: TypeTable,
    class_names: FxHashMap<String, ClassId>,
    /// Root of the reference-type hierarchy, if one was declared.
    object_class: Option<ClassId>,
    boxes: FxHashMap<PrimitiveKind, ClassId>,
    unboxes: FxHashMap<ClassId, PrimitiveKind>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Declaration
    // =========================================================================

    /// Declare a class or interface. Later declarations with the same name
    /// shadow earlier ones in `lookup_class`.
    pub fn declare_class(&mut self, name: &str, package: &str, kind: ClassKind) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        let type_id = self.types.class(id);
        self.classes.push(ClassSymbol {
            name: name.to_string(),
            package: package.to_string(),
            kind,
            modifiers: Modifiers::PUBLIC,
            outer: None,
            supertype: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            type_id,
        });
        self.class_names.insert(name.to_string(), id);
        id
    }

    pub fn set_supertype(&mut self, class: ClassId, supertype: ClassId) -> Result<(), SymbolError> {
        self.class_exists(supertype)?;
        self.class_mut(class)?.supertype = Some(supertype);
        Ok(())
    }

    pub fn add_interface(&mut self, class: ClassId, interface: ClassId) -> Result<(), SymbolError> {
        self.class_exists(interface)?;
        self.class_mut(class)?.interfaces.push(interface);
        Ok(())
    }

    pub fn set_outer(&mut self, class: ClassId, outer: ClassId) -> Result<(), SymbolError> {
        self.class_exists(outer)?;
        self.class_mut(class)?.outer = Some(outer);
        Ok(())
    }

    pub fn set_class_modifiers(
        &mut self,
        class: ClassId,
        modifiers: Modifiers,
    ) -> Result<(), SymbolError> {
        self.class_mut(class)?.modifiers = modifiers;
        Ok(())
    }

    pub fn declare_method(
        &mut self,
        class: ClassId,
        name: &str,
        params: Vec<TypeId>,
        return_type: TypeId,
        modifiers: Modifiers,
    ) -> Result<MethodId, SymbolError> {
        self.class_exists(class)?;
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(MethodSymbol {
            name: name.to_string(),
            params,
            return_type,
            modifiers,
            owner: class,
            property_accessor: false,
        });
        self.class_mut(class)?.members.push(MemberId::Method(id));
        Ok(id)
    }

    /// Make `class` the root every reference type is assignable to.
    pub fn set_object_class(&mut self, class: ClassId) -> Result<(), SymbolError> {
        self.class_exists(class)?;
        self.object_class = Some(class);
        Ok(())
    }

    pub fn object_class(&self) -> Option<ClassId> {
        self.object_class
    }

    /// Register `class` as the wrapper used to box `kind`.
    pub fn register_box(&mut self, kind: PrimitiveKind, class: ClassId) -> Result<(), SymbolError> {
        self.class_exists(class)?;
        self.boxes.insert(kind, class);
        self.unboxes.insert(class, kind);
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn lookup_class(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    pub fn class_type(&self, class: ClassId) -> Result<TypeId, SymbolError> {
        Ok(self.class(class)?.type_id)
    }

    pub fn array_of(&mut self, element: TypeId) -> Result<TypeId, SymbolError> {
        self.types.get(element)?;
        Ok(self.types.array_of(element))
    }

    pub fn type_data(&self, ty: TypeId) -> Result<TypeData, SymbolError> {
        self.types.get(ty)
    }

    pub fn fields_of(&self, class: ClassId) -> Result<Vec<FieldId>, SymbolError> {
        Ok(self
            .class(class)?
            .members
            .iter()
            .filter_map(|member| member.as_field())
            .collect())
    }

    /// Human-readable type name.
    pub fn display_type(&self, ty: TypeId) -> String {
        match self.types.get(ty) {
            Ok(TypeData::Void) => "void".to_string(),
            Ok(TypeData::Null) => "null".to_string(),
            Ok(TypeData::Primitive(kind)) => kind.keyword().to_string(),
            Ok(TypeData::Class(class)) => self
                .classes
                .get(class.0 as usize)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| format!("<class {}>", class.0)),
            Ok(TypeData::Array(element)) => format!("{}[]", self.display_type(element)),
            Err(_) => format!("<type {}>", ty.0),
        }
    }

    /// Whether a field may be dropped by later code generation: only fields
    /// synthesized from scratch qualify, never pre-existing ones that
    /// inference re-tagged.
    pub fn is_erasable(&self, field: FieldId) -> Result<bool, SymbolError> {
        Ok(matches!(self.field(field)?.auto_marker(), Some(None)))
    }

    /// Reflexive, transitive subclass test over superclasses and interfaces.
    pub fn is_subclass(&self, class: ClassId, ancestor: ClassId) -> bool {
        if class == ancestor {
            return true;
        }
        let mut visited = FxHashSet::default();
        let mut stack = vec![(class, 0u32)];
        while let Some((current, depth)) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if depth >= MAX_ANCESTRY_DEPTH || !visited.insert(current) {
                continue;
            }
            let Some(symbol) = self.classes.get(current.0 as usize) else {
                continue;
            };
            if let Some(supertype) = symbol.supertype {
                stack.push((supertype, depth + 1));
            }
            for &interface in &symbol.interfaces {
                stack.push((interface, depth + 1));
            }
        }
        false
    }

    fn is_reference_assignable(&self, from: ClassId, to: ClassId) -> bool {
        Some(to) == self.object_class || self.is_subclass(from, to)
    }

    /// Assignment conversion: identity, primitive widening, boxing then
    /// reference widening, unboxing then primitive widening, reference
    /// widening, and array covariance.
    fn assignable(&self, from: TypeId, to: TypeId) -> bool {
        if from == to {
            return true;
        }
        let (Ok(source), Ok(target)) = (self.types.get(from), self.types.get(to)) else {
            return false;
        };
        match (source, target) {
            (TypeData::Void, _) | (_, TypeData::Void) => false,
            (TypeData::Null, target) => target.is_reference(),
            (TypeData::Primitive(s), TypeData::Primitive(t)) => s.widens_to(t),
            (TypeData::Primitive(s), TypeData::Class(t)) => self
                .boxes
                .get(&s)
                .is_some_and(|&boxed| self.is_reference_assignable(boxed, t)),
            (TypeData::Class(s), TypeData::Primitive(t)) => self
                .unboxes
                .get(&s)
                .is_some_and(|&unboxed| unboxed == t || unboxed.widens_to(t)),
            (TypeData::Class(s), TypeData::Class(t)) => self.is_reference_assignable(s, t),
            (TypeData::Array(_), TypeData::Class(t)) => Some(t) == self.object_class,
            (TypeData::Array(s), TypeData::Array(t)) => {
                let source_is_ref = self.types.get(s).is_ok_and(TypeData::is_reference);
                let target_is_ref = self.types.get(t).is_ok_and(TypeData::is_reference);
                source_is_ref && target_is_ref && self.assignable(s, t)
            }
            _ => false,
        }
    }

    fn class_exists(&self, class: ClassId) -> Result<(), SymbolError> {
        self.class(class).map(|_| ())
    }

    fn class_mut(&mut self, id: ClassId) -> Result<&mut ClassSymbol, SymbolError> {
        self.classes
            .get_mut(id.0 as usize)
            .ok_or(SymbolError::UnknownClass(id))
    }

    fn field_mut(&mut self, id: FieldId) -> Result<&mut FieldSymbol, SymbolError> {
        self.fields
            .get_mut(id.0 as usize)
            .ok_or(SymbolError::UnknownField(id))
    }
}

impl SymbolModel for SymbolTable {
    fn class(&self, id: ClassId) -> Result<&ClassSymbol, SymbolError> {
        self.classes
            .get(id.0 as usize)
            .ok_or(SymbolError::UnknownClass(id))
    }

    fn method(&self, id: MethodId) -> Result<&MethodSymbol, SymbolError> {
        self.methods
            .get(id.0 as usize)
            .ok_or(SymbolError::UnknownMethod(id))
    }

    fn field(&self, id: FieldId) -> Result<&FieldSymbol, SymbolError> {
        self.fields
            .get(id.0 as usize)
            .ok_or(SymbolError::UnknownField(id))
    }

    fn classes(&self) -> Vec<ClassId> {
        (0..self.classes.len() as u32).map(ClassId).collect()
    }

    fn members(&self, class: ClassId, include_inherited: bool) -> Result<Vec<MemberId>, SymbolError> {
        let own = &self.class(class)?.members;
        if !include_inherited {
            return Ok(own.clone());
        }

        let mut result = own.clone();
        let mut visited = FxHashSet::default();
        visited.insert(class);
        let mut queue = std::collections::VecDeque::new();
        self.enqueue_ancestors(class, &mut queue)?;
        while let Some(ancestor) = queue.pop_front() {
            if !visited.insert(ancestor) || visited.len() as u32 > MAX_ANCESTRY_DEPTH {
                continue;
            }
            result.extend(self.class(ancestor)?.members.iter().copied());
            self.enqueue_ancestors(ancestor, &mut queue)?;
        }
        Ok(result)
    }

    fn members_by_name(&self, class: ClassId, name: &str) -> Result<Vec<MemberId>, SymbolError> {
        let mut result = Vec::new();
        for &member in &self.class(class)?.members {
            let member_name = match member {
                MemberId::Method(id) => &self.method(id)?.name,
                MemberId::Field(id) => &self.field(id)?.name,
            };
            if member_name == name {
                result.push(member);
            }
        }
        Ok(result)
    }

    fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        self.assignable(from, to)
    }

    fn declare_field(
        &mut self,
        class: ClassId,
        name: &str,
        type_id: TypeId,
        modifiers: Modifiers,
        markers: Markers,
    ) -> Result<FieldId, SymbolError> {
        self.types.get(type_id)?;
        let has_field = self
            .members_by_name(class, name)?
            .iter()
            .any(|member| member.as_field().is_some());
        if has_field {
            return Err(SymbolError::DuplicateField {
                class: self.class(class)?.name.clone(),
                name: name.to_string(),
            });
        }

        let id = FieldId(self.fields.len() as u32);
        self.fields.push(FieldSymbol {
            name: name.to_string(),
            type_id,
            modifiers,
            owner: class,
            markers,
        });
        self.class_mut(class)?.members.push(MemberId::Field(id));
        trace!(class = class.0, field = name, "entered field");
        Ok(id)
    }

    fn rewrite_flags(&mut self, field: FieldId, modifiers: Modifiers) -> Result<(), SymbolError> {
        self.field_mut(field)?.modifiers = modifiers;
        Ok(())
    }

    fn set_field_markers(&mut self, field: FieldId, markers: Markers) -> Result<(), SymbolError> {
        self.field_mut(field)?.markers = markers;
        Ok(())
    }

    fn mark_property_accessor(&mut self, method: MethodId) -> Result<(), SymbolError> {
        self.methods
            .get_mut(method.0 as usize)
            .ok_or(SymbolError::UnknownMethod(method))?
            .property_accessor = true;
        Ok(())
    }
}

impl SymbolTable {
    fn enqueue_ancestors(
        &self,
        class: ClassId,
        queue: &mut std::collections::VecDeque<ClassId>,
    ) -> Result<(), SymbolError> {
        let symbol = self.class(class)?;
        queue.extend(symbol.supertype);
        queue.extend(symbol.interfaces.iter().copied());
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/assignability_tests.rs"]
mod tests;
