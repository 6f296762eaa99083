//! JSON class model loading.
//!
//! A class model describes classes, their hierarchy and their declared
//! members the way a host compiler would have them after member entry:
//!
//! ```json
//! {
//!   "classes": [
//!     { "name": "Object", "package": "java.lang" },
//!     {
//!       "name": "Point",
//!       "package": "geo",
//!       "fields": [{ "name": "x", "type": "int", "modifiers": ["private"] }],
//!       "methods": [
//!         { "name": "getX", "returns": "int", "modifiers": ["public"] },
//!         { "name": "setX", "params": ["int"], "modifiers": ["public"] }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Types are primitive keywords, `void`, declared class names, or any of
//! those followed by `[]`. A class named `Object` becomes the root of the
//! reference hierarchy and the implicit superclass of classes without
//! `extends`; classes named after primitive wrappers (`Integer`, ...) box
//! the matching primitive.

use jprops_common::Modifiers;
use jprops_symbols::{
    ClassId, ClassKind, PrimitiveKind, SymbolError, SymbolModel, SymbolTable, TypeId,
};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

const ROOT_CLASS: &str = "Object";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to parse class model: {0}")]
    Json(#[from] serde_json::Error),
    #[error("class `{0}` is declared more than once")]
    DuplicateClass(String),
    #[error("class `{class}` references unknown class `{name}`")]
    UnknownClass { class: String, name: String },
    #[error("unknown type `{ty}` in class `{class}`")]
    UnknownType { class: String, ty: String },
    #[error("unknown modifier `{modifier}` in class `{class}`")]
    UnknownModifier { class: String, modifier: String },
    #[error(transparent)]
    Symbol(#[from] SymbolError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassModel {
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub package: String,
    #[serde(default = "default_kind")]
    pub kind: ClassKind,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub outer: Option<String>,
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default = "default_return")]
    pub returns: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

fn default_kind() -> ClassKind {
    ClassKind::Class
}

fn default_return() -> String {
    "void".to_string()
}

/// Parse a JSON class model and build its symbol table.
pub fn load_model(json: &str) -> Result<SymbolTable, ModelError> {
    let model: ClassModel = serde_json::from_str(json)?;
    build_table(&model)
}

/// Build a symbol table from a parsed class model.
pub fn build_table(model: &ClassModel) -> Result<SymbolTable, ModelError> {
    let mut table = SymbolTable::new();

    // Declare every class first so references may point forward.
    let mut seen = FxHashSet::default();
    let mut ids = Vec::with_capacity(model.classes.len());
    for decl in &model.classes {
        if !seen.insert(decl.name.as_str()) {
            return Err(ModelError::DuplicateClass(decl.name.clone()));
        }
        ids.push(table.declare_class(&decl.name, &decl.package, decl.kind));
    }

    let root = table.lookup_class(ROOT_CLASS);
    if let Some(root) = root {
        table.set_object_class(root)?;
    }
    for kind in PrimitiveKind::ALL {
        if let Some(wrapper) = table.lookup_class(kind.wrapper_name()) {
            table.register_box(kind, wrapper)?;
        }
    }

    for (decl, &id) in model.classes.iter().zip(&ids) {
        link_class(&mut table, decl, id, root)?;
    }
    for (decl, &id) in model.classes.iter().zip(&ids) {
        enter_members(&mut table, decl, id)?;
    }

    debug!(classes = ids.len(), "class model loaded");
    Ok(table)
}

fn link_class(
    table: &mut SymbolTable,
    decl: &ClassDecl,
    id: ClassId,
    root: Option<ClassId>,
) -> Result<(), ModelError> {
    table.set_class_modifiers(id, parse_modifiers(&decl.name, &decl.modifiers)?)?;

    let resolve = |table: &SymbolTable, name: &str| {
        table
            .lookup_class(name)
            .ok_or_else(|| ModelError::UnknownClass {
                class: decl.name.clone(),
                name: name.to_string(),
            })
    };

    if let Some(outer) = &decl.outer {
        let outer = resolve(&*table, outer)?;
        table.set_outer(id, outer)?;
    }
    match &decl.extends {
        Some(supertype) => {
            let supertype = resolve(&*table, supertype)?;
            table.set_supertype(id, supertype)?;
        }
        None => {
            if let Some(root) = root.filter(|&root| root != id && decl.kind == ClassKind::Class) {
                table.set_supertype(id, root)?;
            }
        }
    }
    for interface in &decl.implements {
        let interface = resolve(&*table, interface)?;
        table.add_interface(id, interface)?;
    }
    Ok(())
}

fn enter_members(table: &mut SymbolTable, decl: &ClassDecl, id: ClassId) -> Result<(), ModelError> {
    for field in &decl.fields {
        let ty = resolve_type(table, &decl.name, &field.type_name)?;
        let modifiers = parse_modifiers(&decl.name, &field.modifiers)?;
        table.declare_field(id, &field.name, ty, modifiers, SmallVec::new())?;
    }
    for method in &decl.methods {
        let params = method
            .params
            .iter()
            .map(|param| resolve_type(table, &decl.name, param))
            .collect::<Result<Vec<_>, _>>()?;
        let returns = resolve_type(table, &decl.name, &method.returns)?;
        let modifiers = parse_modifiers(&decl.name, &method.modifiers)?;
        table.declare_method(id, &method.name, params, returns, modifiers)?;
    }
    Ok(())
}

fn parse_modifiers(class: &str, keywords: &[String]) -> Result<Modifiers, ModelError> {
    keywords.iter().try_fold(Modifiers::empty(), |acc, keyword| {
        Modifiers::from_keyword(keyword)
            .map(|flag| acc | flag)
            .ok_or_else(|| ModelError::UnknownModifier {
                class: class.to_string(),
                modifier: keyword.clone(),
            })
    })
}

/// Resolve a type expression: `void`, a primitive keyword, a class name,
/// each optionally followed by one or more `[]`.
pub fn resolve_type(table: &mut SymbolTable, class: &str, ty: &str) -> Result<TypeId, ModelError> {
    let unknown = || ModelError::UnknownType {
        class: class.to_string(),
        ty: ty.to_string(),
    };

    let trimmed = ty.trim();
    if let Some(element) = trimmed.strip_suffix("[]") {
        let element = resolve_type(table, class, element)?;
        if table.is_void(element) {
            return Err(unknown());
        }
        return Ok(table.array_of(element)?);
    }
    if trimmed == "void" {
        return Ok(TypeId::VOID);
    }
    if let Some(kind) = PrimitiveKind::from_keyword(trimmed) {
        return Ok(kind.type_id());
    }
    match table.lookup_class(trimmed) {
        Some(id) => Ok(table.class_type(id)?),
        None => Err(unknown()),
    }
}
