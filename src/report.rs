//! Inference reports.

use jprops_common::Access;
use jprops_infer::{InferenceOutcome, SkipReason};
use jprops_symbols::{FieldId, Mutability, SymbolError, SymbolModel, SymbolTable};
use serde::Serialize;
use std::fmt::Write;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelReport {
    pub classes: Vec<ClassReport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassReport {
    pub class: String,
    pub package: String,
    pub fields: Vec<FieldReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkipReport>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub access: Access,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutability: Option<Mutability>,
    pub origin: FieldOrigin,
}

/// Where a field in the report came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldOrigin {
    /// Declared in the model and untouched by inference.
    Declared,
    /// Entered by inference.
    Synthesized,
    /// Declared in the model and claimed as a backing field.
    Retained { declared_access: Access },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkipReport {
    pub name: String,
    pub reason: String,
}

impl ModelReport {
    /// Describe the current fields of every class in `outcomes`.
    pub fn build(table: &SymbolTable, outcomes: &[InferenceOutcome]) -> Result<Self, SymbolError> {
        let classes = outcomes
            .iter()
            .map(|outcome| ClassReport::build(table, outcome))
            .collect::<Result<_, _>>()?;
        Ok(Self { classes })
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for class in &self.classes {
            class.render_text(&mut out);
        }
        out
    }
}

impl ClassReport {
    fn build(table: &SymbolTable, outcome: &InferenceOutcome) -> Result<Self, SymbolError> {
        let symbol = table.class(outcome.class)?;
        let fields = table
            .fields_of(outcome.class)?
            .into_iter()
            .map(|id| FieldReport::build(table, id))
            .collect::<Result<_, _>>()?;
        let skipped = outcome
            .skipped
            .iter()
            .map(|skip| {
                let reason = match skip.reason {
                    SkipReason::NoCompatiblePair => "no compatible getter/setter pair".to_string(),
                    SkipReason::ConflictingField { field } => {
                        let field = table.field(field)?;
                        let owner = table.class(field.owner)?;
                        format!("conflicts with field `{}.{}`", owner.name, field.name)
                    }
                };
                Ok(SkipReport {
                    name: skip.name.clone(),
                    reason,
                })
            })
            .collect::<Result<_, SymbolError>>()?;

        Ok(Self {
            class: symbol.name.clone(),
            package: symbol.package.clone(),
            fields,
            skipped,
        })
    }

    fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.class.clone()
        } else {
            format!("{}.{}", self.package, self.class)
        }
    }

    fn render_text(&self, out: &mut String) {
        let _ = writeln!(out, "class {}", self.qualified_name());
        for field in &self.fields {
            let (sigil, origin) = match field.origin {
                FieldOrigin::Declared => (' ', "declared".to_string()),
                FieldOrigin::Synthesized => ('+', "synthesized".to_string()),
                FieldOrigin::Retained { declared_access } => {
                    ('~', format!("retained, declared {declared_access}"))
                }
            };
            let modifiers = if field.is_static {
                format!("{} static", field.access)
            } else {
                field.access.to_string()
            };
            let mutability = field
                .mutability
                .map(|m| format!(" @{m}"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {sigil} {modifiers} {} {}{mutability} ({origin})",
                field.type_name, field.name
            );
        }
        for skip in &self.skipped {
            let _ = writeln!(out, "  ! {}: {}", skip.name, skip.reason);
        }
    }
}

impl FieldReport {
    fn build(table: &SymbolTable, id: FieldId) -> Result<Self, SymbolError> {
        let field = table.field(id)?;
        let origin = match field.auto_marker() {
            None => FieldOrigin::Declared,
            Some(None) => FieldOrigin::Synthesized,
            Some(Some(declared_access)) => FieldOrigin::Retained { declared_access },
        };
        Ok(Self {
            name: field.name.clone(),
            type_name: table.display_type(field.type_id),
            access: field.access(),
            is_static: field.is_static(),
            mutability: field.mutability(),
            origin,
        })
    }
}
