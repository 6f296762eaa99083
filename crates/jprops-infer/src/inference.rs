//! Per-class inference driver.

use crate::candidates::Candidates;
use crate::error::InferenceError;
use crate::reconcile::{self, FieldPlan};
use crate::synthesize::{self, Synthesized};
use jprops_common::limits::MAX_ANCESTRY_DEPTH;
use jprops_symbols::{ClassId, FieldId, SymbolError, SymbolModel};
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Getters and setters exist but none pair up.
    NoCompatiblePair,
    /// A field in the ancestry cannot back the property.
    ConflictingField { field: FieldId },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedProperty {
    pub name: String,
    pub reason: SkipReason,
}

/// What inference did to one class.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InferenceOutcome {
    pub class: ClassId,
    /// Fields entered into the class.
    pub created: Vec<FieldId>,
    /// Pre-existing fields claimed as backing fields. Later passes must not
    /// erase these.
    pub retained: Vec<FieldId>,
    pub skipped: Vec<SkippedProperty>,
}

impl InferenceOutcome {
    fn new(class: ClassId) -> Self {
        Self {
            class,
            created: Vec::new(),
            retained: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// True when the class was left exactly as it was.
    pub fn is_unchanged(&self) -> bool {
        self.created.is_empty() && self.retained.is_empty()
    }
}

/// Infers properties from accessor methods and maintains their backing
/// fields in the symbol model.
pub struct PropertyInference<'a> {
    model: &'a mut dyn SymbolModel,
}

impl<'a> PropertyInference<'a> {
    pub fn new(model: &'a mut dyn SymbolModel) -> Self {
        Self { model }
    }

    /// Run inference for `class`. Running it again on the same class
    /// changes nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn infer_properties(&mut self, class: ClassId) -> Result<InferenceOutcome, InferenceError> {
        self.infer(class).map_err(|source| match self.model.class(class) {
            Ok(symbol) => InferenceError::Class {
                class: symbol.name.clone(),
                source,
            },
            Err(_) => InferenceError::Symbol(source),
        })
    }

    fn infer(&mut self, class: ClassId) -> Result<InferenceOutcome, SymbolError> {
        let mut outcome = InferenceOutcome::new(class);
        let candidates = Candidates::gather(&*self.model, class)?;
        if candidates.is_empty() {
            return Ok(outcome);
        }

        let resolution = reconcile::resolve_properties(&*self.model, class, &candidates)?;
        outcome
            .skipped
            .extend(resolution.unpaired.into_iter().map(|name| SkippedProperty {
                name,
                reason: SkipReason::NoCompatiblePair,
            }));

        for property in &resolution.properties {
            let plan = reconcile::plan_field(&*self.model, property)?;
            match synthesize::apply(&mut *self.model, property, &plan)? {
                Some(Synthesized::Created(field)) => outcome.created.push(field),
                Some(Synthesized::Retagged(field)) => outcome.retained.push(field),
                None => {
                    if let FieldPlan::Conflict { field } = plan {
                        outcome.skipped.push(SkippedProperty {
                            name: property.name.clone(),
                            reason: SkipReason::ConflictingField { field },
                        });
                    }
                    continue;
                }
            }
            synthesize::mark_accessors(&mut *self.model, candidates.methods_of(&property.name))?;
        }

        debug!(
            created = outcome.created.len(),
            retained = outcome.retained.len(),
            skipped = outcome.skipped.len(),
            "inference finished"
        );
        Ok(outcome)
    }
}

/// Run inference over every class of `model`, each class after its
/// superclass and interfaces.
pub fn infer_all(model: &mut dyn SymbolModel) -> Result<Vec<InferenceOutcome>, InferenceError> {
    let order = ancestors_first(&*model)?;
    let mut inference = PropertyInference::new(model);
    order
        .into_iter()
        .map(|class| inference.infer_properties(class))
        .collect()
}

fn ancestors_first(model: &dyn SymbolModel) -> Result<Vec<ClassId>, SymbolError> {
    let mut visited = FxHashSet::default();
    let mut order = Vec::new();
    for class in model.classes() {
        visit(model, class, &mut visited, &mut order, 0)?;
    }
    Ok(order)
}

fn visit(
    model: &dyn SymbolModel,
    class: ClassId,
    visited: &mut FxHashSet<ClassId>,
    order: &mut Vec<ClassId>,
    depth: u32,
) -> Result<(), SymbolError> {
    if depth > MAX_ANCESTRY_DEPTH || !visited.insert(class) {
        return Ok(());
    }
    if let Some(supertype) = model.supertype(class)? {
        visit(model, supertype, visited, order, depth + 1)?;
    }
    for interface in model.interfaces(class)? {
        visit(model, interface, visited, order, depth + 1)?;
    }
    order.push(class);
    Ok(())
}
