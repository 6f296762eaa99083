//! Property inference over a class's declared accessors.
//!
//! For each class, inference runs three phases:
//!
//! 1. **Candidates** ([`candidates`]): classify own methods as getter and
//!    setter candidates and derive property names.
//! 2. **Reconcile** ([`reconcile`]): pair getters with setters, pick type,
//!    access and static-ness, and check existing fields in the ancestry.
//! 3. **Synthesize** ([`synthesize`]): create a backing field or re-tag an
//!    existing one in the live symbol model.
//!
//! [`PropertyInference`] drives the phases for one class; [`infer_all`]
//! runs it over every class of a model, ancestors first.

mod access;
pub use access::is_inherited;

pub mod ancestry;
pub mod candidates;
pub use candidates::{AccessorPrefix, Candidates, PropAttrs, derive_property_name};

mod error;
pub use error::InferenceError;

mod inference;
pub use inference::{InferenceOutcome, PropertyInference, SkipReason, SkippedProperty, infer_all};

pub mod reconcile;
pub use reconcile::{FieldPlan, ResolvedProperty};

pub mod synthesize;
pub use synthesize::Synthesized;
