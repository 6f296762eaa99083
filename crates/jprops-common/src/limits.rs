//! Centralized limits for the symbol model and the inference engine.
//!
//! The host compiler rejects cyclic class hierarchies before inference runs,
//! but the model loaded from disk is not validated to the same degree. Every
//! recursive walk over supertypes and interfaces is bounded by these values.

/// Maximum depth for walking a class's ancestry (superclass chain plus
/// interface fan-out).
///
/// A walk that exceeds this depth stops and reports "not found" for the
/// remaining branch.
pub const MAX_ANCESTRY_DEPTH: u32 = 256;

/// Maximum number of inference passes the driver will run over one model.
///
/// Inference is idempotent, so any pass after the first is a no-op; the
/// limit only guards against absurd command-line input.
pub const MAX_INFERENCE_PASSES: u32 = 16;
