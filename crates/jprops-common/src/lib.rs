//! Common types and utilities for jprops.
//!
//! This crate provides foundational types shared by the symbol model and
//! the inference engine:
//! - Declaration modifiers (`Modifiers`) and access levels (`Access`)
//! - Centralized limits for hierarchy walks

// Modifier flags and access-level ordering
pub mod modifiers;
pub use modifiers::{Access, Modifiers};

// Centralized limits and thresholds
pub mod limits;
