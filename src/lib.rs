//! Property inference over JVM-style class models.
//!
//! The workspace crates are re-exported here; this crate adds the JSON
//! model loader, reporting and the `jprops` command line driver.

pub use jprops_common as common;
pub use jprops_infer as infer;
pub use jprops_symbols as symbols;

pub mod args;
pub mod driver;
pub mod model_loader;
pub mod report;
pub mod tracing_config;
