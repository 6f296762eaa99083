use jprops_symbols::SymbolError;
use thiserror::Error;

/// Fatal inference failure.
///
/// Conflicts and ambiguous accessor pairs are not errors; they are reported
/// as skipped properties. This type only carries inconsistencies of the
/// symbol model itself.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("property inference failed for class `{class}`")]
    Class {
        class: String,
        #[source]
        source: SymbolError,
    },
    #[error(transparent)]
    Symbol(#[from] SymbolError),
}
