//! Error types for the documentation pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the page-building caller.
///
/// Parse-level oddities (item lines with no preceding section header,
/// unclassifiable class members) are absorbed with safe fallbacks and never
/// reach this enum. A failed page does not prevent other pages from building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A `@{...}` token names a symbol or document absent from the run's
    /// indexes. No partial substitution is produced for the token.
    #[error("unresolved reference: @{{{0}}}")]
    UnresolvedReference(String),

    /// A partial binding pre-supplies more positional values than the
    /// underlying callable declares.
    #[error("partial binding supplies {bound} positional values, callable declares {declared}")]
    OverBoundPositionals { declared: usize, bound: usize },
}
