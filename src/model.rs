//! Data model shared across the pipeline — the reflection seam, the per-run
//! configuration, and source locations.

use std::collections::HashMap;
use std::fmt;

use crate::argspec::CallableSignature;

/// Classification of a documented symbol, as reported by the host
/// reflection layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Module,
    Class,
    Function,
    Property,
    Other,
}

/// Capability queries answered by the host environment for each symbol.
///
/// The core never touches native type machinery; it branches only on the
/// answers to these four queries.
pub trait Symbol {
    fn kind(&self) -> SymbolKind;
    fn raw_docstring(&self) -> &str;
    /// Declared parameter spec plus any partial pre-binding, for callables.
    fn declared_signature(&self) -> Option<&CallableSignature>;
    fn defined_in(&self) -> Option<&SourceLocation>;
}

/// Fully-qualified dotted name -> symbol handle. Immutable per run.
pub type SymbolIndex<S> = HashMap<String, S>;

/// Alias name -> canonical name. Resolving an alias never yields another
/// alias, and every canonical name is an index key.
pub type DuplicateMap = HashMap<String, String>;

/// Parent full name -> direct child short names. Child order is meaningful
/// for module member listings and preserved as given.
pub type NameTree = HashMap<String, Vec<String>>;

/// Document id -> title/url, for the `$`-prefixed reference namespace.
pub type DocIndex = HashMap<String, DocEntry>;

/// Full name -> opaque guide text appended verbatim to function pages.
pub type GuideIndex = HashMap<String, String>;

/// One externally-hosted document addressable as `@{$id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    pub title: String,
    pub url: String,
}

/// Where a symbol is defined on disk, supplied by the host collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: String,
    pub url: Option<String>,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.url {
            Some(ref url) => write!(f, "Defined in [`{}`]({}).", self.path, url),
            None => write!(f, "Defined in `{}`.", self.path),
        }
    }
}

/// The immutable per-run configuration threaded into every page build.
/// Built once by the external collector; read-only for the run's duration.
pub struct RunConfig<'a, S> {
    pub index: &'a SymbolIndex<S>,
    pub duplicate_of: &'a DuplicateMap,
    pub tree: &'a NameTree,
    pub guide_index: &'a GuideIndex,
}
