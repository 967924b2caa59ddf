//! refdoc — build API reference markdown pages from an introspected symbol
//! universe.
//!
//! The host environment collects symbols (through whatever reflection it
//! has) into an immutable per-run configuration: a full-name index, an alias
//! map, a name tree, and a document index. This crate turns those into
//! per-symbol markdown pages with resolved `@{...}` cross-references,
//! structured docstring sections, and deterministic member listings, plus a
//! flat library-wide symbol index.
//!
//! The crate produces text only. Symbol discovery, output writing, and
//! command-line handling belong to the caller; the reflection seam is the
//! [`Symbol`] trait. Pages for distinct symbols share no mutable state and
//! may be built concurrently.

pub mod argspec;
pub mod docstring;
pub mod error;
pub mod index;
pub mod model;
pub mod page;
pub mod reference;
pub mod render;

pub use argspec::{effective_spec, ArgSpec, CallableSignature, PartialBinding};
pub use docstring::{structure_docstring, DocstringSections, FunctionDetail};
pub use error::{Error, Result};
pub use index::build_global_index;
pub use model::{
    DocEntry, DocIndex, DuplicateMap, GuideIndex, NameTree, RunConfig, SourceLocation, Symbol,
    SymbolIndex, SymbolKind,
};
pub use page::{build_page, ClassPage, FunctionPage, MemberInfo, ModulePage, PageInfo};
pub use reference::{documentation_path, ReferenceResolver};
pub use render::build_md_page;
