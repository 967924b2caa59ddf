//! Flat alphabetical symbol listing across the whole library.

use crate::error::Result;
use crate::model::{Symbol, SymbolIndex, SymbolKind};
use crate::reference::ReferenceResolver;

/// Build the library-wide index page: every module, class, and function name
/// (alias entries and nested classes included), methods and properties
/// excluded. Alias links point at the canonical page.
pub fn build_global_index<S: Symbol>(
    library_name: &str,
    index: &SymbolIndex<S>,
    resolver: &ReferenceResolver<'_, S>,
) -> Result<String> {
    let mut entries: Vec<(&String, String)> = Vec::new();
    for (full_name, symbol) in index {
        let kind = symbol.kind();
        if !matches!(
            kind,
            SymbolKind::Module | SymbolKind::Class | SymbolKind::Function
        ) {
            continue;
        }
        // Methods are documented on their class page, not here.
        if kind == SymbolKind::Function && has_class_parent(full_name, index) {
            continue;
        }
        entries.push((full_name, resolver.symbol_link(full_name, ".")?));
    }
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut lines = vec![format!("# All symbols in {}", library_name), String::new()];
    for (_, link) in entries {
        lines.push(format!("*  {}", link));
    }
    Ok(lines.join("\n"))
}

fn has_class_parent<S: Symbol>(full_name: &str, index: &SymbolIndex<S>) -> bool {
    full_name
        .rsplit_once('.')
        .and_then(|(parent, _)| index.get(parent))
        .is_some_and(|parent| parent.kind() == SymbolKind::Class)
}
