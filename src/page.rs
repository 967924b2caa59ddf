//! Page-model construction — classify a symbol and assemble the typed,
//! renderer-ready page.

use crate::argspec;
use crate::docstring::{structure_docstring, DocstringSections};
use crate::error::Result;
use crate::model::{DuplicateMap, RunConfig, SourceLocation, Symbol, SymbolKind};
use crate::reference::ReferenceResolver;

/// Fully resolved representation of one documentation page.
pub enum PageInfo<'a, S> {
    Function(FunctionPage<'a, S>),
    Class(ClassPage<'a, S>),
    Module(ModulePage<'a, S>),
}

pub struct FunctionPage<'a, S> {
    pub full_name: String,
    pub aliases: Vec<String>,
    pub defined_in: Option<&'a SourceLocation>,
    pub doc: DocstringSections,
    /// Effective signature text, empty for non-callables.
    pub signature: String,
    /// Opaque guide text appended verbatim after the defined-in block.
    pub guides: String,
    pub symbol: &'a S,
}

pub struct ClassPage<'a, S> {
    pub full_name: String,
    pub aliases: Vec<String>,
    pub defined_in: Option<&'a SourceLocation>,
    pub doc: DocstringSections,
    pub classes: Vec<MemberInfo<'a, S>>,
    pub properties: Vec<MemberInfo<'a, S>>,
    pub methods: Vec<MemberInfo<'a, S>>,
    pub other_members: Vec<MemberInfo<'a, S>>,
    pub symbol: &'a S,
}

pub struct ModulePage<'a, S> {
    pub full_name: String,
    pub aliases: Vec<String>,
    pub defined_in: Option<&'a SourceLocation>,
    pub doc: DocstringSections,
    /// Name-tree order, not re-sorted.
    pub members: Vec<MemberInfo<'a, S>>,
    pub symbol: &'a S,
}

/// One direct member of a class or module page. Borrows its symbol handle
/// from the run's index.
pub struct MemberInfo<'a, S> {
    pub short_name: String,
    pub full_name: String,
    pub kind: SymbolKind,
    /// Page url for linkable members, `#short_name` anchor for in-page ones,
    /// empty otherwise.
    pub url: String,
    pub doc: DocstringSections,
    pub signature: Option<String>,
    /// True iff the member produces a page of its own.
    pub is_linkable: bool,
    pub symbol: &'a S,
}

/// Build the page model for one symbol. Modules and classes walk their
/// name-tree children; anything else gets a function-style page.
pub fn build_page<'a, S: Symbol>(
    full_name: &str,
    symbol: &'a S,
    config: &RunConfig<'a, S>,
    resolver: &ReferenceResolver<'a, S>,
) -> Result<PageInfo<'a, S>> {
    let root = relative_root(full_name);
    match symbol.kind() {
        SymbolKind::Module => Ok(PageInfo::Module(build_module_page(
            full_name, symbol, config, resolver, &root,
        )?)),
        SymbolKind::Class => Ok(PageInfo::Class(build_class_page(
            full_name, symbol, config, resolver, &root,
        )?)),
        _ => Ok(PageInfo::Function(build_function_page(
            full_name, symbol, config, resolver, &root,
        )?)),
    }
}

fn build_function_page<'a, S: Symbol>(
    full_name: &str,
    symbol: &'a S,
    config: &RunConfig<'a, S>,
    resolver: &ReferenceResolver<'a, S>,
    root: &str,
) -> Result<FunctionPage<'a, S>> {
    Ok(FunctionPage {
        full_name: full_name.to_string(),
        aliases: aliases_of(full_name, config.duplicate_of),
        defined_in: symbol.defined_in(),
        doc: parse_doc(symbol.raw_docstring(), root, resolver)?,
        signature: signature_of(symbol, false)?.unwrap_or_default(),
        guides: config
            .guide_index
            .get(full_name)
            .cloned()
            .unwrap_or_default(),
        symbol,
    })
}

fn build_class_page<'a, S: Symbol>(
    full_name: &str,
    symbol: &'a S,
    config: &RunConfig<'a, S>,
    resolver: &ReferenceResolver<'a, S>,
    root: &str,
) -> Result<ClassPage<'a, S>> {
    let mut page = ClassPage {
        full_name: full_name.to_string(),
        aliases: aliases_of(full_name, config.duplicate_of),
        defined_in: symbol.defined_in(),
        doc: parse_doc(symbol.raw_docstring(), root, resolver)?,
        classes: Vec::new(),
        properties: Vec::new(),
        methods: Vec::new(),
        other_members: Vec::new(),
        symbol,
    };

    for short_name in children(full_name, config) {
        let child_full = format!("{}.{}", full_name, short_name);
        let Some(child) = config.index.get(&child_full) else {
            continue;
        };
        let kind = child.kind();
        let doc = parse_doc(child.raw_docstring(), root, resolver)?;
        let member = |url, signature, is_linkable| MemberInfo {
            short_name: short_name.clone(),
            full_name: child_full.clone(),
            kind,
            url,
            doc,
            signature,
            is_linkable,
            symbol: child,
        };
        match kind {
            SymbolKind::Class => {
                let url = resolver.reference_to_url(&child_full, &child_full, root)?;
                page.classes.push(member(url, None, true));
            }
            SymbolKind::Function => {
                let signature = signature_of(child, true)?;
                page.methods
                    .push(member(format!("#{}", short_name), signature, false));
            }
            SymbolKind::Property => {
                page.properties
                    .push(member(format!("#{}", short_name), None, false));
            }
            // No recognized classification: file under other-members.
            SymbolKind::Module | SymbolKind::Other => {
                page.other_members
                    .push(member(format!("#{}", short_name), None, false));
            }
        }
    }
    Ok(page)
}

fn build_module_page<'a, S: Symbol>(
    full_name: &str,
    symbol: &'a S,
    config: &RunConfig<'a, S>,
    resolver: &ReferenceResolver<'a, S>,
    root: &str,
) -> Result<ModulePage<'a, S>> {
    let mut members = Vec::new();
    for short_name in children(full_name, config) {
        let child_full = format!("{}.{}", full_name, short_name);
        let Some(child) = config.index.get(&child_full) else {
            continue;
        };
        let kind = child.kind();
        let is_linkable = matches!(
            kind,
            SymbolKind::Module | SymbolKind::Class | SymbolKind::Function
        );
        let url = if is_linkable {
            resolver.reference_to_url(&child_full, &child_full, root)?
        } else {
            String::new()
        };
        let signature = if kind == SymbolKind::Function {
            signature_of(child, false)?
        } else {
            None
        };
        members.push(MemberInfo {
            short_name: short_name.clone(),
            full_name: child_full,
            kind,
            url,
            doc: parse_doc(child.raw_docstring(), root, resolver)?,
            signature,
            is_linkable,
            symbol: child,
        });
    }

    Ok(ModulePage {
        full_name: full_name.to_string(),
        aliases: aliases_of(full_name, config.duplicate_of),
        defined_in: symbol.defined_in(),
        doc: parse_doc(symbol.raw_docstring(), root, resolver)?,
        members,
        symbol,
    })
}

// -- Helper functions ---------------------------------------------------------

fn children<'c, S>(full_name: &str, config: &RunConfig<'c, S>) -> &'c [String] {
    config
        .tree
        .get(full_name)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Resolve references in a raw docstring, then structure it.
fn parse_doc<S>(
    raw: &str,
    root: &str,
    resolver: &ReferenceResolver<'_, S>,
) -> Result<DocstringSections> {
    let resolved = resolver.replace_references(raw, root)?;
    Ok(structure_docstring(&resolved))
}

/// Effective signature text for a callable, if it declares one. Methods drop
/// the receiver parameter.
fn signature_of<S: Symbol>(symbol: &S, drop_receiver: bool) -> Result<Option<String>> {
    let Some(signature) = symbol.declared_signature() else {
        return Ok(None);
    };
    let mut spec = argspec::effective_spec(signature)?;
    if drop_receiver && !spec.names.is_empty() {
        argspec::bind_positional(&mut spec, 1)?;
    }
    Ok(Some(spec.to_string()))
}

/// All alias names documented under `full_name`, canonical name excluded,
/// sorted for deterministic output.
fn aliases_of(full_name: &str, duplicate_of: &DuplicateMap) -> Vec<String> {
    let mut aliases: Vec<String> = duplicate_of
        .iter()
        .filter(|(alias, canonical)| {
            canonical.as_str() == full_name && alias.as_str() != full_name
        })
        .map(|(alias, _)| alias.clone())
        .collect();
    aliases.sort();
    aliases
}

/// Path prefix that takes a page for `full_name` back to the docs root:
/// one `..` per parent component.
fn relative_root(full_name: &str) -> String {
    let depth = full_name.matches('.').count();
    if depth == 0 {
        ".".to_string()
    } else {
        vec![".."; depth].join("/")
    }
}
