//! `@{...}` reference resolution into markdown links.
//!
//! Two namespaces share the token syntax: dotted symbol names resolved
//! against the symbol index (alias-canonicalized, with a `#member` fallback
//! onto the parent page), and `$`-prefixed document ids resolved against the
//! document index.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{DocIndex, DuplicateMap, SymbolIndex};

static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\{([^}]+)\}").unwrap());

/// Resolves references against the run's immutable indexes.
pub struct ReferenceResolver<'a, S> {
    index: &'a SymbolIndex<S>,
    duplicate_of: &'a DuplicateMap,
    doc_index: &'a DocIndex,
}

impl<'a, S> ReferenceResolver<'a, S> {
    pub fn new(
        index: &'a SymbolIndex<S>,
        duplicate_of: &'a DuplicateMap,
        doc_index: &'a DocIndex,
    ) -> Self {
        ReferenceResolver {
            index,
            duplicate_of,
            doc_index,
        }
    }

    /// Rewrite every `@{...}` token in `text` into a markdown link, with
    /// links made relative to the current page via `relative_root`.
    /// Non-token text passes through unchanged; the first unresolvable token
    /// fails the whole call with no partial substitution.
    pub fn replace_references(&self, text: &str, relative_root: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in RE_TOKEN.captures_iter(text) {
            let token = caps.get(0).unwrap();
            out.push_str(&text[last..token.start()]);
            out.push_str(&self.one_ref(&caps[1], relative_root)?);
            last = token.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }

    /// Markdown link for a symbol known by full name, as listed on index and
    /// member pages.
    pub fn symbol_link(&self, full_name: &str, relative_root: &str) -> Result<String> {
        let url = self.reference_to_url(full_name, full_name, relative_root)?;
        Ok(format!("[`{}`]({})", full_name, url))
    }

    /// Page url for a (possibly aliased) symbol name. When only the name's
    /// immediate parent is indexed, falls back to the parent page with a
    /// `#member` anchor.
    pub fn reference_to_url(
        &self,
        reference: &str,
        name: &str,
        relative_root: &str,
    ) -> Result<String> {
        let canonical = self.canonicalize(name);
        if self.index.contains_key(canonical) {
            return Ok(join_root(relative_root, &documentation_path(canonical)));
        }
        if let Some((parent, member)) = name.rsplit_once('.') {
            let parent = self.canonicalize(parent);
            if self.index.contains_key(parent) {
                let page = join_root(relative_root, &documentation_path(parent));
                return Ok(format!("{}#{}", page, member));
            }
        }
        Err(Error::UnresolvedReference(reference.to_string()))
    }

    fn one_ref(&self, reference: &str, relative_root: &str) -> Result<String> {
        let (target, display) = split_display(reference);
        if let Some(doc_name) = target.strip_prefix('$') {
            return self.doc_link(reference, doc_name, display, relative_root);
        }
        let url = self.reference_to_url(reference, target, relative_root)?;
        let text = match display {
            Some(text) => text.to_string(),
            None => format!("`{}`", target),
        };
        Ok(format!("[{}]({})", text, url))
    }

    fn doc_link(
        &self,
        reference: &str,
        name: &str,
        display: Option<&str>,
        relative_root: &str,
    ) -> Result<String> {
        let (name, anchor) = match name.split_once('#') {
            Some((name, anchor)) => (name, Some(anchor)),
            None => (name, None),
        };
        let entry = self
            .doc_index
            .get(name)
            .ok_or_else(|| Error::UnresolvedReference(reference.to_string()))?;
        let text = display.unwrap_or(&entry.title);
        let mut url = join_root(&docs_root(relative_root), &entry.url);
        if let Some(anchor) = anchor {
            url = format!("{}#{}", url, anchor);
        }
        Ok(format!("[{}]({})", text, url))
    }

    /// One alias hop at most.
    fn canonicalize<'n>(&'n self, name: &'n str) -> &'n str {
        self.duplicate_of
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }
}

/// Page path for a fully-qualified name: `a.b.C` -> `a/b/C.md`.
pub fn documentation_path(full_name: &str) -> String {
    format!("{}.md", full_name.replace('.', "/"))
}

/// Split a trailing `$display` suffix off a reference. A `$` in first
/// position starts a document reference, not display text.
fn split_display(reference: &str) -> (&str, Option<&str>) {
    match reference.rfind('$') {
        Some(pos) if pos > 0 => (&reference[..pos], Some(&reference[pos + 1..])),
        _ => (reference, None),
    }
}

fn join_root(relative_root: &str, path: &str) -> String {
    if relative_root.is_empty() || relative_root == "." {
        path.to_string()
    } else {
        format!("{}/{}", relative_root, path)
    }
}

/// Document urls are relative to the directory above the API tree: every
/// component of the page's relative root collapses to `..`.
fn docs_root(relative_root: &str) -> String {
    let parts: Vec<&str> = relative_root
        .split('/')
        .filter(|c| !c.is_empty() && *c != ".")
        .map(|_| "..")
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
