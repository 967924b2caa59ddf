//! Docstring structuring — line-by-line state machine.
//!
//! Partitions free-form docstring text into a brief line, a plain-text body,
//! keyword-headed detail sections (`Args:`, `Returns:`, ...), and named
//! compatibility notes. Without compatibility blocks, `body` plus the
//! serialized details reproduces the original text byte for byte.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// -- Regex patterns -----------------------------------------------------------

static RE_COMPAT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*@compatibility\((\w+)\)[ \t]*$").unwrap());

static RE_COMPAT_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*@end_compatibility[ \t]*$").unwrap());

// A section header is a capitalized keyword alone on its own line. Any
// keyword of that shape counts; lines that merely look keyword-ish
// ("Args: inline", "  Args:", "args:") stay body text.
static RE_SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z]*:$").unwrap());

// An item opens with 2-4 spaces of indent and a `name:`; deeper indentation
// continues the previous item's description.
static RE_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {2,4}(\*{0,2}\w[\w.]*):(.*)$").unwrap());

// -- Data model ---------------------------------------------------------------

/// Structured form of one raw docstring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocstringSections {
    /// First line of the docstring.
    pub brief: String,
    /// Plain-text remainder (brief line included), with detail sections and
    /// compatibility blocks removed.
    pub body: String,
    /// Detail sections in original order.
    pub details: Vec<FunctionDetail>,
    /// Compatibility target -> note text.
    pub compatibility: BTreeMap<String, String>,
}

/// One keyword-headed detail section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionDetail {
    pub keyword: String,
    /// Free text between the keyword line and the first item, verbatim.
    pub header: String,
    /// `(name, description)` pairs; descriptions keep their line breaks and
    /// trailing blank lines.
    pub items: Vec<(String, String)>,
}

impl fmt::Display for FunctionDetail {
    /// The serialization the round-trip law concatenates: `body` plus each
    /// detail in order reproduces the original docstring.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:\n{}", self.keyword, self.header)?;
        for (name, description) in &self.items {
            write!(f, "  {}:{}", name, description)?;
        }
        Ok(())
    }
}

// -- Public API ---------------------------------------------------------------

/// Structure a raw docstring. Never fails: malformed input degrades to body
/// text.
pub fn structure_docstring(raw: &str) -> DocstringSections {
    let (text, compatibility) = extract_compatibility(raw);
    let (body, details) = split_details(&text);
    let brief = body.lines().next().unwrap_or("").to_string();
    DocstringSections {
        brief,
        body,
        details,
        compatibility,
    }
}

// -- Compatibility blocks -----------------------------------------------------

/// Extract `@compatibility(target)` ... `@end_compatibility` blocks, removing
/// them (markers included) from the pass-through text. Exact byte
/// reconstruction across a removed block is not preserved; the note content
/// itself is lossless.
fn extract_compatibility(raw: &str) -> (String, BTreeMap<String, String>) {
    let mut notes = BTreeMap::new();
    let mut out = String::with_capacity(raw.len());
    let mut block: Option<(String, String)> = None;

    for line in raw.split_inclusive('\n') {
        let bare = line.strip_suffix('\n').unwrap_or(line);
        match block.take() {
            Some((target, mut content)) => {
                if RE_COMPAT_CLOSE.is_match(bare) {
                    notes.insert(target, content);
                } else {
                    content.push_str(bare);
                    content.push('\n');
                    block = Some((target, content));
                }
            }
            None => {
                if let Some(caps) = RE_COMPAT_OPEN.captures(bare) {
                    block = Some((caps[1].to_string(), String::new()));
                } else {
                    out.push_str(line);
                }
            }
        }
    }
    // Unterminated block: keep what was collected rather than dropping it.
    if let Some((target, content)) = block {
        notes.insert(target, content);
    }
    (out, notes)
}

// -- Detail sections ----------------------------------------------------------

/// Split keyword-headed sections off the docstring. The remainder keeps
/// everything up to the first header verbatim; each section captures its
/// header text and items verbatim so the round-trip law holds.
fn split_details(text: &str) -> (String, Vec<FunctionDetail>) {
    let mut body = String::new();
    let mut details: Vec<FunctionDetail> = Vec::new();

    for (i, line) in text.split_inclusive('\n').enumerate() {
        let bare = line.strip_suffix('\n').unwrap_or(line);

        // A header needs a preceding line (the first line is the brief) and
        // a trailing newline.
        if i > 0 && line.ends_with('\n') && RE_SECTION_HEADER.is_match(bare) {
            details.push(FunctionDetail {
                keyword: bare.strip_suffix(':').unwrap_or(bare).to_string(),
                ..Default::default()
            });
            continue;
        }

        match details.last_mut() {
            // Before any header: plain body. Item-shaped lines with no
            // preceding header are body text too, never an error.
            None => body.push_str(line),
            Some(detail) => {
                if let Some(caps) = RE_ITEM.captures(bare) {
                    let newline = if line.ends_with('\n') { "\n" } else { "" };
                    detail
                        .items
                        .push((caps[1].to_string(), format!("{}{}", &caps[2], newline)));
                } else if let Some(last) = detail.items.last_mut() {
                    last.1.push_str(line);
                } else {
                    detail.header.push_str(line);
                }
            }
        }
    }
    (body, details)
}
