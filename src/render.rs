//! Markdown rendering — pure function from page model to final page text.

use std::collections::BTreeMap;

use crate::docstring::FunctionDetail;
use crate::model::SymbolKind;
use crate::page::{ClassPage, FunctionPage, MemberInfo, ModulePage, PageInfo};

/// Render a page model to its final markdown.
pub fn build_md_page<S>(page: &PageInfo<'_, S>) -> String {
    match page {
        PageInfo::Function(page) => build_function_page(page),
        PageInfo::Class(page) => build_class_page(page),
        PageInfo::Module(page) => build_module_page(page),
    }
}

fn build_function_page<S>(page: &FunctionPage<'_, S>) -> String {
    let mut parts = vec![format!("# {}{}\n\n", page.full_name, page.signature)];

    if !page.aliases.is_empty() {
        for name in &page.aliases {
            parts.push(format!("### `{}{}`\n", name, page.signature));
        }
        parts.push("\n".to_string());
    }

    if let Some(defined_in) = page.defined_in {
        parts.push(format!("\n\n{}\n\n", defined_in));
    }

    parts.push(page.guides.clone());
    parts.push(page.doc.body.clone());
    parts.push(build_function_details(&page.doc.details));
    parts.push(build_compatibility(&page.doc.compatibility));

    parts.concat()
}

fn build_class_page<S>(page: &ClassPage<'_, S>) -> String {
    let mut parts = vec![format!("# {}\n\n", page.full_name)];

    if !page.aliases.is_empty() {
        for name in &page.aliases {
            parts.push(format!("### `class {}`\n", name));
        }
        parts.push("\n".to_string());
    }

    if let Some(defined_in) = page.defined_in {
        parts.push(format!("\n\n{}\n\n", defined_in));
    }

    parts.push(page.doc.body.clone());
    parts.push(build_function_details(&page.doc.details));
    parts.push(build_compatibility(&page.doc.compatibility));
    parts.push("\n\n".to_string());

    if !page.classes.is_empty() {
        parts.push("## Child Classes\n".to_string());
        // Sorted by generated link text.
        let mut links: Vec<String> = page
            .classes
            .iter()
            .map(|child| format!("[`class {}`]({})\n\n", child.short_name, child.url))
            .collect();
        links.sort();
        parts.extend(links);
    }

    if !page.properties.is_empty() {
        parts.push("## Properties\n\n".to_string());
        for property in sorted_by_name(&page.properties) {
            parts.push(anchored_heading(&property.short_name, ""));
            parts.push(property.doc.body.clone());
            parts.push(build_function_details(&property.doc.details));
            parts.push("\n\n".to_string());
        }
        parts.push("\n\n".to_string());
    }

    if !page.methods.is_empty() {
        parts.push("## Methods\n\n".to_string());
        for method in sorted_by_name(&page.methods) {
            let signature = method.signature.as_deref().unwrap_or("");
            parts.push(anchored_heading(&method.short_name, signature));
            parts.push(method.doc.body.clone());
            parts.push(build_function_details(&method.doc.details));
            parts.push(build_compatibility(&method.doc.compatibility));
            parts.push("\n\n".to_string());
        }
        parts.push("\n\n".to_string());
    }

    if !page.other_members.is_empty() {
        parts.push("## Class Members\n\n".to_string());
        for member in sorted_by_name(&page.other_members) {
            parts.push(anchored_heading(&member.short_name, ""));
        }
    }

    parts.concat()
}

fn build_module_page<S>(page: &ModulePage<'_, S>) -> String {
    let mut parts = vec![format!("# Module: {}\n\n", page.full_name)];

    if !page.aliases.is_empty() {
        for name in &page.aliases {
            parts.push(format!("### Module `{}`\n", name));
        }
        parts.push("\n".to_string());
    }

    if let Some(defined_in) = page.defined_in {
        parts.push(format!("\n\n{}\n\n", defined_in));
    }

    parts.push(page.doc.body.clone());
    parts.push("\n\n".to_string());
    parts.push("## Members\n\n".to_string());

    for member in &page.members {
        if !member.is_linkable {
            parts.push(format!("Constant {}", member.short_name));
            parts.push("\n\n".to_string());
            continue;
        }

        let link_text = match member.kind {
            SymbolKind::Function => format!("{}(...)", member.short_name),
            _ => member.short_name.clone(),
        };
        let mut suffix = if member.kind == SymbolKind::Module {
            " module".to_string()
        } else {
            String::new()
        };
        if !member.doc.brief.is_empty() {
            suffix = format!("{}: {}", suffix, member.doc.brief);
        }

        parts.push(format!("[`{}`]({}){}", link_text, member.url, suffix));
        parts.push("\n\n".to_string());
    }

    // Trailing blank separator after the last member is omitted.
    if !page.members.is_empty() {
        parts.pop();
    }

    parts.concat()
}

/// `#### <Keyword>:` blocks with `* **name**:description` items.
fn build_function_details(details: &[FunctionDetail]) -> String {
    let mut parts = Vec::with_capacity(details.len());
    for detail in details {
        let mut sub = format!("#### {}:\n\n", detail.keyword);
        sub.push_str(&detail.header);
        for (name, description) in &detail.items {
            sub.push_str(&format!("* **{}**:{}", name, description));
        }
        parts.push(sub);
    }
    parts.join("\n")
}

/// Compatibility notes, alphabetical by target.
fn build_compatibility(compatibility: &BTreeMap<String, String>) -> String {
    compatibility
        .iter()
        .map(|(target, text)| format!("\n\n#### {} compatibility\n{}\n", target, text))
        .collect()
}

/// Anchored member heading so `#name` links from the reference resolver land
/// on the right section.
fn anchored_heading(short_name: &str, signature: &str) -> String {
    format!(
        "<h3 id=\"{0}\"><code>{0}{1}</code></h3>\n\n",
        short_name, signature
    )
}

fn sorted_by_name<'m, 'a, S>(members: &'m [MemberInfo<'a, S>]) -> Vec<&'m MemberInfo<'a, S>> {
    let mut sorted: Vec<&MemberInfo<'a, S>> = members.iter().collect();
    sorted.sort_by(|a, b| a.short_name.cmp(&b.short_name));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docstring::DocstringSections;

    struct Nil;
    static NIL: Nil = Nil;

    fn member(short_name: &str, kind: SymbolKind, url: &str, brief: &str) -> MemberInfo<'static, Nil> {
        MemberInfo {
            short_name: short_name.to_string(),
            full_name: short_name.to_string(),
            kind,
            url: url.to_string(),
            doc: DocstringSections {
                brief: brief.to_string(),
                body: brief.to_string(),
                ..Default::default()
            },
            signature: None,
            is_linkable: !matches!(kind, SymbolKind::Other | SymbolKind::Property),
            symbol: &NIL,
        }
    }

    #[test]
    fn function_page_layout() {
        let page = FunctionPage {
            full_name: "tf.relu".to_string(),
            aliases: vec!["tf.nn.relu".to_string()],
            defined_in: None,
            doc: DocstringSections {
                brief: "Computes.".to_string(),
                body: "Computes.\n\n".to_string(),
                ..Default::default()
            },
            signature: "(features, name=None)".to_string(),
            guides: String::new(),
            symbol: &NIL,
        };
        assert_eq!(
            build_md_page(&PageInfo::Function(page)),
            "# tf.relu(features, name=None)\n\n\
             ### `tf.nn.relu(features, name=None)`\n\n\
             Computes.\n\n"
        );
    }

    #[test]
    fn detail_items_render_as_bullets() {
        let details = vec![FunctionDetail {
            keyword: "Args".to_string(),
            header: String::new(),
            items: vec![
                ("features".to_string(), " A tensor.\n".to_string()),
                ("name".to_string(), " A name.\n\n".to_string()),
            ],
        }];
        assert_eq!(
            build_function_details(&details),
            "#### Args:\n\n* **features**: A tensor.\n* **name**: A name.\n\n"
        );
    }

    #[test]
    fn compatibility_sorted_by_target() {
        let compatibility = BTreeMap::from([
            ("theano".to_string(), "t\n".to_string()),
            ("numpy".to_string(), "n\n".to_string()),
        ]);
        assert_eq!(
            build_compatibility(&compatibility),
            "\n\n#### numpy compatibility\nn\n\n\n\n#### theano compatibility\nt\n\n"
        );
    }

    #[test]
    fn module_members_keep_tree_order() {
        let page = ModulePage {
            full_name: "tf".to_string(),
            aliases: Vec::new(),
            defined_in: None,
            doc: DocstringSections::default(),
            members: vec![
                member("zeta", SymbolKind::Function, "tf/zeta.md", "Last fn."),
                member("Alpha", SymbolKind::Class, "tf/Alpha.md", ""),
                member("nn", SymbolKind::Module, "tf/nn.md", "Neural nets."),
                member("EPSILON", SymbolKind::Other, "", ""),
            ],
            symbol: &NIL,
        };
        assert_eq!(
            build_md_page(&PageInfo::Module(page)),
            "# Module: tf\n\n\n\n## Members\n\n\
             [`zeta(...)`](tf/zeta.md): Last fn.\n\n\
             [`Alpha`](tf/Alpha.md)\n\n\
             [`nn`](tf/nn.md) module: Neural nets.\n\n\
             Constant EPSILON"
        );
    }

    #[test]
    fn class_sections_sorted() {
        let mut beta = member("beta", SymbolKind::Function, "#beta", "");
        beta.signature = Some("(x)".to_string());
        let mut alpha = member("alpha", SymbolKind::Function, "#alpha", "");
        alpha.signature = Some("()".to_string());
        let page = ClassPage {
            full_name: "tf.Thing".to_string(),
            aliases: Vec::new(),
            defined_in: None,
            doc: DocstringSections::default(),
            classes: vec![
                member("Zed", SymbolKind::Class, "Thing/Zed.md", ""),
                member("Abc", SymbolKind::Class, "Thing/Abc.md", ""),
            ],
            properties: Vec::new(),
            methods: vec![beta, alpha],
            other_members: Vec::new(),
            symbol: &NIL,
        };
        let output = build_md_page(&PageInfo::Class(page));
        let abc = output.find("[`class Abc`]").unwrap();
        let zed = output.find("[`class Zed`]").unwrap();
        assert!(abc < zed);
        let alpha = output.find("<h3 id=\"alpha\"><code>alpha()</code></h3>").unwrap();
        let beta = output.find("<h3 id=\"beta\"><code>beta(x)</code></h3>").unwrap();
        assert!(alpha < beta);
    }

    #[test]
    fn class_members_anchor_only() {
        let page = ClassPage {
            full_name: "tf.Thing".to_string(),
            aliases: Vec::new(),
            defined_in: None,
            doc: DocstringSections::default(),
            classes: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            other_members: vec![member("VALUE", SymbolKind::Other, "#VALUE", "")],
            symbol: &NIL,
        };
        let output = build_md_page(&PageInfo::Class(page));
        assert!(output.ends_with(
            "## Class Members\n\n<h3 id=\"VALUE\"><code>VALUE</code></h3>\n\n"
        ));
    }
}
