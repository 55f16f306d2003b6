use std::fmt::Write;

use crate::{DomTree, NodeId, NodeType};

/// A one-line, selector-shaped label for a node: `p#unique.bar[href="x"]`.
///
/// `id` and `class` come first, the remaining attributes follow sorted by
/// name so the output is stable.
#[must_use]
pub fn label(tree: &DomTree, id: NodeId) -> String {
    let Some(node) = tree.get(id) else {
        return String::from("<missing>");
    };
    match &node.node_type {
        NodeType::Document => String::from("#document"),
        NodeType::Text(_) => String::from("#text"),
        NodeType::Comment(_) => String::from("#comment"),
        NodeType::Element(data) => {
            let mut out = data.tag_name.clone();
            if let Some(element_id) = data.id() {
                let _ = write!(out, "#{element_id}");
            }
            for class in data.class_list().split_ascii_whitespace() {
                let _ = write!(out, ".{class}");
            }
            let mut rest: Vec<_> = data
                .attrs
                .iter()
                .filter(|(k, _)| k.as_str() != "id" && k.as_str() != "class")
                .collect();
            rest.sort();
            for (name, value) in rest {
                if value.is_empty() {
                    let _ = write!(out, "[{name}]");
                } else {
                    let _ = write!(out, "[{name}=\"{value}\"]");
                }
            }
            out
        }
    }
}

/// Render the subtree rooted at `id`, one node per line, two spaces per level.
#[must_use]
pub fn render_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    render_into(tree, id, 0, &mut out);
    out
}

fn render_into(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    match tree.get(id).map(|n| &n.node_type) {
        Some(NodeType::Text(data)) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            let _ = writeln!(out, "{prefix}\"{display}\"");
        }
        Some(NodeType::Comment(data)) => {
            let _ = writeln!(out, "{prefix}<!-- {data} -->");
        }
        Some(NodeType::Element(_) | NodeType::Document) => {
            let _ = writeln!(out, "{prefix}{}", label(tree, id));
        }
        None => return,
    }
    for &child in tree.children(id) {
        render_into(tree, child, indent + 1, out);
    }
}
