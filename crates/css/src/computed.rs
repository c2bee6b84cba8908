use crate::values::{Cursor, parse_cursor};
use html::{Id, Node};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    /// Inherited. Initial: `auto`.
    pub cursor: Cursor,

    /// Not inherited. The raw `outline` shorthand, if any.
    pub outline: Option<String>,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        ComputedStyle::default()
    }
}

/// Compute the final style for an element, given:
/// - its specified declarations (Node.style, already cascaded)
/// - an optional parent computed style.
pub fn compute_style(specified: &[(String, String)], parent: Option<&ComputedStyle>) -> ComputedStyle {
    let mut result = ComputedStyle::initial();

    if let Some(p) = parent {
        result.cursor = p.cursor.clone();
    }

    for (name, value) in specified {
        match name.as_str() {
            "cursor" => {
                if let Some(cursor) = parse_cursor(value) {
                    result.cursor = cursor;
                }
            }
            "outline" => {
                let v = value.trim();
                if !v.is_empty() && !v.eq_ignore_ascii_case("none") {
                    result.outline = Some(v.to_string());
                }
            }
            _ => {
                // unsupported property → ignored
            }
        }
    }

    result
}

/// User-agent defaults that apply before author declarations.
fn ua_default_cursor(node: &Node) -> Option<Cursor> {
    // a:any-link { cursor: pointer }
    (node.is_element_named("a") && node.has_attr("href")).then_some(Cursor::Pointer)
}

/// Computed style of every element in the tree, keyed by node id.
///
/// The document itself computes to the initial style so top-level elements
/// have a parent style to compare against.
pub fn compute_styles(root: &Node) -> HashMap<Id, ComputedStyle> {
    fn walk(node: &Node, parent: &ComputedStyle, out: &mut HashMap<Id, ComputedStyle>) {
        let computed = match node {
            Node::Element { style, .. } => {
                let mut base = parent.clone();
                if let Some(cursor) = ua_default_cursor(node) {
                    base.cursor = cursor;
                }
                compute_style(style, Some(&base))
            }
            Node::Document { .. } => ComputedStyle::initial(),
            Node::Text { .. } | Node::Comment { .. } => return,
        };
        for c in node.children() {
            walk(c, &computed, out);
        }
        out.insert(node.id(), computed);
    }

    let mut out = HashMap::new();
    walk(root, &ComputedStyle::initial(), &mut out);
    out
}
