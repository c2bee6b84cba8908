//! Markup serialization with `outerHTML` conventions.
//!
//! Attributes are always written double-quoted; bare attributes serialize as
//! `name=""`. Rawtext bodies (`script`, `style`) are written verbatim.
use crate::entities::{escape_attr, escape_text};
use crate::tokenizer::is_void_element;
use crate::types::Node;

/// What to do with one attribute while serializing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrRewrite {
    Keep,
    Drop,
    Replace(String),
}

/// Full markup of a node, with every attribute kept.
pub fn outer_html(node: &Node) -> String {
    outer_html_with(node, &|_, _| AttrRewrite::Keep)
}

/// Full markup of a node, passing every attribute of the node and of all its
/// descendants through `rewrite` first.
pub fn outer_html_with(node: &Node, rewrite: &dyn Fn(&str, Option<&str>) -> AttrRewrite) -> String {
    let mut out = String::new();
    write_node(node, rewrite, false, &mut out);
    out
}

/// Only the opening tag of an element, e.g. `<a href="/x">`. Empty for non-elements.
pub fn opening_tag(node: &Node) -> String {
    let mut out = String::new();
    if let Node::Element {
        name, attributes, ..
    } = node
    {
        write_start_tag(name, attributes, &|_, _| AttrRewrite::Keep, &mut out);
    }
    out
}

fn write_start_tag(
    name: &str,
    attributes: &[(String, Option<String>)],
    rewrite: &dyn Fn(&str, Option<&str>) -> AttrRewrite,
    out: &mut String,
) {
    out.push('<');
    out.push_str(name);
    for (key, value) in attributes {
        let value = match rewrite(key, value.as_deref()) {
            AttrRewrite::Keep => value.clone().unwrap_or_default(),
            AttrRewrite::Drop => continue,
            AttrRewrite::Replace(v) => v,
        };
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        escape_attr(&value, out);
        out.push('"');
    }
    out.push('>');
}

fn write_node(
    node: &Node,
    rewrite: &dyn Fn(&str, Option<&str>) -> AttrRewrite,
    raw_text: bool,
    out: &mut String,
) {
    match node {
        Node::Document {
            doctype, children, ..
        } => {
            if let Some(dt) = doctype {
                out.push_str("<!");
                out.push_str(dt);
                out.push('>');
            }
            for c in children {
                write_node(c, rewrite, false, out);
            }
        }
        Node::Element {
            name,
            attributes,
            children,
            ..
        } => {
            write_start_tag(name, attributes, rewrite, out);
            if is_void_element(name) {
                return;
            }
            let raw = name == "script" || name == "style";
            for c in children {
                write_node(c, rewrite, raw, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Text { text, .. } => {
            if raw_text {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        Node::Comment { text, .. } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}
