pub mod dom_utils;
pub mod serialize;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::dom_builder::{MAX_NESTING_DEPTH, build_dom, build_dom_with_depth};
pub use crate::entities::{escape_attr, escape_text};
pub use crate::serialize::{AttrRewrite, opening_tag, outer_html, outer_html_with};
pub use crate::tokenizer::{is_void_element, tokenize};
pub use crate::types::{Id, Node, NodeId, Token};

/// Tokenize, build and number a document in one step.
pub fn parse_document(input: &str) -> Node {
    let tokens = tokenize(input);
    log::trace!(target: "html.parse", "tokenized {} tokens", tokens.len());
    let mut dom = build_dom(&tokens);
    traverse::assign_node_ids(&mut dom);
    dom
}

/// Parse markup destined for a node `depth` levels down, keeping the result
/// within [`MAX_NESTING_DEPTH`] once inserted.
pub fn parse_fragment(input: &str, depth: usize) -> Node {
    let mut dom = build_dom_with_depth(&tokenize(input), MAX_NESTING_DEPTH.saturating_sub(depth));
    traverse::assign_node_ids(&mut dom);
    dom
}
