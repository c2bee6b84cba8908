use crate::syntax::{Selector, Stylesheet, parse_declarations};
use html::{Id, Node};
use std::cmp::Ordering::Equal;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
struct Specificity(u16, u16, u16); // (id, class, type)

struct Candidate {
    property: String,
    value: String,
    specificity: Specificity,
    order: u32,
}

fn specificity_of(selector: &Selector) -> Specificity {
    match selector {
        Selector::Universal => Specificity(0, 0, 0),
        Selector::Type(_) => Specificity(0, 0, 1),
        Selector::Class(_) => Specificity(0, 1, 0),
        Selector::Id(_) => Specificity(1, 0, 0),
        Selector::Compound(parts) => parts.iter().map(specificity_of).fold(
            Specificity::default(),
            |acc, s| Specificity(acc.0 + s.0, acc.1 + s.1, acc.2 + s.2),
        ),
    }
}

fn get_attribute<'a>(attributes: &'a [(String, Option<String>)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .and_then(|(_, v)| v.as_deref())
}

// Check if an element matches a selector
fn matches_parts(name: &str, attributes: &[(String, Option<String>)], selector: &Selector) -> bool {
    match selector {
        Selector::Universal => true,
        Selector::Type(t) => name.eq_ignore_ascii_case(t),
        Selector::Id(want) => get_attribute(attributes, "id") == Some(want.as_str()),
        Selector::Class(want) => get_attribute(attributes, "class")
            .is_some_and(|classlist| classlist.split_whitespace().any(|c| c == want)),
        Selector::Compound(parts) => parts
            .iter()
            .all(|part| matches_parts(name, attributes, part)),
    }
}

pub fn matches_selector(node: &Node, selector: &Selector) -> bool {
    match node {
        Node::Element {
            name, attributes, ..
        } => matches_parts(name, attributes, selector),
        _ => false,
    }
}

/// Every element matching `selector`, in document order.
pub fn query_selector_all(root: &Node, selector: &Selector) -> Vec<Id> {
    fn walk(node: &Node, selector: &Selector, out: &mut Vec<Id>) {
        if matches_selector(node, selector) {
            out.push(node.id());
        }
        for c in node.children() {
            walk(c, selector, out);
        }
    }
    let mut out = Vec::new();
    walk(root, selector, &mut out);
    out
}

pub fn query_selector(root: &Node, selector: &Selector) -> Option<Id> {
    query_selector_all(root, selector).into_iter().next()
}

// If the element has an inline style attribute, return its value
pub fn get_inline_style(attributes: &[(String, Option<String>)]) -> Option<&str> {
    get_attribute(attributes, "style")
}

// Walk the DOM tree, and for each element, apply styles from the stylesheet and inline styles
pub fn attach_styles(dom: &mut Node, sheet: &Stylesheet) {
    fn walk(node: &mut Node, sheet: &Stylesheet) {
        match node {
            Node::Element {
                name,
                attributes,
                children,
                style,
                ..
            } => {
                // collect candidates (inline + matched rules)
                let mut candidates: Vec<Candidate> = Vec::new();

                if let Some(inline) = get_inline_style(attributes) {
                    candidates.extend(parse_declarations(inline).into_iter().map(|d| Candidate {
                        property: d.name,
                        value: d.value,
                        specificity: Specificity(u16::MAX, 0, 0),
                        order: u32::MAX,
                    }));
                }

                for (order, rule) in sheet.rules.iter().enumerate() {
                    let matched = rule
                        .selectors
                        .iter()
                        .filter(|selector| matches_parts(name, attributes, selector))
                        .map(specificity_of)
                        .max();
                    if let Some(specificity) = matched {
                        candidates.extend(rule.declarations.iter().map(|declaration| Candidate {
                            property: declaration.name.clone(),
                            value: declaration.value.clone(),
                            specificity,
                            order: order as u32,
                        }));
                    }
                }

                // resolve winners per property: the last candidate of each run wins
                candidates.sort_by(|a, b| match a.property.cmp(&b.property) {
                    Equal => match a.specificity.cmp(&b.specificity) {
                        Equal => a.order.cmp(&b.order),
                        other => other,
                    },
                    other => other,
                });

                style.clear();
                for (i, candidate) in candidates.iter().enumerate() {
                    let last_of_run = candidates
                        .get(i + 1)
                        .is_none_or(|next| next.property != candidate.property);
                    if last_of_run {
                        style.push((candidate.property.clone(), candidate.value.clone()));
                    }
                }
                for c in children {
                    walk(c, sheet);
                }
            }
            Node::Document { children, .. } => {
                for c in children {
                    walk(c, sheet);
                }
            }
            _ => {}
        }
    }
    walk(dom, sheet);
}
