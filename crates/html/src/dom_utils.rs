use crate::Node;

/// Collect concatenated text from <style> elements.
pub fn collect_style_texts(node: &Node, out: &mut String) {
    match node {
        Node::Element { name, children, .. } if name.eq_ignore_ascii_case("style") => {
            for c in children {
                if let Node::Text { text, .. } = c {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        Node::Element { children, .. } | Node::Document { children, .. } => {
            for c in children {
                collect_style_texts(c, out);
            }
        }
        _ => {}
    }
}

/// Labelable form controls, i.e. the elements a wrapping `<label>` forwards clicks to.
pub fn is_form_control(node: &Node) -> bool {
    match node.element_name() {
        Some("input") => !node
            .attr("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("hidden")),
        Some("button" | "select" | "textarea" | "meter" | "output" | "progress") => true,
        _ => false,
    }
}

/// A `<label>` whose subtree contains a form control.
pub fn is_label_wrapping_control(node: &Node) -> bool {
    fn contains_control(node: &Node) -> bool {
        node.children()
            .iter()
            .any(|c| is_form_control(c) || contains_control(c))
    }
    node.is_element_named("label") && contains_control(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn label_wrapping_control_is_detected_through_nesting() {
        let doc = parse_document(
            "<label><span><input type=checkbox></span>Agree</label>\
             <label>Plain</label>\
             <label><input type=hidden>x</label>",
        );
        let labels = doc.children();
        assert!(is_label_wrapping_control(&labels[0]));
        assert!(!is_label_wrapping_control(&labels[1]));
        assert!(!is_label_wrapping_control(&labels[2]));
    }

    #[test]
    fn collect_style_texts_concatenates_blocks() {
        let doc = parse_document("<style>a{}</style><div><style>b{}</style></div>");
        let mut css = String::new();
        collect_style_texts(&doc, &mut css);
        assert_eq!(css, "a{}\nb{}\n");
    }
}
