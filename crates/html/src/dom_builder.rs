use crate::types::{Id, Node, Token};

/// Deepest element level the builder creates. A start tag at this level is
/// inserted but never opened, so its content lands beside it instead of
/// inside it. Every later pass over the tree recurses at most this far.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Build a document tree from a token stream. Ids are left at `Id(0)`;
/// `traverse::assign_node_ids` numbers them.
pub fn build_dom(tokens: &[Token]) -> Node {
    build_dom_with_depth(tokens, MAX_NESTING_DEPTH)
}

/// [`build_dom`] with elements capped at `max_depth` levels below the
/// document. A zero budget keeps text and comments but drops elements.
pub fn build_dom_with_depth(tokens: &[Token], max_depth: usize) -> Node {
    let mut arena = NodeArena::new();
    let root_index = arena.push(ArenaNode::Document {
        doctype: None,
        children: Vec::new(),
    });

    let mut open_elements: Vec<usize> = Vec::new();

    for token in tokens {
        let parent_index = open_elements.last().copied().unwrap_or(root_index);
        match token {
            Token::Doctype(s) => arena.set_doctype(root_index, s.clone()),
            Token::Comment(c) => {
                arena.add_child(parent_index, ArenaNode::Comment { text: c.clone() });
            }
            Token::Text(txt) => {
                if !txt.is_empty() && !arena.append_text(parent_index, txt) {
                    arena.add_child(parent_index, ArenaNode::Text { text: txt.clone() });
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                if open_elements.len() >= max_depth {
                    continue;
                }
                let new_index = arena.add_child(
                    parent_index,
                    ArenaNode::Element {
                        name: name.clone(),
                        attributes: attributes.clone(),
                        children: Vec::new(),
                    },
                );
                if !*self_closing && open_elements.len() + 1 < max_depth {
                    open_elements.push(new_index);
                }
            }
            Token::EndTag(name) => {
                // Stray end tags with no open match are ignored instead of closing everything.
                if let Some(pos) = open_elements
                    .iter()
                    .rposition(|&index| arena.is_element_named(index, name))
                {
                    open_elements.truncate(pos);
                }
            }
        }
    }

    arena.into_dom(root_index)
}

#[derive(Debug)]
enum ArenaNode {
    Document {
        doctype: Option<String>,
        children: Vec<usize>,
    },
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<usize>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl ArenaNode {
    fn children(&self) -> &[usize] {
        match self {
            ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => children,
            ArenaNode::Text { .. } | ArenaNode::Comment { .. } => &[],
        }
    }
}

#[derive(Debug)]
struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl NodeArena {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, node: ArenaNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    fn add_child(&mut self, parent_index: usize, child: ArenaNode) -> usize {
        let child_index = self.push(child);
        match &mut self.nodes[parent_index] {
            ArenaNode::Document { children, .. } | ArenaNode::Element { children, .. } => {
                children.push(child_index);
            }
            _ => unreachable!("dom builder parent cannot have children"),
        }
        child_index
    }

    /// Merge into a trailing text child so adjacent text tokens become one node.
    fn append_text(&mut self, parent_index: usize, txt: &str) -> bool {
        let Some(&last) = self.nodes[parent_index].children().last() else {
            return false;
        };
        match &mut self.nodes[last] {
            ArenaNode::Text { text } => {
                text.push_str(txt);
                true
            }
            _ => false,
        }
    }

    fn set_doctype(&mut self, root_index: usize, doctype: String) {
        if let ArenaNode::Document { doctype: dt, .. } = &mut self.nodes[root_index] {
            *dt = Some(doctype);
        }
    }

    fn is_element_named(&self, node_index: usize, target: &str) -> bool {
        match &self.nodes[node_index] {
            ArenaNode::Element { name, .. } => name.eq_ignore_ascii_case(target),
            _ => false,
        }
    }

    fn into_dom(self, root_index: usize) -> Node {
        let mut nodes = self.nodes;
        let mut built: Vec<Node> = Vec::with_capacity(nodes.len());

        fn take_children(n: usize, built: &mut Vec<Node>) -> Vec<Node> {
            built.split_off(built.len() - n)
        }

        // Iterative postorder: when a node is seen the second time, its direct
        // children are the last `children.len()` entries of `built`, in order.
        let mut stack: Vec<(usize, bool)> = vec![(root_index, false)];
        while let Some((node_index, visited)) = stack.pop() {
            if !visited {
                stack.push((node_index, true));
                for &child_index in nodes[node_index].children().iter().rev() {
                    stack.push((child_index, false));
                }
                continue;
            }

            let node = match &mut nodes[node_index] {
                ArenaNode::Document { doctype, children } => Node::Document {
                    id: Id(0),
                    doctype: doctype.take(),
                    children: take_children(children.len(), &mut built),
                },
                ArenaNode::Element {
                    name,
                    attributes,
                    children,
                } => Node::Element {
                    id: Id(0),
                    name: std::mem::take(name),
                    attributes: std::mem::take(attributes),
                    style: Vec::new(),
                    children: take_children(children.len(), &mut built),
                },
                ArenaNode::Text { text } => Node::Text {
                    id: Id(0),
                    text: std::mem::take(text),
                },
                ArenaNode::Comment { text } => Node::Comment {
                    id: Id(0),
                    text: std::mem::take(text),
                },
            };
            built.push(node);
        }

        debug_assert_eq!(built.len(), 1, "dom builder should build exactly one root");
        built.pop().unwrap_or(Node::Document {
            id: Id(0),
            doctype: None,
            children: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn names(node: &Node) -> Vec<String> {
        node.children()
            .iter()
            .filter_map(|c| c.element_name().map(str::to_string))
            .collect()
    }

    #[test]
    fn build_dom_nests_and_closes_void_elements() {
        let dom = build_dom(&tokenize(
            "<div><label>Name <input id=n></label><p>after</p></div>",
        ));
        let div = &dom.children()[0];
        assert_eq!(names(div), ["label", "p"]);
        let label = &div.children()[0];
        assert_eq!(names(label), ["input"]);
    }

    #[test]
    fn stray_end_tag_does_not_close_ancestors() {
        let dom = build_dom(&tokenize("<main><span>a</b>b</span></main>"));
        let main = &dom.children()[0];
        let span = &main.children()[0];
        assert!(span.is_element_named("span"));
        assert!(
            matches!(span.children(), [Node::Text { text, .. }] if text == "ab"),
            "expected merged text inside span, got: {span:?}"
        );
    }

    fn depth_of_first_chain(dom: &Node) -> usize {
        let mut current = &dom.children()[0];
        let mut seen = 1usize;
        while let Some(child) = current.children().iter().find(|c| c.element_name().is_some()) {
            current = child;
            seen += 1;
        }
        seen
    }

    #[test]
    fn build_dom_stress_deep_nesting() {
        let depth: usize = 10_000;
        let input = format!("{}{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let dom = build_dom(&tokenize(&input));
        assert_eq!(depth_of_first_chain(&dom), MAX_NESTING_DEPTH);

        let shallow = format!("{}{}", "<div>".repeat(300), "</div>".repeat(300));
        assert_eq!(depth_of_first_chain(&build_dom(&tokenize(&shallow))), 300);
    }

    #[test]
    fn content_past_the_limit_lands_beside_the_last_level() {
        let dom = build_dom_with_depth(&tokenize("<a><b><c>x<d>y</d></c></b></a>"), 2);
        let a = &dom.children()[0];
        let b = &a.children()[0];
        assert!(b.is_element_named("b"));
        assert!(b.children().is_empty());
        assert_eq!(names(a), ["b", "c", "d"]);

        let flat = build_dom_with_depth(&tokenize("<p>hi</p>text"), 0);
        assert!(matches!(flat.children(), [Node::Text { text, .. }] if text == "hitext"));
    }
}
