use crate::{Id, Node};

pub fn assign_node_ids(root: &mut Node) {
    fn walk(node: &mut Node, next: &mut u32) {
        // only assign if currently unset
        if node.id() == Id(0) {
            node.set_id(Id(*next));
            *next = next.wrapping_add(1);
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }

    let mut next = max_node_id(root).0.wrapping_add(1).max(1);
    walk(root, &mut next);
}

/// Largest id in the subtree.
pub fn max_node_id(node: &Node) -> Id {
    node.children()
        .iter()
        .map(max_node_id)
        .fold(node.id(), std::cmp::max)
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|c| find_node_by_id(c, id))
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_node_by_id_mut(c, id))
}

/// Ids of every element under `root`, in document (pre-)order.
pub fn element_ids(root: &Node) -> Vec<Id> {
    fn walk(node: &Node, out: &mut Vec<Id>) {
        if matches!(node, Node::Element { .. }) {
            out.push(node.id());
        }
        for c in node.children() {
            walk(c, out);
        }
    }
    let mut out = Vec::new();
    walk(root, &mut out);
    out
}

/// Nodes from `root` down to the node with `id`, both ends included.
pub fn ancestor_path(root: &Node, id: Id) -> Option<Vec<&Node>> {
    fn walk<'a>(node: &'a Node, id: Id, path: &mut Vec<&'a Node>) -> bool {
        path.push(node);
        if node.id() == id {
            return true;
        }
        for c in node.children() {
            if walk(c, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }
    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}
