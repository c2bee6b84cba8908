pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        self_closing: bool,
    },
    EndTag(String),
    Comment(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Document {
        id: Id,
        doctype: Option<String>,
        children: Vec<Node>,
    },
    Element {
        id: Id,
        name: String,
        /// Attributes in source order. `None` is a bare attribute (`<input disabled>`).
        attributes: Vec<(String, Option<String>)>,
        /// Cascaded declarations, filled in by `css::attach_styles`.
        style: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Text {
        id: Id,
        text: String,
    },
    Comment {
        id: Id,
        text: String,
    },
}

impl Node {
    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Document { id, .. } => *id = new_id,
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
            Node::Comment { id, .. } => *id = new_id,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Document { children, .. } => Some(children),
            Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Lowercased tag name for elements, `None` for everything else.
    pub fn element_name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element_named(&self, tag: &str) -> bool {
        self.element_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    /// Attribute value; a bare attribute reads as `""`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        let Node::Element { attributes, .. } = self else {
            return None;
        };
        attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attr(key).is_some()
    }

    /// Set or overwrite an attribute. Returns `false` for non-elements.
    pub fn set_attr(&mut self, key: &str, value: &str) -> bool {
        let Node::Element { attributes, .. } = self else {
            return false;
        };
        if let Some((_, v)) = attributes
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
        {
            *v = Some(value.to_string());
        } else {
            attributes.push((key.to_ascii_lowercase(), Some(value.to_string())));
        }
        true
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attr(&mut self, key: &str) -> bool {
        let Node::Element { attributes, .. } = self else {
            return false;
        };
        let before = attributes.len();
        attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        attributes.len() != before
    }

    pub fn attributes(&self) -> &[(String, Option<String>)] {
        match self {
            Node::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Cascaded value of a property, if the cascade produced one.
    pub fn specified(&self, property: &str) -> Option<&str> {
        let Node::Element { style, .. } = self else {
            return None;
        };
        style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }
}
