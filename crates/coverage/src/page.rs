use crate::discovery::ListenerIntrospection;
use crate::error::CoverageError;
use crate::events::bubbles;
use css::{ComputedStyle, Stylesheet, attach_styles, compute_styles, parse_selector, parse_stylesheet};
use html::dom_utils::collect_style_texts;
use html::traverse::{ancestor_path, find_node_by_id, find_node_by_id_mut, max_node_id};
use html::{Id, Node, NodeId, parse_document, parse_fragment};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use url::Url;

/// Listener registrations on a page, keyed by node.
///
/// Page script registrations are what listener introspection reports. Tracking
/// listeners are installed by the instrumentation and are kept apart so they
/// never feed back into discovery.
#[derive(Clone, Debug, Default)]
pub struct EventTargets {
    handler_properties: HashMap<Id, BTreeSet<String>>,
    page_listeners: HashMap<Id, BTreeMap<String, usize>>,
    tracking: HashMap<Id, BTreeSet<String>>,
}

impl EventTargets {
    /// `element.onclick = fn`. `handler` is the property name, e.g. `onclick`.
    pub fn set_handler_property(&mut self, node: Id, handler: &str) {
        self.handler_properties
            .entry(node)
            .or_default()
            .insert(handler.to_ascii_lowercase());
    }

    pub fn handler_properties(&self, node: Id) -> impl Iterator<Item = &str> {
        self.handler_properties
            .get(&node)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// `element.addEventListener(type, fn)` from page script.
    pub fn add_page_listener(&mut self, node: Id, event_type: &str) {
        *self
            .page_listeners
            .entry(node)
            .or_default()
            .entry(event_type.to_string())
            .or_default() += 1;
    }

    pub fn remove_page_listener(&mut self, node: Id, event_type: &str) {
        let Some(types) = self.page_listeners.get_mut(&node) else {
            return;
        };
        if let Some(count) = types.get_mut(event_type) {
            *count -= 1;
            if *count == 0 {
                types.remove(event_type);
            }
        }
    }

    pub fn add_tracking_listener(&mut self, node: Id, event_type: &str) {
        self.tracking
            .entry(node)
            .or_default()
            .insert(event_type.to_string());
    }

    pub fn has_tracking_listener(&self, node: Id, event_type: &str) -> bool {
        self.tracking
            .get(&node)
            .is_some_and(|types| types.contains(event_type))
    }

    pub fn tracking_listener_count(&self) -> usize {
        self.tracking.values().map(BTreeSet::len).sum()
    }

    fn forget(&mut self, nodes: &BTreeSet<Id>) {
        self.handler_properties.retain(|id, _| !nodes.contains(id));
        self.page_listeners.retain(|id, _| !nodes.contains(id));
        self.tracking.retain(|id, _| !nodes.contains(id));
    }

    /// Drop registrations on nodes numbered after `last`.
    fn forget_after(&mut self, last: Id) {
        self.handler_properties.retain(|id, _| id.0 <= last.0);
        self.page_listeners.retain(|id, _| id.0 <= last.0);
        self.tracking.retain(|id, _| id.0 <= last.0);
    }

    fn clear_tracking(&mut self) {
        self.tracking.clear();
    }
}

impl ListenerIntrospection for EventTargets {
    fn registered_types(&self, node: Id) -> Vec<String> {
        self.page_listeners
            .get(&node)
            .map(|types| types.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// A loaded document: location, DOM, author styles and listener registrations.
#[derive(Clone, Debug)]
pub struct Page {
    url: Url,
    source: String,
    extra_css: String,
    dom: Node,
    stylesheet: Stylesheet,
    targets: EventTargets,
    /// Ids handed to inserted nodes are never reused within one DOM lifetime.
    next_id: NodeId,
}

impl Page {
    pub fn load(location: &str, markup: &str) -> Result<Self, CoverageError> {
        let url = Url::parse(location).map_err(|source| CoverageError::InvalidUrl {
            url: location.to_string(),
            source,
        })?;
        let dom = parse_document(markup);
        let mut page = Self {
            url,
            source: markup.to_string(),
            extra_css: String::new(),
            next_id: max_node_id(&dom).0 + 1,
            dom,
            stylesheet: Stylesheet::default(),
            targets: EventTargets::default(),
        };
        page.rebuild_stylesheet();
        Ok(page)
    }

    /// Attach an external stylesheet, as if linked from the document head.
    pub fn with_stylesheet(mut self, css_text: &str) -> Self {
        self.extra_css.push_str(css_text);
        self.extra_css.push('\n');
        self.rebuild_stylesheet();
        self
    }

    fn rebuild_stylesheet(&mut self) {
        let mut css_text = self.extra_css.clone();
        collect_style_texts(&self.dom, &mut css_text);
        self.stylesheet = parse_stylesheet(&css_text);
        attach_styles(&mut self.dom, &self.stylesheet);
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Same-document navigation (`history.pushState`): the DOM stays, the location changes.
    pub fn push_state(&mut self, location: &str) -> Result<(), CoverageError> {
        self.url = self
            .url
            .join(location)
            .map_err(|source| CoverageError::InvalidUrl {
                url: location.to_string(),
                source,
            })?;
        Ok(())
    }

    pub fn dom(&self) -> &Node {
        &self.dom
    }

    pub fn targets(&self) -> &EventTargets {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut EventTargets {
        &mut self.targets
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        find_node_by_id(&self.dom, id)
    }

    pub fn node_mut(&mut self, id: Id) -> Option<&mut Node> {
        find_node_by_id_mut(&mut self.dom, id)
    }

    /// First element matching a simple selector (`tag`, `#id`, `.class`, `tag.class`).
    pub fn query(&self, selector: &str) -> Result<Id, CoverageError> {
        let parsed = parse_selector(selector)
            .ok_or_else(|| CoverageError::UnknownSelector(selector.to_string()))?;
        css::query_selector(&self.dom, &parsed)
            .ok_or_else(|| CoverageError::UnknownSelector(selector.to_string()))
    }

    /// Computed style of every element; recomputed on each call.
    pub fn computed_styles(&self) -> HashMap<Id, ComputedStyle> {
        compute_styles(&self.dom)
    }

    /// Re-run the cascade after attribute changes.
    pub fn restyle(&mut self) {
        attach_styles(&mut self.dom, &self.stylesheet);
    }

    pub fn set_attribute(&mut self, id: Id, name: &str, value: &str) -> Result<(), CoverageError> {
        let node = self.node_mut(id).ok_or(CoverageError::UnknownNode(id))?;
        if !node.set_attr(name, value) {
            return Err(CoverageError::UnknownNode(id));
        }
        self.restyle();
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: Id, name: &str) -> Result<bool, CoverageError> {
        let node = self.node_mut(id).ok_or(CoverageError::UnknownNode(id))?;
        let removed = node.remove_attr(name);
        if removed {
            self.restyle();
        }
        Ok(removed)
    }

    /// Replace the children of `id` with freshly parsed markup. Registrations on
    /// the removed subtree go away with it.
    pub fn set_inner_html(&mut self, id: Id, markup: &str) -> Result<(), CoverageError> {
        let depth = ancestor_path(&self.dom, id)
            .ok_or(CoverageError::UnknownNode(id))?
            .len()
            - 1;
        let fragment = parse_fragment(markup, depth);
        let mut next_id = self.next_id;
        let node = find_node_by_id_mut(&mut self.dom, id).ok_or(CoverageError::UnknownNode(id))?;
        let children = node.children_mut().ok_or(CoverageError::UnknownNode(id))?;

        let mut removed = BTreeSet::new();
        fn collect(node: &Node, out: &mut BTreeSet<Id>) {
            out.insert(node.id());
            for c in node.children() {
                collect(c, out);
            }
        }
        for c in children.iter() {
            collect(c, &mut removed);
        }

        *children = fragment
            .children()
            .iter()
            .cloned()
            .map(|mut c| {
                renumber(&mut c, &mut next_id);
                c
            })
            .collect();
        self.next_id = next_id;
        self.targets.forget(&removed);
        self.rebuild_stylesheet();
        Ok(())
    }

    /// Full reload: the source is parsed again, instrumentation state (tracking
    /// listeners, tracking attributes, outlines) is gone. Page script
    /// registrations are kept, as the page's scripts would run again.
    pub fn reload(&mut self) {
        self.dom = parse_document(&self.source);
        let last = max_node_id(&self.dom);
        self.next_id = last.0 + 1;
        self.targets.forget_after(last);
        self.targets.clear_tracking();
        self.rebuild_stylesheet();
    }

    /// Propagation path for an event dispatched at `target`: the target, then
    /// its ancestors when the event type bubbles. Returns the nodes on that
    /// path that carry a tracking listener for the type, in firing order.
    pub fn dispatch(&self, target: Id, event_type: &str) -> Result<Vec<Id>, CoverageError> {
        let path = ancestor_path(&self.dom, target).ok_or(CoverageError::UnknownNode(target))?;
        let mut hits = Vec::new();
        for node in path.iter().rev() {
            if self.targets.has_tracking_listener(node.id(), event_type) {
                hits.push(node.id());
            }
            if !bubbles(event_type) {
                break;
            }
        }
        Ok(hits)
    }
}

fn renumber(node: &mut Node, next: &mut NodeId) {
    node.set_id(Id(*next));
    *next += 1;
    if let Some(children) = node.children_mut() {
        for c in children {
            renumber(c, next);
        }
    }
}
