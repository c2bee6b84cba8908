//! Which event types an element can react to.
use crate::config::CoverageConfig;
use crate::events::{event_type_of, is_global_handler};
use css::{ComputedStyle, Cursor};
use html::dom_utils::is_label_wrapping_control;
use html::{Id, Node};
use std::collections::BTreeSet;

/// Listener introspection (`getEventListeners` style). Hosts that cannot
/// enumerate `addEventListener` registrations simply do not provide one.
pub trait ListenerIntrospection {
    /// Event types with at least one registered listener on `node`.
    fn registered_types(&self, node: Id) -> Vec<String>;
}

/// What discovery needs to know about one element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementFacts {
    pub id: Id,
    pub tag: String,
    /// `on*` handler names present as markup attributes.
    pub inline_handlers: Vec<String>,
    /// `on*` handler names assigned as properties from script.
    pub assigned_handlers: Vec<String>,
    pub cursor: Cursor,
    pub parent_cursor: Cursor,
    pub wraps_form_control: bool,
}

impl ElementFacts {
    /// Facts for an element node; `None` for anything else.
    pub fn gather<'a>(
        node: &Node,
        computed: Option<&ComputedStyle>,
        parent_computed: Option<&ComputedStyle>,
        assigned_handlers: impl IntoIterator<Item = &'a str>,
    ) -> Option<Self> {
        let tag = node.element_name()?;
        let inline_handlers = node
            .attributes()
            .iter()
            .filter(|(name, value)| {
                value.as_deref().is_some_and(|v| !v.trim().is_empty())
                    && is_global_handler(&name.to_ascii_lowercase())
            })
            .map(|(name, _)| name.to_ascii_lowercase())
            .collect();
        Some(Self {
            id: node.id(),
            tag: tag.to_string(),
            inline_handlers,
            assigned_handlers: assigned_handlers.into_iter().map(str::to_string).collect(),
            cursor: computed.map(|s| s.cursor.clone()).unwrap_or_default(),
            parent_cursor: parent_computed.map(|s| s.cursor.clone()).unwrap_or_default(),
            wraps_form_control: is_label_wrapping_control(node),
        })
    }
}

/// Event types the element can meaningfully respond to, ignore-list excluded.
///
/// Handler properties and introspected registrations come first, ignored
/// types dropped. An element of a forced-click tag left with nothing gets
/// `click`, and so does an element whose
/// cursor turns into a pointer relative to its parent, unless it is a label
/// forwarding clicks to a form control of its own.
pub fn discover_listeners(
    facts: &ElementFacts,
    introspection: Option<&dyn ListenerIntrospection>,
    config: &CoverageConfig,
) -> BTreeSet<String> {
    let mut found: BTreeSet<String> = facts
        .inline_handlers
        .iter()
        .chain(&facts.assigned_handlers)
        .filter(|name| is_global_handler(name))
        .map(|name| event_type_of(name).to_string())
        .collect();

    if config.introspect_listeners
        && let Some(introspection) = introspection
    {
        found.extend(introspection.registered_types(facts.id));
    }
    found.retain(|event_type| !config.is_ignored(event_type));

    if found.is_empty()
        && config
            .forced_click_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&facts.tag))
    {
        found.insert("click".to_string());
    }

    if !found.contains("click")
        && !facts.wraps_form_control
        && facts.cursor == Cursor::Pointer
        && facts.parent_cursor != Cursor::Pointer
    {
        found.insert("click".to_string());
    }

    if config.is_ignored("click") {
        found.remove("click");
    }
    found
}
