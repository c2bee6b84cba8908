//! Reconcile the live document with the coverage store.
use crate::colorize::{CoverageMark, apply_outline};
use crate::config::CoverageConfig;
use crate::discovery::{ElementFacts, ListenerIntrospection, discover_listeners};
use crate::error::CoverageError;
use crate::identity::identity_key;
use crate::page::Page;
use crate::page_key::page_key;
use crate::store::{CoverageStore, Storage};
use css::ComputedStyle;
use html::{Id, Node, opening_tag};
use std::collections::{BTreeSet, HashMap};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub page_key: String,
    /// Elements with at least one discoverable event type.
    pub tracked_elements: usize,
    /// Tracking listeners attached by this scan.
    pub listeners_attached: usize,
    /// `(element, event type)` entries added to the store by this scan.
    pub entries_created: usize,
}

struct Tracked {
    id: Id,
    identity: String,
    event_types: BTreeSet<String>,
}

/// One reconciliation pass over every element in document order.
///
/// Discovered `(element, event type)` pairs get a store entry if they have
/// none, and a tracking listener plus tracking attribute if the live node is
/// not marked yet. Running it again on an unchanged document attaches
/// nothing and writes the same store back.
pub fn scan<S: Storage>(
    page: &mut Page,
    store: &mut CoverageStore<S>,
    config: &CoverageConfig,
    colorize: bool,
) -> Result<ScanReport, CoverageError> {
    let key = page_key(page.url());
    let mut local = store.load();
    local.ensure_page(&key);

    let tracked = tracked_elements(page, config, colorize);

    let mut report = ScanReport {
        page_key: key.clone(),
        tracked_elements: tracked.len(),
        ..ScanReport::default()
    };
    for t in &tracked {
        for event_type in &t.event_types {
            if local.ensure_event(&key, &t.identity, event_type) {
                report.entries_created += 1;
            }
        }
    }
    let persisted = store.commit(&local)?;

    for t in &tracked {
        let node = page.node_mut(t.id).ok_or(CoverageError::UnknownNode(t.id))?;
        let mut fresh = Vec::new();
        for event_type in &t.event_types {
            let attribute = config.tracking_attribute(event_type);
            if !node.has_attr(&attribute) {
                node.set_attr(&attribute, "true");
                fresh.push(event_type);
            }
        }
        if colorize {
            let mark = CoverageMark::of(persisted.element(&key, &t.identity));
            apply_outline(node, mark, &config.outline_colors);
        }
        if !fresh.is_empty() && log::log_enabled!(target: "uicov.scan", log::Level::Trace) {
            log::trace!(target: "uicov.scan", "listening for {fresh:?} on {}", opening_tag(node));
        }
        for event_type in fresh {
            page.targets_mut().add_tracking_listener(t.id, event_type);
            report.listeners_attached += 1;
        }
    }
    if colorize {
        page.restyle();
    }

    log::debug!(
        target: "uicov.scan",
        "{}: {} tracked elements, {} listeners attached, {} new entries",
        report.page_key,
        report.tracked_elements,
        report.listeners_attached,
        report.entries_created
    );
    Ok(report)
}

fn tracked_elements(page: &Page, config: &CoverageConfig, colorize: bool) -> Vec<Tracked> {
    struct Ctx<'a> {
        page: &'a Page,
        styles: HashMap<Id, ComputedStyle>,
        config: &'a CoverageConfig,
        colorize: bool,
    }

    fn walk(node: &Node, parent: Id, ctx: &Ctx<'_>, out: &mut Vec<Tracked>) {
        if let Some(facts) = ElementFacts::gather(
            node,
            ctx.styles.get(&node.id()),
            ctx.styles.get(&parent),
            ctx.page.targets().handler_properties(node.id()),
        ) {
            let introspection: &dyn ListenerIntrospection = ctx.page.targets();
            let event_types = discover_listeners(&facts, Some(introspection), ctx.config);
            if !event_types.is_empty() {
                out.push(Tracked {
                    id: facts.id,
                    identity: identity_key(node, ctx.config, ctx.colorize),
                    event_types,
                });
            }
        }
        for c in node.children() {
            walk(c, node.id(), ctx, out);
        }
    }

    let ctx = Ctx {
        page,
        styles: page.computed_styles(),
        config,
        colorize,
    };
    let mut out = Vec::new();
    walk(page.dom(), page.dom().id(), &ctx, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    fn setup(markup: &str) -> (Page, CoverageStore<MemoryStorage>, CoverageConfig) {
        let config = CoverageConfig::default();
        let page = Page::load("https://shop.test/cart", markup).expect("valid url");
        let store = CoverageStore::new(MemoryStorage::new(), &config);
        (page, store, config)
    }

    #[test]
    fn empty_pages_still_get_a_bucket() {
        let (mut page, mut store, config) = setup("<p>nothing to click</p>");
        let report = scan(&mut page, &mut store, &config, false).expect("scan");
        assert_eq!(report.tracked_elements, 0);
        assert_eq!(store.load().to_json().expect("json"), r#"{"https://shop.test/cart":{}}"#);
    }

    #[test]
    fn second_scan_attaches_nothing() {
        let (mut page, mut store, config) = setup(r#"<nav><a href="/a">A</a><button>B</button></nav>"#);
        let first = scan(&mut page, &mut store, &config, false).expect("scan");
        assert_eq!(first.tracked_elements, 2);
        assert_eq!(first.listeners_attached, 2);
        assert_eq!(first.entries_created, 2);

        let second = scan(&mut page, &mut store, &config, false).expect("scan");
        assert_eq!(second.listeners_attached, 0);
        assert_eq!(second.entries_created, 0);
        assert_eq!(page.targets().tracking_listener_count(), 2);
    }

    #[test]
    fn event_types_differing_in_case_are_tracked_separately() {
        let (mut page, mut store, config) = setup(r#"<div id="w">x</div>"#);
        let w = page.query("#w").expect("present");
        page.targets_mut().add_page_listener(w, "Click");
        page.targets_mut().add_page_listener(w, "click");

        let report = scan(&mut page, &mut store, &config, false).expect("scan");
        assert_eq!(report.entries_created, 2);
        assert_eq!(report.listeners_attached, 2);
        assert!(page.targets().has_tracking_listener(w, "click"));
        assert!(page.targets().has_tracking_listener(w, "Click"));
        let node = page.node(w).expect("present");
        assert!(node.has_attr("data-uicov-click"));
        assert!(node.has_attr("data-uicov-_click"));
        assert_eq!(page.dispatch(w, "click").expect("in dom"), vec![w]);

        let again = scan(&mut page, &mut store, &config, false).expect("scan");
        assert_eq!(again.listeners_attached, 0);
    }

    #[test]
    fn deeply_nested_pages_scan_without_overflowing() {
        let depth = 10_000;
        let markup = format!(
            r#"{}<input type="submit" value="Go">{}"#,
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let (mut page, mut store, config) = setup(&markup);
        let report = scan(&mut page, &mut store, &config, false).expect("scan");
        assert_eq!(report.tracked_elements, 1);
        assert_eq!(
            store
                .load()
                .state("https://shop.test/cart", r#"<input type="submit" value="Go">"#, "click"),
            Some(false)
        );
    }

    #[test]
    fn identical_markup_shares_one_entry() {
        let (mut page, mut store, config) = setup("<button>Buy</button><button>Buy</button>");
        let report = scan(&mut page, &mut store, &config, false).expect("scan");
        assert_eq!(report.tracked_elements, 2);
        assert_eq!(report.entries_created, 1);
        assert_eq!(report.listeners_attached, 2);
    }

    #[test]
    fn colorized_scan_outlines_without_changing_identity() {
        let (mut page, mut store, config) = setup(r#"<button style="margin: 0">Go</button>"#);
        scan(&mut page, &mut store, &config, true).expect("scan");
        let button = page.query("button").expect("present");
        assert_eq!(
            page.node(button).and_then(|n| n.attr("style")),
            Some("margin: 0;outline: 2px solid red")
        );
        let styles = page.computed_styles();
        assert_eq!(styles[&button].outline.as_deref(), Some("2px solid red"));

        let before = store.load();
        let again = scan(&mut page, &mut store, &config, true).expect("scan");
        assert_eq!(again.entries_created, 0);
        assert_eq!(store.load(), before);
    }
}
