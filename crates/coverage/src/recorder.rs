use crate::colorize::{CoverageMark, apply_outline};
use crate::config::CoverageConfig;
use crate::error::CoverageError;
use crate::identity::identity_key;
use crate::page::Page;
use crate::page_key::page_key;
use crate::store::{CoverageStore, Storage};
use html::Id;

/// One tracked event that reached the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorded {
    pub page_key: String,
    pub identity: String,
    pub event_type: String,
    /// `false` when the entry was already triggered.
    pub newly_triggered: bool,
}

/// Tracking listener body: flip `(page, element, event type)` to triggered.
///
/// The identity is recomputed from the node's current markup, and the store
/// is re-read right before the write. A node whose markup changed since it
/// was instrumented records under its new identity.
pub fn record<S: Storage>(
    page: &mut Page,
    store: &mut CoverageStore<S>,
    config: &CoverageConfig,
    colorize: bool,
    node: Id,
    event_type: &str,
) -> Result<Recorded, CoverageError> {
    let key = page_key(page.url());
    let identity = identity_key(
        page.node(node).ok_or(CoverageError::UnknownNode(node))?,
        config,
        colorize,
    );
    let (updated, newly_triggered) = store.patch_triggered(&key, &identity, event_type)?;

    if colorize {
        let mark = CoverageMark::of(updated.element(&key, &identity));
        let changed = page
            .node_mut(node)
            .is_some_and(|element| apply_outline(element, mark, &config.outline_colors));
        if changed {
            page.restyle();
        }
    }

    if newly_triggered {
        log::info!(target: "uicov.record", "{key} ({event_type}): {identity}");
    } else {
        log::trace!(target: "uicov.record", "{key} ({event_type}) already covered");
    }
    Ok(Recorded {
        page_key: key,
        identity,
        event_type: event_type.to_string(),
        newly_triggered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;
    use crate::store::MemoryStorage;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingStorage {
        inner: MemoryStorage,
        reads: Rc<Cell<usize>>,
    }

    impl Storage for CountingStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.reads.set(self.reads.get() + 1);
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), CoverageError> {
            self.inner.set_item(key, value)
        }
    }

    #[test]
    fn changed_markup_records_under_the_new_identity() {
        let config = CoverageConfig::default();
        let mut store = CoverageStore::new(MemoryStorage::new(), &config);
        let mut page =
            Page::load("https://shop.test/", r#"<button class="idle">Save</button>"#).expect("url");
        scan(&mut page, &mut store, &config, false).expect("scan");

        let button = page.query("button").expect("present");
        page.set_attribute(button, "class", "busy").expect("element");
        let recorded = record(&mut page, &mut store, &config, false, button, "click").expect("record");

        assert_eq!(recorded.identity, r#"<button class="busy">Save</button>"#);
        let coverage = store.load();
        assert_eq!(
            coverage.state("https://shop.test", r#"<button class="idle">Save</button>"#, "click"),
            Some(false)
        );
        assert_eq!(coverage.state("https://shop.test", &recorded.identity, "click"), Some(true));
    }

    #[test]
    fn repeated_events_are_not_new() {
        let config = CoverageConfig::default();
        let mut store = CoverageStore::new(MemoryStorage::new(), &config);
        let mut page = Page::load("https://shop.test/", "<a href=/x>x</a>").expect("url");
        let link = page.query("a").expect("present");

        let first = record(&mut page, &mut store, &config, false, link, "click").expect("record");
        let second = record(&mut page, &mut store, &config, false, link, "click").expect("record");
        assert!(first.newly_triggered);
        assert!(!second.newly_triggered);
        assert!(record(&mut page, &mut store, &config, false, Id(4_242), "click").is_err());
    }

    #[test]
    fn each_event_reads_the_store_once() {
        let config = CoverageConfig::default();
        let reads = Rc::new(Cell::new(0));
        let storage = CountingStorage {
            inner: MemoryStorage::new(),
            reads: Rc::clone(&reads),
        };
        let mut store = CoverageStore::new(storage, &config);
        let mut page = Page::load("https://shop.test/", "<a href=/x>x</a>").expect("url");
        let link = page.query("a").expect("present");

        reads.set(0);
        let first = record(&mut page, &mut store, &config, false, link, "click").expect("record");
        assert_eq!(reads.get(), 1);
        assert!(first.newly_triggered);
    }

    #[test]
    fn colorized_record_turns_the_outline_green() {
        let config = CoverageConfig::default();
        let mut store = CoverageStore::new(MemoryStorage::new(), &config);
        let mut page = Page::load("https://shop.test/", "<button>Go</button>").expect("url");
        scan(&mut page, &mut store, &config, true).expect("scan");
        let button = page.query("button").expect("present");

        record(&mut page, &mut store, &config, true, button, "click").expect("record");
        assert_eq!(
            page.node(button).and_then(|n| n.attr("style")),
            Some("outline: 2px solid limegreen")
        );
    }
}
