use crate::config::CoverageConfig;
use crate::error::CoverageError;
use crate::gate::{TriggerGate, TriggerKind};
use crate::page::Page;
use crate::recorder::{Recorded, record};
use crate::scanner::{ScanReport, scan};
use crate::store::{Coverage, CoverageStore, Storage};
use html::Id;

/// What a dispatched event caused.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Tracking listeners that fired, in propagation order.
    pub recorded: Vec<Recorded>,
    /// The window-level scan the event triggered, if the gate let it through.
    pub scan: Option<ScanReport>,
}

/// Instrumentation for one origin: configuration, the store, and the scan gate.
pub struct Instrumenter<S: Storage> {
    config: CoverageConfig,
    store: CoverageStore<S>,
    gate: TriggerGate,
}

impl<S: Storage> Instrumenter<S> {
    pub fn new(storage: S, config: CoverageConfig) -> Self {
        let store = CoverageStore::new(storage, &config);
        Self {
            config,
            store,
            gate: TriggerGate::new(),
        }
    }

    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    pub fn store(&self) -> &CoverageStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CoverageStore<S> {
        &mut self.store
    }

    /// Persisted colorization flag, falling back to the configured default.
    pub fn colorize(&self) -> bool {
        self.store.colors_enabled(self.config.colorize_default)
    }

    /// Page load.
    pub fn attach(&mut self, page: &mut Page) -> Result<ScanReport, CoverageError> {
        let colorize = self.colorize();
        self.gate.admit(TriggerKind::Load);
        scan(page, &mut self.store, &self.config, colorize)
    }

    /// Run a scan if the gate admits `kind`.
    pub fn on_trigger(
        &mut self,
        page: &mut Page,
        kind: TriggerKind,
    ) -> Result<Option<ScanReport>, CoverageError> {
        if !self.gate.admit(kind) {
            log::trace!(target: "uicov.scan", "{kind:?} trigger debounced");
            return Ok(None);
        }
        let colorize = self.colorize();
        scan(page, &mut self.store, &self.config, colorize).map(Some)
    }

    /// Dispatch a user event at `target`. Tracking listeners on the propagation
    /// path record first, then the window sees the event and may rescan.
    pub fn dispatch(
        &mut self,
        page: &mut Page,
        target: Id,
        event_type: &str,
    ) -> Result<DispatchOutcome, CoverageError> {
        let colorize = self.colorize();
        let mut outcome = DispatchOutcome::default();
        for node in page.dispatch(target, event_type)? {
            outcome.recorded.push(record(
                page,
                &mut self.store,
                &self.config,
                colorize,
                node,
                event_type,
            )?);
        }
        if let Some(kind) = TriggerKind::for_event(event_type) {
            outcome.scan = self.on_trigger(page, kind)?;
        }
        Ok(outcome)
    }

    /// Flip the persisted colorization flag, then reload the page and
    /// instrument it again under the new mode. Returns the new flag.
    pub fn toggle_colors(&mut self, page: &mut Page) -> Result<bool, CoverageError> {
        let enabled = !self.colorize();
        self.store.set_colors_enabled(enabled)?;
        log::info!(target: "uicov.scan", "colorization {}", if enabled { "on" } else { "off" });
        page.reload();
        self.attach(page)?;
        Ok(enabled)
    }

    pub fn coverage(&self) -> Coverage {
        self.store.snapshot()
    }

    pub fn export(&self) -> Result<String, CoverageError> {
        self.store.export()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    fn instrumented(markup: &str) -> (Instrumenter<MemoryStorage>, Page) {
        let mut instrumenter = Instrumenter::new(MemoryStorage::new(), CoverageConfig::default());
        let mut page = Page::load("https://shop.test/", markup).expect("url");
        instrumenter.attach(&mut page).expect("load scan");
        (instrumenter, page)
    }

    #[test]
    fn click_records_then_rescans() {
        let (mut instrumenter, mut page) = instrumented("<button>Go</button>");
        let button = page.query("button").expect("present");
        let outcome = instrumenter.dispatch(&mut page, button, "click").expect("dispatch");
        assert_eq!(outcome.recorded.len(), 1);
        assert!(outcome.scan.is_some());
        assert_eq!(
            instrumenter.coverage().state("https://shop.test", "<button>Go</button>", "click"),
            Some(true)
        );
    }

    #[test]
    fn mouse_movement_is_debounced() {
        let (mut instrumenter, mut page) = instrumented("<p id=p>text</p>");
        let p = page.query("#p").expect("present");
        let scans = (0..10)
            .map(|_| instrumenter.dispatch(&mut page, p, "mousemove").expect("dispatch"))
            .filter(|outcome| outcome.scan.is_some())
            .count();
        assert_eq!(scans, 1);
    }

    #[test]
    fn toggling_colors_reinstruments_the_page() {
        let (mut instrumenter, mut page) = instrumented("<button>Go</button>");
        assert!(!instrumenter.colorize());
        assert!(instrumenter.toggle_colors(&mut page).expect("toggle"));
        assert!(instrumenter.colorize());

        let button = page.query("button").expect("present");
        assert_eq!(
            page.node(button).and_then(|n| n.attr("style")),
            Some("outline: 2px solid red")
        );
        assert_eq!(page.targets().tracking_listener_count(), 1);

        assert!(!instrumenter.toggle_colors(&mut page).expect("toggle"));
        let button = page.query("button").expect("present");
        assert_eq!(page.node(button).and_then(|n| n.attr("style")), None);
    }
}
