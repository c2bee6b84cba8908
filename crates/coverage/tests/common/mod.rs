#![allow(dead_code)]

use coverage::{CoverageConfig, Instrumenter, MemoryStorage, Page};

pub const SHOP: &str = "https://shop.test";

pub fn load(location: &str, markup: &str) -> Page {
    Page::load(location, markup).unwrap_or_else(|e| panic!("load {location}: {e}"))
}

/// A page that went through its load scan against fresh in-memory storage.
pub fn attached(location: &str, markup: &str) -> (Instrumenter<MemoryStorage>, Page) {
    let mut instrumenter = Instrumenter::new(MemoryStorage::new(), CoverageConfig::default());
    let mut page = load(location, markup);
    instrumenter
        .attach(&mut page)
        .unwrap_or_else(|e| panic!("load scan of {location}: {e}"));
    (instrumenter, page)
}

/// Raw bytes currently persisted in the coverage slot.
pub fn persisted(instrumenter: &Instrumenter<MemoryStorage>) -> String {
    use coverage::Storage;
    instrumenter
        .store()
        .storage()
        .get_item(&instrumenter.config().storage_slot)
        .unwrap_or_default()
}
