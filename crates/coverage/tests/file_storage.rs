#[path = "common/mod.rs"]
mod support;

use coverage::{CoverageConfig, CoverageStore, FileStorage, Instrumenter, Storage};
use support::SHOP;

#[test]
fn coverage_persists_across_instrumenter_instances() {
    let dir = tempfile::tempdir().expect("tempdir");

    let storage = FileStorage::open(dir.path(), SHOP).expect("open");
    let mut instrumenter = Instrumenter::new(storage, CoverageConfig::default());
    let mut page = support::load(SHOP, r#"<a href="/x">X</a>"#);
    instrumenter.attach(&mut page).expect("scan");
    let link = page.query("a").expect("present");
    instrumenter
        .dispatch(&mut page, link, "click")
        .expect("dispatch");
    drop(instrumenter);

    let storage = FileStorage::open(dir.path(), SHOP).expect("reopen");
    assert!(storage.path().exists());
    let store = CoverageStore::new(storage, &CoverageConfig::default());
    assert_eq!(
        store.snapshot().state(SHOP, r#"<a href="/x">X</a>"#, "click"),
        Some(true)
    );
}

#[test]
fn two_writers_on_one_origin_do_not_lose_triggers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = CoverageConfig::default();
    let open = || FileStorage::open(dir.path(), SHOP).expect("open");

    let mut first = Instrumenter::new(open(), config.clone());
    let mut second = Instrumenter::new(open(), config);
    let markup = r#"<button id="a">A</button><button id="b">B</button>"#;
    let mut tab_one = support::load(SHOP, markup);
    let mut tab_two = support::load(SHOP, markup);
    first.attach(&mut tab_one).expect("scan");
    second.attach(&mut tab_two).expect("scan");

    let a = tab_one.query("#a").expect("present");
    first.dispatch(&mut tab_one, a, "click").expect("dispatch");
    let b = tab_two.query("#b").expect("present");
    second.dispatch(&mut tab_two, b, "click").expect("dispatch");
    // A late scan in the first tab must not put `b` back to false.
    first
        .on_trigger(&mut tab_one, coverage::TriggerKind::Load)
        .expect("scan");

    let coverage = first.coverage();
    assert_eq!(coverage.state(SHOP, r#"<button id="a">A</button>"#, "click"), Some(true));
    assert_eq!(coverage.state(SHOP, r#"<button id="b">B</button>"#, "click"), Some(true));
}

#[test]
fn corrupt_storage_file_reads_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut storage = FileStorage::open(dir.path(), SHOP).expect("open");
    std::fs::write(storage.path(), "{ definitely not json").expect("write");
    assert_eq!(storage.get_item("ui-coverage"), None);

    storage.set_item("ui-coverage", "{}").expect("rewrite");
    assert_eq!(storage.get_item("ui-coverage").as_deref(), Some("{}"));
}

#[test]
fn colors_flag_is_shared_through_storage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = CoverageConfig::default();
    let mut instrumenter =
        Instrumenter::new(FileStorage::open(dir.path(), SHOP).expect("open"), config.clone());
    let mut page = support::load(SHOP, "<button>Go</button>");
    instrumenter.attach(&mut page).expect("scan");
    assert!(instrumenter.toggle_colors(&mut page).expect("toggle"));

    let store = CoverageStore::new(FileStorage::open(dir.path(), SHOP).expect("open"), &config);
    assert!(store.colors_enabled(false));
    let exported = store.export().expect("export");
    assert!(exported.contains("<button>Go</button>"), "{exported}");
}
