//! UI interaction coverage: discover interactive elements, track which of
//! their event types were ever triggered, and persist that per page.
pub mod colorize;
pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod gate;
pub mod identity;
pub mod instrumenter;
pub mod page;
pub mod page_key;
pub mod recorder;
pub mod report;
pub mod scanner;
pub mod store;

pub use colorize::CoverageMark;
pub use config::{CoverageConfig, OutlineColors};
pub use discovery::{ElementFacts, ListenerIntrospection, discover_listeners};
pub use error::CoverageError;
pub use gate::{TriggerGate, TriggerKind};
pub use identity::identity_key;
pub use instrumenter::{DispatchOutcome, Instrumenter};
pub use page::{EventTargets, Page};
pub use page_key::{normalize_page_key, page_key};
pub use recorder::{Recorded, record};
pub use report::{CoverageSummary, PageSummary};
pub use scanner::{ScanReport, scan};
pub use store::{Coverage, CoverageStore, FileStorage, MemoryStorage, Storage};
