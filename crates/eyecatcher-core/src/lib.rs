// Eye Catcher core domain logic
//
// Three concerns live here, all free of I/O:
// - flow: the participant-facing phase state machine
// - analytics: per-topic aggregation over the event log
// - catalog: topic catalog file parsing

pub mod analytics;
pub mod catalog;
pub mod flow;

pub use analytics::aggregate_topic;
pub use catalog::{parse_catalog, CatalogError};
pub use flow::{EventDraft, FlowError, GameFlow, Phase};
