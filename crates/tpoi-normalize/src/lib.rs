pub mod coerce;
pub mod context;
pub mod dedup;
pub mod describe;
pub mod draft;
pub mod error;
pub mod export;
pub mod identity;
pub mod pipeline;
pub mod rules;
pub mod tags;
pub mod temporal;
mod validate;

pub use context::RunContext;
pub use dedup::{dedup, DedupIndex, MergeOutcome};
pub use draft::PoiDraft;
pub use error::{ExportError, Rejection};
pub use export::{export_file_name, read_json, render, ExportFormat, TAG_DELIMITER};
pub use identity::{canonicalize_url, poi_id};
pub use pipeline::{
    build_draft, normalize_batch, normalize_page, BatchCollector, BatchOutput, BatchSummary,
};
pub use validate::MIN_NAME_CHARS;
