//! Per-run, read-only state passed into every pipeline call.

use chrono::{DateTime, Utc};
use tpoi_core::{SourceConfig, SourceKind};

/// Default upper bound for `short_description`, in characters.
pub const DEFAULT_DESCRIPTION_MAX_CHARS: usize = 300;

/// Source profile, description bound and clock for one normalization run.
///
/// Built once per run and shared by reference; holds no mutable state, so
/// pages may be normalized on any number of threads.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub source: SourceConfig,
    pub description_max_chars: usize,
    clock: fn() -> DateTime<Utc>,
    excluded_suffixes: Vec<String>,
    denied_names: Vec<String>,
}

impl RunContext {
    #[must_use]
    pub fn new(source: SourceConfig) -> Self {
        let excluded_suffixes = source.excluded_suffixes();
        let denied_names = source
            .denied_names()
            .iter()
            .map(|n| n.trim().to_lowercase())
            .collect();
        Self {
            source,
            description_max_chars: DEFAULT_DESCRIPTION_MAX_CHARS,
            clock: Utc::now,
            excluded_suffixes,
            denied_names,
        }
    }

    #[must_use]
    pub fn with_description_max_chars(mut self, max_chars: usize) -> Self {
        self.description_max_chars = max_chars;
        self
    }

    /// Replace the wall clock, e.g. with a fixed instant in tests.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.source.kind
    }

    /// `true` when `url` ends with one of the source's landing-page suffixes.
    #[must_use]
    pub fn is_landing_page(&self, url: &str) -> bool {
        !url.is_empty()
            && self
                .excluded_suffixes
                .iter()
                .any(|suffix| url.ends_with(suffix.as_str()))
    }

    /// Case-insensitive exact match against the source's name denylist.
    #[must_use]
    pub fn is_denied_name(&self, name: &str) -> bool {
        let lower = name.trim().to_lowercase();
        self.denied_names.iter().any(|d| *d == lower)
    }
}
