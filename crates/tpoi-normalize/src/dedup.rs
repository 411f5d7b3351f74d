//! Batch-level deduplication by POI id.
//!
//! Policy: the first record seen for an id is kept. A later record with the
//! same id may only fill gaps in it: a null coordinate pair, price range, best
//! time or cuisine, and a description that is strictly longer. Name, type and
//! tags always stay as first seen, and cuisine is only filled into a stored
//! restaurant. Ids must match exactly.

use std::collections::HashMap;

use tpoi_core::{PoiRecord, PoiType};

/// What [`DedupIndex::insert`] did with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First record for its id.
    Inserted,
    /// Id already present; the stored record gained fields.
    Enriched,
    /// Id already present; nothing new, record dropped.
    Duplicate,
}

/// Insertion-ordered, id-keyed record store.
///
/// The single point of shared mutable state in a run; callers serialize
/// access to it.
#[derive(Debug, Default)]
pub struct DedupIndex {
    records: Vec<PoiRecord>,
    positions: HashMap<String, usize>,
}

impl DedupIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: PoiRecord) -> MergeOutcome {
        if let Some(&pos) = self.positions.get(&record.id) {
            let stored = &mut self.records[pos];
            if enrich(stored, record) {
                tracing::debug!(id = %stored.id, name = %stored.name, "enriched duplicate record");
                MergeOutcome::Enriched
            } else {
                MergeOutcome::Duplicate
            }
        } else {
            self.positions.insert(record.id.clone(), self.records.len());
            self.records.push(record);
            MergeOutcome::Inserted
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn records(&self) -> &[PoiRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<PoiRecord> {
        self.records
    }
}

/// Deduplicate a batch, keeping first-seen order.
///
/// Idempotent: `dedup(dedup(x)) == dedup(x)`.
#[must_use]
pub fn dedup(records: Vec<PoiRecord>) -> Vec<PoiRecord> {
    let mut index = DedupIndex::new();
    for record in records {
        index.insert(record);
    }
    index.into_records()
}

/// Merge gap-filling fields of `incoming` into `stored`. Returns `true` when
/// anything changed.
fn enrich(stored: &mut PoiRecord, incoming: PoiRecord) -> bool {
    let mut changed = false;

    if !stored.coordinates.is_known() && incoming.coordinates.is_known() {
        stored.coordinates = incoming.coordinates;
        changed = true;
    }
    if stored.price_range.is_none() && incoming.price_range.is_some() {
        stored.price_range = incoming.price_range;
        changed = true;
    }
    if stored.best_time_of_day.is_none() && incoming.best_time_of_day.is_some() {
        stored.best_time_of_day = incoming.best_time_of_day;
        changed = true;
    }
    if stored.poi_type == PoiType::Restaurant
        && stored.cuisine.is_none()
        && incoming.cuisine.is_some()
    {
        stored.cuisine = incoming.cuisine;
        changed = true;
    }
    if incoming.short_description.chars().count() > stored.short_description.chars().count() {
        stored.short_description = incoming.short_description;
        changed = true;
    }

    if changed && incoming.last_updated_ts > stored.last_updated_ts {
        stored.last_updated_ts = incoming.last_updated_ts;
    }
    changed
}
