//! Page-to-record pipeline and batch driver.
//!
//! [`normalize_page`] runs identity, coercion, tag inference, temporal
//! estimation and description synthesis over one [`RawPage`], then validates
//! the resulting draft. It is pure over its inputs and safe to call from any
//! number of threads. [`BatchCollector`] is the single-writer end: it feeds
//! every result into one [`DedupIndex`] and keeps the run's counts.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tpoi_core::{PoiRecord, PoiType, RawPage};

use crate::coerce::{
    clean_neighborhood, clean_text, first_clean, parse_coordinates, parse_halal,
    parse_price_tier, parse_rating,
};
use crate::context::RunContext;
use crate::dedup::{DedupIndex, MergeOutcome};
use crate::describe::synthesize;
use crate::draft::PoiDraft;
use crate::error::Rejection;
use crate::identity::{canonicalize_url, poi_id};
use crate::{tags, temporal};

/// Normalize one page into a record.
///
/// # Errors
///
/// Returns a [`Rejection`] when the page does not yield a valid record. Field
/// level parse failures never reject; they fall back to defaults.
pub fn normalize_page(page: &RawPage, ctx: &RunContext) -> Result<PoiRecord, Rejection> {
    build_draft(page, ctx).finalize(ctx)
}

/// Run stages 1 to 5 and return the unvalidated draft.
#[must_use]
pub fn build_draft(page: &RawPage, ctx: &RunContext) -> PoiDraft {
    let kind = ctx.kind();

    // Identity
    let name = first_clean(&page.raw_name_candidates);
    let name_text = name.as_deref().unwrap_or_default();
    let source_url = canonicalize_url(&page.raw_url, &ctx.source.base_url);
    if source_url.is_none() && !page.raw_url.trim().is_empty() {
        tracing::debug!(raw_url = %page.raw_url, "could not resolve source url");
    }
    let id = poi_id(source_url.as_deref().unwrap_or_default(), name_text);

    let poi_type = page
        .raw_type
        .as_deref()
        .and_then(|raw| {
            let parsed = PoiType::parse(raw);
            if parsed.is_none() {
                tracing::debug!(raw_type = raw, "unrecognized type hint, using source default");
            }
            parsed
        })
        .unwrap_or_else(|| ctx.source.fallback_type());

    // Coercion
    let description = first_clean(&page.raw_description_candidates).unwrap_or_default();
    let date_text = clean_text(&page.raw_date_text);
    let details = page.directory_details.as_ref();

    let price_text = details
        .and_then(|d| d.price_text.as_deref())
        .filter(|t| !t.trim().is_empty())
        .or(page.raw_price_text.as_deref());
    let price_range = price_text.and_then(parse_price_tier);
    let rating = page.raw_rating_text.as_deref().map(parse_rating);
    let coordinates = parse_coordinates(&page.raw_script_blobs, &page.raw_map_link_hrefs);
    let neighborhood = clean_neighborhood(&page.raw_location_text, kind);

    let halal_text = [
        Some(name_text),
        Some(description.as_str()),
        details.and_then(|d| d.remarks.as_deref()),
        details.and_then(|d| d.pr_comment_body.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase();
    let halal = parse_halal(&halal_text);

    // Tags
    let category_tags = tags::category_tags(page, kind, name_text, &description);
    let interest_tags =
        tags::interest_tags(&category_tags, name_text, &description, &date_text, rating);
    let cuisine = tags::cuisine(page);

    // Temporal
    let typical_duration_minutes =
        temporal::typical_duration(poi_type, name_text, &description, &category_tags);
    let best_time_of_day =
        temporal::best_time_of_day(kind, name_text, &description, &date_text, price_range);

    // Description
    let category = tags::listing_category(page);
    let short_description = synthesize(page, ctx, name_text, &neighborhood, category.as_deref());

    PoiDraft {
        id: (!id.is_empty()).then_some(id),
        name,
        poi_type: Some(poi_type),
        category_tags,
        neighborhood: Some(neighborhood),
        price_range,
        halal: Some(halal),
        cuisine,
        interest_tags,
        coordinates: Some(coordinates),
        typical_duration_minutes: Some(typical_duration_minutes),
        best_time_of_day,
        short_description: Some(short_description),
        source_url,
    }
}

/// Counts for one normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Pages handed to the pipeline.
    pub pages: usize,
    /// Pages that passed validation, before deduplication.
    pub accepted: usize,
    /// Rejections by [`Rejection::kind`].
    pub rejected: BTreeMap<String, usize>,
    /// Accepted records that only enriched an earlier one.
    pub enriched: usize,
    /// Accepted records dropped as plain duplicates.
    pub duplicates: usize,
    /// Records in the output.
    pub emitted: usize,
    pub unique_neighborhoods: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }
}

#[derive(Debug)]
pub struct BatchOutput {
    pub records: Vec<PoiRecord>,
    pub summary: BatchSummary,
}

/// Serialized merge point for normalized pages.
#[derive(Debug, Default)]
pub struct BatchCollector {
    index: DedupIndex,
    summary: BatchSummary,
}

impl BatchCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one page result. Rejections are logged and counted.
    pub fn push(&mut self, result: Result<PoiRecord, Rejection>) -> Option<MergeOutcome> {
        self.summary.pages += 1;
        match result {
            Ok(record) => {
                self.summary.accepted += 1;
                let outcome = self.index.insert(record);
                match outcome {
                    MergeOutcome::Inserted => {}
                    MergeOutcome::Enriched => self.summary.enriched += 1,
                    MergeOutcome::Duplicate => self.summary.duplicates += 1,
                }
                Some(outcome)
            }
            Err(rejection) => {
                tracing::warn!(
                    kind = rejection.kind(),
                    name = rejection.name(),
                    error = %rejection,
                    "record rejected"
                );
                *self
                    .summary
                    .rejected
                    .entry(rejection.kind().to_string())
                    .or_insert(0) += 1;
                None
            }
        }
    }

    #[must_use]
    pub fn finish(self) -> BatchOutput {
        let mut summary = self.summary;
        let records = self.index.into_records();
        summary.emitted = records.len();
        summary.unique_neighborhoods = records
            .iter()
            .map(|r| r.neighborhood.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        if records.is_empty() {
            tracing::info!(pages = summary.pages, "batch produced no records");
        } else {
            tracing::info!(
                pages = summary.pages,
                emitted = summary.emitted,
                rejected = summary.rejected_total(),
                enriched = summary.enriched,
                duplicates = summary.duplicates,
                "batch normalized"
            );
        }

        BatchOutput { records, summary }
    }
}

/// Normalize a batch sequentially, in input order.
#[must_use]
pub fn normalize_batch(pages: &[RawPage], ctx: &RunContext) -> BatchOutput {
    let mut collector = BatchCollector::new();
    for page in pages {
        collector.push(normalize_page(page, ctx));
    }
    collector.finish()
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
