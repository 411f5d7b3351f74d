//! `normalize` command: raw page extractions in, POI exports out.
//!
//! Pages are normalized on tokio's blocking pool, at most
//! `TPOI_MAX_CONCURRENT_PAGES` at a time. Results come back in input order
//! and go through a single [`BatchCollector`], so dedup sees one writer.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::ValueEnum;
use futures::stream::{self, StreamExt};
use tpoi_core::{AppConfig, RawPage};
use tpoi_normalize::{
    export_file_name, normalize_page, render, BatchCollector, BatchOutput, BatchSummary,
    ExportFormat, RunContext,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Csv,
    Both,
}

impl OutputFormat {
    pub(crate) fn formats(self) -> &'static [ExportFormat] {
        match self {
            OutputFormat::Json => &[ExportFormat::Json],
            OutputFormat::Csv => &[ExportFormat::Csv],
            OutputFormat::Both => &[ExportFormat::Json, ExportFormat::Csv],
        }
    }
}

/// Normalize `input` with the named source profile and write the exports.
///
/// An empty result is reported, not treated as a failure.
///
/// # Errors
///
/// Returns an error if the sources file or input cannot be read or parsed,
/// the source is unknown, or an export cannot be written.
pub(crate) async fn run_normalize(
    config: &AppConfig,
    source_name: &str,
    input: &Path,
    format: OutputFormat,
    output_dir: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let sources = tpoi_core::load_sources(&config.sources_path)
        .with_context(|| format!("loading {}", config.sources_path.display()))?;
    let source = sources.find(source_name).cloned().ok_or_else(|| {
        anyhow::anyhow!(
            "source '{source_name}' not found in {}",
            config.sources_path.display()
        )
    })?;

    let raw = tokio::fs::read(input)
        .await
        .with_context(|| format!("reading {}", input.display()))?;
    let pages: Vec<RawPage> = serde_json::from_slice(&raw)
        .with_context(|| format!("parsing raw pages from {}", input.display()))?;

    let ctx = Arc::new(
        RunContext::new(source).with_description_max_chars(config.description_max_chars),
    );
    tracing::info!(
        source = %ctx.source.name,
        kind = %ctx.kind(),
        pages = pages.len(),
        "normalizing pages"
    );

    let output =
        normalize_concurrently(pages, Arc::clone(&ctx), config.max_concurrent_pages).await?;
    print_summary(&ctx.source.name, &output.summary);

    if dry_run {
        println!(
            "dry-run: would write {} records for {}",
            output.records.len(),
            ctx.source.name
        );
        return Ok(());
    }
    if output.records.is_empty() {
        println!("no records produced for {}; nothing written", ctx.source.name);
        return Ok(());
    }

    let dir = output_dir.unwrap_or(&config.output_dir);
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;

    let now = ctx.now();
    let slug = ctx.source.slug();
    for &export in format.formats() {
        let bytes = render(&output.records, export)?;
        let path = dir.join(export_file_name(&slug, now, export));
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {} records to {}", output.records.len(), path.display());
    }

    Ok(())
}

/// Normalize pages in parallel, feeding results to one collector in input
/// order.
///
/// # Errors
///
/// Returns an error only if a normalization task panics.
pub(crate) async fn normalize_concurrently(
    pages: Vec<RawPage>,
    ctx: Arc<RunContext>,
    concurrency: usize,
) -> anyhow::Result<BatchOutput> {
    let mut results = stream::iter(pages.into_iter().map(|page| {
        let ctx = Arc::clone(&ctx);
        tokio::task::spawn_blocking(move || normalize_page(&page, &ctx))
    }))
    .buffered(concurrency.max(1));

    let mut collector = BatchCollector::new();
    while let Some(joined) = results.next().await {
        collector.push(joined.context("normalization task failed")?);
    }
    Ok(collector.finish())
}

fn print_summary(source: &str, summary: &BatchSummary) {
    println!(
        "{source}: {} pages, {} accepted, {} rejected, {} enriched, {} duplicates, \
         {} records across {} neighborhoods",
        summary.pages,
        summary.accepted,
        summary.rejected_total(),
        summary.enriched,
        summary.duplicates,
        summary.emitted,
        summary.unique_neighborhoods,
    );
    for (kind, count) in &summary.rejected {
        println!("  rejected {kind}: {count}");
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use tpoi_core::{SourceConfig, SourceKind};
    use tpoi_normalize::normalize_batch;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 30, 0).unwrap()
    }

    fn make_ctx() -> RunContext {
        RunContext::new(SourceConfig {
            name: "gotokyo_events".to_string(),
            kind: SourceKind::Event,
            base_url: "https://www.gotokyo.org/".to_string(),
            default_type: None,
            excluded_url_suffixes: None,
            name_denylist: None,
            notes: None,
        })
        .with_clock(fixed_now)
    }

    fn make_pages() -> Vec<RawPage> {
        (0..40)
            .map(|i| RawPage {
                // Every fifth page repeats an earlier URL.
                raw_url: format!("/en/event/{}.html", if i % 5 == 4 { i - 4 } else { i }),
                raw_name_candidates: vec![format!("Matsuri Number {i}")],
                raw_location_text: if i % 2 == 0 { "Asakusa" } else { "Ueno" }.to_string(),
                ..RawPage::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn concurrent_matches_sequential() {
        let ctx = Arc::new(make_ctx());
        let pages = make_pages();

        let sequential = normalize_batch(&pages, &ctx);
        let concurrent = normalize_concurrently(pages, Arc::clone(&ctx), 8)
            .await
            .expect("no task panics");

        assert_eq!(concurrent.records, sequential.records);
        assert_eq!(concurrent.summary, sequential.summary);
        assert_eq!(concurrent.records.len(), 32);
        assert_eq!(concurrent.summary.duplicates, 8);
    }

    #[tokio::test]
    async fn zero_concurrency_is_clamped() {
        let output = normalize_concurrently(make_pages(), Arc::new(make_ctx()), 0)
            .await
            .expect("no task panics");
        assert_eq!(output.summary.pages, 40);
    }

    #[test]
    fn both_expands_to_json_and_csv() {
        assert_eq!(
            OutputFormat::Both.formats(),
            &[ExportFormat::Json, ExportFormat::Csv]
        );
        assert_eq!(OutputFormat::Csv.formats(), &[ExportFormat::Csv]);
    }
}
