use std::path::Path;

use anyhow::Context;
use tpoi_normalize::{read_json, render, DedupIndex, ExportFormat, MergeOutcome};

/// Deduplicate previously exported JSON files into `output`.
///
/// Files are read in the order given, so earlier files win identity
/// collisions and later ones can only fill gaps.
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, or the output
/// cannot be written.
pub(crate) async fn run_merge(inputs: &[impl AsRef<Path>], output: &Path) -> anyhow::Result<()> {
    let mut index = DedupIndex::new();
    let (mut enriched, mut duplicates) = (0usize, 0usize);

    for input in inputs {
        let input = input.as_ref();
        let bytes = tokio::fs::read(input)
            .await
            .with_context(|| format!("reading {}", input.display()))?;
        let records =
            read_json(bytes.as_slice()).with_context(|| format!("parsing {}", input.display()))?;
        tracing::info!(file = %input.display(), records = records.len(), "merging export");

        for record in records {
            match index.insert(record) {
                MergeOutcome::Inserted => {}
                MergeOutcome::Enriched => enriched += 1,
                MergeOutcome::Duplicate => duplicates += 1,
            }
        }
    }

    let records = index.into_records();
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(output, render(&records, ExportFormat::Json)?)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "merged {} files into {} records ({enriched} enriched, {duplicates} duplicates) at {}",
        inputs.len(),
        records.len(),
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    use chrono::{TimeZone, Utc};
    use tpoi_core::{Coordinates, Halal, PoiRecord, PoiType};

    use super::*;

    fn make_record(id: &str, coordinates: Coordinates) -> PoiRecord {
        PoiRecord {
            id: id.to_string(),
            name: format!("Spot {id}"),
            poi_type: PoiType::Attraction,
            category_tags: BTreeSet::from(["Event".to_string()]),
            neighborhood: "Tokyo".to_string(),
            price_range: None,
            halal: Halal::Unknown,
            cuisine: None,
            interest_tags: BTreeSet::from(["Event".to_string()]),
            coordinates,
            typical_duration_minutes: 90,
            best_time_of_day: None,
            short_description: format!("Spot {id}"),
            source_url: format!("https://www.gotokyo.org/en/spot/{id}.html"),
            last_updated_ts: Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap(),
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tpoi-merge-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn merge_dedups_across_files() {
        let dir = scratch_dir("dedup");
        let first = dir.join("a.json");
        let second = dir.join("b.json");
        std::fs::write(
            &first,
            render(
                &[
                    make_record("aaa", Coordinates::unknown()),
                    make_record("bbb", Coordinates::unknown()),
                ],
                ExportFormat::Json,
            )
            .unwrap(),
        )
        .unwrap();
        std::fs::write(
            &second,
            render(
                &[
                    make_record("aaa", Coordinates::new(35.7, 139.8)),
                    make_record("ccc", Coordinates::unknown()),
                ],
                ExportFormat::Json,
            )
            .unwrap(),
        )
        .unwrap();

        let output = dir.join("out/merged.json");
        run_merge(&[&first, &second], &output).await.unwrap();

        let merged = read_json(std::fs::read(&output).unwrap().as_slice()).unwrap();
        let ids: Vec<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["aaa", "bbb", "ccc"]);
        assert!(merged[0].coordinates.is_known());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn merge_reports_unreadable_input() {
        let dir = scratch_dir("missing");
        let err = run_merge(&[dir.join("nope.json")], &dir.join("out.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope.json"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
