//! JSON and CSV rendering of normalized records.
//!
//! JSON keeps the record's field order and nests `coordinates`. CSV flattens
//! the same sequence, splits coordinates into two columns, and joins set
//! fields with [`TAG_DELIMITER`].

use std::io::{Read, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use tpoi_core::PoiRecord;

use crate::error::ExportError;

/// Joins set-valued fields inside one CSV cell.
pub const TAG_DELIMITER: &str = "|";

const CSV_SEPARATOR: char = ',';

/// CSV header, in canonical field order.
pub const CSV_HEADER: [&str; 16] = [
    "id",
    "name",
    "type",
    "category_tags",
    "neighborhood",
    "price_range",
    "halal",
    "cuisine",
    "interest_tags",
    "coordinates_lat",
    "coordinates_lon",
    "typical_duration_minutes",
    "best_time_of_day",
    "short_description",
    "source_url",
    "last_updated_ts",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// `{source}_{YYYYmmdd_HHMMSS}.{ext}`
#[must_use]
pub fn export_file_name(source_slug: &str, at: DateTime<Utc>, format: ExportFormat) -> String {
    format!(
        "{source_slug}_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Render records in the given format.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization fails.
pub fn render(records: &[PoiRecord], format: ExportFormat) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    match format {
        ExportFormat::Json => write_json(&mut buf, records)?,
        ExportFormat::Csv => write_csv(&mut buf, records)?,
    }
    Ok(buf)
}

/// Pretty-printed JSON array. Non-ASCII text is written as-is.
///
/// # Errors
///
/// Returns [`ExportError`] on serialization or write failure.
pub fn write_json<W: Write>(mut w: W, records: &[PoiRecord]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut w, records)?;
    writeln!(w)?;
    Ok(())
}

/// Read back a JSON export.
///
/// # Errors
///
/// Returns [`ExportError::Json`] when the input is not an array of records.
pub fn read_json<R: Read>(r: R) -> Result<Vec<PoiRecord>, ExportError> {
    Ok(serde_json::from_reader(r)?)
}

/// CSV with a header row. Null values are empty cells.
///
/// # Errors
///
/// Returns [`ExportError::Io`] on write failure.
pub fn write_csv<W: Write>(mut w: W, records: &[PoiRecord]) -> Result<(), ExportError> {
    let header: Vec<String> = CSV_HEADER.iter().map(|h| (*h).to_string()).collect();
    write_row(&mut w, &header)?;
    for record in records {
        write_row(&mut w, &csv_row(record))?;
    }
    Ok(())
}

/// Flatten one record into CSV cells, in [`CSV_HEADER`] order.
#[must_use]
pub fn csv_row(record: &PoiRecord) -> Vec<String> {
    let join = |set: &std::collections::BTreeSet<String>| {
        set.iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(TAG_DELIMITER)
    };
    let opt = |value: Option<String>| value.unwrap_or_default();

    vec![
        record.id.clone(),
        record.name.clone(),
        record.poi_type.to_string(),
        join(&record.category_tags),
        record.neighborhood.clone(),
        opt(record.price_range.map(|p| p.to_string())),
        record.halal.to_string(),
        opt(record.cuisine.as_ref().map(join)),
        join(&record.interest_tags),
        opt(record.coordinates.lat().map(|v| v.to_string())),
        opt(record.coordinates.lon().map(|v| v.to_string())),
        record.typical_duration_minutes.to_string(),
        opt(record.best_time_of_day.map(|t| t.to_string())),
        record.short_description.clone(),
        record.source_url.clone(),
        record
            .last_updated_ts
            .to_rfc3339_opts(SecondsFormat::AutoSi, true),
    ]
}

fn needs_quotes(field: &str) -> bool {
    field.contains(CSV_SEPARATOR)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
}

fn write_row<W: Write>(mut w: W, row: &[String]) -> std::io::Result<()> {
    let mut first = true;
    for cell in row {
        if first {
            first = false;
        } else {
            write!(w, "{CSV_SEPARATOR}")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::TimeZone;
    use tpoi_core::{Coordinates, Halal, PoiType, TimeOfDay};

    use super::*;

    fn make_record() -> PoiRecord {
        PoiRecord {
            id: "0123456789ab".to_string(),
            name: "Sushi Ao, Ginza".to_string(),
            poi_type: PoiType::Restaurant,
            category_tags: BTreeSet::from(["Sushi".to_string(), "Seafood".to_string()]),
            neighborhood: "Ginza".to_string(),
            price_range: Some(4),
            halal: Halal::Unknown,
            cuisine: Some(BTreeSet::from(["Sushi".to_string()])),
            interest_tags: BTreeSet::from([
                "Sushi".to_string(),
                "Seafood".to_string(),
                "Popular".to_string(),
            ]),
            coordinates: Coordinates::new(35.6712, 139.765),
            typical_duration_minutes: 60,
            best_time_of_day: Some(TimeOfDay::Night),
            short_description: "Counter seating, \"omakase\" only.".to_string(),
            source_url: "https://tabelog.com/en/tokyo/A1301/A130101/13001234/".to_string(),
            last_updated_ts: Utc.with_ymd_and_hms(2026, 4, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn csv_header_and_quoting() {
        let bytes = render(&[make_record()], ExportFormat::Csv).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "0123456789ab,\"Sushi Ao, Ginza\",restaurant,Seafood|Sushi,Ginza,4,unknown,Sushi,\
             Popular|Seafood|Sushi,35.6712,139.765,60,night,\
             \"Counter seating, \"\"omakase\"\" only.\",\
             https://tabelog.com/en/tokyo/A1301/A130101/13001234/,2026-04-01T09:30:00Z"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn csv_nulls_are_empty_cells() {
        let mut record = make_record();
        record.price_range = None;
        record.cuisine = None;
        record.coordinates = Coordinates::unknown();
        record.best_time_of_day = None;
        let row = csv_row(&record);
        assert_eq!(row.len(), CSV_HEADER.len());
        assert_eq!(row[5], "");
        assert_eq!(row[7], "");
        assert_eq!(row[9], "");
        assert_eq!(row[10], "");
        assert_eq!(row[12], "");
    }

    #[test]
    fn json_keeps_field_order_and_non_ascii() {
        let mut record = make_record();
        record.name = "浅草寺".to_string();
        let text =
            String::from_utf8(render(&[record.clone()], ExportFormat::Json).unwrap()).unwrap();
        assert!(text.contains("浅草寺"));
        let id_pos = text.find("\"id\"").unwrap();
        let type_pos = text.find("\"type\"").unwrap();
        let ts_pos = text.find("\"last_updated_ts\"").unwrap();
        assert!(id_pos < type_pos && type_pos < ts_pos);

        let back = read_json(text.as_bytes()).unwrap();
        assert_eq!(back, vec![record]);
    }

    #[test]
    fn export_file_name_format() {
        let at = Utc.with_ymd_and_hms(2026, 4, 1, 9, 5, 7).unwrap();
        assert_eq!(
            export_file_name("gotokyo_events", at, ExportFormat::Csv),
            "gotokyo_events_20260401_090507.csv"
        );
        assert_eq!(ExportFormat::Json.extension(), "json");
    }
}
