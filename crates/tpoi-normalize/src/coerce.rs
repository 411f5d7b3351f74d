//! Raw text to typed field coercion.
//!
//! Every function here is total: unparseable input resolves to `None`, a
//! documented default, or an empty value. Nothing panics or returns an error.

use std::sync::LazyLock;

use regex::Regex;
use tpoi_core::{Coordinates, Halal, SourceKind};

use crate::rules::{first_effect, NEIGHBORHOODS};

/// Default neighborhood when the page names none.
pub const DEFAULT_NEIGHBORHOOD: &str = "Tokyo";

static PRICE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[¥￥,0-9]+").expect("valid regex"));
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+").expect("valid regex"));
static SCRIPT_LAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']lat(?:itude)?["']\s*:\s*["']?(-?\d+(?:\.\d+)?)"#).expect("valid regex")
});
static SCRIPT_LON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["'](?:lng|lon|longitude)["']\s*:\s*["']?(-?\d+(?:\.\d+)?)"#)
        .expect("valid regex")
});
static MAP_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:@|,|[?&](?:q|ll|query)=)(-?\d+\.\d+)(?:,|%2C)\s*(-?\d+\.\d+)")
        .expect("valid regex")
});

/// Trim and collapse internal whitespace runs to a single space.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First candidate that is non-empty after [`clean_text`].
#[must_use]
pub fn first_clean(candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .map(|c| clean_text(c))
        .find(|c| !c.is_empty())
}

/// Maps a yen amount onto the 1–4 price tier scale.
///
/// `0` carries no price signal and maps to `None`.
#[must_use]
pub fn price_tier(yen: u64) -> Option<u8> {
    match yen {
        0 => None,
        1..=999 => Some(1),
        1_000..=3_999 => Some(2),
        4_000..=9_999 => Some(3),
        _ => Some(4),
    }
}

/// Parses a price tier from free text such as `"Dinner: ¥10,000~¥14,999"`.
///
/// Takes the largest amount found. Returns `None` when the text has no
/// digits or every amount is zero.
#[must_use]
pub fn parse_price_tier(text: &str) -> Option<u8> {
    let max = PRICE_RUN_RE
        .find_iter(text)
        .filter_map(|m| {
            let digits: String = m.as_str().chars().filter(char::is_ascii_digit).collect();
            if digits.is_empty() {
                None
            } else {
                digits.parse::<u64>().ok()
            }
        })
        .max();

    match max {
        Some(yen) => price_tier(yen),
        None => {
            tracing::debug!(text, "no price amount in text");
            None
        }
    }
}

/// Parses a rating such as `"3.58"`.
///
/// Falls back to the first decimal-looking substring, then to `0.0`.
#[must_use]
pub fn parse_rating(text: &str) -> f64 {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() {
            return value;
        }
    }
    DECIMAL_RE
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or_else(|| {
            tracing::debug!(text, "unparseable rating, defaulting to 0.0");
            0.0
        })
}

/// Scans script blobs, then map-link hrefs, for a latitude/longitude pair.
///
/// The first in-range pair wins. Out-of-range values are skipped rather than
/// clamped, and nothing found yields [`Coordinates::unknown`].
#[must_use]
pub fn parse_coordinates(scripts: &[String], map_hrefs: &[String]) -> Coordinates {
    let from_scripts = scripts.iter().find_map(|blob| {
        let lat = capture_f64(&SCRIPT_LAT_RE, blob)?;
        let lon = capture_f64(&SCRIPT_LON_RE, blob)?;
        in_range(lat, lon)
    });
    if let Some(coords) = from_scripts {
        return coords;
    }

    let from_links = map_hrefs.iter().find_map(|href| {
        MAP_LINK_RE.captures_iter(href).find_map(|cap| {
            let lat = cap.get(1)?.as_str().parse::<f64>().ok()?;
            let lon = cap.get(2)?.as_str().parse::<f64>().ok()?;
            in_range(lat, lon)
        })
    });

    from_links.unwrap_or_else(|| {
        if !scripts.is_empty() || !map_hrefs.is_empty() {
            tracing::debug!(
                scripts = scripts.len(),
                map_links = map_hrefs.len(),
                "no coordinates found"
            );
        }
        Coordinates::unknown()
    })
}

fn capture_f64(re: &Regex, haystack: &str) -> Option<f64> {
    re.captures(haystack)?.get(1)?.as_str().parse::<f64>().ok()
}

fn in_range(lat: f64, lon: f64) -> Option<Coordinates> {
    ((-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon))
        .then(|| Coordinates::new(lat, lon))
}

/// Canonical neighborhood name for a location string.
///
/// Directory listings format the area as `"Ginza / Sushi"`; only the part
/// before the first slash is considered for those.
#[must_use]
pub fn clean_neighborhood(raw: &str, kind: SourceKind) -> String {
    let area = match kind {
        SourceKind::Directory => raw.split('/').next().unwrap_or(raw),
        SourceKind::Event => raw,
    };
    let area = clean_text(area);
    if area.is_empty() {
        return DEFAULT_NEIGHBORHOOD.to_string();
    }

    first_effect(NEIGHBORHOODS, &area.to_lowercase())
        .map_or_else(|| title_case(&area), str::to_string)
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
///
/// `"naka-meguro"` becomes `"Naka-Meguro"`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Halal status from explicit wording in lowercased page text.
///
/// Negative phrases are checked first so "non-halal" never reads as halal.
#[must_use]
pub fn parse_halal(lower: &str) -> Halal {
    const NEGATIVE: &[&str] = &["non-halal", "non halal", "not halal"];
    const POSITIVE: &[&str] = &[
        "halal certified",
        "halal-certified",
        "halal friendly",
        "halal-friendly",
        "halal menu",
    ];

    if NEGATIVE.iter().any(|p| lower.contains(p)) {
        Halal::False
    } else if POSITIVE.iter().any(|p| lower.contains(p)) {
        Halal::True
    } else {
        Halal::Unknown
    }
}
