//! Visit duration and best time-of-day estimation.

use std::collections::BTreeSet;

use tpoi_core::{PoiType, SourceKind, TimeOfDay};

use crate::rules::{first_effect, DURATION_RULES, TIME_OF_DAY_RULES};

pub const DEFAULT_DURATION_MINUTES: u32 = 90;
pub const RESTAURANT_DURATION_MINUTES: u32 = 60;

/// Typical visit length in minutes. Always positive.
#[must_use]
pub fn typical_duration(
    poi_type: PoiType,
    name: &str,
    description: &str,
    category_tags: &BTreeSet<String>,
) -> u32 {
    if poi_type == PoiType::Restaurant {
        return RESTAURANT_DURATION_MINUTES;
    }

    let tags = category_tags
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    let text = format!("{name} {description} {tags}").to_lowercase();
    first_effect(DURATION_RULES, &text).unwrap_or(DEFAULT_DURATION_MINUTES)
}

/// Best time of day from keywords in the name, description and date text.
///
/// Directory listings rarely carry time words; for those the price tier
/// stands in: dinner-priced places (tier 3 and up) suggest night, cheaper
/// ones afternoon.
#[must_use]
pub fn best_time_of_day(
    kind: SourceKind,
    name: &str,
    description: &str,
    date_text: &str,
    price_tier: Option<u8>,
) -> Option<TimeOfDay> {
    let text = format!("{name} {description} {date_text}").to_lowercase();
    if let Some(time) = first_effect(TIME_OF_DAY_RULES, &text) {
        return Some(time);
    }

    match (kind, price_tier) {
        (SourceKind::Directory, Some(tier)) if tier >= 3 => Some(TimeOfDay::Night),
        (SourceKind::Directory, Some(_)) => Some(TimeOfDay::Afternoon),
        _ => None,
    }
}
