//! Category, interest and cuisine tag inference.

use std::collections::BTreeSet;

use tpoi_core::{RawPage, SourceKind};

use crate::coerce::clean_text;
use crate::rules::{all_effects, CATEGORY_RULES, SITUATIONAL_RULES};

/// Explicit tag candidates at or above this length are page prose, not tags.
pub const MAX_TAG_CHARS: usize = 50;

/// Rating at which a listing counts as popular.
pub const POPULAR_RATING: f64 = 3.5;
/// Rating at which a listing counts as highly rated.
pub const HIGHLY_RATED_RATING: f64 = 3.7;

/// Category tags for a page.
///
/// Explicit tag markup wins; directory sources also count their listing
/// category as explicit. Without explicit tags, keyword rules run over the
/// name and description. An empty result falls back to [`sentinel_tag`].
#[must_use]
pub fn category_tags(
    page: &RawPage,
    kind: SourceKind,
    name: &str,
    description: &str,
) -> BTreeSet<String> {
    let mut tags: BTreeSet<String> = page
        .raw_tag_candidates
        .iter()
        .map(|t| clean_text(t))
        .filter(|t| !t.is_empty() && t.chars().count() < MAX_TAG_CHARS)
        .collect();

    let category = listing_category(page);
    if kind == SourceKind::Directory {
        if let Some(category) = &category {
            tags.insert(category.clone());
        }
    }

    if tags.is_empty() {
        let text = format!("{name} {description}").to_lowercase();
        tags.extend(
            all_effects(CATEGORY_RULES, &text)
                .into_iter()
                .map(str::to_string),
        );
    }

    if tags.is_empty() {
        tags.insert(sentinel_tag(kind, category.as_deref()));
    }
    tags
}

/// Tag used when nothing else could be inferred.
#[must_use]
pub fn sentinel_tag(kind: SourceKind, category: Option<&str>) -> String {
    match kind {
        SourceKind::Event => "Event".to_string(),
        SourceKind::Directory => category.unwrap_or("Restaurant").to_string(),
    }
}

/// Category tags plus situational and rating tags.
///
/// Situational rules see the date text as well, so "evening illumination"
/// in a schedule line still yields `Nightlife`.
#[must_use]
pub fn interest_tags(
    category_tags: &BTreeSet<String>,
    name: &str,
    description: &str,
    date_text: &str,
    rating: Option<f64>,
) -> BTreeSet<String> {
    let mut tags = category_tags.clone();

    let text = format!("{name} {description} {date_text}").to_lowercase();
    tags.extend(
        all_effects(SITUATIONAL_RULES, &text)
            .into_iter()
            .map(str::to_string),
    );

    if let Some(rating) = rating {
        if rating >= POPULAR_RATING {
            tags.insert("Popular".to_string());
        }
        if rating >= HIGHLY_RATED_RATING {
            tags.insert("Highly Rated".to_string());
        }
    }
    tags
}

/// Cuisine labels from the listing category and the detail page's category
/// row. `None` when neither says anything.
#[must_use]
pub fn cuisine(page: &RawPage) -> Option<BTreeSet<String>> {
    let mut out: BTreeSet<String> = listing_category(page).into_iter().collect();
    if let Some(categories) = page
        .directory_details
        .as_ref()
        .and_then(|d| d.categories.as_deref())
    {
        out.extend(
            categories
                .split(',')
                .map(clean_text)
                .filter(|c| !c.is_empty()),
        );
    }
    (!out.is_empty()).then_some(out)
}

/// Cleaned `source_category`, if any.
#[must_use]
pub fn listing_category(page: &RawPage) -> Option<String> {
    page.source_category
        .as_deref()
        .map(clean_text)
        .filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpoi_core::DirectoryDetails;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn explicit_tags_win_over_keywords() {
        let page = RawPage {
            raw_tag_candidates: vec![" Traditional  Crafts ".into(), "".into(), "x".repeat(60)],
            ..RawPage::default()
        };
        let tags = category_tags(&page, SourceKind::Event, "Sakura Festival", "");
        assert_eq!(tags, set(&["Traditional Crafts"]));
    }

    #[test]
    fn keyword_rules_when_no_explicit_tags() {
        let tags = category_tags(
            &RawPage::default(),
            SourceKind::Event,
            "Sakura Festival",
            "A beautiful cherry blossom festival",
        );
        assert_eq!(tags, set(&["Festival", "Seasonal"]));
    }

    #[test]
    fn event_sentinel_when_nothing_fires() {
        let tags = category_tags(&RawPage::default(), SourceKind::Event, "Quiet Walk", "");
        assert_eq!(tags, set(&["Event"]));
    }

    #[test]
    fn directory_category_counts_as_explicit() {
        let page = RawPage {
            source_category: Some("Sushi".into()),
            ..RawPage::default()
        };
        let tags = category_tags(&page, SourceKind::Directory, "Sushi Ao", "fresh market fish");
        assert_eq!(tags, set(&["Sushi"]));
    }

    #[test]
    fn directory_sentinel_without_category() {
        let tags = category_tags(&RawPage::default(), SourceKind::Directory, "Kura", "");
        assert_eq!(tags, set(&["Restaurant"]));
    }

    #[test]
    fn interest_tags_are_superset_with_situational() {
        let categories = set(&["Festival", "Seasonal"]);
        let tags = interest_tags(
            &categories,
            "Sakura Festival",
            "A beautiful cherry blossom festival",
            "April, evening illumination",
            None,
        );
        assert!(tags.is_superset(&categories));
        assert!(tags.contains("Nightlife"));
        assert!(!tags.contains("Free Entry"));
    }

    #[test]
    fn rating_tags_by_threshold() {
        let base = set(&["Sushi"]);
        let low = interest_tags(&base, "", "", "", Some(3.49));
        assert!(!low.contains("Popular"));

        let popular = interest_tags(&base, "", "", "", Some(3.5));
        assert!(popular.contains("Popular"));
        assert!(!popular.contains("Highly Rated"));

        let high = interest_tags(&base, "", "", "", Some(3.72));
        assert!(high.contains("Popular"));
        assert!(high.contains("Highly Rated"));
    }

    #[test]
    fn cuisine_merges_listing_and_detail_categories() {
        let page = RawPage {
            source_category: Some("Sushi".into()),
            directory_details: Some(DirectoryDetails {
                categories: Some("Sushi, Seafood ,Izakaya".into()),
                ..DirectoryDetails::default()
            }),
            ..RawPage::default()
        };
        assert_eq!(cuisine(&page), Some(set(&["Izakaya", "Seafood", "Sushi"])));
        assert_eq!(cuisine(&RawPage::default()), None);
    }
}
