//! Raw per-page field extractions handed over by the element extractor.
//!
//! Every field is optional on the wire. An extractor that found nothing for a
//! field sends an empty list, an empty string, or omits the key; the pipeline
//! treats all three the same way.

use serde::{Deserialize, Serialize};

/// Raw strings extracted from one listing card or detail page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPage {
    /// Link to the POI page as found in the markup; may be relative.
    pub raw_url: String,
    pub raw_name_candidates: Vec<String>,
    pub raw_description_candidates: Vec<String>,
    pub raw_date_text: String,
    pub raw_location_text: String,
    /// Short strings from tag-bearing elements (chips, category labels).
    pub raw_tag_candidates: Vec<String>,
    pub raw_price_text: Option<String>,
    pub raw_rating_text: Option<String>,
    /// Inline `<script>` bodies, scanned for coordinates.
    pub raw_script_blobs: Vec<String>,
    /// `href`s of map links, scanned for coordinates.
    pub raw_map_link_hrefs: Vec<String>,
    /// Listing category for directory sources, e.g. `"Sushi"`.
    pub source_category: Option<String>,
    /// Explicit type hint, e.g. `"restaurant"`.
    pub raw_type: Option<String>,
    pub directory_details: Option<DirectoryDetails>,
}

/// Fields from a restaurant directory detail page.
///
/// Mirrors the rows of the "Restaurant information" table plus the
/// promotional comment block above it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryDetails {
    pub pr_comment_title: Option<String>,
    pub pr_comment_body: Option<String>,
    pub awards: Option<String>,
    pub remarks: Option<String>,
    pub private_rooms: Option<String>,
    /// Comma-separated category list, e.g. `"Sushi, Seafood"`.
    pub categories: Option<String>,
    /// "Average price" row; preferred over the listing card's price text.
    pub price_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_deserialize_as_empty() {
        let page: RawPage =
            serde_json::from_str(r#"{"raw_url": "/en/event/a.html"}"#).expect("valid json");
        assert_eq!(page.raw_url, "/en/event/a.html");
        assert!(page.raw_name_candidates.is_empty());
        assert!(page.raw_price_text.is_none());
        assert!(page.directory_details.is_none());
    }

    #[test]
    fn directory_details_deserialize_partially() {
        let page: RawPage = serde_json::from_str(
            r#"{"directory_details": {"awards": "Bronze 2025", "private_rooms": "Available"}}"#,
        )
        .expect("valid json");
        let details = page.directory_details.expect("details present");
        assert_eq!(details.awards.as_deref(), Some("Bronze 2025"));
        assert_eq!(details.private_rooms.as_deref(), Some("Available"));
        assert!(details.remarks.is_none());
    }
}
