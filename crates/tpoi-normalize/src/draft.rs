//! The in-progress record filled by the per-page stages.

use std::collections::BTreeSet;

use tpoi_core::{Coordinates, Halal, PoiType, TimeOfDay};

/// A POI under construction.
///
/// Every stage writes only the fields it owns. Nothing is validated until
/// [`PoiDraft::finalize`], which either yields a [`tpoi_core::PoiRecord`] or a
/// [`crate::Rejection`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub poi_type: Option<PoiType>,
    pub category_tags: BTreeSet<String>,
    pub neighborhood: Option<String>,
    pub price_range: Option<u8>,
    pub halal: Option<Halal>,
    pub cuisine: Option<BTreeSet<String>>,
    pub interest_tags: BTreeSet<String>,
    pub coordinates: Option<Coordinates>,
    pub typical_duration_minutes: Option<u32>,
    pub best_time_of_day: Option<TimeOfDay>,
    pub short_description: Option<String>,
    pub source_url: Option<String>,
}

impl PoiDraft {
    /// Name to report in rejections when the record never got one.
    #[must_use]
    pub fn best_known_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.source_url.as_deref())
            .unwrap_or("<unnamed>")
            .to_string()
    }
}
