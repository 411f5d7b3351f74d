//! Final validation of a draft and defaulting into a [`PoiRecord`].

use tpoi_core::{Coordinates, Halal, PoiRecord, PoiType};

use crate::coerce::DEFAULT_NEIGHBORHOOD;
use crate::context::RunContext;
use crate::describe::truncate_at_sentence;
use crate::draft::PoiDraft;
use crate::error::Rejection;
use crate::tags::sentinel_tag;
use crate::temporal::DEFAULT_DURATION_MINUTES;

/// Names shorter than this (in chars, after trimming) are rejected.
pub const MIN_NAME_CHARS: usize = 3;

impl PoiDraft {
    /// Validate the draft and fill remaining gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when `id`, `name` or `type` is missing, the
    /// name is too short or denylisted, or the source URL is a landing page.
    pub fn finalize(self, ctx: &RunContext) -> Result<PoiRecord, Rejection> {
        let best_name = self.best_known_name();

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| Rejection::MissingField {
                field: "id",
                name: best_name.clone(),
            })?;
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Rejection::MissingField {
                field: "name",
                name: best_name.clone(),
            })?;
        let poi_type = self.poi_type.ok_or_else(|| Rejection::MissingField {
            field: "type",
            name: best_name,
        })?;

        if name.chars().count() < MIN_NAME_CHARS {
            return Err(Rejection::NameTooShort {
                name,
                min_chars: MIN_NAME_CHARS,
            });
        }
        if ctx.is_denied_name(&name) {
            return Err(Rejection::DeniedName { name });
        }
        let source_url = self.source_url.unwrap_or_default();
        if ctx.is_landing_page(&source_url) {
            return Err(Rejection::LandingPage {
                url: source_url,
                name,
            });
        }

        let mut category_tags = self.category_tags;
        if category_tags.is_empty() {
            category_tags.insert(sentinel_tag(ctx.kind(), None));
        }
        let mut interest_tags = self.interest_tags;
        interest_tags.extend(category_tags.iter().cloned());

        let neighborhood = self
            .neighborhood
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NEIGHBORHOOD.to_string());

        let cuisine = if poi_type == PoiType::Restaurant {
            self.cuisine.filter(|c| !c.is_empty())
        } else {
            None
        };

        let max_chars = ctx.description_max_chars;
        let short_description = truncate_at_sentence(
            self.short_description.as_deref().unwrap_or(&name),
            max_chars,
            max_chars / 2,
        );

        Ok(PoiRecord {
            id,
            name,
            poi_type,
            category_tags,
            neighborhood,
            price_range: self.price_range.filter(|p| (1..=4).contains(p)),
            halal: self.halal.unwrap_or(Halal::Unknown),
            cuisine,
            interest_tags,
            coordinates: self.coordinates.unwrap_or_else(Coordinates::unknown),
            typical_duration_minutes: self
                .typical_duration_minutes
                .filter(|m| *m > 0)
                .unwrap_or(DEFAULT_DURATION_MINUTES),
            best_time_of_day: self.best_time_of_day,
            short_description,
            source_url,
            last_updated_ts: ctx.now(),
        })
    }
}
