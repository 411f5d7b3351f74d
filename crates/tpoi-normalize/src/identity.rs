//! Stable POI identity.

use sha2::{Digest, Sha256};
use url::Url;

/// Hex characters kept from the digest (48 bits).
pub const ID_LEN: usize = 12;

/// Resolve `raw` against `base` and return an absolute http(s) URL.
///
/// Fragments are dropped; query strings are kept since directory listings
/// encode the POI in them. Returns `None` for empty input, unparseable input,
/// and schemes other than http(s).
#[must_use]
pub fn canonicalize_url(raw: &str, base: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let mut url = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base).ok()?.join(raw).ok()?,
        Err(_) => return None,
    };

    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_fragment(None);

    Some(url.to_string())
}

/// Derive the POI id from its canonical URL, or from the name when no URL
/// could be resolved.
///
/// Returns an empty string when both inputs are empty; validation rejects
/// such records.
#[must_use]
pub fn poi_id(canonical_url: &str, fallback_name: &str) -> String {
    let key = if canonical_url.is_empty() {
        fallback_name
    } else {
        canonical_url
    };
    if key.is_empty() {
        return String::new();
    }

    let digest = format!("{:x}", Sha256::digest(key.as_bytes()));
    digest[..ID_LEN].to_string()
}
