use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::poi::PoiType;
use crate::ConfigError;

/// Landing and index pages that list POIs without being one.
pub const DEFAULT_EXCLUDED_URL_SUFFIXES: &[&str] = &[
    "/spot/index.html",
    "/event/index.html",
    "/tourists/spot/suburbs/fromtokyo/index.html",
];

/// Link texts that the card extractor picks up as names but are navigation.
pub const DEFAULT_NAME_DENYLIST: &[&str] = &["More details here", "Beyond Tokyo"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Tourism event listings; records default to `event_venue`.
    Event,
    /// Restaurant directory listings; records default to `restaurant`.
    Directory,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Event => write!(f, "event"),
            SourceKind::Directory => write!(f, "directory"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub kind: SourceKind,
    /// Base used to resolve relative links, e.g. `"https://www.gotokyo.org/"`.
    pub base_url: String,
    pub default_type: Option<PoiType>,
    pub excluded_url_suffixes: Option<Vec<String>>,
    pub name_denylist: Option<Vec<String>>,
    pub notes: Option<String>,
}

impl SourceConfig {
    /// Generate a file-name-safe slug from the source name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else if c == ' ' || c == '-' {
                    '_'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('_')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// The type assigned when a page carries no recognizable type hint.
    #[must_use]
    pub fn fallback_type(&self) -> PoiType {
        self.default_type.unwrap_or(match self.kind {
            SourceKind::Event => PoiType::EventVenue,
            SourceKind::Directory => PoiType::Restaurant,
        })
    }

    #[must_use]
    pub fn excluded_suffixes(&self) -> Vec<String> {
        self.excluded_url_suffixes.clone().unwrap_or_else(|| {
            DEFAULT_EXCLUDED_URL_SUFFIXES
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        })
    }

    #[must_use]
    pub fn denied_names(&self) -> Vec<String> {
        self.name_denylist.clone().unwrap_or_else(|| {
            DEFAULT_NAME_DENYLIST
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

impl SourcesFile {
    /// Look up a source by name or slug, case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SourceConfig> {
        let wanted = name.trim().to_lowercase();
        self.sources
            .iter()
            .find(|s| s.name.to_lowercase() == wanted || s.slug() == wanted)
    }
}

/// Load and validate the sources configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sources_file: SourcesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SourcesFileParse)?;

    validate_sources(&sources_file)?;

    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for source in &sources_file.sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name must be non-empty".to_string(),
            ));
        }

        let base = source.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "source '{}' has base_url '{}'; must be an absolute http(s) URL",
                source.name, source.base_url
            )));
        }

        let lower_name = source.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name: '{}'",
                source.name
            )));
        }

        let slug = source.slug();
        if slug.is_empty() {
            return Err(ConfigError::Validation(format!(
                "source '{}' produces an empty slug",
                source.name
            )));
        }
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source slug: '{}' (from source '{}')",
                slug, source.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
