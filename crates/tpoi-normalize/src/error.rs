use thiserror::Error;

/// Why a page did not become a POI record.
///
/// Rejections are per-record and never abort a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("missing required field '{field}' (name: {name:?})")]
    MissingField { field: &'static str, name: String },

    #[error("name {name:?} is shorter than {min_chars} characters")]
    NameTooShort { name: String, min_chars: usize },

    #[error("name {name:?} is a known placeholder")]
    DeniedName { name: String },

    #[error("{url} is a generic landing page (name: {name:?})")]
    LandingPage { url: String, name: String },
}

impl Rejection {
    /// Stable label used for summary counts and log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::MissingField { .. } => "missing_field",
            Rejection::NameTooShort { .. } => "name_too_short",
            Rejection::DeniedName { .. } => "denied_name",
            Rejection::LandingPage { .. } => "landing_page",
        }
    }

    /// Best-known name of the dropped record.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Rejection::MissingField { name, .. }
            | Rejection::NameTooShort { name, .. }
            | Rejection::DeniedName { name }
            | Rejection::LandingPage { name, .. } => name,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
