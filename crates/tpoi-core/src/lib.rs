//! Shared domain types and configuration for the tpoi workspace.

mod app_config;
mod config;
pub mod poi;
pub mod raw;
pub mod sources;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use poi::{Coordinates, Halal, PoiRecord, PoiType, TimeOfDay};
pub use raw::{DirectoryDetails, RawPage};
pub use sources::{load_sources, SourceConfig, SourceKind, SourcesFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[from] serde_yaml::Error),

    #[error("sources validation failed: {0}")]
    Validation(String),
}
