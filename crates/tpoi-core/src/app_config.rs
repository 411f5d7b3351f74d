use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Path to the YAML list of configured sources.
    pub sources_path: PathBuf,
    /// Directory that receives JSON/CSV exports.
    pub output_dir: PathBuf,
    /// Upper bound on pages normalized concurrently on the blocking pool.
    pub max_concurrent_pages: usize,
    /// Hard bound on `short_description`, in characters.
    pub description_max_chars: usize,
}
